//! Frame-line decoder.
//!
//! Pure functions turning one raw text line into a validated
//! [`Frame`]. The grammar is fixed and line-oriented:
//!
//! ```text
//! "[" SOURCE ":" BIT9 " " HEX ":" OFFSET "ms:" OFFSETX "ms:" MILLIS "ms]"
//! SOURCE = "Master" | "Slave"
//! BIT9, OFFSET, OFFSETX, MILLIS = one or more decimal digits
//! HEX    = one or more word characters (letters/digits/underscore)
//! ```
//!
//! Matching is anchored at the start of the line and only a prefix has to
//! match: a valid frame followed by trailing garbage still decodes. Any
//! other line is rejected whole; there are no partial records.

use crate::model::{DecodeError, Frame, Source};

/// Minimal cursor over the unconsumed remainder of a line.
///
/// Each method either consumes its token and advances, or leaves the
/// cursor untouched and reports failure, which keeps the grammar functions
/// below free of index arithmetic.
struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    /// Consume an exact literal.
    fn literal(&mut self, lit: &str) -> bool {
        match self.rest.strip_prefix(lit) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    /// Consume one or more ASCII decimal digits.
    fn digits(&mut self) -> Option<&'a str> {
        self.take_while(|b| b.is_ascii_digit())
    }

    /// Consume one or more word characters (letters, digits, underscore).
    fn word(&mut self) -> Option<&'a str> {
        self.take_while(|b| b.is_ascii_alphanumeric() || b == b'_')
    }

    fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> Option<&'a str> {
        let end = self
            .rest
            .bytes()
            .position(|b| !pred(b))
            .unwrap_or(self.rest.len());
        if end == 0 {
            return None;
        }
        let (token, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(token)
    }
}

/// Decode one line into a [`Frame`], reporting why it was rejected.
///
/// The distinction between [`DecodeError::Mismatch`] and
/// [`DecodeError::FieldOverflow`] exists for diagnostics only; callers
/// treat both as "drop the line and move on".
pub fn decode(line: &str) -> Result<Frame, DecodeError> {
    let mut s = Scanner::new(line);

    if !s.literal("[") {
        return Err(DecodeError::Mismatch);
    }

    let source = if s.literal("Master:") {
        Source::Master
    } else if s.literal("Slave:") {
        Source::Slave
    } else {
        return Err(DecodeError::Mismatch);
    };

    let bit9 = field_u16(s.digits())?;
    if !s.literal(" ") {
        return Err(DecodeError::Mismatch);
    }

    let data_hex = s.word().ok_or(DecodeError::Mismatch)?;
    if !s.literal(":") {
        return Err(DecodeError::Mismatch);
    }

    let offset = field_u64(s.digits())?;
    if !s.literal("ms:") {
        return Err(DecodeError::Mismatch);
    }

    let offset_x = field_u64(s.digits())?;
    if !s.literal("ms:") {
        return Err(DecodeError::Mismatch);
    }

    let millis = field_u64(s.digits())?;
    if !s.literal("ms]") {
        return Err(DecodeError::Mismatch);
    }

    // Anything after the closing bracket is ignored: prefix match only.
    Ok(Frame {
        source,
        bit9,
        data_hex: data_hex.to_string(),
        offset,
        offset_x,
        millis,
    })
}

/// Decode one line, collapsing the rejection reason.
///
/// This is the everyday entry point: callers that only need "frame or not"
/// use this and leave counting of the two rejection kinds to diagnostics.
pub fn parse(line: &str) -> Option<Frame> {
    decode(line).ok()
}

fn field_u16(digits: Option<&str>) -> Result<u16, DecodeError> {
    let digits = digits.ok_or(DecodeError::Mismatch)?;
    digits.parse().map_err(|_| DecodeError::FieldOverflow)
}

fn field_u64(digits: Option<&str>) -> Result<u64, DecodeError> {
    let digits = digits.ok_or(DecodeError::Mismatch)?;
    digits.parse().map_err(|_| DecodeError::FieldOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== Valid lines =====

    #[test]
    fn decodes_master_frame() {
        let frame = parse("[Master:5 1A2B:12ms:3ms:450ms]").expect("valid line");
        assert_eq!(frame.source, Source::Master);
        assert_eq!(frame.bit9, 5);
        assert_eq!(frame.data_hex, "1A2B");
        assert_eq!(frame.offset, 12);
        assert_eq!(frame.offset_x, 3);
        assert_eq!(frame.millis, 450);
    }

    #[test]
    fn decodes_slave_frame() {
        let frame = parse("[Slave:2 FF:5ms:1ms:100ms]").expect("valid line");
        assert_eq!(frame.source, Source::Slave);
        assert_eq!(frame.bit9, 2);
        assert_eq!(frame.data_hex, "FF");
    }

    #[test]
    fn trailing_garbage_after_bracket_still_decodes() {
        let frame = parse("[Master:5 1A2B:12ms:3ms:450ms] and more junk");
        assert!(frame.is_some());
    }

    #[test]
    fn underscore_payload_is_a_word() {
        let frame = parse("[Slave:0 DE_AD:0ms:0ms:0ms]").expect("valid line");
        assert_eq!(frame.data_hex, "DE_AD");
    }

    #[test]
    fn reparsing_yields_identical_frame() {
        let line = "[Master:511 CAFE:7ms:2ms:99ms]";
        assert_eq!(parse(line), parse(line));
    }

    #[test]
    fn leading_zeros_parse_as_decimal() {
        let frame = parse("[Master:007 AB:001ms:000ms:010ms]").expect("valid line");
        assert_eq!(frame.bit9, 7);
        assert_eq!(frame.offset, 1);
        assert_eq!(frame.offset_x, 0);
        assert_eq!(frame.millis, 10);
    }

    // ===== Rejections =====

    #[test]
    fn rejects_missing_closing_bracket() {
        assert!(parse("[Master:5 1A2B:12ms:3ms:450ms").is_none());
    }

    #[test]
    fn rejects_unknown_source() {
        assert!(parse("[Monitor:5 1A2B:12ms:3ms:450ms]").is_none());
    }

    #[test]
    fn rejects_source_with_suffix() {
        // "Masterx" is not "Master" followed by ':'
        assert!(parse("[Masterx:5 1A2B:12ms:3ms:450ms]").is_none());
    }

    #[test]
    fn rejects_non_numeric_bit9() {
        assert!(parse("[Master:x 1A2B:12ms:3ms:450ms]").is_none());
    }

    #[test]
    fn rejects_non_numeric_offset() {
        assert!(parse("[Master:5 1A2B:abms:3ms:450ms]").is_none());
    }

    #[test]
    fn rejects_missing_ms_suffix() {
        assert!(parse("[Master:5 1A2B:12:3ms:450ms]").is_none());
    }

    #[test]
    fn rejects_empty_payload() {
        assert!(parse("[Master:5 :12ms:3ms:450ms]").is_none());
    }

    #[test]
    fn rejects_unanchored_frame() {
        // Grammar is anchored at the start of the line.
        assert!(parse("noise [Master:5 1A2B:12ms:3ms:450ms]").is_none());
    }

    #[test]
    fn rejects_empty_line() {
        assert!(parse("").is_none());
    }

    #[test]
    fn rejects_lowercase_source() {
        assert!(parse("[master:5 1A2B:12ms:3ms:450ms]").is_none());
    }

    // ===== Overflow =====

    #[test]
    fn bit9_overflow_drops_whole_line() {
        // 70000 does not fit in u16.
        assert_eq!(
            decode("[Master:70000 1A2B:12ms:3ms:450ms]"),
            Err(DecodeError::FieldOverflow)
        );
    }

    #[test]
    fn millis_overflow_drops_whole_line() {
        let line = "[Master:5 1A2B:12ms:3ms:99999999999999999999999ms]";
        assert_eq!(decode(line), Err(DecodeError::FieldOverflow));
    }

    #[test]
    fn bit9_at_width_limit_decodes() {
        let frame = parse("[Master:65535 AA:0ms:0ms:0ms]").expect("fits in u16");
        assert_eq!(frame.bit9, 65535);
    }

    #[test]
    fn grammar_failure_is_mismatch_not_overflow() {
        assert_eq!(decode("not a frame"), Err(DecodeError::Mismatch));
    }
}
