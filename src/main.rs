//! busmon - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// TUI monitor for Master/Slave bus sniffer frames
#[derive(Parser, Debug)]
#[command(name = "busmon")]
#[command(version)]
#[command(about = "Live monitor for Master/Slave bus sniffer frames")]
pub struct Args {
    /// Capture file to replay (reads piped stdin if not provided)
    pub file: Option<PathBuf>,

    /// Stream poll interval in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_ms: Option<u64>,

    /// Capture render mode
    #[arg(long, value_parser = ["millis", "hex", "plain", "source"])]
    pub render_mode: Option<String>,

    /// Path the notepad buffer is saved to
    #[arg(long)]
    pub notepad: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Resolve configuration with full precedence chain:
    // defaults -> config file -> env vars -> CLI args
    let config = {
        let config_file = busmon::config::load_config_with_precedence(args.config.clone())?;
        let merged = busmon::config::merge_config(config_file)?;
        let with_env = busmon::config::apply_env_overrides(merged);
        busmon::config::apply_cli_overrides(
            with_env,
            args.poll_ms,
            args.render_mode.clone(),
            args.notepad.clone(),
        )?
    };

    busmon::logging::init(&config.log_file_path)?;

    info!(config = ?config, "configuration loaded and resolved");

    // Pick the byte-stream source (capture file replay or piped stdin)
    let stream = busmon::stream::detect_stream(args.file.clone())?;

    busmon::view::run_with_stream(stream, config)?;

    Ok(())
}
