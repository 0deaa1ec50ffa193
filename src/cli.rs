//! CLI definition for notion-dev-logger.

use crate::logging::LogTarget;
use clap::Parser;
use std::path::PathBuf;

/// MCP server that records development sessions in a Notion database
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Logging output: 0/off, 2/stderr (default), or filename
    #[arg(short, long, default_value = "stderr")]
    pub log: LogTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["notion-dev-logger"]).unwrap();
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
        assert_eq!(cli.log, LogTarget::Stderr);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "notion-dev-logger",
            "--config",
            "logger.yaml",
            "-v",
            "--log",
            "dev.log",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("logger.yaml")));
        assert!(cli.verbose);
        assert_eq!(cli.log, LogTarget::File(PathBuf::from("dev.log")));
    }

    #[test]
    fn test_stdout_log_target_rejected() {
        assert!(Cli::try_parse_from(["notion-dev-logger", "--log", "stdout"]).is_err());
    }
}
