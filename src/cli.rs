//! CLI Argument Parsing
//!
//! Paths to watch are read from stdin; the command to run is the trailing
//! positional arguments. Everything else is a flag that overrides config.

use std::path::PathBuf;

use clap::Parser;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// Run a command whenever one of the files listed on stdin changes
#[derive(Parser, Debug)]
#[command(name = "watchrun")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Example: ls *.rs | watchrun -c cargo test")]
pub struct Cli {
    /// Terminate and restart a still-running command on change
    #[arg(short, long)]
    pub restart: bool,

    /// Clear the screen before every run
    #[arg(short, long)]
    pub clear: bool,

    /// Do not run the command at startup, wait for the first change
    #[arg(short, long)]
    pub postpone: bool,

    /// Emit events as NDJSON on stderr
    #[arg(long)]
    pub json: bool,

    /// Verbosity level (-v shows every event)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Color output mode
    #[arg(long, value_enum)]
    pub color: Option<ColorWhen>,

    /// Read configuration from this file instead of the user config
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Ignore paths beyond this count
    #[arg(long, value_name = "N")]
    pub max_targets: Option<usize>,

    /// Program to run, followed by its arguments
    #[arg(
        value_name = "PROGRAM",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_command_with_args() {
        let cli = Cli::try_parse_from(["watchrun", "make", "-j4", "test"]).unwrap();
        assert_eq!(cli.command, vec!["make", "-j4", "test"]);
        assert!(!cli.restart);
        assert!(!cli.postpone);
    }

    #[test]
    fn test_cli_flags_before_command() {
        let cli = Cli::try_parse_from(["watchrun", "-r", "-c", "-p", "--json", "./serve"]).unwrap();
        assert!(cli.restart);
        assert!(cli.clear);
        assert!(cli.postpone);
        assert!(cli.json);
        assert_eq!(cli.command, vec!["./serve"]);
    }

    #[test]
    fn test_cli_flags_after_program_belong_to_command() {
        let cli = Cli::try_parse_from(["watchrun", "grep", "-r", "todo"]).unwrap();
        assert!(!cli.restart);
        assert_eq!(cli.command, vec!["grep", "-r", "todo"]);
    }

    #[test]
    fn test_cli_requires_program() {
        assert!(Cli::try_parse_from(["watchrun", "-r"]).is_err());
    }

    #[test]
    fn test_cli_verbose_and_limits() {
        let cli = Cli::try_parse_from([
            "watchrun",
            "-v",
            "--max-targets",
            "3",
            "--color",
            "never",
            "true",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 1);
        assert_eq!(cli.max_targets, Some(3));
        assert_eq!(cli.color, Some(ColorWhen::Never));
    }
}
