//! Command-line argument parsing for workorder

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// workorder - Turn a home-inspection report into a contractor work-order email
#[derive(Parser, Debug)]
#[command(name = "workorder")]
#[command(version = "0.3.0")]
#[command(about = "Answer a question from an inspection report and draft the contractor email", long_about = None)]
pub struct Args {
    /// Path to the inspection report (pdf, txt, or md)
    #[arg(value_name = "REPORT")]
    pub report: Option<PathBuf>,

    /// Report section to generate a work order for (prompted if omitted)
    #[arg(short = 'Q', long)]
    pub question: Option<String>,

    /// Maximum number of report excerpts handed to the model
    #[arg(long)]
    pub top_k: Option<usize>,

    /// Minimum relevance score for an excerpt (0.0 to 1.0)
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Verbosity level: default (normal), -v (verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except the email)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display the effective configuration (API key redacted)
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose > 0 {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

impl Verbosity {
    /// Whether progress output should be shown
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Whether the telemetry summary should be shown
    pub fn show_summary(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_and_question() {
        let args = Args::parse_from(["workorder", "report.pdf", "--question", "Roof"]);
        assert_eq!(args.report.as_ref().unwrap().to_str().unwrap(), "report.pdf");
        assert_eq!(args.question.as_deref(), Some("Roof"));
        assert_eq!(args.verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        let args = Args::parse_from(["workorder", "report.pdf", "-q", "-v"]);
        assert_eq!(args.verbosity(), Verbosity::Quiet);
        assert!(!args.verbosity().show_progress());
    }

    #[test]
    fn test_verbose_enables_summary() {
        let args = Args::parse_from(["workorder", "report.pdf", "-v"]);
        assert_eq!(args.verbosity(), Verbosity::Verbose);
        assert!(args.verbosity().show_summary());
    }

    #[test]
    fn test_config_subcommand() {
        let args = Args::parse_from(["workorder", "config"]);
        assert!(matches!(args.command, Some(Commands::Config)));
        assert!(args.report.is_none());
    }

    #[test]
    fn test_search_overrides() {
        let args = Args::parse_from([
            "workorder",
            "report.pdf",
            "--top-k",
            "2",
            "--threshold",
            "0.5",
        ]);
        assert_eq!(args.top_k, Some(2));
        assert_eq!(args.threshold, Some(0.5));
    }
}
