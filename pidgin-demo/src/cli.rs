//! CLI argument definitions for the pidgin normalizer.

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Parser)]
#[command(
    name = "pidgin-norm",
    version,
    about = "Normalize noisy Nigerian Pidgin text for language-model training",
    long_about = "Normalize noisy Nigerian Pidgin text for language-model training.\n\n\
                  Without --input, prints the built-in sample table.\n\
                  Use --input - to read records from stdin."
)]
pub struct Cli {
    /// Records to normalize, one per line ('-' for stdin).
    #[arg(long = "input", short = 'i', value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Record format of the input and output.
    #[arg(long = "format", value_enum, default_value = "plain")]
    pub format: FormatArg,

    /// JSON field holding the text to normalize (jsonl format only).
    #[arg(long = "field", default_value = "text")]
    pub field: String,

    /// JSON file with extra rules, appended after the built-in table.
    ///
    /// The file holds an array of {"pattern": ..., "replacement": ...}
    /// objects. Patterns are matched as whole words, case-insensitively.
    #[arg(long = "rules", value_name = "PATH")]
    pub rules: Option<PathBuf>,

    /// Print the active rule table and exit.
    #[arg(long = "list-rules")]
    pub list_rules: bool,

    /// Print the output of every pipeline stage (plain format only).
    #[arg(long = "trace")]
    pub trace: bool,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "compact")]
    pub log_format: LogFormatArg,
}

impl Cli {
    /// Rejects flag combinations that depend on a value, not just presence.
    pub fn validate(&self) -> Result<(), clap::Error> {
        if self.trace && self.format == FormatArg::Jsonl {
            return Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "--trace prints plain text and cannot be used with --format jsonl",
            ));
        }
        Ok(())
    }
}

/// Record formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// One raw text record per line.
    Plain,
    /// One JSON value per line.
    Jsonl,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pidgin-norm").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn trace_with_plain_is_accepted() {
        assert!(parse(&["--trace"]).validate().is_ok());
        assert!(parse(&["--trace", "--format", "plain", "-i", "-"]).validate().is_ok());
    }

    #[test]
    fn trace_with_jsonl_is_rejected() {
        let err = parse(&["--trace", "--format", "jsonl", "-i", "-"])
            .validate()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
        assert!(err.to_string().contains("--format jsonl"));
    }

    #[test]
    fn jsonl_without_trace_is_accepted() {
        let cli = parse(&["--format", "jsonl", "--field", "body"]);
        assert!(cli.validate().is_ok());
        assert_eq!(cli.field, "body");
    }
}
