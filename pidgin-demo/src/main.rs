//! Pidgin normalizer CLI.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use pidgin_core::TextNormalizer;
use pidgin_demo::logging::{init_logging, LogConfig, LogFormat};
use pidgin_demo::records::{process, write_table, write_trace, RecordFormat};
use pidgin_demo::rules_file::build_table;
use pidgin_demo::SAMPLE_INPUTS;
use tracing::{debug, info};

mod cli;

use crate::cli::{Cli, FormatArg, LogFormatArg};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = cli.validate() {
        error.exit();
    }
    if let Err(error) = init_logging(&log_config_from_cli(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    if let Err(error) = run(&cli) {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let rules = build_table(cli.rules.as_deref())?;
    let normalizer = TextNormalizer::new(rules);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list_rules {
        for (index, rule) in normalizer.rules().iter().enumerate() {
            writeln!(out, "{index:>3}  {rule}")?;
        }
        return Ok(());
    }

    let Some(input) = cli.input.as_deref() else {
        if cli.trace {
            for raw in SAMPLE_INPUTS {
                write_trace(&normalizer, raw, &mut out)?;
            }
            return Ok(());
        }
        return write_table(&normalizer, &SAMPLE_INPUTS, &mut out);
    };

    let format = match cli.format {
        FormatArg::Plain => RecordFormat::Plain,
        FormatArg::Jsonl => RecordFormat::Jsonl,
    };

    if cli.trace {
        return trace_records(&normalizer, input, &mut out);
    }

    let summary = if input == Path::new("-") {
        debug!("reading records from stdin");
        process(&normalizer, io::stdin().lock(), &mut out, format, &cli.field)?
    } else {
        debug!(path = %input.display(), "reading records");
        let file = File::open(input)
            .with_context(|| format!("failed to open input {}", input.display()))?;
        process(&normalizer, BufReader::new(file), &mut out, format, &cli.field)?
    };

    info!(
        records = summary.records,
        non_text = summary.non_text,
        empty = summary.empty,
        "normalization complete"
    );
    Ok(())
}

fn trace_records<W: Write>(normalizer: &TextNormalizer, input: &Path, mut out: W) -> Result<()> {
    let text = if input == Path::new("-") {
        io::read_to_string(io::stdin())?
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("failed to read input {}", input.display()))?
    };

    for line in text.lines() {
        write_trace(normalizer, line, &mut out)?;
    }
    Ok(())
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        with_ansi: io::stderr().is_terminal(),
    }
}
