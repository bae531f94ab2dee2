//! Record-level driver: read raw records, normalize each one, write it out.
//!
//! Each record is normalized independently. Non-text JSON values are
//! normalized to `""` by the core; this driver is where they get logged.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use pidgin_core::{RawInput, TextNormalizer};
use serde_json::Value;
use tracing::{trace, warn};

static MISSING: Value = Value::Null;

/// How records are laid out in the input and output streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    /// One raw text record per line.
    Plain,
    /// One JSON value per line. Objects have `field` normalized in place;
    /// any other value is replaced by its normalized string.
    Jsonl,
}

/// Counts gathered over a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Records read.
    pub records: usize,
    /// Records whose value was not text.
    pub non_text: usize,
    /// Records that normalized to an empty string.
    pub empty: usize,
}

/// Normalizes every record from `reader` into `writer`.
///
/// # Errors
///
/// Fails on I/O errors, invalid UTF-8, or (for JSONL) a line that is not
/// valid JSON. Blank JSONL lines are skipped.
pub fn process<R, W>(
    normalizer: &TextNormalizer,
    reader: R,
    mut writer: W,
    format: RecordFormat,
    field: &str,
) -> Result<Summary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = Summary::default();
    let mut buf = String::new();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read line {line_no}"))?;

        match format {
            RecordFormat::Plain => {
                normalizer.normalize_into(&line, &mut buf);
                writeln!(writer, "{buf}")?;
                summary.records += 1;
                if buf.is_empty() {
                    summary.empty += 1;
                }
            }
            RecordFormat::Jsonl => {
                if line.trim().is_empty() {
                    continue;
                }
                let mut value: Value = serde_json::from_str(&line)
                    .with_context(|| format!("line {line_no}: invalid JSON"))?;
                let cleaned = normalize_value(normalizer, &mut value, field);

                summary.records += 1;
                match cleaned {
                    Cleaned::Text(true) => summary.empty += 1,
                    Cleaned::Text(false) => {}
                    Cleaned::NotText(kind) => {
                        warn!(line = line_no, kind, "non-text record normalized to empty string");
                        summary.non_text += 1;
                        summary.empty += 1;
                    }
                }
                serde_json::to_writer(&mut writer, &value)?;
                writeln!(writer)?;
            }
        }

        trace!(line = line_no, "record normalized");
    }

    writer.flush()?;
    Ok(summary)
}

enum Cleaned {
    // Carries whether the normalized text is empty.
    Text(bool),
    NotText(&'static str),
}

fn normalize_value(normalizer: &TextNormalizer, value: &mut Value, field: &str) -> Cleaned {
    let (cleaned, outcome) = {
        let target = match &*value {
            Value::Object(map) => map.get(field).unwrap_or(&MISSING),
            other => other,
        };
        let raw = RawInput::from(target);
        let outcome = if raw.is_text() {
            None
        } else {
            Some(raw.kind())
        };
        (normalizer.normalize(raw), outcome)
    };

    let is_empty = cleaned.is_empty();
    match value {
        Value::Object(map) => {
            map.insert(field.to_owned(), Value::String(cleaned));
        }
        other => *other = Value::String(cleaned),
    }

    match outcome {
        Some(kind) => Cleaned::NotText(kind),
        None => Cleaned::Text(is_empty),
    }
}

/// Writes the `RAW INPUT | NORMALIZED OUTPUT` table for `inputs`.
pub fn write_table<W: Write>(
    normalizer: &TextNormalizer,
    inputs: &[&str],
    mut writer: W,
) -> Result<()> {
    writeln!(writer, "{:<35} | NORMALIZED OUTPUT", "RAW INPUT")?;
    writeln!(writer, "{}", "-".repeat(60))?;
    for raw in inputs {
        writeln!(writer, "{:<35} | {}", raw, normalizer.normalize(*raw))?;
    }
    Ok(())
}

/// Writes every intermediate stage output for `input`.
pub fn write_trace<W: Write>(normalizer: &TextNormalizer, input: &str, mut writer: W) -> Result<()> {
    writeln!(writer, "{:<20} {:?}", "raw", input)?;
    for (stage, output) in normalizer.trace(input) {
        writeln!(writer, "{:<20} {:?}", stage.name(), output)?;
    }
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(input: &str, format: RecordFormat) -> (String, Summary) {
        let normalizer = TextNormalizer::default();
        let mut out = Vec::new();
        let summary = process(&normalizer, Cursor::new(input), &mut out, format, "text").unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn plain_records() {
        let (out, summary) = run("U dey go  market 2day???\n@@@\nNa so e be o.\n", RecordFormat::Plain);
        assert_eq!(out, "you dey go market 2day???\n\nna so e be o.\n");
        assert_eq!(
            summary,
            Summary {
                records: 3,
                non_text: 0,
                empty: 1
            }
        );
    }

    #[test]
    fn plain_handles_crlf() {
        let (out, _) = run("Wetin    be   dis one  shaa..\r\n", RecordFormat::Plain);
        assert_eq!(out, "wetin be dis one sha..\n");
    }

    #[test]
    fn jsonl_objects_are_cleaned_in_place() {
        let input = concat!(
            r#"{"id": 1, "text": "Abeggg help me  check d  time!"}"#,
            "\n",
            r#"{"id": 2, "text": null}"#,
            "\n",
            "\n",
            r#"{"id": 3, "text": [1, 2]}"#,
            "\n",
            r#"{"id": 4}"#,
            "\n",
        );
        let (out, summary) = run(input, RecordFormat::Jsonl);

        let rows: Vec<Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0]["id"], 1);
        assert_eq!(rows[0]["text"], "abeg help me check the time!");
        assert_eq!(rows[1]["text"], "");
        assert_eq!(rows[2]["text"], "");
        assert_eq!(rows[3]["text"], "");
        assert_eq!(
            summary,
            Summary {
                records: 4,
                non_text: 3,
                empty: 3
            }
        );
    }

    #[test]
    fn jsonl_bare_values() {
        let (out, summary) = run("\"U dey\"\n42\n", RecordFormat::Jsonl);
        assert_eq!(out, "\"you dey\"\n\"\"\n");
        assert_eq!(summary.non_text, 1);
    }

    #[test]
    fn jsonl_rejects_invalid_json() {
        let normalizer = TextNormalizer::default();
        let err = process(
            &normalizer,
            Cursor::new("{\"text\": \"u\"}\n{oops\n"),
            Vec::new(),
            RecordFormat::Jsonl,
            "text",
        )
        .unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }

    #[test]
    fn custom_field() {
        let normalizer = TextNormalizer::default();
        let mut out = Vec::new();
        process(
            &normalizer,
            Cursor::new(r#"{"body": "D time", "text": "U"}"#),
            &mut out,
            RecordFormat::Jsonl,
            "body",
        )
        .unwrap();
        let row: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(row["body"], "the time");
        assert_eq!(row["text"], "U");
    }

    #[test]
    fn table_layout() {
        let normalizer = TextNormalizer::default();
        let mut out = Vec::new();
        write_table(&normalizer, &["Na so e be o."], &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("RAW INPUT"));
        assert_eq!(lines[1], "-".repeat(60));
        assert_eq!(lines[2], format!("{:<35} | na so e be o.", "Na so e be o."));
    }

    #[test]
    fn trace_lists_every_stage() {
        let normalizer = TextNormalizer::default();
        let mut out = Vec::new();
        write_trace(&normalizer, "U@@", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("case_fold"));
        assert!(text.contains("collapse_whitespace"));
        assert!(text.contains("\"you\""));
    }
}
