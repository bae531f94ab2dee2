//! Loading extra shorthand rules from JSON.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use pidgin_core::{Rule, RuleTable};
use tracing::debug;

/// Reads a JSON array of `{"pattern", "replacement"}` objects.
pub fn load_rules(path: &Path) -> Result<Vec<Rule>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read rules file {}", path.display()))?;
    let rules: Vec<Rule> = serde_json::from_str(&text)
        .with_context(|| format!("invalid rules file {}", path.display()))?;
    debug!(path = %path.display(), rules = rules.len(), "loaded extra rules");
    Ok(rules)
}

/// The built-in table, extended with the rules in `extra` when given.
pub fn build_table(extra: Option<&Path>) -> Result<RuleTable> {
    let Some(path) = extra else {
        return Ok(RuleTable::pidgin().clone());
    };

    let rules = load_rules(path)?;
    RuleTable::pidgin()
        .extended(rules)
        .with_context(|| format!("failed to compile rules from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn rules_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn builtin_when_no_file() {
        let table = build_table(None).unwrap();
        assert_eq!(table.len(), RuleTable::pidgin().len());
    }

    #[test]
    fn extra_rules_are_appended() {
        let file = rules_file(r#"[{"pattern": "wahala+", "replacement": "wahala"}]"#);
        let table = build_table(Some(file.path())).unwrap();
        assert_eq!(table.len(), RuleTable::pidgin().len() + 1);
        assert_eq!(table.apply("wahalaaa"), "wahala");
    }

    #[test]
    fn malformed_json_is_reported() {
        let file = rules_file("{not json");
        let err = load_rules(file.path()).unwrap_err();
        assert!(err.to_string().starts_with("invalid rules file"), "{err}");
    }

    #[test]
    fn bad_pattern_is_reported() {
        let file = rules_file(r#"[{"pattern": "(", "replacement": "x"}]"#);
        let err = build_table(Some(file.path())).unwrap_err();
        assert!(err.to_string().starts_with("failed to compile rules"), "{err}");
        assert!(format!("{err:#}").contains("invalid pattern"), "{err:#}");
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load_rules(Path::new("/nonexistent/rules.json")).unwrap_err();
        assert!(err.to_string().starts_with("failed to read rules file"));
    }
}
