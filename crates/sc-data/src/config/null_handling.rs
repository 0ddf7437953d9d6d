//! Missing-value handling for survey files

use serde::{Deserialize, Serialize};

/// Markers spreadsheet and statistics exports write for an empty cell.
/// Matched exactly, so answers such as "None" or "na" stay answers.
const DEFAULT_MISSING: [&str; 14] = [
    "", "#N/A", "#N/A N/A", "#NA", "-NaN", "-nan", "<NA>", "N/A", "NA", "NULL", "NaN", "n/a", "nan", "null",
];

/// Which raw cells count as "no answer". Cells are compared after trimming,
/// case-sensitively unless `case_sensitive` is turned off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NullConfig {
    pub patterns: Vec<String>,
    pub case_sensitive: bool,
}

impl Default for NullConfig {
    fn default() -> Self {
        Self::with_patterns(DEFAULT_MISSING)
    }
}

impl NullConfig {
    /// Case-sensitive config with exactly `patterns`.
    pub fn with_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(|p| p.into().trim().to_string()).collect(),
            case_sensitive: true,
        }
    }

    pub fn is_null(&self, cell: &str) -> bool {
        let cell = cell.trim();
        match self.case_sensitive {
            true => self.patterns.iter().any(|p| p == cell),
            false => self.patterns.iter().any(|p| p.eq_ignore_ascii_case(cell)),
        }
    }

    pub fn add_pattern(&mut self, pattern: impl Into<String>) {
        let pattern = pattern.into().trim().to_string();
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_patterns() {
        let config = NullConfig::default();
        assert!(config.is_null(""));
        assert!(config.is_null("  "));
        assert!(config.is_null("nan"));
        assert!(config.is_null(" n/a "));
        assert!(!config.is_null("0"));
        assert!(!config.is_null("No"));
    }

    #[test]
    fn test_answers_that_look_like_markers_are_kept() {
        let config = NullConfig::default();
        assert!(!config.is_null("None"));
        assert!(!config.is_null("none"));
        assert!(!config.is_null("na"));
        assert!(!config.is_null("-"));
        assert!(!config.is_null("Null"));
    }

    #[test]
    fn test_custom_pattern() {
        let mut config = NullConfig::default();
        config.add_pattern(" skipped");
        assert!(config.is_null("skipped"));
        assert!(!config.is_null("Skipped"));

        config.case_sensitive = false;
        assert!(config.is_null("Skipped"));
        assert!(config.is_null("NAN"));
    }

    #[test]
    fn test_only_listed_patterns() {
        let config = NullConfig::with_patterns(["?"]);
        assert!(config.is_null("?"));
        assert!(!config.is_null(""));
    }
}
