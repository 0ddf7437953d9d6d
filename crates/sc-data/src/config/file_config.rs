//! File configuration for survey loading

use serde::{Serialize, Deserialize};

use super::null_handling::NullConfig;

/// How a survey file is read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Field delimiter
    pub delimiter: u8,

    /// Allow rows with fewer fields than the header; absent cells are missing
    pub flexible: bool,

    /// Missing-value handling
    pub null_config: NullConfig,

    /// Rows shown in the data preview
    pub preview_rows: usize,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            flexible: true,
            null_config: NullConfig::default(),
            preview_rows: 10,
        }
    }
}

impl FileConfig {
    /// Configuration for a delimiter other than a comma, e.g. `b';'` or `b'\t'`
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}
