use std::fs::File;
use std::io::{BufReader, Read};
use std::path::PathBuf;

use csv::ReaderBuilder;
use tracing::info;

use crate::config::FileConfig;
use crate::table::SurveyTable;
use crate::DataError;

use super::rows::table_from_rows;

/// CSV survey file
pub struct CsvSource {
    /// Path to the CSV file
    path: PathBuf,
    /// How the file is read
    config: FileConfig,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: FileConfig::default(),
        }
    }

    pub fn with_config(mut self, config: FileConfig) -> Self {
        self.config = config;
        self
    }

    /// Read the whole file into a table
    pub fn load(&self) -> Result<SurveyTable, DataError> {
        info!("Loading survey file: {:?}", self.path);
        let file = File::open(&self.path)?;
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("survey.csv");
        Self::load_from_reader(name, BufReader::new(file), &self.config)
    }

    /// Read a table from any CSV byte stream
    pub fn load_from_reader<R: Read>(name: &str, reader: R, config: &FileConfig) -> Result<SurveyTable, DataError> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(config.delimiter)
            .flexible(config.flexible)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        table_from_rows(name, headers, rows, &config.null_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_core::ResponseValue;

    const SURVEY: &str = "\
Question1,Question2,Question3
1,Yes,2.5
2,No,
2,,3.5
N/A,Yes,4
";

    fn load(csv: &str) -> Result<SurveyTable, DataError> {
        CsvSource::load_from_reader("survey.csv", csv.as_bytes(), &FileConfig::default())
    }

    #[test]
    fn test_load_detects_types_and_missing_cells() {
        let table = load(SURVEY).expect("survey loads");
        assert_eq!(table.num_rows(), 4);
        assert_eq!(table.column_names(), vec!["Question1", "Question2", "Question3"]);

        let q1 = table.column_series("Question1").expect("column exists");
        assert!(q1.is_numeric());
        assert_eq!(q1.values(), &[ResponseValue::from(1), ResponseValue::from(2), ResponseValue::from(2)]);

        let q2 = table.column_series("Question2").expect("column exists");
        assert!(!q2.is_numeric());
        assert_eq!(q2.len(), 3);

        let q3 = table.column_cells("Question3").expect("column exists");
        assert_eq!(q3[1], None);
        assert_eq!(q3[3], Some(ResponseValue::from(4.0)));
    }

    #[test]
    fn test_missing_column_is_reported() {
        let table = load(SURVEY).expect("survey loads");
        let err = table.column_series("Question9").unwrap_err();
        assert_eq!(err.to_string(), "Column 'Question9' not found in the dataset");
    }

    #[test]
    fn test_preview_shows_first_rows() {
        let table = load(SURVEY).expect("survey loads");
        let preview = table.preview(2);
        assert_eq!(preview.len(), 2);
        assert_eq!(preview[0], vec!["1", "Yes", "2.5"]);
        assert_eq!(preview[1][2], "");
    }

    #[test]
    fn test_semicolon_files() {
        let config = FileConfig::default().with_delimiter(b';');
        let table = CsvSource::load_from_reader("survey.csv", "Question1;Question2\n1;2\n".as_bytes(), &config)
            .expect("survey loads");
        assert_eq!(table.num_rows(), 1);
        assert!(table.has_column("Question2"));
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(load(""), Err(DataError::MissingHeader)));
    }

    #[test]
    fn test_extra_missing_pattern_from_config() {
        let mut config = FileConfig::default();
        config.null_config.add_pattern("Refused");
        let table = CsvSource::load_from_reader("survey.csv", "Question1\n1\nRefused\n3\n".as_bytes(), &config)
            .expect("survey loads");
        let q1 = table.column_series("Question1").expect("column exists");
        assert!(q1.is_numeric());
        assert_eq!(q1.len(), 2);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = CsvSource::new("/nonexistent/survey.csv").load().unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
