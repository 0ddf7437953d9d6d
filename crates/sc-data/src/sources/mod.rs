pub mod csv_source;
pub mod excel_source;
mod rows;
pub mod sample;

use std::path::Path;

pub use csv_source::CsvSource;
pub use excel_source::ExcelSource;
pub use sample::sample_table;

use crate::config::FileConfig;
use crate::table::SurveyTable;
use crate::DataError;

/// Spreadsheet extensions read through [`ExcelSource`]
const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Load a survey file, picking the reader from the file extension.
/// Anything that is not a spreadsheet is read as delimited text.
pub fn open_survey(path: &Path, config: &FileConfig) -> Result<SurveyTable, DataError> {
    let is_spreadsheet = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SPREADSHEET_EXTENSIONS.iter().any(|known| known.eq_ignore_ascii_case(ext)))
        .unwrap_or(false);

    if is_spreadsheet {
        ExcelSource::new(path).with_config(config.clone()).load()
    } else {
        CsvSource::new(path).with_config(config.clone()).load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_follows_extension() {
        let config = FileConfig::default();
        let err = open_survey(Path::new("/nonexistent/survey.XLSX"), &config).unwrap_err();
        assert!(matches!(err, DataError::Excel(_)));

        let err = open_survey(Path::new("/nonexistent/survey.csv"), &config).unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
