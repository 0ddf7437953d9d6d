use std::path::PathBuf;

use calamine::{open_workbook_auto, Data, Reader};
use sc_core::format_number;
use tracing::{debug, info};

use crate::config::FileConfig;
use crate::table::SurveyTable;
use crate::DataError;

use super::rows::table_from_rows;

/// Spreadsheet survey file. The first worksheet is read; its first row holds
/// the column names.
pub struct ExcelSource {
    path: PathBuf,
    config: FileConfig,
}

impl ExcelSource {
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

    pub fn load(&self) -> Result<SurveyTable, DataError> {
        info!("Loading survey workbook: {:?}", self.path);
        let mut workbook = open_workbook_auto(&self.path)?;

        let sheet = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| DataError::Excel("the workbook has no worksheets".to_string()))?;
        debug!("Reading worksheet '{}'", sheet);
        let range = workbook.worksheet_range(&sheet)?;

        let mut rows = range.rows();
        let headers: Vec<String> = rows
            .next()
            .ok_or(DataError::MissingHeader)?
            .iter()
            .map(|cell| cell_text(cell).trim().to_string())
            .collect();
        let rows: Vec<Vec<String>> = rows.map(|row| row.iter().map(cell_text).collect()).collect();

        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("survey.xlsx");
        table_from_rows(name, headers, rows, &self.config.null_config)
    }
}

/// A spreadsheet cell as the text a CSV export would hold.
/// Empty and error cells read as missing.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(v) => v.to_string(),
        Data::Float(v) => format_number(*v),
        other => other.to_string(),
    }
}

impl From<calamine::Error> for DataError {
    fn from(error: calamine::Error) -> Self {
        DataError::Excel(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;

    #[test]
    fn test_cells_read_like_csv_text() {
        assert_eq!(cell_text(&Data::Float(3.0)), "3");
        assert_eq!(cell_text(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_text(&Data::Int(7)), "7");
        assert_eq!(cell_text(&Data::String("Don't know".to_string())), "Don't know");
        assert_eq!(cell_text(&Data::Bool(true)), "true");
        assert_eq!(cell_text(&Data::Empty), "");
        assert_eq!(cell_text(&Data::Error(CellErrorType::NA)), "");
    }

    #[test]
    fn test_missing_workbook_is_an_error() {
        let err = ExcelSource::new("/nonexistent/survey.xlsx").load().unwrap_err();
        assert!(matches!(err, DataError::Excel(_)));
    }
}
