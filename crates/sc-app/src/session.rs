//! The survey currently loaded and how its file is read

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use sc_core::SurveySettings;
use sc_data::{open_survey, sample_table, DataError, FileConfig, SurveyTable};

use crate::run::{run, RunOutput};

/// Loaded table plus the file it came from.
///
/// A failed load leaves no table behind, so nothing computed from the
/// previous file survives it.
pub struct Session {
    table: Option<SurveyTable>,
    source: Option<PathBuf>,
    pub file_config: FileConfig,
}

impl Session {
    pub fn new(file_config: FileConfig) -> Self {
        Self {
            table: None,
            source: None,
            file_config,
        }
    }

    pub fn table(&self) -> Option<&SurveyTable> {
        self.table.as_ref()
    }

    /// Shown in the menu bar and above the form
    pub fn label(&self) -> &str {
        self.table.as_ref().map(SurveyTable::name).unwrap_or("No data")
    }

    pub fn use_sample(&mut self) -> Result<(), DataError> {
        self.source = None;
        self.set(sample_table())
    }

    pub fn open(&mut self, path: &Path) -> Result<(), DataError> {
        info!("Opening survey file: {:?}", path);
        self.source = Some(path.to_path_buf());
        self.set(open_survey(path, &self.file_config))
    }

    /// Read the current file again with the current `file_config`.
    /// Returns false when the table did not come from a file.
    pub fn reload(&mut self) -> Result<bool, DataError> {
        let Some(path) = self.source.clone() else {
            return Ok(false);
        };
        self.open(&path).map(|()| true)
    }

    pub fn run(&self, settings: &SurveySettings) -> Result<RunOutput, DataError> {
        let table = self.table.as_ref().ok_or(DataError::NoTable)?;
        run(table, settings)
    }

    fn set(&mut self, loaded: Result<SurveyTable, DataError>) -> Result<(), DataError> {
        match loaded {
            Ok(table) => {
                self.table = Some(table);
                Ok(())
            }
            Err(e) => {
                warn!("Dropping the loaded survey: {}", e);
                self.table = None;
                self.source = None;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_survey(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", std::process::id(), name));
        std::fs::write(&path, contents).expect("temp file is writable");
        path
    }

    #[test]
    fn test_failed_open_clears_previous_survey() {
        let mut session = Session::new(FileConfig::default());
        session.use_sample().unwrap();
        assert!(session.run(&SurveySettings::default()).is_ok());

        let err = session.open(Path::new("/nonexistent/survey.csv")).unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
        assert!(session.table().is_none());
        assert_eq!(session.label(), "No data");
        assert!(matches!(session.run(&SurveySettings::default()), Err(DataError::NoTable)));
    }

    #[test]
    fn test_reload_applies_file_options() {
        let path = write_survey("reload.csv", "Question1\n1\nRefused\n2\n");
        let mut session = Session::new(FileConfig::default());
        session.open(&path).unwrap();
        let labels = session.run(&SurveySettings::default()).unwrap().report.categories.labels();
        assert_eq!(labels, vec!["1", "2", "Refused"]);

        session.file_config.null_config.add_pattern("Refused");
        assert!(session.reload().unwrap());
        let labels = session.run(&SurveySettings::default()).unwrap().report.categories.labels();
        assert_eq!(labels, vec!["1", "2"]);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_sample_has_nothing_to_reload() {
        let mut session = Session::new(FileConfig::default());
        session.use_sample().unwrap();
        assert!(!session.reload().unwrap());
        assert!(session.table().is_some());
    }
}
