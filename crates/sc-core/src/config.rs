//! Chart and request configuration
//!
//! Everything the input form collects ends up in a [`SurveyRequest`] (what to
//! tabulate) and a [`ChartConfig`] (how to draw it). Both are plain values
//! that are passed into the tabulation and rendering functions.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const FONT_SIZE_RANGE: RangeInclusive<u32> = 8..=24;
pub const FIG_WIDTH_RANGE: RangeInclusive<u32> = 4..=12;
pub const FIG_HEIGHT_RANGE: RangeInclusive<u32> = 3..=10;

/// Pixels per figure inch.
pub const PIXELS_PER_INCH: f32 = 100.0;

/// Default value offered when a fixed y-axis maximum is switched on.
pub const DEFAULT_Y_MAX: f64 = 10.0;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Font size {0} is outside {min}..={max}", min = FONT_SIZE_RANGE.start(), max = FONT_SIZE_RANGE.end())]
    FontSize(u32),

    #[error("Chart width {0} is outside {min}..={max}", min = FIG_WIDTH_RANGE.start(), max = FIG_WIDTH_RANGE.end())]
    FigureWidth(u32),

    #[error("Chart height {0} is outside {min}..={max}", min = FIG_HEIGHT_RANGE.start(), max = FIG_HEIGHT_RANGE.end())]
    FigureHeight(u32),

    #[error("Fixed Y-axis max must be at least 1, got {0}")]
    YMax(f64),

    #[error("Question numbers start at 1")]
    QuestionNumber,

    #[error("Category count must be at least 1")]
    CategoryCount,

    #[error("Settings file error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Chart kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartKind {
    #[default]
    Bar,
    Pie,
}

impl ChartKind {
    pub fn label(&self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar",
            ChartKind::Pie => "Pie",
        }
    }
}

/// How a chart looks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    pub x_label: String,
    pub y_label: String,

    /// Axis, tick and annotation size; the title is drawn two points larger.
    pub font_size: u32,

    /// Figure size in inches
    pub fig_width: u32,
    pub fig_height: u32,

    /// Fixed y-axis maximum; `None` auto-scales.
    pub y_max: Option<f64>,

    pub kind: ChartKind,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "My chart".to_string(),
            x_label: "Category".to_string(),
            y_label: "Number of responses".to_string(),
            font_size: 12,
            fig_width: 6,
            fig_height: 3,
            y_max: None,
            kind: ChartKind::Bar,
        }
    }
}

impl ChartConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !FONT_SIZE_RANGE.contains(&self.font_size) {
            return Err(ConfigError::FontSize(self.font_size));
        }
        if !FIG_WIDTH_RANGE.contains(&self.fig_width) {
            return Err(ConfigError::FigureWidth(self.fig_width));
        }
        if !FIG_HEIGHT_RANGE.contains(&self.fig_height) {
            return Err(ConfigError::FigureHeight(self.fig_height));
        }
        if let Some(y_max) = self.y_max {
            if !(y_max >= 1.0) {
                return Err(ConfigError::YMax(y_max));
            }
        }
        Ok(())
    }

    pub fn title_font_size(&self) -> u32 {
        self.font_size + 2
    }

    /// Figure size in pixels.
    pub fn pixel_size(&self) -> (f32, f32) {
        (
            self.fig_width as f32 * PIXELS_PER_INCH,
            self.fig_height as f32 * PIXELS_PER_INCH,
        )
    }

    /// Title of the chart drawn for one group of a split.
    pub fn group_title(&self, group: &impl std::fmt::Display) -> String {
        format!("{} - Group {}", self.title, group)
    }
}

/// Where the category set of a question comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CategorySource {
    /// The distinct answers present in the question column.
    #[default]
    Observed,
    /// A fixed answer scale `1..=n`.
    Range(u32),
}

/// How answers are paired with split-question values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SplitAlignment {
    /// Drop missing entries from each column independently, then pair by
    /// position after truncating to the shorter column.
    #[default]
    Truncate,
    /// Pair by row, keeping only respondents who answered both questions.
    Respondent,
}

/// What to tabulate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyRequest {
    pub question: u32,
    pub split_question: Option<u32>,
    pub categories: CategorySource,
    pub alignment: SplitAlignment,
}

impl Default for SurveyRequest {
    fn default() -> Self {
        Self {
            question: 1,
            split_question: None,
            categories: CategorySource::Observed,
            alignment: SplitAlignment::Truncate,
        }
    }
}

/// Column name for a question number, e.g. `Question3`.
pub fn question_column(question: u32) -> String {
    format!("Question{}", question)
}

impl SurveyRequest {
    pub fn question_column(&self) -> String {
        question_column(self.question)
    }

    pub fn split_column(&self) -> Option<String> {
        self.split_question.map(question_column)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.question == 0 || self.split_question == Some(0) {
            return Err(ConfigError::QuestionNumber);
        }
        if self.categories == CategorySource::Range(0) {
            return Err(ConfigError::CategoryCount);
        }
        Ok(())
    }
}

/// Everything the form remembers between sessions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveySettings {
    pub request: SurveyRequest,
    pub chart: ChartConfig,
}

impl SurveySettings {
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.request.validate()?;
        settings.chart.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = SurveySettings::default();
        assert!(settings.request.validate().is_ok());
        assert!(settings.chart.validate().is_ok());
        assert_eq!(settings.chart.pixel_size(), (600.0, 300.0));
        assert_eq!(settings.chart.title_font_size(), 14);
    }

    #[test]
    fn test_column_names() {
        let request = SurveyRequest { question: 3, split_question: Some(7), ..Default::default() };
        assert_eq!(request.question_column(), "Question3");
        assert_eq!(request.split_column().as_deref(), Some("Question7"));
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let chart = ChartConfig { font_size: 30, ..Default::default() };
        assert!(matches!(chart.validate(), Err(ConfigError::FontSize(30))));

        let chart = ChartConfig { y_max: Some(0.5), ..Default::default() };
        assert!(matches!(chart.validate(), Err(ConfigError::YMax(_))));

        let request = SurveyRequest { question: 0, ..Default::default() };
        assert!(matches!(request.validate(), Err(ConfigError::QuestionNumber)));
    }

    #[test]
    fn test_settings_json_fills_missing_fields() {
        let json = r#"{ "chart": { "title": "Satisfaction", "kind": "Pie" } }"#;
        let settings = SurveySettings::from_json(json).expect("valid settings");
        assert_eq!(settings.chart.title, "Satisfaction");
        assert_eq!(settings.chart.kind, ChartKind::Pie);
        assert_eq!(settings.chart.font_size, 12);
        assert_eq!(settings.request.question, 1);

        let back = SurveySettings::from_json(&settings.to_json().expect("serializes"))
            .expect("round trip");
        assert_eq!(back, settings);
    }

    #[test]
    fn test_invalid_settings_json_is_an_error() {
        let json = r#"{ "chart": { "font_size": 2 } }"#;
        assert!(matches!(SurveySettings::from_json(json), Err(ConfigError::FontSize(2))));
        assert!(matches!(SurveySettings::from_json("not json"), Err(ConfigError::Json(_))));
    }
}
