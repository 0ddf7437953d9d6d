//! Core functionality for survey charts
//!
//! This crate provides the response model, category tabulation and
//! descriptive statistics. Nothing here touches files or widgets, so every
//! function can be driven directly from tests.

pub mod category;
pub mod config;
pub mod series;
pub mod summary;
pub mod tabulate;
pub mod value;

// Re-export commonly used types
pub use category::CategorySet;
pub use config::{
    question_column, CategorySource, ChartConfig, ChartKind, ConfigError, SplitAlignment,
    SurveyRequest, SurveySettings,
};
pub use series::ResponseSeries;
pub use summary::{describe, SummaryRow, SummaryStats, SummaryTable};
pub use tabulate::{
    align_positional, tabulate, tabulate_grouped, GroupedTabulation, Tabulation, Truncation,
};
pub use value::{format_number, ResponseValue};
