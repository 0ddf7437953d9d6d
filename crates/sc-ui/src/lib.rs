//! User interface components for survey charts
//!
//! This crate provides the egui-based pieces of the window that are not
//! charts: the survey form, the menu bar, message banners and the theme.

pub mod form;
pub mod shell;
pub mod theme;

pub use form::SurveyForm;
pub use shell::{menu_bar, message_banner, show_messages, MenuAction, MessageLevel, UiMessage};
pub use theme::{apply_theme, Theme};

// Common icon definitions
pub mod icons {
    pub const FOLDER: &str = "📁";
    pub const CHART: &str = "📊";
    pub const TABLE: &str = "📋";
}
