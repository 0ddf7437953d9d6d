//! Survey view abstraction - base trait for everything drawn in the results panel

use egui::{Id, Ui};

/// Base trait for survey views (charts, tables)
pub trait SurveyView {
    /// Get the unique ID of this view
    fn id(&self) -> Id;

    /// Get the title of this view
    fn title(&self) -> &str;

    /// Get the view type
    fn view_type(&self) -> &str;

    /// Draw the UI
    fn ui(&mut self, ui: &mut Ui);
}
