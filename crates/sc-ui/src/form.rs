//! Survey form: the widgets that collect a run's request and chart settings

use egui::{DragValue, Slider, Ui};
use serde::{Deserialize, Serialize};
use tracing::debug;

use sc_core::config::{DEFAULT_Y_MAX, FIG_HEIGHT_RANGE, FIG_WIDTH_RANGE, FONT_SIZE_RANGE};
use sc_core::{CategorySource, ChartConfig, ChartKind, SplitAlignment, SurveyRequest, SurveySettings};

/// Widget state behind the side panel.
///
/// Toggles keep their number while switched off, so turning a split or a
/// fixed axis back on restores the last value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveyForm {
    pub question: u32,
    pub split_enabled: bool,
    pub split_question: u32,
    pub use_category_count: bool,
    pub category_count: u32,
    pub alignment: SplitAlignment,
    pub fixed_y: bool,
    pub y_max: f64,
    pub chart: ChartConfig,
}

impl Default for SurveyForm {
    fn default() -> Self {
        Self {
            question: 1,
            split_enabled: false,
            split_question: 2,
            use_category_count: false,
            category_count: 5,
            alignment: SplitAlignment::Truncate,
            fixed_y: false,
            y_max: DEFAULT_Y_MAX,
            chart: ChartConfig::default(),
        }
    }
}

impl SurveyForm {
    pub fn from_settings(settings: &SurveySettings) -> Self {
        let defaults = Self::default();
        let (use_category_count, category_count) = match settings.request.categories {
            CategorySource::Observed => (false, defaults.category_count),
            CategorySource::Range(n) => (true, n),
        };

        Self {
            question: settings.request.question,
            split_enabled: settings.request.split_question.is_some(),
            split_question: settings.request.split_question.unwrap_or(defaults.split_question),
            use_category_count,
            category_count,
            alignment: settings.request.alignment,
            fixed_y: settings.chart.y_max.is_some(),
            y_max: settings.chart.y_max.unwrap_or(defaults.y_max),
            chart: ChartConfig { y_max: None, ..settings.chart.clone() },
        }
    }

    pub fn request(&self) -> SurveyRequest {
        SurveyRequest {
            question: self.question,
            split_question: self.split_enabled.then_some(self.split_question),
            categories: if self.use_category_count {
                CategorySource::Range(self.category_count)
            } else {
                CategorySource::Observed
            },
            alignment: self.alignment,
        }
    }

    pub fn chart_config(&self) -> ChartConfig {
        ChartConfig {
            y_max: self.fixed_y.then_some(self.y_max),
            ..self.chart.clone()
        }
    }

    pub fn settings(&self) -> SurveySettings {
        SurveySettings {
            request: self.request(),
            chart: self.chart_config(),
        }
    }

    /// Draw the form. Returns true when any value changed this frame.
    pub fn ui(&mut self, ui: &mut Ui) -> bool {
        let before = self.clone();

        ui.heading("Question");
        ui.horizontal(|ui| {
            ui.label("Question number");
            ui.add(DragValue::new(&mut self.question).clamp_range(1..=999).speed(0.1));
        });

        ui.checkbox(&mut self.split_enabled, "Split by another question");
        ui.add_enabled_ui(self.split_enabled, |ui| {
            ui.horizontal(|ui| {
                ui.label("Split question");
                ui.add(DragValue::new(&mut self.split_question).clamp_range(1..=999).speed(0.1));
            });
            ui.horizontal(|ui| {
                ui.label("Pair answers");
                ui.radio_value(&mut self.alignment, SplitAlignment::Truncate, "by position")
                    .on_hover_text("Drop missing answers in each column, then pair by position");
                ui.radio_value(&mut self.alignment, SplitAlignment::Respondent, "by respondent")
                    .on_hover_text("Keep only respondents who answered both questions");
            });
        });

        ui.checkbox(&mut self.use_category_count, "Fixed answer scale");
        ui.add_enabled_ui(self.use_category_count, |ui| {
            ui.horizontal(|ui| {
                ui.label("Number of categories");
                ui.add(DragValue::new(&mut self.category_count).clamp_range(1..=100).speed(0.1));
            });
        });

        ui.separator();
        ui.heading("Chart");
        ui.horizontal(|ui| {
            ui.label("Chart type");
            for kind in [ChartKind::Bar, ChartKind::Pie] {
                ui.selectable_value(&mut self.chart.kind, kind, kind.label());
            }
        });

        egui::Grid::new("chart_labels").num_columns(2).show(ui, |ui| {
            ui.label("Title");
            ui.text_edit_singleline(&mut self.chart.title);
            ui.end_row();

            ui.label("X axis label");
            ui.text_edit_singleline(&mut self.chart.x_label);
            ui.end_row();

            ui.label("Y axis label");
            ui.text_edit_singleline(&mut self.chart.y_label);
            ui.end_row();
        });

        ui.add(Slider::new(&mut self.chart.font_size, FONT_SIZE_RANGE).text("Font size"));
        ui.add(Slider::new(&mut self.chart.fig_width, FIG_WIDTH_RANGE).text("Width (in)"));
        ui.add(Slider::new(&mut self.chart.fig_height, FIG_HEIGHT_RANGE).text("Height (in)"));

        ui.checkbox(&mut self.fixed_y, "Fix y-axis maximum");
        ui.add_enabled_ui(self.fixed_y, |ui| {
            ui.add(
                DragValue::new(&mut self.y_max)
                    .clamp_range(1.0..=f64::MAX)
                    .speed(1.0)
                    .prefix("max: "),
            );
        });

        let changed = *self != before;
        if changed {
            debug!("Form changed: {:?}", self.request());
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_matches_default_settings() {
        assert_eq!(SurveyForm::default().settings(), SurveySettings::default());
    }

    #[test]
    fn test_toggles_map_to_options() {
        let form = SurveyForm {
            split_enabled: true,
            split_question: 4,
            use_category_count: true,
            category_count: 7,
            fixed_y: true,
            y_max: 25.0,
            ..Default::default()
        };
        let settings = form.settings();
        assert_eq!(settings.request.split_question, Some(4));
        assert_eq!(settings.request.split_column().as_deref(), Some("Question4"));
        assert_eq!(settings.request.categories, CategorySource::Range(7));
        assert_eq!(settings.chart.y_max, Some(25.0));
    }

    #[test]
    fn test_disabled_toggles_drop_out_of_settings() {
        let form = SurveyForm { split_question: 9, y_max: 40.0, ..Default::default() };
        let settings = form.settings();
        assert_eq!(settings.request.split_question, None);
        assert_eq!(settings.chart.y_max, None);

        let restored = SurveyForm::from_settings(&settings);
        assert_eq!(restored.split_question, 2);
        assert_eq!(restored.y_max, DEFAULT_Y_MAX);
    }

    #[test]
    fn test_from_settings_round_trips() {
        let form = SurveyForm {
            question: 3,
            split_enabled: true,
            split_question: 5,
            alignment: SplitAlignment::Respondent,
            fixed_y: true,
            y_max: 12.0,
            chart: ChartConfig { kind: ChartKind::Pie, font_size: 16, ..Default::default() },
            ..Default::default()
        };
        assert_eq!(SurveyForm::from_settings(&form.settings()), form);
    }

    #[test]
    fn test_partial_state_fills_defaults() {
        let form: SurveyForm = serde_json::from_str(r#"{"question": 4, "fixed_y": true}"#).unwrap();
        assert_eq!(form.question, 4);
        assert_eq!(form.chart, ChartConfig::default());
        assert_eq!(form.chart_config().y_max, Some(DEFAULT_Y_MAX));
    }
}
