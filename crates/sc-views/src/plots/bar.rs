//! Bar chart implementation

use egui::{Align2, Id, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotBounds, PlotPoint, Text};

use sc_core::ChartConfig;

use super::utils::{to_color32, BAR_EDGE, BAR_FILL};
use crate::plan::ChartSpec;
use crate::SurveyView;

/// Bar chart configuration
#[derive(Debug, Clone)]
pub struct BarChartConfig {
    /// Bar width factor (0.0 to 1.0)
    pub bar_width: f64,

    /// Offset of count labels above the bar top, in y units
    pub label_offset: f64,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            bar_width: 0.8,
            label_offset: 0.05,
        }
    }
}

/// Bar chart view: one bar per category, each labelled with its count
pub struct BarChartView {
    id: Id,
    spec: ChartSpec,
    chart: ChartConfig,
    pub config: BarChartConfig,
}

impl BarChartView {
    /// Create a new bar chart view
    pub fn new(id: Id, spec: ChartSpec, chart: ChartConfig) -> Self {
        Self {
            id,
            spec,
            chart,
            config: BarChartConfig::default(),
        }
    }

    fn bars(&self) -> Vec<Bar> {
        let fill = to_color32(BAR_FILL);
        self.spec
            .slices
            .iter()
            .enumerate()
            .map(|(i, slice)| {
                Bar::new(i as f64, slice.count as f64)
                    .width(self.config.bar_width)
                    .name(&slice.label)
                    .fill(fill)
                    .stroke(Stroke::new(1.0, to_color32(BAR_EDGE)))
            })
            .collect()
    }
}

impl SurveyView for BarChartView {
    fn id(&self) -> Id {
        self.id
    }

    fn title(&self) -> &str {
        &self.spec.title
    }

    fn view_type(&self) -> &str {
        "BarChartView"
    }

    fn ui(&mut self, ui: &mut Ui) {
        let font_size = self.chart.font_size as f32;
        let (width, height) = self.chart.pixel_size();

        ui.label(
            RichText::new(&self.spec.title)
                .size(self.chart.title_font_size() as f32)
                .strong(),
        );

        if self.spec.slices.is_empty() {
            ui.label(RichText::new("No categories to display").weak());
            return;
        }

        let labels = self.spec.labels();
        let category_count = labels.len();
        let y_top = self.spec.y_top();

        let plot = Plot::new(self.id)
            .width(width)
            .height(height)
            .show_grid(false)
            .x_axis_label(RichText::new(&self.chart.x_label).size(font_size))
            .y_axis_label(RichText::new(&self.chart.y_label).size(font_size))
            .x_axis_formatter(move |value, _max_chars, _range| {
                let index = value.round();
                if (value - index).abs() > 1e-6 || index < 0.0 {
                    return String::new();
                }
                labels.get(index as usize).cloned().unwrap_or_default()
            })
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false);

        plot.show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(self.bars()).color(to_color32(BAR_FILL)));

            for (i, slice) in self.spec.slices.iter().enumerate() {
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(i as f64, slice.count as f64 + self.config.label_offset),
                        RichText::new(slice.count.to_string()).size(font_size),
                    )
                    .anchor(Align2::CENTER_BOTTOM),
                );
            }

            plot_ui.set_plot_bounds(PlotBounds::from_min_max(
                [-0.5, 0.0],
                [category_count as f64 - 0.5, y_top],
            ));
        });
    }
}
