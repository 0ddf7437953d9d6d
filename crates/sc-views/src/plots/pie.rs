//! Pie chart implementation

use egui::{Align2, Color32, FontId, Id, Pos2, RichText, Sense, Shape, Stroke, Ui, Vec2};

use sc_core::ChartConfig;

use super::utils::categorical_color;
use crate::plan::{ChartSpec, Wedge};
use crate::SurveyView;

/// Pie chart configuration
#[derive(Debug, Clone)]
pub struct PieChartConfig {
    /// Radius as a fraction of half the shorter figure side
    pub radius_ratio: f32,
    /// Where percentage labels sit, as a fraction of the radius
    pub percent_radius: f32,
    /// Where category labels sit, as a fraction of the radius
    pub label_radius: f32,
    /// Arc segments per full turn
    pub segments_per_turn: usize,
}

impl Default for PieChartConfig {
    fn default() -> Self {
        Self {
            radius_ratio: 0.75,
            percent_radius: 0.6,
            label_radius: 1.15,
            segments_per_turn: 128,
        }
    }
}

/// Pie chart view: one wedge per answered category, labelled with its share
pub struct PieChartView {
    id: Id,
    spec: ChartSpec,
    chart: ChartConfig,
    pub config: PieChartConfig,
}

impl PieChartView {
    pub fn new(id: Id, spec: ChartSpec, chart: ChartConfig) -> Self {
        Self {
            id,
            spec,
            chart,
            config: PieChartConfig::default(),
        }
    }

    fn point(center: Pos2, radius: f32, angle: f64) -> Pos2 {
        let (dx, dy) = Wedge::direction(angle);
        center + Vec2::new(dx as f32, dy as f32) * radius
    }

    fn draw_wedge(&self, painter: &egui::Painter, center: Pos2, radius: f32, wedge: &Wedge) {
        let color = categorical_color(wedge.color_index);
        let sweep = wedge.end_angle - wedge.start_angle;
        let steps = ((sweep / std::f64::consts::TAU) * self.config.segments_per_turn as f64)
            .ceil()
            .max(1.0) as usize;

        // Fan of thin triangles; each one is convex even when the wedge is not.
        for i in 0..steps {
            let a0 = wedge.start_angle + sweep * (i as f64 / steps as f64);
            let a1 = wedge.start_angle + sweep * ((i + 1) as f64 / steps as f64);
            painter.add(Shape::convex_polygon(
                vec![center, Self::point(center, radius, a0), Self::point(center, radius, a1)],
                color,
                Stroke::NONE,
            ));
        }

        // Edges between wedges
        painter.line_segment(
            [center, Self::point(center, radius, wedge.start_angle)],
            Stroke::new(1.0, Color32::WHITE),
        );
    }
}

impl SurveyView for PieChartView {
    fn id(&self) -> Id {
        self.id
    }

    fn title(&self) -> &str {
        &self.spec.title
    }

    fn view_type(&self) -> &str {
        "PieChartView"
    }

    fn ui(&mut self, ui: &mut Ui) {
        let font_size = self.chart.font_size as f32;
        let (width, height) = self.chart.pixel_size();

        ui.label(
            RichText::new(&self.spec.title)
                .size(self.chart.title_font_size() as f32)
                .strong(),
        );

        let (response, painter) = ui.allocate_painter(Vec2::new(width, height), Sense::hover());
        let rect = response.rect;
        let center = rect.center();
        let radius = rect.width().min(rect.height()) / 2.0 * self.config.radius_ratio;
        let text_color = ui.visuals().text_color();

        let wedges = self.spec.wedges();
        if wedges.is_empty() {
            painter.text(
                center,
                Align2::CENTER_CENTER,
                "No responses",
                FontId::proportional(font_size),
                ui.visuals().weak_text_color(),
            );
            return;
        }

        for wedge in &wedges {
            self.draw_wedge(&painter, center, radius, wedge);
        }

        for wedge in &wedges {
            let mid = wedge.mid_angle();
            painter.text(
                Self::point(center, radius * self.config.percent_radius, mid),
                Align2::CENTER_CENTER,
                wedge.percent_label(),
                FontId::proportional(font_size),
                Color32::WHITE,
            );
            painter.text(
                Self::point(center, radius * self.config.label_radius, mid),
                Align2::CENTER_CENTER,
                &wedge.label,
                FontId::proportional(font_size),
                text_color,
            );
        }
    }
}
