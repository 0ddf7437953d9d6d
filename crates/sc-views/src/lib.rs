//! View system for survey charts

mod survey_view;
pub mod export;
pub mod plan;
pub mod plots;
mod stats;
mod tables;

pub use export::{export_plan, render_png, render_svg, ExportError, ExportFormat};
pub use plan::{CategorySlice, ChartPlan, ChartSpec, Wedge};
pub use plots::{BarChartConfig, BarChartView, PieChartConfig, PieChartView};
pub use stats::SummaryStatsView;
pub use survey_view::SurveyView;
pub use tables::{TableConfig, TableView};

use sc_core::{ChartConfig, ChartKind};

/// Build one on-screen view per chart of `plan`.
pub fn build_views(plan: &ChartPlan, config: &ChartConfig) -> Vec<Box<dyn SurveyView>> {
    plan.charts
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let id = egui::Id::new(("chart", index, spec.group.clone()));
            let view: Box<dyn SurveyView> = match plan.kind {
                ChartKind::Bar => Box::new(BarChartView::new(id, spec.clone(), config.clone())),
                ChartKind::Pie => Box::new(PieChartView::new(id, spec.clone(), config.clone())),
            };
            view
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_core::{tabulate_grouped, CategorySet, ResponseSeries, ResponseValue};

    #[test]
    fn test_build_views_one_per_chart() {
        let s: ResponseSeries = [1i64, 2, 2].iter().map(|&v| ResponseValue::from(v)).collect();
        let g: ResponseSeries = [1i64, 1, 2].iter().map(|&v| ResponseValue::from(v)).collect();
        let grouped = tabulate_grouped(&s, &g, &CategorySet::range(2));

        let bar = ChartConfig::default();
        let views = build_views(&ChartPlan::grouped(&grouped, &bar), &bar);
        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.view_type() == "BarChartView"));
        assert_ne!(views[0].id(), views[1].id());

        let pie = ChartConfig { kind: ChartKind::Pie, ..Default::default() };
        let views = build_views(&ChartPlan::grouped(&grouped, &pie), &pie);
        assert_eq!(views[1].title(), "My chart - Group 2");
        assert_eq!(views[1].view_type(), "PieChartView");
    }
}
