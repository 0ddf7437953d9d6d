//! Chart layout shared by the on-screen views and file export
//!
//! A [`ChartPlan`] decides what gets drawn (one chart per group, bar order,
//! y-axis range, pie wedge angles, colors) without drawing anything.

use std::f64::consts::TAU;

use sc_core::{ChartConfig, ChartKind, GroupedTabulation, Tabulation};
use sc_data::{ReportBody, SurveyReport};

/// Gap between the tallest bar and the top of an auto-scaled axis.
const AUTO_HEADROOM: f64 = 1.0;

/// One category of one chart
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    pub label: String,
    pub count: usize,
    /// Position of the category in the category set; picks the palette color.
    pub color_index: usize,
}

/// A pie wedge; angles run clockwise from twelve o'clock, in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub label: String,
    pub start_angle: f64,
    pub end_angle: f64,
    pub percent: f64,
    pub color_index: usize,
}

impl Wedge {
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.percent)
    }

    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// Unit-circle direction of `angle` in screen coordinates (y grows downwards).
    pub fn direction(angle: f64) -> (f64, f64) {
        (angle.sin(), -angle.cos())
    }
}

/// Everything needed to draw one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    /// Group label when the chart is one of a split
    pub group: Option<String>,
    pub slices: Vec<CategorySlice>,
    /// Fixed y-axis maximum; `None` auto-scales
    pub y_max: Option<f64>,
}

impl ChartSpec {
    pub fn from_tabulation(title: String, group: Option<String>, tabulation: &Tabulation, y_max: Option<f64>) -> Self {
        let slices = tabulation
            .iter()
            .enumerate()
            .map(|(color_index, (category, count))| CategorySlice {
                label: category.to_string(),
                count,
                color_index,
            })
            .collect();

        Self { title, group, slices, y_max }
    }

    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.slices.iter().map(|s| s.count).max().unwrap_or(0)
    }

    pub fn labels(&self) -> Vec<String> {
        self.slices.iter().map(|s| s.label.clone()).collect()
    }

    /// Top of the y axis: the fixed maximum, or room above the tallest bar.
    pub fn y_top(&self) -> f64 {
        self.y_max
            .unwrap_or(self.max_count() as f64 + AUTO_HEADROOM)
    }

    /// Wedges for categories with at least one response.
    ///
    /// Empty categories take no angle but keep their palette position, so a
    /// category has the same color in every chart of a split.
    pub fn wedges(&self) -> Vec<Wedge> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }

        let mut start_angle = 0.0;
        self.slices
            .iter()
            .filter(|s| s.count > 0)
            .map(|s| {
                let fraction = s.count as f64 / total as f64;
                let end_angle = start_angle + fraction * TAU;
                let wedge = Wedge {
                    label: s.label.clone(),
                    start_angle,
                    end_angle,
                    percent: fraction * 100.0,
                    color_index: s.color_index,
                };
                start_angle = end_angle;
                wedge
            })
            .collect()
    }
}

/// The charts for one run
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPlan {
    pub kind: ChartKind,
    pub charts: Vec<ChartSpec>,
}

impl ChartPlan {
    pub fn single(tabulation: &Tabulation, config: &ChartConfig) -> Self {
        Self {
            kind: config.kind,
            charts: vec![ChartSpec::from_tabulation(config.title.clone(), None, tabulation, config.y_max)],
        }
    }

    /// One chart per group, in group order.
    ///
    /// Bar charts of a split share one y axis reaching one above the largest
    /// count of any group, unless a fixed maximum is configured.
    pub fn grouped(grouped: &GroupedTabulation, config: &ChartConfig) -> Self {
        let y_max = config.y_max.or_else(|| {
            (config.kind == ChartKind::Bar).then(|| grouped.max_count() as f64 + 1.0)
        });

        let charts = grouped
            .iter()
            .map(|(key, tabulation)| {
                ChartSpec::from_tabulation(config.group_title(key), Some(key.to_string()), tabulation, y_max)
            })
            .collect();

        Self { kind: config.kind, charts }
    }

    pub fn from_report(report: &SurveyReport, config: &ChartConfig) -> Self {
        match &report.body {
            ReportBody::Single(tabulation) => Self::single(tabulation, config),
            ReportBody::Grouped(grouped) => Self::grouped(grouped, config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_core::{tabulate, tabulate_grouped, CategorySet, ResponseSeries, ResponseValue};

    fn series(values: &[i64]) -> ResponseSeries {
        values.iter().map(|&v| ResponseValue::from(v)).collect()
    }

    #[test]
    fn test_single_chart_keeps_category_order() {
        let t = tabulate(&series(&[1, 2, 2, 3]), &CategorySet::range(4));
        let plan = ChartPlan::single(&t, &ChartConfig::default());

        assert_eq!(plan.charts.len(), 1);
        let chart = &plan.charts[0];
        assert_eq!(chart.title, "My chart");
        assert_eq!(chart.labels(), vec!["1", "2", "3", "4"]);
        assert_eq!(chart.slices.iter().map(|s| s.count).collect::<Vec<_>>(), vec![1, 2, 1, 0]);
        assert_eq!(chart.y_max, None);
        assert_eq!(chart.y_top(), 3.0);
    }

    #[test]
    fn test_fixed_y_max_wins() {
        let t = tabulate(&series(&[1, 1]), &CategorySet::range(2));
        let config = ChartConfig { y_max: Some(10.0), ..Default::default() };
        assert_eq!(ChartPlan::single(&t, &config).charts[0].y_top(), 10.0);

        let g = tabulate_grouped(&series(&[1, 2]), &series(&[1, 2]), &CategorySet::range(2));
        assert!(ChartPlan::grouped(&g, &config).charts.iter().all(|c| c.y_max == Some(10.0)));
    }

    #[test]
    fn test_grouped_bars_share_y_axis() {
        let g = tabulate_grouped(
            &series(&[1, 1, 1, 2, 2]),
            &series(&[1, 1, 1, 2, 1]),
            &CategorySet::range(2),
        );
        let plan = ChartPlan::grouped(&g, &ChartConfig::default());

        let titles: Vec<&str> = plan.charts.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["My chart - Group 1", "My chart - Group 2"]);
        assert!(plan.charts.iter().all(|c| c.y_max == Some(4.0)));
    }

    #[test]
    fn test_grouped_pies_do_not_share_axis() {
        let g = tabulate_grouped(&series(&[1, 2]), &series(&[1, 2]), &CategorySet::range(2));
        let config = ChartConfig { kind: ChartKind::Pie, ..Default::default() };
        let plan = ChartPlan::grouped(&g, &config);
        assert!(plan.charts.iter().all(|c| c.y_max.is_none()));
    }

    #[test]
    fn test_wedges_cover_the_circle_and_keep_colors() {
        let t = tabulate(&series(&[1, 3, 3, 3]), &CategorySet::range(3));
        let chart = ChartSpec::from_tabulation("t".into(), None, &t, None);
        let wedges = chart.wedges();

        assert_eq!(wedges.len(), 2);
        assert_eq!(wedges[0].percent_label(), "25.0%");
        assert_eq!(wedges[1].percent_label(), "75.0%");
        assert_eq!(wedges[1].color_index, 2);
        assert!((wedges[1].end_angle - TAU).abs() < 1e-9);
    }

    #[test]
    fn test_empty_chart_has_no_wedges() {
        let t = tabulate(&ResponseSeries::default(), &CategorySet::range(3));
        let chart = ChartSpec::from_tabulation("t".into(), None, &t, None);
        assert!(chart.wedges().is_empty());
        assert_eq!(chart.y_top(), 1.0);
    }
}
