//! One run: loaded table + form settings -> report and chart plan

use tracing::{debug, info};

use sc_core::SurveySettings;
use sc_data::{DataError, SurveyReport, SurveyTable};
use sc_views::ChartPlan;

/// Everything computed for one interaction
#[derive(Debug)]
pub struct RunOutput {
    pub report: SurveyReport,
    pub plan: ChartPlan,
}

/// Recompute from scratch. An error aborts the run; nothing partial is kept.
pub fn run(table: &SurveyTable, settings: &SurveySettings) -> Result<RunOutput, DataError> {
    settings.chart.validate()?;
    let report = SurveyReport::build(table, &settings.request)?;
    let plan = ChartPlan::from_report(&report, &settings.chart);

    info!(
        "Tabulated {} from {} into {} {} chart(s)",
        report.question_column,
        table.name(),
        plan.charts.len(),
        plan.kind.label()
    );
    debug!("Categories: {:?}", report.categories.labels());

    Ok(RunOutput { report, plan })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_core::{ChartKind, SurveyRequest};
    use sc_data::sample_table;

    #[test]
    fn test_sample_single_question() {
        let table = sample_table().unwrap();
        let output = run(&table, &SurveySettings::default()).unwrap();

        assert_eq!(output.plan.charts.len(), 1);
        assert_eq!(output.plan.kind, ChartKind::Bar);
        assert_eq!(output.report.summary.rows().len(), 1);
    }

    #[test]
    fn test_sample_split_question() {
        let table = sample_table().unwrap();
        let settings = SurveySettings {
            request: SurveyRequest { question: 1, split_question: Some(2), ..Default::default() },
            ..Default::default()
        };
        let output = run(&table, &settings).unwrap();

        assert_eq!(output.plan.charts.len(), 2);
        assert_eq!(output.report.summary.rows()[1].label, "Group 2");
        let top = output.plan.charts[0].y_max;
        assert!(top.is_some());
        assert!(output.plan.charts.iter().all(|c| c.y_max == top));
    }

    #[test]
    fn test_missing_column_aborts_with_message() {
        let table = sample_table().unwrap();
        let settings = SurveySettings {
            request: SurveyRequest { question: 42, ..Default::default() },
            ..Default::default()
        };
        let err = run(&table, &settings).unwrap_err();
        assert_eq!(err.to_string(), "Column 'Question42' not found in the dataset");
    }

    #[test]
    fn test_invalid_chart_config_aborts() {
        let table = sample_table().unwrap();
        let mut settings = SurveySettings::default();
        settings.chart.font_size = 99;
        assert!(matches!(run(&table, &settings), Err(DataError::Config(_))));
    }
}
