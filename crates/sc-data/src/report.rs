//! One run of the survey tool: read the requested columns, tabulate them and
//! describe them.

use std::fmt;

use sc_core::{
    align_positional, tabulate, tabulate_grouped, CategorySet, CategorySource, GroupedTabulation,
    ResponseSeries, SplitAlignment, SummaryTable, SurveyRequest, Tabulation, Truncation,
};
use tracing::info;

use crate::table::SurveyTable;
use crate::DataError;

/// Counts for the requested question.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportBody {
    Single(Tabulation),
    Grouped(GroupedTabulation),
}

/// Something the user should know about a run that still succeeded.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// Answers and split values had different lengths and were paired by position.
    Truncated(Truncation),
    /// The split question has no answers, so there is nothing to chart.
    NoGroups(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Truncated(t) => write!(
                f,
                "{} answers and {} split values were paired by position; only the first {} were used",
                t.responses, t.groups, t.kept
            ),
            Notice::NoGroups(column) => write!(f, "Column '{}' has no answers to split by", column),
        }
    }
}

/// Tabulation, statistics and notices for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyReport {
    pub question_column: String,
    pub split_column: Option<String>,
    pub categories: CategorySet,
    pub body: ReportBody,
    pub summary: SummaryTable,
    pub notices: Vec<Notice>,
}

impl SurveyReport {
    /// Run `request` against `table`.
    ///
    /// Fails when a requested column is absent; every other condition,
    /// including a question nobody answered, produces a report.
    pub fn build(table: &SurveyTable, request: &SurveyRequest) -> Result<Self, DataError> {
        request.validate()?;

        let question_column = request.question_column();
        let cells = table.column_cells(&question_column)?;
        let series = ResponseSeries::from_optional(cells.iter().cloned());

        let categories = match request.categories {
            CategorySource::Observed => CategorySet::observed(&series),
            CategorySource::Range(count) => CategorySet::range(count),
        };
        info!(
            "Tabulating {} ({} answers, {} categories)",
            question_column,
            series.len(),
            categories.len()
        );

        let Some(split_column) = request.split_column() else {
            return Ok(Self {
                summary: SummaryTable::single(question_column.clone(), &series),
                body: ReportBody::Single(tabulate(&series, &categories)),
                question_column,
                split_column: None,
                categories,
                notices: Vec::new(),
            });
        };

        let group_cells = table.column_cells(&split_column)?;
        let (series, group) = match request.alignment {
            SplitAlignment::Truncate => (series, ResponseSeries::from_optional(group_cells)),
            SplitAlignment::Respondent => {
                let (values, groups): (Vec<_>, Vec<_>) = cells
                    .into_iter()
                    .zip(group_cells)
                    .filter_map(|(value, group)| Some((value?, group?)))
                    .unzip();
                (ResponseSeries::new(values), ResponseSeries::new(groups))
            }
        };

        let tabulation = tabulate_grouped(&series, &group, &categories);
        let (aligned, aligned_group, _) = align_positional(&series, &group);
        let parts = aligned.partition_by(&aligned_group);
        let summary = SummaryTable::grouped(parts.iter().map(|(key, part)| (key, part)));

        let mut notices = Vec::new();
        if let Some(truncation) = tabulation.truncation() {
            notices.push(Notice::Truncated(truncation));
        }
        if tabulation.is_empty() {
            notices.push(Notice::NoGroups(split_column.clone()));
        }

        info!("Split by {} into {} groups", split_column, tabulation.len());

        Ok(Self {
            question_column,
            split_column: Some(split_column),
            categories,
            body: ReportBody::Grouped(tabulation),
            summary,
            notices,
        })
    }
}
