//! Descriptive statistics for a response series

use ahash::AHashMap;

use crate::series::ResponseSeries;
use crate::value::{format_number, ResponseValue};

/// Placeholder shown for statistics that are undefined, e.g. the mean of nothing.
pub const MISSING_CELL: &str = "-";

const NUMERIC_HEADERS: &[&str] = &["count", "mean", "std", "min", "max"];
const CATEGORICAL_HEADERS: &[&str] = &["count", "unique", "top", "freq"];

/// Statistics for one series.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryStats {
    /// Mean and standard deviation are already rounded to two decimals.
    Numeric {
        count: usize,
        mean: Option<f64>,
        std: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    },
    Categorical {
        count: usize,
        unique: usize,
        top: Option<ResponseValue>,
        freq: usize,
    },
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn cell(v: Option<f64>) -> String {
    v.map(format_number).unwrap_or_else(|| MISSING_CELL.to_string())
}

fn cell2(v: Option<f64>) -> String {
    v.map(|v| format!("{:.2}", v)).unwrap_or_else(|| MISSING_CELL.to_string())
}

impl SummaryStats {
    pub fn count(&self) -> usize {
        match self {
            SummaryStats::Numeric { count, .. } | SummaryStats::Categorical { count, .. } => *count,
        }
    }

    pub fn headers(&self) -> &'static [&'static str] {
        match self {
            SummaryStats::Numeric { .. } => NUMERIC_HEADERS,
            SummaryStats::Categorical { .. } => CATEGORICAL_HEADERS,
        }
    }

    /// Display cells, aligned with [`SummaryStats::headers`].
    pub fn cells(&self) -> Vec<String> {
        match self {
            SummaryStats::Numeric { count, mean, std, min, max } => vec![
                count.to_string(),
                cell2(*mean),
                cell2(*std),
                cell(*min),
                cell(*max),
            ],
            SummaryStats::Categorical { count, unique, top, freq } => vec![
                count.to_string(),
                unique.to_string(),
                top.as_ref().map(|t| t.to_string()).unwrap_or_else(|| MISSING_CELL.to_string()),
                freq.to_string(),
            ],
        }
    }
}

/// Describe a series: count/mean/std/min/max for numbers,
/// count/unique/top/freq otherwise.
///
/// The standard deviation is the sample deviation (n - 1) and is undefined
/// for fewer than two values. Ties for the most frequent value go to the one
/// seen first.
pub fn describe(series: &ResponseSeries) -> SummaryStats {
    if series.is_numeric() {
        describe_numeric(&series.numbers())
    } else {
        describe_categorical(series)
    }
}

fn describe_numeric(values: &[f64]) -> SummaryStats {
    let count = values.len();
    if count == 0 {
        return SummaryStats::Numeric { count, mean: None, std: None, min: None, max: None };
    }

    let n = count as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = (count > 1).then(|| {
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
        round2(variance.sqrt())
    });
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    SummaryStats::Numeric {
        count,
        mean: Some(round2(mean)),
        std,
        min: Some(min),
        max: Some(max),
    }
}

fn describe_categorical(series: &ResponseSeries) -> SummaryStats {
    let mut counts: AHashMap<&ResponseValue, usize> = AHashMap::new();
    for value in series.iter() {
        *counts.entry(value).or_insert(0) += 1;
    }

    let freq = counts.values().copied().max().unwrap_or(0);
    let top = series.iter().find(|v| counts.get(v).copied() == Some(freq)).cloned();

    SummaryStats::Categorical {
        count: series.len(),
        unique: counts.len(),
        top,
        freq,
    }
}

/// One labelled row of the statistics table.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub label: String,
    pub stats: SummaryStats,
}

/// The statistics table: a single row, or one row per group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryTable {
    rows: Vec<SummaryRow>,
}

impl SummaryTable {
    pub fn single(label: impl Into<String>, series: &ResponseSeries) -> Self {
        Self {
            rows: vec![SummaryRow { label: label.into(), stats: describe(series) }],
        }
    }

    /// One row per group, labelled `Group <key>`, in the order given.
    pub fn grouped<'a, I>(groups: I) -> Self
    where
        I: IntoIterator<Item = (&'a ResponseValue, &'a ResponseSeries)>,
    {
        let rows = groups
            .into_iter()
            .map(|(key, series)| SummaryRow {
                label: format!("Group {}", key),
                stats: describe(series),
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column headers of the table; empty when there are no rows.
    pub fn headers(&self) -> &'static [&'static str] {
        self.rows.first().map(|r| r.stats.headers()).unwrap_or(&[])
    }
}
