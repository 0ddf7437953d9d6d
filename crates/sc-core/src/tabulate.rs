//! Frequency tabulation over a fixed category set

use ahash::AHashMap;
use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::category::CategorySet;
use crate::series::ResponseSeries;
use crate::value::ResponseValue;

/// Counts per category, in category order, zero-filled.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tabulation {
    counts: IndexMap<ResponseValue, usize>,
}

impl Tabulation {
    pub fn get(&self, category: &ResponseValue) -> Option<usize> {
        self.counts.get(category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResponseValue, usize)> {
        self.counts.iter().map(|(k, v)| (k, *v))
    }

    pub fn counts(&self) -> Vec<usize> {
        self.counts.values().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of responses that fell inside the category set.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }
}

/// Count `series` against `categories`.
///
/// Values outside the category set are not counted.
pub fn tabulate(series: &ResponseSeries, categories: &CategorySet) -> Tabulation {
    let mut raw: AHashMap<&ResponseValue, usize> = AHashMap::new();
    for value in series.iter() {
        *raw.entry(value).or_insert(0) += 1;
    }

    let counts = categories
        .iter()
        .map(|category| (category.clone(), raw.get(category).copied().unwrap_or(0)))
        .collect();

    Tabulation { counts }
}

/// Recorded when a response series and its group series had different lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncation {
    pub responses: usize,
    pub groups: usize,
    pub kept: usize,
}

/// Truncate both series to the shorter length.
///
/// Pairing is positional. When missing entries were dropped from the two
/// series independently, positions no longer refer to the same respondent;
/// the returned [`Truncation`] lets callers surface that.
pub fn align_positional(
    series: &ResponseSeries,
    group: &ResponseSeries,
) -> (ResponseSeries, ResponseSeries, Option<Truncation>) {
    let kept = series.len().min(group.len());
    let truncation = (series.len() != group.len()).then(|| Truncation {
        responses: series.len(),
        groups: group.len(),
        kept,
    });

    (series.truncated(kept), group.truncated(kept), truncation)
}

/// Tabulations split by the value of a second question.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupedTabulation {
    groups: IndexMap<ResponseValue, Tabulation>,
    truncation: Option<Truncation>,
}

impl GroupedTabulation {
    pub fn get(&self, group: &ResponseValue) -> Option<&Tabulation> {
        self.groups.get(group)
    }

    /// Groups in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ResponseValue, &Tabulation)> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn truncation(&self) -> Option<Truncation> {
        self.truncation
    }

    /// Largest count across every group.
    pub fn max_count(&self) -> usize {
        self.groups.values().map(Tabulation::max_count).max().unwrap_or(0)
    }
}

/// Count `series` per distinct value of `group`, against `categories`.
pub fn tabulate_grouped(
    series: &ResponseSeries,
    group: &ResponseSeries,
    categories: &CategorySet,
) -> GroupedTabulation {
    let (series, group, truncation) = align_positional(series, group);
    if let Some(t) = truncation {
        warn!(
            "Split truncated to {} rows ({} responses, {} group values)",
            t.kept, t.responses, t.groups
        );
    }

    let groups: IndexMap<ResponseValue, Tabulation> = series
        .partition_by(&group)
        .into_iter()
        .map(|(key, values)| {
            let tabulation = tabulate(&values, categories);
            debug!("Group {}: {} responses", key, tabulation.total());
            (key, tabulation)
        })
        .collect();

    GroupedTabulation { groups, truncation }
}
