//! Category sets used to index tabulations

use serde::{Deserialize, Serialize};

use crate::series::ResponseSeries;
use crate::value::ResponseValue;

/// The fixed, sorted set of categories a question can take.
///
/// Every tabulation reports one count per category in this set, in this
/// order, whether or not the category was observed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategorySet {
    values: Vec<ResponseValue>,
}

impl CategorySet {
    /// Create a set from arbitrary values; duplicates are collapsed.
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = ResponseValue>,
    {
        let mut values: Vec<ResponseValue> = values.into_iter().collect();
        values.sort();
        values.dedup();
        Self { values }
    }

    /// Categories observed in a series.
    pub fn observed(series: &ResponseSeries) -> Self {
        Self::new(series.iter().cloned())
    }

    /// Categories `1..=count`, for questions answered on a fixed scale.
    pub fn range(count: u32) -> Self {
        Self {
            values: (1..=count as i64).map(ResponseValue::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResponseValue> {
        self.values.iter()
    }

    pub fn contains(&self, value: &ResponseValue) -> bool {
        self.position(value).is_some()
    }

    /// Index of a category in sorted order.
    pub fn position(&self, value: &ResponseValue) -> Option<usize> {
        self.values.binary_search(value).ok()
    }

    pub fn labels(&self) -> Vec<String> {
        self.values.iter().map(|v| v.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observed_is_sorted_and_unique() {
        let series: ResponseSeries = [3, 1, 3, 2, 1].iter().map(|&v| ResponseValue::from(v)).collect();
        let set = CategorySet::observed(&series);
        assert_eq!(set.labels(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_range_starts_at_one() {
        let set = CategorySet::range(4);
        assert_eq!(set.labels(), vec!["1", "2", "3", "4"]);
        assert_eq!(set.position(&ResponseValue::from(3)), Some(2));
        assert!(!set.contains(&ResponseValue::from(5)));
        assert!(CategorySet::range(0).is_empty());
    }
}
