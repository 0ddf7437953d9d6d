//! Response and group series

use std::collections::BTreeMap;

use crate::value::ResponseValue;

/// Answers to one question, one entry per respondent, missing entries removed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResponseSeries {
    values: Vec<ResponseValue>,
    numeric: bool,
}

impl ResponseSeries {
    /// Build a series, treating it as numeric when every value is a number.
    pub fn new(values: Vec<ResponseValue>) -> Self {
        let numeric = values.iter().all(ResponseValue::is_number);
        Self { values, numeric }
    }

    /// Build a series from raw cells, dropping the missing ones.
    pub fn from_optional<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Option<ResponseValue>>,
    {
        Self::new(cells.into_iter().flatten().collect())
    }

    fn with_kind(values: Vec<ResponseValue>, numeric: bool) -> Self {
        Self { values, numeric }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_numeric(&self) -> bool {
        self.numeric
    }

    pub fn values(&self) -> &[ResponseValue] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResponseValue> {
        self.values.iter()
    }

    /// Numeric view of the series; text entries are skipped.
    pub fn numbers(&self) -> Vec<f64> {
        self.values.iter().filter_map(ResponseValue::as_f64).collect()
    }

    /// Keep only the first `len` entries.
    pub fn truncated(&self, len: usize) -> Self {
        let end = len.min(self.values.len());
        Self::with_kind(self.values[..end].to_vec(), self.numeric)
    }

    /// Split this series by the value found at the same position in `group`.
    ///
    /// Pairs are formed positionally, so entries past the shorter of the two
    /// series are ignored. Groups come back in ascending key order and each
    /// sub-series keeps the numeric kind of the parent.
    pub fn partition_by(&self, group: &ResponseSeries) -> Vec<(ResponseValue, ResponseSeries)> {
        let mut buckets: BTreeMap<&ResponseValue, Vec<ResponseValue>> = BTreeMap::new();
        for (value, key) in self.values.iter().zip(group.values.iter()) {
            buckets.entry(key).or_default().push(value.clone());
        }

        buckets
            .into_iter()
            .map(|(key, values)| (key.clone(), Self::with_kind(values, self.numeric)))
            .collect()
    }
}

impl FromIterator<ResponseValue> for ResponseSeries {
    fn from_iter<T: IntoIterator<Item = ResponseValue>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[i64]) -> ResponseSeries {
        values.iter().map(|&v| ResponseValue::from(v)).collect()
    }

    #[test]
    fn test_missing_entries_are_dropped() {
        let s = ResponseSeries::from_optional(vec![
            Some(ResponseValue::from(1)),
            None,
            Some(ResponseValue::from(3)),
        ]);
        assert_eq!(s.len(), 2);
        assert!(s.is_numeric());
    }

    #[test]
    fn test_text_makes_series_categorical() {
        let s: ResponseSeries = vec![ResponseValue::from(1), ResponseValue::from("n/a yet")]
            .into_iter()
            .collect();
        assert!(!s.is_numeric());
    }

    #[test]
    fn test_partition_orders_groups_and_keeps_kind() {
        let values = series(&[5, 4, 3, 2]);
        let group = series(&[2, 1, 2, 1]);
        let parts = values.partition_by(&group);

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].0, ResponseValue::from(1));
        assert_eq!(parts[0].1, series(&[4, 2]));
        assert_eq!(parts[1].1, series(&[5, 3]));
        assert!(parts[1].1.is_numeric());
    }

    #[test]
    fn test_truncated_never_grows() {
        let s = series(&[1, 2]);
        assert_eq!(s.truncated(5).len(), 2);
        assert_eq!(s.truncated(1), series(&[1]));
    }
}
