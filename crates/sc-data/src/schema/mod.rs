use std::collections::HashSet;

use arrow::datatypes::{DataType, Field, Schema};

use crate::config::NullConfig;

/// Detects whether each survey column holds whole numbers, decimals or text
pub struct SchemaDetector<'a> {
    null_config: &'a NullConfig,
}

/// Information about a detected schema
#[derive(Debug, Clone)]
pub struct SchemaInfo {
    pub schema: Schema,
    pub column_stats: Vec<ColumnStats>,
}

/// Statistics about a column
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStats {
    pub name: String,
    pub null_count: usize,
    pub distinct_count: usize,
}

impl<'a> SchemaDetector<'a> {
    pub fn new(null_config: &'a NullConfig) -> Self {
        Self { null_config }
    }

    /// Detect schema from all rows of the file
    pub fn detect(&self, headers: &[String], rows: &[Vec<String>]) -> SchemaInfo {
        let mut fields = Vec::with_capacity(headers.len());
        let mut column_stats = Vec::with_capacity(headers.len());

        for (col_idx, header) in headers.iter().enumerate() {
            let (data_type, null_count, distinct_count) = self.analyze_column(rows, col_idx);
            fields.push(Field::new(header, data_type, true));
            column_stats.push(ColumnStats {
                name: header.clone(),
                null_count,
                distinct_count,
            });
        }

        SchemaInfo {
            schema: Schema::new(fields),
            column_stats,
        }
    }

    /// Analyze a single column
    fn analyze_column(&self, rows: &[Vec<String>], col_idx: usize) -> (DataType, usize, usize) {
        let mut null_count = 0;
        let mut distinct = HashSet::new();
        let mut is_int = true;
        let mut is_float = true;

        for row in rows {
            match row.get(col_idx) {
                Some(value) if !self.null_config.is_null(value) => {
                    let value = value.trim();
                    if is_int && value.parse::<i64>().is_err() {
                        is_int = false;
                    }
                    if is_float && value.parse::<f64>().is_err() {
                        is_float = false;
                    }
                    distinct.insert(value);
                }
                _ => null_count += 1,
            }
        }

        // An all-missing column has no answers to disagree with a number type.
        let data_type = if distinct.is_empty() {
            DataType::Float64
        } else if is_int {
            DataType::Int64
        } else if is_float {
            DataType::Float64
        } else {
            DataType::Utf8
        };

        (data_type, null_count, distinct.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter().map(|r| r.iter().map(|s| s.to_string()).collect()).collect()
    }

    #[test]
    fn test_detects_column_types() {
        let nulls = NullConfig::default();
        let headers = vec!["Question1".to_string(), "Question2".to_string(), "Question3".to_string()];
        let data = rows(&[&["1", "2.5", "Yes"], &["3", "", "No"], &["", "4", "Yes"]]);

        let info = SchemaDetector::new(&nulls).detect(&headers, &data);
        let types: Vec<&DataType> = info.schema.fields().iter().map(|f| f.data_type()).collect();
        assert_eq!(types, vec![&DataType::Int64, &DataType::Float64, &DataType::Utf8]);
        assert_eq!(info.column_stats[0].null_count, 1);
        assert_eq!(info.column_stats[2].distinct_count, 2);
    }

    #[test]
    fn test_short_rows_count_as_missing() {
        let nulls = NullConfig::default();
        let headers = vec!["Question1".to_string(), "Question2".to_string()];
        let data = rows(&[&["1"], &["2", "x"]]);

        let info = SchemaDetector::new(&nulls).detect(&headers, &data);
        assert_eq!(info.column_stats[1].null_count, 1);
        assert_eq!(info.schema.field(1).data_type(), &DataType::Utf8);
    }
}
