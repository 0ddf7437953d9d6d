//! Text rows to an arrow-backed table, shared by every file source

use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Builder, Int64Builder, StringBuilder};
use arrow::datatypes::DataType;
use arrow::record_batch::{RecordBatch, RecordBatchOptions};
use tracing::{debug, info};

use crate::config::NullConfig;
use crate::schema::SchemaDetector;
use crate::table::SurveyTable;
use crate::DataError;

/// Type every column from its cells and build the table.
pub(crate) fn table_from_rows(
    name: &str,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    nulls: &NullConfig,
) -> Result<SurveyTable, DataError> {
    if headers.iter().all(|h| h.is_empty()) {
        return Err(DataError::MissingHeader);
    }

    let info = SchemaDetector::new(nulls).detect(&headers, &rows);
    for stats in &info.column_stats {
        debug!(
            "Column '{}': {} missing, {} distinct",
            stats.name, stats.null_count, stats.distinct_count
        );
    }

    let schema = Arc::new(info.schema);
    let columns: Vec<ArrayRef> = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(col_idx, field)| build_column(field.data_type(), &rows, col_idx, nulls))
        .collect();

    let options = RecordBatchOptions::new().with_row_count(Some(rows.len()));
    let batch = RecordBatch::try_new_with_options(schema, columns, &options)?;

    info!("Loaded {} rows and {} columns from {}", batch.num_rows(), batch.num_columns(), name);
    Ok(SurveyTable::new(name, batch))
}

/// Build an arrow array for one column
fn build_column(data_type: &DataType, rows: &[Vec<String>], col_idx: usize, nulls: &NullConfig) -> ArrayRef {
    let cell = |row: &Vec<String>| -> Option<String> {
        row.get(col_idx)
            .filter(|v| !nulls.is_null(v))
            .map(|v| v.trim().to_string())
    };

    match data_type {
        DataType::Int64 => {
            let mut builder = Int64Builder::new();
            for row in rows {
                builder.append_option(cell(row).and_then(|v| v.parse::<i64>().ok()));
            }
            Arc::new(builder.finish())
        }
        DataType::Float64 => {
            let mut builder = Float64Builder::new();
            for row in rows {
                builder.append_option(cell(row).and_then(|v| v.parse::<f64>().ok()));
            }
            Arc::new(builder.finish())
        }
        _ => {
            let mut builder = StringBuilder::new();
            for row in rows {
                builder.append_option(cell(row));
            }
            Arc::new(builder.finish())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_core::ResponseValue;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter().map(|r| r.iter().map(|s| s.to_string()).collect()).collect()
    }

    #[test]
    fn test_short_rows_read_as_missing() {
        let headers = vec!["Question1".to_string(), "Question2".to_string()];
        let table = table_from_rows("sheet", headers, rows(&[&["1", "Yes"], &["2"]]), &NullConfig::default())
            .expect("table builds");

        assert_eq!(table.num_rows(), 2);
        let q2 = table.column_cells("Question2").expect("column exists");
        assert_eq!(q2, vec![Some(ResponseValue::from("Yes")), None]);
    }

    #[test]
    fn test_blank_headers_are_rejected() {
        let headers = vec![String::new(), String::new()];
        let result = table_from_rows("sheet", headers, rows(&[&["1", "2"]]), &NullConfig::default());
        assert!(matches!(result, Err(DataError::MissingHeader)));
    }

    #[test]
    fn test_listed_patterns_become_missing() {
        let mut nulls = NullConfig::default();
        nulls.add_pattern("skip");
        let headers = vec!["Question1".to_string()];
        let table = table_from_rows("sheet", headers, rows(&[&["3"], &["skip"], &["4"]]), &nulls)
            .expect("table builds");

        let q1 = table.column_series("Question1").expect("column exists");
        assert!(q1.is_numeric());
        assert_eq!(q1.len(), 2);
    }
}
