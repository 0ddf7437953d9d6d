//! In-memory survey table

use arrow::array::{Array, Float64Array, Int64Array, StringArray};
use arrow::record_batch::RecordBatch;
use arrow::util::display::array_value_to_string;
use sc_core::{ResponseSeries, ResponseValue};

use crate::DataError;

/// A loaded survey: one row per respondent, one column per question.
#[derive(Debug, Clone)]
pub struct SurveyTable {
    name: String,
    batch: RecordBatch,
}

impl SurveyTable {
    pub fn new(name: impl Into<String>, batch: RecordBatch) -> Self {
        Self {
            name: name.into(),
            batch,
        }
    }

    /// Display name, usually the file name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.batch.column_by_name(name).is_some()
    }

    /// Every cell of a column in row order; `None` where the answer is missing.
    /// Numeric-looking cells of a text column read as numbers.
    pub fn column_cells(&self, name: &str) -> Result<Vec<Option<ResponseValue>>, DataError> {
        let column = self
            .batch
            .column_by_name(name)
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))?;

        let cells = if let Some(ints) = column.as_any().downcast_ref::<Int64Array>() {
            ints.iter().map(|v| v.map(ResponseValue::from)).collect()
        } else if let Some(floats) = column.as_any().downcast_ref::<Float64Array>() {
            floats
                .iter()
                .map(|v| v.filter(|f| !f.is_nan()).map(ResponseValue::from))
                .collect()
        } else if let Some(strings) = column.as_any().downcast_ref::<StringArray>() {
            strings.iter().map(|v| v.map(ResponseValue::parse)).collect()
        } else {
            tracing::debug!("Column '{}' has type {:?}; reading it as text", name, column.data_type());
            let mut cells = Vec::with_capacity(column.len());
            for i in 0..column.len() {
                if column.is_null(i) {
                    cells.push(None);
                } else {
                    cells.push(Some(ResponseValue::parse(&array_value_to_string(column, i)?)));
                }
            }
            cells
        };

        Ok(cells)
    }

    /// Answers in a column with missing entries dropped.
    pub fn column_series(&self, name: &str) -> Result<ResponseSeries, DataError> {
        Ok(ResponseSeries::from_optional(self.column_cells(name)?))
    }

    /// The first `rows` rows rendered as text; missing cells are empty.
    pub fn preview(&self, rows: usize) -> Vec<Vec<String>> {
        let rows = rows.min(self.num_rows());
        (0..rows)
            .map(|row| {
                self.batch
                    .columns()
                    .iter()
                    .map(|column| {
                        if column.is_null(row) {
                            String::new()
                        } else {
                            array_value_to_string(column, row).unwrap_or_default()
                        }
                    })
                    .collect()
            })
            .collect()
    }
}
