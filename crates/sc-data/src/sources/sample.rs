//! Built-in sample survey
//! Used when no file has been uploaded

use std::sync::Arc;

use arrow::array::{ArrayRef, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::table::SurveyTable;
use crate::DataError;

/// Satisfaction on a 1-5 scale
const QUESTION1: [Option<i64>; 12] = [
    Some(4), Some(5), Some(3), Some(4), Some(2), Some(5),
    Some(4), None, Some(3), Some(5), Some(1), Some(4),
];

/// Respondent group
const QUESTION2: [Option<i64>; 12] = [
    Some(1), Some(2), Some(1), Some(2), Some(1), Some(2),
    Some(1), Some(2), Some(1), Some(2), None, Some(1),
];

/// Would recommend
const QUESTION3: [Option<&str>; 12] = [
    Some("Yes"), Some("Yes"), Some("Maybe"), Some("Yes"), Some("No"), Some("Yes"),
    Some("Maybe"), Some("No"), None, Some("Yes"), Some("No"), Some("Yes"),
];

/// Build the sample survey table
pub fn sample_table() -> Result<SurveyTable, DataError> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Question1", DataType::Int64, true),
        Field::new("Question2", DataType::Int64, true),
        Field::new("Question3", DataType::Utf8, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(QUESTION1.to_vec())),
        Arc::new(Int64Array::from(QUESTION2.to_vec())),
        Arc::new(StringArray::from(QUESTION3.to_vec())),
    ];

    let batch = RecordBatch::try_new(schema, columns)?;
    Ok(SurveyTable::new("Sample survey", batch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_table_shape() {
        let table = sample_table().expect("sample builds");
        assert_eq!(table.num_rows(), 12);
        assert_eq!(table.column_series("Question1").map(|s| s.len()).ok(), Some(11));
        assert!(!table.column_series("Question3").map(|s| s.is_numeric()).unwrap_or(true));
    }
}
