use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One record of an uploaded sheet, mapping column name to a scalar value.
///
/// Rows are the JSON-object shape the ingestion layer produces from a
/// worksheet: keys are column headers, values are whatever the cell held
/// (number, text, boolean, or null). Key order follows the source sheet.
pub type Row = serde_json::Map<String, Value>;

/// An ordered sequence of rows sharing a nominal schema.
///
/// The schema is nominal only: it is the key set of the first row, and later
/// rows may lack keys or hold non-numeric text in a nominally numeric column.
/// Row order is the original upload order.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Creates a table from already-built rows, preserving their order.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Table { rows }
    }

    /// Creates a table from a JSON array of objects
    ///
    /// This is the document-model shape the storage layer keeps for an
    /// uploaded file (`sheet_to_json` output). Array entries that are not
    /// objects are skipped.
    ///
    /// # Arguments
    /// * `value` - A JSON value expected to be an array of objects
    ///
    /// # Returns
    /// * `Some(Table)` when `value` is an array, `None` otherwise
    pub fn from_json_rows(value: Value) -> Option<Self> {
        let entries = match value {
            Value::Array(entries) => entries,
            _ => return None,
        };

        let rows = entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();

        Some(Table { rows })
    }

    /// Column names of the nominal schema: the key set of the first row,
    /// in source order. Empty when the table is empty.
    pub fn columns(&self) -> Vec<String> {
        match self.rows.first() {
            Some(first) => first.keys().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Looks up a cell by row index and column name. `None` when the row
    /// does not exist or lacks the key.
    pub fn value(&self, row: usize, column: &str) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Iterates over rows in upload order.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(pairs: &[(&str, Value)]) -> Row {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn columns_come_from_first_row_in_order() {
        let table = Table::from_rows(vec![
            row(&[("Month", json!("Jan")), ("Sales", json!(100))]),
            row(&[("Sales", json!(200))]),
        ]);
        assert_eq!(table.columns(), vec!["Month", "Sales"]);
    }

    #[test]
    fn empty_table_has_no_columns() {
        let table = Table::from_rows(vec![]);
        assert!(table.is_empty());
        assert!(table.columns().is_empty());
    }

    #[test]
    fn later_rows_may_lack_keys() {
        let table = Table::from_rows(vec![
            row(&[("a", json!(1)), ("b", json!(2))]),
            row(&[("a", json!(3))]),
        ]);
        assert_eq!(table.value(1, "a"), Some(&json!(3)));
        assert_eq!(table.value(1, "b"), None);
    }

    #[test]
    fn from_json_rows_accepts_object_array() {
        let table = Table::from_json_rows(json!([
            {"x": 1, "y": "10"},
            {"x": 2, "y": "20"},
            "not a row",
        ]))
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.value(0, "y"), Some(&json!("10")));
    }

    #[test]
    fn from_json_rows_rejects_non_array() {
        assert!(Table::from_json_rows(json!({"x": 1})).is_none());
    }
}
