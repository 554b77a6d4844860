use crate::error::IngestError;
use crate::table::{Row, Table};
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Metadata describing one ingested sheet.
///
/// The original application remembered the last uploaded file in
/// process-wide state; this value replaces that, returned alongside the
/// [`Table`] and passed explicitly through the request context so
/// concurrent callers never share it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SheetMeta {
    /// Original file name as supplied by the caller.
    pub filename: String,
    /// Column names of the nominal schema, in source order.
    pub columns: Vec<String>,
    /// When this sheet was ingested.
    pub uploaded_at: DateTime<Utc>,
}

impl SheetMeta {
    fn for_table(filename: &str, table: &Table) -> Self {
        SheetMeta {
            filename: filename.to_string(),
            columns: table.columns(),
            uploaded_at: Utc::now(),
        }
    }
}

/// Parses CSV text into a table and its metadata
///
/// The first record is the header and becomes the nominal schema. Fields
/// that look numeric become JSON numbers, everything else stays text, and
/// empty fields are left out of the row entirely, mirroring how worksheet
/// conversion drops empty cells. Quoted fields, escaped quotes, CRLF line
/// endings, and a leading BOM are handled.
///
/// # Arguments
/// * `filename` - Original name of the uploaded file, recorded in the metadata
/// * `text` - The full CSV content
///
/// # Returns
/// * `Ok((Table, SheetMeta))` on success
/// * `Err(IngestError)` for malformed CSV or a sheet with no data rows
pub fn read_csv_str(filename: &str, text: &str) -> Result<(Table, SheetMeta), IngestError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let records = parse_csv_records(text)?;

    let mut records = records.into_iter();
    let headers = records.next().ok_or(IngestError::EmptySheet)?;

    let mut rows = Vec::new();
    for record in records {
        let mut row = Row::new();
        for (header, field) in headers.iter().zip(record.iter()) {
            if field.is_empty() {
                continue;
            }
            row.insert(header.clone(), field_to_value(field));
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(IngestError::EmptySheet);
    }

    let table = Table::from_rows(rows);
    let meta = SheetMeta::for_table(filename, &table);
    debug!(
        "ingested '{}': {} rows, {} columns",
        meta.filename,
        table.len(),
        meta.columns.len()
    );
    Ok((table, meta))
}

/// Parses a CSV file from disk; see [`read_csv_str`].
pub fn read_csv_file(path: impl AsRef<Path>) -> Result<(Table, SheetMeta), IngestError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    read_csv_str(&filename, &text)
}

/// Parses a JSON array of row objects into a table and its metadata
///
/// This is the shape the storage collaborator keeps for an uploaded file's
/// `data` field. Entries that are not objects are skipped.
pub fn read_json_rows(filename: &str, text: &str) -> Result<(Table, SheetMeta), IngestError> {
    let value: Value = serde_json::from_str(text)?;
    let table = Table::from_json_rows(value).ok_or(IngestError::NotRowObjects)?;
    if table.is_empty() {
        return Err(IngestError::EmptySheet);
    }

    let meta = SheetMeta::for_table(filename, &table);
    debug!(
        "ingested '{}': {} rows, {} columns",
        meta.filename,
        table.len(),
        meta.columns.len()
    );
    Ok((table, meta))
}

/// Numbers stay numbers so later coercion does not depend on formatting.
fn field_to_value(field: &str) -> Value {
    if let Ok(n) = field.parse::<i64>() {
        return Value::from(n);
    }
    if let Ok(f) = field.parse::<f64>() {
        if f.is_finite() {
            return Value::from(f);
        }
    }
    Value::from(field)
}

/// Splits CSV text into records of fields, honoring quoting.
fn parse_csv_records(text: &str) -> Result<Vec<Vec<String>>, IngestError> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                if !field.is_empty() {
                    return Err(IngestError::Csv {
                        line,
                        message: "quote inside unquoted field".to_string(),
                    });
                }
                in_quotes = true;
            }
            ',' => {
                record.push(std::mem::take(&mut field));
            }
            '\r' => {
                // Consumed as part of CRLF; a bare CR is treated the same.
                if chars.peek() == Some(&'\n') {
                    continue;
                }
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
                line += 1;
            }
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
                line += 1;
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(IngestError::Csv {
            line,
            message: "unterminated quoted field".to_string(),
        });
    }

    // Final record without a trailing newline
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }

    // Drop blank trailing records produced by stray newlines
    records.retain(|r| !(r.len() == 1 && r[0].is_empty()));
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn header_becomes_schema_and_types_are_inferred() {
        let csv = "Month,Sales,Region\nJan,100,North\nFeb,250.5,South\n";
        let (table, meta) = read_csv_str("sales.csv", csv).unwrap();

        assert_eq!(meta.filename, "sales.csv");
        assert_eq!(meta.columns, vec!["Month", "Sales", "Region"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.value(0, "Sales"), Some(&json!(100)));
        assert_eq!(table.value(1, "Sales"), Some(&json!(250.5)));
        assert_eq!(table.value(0, "Month"), Some(&json!("Jan")));
    }

    #[test]
    fn empty_fields_become_absent_keys() {
        let csv = "a,b\n1,\n,2\n";
        let (table, _) = read_csv_str("t.csv", csv).unwrap();
        assert_eq!(table.value(0, "a"), Some(&json!(1)));
        assert_eq!(table.value(0, "b"), None);
        assert_eq!(table.value(1, "a"), None);
        assert_eq!(table.value(1, "b"), Some(&json!(2)));
    }

    #[test]
    fn quoted_fields_keep_commas_and_quotes() {
        let csv = "name,note\nwidget,\"a, \"\"b\"\"\"\n";
        let (table, _) = read_csv_str("t.csv", csv).unwrap();
        assert_eq!(table.value(0, "note"), Some(&json!("a, \"b\"")));
    }

    #[test]
    fn crlf_and_bom_are_handled() {
        let csv = "\u{feff}x,y\r\n1,2\r\n3,4\r\n";
        let (table, meta) = read_csv_str("t.csv", csv).unwrap();
        assert_eq!(meta.columns, vec!["x", "y"]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn unterminated_quote_is_an_error() {
        let err = read_csv_str("t.csv", "a\n\"oops\n").unwrap_err();
        assert!(matches!(err, IngestError::Csv { .. }));
    }

    #[test]
    fn header_only_sheet_is_empty() {
        let err = read_csv_str("t.csv", "a,b\n").unwrap_err();
        assert!(matches!(err, IngestError::EmptySheet));
    }

    #[test]
    fn json_rows_round_trip() {
        let text = r#"[{"x": 1, "y": "10"}, {"x": 2, "y": "20"}]"#;
        let (table, meta) = read_json_rows("data.json", text).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(meta.columns, vec!["x", "y"]);
    }

    #[test]
    fn json_non_array_is_rejected() {
        let err = read_json_rows("data.json", r#"{"x": 1}"#).unwrap_err();
        assert!(matches!(err, IngestError::NotRowObjects));
    }

    #[test]
    fn csv_file_is_read_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "a,b\n1,2\n").unwrap();
        let (table, meta) = read_csv_file(file.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert!(!meta.filename.is_empty());
    }
}
