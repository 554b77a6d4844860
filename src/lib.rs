/*!
# Sheet Insights

Descriptive statistics and trend inference engine for uploaded spreadsheet
data, built in Rust.

## Overview

This crate is the numeric analysis core of a spreadsheet analytics
application: users upload a sheet, pick two columns, and get back a trend
classification, an anomaly flag, and an actionable hint, rendered by the
surrounding web application as charts and text. Only the analysis contract
lives here; authentication, document storage, HTTP routing, multipart
upload handling, and chart rendering are external collaborators.

## Architecture

- **Data model** - Row/Table mirror the JSON-object rows produced by
  worksheet conversion: the first row's keys are the nominal schema, and
  later rows may lack keys or carry non-numeric text
- **Numeric coercion** - a permissive parse turns cell values into finite
  floats; anything that fails (text, NaN, infinity) counts as missing
- **Statistics** - mean, population standard deviation, and Pearson
  correlation with a zero-denominator-means-zero convention
- **Insight engine** - a pure function from (table, x axis, y axis) to the
  three insight strings; no I/O, no logging, no retained state, safe to
  call concurrently
- **Ingestion** - converts CSV text or stored JSON row arrays into the
  table model, returning explicit per-request metadata instead of the
  process-wide "latest file" state the original application kept

## Modules

- **table**: Row and Table data model
- **numeric**: permissive numeric coercion of cell values
- **stats**: mean, population standard deviation, Pearson correlation
- **insights**: the insight engine and its result type
- **ingest**: CSV/JSON ingestion and sheet metadata
- **error**: error taxonomy (engine preconditions vs ingestion failures)

## Usage

```
use serde_json::json;
use sheet_insights::insights::compute_insights;
use sheet_insights::table::Table;

let table = Table::from_json_rows(json!([
    {"Month": 1, "Sales": 120},
    {"Month": 2, "Sales": 180},
    {"Month": 3, "Sales": 260},
])).unwrap();

let insights = compute_insights(&table, "Month", "Sales").unwrap();
assert_eq!(insights.trend, "Sales increases with Month");
```
*/

pub mod error;
pub mod ingest;
pub mod insights;
pub mod numeric;
pub mod stats;
pub mod table;

pub use error::{IngestError, InvalidInputError};
pub use ingest::{SheetMeta, read_csv_file, read_csv_str, read_json_rows};
pub use insights::{InsightResult, compute_insights};
pub use table::{Row, Table};
