use crate::error::InvalidInputError;
use crate::numeric::coerce;
use crate::stats::{mean, pearson, population_std_dev};
use crate::table::Table;
use serde::{Deserialize, Serialize};

/// Correlation magnitude above which a trend is reported.
///
/// A fixed design constant, not derived from sample size; it is intentionally
/// crude and kept in lockstep with the original engine.
pub const CORRELATION_THRESHOLD: f64 = 0.2;

/// Ratio of standard deviation to mean above which variability is flagged.
pub const VARIABILITY_RATIO: f64 = 0.2;

/// The three insight strings produced for one axis selection.
///
/// Transient value: produced fresh per call, owned solely by the caller,
/// never retained by the engine. Serializes to the
/// `{ trend, anomaly, actionable }` response shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightResult {
    pub trend: String,
    pub anomaly: String,
    pub actionable: String,
}

impl InsightResult {
    /// Renders the plain-text export block offered for download.
    pub fn to_report(&self) -> String {
        format!(
            "Trend: {}\nAnomaly: {}\nActionable: {}",
            self.trend, self.anomaly, self.actionable
        )
    }
}

/// Computes trend, anomaly, and actionable-insight text for one axis pair
///
/// The y-column is coerced to numbers with [`coerce`]; rows whose y-value
/// does not parse to a finite number are dropped from the series before any
/// statistic is computed. The x-column is kept as-is for labeling, and only
/// coerced (pairwise, over the y-filtered rows) for the correlation step.
///
/// Statistics: mean and population standard deviation of the filtered
/// y-series, plus Pearson correlation between the coercible (x, y) pairs.
/// Rows whose x-value does not coerce are excluded from the correlation
/// pairs only, matching the y-filtering policy; if no pairs remain the
/// correlation is `0.0`.
///
/// # Arguments
/// * `table` - The uploaded sheet as rows; never mutated
/// * `x_axis` - Column used for labeling/grouping and the correlation x-series
/// * `y_axis` - Column the statistics are computed over
///
/// # Returns
/// * `Ok(InsightResult)` with the three insight strings
/// * `Err(InvalidInputError)` when the table is empty, the first row lacks
///   `x_axis` or `y_axis` as a key, or no numeric y-values remain after
///   filtering
///
/// # Examples
/// ```
/// use serde_json::json;
/// use sheet_insights::insights::compute_insights;
/// use sheet_insights::table::Table;
///
/// let table = Table::from_json_rows(json!([
///     {"Month": 1, "Sales": 120},
///     {"Month": 2, "Sales": 180},
///     {"Month": 3, "Sales": 260},
/// ])).unwrap();
///
/// let result = compute_insights(&table, "Month", "Sales").unwrap();
/// assert_eq!(result.trend, "Sales increases with Month");
/// ```
pub fn compute_insights(
    table: &Table,
    x_axis: &str,
    y_axis: &str,
) -> Result<InsightResult, InvalidInputError> {
    let first = table.rows().first().ok_or(InvalidInputError::EmptyTable)?;

    if !first.contains_key(x_axis) {
        return Err(InvalidInputError::MissingAxis {
            axis: "x",
            column: x_axis.to_string(),
        });
    }
    if !first.contains_key(y_axis) {
        return Err(InvalidInputError::MissingAxis {
            axis: "y",
            column: y_axis.to_string(),
        });
    }

    // Filter to rows with a finite numeric y, keeping the paired raw x.
    let mut x_raw = Vec::with_capacity(table.len());
    let mut y_series = Vec::with_capacity(table.len());
    for row in table {
        if let Some(y) = row.get(y_axis).and_then(coerce) {
            x_raw.push(row.get(x_axis));
            y_series.push(y);
        }
    }

    if y_series.is_empty() {
        return Err(InvalidInputError::NoNumericValues {
            column: y_axis.to_string(),
        });
    }

    let avg = mean(&y_series);
    let std_dev = population_std_dev(&y_series);

    // Correlation over the pairs whose x also coerces. A categorical x
    // leaves no pairs, which lands on the zero-denominator convention.
    let mut x_pairs = Vec::with_capacity(y_series.len());
    let mut y_pairs = Vec::with_capacity(y_series.len());
    for (x, &y) in x_raw.iter().zip(y_series.iter()) {
        if let Some(x) = x.and_then(coerce) {
            x_pairs.push(x);
            y_pairs.push(y);
        }
    }
    let correlation = pearson(&x_pairs, &y_pairs);

    let trend = if correlation > CORRELATION_THRESHOLD {
        format!("{y_axis} increases with {x_axis}")
    } else if correlation < -CORRELATION_THRESHOLD {
        format!("{y_axis} decreases with {x_axis}")
    } else {
        format!("No strong correlation between {x_axis} and {y_axis}")
    };

    // Literal comparison, no guard for mean <= 0.
    let anomaly = if std_dev > avg * VARIABILITY_RATIO {
        "High variability detected. Potential anomalies exist.".to_string()
    } else {
        "No significant anomalies detected.".to_string()
    };

    let actionable = format!(
        "Focus on {x_axis} values where {y_axis} is in the top 10% for better performance."
    );

    Ok(InsightResult {
        trend,
        anomaly,
        actionable,
    })
}
