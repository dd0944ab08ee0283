use chrono::NaiveDate;
use serde::Serialize;
use tabled::Tabled;

/// The six canonical column names every cleaned record conforms to.
///
/// Input headers are matched against these after lower-casing and trimming;
/// recognized columns are renamed, unrecognized ones are ignored, and absent
/// ones are synthesized as empty strings.
pub const CANONICAL_COLUMNS: [&str; 6] = [
    "Date",
    "Platform",
    "Sentiment",
    "Location",
    "Engagements",
    "Media Type",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanRecord {
    pub date: NaiveDate,
    pub platform: String,
    pub sentiment: String,
    pub location: String,
    pub engagements: u64,
    pub media_type: String,
}

/// Cleaning statistics for one ingestion. Computed once by the loader and
/// immutable afterwards; displayed alongside the generated tables.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CleaningReport {
    pub original_row_count: usize,
    pub cleaned_row_count: usize,
    /// Rows whose original `Engagements` cell was blank or not numeric.
    /// Counted over every input row, including rows later dropped for a
    /// bad date.
    pub missing_or_invalid_engagements_count: usize,
    /// Rows whose `Date` cell was non-blank but failed to parse. Cells that
    /// were already empty before coercion are excluded from this count even
    /// though those rows are dropped too.
    pub invalid_date_count: usize,
}

/// One row of an aggregate table. `metric` is a member count for the
/// sentiment and media-type dimensions and an engagement sum for the rest.
#[derive(Debug, Clone, Serialize, Tabled, PartialEq, Eq)]
pub struct AggregateRow {
    #[serde(rename = "key")]
    #[tabled(rename = "Key")]
    pub key: String,
    #[serde(rename = "metric")]
    #[tabled(rename = "Metric")]
    pub metric: u64,
}

impl AggregateRow {
    pub fn new(key: impl Into<String>, metric: u64) -> Self {
        AggregateRow {
            key: key.into(),
            metric,
        }
    }
}

/// An aggregate table paired with the insight sentences derived from it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChartData {
    pub rows: Vec<AggregateRow>,
    pub insights: Vec<String>,
}

/// The complete contract handed to the rendering layer: the cleaning report
/// plus the five aggregate views. Nothing else crosses that boundary.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub cleaning: CleaningReport,
    pub sentiment_breakdown: ChartData,
    pub engagement_trend: ChartData,
    pub platform_engagements: ChartData,
    pub media_type_mix: ChartData,
    pub top_locations: ChartData,
}
