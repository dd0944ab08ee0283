// CSV ingestion and cleaning.
//
// The pipeline is three strictly forward passes over an in-memory table:
// schema normalization (headers), field coercion (dates, engagement counts),
// and row filtering (drop records without a usable date). Each pass produces
// new values; nothing is mutated after handoff.
use crate::error::IngestError;
use crate::types::{CleanRecord, CleaningReport, CANONICAL_COLUMNS};
use crate::util::{parse_date_flexible, parse_f64_safe};
use chrono::NaiveDate;
use csv::ReaderBuilder;

/// A record reshaped onto the canonical six-column schema, still untyped.
/// Columns missing from the input are carried as empty strings.
#[derive(Debug, Clone, Default)]
struct NormalizedRecord {
    date: String,
    platform: String,
    sentiment: String,
    location: String,
    engagements: String,
    media_type: String,
}

/// Outcome of date coercion. `Empty` and `Invalid` are distinct so the
/// report can count parse failures without also counting cells that were
/// blank before coercion ever ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateField {
    Valid(NaiveDate),
    Empty,
    Invalid,
}

/// A record after field coercion. Row count is unchanged from the input;
/// the filter stage is the only one allowed to drop rows.
#[derive(Debug, Clone)]
struct CoercedRecord {
    date: DateField,
    platform: String,
    sentiment: String,
    location: String,
    engagements: u64,
    media_type: String,
}

/// Map raw header positions onto the canonical column slots
/// (date, platform, sentiment, location, engagements, media type).
///
/// Headers are matched after lower-casing and trimming; if two raw headers
/// normalize to the same name, the first one wins. Unrecognized headers are
/// left unmapped and their cells never reach the pipeline.
fn map_headers(headers: &[String]) -> [Option<usize>; 6] {
    let mut slots: [Option<usize>; 6] = [None; 6];
    for (idx, raw) in headers.iter().enumerate() {
        let name = raw.trim().to_lowercase();
        let Some(slot) = CANONICAL_COLUMNS
            .iter()
            .position(|c| c.to_lowercase() == name)
        else {
            continue;
        };
        if slots[slot].is_none() {
            slots[slot] = Some(idx);
        }
    }
    slots
}

/// Reshape every row onto the canonical schema. Never fails and never
/// changes row count; absent columns are synthesized as empty strings.
fn normalize_schema(headers: &[String], rows: &[Vec<String>]) -> Vec<NormalizedRecord> {
    let slots = map_headers(headers);
    let cell = |row: &[String], slot: Option<usize>| -> String {
        slot.and_then(|i| row.get(i)).cloned().unwrap_or_default()
    };
    rows.iter()
        .map(|row| NormalizedRecord {
            date: cell(row, slots[0]),
            platform: cell(row, slots[1]),
            sentiment: cell(row, slots[2]),
            location: cell(row, slots[3]),
            engagements: cell(row, slots[4]),
            media_type: cell(row, slots[5]),
        })
        .collect()
}

fn coerce_date(cell: &str) -> DateField {
    let cell = cell.trim();
    if cell.is_empty() {
        return DateField::Empty;
    }
    match parse_date_flexible(cell) {
        Some(d) => DateField::Valid(d),
        None => DateField::Invalid,
    }
}

/// Whether the original `Engagements` cell counts as missing/invalid for the
/// cleaning report. Independent of the stored value below.
fn engagements_missing_or_invalid(cell: &str) -> bool {
    cell.trim().is_empty() || parse_f64_safe(Some(cell)).is_none()
}

/// Stored engagement value: numeric parse, default 0 on failure, truncated
/// toward zero. Negative input also stores 0 so the count stays unsigned.
fn coerce_engagements(cell: &str) -> u64 {
    match parse_f64_safe(Some(cell)) {
        Some(v) if v > 0.0 => v as u64,
        _ => 0,
    }
}

/// Coerce dates and engagement counts across all records, tallying both
/// failure classes. The classification of `Engagements` happens here, over
/// every input row, so rows later dropped for a bad date still contribute.
fn coerce_fields(records: Vec<NormalizedRecord>) -> (Vec<CoercedRecord>, usize, usize) {
    let mut missing_engagements = 0usize;
    let mut invalid_dates = 0usize;
    let coerced = records
        .into_iter()
        .map(|r| {
            if engagements_missing_or_invalid(&r.engagements) {
                missing_engagements += 1;
            }
            let date = coerce_date(&r.date);
            if date == DateField::Invalid {
                invalid_dates += 1;
            }
            CoercedRecord {
                date,
                platform: r.platform,
                sentiment: r.sentiment,
                location: r.location,
                engagements: coerce_engagements(&r.engagements),
                media_type: r.media_type,
            }
        })
        .collect();
    (coerced, missing_engagements, invalid_dates)
}

/// Retain exactly the records with a valid calendar date, preserving order.
fn keep_dated(records: Vec<CoercedRecord>) -> Vec<CleanRecord> {
    records
        .into_iter()
        .filter_map(|r| match r.date {
            DateField::Valid(date) => Some(CleanRecord {
                date,
                platform: r.platform,
                sentiment: r.sentiment,
                location: r.location,
                engagements: r.engagements,
                media_type: r.media_type,
            }),
            DateField::Empty | DateField::Invalid => None,
        })
        .collect()
}

/// Run the full cleaning pipeline over an in-memory table.
///
/// Always succeeds: schema and coercion problems are absorbed into the
/// returned `CleaningReport` rather than raised.
pub fn clean_table(headers: &[String], rows: &[Vec<String>]) -> (Vec<CleanRecord>, CleaningReport) {
    let original_row_count = rows.len();
    let normalized = normalize_schema(headers, rows);
    let (coerced, missing_or_invalid_engagements_count, invalid_date_count) =
        coerce_fields(normalized);
    let cleaned = keep_dated(coerced);
    let report = CleaningReport {
        original_row_count,
        cleaned_row_count: cleaned.len(),
        missing_or_invalid_engagements_count,
        invalid_date_count,
    };
    (cleaned, report)
}

/// Read a CSV file and clean it.
///
/// The reader runs in flexible mode: short rows are padded with empty cells
/// by the normalizer rather than rejected. Only unreadable or structurally
/// broken input surfaces an error.
pub fn load_and_clean(path: &str) -> Result<(Vec<CleanRecord>, CleaningReport), IngestError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(clean_table(&headers, &rows))
}
