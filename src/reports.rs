// The five aggregate views over the cleaned dataset.
//
// Each function is a pure reduction over `&[CleanRecord]`; an empty input
// produces an empty table everywhere. Sort stability matters: descending
// orders break ties by first-seen group order.
use crate::insights;
use crate::types::{AggregateRow, ChartData, CleanRecord, CleaningReport, DashboardData};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// Tally one metric contribution per record into per-key totals, keeping
/// keys in first-seen order.
fn accumulate<F>(data: &[CleanRecord], mut entry: F) -> Vec<AggregateRow>
where
    F: FnMut(&CleanRecord) -> (String, u64),
{
    let mut rows: Vec<AggregateRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for r in data {
        let (key, add) = entry(r);
        match index.get(&key) {
            Some(&i) => rows[i].metric += add,
            None => {
                index.insert(key.clone(), rows.len());
                rows.push(AggregateRow::new(key, add));
            }
        }
    }
    rows
}

fn sort_desc(mut rows: Vec<AggregateRow>) -> Vec<AggregateRow> {
    // Stable sort keeps first-seen order among equal metrics.
    rows.sort_by(|a, b| b.metric.cmp(&a.metric));
    rows
}

/// Mention counts per sentiment, descending.
pub fn sentiment_breakdown(data: &[CleanRecord]) -> Vec<AggregateRow> {
    sort_desc(accumulate(data, |r| (r.sentiment.clone(), 1)))
}

/// Engagement sums per calendar date, chronologically ascending.
pub fn engagement_trend(data: &[CleanRecord]) -> Vec<AggregateRow> {
    let mut by_date: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for r in data {
        *by_date.entry(r.date).or_insert(0) += r.engagements;
    }
    by_date
        .into_iter()
        .map(|(date, sum)| AggregateRow::new(date.format("%Y-%m-%d").to_string(), sum))
        .collect()
}

/// Engagement sums per platform, descending.
pub fn platform_engagements(data: &[CleanRecord]) -> Vec<AggregateRow> {
    sort_desc(accumulate(data, |r| (r.platform.clone(), r.engagements)))
}

/// Post counts per media type, descending.
pub fn media_type_mix(data: &[CleanRecord]) -> Vec<AggregateRow> {
    sort_desc(accumulate(data, |r| (r.media_type.clone(), 1)))
}

/// Engagement sums per location, descending, truncated to the top 5.
pub fn top_locations(data: &[CleanRecord]) -> Vec<AggregateRow> {
    let mut rows = sort_desc(accumulate(data, |r| (r.location.clone(), r.engagements)));
    rows.truncate(5);
    rows
}

/// Assemble the complete rendering-layer payload: every aggregate table
/// paired with its insight sentences, plus the cleaning report.
pub fn build_dashboard(data: &[CleanRecord], cleaning: CleaningReport) -> DashboardData {
    let sentiment = sentiment_breakdown(data);
    let trend = engagement_trend(data);
    let platforms = platform_engagements(data);
    let media = media_type_mix(data);
    let locations = top_locations(data);
    DashboardData {
        cleaning,
        sentiment_breakdown: ChartData {
            insights: insights::sentiment_insights(&sentiment),
            rows: sentiment,
        },
        engagement_trend: ChartData {
            insights: insights::trend_insights(&trend),
            rows: trend,
        },
        platform_engagements: ChartData {
            insights: insights::platform_insights(&platforms),
            rows: platforms,
        },
        media_type_mix: ChartData {
            insights: insights::media_type_insights(&media),
            rows: media,
        },
        top_locations: ChartData {
            insights: insights::location_insights(&locations),
            rows: locations,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(date: &str, platform: &str, sentiment: &str, location: &str, engagements: u64, media: &str) -> CleanRecord {
        CleanRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            platform: platform.to_string(),
            sentiment: sentiment.to_string(),
            location: location.to_string(),
            engagements,
            media_type: media.to_string(),
        }
    }

    fn sample() -> Vec<CleanRecord> {
        vec![
            rec("2024-01-02", "X", "Positive", "Jakarta", 100, "Video"),
            rec("2024-01-01", "Y", "Positive", "Bandung", 40, "Image"),
            rec("2024-01-02", "X", "Negative", "Jakarta", 60, "Video"),
            rec("2024-01-03", "Z", "Neutral", "Surabaya", 10, "Text"),
        ]
    }

    #[test]
    fn sentiment_counts_descending_with_stable_ties() {
        let rows = sentiment_breakdown(&sample());
        assert_eq!(rows[0], AggregateRow::new("Positive", 2));
        // Negative and Neutral tie at 1; Negative was seen first.
        assert_eq!(rows[1], AggregateRow::new("Negative", 1));
        assert_eq!(rows[2], AggregateRow::new("Neutral", 1));
    }

    #[test]
    fn sentiment_counts_total_cleaned_rows() {
        let data = sample();
        let total: u64 = sentiment_breakdown(&data).iter().map(|r| r.metric).sum();
        assert_eq!(total as usize, data.len());
    }

    #[test]
    fn trend_sums_by_date_ascending() {
        let rows = engagement_trend(&sample());
        assert_eq!(
            rows,
            vec![
                AggregateRow::new("2024-01-01", 40),
                AggregateRow::new("2024-01-02", 160),
                AggregateRow::new("2024-01-03", 10),
            ]
        );
    }

    #[test]
    fn platform_sums_descending() {
        let rows = platform_engagements(&sample());
        assert_eq!(
            rows,
            vec![
                AggregateRow::new("X", 160),
                AggregateRow::new("Y", 40),
                AggregateRow::new("Z", 10),
            ]
        );
    }

    #[test]
    fn sum_tables_total_engagements() {
        let data = sample();
        let engagements: u64 = data.iter().map(|r| r.engagements).sum();
        let by_platform: u64 = platform_engagements(&data).iter().map(|r| r.metric).sum();
        let by_date: u64 = engagement_trend(&data).iter().map(|r| r.metric).sum();
        assert_eq!(by_platform, engagements);
        assert_eq!(by_date, engagements);
    }

    #[test]
    fn media_mix_counts_descending() {
        let rows = media_type_mix(&sample());
        assert_eq!(rows[0], AggregateRow::new("Video", 2));
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn top_locations_truncates_to_five_descending() {
        let mut data = Vec::new();
        for (i, city) in ["A", "B", "C", "D", "E", "F", "G"].iter().enumerate() {
            data.push(rec("2024-01-01", "X", "Positive", city, (i as u64 + 1) * 10, "Video"));
        }
        let rows = top_locations(&data);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], AggregateRow::new("G", 70));
        assert!(rows.windows(2).all(|w| w[0].metric >= w[1].metric));
    }

    #[test]
    fn empty_input_degrades_to_empty_tables() {
        let data: Vec<CleanRecord> = Vec::new();
        assert!(sentiment_breakdown(&data).is_empty());
        assert!(engagement_trend(&data).is_empty());
        assert!(platform_engagements(&data).is_empty());
        assert!(media_type_mix(&data).is_empty());
        assert!(top_locations(&data).is_empty());
    }

    #[test]
    fn empty_input_builds_an_empty_dashboard() {
        let cleaning = CleaningReport {
            original_row_count: 0,
            cleaned_row_count: 0,
            missing_or_invalid_engagements_count: 0,
            invalid_date_count: 0,
        };
        let dashboard = build_dashboard(&[], cleaning);
        assert!(dashboard.sentiment_breakdown.rows.is_empty());
        assert!(dashboard.sentiment_breakdown.insights.is_empty());
        assert!(dashboard.engagement_trend.insights.is_empty());
        assert!(dashboard.platform_engagements.insights.is_empty());
        assert!(dashboard.media_type_mix.insights.is_empty());
        assert!(dashboard.top_locations.insights.is_empty());
    }

    #[test]
    fn dashboard_pairs_tables_with_their_insights() {
        let cleaning = CleaningReport {
            original_row_count: 4,
            cleaned_row_count: 4,
            missing_or_invalid_engagements_count: 0,
            invalid_date_count: 0,
        };
        let dashboard = build_dashboard(&sample(), cleaning);
        assert_eq!(dashboard.sentiment_breakdown.rows.len(), 3);
        assert!(!dashboard.sentiment_breakdown.insights.is_empty());
        assert!(dashboard.top_locations.rows.len() <= 5);
    }
}
