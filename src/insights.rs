// Narrative insight generation.
//
// Every generator is a pure function of one aggregate table and returns
// between zero and three sentences. Row-count guards keep ranks in bounds
// and divisors non-zero; an empty table always yields an empty list.
use crate::types::AggregateRow;
use crate::util::{average, format_int, format_number};

fn total(rows: &[AggregateRow]) -> u64 {
    rows.iter().map(|r| r.metric).sum()
}

fn share(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

/// Sentiment breakdown: up to three ranked shares of all mentions.
pub fn sentiment_insights(rows: &[AggregateRow]) -> Vec<String> {
    let mut out = Vec::new();
    let sum = total(rows);
    if let Some(first) = rows.first() {
        out.push(format!(
            "The dominant sentiment is {}, accounting for {:.1}% of all mentions.",
            first.key,
            share(first.metric, sum)
        ));
    }
    if let Some(second) = rows.get(1) {
        out.push(format!(
            "The second most common sentiment is {}, representing {:.1}%.",
            second.key,
            share(second.metric, sum)
        ));
    }
    if let Some(third) = rows.get(2) {
        out.push(format!(
            "The third most common sentiment is {}, representing {:.1}%.",
            third.key,
            share(third.metric, sum)
        ));
    }
    out
}

/// Engagement trend: peak date, mean per-date engagement, and a direction
/// classification comparing the last chronological value against the first
/// (upward above +10%, downward below -10%, stable in between).
pub fn trend_insights(rows: &[AggregateRow]) -> Vec<String> {
    let mut out = Vec::new();
    let Some(mut peak) = rows.first() else {
        return out;
    };
    for r in rows {
        if r.metric > peak.metric {
            peak = r;
        }
    }
    out.push(format!(
        "Peak engagement occurred on {}, with a total of {} engagements.",
        peak.key,
        format_int(peak.metric)
    ));

    let values: Vec<f64> = rows.iter().map(|r| r.metric as f64).collect();
    out.push(format!(
        "Average daily engagement over the period is approximately {}.",
        format_number(average(&values), 0)
    ));

    if rows.len() > 1 {
        let first = rows[0].metric as f64;
        let last = rows[rows.len() - 1].metric as f64;
        if last > first * 1.1 {
            out.push("There is an observable upward trend in engagements over the period.".to_string());
        } else if last < first * 0.9 {
            out.push("There is an observable downward trend in engagements over the period.".to_string());
        } else {
            out.push("Engagements remained relatively stable throughout the period.".to_string());
        }
    }
    out
}

/// Platform engagements: leader magnitude, lead over the runner-up as a
/// relative percentage (explicitly unbounded when the runner-up sums to
/// zero), and the combined share of the top three.
pub fn platform_insights(rows: &[AggregateRow]) -> Vec<String> {
    let mut out = Vec::new();
    let Some(first) = rows.first() else {
        return out;
    };
    out.push(format!(
        "{} is the most engaging platform, contributing {} total engagements.",
        first.key,
        format_int(first.metric)
    ));

    if let Some(second) = rows.get(1) {
        if second.metric == 0 {
            out.push(format!(
                "{} holds an unbounded lead over {}, which recorded no engagements at all.",
                first.key, second.key
            ));
        } else {
            let diff = (first.metric as f64 - second.metric as f64) / second.metric as f64 * 100.0;
            if diff > 0.0 {
                out.push(format!(
                    "{} generated {:.1}% more engagements than the second most engaging platform, {}.",
                    first.key, diff, second.key
                ));
            } else {
                out.push(format!(
                    "{} and {} generated a matching number of engagements.",
                    first.key, second.key
                ));
            }
        }
    }

    let sum = total(rows);
    if rows.len() > 2 && sum > 0 {
        let top3: u64 = rows.iter().take(3).map(|r| r.metric).sum();
        out.push(format!(
            "The top three platforms combined account for {:.1}% of all engagements.",
            share(top3, sum)
        ));
    }
    out
}

/// Media type mix: top two shares plus a concentration remark keyed on
/// whether the leading share stays below 50%.
pub fn media_type_insights(rows: &[AggregateRow]) -> Vec<String> {
    let mut out = Vec::new();
    let sum = total(rows);
    let Some(first) = rows.first() else {
        return out;
    };
    out.push(format!(
        "The most prevalent media type is {}, making up {:.1}% of the content.",
        first.key,
        share(first.metric, sum)
    ));
    if let Some(second) = rows.get(1) {
        out.push(format!(
            "{} is the second most used media type, comprising {:.1}%.",
            second.key,
            share(second.metric, sum)
        ));
    }
    if share(first.metric, sum) < 50.0 {
        out.push("The media mix is relatively diverse, with no single type overwhelmingly dominating.".to_string());
    } else {
        out.push("The media mix is concentrated, with a high share held by the leading type.".to_string());
    }
    out
}

/// Top locations: leader magnitude, combined share of the top two, and a
/// concentration remark over the shares within the table.
pub fn location_insights(rows: &[AggregateRow]) -> Vec<String> {
    let mut out = Vec::new();
    let sum = total(rows);
    let Some(first) = rows.first() else {
        return out;
    };
    out.push(format!(
        "{} is the highest-engagement location, with {} total engagements.",
        first.key,
        format_int(first.metric)
    ));
    if let Some(second) = rows.get(1) {
        if sum > 0 {
            let top2 = first.metric + second.metric;
            out.push(format!(
                "The top two locations, {} and {}, together contribute {:.1}% of the engagements shown.",
                first.key,
                second.key,
                share(top2, sum)
            ));
        }
    }
    if sum > 0 {
        if share(first.metric, sum) < 50.0 {
            out.push("Engagement is spread across the leading locations rather than concentrated in one.".to_string());
        } else {
            out.push("Engagement is heavily concentrated in the leading location.".to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(pairs: &[(&str, u64)]) -> Vec<AggregateRow> {
        pairs
            .iter()
            .map(|(k, m)| AggregateRow::new(*k, *m))
            .collect()
    }

    #[test]
    fn sentiment_dominant_share_to_one_decimal() {
        let out = sentiment_insights(&rows(&[("Positive", 2), ("Negative", 1)]));
        assert_eq!(out.len(), 2);
        assert!(out[0].contains("Positive"));
        assert!(out[0].contains("66.7%"));
        assert!(out[1].contains("33.3%"));
    }

    #[test]
    fn sentiment_caps_at_three_sentences() {
        let out = sentiment_insights(&rows(&[("A", 4), ("B", 3), ("C", 2), ("D", 1)]));
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn trend_peak_and_average() {
        let out = trend_insights(&rows(&[("2024-01-01", 100), ("2024-01-02", 1500), ("2024-01-03", 200)]));
        assert!(out[0].contains("2024-01-02"));
        assert!(out[0].contains("1,500"));
        assert!(out[1].contains("600"));
    }

    #[test]
    fn trend_peak_ties_pick_the_earliest_date() {
        let out = trend_insights(&rows(&[("2024-01-01", 500), ("2024-01-02", 500)]));
        assert!(out[0].contains("2024-01-01"));
    }

    #[test]
    fn trend_direction_band() {
        let up = trend_insights(&rows(&[("a", 100), ("b", 111)]));
        assert!(up[2].contains("upward"));
        let down = trend_insights(&rows(&[("a", 100), ("b", 89)]));
        assert!(down[2].contains("downward"));
        let stable = trend_insights(&rows(&[("a", 100), ("b", 105)]));
        assert!(stable[2].contains("stable"));
    }

    #[test]
    fn trend_single_row_omits_direction() {
        let out = trend_insights(&rows(&[("2024-01-01", 10)]));
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn platform_zero_runner_up_reports_unbounded_lead() {
        let out = platform_insights(&rows(&[("A", 100), ("B", 0)]));
        assert_eq!(out.len(), 2);
        assert!(out[1].contains("unbounded"));
        assert!(!out[1].contains("inf"));
    }

    #[test]
    fn platform_relative_difference() {
        let out = platform_insights(&rows(&[("A", 150), ("B", 100)]));
        assert!(out[1].contains("50.0% more"));
    }

    #[test]
    fn platform_tie_reports_a_match() {
        let out = platform_insights(&rows(&[("A", 100), ("B", 100)]));
        assert!(out[1].contains("matching"));
    }

    #[test]
    fn platform_top_three_combined_share() {
        let out = platform_insights(&rows(&[("A", 50), ("B", 30), ("C", 15), ("D", 5)]));
        assert_eq!(out.len(), 3);
        assert!(out[2].contains("95.0%"));
    }

    #[test]
    fn media_mix_concentration_remark() {
        let concentrated = media_type_insights(&rows(&[("Video", 6), ("Image", 4)]));
        assert!(concentrated[2].contains("concentrated"));
        let diverse = media_type_insights(&rows(&[("Video", 4), ("Image", 3), ("Text", 3)]));
        assert!(diverse[2].contains("diverse"));
    }

    #[test]
    fn media_mix_single_type_gets_two_sentences() {
        let out = media_type_insights(&rows(&[("Video", 5)]));
        assert_eq!(out.len(), 2);
        assert!(out[0].contains("100.0%"));
        assert!(out[1].contains("concentrated"));
    }

    #[test]
    fn location_top_two_combined_share() {
        let out = location_insights(&rows(&[("Jakarta", 60), ("Bandung", 30), ("Surabaya", 10)]));
        assert_eq!(out.len(), 3);
        assert!(out[1].contains("90.0%"));
        assert!(out[2].contains("concentrated"));
    }

    #[test]
    fn location_all_zero_sums_stay_in_bounds() {
        let out = location_insights(&rows(&[("A", 0), ("B", 0)]));
        assert_eq!(out.len(), 1);
        assert!(out[0].contains("0 total engagements"));
    }

    #[test]
    fn empty_tables_yield_no_insights() {
        let empty: Vec<AggregateRow> = Vec::new();
        assert!(sentiment_insights(&empty).is_empty());
        assert!(trend_insights(&empty).is_empty());
        assert!(platform_insights(&empty).is_empty());
        assert!(media_type_insights(&empty).is_empty());
        assert!(location_insights(&empty).is_empty());
    }
}
