use regex::{Captures, Regex};
use tracing::debug;

use crate::config::TieBreak;
use crate::extract::{DayMetrics, Weekday};

/// Extract one day's figures from its block. A quantity that cannot be
/// located or parsed defaults to zero; only `located` records whether
/// anything matched at all.
pub fn extract_day(day: Weekday, block: &str, tie_break: TieBreak) -> DayMetrics {
    if block.is_empty() {
        return DayMetrics::missing(day);
    }

    // Single pass over the whole stops/parcels/payment triplet first.
    let combined = Regex::new(
        r"(?is)(?:total\s+)?stops\s*:?\s*(\d+).*?(?:total\s+)?parcels\s*:?\s*(\d+).*?payment\s*:?\s*(?:[£$€]\s*)?([\d,]+(?:\.\d{1,2})?)",
    )
    .unwrap();
    if let Some(cap) = pick(&combined, block, tie_break) {
        return DayMetrics {
            day,
            stops: cap[1].parse().unwrap_or(0),
            parcels: cap[2].parse().unwrap_or(0),
            payment: parse_payment(&cap[3]),
            located: true,
        };
    }

    // The combined pass failed; try each quantity on its own and keep
    // whatever sticks.
    let stops = pick_count(block, r"(?i)stops\s*:?\s*(\d+)", tie_break);
    let parcels = pick_count(block, r"(?i)parcels\s*:?\s*(\d+)", tie_break);
    let payment = pick_payment(block, tie_break);

    let located = stops.is_some() || parcels.is_some() || payment.is_some();
    if !located {
        debug!(day = day.name(), "no figures found in day block");
    }
    DayMetrics {
        day,
        stops: stops.unwrap_or(0),
        parcels: parcels.unwrap_or(0),
        payment: payment.unwrap_or(0.0),
        located,
    }
}

/// Apply the configured tie-break uniformly: first or last match wins.
fn pick<'t>(re: &Regex, text: &'t str, tie_break: TieBreak) -> Option<Captures<'t>> {
    match tie_break {
        TieBreak::First => re.captures(text),
        TieBreak::Last => re.captures_iter(text).last(),
    }
}

fn pick_count(text: &str, pattern: &str, tie_break: TieBreak) -> Option<u32> {
    let re = Regex::new(pattern).unwrap();
    pick(&re, text, tie_break).and_then(|cap| cap[1].parse().ok())
}

fn pick_payment(text: &str, tie_break: TieBreak) -> Option<f64> {
    let re = Regex::new(r"(?i)payment\s*:?\s*(?:[£$€]\s*)?([\d,]+(?:\.\d{1,2})?)").unwrap();
    pick(&re, text, tie_break).map(|cap| parse_payment(&cap[1]))
}

/// Strip thousands separators and parse; an unparseable amount is 0.00,
/// never an error.
fn parse_payment(raw: &str) -> f64 {
    raw.replace(',', "").parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(block: &str) -> DayMetrics {
        extract_day(Weekday::Monday, block, TieBreak::First)
    }

    #[test]
    fn test_combined_triplet() {
        let m = first("Monday Total Stops: 107 Total Parcels: 226 Payment:281.93");
        assert_eq!((m.stops, m.parcels), (107, 226));
        assert_eq!(m.payment, 281.93);
        assert!(m.located);
    }

    #[test]
    fn test_combined_triplet_spans_lines() {
        let m = first("Monday\nTotal Stops: 12\nTotal Parcels: 30\nPayment: 45.50");
        assert_eq!((m.stops, m.parcels), (12, 30));
        assert_eq!(m.payment, 45.5);
    }

    #[test]
    fn test_labels_without_total_prefix() {
        let m = first("Monday Stops 9 Parcels 14 Payment 20.00");
        assert_eq!((m.stops, m.parcels), (9, 14));
        assert_eq!(m.payment, 20.0);
    }

    #[test]
    fn test_currency_symbol_and_thousands_separator() {
        let m = first("Monday Total Stops: 80 Total Parcels: 150 Payment: £1,234.56");
        assert_eq!(m.payment, 1234.56);
    }

    #[test]
    fn test_fallback_fills_partial_block() {
        // No parcels figure anywhere; the independent passes fill the rest.
        let m = first("Monday Total Stops: 10 Payment: 99.99");
        assert_eq!((m.stops, m.parcels), (10, 0));
        assert_eq!(m.payment, 99.99);
        assert!(m.located);
    }

    #[test]
    fn test_unparseable_payment_defaults_to_zero() {
        let m = first("Monday Total Stops: 10 Total Parcels: 20 Payment: pending");
        assert_eq!((m.stops, m.parcels), (10, 20));
        assert_eq!(m.payment, 0.0);
    }

    #[test]
    fn test_empty_block_is_zeroed_and_unlocated() {
        let m = first("");
        assert_eq!((m.stops, m.parcels), (0, 0));
        assert_eq!(m.payment, 0.0);
        assert!(!m.located);
    }

    #[test]
    fn test_block_with_no_figures_is_unlocated() {
        let m = first("Monday bank holiday, depot closed");
        assert!(!m.located);
        assert_eq!(m.payment, 0.0);
    }

    // A day panel that prints a sub-total row before the day grand total.
    const DOUBLE_TOTALS: &str = "Monday Total Stops: 50 Total Parcels: 100 Payment: 120.00 \
                                 Total Stops: 107 Total Parcels: 226 Payment: 281.93";

    #[test]
    fn test_tie_break_first_takes_first_match() {
        let m = extract_day(Weekday::Monday, DOUBLE_TOTALS, TieBreak::First);
        assert_eq!((m.stops, m.parcels), (50, 100));
        assert_eq!(m.payment, 120.0);
    }

    #[test]
    fn test_tie_break_last_takes_last_match() {
        let m = extract_day(Weekday::Monday, DOUBLE_TOTALS, TieBreak::Last);
        assert_eq!((m.stops, m.parcels), (107, 226));
        assert_eq!(m.payment, 281.93);
    }
}
