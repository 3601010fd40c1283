use regex::Regex;
use time::{Date, Month};
use tracing::debug;

/// Header fields before mandatory-field validation. `None` means the
/// label was not found under either normalization mode.
#[derive(Debug, Default)]
pub struct RawMetadata {
    pub route_no: Option<String>,
    pub invoice_no: Option<String>,
    pub contract_number: Option<String>,
    pub internal_reference: Option<String>,
    pub cost_centre_code: Option<String>,
    pub week_ending: Option<Date>,
}

/// Tokens that start another known label (or a day panel). A flattened
/// capture that lands on one of these means the field had no value and
/// the match ran into the next label.
const SENTINEL_TOKENS: &[&str] = &[
    "route", "invoice", "contract", "internal", "cost", "week", "total", "stops", "parcels",
    "payment", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday",
];

/// Pull all header fields. `lines` is the line-preserving normalization,
/// `flat` the fully collapsed one. Labels are tried line-anchored first
/// (the value must sit on the label's line), then against the flattened
/// text, which recovers a value pushed onto the following line.
pub fn extract_metadata(lines: &str, flat: &str) -> RawMetadata {
    RawMetadata {
        route_no: grab_field(lines, flat, r"Route\s*No"),
        invoice_no: grab_field(lines, flat, r"Invoice\s*No"),
        contract_number: grab_field(lines, flat, r"Contract\s*Number"),
        internal_reference: grab_field(lines, flat, r"Internal\s*Reference"),
        cost_centre_code: grab_field(lines, flat, r"Cost\s*Centre\s*Code").and_then(digits_only),
        week_ending: extract_week_ending(flat),
    }
}

/// Capture the first token-like run after a label, case-insensitively,
/// tolerating trailing '.', '*' and ':' on the label. Only `[\w/-]`
/// characters are taken, never the remainder of the line. A capture that
/// is itself a sentinel token means the field was empty and the match ran
/// into the next label; such captures are discarded.
fn grab_field(lines: &str, flat: &str, label: &str) -> Option<String> {
    // Line-anchored: the separator cannot cross a line break, so an empty
    // field does not swallow whatever the next line starts with.
    let line_re = Regex::new(&format!(r"(?i){label}\b[ .:*]*([\w/-]+)")).unwrap();
    if let Some(value) = accept(&line_re, lines, label) {
        return Some(value);
    }

    // Flattened fallback for a label whose value landed on the next line.
    let flat_re = Regex::new(&format!(r"(?i){label}\b[\s.:*]*([\w/-]+)")).unwrap();
    accept(&flat_re, flat, label)
}

fn accept(re: &Regex, text: &str, label: &str) -> Option<String> {
    let value = re.captures(text).map(|cap| cap[1].to_string())?;
    if SENTINEL_TOKENS.contains(&value.to_lowercase().as_str()) {
        debug!(label, value = %value, "capture hit a sentinel token, treating field as absent");
        return None;
    }
    Some(value)
}

/// Cost-centre values keep only their digits; a site-code letter prefix
/// is accounting noise. Letters-only values count as absent.
fn digits_only(value: String) -> Option<String> {
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then_some(digits)
}

/// The week-ending Saturday date. Tried in order: the strict labelled
/// pattern, the contiguous digit-run form that kerning collapse produces
/// from a space-separated date, then any d/m/y triplet within ~120
/// characters of the word "Week". A triplet that is not a real calendar
/// date falls through to the next strategy; no date is ever invented.
fn extract_week_ending(flat: &str) -> Option<Date> {
    let strict = Regex::new(
        r"(?i)week\s*end(?:ing)?\s*(?:saturday)?[\s.:/-]*(\d{1,2})[./-](\d{1,2})[./-](\d{4}|\d{2})",
    )
    .unwrap();
    if let Some(cap) = strict.captures(flat) {
        if let Some(date) = build_date(&cap[1], &cap[2], &cap[3]) {
            return Some(date);
        }
    }

    // "14 09 25" arrives here as "140925" after digit-gap closing.
    let glued = Regex::new(
        r"(?i)week\s*end(?:ing)?\s*(?:saturday)?[\s.:/-]*(\d{2})(\d{2})(\d{4}|\d{2})\b",
    )
    .unwrap();
    if let Some(cap) = glued.captures(flat) {
        if let Some(date) = build_date(&cap[1], &cap[2], &cap[3]) {
            return Some(date);
        }
    }

    let week = Regex::new(r"(?i)\bweek\b").unwrap();
    let triplet = Regex::new(r"(\d{1,2})[./-](\d{1,2})[./-](\d{4}|\d{2})").unwrap();
    for m in week.find_iter(flat) {
        let mut end = (m.start() + 120).min(flat.len());
        while !flat.is_char_boundary(end) {
            end -= 1;
        }
        for cap in triplet.captures_iter(&flat[m.start()..end]) {
            if let Some(date) = build_date(&cap[1], &cap[2], &cap[3]) {
                debug!(date = %date, "week-ending date found via loose fallback");
                return Some(date);
            }
        }
    }
    None
}

/// Two-digit years are 2000-based ("25" means 2025).
fn build_date(day: &str, month: &str, year: &str) -> Option<Date> {
    let day: u8 = day.parse().ok()?;
    let month: u8 = month.parse().ok()?;
    let mut year: i32 = year.parse().ok()?;
    if year < 100 {
        year += 2000;
    }
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, day).ok()
}
