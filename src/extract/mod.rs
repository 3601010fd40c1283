// src/extract/mod.rs

mod blocks;
mod metadata;
mod metrics;
pub mod normalize;

pub use blocks::DEFAULT_DAY_BLOCK_CAP;

use serde::Serialize;
use time::Date;
use tracing::{info, warn};

use crate::config::ExtractionConfig;
use crate::error::{ReportError, Result};

/// The six operating days of a reporting week. No Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Canonical output order.
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }

    /// Whole days between this weekday and the Saturday closing the week.
    pub fn offset_from_saturday(self) -> i64 {
        match self {
            Weekday::Monday => 5,
            Weekday::Tuesday => 4,
            Weekday::Wednesday => 3,
            Weekday::Thursday => 2,
            Weekday::Friday => 1,
            Weekday::Saturday => 0,
        }
    }
}

/// Single-valued header fields of the report. Shared read-only across
/// all six output rows of a document.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub route_no: String,
    pub invoice_no: String,
    pub contract_number: Option<String>,
    pub internal_reference: Option<String>,
    pub cost_centre_code: Option<String>,
    /// The Saturday that closes the reporting week.
    pub week_ending: Date,
}

/// One day's figures. Days the document never mentions carry zeros.
#[derive(Debug, Clone, Serialize)]
pub struct DayMetrics {
    pub day: Weekday,
    pub stops: u32,
    pub parcels: u32,
    pub payment: f64,
    /// Whether any figure was actually located in the document.
    #[serde(skip)]
    pub located: bool,
}

impl DayMetrics {
    /// Zeroed figures for a day whose block is absent or yields nothing.
    pub fn missing(day: Weekday) -> Self {
        DayMetrics {
            day,
            stops: 0,
            parcels: 0,
            payment: 0.0,
            located: false,
        }
    }
}

/// A fully extracted document: header metadata plus exactly six day
/// entries in Monday..Saturday order.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyReport {
    pub metadata: ReportMetadata,
    pub days: Vec<DayMetrics>,
}

impl WeeklyReport {
    /// (days with at least one located figure, days total). Zero located
    /// days means the document format did not match expectations.
    pub fn coverage(&self) -> (usize, usize) {
        let located = self.days.iter().filter(|d| d.located).count();
        (located, self.days.len())
    }
}

/// Run the full extraction over already-decoded page text.
///
/// Missing day figures degrade to zeros; missing mandatory header fields
/// (Route No, Invoice No, week-ending date) fail the whole document with
/// every absent field listed in one error.
pub fn extract_report(text: &str, opts: &ExtractionConfig) -> Result<WeeklyReport> {
    let flat = normalize::flatten(text);
    let lines = normalize::keep_lines(text);

    let raw = metadata::extract_metadata(&lines, &flat);

    let mut missing = Vec::new();
    if raw.route_no.is_none() {
        missing.push("Route No".to_string());
    }
    if raw.invoice_no.is_none() {
        missing.push("Invoice No".to_string());
    }
    if raw.week_ending.is_none() {
        missing.push("Week ending Saturday".to_string());
    }
    let (Some(route_no), Some(invoice_no), Some(week_ending)) =
        (raw.route_no, raw.invoice_no, raw.week_ending)
    else {
        return Err(ReportError::MissingFields(missing));
    };

    let metadata = ReportMetadata {
        route_no,
        invoice_no,
        contract_number: raw.contract_number,
        internal_reference: raw.internal_reference,
        cost_centre_code: raw.cost_centre_code,
        week_ending,
    };

    let days: Vec<DayMetrics> = Weekday::ALL
        .iter()
        .map(|&day| {
            let block = blocks::day_block(&flat, day, opts.day_block_cap);
            metrics::extract_day(day, block, opts.tie_break)
        })
        .collect();

    let report = WeeklyReport { metadata, days };
    let (located, total) = report.coverage();
    info!(
        located,
        total,
        route_no = %report.metadata.route_no,
        invoice_no = %report.metadata.invoice_no,
        has_contract = report.metadata.contract_number.is_some(),
        has_internal_ref = report.metadata.internal_reference.is_some(),
        has_cost_centre = report.metadata.cost_centre_code.is_some(),
        "extraction complete"
    );
    if located == 0 {
        warn!("no parseable day blocks found, every day defaults to zero");
    }

    Ok(report)
}

/// Multi-page form of [`extract_report`]: pages are joined with a line
/// break before extraction.
pub fn extract_report_pages(pages: &[String], opts: &ExtractionConfig) -> Result<WeeklyReport> {
    extract_report(&pages.join("\n"), opts)
}
