use serde::Serialize;
use std::io::Write;

use crate::config::DateFormat;
use crate::dates;
use crate::error::Result;
use crate::extract::WeeklyReport;

/// One output row: a day's figures joined with the shared header fields.
/// Field order here is the CSV column order.
#[derive(Debug, Clone, Serialize)]
pub struct OutputRecord {
    #[serde(rename = "Day")]
    pub day: &'static str,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Route No")]
    pub route_no: String,
    #[serde(rename = "Total Stops")]
    pub stops: u32,
    #[serde(rename = "Total Parcels")]
    pub parcels: u32,
    #[serde(rename = "Payment")]
    pub payment: String,
    #[serde(rename = "Invoice No")]
    pub invoice_no: String,
    #[serde(rename = "Internal Reference")]
    pub internal_reference: String,
    #[serde(rename = "Contract Number")]
    pub contract_number: String,
    #[serde(rename = "Cost Centre Code")]
    pub cost_centre_code: String,
}

/// Zip the six day entries with their projected dates and the shared
/// metadata. Output is always Monday through Saturday, absent optional
/// metadata renders as empty fields, payment always carries two decimals.
pub fn assemble(report: &WeeklyReport, date_format: DateFormat) -> Vec<OutputRecord> {
    let dates = dates::project_week(report.metadata.week_ending);
    let meta = &report.metadata;

    report
        .days
        .iter()
        .zip(dates)
        .map(|(day, date)| OutputRecord {
            day: day.day.name(),
            date: dates::render(date, date_format),
            route_no: meta.route_no.clone(),
            stops: day.stops,
            parcels: day.parcels,
            payment: format!("{:.2}", day.payment),
            invoice_no: meta.invoice_no.clone(),
            internal_reference: meta.internal_reference.clone().unwrap_or_default(),
            contract_number: meta.contract_number.clone().unwrap_or_default(),
            cost_centre_code: meta.cost_centre_code.clone().unwrap_or_default(),
        })
        .collect()
}

/// Serialize records as CSV with a header row.
pub fn write_csv<W: Write>(records: &[OutputRecord], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
