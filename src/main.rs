mod config;
mod dates;
mod error;
mod extract;
mod fetch;
mod pdf_text;
mod records;

use std::fs;
use std::fs::File;
use std::io;

use config::Config;
use tracing::{info, warn};

const USAGE: &str = "usage: route_summary <file.pdf | url> [-o out.csv] [-c config.toml] [--json]";

struct Args {
    input: String,
    out_path: Option<String>,
    config_path: Option<String>,
    json: bool,
}

fn main() {
    // init tracing
    tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_env_filter("info")
        .init();

    if let Err(e) = run() {
        tracing::error!(error = %e, "processing failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args()?;
    let cfg = match &args.config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let pdf_bytes = fetch::load_input(&args.input)?;
    let text = pdf_text::page_text(&pdf_bytes)?;
    let report = extract::extract_report(&text, &cfg.extraction)?;

    let (located, total) = report.coverage();
    info!(
        located,
        total,
        route_no = %report.metadata.route_no,
        invoice_no = %report.metadata.invoice_no,
        week_ending = %dates::render(report.metadata.week_ending, config::DateFormat::Iso),
        "report extracted"
    );
    if located == 0 {
        warn!("document format did not match expectations, all rows are zeros");
    }

    let records = records::assemble(&report, cfg.output.date_format);

    if args.json {
        let json = serde_json::to_string_pretty(&records)?;
        match &args.out_path {
            Some(path) => fs::write(path, json)?,
            None => println!("{json}"),
        }
    } else {
        match &args.out_path {
            Some(path) => {
                records::write_csv(&records, File::create(path)?)?;
                info!(rows = records.len(), path = %path, "CSV written");
            }
            None => records::write_csv(&records, io::stdout().lock())?,
        }
    }

    Ok(())
}

fn parse_args() -> Result<Args, Box<dyn std::error::Error>> {
    let mut input = None;
    let mut out_path = None;
    let mut config_path = None;
    let mut json = false;

    let mut argv = std::env::args().skip(1);
    while let Some(arg) = argv.next() {
        if arg == "-o" || arg == "--out" {
            out_path = Some(argv.next().ok_or("missing value for -o/--out")?);
        } else if arg == "-c" || arg == "--config" {
            config_path = Some(argv.next().ok_or("missing value for -c/--config")?);
        } else if arg == "--json" {
            json = true;
        } else if arg == "-h" || arg == "--help" {
            println!("{USAGE}");
            std::process::exit(0);
        } else if input.is_none() {
            input = Some(arg);
        } else {
            return Err(format!("unexpected argument: {arg}\n{USAGE}").into());
        }
    }

    Ok(Args {
        input: input.ok_or(USAGE)?,
        out_path,
        config_path,
        json,
    })
}
