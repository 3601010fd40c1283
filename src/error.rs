use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    /// Document-fatal: one or more mandatory header fields could not be
    /// located. The message lists every missing field, not just the first.
    #[error("missing mandatory fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("failed to parse PDF: {0}")]
    Pdf(String),

    #[error("PDF appears scanned or image-only, no extractable text")]
    Scanned,

    #[error("bad config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("download failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
