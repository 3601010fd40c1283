use std::fs;
use std::time::Duration;
use tracing::info;

use crate::error::Result;

/// Resolve the CLI input to PDF bytes: HTTP(S) inputs are downloaded,
/// anything else is read as a local path.
pub fn load_input(input: &str) -> Result<Vec<u8>> {
    if input.starts_with("http://") || input.starts_with("https://") {
        download(input)
    } else {
        info!(path = %input, "reading local file");
        Ok(fs::read(input)?)
    }
}

fn download(url: &str) -> Result<Vec<u8>> {
    info!(url = %url, "downloading PDF");
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(60))
        .build()?;
    let response = client.get(url).send()?.error_for_status()?;
    let bytes = response.bytes()?;
    info!(bytes = bytes.len(), "download complete");
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_local_file_is_io_error() {
        let result = load_input("/no/such/file.pdf");
        assert!(matches!(result, Err(crate::error::ReportError::Io(_))));
    }
}
