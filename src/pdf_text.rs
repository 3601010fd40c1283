// src/pdf_text.rs

use lopdf::{Dictionary, Document};
use tracing::{info, warn};

use crate::error::{ReportError, Result};

/// Minimum non-whitespace characters expected from a real text PDF.
/// Below this the document is treated as scanned.
const MIN_TEXT_CHARS: usize = 30;

/// Decode PDF bytes into page text. Scanned or image-only documents are
/// an error here: this tool has no OCR path.
pub fn page_text(pdf_bytes: &[u8]) -> Result<String> {
    let doc = Document::load_mem(pdf_bytes).map_err(|e| ReportError::Pdf(e.to_string()))?;

    if looks_like_scanned(&doc) {
        info!("structural check: likely scanned or image-only");
        return Err(ReportError::Scanned);
    }

    let text = pdf_extract::extract_text_from_mem(pdf_bytes).map_err(|e| {
        warn!(error = %e, "text extraction failed, treating as scanned");
        ReportError::Scanned
    })?;

    let meaningful = text.chars().filter(|c| !c.is_whitespace()).count();
    if meaningful < MIN_TEXT_CHARS {
        info!(chars = meaningful, "extracted text too short, treating as scanned");
        return Err(ReportError::Scanned);
    }

    info!(chars = meaningful, "text extracted");
    Ok(text)
}

/// A page whose resources carry XObject images but no fonts is almost
/// certainly a scan. If at least 80% of pages look like that, the whole
/// document does.
fn looks_like_scanned(doc: &Document) -> bool {
    let pages = doc.get_pages();
    if pages.is_empty() {
        return false;
    }

    let image_only = pages
        .values()
        .filter(|&&object_id| {
            let Ok(page) = doc.get_object(object_id).and_then(|obj| obj.as_dict()) else {
                return false;
            };
            let has_fonts = resource_dict(doc, page, b"Font").is_some_and(|d| !d.is_empty());
            let has_images = resource_dict(doc, page, b"XObject").is_some_and(|d| !d.is_empty());
            has_images && !has_fonts
        })
        .count();

    let ratio = image_only as f64 / pages.len() as f64;
    info!(
        total_pages = pages.len(),
        image_only,
        ratio = format!("{ratio:.2}"),
        "scanned-page analysis"
    );
    ratio >= 0.8
}

/// Look up an entry of a page's Resources dictionary, following
/// indirect references on both levels.
fn resource_dict<'a>(doc: &'a Document, page: &'a Dictionary, key: &[u8]) -> Option<&'a Dictionary> {
    let resources = page.get(b"Resources").ok()?;
    let (_, resources) = doc.dereference(resources).ok()?;
    let entry = resources.as_dict().ok()?.get(key).ok()?;
    let (_, entry) = doc.dereference(entry).ok()?;
    entry.as_dict().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_bytes_is_parse_error() {
        let result = page_text(b"this is not a pdf");
        assert!(matches!(result, Err(ReportError::Pdf(_))));
    }

    #[test]
    fn test_empty_bytes_is_parse_error() {
        assert!(matches!(page_text(b""), Err(ReportError::Pdf(_))));
    }
}
