use std::io::{Cursor, Read};

use once_cell::sync::Lazy;
use regex::Regex;
use zip::ZipArchive;

use crate::errors::{AppError, AppResult};

pub const MIME_TEXT: &str = "text/plain";
pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

static XML_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("XML_TAG_RE is a valid pattern"));

/// Whitelist check used before any bytes are touched.
pub fn is_supported_mime(mime: &str) -> bool {
    matches!(mime, MIME_TEXT | MIME_PDF | MIME_DOCX)
}

/// Turn an uploaded file into plain study text.
///
/// Extraction that yields only whitespace is an error; a quiz cannot be
/// generated from an empty document.
pub fn extract_text(bytes: &[u8], mime: &str) -> AppResult<String> {
    let text = match mime {
        MIME_TEXT => String::from_utf8_lossy(bytes).into_owned(),
        MIME_PDF => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|err| AppError::ExtractionError(format!("could not read the PDF: {}", err)))?,
        MIME_DOCX => extract_docx_text(bytes)?,
        other => return Err(AppError::UnsupportedFileType(other.to_string())),
    };

    if text.trim().is_empty() {
        return Err(AppError::ExtractionError(
            "No text could be extracted from the file. It may be empty, scanned, or corrupted."
                .to_string(),
        ));
    }

    Ok(text)
}

/// A .docx file is a zip; the document body lives in `word/document.xml`.
/// Paragraph ends and line breaks become newlines, remaining markup is
/// stripped, then the five predefined XML entities are decoded.
fn extract_docx_text(bytes: &[u8]) -> AppResult<String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|err| AppError::ExtractionError(format!("not a valid Word document: {}", err)))?;

    let mut xml = String::new();
    let mut document = archive
        .by_name("word/document.xml")
        .map_err(|err| AppError::ExtractionError(format!("not a valid Word document: {}", err)))?;
    document.read_to_string(&mut xml).map_err(|err| {
        AppError::ExtractionError(format!("could not read the Word document: {}", err))
    })?;

    let with_breaks = xml.replace("</w:p>", "\n").replace("<w:br/>", "\n");
    let stripped = XML_TAG_RE.replace_all(&with_breaks, "");
    Ok(unescape_xml_entities(&stripped))
}

/// `&amp;` goes last so it cannot re-introduce other entities.
fn unescape_xml_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
