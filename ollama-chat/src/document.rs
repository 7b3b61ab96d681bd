//! Plain-text extraction from resume and job-description files.
//!
//! Supported inputs are PDF, DOCX, DOC (when it is a zip-packaged Word
//! document) and UTF-8 text. Extracted text is always trimmed.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::{Error, Result};

const DOCX_BODY_PART: &str = "word/document.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Doc,
    Txt,
}

impl DocumentFormat {
    /// Detects the format from the file extension, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedFormat`] with the dotted extension (or an
    /// empty string when the path has none).
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        match extension.as_str() {
            ".pdf" => Ok(Self::Pdf),
            ".docx" => Ok(Self::Docx),
            ".doc" => Ok(Self::Doc),
            ".txt" => Ok(Self::Txt),
            _ => Err(Error::UnsupportedFormat(extension)),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
            Self::Doc => "DOC",
            Self::Txt => "TXT",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reads `path` and returns its text content.
///
/// The file's existence is checked before its extension, so a missing file
/// with an odd extension reports [`Error::FileNotFound`].
pub fn extract_text(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.to_path_buf()));
    }

    let format = DocumentFormat::from_path(path)?;
    let text = match format {
        DocumentFormat::Pdf => extract_pdf(path),
        DocumentFormat::Docx | DocumentFormat::Doc => extract_word(path),
        DocumentFormat::Txt => std::fs::read_to_string(path).map_err(|e| e.to_string()),
    }
    .map_err(|message| Error::Extraction {
        format: format.label().to_string(),
        message,
    })?;

    Ok(text.trim().to_string())
}

fn extract_pdf(path: &Path) -> std::result::Result<String, String> {
    // pdf-extract panics on some malformed files instead of returning an error.
    std::panic::catch_unwind(|| pdf_extract::extract_text(path))
        .map_err(|_| "the PDF could not be parsed".to_string())?
        .map_err(|e| e.to_string())
}

fn extract_word(path: &Path) -> std::result::Result<String, String> {
    let file = File::open(path).map_err(|e| e.to_string())?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .map_err(|e| format!("not a Word document package: {}", e))?;

    let mut xml = String::new();
    archive
        .by_name(DOCX_BODY_PART)
        .map_err(|e| format!("{}: {}", DOCX_BODY_PART, e))?
        .read_to_string(&mut xml)
        .map_err(|e| e.to_string())?;

    document_xml_to_text(&xml).map_err(|e| e.to_string())
}

/// Flattens a WordprocessingML body into text, one line per paragraph.
pub fn document_xml_to_text(xml: &str) -> std::result::Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Event::Text(e) if in_text_run => text.push_str(&e.unescape()?),
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(text)
}
