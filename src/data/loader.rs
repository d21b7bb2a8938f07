// ============================================================
// Layer 4 — Document Loader
// ============================================================
// Opens one document and turns it into DocumentContent.
//
// Format is chosen by file extension:
//   .pdf   → PdfDocument   (lopdf)
//   .docx  → DocxDocument  (docx-rs)
//   other  → PlainTextDocument (UTF-8 text file)
//
// Failure policy:
//   - The file cannot be opened or parsed → error, the whole
//     session stops before any question is asked
//   - One content source fails to extract → warn and use an
//     empty string, the other sources are still queried
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §17 (Trait Objects)

use anyhow::{bail, Context, Result};
use std::{fs, path::Path};

use crate::data::{
    docx_extractor::DocxDocument,
    normalizer::TextNormalizer,
    pdf_extractor::PdfDocument,
    tables::flatten_layout_tables,
};
use crate::domain::document::{ContentType, DocumentContent};
use crate::domain::traits::{DocumentExtractor, LoadedDocument};

/// Picks the right extractor for a file and opens it.
pub struct DocumentLoader {
    /// Ask format adapters to OCR embedded images
    enable_ocr: bool,
}

impl DocumentLoader {
    pub fn new(enable_ocr: bool) -> Self {
        Self { enable_ocr }
    }

    /// Open `path`, pull all three content sources, close the
    /// handle, and normalise the running text.
    pub fn load_content(&self, path: &Path, normalizer: &TextNormalizer) -> Result<DocumentContent> {
        let handle = self.load(path)?;

        let raw_text = extract_or_empty(ContentType::Text, || handle.extract_text());
        let table    = extract_or_empty(ContentType::Table, || handle.extract_tables());
        let image    = extract_or_empty(ContentType::Image, || handle.extract_images());
        handle.close();

        let text = normalizer.clean(&raw_text);
        tracing::info!(
            "Loaded '{}': text={} chars, table={} chars, image={} chars",
            path.display(),
            text.len(),
            table.len(),
            image.len()
        );

        Ok(DocumentContent::new(text, table, image))
    }
}

impl DocumentExtractor for DocumentLoader {
    fn load(&self, path: &Path) -> Result<Box<dyn LoadedDocument>> {
        if !path.is_file() {
            bail!("Document '{}' does not exist or is not a file", path.display());
        }

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        tracing::debug!("Opening '{}' (type: {})", path.display(), extension);

        let handle: Box<dyn LoadedDocument> = match extension.as_str() {
            "pdf"  => Box::new(PdfDocument::open(path, self.enable_ocr)?),
            "docx" => Box::new(DocxDocument::open(path, self.enable_ocr)?),
            _      => Box::new(PlainTextDocument::open(path)?),
        };
        Ok(handle)
    }
}

/// Run one extraction, degrading a failure to empty content
fn extract_or_empty(content_type: ContentType, extract: impl FnOnce() -> Result<String>) -> String {
    match extract() {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Extracting {} content failed, using empty content: {:#}", content_type, e);
            String::new()
        }
    }
}

/// Warn once per document when OCR was requested; no OCR engine is bundled.
pub(crate) fn ocr_unavailable(path: &Path, enable_ocr: bool) -> String {
    if enable_ocr {
        tracing::warn!(
            "OCR requested for '{}' but no OCR backend is available; image content is empty",
            path.display()
        );
    }
    String::new()
}

// ─── Plain text ───────────────────────────────────────────────────────────────

/// A UTF-8 text file. Tables are found by line layout.
pub struct PlainTextDocument {
    text: String,
}

impl PlainTextDocument {
    pub fn open(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Cannot read '{}' as UTF-8 text", path.display()))?;
        Ok(Self { text })
    }
}

impl LoadedDocument for PlainTextDocument {
    fn extract_text(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn extract_tables(&self) -> Result<String> {
        Ok(flatten_layout_tables(&self.text))
    }

    fn extract_images(&self) -> Result<String> {
        Ok(String::new())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::io::Write;

    #[test]
    fn test_missing_file_is_fatal() {
        let loader = DocumentLoader::new(false);
        let err = loader
            .load_content(Path::new("/definitely/not/here.pdf"), &TextNormalizer::new())
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_plain_text_document_yields_text_and_tables() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(
            file,
            "Quarterly summary (draft)\n\n| Metric | 2022 |\n| Revenue | 120 |\n\nThe page ends here."
        )
        .unwrap();

        let content = DocumentLoader::new(false)
            .load_content(file.path(), &TextNormalizer::new())
            .unwrap();

        assert_eq!(content.table(), "Metric: Revenue, 2022: 120\n");
        assert_eq!(content.image(), "");
        // text is normalised: brackets and boilerplate words gone
        assert!(content.text().starts_with("Quarterly summary | Metric"));
        assert!(!content.text().contains("page"));
    }

    #[test]
    fn test_failed_extraction_degrades_to_empty() {
        let out = extract_or_empty(ContentType::Table, || Err(anyhow!("broken table")));
        assert_eq!(out, "");
    }

    #[test]
    fn test_corrupt_pdf_is_fatal() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        write!(file, "this is not a pdf").unwrap();
        assert!(DocumentLoader::new(false).load(file.path()).is_err());
    }
}
