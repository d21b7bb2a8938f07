// ============================================================
// Layer 4 — PDF Extractor
// ============================================================
// Reads PDF files with lopdf.
//
//   text   → every page's text, pages separated by a blank
//            line, then whitespace collapsed and `|` removed
//   tables → line-layout tables found on each page, flattened
//   images → OCR is not bundled, always empty
//
// Pages that fail to extract are logged and skipped.

use anyhow::{anyhow, Result};
use lopdf::Document as LoPdfDocument;
use std::path::{Path, PathBuf};

use crate::data::loader::ocr_unavailable;
use crate::data::tables::flatten_layout_tables;
use crate::domain::traits::LoadedDocument;

pub struct PdfDocument {
    path:       PathBuf,
    doc:        LoPdfDocument,
    enable_ocr: bool,
}

impl PdfDocument {
    pub fn open(path: &Path, enable_ocr: bool) -> Result<Self> {
        let doc = LoPdfDocument::load(path)
            .map_err(|e| anyhow!("Error loading PDF '{}': {}", path.display(), e))?;
        tracing::debug!("Opened PDF '{}' with {} pages", path.display(), doc.get_pages().len());
        Ok(Self { path: path.to_path_buf(), doc, enable_ocr })
    }

    /// Raw text of every page that extracted cleanly, in page order
    fn page_texts(&self) -> Vec<String> {
        let mut pages = Vec::new();
        for page_num in self.doc.get_pages().keys() {
            match self.doc.extract_text(&[*page_num]) {
                Ok(text) => pages.push(text),
                Err(e) => tracing::warn!(
                    "Failed to extract text from page {} of '{}': {}",
                    page_num,
                    self.path.display(),
                    e
                ),
            }
        }
        pages
    }
}

impl LoadedDocument for PdfDocument {
    fn extract_text(&self) -> Result<String> {
        let mut content = String::new();
        for text in self.page_texts() {
            if !text.trim().is_empty() {
                content.push_str(&text);
                content.push_str("\n\n");
            }
        }

        let content = content
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .replace('|', " ");
        Ok(content.trim().to_string())
    }

    fn extract_tables(&self) -> Result<String> {
        let mut out = String::new();
        for (index, text) in self.page_texts().iter().enumerate() {
            let flattened = flatten_layout_tables(text);
            if !flattened.is_empty() {
                tracing::debug!("Found table content on page {}", index + 1);
                out.push_str(&flattened);
            }
        }
        Ok(out)
    }

    fn extract_images(&self) -> Result<String> {
        Ok(ocr_unavailable(&self.path, self.enable_ocr))
    }
}
