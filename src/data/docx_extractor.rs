// ============================================================
// Layer 4 — DOCX Extractor
// ============================================================
// Reads .docx files using the docx-rs crate.
//
// A .docx file is a ZIP archive of XML parts. docx-rs parses
// it into a typed tree:
//
//   Document
//     └── children: Vec<DocumentChild>
//           ├── Paragraph → Run → Text            (running text)
//           └── Table → TableRow → TableCell
//                 └── Paragraph → Run → Text      (cell text)
//
// Paragraphs become the text source, joined by blank lines so
// the Chunker can see paragraph boundaries. Tables become the
// table source, flattened row by row.
//
// Reference: docx-rs crate documentation

use anyhow::{anyhow, Context, Result};
use docx_rs::{
    read_docx, DocumentChild, Docx, Paragraph, ParagraphChild, RunChild, Table,
    TableCellContent, TableChild, TableRowChild,
};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::data::loader::ocr_unavailable;
use crate::data::tables::format_table;
use crate::domain::traits::LoadedDocument;

pub struct DocxDocument {
    path:       PathBuf,
    docx:       Docx,
    enable_ocr: bool,
}

impl DocxDocument {
    pub fn open(path: &Path, enable_ocr: bool) -> Result<Self> {
        // Read the raw bytes of the .docx file (which is a ZIP)
        let bytes = fs::read(path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;

        let docx = read_docx(&bytes).map_err(|e| {
            anyhow!("docx-rs parse error in '{}': {:?}", path.display(), e)
        })?;

        Ok(Self { path: path.to_path_buf(), docx, enable_ocr })
    }
}

impl LoadedDocument for DocxDocument {
    fn extract_text(&self) -> Result<String> {
        let mut paragraphs: Vec<String> = Vec::new();

        for child in &self.docx.document.children {
            if let DocumentChild::Paragraph(para) = child {
                let text = paragraph_text(para);
                // Section breaks and blank lines
                if !text.trim().is_empty() {
                    paragraphs.push(text);
                }
            }
        }

        Ok(paragraphs.join("\n\n"))
    }

    fn extract_tables(&self) -> Result<String> {
        let mut out = String::new();
        for child in &self.docx.document.children {
            if let DocumentChild::Table(table) = child {
                out.push_str(&format_table(&table_rows(table)));
            }
        }
        Ok(out)
    }

    fn extract_images(&self) -> Result<String> {
        Ok(ocr_unavailable(&self.path, self.enable_ocr))
    }
}

/// Concatenate the text runs of one paragraph.
/// Runs are fragments of the same sentence, so no separator.
fn paragraph_text(para: &Paragraph) -> String {
    let mut parts = Vec::new();

    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                if let RunChild::Text(t) = rc {
                    parts.push(t.text.clone());
                }
            }
        }
    }

    parts.join("")
}

/// Rows of cell strings; a cell's paragraphs are joined by spaces
#[allow(irrefutable_let_patterns)]
fn table_rows(table: &Table) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    for row_child in &table.rows {
        let TableChild::TableRow(row) = row_child else { continue };

        let mut cells = Vec::new();
        for cell_child in &row.cells {
            let TableRowChild::TableCell(cell) = cell_child else { continue };

            let text = cell
                .children
                .iter()
                .filter_map(|content| match content {
                    TableCellContent::Paragraph(p) => Some(paragraph_text(p)),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(" ");
            cells.push(text);
        }
        rows.push(cells);
    }

    rows
}
