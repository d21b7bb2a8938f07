// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between a document file and the text windows a
// scorer reads:
//
//   document file (.pdf / .docx / .txt)
//       │
//       ▼
//   DocumentLoader    → opens the file, extracts text / tables / images
//       │
//       ▼
//   TextNormalizer    → cleans the running text
//       │
//       ▼
//   find_exact_match  → narrows a source to one matching line (per query)
//       │
//       ▼
//   Chunker           → packs paragraphs into overlapping windows
//
// Each module does exactly one step and is tested on its own.

/// Opens documents and builds DocumentContent
pub mod loader;

/// lopdf-backed PDF adapter
pub mod pdf_extractor;

/// docx-rs-backed DOCX adapter
pub mod docx_extractor;

/// Table flattening and line-layout table detection
pub mod tables;

/// Lossy cleanup of extracted running text
pub mod normalizer;

/// Line-level literal question match
pub mod exact_match;

/// Paragraph packing and window re-grouping
pub mod chunker;
