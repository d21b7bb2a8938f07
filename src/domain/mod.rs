// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums, and traits describing what the
// system works with:
//
//   document.rs — the three extracted content sources of one
//                 loaded document (text, table, image/OCR)
//   answer.rs   — answer candidates and the final query result
//   traits.rs   — the seams other layers plug into
//                 (scorers, extractors, question answerers)
//
// Rules for this layer:
//   - NO Burn framework types
//   - NO file I/O
//   - NO extraction or model code
//
// Everything here is testable without a GPU or a document.

pub mod document;

pub mod answer;

pub mod traits;

#[cfg(test)]
pub mod test_support;
