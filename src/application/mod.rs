// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Coordinates the other layers to answer questions about one
// document.
//
// Rules for this layer:
//   - No model code or tensor math here (Layer 5)
//   - No printing here (Layer 1)
//   - No file parsing here (Layer 4 and 6)
//   - Only workflow coordination and the answer policy
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Session settings and their validation
pub mod config;

// Chunk → score → threshold policy for one content source
pub mod aggregator;

// Table → image → text priority across sources
pub mod orchestrator;

// The question-answering session
pub mod ask_use_case;
