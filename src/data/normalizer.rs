// ============================================================
// Layer 4 — Text Normalizer
// ============================================================
// Cleans the running text of a document before it is chunked
// and scored.
//
// Text pulled out of PDFs carries a lot of layout noise:
//   - line wraps and runs of spaces from column layout
//   - bullet glyphs and other non-ASCII artifacts
//   - section numbers like "3.2" and "(see page 4)" asides
//   - boilerplate words ("page", "section", "question", ...)
//
// Cleaning steps (applied in order):
//   1. Collapse every whitespace run into a single space
//   2. Replace non-ASCII runs with a space
//   3. Drop decimal numbers
//   4. Drop (parenthesised) and [bracketed] spans
//   5. Drop the boilerplate words, case-insensitively
//   6. Collapse the spaces left behind and trim
//
// The result is lossy. It is tuned for answerable prose, not
// for reproducing the document.
//
// Reference: regex crate documentation

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

static NON_ASCII: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\x00-\x7F]+").expect("valid regex"));

static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\.\d+").expect("valid regex"));

static BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\(\[].*?[\)\]]").expect("valid regex"));

static BOILERPLATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:page|pages|section|question|answer)\b").expect("valid regex")
});

pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Clean a raw extracted string. Never fails; empty in, empty out.
    pub fn clean(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let text = WHITESPACE.replace_all(text, " ");
        let text = NON_ASCII.replace_all(&text, " ");
        let text = DECIMAL.replace_all(&text, "");
        let text = BRACKETED.replace_all(&text, "");
        let text = BOILERPLATE.replace_all(&text, "");

        // Removals leave double spaces behind
        WHITESPACE.replace_all(&text, " ").trim().to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
