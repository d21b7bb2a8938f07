// ============================================================
// Layer 3 — Document Content
// ============================================================
// A loaded document is reduced to three independent strings,
// one per content source. They are produced once at load time
// and never mutated afterwards: the struct has no setters and
// only hands out shared borrows.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which extracted representation of the document a chunk,
/// candidate, or result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Tables flattened into `header: value` lines
    Table,
    /// Text recognised inside embedded images
    Image,
    /// Running text of the document
    Text,
}

impl ContentType {
    /// Lowercase tag used in printed and exported results
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Table => "table",
            ContentType::Image => "image",
            ContentType::Text  => "text",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The extracted content of a single loaded document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentContent {
    text:  String,
    table: String,
    image: String,
}

impl DocumentContent {
    pub fn new(
        text:  impl Into<String>,
        table: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            text:  text.into(),
            table: table.into(),
            image: image.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    /// Borrow the content for one source
    pub fn get(&self, content_type: ContentType) -> &str {
        match content_type {
            ContentType::Table => &self.table,
            ContentType::Image => &self.image,
            ContentType::Text  => &self.text,
        }
    }

    /// True when every source came back empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.table.is_empty() && self.image.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_matching_source() {
        let c = DocumentContent::new("body", "Revenue: 100", "scanned");
        assert_eq!(c.get(ContentType::Text), "body");
        assert_eq!(c.get(ContentType::Table), "Revenue: 100");
        assert_eq!(c.get(ContentType::Image), "scanned");
        assert!(!c.is_empty());
    }

    #[test]
    fn test_content_type_tags_are_lowercase() {
        assert_eq!(ContentType::Table.to_string(), "table");
        assert_eq!(
            serde_json::to_string(&ContentType::Image).unwrap(),
            "\"image\""
        );
    }
}
