// ============================================================
// Layer 4 — Text Chunker
// ============================================================
// Splits a content string into windows small enough for a
// bounded-context scorer.
//
// Two passes:
//
//   1. Paragraph packing (characters)
//      Split on blank lines ("\n\n") and greedily pack
//      paragraphs into a buffer. When the next paragraph would
//      push the buffer past `max_length` characters, the buffer
//      is flushed (trimmed) as a chunk and a new one starts.
//      A single paragraph longer than `max_length` is kept whole.
//
//   2. Window re-grouping (chunk-list indices)
//      stride = max_length - overlap, but it is applied to the
//      INDEX of the packed chunk list, not to characters:
//        window k = chunks[k*stride .. k*stride + max_length]
//      joined with single spaces. Empty windows are dropped.
//
// Example with max_length=10, overlap=8 (stride 2):
//   packed:  [a, b, c, d, e]
//   windows: "a b c d e", "c d e", "e"
//
// For ordinary documents the packed list is far shorter than
// the stride, so pass 2 yields one window per document.
// Tests pin this indexing so it only changes on purpose.
//
// Reference: Rust Book §8 (Strings), §13 (Iterators)

pub const DEFAULT_MAX_LENGTH: usize = 1024;
pub const DEFAULT_OVERLAP: usize = 200;

#[derive(Debug, Clone)]
pub struct Chunker {
    /// Character budget per packed chunk; also the window width in chunk-list units
    max_length: usize,
    /// Subtracted from max_length to get the window stride
    overlap: usize,
}

impl Chunker {
    /// Create a new Chunker.
    ///
    /// # Panics
    /// Panics if overlap >= max_length, because the stride
    /// would be zero and the window loop would never advance.
    pub fn new(max_length: usize, overlap: usize) -> Self {
        assert!(
            overlap < max_length,
            "overlap ({}) must be less than max_length ({})",
            overlap,
            max_length
        );
        Self { max_length, overlap }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn stride(&self) -> usize {
        self.max_length - self.overlap
    }

    /// Produce the overlapping windows for `content`.
    /// Pure function of its inputs: same content, same windows.
    pub fn chunk(&self, content: &str) -> Vec<String> {
        let packed = self.pack_paragraphs(content);

        let stride = self.stride();
        let mut windows = Vec::new();
        let mut start = 0usize;

        while start < packed.len() {
            let end = (start + self.max_length).min(packed.len());
            let window = packed[start..end].join(" ");
            if !window.trim().is_empty() {
                windows.push(window);
            }
            start += stride;
        }

        windows
    }

    /// Pass 1: greedy paragraph packing by character count
    fn pack_paragraphs(&self, content: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut buffer = String::new();
        let mut buffer_chars = 0usize;

        for paragraph in content.split("\n\n") {
            let para_chars = paragraph.chars().count();

            if buffer_chars + para_chars > self.max_length && !buffer.trim().is_empty() {
                chunks.push(buffer.trim().to_string());
                buffer.clear();
                buffer_chars = 0;
            }

            buffer.push_str(paragraph);
            buffer.push_str("\n\n");
            buffer_chars += para_chars + 2;
        }

        let tail = buffer.trim();
        if !tail.is_empty() {
            chunks.push(tail.to_string());
        }

        chunks
    }
}

impl Default for Chunker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LENGTH, DEFAULT_OVERLAP)
    }
}
