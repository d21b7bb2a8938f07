// ============================================================
// Layer 4 — Exact-Match Finder
// ============================================================
// Narrows a content blob to the first line that literally
// contains the question (case-insensitive). The whole question
// string must appear; no keyword extraction happens here.
//
// A hit is a heuristic, not proof of relevance: a question
// that happens to appear verbatim in an unrelated line still
// narrows the search to that line.

/// Return the first line of `content` whose lowercase form
/// contains the lowercased `question`, if any.
pub fn find_exact_match<'a>(question: &str, content: &'a str) -> Option<&'a str> {
    let needle = question.to_lowercase();
    content
        .split('\n')
        .find(|line| line.to_lowercase().contains(&needle))
}
