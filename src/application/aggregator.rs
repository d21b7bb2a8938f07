// ============================================================
// Layer 2 — Answer Aggregator
// ============================================================
// Turns one question and one content source into exactly one
// QueryResult.
//
//   1. Empty source          → NoContent, scorer never called
//   2. Exact line match      → narrow the source to that line
//   3. Chunker               → overlapping windows
//   4. Scorer per window     → candidates (failures are skipped)
//   5. Best candidate ≥ threshold, has text  → Confident
//   6. Else ranked candidates ≥ threshold    → Fallback (top one)
//   7. Else                                  → NotFound, confidence 0
//
// Steps 5 and 6 use the same `>=` test against the same
// threshold, so a found result can never sit below it.
//
// `best` is the single highest-scoring candidate, first one on
// ties. It is returned as Confident only if it also carries
// answer text; a textless best falls through to the ranked
// fallback, whose head is that same candidate.

use crate::data::{chunker::Chunker, exact_match::find_exact_match};
use crate::domain::answer::{AnswerCandidate, AnswerStatus, QueryResult};
use crate::domain::document::ContentType;
use crate::domain::traits::AnswerScorer;

pub struct AnswerAggregator {
    chunker:   Chunker,
    threshold: f32,
    top_n:     usize,
}

impl AnswerAggregator {
    pub fn new(chunker: Chunker, threshold: f32, top_n: usize) -> Self {
        Self { chunker, threshold, top_n }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn aggregate(
        &self,
        scorer:       &dyn AnswerScorer,
        question:     &str,
        content:      &str,
        content_type: ContentType,
    ) -> QueryResult {
        tracing::debug!("Processing question against {} content: {}", content_type, question);

        if content.is_empty() {
            tracing::warn!("No {} content available for processing", content_type);
            return QueryResult::no_content(question, content_type);
        }

        let content = match find_exact_match(question, content) {
            Some(line) if !line.trim().is_empty() => {
                tracing::debug!("Exact match narrowed {} content to one line", content_type);
                line
            }
            _ => content,
        };

        tracing::debug!(
            "Chunking {} content: window {} entries, stride {}",
            content_type,
            self.chunker.max_length(),
            self.chunker.stride()
        );
        let candidates = self.score_chunks(scorer, question, content, content_type);
        self.decide(question, content_type, candidates)
    }

    /// Score every non-empty window, skipping scorer failures
    fn score_chunks(
        &self,
        scorer:       &dyn AnswerScorer,
        question:     &str,
        content:      &str,
        content_type: ContentType,
    ) -> Vec<AnswerCandidate> {
        let mut candidates = Vec::new();

        for chunk in self.chunker.chunk(content) {
            if chunk.trim().is_empty() {
                continue;
            }
            match scorer.score(question, &chunk) {
                Ok(span) if span.score.is_finite() => {
                    tracing::debug!(
                        "{} chunk scored {:.4}: '{}'",
                        scorer.name(),
                        span.score,
                        span.answer
                    );
                    candidates.push(AnswerCandidate::new(span.answer, span.score, chunk, content_type));
                }
                Ok(span) => {
                    tracing::warn!("Discarding non-finite score {} from {} scorer", span.score, scorer.name());
                }
                Err(e) => {
                    tracing::warn!("Error processing chunk: {:#}", e);
                }
            }
        }

        candidates
    }

    /// Apply the threshold policy to the collected candidates
    fn decide(
        &self,
        question:     &str,
        content_type: ContentType,
        candidates:   Vec<AnswerCandidate>,
    ) -> QueryResult {
        // Highest-scoring candidate; first one wins ties
        let best = candidates
            .iter()
            .fold(None::<&AnswerCandidate>, |best, c| match best {
                Some(b) if b.confidence >= c.confidence => Some(b),
                _ => Some(c),
            })
            .cloned();

        let mut ranked = candidates;
        ranked.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let (passing, below): (Vec<_>, Vec<_>) = ranked
            .into_iter()
            .partition(|c| c.confidence >= self.threshold);

        let mut related = passing;
        related.truncate(self.top_n);

        if let Some(best) =
            best.filter(|b| b.confidence >= self.threshold && !b.answer.trim().is_empty())
        {
            tracing::info!("Confident {} answer ({:.4})", content_type, best.confidence);
            return QueryResult::found(question, best, AnswerStatus::Confident, related);
        }

        if let Some(top) = related.first().cloned() {
            tracing::info!("Fallback {} answer ({:.4})", content_type, top.confidence);
            return QueryResult::found(question, top, AnswerStatus::Fallback, related);
        }

        let best_effort = below.into_iter().find(|c| !c.answer.trim().is_empty());
        QueryResult::not_found(question, content_type, best_effort)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::answer::{NOT_FOUND_ANSWER, NO_CONTENT_ANSWER};
    use crate::domain::test_support::StubScorer;

    /// Each paragraph packs into its own chunk; stride 1 gives
    /// windows "alpha.. bravo.." and "bravo.."
    fn aggregator() -> AnswerAggregator {
        AnswerAggregator::new(Chunker::new(20, 19), 0.5, 5)
    }

    const TWO_CHUNKS: &str = "alpha block here\n\nbravo block here";

    #[test]
    fn test_empty_content_skips_scorer() {
        let scorer = StubScorer::new().on("", "anything", 0.9);
        let r = aggregator().aggregate(&scorer, "q?", "", ContentType::Text);

        assert_eq!(r.status, AnswerStatus::NoContent);
        assert_eq!(r.answer, NO_CONTENT_ANSWER);
        assert_eq!(r.confidence, 0.0);
        assert_eq!(scorer.calls(), 0);
    }

    #[test]
    fn test_best_of_two_chunks_is_found() {
        let scorer = StubScorer::new()
            .on("alpha", "A", 0.9)
            .on("bravo", "B", 0.3);
        let r = aggregator().aggregate(&scorer, "q?", TWO_CHUNKS, ContentType::Text);

        assert_eq!(scorer.calls(), 2);
        assert_eq!(r.status, AnswerStatus::Confident);
        assert!(r.is_found());
        assert_eq!(r.answer, "A");
        assert!((r.confidence - 0.9).abs() < f32::EPSILON);
        assert_eq!(r.context.as_deref(), Some("alpha block here bravo block here"));
        assert_eq!(r.related.len(), 1);
    }

    #[test]
    fn test_all_below_threshold_is_not_found() {
        let scorer = StubScorer::new()
            .on("alpha", "A", 0.2)
            .on("bravo", "B", 0.3);
        let r = aggregator().aggregate(&scorer, "q?", TWO_CHUNKS, ContentType::Table);

        // ranking alone would put B first; the filter must drop both
        assert_eq!(r.status, AnswerStatus::NotFound);
        assert_eq!(r.answer, NOT_FOUND_ANSWER);
        assert_eq!(r.confidence, 0.0);
        assert!(r.related.is_empty());
        assert_eq!(r.best_effort.map(|c| c.answer), Some("B".to_string()));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let scorer = StubScorer::new().on("alpha", "A", 0.5);
        let r = aggregator().aggregate(&scorer, "q?", TWO_CHUNKS, ContentType::Text);
        assert_eq!(r.status, AnswerStatus::Confident);
    }

    #[test]
    fn test_scorer_failure_skips_only_that_chunk() {
        let scorer = StubScorer::new()
            .failing_on("alpha")
            .on("bravo", "B", 0.7);
        let r = aggregator().aggregate(&scorer, "q?", TWO_CHUNKS, ContentType::Text);

        assert_eq!(scorer.calls(), 2);
        assert_eq!(r.answer, "B");
        assert!(r.is_found());
    }

    #[test]
    fn test_every_chunk_failing_is_not_found() {
        let scorer = StubScorer::new().failing_on("block");
        let r = aggregator().aggregate(&scorer, "q?", TWO_CHUNKS, ContentType::Text);
        assert_eq!(r.status, AnswerStatus::NotFound);
    }

    #[test]
    fn test_textless_best_falls_back_to_top_ranked_candidate() {
        // alpha scores highest but has no text: it stays the best and
        // is returned through the ranked fallback, not replaced by bravo
        let scorer = StubScorer::new()
            .on("alpha", "", 0.95)
            .on("bravo", "B", 0.6);
        let r = aggregator().aggregate(&scorer, "q?", TWO_CHUNKS, ContentType::Text);

        assert_eq!(r.status, AnswerStatus::Fallback);
        assert!(r.is_found());
        assert!((r.confidence - 0.95).abs() < f32::EPSILON);
        assert_eq!(r.answer, "");
        let ranked: Vec<_> = r.related.iter().map(|c| c.answer.as_str()).collect();
        assert_eq!(ranked, vec!["", "B"]);
    }

    #[test]
    fn test_textless_best_with_nothing_else_passing() {
        let scorer = StubScorer::new()
            .on("alpha", "", 0.95)
            .on("bravo", "B", 0.1);
        let r = aggregator().aggregate(&scorer, "q?", TWO_CHUNKS, ContentType::Text);
        assert_eq!(r.status, AnswerStatus::Fallback);
        assert!(r.confidence >= 0.5);
    }

    #[test]
    fn test_textless_best_below_threshold_is_not_found() {
        let scorer = StubScorer::new()
            .on("alpha", "", 0.4)
            .on("bravo", "B", 0.3);
        let r = aggregator().aggregate(&scorer, "q?", TWO_CHUNKS, ContentType::Text);
        assert_eq!(r.status, AnswerStatus::NotFound);
        assert_eq!(r.best_effort.map(|c| c.answer), Some("B".to_string()));
    }

    #[test]
    fn test_non_finite_scores_are_discarded() {
        let scorer = StubScorer::new()
            .on("alpha", "A", f32::NAN)
            .on("bravo", "B", 0.8);
        let r = aggregator().aggregate(&scorer, "q?", TWO_CHUNKS, ContentType::Text);
        assert_eq!(r.answer, "B");
        assert_eq!(r.related.len(), 1);
    }

    #[test]
    fn test_exact_match_narrows_to_one_line() {
        let scorer = StubScorer::new().on("Revenue", "100", 0.9);
        let content = "Company: Acme\nRevenue: 100\nStaff: 12";
        let r = aggregator().aggregate(&scorer, "revenue", content, ContentType::Table);

        assert_eq!(scorer.calls(), 1);
        assert_eq!(r.context.as_deref(), Some("Revenue: 100"));
    }

    #[test]
    fn test_found_never_below_threshold() {
        let scores = [0.0, 0.1, 0.49, 0.5, 0.51, 0.99, 1.0];
        for a in scores {
            for b in scores {
                let scorer = StubScorer::new().on("alpha", "A", a).on("bravo", "B", b);
                let r = aggregator().aggregate(&scorer, "q?", TWO_CHUNKS, ContentType::Text);
                if r.is_found() {
                    assert!(r.confidence >= 0.5, "found at {} for ({a}, {b})", r.confidence);
                } else {
                    assert_eq!(r.confidence, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_related_matches_are_ranked_and_capped() {
        let content = (0..8)
            .map(|i| format!("para{i} text"))
            .collect::<Vec<_>>()
            .join("\n\n");
        let mut scorer = StubScorer::new();
        for i in 0..8 {
            scorer = scorer.on(&format!("para{i}"), &format!("p{i}"), 0.5 + i as f32 * 0.05);
        }
        let r = AnswerAggregator::new(Chunker::new(12, 11), 0.5, 3)
            .aggregate(&scorer, "q?", &content, ContentType::Text);

        assert_eq!(r.answer, "p7");
        let answers: Vec<_> = r.related.iter().map(|c| c.answer.as_str()).collect();
        assert_eq!(answers, vec!["p7", "p6", "p5"]);
    }
}
