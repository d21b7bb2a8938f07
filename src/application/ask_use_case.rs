// ============================================================
// Layer 2 — Ask Use Case
// ============================================================
// One question-answering session over one document:
//
//   Step 1: Validate the config
//   Step 2: Acquire the scorer        (Layer 5 - ml)
//   Step 3: Load + extract document   (Layer 4 - data)
//   Step 4: Answer questions          (aggregator + orchestrator)
//
// The scorer (and the GPU device behind a neural scorer) is
// owned by the session: acquired in `new`, released when the
// session is closed or dropped.
//
// Steps 1-3 are fatal: a missing or corrupt document ends the
// session before any question is asked. After that, nothing a
// single question does can stop the others; `answer_all` turns
// per-question errors into Error records and keeps going.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::application::{
    aggregator::AnswerAggregator,
    config::{QaConfig, ScorerKind},
    orchestrator::MultiSourceOrchestrator,
};
use crate::data::{chunker::Chunker, loader::DocumentLoader, normalizer::TextNormalizer};
use crate::domain::answer::QueryResult;
use crate::domain::document::{ContentType, DocumentContent};
use crate::domain::traits::{AnswerScorer, QuestionAnswerer};
use crate::ml::{inferencer::NeuralScorer, keyword_scorer::KeywordScorer};

pub struct AskUseCase {
    content:      DocumentContent,
    scorer:       Box<dyn AnswerScorer>,
    orchestrator: MultiSourceOrchestrator,
}

impl AskUseCase {
    /// Start a session: acquire the scorer and load the document.
    pub fn new(config: &QaConfig) -> Result<Self> {
        config.validate()?;

        let scorer = build_scorer(config)?;

        let loader  = DocumentLoader::new(config.enable_ocr);
        let content = loader
            .load_content(Path::new(&config.document), &TextNormalizer::new())
            .with_context(|| format!("Could not load document '{}'", config.document))?;

        if content.is_empty() {
            tracing::warn!("No content could be extracted from '{}'", config.document);
        }

        Ok(Self::with_parts(content, scorer, config))
    }

    /// Assemble a session from already-extracted content
    pub fn with_parts(
        content: DocumentContent,
        scorer:  Box<dyn AnswerScorer>,
        config:  &QaConfig,
    ) -> Self {
        let chunker    = Chunker::new(config.max_chunk_len, config.chunk_overlap);
        let aggregator = AnswerAggregator::new(chunker, config.confidence_threshold, config.top_n);
        tracing::info!(
            "Session ready: {} scorer, threshold {:.2}",
            scorer.name(),
            aggregator.threshold()
        );
        Self {
            content,
            scorer,
            orchestrator: MultiSourceOrchestrator::new(aggregator),
        }
    }

    pub fn content(&self) -> &DocumentContent {
        &self.content
    }

    /// Answer a batch. Exactly one result per question, in order.
    pub fn answer_all<S: AsRef<str>>(&self, questions: &[S]) -> Vec<QueryResult> {
        tracing::debug!("Processing {} questions", questions.len());
        questions
            .iter()
            .map(|q| {
                let q = q.as_ref();
                self.answer(q).unwrap_or_else(|e| {
                    tracing::error!("Error processing question '{}': {:#}", q, e);
                    QueryResult::error(q, ContentType::Text)
                })
            })
            .collect()
    }

    /// End the session and release the scorer
    pub fn close(self) {
        tracing::info!("Closing session ({} scorer)", self.scorer.name());
    }
}

impl QuestionAnswerer for AskUseCase {
    fn answer(&self, question: &str) -> Result<QueryResult> {
        let question = question.trim();
        if question.is_empty() {
            bail!("question is empty");
        }
        Ok(self.orchestrator.find_answer(self.scorer.as_ref(), question, &self.content))
    }
}

fn build_scorer(config: &QaConfig) -> Result<Box<dyn AnswerScorer>> {
    Ok(match config.scorer {
        ScorerKind::Keyword => Box::new(KeywordScorer::new()),
        ScorerKind::Neural => {
            let dir = config
                .checkpoint_dir
                .as_deref()
                .context("the neural scorer needs a checkpoint directory")?;
            Box::new(NeuralScorer::from_checkpoint(dir, config.max_context_chars)?)
        }
    })
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::answer::AnswerStatus;
    use crate::domain::test_support::StubScorer;
    use std::io::Write;

    fn session(content: DocumentContent, scorer: StubScorer) -> AskUseCase {
        AskUseCase::with_parts(content, Box::new(scorer), &QaConfig::default())
    }

    #[test]
    fn test_batch_keeps_going_after_a_bad_question() {
        let content = DocumentContent::new("Revenue was 100", "", "");
        let s = session(content, StubScorer::new().on("Revenue", "100", 0.9));

        let results = s.answer_all(&["  ", "what was revenue?"]);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].status, AnswerStatus::Error);
        assert!(!results[0].is_found());
        assert_eq!(results[1].answer, "100");
    }

    #[test]
    fn test_empty_document_answers_not_found() {
        let s = session(DocumentContent::default(), StubScorer::new().on("", "x", 1.0));
        for r in s.answer_all(&["who?", "when?"]) {
            assert!(!r.is_found());
            assert_eq!(r.confidence, 0.0);
        }
    }

    #[test]
    fn test_missing_document_is_fatal() {
        let config = QaConfig {
            document: "/no/such/report.pdf".to_string(),
            ..QaConfig::default()
        };
        assert!(AskUseCase::new(&config).is_err());
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let config = QaConfig { chunk_overlap: 2000, ..QaConfig::default() };
        assert!(AskUseCase::new(&config).is_err());
    }

    #[test]
    fn test_keyword_session_end_to_end_prefers_table() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        write!(
            file,
            "Annual summary\n\nRevenue grew strongly in 2022 to 95 million.\n\n\
             Metric    2021    2022\n\
             Revenue   100     120\n\
             Profit    10      12\n"
        )
        .unwrap();

        let config = QaConfig {
            document: file.path().display().to_string(),
            ..QaConfig::default()
        };
        let s = AskUseCase::new(&config).unwrap();
        let r = s.answer("What was revenue in 2022?").unwrap();

        assert_eq!(r.content_type, ContentType::Table);
        assert_eq!(r.answer, "120");
        assert!(r.is_found());
        s.close();
    }
}
