// ============================================================
// Layer 2 — Session Configuration
// ============================================================
// Every knob of a question-answering session in one
// serialisable struct. It can come from three places, in
// increasing priority:
//
//   1. QaConfig::default()
//   2. a JSON file passed with --config
//   3. explicit command-line flags
//
// The application layer never sees clap types; the CLI
// converts its arguments into a QaConfig.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, str::FromStr};

use crate::data::chunker::{DEFAULT_MAX_LENGTH, DEFAULT_OVERLAP};

/// Which AnswerScorer backend a session uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScorerKind {
    /// Keyword-overlap scorer, no model needed
    Keyword,
    /// Transformer span model loaded from a checkpoint
    Neural,
}

impl FromStr for ScorerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "keyword" => Ok(ScorerKind::Keyword),
            "neural"  => Ok(ScorerKind::Neural),
            other     => bail!("unknown scorer '{other}' (expected 'keyword' or 'neural')"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QaConfig {
    pub document:             String,
    pub scorer:               ScorerKind,
    pub checkpoint_dir:       Option<String>,
    /// Minimum confidence for a found answer
    pub confidence_threshold: f32,
    pub max_chunk_len:        usize,
    pub chunk_overlap:        usize,
    /// How many related matches a found result carries
    pub top_n:                usize,
    pub enable_ocr:           bool,
    /// Character cap on the context handed to the neural scorer
    pub max_context_chars:    usize,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            document:             String::new(),
            scorer:               ScorerKind::Keyword,
            checkpoint_dir:       None,
            confidence_threshold: 0.5,
            max_chunk_len:        DEFAULT_MAX_LENGTH,
            chunk_overlap:        DEFAULT_OVERLAP,
            top_n:                5,
            enable_ocr:           false,
            max_context_chars:    1000,
        }
    }
}

impl QaConfig {
    /// Read a JSON config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Malformed config '{}'", path.display()))
    }

    /// Reject settings that would break chunking or scoring.
    pub fn validate(&self) -> Result<()> {
        if self.max_chunk_len == 0 {
            bail!("max_chunk_len must be greater than zero");
        }
        if self.chunk_overlap >= self.max_chunk_len {
            bail!(
                "chunk_overlap ({}) must be less than max_chunk_len ({})",
                self.chunk_overlap,
                self.max_chunk_len
            );
        }
        if !self.confidence_threshold.is_finite() || self.confidence_threshold < 0.0 {
            bail!("confidence_threshold must be a non-negative number");
        }
        if self.top_n == 0 {
            bail!("top_n must be at least 1");
        }
        if self.scorer == ScorerKind::Neural && self.checkpoint_dir.is_none() {
            bail!("the neural scorer needs --checkpoint-dir");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = QaConfig::default();
        assert_eq!(cfg.confidence_threshold, 0.5);
        assert_eq!(cfg.max_chunk_len, 1024);
        assert_eq!(cfg.chunk_overlap, 200);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("qa.json");
        fs::write(&path, r#"{"document":"report.pdf","scorer":"neural","checkpoint_dir":"ckpt"}"#)
            .unwrap();

        let cfg = QaConfig::load(&path).unwrap();
        assert_eq!(cfg.document, "report.pdf");
        assert_eq!(cfg.scorer, ScorerKind::Neural);
        assert_eq!(cfg.top_n, 5);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_scorer_kind_parses_case_insensitively() {
        assert_eq!("Neural".parse::<ScorerKind>().unwrap(), ScorerKind::Neural);
        assert!("bm25".parse::<ScorerKind>().is_err());
    }

    #[test]
    fn test_rejects_overlap_not_below_length() {
        let cfg = QaConfig { max_chunk_len: 100, chunk_overlap: 100, ..QaConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_threshold_and_missing_checkpoint() {
        let cfg = QaConfig { confidence_threshold: f32::NAN, ..QaConfig::default() };
        assert!(cfg.validate().is_err());

        let cfg = QaConfig { scorer: ScorerKind::Neural, ..QaConfig::default() };
        assert!(cfg.validate().is_err());
    }
}
