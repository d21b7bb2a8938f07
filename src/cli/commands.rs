// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `ask` and `extract`, and all
// their flags.
//
// clap's derive macros generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f32, ScorerKind)
//
// Reference: Rust Book §12 (Building a CLI Program)

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use std::{fs, path::Path};

use crate::application::config::{QaConfig, ScorerKind};

/// The two top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask questions about a PDF, DOCX, or text document
    Ask(AskArgs),

    /// Print the text, table, and image content extracted from a document
    Extract(ExtractArgs),
}

/// All arguments for the `ask` command.
/// Flags left unset fall back to --config, then to the defaults.
#[derive(Args, Debug)]
pub struct AskArgs {
    /// Document to answer questions about
    #[arg(long)]
    pub document: Option<String>,

    /// Question to answer; repeat for a batch.
    /// With no questions the command runs interactively.
    #[arg(long = "question", short = 'q')]
    pub questions: Vec<String>,

    /// File with one question per line
    #[arg(long)]
    pub questions_file: Option<String>,

    /// Scoring backend: keyword or neural
    #[arg(long)]
    pub scorer: Option<ScorerKind>,

    /// Directory holding model_config.json, model.mpk and tokenizer.json
    #[arg(long)]
    pub checkpoint_dir: Option<String>,

    /// Minimum confidence for an answer to count as found
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Chunk window width
    #[arg(long)]
    pub max_chunk_len: Option<usize>,

    /// Overlap between consecutive chunk windows
    #[arg(long)]
    pub overlap: Option<usize>,

    /// How many related matches to keep per answer
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Request OCR of embedded images
    #[arg(long)]
    pub enable_ocr: bool,

    /// JSON file with session settings
    #[arg(long)]
    pub config: Option<String>,

    /// Append results to this CSV report
    #[arg(long)]
    pub output: Option<String>,

    /// Print results as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl AskArgs {
    /// Build the session config: defaults, then --config, then flags.
    /// This is the boundary between Layer 1 and Layer 2.
    pub fn to_config(&self) -> Result<QaConfig> {
        let mut cfg = match &self.config {
            Some(path) => QaConfig::load(Path::new(path))?,
            None => QaConfig::default(),
        };

        if let Some(document) = &self.document {
            cfg.document = document.clone();
        }
        if let Some(scorer) = self.scorer {
            cfg.scorer = scorer;
        }
        if let Some(dir) = &self.checkpoint_dir {
            cfg.checkpoint_dir = Some(dir.clone());
        }
        if let Some(threshold) = self.threshold {
            cfg.confidence_threshold = threshold;
        }
        if let Some(len) = self.max_chunk_len {
            cfg.max_chunk_len = len;
        }
        if let Some(overlap) = self.overlap {
            cfg.chunk_overlap = overlap;
        }
        if let Some(top_n) = self.top_n {
            cfg.top_n = top_n;
        }
        cfg.enable_ocr |= self.enable_ocr;

        if cfg.document.is_empty() {
            bail!("no document given; pass --document or set it in --config");
        }
        Ok(cfg)
    }

    /// Questions from --question flags followed by --questions-file lines
    pub fn collect_questions(&self) -> Result<Vec<String>> {
        let mut questions = self.questions.clone();

        if let Some(path) = &self.questions_file {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Cannot read questions file '{path}'"))?;
            questions.extend(
                text.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .map(String::from),
            );
        }
        Ok(questions)
    }
}

/// All arguments for the `extract` command
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Document to extract
    #[arg(long)]
    pub document: String,

    /// Request OCR of embedded images
    #[arg(long)]
    pub enable_ocr: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn ask_args(argv: &[&str]) -> AskArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Ask(args) => args,
            other => panic!("expected ask, got {other:?}"),
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = ask_args(&[
            "doc-qa", "ask", "--document", "r.pdf", "-q", "a?", "-q", "b?",
            "--scorer", "neural", "--checkpoint-dir", "ckpt", "--threshold", "0.3",
        ]);
        let cfg = args.to_config().unwrap();

        assert_eq!(cfg.document, "r.pdf");
        assert_eq!(cfg.scorer, ScorerKind::Neural);
        assert_eq!(cfg.checkpoint_dir.as_deref(), Some("ckpt"));
        assert_eq!(cfg.confidence_threshold, 0.3);
        assert_eq!(cfg.max_chunk_len, 1024);
        assert_eq!(args.collect_questions().unwrap(), vec!["a?", "b?"]);
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("qa.json");
        fs::write(&path, r#"{"document":"from_file.docx","top_n":2,"confidence_threshold":0.7}"#)
            .unwrap();

        let path = path.display().to_string();
        let cfg = ask_args(&["doc-qa", "ask", "--config", &path, "--top-n", "4"])
            .to_config()
            .unwrap();

        assert_eq!(cfg.document, "from_file.docx");
        assert_eq!(cfg.top_n, 4);
        assert_eq!(cfg.confidence_threshold, 0.7);
    }

    #[test]
    fn test_missing_document_is_rejected() {
        assert!(ask_args(&["doc-qa", "ask"]).to_config().is_err());
    }

    #[test]
    fn test_questions_file_skips_blank_lines() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("questions.txt");
        fs::write(&path, "Who signed it?\n\n  When?  \n").unwrap();

        let path = path.display().to_string();
        let args = ask_args(&["doc-qa", "ask", "-q", "First?", "--questions-file", &path]);
        assert_eq!(
            args.collect_questions().unwrap(),
            vec!["First?", "Who signed it?", "When?"]
        );
    }
}
