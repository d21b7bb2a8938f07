// ============================================================
// Layer 6 — Tokenizer Store
// ============================================================
// Loads the HuggingFace-format tokenizer that belongs to a
// checkpoint. The neural scorer must tokenise with exactly the
// vocabulary its weights were trained against, so the
// tokenizer always lives next to the weights.

use anyhow::{anyhow, Result};
use std::path::PathBuf;
use tokenizers::Tokenizer;

pub const TOKENIZER_FILE: &str = "tokenizer.json";

pub struct TokenizerStore {
    dir: PathBuf,
}

impl TokenizerStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Load `tokenizer.json` from the checkpoint directory
    pub fn load(&self) -> Result<Tokenizer> {
        let path = self.dir.join(TOKENIZER_FILE);
        let tokenizer = Tokenizer::from_file(&path).map_err(|e| {
            anyhow!("Cannot load tokenizer from '{}': {}", path.display(), e)
        })?;
        tracing::debug!(
            "Tokenizer loaded ({} tokens)",
            tokenizer.get_vocab_size(true)
        );
        Ok(tokenizer)
    }

    /// Id of a special token such as `[CLS]`, falling back to the
    /// BERT convention when the vocabulary does not name it.
    pub fn special_id(tokenizer: &Tokenizer, token: &str, fallback: u32) -> u32 {
        tokenizer.token_to_id(token).unwrap_or(fallback)
    }
}
