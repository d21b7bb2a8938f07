// ============================================================
// Layer 6 — Checkpoint Loader
// ============================================================
// Restores the span model from a checkpoint directory:
//
//   checkpoints/
//     model_config.json   ← architecture (vocab, d_model, layers, ...)
//     model.mpk           ← weights written by Burn's CompactRecorder
//     tokenizer.json      ← see tokenizer_store.rs
//
// The config is read first because the model has to be built
// with the exact same shape before the weights can be loaded
// into it. CompactRecorder fails if the shapes disagree.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::ml::model::{SpanModel, SpanModelConfig};

pub const CONFIG_FILE: &str = "model_config.json";

/// Recorder adds the `.mpk` extension
pub const WEIGHTS_STEM: &str = "model";

/// Architecture of a saved span model.
/// Unknown keys in the JSON are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointConfig {
    pub vocab_size:  usize,
    pub max_seq_len: usize,
    pub d_model:     usize,
    pub num_heads:   usize,
    pub num_layers:  usize,
    pub d_ff:        usize,
}

impl CheckpointConfig {
    pub fn model_config(&self) -> SpanModelConfig {
        SpanModelConfig::new(
            self.vocab_size,
            self.max_seq_len,
            self.d_model,
            self.num_heads,
            self.num_layers,
            self.d_ff,
        )
    }
}

/// Reads model checkpoints from one directory.
pub struct CheckpointManager {
    dir: PathBuf,
}

impl CheckpointManager {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn load_config(&self) -> Result<CheckpointConfig> {
        let path = self.dir.join(CONFIG_FILE);

        let json = fs::read_to_string(&path).with_context(|| {
            format!("Cannot read model config from '{}'", path.display())
        })?;

        serde_json::from_str(&json)
            .with_context(|| format!("Malformed model config '{}'", path.display()))
    }

    /// Build the model described by the config and load its weights.
    pub fn load_model<B: Backend>(
        &self,
        cfg:    &CheckpointConfig,
        device: &B::Device,
    ) -> Result<SpanModel<B>> {
        let path = self.dir.join(WEIGHTS_STEM);
        let model: SpanModel<B> = cfg.model_config().init(device);

        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| format!("Cannot load weights '{}.mpk'", path.display()))?;

        tracing::info!("Loaded span model weights from '{}.mpk'", path.display());
        Ok(model.load_record(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_ignores_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            r#"{"vocab_size":30522,"max_seq_len":512,"d_model":256,
                "num_heads":8,"num_layers":6,"d_ff":1024,"dropout":0.1}"#,
        )
        .unwrap();

        let cfg = CheckpointManager::new(dir.path()).load_config().unwrap();
        assert_eq!(cfg.max_seq_len, 512);
        assert_eq!(cfg.model_config().num_layers, 6);
    }

    #[test]
    fn test_missing_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CheckpointManager::new(dir.path()).load_config().unwrap_err();
        assert!(err.to_string().contains("model_config.json"));
    }
}
