// ============================================================
// Layer 5 — Neural Scorer
// ============================================================
// Scores one (question, context) pair with the span model.
//
// The scorer owns the model, the tokenizer, and the GPU device
// for its whole life: it is acquired once when a session
// starts and released when the session is dropped. Nothing is
// global, so tests can run the rest of the pipeline with a stub
// scorer and no device.
//
// Steps per call:
//   1. Flatten the context (newlines → ". ") and cap its length
//   2. Build [CLS] question [SEP] context [SEP], truncated
//   3. Forward pass → start / end probabilities (softmax)
//   4. Best span inside the context, at most MAX_ANSWER_LEN tokens
//   5. score = p_start × p_end, a probability in [0, 1]

use anyhow::{anyhow, bail, Result};
use burn::{
    backend::wgpu::WgpuDevice,
    prelude::*,
    tensor::{activation::softmax, TensorData},
};
use tokenizers::Tokenizer;

use crate::domain::traits::{AnswerScorer, ScoredSpan};
use crate::infra::{checkpoint::CheckpointManager, tokenizer_store::TokenizerStore};
use crate::ml::model::SpanModel;

type InferBackend = burn::backend::Wgpu;

const MAX_ANSWER_LEN: usize = 30;

pub struct NeuralScorer {
    model:             SpanModel<InferBackend>,
    tokenizer:         Tokenizer,
    max_seq_len:       usize,
    max_context_chars: usize,
    cls_id:            u32,
    sep_id:            u32,
    device:            WgpuDevice,
}

impl NeuralScorer {
    /// Load model and tokenizer from a checkpoint directory
    pub fn from_checkpoint(dir: &str, max_context_chars: usize) -> Result<Self> {
        let device    = WgpuDevice::default();
        let tokenizer = TokenizerStore::new(dir).load()?;
        let ckpt      = CheckpointManager::new(dir);
        let cfg       = ckpt.load_config()?;
        let model     = ckpt.load_model::<InferBackend>(&cfg, &device)?;

        let cls_id = TokenizerStore::special_id(&tokenizer, "[CLS]", 101);
        let sep_id = TokenizerStore::special_id(&tokenizer, "[SEP]", 102);

        tracing::info!("Neural scorer ready (max_seq_len={})", cfg.max_seq_len);
        Ok(Self {
            model,
            tokenizer,
            max_seq_len: cfg.max_seq_len,
            max_context_chars,
            cls_id,
            sep_id,
            device,
        })
    }

    fn predict(&self, question: &str, context: &str) -> Result<ScoredSpan> {
        let context = prepare_context(context, self.max_context_chars);

        let q_enc = self.tokenizer.encode(question, false)
            .map_err(|e| anyhow!("Question tokenise: {e}"))?;
        let c_enc = self.tokenizer.encode(context.as_str(), false)
            .map_err(|e| anyhow!("Context tokenise: {e}"))?;

        let mut input_ids: Vec<u32> = vec![self.cls_id];
        input_ids.extend_from_slice(q_enc.get_ids());
        input_ids.push(self.sep_id);
        let context_start = input_ids.len();
        input_ids.extend_from_slice(c_enc.get_ids());
        input_ids.push(self.sep_id);
        input_ids.truncate(self.max_seq_len);

        let seq_len = input_ids.len();
        // The closing [SEP] only survives truncation when everything fit
        let context_end = if input_ids.last() == Some(&self.sep_id) {
            seq_len - 1
        } else {
            seq_len
        };
        if context_end <= context_start {
            bail!("No room for context: question uses {} of {} tokens", context_start, self.max_seq_len);
        }

        let ids: Vec<i32> = input_ids.iter().map(|&id| id as i32).collect();
        let input = Tensor::<InferBackend, 1, Int>::from_data(
            TensorData::new(ids, [seq_len]),
            &self.device,
        )
        .reshape([1, seq_len]);

        let logits = self.model.forward(input);
        let start_probs = probabilities(logits.start)?;
        let end_probs   = probabilities(logits.end)?;

        let mut best_score = 0.0f32;
        let mut best_span  = None;
        for s in context_start..context_end {
            for e in s..(s + MAX_ANSWER_LEN).min(context_end) {
                let score = start_probs[s] * end_probs[e];
                if score > best_score {
                    best_score = score;
                    best_span  = Some((s, e));
                }
            }
        }

        let Some((start, end)) = best_span else {
            return Ok(ScoredSpan::new("", 0.0));
        };

        let answer = self.tokenizer.decode(&input_ids[start..=end], true)
            .map_err(|e| anyhow!("Decode: {e}"))?;
        let answer = answer
            .replace("[CLS]", "")
            .replace("[SEP]", "")
            .replace("[PAD]", "")
            .trim()
            .to_string();

        tracing::debug!("Span [{},{}] conf={:.4} answer='{}'", start, end, best_score, answer);

        if answer.is_empty() {
            return Ok(ScoredSpan::new("", 0.0));
        }
        Ok(ScoredSpan::new(answer, best_score))
    }
}

impl AnswerScorer for NeuralScorer {
    fn score(&self, question: &str, context: &str) -> Result<ScoredSpan> {
        self.predict(question, context)
    }

    fn name(&self) -> &str {
        "neural"
    }
}

/// Softmax over the sequence of a [1, seq_len] logit row
fn probabilities(logits: Tensor<InferBackend, 2>) -> Result<Vec<f32>> {
    softmax(logits, 1)
        .into_data()
        .to_vec::<f32>()
        .map_err(|e| anyhow!("Read probabilities: {e:?}"))
}

/// Flatten a chunk into one line of sentences and cap its length.
pub fn prepare_context(context: &str, max_chars: usize) -> String {
    let flat = context
        .lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(". ")
        .replace("..", ".");
    flat.chars().take(max_chars).collect()
}
