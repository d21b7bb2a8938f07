// ============================================================
// Layer 5 — Span Prediction Model
// ============================================================
// A BERT-style encoder with an extractive Q&A head. For every
// input token it emits two logits: "answer starts here" and
// "answer ends here".
//
//   input ids [batch, seq]
//     → token + position embeddings
//     → N × (self-attention → add & norm → GELU FFN → add & norm)
//     → final norm
//     → linear head [batch, seq, 2] → start / end logits
//
// Inference only: weights come from a checkpoint, nothing here
// is trained.
//
// Reference: Burn Book §3 (Building Blocks)
//            Devlin et al. (2019) BERT

use burn::{
    nn::{
        attention::{MhaInput, MultiHeadAttention, MultiHeadAttentionConfig},
        Embedding, EmbeddingConfig,
        LayerNorm, LayerNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::gelu,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct SpanModelConfig {
    pub vocab_size:  usize,
    pub max_seq_len: usize,
    pub d_model:     usize,
    pub num_heads:   usize,
    pub num_layers:  usize,
    pub d_ff:        usize,
}

impl SpanModelConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> SpanModel<B> {
        let blocks = (0..self.num_layers)
            .map(|_| EncoderBlock {
                attention: MultiHeadAttentionConfig::new(self.d_model, self.num_heads)
                    .with_dropout(0.0)
                    .init(device),
                ffn_in:    LinearConfig::new(self.d_model, self.d_ff).init(device),
                ffn_out:   LinearConfig::new(self.d_ff, self.d_model).init(device),
                attn_norm: LayerNormConfig::new(self.d_model).init(device),
                ffn_norm:  LayerNormConfig::new(self.d_model).init(device),
            })
            .collect();

        SpanModel {
            tokens:     EmbeddingConfig::new(self.vocab_size, self.d_model).init(device),
            positions:  EmbeddingConfig::new(self.max_seq_len, self.d_model).init(device),
            blocks,
            final_norm: LayerNormConfig::new(self.d_model).init(device),
            span_head:  LinearConfig::new(self.d_model, 2).init(device),
        }
    }
}

#[derive(Module, Debug)]
pub struct EncoderBlock<B: Backend> {
    attention: MultiHeadAttention<B>,
    ffn_in:    Linear<B>,
    ffn_out:   Linear<B>,
    attn_norm: LayerNorm<B>,
    ffn_norm:  LayerNorm<B>,
}

impl<B: Backend> EncoderBlock<B> {
    fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 3> {
        let attended = self.attention.forward(MhaInput::self_attn(x.clone())).context;
        let x = self.attn_norm.forward(x + attended);
        let fed = self.ffn_out.forward(gelu(self.ffn_in.forward(x.clone())));
        self.ffn_norm.forward(x + fed)
    }
}

#[derive(Module, Debug)]
pub struct SpanModel<B: Backend> {
    tokens:     Embedding<B>,
    positions:  Embedding<B>,
    blocks:     Vec<EncoderBlock<B>>,
    final_norm: LayerNorm<B>,
    span_head:  Linear<B>,
}

/// Per-token start and end logits, each [batch, seq_len]
pub struct SpanLogits<B: Backend> {
    pub start: Tensor<B, 2>,
    pub end:   Tensor<B, 2>,
}

impl<B: Backend> SpanModel<B> {
    pub fn forward(&self, input_ids: Tensor<B, 2, Int>) -> SpanLogits<B> {
        let [batch, seq_len] = input_ids.dims();
        let device = input_ids.device();

        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &device)
            .reshape([1, seq_len])
            .expand([batch, seq_len]);

        let mut x = self.tokens.forward(input_ids) + self.positions.forward(positions);
        for block in &self.blocks {
            x = block.forward(x);
        }

        let logits = self.span_head.forward(self.final_norm.forward(x)); // [batch, seq, 2]
        let start = logits
            .clone()
            .slice([0..batch, 0..seq_len, 0..1])
            .reshape([batch, seq_len]);
        let end = logits
            .slice([0..batch, 0..seq_len, 1..2])
            .reshape([batch, seq_len]);

        SpanLogits { start, end }
    }
}
