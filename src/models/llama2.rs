//! Llama2 family descriptors.

use super::ModelSpec;

/// Descriptor for the 7B-parameter Llama2 architecture.
pub fn llama2_7b() -> ModelSpec {
    ModelSpec {
        vocab_size: 32_000,
        embed_dim: 4_096,
        num_layers: 32,
        num_heads: 32,
        max_seq_len: 4_096,
    }
}

/// Descriptor for the 13B-parameter Llama2 architecture.
pub fn llama2_13b() -> ModelSpec {
    ModelSpec {
        vocab_size: 32_000,
        embed_dim: 5_120,
        num_layers: 40,
        num_heads: 40,
        max_seq_len: 4_096,
    }
}
