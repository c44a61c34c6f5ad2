//! Model descriptors addressable from configs.
//!
//! These are architecture hyperparameter sets, not runnable models. The
//! registry exposes each builder function as a `Model` component; the
//! training side of the framework turns a descriptor into a live network.

pub mod llama2;

use serde::{Deserialize, Serialize};

/// Architecture hyperparameters produced by a registered model builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Vocabulary size of the paired tokenizer.
    pub vocab_size: u32,
    /// Transformer embedding dimension.
    pub embed_dim: u32,
    /// Number of transformer layers.
    pub num_layers: u32,
    /// Number of attention heads.
    pub num_heads: u32,
    /// Maximum sequence length the position encoding supports.
    pub max_seq_len: u32,
}
