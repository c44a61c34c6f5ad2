//! Prompt-side components addressable from configs.
//!
//! Instruct templates render a prompt from a sample's columns; chat formats
//! wrap a conversation turn in model-specific control tokens. Both are
//! registered under `kiln.data` and looked up by dotted path or bare name.

mod formats;
mod templates;

pub use formats::{ChatFormat, ChatMlFormat, Llama2ChatFormat, MistralChatFormat};
pub use templates::{
    AlpacaInstructTemplate, GrammarErrorCorrectionTemplate, InstructTemplate, SummarizeTemplate,
};
