//! Chat formats: model-specific control-token wrapping for a chat turn.

use crate::error::{KilnError, Result};

/// Wraps a single conversation turn in a model's control tokens.
pub trait ChatFormat: Send + Sync + std::fmt::Debug {
    /// Format a user turn, optionally preceded by a system prompt.
    fn format(&self, system: Option<&str>, user: &str) -> Result<String>;
}

/// Llama2 `[INST]` wrapping with `<<SYS>>` system blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct Llama2ChatFormat;

impl ChatFormat for Llama2ChatFormat {
    fn format(&self, system: Option<&str>, user: &str) -> Result<String> {
        Ok(match system {
            Some(system) => {
                format!("[INST] <<SYS>>\n{system}\n<</SYS>>\n\n{user} [/INST] ")
            }
            None => format!("[INST] {user} [/INST] "),
        })
    }
}

/// Mistral `[INST]` wrapping. The reference tokenizer defines no system
/// block, so a system prompt is rejected rather than silently dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct MistralChatFormat;

impl ChatFormat for MistralChatFormat {
    fn format(&self, system: Option<&str>, user: &str) -> Result<String> {
        if system.is_some() {
            return Err(KilnError::UserError(
                "MistralChatFormat does not support system prompts".to_string(),
            ));
        }
        Ok(format!("[INST] {user} [/INST] "))
    }
}

/// ChatML `<|im_start|>` / `<|im_end|>` wrapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChatMlFormat;

impl ChatFormat for ChatMlFormat {
    fn format(&self, system: Option<&str>, user: &str) -> Result<String> {
        let mut out = String::new();
        if let Some(system) = system {
            out.push_str(&format!("<|im_start|>system\n{system}<|im_end|>\n"));
        }
        out.push_str(&format!(
            "<|im_start|>user\n{user}<|im_end|>\n<|im_start|>assistant\n"
        ));
        Ok(out)
    }
}
