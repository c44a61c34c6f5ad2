//! Instruct prompt templates.

use crate::config::{ConfigTree, ConfigValue};
use crate::error::{KilnError, Result};

/// Renders a training prompt from a sample's named columns.
pub trait InstructTemplate: Send + Sync + std::fmt::Debug {
    /// Render the prompt. Fails if a required column is missing or not a
    /// string.
    fn format(&self, sample: &ConfigTree) -> Result<String>;
}

/// Fetch a required string column from a sample.
fn column<'a>(sample: &'a ConfigTree, name: &str) -> Result<&'a str> {
    match sample.get(name) {
        Some(ConfigValue::String(value)) => Ok(value),
        Some(_) => Err(KilnError::UserError(format!(
            "Sample column '{}' must be a string",
            name
        ))),
        None => Err(KilnError::UserError(format!(
            "Sample is missing column '{}'",
            name
        ))),
    }
}

/// Alpaca-style instruction prompt, with and without an input context.
///
/// Columns: `instruction` (required), `input` (optional).
#[derive(Debug, Clone, Copy, Default)]
pub struct AlpacaInstructTemplate;

impl InstructTemplate for AlpacaInstructTemplate {
    fn format(&self, sample: &ConfigTree) -> Result<String> {
        let instruction = column(sample, "instruction")?;
        match sample.get("input").and_then(ConfigValue::as_str) {
            Some(input) if !input.is_empty() => Ok(format!(
                "Below is an instruction that describes a task, paired with an input \
                 that provides further context. Write a response that appropriately \
                 completes the request.\n\n\
                 ### Instruction:\n{instruction}\n\n\
                 ### Input:\n{input}\n\n\
                 ### Response:\n"
            )),
            _ => Ok(format!(
                "Below is an instruction that describes a task. Write a response that \
                 appropriately completes the request.\n\n\
                 ### Instruction:\n{instruction}\n\n\
                 ### Response:\n"
            )),
        }
    }
}

/// Grammar correction prompt.
///
/// Columns: `sentence` (required).
#[derive(Debug, Clone, Copy, Default)]
pub struct GrammarErrorCorrectionTemplate;

impl InstructTemplate for GrammarErrorCorrectionTemplate {
    fn format(&self, sample: &ConfigTree) -> Result<String> {
        let sentence = column(sample, "sentence")?;
        Ok(format!(
            "Correct this to standard English: {sentence}\n---\nCorrected: "
        ))
    }
}

/// Dialogue summarization prompt.
///
/// Columns: `dialogue` (required).
#[derive(Debug, Clone, Copy, Default)]
pub struct SummarizeTemplate;

impl InstructTemplate for SummarizeTemplate {
    fn format(&self, sample: &ConfigTree) -> Result<String> {
        let dialogue = column(sample, "dialogue")?;
        Ok(format!(
            "Summarize this dialogue:\n{dialogue}\n---\nSummary:\n"
        ))
    }
}
