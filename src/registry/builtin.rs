//! The built-in registry of framework components.

use super::{ComponentKind, Registry, Target};
use crate::data::{
    AlpacaInstructTemplate, ChatMlFormat, GrammarErrorCorrectionTemplate, Llama2ChatFormat,
    MistralChatFormat, SummarizeTemplate,
};
use crate::models::llama2;
use once_cell::sync::Lazy;

/// Module holding the built-in templates and chat formats.
pub const DATA_MODULE: &str = "kiln.data";

/// Module holding the built-in Llama2 descriptors.
pub const LLAMA2_MODULE: &str = "kiln.models.llama2";

static ALPACA: AlpacaInstructTemplate = AlpacaInstructTemplate;
static GRAMMAR: GrammarErrorCorrectionTemplate = GrammarErrorCorrectionTemplate;
static SUMMARIZE: SummarizeTemplate = SummarizeTemplate;
static LLAMA2_CHAT: Llama2ChatFormat = Llama2ChatFormat;
static MISTRAL_CHAT: MistralChatFormat = MistralChatFormat;
static CHATML: ChatMlFormat = ChatMlFormat;

static BUILTIN: Lazy<Registry> = Lazy::new(|| build().expect("built-in registry is well-formed"));

/// The registry of the framework's own modules and components.
pub fn builtin() -> &'static Registry {
    &BUILTIN
}

fn build() -> crate::error::Result<Registry> {
    let mut registry = Registry::new();

    registry.register_component(
        DATA_MODULE,
        "AlpacaInstructTemplate",
        ComponentKind::InstructTemplate,
        Target::Template(&ALPACA),
    )?;
    registry.register_component(
        DATA_MODULE,
        "GrammarErrorCorrectionTemplate",
        ComponentKind::InstructTemplate,
        Target::Template(&GRAMMAR),
    )?;
    registry.register_component(
        DATA_MODULE,
        "SummarizeTemplate",
        ComponentKind::InstructTemplate,
        Target::Template(&SUMMARIZE),
    )?;
    registry.register_component(
        DATA_MODULE,
        "Llama2ChatFormat",
        ComponentKind::ChatFormat,
        Target::Format(&LLAMA2_CHAT),
    )?;
    registry.register_component(
        DATA_MODULE,
        "MistralChatFormat",
        ComponentKind::ChatFormat,
        Target::Format(&MISTRAL_CHAT),
    )?;
    registry.register_component(
        DATA_MODULE,
        "ChatMlFormat",
        ComponentKind::ChatFormat,
        Target::Format(&CHATML),
    )?;

    registry.register_component(
        LLAMA2_MODULE,
        "llama2_7b",
        ComponentKind::Model,
        Target::Model(llama2::llama2_7b),
    )?;
    registry.register_component(
        LLAMA2_MODULE,
        "llama2_13b",
        ComponentKind::Model,
        Target::Model(llama2::llama2_13b),
    )?;

    Ok(registry)
}
