//! CLI argument parsing for kiln.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::registry::ComponentKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Kiln: configuration-resolution engine for the kiln training framework.
///
/// Loads a YAML config document, merges key=value command-line overrides
/// onto it in order, and resolves `_component_` references against the
/// component registry.
#[derive(Parser, Debug)]
#[command(name = "kiln")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (sets log level to DEBUG).
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands for kiln.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that a config document is well-formed.
    ///
    /// Loads the document, applies overrides, and resolves every
    /// `_component_` reference in the merged tree.
    Validate(ConfigArgs),

    /// Print the merged config document.
    ///
    /// Loads the document, applies overrides, and writes the result
    /// to stdout.
    Cat(CatArgs),

    /// Resolve a single dotted component path.
    ///
    /// Looks the path up in the component registry, optionally checking
    /// that it names a component of a specific kind.
    Resolve(ResolveArgs),

    /// List registered modules and components.
    Ls,
}

/// Arguments shared by commands that load a config document.
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Path to the YAML config document.
    #[arg(short, long)]
    pub config: PathBuf,

    /// key=value overrides applied on top of the document, in order.
    #[arg(value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,
}

/// Arguments for the `cat` command.
#[derive(Parser, Debug)]
pub struct CatArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output format for the merged tree.
    #[arg(long, value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,
}

/// Output formats for `cat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML, matching the document format.
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

/// Arguments for the `resolve` command.
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Fully qualified dotted path to resolve.
    pub path: String,

    /// Require the resolved entry to be a component of this kind.
    #[arg(long, value_enum)]
    pub kind: Option<KindArg>,
}

/// Component kinds accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    /// A model builder.
    Model,
    /// An instruct prompt template.
    InstructTemplate,
    /// A chat control-token format.
    ChatFormat,
}

impl From<KindArg> for ComponentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Model => ComponentKind::Model,
            KindArg::InstructTemplate => ComponentKind::InstructTemplate,
            KindArg::ChatFormat => ComponentKind::ChatFormat,
        }
    }
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
