//! Command-line override parsing and merge.
//!
//! Each override token has the form `dotted.key.path=value`. Tokens are
//! applied to a loaded config tree in order, later tokens winning over
//! earlier ones and over the document. The merge never mutates the caller's
//! tree; it returns a new one.
//!
//! Assignment semantics for the final key segment:
//! - a missing key is added;
//! - a key holding a scalar is replaced;
//! - a key holding a plain subtree, assigned a scalar, loses the whole
//!   subtree;
//! - a key holding a subtree that contains `_component_`, assigned a scalar,
//!   keeps the subtree and rewrites only the marker's value. The remaining
//!   sibling keys are that component's constructor arguments and survive a
//!   swap of the component itself.

use super::value::{ConfigTree, ConfigValue, COMPONENT_KEY};
use crate::error::{KilnError, Result};
use tracing::debug;

/// One parsed `key.path=value` override token.
///
/// Created once per token at parse time, consumed exactly once during merge.
#[derive(Debug, Clone, PartialEq)]
pub struct Override {
    /// Dotted key path, split into segments.
    pub path: Vec<String>,
    /// Parsed literal value.
    pub value: ConfigValue,
}

impl Override {
    /// The dotted key as written on the command line.
    pub fn key(&self) -> String {
        self.path.join(".")
    }
}

/// Parse a single `key=value` token.
///
/// The key is split on dots; the value is parsed as the most specific YAML
/// scalar type (int, float, bool, null, string). Flow-style lists and
/// mappings are also accepted. Anything that fails YAML parsing is kept as a
/// plain string.
pub fn parse_override(token: &str) -> Result<Override> {
    let Some((key, raw_value)) = token.split_once('=') else {
        return Err(malformed(token));
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(malformed(token));
    }

    let path: Vec<String> = key.split('.').map(str::to_string).collect();
    if path.iter().any(|segment| segment.is_empty()) {
        return Err(KilnError::UserError(format!(
            "Override key '{}' contains an empty segment",
            key
        )));
    }

    Ok(Override {
        path,
        value: parse_literal(raw_value),
    })
}

/// Parse an ordered sequence of override tokens.
///
/// Fails on the first malformed token, before anything is applied.
pub fn parse_overrides(tokens: &[String]) -> Result<Vec<Override>> {
    tokens.iter().map(|token| parse_override(token)).collect()
}

/// Merge command-line override tokens onto a base tree.
///
/// Returns a new tree; `base` is left untouched. All tokens are parsed before
/// any is applied, so a malformed token aborts the merge with no partial
/// result. Overrides apply strictly in the order given.
pub fn merge_overrides(base: &ConfigTree, tokens: &[String]) -> Result<ConfigTree> {
    let overrides = parse_overrides(tokens)?;

    let mut merged = base.clone();
    for entry in &overrides {
        apply_override(&mut merged, entry)?;
        debug!(key = %entry.key(), "applied override");
    }
    Ok(merged)
}

/// Apply one parsed override to a tree in place.
///
/// Intermediate path segments that are missing, or that currently hold a
/// scalar, are (re)created as empty subtrees.
pub fn apply_override(tree: &mut ConfigTree, entry: &Override) -> Result<()> {
    // path is non-empty by construction in parse_override
    let (last, parents) = match entry.path.split_last() {
        Some(split) => split,
        None => return Err(malformed(&entry.key())),
    };

    let mut node = tree;
    for segment in parents {
        let slot = node
            .entry(segment.clone())
            .or_insert_with(ConfigValue::empty_tree);
        if !slot.is_tree() {
            *slot = ConfigValue::empty_tree();
        }
        node = match slot {
            ConfigValue::Tree(subtree) => subtree,
            _ => unreachable!("intermediate segment was just made a tree"),
        };
    }

    if last == COMPONENT_KEY && entry.value.is_tree() {
        return Err(KilnError::UserError(format!(
            "Reserved key '{}' must hold a component path, not a mapping (in override '{}')",
            COMPONENT_KEY,
            entry.key()
        )));
    }

    match node.get_mut(last) {
        // Swapping the component of an instantiation: keep its kwargs.
        Some(ConfigValue::Tree(subtree))
            if !entry.value.is_tree() && subtree.contains_key(COMPONENT_KEY) =>
        {
            subtree.insert(COMPONENT_KEY, entry.value.clone());
        }
        _ => {
            node.insert(last.clone(), entry.value.clone());
        }
    }
    Ok(())
}

fn malformed(token: &str) -> KilnError {
    KilnError::UserError(format!(
        "Command-line overrides must be in the form of key=value (got '{}')",
        token
    ))
}

fn parse_literal(raw: &str) -> ConfigValue {
    if raw.is_empty() {
        return ConfigValue::Null;
    }
    serde_yaml::from_str(raw).unwrap_or_else(|_| ConfigValue::String(raw.to_string()))
}
