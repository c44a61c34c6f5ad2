//! Component registry and dotted-path resolution.
//!
//! The framework addresses code objects from configs by fully qualified
//! dotted path (`kiln.models.llama2.llama2_7b`). Rust has no runtime import
//! machinery, so the namespace is a build-time registry: modules are dotted
//! namespaces, components are the symbols registered inside them. Resolution
//! finds the longest registered module prefix of a path and walks the
//! remaining segments as attribute lookups.
//!
//! Resolution is stateless and idempotent: repeated calls for the same path
//! return the same registry entry.

mod builtin;

#[cfg(test)]
mod tests;

use crate::config::{ConfigTree, ConfigValue, COMPONENT_KEY};
use crate::data::{ChatFormat, InstructTemplate};
use crate::error::{KilnError, LookupReason, Result};
use crate::models::ModelSpec;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

pub use builtin::builtin;

static IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex"));

/// Capability category a registered component satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// A model builder returning a [`ModelSpec`].
    Model,
    /// An instruct prompt template.
    InstructTemplate,
    /// A chat control-token format.
    ChatFormat,
}

impl ComponentKind {
    /// Category name as used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ComponentKind::Model => "Model",
            ComponentKind::InstructTemplate => "InstructTemplate",
            ComponentKind::ChatFormat => "ChatFormat",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The live object a registry entry points at.
#[derive(Clone, Copy)]
pub enum Target {
    /// An instruct template singleton.
    Template(&'static dyn InstructTemplate),
    /// A chat format singleton.
    Format(&'static dyn ChatFormat),
    /// A model builder function.
    Model(fn() -> ModelSpec),
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Template(_) => f.write_str("Target::Template"),
            Target::Format(_) => f.write_str("Target::Format"),
            Target::Model(_) => f.write_str("Target::Model"),
        }
    }
}

/// A resolvable symbol registered under a module.
#[derive(Debug)]
pub struct Component {
    path: String,
    kind: ComponentKind,
    target: Target,
}

impl Component {
    /// Fully qualified dotted path of this component.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Final path segment.
    pub fn name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    /// Capability category.
    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    /// The live object behind this entry.
    pub fn target(&self) -> Target {
        self.target
    }

    /// The instruct template, if this component is one.
    pub fn as_template(&self) -> Option<&'static dyn InstructTemplate> {
        match self.target {
            Target::Template(template) => Some(template),
            _ => None,
        }
    }

    /// The chat format, if this component is one.
    pub fn as_chat_format(&self) -> Option<&'static dyn ChatFormat> {
        match self.target {
            Target::Format(format) => Some(format),
            _ => None,
        }
    }

    /// The model builder, if this component is one.
    pub fn as_model_builder(&self) -> Option<fn() -> ModelSpec> {
        match self.target {
            Target::Model(builder) => Some(builder),
            _ => None,
        }
    }
}

/// A registered module: a dotted namespace holding components.
#[derive(Debug, Default)]
pub struct Module {
    path: String,
    components: BTreeMap<String, Component>,
}

impl Module {
    /// Fully qualified dotted path of this module.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Final path segment.
    pub fn name(&self) -> &str {
        self.path.rsplit('.').next().unwrap_or(&self.path)
    }

    /// Looks up a component by name.
    pub fn get(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    /// Iterates over the module's components.
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }
}

/// Outcome of a successful resolution.
#[derive(Debug)]
pub enum Resolved<'a> {
    /// The path named a registered module.
    Module(&'a Module),
    /// The path named a registered component.
    Component(&'a Component),
}

impl Resolved<'_> {
    /// Fully qualified dotted path of the resolved entry.
    pub fn path(&self) -> &str {
        match self {
            Resolved::Module(module) => module.path(),
            Resolved::Component(component) => component.path(),
        }
    }
}

/// A namespace of registered modules and components.
///
/// The framework's own components live in the [`builtin`] registry; tests and
/// embedders can assemble their own.
#[derive(Debug, Default)]
pub struct Registry {
    modules: BTreeMap<String, Module>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module (and any missing ancestor modules).
    ///
    /// Every dot-separated segment must be a valid identifier.
    pub fn register_module(&mut self, path: &str) -> Result<()> {
        let segments: Vec<&str> = path.split('.').collect();
        for segment in &segments {
            if !IDENT.is_match(segment) {
                return Err(KilnError::UserError(format!(
                    "Invalid module path '{}': segment '{}' is not an identifier",
                    path, segment
                )));
            }
        }

        // Importing a module makes its ancestors importable too.
        for depth in 1..=segments.len() {
            let prefix = segments[..depth].join(".");
            if self.component_registered(&prefix) {
                return Err(KilnError::UserError(format!(
                    "Cannot register module '{}': '{}' is already a component",
                    path, prefix
                )));
            }
            self.modules.entry(prefix.clone()).or_insert_with(|| Module {
                path: prefix,
                components: BTreeMap::new(),
            });
        }
        Ok(())
    }

    /// Registers a component inside a module.
    ///
    /// The module (and its ancestors) are created if missing. The component
    /// name must be a valid identifier, must not collide with an existing
    /// component or module, and the target must match the declared kind.
    pub fn register_component(
        &mut self,
        module: &str,
        name: &str,
        kind: ComponentKind,
        target: Target,
    ) -> Result<()> {
        if !IDENT.is_match(name) {
            return Err(KilnError::UserError(format!(
                "Invalid component name '{}': not an identifier",
                name
            )));
        }

        let consistent = matches!(
            (kind, &target),
            (ComponentKind::InstructTemplate, Target::Template(_))
                | (ComponentKind::ChatFormat, Target::Format(_))
                | (ComponentKind::Model, Target::Model(_))
        );
        if !consistent {
            return Err(KilnError::UserError(format!(
                "Component '{}.{}' declared as {} but its target is a different kind",
                module, name, kind
            )));
        }

        let path = format!("{}.{}", module, name);
        if self.modules.contains_key(&path) {
            return Err(KilnError::UserError(format!(
                "Cannot register component '{}': already a module",
                path
            )));
        }

        self.register_module(module)?;
        let owner = self
            .modules
            .get_mut(module)
            .ok_or_else(|| KilnError::UserError(format!("Unknown module '{}'", module)))?;
        if owner.components.contains_key(name) {
            return Err(KilnError::UserError(format!(
                "Component '{}' is already registered",
                path
            )));
        }
        owner
            .components
            .insert(name.to_string(), Component { path, kind, target });
        Ok(())
    }

    /// Iterates over registered modules in path order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    /// Resolves a fully qualified dotted path to a module or component.
    ///
    /// Paths starting with `.` are rejected: component references must be
    /// reproducible regardless of caller location, so relative addressing is
    /// not supported. A path with no dots must name a top-level module. For
    /// dotted paths, the longest registered module prefix wins and the
    /// remaining segments are attribute lookups; registered components are
    /// leaves.
    pub fn resolve(&self, path: &str) -> Result<Resolved<'_>> {
        if path.starts_with('.') {
            return Err(KilnError::RelativeImport {
                path: path.to_string(),
            });
        }
        if path.is_empty() {
            return Err(KilnError::ComponentNotFound {
                path: path.to_string(),
                reason: LookupReason::NoModule,
            });
        }

        let segments: Vec<&str> = path.split('.').collect();
        for depth in (1..=segments.len()).rev() {
            let prefix = segments[..depth].join(".");
            let Some(module) = self.modules.get(&prefix) else {
                continue;
            };

            let rest = &segments[depth..];
            if rest.is_empty() {
                debug!(%path, "resolved module");
                return Ok(Resolved::Module(module));
            }

            let Some(component) = module.get(rest[0]) else {
                return Err(KilnError::ComponentNotFound {
                    path: path.to_string(),
                    reason: LookupReason::MissingAttribute {
                        container: module.path.clone(),
                        attribute: rest[0].to_string(),
                    },
                });
            };
            if rest.len() > 1 {
                // Components are leaves; there is nothing deeper to walk.
                return Err(KilnError::ComponentNotFound {
                    path: path.to_string(),
                    reason: LookupReason::MissingAttribute {
                        container: component.path.clone(),
                        attribute: rest[1].to_string(),
                    },
                });
            }
            debug!(%path, module = %module.path, "resolved component");
            return Ok(Resolved::Component(component));
        }

        Err(KilnError::ComponentNotFound {
            path: path.to_string(),
            reason: LookupReason::NoModule,
        })
    }

    /// Resolves a path and checks it names a component of the expected kind.
    pub fn resolve_checked(&self, path: &str, kind: ComponentKind) -> Result<&Component> {
        match self.resolve(path)? {
            Resolved::Component(component) if component.kind == kind => Ok(component),
            Resolved::Component(component) => Err(KilnError::InvalidKind {
                expected: kind.name().to_string(),
                name: component.name().to_string(),
            }),
            Resolved::Module(module) => Err(KilnError::InvalidKind {
                expected: kind.name().to_string(),
                name: module.name().to_string(),
            }),
        }
    }

    fn component_registered(&self, path: &str) -> bool {
        let Some((module, name)) = path.rsplit_once('.') else {
            return false;
        };
        self.modules
            .get(module)
            .is_some_and(|m| m.components.contains_key(name))
    }
}

/// Resolves a path against the built-in registry.
pub fn resolve(path: &str) -> Result<Resolved<'static>> {
    builtin().resolve(path)
}

/// Resolves and kind-checks a path against the built-in registry.
pub fn resolve_checked(path: &str, kind: ComponentKind) -> Result<&'static Component> {
    builtin().resolve_checked(path, kind)
}

/// Looks up a built-in instruct template by bare class name.
///
/// Any name that does not resolve to a template under `kiln.data` is an
/// invalid class for the category, including names that do not exist at all.
pub fn instruct_template(name: &str) -> Result<&'static dyn InstructTemplate> {
    let component = lookup_data_component(name, ComponentKind::InstructTemplate)?;
    component.as_template().ok_or_else(|| KilnError::InvalidKind {
        expected: ComponentKind::InstructTemplate.name().to_string(),
        name: component.name().to_string(),
    })
}

/// Looks up a built-in chat format by bare class name.
///
/// Any name that does not resolve to a chat format under `kiln.data` is an
/// invalid class for the category, including names that do not exist at all.
pub fn chat_format(name: &str) -> Result<&'static dyn ChatFormat> {
    let component = lookup_data_component(name, ComponentKind::ChatFormat)?;
    component
        .as_chat_format()
        .ok_or_else(|| KilnError::InvalidKind {
            expected: ComponentKind::ChatFormat.name().to_string(),
            name: component.name().to_string(),
        })
}

fn lookup_data_component(name: &str, kind: ComponentKind) -> Result<&'static Component> {
    builtin()
        .resolve_checked(&format!("{}.{}", builtin::DATA_MODULE, name), kind)
        .map_err(|err| match err {
            KilnError::ComponentNotFound { .. } => KilnError::InvalidKind {
                expected: kind.name().to_string(),
                name: name.to_string(),
            },
            other => other,
        })
}

/// Walks a merged config tree and resolves every `_component_` reference
/// against `registry`. Returns the number of references resolved.
///
/// A marker must hold a string component path by the time a tree is
/// validated; anything else is a config-authoring mistake.
pub fn resolve_tree(registry: &Registry, tree: &ConfigTree) -> Result<usize> {
    let mut count = 0;
    let mut location = Vec::new();
    walk_tree(registry, tree, &mut location, &mut count)?;
    Ok(count)
}

fn walk_tree(
    registry: &Registry,
    tree: &ConfigTree,
    location: &mut Vec<String>,
    count: &mut usize,
) -> Result<()> {
    if let Some(value) = tree.get(COMPONENT_KEY) {
        let ConfigValue::String(path) = value else {
            return Err(KilnError::UserError(format!(
                "Reserved key '{}' at '{}' must hold a string component path",
                COMPONENT_KEY,
                join_location(location)
            )));
        };
        debug!(at = %join_location(location), component = %path, "resolving component reference");
        registry.resolve(path)?;
        *count += 1;
    }

    for (key, value) in tree {
        if let ConfigValue::Tree(subtree) = value {
            location.push(key.clone());
            walk_tree(registry, subtree, location, count)?;
            location.pop();
        }
    }
    Ok(())
}

fn join_location(location: &[String]) -> String {
    if location.is_empty() {
        "<root>".to_string()
    } else {
        location.join(".")
    }
}
