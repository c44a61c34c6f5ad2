//! Tests for the component registry and dotted-path resolution.

use crate::config::ConfigTree;
use crate::data::ChatFormat;
use crate::error::{KilnError, LookupReason};
use crate::models::llama2;
use crate::registry::{
    builtin, chat_format, instruct_template, resolve, resolve_checked, resolve_tree,
    ComponentKind, Registry, Resolved, Target,
};

fn tree(yaml: &str) -> ConfigTree {
    ConfigTree::from_yaml(yaml).expect("fixture YAML parses")
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn resolve_good_paths() {
    // A single segment, a module dotpath, and a component dotpath.
    for path in ["kiln", "kiln.models", "kiln.models.llama2.llama2_7b"] {
        let resolved = resolve(path).unwrap();
        assert_eq!(resolved.path(), path);
    }
}

#[test]
fn resolve_returns_component_entries() {
    let Resolved::Component(component) = resolve("kiln.models.llama2.llama2_7b").unwrap() else {
        panic!("expected a component");
    };
    assert_eq!(component.name(), "llama2_7b");
    assert_eq!(component.kind(), ComponentKind::Model);

    let builder = component.as_model_builder().expect("model target");
    assert_eq!(builder(), llama2::llama2_7b());
}

#[test]
fn resolve_returns_module_entries() {
    let Resolved::Module(module) = resolve("kiln.data").unwrap() else {
        panic!("expected a module");
    };
    assert_eq!(module.path(), "kiln.data");
    assert!(module.get("AlpacaInstructTemplate").is_some());
}

#[test]
fn resolve_is_idempotent() {
    let first = resolve_checked("kiln.data.AlpacaInstructTemplate", ComponentKind::InstructTemplate)
        .unwrap();
    let second = resolve_checked("kiln.data.AlpacaInstructTemplate", ComponentKind::InstructTemplate)
        .unwrap();
    assert!(std::ptr::eq(first, second));
}

#[test]
fn resolve_relative_path_fails() {
    let err = resolve(".test").unwrap_err();
    assert!(matches!(err, KilnError::RelativeImport { .. }));
    assert!(err.to_string().starts_with("Relative imports are not supported"));

    // Regardless of what follows the dot.
    assert!(matches!(
        resolve(".kiln.models").unwrap_err(),
        KilnError::RelativeImport { .. }
    ));
}

#[test]
fn resolve_unknown_attribute_echoes_full_path() {
    let err = resolve("kiln.models.dummy").unwrap_err();
    assert!(err.to_string().contains("Error loading 'kiln.models.dummy'"));
    match err {
        KilnError::ComponentNotFound { reason, .. } => assert_eq!(
            reason,
            LookupReason::MissingAttribute {
                container: "kiln.models".to_string(),
                attribute: "dummy".to_string(),
            }
        ),
        other => panic!("expected ComponentNotFound, got {other:?}"),
    }
}

#[test]
fn resolve_unknown_root_reports_no_module() {
    let err = resolve("torch.nn.Linear").unwrap_err();
    assert!(err.to_string().contains("Error loading 'torch.nn.Linear'"));
    match err {
        KilnError::ComponentNotFound { reason, .. } => {
            assert_eq!(reason, LookupReason::NoModule)
        }
        other => panic!("expected ComponentNotFound, got {other:?}"),
    }
}

#[test]
fn resolve_past_a_component_fails() {
    // Components are leaves; an attribute chain cannot continue through one.
    let err = resolve("kiln.data.AlpacaInstructTemplate.extra").unwrap_err();
    assert!(err
        .to_string()
        .contains("Error loading 'kiln.data.AlpacaInstructTemplate.extra'"));
}

#[test]
fn resolve_empty_path_fails() {
    assert!(matches!(
        resolve("").unwrap_err(),
        KilnError::ComponentNotFound { .. }
    ));
}

// ============================================================================
// Kind checking
// ============================================================================

#[test]
fn resolve_checked_accepts_matching_kind() {
    let component =
        resolve_checked("kiln.data.Llama2ChatFormat", ComponentKind::ChatFormat).unwrap();
    assert_eq!(component.name(), "Llama2ChatFormat");
    assert!(component.as_chat_format().is_some());
}

#[test]
fn resolve_checked_rejects_wrong_kind() {
    let err = resolve_checked("kiln.data.Llama2ChatFormat", ComponentKind::InstructTemplate)
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid InstructTemplate class 'Llama2ChatFormat'"
    );
}

#[test]
fn resolve_checked_rejects_modules() {
    let err = resolve_checked("kiln.data", ComponentKind::Model).unwrap_err();
    assert_eq!(err.to_string(), "Invalid Model class 'data'");
}

#[test]
fn instruct_template_lookup_by_name() {
    let template = instruct_template("AlpacaInstructTemplate").unwrap();
    let prompt = template.format(&tree("instruction: Say hi.\n")).unwrap();
    assert!(prompt.contains("Say hi."));
}

#[test]
fn instruct_template_unknown_name_is_invalid_class() {
    let err = instruct_template("InvalidTemplate").unwrap_err();
    assert_eq!(err.to_string(), "Invalid InstructTemplate class 'InvalidTemplate'");
}

#[test]
fn chat_format_lookup_by_name() {
    let format = chat_format("Llama2ChatFormat").unwrap();
    assert_eq!(format.format(None, "hi").unwrap(), "[INST] hi [/INST] ");
}

#[test]
fn chat_format_rejects_template_name() {
    let err = chat_format("AlpacaInstructTemplate").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid ChatFormat class 'AlpacaInstructTemplate'"
    );
}

// ============================================================================
// Registration
// ============================================================================

#[derive(Debug)]
struct NullFormat;

impl ChatFormat for NullFormat {
    fn format(&self, _system: Option<&str>, user: &str) -> crate::error::Result<String> {
        Ok(user.to_string())
    }
}

static NULL_FORMAT: NullFormat = NullFormat;

#[test]
fn register_component_creates_ancestor_modules() {
    let mut registry = Registry::new();
    registry
        .register_component(
            "lab.formats",
            "NullFormat",
            ComponentKind::ChatFormat,
            Target::Format(&NULL_FORMAT),
        )
        .unwrap();

    assert!(matches!(registry.resolve("lab").unwrap(), Resolved::Module(_)));
    assert!(matches!(
        registry.resolve("lab.formats").unwrap(),
        Resolved::Module(_)
    ));
    assert!(matches!(
        registry.resolve("lab.formats.NullFormat").unwrap(),
        Resolved::Component(_)
    ));
}

#[test]
fn register_component_rejects_duplicates() {
    let mut registry = Registry::new();
    registry
        .register_component(
            "lab",
            "NullFormat",
            ComponentKind::ChatFormat,
            Target::Format(&NULL_FORMAT),
        )
        .unwrap();
    let err = registry
        .register_component(
            "lab",
            "NullFormat",
            ComponentKind::ChatFormat,
            Target::Format(&NULL_FORMAT),
        )
        .unwrap_err();
    assert!(err.to_string().contains("already registered"));
}

#[test]
fn register_component_rejects_kind_target_mismatch() {
    let mut registry = Registry::new();
    let err = registry
        .register_component(
            "lab",
            "NullFormat",
            ComponentKind::Model,
            Target::Format(&NULL_FORMAT),
        )
        .unwrap_err();
    assert!(err.to_string().contains("different kind"));
}

#[test]
fn register_rejects_non_identifier_segments() {
    let mut registry = Registry::new();
    assert!(registry.register_module("lab.bad-name").is_err());
    assert!(registry.register_module("lab..formats").is_err());
    assert!(registry
        .register_component(
            "lab",
            "bad name",
            ComponentKind::ChatFormat,
            Target::Format(&NULL_FORMAT),
        )
        .is_err());
}

#[test]
fn module_and_component_names_cannot_collide() {
    let mut registry = Registry::new();
    registry
        .register_component(
            "lab",
            "NullFormat",
            ComponentKind::ChatFormat,
            Target::Format(&NULL_FORMAT),
        )
        .unwrap();
    let err = registry.register_module("lab.NullFormat").unwrap_err();
    assert!(err.to_string().contains("already a component"));

    let mut registry = Registry::new();
    registry.register_module("lab.formats").unwrap();
    let err = registry
        .register_component(
            "lab",
            "formats",
            ComponentKind::ChatFormat,
            Target::Format(&NULL_FORMAT),
        )
        .unwrap_err();
    assert!(err.to_string().contains("already a module"));
}

// ============================================================================
// Tree walking
// ============================================================================

#[test]
fn resolve_tree_counts_component_references() {
    let config = tree(
        "model:\n  _component_: kiln.models.llama2.llama2_7b\n  max_seq_len: 2048\n\
         template:\n  _component_: kiln.data.AlpacaInstructTemplate\n\
         epochs: 3\n",
    );
    assert_eq!(resolve_tree(builtin(), &config).unwrap(), 2);
}

#[test]
fn resolve_tree_finds_nested_references() {
    let config = tree(
        "dataset:\n  source: files\n  template:\n    _component_: kiln.data.SummarizeTemplate\n",
    );
    assert_eq!(resolve_tree(builtin(), &config).unwrap(), 1);
}

#[test]
fn resolve_tree_surfaces_lookup_errors() {
    let config = tree("model:\n  _component_: kiln.models.dummy\n");
    let err = resolve_tree(builtin(), &config).unwrap_err();
    assert!(err.to_string().contains("Error loading 'kiln.models.dummy'"));
}

#[test]
fn resolve_tree_rejects_non_string_marker() {
    let config = tree("model:\n  _component_: 5\n");
    let err = resolve_tree(builtin(), &config).unwrap_err();
    assert!(matches!(err, KilnError::UserError(_)));
    assert!(err.to_string().contains("'model'"));
    assert!(err.to_string().contains("string component path"));
}

#[test]
fn resolve_tree_accepts_trees_without_markers() {
    let config = tree("optimizer:\n  lr: 0.001\n");
    assert_eq!(resolve_tree(builtin(), &config).unwrap(), 0);
}
