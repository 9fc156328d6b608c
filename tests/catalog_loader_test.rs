mod common;

use adaptree::adapter::{AdaptedValue, AdapterRegistry, AdapterService};
use adaptree::core::types::Typed;
use adaptree::hierarchy::{load_catalog_from_path, CatalogSpec};
use common::model;
use indoc::indoc;
use pretty_assertions::assert_eq;
use std::sync::Arc;

const WORKSPACE_TOML: &str = indoc! {r#"
    [[types]]
    name = "IItem"
    kind = "interface"

    [[types]]
    name = "IContainer"
    kind = "interface"
    extends = ["IItem"]

    [[types]]
    name = "IProject"
    kind = "interface"
    extends = ["IContainer"]

    [[types]]
    name = "Project"
    kind = "class"
    implements = ["IProject"]

    [[types]]
    name = "CsProject"
    kind = "class"
    base = "Project"

    [[types]]
    name = "Summary"
    kind = "class"
"#};

#[test]
fn toml_file_loads_into_a_working_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("workspace.toml");
    std::fs::write(&path, WORKSPACE_TOML).unwrap();

    let catalog = load_catalog_from_path(&path).unwrap();
    let stats = catalog.stats();
    assert_eq!(stats.types, 6);
    assert_eq!(stats.classes, 3);
    assert_eq!(stats.interfaces, 3);
    assert!(catalog.is_assignable(&"CsProject".into(), &"IItem".into()));
    assert!(!catalog.is_assignable(&"Summary".into(), &"IItem".into()));
}

#[test]
fn json_and_toml_declarations_build_the_same_catalog() {
    let json = indoc! {r#"
        {
          "types": [
            { "name": "IItem", "kind": "interface" },
            { "name": "IContainer", "kind": "interface", "extends": ["IItem"] },
            { "name": "IProject", "kind": "interface", "extends": ["IContainer"] },
            { "name": "Project", "kind": "class", "implements": ["IProject"] },
            { "name": "CsProject", "kind": "class", "base": "Project" },
            { "name": "Summary", "kind": "class" }
          ]
        }
    "#};
    let from_toml = CatalogSpec::from_toml_str(WORKSPACE_TOML)
        .unwrap()
        .into_catalog()
        .unwrap();
    let from_json = CatalogSpec::from_json_str(json)
        .unwrap()
        .into_catalog()
        .unwrap();

    assert_eq!(from_toml.stats(), from_json.stats());
    let toml_keys: Vec<_> = from_toml.keys().cloned().collect();
    let json_keys: Vec<_> = from_json.keys().cloned().collect();
    assert_eq!(toml_keys, json_keys);
    for key in &toml_keys {
        assert_eq!(
            from_toml.is_assignable(key, &"IItem".into()),
            from_json.is_assignable(key, &"IItem".into()),
            "{key}"
        );
    }
}

#[test]
fn declared_cycle_is_rejected_at_build() {
    let toml = indoc! {r#"
        [[types]]
        name = "IA"
        kind = "interface"
        extends = ["IB"]

        [[types]]
        name = "IB"
        kind = "interface"
        extends = ["IA"]
    "#};
    let err = CatalogSpec::from_toml_str(toml)
        .unwrap()
        .into_catalog()
        .unwrap_err();
    assert!(err.to_string().contains("cyclic type declaration"));
}

#[test]
fn dangling_reference_names_the_offender() {
    let toml = indoc! {r#"
        [[types]]
        name = "Project"
        kind = "class"
        implements = ["IGhost"]
    "#};
    let err = CatalogSpec::from_toml_str(toml)
        .unwrap()
        .into_catalog()
        .unwrap_err();
    assert!(err
        .to_string()
        .contains("`Project` declares `IGhost` which is not registered"));
}

#[test]
fn loaded_catalog_drives_adapter_resolution() {
    let catalog = Arc::new(
        CatalogSpec::from_toml_str(WORKSPACE_TOML)
            .unwrap()
            .into_catalog()
            .unwrap(),
    );
    let registry = AdapterRegistry::builder()
        .register("IProject", "Summary", |value: &dyn Typed| {
            Ok(Some(
                Box::new(format!("summary of {}", value.type_key())) as AdaptedValue
            ))
        })
        .build(catalog)
        .unwrap();
    let service = AdapterService::new(Arc::new(registry));
    let summary: String = service
        .adapt_as(&model("CsProject", "core"), &"Summary".into())
        .unwrap()
        .unwrap();
    assert_eq!(summary, "summary of CsProject");
}
