//! Declarative catalog loading from TOML or JSON.
//!
//! A catalog file is a list of type declarations. Classes may carry `base`
//! and `implements`, interfaces may carry `extends`:
//!
//! ```toml
//! [[types]]
//! name = "IItem"
//! kind = "interface"
//!
//! [[types]]
//! name = "Project"
//! kind = "class"
//! implements = ["IItem"]
//! ```

use crate::core::errors::{Error, Result};
use crate::core::types::TypeKind;
use crate::hierarchy::catalog::TypeCatalog;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One declared type as it appears in a catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeSpec {
    pub name: String,
    pub kind: TypeKind,
    /// Base class, classes only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Directly-declared interfaces, classes only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<String>,
    /// Directly-extended super-interfaces, interfaces only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
}

/// Root of a catalog file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSpec {
    #[serde(default)]
    pub types: Vec<TypeSpec>,
}

impl CatalogSpec {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Validate field usage against each declaration's kind, then build.
    pub fn into_catalog(self) -> Result<TypeCatalog> {
        let mut violations: Vec<String> = Vec::new();
        for spec in &self.types {
            match spec.kind {
                TypeKind::Class => {
                    if !spec.extends.is_empty() {
                        violations.push(format!(
                            "class `{}` uses `extends`; classes declare interfaces via `implements`",
                            spec.name
                        ));
                    }
                }
                TypeKind::Interface => {
                    if spec.base.is_some() {
                        violations.push(format!(
                            "interface `{}` declares a base class",
                            spec.name
                        ));
                    }
                    if !spec.implements.is_empty() {
                        violations.push(format!(
                            "interface `{}` uses `implements`; interfaces extend via `extends`",
                            spec.name
                        ));
                    }
                }
            }
        }
        if !violations.is_empty() {
            return Err(Error::catalog(violations.join("; ")));
        }

        let mut builder = TypeCatalog::builder();
        for spec in self.types {
            builder = match spec.kind {
                TypeKind::Class => {
                    let declared = match spec.base {
                        Some(base) => builder.class_extends(spec.name.clone(), base),
                        None => builder.class(spec.name.clone()),
                    };
                    declared.implements(spec.name, spec.implements)
                }
                TypeKind::Interface => builder.interface_extends(spec.name, spec.extends),
            };
        }
        builder.build()
    }
}

/// Load and build a catalog from a `.toml` or `.json` file.
pub fn load_catalog_from_path(path: &Path) -> Result<TypeCatalog> {
    let content = std::fs::read_to_string(path)?;
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let spec = match extension {
        "toml" => CatalogSpec::from_toml_str(&content),
        "json" => CatalogSpec::from_json_str(&content),
        other => Err(Error::catalog(format!(
            "unsupported catalog format `{other}` for {}",
            path.display()
        ))),
    }?;
    log::debug!(
        "loaded {} type declarations from {}",
        spec.types.len(),
        path.display()
    );
    spec.into_catalog()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const PETS_TOML: &str = indoc! {r#"
        [[types]]
        name = "IPet"
        kind = "interface"

        [[types]]
        name = "Animal"
        kind = "class"

        [[types]]
        name = "Dog"
        kind = "class"
        base = "Animal"
        implements = ["IPet"]
    "#};

    #[test]
    fn test_toml_catalog() {
        let catalog = CatalogSpec::from_toml_str(PETS_TOML)
            .unwrap()
            .into_catalog()
            .unwrap();
        assert_eq!(catalog.len(), 3);
        assert!(catalog.is_assignable(&"Dog".into(), &"IPet".into()));
        assert!(catalog.is_assignable(&"Dog".into(), &"Animal".into()));
    }

    #[test]
    fn test_json_catalog() {
        let json = indoc! {r#"
            {
              "types": [
                { "name": "IShape", "kind": "interface" },
                { "name": "IPolygon", "kind": "interface", "extends": ["IShape"] }
              ]
            }
        "#};
        let catalog = CatalogSpec::from_json_str(json)
            .unwrap()
            .into_catalog()
            .unwrap();
        assert!(catalog.is_assignable(&"IPolygon".into(), &"IShape".into()));
    }

    #[test]
    fn test_class_with_extends_rejected() {
        let toml = indoc! {r#"
            [[types]]
            name = "IPet"
            kind = "interface"

            [[types]]
            name = "Dog"
            kind = "class"
            extends = ["IPet"]
        "#};
        let err = CatalogSpec::from_toml_str(toml)
            .unwrap()
            .into_catalog()
            .unwrap_err();
        assert!(err.to_string().contains("class `Dog` uses `extends`"));
    }

    #[test]
    fn test_interface_with_base_rejected() {
        let toml = indoc! {r#"
            [[types]]
            name = "Animal"
            kind = "class"

            [[types]]
            name = "IPet"
            kind = "interface"
            base = "Animal"
        "#};
        let err = CatalogSpec::from_toml_str(toml)
            .unwrap()
            .into_catalog()
            .unwrap_err();
        assert!(err
            .to_string()
            .contains("interface `IPet` declares a base class"));
    }

    #[test]
    fn test_interface_with_implements_rejected() {
        let toml = indoc! {r#"
            [[types]]
            name = "IShape"
            kind = "interface"

            [[types]]
            name = "IPolygon"
            kind = "interface"
            implements = ["IShape"]
        "#};
        let err = CatalogSpec::from_toml_str(toml)
            .unwrap()
            .into_catalog()
            .unwrap_err();
        assert!(err.to_string().contains("interface `IPolygon` uses `implements`"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let toml = indoc! {r#"
            [[types]]
            name = "Animal"
            kind = "class"
            parent = "Thing"
        "#};
        assert!(CatalogSpec::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_empty_spec_builds_empty_catalog() {
        let catalog = CatalogSpec::default().into_catalog().unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_load_from_path_picks_format() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("catalog.toml");
        std::fs::write(&toml_path, PETS_TOML).unwrap();
        let catalog = load_catalog_from_path(&toml_path).unwrap();
        assert_eq!(catalog.len(), 3);

        let yaml_path = dir.path().join("catalog.yaml");
        std::fs::write(&yaml_path, "types: []").unwrap();
        let err = load_catalog_from_path(&yaml_path).unwrap_err();
        assert!(err.to_string().contains("unsupported catalog format"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_catalog_from_path(Path::new("/nonexistent/catalog.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
