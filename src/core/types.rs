//! Shared identity types for catalogued runtime types.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;

/// Names a type registered in a type catalog.
///
/// Keys are compared by value; the catalog owns the metadata they point at.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeKey(String);

impl TypeKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeKey {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for TypeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Whether a catalogued type is a class or an interface.
///
/// Classes have at most one base class plus implemented interfaces;
/// interfaces have no base and only extend other interfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Class,
    Interface,
}

impl TypeKind {
    pub fn is_interface(&self) -> bool {
        matches!(self, TypeKind::Interface)
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Class => f.write_str("class"),
            TypeKind::Interface => f.write_str("interface"),
        }
    }
}

/// Implemented by model objects that expose their catalogued type at runtime.
///
/// This is the only requirement the engine places on model objects. Adapters
/// and factories that need the concrete value back go through [`Typed::as_any`].
pub trait Typed: Any {
    /// The catalogued runtime type of this instance.
    fn type_key(&self) -> TypeKey;

    /// Upcast so adapters can downcast to the concrete model type.
    fn as_any(&self) -> &dyn Any;
}
