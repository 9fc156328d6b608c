#![allow(dead_code)]

use adaptree::core::types::{TypeKey, Typed};
use adaptree::hierarchy::TypeCatalog;
use std::any::Any;
use std::sync::Arc;

/// Model value carried through adapters and factories in integration tests.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelObject {
    key: TypeKey,
    pub name: String,
}

impl ModelObject {
    pub fn new(key: impl Into<TypeKey>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
        }
    }
}

impl Typed for ModelObject {
    fn type_key(&self) -> TypeKey {
        self.key.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn model(key: &str, name: &str) -> ModelObject {
    ModelObject::new(key, name)
}

/// Workspace-shaped hierarchy: a solution containing projects, folders and
/// files, plus a couple of plain classes used as adapter outputs.
///
/// ```text
/// IItem <- IContainer <- ISolution, IProject
/// IItem <- IFile
/// Solution: ISolution, Project: IProject, CsProject: Project
/// Folder: IContainer, SourceFile: IFile
/// ```
pub fn workspace_catalog() -> Arc<TypeCatalog> {
    let catalog = TypeCatalog::builder()
        .interface("IItem")
        .interface_extends("IContainer", ["IItem"])
        .interface_extends("ISolution", ["IContainer"])
        .interface_extends("IProject", ["IContainer"])
        .interface_extends("IFile", ["IItem"])
        .class("Solution")
        .implements("Solution", ["ISolution"])
        .class("Project")
        .implements("Project", ["IProject"])
        .class_extends("CsProject", "Project")
        .class("Folder")
        .implements("Folder", ["IContainer"])
        .class("SourceFile")
        .implements("SourceFile", ["IFile"])
        .class("ProjectMetrics")
        .class("ItemBadge")
        .build()
        .expect("workspace catalog is valid");
    Arc::new(catalog)
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
