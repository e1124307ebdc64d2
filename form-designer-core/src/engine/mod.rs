//! Boundary to the external viewing engine
//!
//! The engine owns rendering and the live document model. This crate only
//! needs to load a document into a container, tear it down again, and
//! submit new objects to a loaded instance.

pub mod memory;

use crate::annotations::{Annotation, AnnotationId};
use crate::error::Result;
use crate::forms::FormField;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;

pub use memory::{DocumentSnapshot, EngineEvent, MemoryEngine, MemorySession};

/// Opaque reference to the element the viewer is mounted into
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerRef(String);

impl ContainerRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Arguments of an engine load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Document URL, passed through untouched
    pub document: String,
    pub container: ContainerRef,
    pub base_url: Option<String>,
}

/// What the engine should tear down
#[derive(Debug)]
pub enum UnloadTarget<'a, S> {
    /// A loaded instance
    Session(S),
    /// Whatever is mounted in the container, possibly nothing
    Container(&'a ContainerRef),
}

/// An object submitted in a creation batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "object", rename_all = "camelCase")]
pub enum CreationObject {
    Annotation(Annotation),
    FormField(FormField),
}

impl CreationObject {
    pub fn as_annotation(&self) -> Option<&Annotation> {
        match self {
            CreationObject::Annotation(annotation) => Some(annotation),
            CreationObject::FormField(_) => None,
        }
    }

    pub fn as_form_field(&self) -> Option<&FormField> {
        match self {
            CreationObject::FormField(field) => Some(field),
            CreationObject::Annotation(_) => None,
        }
    }
}

impl From<Annotation> for CreationObject {
    fn from(annotation: Annotation) -> Self {
        CreationObject::Annotation(annotation)
    }
}

impl From<FormField> for CreationObject {
    fn from(field: FormField) -> Self {
        CreationObject::FormField(field)
    }
}

/// A live engine instance for one document in one container
pub trait Session {
    /// Page the user is currently looking at
    fn current_page_index(&self) -> u32;

    /// Fresh identifier from the engine's ID generator
    fn generate_id(&self) -> AnnotationId;

    /// Apply all objects as a single creation request
    fn create(&mut self, objects: Vec<CreationObject>) -> Result<()>;
}

/// The viewing engine
pub trait Engine {
    type Session: Session;

    /// Load a document into a container
    fn load(&self, request: LoadRequest) -> impl Future<Output = Result<Self::Session>>;

    /// Tear down an instance, or whatever occupies a container
    fn unload(&self, target: UnloadTarget<'_, Self::Session>);
}
