//! # form-designer
//!
//! Palette-driven placement of form fields on a PDF shown by an external
//! viewing engine.
//!
//! ## Features
//!
//! - **Insertable annotations**: text labels, text fields and signature fields
//! - **Linked objects**: every field widget is created together with its form
//!   field, sharing a generated name
//! - **Viewer lifecycle**: load on mount, reload on document change, unload on
//!   unmount
//! - **Gestures**: click-to-insert and drag-and-drop with negotiated payload
//!   formats
//! - **In-memory engine**: a complete [`Engine`] implementation for tests and
//!   tooling
//!
//! ## Quick Start
//!
//! ```rust
//! use form_designer::engine::{ContainerRef, MemoryEngine};
//! use form_designer::{AnnotationKind, FormDesigner, Position, Result, ViewerProps};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<()> {
//! let engine = MemoryEngine::new();
//! let container = ContainerRef::new("viewer");
//! let mut designer = FormDesigner::new(engine.clone(), container.clone(), ViewerProps::new("lease.pdf"));
//!
//! designer.mount().await?;
//!
//! // Signature field dropped at (100, 200)
//! let batch = designer.insert_annotation(
//!     AnnotationKind::SignatureField,
//!     Some(Position::new(100.0, 200.0)),
//! )?;
//! assert_eq!(batch.len(), 2);
//!
//! designer.unmount();
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - The palette of insertable annotations
//! - [`insert`] - Building and submitting insertions
//! - [`viewer`] - Viewer lifecycle management
//! - [`gesture`] - Click and drag-and-drop translation
//! - [`engine`] - Engine boundary and the in-memory engine
//! - [`annotations`], [`forms`] - The objects that get created

pub mod annotations;
pub mod catalog;
pub mod designer;
pub mod engine;
pub mod error;
pub mod forms;
pub mod geometry;
pub mod gesture;
pub mod graphics;
pub mod insert;
pub mod viewer;

pub use annotations::{Annotation, AnnotationId, TextAnnotation, WidgetAnnotation};
pub use catalog::{AnnotationKind, InsertableAnnotationDescriptor, INSERTABLE_ANNOTATIONS};
pub use designer::{FormDesigner, FormDesignerBuilder};
pub use engine::{CreationObject, Engine, Session};
pub use error::{DesignerError, Result};
pub use forms::{FieldKind, FormField};
pub use geometry::{Position, Rect, Size};
pub use graphics::Color;
pub use insert::{build_insertion, AnnotationInserter, InsertionBatch, InsertionDefaults};
pub use viewer::{ViewerLifecycleManager, ViewerProps, ViewerState};

/// Current version of form-designer
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_catalog_kinds_parse_back() {
        for descriptor in INSERTABLE_ANNOTATIONS.iter() {
            let kind: AnnotationKind = descriptor.kind.as_str().parse().unwrap();
            assert_eq!(kind, descriptor.kind);
        }
    }
}
