//! Palette gestures
//!
//! A click on a palette button inserts at the default origin. Dragging a
//! button stores its annotation type in the drag payload so the drop target
//! can insert at the drop location.

use crate::catalog::AnnotationKind;
use crate::engine::Session;
use crate::error::{DesignerError, Result};
use crate::geometry::Position;
use crate::insert::{AnnotationInserter, InsertionBatch};
use std::collections::HashMap;
use tracing::debug;

/// Payload format most platforms accept
pub const STANDARD_PAYLOAD_FORMAT: &str = "text/plain";

/// Payload format for platforms that only accept the short name
pub const LEGACY_PAYLOAD_FORMAT: &str = "text";

/// Drop effect advertised by a drag source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropEffect {
    None,
    Copy,
    Move,
    Link,
}

/// Platform drag-and-drop payload
pub trait DataTransfer {
    /// Whether the platform accepts payloads under `format`
    fn supports_format(&self, format: &str) -> bool;

    fn set_data(&mut self, format: &str, data: &str);

    fn get_data(&self, format: &str) -> Option<String>;

    fn set_drop_effect(&mut self, effect: DropEffect);
}

/// What the platform's drag-and-drop supports, probed once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragCapabilities {
    payload_format: &'static str,
    drop_effect: bool,
}

impl DragCapabilities {
    pub const fn standard() -> Self {
        Self {
            payload_format: STANDARD_PAYLOAD_FORMAT,
            drop_effect: true,
        }
    }

    pub const fn legacy() -> Self {
        Self {
            payload_format: LEGACY_PAYLOAD_FORMAT,
            drop_effect: false,
        }
    }

    /// Pick the profile matching what `transfer` accepts
    pub fn probe<T: DataTransfer + ?Sized>(transfer: &T) -> Self {
        if transfer.supports_format(STANDARD_PAYLOAD_FORMAT) {
            Self::standard()
        } else {
            Self::legacy()
        }
    }

    /// The negotiated payload format
    pub fn payload_format(&self) -> &'static str {
        self.payload_format
    }

    pub fn supports_drop_effect(&self) -> bool {
        self.drop_effect
    }
}

impl Default for DragCapabilities {
    fn default() -> Self {
        Self::standard()
    }
}

/// Activation of a palette button
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivationEvent {
    /// Element metadata, e.g. `annotation-type`
    pub dataset: HashMap<String, String>,
}

impl ActivationEvent {
    pub fn for_kind(kind: AnnotationKind) -> Self {
        let mut dataset = HashMap::new();
        dataset.insert(ANNOTATION_TYPE_KEY.to_string(), kind.as_str().to_string());
        Self { dataset }
    }

    /// Annotation type token attached to the activated element
    pub fn annotation_type(&self) -> Option<&str> {
        self.dataset.get(ANNOTATION_TYPE_KEY).map(String::as_str)
    }
}

/// Metadata key holding the annotation type token
pub const ANNOTATION_TYPE_KEY: &str = "annotation-type";

/// Start of a drag from a palette button
#[derive(Debug)]
pub struct DragStartEvent<'a, T: ?Sized> {
    pub source: ActivationEvent,
    pub data_transfer: &'a mut T,
    propagation_stopped: bool,
}

impl<'a, T: DataTransfer + ?Sized> DragStartEvent<'a, T> {
    pub fn new(source: ActivationEvent, data_transfer: &'a mut T) -> Self {
        Self {
            source,
            data_transfer,
            propagation_stopped: false,
        }
    }

    /// Keep ancestors from handling this drag as well
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Translates palette gestures into insertions
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureTranslator {
    capabilities: DragCapabilities,
}

impl GestureTranslator {
    pub fn new(capabilities: DragCapabilities) -> Self {
        Self { capabilities }
    }

    pub fn capabilities(&self) -> DragCapabilities {
        self.capabilities
    }

    /// Insert the clicked kind at the default origin
    pub fn handle_click<S: Session>(
        &self,
        inserter: &mut AnnotationInserter,
        session: &mut S,
        event: &ActivationEvent,
    ) -> Result<InsertionBatch> {
        let token = event
            .annotation_type()
            .ok_or(DesignerError::MissingAnnotationType)?;
        inserter.insert_token(session, token, None)
    }

    /// Store the dragged kind in the payload
    pub fn handle_drag_start<T: DataTransfer + ?Sized>(
        &self,
        event: &mut DragStartEvent<'_, T>,
    ) -> Result<()> {
        let token = event
            .source
            .annotation_type()
            .ok_or(DesignerError::MissingAnnotationType)?
            .to_string();

        if self.capabilities.supports_drop_effect() {
            event.data_transfer.set_drop_effect(DropEffect::Copy);
        }
        event
            .data_transfer
            .set_data(self.capabilities.payload_format(), &token);
        event.stop_propagation();

        debug!(kind = %token, format = self.capabilities.payload_format(), "Drag started");
        Ok(())
    }

    /// Insert the dragged kind at the drop location
    pub fn handle_drop<S: Session, T: DataTransfer + ?Sized>(
        &self,
        inserter: &mut AnnotationInserter,
        session: &mut S,
        data_transfer: &T,
        position: Position,
    ) -> Result<InsertionBatch> {
        let token = data_transfer
            .get_data(self.capabilities.payload_format())
            .filter(|token| !token.is_empty())
            .ok_or(DesignerError::MissingAnnotationType)?;
        inserter.insert_token(session, &token, Some(position))
    }
}

/// In-memory payload, for tests and non-browser front ends
#[derive(Debug, Clone, Default)]
pub struct MemoryDataTransfer {
    accepted_formats: Option<Vec<String>>,
    data: HashMap<String, String>,
    drop_effect: Option<DropEffect>,
}

impl MemoryDataTransfer {
    /// Payload accepting any format
    pub fn new() -> Self {
        Self::default()
    }

    /// Payload accepting only the listed formats
    pub fn accepting(formats: &[&str]) -> Self {
        Self {
            accepted_formats: Some(formats.iter().map(|f| f.to_string()).collect()),
            ..Self::default()
        }
    }

    pub fn drop_effect(&self) -> Option<DropEffect> {
        self.drop_effect
    }
}

impl DataTransfer for MemoryDataTransfer {
    fn supports_format(&self, format: &str) -> bool {
        self.accepted_formats
            .as_ref()
            .map_or(true, |formats| formats.iter().any(|f| f == format))
    }

    fn set_data(&mut self, format: &str, data: &str) {
        if self.supports_format(format) {
            self.data.insert(format.to_string(), data.to_string());
        }
    }

    fn get_data(&self, format: &str) -> Option<String> {
        self.data.get(format).cloned()
    }

    fn set_drop_effect(&mut self, effect: DropEffect) {
        self.drop_effect = Some(effect);
    }
}
