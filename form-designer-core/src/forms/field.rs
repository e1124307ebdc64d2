//! Form field definitions

use crate::annotations::AnnotationId;
use serde::{Deserialize, Serialize};

/// Kind of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Free text entry
    Text,
    /// Signature capture
    Signature,
}

/// Logical form field, linked to its widgets by annotation ID
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub kind: FieldKind,
    pub name: String,
    /// Widgets rendering this field, in order
    pub annotation_ids: Vec<AnnotationId>,
}

impl FormField {
    /// Create a text field with no widgets yet
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(FieldKind::Text, name)
    }

    /// Create a signature field with no widgets yet
    pub fn signature(name: impl Into<String>) -> Self {
        Self::new(FieldKind::Signature, name)
    }

    pub fn new(kind: FieldKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            annotation_ids: Vec::new(),
        }
    }

    /// Link a widget
    pub fn with_widget(mut self, id: AnnotationId) -> Self {
        self.annotation_ids.push(id);
        self
    }

    pub fn references(&self, id: &AnnotationId) -> bool {
        self.annotation_ids.contains(id)
    }
}
