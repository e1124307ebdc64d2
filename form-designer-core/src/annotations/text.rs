//! Plain text annotation

use crate::annotations::AnnotationId;
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};

/// Text a freshly inserted text annotation shows until edited
pub const PLACEHOLDER_TEXT: &str = "Text Annotation";

/// Font size of inserted text annotations, in points
pub const DEFAULT_FONT_SIZE: f64 = 10.0;

/// Text annotation. Not linked to any form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnnotation {
    pub id: AnnotationId,
    pub page_index: u32,
    pub text: String,
    pub font_size: f64,
    pub bounding_box: Rect,
}

impl TextAnnotation {
    /// Create a text annotation with the placeholder text
    pub fn new(id: AnnotationId, page_index: u32, bounding_box: Rect) -> Self {
        Self {
            id,
            page_index,
            text: PLACEHOLDER_TEXT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            bounding_box,
        }
    }

    /// Set text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set font size
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }
}
