//! Base annotation types shared by widgets and text annotations

use crate::annotations::{TextAnnotation, WidgetAnnotation};
use crate::geometry::Rect;
use crate::graphics::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-form metadata attached to an annotation, stored by the engine as JSON
pub type CustomData = serde_json::Map<String, serde_json::Value>;

/// Identifier handed out by the engine's ID generator
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnnotationId(String);

impl AnnotationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Annotation subtypes this crate creates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationType {
    /// Text annotation holding fixed, non-editable text
    Text,
    /// Widget annotation (visual part of a form field)
    Widget,
}

/// Border style type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    #[default]
    Solid,
}

/// Border drawn around a widget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub color: Color,
    /// Width in points
    pub width: f64,
    pub style: BorderStyle,
}

impl Border {
    /// 1pt solid black, the border every inserted field gets
    pub fn thin_black() -> Self {
        Self {
            color: Color::black(),
            width: 1.0,
            style: BorderStyle::Solid,
        }
    }
}

impl Default for Border {
    fn default() -> Self {
        Self::thin_black()
    }
}

/// Any annotation that can be submitted to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Annotation {
    Widget(WidgetAnnotation),
    Text(TextAnnotation),
}

impl Annotation {
    pub fn id(&self) -> &AnnotationId {
        match self {
            Annotation::Widget(widget) => &widget.id,
            Annotation::Text(text) => &text.id,
        }
    }

    pub fn annotation_type(&self) -> AnnotationType {
        match self {
            Annotation::Widget(_) => AnnotationType::Widget,
            Annotation::Text(_) => AnnotationType::Text,
        }
    }

    pub fn page_index(&self) -> u32 {
        match self {
            Annotation::Widget(widget) => widget.page_index,
            Annotation::Text(text) => text.page_index,
        }
    }

    pub fn bounding_box(&self) -> Rect {
        match self {
            Annotation::Widget(widget) => widget.bounding_box,
            Annotation::Text(text) => text.bounding_box,
        }
    }

    pub fn custom_data(&self) -> Option<&CustomData> {
        match self {
            Annotation::Widget(widget) => widget.custom_data.as_ref(),
            Annotation::Text(_) => None,
        }
    }

    pub fn as_widget(&self) -> Option<&WidgetAnnotation> {
        match self {
            Annotation::Widget(widget) => Some(widget),
            Annotation::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextAnnotation> {
        match self {
            Annotation::Text(text) => Some(text),
            Annotation::Widget(_) => None,
        }
    }
}

impl From<WidgetAnnotation> for Annotation {
    fn from(widget: WidgetAnnotation) -> Self {
        Annotation::Widget(widget)
    }
}

impl From<TextAnnotation> for Annotation {
    fn from(text: TextAnnotation) -> Self {
        Annotation::Text(text)
    }
}
