//! Annotations the designer places on a page
//!
//! Widgets are the visual half of a form field; text annotations stand
//! alone and carry fixed text.

mod annotation;
mod text;
mod widget;

pub use annotation::{
    Annotation, AnnotationId, AnnotationType, Border, BorderStyle, CustomData,
};
pub use text::{TextAnnotation, DEFAULT_FONT_SIZE, PLACEHOLDER_TEXT};
pub use widget::WidgetAnnotation;
