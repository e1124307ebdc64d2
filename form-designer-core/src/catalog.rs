//! The palette of annotations a user can place on the document

use crate::error::{DesignerError, Result};
use crate::geometry::Size;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Annotation kinds offered by the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnnotationKind {
    /// Non-editable text label
    #[serde(rename = "text-anno")]
    TextAnnotation,
    /// Text form field the signer fills in
    #[serde(rename = "text-field")]
    TextField,
    /// Signature form field
    #[serde(rename = "signature-field")]
    SignatureField,
}

impl AnnotationKind {
    pub const ALL: [AnnotationKind; 3] = [
        AnnotationKind::TextAnnotation,
        AnnotationKind::TextField,
        AnnotationKind::SignatureField,
    ];

    /// Token carried in element metadata and drag payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            AnnotationKind::TextAnnotation => "text-anno",
            AnnotationKind::TextField => "text-field",
            AnnotationKind::SignatureField => "signature-field",
        }
    }

    /// Bounding box size of a freshly inserted annotation
    pub fn default_size(&self) -> Size {
        match self {
            AnnotationKind::TextAnnotation => Size::new(100.0, 12.0),
            AnnotationKind::TextField => Size::new(225.0, 15.0),
            AnnotationKind::SignatureField => Size::new(225.0, 30.0),
        }
    }

    /// Whether inserting this kind also creates a form field
    pub fn is_form_field(&self) -> bool {
        !matches!(self, AnnotationKind::TextAnnotation)
    }
}

impl FromStr for AnnotationKind {
    type Err = DesignerError;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "text-anno" => Ok(AnnotationKind::TextAnnotation),
            "text-field" => Ok(AnnotationKind::TextField),
            "signature-field" => Ok(AnnotationKind::SignatureField),
            other => Err(DesignerError::UnknownAnnotationKind(other.to_string())),
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InsertableAnnotationDescriptor {
    #[serde(rename = "type")]
    pub kind: AnnotationKind,
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

impl InsertableAnnotationDescriptor {
    /// Path of the palette icon served with the designer's static assets
    pub fn icon_path(&self) -> String {
        format!("/form-designer/static/{}.svg", self.icon)
    }
}

/// The palette, in display order
pub const INSERTABLE_ANNOTATIONS: [InsertableAnnotationDescriptor; 3] = [
    InsertableAnnotationDescriptor {
        kind: AnnotationKind::TextAnnotation,
        label: "Text (Non-Editable)",
        description: "Use a plain text annotation to fill out the blanks above the form (double-click to set the text in advance)",
        icon: "anno_text",
    },
    InsertableAnnotationDescriptor {
        kind: AnnotationKind::TextField,
        label: "Text",
        description: "Use a text field to allow the signer to fill out the name and date sections within the form area",
        icon: "form_text",
    },
    InsertableAnnotationDescriptor {
        kind: AnnotationKind::SignatureField,
        label: "Signature",
        description: "Use a signature field to allow the signer to fill out the signature section within the form area",
        icon: "form_signature",
    },
];

/// Look up the palette entry for a kind
pub fn descriptor(kind: AnnotationKind) -> &'static InsertableAnnotationDescriptor {
    match kind {
        AnnotationKind::TextAnnotation => &INSERTABLE_ANNOTATIONS[0],
        AnnotationKind::TextField => &INSERTABLE_ANNOTATIONS[1],
        AnnotationKind::SignatureField => &INSERTABLE_ANNOTATIONS[2],
    }
}
