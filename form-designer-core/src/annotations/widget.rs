//! Widget annotation, the placeable part of a form field

use crate::annotations::{AnnotationId, Border, CustomData};
use crate::geometry::Rect;
use crate::graphics::Color;
use serde::{Deserialize, Serialize};

/// Widget annotation for a form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetAnnotation {
    pub id: AnnotationId,
    pub page_index: u32,
    /// Name of the form field this widget belongs to
    pub form_field_name: String,
    pub bounding_box: Rect,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Border>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<CustomData>,
}

impl WidgetAnnotation {
    /// Create a new widget with no border, fill or custom data
    pub fn new(
        id: AnnotationId,
        page_index: u32,
        form_field_name: impl Into<String>,
        bounding_box: Rect,
    ) -> Self {
        Self {
            id,
            page_index,
            form_field_name: form_field_name.into(),
            bounding_box,
            border: None,
            background_color: None,
            custom_data: None,
        }
    }

    /// Set border
    pub fn with_border(mut self, border: Border) -> Self {
        self.border = Some(border);
        self
    }

    /// Set background color
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    /// Set a single custom data entry, creating the map if needed
    pub fn with_custom_entry(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.custom_data
            .get_or_insert_with(CustomData::new)
            .insert(key.into(), value.into());
        self
    }

    /// Signer this widget is reserved for, if any
    pub fn for_signer(&self) -> Option<&str> {
        self.custom_data
            .as_ref()
            .and_then(|data| data.get("forSigner"))
            .and_then(|value| value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widget_creation() {
        let widget = WidgetAnnotation::new(
            AnnotationId::new("w1"),
            0,
            "form-field-abcde",
            Rect::new(30.0, 30.0, 225.0, 15.0),
        );

        assert_eq!(widget.form_field_name, "form-field-abcde");
        assert!(widget.border.is_none());
        assert!(widget.background_color.is_none());
        assert!(widget.for_signer().is_none());
    }

    #[test]
    fn test_widget_builders() {
        let widget = WidgetAnnotation::new(
            AnnotationId::new("w2"),
            1,
            "form-field-00000",
            Rect::new(0.0, 0.0, 10.0, 10.0),
        )
        .with_border(Border::thin_black())
        .with_background(Color::white())
        .with_custom_entry("forSigner", "landlord");

        assert_eq!(widget.border, Some(Border::thin_black()));
        assert_eq!(widget.background_color, Some(Color::white()));
        assert_eq!(widget.for_signer(), Some("landlord"));
    }

    #[test]
    fn test_widget_json_shape() {
        let widget = WidgetAnnotation::new(
            AnnotationId::new("w3"),
            4,
            "form-field-zzzzz",
            Rect::new(1.0, 2.0, 3.0, 4.0),
        );
        let json = serde_json::to_value(&widget).unwrap();

        assert_eq!(json["pageIndex"], 4);
        assert_eq!(json["formFieldName"], "form-field-zzzzz");
        assert!(json.get("customData").is_none());
        assert!(json.get("border").is_none());
    }
}
