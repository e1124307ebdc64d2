//! Annotation insertion
//!
//! Turns a palette kind and an optional drop position into the objects the
//! engine has to create:
//!
//! | kind              | objects                 | size    | fill            |
//! |-------------------|-------------------------|---------|-----------------|
//! | `text-field`      | widget + text field     | 225x15  | light blue      |
//! | `signature-field` | widget + signature field| 225x30  | white           |
//! | `text-anno`       | text annotation         | 100x12  | none            |
//!
//! Field widgets get a 1pt solid black border and are reserved for a signer
//! through their custom data. The widget and its field share a generated
//! name and are submitted in the same creation request.

use crate::annotations::{
    Annotation, AnnotationId, Border, TextAnnotation, WidgetAnnotation, DEFAULT_FONT_SIZE,
    PLACEHOLDER_TEXT,
};
use crate::catalog::AnnotationKind;
use crate::engine::{CreationObject, Session};
use crate::error::Result;
use crate::forms::{FieldKind, FormField, FormFieldNameGenerator, FORM_FIELD_NAME_PREFIX};
use crate::geometry::{Position, Rect};
use crate::graphics::Color;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Signer that inserted fields are reserved for
pub const DEFAULT_SIGNER: &str = "landlord";

/// Tunable values used when building insertions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InsertionDefaults {
    /// Origin used when a gesture carries no position
    pub origin: Position,
    /// Value of `customData.forSigner` on field widgets
    pub signer: String,
    pub name_prefix: String,
    pub placeholder_text: String,
    pub font_size: f64,
}

impl Default for InsertionDefaults {
    fn default() -> Self {
        Self {
            origin: Position::default_origin(),
            signer: DEFAULT_SIGNER.to_string(),
            name_prefix: FORM_FIELD_NAME_PREFIX.to_string(),
            placeholder_text: PLACEHOLDER_TEXT.to_string(),
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl InsertionDefaults {
    /// Parse from JSON; missing keys keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Objects produced by one insertion, in submission order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InsertionBatch {
    objects: Vec<CreationObject>,
}

impl InsertionBatch {
    pub fn objects(&self) -> &[CreationObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The placed annotation (widget or text)
    pub fn annotation(&self) -> Option<&Annotation> {
        self.objects.iter().find_map(|o| o.as_annotation())
    }

    pub fn widget(&self) -> Option<&WidgetAnnotation> {
        self.annotation().and_then(|a| a.as_widget())
    }

    pub fn form_field(&self) -> Option<&FormField> {
        self.objects.iter().find_map(|o| o.as_form_field())
    }

    pub fn into_objects(self) -> Vec<CreationObject> {
        self.objects
    }
}

/// Everything an insertion needs besides the kind
#[derive(Debug, Clone)]
pub struct InsertionContext<'a> {
    pub origin: Position,
    pub page_index: u32,
    /// Name shared by the widget and its form field
    pub form_field_name: String,
    /// Engine-generated ID for the placed annotation
    pub annotation_id: AnnotationId,
    pub defaults: &'a InsertionDefaults,
}

/// Build the object set for `kind`. Pure: no engine access.
pub fn build_insertion(kind: AnnotationKind, ctx: InsertionContext<'_>) -> InsertionBatch {
    let bounding_box = Rect::from_origin_and_size(ctx.origin, kind.default_size());

    let objects = match kind {
        AnnotationKind::TextField => field_pair(
            FieldKind::Text,
            Color::field_blue(),
            bounding_box,
            ctx,
        ),
        AnnotationKind::SignatureField => field_pair(
            FieldKind::Signature,
            Color::white(),
            bounding_box,
            ctx,
        ),
        AnnotationKind::TextAnnotation => {
            let text = TextAnnotation::new(ctx.annotation_id, ctx.page_index, bounding_box)
                .with_text(ctx.defaults.placeholder_text.clone())
                .with_font_size(ctx.defaults.font_size);
            vec![Annotation::from(text).into()]
        }
    };

    InsertionBatch { objects }
}

fn field_pair(
    kind: FieldKind,
    background: Color,
    bounding_box: Rect,
    ctx: InsertionContext<'_>,
) -> Vec<CreationObject> {
    let widget = WidgetAnnotation::new(
        ctx.annotation_id,
        ctx.page_index,
        ctx.form_field_name.clone(),
        bounding_box,
    )
    .with_border(Border::thin_black())
    .with_background(background)
    .with_custom_entry("forSigner", ctx.defaults.signer.clone());

    // Link to the widget by its ID
    let field = FormField::new(kind, ctx.form_field_name).with_widget(widget.id.clone());

    vec![Annotation::from(widget).into(), field.into()]
}

/// Inserts palette annotations into a session
#[derive(Debug)]
pub struct AnnotationInserter {
    defaults: InsertionDefaults,
    names: FormFieldNameGenerator,
}

impl AnnotationInserter {
    pub fn new(defaults: InsertionDefaults) -> Self {
        let names = FormFieldNameGenerator::new(defaults.name_prefix.clone());
        Self { defaults, names }
    }

    /// Inserter with deterministic form-field names
    pub fn with_seed(defaults: InsertionDefaults, seed: u64) -> Self {
        let names = FormFieldNameGenerator::with_seed(defaults.name_prefix.clone(), seed);
        Self { defaults, names }
    }

    pub fn defaults(&self) -> &InsertionDefaults {
        &self.defaults
    }

    /// Build the objects for `kind` against the session's current state
    /// without submitting them.
    pub fn prepare<S: Session>(
        &mut self,
        session: &S,
        kind: AnnotationKind,
        position: Option<Position>,
    ) -> InsertionBatch {
        let form_field_name = self.names.next_name();
        let ctx = InsertionContext {
            origin: position.unwrap_or(self.defaults.origin),
            page_index: session.current_page_index(),
            form_field_name,
            annotation_id: session.generate_id(),
            defaults: &self.defaults,
        };
        build_insertion(kind, ctx)
    }

    /// Build and submit the objects for `kind` as a single creation request
    pub fn insert<S: Session>(
        &mut self,
        session: &mut S,
        kind: AnnotationKind,
        position: Option<Position>,
    ) -> Result<InsertionBatch> {
        let batch = self.prepare(session, kind, position);
        debug!(
            kind = %kind,
            subtype = ?batch.annotation().map(|a| a.annotation_type()),
            objects = batch.len(),
            origin = ?batch.annotation().map(|a| a.bounding_box().origin()),
            "Inserting annotation"
        );
        session.create(batch.objects.clone())?;
        Ok(batch)
    }

    /// Like [`insert`](Self::insert) but takes the raw kind token. Unknown
    /// tokens fail before the session is touched.
    pub fn insert_token<S: Session>(
        &mut self,
        session: &mut S,
        token: &str,
        position: Option<Position>,
    ) -> Result<InsertionBatch> {
        let kind = token.parse::<AnnotationKind>()?;
        self.insert(session, kind, position)
    }
}

impl Default for AnnotationInserter {
    fn default() -> Self {
        Self::new(InsertionDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::BorderStyle;

    fn ctx(defaults: &InsertionDefaults, origin: Position) -> InsertionContext<'_> {
        InsertionContext {
            origin,
            page_index: 3,
            form_field_name: "form-field-abc12".to_string(),
            annotation_id: AnnotationId::new("w1"),
            defaults,
        }
    }

    #[test]
    fn test_build_text_field() {
        let defaults = InsertionDefaults::default();
        let batch = build_insertion(
            AnnotationKind::TextField,
            ctx(&defaults, Position::new(100.0, 200.0)),
        );

        assert_eq!(batch.len(), 2);
        let widget = batch.widget().unwrap();
        assert_eq!(widget.bounding_box, Rect::new(100.0, 200.0, 225.0, 15.0));
        assert_eq!(widget.page_index, 3);
        assert_eq!(widget.form_field_name, "form-field-abc12");
        assert_eq!(widget.background_color, Some(Color::rgb(220, 240, 255)));
        let border = widget.border.unwrap();
        assert_eq!(border.width, 1.0);
        assert_eq!(border.style, BorderStyle::Solid);
        assert_eq!(border.color, Color::black());
        assert_eq!(widget.for_signer(), Some("landlord"));

        let field = batch.form_field().unwrap();
        assert_eq!(field.kind, FieldKind::Text);
        assert_eq!(field.name, "form-field-abc12");
        assert_eq!(field.annotation_ids, vec![AnnotationId::new("w1")]);
    }

    #[test]
    fn test_build_signature_field() {
        let defaults = InsertionDefaults::default();
        let batch = build_insertion(
            AnnotationKind::SignatureField,
            ctx(&defaults, defaults.origin),
        );

        let widget = batch.widget().unwrap();
        assert_eq!(widget.bounding_box, Rect::new(30.0, 30.0, 225.0, 30.0));
        assert_eq!(widget.background_color, Some(Color::white()));
        assert_eq!(batch.form_field().unwrap().kind, FieldKind::Signature);
    }

    #[test]
    fn test_build_text_annotation() {
        let defaults = InsertionDefaults::default();
        let batch = build_insertion(
            AnnotationKind::TextAnnotation,
            ctx(&defaults, defaults.origin),
        );

        assert_eq!(batch.len(), 1);
        assert!(batch.form_field().is_none());
        let annotation = batch.annotation().unwrap();
        assert!(annotation.custom_data().is_none());

        let text = annotation.as_text().unwrap();
        assert_eq!(text.bounding_box, Rect::new(30.0, 30.0, 100.0, 12.0));
        assert_eq!(text.text, "Text Annotation");
        assert_eq!(text.font_size, 10.0);
    }

    #[test]
    fn test_pair_is_widget_first() {
        let defaults = InsertionDefaults::default();
        let batch = build_insertion(AnnotationKind::TextField, ctx(&defaults, defaults.origin));

        assert!(batch.objects()[0].as_annotation().is_some());
        assert!(batch.objects()[1].as_form_field().is_some());
    }

    #[test]
    fn test_custom_defaults_flow_through() {
        let defaults = InsertionDefaults {
            origin: Position::new(5.0, 6.0),
            signer: "tenant".to_string(),
            placeholder_text: "Name".to_string(),
            font_size: 14.0,
            ..Default::default()
        };

        let field = build_insertion(AnnotationKind::TextField, ctx(&defaults, defaults.origin));
        assert_eq!(field.widget().unwrap().for_signer(), Some("tenant"));

        let text = build_insertion(AnnotationKind::TextAnnotation, ctx(&defaults, defaults.origin));
        let text = text.annotation().and_then(|a| a.as_text()).unwrap();
        assert_eq!(text.text, "Name");
        assert_eq!(text.font_size, 14.0);
        assert_eq!(text.bounding_box.origin(), Position::new(5.0, 6.0));
    }

    #[test]
    fn test_defaults_from_partial_json() {
        let defaults = InsertionDefaults::from_json_str(r#"{"signer": "tenant"}"#).unwrap();
        assert_eq!(defaults.signer, "tenant");
        assert_eq!(defaults.origin, Position::new(30.0, 30.0));
        assert_eq!(defaults.name_prefix, "form-field-");

        let defaults =
            InsertionDefaults::from_json_str(r#"{"origin": {"left": 1, "top": 2}}"#).unwrap();
        assert_eq!(defaults.origin, Position::new(1.0, 2.0));
    }

    #[test]
    fn test_defaults_from_invalid_json() {
        let err = InsertionDefaults::from_json_str("{\"fontSize\": \"big\"}").unwrap_err();
        assert!(matches!(err, crate::error::DesignerError::Config(_)));
    }
}
