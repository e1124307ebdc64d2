//! Form designer surface: the viewer plus the annotation palette

use crate::catalog::{AnnotationKind, InsertableAnnotationDescriptor, INSERTABLE_ANNOTATIONS};
use crate::engine::{ContainerRef, Engine};
use crate::error::{DesignerError, Result};
use crate::geometry::Position;
use crate::gesture::{ActivationEvent, DataTransfer, DragStartEvent, GestureTranslator};
use crate::insert::{AnnotationInserter, InsertionBatch, InsertionDefaults};
use crate::viewer::{ViewerLifecycleManager, ViewerProps, ViewerState};

/// A viewer with a palette of insertable annotations
pub struct FormDesigner<E: Engine> {
    viewer: ViewerLifecycleManager<E>,
    inserter: AnnotationInserter,
    gestures: GestureTranslator,
}

impl<E: Engine> FormDesigner<E> {
    pub fn new(engine: E, container: ContainerRef, props: ViewerProps) -> Self {
        Self::builder(engine, container, props).build()
    }

    pub fn builder(engine: E, container: ContainerRef, props: ViewerProps) -> FormDesignerBuilder<E> {
        FormDesignerBuilder {
            engine,
            container,
            props,
            defaults: InsertionDefaults::default(),
            gestures: GestureTranslator::default(),
            seed: None,
        }
    }

    /// The palette, in display order
    pub fn catalog(&self) -> &'static [InsertableAnnotationDescriptor] {
        &INSERTABLE_ANNOTATIONS
    }

    pub fn viewer(&self) -> &ViewerLifecycleManager<E> {
        &self.viewer
    }

    pub fn state(&self) -> ViewerState {
        self.viewer.state()
    }

    pub fn gestures(&self) -> GestureTranslator {
        self.gestures
    }

    pub async fn mount(&mut self) -> Result<()> {
        self.viewer.mount().await
    }

    pub async fn update(&mut self, props: ViewerProps) -> Result<()> {
        self.viewer.update(props).await
    }

    pub fn unmount(&mut self) {
        self.viewer.unmount();
    }

    /// Insert `kind` into the active session
    pub fn insert_annotation(
        &mut self,
        kind: AnnotationKind,
        position: Option<Position>,
    ) -> Result<InsertionBatch> {
        let session = self
            .viewer
            .session_mut()
            .ok_or(DesignerError::NoActiveSession)?;
        self.inserter.insert(session, kind, position)
    }

    pub fn handle_click(&mut self, event: &ActivationEvent) -> Result<InsertionBatch> {
        let session = self
            .viewer
            .session_mut()
            .ok_or(DesignerError::NoActiveSession)?;
        self.gestures.handle_click(&mut self.inserter, session, event)
    }

    pub fn handle_drag_start<T: DataTransfer + ?Sized>(
        &self,
        event: &mut DragStartEvent<'_, T>,
    ) -> Result<()> {
        self.gestures.handle_drag_start(event)
    }

    pub fn handle_drop<T: DataTransfer + ?Sized>(
        &mut self,
        data_transfer: &T,
        position: Position,
    ) -> Result<InsertionBatch> {
        let session = self
            .viewer
            .session_mut()
            .ok_or(DesignerError::NoActiveSession)?;
        self.gestures
            .handle_drop(&mut self.inserter, session, data_transfer, position)
    }
}

/// Builder for [`FormDesigner`]
pub struct FormDesignerBuilder<E: Engine> {
    engine: E,
    container: ContainerRef,
    props: ViewerProps,
    defaults: InsertionDefaults,
    gestures: GestureTranslator,
    seed: Option<u64>,
}

impl<E: Engine> FormDesignerBuilder<E> {
    pub fn defaults(mut self, defaults: InsertionDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn gestures(mut self, gestures: GestureTranslator) -> Self {
        self.gestures = gestures;
        self
    }

    /// Seed form-field name generation
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> FormDesigner<E> {
        let inserter = match self.seed {
            Some(seed) => AnnotationInserter::with_seed(self.defaults, seed),
            None => AnnotationInserter::new(self.defaults),
        };

        FormDesigner {
            viewer: ViewerLifecycleManager::new(self.engine, self.container, self.props),
            inserter,
            gestures: self.gestures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::MemoryEngine;

    #[test]
    fn test_insert_before_mount_fails() {
        let mut designer = FormDesigner::new(
            MemoryEngine::new(),
            ContainerRef::new("viewer"),
            ViewerProps::new("a.pdf"),
        );

        let err = designer
            .insert_annotation(AnnotationKind::TextField, None)
            .unwrap_err();
        assert!(matches!(err, DesignerError::NoActiveSession));
    }

    #[test]
    fn test_catalog_exposed() {
        let designer = FormDesigner::new(
            MemoryEngine::new(),
            ContainerRef::new("viewer"),
            ViewerProps::new("a.pdf"),
        );
        assert_eq!(designer.catalog().len(), 3);
        assert_eq!(designer.state(), ViewerState::Unloaded);
    }

    #[tokio::test]
    async fn test_click_inserts_into_mounted_document() {
        let engine = MemoryEngine::new();
        let container = ContainerRef::new("viewer");
        let mut designer =
            FormDesigner::builder(engine.clone(), container.clone(), ViewerProps::new("a.pdf"))
                .seed(3)
                .build();
        designer.mount().await.unwrap();

        let batch = designer
            .handle_click(&ActivationEvent::for_kind(AnnotationKind::TextField))
            .unwrap();

        let document = engine.document(&container).unwrap();
        assert_eq!(document.object_count(), 2);
        assert_eq!(
            document.form_fields[0].name,
            batch.form_field().unwrap().name
        );
    }
}
