//! In-memory engine
//!
//! Keeps loaded documents as plain object lists. Used by the CLI and the
//! test suites; it enforces the same linkage rules a real viewer applies
//! when objects are created, but renders nothing.

use crate::annotations::{Annotation, AnnotationId};
use crate::engine::{ContainerRef, CreationObject, Engine, LoadRequest, Session, UnloadTarget};
use crate::error::{DesignerError, Result};
use crate::forms::FormField;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::rc::Rc;
use tracing::debug;

/// How an unload call addressed its target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnloadedBy {
    Session(u64),
    Container(ContainerRef),
}

/// Calls observed by the engine, in order
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Load {
        document: String,
        container: ContainerRef,
    },
    Unload {
        target: UnloadedBy,
        /// Whether an instance was actually torn down
        released: bool,
    },
    Create {
        instance: u64,
        objects: usize,
        at: DateTime<Utc>,
    },
}

/// State of one loaded document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSnapshot {
    pub document: String,
    pub base_url: Option<String>,
    pub container: ContainerRef,
    pub current_page_index: u32,
    pub annotations: Vec<Annotation>,
    pub form_fields: Vec<FormField>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl DocumentSnapshot {
    fn new(request: LoadRequest) -> Self {
        Self {
            document: request.document,
            base_url: request.base_url,
            container: request.container,
            current_page_index: 0,
            annotations: Vec::new(),
            form_fields: Vec::new(),
            last_modified: None,
        }
    }

    pub fn annotation(&self, id: &AnnotationId) -> Option<&Annotation> {
        self.annotations.iter().find(|a| a.id() == id)
    }

    pub fn form_field(&self, name: &str) -> Option<&FormField> {
        self.form_fields.iter().find(|f| f.name == name)
    }

    pub fn object_count(&self) -> usize {
        self.annotations.len() + self.form_fields.len()
    }

    /// Reject a batch that would break ID uniqueness, name uniqueness or
    /// widget linkage. Nothing is applied when this fails.
    fn check_batch(&self, objects: &[CreationObject]) -> Result<()> {
        if objects.is_empty() {
            return Err(DesignerError::CreationRejected(
                "empty creation batch".to_string(),
            ));
        }

        let mut ids: HashSet<&AnnotationId> = self.annotations.iter().map(|a| a.id()).collect();
        let mut names: HashSet<&str> = self.form_fields.iter().map(|f| f.name.as_str()).collect();
        let mut widgets: HashMap<&AnnotationId, &str> = self
            .annotations
            .iter()
            .filter_map(|a| a.as_widget())
            .map(|w| (&w.id, w.form_field_name.as_str()))
            .collect();

        for object in objects {
            match object {
                CreationObject::Annotation(annotation) => {
                    if !ids.insert(annotation.id()) {
                        return Err(DesignerError::CreationRejected(format!(
                            "duplicate annotation id {}",
                            annotation.id()
                        )));
                    }
                    if let Some(widget) = annotation.as_widget() {
                        widgets.insert(&widget.id, widget.form_field_name.as_str());
                    }
                }
                CreationObject::FormField(field) => {
                    if !names.insert(field.name.as_str()) {
                        return Err(DesignerError::CreationRejected(format!(
                            "duplicate form field name {}",
                            field.name
                        )));
                    }
                }
            }
        }

        for field in objects.iter().filter_map(|o| o.as_form_field()) {
            for id in &field.annotation_ids {
                match widgets.get(id) {
                    Some(owner) if *owner == field.name => {}
                    Some(owner) => {
                        return Err(DesignerError::CreationRejected(format!(
                            "widget {id} belongs to {owner}, not {}",
                            field.name
                        )))
                    }
                    None => {
                        return Err(DesignerError::CreationRejected(format!(
                            "form field {} references unknown widget {id}",
                            field.name
                        )))
                    }
                }
            }
        }

        Ok(())
    }
}

#[derive(Debug, Default)]
struct EngineState {
    next_instance: u64,
    next_object_id: u64,
    instances: HashMap<u64, DocumentSnapshot>,
    mounted: HashMap<ContainerRef, u64>,
    failing_documents: HashSet<String>,
    events: Vec<EngineEvent>,
}

/// Engine keeping every document in memory. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryEngine {
    inner: Rc<RefCell<EngineState>>,
}

impl MemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every later load of `document` fail
    pub fn fail_loads_for(&self, document: impl Into<String>) {
        self.inner
            .borrow_mut()
            .failing_documents
            .insert(document.into());
    }

    pub fn events(&self) -> Vec<EngineEvent> {
        self.inner.borrow().events.clone()
    }

    pub fn load_count(&self) -> usize {
        self.count_events(|e| matches!(e, EngineEvent::Load { .. }))
    }

    pub fn unload_count(&self) -> usize {
        self.count_events(|e| matches!(e, EngineEvent::Unload { .. }))
    }

    fn count_events(&self, predicate: impl Fn(&EngineEvent) -> bool) -> usize {
        self.inner.borrow().events.iter().filter(|e| predicate(e)).count()
    }

    /// Snapshot of the document mounted in `container`
    pub fn document(&self, container: &ContainerRef) -> Option<DocumentSnapshot> {
        let state = self.inner.borrow();
        state
            .mounted
            .get(container)
            .and_then(|id| state.instances.get(id))
            .cloned()
    }

    pub fn is_mounted(&self, container: &ContainerRef) -> bool {
        self.inner.borrow().mounted.contains_key(container)
    }

    fn open(&self, request: LoadRequest) -> Result<MemorySession> {
        let mut state = self.inner.borrow_mut();
        state.events.push(EngineEvent::Load {
            document: request.document.clone(),
            container: request.container.clone(),
        });

        if request.document.trim().is_empty() {
            return Err(DesignerError::InvalidDocument(request.document));
        }
        if state.failing_documents.contains(&request.document) {
            return Err(DesignerError::LoadFailed {
                document: request.document,
                reason: "document could not be opened".to_string(),
            });
        }
        if state.mounted.contains_key(&request.container) {
            return Err(DesignerError::ContainerInUse(request.container.to_string()));
        }

        state.next_instance += 1;
        let instance = state.next_instance;
        debug!(instance, document = %request.document, "Opened document");

        state.mounted.insert(request.container.clone(), instance);
        state.instances.insert(instance, DocumentSnapshot::new(request));

        Ok(MemorySession {
            instance,
            engine: self.clone(),
        })
    }
}

impl Engine for MemoryEngine {
    type Session = MemorySession;

    fn load(&self, request: LoadRequest) -> impl Future<Output = Result<MemorySession>> {
        let engine = self.clone();
        async move { engine.open(request) }
    }

    fn unload(&self, target: UnloadTarget<'_, MemorySession>) {
        let mut state = self.inner.borrow_mut();
        let (instance, target) = match target {
            UnloadTarget::Session(session) => {
                (Some(session.instance), UnloadedBy::Session(session.instance))
            }
            UnloadTarget::Container(container) => (
                state.mounted.get(container).copied(),
                UnloadedBy::Container(container.clone()),
            ),
        };

        let released = match instance.and_then(|id| state.instances.remove(&id)) {
            Some(document) => {
                state.mounted.remove(&document.container);
                debug!(document = %document.document, "Released document");
                true
            }
            None => false,
        };

        state.events.push(EngineEvent::Unload { target, released });
    }
}

/// Handle to a document loaded in a [`MemoryEngine`]
#[derive(Debug)]
pub struct MemorySession {
    instance: u64,
    engine: MemoryEngine,
}

impl MemorySession {
    pub fn instance(&self) -> u64 {
        self.instance
    }

    /// Simulate the user paging through the document
    pub fn set_current_page_index(&self, page_index: u32) {
        if let Some(document) = self
            .engine
            .inner
            .borrow_mut()
            .instances
            .get_mut(&self.instance)
        {
            document.current_page_index = page_index;
        }
    }

    /// Current document state, or `None` once unloaded
    pub fn snapshot(&self) -> Option<DocumentSnapshot> {
        self.engine
            .inner
            .borrow()
            .instances
            .get(&self.instance)
            .cloned()
    }
}

impl Session for MemorySession {
    fn current_page_index(&self) -> u32 {
        self.engine
            .inner
            .borrow()
            .instances
            .get(&self.instance)
            .map_or(0, |document| document.current_page_index)
    }

    fn generate_id(&self) -> AnnotationId {
        let mut state = self.engine.inner.borrow_mut();
        state.next_object_id += 1;
        AnnotationId::new(format!("anno-{:06}", state.next_object_id))
    }

    fn create(&mut self, objects: Vec<CreationObject>) -> Result<()> {
        let mut state = self.engine.inner.borrow_mut();
        let state = &mut *state;
        let document = state.instances.get_mut(&self.instance).ok_or_else(|| {
            DesignerError::CreationRejected(format!("instance {} is not loaded", self.instance))
        })?;

        document.check_batch(&objects)?;

        let count = objects.len();
        let now = Utc::now();
        for object in objects {
            match object {
                CreationObject::Annotation(annotation) => document.annotations.push(annotation),
                CreationObject::FormField(field) => document.form_fields.push(field),
            }
        }
        document.last_modified = Some(now);

        state.events.push(EngineEvent::Create {
            instance: self.instance,
            objects: count,
            at: now,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::{TextAnnotation, WidgetAnnotation};
    use crate::geometry::Rect;

    fn request(document: &str, container: &str) -> LoadRequest {
        LoadRequest {
            document: document.to_string(),
            container: ContainerRef::new(container),
            base_url: None,
        }
    }

    fn widget(session: &MemorySession, name: &str) -> WidgetAnnotation {
        WidgetAnnotation::new(session.generate_id(), 0, name, Rect::new(0.0, 0.0, 10.0, 10.0))
    }

    #[tokio::test]
    async fn test_load_and_unload_by_session() {
        let engine = MemoryEngine::new();
        let session = engine.load(request("a.pdf", "viewer")).await.unwrap();
        let container = ContainerRef::new("viewer");

        assert!(engine.is_mounted(&container));
        assert_eq!(engine.document(&container).unwrap().document, "a.pdf");

        let instance = session.instance();
        engine.unload(UnloadTarget::Session(session));
        assert!(!engine.is_mounted(&container));
        assert_eq!(
            engine.events().last(),
            Some(&EngineEvent::Unload {
                target: UnloadedBy::Session(instance),
                released: true,
            })
        );
    }

    #[tokio::test]
    async fn test_unload_empty_container_is_noop() {
        let engine = MemoryEngine::new();
        let container = ContainerRef::new("viewer");

        engine.unload(UnloadTarget::Container(&container));
        engine.unload(UnloadTarget::Container(&container));

        assert_eq!(engine.unload_count(), 2);
        assert!(engine.events().iter().all(|e| matches!(
            e,
            EngineEvent::Unload { released: false, .. }
        )));
    }

    #[tokio::test]
    async fn test_unload_by_container_releases_instance() {
        let engine = MemoryEngine::new();
        let _session = engine.load(request("a.pdf", "viewer")).await.unwrap();
        let container = ContainerRef::new("viewer");

        engine.unload(UnloadTarget::Container(&container));
        assert!(!engine.is_mounted(&container));
    }

    #[tokio::test]
    async fn test_load_errors() {
        let engine = MemoryEngine::new();
        engine.fail_loads_for("broken.pdf");

        let err = engine.load(request("  ", "viewer")).await.unwrap_err();
        assert!(matches!(err, DesignerError::InvalidDocument(_)));

        let err = engine.load(request("broken.pdf", "viewer")).await.unwrap_err();
        assert!(matches!(err, DesignerError::LoadFailed { .. }));

        let _session = engine.load(request("a.pdf", "viewer")).await.unwrap();
        let err = engine.load(request("b.pdf", "viewer")).await.unwrap_err();
        assert!(matches!(err, DesignerError::ContainerInUse(_)));

        assert_eq!(engine.load_count(), 4);
    }

    #[tokio::test]
    async fn test_generated_ids_are_unique() {
        let engine = MemoryEngine::new();
        let session = engine.load(request("a.pdf", "viewer")).await.unwrap();

        let ids: HashSet<_> = (0..100).map(|_| session.generate_id()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[tokio::test]
    async fn test_create_linked_pair() {
        let engine = MemoryEngine::new();
        let mut session = engine.load(request("a.pdf", "viewer")).await.unwrap();

        let widget = widget(&session, "form-field-aaaaa");
        let field = FormField::text("form-field-aaaaa").with_widget(widget.id.clone());
        session
            .create(vec![Annotation::from(widget).into(), field.into()])
            .unwrap();

        let snapshot = session.snapshot().unwrap();
        assert_eq!(snapshot.object_count(), 2);
        assert!(snapshot.form_field("form-field-aaaaa").is_some());
        assert!(snapshot.last_modified.is_some());
        assert!(matches!(
            engine.events().last(),
            Some(EngineEvent::Create { objects: 2, .. })
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_dangling_widget_reference() {
        let engine = MemoryEngine::new();
        let mut session = engine.load(request("a.pdf", "viewer")).await.unwrap();

        let field = FormField::signature("form-field-bbbbb").with_widget(session.generate_id());
        let err = session.create(vec![field.into()]).unwrap_err();

        assert!(matches!(err, DesignerError::CreationRejected(_)));
        assert_eq!(session.snapshot().unwrap().object_count(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_mismatched_owner() {
        let engine = MemoryEngine::new();
        let mut session = engine.load(request("a.pdf", "viewer")).await.unwrap();

        let widget = widget(&session, "form-field-ccccc");
        let field = FormField::text("form-field-ddddd").with_widget(widget.id.clone());
        let err = session
            .create(vec![Annotation::from(widget).into(), field.into()])
            .unwrap_err();

        assert!(err.to_string().contains("belongs to"));
        assert_eq!(session.snapshot().unwrap().object_count(), 0);
    }

    #[tokio::test]
    async fn test_create_rejects_duplicates_atomically() {
        let engine = MemoryEngine::new();
        let mut session = engine.load(request("a.pdf", "viewer")).await.unwrap();

        let text = TextAnnotation::new(session.generate_id(), 0, Rect::new(0.0, 0.0, 1.0, 1.0));
        session.create(vec![Annotation::from(text.clone()).into()]).unwrap();

        let fresh = TextAnnotation::new(session.generate_id(), 0, Rect::new(0.0, 0.0, 1.0, 1.0));
        let err = session
            .create(vec![Annotation::from(fresh).into(), Annotation::from(text).into()])
            .unwrap_err();

        assert!(err.to_string().contains("duplicate annotation id"));
        assert_eq!(session.snapshot().unwrap().object_count(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_empty_batch_and_unloaded_instance() {
        let engine = MemoryEngine::new();
        let mut session = engine.load(request("a.pdf", "viewer")).await.unwrap();
        assert!(session.create(Vec::new()).is_err());

        engine.unload(UnloadTarget::Container(&ContainerRef::new("viewer")));
        let text = TextAnnotation::new(session.generate_id(), 0, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert!(session.create(vec![Annotation::from(text).into()]).is_err());
        assert!(session.snapshot().is_none());
    }

    #[tokio::test]
    async fn test_current_page_index() {
        let engine = MemoryEngine::new();
        let session = engine.load(request("a.pdf", "viewer")).await.unwrap();

        assert_eq!(session.current_page_index(), 0);
        session.set_current_page_index(5);
        assert_eq!(session.current_page_index(), 5);
    }
}
