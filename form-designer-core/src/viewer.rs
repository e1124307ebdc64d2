//! Viewer lifecycle
//!
//! Owns the engine session for one container. The session follows the
//! component lifecycle: loaded on mount, reloaded when the document URL
//! changes, released on unmount.

use crate::engine::{ContainerRef, Engine, LoadRequest, UnloadTarget};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::mem;
use tracing::{debug, info, warn};

/// Inputs that decide what the viewer shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerProps {
    /// Document URL; also the document's identity
    pub document_url: String,
    /// Where the engine loads its assets from
    #[serde(default)]
    pub base_url: Option<String>,
}

impl ViewerProps {
    pub fn new(document_url: impl Into<String>) -> Self {
        Self {
            document_url: document_url.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Whether switching from `self` to `other` needs a reload
    pub fn is_same_document(&self, other: &ViewerProps) -> bool {
        self.document_url == other.document_url
    }
}

/// Where the viewer is in its load cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerState {
    Unloaded,
    Loading,
    Loaded,
}

/// Keeps one engine session in sync with the viewer props
pub struct ViewerLifecycleManager<E: Engine> {
    engine: E,
    container: ContainerRef,
    props: ViewerProps,
    session: Option<E::Session>,
    state: ViewerState,
}

impl<E: Engine> ViewerLifecycleManager<E> {
    pub fn new(engine: E, container: ContainerRef, props: ViewerProps) -> Self {
        Self {
            engine,
            container,
            props,
            session: None,
            state: ViewerState::Unloaded,
        }
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn props(&self) -> &ViewerProps {
        &self.props
    }

    pub fn container(&self) -> &ContainerRef {
        &self.container
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The active session, if a load has completed
    pub fn session(&self) -> Option<&E::Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut E::Session> {
        self.session.as_mut()
    }

    /// First load after the container is attached
    pub async fn mount(&mut self) -> Result<()> {
        self.load().await
    }

    /// Apply new props. Only a change of document URL reloads the viewer.
    pub async fn update(&mut self, next: ViewerProps) -> Result<()> {
        let previous = mem::replace(&mut self.props, next);

        if previous.is_same_document(&self.props) {
            return Ok(());
        }

        self.unload();
        self.load().await
    }

    /// Release the session before the container goes away
    pub fn unmount(&mut self) {
        self.unload();
    }

    /// Load the current document into the container, releasing any session
    /// still held first. A failed load leaves the viewer unloaded and returns
    /// the engine's error.
    pub async fn load(&mut self) -> Result<()> {
        if self.session.is_some() {
            self.unload();
        }

        info!("Loading {}", self.props.document_url);
        self.state = ViewerState::Loading;

        let request = LoadRequest {
            document: self.props.document_url.clone(),
            container: self.container.clone(),
            base_url: self.props.base_url.clone(),
        };

        match self.engine.load(request).await {
            Ok(session) => {
                self.session = Some(session);
                self.state = ViewerState::Loaded;
                info!(container = %self.container, "Successfully mounted viewer");
                Ok(())
            }
            Err(e) => {
                self.state = ViewerState::Unloaded;
                warn!("Loading {} failed: {}", self.props.document_url, e);
                Err(e)
            }
        }
    }

    /// Tear down the session, or the bare container when no load has
    /// completed. Safe to call repeatedly.
    pub fn unload(&mut self) {
        match self.session.take() {
            Some(session) => self.engine.unload(UnloadTarget::Session(session)),
            None => self.engine.unload(UnloadTarget::Container(&self.container)),
        }

        debug!(container = %self.container, "Unloaded viewer");
        self.state = ViewerState::Unloaded;
    }
}
