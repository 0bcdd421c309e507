//! # Page Editor
//!
//! Ties one editing session to the layout backend.
//!
//! ```text
//!   mount(selector) ──→ explicit id ─→ home layout ─→ default document
//!        │
//!        ▼
//!   BuilderStore  ←── every edit (no backend traffic)
//!        │
//!   save / begin_save ─→ update_layout (or create_layout for new pages)
//! ```
//!
//! ## Sessions
//!
//! Each mount starts a new session generation. A save ticket remembers the
//! generation it was issued in; when its response arrives after the user
//! switched layouts, the response is dropped instead of touching the new
//! session's state.

use crate::api::{Layout, LayoutApi, LayoutUpdate, PageType};
use crate::config::EditorConfig;
use crate::default_document::default_document;
use crate::error::{ApiError, WorkspaceError};
use shopfront_editor::{BuilderStore, DragController};
use shopfront_model::{Document, IdGenerator, Language};
use shopfront_registry::TypeRegistry;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Which layout to open
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutSelector {
    /// Layout id from navigation state
    pub layout_id: Option<String>,
}

impl LayoutSelector {
    pub fn explicit(layout_id: impl Into<String>) -> Self {
        Self {
            layout_id: Some(layout_id.into()),
        }
    }

    pub fn home() -> Self {
        Self::default()
    }
}

/// Where the mounted document came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedFrom {
    Explicit(String),
    Home(String),
    Default,
}

/// Snapshot captured for an in-flight save
#[derive(Debug, Clone)]
pub struct SaveTicket {
    generation: u64,
    layout_id: Option<String>,
    page_type: PageType,
    page_name: Option<String>,
    snapshot: Arc<Document>,
}

impl SaveTicket {
    pub fn snapshot(&self) -> &Arc<Document> {
        &self.snapshot
    }

    /// Send the captured document. Does not touch editor state.
    pub async fn send(&self, api: &dyn LayoutApi) -> Result<Layout, ApiError> {
        let document = (*self.snapshot).clone();
        match &self.layout_id {
            Some(id) => api.update_layout(id, LayoutUpdate::document(document)).await,
            None => {
                api.create_layout(self.page_type.clone(), document, self.page_name.clone())
                    .await
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Saved(Layout),

    /// Response belonged to a session that has since been replaced
    Stale,
}

pub struct PageEditor {
    api: Arc<dyn LayoutApi>,
    config: EditorConfig,
    store: BuilderStore,
    drag: DragController,
    language: Language,

    /// Layout backing the current document; `None` for unsaved pages
    layout: Option<Layout>,
    page_type: PageType,
    page_name: Option<String>,

    generation: u64,
    last_error: Option<String>,
}

impl PageEditor {
    pub fn new(api: Arc<dyn LayoutApi>, registry: Arc<TypeRegistry>, config: EditorConfig) -> Self {
        let store = BuilderStore::new(registry)
            .with_id_generator(IdGenerator::new(config.id_prefix.clone()))
            .with_undo_levels(config.undo_levels);

        Self {
            api,
            drag: DragController::with_activation_distance(config.drag_activation_distance),
            language: config.default_language,
            page_type: PageType::new(config.home_page_type.clone()),
            page_name: None,
            config,
            store,
            layout: None,
            generation: 0,
            last_error: None,
        }
    }

    // ---- accessors ----------------------------------------------------

    pub fn api(&self) -> Arc<dyn LayoutApi> {
        self.api.clone()
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &BuilderStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut BuilderStore {
        &mut self.store
    }

    pub fn drag(&mut self) -> &mut DragController {
        &mut self.drag
    }

    pub fn document(&self) -> Arc<Document> {
        self.store.document()
    }

    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    pub fn layout_id(&self) -> Option<&str> {
        self.layout.as_ref().map(|l| l.id.as_str())
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn is_dirty(&self) -> bool {
        self.store.is_dirty()
    }

    /// Message of the most recent backend failure, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn document_json(&self) -> Result<String, WorkspaceError> {
        Ok(self.store.document().to_json()?)
    }

    // ---- loading ------------------------------------------------------

    /// Open a layout. Never leaves the editor without a document: when
    /// nothing can be loaded the built-in default page is shown.
    #[instrument(skip(self), fields(shop_id = %self.config.shop_id))]
    pub async fn mount(&mut self, selector: LayoutSelector) -> LoadedFrom {
        self.generation += 1;
        self.drag.cancel();

        let resolved = match &selector.layout_id {
            Some(id) => self
                .api
                .get_layout(id)
                .await
                .map(|layout| Some((LoadedFrom::Explicit(layout.id.clone()), layout))),
            None => self.find_home_layout().await.map(|found| {
                found.map(|layout| (LoadedFrom::Home(layout.id.clone()), layout))
            }),
        };

        match resolved {
            Ok(Some((source, layout))) => {
                self.open_layout(layout);
                source
            }
            Ok(None) => {
                info!("No layout to open, using default document");
                self.open_default(PageType::new(self.config.home_page_type.clone()), None);
                LoadedFrom::Default
            }
            Err(err) => {
                warn!(error = %err, "Layout load failed, using default document");
                self.open_default(PageType::new(self.config.home_page_type.clone()), None);
                self.last_error = Some(err.to_string());
                LoadedFrom::Default
            }
        }
    }

    /// Switch to another persisted layout. Unsaved edits are discarded.
    pub async fn switch_layout(&mut self, layout_id: &str) -> LoadedFrom {
        if self.is_dirty() {
            info!(from = ?self.layout_id(), to = %layout_id, "Discarding unsaved edits");
        }
        self.mount(LayoutSelector::explicit(layout_id)).await
    }

    /// Start a new, not yet persisted page from the default document.
    /// The first save creates the layout.
    pub fn new_page(&mut self, page_type: PageType, page_name: Option<String>) {
        self.generation += 1;
        self.drag.cancel();
        self.open_default(page_type, page_name);
    }

    async fn find_home_layout(&self) -> Result<Option<Layout>, ApiError> {
        let layouts = self.api.list_layouts(&self.config.shop_id).await?;
        Ok(layouts
            .into_iter()
            .filter(|l| l.is_active && l.page_type.as_str() == self.config.home_page_type)
            .max_by(|a, b| a.updated_at.cmp(&b.updated_at)))
    }

    fn open_layout(&mut self, layout: Layout) {
        if let Err(err) = layout.document.validate() {
            warn!(layout_id = %layout.id, error = %err, "Layout document has structural problems");
        }
        info!(layout_id = %layout.id, version = layout.version, blocks = layout.document.len(), "Opened layout");

        self.store.load(layout.document.clone());
        self.page_type = layout.page_type.clone();
        self.page_name = layout.page_name.clone();
        self.layout = Some(layout);
        self.last_error = None;
    }

    fn open_default(&mut self, page_type: PageType, page_name: Option<String>) {
        let registry = self.store.registry().clone();
        let document = default_document(&registry, self.store.id_generator());
        self.store.load(document);
        self.page_type = page_type;
        self.page_name = page_name;
        self.layout = None;
        self.last_error = None;
    }

    // ---- saving -------------------------------------------------------

    /// Capture the current document for saving
    pub fn begin_save(&self) -> SaveTicket {
        SaveTicket {
            generation: self.generation,
            layout_id: self.layout_id().map(str::to_string),
            page_type: self.page_type.clone(),
            page_name: self.page_name.clone(),
            snapshot: self.store.document(),
        }
    }

    /// Apply a save response. Failures leave the document untouched.
    pub fn complete_save(
        &mut self,
        ticket: SaveTicket,
        result: Result<Layout, ApiError>,
    ) -> Result<SaveOutcome, WorkspaceError> {
        if ticket.generation != self.generation {
            debug!(
                ticket = ticket.generation,
                current = self.generation,
                "Ignoring save response from a previous session"
            );
            return Ok(SaveOutcome::Stale);
        }

        match result {
            Ok(layout) => {
                info!(layout_id = %layout.id, version = layout.version, "Saved layout");
                self.store.mark_saved(&ticket.snapshot);
                self.layout = Some(layout.clone());
                self.last_error = None;
                Ok(SaveOutcome::Saved(layout))
            }
            Err(err) => {
                error!(error = %err, "Failed to save layout");
                self.last_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Send the current document wholesale (update, or create for new pages)
    #[instrument(skip(self), fields(layout_id = ?self.layout_id()))]
    pub async fn save(&mut self) -> Result<SaveOutcome, WorkspaceError> {
        let ticket = self.begin_save();
        let api = self.api.clone();
        let result = ticket.send(api.as_ref()).await;
        self.complete_save(ticket, result)
    }

    /// Toggle whether the open layout is the one served for its page type
    pub async fn set_active(&mut self, is_active: bool) -> Result<(), WorkspaceError> {
        let id = self.layout_id().ok_or(WorkspaceError::NoLayout)?.to_string();
        let update = LayoutUpdate {
            is_active: Some(is_active),
            ..LayoutUpdate::default()
        };

        match self.api.update_layout(&id, update).await {
            Ok(layout) => {
                if let Some(current) = &mut self.layout {
                    current.is_active = layout.is_active;
                    current.version = layout.version;
                    current.updated_at = layout.updated_at;
                }
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                error!(layout_id = %id, error = %err, "Failed to update layout status");
                self.last_error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Delete the open layout and fall back to a fresh default page
    #[instrument(skip(self))]
    pub async fn delete_layout(&mut self) -> Result<(), WorkspaceError> {
        let id = self.layout_id().ok_or(WorkspaceError::NoLayout)?.to_string();

        if let Err(err) = self.api.delete_layout(&id).await {
            error!(layout_id = %id, error = %err, "Failed to delete layout");
            self.last_error = Some(err.to_string());
            return Err(err.into());
        }

        info!(layout_id = %id, "Deleted layout");
        let page_type = self.page_type.clone();
        self.new_page(page_type, None);
        Ok(())
    }
}

impl std::fmt::Debug for PageEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageEditor")
            .field("layout_id", &self.layout_id())
            .field("page_type", &self.page_type)
            .field("generation", &self.generation)
            .field("store", &self.store)
            .finish()
    }
}
