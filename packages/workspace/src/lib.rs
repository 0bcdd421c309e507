//! # Shopfront Workspace
//!
//! Session orchestration for the page builder: which layout to open, when to
//! talk to the backend and what happens to local edits around those calls.
//!
//! The only backend traffic is the initial load, explicit saves and layout
//! switches. Everything else happens in the [`shopfront_editor::BuilderStore`].

mod api;
mod config;
mod default_document;
mod error;
mod memory;
mod page;

pub use api::{ApiResult, Layout, LayoutApi, LayoutUpdate, PageType};
pub use config::{EditorConfig, DEFAULT_CONFIG_NAME};
pub use default_document::{default_document, DEFAULT_SECTIONS};
pub use error::{ApiError, WorkspaceError};
pub use memory::InMemoryLayoutApi;
pub use page::{LayoutSelector, LoadedFrom, PageEditor, SaveOutcome, SaveTicket};
