//! In-memory layout backend.
//!
//! Same contract as a real backend: ids are minted server-side, versions
//! increase on every update and timestamps are stamped on write. Failures can
//! be injected to exercise error paths.

use crate::api::{ApiResult, Layout, LayoutApi, LayoutUpdate, PageType};
use crate::error::ApiError;
use async_trait::async_trait;
use chrono::Utc;
use shopfront_model::Document;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use tracing::info;

pub struct InMemoryLayoutApi {
    shop_id: String,
    layouts: RwLock<HashMap<String, Layout>>,
    next_id: AtomicU64,
    failures: AtomicUsize,
    requests: AtomicUsize,
}

impl InMemoryLayoutApi {
    pub fn new(shop_id: impl Into<String>) -> Self {
        let shop_id = shop_id.into();
        info!(shop_id = %shop_id, "Creating in-memory layout backend");
        Self {
            shop_id,
            layouts: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            failures: AtomicUsize::new(0),
            requests: AtomicUsize::new(0),
        }
    }

    /// Make the next `count` requests fail with a backend error
    pub fn fail_next(&self, count: usize) {
        self.failures.store(count, Ordering::SeqCst);
    }

    /// Requests received so far, failed ones included
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Store a layout as-is, bypassing id and version assignment
    pub async fn insert(&self, layout: Layout) {
        self.layouts.write().await.insert(layout.id.clone(), layout);
    }

    pub async fn len(&self) -> usize {
        self.layouts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.layouts.read().await.is_empty()
    }

    fn begin_request(&self, operation: &str) -> ApiResult<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let injected = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return Err(ApiError::Backend(format!("{} failed (injected)", operation)));
        }
        Ok(())
    }

    fn next_layout_id(&self) -> String {
        format!("layout-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

impl Default for InMemoryLayoutApi {
    fn default() -> Self {
        Self::new("default")
    }
}

#[async_trait]
impl LayoutApi for InMemoryLayoutApi {
    async fn list_layouts(&self, shop_id: &str) -> ApiResult<Vec<Layout>> {
        self.begin_request("list_layouts")?;
        let layouts = self.layouts.read().await;

        let mut found: Vec<Layout> = layouts
            .values()
            .filter(|layout| layout.shop_id == shop_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn get_layout(&self, layout_id: &str) -> ApiResult<Layout> {
        self.begin_request("get_layout")?;
        self.layouts
            .read()
            .await
            .get(layout_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(layout_id.to_string()))
    }

    async fn create_layout(
        &self,
        page_type: PageType,
        document: Document,
        page_name: Option<String>,
    ) -> ApiResult<Layout> {
        self.begin_request("create_layout")?;
        let mut layouts = self.layouts.write().await;

        let is_active = !layouts
            .values()
            .any(|l| l.shop_id == self.shop_id && l.page_type == page_type && l.is_active);
        let now = Utc::now();
        let layout = Layout {
            id: self.next_layout_id(),
            shop_id: self.shop_id.clone(),
            page_type,
            page_name,
            document,
            version: 1,
            is_active,
            created_at: now,
            updated_at: now,
        };

        info!(layout_id = %layout.id, page_type = %layout.page_type, "Created layout");
        layouts.insert(layout.id.clone(), layout.clone());
        Ok(layout)
    }

    async fn update_layout(&self, layout_id: &str, update: LayoutUpdate) -> ApiResult<Layout> {
        self.begin_request("update_layout")?;
        let mut layouts = self.layouts.write().await;
        let layout = layouts
            .get_mut(layout_id)
            .ok_or_else(|| ApiError::NotFound(layout_id.to_string()))?;

        if let Some(document) = update.document {
            layout.document = document;
        }
        if let Some(page_type) = update.page_type {
            layout.page_type = page_type;
        }
        if let Some(page_name) = update.page_name {
            layout.page_name = Some(page_name);
        }
        if let Some(is_active) = update.is_active {
            layout.is_active = is_active;
        }
        layout.version += 1;
        layout.updated_at = Utc::now();

        info!(layout_id = %layout_id, version = layout.version, "Updated layout");
        Ok(layout.clone())
    }

    async fn delete_layout(&self, layout_id: &str) -> ApiResult<()> {
        self.begin_request("delete_layout")?;
        if self.layouts.write().await.remove(layout_id).is_none() {
            return Err(ApiError::NotFound(layout_id.to_string()));
        }
        info!(layout_id = %layout_id, "Deleted layout");
        Ok(())
    }
}
