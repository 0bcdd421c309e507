//! Persistence collaborator for layouts.
//!
//! The editor never talks HTTP itself; it goes through [`LayoutApi`], which a
//! host application implements over its REST client. [`crate::InMemoryLayoutApi`]
//! is the in-process implementation used by tests and demos.

use crate::error::ApiError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopfront_model::Document;
use std::fmt;

pub type ApiResult<T> = Result<T, ApiError>;

/// Page kind a layout is used for (`home`, `catalog`, `about`, ...)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageType(String);

impl PageType {
    pub const HOME: &'static str = "home";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn home() -> Self {
        Self::new(Self::HOME)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageType {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A persisted document with its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub id: String,
    pub shop_id: String,
    pub page_type: PageType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,

    pub document: Document,
    pub version: u64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial layout update; absent fields are left as they are
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_type: Option<PageType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl LayoutUpdate {
    pub fn document(document: Document) -> Self {
        Self {
            document: Some(document),
            ..Self::default()
        }
    }
}

/// Layout persistence operations.
///
/// Implemented by:
/// - the host's REST client in production
/// - [`crate::InMemoryLayoutApi`] for tests
#[async_trait]
pub trait LayoutApi: Send + Sync {
    async fn list_layouts(&self, shop_id: &str) -> ApiResult<Vec<Layout>>;

    async fn get_layout(&self, layout_id: &str) -> ApiResult<Layout>;

    async fn create_layout(
        &self,
        page_type: PageType,
        document: Document,
        page_name: Option<String>,
    ) -> ApiResult<Layout>;

    async fn update_layout(&self, layout_id: &str, update: LayoutUpdate) -> ApiResult<Layout>;

    async fn delete_layout(&self, layout_id: &str) -> ApiResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_wire_format() {
        let json = r#"{
            "id": "l1",
            "shopId": "shop-1",
            "pageType": "home",
            "document": [{ "id": "b1", "type": "hero", "props": {} }],
            "version": 3,
            "isActive": true,
            "createdAt": "2024-05-01T10:00:00Z",
            "updatedAt": "2024-05-02T10:00:00Z"
        }"#;

        let layout: Layout = serde_json::from_str(json).unwrap();
        assert_eq!(layout.page_type, PageType::home());
        assert_eq!(layout.page_name, None);
        assert_eq!(layout.document.block_ids(), vec!["b1"]);

        let value = serde_json::to_value(&layout).unwrap();
        assert_eq!(value["shopId"], "shop-1");
        assert_eq!(value["isActive"], true);
        assert!(value.get("pageName").is_none());
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let update = LayoutUpdate {
            is_active: Some(false),
            ..LayoutUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({ "isActive": false })
        );
    }
}
