//! Page editor against the in-memory backend

use shopfront_editor::Side;
use shopfront_model::{Block, BlockType, ComponentType, Document};
use shopfront_registry::TypeRegistry;
use shopfront_workspace::{
    EditorConfig, InMemoryLayoutApi, LayoutApi, LayoutSelector, LoadedFrom, PageEditor, PageType,
    SaveOutcome, WorkspaceError, DEFAULT_SECTIONS,
};
use std::sync::Arc;

fn config() -> EditorConfig {
    EditorConfig {
        shop_id: "shop-1".to_string(),
        ..EditorConfig::default()
    }
}

fn page(id: &str) -> Document {
    Document::from_blocks(vec![
        Block::new(format!("{}-hero", id), BlockType::Hero),
        Block::new(format!("{}-footer", id), BlockType::Footer),
    ])
}

fn editor(api: &Arc<InMemoryLayoutApi>) -> PageEditor {
    PageEditor::new(api.clone(), Arc::new(TypeRegistry::builtin()), config())
}

#[tokio::test]
async fn test_mount_explicit_layout() {
    let api = Arc::new(InMemoryLayoutApi::new("shop-1"));
    let about = api
        .create_layout(PageType::new("about"), page("about"), Some("About".into()))
        .await
        .unwrap();

    let mut editor = editor(&api);
    let source = editor.mount(LayoutSelector::explicit(&about.id)).await;

    assert_eq!(source, LoadedFrom::Explicit(about.id.clone()));
    assert_eq!(editor.document().block_ids(), vec!["about-hero", "about-footer"]);
    assert!(!editor.is_dirty());
}

#[tokio::test]
async fn test_mount_prefers_active_home_layout() {
    let api = Arc::new(InMemoryLayoutApi::new("shop-1"));
    api.create_layout(PageType::new("about"), page("about"), None).await.unwrap();
    let home = api.create_layout(PageType::home(), page("home"), None).await.unwrap();
    // second home layout starts inactive
    api.create_layout(PageType::home(), page("draft"), None).await.unwrap();

    let mut editor = editor(&api);
    let source = editor.mount(LayoutSelector::home()).await;

    assert_eq!(source, LoadedFrom::Home(home.id.clone()));
    assert_eq!(editor.layout_id(), Some(home.id.as_str()));
}

#[tokio::test]
async fn test_mount_falls_back_to_default() {
    let api = Arc::new(InMemoryLayoutApi::new("shop-1"));
    let mut editor = editor(&api);

    assert_eq!(editor.mount(LayoutSelector::home()).await, LoadedFrom::Default);
    assert_eq!(editor.document().len(), DEFAULT_SECTIONS.len());
    assert!(editor.layout_id().is_none());
    assert!(editor.last_error().is_none());
}

#[tokio::test]
async fn test_failed_load_shows_default_and_reports() {
    let api = Arc::new(InMemoryLayoutApi::new("shop-1"));
    let mut editor = editor(&api);

    let source = editor.mount(LayoutSelector::explicit("missing")).await;
    assert_eq!(source, LoadedFrom::Default);
    assert!(!editor.document().is_empty());
    assert!(editor.last_error().unwrap().contains("missing"));

    api.fail_next(1);
    editor.mount(LayoutSelector::home()).await;
    assert!(editor.last_error().is_some());
}

#[tokio::test]
async fn test_edits_stay_local_until_save() {
    let api = Arc::new(InMemoryLayoutApi::new("shop-1"));
    let home = api.create_layout(PageType::home(), page("home"), None).await.unwrap();

    let mut editor = editor(&api);
    editor.mount(LayoutSelector::home()).await;
    let requests = api.request_count();

    let store = editor.store_mut();
    store.move_block(1, 0);
    store.insert_block_at(1, BlockType::Testimonials).unwrap();
    assert_eq!(api.request_count(), requests);
    assert!(editor.is_dirty());

    let outcome = editor.save().await.unwrap();
    let SaveOutcome::Saved(saved) = outcome else {
        panic!("expected a saved layout");
    };
    assert_eq!(saved.id, home.id);
    assert_eq!(saved.version, 2);
    assert!(!editor.is_dirty());

    let stored = api.get_layout(&home.id).await.unwrap();
    assert_eq!(stored.document, *editor.document());
    assert_eq!(stored.document.block_at(0).unwrap().id, "home-footer");
}

#[tokio::test]
async fn test_failed_save_keeps_document() {
    let api = Arc::new(InMemoryLayoutApi::new("shop-1"));
    let home = api.create_layout(PageType::home(), page("home"), None).await.unwrap();

    let mut editor = editor(&api);
    editor.mount(LayoutSelector::home()).await;
    editor.store_mut().remove_block("home-hero");
    let edited = editor.document();

    api.fail_next(1);
    let result = editor.save().await;
    assert!(matches!(result, Err(WorkspaceError::Api(_))));
    assert!(editor.last_error().is_some());
    assert!(Arc::ptr_eq(&edited, &editor.document()));
    assert!(editor.is_dirty());
    assert_eq!(api.get_layout(&home.id).await.unwrap().version, 1);

    // retry succeeds
    assert!(editor.save().await.is_ok());
    assert!(editor.last_error().is_none());
    assert!(!editor.is_dirty());
}

#[tokio::test]
async fn test_edits_during_save_remain_dirty() {
    let api = Arc::new(InMemoryLayoutApi::new("shop-1"));
    api.create_layout(PageType::home(), page("home"), None).await.unwrap();

    let mut editor = editor(&api);
    editor.mount(LayoutSelector::home()).await;
    editor.store_mut().move_block(0, 1);

    let ticket = editor.begin_save();
    let in_flight = editor.api();
    let response = ticket.send(in_flight.as_ref()).await;

    // user keeps editing before the response is applied
    editor.store_mut().remove_block("home-hero");
    editor.complete_save(ticket, response).unwrap();

    assert!(editor.is_dirty());
    let stored = api.list_layouts("shop-1").await.unwrap();
    assert_eq!(stored[0].document.len(), 2);
}

#[tokio::test]
async fn test_late_save_after_switch_is_ignored() {
    let api = Arc::new(InMemoryLayoutApi::new("shop-1"));
    api.create_layout(PageType::home(), page("home"), None).await.unwrap();
    let about = api.create_layout(PageType::new("about"), page("about"), None).await.unwrap();

    let mut editor = editor(&api);
    editor.mount(LayoutSelector::home()).await;
    editor.store_mut().remove_block("home-footer");

    let ticket = editor.begin_save();
    let in_flight = editor.api();

    assert_eq!(
        editor.switch_layout(&about.id).await,
        LoadedFrom::Explicit(about.id.clone())
    );
    let response = ticket.send(in_flight.as_ref()).await;
    assert!(response.is_ok());

    let outcome = editor.complete_save(ticket, response).unwrap();
    assert_eq!(outcome, SaveOutcome::Stale);
    assert_eq!(editor.layout_id(), Some(about.id.as_str()));
    assert_eq!(editor.document().block_ids(), vec!["about-hero", "about-footer"]);
}

#[tokio::test]
async fn test_new_page_is_created_on_first_save() {
    let api = Arc::new(InMemoryLayoutApi::new("shop-1"));
    let mut editor = editor(&api);

    editor.new_page(PageType::new("promo"), Some("Summer".into()));
    assert!(editor.layout_id().is_none());

    let hero = editor
        .document()
        .blocks()
        .find(|b| b.block_type == BlockType::Hero)
        .and_then(|b| b.children().first().map(|c| c.id.clone()))
        .unwrap();
    assert!(editor
        .store_mut()
        .insert_beside(&hero, Side::Right, ComponentType::Image)
        .is_some());

    let SaveOutcome::Saved(created) = editor.save().await.unwrap() else {
        panic!("expected a saved layout");
    };
    assert_eq!(created.page_type, PageType::new("promo"));
    assert_eq!(created.page_name.as_deref(), Some("Summer"));
    assert_eq!(editor.layout_id(), Some(created.id.as_str()));

    // second save updates instead of creating
    editor.save().await.unwrap();
    assert_eq!(api.len().await, 1);
}

#[tokio::test]
async fn test_delete_and_activation() {
    let api = Arc::new(InMemoryLayoutApi::new("shop-1"));
    let home = api.create_layout(PageType::home(), page("home"), None).await.unwrap();

    let mut editor = editor(&api);
    editor.mount(LayoutSelector::home()).await;

    editor.set_active(false).await.unwrap();
    assert!(!editor.layout().unwrap().is_active);
    assert!(!api.get_layout(&home.id).await.unwrap().is_active);

    editor.delete_layout().await.unwrap();
    assert!(editor.layout_id().is_none());
    assert!(api.is_empty().await);
    assert!(matches!(editor.delete_layout().await, Err(WorkspaceError::NoLayout)));
}

#[tokio::test]
async fn test_subscribers_follow_layout_switch() {
    let api = Arc::new(InMemoryLayoutApi::new("shop-1"));
    let about = api.create_layout(PageType::new("about"), page("about"), None).await.unwrap();

    let mut editor = editor(&api);
    let mut rx = editor.store().subscribe();
    editor.mount(LayoutSelector::explicit(&about.id)).await;

    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().block_ids(), vec!["about-hero", "about-footer"]);
    assert!(editor.document_json().unwrap().starts_with('['));
}

#[tokio::test]
async fn test_new_nodes_carry_configured_id_prefix() {
    let api = Arc::new(InMemoryLayoutApi::new("shop-1"));
    let config = EditorConfig {
        id_prefix: "shopA".to_string(),
        ..config()
    };
    let mut editor = PageEditor::new(api.clone(), Arc::new(TypeRegistry::builtin()), config);
    editor.new_page(PageType::home(), None);

    let id = editor.store_mut().insert_block_at(0, BlockType::Hero).unwrap();
    assert!(id.starts_with("shopA-block-"));

    let doc = editor.document();
    let block = doc.block(&id).unwrap();
    assert!(block.children().iter().all(|c| c.id.starts_with("shopA-")));
    assert!(doc.validate().is_ok());
}
