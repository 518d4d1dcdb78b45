//! Integration tests for the mounted viewer session.
//!
//! These run the full reducer-store loop with real timers. Durations are
//! shrunk via `ViewerConfig` so the debounce and closing transitions
//! settle in milliseconds.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use folio_runtime::StoreError;
use folio_testing::test_clock;
use folio_viewer::layout::{SpreadMode, Viewport};
use folio_viewer::view::Scene;
use folio_viewer::{ViewerConfig, ViewerSession};

fn fast_config() -> ViewerConfig {
    ViewerConfig {
        resize_debounce: Duration::from_millis(40),
        close_transition: Duration::from_millis(20),
        ..ViewerConfig::default()
    }
}

fn counting_hook() -> (Arc<AtomicUsize>, Arc<dyn Fn() + Send + Sync>) {
    let count = Arc::new(AtomicUsize::new(0));
    let hook = {
        let count = Arc::clone(&count);
        Arc::new(move || {
            count.fetch_add(1, Ordering::SeqCst);
        }) as Arc<dyn Fn() + Send + Sync>
    };
    (count, hook)
}

fn mount_pages(pages: Vec<String>) -> (Arc<AtomicUsize>, ViewerSession<folio_testing::FixedClock>) {
    let (count, hook) = counting_hook();
    let session = ViewerSession::mount_with(
        pages,
        Some("https://cdn.example.com/full.pdf".into()),
        Viewport::new(1920.0, 1080.0),
        hook,
        fast_config(),
        test_clock(),
    );
    (count, session)
}

#[tokio::test]
async fn loading_pages_drives_the_overlay_to_completion() -> Result<(), StoreError> {
    let (_count, session) = mount_pages(vec!["a.png".into(), "b.png".into()]);

    let Scene::Book(book) = session.scene().await else {
        panic!("expected a book scene");
    };
    assert_eq!(book.overlay.map(|o| o.percent), Some(0));
    assert_eq!(book.slides.len(), 3);
    assert_eq!(book.layout.mode, SpreadMode::Double);

    session.page_loaded(0).await?;
    let Scene::Book(book) = session.scene().await else {
        panic!("expected a book scene");
    };
    assert_eq!(book.overlay.map(|o| o.percent), Some(33));

    session.page_loaded(1).await?;
    let Scene::Book(book) = session.scene().await else {
        panic!("expected a book scene");
    };
    assert_eq!(book.overlay, None);
    Ok(())
}

#[tokio::test]
async fn duplicate_and_out_of_range_load_events_are_harmless() -> Result<(), StoreError> {
    let (_count, session) = mount_pages(vec!["a.png".into(), "b.png".into()]);

    session.page_loaded(0).await?;
    session.page_loaded(0).await?;
    session.page_loaded(7).await?;

    let loaded = session.with_state(|s| s.progress.loaded_pages()).await;
    assert_eq!(loaded, 1);
    Ok(())
}

#[tokio::test]
async fn rapid_resizes_coalesce_into_one_settled_layout() -> Result<(), StoreError> {
    let (_count, session) = mount_pages(vec!["a.png".into()]);

    session.resize(1000.0, 700.0).await?;
    session.resize(800.0, 600.0).await?;
    session.resize(400.0, 800.0).await?;

    // Mid-burst: faded, layout untouched
    let (faded, mode) = session.with_state(|s| (s.faded, s.layout.mode)).await;
    assert!(faded);
    assert_eq!(mode, SpreadMode::Double);

    tokio::time::sleep(Duration::from_millis(150)).await;

    // Settled: the last sample won, single-page layout, fade cleared
    let (faded, viewport, mode) = session
        .with_state(|s| (s.faded, s.viewport, s.layout.mode))
        .await;
    assert!(!faded);
    assert_eq!(viewport, Viewport::new(400.0, 800.0));
    assert_eq!(mode, SpreadMode::Single);
    Ok(())
}

#[tokio::test]
async fn close_fires_the_hook_exactly_once() -> Result<(), StoreError> {
    let (count, session) = mount_pages(vec!["a.png".into()]);

    session.request_close().await?;
    session.request_close().await?;
    session.request_close().await?;

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(count.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn unmount_during_the_closing_transition_suppresses_the_hook() -> Result<(), StoreError> {
    let (count, session) = mount_pages(vec!["a.png".into()]);

    session.request_close().await?;
    session.unmount();

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert!(session.is_unmounted());

    // The session rejects further input
    let result = session.request_close().await;
    assert!(matches!(result, Err(StoreError::Detached)));
    Ok(())
}

#[tokio::test]
async fn unmount_while_a_resize_is_debouncing_discards_the_timer() -> Result<(), StoreError> {
    let (_count, session) = mount_pages(vec!["a.png".into()]);

    session.resize(400.0, 800.0).await?;
    session.unmount();

    tokio::time::sleep(Duration::from_millis(150)).await;

    // The debounce timer woke against a detached store; nothing settled
    let (faded, mode) = session.with_state(|s| (s.faded, s.layout.mode)).await;
    assert!(faded);
    assert_eq!(mode, SpreadMode::Double);
    Ok(())
}

#[tokio::test]
async fn empty_page_list_shows_the_empty_state_with_a_working_close() -> Result<(), StoreError> {
    let (count, session) = mount_pages(vec![]);

    assert_eq!(session.scene().await, Scene::Empty { closing: false });

    session.request_close().await?;
    assert_eq!(session.scene().await, Scene::Empty { closing: true });

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert_eq!(count.load(Ordering::SeqCst), 1);
    Ok(())
}

#[tokio::test]
async fn replacing_pages_resets_progress_and_reshows_the_overlay() -> Result<(), StoreError> {
    let (_count, session) = mount_pages(vec!["a.png".into()]);

    session.page_loaded(0).await?;
    let Scene::Book(book) = session.scene().await else {
        panic!("expected a book scene");
    };
    assert_eq!(book.overlay, None);

    session
        .replace_pages(vec!["x.png".into(), "y.png".into()], None)
        .await?;

    let Scene::Book(book) = session.scene().await else {
        panic!("expected a book scene");
    };
    assert_eq!(book.overlay.map(|o| o.percent), Some(0));
    assert_eq!(book.slides.len(), 3);
    Ok(())
}

#[tokio::test]
async fn for_issue_consumes_pages_and_pdf() {
    let issue: folio_viewer::Issue = serde_json::from_str(
        r#"{
            "id": 3,
            "title": "Late Summer",
            "publish_date": "2024-08-20",
            "description": "",
            "cover_image": "https://cdn.example.com/3/cover.jpg",
            "issue_number": "No. 3",
            "year": 2024,
            "season": "Summer",
            "pdf_file": "https://cdn.example.com/3/full.pdf",
            "is_published": true,
            "page_images": ["https://cdn.example.com/3/p1.jpg"]
        }"#,
    )
    .expect("sample issue should parse");

    let (_count, hook) = counting_hook();
    let session = ViewerSession::for_issue(&issue, Viewport::new(1280.0, 720.0), hook);

    let (pages, download) = session
        .with_state(|s| (s.pages.clone(), s.download_url.clone()))
        .await;
    assert_eq!(pages, vec!["https://cdn.example.com/3/p1.jpg".to_owned()]);
    assert_eq!(download.as_deref(), Some("https://cdn.example.com/3/full.pdf"));
}
