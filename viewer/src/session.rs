//! A mounted viewer: store plus host-facing API.
//!
//! The session wires the viewer reducer onto a [`Store`] and exposes the
//! narrow surface the hosting page needs: resize samples, load
//! notifications, the close request, scene snapshots, and unmounting.
//! Unmounting detaches the store, which cancels every pending timer, so
//! after that point the close hook can no longer fire.

use crate::issue::Issue;
use crate::layout::Viewport;
use crate::reducer::{
    CloseHook, ViewerAction, ViewerConfig, ViewerEnvironment, ViewerReducer, ViewerState,
};
use crate::view::{self, Scene};
use folio_core::environment::{Clock, SystemClock};
use folio_runtime::{Store, StoreError};

/// A mounted flip-book viewer
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use folio_viewer::{ViewerSession, layout::Viewport};
///
/// let session = ViewerSession::mount(
///     issue.page_images.clone(),
///     issue.download_url(),
///     Viewport::new(1920.0, 1080.0),
///     Arc::new(|| tracing::info!("viewer dismissed")),
/// );
///
/// session.page_loaded(0).await?;
/// let scene = session.scene().await;
/// session.unmount();
/// ```
pub struct ViewerSession<C = SystemClock>
where
    C: Clock + Clone + Send + Sync + 'static,
{
    store: Store<ViewerState, ViewerAction, ViewerEnvironment<C>, ViewerReducer<C>>,
}

impl ViewerSession<SystemClock> {
    /// Mount a viewer with the default configuration and system clock
    #[must_use]
    pub fn mount(
        pages: Vec<String>,
        download_url: Option<String>,
        viewport: Viewport,
        on_close: CloseHook,
    ) -> Self {
        Self::mount_with(
            pages,
            download_url,
            viewport,
            on_close,
            ViewerConfig::default(),
            SystemClock,
        )
    }

    /// Mount a viewer for a magazine issue
    ///
    /// Consumes only the ordered page-image list and the optional PDF
    /// reference; the rest of the issue metadata stays with the host.
    #[must_use]
    pub fn for_issue(issue: &Issue, viewport: Viewport, on_close: CloseHook) -> Self {
        Self::mount(
            issue.page_images.clone(),
            issue.download_url(),
            viewport,
            on_close,
        )
    }
}

impl<C> ViewerSession<C>
where
    C: Clock + Clone + Send + Sync + 'static,
{
    /// Mount a viewer with explicit configuration and clock
    #[must_use]
    pub fn mount_with(
        pages: Vec<String>,
        download_url: Option<String>,
        viewport: Viewport,
        on_close: CloseHook,
        config: ViewerConfig,
        clock: C,
    ) -> Self {
        let state = ViewerState::new(pages, download_url, viewport, &config.layout);
        let environment = ViewerEnvironment::new(clock, config, on_close);

        tracing::debug!(
            pages = state.pages.len(),
            "Mounting viewer session"
        );

        Self {
            store: Store::new(state, ViewerReducer::new(), environment),
        }
    }

    /// Report a viewport resize sample
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Detached`] after [`unmount`](Self::unmount).
    pub async fn resize(&self, width: f64, height: f64) -> Result<(), StoreError> {
        self.store
            .send(ViewerAction::ViewportResized { width, height })
            .await
            .map(|_| ())
    }

    /// Report that a page image finished loading
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Detached`] after [`unmount`](Self::unmount).
    pub async fn page_loaded(&self, index: usize) -> Result<(), StoreError> {
        self.store
            .send(ViewerAction::PageLoaded { index })
            .await
            .map(|_| ())
    }

    /// Report that a page image failed to load
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Detached`] after [`unmount`](Self::unmount).
    pub async fn page_load_failed(&self, index: usize) -> Result<(), StoreError> {
        self.store
            .send(ViewerAction::PageLoadFailed { index })
            .await
            .map(|_| ())
    }

    /// Swap in a different page list, resetting all derived state
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Detached`] after [`unmount`](Self::unmount).
    pub async fn replace_pages(
        &self,
        pages: Vec<String>,
        download_url: Option<String>,
    ) -> Result<(), StoreError> {
        self.store
            .send(ViewerAction::PagesReplaced {
                pages,
                download_url,
            })
            .await
            .map(|_| ())
    }

    /// Request dismissal of the viewer
    ///
    /// Idempotent: only the first request while Open starts the closing
    /// transition, and the close hook fires at most once.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Detached`] after [`unmount`](Self::unmount).
    pub async fn request_close(&self) -> Result<(), StoreError> {
        self.store.send(ViewerAction::CloseRequested).await.map(|_| ())
    }

    /// Snapshot of what the host should render
    pub async fn scene(&self) -> Scene {
        self.store.state(view::view).await
    }

    /// Read the viewer state via a closure
    pub async fn with_state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&ViewerState) -> T,
    {
        self.store.state(f).await
    }

    /// Unmount the viewer
    ///
    /// Detaches the underlying store: pending debounce and close timers
    /// become inert and no callback fires afterwards, the close hook
    /// included. Safe to call in any lifecycle state, repeatedly.
    pub fn unmount(&self) {
        self.store.detach();
    }

    /// Whether the viewer has been unmounted
    #[must_use]
    pub fn is_unmounted(&self) -> bool {
        self.store.is_detached()
    }
}
