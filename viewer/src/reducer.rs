//! The viewer state machine.
//!
//! All viewer behavior lives here as a pure reducer: resize debouncing
//! with a fade, load-progress accounting, and the dismissal transition.
//! Timers are expressed as [`Effect::Delay`] feedback actions, so a store
//! that is detached on unmount silently cancels them, the pending
//! close-hook invocation included.

use crate::layout::{LayoutConfig, SpreadLayout, Viewport};
use crate::progress::LoadProgress;
use folio_core::environment::Clock;
use folio_core::{DateTime, SmallVec, Utc, effect::Effect, reducer::Reducer, smallvec};
use std::sync::Arc;
use std::time::Duration;

/// Host-supplied callback invoked exactly once when dismissal completes
pub type CloseHook = Arc<dyn Fn() + Send + Sync>;

/// Lifecycle of a mounted viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Interactive; the only state that accepts a close request
    Open,
    /// Dismissal transition is playing; the close hook is scheduled
    Closing,
    /// Terminal; the close hook has been dispatched
    Closed,
}

/// Tunable durations and geometry of the viewer
///
/// Defaults match the production reader: a 300ms resize debounce (equal to
/// the fade transition, so the book fades out while the viewport is in
/// flux) and a 300ms closing transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    /// Geometry constants for the layout calculator
    pub layout: LayoutConfig,
    /// Quiet period after the last resize event before layout recomputes
    pub resize_debounce: Duration,
    /// Duration of the closing transition before the close hook fires
    pub close_transition: Duration,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            resize_debounce: Duration::from_millis(300),
            close_transition: Duration::from_millis(300),
        }
    }
}

/// Viewer state
///
/// Owned by the store for the mounted lifetime of the viewer. The layout
/// is derived state: it is recomputed from the viewport on every settled
/// resize and never mutated directly.
#[derive(Debug, Clone)]
pub struct ViewerState {
    /// Ordered page-image references
    pub pages: Vec<String>,
    /// Optional downloadable-issue reference
    pub download_url: Option<String>,
    /// Last settled viewport
    pub viewport: Viewport,
    /// Viewport observed during an unsettled resize burst, if any
    pub pending_viewport: Option<Viewport>,
    /// Geometry derived from the settled viewport
    pub layout: SpreadLayout,
    /// Whether the book is faded out while a resize settles
    pub faded: bool,
    /// Identifies the most recent resize burst; stale debounce timers
    /// carry an older epoch and are ignored
    pub resize_epoch: u64,
    /// Slide load accounting
    pub progress: LoadProgress,
    /// Dismissal state machine
    pub lifecycle: Lifecycle,
    /// When dismissal completed, for diagnostics
    pub closed_at: Option<DateTime<Utc>>,
}

impl ViewerState {
    /// Create the state for a freshly mounted viewer
    #[must_use]
    pub fn new(
        pages: Vec<String>,
        download_url: Option<String>,
        viewport: Viewport,
        layout_config: &LayoutConfig,
    ) -> Self {
        let progress = LoadProgress::new(pages.len());
        Self {
            pages,
            download_url,
            viewport,
            pending_viewport: None,
            layout: layout_config.compute(viewport),
            faded: false,
            resize_epoch: 0,
            progress,
            lifecycle: Lifecycle::Open,
            closed_at: None,
        }
    }
}

/// Viewer actions
///
/// Inputs from the host (resize samples, load notifications, the close
/// request) plus the feedback actions produced by the viewer's own timers.
#[derive(Debug, Clone)]
pub enum ViewerAction {
    /// The host observed a viewport resize
    ViewportResized {
        /// New viewport width
        width: f64,
        /// New viewport height
        height: f64,
    },
    /// The resize debounce window elapsed without further resizes
    ResizeSettled {
        /// Resize burst this timer belongs to
        epoch: u64,
    },
    /// A page image finished loading
    PageLoaded {
        /// Zero-based page index
        index: usize,
    },
    /// A page image failed to load
    PageLoadFailed {
        /// Zero-based page index
        index: usize,
    },
    /// The host swapped in a different page list
    PagesReplaced {
        /// New ordered page-image references
        pages: Vec<String>,
        /// New downloadable-issue reference
        download_url: Option<String>,
    },
    /// The user asked to dismiss the viewer
    CloseRequested,
    /// The closing transition finished
    CloseDelayElapsed,
}

/// Viewer environment
///
/// Injected dependencies: a clock, the tunable configuration, and the
/// host's close hook. The hook is only ever invoked through an effect on
/// the Closing→Closed edge.
pub struct ViewerEnvironment<C: Clock> {
    /// Clock for timestamps
    pub clock: C,
    /// Durations and geometry
    pub config: ViewerConfig,
    on_close: CloseHook,
}

impl<C: Clock> ViewerEnvironment<C> {
    /// Create a viewer environment
    #[must_use]
    pub fn new(clock: C, config: ViewerConfig, on_close: CloseHook) -> Self {
        Self {
            clock,
            config,
            on_close,
        }
    }

    /// Clone of the close hook, for dispatching through an effect
    #[must_use]
    pub fn close_hook(&self) -> CloseHook {
        Arc::clone(&self.on_close)
    }
}

impl<C: Clock + Clone> Clone for ViewerEnvironment<C> {
    fn clone(&self) -> Self {
        Self {
            clock: self.clock.clone(),
            config: self.config,
            on_close: Arc::clone(&self.on_close),
        }
    }
}

impl<C: Clock + std::fmt::Debug> std::fmt::Debug for ViewerEnvironment<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewerEnvironment")
            .field("clock", &self.clock)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Viewer reducer
///
/// Generic over the Clock type C to work with any clock implementation.
#[derive(Debug, Clone, Copy)]
pub struct ViewerReducer<C> {
    _phantom: std::marker::PhantomData<C>,
}

impl<C> ViewerReducer<C> {
    /// Create a new viewer reducer
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<C> Default for ViewerReducer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> Reducer for ViewerReducer<C> {
    type State = ViewerState;
    type Action = ViewerAction;
    type Environment = ViewerEnvironment<C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            ViewerAction::ViewportResized { width, height } => {
                // Fade out immediately; the layout only moves once the
                // burst settles
                state.faded = true;
                state.pending_viewport = Some(Viewport::new(width, height));
                state.resize_epoch = state.resize_epoch.wrapping_add(1);
                tracing::debug!(
                    width,
                    height,
                    epoch = state.resize_epoch,
                    "Resize observed, debouncing"
                );

                smallvec![Effect::delay(
                    env.config.resize_debounce,
                    ViewerAction::ResizeSettled {
                        epoch: state.resize_epoch,
                    },
                )]
            },
            ViewerAction::ResizeSettled { epoch } => {
                if epoch != state.resize_epoch {
                    // A newer resize superseded this timer
                    tracing::trace!(epoch, current = state.resize_epoch, "Stale debounce ignored");
                    return smallvec![Effect::None];
                }

                if let Some(viewport) = state.pending_viewport.take() {
                    state.viewport = viewport;
                    state.layout = env.config.layout.compute(viewport);
                    tracing::debug!(
                        width = viewport.width,
                        height = viewport.height,
                        mode = ?state.layout.mode,
                        "Resize settled, layout recomputed"
                    );
                }
                state.faded = false;
                smallvec![Effect::None]
            },
            ViewerAction::PageLoaded { index } => {
                if state.progress.mark_loaded(index) {
                    tracing::debug!(
                        index,
                        percent = state.progress.percent(),
                        "Page loaded"
                    );
                } else {
                    tracing::trace!(index, "Duplicate or out-of-range load event ignored");
                }
                smallvec![Effect::None]
            },
            ViewerAction::PageLoadFailed { index } => {
                if state.progress.mark_broken(index) {
                    tracing::warn!(index, "Page failed to load, counting as settled");
                }
                smallvec![Effect::None]
            },
            ViewerAction::PagesReplaced {
                pages,
                download_url,
            } => {
                tracing::debug!(count = pages.len(), "Page list replaced");
                state.progress.reset(pages.len());
                state.pages = pages;
                state.download_url = download_url;
                state.lifecycle = Lifecycle::Open;
                state.closed_at = None;
                smallvec![Effect::None]
            },
            ViewerAction::CloseRequested => match state.lifecycle {
                Lifecycle::Open => {
                    state.lifecycle = Lifecycle::Closing;
                    tracing::debug!("Close requested, starting transition");
                    smallvec![Effect::delay(
                        env.config.close_transition,
                        ViewerAction::CloseDelayElapsed,
                    )]
                },
                Lifecycle::Closing | Lifecycle::Closed => {
                    // Only the Open→Closing edge schedules the timer
                    tracing::trace!("Repeated close request ignored");
                    smallvec![Effect::None]
                },
            },
            ViewerAction::CloseDelayElapsed => match state.lifecycle {
                Lifecycle::Closing => {
                    state.lifecycle = Lifecycle::Closed;
                    state.closed_at = Some(env.clock.now());
                    tracing::debug!("Closing transition finished, dispatching close hook");

                    let hook = env.close_hook();
                    smallvec![Effect::Future(Box::pin(async move {
                        hook();
                        None
                    }))]
                },
                Lifecycle::Open | Lifecycle::Closed => {
                    tracing::trace!("Close timer without a closing transition ignored");
                    smallvec![Effect::None]
                },
            },
        }
    }
}
