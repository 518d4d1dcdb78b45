//! # Folio Viewer
//!
//! Responsive flip-book viewer engine for magazine issues.
//!
//! The viewer takes an ordered list of page images, the current viewport,
//! and a close callback, and runs the magazine reader as a pure state
//! machine on the Folio store runtime:
//!
//! - [`layout`]: derives page size and single/double-spread mode from the
//!   viewport at a fixed A4 aspect ratio
//! - [`progress`]: counts settled slides and gates the reader behind a
//!   progress overlay until everything has loaded
//! - [`reducer`]: the state machine: resize debouncing with a fade,
//!   load accounting, and the dismissal transition
//! - [`view`]: pure projection of the state into a render description
//! - [`session`]: the mounted viewer, owning a store; unmounting cancels
//!   all pending timers so the close callback can never fire late
//! - [`issue`]: magazine-issue metadata from the listing API
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use folio_viewer::{ViewerSession, layout::Viewport};
//!
//! let session = ViewerSession::mount(
//!     vec!["a.png".into(), "b.png".into()],
//!     Some("issue.pdf".into()),
//!     Viewport::new(1920.0, 1080.0),
//!     Arc::new(|| println!("closed")),
//! );
//! ```

pub mod issue;
pub mod layout;
pub mod progress;
pub mod reducer;
pub mod session;
pub mod view;

pub use issue::{Issue, Season};
pub use layout::{LayoutConfig, SpreadLayout, SpreadMode, Viewport, WidgetKey};
pub use progress::LoadProgress;
pub use reducer::{
    CloseHook, Lifecycle, ViewerAction, ViewerConfig, ViewerEnvironment, ViewerReducer,
    ViewerState,
};
pub use session::ViewerSession;
pub use view::{BookScene, LoadingOverlay, Scene, Slide};
