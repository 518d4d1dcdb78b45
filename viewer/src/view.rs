//! Pure projection from viewer state to a render description.
//!
//! The viewer never draws; it emits a [`Scene`] the host renders with
//! whatever widget toolkit it embeds. Everything here is a read-only
//! function of [`ViewerState`].

use crate::layout::{SpreadLayout, WidgetKey};
use crate::reducer::{Lifecycle, ViewerState};

/// One slide of the flip book
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slide {
    /// A real page image
    Page {
        /// Image reference
        url: String,
        /// Whether the image failed to load and needs a placeholder
        broken: bool,
    },
    /// The synthetic trailing download-prompt slide
    DownloadPrompt {
        /// Downloadable-issue reference, if one exists
        download_url: Option<String>,
    },
}

/// Blocking overlay shown above the book until every slide has settled
///
/// The overlay renders concurrently with the book; it never unmounts the
/// reader underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadingOverlay {
    /// Settled slides as a rounded percentage
    pub percent: u8,
}

/// The fully laid-out book
#[derive(Debug, Clone, PartialEq)]
pub struct BookScene {
    /// Page and container geometry
    pub layout: SpreadLayout,
    /// Identity the flip widget must be keyed by
    pub widget_key: WidgetKey,
    /// Book opacity: 0.0 while a resize settles, 1.0 otherwise
    pub opacity: f64,
    /// Whether the closing transition is playing (or finished)
    pub closing: bool,
    /// Progress overlay, present until every slide has settled
    pub overlay: Option<LoadingOverlay>,
    /// Header download button reference, if the issue has a PDF
    pub download_url: Option<String>,
    /// All slides in reading order, prompt slide last
    pub slides: Vec<Slide>,
}

/// What the host should render
#[derive(Debug, Clone, PartialEq)]
pub enum Scene {
    /// No pages to show; the only action is dismissal
    Empty {
        /// Whether the closing transition is playing (or finished)
        closing: bool,
    },
    /// The flip book, with layout and progress state resolved
    Book(Box<BookScene>),
}

/// Project the current state into a render description
#[must_use]
pub fn view(state: &ViewerState) -> Scene {
    let closing = !matches!(state.lifecycle, Lifecycle::Open);

    if state.pages.is_empty() {
        return Scene::Empty { closing };
    }

    let overlay = if state.progress.is_complete() {
        None
    } else {
        Some(LoadingOverlay {
            percent: state.progress.percent(),
        })
    };

    let slides = state
        .pages
        .iter()
        .enumerate()
        .map(|(index, url)| Slide::Page {
            url: url.clone(),
            broken: state.progress.is_broken(index),
        })
        .chain(std::iter::once(Slide::DownloadPrompt {
            download_url: state.download_url.clone(),
        }))
        .collect();

    Scene::Book(Box::new(BookScene {
        layout: state.layout,
        widget_key: state.layout.widget_key(),
        opacity: if state.faded { 0.0 } else { 1.0 },
        closing,
        overlay,
        download_url: state.download_url.clone(),
        slides,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutConfig, Viewport};
    use crate::reducer::ViewerState;

    fn state_with_pages(count: usize) -> ViewerState {
        let pages = (0..count).map(|i| format!("p{i}.jpg")).collect();
        ViewerState::new(
            pages,
            Some("full.pdf".into()),
            Viewport::new(1920.0, 1080.0),
            &LayoutConfig::default(),
        )
    }

    #[test]
    #[allow(clippy::panic)] // Tests are allowed to panic on failures
    fn book_scene_lists_pages_then_prompt() {
        let state = state_with_pages(2);

        match view(&state) {
            Scene::Book(book) => {
                assert_eq!(book.slides.len(), 3);
                assert!(matches!(book.slides[0], Slide::Page { ref url, .. } if url == "p0.jpg"));
                assert!(matches!(book.slides[2], Slide::DownloadPrompt { .. }));
                assert_eq!(book.widget_key, state.layout.widget_key());
            },
            Scene::Empty { .. } => panic!("expected a book scene"),
        }
    }

    #[test]
    #[allow(clippy::panic)]
    fn overlay_blocks_until_all_slides_settle() {
        let mut state = state_with_pages(2);

        let Scene::Book(book) = view(&state) else {
            panic!("expected a book scene");
        };
        assert_eq!(book.overlay, Some(LoadingOverlay { percent: 0 }));

        state.progress.mark_loaded(0);
        let Scene::Book(book) = view(&state) else {
            panic!("expected a book scene");
        };
        assert_eq!(book.overlay, Some(LoadingOverlay { percent: 33 }));

        state.progress.mark_loaded(1);
        let Scene::Book(book) = view(&state) else {
            panic!("expected a book scene");
        };
        assert_eq!(book.overlay, None);
    }

    #[test]
    #[allow(clippy::panic)]
    fn broken_pages_are_flagged_for_placeholders() {
        let mut state = state_with_pages(2);
        state.progress.mark_broken(1);

        let Scene::Book(book) = view(&state) else {
            panic!("expected a book scene");
        };
        assert!(matches!(book.slides[0], Slide::Page { broken: false, .. }));
        assert!(matches!(book.slides[1], Slide::Page { broken: true, .. }));
    }

    #[test]
    #[allow(clippy::panic)]
    fn faded_state_zeroes_opacity() {
        let mut state = state_with_pages(1);
        state.faded = true;

        let Scene::Book(book) = view(&state) else {
            panic!("expected a book scene");
        };
        assert!((book.opacity - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_page_list_renders_the_empty_state() {
        let state = state_with_pages(0);
        assert_eq!(view(&state), Scene::Empty { closing: false });
    }
}
