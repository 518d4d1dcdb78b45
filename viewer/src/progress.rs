//! Load progress across the reader's slides.
//!
//! A session shows `N + 1` slides: one per page image plus the trailing
//! download-prompt slide. Real pages report completion through the host;
//! the prompt slide carries no resource and auto-completes once every real
//! page has settled. Failed loads are counted as settled too, since a page
//! that will never arrive must not wedge the progress bar below 100%; they
//! are remembered so the view can show a placeholder.

use std::collections::BTreeSet;

/// Tracks which slides of the reader have finished loading
///
/// Marking is idempotent: duplicate or late-firing load events for an
/// already-settled page do not double-count, and out-of-range indices are
/// ignored. The settled count never decreases except through [`reset`].
///
/// [`reset`]: LoadProgress::reset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadProgress {
    total_pages: usize,
    loaded: BTreeSet<usize>,
    broken: BTreeSet<usize>,
}

impl LoadProgress {
    /// Start tracking a page list of the given length
    #[must_use]
    pub const fn new(total_pages: usize) -> Self {
        Self {
            total_pages,
            loaded: BTreeSet::new(),
            broken: BTreeSet::new(),
        }
    }

    /// Number of real page images being tracked
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Number of slides, including the synthetic download prompt
    #[must_use]
    pub const fn slide_count(&self) -> usize {
        self.total_pages + 1
    }

    /// Record that a page image finished loading
    ///
    /// Returns `true` if this was the first report for the page; duplicates
    /// and out-of-range indices return `false` and change nothing.
    pub fn mark_loaded(&mut self, index: usize) -> bool {
        if index >= self.total_pages {
            return false;
        }
        self.loaded.insert(index)
    }

    /// Record that a page image failed to load
    ///
    /// The page counts as settled for progress purposes and is flagged so
    /// the view can render a broken-image placeholder.
    pub fn mark_broken(&mut self, index: usize) -> bool {
        if index >= self.total_pages {
            return false;
        }
        self.broken.insert(index);
        self.loaded.insert(index)
    }

    /// Whether a page was flagged as failed
    #[must_use]
    pub fn is_broken(&self, index: usize) -> bool {
        self.broken.contains(&index)
    }

    /// Number of real pages that have settled
    #[must_use]
    pub fn loaded_pages(&self) -> usize {
        self.loaded.len()
    }

    /// Whether every real page has settled
    #[must_use]
    pub fn all_pages_loaded(&self) -> bool {
        self.loaded.len() == self.total_pages
    }

    /// Number of settled slides, counting the auto-completing prompt slide
    #[must_use]
    pub fn loaded_slides(&self) -> usize {
        if self.all_pages_loaded() {
            self.loaded.len() + 1
        } else {
            self.loaded.len()
        }
    }

    /// Whether every slide, including the prompt, has settled
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.loaded_slides() == self.slide_count()
    }

    /// Settled slides as a rounded percentage in `0..=100`
    ///
    /// An empty page list has nothing to wait for and reports 100.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)] // slide counts are tiny
    pub fn percent(&self) -> u8 {
        ((self.loaded_slides() as f64 / self.slide_count() as f64) * 100.0).round() as u8
    }

    /// Forget all settled pages and start tracking a new page list
    pub fn reset(&mut self, total_pages: usize) {
        self.total_pages = total_pages;
        self.loaded.clear();
        self.broken.clear();
    }
}
