//! Spread layout computation for the flip-book reader.
//!
//! Pure geometry: given the viewport and a fixed portrait aspect ratio,
//! decide between a single-page and a facing-pages spread and size the
//! pages. Recomputation is deterministic, so the reducer can re-run it on
//! every settled resize without drift.

/// Viewport dimensions in device-independent pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Viewport width
    pub width: f64,
    /// Viewport height
    pub height: f64,
}

impl Viewport {
    /// Create a viewport from width and height
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Spread orientation of the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpreadMode {
    /// One slide at a time (portrait-narrow viewports)
    Single,
    /// Two facing slides side-by-side
    Double,
}

/// Identity key for the flip widget
///
/// The flip widget cannot change its page-count mode or its height in
/// place. A changed key obliges the renderer to destroy the old widget
/// instance and construct a fresh one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetKey {
    /// Spread mode the widget was built for
    pub mode: SpreadMode,
    /// Container height, rounded to whole pixels
    pub container_height: u32,
}

/// Computed page and container geometry for one viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadLayout {
    /// Width of one page
    pub page_width: f64,
    /// Height of one page
    pub page_height: f64,
    /// Single or facing-pages spread
    pub mode: SpreadMode,
    /// Width of the book container (one or two pages wide)
    pub container_width: f64,
    /// Height of the book container
    pub container_height: f64,
}

impl SpreadLayout {
    /// Identity key of the flip widget this layout requires
    ///
    /// Sub-pixel height changes round to the same key and may be applied
    /// in place; a mode flip or a whole-pixel height change may not.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // height is clamped positive and bounded by viewport sizes
    pub fn widget_key(&self) -> WidgetKey {
        WidgetKey {
            mode: self.mode,
            container_height: self.container_height.round() as u32,
        }
    }
}

/// Geometry constants of the reader
///
/// Defaults match an A4 portrait page with a 16px margin on every edge and
/// the minimum usable tap target on tiny viewports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Page width divided by page height (A4 portrait: `1/1.414`)
    pub aspect_ratio: f64,
    /// Margin kept free on each edge of the viewport
    pub padding: f64,
    /// Lower bound for page width, applied after fitting
    pub min_width: f64,
    /// Lower bound for page height, applied after fitting
    pub min_height: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0 / 1.414,
            padding: 16.0,
            min_width: 200.0,
            min_height: 280.0,
        }
    }
}

impl LayoutConfig {
    /// Compute the spread layout for a viewport
    ///
    /// Fitting order:
    /// 1. Size one page to the available height at the fixed aspect ratio.
    /// 2. If two such pages overflow the available width, fall back to a
    ///    single-page spread; shrink to the available width if even one
    ///    page overflows.
    /// 3. Otherwise keep the facing-pages spread, capping each page at
    ///    half the available width.
    /// 4. Raise both dimensions to the configured minimums. This may break
    ///    the aspect ratio and overflow tiny viewports; a readable page
    ///    wins over a contained one.
    #[must_use]
    pub fn compute(&self, viewport: Viewport) -> SpreadLayout {
        let avail_w = viewport.width - 2.0 * self.padding;
        let avail_h = viewport.height - 2.0 * self.padding;

        let mut page_h = avail_h;
        let mut page_w = page_h * self.aspect_ratio;

        let mode = if page_w * 2.0 > avail_w {
            if page_w > avail_w {
                page_w = avail_w;
                page_h = page_w / self.aspect_ratio;
            }
            SpreadMode::Single
        } else {
            page_w = page_w.min(avail_w / 2.0);
            page_h = page_w / self.aspect_ratio;
            SpreadMode::Double
        };

        page_w = page_w.max(self.min_width);
        page_h = page_h.max(self.min_height);

        let container_width = match mode {
            SpreadMode::Single => page_w,
            SpreadMode::Double => page_w * 2.0,
        };

        SpreadLayout {
            page_width: page_w,
            page_height: page_h,
            mode,
            container_width,
            container_height: page_h,
        }
    }
}
