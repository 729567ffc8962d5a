use crate::util::coalesce::WheelDelta;
use crate::util::layout::{self, FoldParams, LayoutError, TabRect};

/// A horizontal strip of tabs and the scroll state that belongs to it.
///
/// The layout engine is stateless; everything that changes between frames lives here
/// and is passed in explicitly on every layout pass.
pub struct TabStrip {
    /// Tab labels (index is the identity)
    labels: Vec<String>,
    /// Folding constants
    params: FoldParams,
    /// Current scroll offset, always clamped
    scroll_offset: f32,
    /// Width of the visible container
    container_width: f32,
    /// Currently selected tab index
    current_index: usize,
}

impl TabStrip {
    pub fn new(labels: Vec<String>, params: FoldParams) -> Self {
        Self {
            labels,
            params,
            scroll_offset: 0.0,
            container_width: 0.0,
            current_index: 0,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn params(&self) -> &FoldParams {
        &self.params
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn container_width(&self) -> f32 {
        self.container_width
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_width(&self) -> f32 {
        self.params.total_width(self.labels.len())
    }

    /// Replace the tab list. The offset is re-clamped against the new total width.
    pub fn set_labels(&mut self, labels: Vec<String>) {
        self.labels = labels;
        if self.current_index >= self.labels.len() {
            self.current_index = self.labels.len().saturating_sub(1);
        }
        self.set_offset(self.scroll_offset);
    }

    /// Record a new container width from the host's resize observation.
    pub fn set_container_width(&mut self, width: f32) -> Result<(), LayoutError> {
        layout::check_container_width(width)?;
        if (self.container_width - width).abs() > f32::EPSILON {
            log::debug!("tab strip container width {} -> {}", self.container_width, width);
        }
        self.container_width = width;
        self.set_offset(self.scroll_offset);
        Ok(())
    }

    /// Apply a merged wheel delta.
    pub fn scroll_by(&mut self, delta: WheelDelta) {
        let amount = layout::wheel_scroll_amount(delta.x, delta.y);
        self.set_offset(self.scroll_offset + amount);
    }

    /// Select a tab and scroll it fully into view. Returns its label.
    pub fn select(&mut self, index: usize) -> Option<&str> {
        if index >= self.labels.len() {
            return None;
        }

        self.current_index = index;
        self.scroll_offset = layout::reveal_offset(
            index,
            self.params.tab_width,
            self.scroll_offset,
            self.container_width,
            self.total_width(),
        );

        self.labels.get(index).map(String::as_str)
    }

    /// Compute the folded layout for the current state.
    pub fn layout(&self) -> Result<Vec<TabRect>, LayoutError> {
        self.params
            .layout(self.labels.len(), self.scroll_offset, self.container_width)
    }

    fn set_offset(&mut self, requested: f32) {
        self.scroll_offset = layout::clamp_offset(requested, self.total_width(), self.container_width);
    }
}
