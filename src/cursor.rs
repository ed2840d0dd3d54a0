use crate::configuration::LayoutConfiguration;

/// Where the next block is written: a page index and a vertical offset on that page.
///
/// The cursor is a plain value. Renderers take it, move it and hand it back, so no layout state
/// outlives a single generation call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub page_index: usize,
    pub y: f32,
    top: f32,
    bottom: f32,
}

impl LayoutCursor {
    /// A cursor at the top of the first page.
    pub fn new(configuration: &LayoutConfiguration) -> Self {
        LayoutCursor {
            page_index: 0,
            y: configuration.top_margin,
            top: configuration.top_margin,
            bottom: configuration.safe_bottom(),
        }
    }

    /// The same cursor moved to an absolute offset on its current page.
    pub fn at(self, y: f32) -> Self {
        LayoutCursor { y, ..self }
    }

    /// Whether a block of `height` still fits above the safe bottom of the current page.
    pub fn fits(&self, height: f32) -> bool {
        self.y + height <= self.bottom
    }

    /// Makes room for a block of `height`, moving to a new page when it does not fit, and returns
    /// the Y the block starts at. A cursor already at the top of a page never breaks again.
    pub fn reserve(&mut self, height: f32) -> f32 {
        if !self.fits(height) && self.y > self.top {
            log::debug!(
                "Page break after page {} at y = {:.1} for a block of {:.1} mm",
                self.page_index + 1,
                self.y,
                height
            );
            self.page_index += 1;
            self.y = self.top;
        } else {
            log::trace!("Reserved {:.1} mm at y = {:.1}", height, self.y);
        }

        self.y
    }

    /// Moves down by `height` without drawing.
    pub fn advance(&mut self, height: f32) {
        self.y += height;
    }
}
