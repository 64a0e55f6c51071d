//! Virtual scrolling over a flattened list of fixed-height rows.
//!
//! Only the rows intersecting the viewport, plus `overscan` rows on either
//! side, are materialized. The window is recomputed synchronously on every
//! scroll; the only cached input is the last scroll offset.
//!
//! A non-positive item or container height is a caller error and is not
//! checked.

use std::ops::RangeInclusive;

/// Rows rendered on either side of the viewport by default.
pub const DEFAULT_OVERSCAN: usize = 5;

type ScrollFn = Box<dyn FnMut(u32)>;

pub struct VirtualWindow {
    item_height: u32,
    container_height: u32,
    overscan: usize,
    len: usize,
    scroll_top: u32,
    range: Option<RangeInclusive<usize>>,
    on_scroll: Option<ScrollFn>,
}

impl std::fmt::Debug for VirtualWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VirtualWindow")
            .field("item_height", &self.item_height)
            .field("container_height", &self.container_height)
            .field("overscan", &self.overscan)
            .field("len", &self.len)
            .field("scroll_top", &self.scroll_top)
            .field("range", &self.range)
            .finish()
    }
}

/// The materialized part of a list, ready to be positioned.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedWindow<R> {
    /// Height of the spacer that gives the scroll container its full extent.
    pub total_height: u64,
    /// Absolute offset at which the first rendered row is placed.
    pub offset_y: u64,
    /// Index of the first rendered row.
    pub start_index: usize,
    pub rows: Vec<R>,
}

impl VirtualWindow {
    pub fn new(item_height: u32, container_height: u32) -> Self {
        Self {
            item_height,
            container_height,
            overscan: DEFAULT_OVERSCAN,
            len: 0,
            scroll_top: 0,
            range: None,
            on_scroll: None,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self.recompute();
        self
    }

    /// Called with the new offset after every scroll.
    pub fn on_scroll(mut self, f: impl FnMut(u32) + 'static) -> Self {
        self.on_scroll = Some(Box::new(f));
        self
    }

    pub fn item_height(&self) -> u32 {
        self.item_height
    }

    pub fn container_height(&self) -> u32 {
        self.container_height
    }

    pub fn overscan(&self) -> usize {
        self.overscan
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    /// Inclusive range of rows to materialize, `None` when nothing is.
    pub fn range(&self) -> Option<RangeInclusive<usize>> {
        self.range.clone()
    }

    pub fn start_index(&self) -> Option<usize> {
        self.range.as_ref().map(|r| *r.start())
    }

    pub fn end_index(&self) -> Option<usize> {
        self.range.as_ref().map(|r| *r.end())
    }

    pub fn total_height(&self) -> u64 {
        self.len as u64 * self.item_height as u64
    }

    /// Largest offset that still fills the viewport.
    pub fn max_scroll_top(&self) -> u32 {
        let max = self
            .total_height()
            .saturating_sub(self.container_height as u64);
        max.min(u32::MAX as u64) as u32
    }

    /// Offset of the first rendered row. The offset is clamped, so the range
    /// is only empty for an empty list, where this is 0.
    pub fn offset_y(&self) -> u64 {
        self.start_index().unwrap_or(0) as u64 * self.item_height as u64
    }

    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.recompute();
    }

    pub fn set_container_height(&mut self, container_height: u32) {
        self.container_height = container_height;
        self.recompute();
    }

    /// Scroll event: record the offset, clamped to the content, and
    /// recompute the range.
    pub fn scroll_to(&mut self, scroll_top: u32) {
        self.scroll_top = scroll_top;
        self.recompute();
        let top = self.scroll_top;
        if let Some(f) = self.on_scroll.as_mut() {
            f(top);
        }
    }

    /// Put row `index` at the top of the viewport.
    pub fn scroll_to_index(&mut self, index: usize) {
        let top = (index as u64 * self.item_height as u64).min(u32::MAX as u64) as u32;
        self.scroll_to(top);
    }

    /// Scroll the minimum needed for row `index` to be fully inside the
    /// viewport. Returns true if the offset changed.
    pub fn ensure_visible(&mut self, index: usize) -> bool {
        let top = index as u64 * self.item_height as u64;
        let bottom = top + self.item_height as u64;
        let view_top = self.scroll_top as u64;
        let view_bottom = view_top + self.container_height as u64;

        if top < view_top {
            self.scroll_to_index(index);
            true
        } else if bottom > view_bottom {
            let aligned = bottom.saturating_sub(self.container_height as u64);
            self.scroll_to(aligned.min(u32::MAX as u64) as u32);
            true
        } else {
            false
        }
    }

    /// Materialize the current range of `items`. `render` receives each item
    /// with its absolute index.
    pub fn render<T, R>(
        &self,
        items: &[T],
        mut render: impl FnMut(&T, usize) -> R,
    ) -> RenderedWindow<R> {
        let rows = match &self.range {
            Some(range) => range
                .clone()
                .filter_map(|i| items.get(i).map(|item| render(item, i)))
                .collect(),
            None => Vec::new(),
        };
        RenderedWindow {
            total_height: items.len() as u64 * self.item_height as u64,
            offset_y: self.offset_y(),
            start_index: self.start_index().unwrap_or(0),
            rows,
        }
    }

    fn recompute(&mut self) {
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());
        self.range = visible_range(
            self.len,
            self.item_height,
            self.container_height,
            self.overscan,
            self.scroll_top,
        );
        log::trace!(
            "[window] scroll_top={} len={} range={:?}",
            self.scroll_top,
            self.len,
            self.range
        );
    }
}

/// `start = max(0, floor(s / h) - overscan)`,
/// `end = min(n - 1, ceil((s + container) / h) + overscan)`.
///
/// `None` for an empty list or an offset past the end. [`VirtualWindow`]
/// clamps its offset first, so it only sees the empty case.
pub fn visible_range(
    len: usize,
    item_height: u32,
    container_height: u32,
    overscan: usize,
    scroll_top: u32,
) -> Option<RangeInclusive<usize>> {
    if len == 0 {
        return None;
    }
    let item_height = item_height as u64;
    let first = (scroll_top as u64 / item_height) as usize;
    let last = (scroll_top as u64 + container_height as u64).div_ceil(item_height) as usize;

    let start = first.saturating_sub(overscan);
    let end = last.saturating_add(overscan).min(len - 1);
    (start <= end).then_some(start..=end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_formula() {
        assert_eq!(visible_range(1000, 40, 400, 5, 2000), Some(45..=65));
        assert_eq!(visible_range(1000, 40, 400, 5, 0), Some(0..=15));
        assert_eq!(visible_range(12, 40, 400, 5, 0), Some(0..=11));
        assert_eq!(visible_range(0, 40, 400, 5, 0), None);
    }

    #[test]
    fn scrolled_past_the_end_renders_nothing() {
        assert_eq!(visible_range(10, 40, 400, 0, 4000), None);
    }

    #[test]
    fn offset_is_clamped_to_content() {
        let mut w = VirtualWindow::new(40, 400).with_overscan(0);
        w.set_len(10);
        w.scroll_to(4000);
        assert_eq!(w.scroll_top(), 0);
        assert_eq!(w.range(), Some(0..=9));

        w.set_len(30);
        w.scroll_to(4000);
        assert_eq!(w.max_scroll_top(), 800);
        assert_eq!(w.scroll_top(), 800);
        assert_eq!(w.offset_y(), 800);
    }
}
