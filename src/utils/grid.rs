//! Canvas grid and scroll geometry. Pure math; the host owns the actual
//! scrolling and rendering.

pub const DEFAULT_GRID_ROW_HEIGHT: f64 = 10.0;
pub const CANVAS_EXTENSION_OFFSET: f64 = 2.0;

const SCROLL_THRESHOLD: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    RightBottom,
}

/// Bounding box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Snap a point to the nearest grid cell.
pub fn snap_to_grid(column_width: f64, row_height: f64, x: f64, y: f64) -> (i64, i64) {
    let snapped_x = (x / column_width).round() as i64;
    let snapped_y = (y / row_height).round() as i64;
    (snapped_x, snapped_y)
}

/// How far the parent should scroll to keep an element clear of its edges.
/// Negative means scroll up. Zero when the element sits comfortably inside.
pub fn scroll_by_pixels(elem: Rect, parent: Rect) -> f64 {
    let scroll_amount = CANVAS_EXTENSION_OFFSET * DEFAULT_GRID_ROW_HEIGHT;

    if elem.top > 0.0 && elem.top - parent.top < SCROLL_THRESHOLD {
        return -scroll_amount;
    }
    if parent.bottom - elem.bottom < SCROLL_THRESHOLD {
        return scroll_amount;
    }
    0.0
}

/// The scroll the host should apply to bring an element into its parent's
/// view, or `None` when no adjustment is needed. Upward scrolls are only
/// emitted when there is scroll room left.
pub fn scroll_adjustment(elem: Rect, parent: Rect, scroll_top: f64) -> Option<f64> {
    let scroll_by = scroll_by_pixels(elem, parent);
    if scroll_by < 0.0 && scroll_top > 0.0 {
        return Some(scroll_by);
    }
    if scroll_by > 0.0 {
        return Some(scroll_by);
    }
    None
}

/// Whether CSS-style ellipsis truncation is active: content overflows the
/// box in either dimension.
pub fn is_ellipsis_active(offset: Size, scroll: Size) -> bool {
    offset.width < scroll.width || offset.height < scroll.height
}
