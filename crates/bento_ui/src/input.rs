//! Events the host forwards to the engine.

use bento_core::Point;

/// Pointer activity over the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// The pointer moved to a page position.
    Move(Point),
    /// The pointer entered the card at this index.
    Enter(usize),
    /// The pointer left the card at this index.
    Leave(usize),
}

/// Viewport activity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportEvent {
    /// The viewport width changed.
    Resize(f32),
}
