use parallax::{Axis, ScrollDirection};

use crate::{ScrollReader, ScrollSignal};

/// Placeholder the canvas shows for a scroll container with no content.
pub const EMPTY_CONTAINER_PLACEHOLDER: &str = "Select Scroll Content";

/// A scroll container: the single writer of the offsets its animated layers read.
///
/// Adapters forward the widget's content offsets through `on_scroll`; layers receive a
/// [`ScrollReader`] from `reader()`.
#[derive(Debug)]
pub struct ScrollContainer {
    direction: ScrollDirection,
    signal: ScrollSignal,
    has_content: bool,
}

impl ScrollContainer {
    pub fn new(direction: ScrollDirection) -> Self {
        Self {
            direction,
            signal: ScrollSignal::new(),
            has_content: true,
        }
    }

    pub fn with_content(mut self, has_content: bool) -> Self {
        self.has_content = has_content;
        self
    }

    pub fn direction(&self) -> ScrollDirection {
        self.direction
    }

    pub fn axis(&self) -> Axis {
        self.direction.axis()
    }

    pub fn reader(&self) -> ScrollReader {
        self.signal.reader()
    }

    pub fn offset(&self) -> f64 {
        self.signal.offset(self.axis())
    }

    /// Publishes the widget's content offsets. Only the container's own axis is forwarded.
    pub fn on_scroll(&self, x: f64, y: f64) {
        match self.axis() {
            Axis::X => self.signal.set(Axis::X, x),
            Axis::Y => self.signal.set(Axis::Y, y),
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        (!self.has_content).then_some(EMPTY_CONTAINER_PLACEHOLDER)
    }
}

impl Default for ScrollContainer {
    fn default() -> Self {
        Self::new(ScrollDirection::default())
    }
}
