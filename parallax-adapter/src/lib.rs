//! Host-side utilities for the `parallax` crate.
//!
//! The `parallax` crate is UI-agnostic and only does the mapping math. This crate provides the
//! small, framework-neutral pieces a host needs to run scroll-linked layers:
//!
//! - An explicit scroll signal (`ScrollSource`) instead of implicitly shared context
//! - A timeline abstraction plus a reference scrub timeline
//! - `AnimationDriver`, which seeds a paused timeline and scrubs it on every scroll change
//! - Preview and canvas `Renderer` variants, selected once by the host
//!
//! This crate is intentionally framework-agnostic (no DOM or GPU bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod container;
mod driver;
mod renderer;
mod signal;
mod timeline;

#[cfg(test)]
mod tests;

pub use container::{EMPTY_CONTAINER_PLACEHOLDER, ScrollContainer};
pub use driver::{AnimationDriver, DriverState};
pub use renderer::{
    BoundGuide, CanvasRenderer, EMPTY_LAYER_PLACEHOLDER, Overlay, PreviewRenderer, RenderTarget,
    Renderer, select_renderer,
};
pub use signal::{ScrollReader, ScrollSignal, ScrollSource, Subscription};
pub use timeline::{ChannelSample, ScrubTimeline, StyleFrame, TargetElement, Timeline};
