//! A headless engine for scroll-linked layer animation.
//!
//! For host-side utilities (scroll signals, timeline driving, render variants), see the
//! `parallax-adapter` crate.
//!
//! This crate focuses on the pure mapping from a scroll position to the style a layer should
//! show: resolving animatable properties to style channels, composing several properties that
//! share a channel into one keyframe sequence, and turning a scroll offset into timeline progress.
//!
//! It is UI-agnostic. A host is expected to provide:
//! - per-layer keyframe values and a `from`/`to` scroll range
//! - the current scroll offset
//! - a (native) timeline that interpolates the composed keyframes
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod compositor;
mod config;
mod easing;
mod error;
mod keyframes;
mod progress;
mod registry;


pub use compositor::{ChannelKeyframes, compose};
pub use config::{Axis, FROM_TO_MAX, FROM_TO_MIN, LayerConfig, ScrollDirection};
pub use easing::Easing;
pub use error::{Error, Result};
pub use keyframes::{PROP_PREFIX, PropertyKeyframes, extract, extract_prefixed};
pub use progress::{OUTPUT_SCALE, ScrollRange, progress};
pub use registry::{Channel, LogicalProperty, PropertyControl, Resolved, UnitFamily, resolve};
