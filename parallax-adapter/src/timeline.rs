use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use parallax::{Axis, Channel, ChannelKeyframes};

/// A native animation timeline seeded with composed keyframes.
///
/// Implementations interpolate between keyframes themselves; the driver only moves the playback
/// position of a paused timeline.
pub trait Timeline {
    fn set_current_time(&mut self, time: f64);

    /// `None` once the timeline has been cancelled.
    fn current_time(&self) -> Option<f64>;

    fn pause(&mut self);

    fn is_paused(&self) -> bool;

    /// Stops the timeline and releases its effect on the element.
    fn cancel(&mut self);
}

/// The host element a layer animates.
pub trait TargetElement {
    type Timeline: Timeline;

    /// The element's static layout position along `axis`, read once at mount.
    fn base_offset(&self, axis: Axis) -> f64;

    /// Creates a timeline for `keyframes` lasting `duration` units.
    fn animate(&self, keyframes: &ChannelKeyframes, duration: f64) -> Self::Timeline;
}

#[derive(Debug)]
struct ScrubState {
    keyframes: ChannelKeyframes,
    duration: f64,
    current_time: f64,
    paused: bool,
    cancelled: bool,
}

/// A reference [`Timeline`] for hosts without a native one.
///
/// Clones share the same state, so an element can hand one clone to the driver and keep another
/// for rendering. Keyframes of each channel are spaced evenly over the duration.
#[derive(Clone, Debug)]
pub struct ScrubTimeline {
    state: Rc<RefCell<ScrubState>>,
}

impl ScrubTimeline {
    pub fn new(keyframes: ChannelKeyframes, duration: f64) -> Self {
        let duration = if duration > 0.0 { duration } else { 1.0 };
        Self {
            state: Rc::new(RefCell::new(ScrubState {
                keyframes,
                duration,
                current_time: 0.0,
                paused: false,
                cancelled: false,
            })),
        }
    }

    pub fn duration(&self) -> f64 {
        self.state.borrow().duration
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.borrow().cancelled
    }

    pub fn keyframes(&self) -> ChannelKeyframes {
        self.state.borrow().keyframes.clone()
    }

    /// The keyframe pair each channel sits between at the current time.
    ///
    /// A cancelled timeline has no effect and samples to an empty frame.
    pub fn sample(&self) -> StyleFrame {
        let state = self.state.borrow();
        if state.cancelled {
            return StyleFrame::default();
        }
        let at = (state.current_time / state.duration).clamp(0.0, 1.0);
        let samples = state
            .keyframes
            .channels()
            .filter_map(|(channel, fragments)| sample_channel(channel, fragments, at))
            .collect();
        StyleFrame { samples }
    }
}

fn sample_channel(channel: Channel, fragments: &[String], at: f64) -> Option<ChannelSample> {
    let last = fragments.len().checked_sub(1)?;
    if last == 0 {
        return Some(ChannelSample {
            channel,
            from: fragments[0].clone(),
            to: fragments[0].clone(),
            t: 0.0,
        });
    }
    let pos = at * last as f64;
    // `pos` is non-negative, so truncation is floor.
    let index = (pos as usize).min(last - 1);
    Some(ChannelSample {
        channel,
        from: fragments[index].clone(),
        to: fragments[index + 1].clone(),
        t: pos - index as f64,
    })
}

impl Timeline for ScrubTimeline {
    fn set_current_time(&mut self, time: f64) {
        let mut state = self.state.borrow_mut();
        if !state.cancelled {
            state.current_time = time;
        }
    }

    fn current_time(&self) -> Option<f64> {
        let state = self.state.borrow();
        (!state.cancelled).then_some(state.current_time)
    }

    fn pause(&mut self) {
        self.state.borrow_mut().paused = true;
    }

    fn is_paused(&self) -> bool {
        self.state.borrow().paused
    }

    fn cancel(&mut self) {
        let mut state = self.state.borrow_mut();
        state.cancelled = true;
        state.current_time = 0.0;
    }
}

/// Where one channel sits between two neighbouring keyframes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelSample {
    pub channel: Channel,
    pub from: String,
    pub to: String,
    /// Position between `from` (0) and `to` (1).
    pub t: f64,
}

impl ChannelSample {
    /// The keyframe closer to the current position.
    pub fn nearest(&self) -> &str {
        if self.t < 0.5 { &self.from } else { &self.to }
    }
}

/// Per-channel samples of a timeline at one instant, pushed to the renderer.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleFrame {
    pub samples: Vec<ChannelSample>,
}

impl StyleFrame {
    pub fn get(&self, channel: Channel) -> Option<&ChannelSample> {
        self.samples.iter().find(|s| s.channel == channel)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
