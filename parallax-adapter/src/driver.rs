use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use parallax::{ChannelKeyframes, Error, LayerConfig, OUTPUT_SCALE, Result, extract};

use crate::{ScrollSource, Subscription, TargetElement, Timeline};

/// Lifecycle of an [`AnimationDriver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DriverState {
    Uninitialized,
    Ready,
    /// Terminal. Reached on unmount.
    Destroyed,
}

struct Live<T> {
    timeline: T,
    base_offset: f64,
    progress: f64,
}

/// Scrubs one layer's paused timeline from a scroll source.
///
/// The driver does not hold any UI objects beyond the timeline the element handed back. Hosts
/// drive it by calling:
/// - `mount(element)` when the element appears (and again when its configuration changes)
/// - `unmount()` when it goes away
///
/// Between the two, every change on the configured scroll axis moves the timeline's playback
/// position to the matching progress. The timeline is never resumed.
pub struct AnimationDriver<S: ScrollSource, T: Timeline + 'static> {
    config: LayerConfig,
    source: S,
    state: DriverState,
    keyframes: ChannelKeyframes,
    live: Rc<RefCell<Option<Live<T>>>>,
    subscription: Option<Subscription>,
}

impl<S: ScrollSource, T: Timeline + 'static> AnimationDriver<S, T> {
    pub fn new(config: LayerConfig, source: S) -> Self {
        Self {
            config,
            source,
            state: DriverState::Uninitialized,
            keyframes: ChannelKeyframes::new(),
            live: Rc::new(RefCell::new(None)),
            subscription: None,
        }
    }

    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// The composed keyframe object the current timeline was seeded with.
    pub fn keyframes(&self) -> &ChannelKeyframes {
        &self.keyframes
    }

    /// The most recently applied progress, while ready.
    pub fn progress(&self) -> Option<f64> {
        self.live.borrow().as_ref().map(|live| live.progress)
    }

    /// The element position captured at mount, while ready.
    pub fn base_offset(&self) -> Option<f64> {
        self.live.borrow().as_ref().map(|live| live.base_offset)
    }

    /// Builds the timeline for `element` and starts following the scroll source.
    ///
    /// Returns [`Error::MissingTargetElement`] (leaving the driver untouched) when the element is
    /// not available yet; call `mount` again on the next cycle. Mounting while ready replaces the
    /// previous timeline, which is cancelled first. Mounting a destroyed driver does nothing.
    pub fn mount<E>(&mut self, element: Option<&E>) -> Result<()>
    where
        E: TargetElement<Timeline = T>,
    {
        if self.state == DriverState::Destroyed {
            pdebug!("AnimationDriver::mount: ignored after unmount");
            return Ok(());
        }
        let Some(element) = element else {
            pdebug!("AnimationDriver::mount: target element missing");
            return Err(Error::MissingTargetElement);
        };

        self.teardown();

        let axis = self.config.axis;
        let keyframes = extract(&self.config.keyframes);
        let mut timeline = element.animate(&keyframes, OUTPUT_SCALE);
        timeline.pause();
        let base_offset = element.base_offset(axis);
        pdebug!(
            ?axis,
            channels = keyframes.len(),
            keyframes = keyframes.keyframe_count(),
            base_offset,
            "AnimationDriver::mount"
        );

        *self.live.borrow_mut() = Some(Live {
            timeline,
            base_offset,
            progress: 0.0,
        });
        self.keyframes = keyframes;

        let range = self.config.range;
        let easing = self.config.easing;
        let scrub = move |live: &mut Live<T>, offset: f64| {
            let p = range.progress_eased(offset, live.base_offset, easing);
            live.timeline.set_current_time(p);
            live.progress = p;
            ptrace!(offset, progress = p, "AnimationDriver: scrub");
        };

        if let Some(live) = self.live.borrow_mut().as_mut() {
            scrub(live, self.source.current_offset(axis));
        }

        let live = Rc::clone(&self.live);
        self.subscription = Some(self.source.subscribe(
            axis,
            Box::new(move |offset| {
                if let Some(live) = live.borrow_mut().as_mut() {
                    scrub(live, offset);
                }
            }),
        ));
        self.state = DriverState::Ready;
        Ok(())
    }

    /// Replaces the configuration and, if already mounted, rebuilds against `element`.
    pub fn reconfigure<E>(&mut self, config: LayerConfig, element: Option<&E>) -> Result<()>
    where
        E: TargetElement<Timeline = T>,
    {
        self.config = config;
        match self.state {
            DriverState::Destroyed => Ok(()),
            DriverState::Uninitialized | DriverState::Ready => self.mount(element),
        }
    }

    /// Stops following the scroll source and cancels the timeline. Terminal.
    pub fn unmount(&mut self) {
        if self.state == DriverState::Destroyed {
            return;
        }
        self.teardown();
        self.state = DriverState::Destroyed;
        pdebug!("AnimationDriver::unmount");
    }

    fn teardown(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        if let Some(mut live) = self.live.borrow_mut().take() {
            live.timeline.cancel();
        }
    }
}

impl<S: ScrollSource, T: Timeline + 'static> Drop for AnimationDriver<S, T> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl<S: ScrollSource, T: Timeline + 'static> fmt::Debug for AnimationDriver<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationDriver")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("keyframes", &self.keyframes)
            .field("progress", &self.progress())
            .finish_non_exhaustive()
    }
}
