use crate::*;

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use parallax::{Axis, Channel, ChannelKeyframes, Easing, Error, LayerConfig, LogicalProperty};
use parallax::{OUTPUT_SCALE, PropertyKeyframes, ScrollDirection};

/// A host element that records every timeline created for it.
#[derive(Debug, Default)]
struct TestElement {
    base_x: f64,
    base_y: f64,
    timelines: RefCell<Vec<ScrubTimeline>>,
}

impl TestElement {
    fn at(base_x: f64, base_y: f64) -> Self {
        Self {
            base_x,
            base_y,
            timelines: RefCell::new(Vec::new()),
        }
    }

    fn timeline(&self, i: usize) -> ScrubTimeline {
        self.timelines.borrow()[i].clone()
    }

    fn latest(&self) -> ScrubTimeline {
        self.timelines.borrow().last().cloned().unwrap()
    }

    fn timeline_count(&self) -> usize {
        self.timelines.borrow().len()
    }
}

impl TargetElement for TestElement {
    type Timeline = ScrubTimeline;

    fn base_offset(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.base_x,
            Axis::Y => self.base_y,
        }
    }

    fn animate(&self, keyframes: &ChannelKeyframes, duration: f64) -> ScrubTimeline {
        let timeline = ScrubTimeline::new(keyframes.clone(), duration);
        self.timelines.borrow_mut().push(timeline.clone());
        timeline
    }
}

fn translate_x_layer() -> LayerConfig {
    LayerConfig::new(PropertyKeyframes::new().with(LogicalProperty::TranslateX, [0.0, 100.0]))
        .with_range(-100.0, 0.0)
        .with_axis(Axis::X)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn transform_now(timeline: &ScrubTimeline) -> String {
    timeline
        .sample()
        .get(Channel::Transform)
        .unwrap()
        .nearest()
        .into()
}

#[test]
fn scroll_scrubs_translate_between_first_and_last_keyframe() {
    let signal = ScrollSignal::new();
    let element = TestElement::default();
    let mut driver = AnimationDriver::new(translate_x_layer(), signal.reader());
    driver.mount(Some(&element)).unwrap();
    assert_eq!(driver.state(), DriverState::Ready);

    let timeline = element.latest();
    assert_eq!(timeline.duration(), OUTPUT_SCALE);

    signal.set(Axis::X, -100.0);
    assert_eq!(driver.progress(), Some(0.0));
    assert_eq!(timeline.current_time(), Some(0.0));
    assert_eq!(transform_now(&timeline), "translateX(0px)");

    signal.set(Axis::X, 0.0);
    assert_eq!(driver.progress(), Some(OUTPUT_SCALE));
    assert_eq!(transform_now(&timeline), "translateX(100px)");

    // In between, the timeline reports its own position between the two keyframes.
    signal.set(Axis::X, -50.0);
    let sample = timeline.sample();
    let transform = sample.get(Channel::Transform).unwrap();
    assert_eq!(transform.from, "translateX(0px)");
    assert_eq!(transform.to, "translateX(100px)");
    assert_eq!(transform.t, 0.5);
}

#[test]
fn mount_applies_the_current_offset_and_leaves_the_timeline_paused() {
    let signal = ScrollSignal::new();
    signal.set(Axis::X, -75.0);
    let element = TestElement::default();
    let mut driver = AnimationDriver::new(translate_x_layer(), signal.reader());
    driver.mount(Some(&element)).unwrap();

    assert_eq!(driver.progress(), Some(250.0));
    let timeline = element.latest();
    assert!(timeline.is_paused());

    signal.set(Axis::X, -10.0);
    assert!(timeline.is_paused());
    assert_eq!(timeline.current_time(), Some(900.0));
}

#[test]
fn missing_element_is_recoverable_on_the_next_mount() {
    let signal = ScrollSignal::new();
    let mut driver = AnimationDriver::new(translate_x_layer(), signal.reader());

    let err = driver.mount::<TestElement>(None).unwrap_err();
    assert_eq!(err, Error::MissingTargetElement);
    assert_eq!(driver.state(), DriverState::Uninitialized);
    assert_eq!(signal.subscriber_count(Axis::X), 0);
    assert!(driver.keyframes().is_empty());

    let element = TestElement::default();
    driver.mount(Some(&element)).unwrap();
    assert_eq!(driver.state(), DriverState::Ready);
    assert_eq!(signal.subscriber_count(Axis::X), 1);
    assert_eq!(
        driver.keyframes().get(Channel::Transform).unwrap().len(),
        2
    );
}

#[test]
fn remount_cancels_the_orphaned_timeline() {
    let signal = ScrollSignal::new();
    let element = TestElement::default();
    let mut driver = AnimationDriver::new(translate_x_layer(), signal.reader());
    driver.mount(Some(&element)).unwrap();

    let next = translate_x_layer().with_range(-200.0, 0.0);
    driver.reconfigure(next.clone(), Some(&element)).unwrap();
    assert_eq!(driver.config(), &next);

    assert_eq!(element.timeline_count(), 2);
    assert!(element.timeline(0).is_cancelled());
    assert!(!element.timeline(1).is_cancelled());
    assert_eq!(signal.subscriber_count(Axis::X), 1);

    signal.set(Axis::X, -100.0);
    assert_eq!(driver.progress(), Some(500.0));
    assert_eq!(element.timeline(0).current_time(), None);
}

#[test]
fn unmount_stops_updates_and_is_terminal() {
    let signal = ScrollSignal::new();
    let element = TestElement::default();
    let mut driver = AnimationDriver::new(translate_x_layer(), signal.reader());
    driver.mount(Some(&element)).unwrap();
    signal.set(Axis::X, -50.0);

    driver.unmount();
    assert_eq!(driver.state(), DriverState::Destroyed);
    assert_eq!(signal.subscriber_count(Axis::X), 0);
    assert!(element.latest().is_cancelled());
    assert!(element.latest().sample().is_empty());
    assert_eq!(driver.progress(), None);

    signal.set(Axis::X, -80.0);
    assert_eq!(element.latest().current_time(), None);

    driver.mount(Some(&element)).unwrap();
    assert_eq!(driver.state(), DriverState::Destroyed);
    assert_eq!(element.timeline_count(), 1);
}

#[test]
fn dropping_the_driver_releases_its_timeline() {
    let signal = ScrollSignal::new();
    let element = TestElement::default();
    {
        let mut driver = AnimationDriver::new(translate_x_layer(), signal.reader());
        driver.mount(Some(&element)).unwrap();
        assert_eq!(signal.subscriber_count(Axis::X), 1);
    }
    assert_eq!(signal.subscriber_count(Axis::X), 0);
    assert!(element.latest().is_cancelled());
}

#[test]
fn driver_follows_only_its_configured_axis() {
    let signal = ScrollSignal::new();
    let element = TestElement::default();
    let config = translate_x_layer().with_axis(Axis::Y);
    let mut driver = AnimationDriver::new(config, signal.reader());
    driver.mount(Some(&element)).unwrap();
    assert_eq!(driver.progress(), Some(OUTPUT_SCALE));

    signal.set(Axis::X, -100.0);
    assert_eq!(driver.progress(), Some(OUTPUT_SCALE));

    signal.set(Axis::Y, -100.0);
    assert_eq!(driver.progress(), Some(0.0));
}

#[test]
fn base_offset_is_captured_along_the_axis_at_mount() {
    let signal = ScrollSignal::new();
    let element = TestElement::at(40.0, 300.0);
    let config = translate_x_layer().with_axis(Axis::Y);
    let mut driver = AnimationDriver::new(config, signal.reader());
    driver.mount(Some(&element)).unwrap();
    assert_eq!(driver.base_offset(), Some(300.0));

    // Range -100..0 shifted by 300px of scrolling: -400..-300.
    signal.set(Axis::Y, -350.0);
    assert_eq!(driver.progress(), Some(500.0));
}

#[test]
fn easing_reshapes_driver_progress() {
    let signal = ScrollSignal::new();
    let element = TestElement::default();
    let config = translate_x_layer().with_easing(Easing::EaseIn);
    let mut driver = AnimationDriver::new(config, signal.reader());
    driver.mount(Some(&element)).unwrap();

    signal.set(Axis::X, -50.0);
    assert_eq!(driver.progress(), Some(250.0));
}

#[test]
fn shared_channels_reach_the_timeline_composed() {
    let signal = ScrollSignal::new();
    let element = TestElement::default();
    let keyframes = PropertyKeyframes::new()
        .with(LogicalProperty::TranslateX, [0.0, 100.0])
        .with(LogicalProperty::Rotate, [45.0])
        .with(LogicalProperty::Opacity, [0.0, 1.0]);
    let config = LayerConfig::new(keyframes).with_range(-100.0, 0.0).with_axis(Axis::X);
    let mut driver = AnimationDriver::new(config, signal.reader());
    driver.mount(Some(&element)).unwrap();

    signal.set(Axis::X, 0.0);
    signal.set(Axis::X, -100.0);
    let frame = element.latest().sample();
    assert_eq!(frame.samples.len(), 2);
    assert_eq!(
        frame.get(Channel::Transform).unwrap().nearest(),
        "translateX(0px) rotate(45deg)"
    );
    assert_eq!(frame.get(Channel::Opacity).unwrap().nearest(), "0");
    assert!(frame.get(Channel::Filter).is_none());
}

#[test]
fn scrub_timeline_samples_evenly_spaced_keyframes() {
    let mut keyframes = ChannelKeyframes::new();
    keyframes.push(Channel::Opacity, strings(&["0", "0.5", "1"]));
    keyframes.push(Channel::Filter, strings(&["blur(2px)"]));
    let mut timeline = ScrubTimeline::new(keyframes, OUTPUT_SCALE);

    timeline.set_current_time(500.0);
    let frame = timeline.sample();
    let opacity = frame.get(Channel::Opacity).unwrap();
    assert_eq!((opacity.from.as_str(), opacity.to.as_str(), opacity.t), ("0.5", "1", 0.0));
    let filter = frame.get(Channel::Filter).unwrap();
    assert_eq!(filter.nearest(), "blur(2px)");

    timeline.set_current_time(5000.0);
    assert_eq!(timeline.sample().get(Channel::Opacity).unwrap().nearest(), "1");

    timeline.cancel();
    timeline.set_current_time(100.0);
    assert_eq!(timeline.current_time(), None);
    assert!(timeline.sample().is_empty());
}

#[test]
fn subscriptions_notify_on_change_and_stop_when_dropped() {
    let signal = ScrollSignal::new();
    let reader = signal.reader();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    let subscription = reader.subscribe(
        Axis::Y,
        Box::new(move |v| sink.borrow_mut().push(v)),
    );

    signal.set(Axis::Y, -10.0);
    signal.set(Axis::Y, -10.0);
    signal.set(Axis::X, -99.0);
    signal.set_offsets(-99.0, -20.0);
    assert_eq!(*seen.borrow(), [-10.0, -20.0]);
    assert_eq!(reader.current_offset(Axis::X), -99.0);

    drop(subscription);
    signal.set(Axis::Y, -30.0);
    assert_eq!(seen.borrow().len(), 2);
    assert_eq!(signal.subscriber_count(Axis::Y), 0);
}

#[test]
fn callbacks_may_read_the_signal_during_dispatch() {
    let signal = ScrollSignal::new();
    let reader = signal.reader();
    let observed = Rc::new(Cell::new(0.0));

    let inner = reader.clone();
    let out = Rc::clone(&observed);
    let _subscription = reader.subscribe(
        Axis::X,
        Box::new(move |_| out.set(inner.current_offset(Axis::X))),
    );

    signal.set(Axis::X, -42.0);
    assert_eq!(observed.get(), -42.0);
}

#[test]
fn callbacks_may_write_the_signal_during_dispatch() {
    let signal = Rc::new(ScrollSignal::new());
    let calls = Rc::new(Cell::new(0));

    // Clamps overscroll back to -100 from inside its own notification.
    let weak = Rc::downgrade(&signal);
    let count = Rc::clone(&calls);
    let _subscription = signal.reader().subscribe(
        Axis::Y,
        Box::new(move |v| {
            count.set(count.get() + 1);
            if v < -100.0 {
                if let Some(signal) = weak.upgrade() {
                    signal.set(Axis::Y, -100.0);
                }
            }
        }),
    );

    signal.set(Axis::Y, -150.0);
    assert_eq!(signal.offset(Axis::Y), -100.0);
    assert_eq!(calls.get(), 1);

    signal.set(Axis::Y, -40.0);
    assert_eq!(signal.offset(Axis::Y), -40.0);
    assert_eq!(calls.get(), 2);
}

#[test]
fn subscription_teardown_runs_exactly_once() {
    let runs = Rc::new(Cell::new(0));
    let counter = Rc::clone(&runs);
    let subscription = Subscription::new(move || counter.set(counter.get() + 1));
    assert!(format!("{subscription:?}").contains("active: true"));
    subscription.unsubscribe();
    assert_eq!(runs.get(), 1);

    let empty = Subscription::empty();
    assert!(format!("{empty:?}").contains("active: false"));
    empty.unsubscribe();
}

#[test]
fn explicit_unsubscribe_outliving_the_signal_is_harmless() {
    let signal = ScrollSignal::new();
    let subscription = signal.reader().subscribe(Axis::Y, Box::new(|_| {}));
    drop(signal);
    subscription.unsubscribe();
}

#[test]
fn preview_renderer_defers_missing_elements() {
    let signal = ScrollSignal::new();
    let mut renderer =
        PreviewRenderer::<ScrollReader, TestElement>::new(translate_x_layer(), signal.reader());
    assert_eq!(renderer.target(), RenderTarget::Preview);

    renderer.mount(None).unwrap();
    assert_eq!(renderer.driver().state(), DriverState::Uninitialized);

    let element = TestElement::default();
    renderer.mount(Some(&element)).unwrap();
    assert_eq!(renderer.driver().state(), DriverState::Ready);
    assert_eq!(renderer.overlay(), Overlay::default());

    renderer.unmount();
    assert_eq!(renderer.driver().state(), DriverState::Destroyed);
}

#[test]
fn canvas_renderer_draws_bounds_along_the_axis() {
    let signal = ScrollSignal::new();
    let config = translate_x_layer().with_range(-120.0, -40.0);

    let mut canvas = select_renderer::<_, TestElement>(
        RenderTarget::Canvas,
        config.clone(),
        signal.reader(),
        false,
    );
    assert_eq!(canvas.target(), RenderTarget::Canvas);
    let element = TestElement::default();
    canvas.mount(Some(&element)).unwrap();
    assert_eq!(element.timeline_count(), 0);
    assert_eq!(signal.subscriber_count(Axis::X), 0);

    let overlay = canvas.overlay();
    assert_eq!(
        overlay.guides,
        [
            BoundGuide { axis: Axis::X, position: -120.0 },
            BoundGuide { axis: Axis::X, position: -40.0 },
        ]
    );
    assert_eq!(overlay.placeholder, Some(EMPTY_LAYER_PLACEHOLDER));

    let hidden = CanvasRenderer::<TestElement>::new(config.with_show_bounds(false), true);
    assert_eq!(hidden.overlay(), Overlay::default());

    let preview = select_renderer::<_, TestElement>(
        RenderTarget::Preview,
        LayerConfig::default(),
        signal.reader(),
        true,
    );
    assert_eq!(preview.target(), RenderTarget::Preview);
}

#[test]
fn container_forwards_only_its_own_axis() {
    let container = ScrollContainer::new(ScrollDirection::Horizontal);
    let reader = container.reader();
    container.on_scroll(-30.0, -500.0);

    assert_eq!(container.axis(), Axis::X);
    assert_eq!(container.offset(), -30.0);
    assert_eq!(reader.current_offset(Axis::X), -30.0);
    assert_eq!(reader.current_offset(Axis::Y), 0.0);
    assert_eq!(container.placeholder(), None);

    let empty = ScrollContainer::default().with_content(false);
    assert_eq!(empty.direction(), ScrollDirection::Vertical);
    assert_eq!(empty.placeholder(), Some(EMPTY_CONTAINER_PLACEHOLDER));
}

#[test]
fn layers_in_one_container_animate_independently() {
    let container = ScrollContainer::new(ScrollDirection::Vertical);
    let near = TestElement::at(0.0, 0.0);
    let far = TestElement::at(0.0, 100.0);

    let config = LayerConfig::new(PropertyKeyframes::new().with(LogicalProperty::Opacity, [0.0, 1.0]))
        .with_range(-100.0, 0.0);
    let mut a = AnimationDriver::new(config.clone(), container.reader());
    let mut b = AnimationDriver::new(config, container.reader());
    a.mount(Some(&near)).unwrap();
    b.mount(Some(&far)).unwrap();

    container.on_scroll(0.0, -100.0);
    assert_eq!(a.progress(), Some(0.0));
    assert_eq!(b.progress(), Some(OUTPUT_SCALE));

    a.unmount();
    container.on_scroll(0.0, -150.0);
    assert_eq!(a.progress(), None);
    assert_eq!(b.progress(), Some(500.0));
}
