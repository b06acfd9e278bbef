// Example: a container feeding two layers, each scrubbing its own paused timeline.
use parallax::{Axis, Channel, ChannelKeyframes, LayerConfig, LogicalProperty, PropertyKeyframes};
use parallax::ScrollDirection;
use parallax_adapter::{AnimationDriver, ScrollContainer, ScrubTimeline, TargetElement};

struct Layer {
    top: f64,
    timeline: std::cell::RefCell<Option<ScrubTimeline>>,
}

impl TargetElement for Layer {
    type Timeline = ScrubTimeline;

    fn base_offset(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => 0.0,
            Axis::Y => self.top,
        }
    }

    fn animate(&self, keyframes: &ChannelKeyframes, duration: f64) -> ScrubTimeline {
        let timeline = ScrubTimeline::new(keyframes.clone(), duration);
        *self.timeline.borrow_mut() = Some(timeline.clone());
        timeline
    }
}

fn main() {
    let container = ScrollContainer::new(ScrollDirection::Vertical);

    let config = LayerConfig::new(
        PropertyKeyframes::new()
            .with(LogicalProperty::TranslateY, [0.0, -120.0])
            .with(LogicalProperty::Scale, [1.0, 1.2]),
    )
    .with_range(-200.0, 0.0);

    let layers = [0.0, 400.0].map(|top| Layer {
        top,
        timeline: std::cell::RefCell::new(None),
    });
    let mut drivers: Vec<_> = layers
        .iter()
        .map(|layer| {
            let mut driver = AnimationDriver::new(config.clone(), container.reader());
            if let Err(err) = driver.mount(Some(layer)) {
                println!("mount failed: {err}");
            }
            driver
        })
        .collect();

    // Simulate a 60fps scroll down the page.
    for frame in 0..=12 {
        let y = -(frame as f64) * 50.0;
        container.on_scroll(0.0, y);

        let styles: Vec<String> = layers
            .iter()
            .map(|layer| {
                let timeline = layer.timeline.borrow();
                let frame = timeline.as_ref().map(ScrubTimeline::sample).unwrap_or_default();
                frame
                    .get(Channel::Transform)
                    .map(|s| format!("{} -> {} @ {:.2}", s.from, s.to, s.t))
                    .unwrap_or_default()
            })
            .collect();
        println!("y={y}: {styles:?}");
    }

    for driver in &mut drivers {
        driver.unmount();
    }
}
