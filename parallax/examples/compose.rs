// Example: compose several properties into per-channel keyframes and map scroll to progress.
use parallax::{LogicalProperty, PropertyKeyframes, ScrollRange, extract, extract_prefixed};

fn main() {
    let table = PropertyKeyframes::new()
        .with(LogicalProperty::TranslateY, [0.0, -40.0, -80.0])
        .with(LogicalProperty::Rotate, [0.0, 15.0])
        .with(LogicalProperty::Opacity, [1.0, 0.0])
        .with(LogicalProperty::Blur, [0.0, 6.0]);

    let channels = extract(&table);
    for (channel, fragments) in channels.channels() {
        println!("{channel}: {fragments:?}");
    }

    // The same layer described by a host property bag.
    let bag = [
        ("title", &[][..]),
        ("anim:translateY", &[0.0, -40.0, -80.0][..]),
        ("anim:rotate", &[0.0, 15.0][..]),
    ];
    match extract_prefixed(bag) {
        Ok(channels) => println!("from bag: {:?}", channels.get(parallax::Channel::Transform)),
        Err(err) => println!("bag rejected: {err}"),
    }

    let range = ScrollRange::new(-300.0, -100.0);
    for offset in [-400.0, -300.0, -250.0, -200.0, -100.0, 0.0] {
        println!("offset={offset} progress={}", range.progress_for(offset, 0.0));
    }
}
