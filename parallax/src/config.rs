use crate::{Easing, PropertyKeyframes, ScrollRange};

/// Lower bound the host inspector offers for `from`/`to`.
pub const FROM_TO_MIN: f64 = -750.0;
/// Upper bound the host inspector offers for `from`/`to`.
pub const FROM_TO_MAX: f64 = 500.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    X,
    #[default]
    Y,
}

/// Direction a scroll container scrolls in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScrollDirection {
    #[default]
    Vertical,
    Horizontal,
}

impl ScrollDirection {
    pub fn axis(self) -> Axis {
        match self {
            Self::Vertical => Axis::Y,
            Self::Horizontal => Axis::X,
        }
    }
}

/// Everything the host configures on one animated layer.
///
/// Defaults: range `-100..-50`, vertical axis, linear easing, bound guides shown, no keyframes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct LayerConfig {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub range: ScrollRange,
    #[cfg_attr(feature = "serde", serde(rename = "scrollAxis"))]
    pub axis: Axis,
    pub easing: Easing,
    /// Whether the canvas variant draws guides at `from` and `to`.
    #[cfg_attr(feature = "serde", serde(rename = "animationBorders"))]
    pub show_bounds: bool,
    pub keyframes: PropertyKeyframes,
}

impl LayerConfig {
    pub fn new(keyframes: PropertyKeyframes) -> Self {
        Self {
            keyframes,
            ..Self::default()
        }
    }

    pub fn with_range(mut self, from: f64, to: f64) -> Self {
        self.range = ScrollRange::new(from, to);
        self
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_show_bounds(mut self, show_bounds: bool) -> Self {
        self.show_bounds = show_bounds;
        self
    }

    /// Keeps `from`/`to` within the inspector's bounds.
    pub fn clamped(mut self) -> Self {
        self.range.from = self.range.from.clamp(FROM_TO_MIN, FROM_TO_MAX);
        self.range.to = self.range.to.clamp(FROM_TO_MIN, FROM_TO_MAX);
        self
    }
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            range: ScrollRange::default(),
            axis: Axis::default(),
            easing: Easing::default(),
            show_bounds: true,
            keyframes: PropertyKeyframes::default(),
        }
    }
}
