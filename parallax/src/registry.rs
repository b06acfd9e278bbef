use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use crate::{Error, Result};

/// A style aspect that keyframes render into.
///
/// Several logical properties may write to the same channel (all transform functions share
/// `Transform`, all filter functions share `Filter`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Channel {
    Opacity,
    Transform,
    Filter,
}

impl Channel {
    /// The CSS property name of this channel.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::Transform => "transform",
            Self::Filter => "filter",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UnitFamily {
    Unitless,
    Pixel,
    Percent,
    Degree,
    Color,
    Em,
}

impl UnitFamily {
    /// Suffix appended to a numeric value, e.g. `px`.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Unitless | Self::Color => "",
            Self::Pixel => "px",
            Self::Percent => "%",
            Self::Degree => "deg",
            Self::Em => "em",
        }
    }
}

/// One animatable attribute of a layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum LogicalProperty {
    TranslateX,
    TranslateY,
    Blur,
    Invert,
    Grayscale,
    Contrast,
    Opacity,
    Scale,
    ScaleX,
    ScaleY,
    Rotate,
    RotateX,
    RotateY,
    RotateZ,
    Skew,
    SkewX,
    SkewY,
    HueRotate,
}

impl LogicalProperty {
    /// Every property, in the order a host inspector lists them.
    pub const ALL: [LogicalProperty; 18] = [
        Self::TranslateX,
        Self::TranslateY,
        Self::Blur,
        Self::Invert,
        Self::Grayscale,
        Self::Contrast,
        Self::Opacity,
        Self::Scale,
        Self::ScaleX,
        Self::ScaleY,
        Self::Rotate,
        Self::RotateX,
        Self::RotateY,
        Self::RotateZ,
        Self::Skew,
        Self::SkewX,
        Self::SkewY,
        Self::HueRotate,
    ];

    /// The camelCase name used by host configuration, e.g. `hueRotate`.
    pub fn name(self) -> &'static str {
        match self {
            Self::TranslateX => "translateX",
            Self::TranslateY => "translateY",
            Self::Blur => "blur",
            Self::Invert => "invert",
            Self::Grayscale => "grayscale",
            Self::Contrast => "contrast",
            Self::Opacity => "opacity",
            Self::Scale => "scale",
            Self::ScaleX => "scaleX",
            Self::ScaleY => "scaleY",
            Self::Rotate => "rotate",
            Self::RotateX => "rotateX",
            Self::RotateY => "rotateY",
            Self::RotateZ => "rotateZ",
            Self::Skew => "skew",
            Self::SkewX => "skewX",
            Self::SkewY => "skewY",
            Self::HueRotate => "hueRotate",
        }
    }

    pub fn channel(self) -> Channel {
        match self {
            Self::Opacity => Channel::Opacity,
            Self::Blur | Self::Contrast | Self::Grayscale | Self::HueRotate | Self::Invert => {
                Channel::Filter
            }
            _ => Channel::Transform,
        }
    }

    pub fn unit(self) -> UnitFamily {
        match self {
            Self::Opacity | Self::Scale | Self::ScaleX | Self::ScaleY => UnitFamily::Unitless,
            Self::TranslateX | Self::TranslateY | Self::Blur => UnitFamily::Pixel,
            Self::Contrast | Self::Grayscale | Self::Invert => UnitFamily::Percent,
            Self::Rotate
            | Self::RotateX
            | Self::RotateY
            | Self::RotateZ
            | Self::Skew
            | Self::SkewX
            | Self::SkewY
            | Self::HueRotate => UnitFamily::Degree,
        }
    }

    /// Name of the CSS function wrapping the value, if any.
    ///
    /// This equals [`Self::name`] except for `hueRotate`, which CSS spells `hue-rotate`.
    fn css_function(self) -> Option<&'static str> {
        match self {
            Self::Opacity => None,
            Self::HueRotate => Some("hue-rotate"),
            other => Some(other.name()),
        }
    }

    /// Formats one keyframe value as the channel's textual fragment.
    ///
    /// `translateX` with `5.0` yields `translateX(5px)`; `opacity` yields the bare number. Zero is
    /// never signed.
    pub fn format(self, value: f64) -> String {
        // Adding zero turns -0 into 0.
        let value = value + 0.0;
        let unit = self.unit().suffix();
        match self.css_function() {
            Some(func) => format!("{func}({value}{unit})"),
            None => format!("{value}{unit}"),
        }
    }

    /// The inspector descriptor for this property.
    pub fn control(self) -> PropertyControl {
        let range = match self.unit() {
            UnitFamily::Degree => Some((0.0, 360.0)),
            _ => None,
        };
        PropertyControl {
            property: self,
            title: friendly_title(self.name()),
            unit: self.unit().suffix(),
            range,
        }
    }
}

impl fmt::Display for LogicalProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogicalProperty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| Error::UnknownProperty(s.to_string()))
    }
}

/// A registry entry: which channel a property writes to, and how its values are formatted.
#[derive(Clone, Copy, Debug)]
pub struct Resolved {
    pub property: LogicalProperty,
    pub channel: Channel,
    pub formatter: fn(LogicalProperty, f64) -> String,
}

impl Resolved {
    pub fn format(&self, value: f64) -> String {
        (self.formatter)(self.property, value)
    }
}

/// Looks up a logical property by name.
///
/// Fails with [`Error::UnknownProperty`] for names outside the fixed set.
pub fn resolve(name: &str) -> Result<Resolved> {
    let property = name.parse::<LogicalProperty>().inspect_err(|_| {
        pwarn!(name, "resolve: unknown property");
    })?;
    Ok(Resolved {
        property,
        channel: property.channel(),
        formatter: LogicalProperty::format,
    })
}

/// Describes how a host inspector should present a property's keyframe list.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PropertyControl {
    pub property: LogicalProperty,
    /// Human title, e.g. `Hue Rotate` for `hueRotate`.
    pub title: String,
    pub unit: &'static str,
    /// Inclusive slider bounds, when the unit has natural limits.
    pub range: Option<(f64, f64)>,
}

fn friendly_title(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 4);
    for (i, ch) in camel.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            out.push(' ');
            out.push(ch);
        } else {
            out.push(ch);
        }
    }
    out
}
