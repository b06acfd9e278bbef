use alloc::vec::Vec;

use crate::{ChannelKeyframes, LogicalProperty, Result, resolve};

/// Key prefix that marks an animatable keyframe list in a host property bag.
///
/// `"anim:translateX"` carries the keyframes of `translateX`; unprefixed keys are plain layer
/// configuration and are ignored here.
pub const PROP_PREFIX: &str = "anim:";

/// Per-property keyframe values for one layer.
///
/// Properties keep the order they were first inserted in, which is the order [`extract`] folds
/// them into their channels. Within a property, index `i` is keyframe `i`. A property with no
/// values is treated as unused.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyKeyframes {
    values: Vec<(LogicalProperty, Vec<f64>)>,
}

impl PropertyKeyframes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`Self::insert`].
    pub fn with(mut self, property: LogicalProperty, values: impl Into<Vec<f64>>) -> Self {
        self.insert(property, values);
        self
    }

    /// Sets the keyframes of `property`.
    ///
    /// Replacing an existing list keeps the property's original position.
    pub fn insert(&mut self, property: LogicalProperty, values: impl Into<Vec<f64>>) {
        let values = values.into();
        match self.position(property) {
            Some(index) => self.values[index].1 = values,
            None => self.values.push((property, values)),
        }
    }

    pub fn get(&self, property: LogicalProperty) -> Option<&[f64]> {
        self.position(property).map(|index| self.values[index].1.as_slice())
    }

    pub fn remove(&mut self, property: LogicalProperty) -> Option<Vec<f64>> {
        self.position(property).map(|index| self.values.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (LogicalProperty, &[f64])> + '_ {
        self.values.iter().map(|(p, v)| (*p, v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|(_, v)| v.is_empty())
    }

    fn position(&self, property: LogicalProperty) -> Option<usize> {
        self.values.iter().position(|(p, _)| *p == property)
    }

    /// Builds the table from a prefixed property bag.
    ///
    /// Properties keep the bag's order. Keys without [`PROP_PREFIX`] are skipped. A prefixed key
    /// that does not name a known property fails the whole call with
    /// [`crate::Error::UnknownProperty`].
    pub fn from_prefixed<K, V>(bag: impl IntoIterator<Item = (K, V)>) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<[f64]>,
    {
        let mut out = Self::new();
        for (key, values) in bag {
            let Some(name) = key.as_ref().strip_prefix(PROP_PREFIX) else {
                continue;
            };
            let resolved = resolve(name)?;
            out.insert(resolved.property, values.as_ref());
        }
        Ok(out)
    }
}

impl FromIterator<(LogicalProperty, Vec<f64>)> for PropertyKeyframes {
    fn from_iter<T: IntoIterator<Item = (LogicalProperty, Vec<f64>)>>(iter: T) -> Self {
        let mut out = Self::new();
        for (property, values) in iter {
            out.insert(property, values);
        }
        out
    }
}

// Serialized as a map keyed by logical name, in table order.
#[cfg(feature = "serde")]
impl serde::Serialize for PropertyKeyframes {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.values.iter().map(|(p, v)| (p, v)))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for PropertyKeyframes {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct TableVisitor;

        impl<'de> serde::de::Visitor<'de> for TableVisitor {
            type Value = PropertyKeyframes;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a map of property names to keyframe lists")
            }

            fn visit_map<A>(self, mut map: A) -> core::result::Result<Self::Value, A::Error>
            where
                A: serde::de::MapAccess<'de>,
            {
                let mut out = PropertyKeyframes::new();
                while let Some((property, values)) =
                    map.next_entry::<LogicalProperty, Vec<f64>>()?
                {
                    out.insert(property, values);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// Formats every property's values and composes them per channel.
///
/// Properties are folded in the table's iteration order. Empty lists contribute nothing.
pub fn extract(keyframes: &PropertyKeyframes) -> ChannelKeyframes {
    let mut out = ChannelKeyframes::new();
    for (property, values) in keyframes.iter() {
        if values.is_empty() {
            continue;
        }
        let fragments = values.iter().map(|v| property.format(*v)).collect();
        out.push(property.channel(), fragments);
    }
    out
}

/// [`PropertyKeyframes::from_prefixed`] followed by [`extract`].
///
/// Nothing is composed unless every prefixed key resolves.
pub fn extract_prefixed<K, V>(bag: impl IntoIterator<Item = (K, V)>) -> Result<ChannelKeyframes>
where
    K: AsRef<str>,
    V: AsRef<[f64]>,
{
    let table = PropertyKeyframes::from_prefixed(bag)?;
    Ok(extract(&table))
}
