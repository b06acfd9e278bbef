use alloc::collections::BTreeMap;
use alloc::collections::btree_map::Entry;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::Channel;

/// The composed keyframe object for one layer: one fragment sequence per style channel.
///
/// Each sequence holds one entry per keyframe index. When several properties share a channel,
/// the entry at index `i` is their fragments at `i` joined by a single space, e.g.
/// `"translateX(0px) rotate(45deg)"`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ChannelKeyframes {
    channels: BTreeMap<Channel, Vec<String>>,
}

impl ChannelKeyframes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one property's fragments to `channel`, composing with whatever is already there.
    ///
    /// An empty list contributes nothing.
    pub fn push(&mut self, channel: Channel, fragments: Vec<String>) {
        if fragments.is_empty() {
            return;
        }
        match self.channels.entry(channel) {
            Entry::Vacant(slot) => {
                slot.insert(fragments);
            }
            Entry::Occupied(mut slot) => {
                let merged = compose(slot.get(), &fragments);
                *slot.get_mut() = merged;
            }
        }
        ptrace!(
            channel = channel.as_str(),
            len = self.channels.get(&channel).map_or(0, Vec::len),
            "ChannelKeyframes::push"
        );
    }

    pub fn get(&self, channel: Channel) -> Option<&[String]> {
        self.channels.get(&channel).map(Vec::as_slice)
    }

    pub fn channels(&self) -> impl Iterator<Item = (Channel, &[String])> + '_ {
        self.channels.iter().map(|(c, v)| (*c, v.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Number of channels with at least one keyframe.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// The longest sequence across channels (the number of keyframes the timeline sees).
    pub fn keyframe_count(&self) -> usize {
        self.channels.values().map(Vec::len).max().unwrap_or(0)
    }
}

/// Merges two fragment lists that target the same channel.
///
/// The list whose comma-joined text sorts greater goes first at every index. The result is as
/// long as the longer input; the shorter one repeats its last fragment (hold-last padding).
/// If either side is empty the other is returned unchanged.
pub fn compose(existing: &[String], incoming: &[String]) -> Vec<String> {
    if incoming.is_empty() {
        return existing.to_vec();
    }
    if existing.is_empty() {
        return incoming.to_vec();
    }

    let (first, second) = match compare_joined(existing, incoming) {
        Ordering::Less => (incoming, existing),
        Ordering::Equal | Ordering::Greater => (existing, incoming),
    };

    let len = first.len().max(second.len());
    (0..len)
        .map(|i| {
            let a = &first[i.min(first.len() - 1)];
            let b = &second[i.min(second.len() - 1)];
            let mut out = String::with_capacity(a.len() + b.len() + 1);
            out.push_str(a);
            out.push(' ');
            out.push_str(b);
            out
        })
        .collect()
}

/// Compares two lists as if each were joined with `,`, without allocating.
fn compare_joined(a: &[String], b: &[String]) -> Ordering {
    joined_bytes(a).cmp(joined_bytes(b))
}

fn joined_bytes(list: &[String]) -> impl Iterator<Item = u8> + '_ {
    list.iter().enumerate().flat_map(|(i, s)| {
        let sep: &'static [u8] = if i == 0 { b"" } else { b"," };
        sep.iter().copied().chain(s.bytes())
    })
}
