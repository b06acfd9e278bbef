use crate::Easing;

/// Virtual duration of a layer timeline; progress is expressed on `[0, OUTPUT_SCALE]`.
pub const OUTPUT_SCALE: f64 = 1000.0;

/// Maps a scroll offset onto timeline progress in `[0, OUTPUT_SCALE]`.
///
/// `scroll_offset` is the host's content offset, which decreases as the viewport moves down (or
/// right). The axis is inverted into the scrolled distance `-scroll_offset`, and `from`/`to` are
/// given in the same signed space as `scroll_offset`, so the distance is mapped linearly from
/// `[base - from, base - to]`. `element_base_offset` is the layer's layout position along the
/// axis; a layer further down the content starts animating that much later. Values outside the
/// range clamp to the nearest bound, and `from > to` runs the animation in reverse.
///
/// ```
/// use parallax::progress;
///
/// assert_eq!(progress(-75.0, 0.0, -100.0, -50.0), 500.0);
/// assert_eq!(progress(-200.0, 0.0, -100.0, -50.0), 0.0);
/// assert_eq!(progress(0.0, 0.0, -100.0, -50.0), 1000.0);
/// ```
pub fn progress(scroll_offset: f64, element_base_offset: f64, from: f64, to: f64) -> f64 {
    normalized(scroll_offset, element_base_offset, from, to) * OUTPUT_SCALE
}

/// Normalized `[0, 1]` position of the scrolled distance within the inverted range.
fn normalized(scroll_offset: f64, element_base_offset: f64, from: f64, to: f64) -> f64 {
    let actual = -scroll_offset;
    let start = element_base_offset - from;
    let end = element_base_offset - to;
    let span = end - start;
    if span == 0.0 {
        // A zero-width range counts as already passed.
        return 1.0;
    }
    ((actual - start) / span).clamp(0.0, 1.0)
}

/// Where along the scroll container a layer's animation runs, in host content-offset pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollRange {
    pub from: f64,
    pub to: f64,
}

impl ScrollRange {
    pub fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }

    pub fn is_reversed(&self) -> bool {
        self.from > self.to
    }

    pub fn progress_for(&self, scroll_offset: f64, element_base_offset: f64) -> f64 {
        progress(scroll_offset, element_base_offset, self.from, self.to)
    }

    /// Like [`Self::progress_for`], with `easing` applied to the normalized position.
    pub fn progress_eased(&self, scroll_offset: f64, element_base_offset: f64, easing: Easing) -> f64 {
        let t = normalized(scroll_offset, element_base_offset, self.from, self.to);
        easing.sample(t) * OUTPUT_SCALE
    }
}

impl Default for ScrollRange {
    fn default() -> Self {
        Self::new(-100.0, -50.0)
    }
}
