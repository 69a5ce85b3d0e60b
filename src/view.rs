//! Visible windows into the data sequence.

/// Inclusive index range `[first, last]` into the full data sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    first: usize,
    last: usize,
}

impl VisibleRange {
    /// Create a range, swapping bounds if needed.
    pub fn new(mut first: usize, mut last: usize) -> Self {
        if first > last {
            std::mem::swap(&mut first, &mut last);
        }
        Self { first, last }
    }

    /// The whole of a sequence of `len` points, or `None` when empty.
    pub fn all(len: usize) -> Option<Self> {
        let last = len.checked_sub(1)?;
        Some(Self { first: 0, last })
    }

    /// The last point plus the `count` points before it.
    ///
    /// Returns `None` when `len` is zero.
    pub fn follow_last(len: usize, count: usize) -> Option<Self> {
        let last = len.checked_sub(1)?;
        Some(Self {
            first: last.saturating_sub(count),
            last,
        })
    }

    /// Window that fits `available_width` for labels of `label_width`.
    pub fn fit_width(len: usize, available_width: f32, label_width: f32) -> Option<Self> {
        Self::follow_last(len, visible_point_count(available_width, label_width))
    }

    /// First index.
    pub fn first(&self) -> usize {
        self.first
    }

    /// Last index (inclusive).
    pub fn last(&self) -> usize {
        self.last
    }

    /// Number of indices covered.
    pub fn len(&self) -> usize {
        self.last - self.first + 1
    }

    /// A range always covers at least one index.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check whether a full-sequence index lies in the range.
    pub fn contains(&self, index: usize) -> bool {
        (self.first..=self.last).contains(&index)
    }

    /// Map a full-sequence index to a window-local index.
    pub fn to_local(&self, index: usize) -> Option<usize> {
        self.contains(index).then(|| index - self.first)
    }

    /// Map a window-local index to a full-sequence index.
    pub fn to_full(&self, local: usize) -> Option<usize> {
        let index = self.first.checked_add(local)?;
        self.contains(index).then_some(index)
    }

    /// Clamp the range into a sequence of `len` points.
    pub fn clamped(&self, len: usize) -> Option<Self> {
        let last_index = len.checked_sub(1)?;
        let last = self.last.min(last_index);
        let first = self.first.min(last);
        Some(Self { first, last })
    }

    /// Index range usable for slicing.
    pub fn as_range(&self) -> std::ops::RangeInclusive<usize> {
        self.first..=self.last
    }
}

/// How the chart chooses its visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    /// Show as much recent history as the width allows.
    #[default]
    FitWidth,
    /// Show the whole sequence.
    All,
    /// Caller-controlled window.
    Manual(VisibleRange),
}

/// Number of points that fit before the last one, given the label width.
///
/// `floor((available_width - 2.5 * label_width) / label_width)`, or zero when
/// the label width is unknown or the result is negative.
pub fn visible_point_count(available_width: f32, label_width: f32) -> usize {
    if label_width.is_nan() || label_width <= 0.0 {
        return 0;
    }
    let count = ((available_width - 2.5 * label_width) / label_width).floor();
    if count.is_finite() && count > 0.0 {
        count as usize
    } else {
        0
    }
}
