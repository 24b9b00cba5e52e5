//! Data ranges and index ranges.

/// Numeric range with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    /// Minimum value.
    pub min: f64,
    /// Maximum value.
    pub max: f64,
}

impl Range {
    /// Create a new range, swapping bounds if needed.
    pub fn new(mut min: f64, mut max: f64) -> Self {
        if min > max {
            std::mem::swap(&mut min, &mut max);
        }
        Self { min, max }
    }

    /// Span of the range.
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Check whether both bounds are finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Check whether the range has positive span and finite bounds.
    pub fn is_valid(&self) -> bool {
        self.is_finite() && self.span() > 0.0
    }

    /// Check whether a value lies within the inclusive bounds.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Check whether a value lies strictly between the bounds.
    pub fn contains_strict(&self, value: f64) -> bool {
        value > self.min && value < self.max
    }

    /// Expand the range to include a value.
    pub fn expand_to_include(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        if value < self.min {
            self.min = value;
        }
        if value > self.max {
            self.max = value;
        }
    }
}

/// Half-open range `[begin, end)` over store indices.
///
/// `begin <= end` always holds; an empty range has `begin == end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexRange {
    begin: usize,
    end: usize,
}

impl IndexRange {
    /// Create a range, clamping `end` up to `begin` when inverted.
    pub fn new(begin: usize, end: usize) -> Self {
        Self {
            begin,
            end: end.max(begin),
        }
    }

    /// Range covering `[0, len)`.
    pub fn full(len: usize) -> Self {
        Self::new(0, len)
    }

    /// Range holding a single index.
    pub fn single(index: usize) -> Self {
        Self::new(index, index.saturating_add(1))
    }

    /// First index.
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// One past the last index.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of indices covered.
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    /// Check whether no index is covered.
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    /// Check whether an index is covered.
    pub fn contains(&self, index: usize) -> bool {
        index >= self.begin && index < self.end
    }

    /// Intersection with another range; empty ranges collapse to `begin..begin`.
    pub fn intersection(&self, other: Self) -> Self {
        let begin = self.begin.max(other.begin);
        let end = self.end.min(other.end);
        if end <= begin {
            Self::new(begin, begin)
        } else {
            Self::new(begin, end)
        }
    }

    /// Check whether two ranges overlap or touch.
    pub fn touches(&self, other: Self) -> bool {
        self.begin <= other.end && other.begin <= self.end
    }

    /// Bounded view as a standard range.
    pub fn as_range(&self) -> std::ops::Range<usize> {
        self.begin..self.end
    }
}

impl From<std::ops::Range<usize>> for IndexRange {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_swaps_bounds() {
        let range = Range::new(5.0, -1.0);
        assert_eq!(range.min, -1.0);
        assert_eq!(range.max, 5.0);
        assert!(range.is_valid());
        assert!(!Range::new(2.0, 2.0).is_valid());
    }

    #[test]
    fn index_range_never_inverts() {
        let range = IndexRange::new(5, 2);
        assert!(range.is_empty());
        assert_eq!(range.begin(), 5);
    }

    #[test]
    fn index_range_intersection() {
        let a = IndexRange::new(0, 10);
        let b = IndexRange::new(4, 20);
        assert_eq!(a.intersection(b), IndexRange::new(4, 10));
        let c = IndexRange::new(12, 15);
        assert!(a.intersection(c).is_empty());
    }
}
