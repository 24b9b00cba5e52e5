//! Selection state and segment partitioning.
//!
//! Renderers draw selected and unselected parts of a series with different
//! styles, and fills must not bridge gaps in the data. Both needs reduce to
//! splitting a range into disjoint half-open runs.

use crate::axis::Orientation;
use crate::geom::PixelPoint;
use crate::view::IndexRange;

/// How much of a series a selection may address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionType {
    /// Selection is ignored.
    None,
    /// Any selection selects the whole series.
    #[default]
    Whole,
    /// At most one data point.
    SingleData,
    /// One contiguous range.
    DataRange,
    /// Any number of ranges.
    MultipleDataRanges,
}

/// A set of selected index ranges.
///
/// Ranges are kept sorted, non-empty and merged so that no two touch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSelection {
    ranges: Vec<IndexRange>,
}

impl DataSelection {
    /// Create an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a selection holding one range.
    pub fn from_range(range: IndexRange) -> Self {
        let mut selection = Self::new();
        selection.add_range(range);
        selection
    }

    /// Add a range, merging it with existing ones.
    pub fn add_range(&mut self, range: IndexRange) {
        if range.is_empty() {
            return;
        }
        self.ranges.push(range);
        self.simplify();
    }

    /// Remove every range.
    pub fn clear(&mut self) {
        self.ranges.clear();
    }

    /// Access the selected ranges in ascending order.
    pub fn ranges(&self) -> &[IndexRange] {
        &self.ranges
    }

    /// Check whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Number of selected indices.
    pub fn data_point_count(&self) -> usize {
        self.ranges.iter().map(IndexRange::len).sum()
    }

    /// Range from the first selected index to one past the last.
    pub fn span(&self) -> IndexRange {
        match (self.ranges.first(), self.ranges.last()) {
            (Some(first), Some(last)) => IndexRange::new(first.begin(), last.end()),
            _ => IndexRange::default(),
        }
    }

    /// Check whether an index is selected.
    pub fn contains_index(&self, index: usize) -> bool {
        let position = self.ranges.partition_point(|range| range.end() <= index);
        self.ranges
            .get(position)
            .is_some_and(|range| range.contains(index))
    }

    /// Sort ranges and merge overlapping or adjacent ones.
    pub fn simplify(&mut self) {
        self.ranges.retain(|range| !range.is_empty());
        self.ranges.sort_by_key(|range| (range.begin(), range.end()));
        let mut merged: Vec<IndexRange> = Vec::with_capacity(self.ranges.len());
        for range in self.ranges.drain(..) {
            match merged.last_mut() {
                Some(last) if last.touches(range) => {
                    *last = IndexRange::new(last.begin(), last.end().max(range.end()));
                }
                _ => merged.push(range),
            }
        }
        self.ranges = merged;
    }

    /// Restrict the selection to `outer`.
    pub fn intersection(&self, outer: IndexRange) -> Self {
        let ranges = self
            .ranges
            .iter()
            .map(|range| range.intersection(outer))
            .filter(|range| !range.is_empty())
            .collect();
        Self { ranges }
    }

    /// Everything inside `outer` that is not selected.
    pub fn inverse(&self, outer: IndexRange) -> Self {
        let mut ranges = Vec::with_capacity(self.ranges.len() + 1);
        let mut cursor = outer.begin();
        for range in &self.ranges {
            let range = range.intersection(outer);
            if range.is_empty() {
                continue;
            }
            if range.begin() > cursor {
                ranges.push(IndexRange::new(cursor, range.begin()));
            }
            cursor = cursor.max(range.end());
        }
        if cursor < outer.end() {
            ranges.push(IndexRange::new(cursor, outer.end()));
        }
        Self { ranges }
    }

    /// Reduce the selection to what `selection_type` can express.
    pub fn enforce_type(&mut self, selection_type: SelectionType) {
        match selection_type {
            SelectionType::None => self.clear(),
            SelectionType::Whole | SelectionType::MultipleDataRanges => {}
            SelectionType::SingleData => {
                if let Some(first) = self.ranges.first().copied() {
                    self.ranges = vec![IndexRange::single(first.begin())];
                }
            }
            SelectionType::DataRange => {
                if !self.is_empty() {
                    self.ranges = vec![self.span()];
                }
            }
        }
    }
}

/// Disjoint selected and unselected runs of a series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segments {
    /// Runs drawn with the selected style.
    pub selected: Vec<IndexRange>,
    /// Runs drawn with the normal style.
    pub unselected: Vec<IndexRange>,
}

impl Segments {
    /// Unselected runs followed by selected runs, tagged with their state.
    pub fn iter(&self) -> impl Iterator<Item = (IndexRange, bool)> + '_ {
        self.unselected
            .iter()
            .map(|range| (*range, false))
            .chain(self.selected.iter().map(|range| (*range, true)))
    }
}

/// Split `[0, count)` into selected and unselected runs.
///
/// Together the runs cover every index exactly once. With
/// [`SelectionType::Whole`] the series is either entirely selected or not at
/// all.
pub fn data_segments(
    selection: &DataSelection,
    selectable: SelectionType,
    count: usize,
) -> Segments {
    let mut segments = Segments::default();
    if count == 0 {
        return segments;
    }
    let full = IndexRange::full(count);
    match selectable {
        SelectionType::None => segments.unselected.push(full),
        SelectionType::Whole => {
            if selection.intersection(full).is_empty() {
                segments.unselected.push(full);
            } else {
                segments.selected.push(full);
            }
        }
        _ => {
            let mut selection = selection.clone();
            selection.simplify();
            segments.selected = selection.intersection(full).ranges;
            segments.unselected = selection.inverse(full).ranges;
        }
    }
    segments
}

/// Split a pixel run at points whose key coordinate is not finite.
///
/// `key` is the screen orientation of the key axis, so `x` is checked for a
/// horizontal key axis and `y` for a vertical one. Each returned range is a
/// maximal run of points with a finite key coordinate, indexing into
/// `points`.
pub fn non_finite_segments(points: &[PixelPoint], key: Orientation) -> Vec<IndexRange> {
    let mut result = Vec::new();
    let mut start: Option<usize> = None;
    for (index, point) in points.iter().enumerate() {
        let key_pixel = match key {
            Orientation::Horizontal => point.x,
            Orientation::Vertical => point.y,
        };
        match (key_pixel.is_finite(), start) {
            (true, None) => start = Some(index),
            (false, Some(begin)) => {
                result.push(IndexRange::new(begin, index));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(begin) = start {
        result.push(IndexRange::new(begin, points.len()));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covers_exactly(segments: &Segments, count: usize) -> bool {
        let mut hits = vec![0_u32; count];
        for (range, _) in segments.iter() {
            for index in range.as_range() {
                if index >= count {
                    return false;
                }
                hits[index] += 1;
            }
        }
        hits.iter().all(|&hit| hit == 1)
    }

    #[test]
    fn simplify_merges_adjacent_and_overlapping() {
        let mut selection = DataSelection::new();
        selection.add_range(IndexRange::new(5, 8));
        selection.add_range(IndexRange::new(0, 2));
        selection.add_range(IndexRange::new(2, 3));
        selection.add_range(IndexRange::new(7, 10));
        assert_eq!(
            selection.ranges(),
            &[IndexRange::new(0, 3), IndexRange::new(5, 10)]
        );
        assert_eq!(selection.data_point_count(), 8);
        assert!(selection.contains_index(6));
        assert!(!selection.contains_index(4));
    }

    #[test]
    fn inverse_fills_gaps() {
        let mut selection = DataSelection::from_range(IndexRange::new(2, 4));
        selection.add_range(IndexRange::new(6, 20));
        let inverse = selection.inverse(IndexRange::full(10));
        assert_eq!(
            inverse.ranges(),
            &[IndexRange::new(0, 2), IndexRange::new(4, 6)]
        );
    }

    #[test]
    fn whole_selection_is_all_or_nothing() {
        let selection = DataSelection::from_range(IndexRange::new(3, 4));
        let segments = data_segments(&selection, SelectionType::Whole, 10);
        assert_eq!(segments.selected, vec![IndexRange::full(10)]);
        assert!(segments.unselected.is_empty());

        let segments = data_segments(&DataSelection::new(), SelectionType::Whole, 10);
        assert_eq!(segments.unselected, vec![IndexRange::full(10)]);
        assert!(segments.selected.is_empty());
    }

    #[test]
    fn partition_covers_range_for_many_selections() {
        let selections = [
            vec![],
            vec![IndexRange::new(0, 12)],
            vec![IndexRange::new(0, 1)],
            vec![IndexRange::new(11, 40)],
            vec![IndexRange::new(1, 3), IndexRange::new(3, 5), IndexRange::new(9, 10)],
            vec![IndexRange::new(4, 8), IndexRange::new(2, 6)],
        ];
        for count in 0..13 {
            for ranges in &selections {
                let mut selection = DataSelection::new();
                for range in ranges {
                    selection.add_range(*range);
                }
                for selectable in [
                    SelectionType::None,
                    SelectionType::Whole,
                    SelectionType::DataRange,
                    SelectionType::MultipleDataRanges,
                ] {
                    let segments = data_segments(&selection, selectable, count);
                    assert!(
                        covers_exactly(&segments, count),
                        "count {count}, ranges {ranges:?}, {selectable:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn enforce_type_narrows_selection() {
        let mut selection = DataSelection::from_range(IndexRange::new(2, 4));
        selection.add_range(IndexRange::new(7, 9));

        let mut range = selection.clone();
        range.enforce_type(SelectionType::DataRange);
        assert_eq!(range.ranges(), &[IndexRange::new(2, 9)]);

        let mut single = selection.clone();
        single.enforce_type(SelectionType::SingleData);
        assert_eq!(single.ranges(), &[IndexRange::new(2, 3)]);

        selection.enforce_type(SelectionType::None);
        assert!(selection.is_empty());
    }

    #[test]
    fn non_finite_segments_split_at_gaps() {
        let nan = PixelPoint::nan();
        let p = PixelPoint::new(1.0, 1.0);
        let points = [nan, p, p, nan, nan, p, PixelPoint::new(2.0, f64::INFINITY), p];
        assert_eq!(
            non_finite_segments(&points, Orientation::Vertical),
            vec![
                IndexRange::new(1, 3),
                IndexRange::new(5, 6),
                IndexRange::new(7, 8)
            ]
        );
        assert_eq!(
            non_finite_segments(&points, Orientation::Horizontal),
            vec![IndexRange::new(1, 3), IndexRange::new(5, 8)]
        );
        assert!(non_finite_segments(&[], Orientation::Horizontal).is_empty());
        assert_eq!(
            non_finite_segments(&[p, p], Orientation::Horizontal),
            vec![IndexRange::new(0, 2)]
        );
    }
}
