//! Segment finder: run-length scan of an occupancy sequence into bands

use std::fmt;

/// A half-open run `[start, end)` of occupied row or column indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Band {
    /// First index in the run
    pub start: usize,
    /// One past the last index in the run
    pub end: usize,
}

impl Band {
    /// Create a new band
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted band {start}..{end}");
        Self { start, end }
    }

    /// Number of indices covered
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for a zero-length band; `find_bands` never yields one
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if an index falls inside the band
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// Shift the band by `by` positions
    pub fn offset(&self, by: usize) -> Band {
        Band::new(self.start + by, self.end + by)
    }

    /// Number of blank positions between this band and a later one
    pub fn gap_to(&self, next: &Band) -> usize {
        next.start.saturating_sub(self.end)
    }

    /// Band spanning from this band's start to `other`'s end
    pub fn join(&self, other: &Band) -> Band {
        Band::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Iterate over the indices in the band
    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// Collapse an occupancy sequence into maximal runs of `true`
///
/// A band opens on a `false -> true` transition and closes on the next
/// `true -> false` (or at the end of the sequence). Any number of `false`
/// positions separates two bands; gap tolerance lives in the composer.
///
/// ```
/// use gridtables_core::segment::{find_bands, Band};
///
/// let bands = find_bands(&[false, true, true, false, true]);
/// assert_eq!(bands, vec![Band::new(1, 3), Band::new(4, 5)]);
/// ```
pub fn find_bands(occupied: &[bool]) -> Vec<Band> {
    let mut bands = Vec::new();
    let mut open: Option<usize> = None;

    for (index, &is_occupied) in occupied.iter().enumerate() {
        match (open, is_occupied) {
            (None, true) => open = Some(index),
            (Some(start), false) => {
                bands.push(Band::new(start, index));
                open = None;
            }
            _ => {}
        }
    }

    if let Some(start) = open {
        bands.push(Band::new(start, occupied.len()));
    }

    bands
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_and_all_false() {
        assert!(find_bands(&[]).is_empty());
        assert!(find_bands(&[false, false, false]).is_empty());
    }

    #[test]
    fn test_all_true() {
        assert_eq!(find_bands(&[true; 4]), vec![Band::new(0, 4)]);
    }

    #[test]
    fn test_single_gap_separates() {
        assert_eq!(
            find_bands(&[true, true, false, true]),
            vec![Band::new(0, 2), Band::new(3, 4)]
        );
    }

    #[test]
    fn test_multiple_gaps_and_edges() {
        let occupied = [false, true, false, false, false, true, true, false];
        assert_eq!(
            find_bands(&occupied),
            vec![Band::new(1, 2), Band::new(5, 7)]
        );
    }

    #[test]
    fn test_band_helpers() {
        let a = Band::new(1, 3);
        let b = Band::new(5, 6);
        assert_eq!(a.len(), 2);
        assert!(!a.is_empty());
        assert!(a.contains(2));
        assert!(!a.contains(3));
        assert_eq!(a.gap_to(&b), 2);
        assert_eq!(a.join(&b), Band::new(1, 6));
        assert_eq!(a.offset(10), Band::new(11, 13));
        assert_eq!(a.indices().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(a.to_string(), "[1, 3)");
    }
}
