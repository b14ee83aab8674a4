//! Range composer: turns bands into table rectangles
//!
//! Global bands are only a seed. Each seed rectangle is refined against the
//! occupancy *inside it*: first its columns are re-segmented using only the
//! rows of the seed, then each column slab has its rows re-segmented using
//! only that slab's columns. Pieces are trimmed to their data and refined
//! again until a piece comes back unchanged. Every step shrinks a piece or
//! leaves it alone, so the loop terminates.
//!
//! A blank run between two bands is a separator unless the [`GapRule`] for
//! that axis says otherwise:
//! - runs narrower than `min_separator` are always bridged;
//! - runs no wider than `tolerance` are bridged when the bands on either side
//!   occupy exactly the same cross-axis bands (a blank row inside a table
//!   whose columns carry on below it).

use crate::axis::Occupancy;
use crate::options::{Axis, DetectOptions, GapRule};
use crate::range::TableRange;
use crate::segment::{find_bands, Band};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Compose candidate bands into final, disjoint table ranges
///
/// The result is sorted by `(row_start, col_start)`.
pub fn compose(
    row_bands: &[Band],
    col_bands: &[Band],
    occupancy: &Occupancy,
    options: &DetectOptions,
) -> Vec<TableRange> {
    Composer::new(occupancy, options).compose(row_bands, col_bands)
}

/// Refinement state for one detection pass
#[derive(Debug, Clone, Copy)]
pub struct Composer<'a> {
    occupancy: &'a Occupancy,
    options: &'a DetectOptions,
}

impl<'a> Composer<'a> {
    /// Create a composer over a scanned grid
    pub fn new(occupancy: &'a Occupancy, options: &'a DetectOptions) -> Self {
        Self { occupancy, options }
    }

    /// Bands along `axis` inside `within`, after gap bridging
    ///
    /// Bands are in grid coordinates.
    pub fn bands(&self, axis: Axis, within: &TableRange) -> Vec<Band> {
        let raw = self.raw_bands(axis, within);
        self.bridge(axis, within, raw)
    }

    /// Bands along `axis` across the whole grid, after gap bridging
    pub fn global_bands(&self, axis: Axis) -> Vec<Band> {
        match TableRange::full(self.occupancy.row_count(), self.occupancy.col_count()) {
            Some(full) => self.bands(axis, &full),
            None => Vec::new(),
        }
    }

    /// Compose seeds from the cross product of row and column bands
    pub fn compose(&self, row_bands: &[Band], col_bands: &[Band]) -> Vec<TableRange> {
        let seeds = self.seeds(row_bands, col_bands);
        tracing::debug!(seeds = seeds.len(), "composing table ranges");

        #[cfg(feature = "parallel")]
        let settled: Vec<TableRange> = seeds
            .par_iter()
            .flat_map_iter(|seed| self.settle(seed))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let settled: Vec<TableRange> = seeds.iter().flat_map(|seed| self.settle(seed)).collect();

        resolve_overlaps(settled)
    }

    /// Row band x column band rectangles that hold any data, trimmed to it
    pub fn seeds(&self, row_bands: &[Band], col_bands: &[Band]) -> Vec<TableRange> {
        row_bands
            .iter()
            .flat_map(|rows| {
                col_bands
                    .iter()
                    .map(move |cols| TableRange::from_bands(*rows, *cols))
            })
            .filter_map(|candidate| self.occupancy.trim(&candidate))
            .collect()
    }

    /// Refine one candidate until every piece is stable
    pub fn settle(&self, candidate: &TableRange) -> Vec<TableRange> {
        let mut pending = vec![*candidate];
        let mut settled = Vec::new();
        let mut rounds = 0usize;

        while !pending.is_empty() {
            rounds += 1;
            let mut next = Vec::new();
            for current in pending {
                let pieces = self.refine_once(&current);
                if pieces.len() == 1 && pieces[0] == current {
                    settled.push(current);
                } else {
                    next.extend(pieces);
                }
            }
            pending = next;
        }

        tracing::trace!(
            %candidate,
            rounds,
            pieces = settled.len(),
            "candidate converged"
        );
        settled
    }

    /// One round: split columns using the candidate's rows, then split each
    /// column slab's rows using that slab's columns, trimming every piece
    fn refine_once(&self, candidate: &TableRange) -> Vec<TableRange> {
        let mut pieces = Vec::new();
        for cols in self.bands(Axis::Cols, candidate) {
            let slab = TableRange::from_bands(candidate.rows(), cols);
            for rows in self.bands(Axis::Rows, &slab) {
                if let Some(piece) = self.occupancy.trim(&TableRange::from_bands(rows, cols)) {
                    pieces.push(piece);
                }
            }
        }
        pieces
    }

    fn raw_bands(&self, axis: Axis, within: &TableRange) -> Vec<Band> {
        let start = match axis {
            Axis::Rows => within.row_start,
            Axis::Cols => within.col_start,
        };
        find_bands(&self.occupancy.local(axis, within))
            .into_iter()
            .map(|band| band.offset(start))
            .collect()
    }

    /// Cross-axis bands occupied by `band`, inside `within`
    fn footprint(&self, axis: Axis, within: &TableRange, band: Band) -> Vec<Band> {
        let strip = match axis {
            Axis::Rows => TableRange::from_bands(band, within.cols()),
            Axis::Cols => TableRange::from_bands(within.rows(), band),
        };
        self.raw_bands(axis.cross(), &strip)
    }

    fn bridge(&self, axis: Axis, within: &TableRange, bands: Vec<Band>) -> Vec<Band> {
        let rule: GapRule = self.options.gap_rule(axis);
        if rule.tolerance == 0 && rule.min_separator <= 1 {
            return bands;
        }

        let mut merged: Vec<Band> = Vec::with_capacity(bands.len());
        // Footprint of merged.last(), when already known
        let mut last_footprint: Option<Vec<Band>> = None;

        for band in bands {
            let Some(last) = merged.last_mut() else {
                merged.push(band);
                continue;
            };

            let gap = last.gap_to(&band);
            if gap < rule.min_separator {
                *last = last.join(&band);
                last_footprint = None;
                continue;
            }

            if gap <= rule.tolerance {
                let previous = match last_footprint.take() {
                    Some(footprint) => footprint,
                    None => self.footprint(axis, within, *last),
                };
                let next = self.footprint(axis, within, band);
                if previous == next {
                    tracing::trace!(?axis, %last, %band, gap, "bridging internal gap");
                    *last = last.join(&band);
                    last_footprint = Some(previous);
                } else {
                    merged.push(band);
                    last_footprint = Some(next);
                }
                continue;
            }

            merged.push(band);
            last_footprint = None;
        }

        merged
    }
}

/// Make a set of ranges pairwise disjoint
///
/// A range fully inside a larger one is dropped as a fragment of the same
/// table; partially overlapping ranges are replaced by their union.
pub fn resolve_overlaps(mut ranges: Vec<TableRange>) -> Vec<TableRange> {
    ranges.sort_by(|a, b| b.cell_count().cmp(&a.cell_count()).then_with(|| a.cmp(b)));

    let mut kept: Vec<TableRange> = Vec::with_capacity(ranges.len());
    for range in ranges {
        if kept.iter().any(|existing| existing.contains(&range)) {
            continue;
        }

        let mut merged = range;
        while let Some(pos) = kept.iter().position(|existing| existing.overlaps(&merged)) {
            merged = merged.union(&kept.swap_remove(pos));
        }
        kept.push(merged);
    }

    kept.sort();
    kept
}
