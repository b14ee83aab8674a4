//! Detection options

use crate::cell::CellValue;

/// Which cell values count as "no data"
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Emptiness {
    /// `Empty` cells, `NaN` numbers, and strings that are blank after trimming
    #[default]
    Blank,
    /// Only `Empty` cells, `NaN` numbers and zero-length strings
    Strict,
    /// Caller-supplied predicate
    #[cfg_attr(feature = "serde", serde(skip))]
    Custom(fn(&CellValue) -> bool),
}

impl Emptiness {
    /// Apply the predicate to one cell value
    pub fn is_empty(&self, value: &CellValue) -> bool {
        match self {
            Emptiness::Blank => value.is_blank(),
            Emptiness::Strict => match value {
                CellValue::Empty => true,
                CellValue::Number(n) => n.is_nan(),
                CellValue::String(s) => s.is_empty(),
                CellValue::Boolean(_) => false,
            },
            Emptiness::Custom(predicate) => predicate(value),
        }
    }
}

/// Options for one detection call
///
/// Passed by reference into every call; nothing here is global.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DetectOptions {
    /// Emptiness predicate (default: blank strings are empty)
    pub emptiness: Emptiness,
    /// Widest run of blank rows bridged when the column footprint above and
    /// below is identical (default: 1)
    pub row_gap_tolerance: usize,
    /// Widest run of blank columns bridged when the row footprint on both
    /// sides is identical (default: 0, never)
    pub col_gap_tolerance: usize,
    /// Runs of blank rows shorter than this never separate tables (default: 1)
    pub min_separator_rows: usize,
    /// Runs of blank columns shorter than this never separate tables (default: 1)
    pub min_separator_cols: usize,
    /// Ranges with fewer rows are dropped (default: 1)
    pub min_rows: usize,
    /// Ranges with fewer columns are dropped (default: 1)
    pub min_cols: usize,
    /// Whether extraction also returns an owned sub-grid per range
    pub materialize: bool,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            emptiness: Emptiness::Blank,
            row_gap_tolerance: 1,
            col_gap_tolerance: 0,
            min_separator_rows: 1,
            min_separator_cols: 1,
            min_rows: 1,
            min_cols: 1,
            materialize: false,
        }
    }
}

impl DetectOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the emptiness predicate
    pub fn with_emptiness(mut self, emptiness: Emptiness) -> Self {
        self.emptiness = emptiness;
        self
    }

    /// Set the blank-row and blank-column gap tolerances
    pub fn with_gap_tolerance(mut self, rows: usize, cols: usize) -> Self {
        self.row_gap_tolerance = rows;
        self.col_gap_tolerance = cols;
        self
    }

    /// Require at least this many blank rows/columns before content splits
    pub fn with_min_separator(mut self, rows: usize, cols: usize) -> Self {
        self.min_separator_rows = rows;
        self.min_separator_cols = cols;
        self
    }

    /// Drop ranges smaller than `rows` x `cols`
    pub fn with_min_size(mut self, rows: usize, cols: usize) -> Self {
        self.min_rows = rows;
        self.min_cols = cols;
        self
    }

    /// Return materialized sub-grids from extraction
    pub fn with_materialize(mut self, materialize: bool) -> Self {
        self.materialize = materialize;
        self
    }

    /// Gap rules for one axis
    pub(crate) fn gap_rule(&self, axis: Axis) -> GapRule {
        match axis {
            Axis::Rows => GapRule {
                tolerance: self.row_gap_tolerance,
                min_separator: self.min_separator_rows,
            },
            Axis::Cols => GapRule {
                tolerance: self.col_gap_tolerance,
                min_separator: self.min_separator_cols,
            },
        }
    }
}

/// Grid axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Rows (bands are row spans)
    Rows,
    /// Columns (bands are column spans)
    Cols,
}

impl Axis {
    /// The other axis
    pub fn cross(self) -> Axis {
        match self {
            Axis::Rows => Axis::Cols,
            Axis::Cols => Axis::Rows,
        }
    }
}

/// When a blank run between two bands on one axis is not a separator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GapRule {
    /// Bridge runs up to this width if the cross-axis footprint matches
    pub tolerance: usize,
    /// Always bridge runs narrower than this
    pub min_separator: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_numbers_count(value: &CellValue) -> bool {
        !matches!(value, CellValue::Number(_))
    }

    #[test]
    fn test_emptiness_predicates() {
        let spaces = CellValue::string("   ");
        assert!(Emptiness::Blank.is_empty(&spaces));
        assert!(!Emptiness::Strict.is_empty(&spaces));
        assert!(Emptiness::Strict.is_empty(&CellValue::string("")));
        assert!(Emptiness::Strict.is_empty(&CellValue::Empty));
        assert!(Emptiness::Blank.is_empty(&CellValue::Number(f64::NAN)));
        assert!(Emptiness::Strict.is_empty(&CellValue::Number(f64::NAN)));
        assert!(!Emptiness::Strict.is_empty(&CellValue::Boolean(false)));

        let custom = Emptiness::Custom(only_numbers_count);
        assert!(custom.is_empty(&CellValue::string("label")));
        assert!(!custom.is_empty(&CellValue::Number(1.0)));
    }

    #[test]
    fn test_builder() {
        let opts = DetectOptions::new()
            .with_gap_tolerance(2, 1)
            .with_min_separator(1, 2)
            .with_min_size(3, 4)
            .with_materialize(true);
        assert_eq!(
            opts.gap_rule(Axis::Rows),
            GapRule {
                tolerance: 2,
                min_separator: 1
            }
        );
        assert_eq!(
            opts.gap_rule(Axis::Cols),
            GapRule {
                tolerance: 1,
                min_separator: 2
            }
        );
        assert_eq!((opts.min_rows, opts.min_cols), (3, 4));
        assert!(opts.materialize);
        assert_eq!(Axis::Rows.cross(), Axis::Cols);
    }
}
