//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use gridtables_core::{CellValue, Grid, StringPool};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a grid
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Grid> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading csv");
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a grid
    ///
    /// Every record becomes one row, headers included. Blank lines are kept
    /// as empty rows since they are what separates tables. Records shorter
    /// than the longest one are padded with empty cells.
    pub fn read<R: Read>(mut reader: R, options: &CsvReadOptions) -> CsvResult<Grid> {
        let mut input = Vec::new();
        reader.read_to_end(&mut input)?;
        let input = keep_blank_lines(&input, options.delimiter, options.quote);

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .trim(if options.trim {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(input.as_slice());

        let mut pool = StringPool::new();
        let mut rows: Vec<Vec<CellValue>> = Vec::new();

        for result in csv_reader.records() {
            let record = result?;
            rows.push(record.iter().map(|field| Self::detect_type(field, &mut pool)).collect());
        }

        let grid = Grid::from_rows_padded(rows).with_origin(options.origin);
        tracing::debug!(
            rows = grid.row_count(),
            cols = grid.col_count(),
            strings = pool.len(),
            "loaded csv grid"
        );
        Ok(grid)
    }

    /// Detect the type of a field value
    fn detect_type(field: &str, pool: &mut StringPool) -> CellValue {
        if field.is_empty() {
            return CellValue::Empty;
        }

        if let Some(n) = Self::parse_number(field.trim()) {
            return CellValue::Number(n);
        }

        CellValue::String(pool.intern(field))
    }

    /// Plain decimal or exponent notation only; `inf`, `NaN` and friends stay text
    fn parse_number(text: &str) -> Option<f64> {
        let plausible = !text.is_empty()
            && text
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
            && text.chars().any(|c| c.is_ascii_digit());
        if !plausible {
            return None;
        }
        text.parse::<f64>().ok().filter(|n| n.is_finite())
    }
}

/// Replace every blank line outside quotes with a single empty quoted field
///
/// The csv parser skips empty lines entirely. A quote only opens a quoted
/// field when it is the first byte of the field; anywhere else the parser
/// keeps it as a literal character.
fn keep_blank_lines(input: &[u8], delimiter: u8, quote: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(input.len());
    let mut in_quotes = false;
    let mut at_line_start = true;
    let mut at_field_start = true;
    let mut i = 0;

    while i < input.len() {
        let byte = input[i];

        if in_quotes {
            if byte == quote {
                if input.get(i + 1) == Some(&quote) {
                    out.extend_from_slice(&[quote, quote]);
                    i += 2;
                    continue;
                }
                in_quotes = false;
            }
            out.push(byte);
            i += 1;
            continue;
        }

        match byte {
            b'\n' | b'\r' => {
                // CRLF ends one line, not two
                let second_half_of_crlf = byte == b'\n' && i > 0 && input[i - 1] == b'\r';
                if at_line_start && !second_half_of_crlf {
                    out.extend_from_slice(&[quote, quote]);
                }
                at_line_start = true;
                at_field_start = true;
            }
            b if b == delimiter => {
                at_line_start = false;
                at_field_start = true;
            }
            b if b == quote && at_field_start => {
                in_quotes = true;
                at_line_start = false;
                at_field_start = false;
            }
            _ => {
                at_line_start = false;
                at_field_start = false;
            }
        }
        out.push(byte);
        i += 1;
    }

    out
}
