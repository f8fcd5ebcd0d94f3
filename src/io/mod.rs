mod parser;

pub use parser::{load_frf_table, parse_frf_table};

use crate::error::AppError;

/// Parsed numeric measurement table (LMS-analyzer FRF export).
///
/// Column-major: `column(c)[r]` is row `r` of column `c`. Column 0 is the
/// frequency axis in Hz; the remaining columns carry the microphone channel
/// pairs (real/imaginary per microphone).
#[derive(Debug, Clone)]
pub struct FrfTable {
    columns: Vec<Vec<f64>>,
    n_rows: usize,
}

impl FrfTable {
    /// Built by the parser only, which guarantees at least one column and
    /// one row and equal column lengths.
    pub(crate) fn new(columns: Vec<Vec<f64>>) -> Self {
        let n_rows = columns.first().map_or(0, |c| c.len());
        Self { columns, n_rows }
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Frequency axis [Hz], always column 0, non-decreasing.
    pub fn frequency(&self) -> &[f64] {
        &self.columns[0]
    }

    /// Column by 0-based index.
    ///
    /// An out-of-range index means the file does not have the layout the
    /// caller expects, so it surfaces as a data-format error.
    pub fn column(&self, idx: usize) -> Result<&[f64], AppError> {
        self.columns
            .get(idx)
            .map(|c| c.as_slice())
            .ok_or_else(|| AppError::Parse {
                message: format!(
                    "column {} requested but table has only {} columns",
                    idx,
                    self.columns.len()
                ),
            })
    }
}
