use std::path::Path;

use crate::error::AppError;

use super::FrfTable;

/// Load an FRF table from disk.
///
/// LMS analyzer exports are ISO-8859-1 encoded, so the file is read as raw
/// bytes and widened byte-for-byte into chars (Latin-1 maps 1:1 onto
/// U+0000..U+00FF). Header content with degree signs or accented station
/// names survives the decode; the numeric body is plain ASCII either way.
pub fn load_frf_table(path: &Path, skiprows: usize) -> Result<FrfTable, AppError> {
    let bytes = std::fs::read(path).map_err(AppError::Io)?;
    let content: String = bytes.iter().map(|&b| b as char).collect();
    parse_frf_table(&content, skiprows)
}

/// Parse a whitespace-separated numeric table.
///
/// Format (LMS FRF export):
/// ```text
/// <skiprows header lines, ignored>
/// 300.00  ...  9.8123e-01  -1.2e-02  ...
/// 301.25  ...  9.7902e-01  -1.5e-02  ...
/// ```
///
/// The first `skiprows` lines are dropped unconditionally, whether or not
/// they parse as numbers. Every remaining non-empty line must have the same
/// number of fields; `NaN` fields are accepted (the analyzer emits them at
/// dead bins). Column 0 is the frequency axis and must be non-decreasing.
pub fn parse_frf_table(content: &str, skiprows: usize) -> Result<FrfTable, AppError> {
    let mut columns: Vec<Vec<f64>> = Vec::new();

    for (line_no, line) in content.lines().enumerate().skip(skiprows) {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();

        if columns.is_empty() {
            columns = vec![Vec::new(); fields.len()];
        } else if fields.len() != columns.len() {
            return Err(AppError::Parse {
                message: format!(
                    "line {}: expected {} columns, found {}",
                    line_no + 1,
                    columns.len(),
                    fields.len()
                ),
            });
        }

        for (col, field) in fields.iter().enumerate() {
            let value: f64 = field.parse().map_err(|_| AppError::Parse {
                message: format!("line {}: invalid numeric value '{}'", line_no + 1, field),
            })?;
            columns[col].push(value);
        }
    }

    if columns.is_empty() {
        return Err(AppError::Parse {
            message: format!("no data rows after skipping {skiprows} header lines"),
        });
    }

    validate_frequency_order(&columns[0])?;

    Ok(FrfTable::new(columns))
}

/// Validate that the frequency axis is non-decreasing.
///
/// Duplicate bins are tolerated (some exports repeat the seam frequency
/// between sweep segments); a decreasing step means the file is not the
/// ascending-axis table every downstream index computation assumes.
fn validate_frequency_order(freq: &[f64]) -> Result<(), AppError> {
    for i in 1..freq.len() {
        if freq[i] < freq[i - 1] {
            return Err(AppError::Parse {
                message: format!(
                    "frequency column must be non-decreasing, but freq[{}]={} < freq[{}]={}",
                    i,
                    freq[i],
                    i - 1,
                    freq[i - 1]
                ),
            });
        }
    }
    Ok(())
}
