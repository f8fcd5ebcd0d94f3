// Results archive: one JSON document holding every sample's solver output

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::AppError;
use crate::tube::AcousticResult;

/// One named entry of the results archive.
#[derive(Debug, Clone, Serialize)]
pub struct SampleResult {
    pub name: String,
    pub result: AcousticResult,
}

/// Write all sample results as pretty JSON, keyed by sample name.
///
/// Non-finite bins (the solver's numeric singularities) serialize as JSON
/// `null`, so a singular measurement still archives cleanly.
pub fn save_results(path: &Path, results: &[SampleResult]) -> Result<(), AppError> {
    let by_name: BTreeMap<&str, &AcousticResult> = results
        .iter()
        .map(|s| (s.name.as_str(), &s.result))
        .collect();

    let json = serde_json::to_string_pretty(&by_name)?;
    info!("save_results: {} samples, {} bytes -> {}", results.len(), json.len(), path.display());
    std::fs::write(path, json)?;

    Ok(())
}
