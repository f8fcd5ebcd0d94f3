use std::path::{Path, PathBuf};

use tracing::{error, info};

use alphatube::{dsp, io, plot, tube};
use alphatube::{save_results, AppError, SampleResult, TubeConfig};

/// One entry of the in-code measurement list.
struct Sample {
    name: &'static str,
    path: &'static str,
    /// Air temperature during this measurement [°C].
    temperature_c: f64,
    /// Header lines to skip in the analyzer export.
    skiprows: usize,
}

const SAMPLES: &[Sample] = &[Sample {
    name: "Melamine sample",
    path: "./alpha_source.txt",
    temperature_c: 23.7,
    skiprows: 59,
}];

const ARCHIVE_PATH: &str = "alpha_results.json";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("alphatube v0.1.0 starting...");

    let mut results = Vec::new();
    let mut failures = 0usize;

    // One failed sample must not take the remaining ones down with it.
    for sample in SAMPLES {
        match process_sample(sample) {
            Ok(result) => results.push(result),
            Err(e) => {
                error!("{}: {}", sample.name, e);
                failures += 1;
            }
        }
    }

    if let Err(e) = save_results(Path::new(ARCHIVE_PATH), &results) {
        error!("results archive: {}", e);
        failures += 1;
    }

    if failures > 0 {
        std::process::exit(1);
    }
}

/// Full pipeline for one sample: load, solve, reduce to third-octave bands,
/// render the comparison figure.
fn process_sample(sample: &Sample) -> Result<SampleResult, AppError> {
    info!("processing '{}' from {}", sample.name, sample.path);

    let config = TubeConfig {
        temperature_c: sample.temperature_c,
        ..TubeConfig::default()
    };

    let table = io::load_frf_table(Path::new(sample.path), sample.skiprows)?;
    let result = tube::solve(&table, &config)?;
    let bands = dsp::third_octave(&result.frequency, &result.absorption)?;

    let figure = PathBuf::from(format!("alpha-{}.svg", sample.name));
    plot::render_absorption(&figure, sample.name, &result, &bands)?;

    Ok(SampleResult {
        name: sample.name.to_string(),
        result,
    })
}
