// Per-sample comparison figure: measured vs. filtered absorption, with the
// third-octave band means overlaid as bars

use std::path::Path;

use plotters::coord::combinators::BindKeyPoints;
use plotters::prelude::*;
use tracing::info;

use crate::dsp::OctaveBand;
use crate::error::AppError;
use crate::tube::AcousticResult;

/// Plotted frequency range [Hz].
const X_RANGE_HZ: (f64, f64) = (300.0, 3500.0);

/// Fixed tick labels on the logarithmic frequency axis [Hz].
const X_TICKS_HZ: [f64; 9] = [
    400.0, 500.0, 630.0, 800.0, 1000.0, 1250.0, 1600.0, 2000.0, 2500.0,
];

/// Render the absorption comparison figure for one sample as an SVG.
///
/// Line series for the raw ("Measured α") and filtered ("Filtered α")
/// absorption on a log frequency axis, plus one bar per third-octave band
/// (pale green fill, black outline). Non-finite bins leave gaps in the
/// lines instead of being interpolated over.
pub fn render_absorption(
    path: &Path,
    sample_name: &str,
    result: &AcousticResult,
    bands: &[OctaveBand],
) -> Result<(), AppError> {
    info!("render_absorption: {} -> {}", sample_name, path.display());

    let root = SVGBackend::new(path, (900, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let x_axis = (X_RANGE_HZ.0..X_RANGE_HZ.1)
        .log_scale()
        .with_key_points(X_TICKS_HZ.to_vec());

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption(sample_name, ("sans-serif", 24))
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(x_axis, 0.0..1.0)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Frequency [Hz]")
        .y_desc("Absorption coefficient [-]")
        .x_label_formatter(&|x: &f64| format!("{x:.0}"))
        .draw()
        .map_err(render_err)?;

    // Band bars first so the curves stay visible on top of them
    chart
        .draw_series(bands.iter().filter(|b| b.mean.is_finite()).map(|b| {
            let half = b.width_hz / 2.0;
            Rectangle::new(
                [(b.center_hz - half, 0.0), (b.center_hz + half, b.mean)],
                GREEN.mix(0.4).filled(),
            )
        }))
        .map_err(render_err)?;
    chart
        .draw_series(bands.iter().filter(|b| b.mean.is_finite()).map(|b| {
            let half = b.width_hz / 2.0;
            Rectangle::new(
                [(b.center_hz - half, 0.0), (b.center_hz + half, b.mean)],
                BLACK.stroke_width(1),
            )
        }))
        .map_err(render_err)?;

    let mut first = true;
    for segment in finite_segments(&result.frequency, &result.absorption_raw) {
        let series = chart
            .draw_series(LineSeries::new(segment, &BLUE))
            .map_err(render_err)?;
        if first {
            series
                .label("Measured α")
                .legend(|(x, y)| PathElement::new([(x, y), (x + 20, y)], &BLUE));
            first = false;
        }
    }

    let mut first = true;
    for segment in finite_segments(&result.frequency, &result.absorption) {
        let series = chart
            .draw_series(LineSeries::new(segment, &RED))
            .map_err(render_err)?;
        if first {
            series
                .label("Filtered α")
                .legend(|(x, y)| PathElement::new([(x, y), (x + 20, y)], &RED));
            first = false;
        }
    }

    chart
        .configure_series_labels()
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Contiguous runs of finite samples, so singular bins split the polyline.
fn finite_segments(freq: &[f64], values: &[f64]) -> Vec<Vec<(f64, f64)>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for (&f, &v) in freq.iter().zip(values.iter()) {
        if v.is_finite() {
            current.push((f, v));
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn render_err(e: impl std::fmt::Display) -> AppError {
    AppError::Render {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    fn synthetic_result(with_nan: bool) -> AcousticResult {
        let frequency: Vec<f64> = (300..=3500).step_by(2).map(|f| f as f64).collect();
        let n = frequency.len();
        let mut absorption: Vec<f64> = frequency
            .iter()
            .map(|&f| 0.5 + 0.4 * (f / 3500.0))
            .collect();
        if with_nan {
            absorption[n / 2] = f64::NAN;
            absorption[n / 2 + 1] = f64::INFINITY;
        }
        AcousticResult {
            frequency,
            reflection: vec![Complex64::new(0.3, 0.1); n],
            absorption: absorption.clone(),
            absorption_raw: absorption,
            impedance: vec![Complex64::new(400.0, -20.0); n],
        }
    }

    fn synthetic_bands() -> Vec<OctaveBand> {
        vec![
            OctaveBand {
                center_hz: 500.0,
                lower_hz: 445.4,
                upper_hz: 561.2,
                width_hz: 115.8,
                mean: 0.55,
            },
            OctaveBand {
                center_hz: 1000.0,
                lower_hz: 890.9,
                upper_hz: 1122.5,
                width_hz: 232.0,
                mean: 0.72,
            },
        ]
    }

    #[test]
    fn test_render_creates_svg() {
        let result = synthetic_result(false);
        let bands = synthetic_bands();

        let path = std::env::temp_dir().join("alphatube_render_test.svg");
        render_absorption(&path, "Test sample", &result, &bands).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<svg"), "output is not an SVG document");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_render_tolerates_singular_bins() {
        let result = synthetic_result(true);
        let bands = synthetic_bands();

        let path = std::env::temp_dir().join("alphatube_render_nan_test.svg");
        render_absorption(&path, "Singular sample", &result, &bands).unwrap();
        assert!(path.exists());

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_finite_segments_split_at_gaps() {
        let freq = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let values = vec![0.1, 0.2, f64::NAN, 0.4, 0.5];

        let segments = finite_segments(&freq, &values);
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0], vec![(1.0, 0.1), (2.0, 0.2)]);
        assert_eq!(segments[1], vec![(4.0, 0.4), (5.0, 0.5)]);
    }

    #[test]
    fn test_finite_segments_all_finite() {
        let freq = vec![1.0, 2.0];
        let values = vec![0.1, 0.2];
        let segments = finite_segments(&freq, &values);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].len(), 2);
    }
}
