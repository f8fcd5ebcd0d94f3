use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Nominal one-third-octave band centers [Hz] covered by the tube's valid
/// measurement range.
pub const BAND_CENTERS_HZ: [f64; 9] = [
    396.9, 500.0, 630.0, 793.7, 1000.0, 1260.0, 1587.0, 2000.0, 2520.0,
];

/// One aggregated third-octave band.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OctaveBand {
    /// Nominal band center [Hz].
    pub center_hz: f64,
    /// Theoretical band edges `center / 2^(1/6)` and `center * 2^(1/6)` [Hz].
    pub lower_hz: f64,
    pub upper_hz: f64,
    /// Measured bandwidth: distance between the grid samples closest to the
    /// edges, rounded to one decimal [Hz].
    pub width_hz: f64,
    /// Arithmetic mean of the series over the band.
    pub mean: f64,
}

/// Aggregate a per-bin series into the 9 fixed one-third-octave bands.
///
/// For each band edge the LAST grid index at or below the edge is located
/// on the ascending frequency axis. The mean runs over the half-open index
/// range `[inf, sup)`. A band whose edges fall outside the measured range,
/// or that contains no samples, is a coverage error.
pub fn third_octave(freq: &[f64], values: &[f64]) -> Result<Vec<OctaveBand>, AppError> {
    let k = 2.0_f64.powf(1.0 / 6.0);
    let mut bands = Vec::with_capacity(BAND_CENTERS_HZ.len());

    for &center in BAND_CENTERS_HZ.iter() {
        let lower = center / k;
        let upper = center * k;

        let inf_idx = last_index_at_or_below(freq, lower).ok_or(AppError::BandCoverage {
            center_hz: center,
            edge_hz: lower,
        })?;
        let sup_idx = last_index_at_or_below(freq, upper).ok_or(AppError::BandCoverage {
            center_hz: center,
            edge_hz: upper,
        })?;

        if inf_idx == sup_idx {
            return Err(AppError::BandCoverage {
                center_hz: center,
                edge_hz: upper,
            });
        }

        let span = &values[inf_idx..sup_idx];
        let mean = span.iter().sum::<f64>() / span.len() as f64;

        bands.push(OctaveBand {
            center_hz: center,
            lower_hz: lower,
            upper_hz: upper,
            width_hz: round_one_decimal(freq[sup_idx] - freq[inf_idx]),
            mean,
        });
    }

    Ok(bands)
}

/// Last index whose frequency is at or below `edge`, on a non-decreasing axis.
fn last_index_at_or_below(freq: &[f64], edge: f64) -> Option<usize> {
    let count = freq.partition_point(|&f| f <= edge);
    count.checked_sub(1)
}

fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_one_grid() -> Vec<f64> {
        (300..=3500).map(|f| f as f64).collect()
    }

    #[test]
    fn test_nine_bands_in_fixed_order() {
        let freq = step_one_grid();
        let values = vec![0.42; freq.len()];

        let bands = third_octave(&freq, &values).unwrap();
        assert_eq!(bands.len(), 9);
        for (band, &center) in bands.iter().zip(BAND_CENTERS_HZ.iter()) {
            assert_eq!(band.center_hz, center);
            assert!(band.width_hz > 0.0, "band {} has width {}", center, band.width_hz);
            assert!(
                (band.mean - 0.42).abs() < 1e-12,
                "constant series should yield constant means, band {} gave {}",
                center,
                band.mean
            );
        }
    }

    #[test]
    fn test_half_open_mean_range() {
        // With values equal to the (integer) frequency axis, the band mean is
        // the midpoint of the covered integers with the upper sample excluded.
        let freq = step_one_grid();
        let bands = third_octave(&freq, &freq).unwrap();

        // 1000 Hz band: edges 890.90 / 1122.46, so the index range covers the
        // integer frequencies 890..=1121.
        let band = &bands[4];
        assert_eq!(band.center_hz, 1000.0);
        assert!(
            (band.mean - 1005.5).abs() < 1e-9,
            "expected mean 1005.5 over 890..=1121, got {}",
            band.mean
        );
        assert!((band.width_hz - 232.0).abs() < 1e-12);
    }

    #[test]
    fn test_band_below_range_fails() {
        // Starting at 500 Hz leaves the 396.9 Hz band's lower edge uncovered.
        let freq: Vec<f64> = (500..=3500).map(|f| f as f64).collect();
        let values = vec![0.5; freq.len()];

        let err = third_octave(&freq, &values).unwrap_err();
        match err {
            AppError::BandCoverage { center_hz, .. } => {
                assert_eq!(center_hz, 396.9);
            }
            other => panic!("expected BandCoverage, got {other:?}"),
        }
    }

    #[test]
    fn test_coarse_grid_band_not_covered() {
        // Both edges of the 396.9 Hz band fall into the same grid gap.
        let freq = vec![100.0, 2000.0, 3000.0];
        let values = vec![0.5; 3];

        let err = third_octave(&freq, &values).unwrap_err();
        assert!(matches!(err, AppError::BandCoverage { .. }));
    }

    #[test]
    fn test_last_index_at_or_below() {
        let freq = vec![1.0, 2.0, 2.0, 3.0];
        assert_eq!(last_index_at_or_below(&freq, 0.5), None);
        assert_eq!(last_index_at_or_below(&freq, 1.0), Some(0));
        assert_eq!(last_index_at_or_below(&freq, 2.0), Some(2));
        assert_eq!(last_index_at_or_below(&freq, 10.0), Some(3));
    }
}
