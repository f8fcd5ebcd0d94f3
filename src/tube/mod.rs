// Two-microphone transfer-function method: reflection, absorption, impedance

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::info;

use crate::dsp::window_frf;
use crate::error::AppError;
use crate::io::FrfTable;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Physical configuration of the impedance tube and of the measurement
/// table layout. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TubeConfig {
    /// Air temperature during the measurement [°C].
    pub temperature_c: f64,
    /// Atmospheric pressure [kPa].
    pub pressure_kpa: f64,
    /// Distance from microphone 2 to the sample surface [m].
    pub mic2_to_sample_m: f64,
    /// Spacing between the two microphones [m].
    pub mic_spacing_m: f64,
    /// 0-based table columns holding (mic1 re, mic1 im, mic2 re, mic2 im).
    pub channel_columns: (usize, usize, usize, usize),
    /// Length of the Hann window applied to the impulse response [samples].
    pub window_len: usize,
}

impl Default for TubeConfig {
    fn default() -> Self {
        Self {
            temperature_c: 24.0,
            pressure_kpa: 100.79,
            mic2_to_sample_m: 0.035,
            mic_spacing_m: 0.045,
            channel_columns: (4, 5, 10, 11),
            window_len: 500,
        }
    }
}

impl TubeConfig {
    /// Speed of sound in air at the measured temperature [m/s].
    pub fn sound_speed(&self) -> f64 {
        343.2 * ((self.temperature_c + 273.15) / 293.0).sqrt()
    }

    /// Air density at the measured temperature and pressure [kg/m³].
    pub fn air_density(&self) -> f64 {
        1.186 * (self.pressure_kpa * 293.0) / (101.325 * (self.temperature_c + 273.15))
    }
}

/// Per-sample output of the solver. All vectors share the frequency axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcousticResult {
    /// Frequency axis [Hz].
    pub frequency: Vec<f64>,
    /// Complex reflection coefficient of the filtered transfer function.
    pub reflection: Vec<Complex64>,
    /// Absorption coefficient `1 - |r|²` of the filtered branch. In [0, 1]
    /// for physical data; not clamped.
    pub absorption: Vec<f64>,
    /// Absorption of the unfiltered transfer function, kept for comparison.
    pub absorption_raw: Vec<f64>,
    /// Surface impedance `rho*c0*(1+r)/(1-r)` [Pa·s/m], filtered branch.
    pub impedance: Vec<Complex64>,
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

/// Solve the two-microphone method for one measurement table.
///
/// 1. Assemble the complex channel spectra Hx1, Hx2 from the configured
///    columns
/// 2. H12 = Hx2 / Hx1; a filtered copy is taken through the
///    impulse-response window
/// 3. Per bin, with k0 = 2*pi*f/c0, x2 the mic-2-to-sample distance and s
///    the mic spacing:
///    `r = e^(i*2*k0*(x2+s)) * (H12 - e^(-i*k0*s)) / (e^(i*k0*s) - H12)`
/// 4. `alpha = 1 - |r|²` for both branches; `Z = rho*c0*(1+r)/(1-r)` for
///    the filtered branch
///
/// A near-zero Hx1 or a H12 crossing `e^(i*k0*s)` makes individual bins
/// non-finite; that is a property of the measurement, not an error, and the
/// bins carry through to the plot and archive untouched.
pub fn solve(table: &FrfTable, config: &TubeConfig) -> Result<AcousticResult, AppError> {
    let c0 = config.sound_speed();
    let rho = config.air_density();
    let z0 = rho * c0;

    let freq = table.frequency();
    let (re1, im1, re2, im2) = config.channel_columns;
    let hx1 = complex_column(table, re1, im1)?;
    let hx2 = complex_column(table, re2, im2)?;

    let h12_raw: Vec<Complex64> = hx2
        .iter()
        .zip(hx1.iter())
        .map(|(&h2, &h1)| h2 / h1)
        .collect();
    let h12 = window_frf(&h12_raw, config.window_len);

    info!(
        "solve: {} bins, c0={:.2} m/s, rho={:.4} kg/m³",
        freq.len(),
        c0,
        rho
    );

    let x2 = config.mic2_to_sample_m;
    let s = config.mic_spacing_m;
    let one = Complex64::new(1.0, 0.0);

    let mut reflection = Vec::with_capacity(freq.len());
    let mut absorption = Vec::with_capacity(freq.len());
    let mut absorption_raw = Vec::with_capacity(freq.len());
    let mut impedance = Vec::with_capacity(freq.len());

    for (i, &f) in freq.iter().enumerate() {
        let k0 = 2.0 * PI * f / c0;

        let r = reflection_at(h12[i], k0, x2, s);
        let r_raw = reflection_at(h12_raw[i], k0, x2, s);

        absorption.push(1.0 - r.norm_sqr());
        absorption_raw.push(1.0 - r_raw.norm_sqr());
        impedance.push(z0 * (one + r) / (one - r));
        reflection.push(r);
    }

    Ok(AcousticResult {
        frequency: freq.to_vec(),
        reflection,
        absorption,
        absorption_raw,
        impedance,
    })
}

/// Reflection coefficient at one bin.
fn reflection_at(h12: Complex64, k0: f64, x2: f64, s: f64) -> Complex64 {
    let shift = Complex64::new(0.0, 2.0 * k0 * (x2 + s)).exp();
    let e_back = Complex64::new(0.0, -k0 * s).exp();
    let e_fwd = Complex64::new(0.0, k0 * s).exp();
    shift * (h12 - e_back) / (e_fwd - h12)
}

fn complex_column(
    table: &FrfTable,
    re_idx: usize,
    im_idx: usize,
) -> Result<Vec<Complex64>, AppError> {
    let re = table.column(re_idx)?;
    let im = table.column(im_idx)?;
    Ok(re
        .iter()
        .zip(im.iter())
        .map(|(&a, &b)| Complex64::new(a, b))
        .collect())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
