// Time-domain windowing of a single-sided FRF: mirror, IFFT, circular Hann mask, FFT

use num_complex::Complex64;
use rustfft::FftPlanner;
use std::f64::consts::PI;

/// Suppress measurement noise in a transfer function by windowing its
/// impulse response.
///
/// `frf` is the non-negative-frequency half of a conjugate-symmetric
/// spectrum (the single-sided spectrum of a real signal).
///
/// 1. Replace NaN bins with zero (the caller's buffer is never touched)
/// 2. Mirror to the full double-sided spectrum
/// 3. IFFT into an impulse-response-like time signal
/// 4. Multiply by a circularly-wrapped Hann mask that keeps the earliest
///    and latest samples and rejects the central bulk
/// 5. FFT back, truncate to the single-sided length
pub fn window_frf(frf: &[Complex64], window_len: usize) -> Vec<Complex64> {
    let sanitized: Vec<Complex64> = frf
        .iter()
        .map(|c| {
            let re = if c.re.is_nan() { 0.0 } else { c.re };
            let im = if c.im.is_nan() { 0.0 } else { c.im };
            Complex64::new(re, im)
        })
        .collect();

    let n = sanitized.len();
    if n < 2 {
        return sanitized;
    }

    let mut signal = mirror_onesided(&sanitized);
    let full_len = signal.len();

    let mut planner = FftPlanner::<f64>::new();
    let ifft = planner.plan_fft_inverse(full_len);
    ifft.process(&mut signal);

    // Normalize IFFT output (rustfft does not normalize); fold the factor
    // into the mask multiply.
    let norm = 1.0 / full_len as f64;
    let mask = circular_mask(full_len, window_len);
    for (s, &m) in signal.iter_mut().zip(mask.iter()) {
        *s *= m * norm;
    }

    let fft = planner.plan_fft_forward(full_len);
    fft.process(&mut signal);

    signal.truncate(n);
    signal
}

/// Mirror a single-sided spectrum into the full conjugate-symmetric
/// double-sided spectrum of length `2n - 2` (interior bins reversed and
/// conjugated, DC and Nyquist appearing once).
pub fn mirror_onesided(spectrum: &[Complex64]) -> Vec<Complex64> {
    let n = spectrum.len();
    if n < 2 {
        return spectrum.to_vec();
    }

    let full_len = 2 * n - 2;
    let mut full = Vec::with_capacity(full_len);
    full.extend_from_slice(spectrum);

    // Negative frequencies: conjugate mirror of the interior bins
    for i in 1..(full_len - n + 1) {
        let idx = n - 1 - i;
        full.push(full[idx].conj());
    }

    full
}

/// Symmetric Hann window, endpoints at zero.
pub fn hann_window(n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![1.0; n];
    }
    (0..n)
        .map(|i| {
            let x = 2.0 * PI * i as f64 / (n - 1) as f64;
            0.5 * (1.0 - x.cos())
        })
        .collect()
}

/// Circularly-wrapped time mask: the decaying half of a Hann window at the
/// start of the buffer, the rising half wrapped to its end, zeros between.
///
/// When the buffer is shorter than the window the copy lengths are clamped
/// so the two halves tile the buffer without overlapping.
fn circular_mask(len: usize, window_len: usize) -> Vec<f64> {
    let mut mask = vec![0.0; len];
    if len == 0 || window_len == 0 {
        return mask;
    }

    let hann = hann_window(window_len);
    let half = window_len / 2;

    let head = half.min(len);
    mask[..head].copy_from_slice(&hann[half..half + head]);

    let tail = half.min(len - head);
    let dst = len - tail;
    mask[dst..].copy_from_slice(&hann[..tail]);

    mask
}
