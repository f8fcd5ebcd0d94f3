pub mod octave;
pub mod window;

pub use octave::{third_octave, OctaveBand, BAND_CENTERS_HZ};
pub use window::{hann_window, mirror_onesided, window_frf};
