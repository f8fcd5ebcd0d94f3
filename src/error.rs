#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {message}")]
    Parse { message: String },

    #[error("Band coverage error: 1/3-octave band at {center_hz} Hz is not covered by the measurement (edge {edge_hz} Hz)")]
    BandCoverage { center_hz: f64, edge_hz: f64 },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Archive error: {0}")]
    Archive(#[from] serde_json::Error),
}
