pub mod dsp;
pub mod error;
pub mod io;
pub mod plot;
pub mod results;
pub mod tube;

pub use error::AppError;
pub use results::{save_results, SampleResult};
pub use tube::{solve, AcousticResult, TubeConfig};
