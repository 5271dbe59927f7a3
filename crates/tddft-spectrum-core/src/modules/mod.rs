pub mod extract;
pub mod loader;
pub mod pipeline;
pub mod serialization;
pub mod synthesis;

mod traits;

pub use pipeline::{
    SpectrumReport, SpectrumRequest, TddftSpectrumPipeline, extract_sticks, run_spectrum,
};
pub use traits::SpectrumExecutor;
