use super::pipeline::{SpectrumReport, SpectrumRequest};
use crate::domain::SpectrumResult;

pub trait SpectrumExecutor {
    fn execute(&self, request: &SpectrumRequest) -> SpectrumResult<SpectrumReport>;
}
