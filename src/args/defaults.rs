use crate::analysis::{DEFAULT_GRADIENT_THRESHOLD, DEFAULT_STATISTICAL_THRESHOLD, QpsMethod};

pub(crate) const DEFAULT_OUTPUT: &str = "llmperf-report";
pub(crate) const DEFAULT_BRAND: &str = "goLLMPerf";

pub(crate) const fn default_qps_threshold(method: QpsMethod) -> f64 {
    match method {
        QpsMethod::Gradient => DEFAULT_GRADIENT_THRESHOLD,
        QpsMethod::Statistical { .. } => DEFAULT_STATISTICAL_THRESHOLD,
    }
}
