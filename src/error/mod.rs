mod app;
mod config;
mod locale;
mod report;
mod sink;
mod validation;

#[cfg(test)]
mod test_support;

pub use app::{AppError, AppResult};
pub use config::ConfigError;
pub use locale::LocaleError;
pub use report::ReportError;
pub use sink::SinkError;
pub use validation::ValidationError;
