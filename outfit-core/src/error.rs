use thiserror::Error;

/// Recoverable failures surfaced to the dashboard as notices.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("Failed to fetch weather data: {0}")]
    WeatherFetch(String),

    #[error("Keyword generation failed: {0}")]
    ExternalService(String),
}

impl DashboardError {
    /// Wrap a generator failure, keeping the whole context chain.
    pub fn external(err: &anyhow::Error) -> Self {
        DashboardError::ExternalService(format!("{err:#}"))
    }
}
