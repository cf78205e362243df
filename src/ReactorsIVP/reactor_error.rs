use crate::Kinetics::rate_constants::KineticsError;
use crate::Thermodynamics::thermo_api::ThermoError;
use thiserror::Error;

/// Errors of reactor setup and integration
#[derive(Debug, Error)]
pub enum ReactorError {
    /// rejected before integration starts
    #[error("invalid configuration of `{field}`: {reason}")]
    InvalidConfiguration { field: String, reason: String },
    #[error("missing data: {0}")]
    MissingData(String),
    /// a derivative evaluated during integration was not finite
    #[error("numerical degeneracy at W = {w} kg: {detail}")]
    NumericalDegeneracy { w: f64, detail: String },
    /// the integrator itself gave up (step size collapse, iteration limit)
    #[error("integration failed: {0}")]
    IntegrationFailed(String),
    #[error("state vector has {found} entries, layout expects {expected}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error(transparent)]
    Thermo(#[from] ThermoError),
    #[error(transparent)]
    Kinetics(#[from] KineticsError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl ReactorError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        ReactorError::InvalidConfiguration {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
