use thiserror::Error;

/// Errors raised before a simulation run starts
///
/// Numerical corner cases inside a run (zero speed under drag, a flat
/// crossing step) are resolved in-line and never surface here. Safety
/// bounds are reported through `FlightOutcome`, not as errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter {
        field: &'static str,
        reason: String,
    },
}

impl SimulationError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SimulationError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            SimulationError::InvalidParameter { field, .. } => field,
        }
    }
}

pub type Result<T> = std::result::Result<T, SimulationError>;

/// Reject NaN and infinities for `field`
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SimulationError::invalid(field, format!("must be a finite number, got {value}")))
    }
}

/// Require `value > 0`
pub(crate) fn ensure_positive(field: &'static str, value: f64) -> Result<()> {
    ensure_finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::invalid(field, format!("must be greater than zero, got {value}")))
    }
}

/// Require `value >= 0`
pub(crate) fn ensure_non_negative(field: &'static str, value: f64) -> Result<()> {
    ensure_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(SimulationError::invalid(field, format!("must not be negative, got {value}")))
    }
}
