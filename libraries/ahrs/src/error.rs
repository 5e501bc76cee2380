use thiserror::Error;

/// Primary error type for the AHRS crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AhrsError {
    /// State would become invalid (NaN or infinite values)
    #[error("Invalid state detected in {component}: {message}")]
    InvalidState {
        /// Detailed error message
        message: String,
        /// Component where invalid state was detected
        component: String,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Detailed error message
        message: String,
        /// Configuration parameter that caused the error
        parameter: Option<String>,
    },
}

/// Helper functions for creating common errors
pub mod helpers {
    use super::*;

    /// Create an invalid state error
    pub fn invalid_state(message: impl Into<String>, component: impl Into<String>) -> AhrsError {
        AhrsError::InvalidState {
            message: message.into(),
            component: component.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(
        message: impl Into<String>,
        parameter: Option<impl Into<String>>,
    ) -> AhrsError {
        AhrsError::ConfigurationError {
            message: message.into(),
            parameter: parameter.map(|p| p.into()),
        }
    }

    /// Check if a vector contains invalid values (NaN or infinite)
    pub fn check_vector_valid(vec: &nalgebra::Vector3<f32>, name: &str) -> Result<(), AhrsError> {
        if vec.iter().any(|v| v.is_nan() || v.is_infinite()) {
            Err(invalid_state(
                format!("Vector {} contains NaN or infinite values", name),
                "Vector validation",
            ))
        } else {
            Ok(())
        }
    }
}

/// Type alias for Result with AhrsError
pub type AhrsResult<T> = Result<T, AhrsError>;
