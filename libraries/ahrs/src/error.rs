use thiserror::Error;

/// Primary error type for the AHRS crate
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AhrsError {
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
}

/// Type alias for Result with AhrsError
pub type AhrsResult<T> = Result<T, AhrsError>;
