/*!
 * Error Handling for the Module-LWE KEM
 *
 * Provides the error taxonomy for parameter validation, structural input
 * checks and randomness failures, with numeric error codes, user-friendly
 * messages, and suggested remediation strategies.
 */

use thiserror::Error;

/// Error type for all ring, codec and KEM operations
#[derive(Debug, Error)]
pub enum KemError {
    #[error("Invalid ring parameter: {parameter} - expected {expected} - got {actual}")]
    ConfigurationError {
        parameter: String,
        expected: String,
        actual: String,
        error_code: u32,
    },

    #[error("Structural input error in {operation}: expected {expected} - got {actual}")]
    StructuralInputError {
        operation: String,
        expected: String,
        actual: String,
        error_code: u32,
    },

    #[error("Randomness source unavailable: {cause}")]
    RandomnessUnavailable { cause: String, error_code: u32 },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Error code constants for different error categories
pub mod error_codes {
    // Configuration errors: 1000-1999
    pub const INVALID_RING_DEGREE: u32 = 1001;
    pub const INVALID_MODULUS: u32 = 1002;
    pub const INSUFFICIENT_NOISE_HEADROOM: u32 = 1003;
    pub const INVALID_MODULE_RANK: u32 = 1004;
    pub const INVALID_NOISE_PARAMETER: u32 = 1005;

    // Structural input errors: 2000-2999
    pub const DIMENSION_MISMATCH: u32 = 2001;
    pub const COEFFICIENT_OUT_OF_RANGE: u32 = 2002;
    pub const INVALID_ENCODING_LENGTH: u32 = 2003;
    pub const UNKNOWN_KEY_FORMAT: u32 = 2004;
    pub const INVALID_MESSAGE_BIT: u32 = 2005;
    pub const NON_CANONICAL_ENCODING: u32 = 2006;

    // Randomness errors: 3000-3999
    pub const RANDOMNESS_SOURCE_FAILED: u32 = 3001;

    // Serialization errors: 9000-9999
    pub const SERIALIZATION_FAILED: u32 = 9001;
}

impl KemError {
    /// Get the numeric error code for this error
    pub fn error_code(&self) -> u32 {
        match self {
            KemError::ConfigurationError { error_code, .. } => *error_code,
            KemError::StructuralInputError { error_code, .. } => *error_code,
            KemError::RandomnessUnavailable { error_code, .. } => *error_code,
            KemError::SerializationError(_) => error_codes::SERIALIZATION_FAILED,
        }
    }

    /// Get the error category as a string
    pub fn error_type(&self) -> &'static str {
        match self {
            KemError::ConfigurationError { .. } => "ConfigurationError",
            KemError::StructuralInputError { .. } => "StructuralInputError",
            KemError::RandomnessUnavailable { .. } => "RandomnessUnavailable",
            KemError::SerializationError(_) => "SerializationError",
        }
    }

    /// Get a user-friendly error message
    pub fn user_friendly_message(&self) -> String {
        match self {
            KemError::ConfigurationError { parameter, .. } => format!(
                "Ring parameter '{}' is invalid. No key material was produced.",
                parameter
            ),
            KemError::StructuralInputError { operation, .. } => format!(
                "Input to '{}' does not match the configured dimensions and was rejected.",
                operation
            ),
            KemError::RandomnessUnavailable { .. } => {
                "The secure randomness source could not supply bytes. The operation was aborted."
                    .to_string()
            }
            KemError::SerializationError(_) => {
                "Parameter data could not be serialized or parsed.".to_string()
            }
        }
    }

    /// Get suggested remediation steps
    pub fn suggested_remediation(&self) -> Option<String> {
        match self {
            KemError::ConfigurationError { error_code, .. } => match *error_code {
                error_codes::INVALID_RING_DEGREE => {
                    Some("Choose a ring degree n that is a power of two.".to_string())
                }
                error_codes::INVALID_MODULUS | error_codes::INSUFFICIENT_NOISE_HEADROOM => Some(
                    "Use a prime modulus q below 2^31 that exceeds eta * k * n.".to_string(),
                ),
                _ => Some("Use one of the predefined parameter sets.".to_string()),
            },
            KemError::StructuralInputError { .. } => Some(
                "Check that keys and ciphertexts were produced with the same ring parameters."
                    .to_string(),
            ),
            KemError::RandomnessUnavailable { .. } => Some(
                "Check system entropy sources or the injected random number generator."
                    .to_string(),
            ),
            KemError::SerializationError(_) => None,
        }
    }
}

/// Convenience constructors for common error types
impl KemError {
    pub fn configuration_error(parameter: &str, expected: &str, actual: &str, error_code: u32) -> Self {
        KemError::ConfigurationError {
            parameter: parameter.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            error_code,
        }
    }

    pub fn structural_error(operation: &str, expected: &str, actual: &str, error_code: u32) -> Self {
        KemError::StructuralInputError {
            operation: operation.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
            error_code,
        }
    }

    /// Shorthand for a length mismatch between an input and the configured dimension
    pub fn dimension_mismatch(operation: &str, expected: usize, actual: usize) -> Self {
        Self::structural_error(
            operation,
            &expected.to_string(),
            &actual.to_string(),
            error_codes::DIMENSION_MISMATCH,
        )
    }

    pub fn randomness_unavailable(cause: &str) -> Self {
        KemError::RandomnessUnavailable {
            cause: cause.to_string(),
            error_code: error_codes::RANDOMNESS_SOURCE_FAILED,
        }
    }
}

// From implementations for automatic error conversion
impl From<rand::Error> for KemError {
    fn from(err: rand::Error) -> Self {
        KemError::randomness_unavailable(&err.to_string())
    }
}

impl From<serde_json::Error> for KemError {
    fn from(err: serde_json::Error) -> Self {
        KemError::SerializationError(err.to_string())
    }
}

/// Result type alias for KEM operations
pub type KemResult<T> = Result<T, KemError>;
