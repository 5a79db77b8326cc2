//! Request validation utilities for consistent validation across handlers

use crate::error::ApiError;

/// Trait for validating request payloads
///
/// Implemented for every create/revise request type so handlers can reject
/// malformed input with a consistent message before touching the database.
pub trait RequestValidation {
    /// Validates the request and returns an error if validation fails
    fn validate(&self) -> Result<(), ApiError>;
}

/// Macro for validating fields with custom predicates
#[macro_export]
macro_rules! validate_field {
    ($field:expr, $predicate:expr, $message:expr) => {
        if !$predicate {
            return Err($crate::error::ApiError::validation($message));
        }
    };
}

/// Macro for validating required fields (non-empty strings)
#[macro_export]
macro_rules! validate_required {
    ($field:expr, $message:expr) => {
        validate_field!($field, !$field.trim().is_empty(), $message);
    };
}

/// Macro for validating that an id is a positive integer
#[macro_export]
macro_rules! validate_id {
    ($field:expr, $message:expr) => {
        validate_field!($field, $field > 0, $message);
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    struct TestRequest {
        urgency: String,
        patient_id: i32,
        qty: i32,
    }

    impl RequestValidation for TestRequest {
        fn validate(&self) -> Result<(), ApiError> {
            validate_required!(self.urgency, "Urgency is required");
            validate_id!(self.patient_id, "Patient ID must be positive");
            validate_field!(self.qty, self.qty >= 1, "Quantity must be at least 1");
            Ok(())
        }
    }

    #[test]
    fn test_validation_success() {
        let request = TestRequest {
            urgency: "High".to_string(),
            patient_id: 601,
            qty: 2,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_urgency() {
        let request = TestRequest {
            urgency: "  ".to_string(),
            patient_id: 601,
            qty: 2,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_validation_nonpositive_id() {
        let request = TestRequest {
            urgency: "High".to_string(),
            patient_id: 0,
            qty: 2,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_validation_zero_quantity() {
        let request = TestRequest {
            urgency: "High".to_string(),
            patient_id: 601,
            qty: 0,
        };
        assert!(request.validate().is_err());
    }
}
