//! Contract violations: API misuse, as opposed to predicate failures.
//!
//! A predicate failure means the actual value did not satisfy an expected
//! condition; in a soft session those are collected. A contract violation
//! means the chain itself cannot continue meaningfully (navigating into an
//! absent value, narrowing to the wrong type, handing a predicate a
//! malformed pattern). Violations always propagate immediately, in both
//! eager and soft mode, and abort the whole session.

/// Ways a caller can misuse the assertion API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContractViolation {
    /// Type narrowing was asked for a type the value is not an instance of.
    #[error("cannot treat {actual} as {expected}: runtime type does not match")]
    WrongInstanceType {
        /// Name of the requested target type.
        expected: &'static str,
        /// Name of the value's actual runtime type.
        actual: &'static str,
    },

    /// Registry dispatch was asked for a type with no registered factory.
    #[error("no assertion factory registered for {0}")]
    UnregisteredType(&'static str),

    /// Navigation into a value that is not present.
    #[error("cannot navigate into {0}: no value is present")]
    MissingValue(String),

    /// Navigation to a slice element that does not exist.
    #[error("element index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A pattern-based predicate was given a pattern that does not parse.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

impl ContractViolation {
    /// Propagate the violation. Never collected, even inside a soft session.
    pub(crate) fn raise(self) -> ! {
        panic!("{self}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_instance_type_names_both_types() {
        let violation = ContractViolation::WrongInstanceType {
            expected: "alloc::string::String",
            actual: "i32",
        };
        let text = violation.to_string();
        assert!(text.contains("alloc::string::String"));
        assert!(text.contains("i32"));
    }

    #[test]
    fn test_out_of_bounds_message() {
        let violation = ContractViolation::IndexOutOfBounds { index: 4, len: 2 };
        assert_eq!(
            violation.to_string(),
            "element index 4 is out of bounds for length 2"
        );
    }
}
