//! Ordered collection of captured predicate failures.
//!
//! One collector lives behind each soft-assertion session. Every intercepted
//! predicate appends here instead of raising, and the session's `assert_all`
//! turns whatever accumulated into a single aggregate failure.

/// One predicate failure, captured at the moment it would have been raised.
///
/// The message is fully rendered at capture time (description prefix or
/// override already applied), so later inspection never re-renders anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedFailure {
    message: String,
}

impl CapturedFailure {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The rendered failure message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Append-only, order-preserving list of captured failures.
///
/// Owned by one soft session and shared with every assertion object the
/// session produces. Not synchronized: a session belongs to one thread.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    failures: Vec<CapturedFailure>,
}

impl ErrorCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a failure. Call order is preserved.
    pub(crate) fn record(&mut self, failure: CapturedFailure) {
        self.failures.push(failure);
    }

    /// Whether any failure has been recorded.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Number of recorded failures.
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// The recorded failures, in call order.
    pub fn failures(&self) -> &[CapturedFailure] {
        &self.failures
    }

    /// The aggregate failure message, or `None` if nothing failed.
    ///
    /// A single failure is rendered verbatim under a singular header. Two or
    /// more get a count header and a 1-indexed line per failure.
    pub fn aggregate_message(&self) -> Option<String> {
        match self.failures.as_slice() {
            [] => None,
            [only] => Some(format!(
                "The following assertion failed:\n{}",
                only.message()
            )),
            many => {
                let mut message = format!("The following {} assertions failed:", many.len());
                for (index, failure) in many.iter().enumerate() {
                    message.push_str(&format!("\n{}) {}", index + 1, failure.message()));
                }
                Some(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collector_has_no_aggregate() {
        let collector = ErrorCollector::new();
        assert!(!collector.has_failures());
        assert_eq!(collector.aggregate_message(), None);
    }

    #[test]
    fn test_single_failure_uses_singular_header() {
        let mut collector = ErrorCollector::new();
        collector.record(CapturedFailure::new("expected \"abc\" to start with \"x\""));

        let message = collector.aggregate_message().unwrap();
        assert!(message.starts_with("The following assertion failed:\n"));
        assert!(message.contains("expected \"abc\" to start with \"x\""));
        assert!(!message.contains("1)"));
    }

    #[test]
    fn test_multiple_failures_are_enumerated_in_order() {
        let mut collector = ErrorCollector::new();
        collector.record(CapturedFailure::new("first"));
        collector.record(CapturedFailure::new("second"));
        collector.record(CapturedFailure::new("third"));

        let message = collector.aggregate_message().unwrap();
        assert!(message.starts_with("The following 3 assertions failed:"));
        assert_eq!(
            message,
            "The following 3 assertions failed:\n1) first\n2) second\n3) third"
        );
    }

    #[test]
    fn test_failures_are_inspectable() {
        let mut collector = ErrorCollector::new();
        collector.record(CapturedFailure::new("only"));

        assert_eq!(collector.failure_count(), 1);
        assert_eq!(collector.failures()[0].message(), "only");
    }
}
