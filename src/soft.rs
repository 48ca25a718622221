//! The soft-assertion engine and session type.
//!
//! Every predicate in the crate funnels its outcome through one interception
//! point, [`AssertionState::settle`]. The attached [`FailureSink`] decides
//! what a failure means: eager assertions panic at the call site, soft
//! assertions record into the session's [`ErrorCollector`] and let the chain
//! continue against the original actual value. Assertion types never branch
//! on the mode themselves, so new types are intercepted with zero changes
//! here.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::collector::{CapturedFailure, ErrorCollector};
use crate::description::AssertionInfo;
use crate::factory::AnyAssert;
use crate::fluent::Assert;
use crate::representation::{self, Representation};

/// Where intercepted predicate failures go.
#[derive(Clone)]
pub(crate) enum FailureSink {
    /// Eager mode: raise at the call site.
    Panic,
    /// Soft mode: append to the shared collector and keep the chain alive.
    Collect(Rc<RefCell<ErrorCollector>>),
}

impl FailureSink {
    pub(crate) fn report(&self, failure: CapturedFailure) {
        match self {
            FailureSink::Panic => panic!("{}", failure.message()),
            FailureSink::Collect(collector) => collector.borrow_mut().record(failure),
        }
    }
}

/// The state handed down through a chain: metadata plus the failure sink.
///
/// Opaque to callers; custom [`AssertFactory`](crate::factory::AssertFactory)
/// implementations receive one and forward it into
/// [`Assert::with_state`](crate::fluent::Assert::with_state) (or into their
/// own assertion type built on top of it).
pub struct AssertionState {
    pub(crate) info: AssertionInfo,
    pub(crate) sink: FailureSink,
}

impl AssertionState {
    pub(crate) fn eager() -> Self {
        Self {
            info: AssertionInfo::new(representation::standard()),
            sink: FailureSink::Panic,
        }
    }

    pub(crate) fn collecting(
        collector: Rc<RefCell<ErrorCollector>>,
        representation: Rc<dyn Representation>,
    ) -> Self {
        Self {
            info: AssertionInfo::new(representation),
            sink: FailureSink::Collect(collector),
        }
    }

    /// State for a derived assertion: same sink, same description and
    /// representation, no pending fail-message override.
    pub(crate) fn child(&self) -> Self {
        Self {
            info: self.info.child(),
            sink: self.sink.clone(),
        }
    }

    /// Settle one predicate evaluation.
    ///
    /// `outcome` is `None` on success, or the default failure message. The
    /// pending override is consumed either way, so it applies to exactly one
    /// predicate.
    pub(crate) fn settle(&mut self, outcome: Option<String>) {
        let overriding = self.info.take_fail_override();
        if let Some(default) = outcome {
            let message = overriding.unwrap_or_else(|| self.info.decorate(default));
            self.sink.report(CapturedFailure::new(message));
        }
    }

    pub(crate) fn represent(&self, value: &dyn fmt::Debug) -> String {
        self.info.represent(value)
    }
}

impl fmt::Debug for AssertionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.sink {
            FailureSink::Panic => "eager",
            FailureSink::Collect(_) => "collecting",
        };
        f.debug_struct("AssertionState")
            .field("mode", &mode)
            .field("info", &self.info)
            .finish()
    }
}

/// A soft-assertion session.
///
/// Assertions created through a session collect their failures instead of
/// panicking; the chain keeps running as if every call had succeeded. Call
/// [`assert_all`](SoftAssertions::assert_all) at the end to raise one
/// aggregate failure listing everything that went wrong.
///
/// Sessions are single-threaded by construction (the collector is shared via
/// `Rc`), which matches their intended use: one session per test.
///
/// # Example
///
/// ```rust,should_panic
/// use affirm::SoftAssertions;
///
/// let soft = SoftAssertions::new();
/// soft.assert_that(&2).is_equal_to(&1);
/// soft.assert_that("abc").starts_with("x");
/// soft.assert_all(); // panics: "The following 2 assertions failed: ..."
/// ```
pub struct SoftAssertions {
    collector: Rc<RefCell<ErrorCollector>>,
    representation: Rc<dyn Representation>,
}

impl SoftAssertions {
    /// Start a new session with an empty collector.
    pub fn new() -> Self {
        Self {
            collector: Rc::new(RefCell::new(ErrorCollector::new())),
            representation: representation::standard(),
        }
    }

    /// Use a custom value representation for every assertion in the session.
    pub fn with_representation(mut self, representation: Rc<dyn Representation>) -> Self {
        self.representation = representation;
        self
    }

    /// Create a collecting assertion for a value.
    ///
    /// Same chain surface as the eager [`assert_that`](crate::assert_that);
    /// only the failure handling differs.
    pub fn assert_that<'a, T: ?Sized>(&self, actual: &'a T) -> Assert<&'a T> {
        Assert::with_state(actual, self.state())
    }

    /// Create a collecting type-erased assertion, for instance-of dispatch.
    pub fn assert_that_any<'a, T: Any>(&self, actual: &'a T) -> AnyAssert<'a> {
        AnyAssert::with_state(actual, self.state())
    }

    /// Re-route an existing assertion into this session's collector.
    ///
    /// The assertion keeps its actual value, description, and
    /// representation; only the failure handling changes. Works for any
    /// assertion type, including ones produced by navigation or narrowing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use affirm::{assert_that, SoftAssertions};
    ///
    /// let soft = SoftAssertions::new();
    /// let eager = assert_that(&2).described_as("count");
    /// soft.wrap(eager).is_equal_to(&1); // collected, not raised
    /// assert_eq!(soft.failure_count(), 1);
    /// ```
    pub fn wrap<T>(&self, assertion: Assert<T>) -> Assert<T> {
        assertion.with_sink(FailureSink::Collect(Rc::clone(&self.collector)))
    }

    /// Whether any assertion in the session has failed so far.
    pub fn has_failures(&self) -> bool {
        self.collector.borrow().has_failures()
    }

    /// Number of failures collected so far.
    pub fn failure_count(&self) -> usize {
        self.collector.borrow().failure_count()
    }

    /// The collected failure messages, in call order.
    pub fn failure_messages(&self) -> Vec<String> {
        self.collector
            .borrow()
            .failures()
            .iter()
            .map(|failure| failure.message().to_string())
            .collect()
    }

    /// Verify the session: no-op if nothing failed, otherwise panic with the
    /// aggregate failure enumerating every collected message in call order.
    ///
    /// This is the only failure a soft session ever raises for predicates.
    pub fn assert_all(&self) {
        let aggregate = self.collector.borrow().aggregate_message();
        if let Some(message) = aggregate {
            panic!("{message}");
        }
    }

    fn state(&self) -> AssertionState {
        AssertionState::collecting(
            Rc::clone(&self.collector),
            Rc::clone(&self.representation),
        )
    }
}

impl Default for SoftAssertions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SoftAssertions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftAssertions")
            .field("failure_count", &self.failure_count())
            .finish_non_exhaustive()
    }
}

/// Run a closure against a fresh session, then verify it.
///
/// # Example
///
/// ```rust
/// use affirm::assert_softly;
///
/// assert_softly(|soft| {
///     soft.assert_that(&1).is_equal_to(&1);
///     soft.assert_that("abc").starts_with("a");
/// });
/// ```
pub fn assert_softly(f: impl FnOnce(&SoftAssertions)) {
    let soft = SoftAssertions::new();
    f(&soft);
    soft.assert_all();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_path_is_a_noop() {
        let soft = SoftAssertions::new();
        soft.assert_that(&1).is_equal_to(&1);
        soft.assert_that("abc").starts_with("a");
        assert!(!soft.has_failures());
        soft.assert_all();
    }

    #[test]
    fn test_failures_are_collected_not_raised() {
        let soft = SoftAssertions::new();
        soft.assert_that(&2).is_equal_to(&1);
        soft.assert_that("abc").starts_with("x");

        assert_eq!(soft.failure_count(), 2);
        let messages = soft.failure_messages();
        assert!(messages[0].contains("to equal 1"));
        assert!(messages[1].contains("to start with \"x\""));
    }

    #[test]
    fn test_chain_continues_after_failure() {
        let soft = SoftAssertions::new();
        soft.assert_that("frank")
            .starts_with("x")
            .ends_with("k")
            .contains("zzz");

        // First and third predicates fail, second still ran against the
        // original actual and passed.
        assert_eq!(soft.failure_count(), 2);
    }

    #[test]
    #[should_panic(expected = "The following 2 assertions failed:")]
    fn test_assert_all_raises_aggregate() {
        let soft = SoftAssertions::new();
        soft.assert_that(&2).is_equal_to(&1);
        soft.assert_that("abc").starts_with("x");
        soft.assert_all();
    }

    #[test]
    #[should_panic(expected = "The following assertion failed:")]
    fn test_single_failure_uses_singular_header() {
        let soft = SoftAssertions::new();
        soft.assert_that("abc").starts_with("x");
        soft.assert_all();
    }

    #[test]
    fn test_wrap_reroutes_an_eager_assertion() {
        let soft = SoftAssertions::new();
        let eager = crate::fluent::assert_that(&2).described_as("count");
        soft.wrap(eager).is_equal_to(&1);

        assert_eq!(
            soft.failure_messages(),
            vec!["[count] expected 2 to equal 1"]
        );
    }

    #[test]
    fn test_assert_softly_success() {
        assert_softly(|soft| {
            soft.assert_that(&1).is_equal_to(&1);
        });
    }

    #[test]
    #[should_panic(expected = "The following assertion failed:")]
    fn test_assert_softly_verifies_at_the_end() {
        assert_softly(|soft| {
            soft.assert_that(&2).is_equal_to(&1);
        });
    }
}
