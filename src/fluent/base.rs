//! The core assertion object and its type-independent predicates.
//!
//! `Assert<T>` wraps one actual value (`T` is usually a reference) together
//! with its metadata and failure sink. Predicate methods consume and return
//! `self`, so chains read left to right; in a soft session a failing
//! predicate records and hands the same object back, and the rest of the
//! chain still runs against the original actual.

use std::fmt;
use std::rc::Rc;

use crate::description::Description;
use crate::representation::Representation;
use crate::soft::AssertionState;

/// Create an eager assertion for a value.
///
/// Eager assertions panic at the first failing predicate, like `assert!`.
/// For collected failures, create the assertion through
/// [`SoftAssertions::assert_that`](crate::SoftAssertions::assert_that)
/// instead; the chain surface is identical.
///
/// # Example
///
/// ```rust
/// use affirm::assert_that;
///
/// assert_that(&4).is_equal_to(&4).is_greater_than(&3);
/// assert_that("hello").starts_with("he").ends_with("lo");
/// ```
pub fn assert_that<T: ?Sized>(actual: &T) -> Assert<&T> {
    Assert::with_state(actual, AssertionState::eager())
}

/// A chainable assertion over one actual value.
///
/// Capability surfaces are `impl` blocks per value category: equality and
/// ordering here, strings in [`strings`](super::strings), slices, maps and
/// options in [`collections`](super::collections).
#[derive(Debug)]
pub struct Assert<T> {
    actual: T,
    state: AssertionState,
}

impl<T> Assert<T> {
    /// Build an assertion from a value and a state handed down by the
    /// engine. This is the extension point for custom
    /// [`AssertFactory`](crate::factory::AssertFactory) implementations;
    /// everyday callers use [`assert_that`] or a soft session.
    pub fn with_state(actual: T, state: AssertionState) -> Self {
        Self { actual, state }
    }

    /// The wrapped actual value.
    pub fn actual(&self) -> &T {
        &self.actual
    }

    /// Attach a description. Failure messages get a `[description] ` prefix.
    ///
    /// # Example
    ///
    /// ```rust,should_panic
    /// use affirm::assert_that;
    ///
    /// // panics with "[retry count] expected 2 to equal 3"
    /// assert_that(&2).described_as("retry count").is_equal_to(&3);
    /// ```
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.state
            .info
            .set_description(Description::Text(description.into()));
        self
    }

    /// Attach a lazily-rendered description. The closure runs only if a
    /// failure message is actually built.
    pub fn described_as_with(mut self, render: impl Fn() -> String + 'static) -> Self {
        self.state
            .info
            .set_description(Description::Lazy(Rc::new(render)));
        self
    }

    /// Replace the failure text of the next predicate only.
    ///
    /// The override is consumed by the next predicate whether it passes or
    /// fails; predicates after that render their default messages again.
    pub fn with_fail_message(mut self, message: impl Into<String>) -> Self {
        self.state.info.set_fail_override(message.into());
        self
    }

    /// Use a custom value representation for this chain.
    pub fn with_representation(mut self, representation: Rc<dyn Representation>) -> Self {
        self.state.info.set_representation(representation);
        self
    }

    /// Settle a predicate outcome: `None` passes, `Some(message)` fails
    /// through the sink (panic or collect). Public so custom assertion
    /// methods outside this crate go through the same interception point.
    pub fn verify(mut self, outcome: Option<String>) -> Self {
        self.state.settle(outcome);
        self
    }

    /// Navigate to a derived assertion over another value, keeping the same
    /// sink so the new chain node stays intercepted.
    pub(crate) fn navigate<U>(self, actual: U) -> Assert<U> {
        Assert {
            actual,
            state: self.state.child(),
        }
    }

    pub(crate) fn into_parts(self) -> (T, AssertionState) {
        (self.actual, self.state)
    }

    pub(crate) fn with_sink(mut self, sink: crate::soft::FailureSink) -> Self {
        self.state.sink = sink;
        self
    }

    pub(crate) fn rep(&self, value: &dyn fmt::Debug) -> String {
        self.state.represent(value)
    }
}

impl<T: fmt::Debug> Assert<T> {
    /// Assert the actual value equals `expected`.
    pub fn is_equal_to<E: fmt::Debug>(self, expected: E) -> Self
    where
        T: PartialEq<E>,
    {
        let outcome = if self.actual == expected {
            None
        } else {
            Some(format!(
                "expected {} to equal {}",
                self.rep(&self.actual),
                self.rep(&expected)
            ))
        };
        self.verify(outcome)
    }

    /// Assert the actual value differs from `other`.
    pub fn is_not_equal_to<E: fmt::Debug>(self, other: E) -> Self
    where
        T: PartialEq<E>,
    {
        let outcome = if self.actual != other {
            None
        } else {
            Some(format!(
                "expected {} to differ from {}",
                self.rep(&self.actual),
                self.rep(&other)
            ))
        };
        self.verify(outcome)
    }

    /// Assert the actual value satisfies an arbitrary predicate.
    ///
    /// `description` names the expected condition in the failure message.
    ///
    /// # Example
    ///
    /// ```rust
    /// use affirm::assert_that;
    ///
    /// assert_that(&10).satisfies("an even number", |n| *n % 2 == 0);
    /// ```
    pub fn satisfies(self, description: &str, predicate: impl FnOnce(&T) -> bool) -> Self {
        let outcome = if predicate(&self.actual) {
            None
        } else {
            Some(format!(
                "expected {} to satisfy: {}",
                self.rep(&self.actual),
                description
            ))
        };
        self.verify(outcome)
    }
}

impl<T: fmt::Debug + PartialOrd> Assert<T> {
    /// Assert the actual value is strictly less than `bound`.
    pub fn is_less_than(self, bound: T) -> Self {
        let outcome = if self.actual < bound {
            None
        } else {
            Some(format!(
                "expected {} to be less than {}",
                self.rep(&self.actual),
                self.rep(&bound)
            ))
        };
        self.verify(outcome)
    }

    /// Assert the actual value is less than or equal to `bound`.
    pub fn is_at_most(self, bound: T) -> Self {
        let outcome = if self.actual <= bound {
            None
        } else {
            Some(format!(
                "expected {} to be at most {}",
                self.rep(&self.actual),
                self.rep(&bound)
            ))
        };
        self.verify(outcome)
    }

    /// Assert the actual value is strictly greater than `bound`.
    pub fn is_greater_than(self, bound: T) -> Self {
        let outcome = if self.actual > bound {
            None
        } else {
            Some(format!(
                "expected {} to be greater than {}",
                self.rep(&self.actual),
                self.rep(&bound)
            ))
        };
        self.verify(outcome)
    }

    /// Assert the actual value is greater than or equal to `bound`.
    pub fn is_at_least(self, bound: T) -> Self {
        let outcome = if self.actual >= bound {
            None
        } else {
            Some(format!(
                "expected {} to be at least {}",
                self.rep(&self.actual),
                self.rep(&bound)
            ))
        };
        self.verify(outcome)
    }

    /// Assert the actual value lies in the inclusive range `[low, high]`.
    pub fn is_between(self, low: T, high: T) -> Self {
        let outcome = if self.actual >= low && self.actual <= high {
            None
        } else {
            Some(format!(
                "expected {} to be between {} and {}",
                self.rep(&self.actual),
                self.rep(&low),
                self.rep(&high)
            ))
        };
        self.verify(outcome)
    }
}
