//! # affirm
//!
//! A fluent assertion library with soft assertion collection.
//!
//! `assert_that(value)` returns a chainable assertion object whose predicate
//! methods either succeed silently or panic with a descriptive failure. The
//! same chains run through a [`SoftAssertions`] session collect their
//! failures instead of raising them, keep running as if every call had
//! succeeded, and surface everything together in one aggregate failure at
//! the end.
//!
//! ## Quick start
//!
//! ```rust
//! use affirm::assert_that;
//!
//! #[derive(Debug, PartialEq)]
//! struct User(&'static str);
//!
//! assert_that("hello world").starts_with("hello").has_length(11);
//! assert_that(&[1, 2, 3][..]).contains(&2).has_size(3);
//! assert_that(&User("ada")).is_equal_to(&User("ada"));
//! ```
//!
//! ## Soft assertions
//!
//! ```rust,should_panic
//! use affirm::SoftAssertions;
//!
//! let soft = SoftAssertions::new();
//! soft.assert_that(&2).is_equal_to(&1);          // collected, not raised
//! soft.assert_that(&[1, 2][..]).has_size(3);     // collected, not raised
//! soft.assert_all();
//! // panics with:
//! //   The following 2 assertions failed:
//! //   1) expected 2 to equal 1
//! //   2) expected [1, 2] to have size 3, got 2
//! ```
//!
//! ## Type narrowing
//!
//! ```rust
//! use affirm::{assert_that_any, factory};
//!
//! let value = "hello".to_string();
//! assert_that_any(&value)
//!     .as_instance_of(&factory::string())
//!     .starts_with("he");
//! ```
//!
//! Predicate failures are the only thing a soft session collects. API misuse
//! (narrowing to the wrong type, navigating into an absent value, malformed
//! patterns) is a [`ContractViolation`] and raises immediately in both
//! modes, because the chain cannot meaningfully continue.

pub mod collector;
pub mod description;
pub mod error;
pub mod factory;
pub mod fluent;
pub mod representation;
pub mod soft;

// Core entry points
pub use fluent::{assert_that, Assert};
pub use soft::{assert_softly, AssertionState, SoftAssertions};

// Collector surface
pub use collector::{CapturedFailure, ErrorCollector};

// Type narrowing
pub use factory::{
    assert_that_any, AnyAssert, AssertFactory, ChainedAssert, FactoryRegistry, TypeDescriptor,
};

// Metadata and rendering
pub use description::{AssertionInfo, Description};
pub use error::ContractViolation;
pub use representation::{Representation, StandardRepresentation};

// Matching utilities
pub use fluent::value_matches;
