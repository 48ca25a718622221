//! Fluent assertion API.
//!
//! This module provides the chainable assertion types. The entry point is
//! [`assert_that`], which evaluates eagerly (panics on the first failure);
//! the same chains created through a
//! [`SoftAssertions`](crate::SoftAssertions) session collect failures
//! instead.
//!
//! # Example
//!
//! ```rust
//! use affirm::assert_that;
//!
//! assert_that("hello world")
//!     .described_as("greeting")
//!     .starts_with("hello")
//!     .contains("world");
//!
//! assert_that(&[1, 2, 3][..]).has_size(3).contains(&2);
//! ```

mod base;
mod collections;
mod matchers;
mod strings;

pub use base::{assert_that, Assert};
pub use matchers::value_matches;

#[cfg(test)]
mod tests;
