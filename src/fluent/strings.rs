//! String predicates and navigation.

use glob::Pattern;

use super::base::Assert;
use super::matchers::value_matches;
use crate::error::ContractViolation;

impl<'a> Assert<&'a str> {
    /// Assert the string is empty.
    pub fn is_empty(self) -> Self {
        let outcome = if self.actual().is_empty() {
            None
        } else {
            Some(format!("expected {} to be empty", self.rep(self.actual())))
        };
        self.verify(outcome)
    }

    /// Assert the string is not empty.
    pub fn is_not_empty(self) -> Self {
        let outcome = if self.actual().is_empty() {
            Some("expected a non-empty string".to_string())
        } else {
            None
        };
        self.verify(outcome)
    }

    /// Assert the string's byte length equals `expected`.
    pub fn has_length(self, expected: usize) -> Self {
        let length = self.actual().len();
        let outcome = if length == expected {
            None
        } else {
            Some(format!(
                "expected {} to have length {}, got {}",
                self.rep(self.actual()),
                expected,
                length
            ))
        };
        self.verify(outcome)
    }

    /// Assert the string contains `part`.
    pub fn contains(self, part: &str) -> Self {
        let outcome = if self.actual().contains(part) {
            None
        } else {
            Some(format!(
                "expected {} to contain {}",
                self.rep(self.actual()),
                self.rep(&part)
            ))
        };
        self.verify(outcome)
    }

    /// Assert the string does not contain `part`.
    pub fn does_not_contain(self, part: &str) -> Self {
        let outcome = if self.actual().contains(part) {
            Some(format!(
                "expected {} not to contain {}",
                self.rep(self.actual()),
                self.rep(&part)
            ))
        } else {
            None
        };
        self.verify(outcome)
    }

    /// Assert the string starts with `prefix`.
    pub fn starts_with(self, prefix: &str) -> Self {
        let outcome = if self.actual().starts_with(prefix) {
            None
        } else {
            Some(format!(
                "expected {} to start with {}",
                self.rep(self.actual()),
                self.rep(&prefix)
            ))
        };
        self.verify(outcome)
    }

    /// Assert the string ends with `suffix`.
    pub fn ends_with(self, suffix: &str) -> Self {
        let outcome = if self.actual().ends_with(suffix) {
            None
        } else {
            Some(format!(
                "expected {} to end with {}",
                self.rep(self.actual()),
                self.rep(&suffix)
            ))
        };
        self.verify(outcome)
    }

    /// Assert the string matches a regex.
    ///
    /// An invalid regex is API misuse, not a value mismatch: it raises
    /// immediately even inside a soft session.
    #[cfg(feature = "regex")]
    pub fn matches(self, pattern: &str) -> Self {
        let re = compile_regex(pattern);
        let outcome = if re.is_match(self.actual()) {
            None
        } else {
            Some(format!(
                "expected {} to match pattern {}",
                self.rep(self.actual()),
                self.rep(&pattern)
            ))
        };
        self.verify(outcome)
    }

    /// Assert the string does not match a regex.
    #[cfg(feature = "regex")]
    pub fn does_not_match(self, pattern: &str) -> Self {
        let re = compile_regex(pattern);
        let outcome = if re.is_match(self.actual()) {
            Some(format!(
                "expected {} not to match pattern {}",
                self.rep(self.actual()),
                self.rep(&pattern)
            ))
        } else {
            None
        };
        self.verify(outcome)
    }

    /// Assert the string matches a glob pattern, e.g. `*.txt`.
    ///
    /// An invalid glob raises immediately even inside a soft session.
    pub fn matches_glob(self, pattern: &str) -> Self {
        let glob = match Pattern::new(pattern) {
            Ok(glob) => glob,
            Err(error) => ContractViolation::InvalidPattern {
                pattern: pattern.to_string(),
                reason: error.to_string(),
            }
            .raise(),
        };
        let outcome = if glob.matches(self.actual()) {
            None
        } else {
            Some(format!(
                "expected {} to match glob {}",
                self.rep(self.actual()),
                self.rep(&pattern)
            ))
        };
        self.verify(outcome)
    }

    /// Assert the string matches a pattern using the lenient tri-mode rules
    /// of [`value_matches`]: glob first, then regex, then exact.
    pub fn matches_value(self, pattern: &str) -> Self {
        let outcome = if value_matches(pattern, self.actual()) {
            None
        } else {
            Some(format!(
                "expected {} to match {}",
                self.rep(self.actual()),
                self.rep(&pattern)
            ))
        };
        self.verify(outcome)
    }

    /// Navigate to an assertion over the string's byte length.
    ///
    /// The derived assertion shares this chain's failure sink, so it stays
    /// soft inside a soft session.
    ///
    /// # Example
    ///
    /// ```rust
    /// use affirm::assert_that;
    ///
    /// assert_that("hello").length().is_between(1, 10);
    /// ```
    pub fn length(self) -> Assert<usize> {
        let length = self.actual().len();
        self.navigate(length)
    }

    /// Navigate to an assertion over the trimmed string.
    pub fn trimmed(self) -> Assert<&'a str> {
        let trimmed: &'a str = (*self.actual()).trim();
        self.navigate(trimmed)
    }
}

impl<'a> Assert<&'a String> {
    /// Bridge to the `&str` predicate surface.
    pub fn as_str(self) -> Assert<&'a str> {
        let (actual, state) = self.into_parts();
        Assert::with_state(actual.as_str(), state)
    }
}

#[cfg(feature = "regex")]
fn compile_regex(pattern: &str) -> regex::Regex {
    match regex::Regex::new(pattern) {
        Ok(re) => re,
        Err(error) => ContractViolation::InvalidPattern {
            pattern: pattern.to_string(),
            reason: error.to_string(),
        }
        .raise(),
    }
}
