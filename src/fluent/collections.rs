//! Slice, map, and option predicates and navigation.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use super::base::Assert;
use crate::error::ContractViolation;

impl<'a, E: fmt::Debug> Assert<&'a [E]> {
    /// Assert the slice is empty.
    pub fn is_empty(self) -> Self {
        let outcome = if self.actual().is_empty() {
            None
        } else {
            Some(format!("expected {} to be empty", self.rep(self.actual())))
        };
        self.verify(outcome)
    }

    /// Assert the slice is not empty.
    pub fn is_not_empty(self) -> Self {
        let outcome = if self.actual().is_empty() {
            Some("expected a non-empty slice".to_string())
        } else {
            None
        };
        self.verify(outcome)
    }

    /// Assert the slice has exactly `expected` elements.
    pub fn has_size(self, expected: usize) -> Self {
        let size = self.actual().len();
        let outcome = if size == expected {
            None
        } else {
            Some(format!(
                "expected {} to have size {}, got {}",
                self.rep(self.actual()),
                expected,
                size
            ))
        };
        self.verify(outcome)
    }

    /// Assert the slice contains `expected`.
    pub fn contains(self, expected: &E) -> Self
    where
        E: PartialEq,
    {
        let outcome = if self.actual().contains(expected) {
            None
        } else {
            Some(format!(
                "expected {} to contain {}",
                self.rep(self.actual()),
                self.rep(expected)
            ))
        };
        self.verify(outcome)
    }

    /// Assert the slice does not contain `unexpected`.
    pub fn does_not_contain(self, unexpected: &E) -> Self
    where
        E: PartialEq,
    {
        let outcome = if self.actual().contains(unexpected) {
            Some(format!(
                "expected {} not to contain {}",
                self.rep(self.actual()),
                self.rep(unexpected)
            ))
        } else {
            None
        };
        self.verify(outcome)
    }

    /// Assert the slice equals `expected` element for element, in order.
    pub fn contains_exactly(self, expected: &[E]) -> Self
    where
        E: PartialEq,
    {
        let slice: &[E] = self.actual();
        let outcome = if slice == expected {
            None
        } else {
            Some(format!(
                "expected {} to contain exactly {}",
                self.rep(self.actual()),
                self.rep(&expected)
            ))
        };
        self.verify(outcome)
    }

    /// Navigate to an assertion over the element at `index`.
    ///
    /// A missing element is API misuse, not a value mismatch: the chain
    /// cannot continue over a value that does not exist, so this raises
    /// immediately even inside a soft session.
    pub fn element(self, index: usize) -> Assert<&'a E> {
        let slice: &'a [E] = *self.actual();
        match slice.get(index) {
            Some(element) => self.navigate(element),
            None => ContractViolation::IndexOutOfBounds {
                index,
                len: slice.len(),
            }
            .raise(),
        }
    }

    /// Navigate to an assertion over the slice's length.
    pub fn size(self) -> Assert<usize> {
        let size = self.actual().len();
        self.navigate(size)
    }
}

impl<'a, E: fmt::Debug> Assert<&'a Vec<E>> {
    /// Bridge to the slice predicate surface.
    pub fn as_slice(self) -> Assert<&'a [E]> {
        let (actual, state) = self.into_parts();
        Assert::with_state(actual.as_slice(), state)
    }
}

impl<'a, K, V> Assert<&'a HashMap<K, V>>
where
    K: fmt::Debug + Eq + Hash,
    V: fmt::Debug,
{
    /// Assert the map is empty.
    pub fn is_empty(self) -> Self {
        let outcome = if self.actual().is_empty() {
            None
        } else {
            Some(format!("expected {} to be empty", self.rep(self.actual())))
        };
        self.verify(outcome)
    }

    /// Assert the map has exactly `expected` entries.
    pub fn has_size(self, expected: usize) -> Self {
        let size = self.actual().len();
        let outcome = if size == expected {
            None
        } else {
            Some(format!(
                "expected {} to have size {}, got {}",
                self.rep(self.actual()),
                expected,
                size
            ))
        };
        self.verify(outcome)
    }

    /// Assert the map contains `key`.
    pub fn contains_key(self, key: &K) -> Self {
        let outcome = if self.actual().contains_key(key) {
            None
        } else {
            Some(format!(
                "expected {} to contain key {}",
                self.rep(self.actual()),
                self.rep(key)
            ))
        };
        self.verify(outcome)
    }

    /// Assert the map does not contain `key`.
    pub fn does_not_contain_key(self, key: &K) -> Self {
        let outcome = if self.actual().contains_key(key) {
            Some(format!(
                "expected {} not to contain key {}",
                self.rep(self.actual()),
                self.rep(key)
            ))
        } else {
            None
        };
        self.verify(outcome)
    }

    /// Assert the map contains the entry `key => value`.
    pub fn contains_entry(self, key: &K, value: &V) -> Self
    where
        V: PartialEq,
    {
        let outcome = match self.actual().get(key) {
            Some(found) if found == value => None,
            Some(found) => Some(format!(
                "expected key {} to map to {}, got {}",
                self.rep(key),
                self.rep(value),
                self.rep(found)
            )),
            None => Some(format!(
                "expected {} to contain key {}",
                self.rep(self.actual()),
                self.rep(key)
            )),
        };
        self.verify(outcome)
    }

    /// Navigate to an assertion over the value stored under `key`.
    ///
    /// A missing key raises immediately even inside a soft session: there is
    /// no value for the rest of the chain to run against.
    pub fn value_for(self, key: &K) -> Assert<&'a V> {
        let map: &'a HashMap<K, V> = *self.actual();
        match map.get(key) {
            Some(value) => self.navigate(value),
            None => ContractViolation::MissingValue(format!("{:?}", key)).raise(),
        }
    }
}

impl<'a, T: fmt::Debug> Assert<&'a Option<T>> {
    /// Assert a value is present.
    pub fn is_some(self) -> Self {
        let outcome = if self.actual().is_some() {
            None
        } else {
            Some("expected a present value, got None".to_string())
        };
        self.verify(outcome)
    }

    /// Assert no value is present.
    pub fn is_none(self) -> Self {
        let outcome = if self.actual().is_none() {
            None
        } else {
            Some(format!(
                "expected no value, got {}",
                self.rep(self.actual())
            ))
        };
        self.verify(outcome)
    }

    /// Navigate to an assertion over the contained value.
    ///
    /// Navigating into `None` raises immediately even inside a soft session.
    pub fn some_value(self) -> Assert<&'a T> {
        let option: &'a Option<T> = *self.actual();
        match option.as_ref() {
            Some(value) => self.navigate(value),
            None => {
                ContractViolation::MissingValue(format!("Option<{}>", std::any::type_name::<T>()))
                    .raise()
            }
        }
    }
}
