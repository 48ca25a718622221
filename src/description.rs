//! Per-assertion metadata: description, fail-message override, representation.
//!
//! `AssertionInfo` travels with every assertion object. It is owned
//! exclusively by one assertion at a time, so attaching a description or an
//! override mutates the moved value and hands it back through the chain.

use std::fmt;
use std::rc::Rc;

use crate::representation::Representation;

/// A description attached to an assertion with `described_as`.
///
/// Descriptions can be lazy: the closure variant is rendered only if a
/// failure message is actually built, so an expensive description costs
/// nothing on the success path.
#[derive(Clone)]
pub enum Description {
    /// Fixed text.
    Text(String),
    /// Rendered on demand, only when a failure needs it.
    Lazy(Rc<dyn Fn() -> String>),
}

impl Description {
    /// Render the description to text.
    pub fn render(&self) -> String {
        match self {
            Description::Text(text) => text.clone(),
            Description::Lazy(render) => render(),
        }
    }
}

impl fmt::Debug for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Description::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Description::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

/// Metadata carried by one assertion object.
///
/// Holds the optional description, the one-shot fail-message override, and
/// the value representation. Navigation into a derived assertion copies the
/// description and representation but never the override.
#[derive(Clone)]
pub struct AssertionInfo {
    description: Option<Description>,
    fail_message_override: Option<String>,
    representation: Rc<dyn Representation>,
}

impl AssertionInfo {
    pub(crate) fn new(representation: Rc<dyn Representation>) -> Self {
        Self {
            description: None,
            fail_message_override: None,
            representation,
        }
    }

    /// The currently attached description, if any.
    pub fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    pub(crate) fn set_description(&mut self, description: Description) {
        self.description = Some(description);
    }

    pub(crate) fn set_fail_override(&mut self, message: String) {
        self.fail_message_override = Some(message);
    }

    /// Take the pending override. Called once per predicate evaluation, so
    /// an override applies to the next predicate only, pass or fail.
    pub(crate) fn take_fail_override(&mut self) -> Option<String> {
        self.fail_message_override.take()
    }

    pub(crate) fn set_representation(&mut self, representation: Rc<dyn Representation>) {
        self.representation = representation;
    }

    /// Render a value with the attached representation.
    pub fn represent(&self, value: &dyn fmt::Debug) -> String {
        self.representation.render(value)
    }

    /// Prefix a default failure message with the description, if present.
    pub(crate) fn decorate(&self, message: String) -> String {
        match &self.description {
            Some(description) => format!("[{}] {}", description.render(), message),
            None => message,
        }
    }

    /// Info for a derived assertion: same description and representation,
    /// no override.
    pub(crate) fn child(&self) -> Self {
        Self {
            description: self.description.clone(),
            fail_message_override: None,
            representation: Rc::clone(&self.representation),
        }
    }
}

impl fmt::Debug for AssertionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssertionInfo")
            .field("description", &self.description)
            .field("fail_message_override", &self.fail_message_override)
            .finish_non_exhaustive()
    }
}
