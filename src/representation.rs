//! Pluggable value-to-text rendering for failure messages.
//!
//! Every failure message embeds a rendering of the actual value (and usually
//! of the expected one). The rendering is pluggable so callers can shorten,
//! redact, or reformat values without touching any predicate.

use std::fmt;
use std::rc::Rc;

/// Renders a value for inclusion in a failure message.
///
/// Implement this to control how actual/expected values appear in failures,
/// then attach it with `Assert::with_representation` or
/// `SoftAssertions::with_representation`.
///
/// # Example
///
/// ```rust
/// use affirm::Representation;
///
/// struct Truncating;
///
/// impl Representation for Truncating {
///     fn render(&self, value: &dyn std::fmt::Debug) -> String {
///         let full = format!("{:?}", value);
///         if full.len() > 32 {
///             format!("{}...", &full[..29])
///         } else {
///             full
///         }
///     }
/// }
/// ```
pub trait Representation {
    /// Render a value as text for a failure message.
    fn render(&self, value: &dyn fmt::Debug) -> String;
}

/// Default representation: `Debug` formatting, unabridged.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRepresentation;

impl Representation for StandardRepresentation {
    fn render(&self, value: &dyn fmt::Debug) -> String {
        format!("{:?}", value)
    }
}

/// The representation used when none is supplied.
pub(crate) fn standard() -> Rc<dyn Representation> {
    Rc::new(StandardRepresentation)
}
