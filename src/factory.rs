//! Instance-of factory dispatch: type narrowing and the factory registry.
//!
//! Two surfaces produce a correctly-typed assertion from a type-erased
//! value:
//!
//! - the typed path: [`assert_that_any`] plus an [`AssertFactory`], checked
//!   by downcast at the call site, with the full static predicate surface of
//!   the produced assertion;
//! - the dynamic path: a [`FactoryRegistry`] value mapping runtime types to
//!   erased constructors, for callers that pick the target type at runtime.
//!   The registry is passed down explicitly, never global: start from
//!   [`FactoryRegistry::builtin`] and extend it by composition.
//!
//! Both keep the caller's failure sink, so dispatch inside a soft session
//! stays intercepted.

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use crate::description::Description;
use crate::error::ContractViolation;
use crate::fluent::Assert;
use crate::soft::AssertionState;

/// Runtime identity of a target type: its `TypeId` plus its name for
/// diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
}

impl TypeDescriptor {
    /// The descriptor for `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The described type's `TypeId`.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The described type's name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Builds the correctly-typed assertion for a value already known to be an
/// instance of `Target`.
///
/// Implement this to plug custom assertion types into
/// [`AnyAssert::as_instance_of`]: forward the state into
/// [`Assert::with_state`] (or a type wrapping it) and the factory output is
/// intercepted by soft sessions like every built-in.
pub trait AssertFactory {
    /// The runtime type this factory narrows to.
    type Target: Any;
    /// The assertion type produced, borrowing the narrowed value.
    type Output<'a>;

    /// Name of the target type, for `WrongInstanceType` diagnostics.
    fn type_name(&self) -> &'static str {
        type_name::<Self::Target>()
    }

    /// Build the assertion. The engine has already verified `actual` is an
    /// instance of `Target`.
    fn create<'a>(&self, actual: &'a Self::Target, state: AssertionState) -> Self::Output<'a>;
}

/// Factory narrowing to `String`, producing a string assertion.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringFactory;

impl AssertFactory for StringFactory {
    type Target = String;
    type Output<'a> = Assert<&'a str>;

    fn create<'a>(&self, actual: &'a String, state: AssertionState) -> Assert<&'a str> {
        Assert::with_state(actual.as_str(), state)
    }
}

/// Factory narrowing to any plain value type `T`.
#[derive(Debug, Clone, Copy)]
pub struct ValueFactory<T>(PhantomData<T>);

impl<T> Default for ValueFactory<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T: Any> AssertFactory for ValueFactory<T> {
    type Target = T;
    type Output<'a> = Assert<&'a T>;

    fn create<'a>(&self, actual: &'a T, state: AssertionState) -> Assert<&'a T> {
        Assert::with_state(actual, state)
    }
}

/// Factory narrowing to `Vec<E>`, producing a slice assertion.
#[derive(Debug, Clone, Copy)]
pub struct VecFactory<E: 'static>(PhantomData<E>);

impl<E> Default for VecFactory<E> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<E: Any> AssertFactory for VecFactory<E> {
    type Target = Vec<E>;
    type Output<'a> = Assert<&'a [E]>;

    fn create<'a>(&self, actual: &'a Vec<E>, state: AssertionState) -> Assert<&'a [E]> {
        Assert::with_state(actual.as_slice(), state)
    }
}

/// Factory narrowing to `Option<T>`.
#[derive(Debug, Clone, Copy)]
pub struct OptionFactory<T: 'static>(PhantomData<T>);

impl<T> Default for OptionFactory<T> {
    fn default() -> Self {
        Self(PhantomData)
    }
}

impl<T: Any> AssertFactory for OptionFactory<T> {
    type Target = Option<T>;
    type Output<'a> = Assert<&'a Option<T>>;

    fn create<'a>(&self, actual: &'a Option<T>, state: AssertionState) -> Assert<&'a Option<T>> {
        Assert::with_state(actual, state)
    }
}

/// The `String` factory.
pub fn string() -> StringFactory {
    StringFactory
}

/// A factory for any plain value type.
pub fn value_of<T: Any>() -> ValueFactory<T> {
    ValueFactory::default()
}

/// A factory for `Vec<E>`.
pub fn vec_of<E: Any>() -> VecFactory<E> {
    VecFactory::default()
}

/// A factory for `Option<T>`.
pub fn option_of<T: Any>() -> OptionFactory<T> {
    OptionFactory::default()
}

/// Create an eager type-erased assertion, the entry point for instance-of
/// narrowing.
///
/// The concrete type name is captured before erasure so a failed narrowing
/// can name both the requested and the actual type.
///
/// # Example
///
/// ```rust
/// use affirm::assert_that_any;
/// use affirm::factory;
///
/// let name = "hello".to_string();
/// assert_that_any(&name)
///     .as_instance_of(&factory::string())
///     .starts_with("he");
/// ```
pub fn assert_that_any<T: Any>(actual: &T) -> AnyAssert<'_> {
    AnyAssert::with_state(actual, AssertionState::eager())
}

/// A chainless assertion over a type-erased value; its only operations are
/// metadata attachment and narrowing to a typed assertion.
pub struct AnyAssert<'a> {
    actual: &'a dyn Any,
    type_name: &'static str,
    state: AssertionState,
}

impl<'a> AnyAssert<'a> {
    pub(crate) fn with_state<T: Any>(actual: &'a T, state: AssertionState) -> Self {
        Self {
            actual,
            type_name: type_name::<T>(),
            state,
        }
    }

    /// Name of the wrapped value's concrete type.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Attach a description, carried into the narrowed assertion.
    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.state
            .info
            .set_description(Description::Text(description.into()));
        self
    }

    /// Replace the failure text of the next predicate only.
    pub fn with_fail_message(mut self, message: impl Into<String>) -> Self {
        self.state.info.set_fail_override(message.into());
        self
    }

    /// Narrow to the factory's target type, or report why that is
    /// impossible. The success value keeps this assertion's sink and
    /// metadata.
    pub fn try_as_instance_of<F: AssertFactory>(
        self,
        factory: &F,
    ) -> Result<F::Output<'a>, ContractViolation> {
        match self.actual.downcast_ref::<F::Target>() {
            Some(narrowed) => Ok(factory.create(narrowed, self.state)),
            None => Err(ContractViolation::WrongInstanceType {
                expected: factory.type_name(),
                actual: self.type_name,
            }),
        }
    }

    /// Narrow to the factory's target type.
    ///
    /// A runtime type mismatch is API misuse, not a value mismatch: it
    /// raises immediately even inside a soft session.
    pub fn as_instance_of<F: AssertFactory>(self, factory: &F) -> F::Output<'a> {
        match self.try_as_instance_of(factory) {
            Ok(assertion) => assertion,
            Err(violation) => violation.raise(),
        }
    }

    /// Narrow through a registry, picking the target type at runtime.
    pub fn as_registered(
        self,
        registry: &FactoryRegistry,
        target: &TypeDescriptor,
    ) -> Result<Box<dyn ChainedAssert + 'a>, ContractViolation> {
        registry.dispatch(self.actual, self.type_name, target, self.state)
    }
}

impl fmt::Debug for AnyAssert<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyAssert")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// The operations a registry-produced assertion exposes.
///
/// This is the narrow interface the soft engine intercepts for dynamically
/// dispatched chains: checks record through the same sink as every typed
/// assertion, so nothing here raises predicate failures in a soft session.
pub trait ChainedAssert {
    /// Name of the narrowed target type this assertion was produced for.
    fn target_type(&self) -> &'static str;

    /// Attach a description for subsequent checks.
    fn described_as(&mut self, description: &str);

    /// Replace the failure text of the next check only.
    fn with_fail_message(&mut self, message: &str);

    /// Check equality against an erased expected value.
    ///
    /// The expected operand must be of the narrowed target type; handing in
    /// anything else is API misuse and raises immediately.
    fn check_equals(&mut self, expected: &dyn Any);

    /// Check an arbitrary predicate over the erased value. `description`
    /// names the expected condition in the failure message.
    fn check_that(&mut self, description: &str, predicate: &dyn Fn(&dyn Any) -> bool);

    /// Render the actual value with the chain's representation.
    fn rendered_actual(&self) -> String;
}

struct ErasedAssert<'a, T: Any + fmt::Debug + PartialEq> {
    actual: &'a T,
    erased: &'a dyn Any,
    type_name: &'static str,
    state: AssertionState,
}

impl<T: Any + fmt::Debug + PartialEq> ChainedAssert for ErasedAssert<'_, T> {
    fn target_type(&self) -> &'static str {
        self.type_name
    }

    fn described_as(&mut self, description: &str) {
        self.state
            .info
            .set_description(Description::Text(description.to_string()));
    }

    fn with_fail_message(&mut self, message: &str) {
        self.state.info.set_fail_override(message.to_string());
    }

    fn check_equals(&mut self, expected: &dyn Any) {
        let expected = match expected.downcast_ref::<T>() {
            Some(expected) => expected,
            None => ContractViolation::WrongInstanceType {
                expected: self.type_name,
                actual: "a value of another type",
            }
            .raise(),
        };
        let outcome = if self.actual == expected {
            None
        } else {
            Some(format!(
                "expected {} to equal {}",
                self.state.represent(&self.actual),
                self.state.represent(&expected)
            ))
        };
        self.state.settle(outcome);
    }

    fn check_that(&mut self, description: &str, predicate: &dyn Fn(&dyn Any) -> bool) {
        let outcome = if predicate(self.erased) {
            None
        } else {
            Some(format!(
                "expected {} to satisfy: {}",
                self.state.represent(&self.actual),
                description
            ))
        };
        self.state.settle(outcome);
    }

    fn rendered_actual(&self) -> String {
        self.state.represent(&self.actual)
    }
}

type ErasedCtor =
    for<'v> fn(&'v dyn Any, &'static str, AssertionState) -> Box<dyn ChainedAssert + 'v>;

fn erased_ctor<'v, T: Any + fmt::Debug + PartialEq>(
    value: &'v dyn Any,
    name: &'static str,
    state: AssertionState,
) -> Box<dyn ChainedAssert + 'v> {
    match value.downcast_ref::<T>() {
        Some(actual) => Box::new(ErasedAssert {
            actual,
            erased: value,
            type_name: name,
            state,
        }),
        // Dispatch checks the TypeId before calling the constructor.
        None => ContractViolation::WrongInstanceType {
            expected: name,
            actual: "a value of another type",
        }
        .raise(),
    }
}

#[derive(Clone, Copy)]
struct RegisteredFactory {
    name: &'static str,
    ctor: ErasedCtor,
}

/// An explicit mapping from runtime types to erased assertion constructors.
///
/// A registry is a plain value: build one with [`builtin`](Self::builtin),
/// extend it by composition with [`with_type`](Self::with_type) or
/// [`overlay`](Self::overlay), and pass it to whoever dispatches. Lookup is
/// exact-type only; no supertype matching.
///
/// # Example
///
/// ```rust
/// use affirm::{FactoryRegistry, TypeDescriptor};
///
/// #[derive(Debug, PartialEq)]
/// struct Port(u16);
///
/// let registry = FactoryRegistry::builtin().with_type::<Port>();
/// let value = Port(8080);
///
/// let mut assertion = registry
///     .assertion_for(&value, &TypeDescriptor::of::<Port>())
///     .unwrap();
/// assertion.check_equals(&Port(8080));
/// ```
#[derive(Clone, Default)]
pub struct FactoryRegistry {
    entries: HashMap<TypeId, RegisteredFactory>,
}

impl FactoryRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in scalar and `String` entries.
    pub fn builtin() -> Self {
        Self::new()
            .with_type::<bool>()
            .with_type::<char>()
            .with_type::<i32>()
            .with_type::<i64>()
            .with_type::<u32>()
            .with_type::<u64>()
            .with_type::<usize>()
            .with_type::<f64>()
            .with_type::<String>()
    }

    /// A copy of this registry with an entry for `T` added (replacing any
    /// existing entry for `T`).
    pub fn with_type<T: Any + fmt::Debug + PartialEq>(mut self) -> Self {
        self.entries.insert(
            TypeId::of::<T>(),
            RegisteredFactory {
                name: type_name::<T>(),
                ctor: erased_ctor::<T>,
            },
        );
        self
    }

    /// A copy of this registry with every entry of `other` layered on top.
    pub fn overlay(&self, other: &FactoryRegistry) -> Self {
        let mut merged = self.clone();
        merged.entries.extend(other.entries.iter().map(|(id, factory)| (*id, *factory)));
        merged
    }

    /// Whether an entry exists for the described type.
    pub fn contains(&self, target: &TypeDescriptor) -> bool {
        self.entries.contains_key(&target.id)
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Produce an eager assertion typed for `target` over `value`.
    ///
    /// Pure construction: fails with `UnregisteredType` when no entry exists
    /// for `target`, and with `WrongInstanceType` when `value` is not an
    /// instance of `target` (exact runtime type, both names reported). For a
    /// collecting assertion go through
    /// [`SoftAssertions::assert_that_any`](crate::SoftAssertions::assert_that_any)
    /// and [`AnyAssert::as_registered`].
    pub fn assertion_for<'v, T: Any>(
        &self,
        value: &'v T,
        target: &TypeDescriptor,
    ) -> Result<Box<dyn ChainedAssert + 'v>, ContractViolation> {
        self.dispatch(value, type_name::<T>(), target, AssertionState::eager())
    }

    pub(crate) fn dispatch<'v>(
        &self,
        value: &'v dyn Any,
        value_type: &'static str,
        target: &TypeDescriptor,
        state: AssertionState,
    ) -> Result<Box<dyn ChainedAssert + 'v>, ContractViolation> {
        let entry = self
            .entries
            .get(&target.id)
            .ok_or(ContractViolation::UnregisteredType(target.name))?;
        if value.type_id() != target.id {
            return Err(ContractViolation::WrongInstanceType {
                expected: target.name,
                actual: value_type,
            });
        }
        Ok((entry.ctor)(value, entry.name, state))
    }
}

impl fmt::Debug for FactoryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&'static str> =
            self.entries.values().map(|factory| factory.name).collect();
        names.sort_unstable();
        f.debug_struct("FactoryRegistry")
            .field("types", &names)
            .finish()
    }
}
