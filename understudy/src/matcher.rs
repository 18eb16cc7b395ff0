// vim: tw=80
//! Argument matchers
//!
//! An [`ArgumentMatcher`] decides whether a single recorded argument satisfies
//! a rule.  Test code normally builds them through the typed constructors in
//! this module, [`exact`], [`any`], [`matching`], [`satisfies`], [`none`] and
//! [`any_args`], which all return a [`Matcher<T>`] bound to one parameter type.

use std::{
    fmt::{self, Display},
    marker::PhantomData,
    sync::Arc
};

use predicates::{
    prelude::{Predicate, predicate},
    reflection::{Case, PredicateReflection}
};
use predicates_tree::CaseTreeExt;

use crate::{
    value::{Value, VarArgs, expect_type},
    variadic::VariadicMatcher
};

/// A [`Predicate`] over a type-erased argument.
pub type ValuePredicate = Arc<dyn Predicate<dyn Value> + Send + Sync>;

/// Adapts a `Predicate<T>` into a `Predicate<dyn Value>`.
///
/// Evaluating it against a value that isn't a `T` panics.
struct Typed<T, P> {
    predicate: P,
    _marker: PhantomData<fn(&T)>
}

impl<T, P> Typed<T, P>
    where T: Value, P: Predicate<T> + Send + Sync + 'static
{
    fn erase(predicate: P) -> ValuePredicate {
        Arc::new(Typed{predicate, _marker: PhantomData})
    }
}

impl<T, P: Display> Display for Typed<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.predicate.fmt(f)
    }
}

impl<T, P: PredicateReflection> PredicateReflection for Typed<T, P> {}

impl<T, P> Predicate<dyn Value> for Typed<T, P>
    where T: Value, P: Predicate<T>
{
    fn eval(&self, variable: &dyn Value) -> bool {
        self.predicate.eval(expect_type::<T>(variable))
    }

    fn find_case<'a>(&'a self, expected: bool, variable: &dyn Value)
        -> Option<Case<'a>>
    {
        self.predicate.find_case(expected, expect_type::<T>(variable))
    }
}

/// A rule for one argument of a method call.
///
/// The discriminant matters: a [`VariadicMatcher`] holding exactly one `None`
/// or `AnyArgs` treats it as a rule for the whole tail rather than for a
/// single element.
#[derive(Clone)]
pub enum ArgumentMatcher {
    /// Matches arguments equal to a configured value.
    Exact(ValuePredicate),
    /// Matches every argument of the parameter's type.
    Any(ValuePredicate),
    /// Matches arguments accepted by a custom predicate.
    Predicate(ValuePredicate),
    /// Matches an empty variadic tail.
    None,
    /// Matches any variadic tail, including an empty one.
    AnyArgs,
    /// Matches a whole variadic tail, element by element.
    Variadic(VariadicMatcher),
}

impl ArgumentMatcher {
    /// Does `candidate` satisfy this matcher?
    pub fn is_match(&self, candidate: &dyn Value) -> bool {
        match self {
            ArgumentMatcher::Exact(p)
                | ArgumentMatcher::Any(p)
                | ArgumentMatcher::Predicate(p) => p.eval(candidate),
            ArgumentMatcher::None => candidate.downcast_ref::<VarArgs>()
                .map_or(false, VarArgs::is_empty),
            ArgumentMatcher::AnyArgs => true,
            ArgumentMatcher::Variadic(v) => v.is_match(candidate)
        }
    }

    /// Describe why `candidate` doesn't satisfy this matcher.
    ///
    /// Returns `None` if it does.
    pub fn explain(&self, candidate: &dyn Value) -> Option<String> {
        match self {
            ArgumentMatcher::Exact(p)
                | ArgumentMatcher::Any(p)
                | ArgumentMatcher::Predicate(p) =>
            {
                p.find_case(false, candidate)
                    .map(|case| case.tree().to_string())
            },
            _ if self.is_match(candidate) => None,
            _ => Some(format!("expected {}, got {:?}", self, candidate))
        }
    }
}

impl Display for ArgumentMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentMatcher::Exact(p) | ArgumentMatcher::Predicate(p) =>
                p.fmt(f),
            ArgumentMatcher::Any(_) => f.write_str("any"),
            ArgumentMatcher::None => f.write_str("<no arguments>"),
            ArgumentMatcher::AnyArgs => f.write_str("<any arguments>"),
            ArgumentMatcher::Variadic(v) => v.fmt(f)
        }
    }
}

impl fmt::Debug for ArgumentMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArgumentMatcher({})", self)
    }
}

/// An [`ArgumentMatcher`] for a parameter of type `T`.
///
/// This is what matcher-builder functions accept in place of a plain value.
pub struct Matcher<T> {
    matcher: ArgumentMatcher,
    _marker: PhantomData<fn(&T)>
}

impl<T> Matcher<T> {
    fn new(matcher: ArgumentMatcher) -> Self {
        Matcher{matcher, _marker: PhantomData}
    }

    pub fn is_match(&self, candidate: &T) -> bool
        where T: Value
    {
        self.matcher.is_match(candidate)
    }

    /// Discard the parameter type.
    pub fn erase(self) -> ArgumentMatcher {
        self.matcher
    }
}

impl<T> Clone for Matcher<T> {
    fn clone(&self) -> Self {
        Matcher::new(self.matcher.clone())
    }
}

impl<T> Display for Matcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.matcher.fmt(f)
    }
}

impl<T> fmt::Debug for Matcher<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matcher<{}>({})", std::any::type_name::<T>(), self.matcher)
    }
}

impl<T> From<Matcher<T>> for ArgumentMatcher {
    fn from(m: Matcher<T>) -> Self {
        m.matcher
    }
}

/// Match arguments that are structurally equal to `expected`.
///
/// Equality is `PartialEq`, so composite arguments (structs, maps, vectors,
/// `Option<Box<T>>`) compare by value, never by address.
///
/// # Examples
/// ```
/// # use understudy::*;
/// let m = exact(vec![1, 2, 3]);
/// assert!(m.is_match(&vec![1, 2, 3]));
/// assert!(!m.is_match(&vec![3, 2, 1]));
/// ```
pub fn exact<T: Value + PartialEq>(expected: T) -> Matcher<T> {
    let p = Typed::<T, _>::erase(predicate::eq(expected));
    Matcher::new(ArgumentMatcher::Exact(p))
}

/// Match every argument of type `T`.
pub fn any<T: Value>() -> Matcher<T> {
    let p = Typed::<T, _>::erase(predicate::always());
    Matcher::new(ArgumentMatcher::Any(p))
}

/// Match arguments for which `f` returns `true`.
///
/// # Examples
/// ```
/// # use understudy::*;
/// let even = matching(|x: &u32| x % 2 == 0);
/// assert!(even.is_match(&4));
/// assert!(!even.is_match(&5));
/// ```
pub fn matching<T, F>(f: F) -> Matcher<T>
    where T: Value, F: Fn(&T) -> bool + Send + Sync + 'static
{
    let p = Typed::<T, _>::erase(predicate::function(f));
    Matcher::new(ArgumentMatcher::Predicate(p))
}

/// Match arguments accepted by an arbitrary [`Predicate`].
///
/// # Examples
/// ```
/// # use understudy::*;
/// let small: Matcher<u8> = satisfies(predicate::lt(10));
/// assert!(small.is_match(&3));
/// assert!(!small.is_match(&30));
/// ```
pub fn satisfies<T, P>(predicate: P) -> Matcher<T>
    where T: Value, P: Predicate<T> + Send + Sync + 'static
{
    Matcher::new(ArgumentMatcher::Predicate(Typed::<T, _>::erase(predicate)))
}

/// Match a variadic tail with no arguments in it.
///
/// Only meaningful as the sole element of a variadic matcher list.
pub fn none<T>() -> Matcher<T> {
    Matcher::new(ArgumentMatcher::None)
}

/// Match any variadic tail, including an empty one.
///
/// Only meaningful as the sole element of a variadic matcher list.
pub fn any_args<T>() -> Matcher<T> {
    Matcher::new(ArgumentMatcher::AnyArgs)
}

/// Conversion into a [`Matcher<T>`].
///
/// Matcher-builder functions take `impl IntoMatcher<T>` so that callers may
/// pass either a plain value, which becomes an [`exact`] matcher, or any
/// `Matcher<T>`, which is used as-is.
pub trait IntoMatcher<T> {
    fn into_matcher(self) -> Matcher<T>;
}

impl<T> IntoMatcher<T> for Matcher<T> {
    fn into_matcher(self) -> Matcher<T> {
        self
    }
}

impl<T: Value + PartialEq> IntoMatcher<T> for T {
    fn into_matcher(self) -> Matcher<T> {
        exact(self)
    }
}

impl IntoMatcher<String> for &str {
    fn into_matcher(self) -> Matcher<String> {
        exact(self.to_owned())
    }
}
