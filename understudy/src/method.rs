// vim: tw=80
//! Method matchers and the typed setup builder used by adapters

use std::{
    fmt,
    marker::PhantomData
};

use crate::{
    expectation::{Action, Expectation, Failure, Observer, Returns},
    ledger::MethodCall,
    matcher::ArgumentMatcher,
    value::Value
};

/// A call pattern: a method name, one [`ArgumentMatcher`] per parameter, and
/// an optional call count.
///
/// Without a count, a `MethodMatcher` says "a call like this".  With one, its
/// meaning depends on where it's used:
///
/// * As part of an [`Expectation`] given to
///   [`Mock::setup`](crate::Mock::setup), the count is an upper bound on how
///   many matching calls the expectation will govern.
/// * Given to [`Mock::called`](crate::Mock::called), the count is the exact
///   number of matching calls that must have been recorded.
///
/// Builder methods consume `self` and return the updated matcher, so a
/// partially built matcher can be cloned and finished in two different ways.
#[derive(Clone, Debug)]
pub struct MethodMatcher {
    method: String,
    arguments: Vec<ArgumentMatcher>,
    times: Option<usize>
}

impl MethodMatcher {
    pub fn new<S>(method: S, arguments: Vec<ArgumentMatcher>) -> Self
        where S: Into<String>
    {
        MethodMatcher{method: method.into(), arguments, times: None}
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn arguments(&self) -> &[ArgumentMatcher] {
        &self.arguments
    }

    /// The configured call count, if any.
    pub fn bound(&self) -> Option<usize> {
        self.times
    }

    /// Bound this matcher to exactly `n` calls.
    pub fn times(mut self, n: usize) -> Self {
        self.times = Some(n);
        self
    }

    /// Shortcut for [`times(1)`](#method.times).
    pub fn once(self) -> Self {
        self.times(1)
    }

    /// Shortcut for [`times(0)`](#method.times).  Mostly useful for
    /// verification.
    pub fn never(self) -> Self {
        self.times(0)
    }

    /// Does `call` fit this pattern?  The call count is not considered.
    ///
    /// # Panics
    ///
    /// If `call` names the same method but has a different number of
    /// arguments.  An adapter and its matcher-builder must always agree on a
    /// method's arity.
    pub fn accepts(&self, call: &MethodCall) -> bool {
        if self.method != call.method() {
            return false;
        }
        let args = call.args();
        if args.len() != self.arguments.len() {
            panic!("argument count mismatch in call to `{}`: \
                   expected {}, actual {}",
                   self.method, self.arguments.len(), args.len());
        }
        self.arguments.iter()
            .zip(args)
            .all(|(m, arg)| m.is_match(&**arg))
    }
}

impl fmt::Display for MethodMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.method)?;
        for (i, m) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", m)?;
        }
        f.write_str(")")
    }
}

/// Typed front end to a [`MethodMatcher`], returned by an adapter's
/// matcher-builder functions.
///
/// `I` is the tuple of the method's parameters (a variadic tail is a `Vec`)
/// and `O` is its return type.  Setting an action consumes the builder and
/// yields an [`Expectation`], so an expectation always has exactly one action.
///
/// # Examples
/// ```
/// # use understudy::*;
/// fn add<A, B>(a: A, b: B) -> MethodSetup<(i32, i32), i32>
///     where A: IntoMatcher<i32>, B: IntoMatcher<i32>
/// {
///     MethodSetup::new("add", vec![
///         a.into_matcher().erase(),
///         b.into_matcher().erase()
///     ])
/// }
///
/// let mock = Mock::new();
/// mock.setup(add(10, any()).once().returns(30));
/// let first: i32 = mock.invoke("add", args![10, 20], (10, 20));
/// let second: i32 = mock.invoke("add", args![10, 20], (10, 20));
/// assert_eq!((30, 0), (first, second));
/// ```
pub struct MethodSetup<I, O> {
    matcher: MethodMatcher,
    _marker: PhantomData<fn(I) -> O>
}

impl<I, O> MethodSetup<I, O> {
    pub fn new<S>(method: S, arguments: Vec<ArgumentMatcher>) -> Self
        where S: Into<String>
    {
        MethodSetup{
            matcher: MethodMatcher::new(method, arguments),
            _marker: PhantomData
        }
    }

    pub fn matcher(&self) -> &MethodMatcher {
        &self.matcher
    }

    /// Limit the expectation to `n` matching calls, or when verifying,
    /// require exactly `n`.
    pub fn times(self, n: usize) -> Self {
        self.map(|m| m.times(n))
    }

    /// Shortcut for [`times(1)`](#method.times).
    pub fn once(self) -> Self {
        self.times(1)
    }

    /// Shortcut for [`times(0)`](#method.times).
    pub fn never(self) -> Self {
        self.times(0)
    }

    fn map<F>(self, f: F) -> Self
        where F: FnOnce(MethodMatcher) -> MethodMatcher
    {
        MethodSetup{matcher: f(self.matcher), _marker: PhantomData}
    }
}

impl<I: 'static, O: 'static> MethodSetup<I, O> {
    /// Return a clone of `value` from every matching call.
    pub fn returns(self, value: O) -> Expectation
        where O: Value
    {
        let returns = Returns::new().value(value);
        Expectation::new(self.matcher, Action::Returns(returns))
    }

    /// Panic with `payload` from every matching call.
    pub fn panics<P>(self, payload: P) -> Expectation
        where P: Clone + fmt::Debug + Send + Sync + 'static
    {
        Expectation::new(self.matcher, Action::Panics(Failure::new(payload)))
    }

    /// Run `f` in place of the real method.  It receives the call's arguments
    /// and its result is returned to the caller.
    pub fn when<F>(self, f: F) -> Expectation
        where F: FnMut(I) -> O + Send + 'static
    {
        Expectation::new(self.matcher, Action::Observe(Observer::new(f)))
    }

    /// Single-threaded version of [`when`](#method.when), for closures that
    /// aren't `Send`.
    ///
    /// It is a runtime error to call the mocked method from a different thread
    /// than the one that configured it.
    pub fn when_st<F>(self, f: F) -> Expectation
        where F: FnMut(I) -> O + 'static
    {
        Expectation::new(self.matcher, Action::Observe(Observer::new_st(f)))
    }
}

impl<I, O> Clone for MethodSetup<I, O> {
    fn clone(&self) -> Self {
        MethodSetup{matcher: self.matcher.clone(), _marker: PhantomData}
    }
}

impl<I, O> fmt::Debug for MethodSetup<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MethodSetup").field(&self.matcher).finish()
    }
}

impl<I, O> From<MethodSetup<I, O>> for MethodMatcher {
    fn from(setup: MethodSetup<I, O>) -> Self {
        setup.matcher
    }
}
