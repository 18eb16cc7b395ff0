// vim: tw=80
//! Expectations and the actions they carry

use std::{
    any::{Any, type_name},
    fmt,
    sync::{Mutex, PoisonError},
    thread::{self, ThreadId}
};

use fragile::Fragile;

use crate::{
    method::MethodMatcher,
    value::Value
};

/// What a matching call should do instead of running the real method.
pub enum Action {
    /// Hand back these values, in declaration order.
    Returns(Returns),
    /// Panic with a stored payload.
    Panics(Failure),
    /// Run a callback with the call's arguments and return its result.
    Observe(Observer),
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Returns(r) => f.debug_tuple("Returns").field(r).finish(),
            Action::Panics(p) => f.debug_tuple("Panics").field(p).finish(),
            Action::Observe(o) => f.debug_tuple("Observe").field(o).finish(),
        }
    }
}

/// A call pattern bound to an [`Action`].
///
/// Expectations are immutable once built.  Adapters usually create them via
/// [`MethodSetup`](crate::MethodSetup), whose terminating methods guarantee
/// that exactly one action is set.
pub struct Expectation {
    matcher: MethodMatcher,
    action: Action
}

impl Expectation {
    pub fn new<M: Into<MethodMatcher>>(matcher: M, action: Action) -> Self {
        Expectation{matcher: matcher.into(), action}
    }

    pub fn matcher(&self) -> &MethodMatcher {
        &self.matcher
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Carry out this expectation's action for a call with arguments `input`.
    ///
    /// A `Returns` action with no value in the first position yields
    /// `O::default()`.  Any later slots are ignored.
    ///
    /// # Panics
    ///
    /// * With the stored payload, for a `Panics` action.
    /// * If an `Observe` callback triggers this expectation again.
    pub fn resolve<I, O>(&self, input: I) -> O
        where I: 'static, O: Value + Default
    {
        self.resolve_or_else(input, O::default)
    }

    /// Like [`resolve`](#method.resolve), for return types without a
    /// `Default`.  `zero` supplies the value of an absent return slot.
    pub fn resolve_or_else<I, O, F>(&self, input: I, zero: F) -> O
        where I: 'static, O: Value, F: FnOnce() -> O
    {
        match &self.action {
            Action::Returns(returns) => returns.get(0).unwrap_or_else(zero),
            Action::Panics(failure) => failure.raise(),
            Action::Observe(observer) =>
                observer.run(self.matcher.method(), input)
        }
    }
}

impl fmt::Debug for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Expectation")
            .field("matcher", &format_args!("{}", self.matcher))
            .field("times", &self.matcher.bound())
            .field("action", &self.action)
            .finish()
    }
}

impl From<Expectation> for MethodMatcher {
    fn from(expectation: Expectation) -> Self {
        expectation.matcher
    }
}

impl From<&Expectation> for MethodMatcher {
    fn from(expectation: &Expectation) -> Self {
        expectation.matcher.clone()
    }
}

/// The ordered return values of a `Returns` action.
///
/// An absent slot stands for the zero value of that result's type.
/// [`Expectation::resolve`] and [`MethodSetup`](crate::MethodSetup) use only
/// the first slot, holding a method's whole return type.  Adapters for
/// methods with several results may instead store one slot per result and
/// unpack them with [`get`](#method.get) or
/// [`get_or_default`](#method.get_or_default).
///
/// # Examples
/// ```
/// # use understudy::*;
/// let r = Returns::new().value(5u32).zero();
/// assert_eq!(5u32, r.get_or_default(0));
/// assert_eq!(String::new(), r.get_or_default::<String>(1));
/// ```
#[derive(Debug, Default)]
pub struct Returns(Vec<Option<Box<dyn Value>>>);

impl Returns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value.
    pub fn value<T: Value>(mut self, value: T) -> Self {
        self.0.push(Some(Box::new(value)));
        self
    }

    /// Append an absent value.
    pub fn zero(mut self) -> Self {
        self.0.push(None);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Clone out the value at `index`, or `None` if that slot is absent.
    ///
    /// # Panics
    ///
    /// If the slot holds something other than a `T`.
    pub fn get<T: Value>(&self, index: usize) -> Option<T> {
        let slot = self.0.get(index)?.as_ref()?;
        match (**slot).clone_value().downcast::<T>() {
            Ok(v) => Some(*v),
            Err(_) => panic!(
                "type mismatch: return value {} is {:?}, not a `{}`",
                index, slot, type_name::<T>())
        }
    }

    /// Clone out the value at `index`, or `T::default()` if that slot is
    /// absent.
    pub fn get_or_default<T: Value + Default>(&self, index: usize) -> T {
        self.get(index).unwrap_or_default()
    }
}

/// A stored panic payload.  Every raise panics with a fresh clone of it, so
/// callers observe the same payload as if the real method had panicked.
pub struct Failure {
    description: String,
    raise: Box<dyn Fn() + Send + Sync>
}

impl Failure {
    pub fn new<P>(payload: P) -> Self
        where P: Clone + fmt::Debug + Send + Sync + 'static
    {
        let description = format!("{:?}", payload);
        let raise: Box<dyn Fn() + Send + Sync> = Box::new(move || {
            std::panic::panic_any(payload.clone());
        });
        Failure{description, raise}
    }

    pub fn raise(&self) -> ! {
        (self.raise)();
        unreachable!("panic_any returned")
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

type Callback<I, O> = Box<dyn FnMut(I) -> O + Send>;

/// A callback that stands in for the real method.
///
/// The callback's signature is erased when stored and checked again when it
/// is called.  A callback may use its mock, but it must not trigger its own
/// expectation again.
pub struct Observer {
    callback: Mutex<Box<dyn Any + Send>>,
    /// The thread currently running the callback, if any
    running: Mutex<Option<ThreadId>>,
    signature: &'static str
}

/// Clears `Observer::running` when the callback returns or unwinds.
struct Running<'a>(&'a Mutex<Option<ThreadId>>);

impl Drop for Running<'_> {
    fn drop(&mut self) {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl Observer {
    pub fn new<I, O, F>(f: F) -> Self
        where I: 'static, O: 'static, F: FnMut(I) -> O + Send + 'static
    {
        let callback: Callback<I, O> = Box::new(f);
        Observer {
            callback: Mutex::new(Box::new(callback)),
            running: Mutex::new(None),
            signature: type_name::<fn(I) -> O>()
        }
    }

    /// Single-threaded version of [`new`](#method.new).
    ///
    /// It is a runtime error to call or drop the `Observer` from any thread
    /// but the one that created it.
    pub fn new_st<I, O, F>(f: F) -> Self
        where I: 'static, O: 'static, F: FnMut(I) -> O + 'static
    {
        let mut fragile = Fragile::new(f);
        Observer::new(move |i: I| (fragile.get_mut())(i))
    }

    /// Run the callback.
    ///
    /// # Panics
    ///
    /// * If `I` and `O` aren't the types the callback was created with.
    /// * If called from inside the callback itself.
    pub fn call<I: 'static, O: 'static>(&self, input: I) -> O {
        self.run(self.signature, input)
    }

    /// Run the callback on behalf of `method`, which names it in panics.
    pub(crate) fn run<I: 'static, O: 'static>(&self, method: &str, input: I)
        -> O
    {
        let me = thread::current().id();
        if *self.running.lock().unwrap_or_else(PoisonError::into_inner)
            == Some(me)
        {
            panic!("`{}` called again from inside its own callback", method);
        }
        // Other threads running the same callback are waited for.
        let mut guard = self.callback.lock()
            .unwrap_or_else(PoisonError::into_inner);
        *self.running.lock().unwrap_or_else(PoisonError::into_inner) =
            Some(me);
        let _running = Running(&self.running);
        match (**guard).downcast_mut::<Callback<I, O>>() {
            Some(callback) => callback(input),
            None => panic!("observer for `{}` called as `{}`",
                           self.signature, type_name::<fn(I) -> O>())
        }
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signature)
    }
}
