// vim: tw=80
//! The mock engine

use std::{
    collections::VecDeque,
    fmt::{self, Write},
    sync::{Arc, Mutex, MutexGuard, PoisonError}
};

use crate::{
    expectation::Expectation,
    ledger::{CallLedger, MethodCall},
    method::MethodMatcher,
    value::Value
};

#[derive(Default)]
struct State {
    /// Most recently configured first
    expectations: VecDeque<Arc<Expectation>>,
    ledger: CallLedger
}

/// Records the calls made to one mock object and decides, for each, which
/// [`Expectation`] governs it.
///
/// An adapter, which implements the mocked interface, owns a `Mock` and
/// forwards every method to [`call`](#method.call) or
/// [`invoke`](#method.invoke).  Test code configures it with
/// [`setup`](#method.setup) and checks it with [`called`](#method.called).
///
/// All methods take `&self`, and `Mock` is `Send + Sync`, so an adapter can be
/// shared between threads.  Calls are serialized internally.
///
/// # Examples
/// ```
/// # use understudy::*;
/// struct MockGreeter(Mock);
/// impl MockGreeter {
///     fn greet(&self, name: &str) -> String {
///         self.0.invoke("greet", args![name.to_owned()], (name.to_owned(),))
///     }
/// }
/// fn greet<N: IntoMatcher<String>>(name: N)
///     -> MethodSetup<(String,), String>
/// {
///     MethodSetup::new("greet", vec![name.into_matcher().erase()])
/// }
///
/// let mock = MockGreeter(Mock::new());
/// mock.0.setup(greet(any()).returns("Hi".to_owned()));
/// mock.0.setup(greet("Dolly").when(|(n,)| format!("Hello, {}", n)));
/// assert_eq!("Hello, Dolly", mock.greet("Dolly"));
/// assert_eq!("Hi", mock.greet("Bob"));
/// assert!(mock.0.called(greet("Bob").once()));
/// ```
#[derive(Default)]
pub struct Mock {
    state: Mutex<State>
}

impl Mock {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panicking matcher can poison the lock, but it never leaves the
        // state half-updated.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add an expectation.  It takes priority over every expectation that was
    /// added before it.
    pub fn setup(&self, expectation: Expectation) {
        log_debug!(expectation = ?expectation, "setup");
        self.lock().expectations.push_front(Arc::new(expectation));
    }

    /// Record a call and find the expectation that governs it.
    ///
    /// The call is always recorded, whether or not anything matches.
    /// Expectations are tried most recent first:
    ///
    /// * One without a call count governs the call if its pattern accepts it.
    /// * One bounded to `n` calls governs the call if its pattern accepts it
    ///   and no more than `n` recorded calls, this one included, fit the
    ///   pattern.
    ///
    /// Returns `None` if no expectation applies.  The adapter should then
    /// produce its return type's zero value.
    ///
    /// # Panics
    ///
    /// If an expectation for the same method has a different number of
    /// argument matchers than `args` has elements.
    pub fn call<S>(&self, method: S, args: Vec<Box<dyn Value>>)
        -> Option<Arc<Expectation>>
        where S: Into<String>
    {
        let call = MethodCall::new(method, args);
        log_trace!(call = ?call, "recording call");
        let mut state = self.lock();
        state.ledger.record(call);
        let state = &*state;
        let Some(call) = state.ledger.last() else {
            unreachable!("ledger is empty right after recording")
        };
        let found = state.expectations.iter()
            .find(|e| fires(e, call, &state.ledger))
            .cloned();
        match &found {
            // Unused without the tracing feature
            Some(_e) => log_debug!(call = ?call, matcher = %_e.matcher(),
                                   "matched"),
            None => log_debug!(call = ?call, "no matching expectation")
        }
        found
    }

    /// Record a call and carry out the governing expectation's action.
    ///
    /// `args` is what gets recorded and matched; `input` is the tuple of
    /// arguments handed to an `Observe` callback.  Returns `O::default()` if
    /// no expectation applies.
    pub fn invoke<I, O>(&self, method: &str, args: Vec<Box<dyn Value>>,
                        input: I) -> O
        where I: 'static, O: Value + Default
    {
        self.invoke_or_else(method, args, input, O::default)
    }

    /// Like [`invoke`](#method.invoke), but `zero` supplies the return value
    /// when no expectation applies or a `Returns` action has no value.  For
    /// return types like `Result` that have no `Default`.
    pub fn invoke_or_else<I, O, F>(&self, method: &str,
                                   args: Vec<Box<dyn Value>>, input: I,
                                   zero: F) -> O
        where I: 'static, O: Value, F: FnOnce() -> O
    {
        // The lock is released before the action runs, so a callback may
        // use the mock.
        match self.call(method, args) {
            Some(expectation) => expectation.resolve_or_else(input, zero),
            None => zero()
        }
    }

    /// Was a call matching `matcher` recorded?
    ///
    /// Without a call count, at least one recorded call must fit the pattern.
    /// With a count of `n`, exactly `n` must.
    ///
    /// # Panics
    ///
    /// If a recorded call of the same method has a different number of
    /// arguments than `matcher` has argument matchers.
    pub fn called<M: Into<MethodMatcher>>(&self, matcher: M) -> bool {
        let matcher = matcher.into();
        let state = self.lock();
        satisfied(&matcher, &state.ledger)
    }

    /// Like [`called`](#method.called), but panic with a description of the
    /// recorded calls if the check fails.
    pub fn assert_called<M: Into<MethodMatcher>>(&self, matcher: M) {
        let matcher = matcher.into();
        let msg = {
            let state = self.lock();
            if satisfied(&matcher, &state.ledger) {
                return;
            }
            diagnose(&matcher, &state.ledger)
        };
        panic!("{}", msg);
    }

    /// Forget every expectation and every recorded call.
    pub fn reset(&self) {
        log_debug!("reset");
        let mut state = self.lock();
        state.expectations.clear();
        state.ledger.clear();
    }

    /// A copy of every recorded call, oldest first.
    pub fn calls(&self) -> Vec<MethodCall> {
        self.lock().ledger.iter().cloned().collect()
    }

    pub fn call_count(&self) -> usize {
        self.lock().ledger.len()
    }
}

impl fmt::Debug for Mock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Mock")
            .field("expectations", &state.expectations)
            .field("calls", &state.ledger)
            .finish()
    }
}

/// Does `expectation` govern `call`, the newest entry in `ledger`?
fn fires(expectation: &Expectation, call: &MethodCall, ledger: &CallLedger)
    -> bool
{
    let matcher = expectation.matcher();
    match matcher.bound() {
        None => matcher.accepts(call),
        Some(n) => matcher.accepts(call) && ledger.count(matcher) <= n
    }
}

fn satisfied(matcher: &MethodMatcher, ledger: &CallLedger) -> bool {
    match matcher.bound() {
        None => ledger.contains(matcher),
        Some(n) => ledger.count(matcher) == n
    }
}

fn diagnose(matcher: &MethodMatcher, ledger: &CallLedger) -> String {
    let mut msg = match matcher.bound() {
        None => format!("No matching call for `{}`", matcher),
        Some(n) => format!("`{}` was called {} time(s), expected {}",
                           matcher, ledger.count(matcher), n)
    };
    let mut recorded = ledger.of(matcher.method()).peekable();
    if recorded.peek().is_none() {
        write!(msg, "\n`{}` was never called", matcher.method()).ok();
        return msg;
    }
    for call in recorded {
        write!(msg, "\n  {:?}", call).ok();
        let mismatches = matcher.arguments().iter()
            .zip(call.args())
            .enumerate()
            .filter_map(|(i, (m, arg))| m.explain(&**arg).map(|why| (i, why)));
        for (i, why) in mismatches {
            write!(msg, "\n    argument {}: {}", i,
                   why.replace('\n', "\n      ")).ok();
        }
    }
    msg
}
