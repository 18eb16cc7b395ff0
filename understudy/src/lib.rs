// vim: tw=80
//! A runtime engine for hand-written and generated mock objects.
//!
//! Understudy supplies the parts of a mock object that don't depend on the
//! interface being mocked: argument matchers, expectations, a ledger of
//! recorded calls, and the rules that decide which expectation governs each
//! call.  The interface-specific part, called an *adapter*, is small and
//! mechanical, so it can be written by hand or emitted by a code generator.
//!
//! # Usage
//!
//! An adapter has three pieces:
//! * A type implementing the interface.  It owns a [`Mock`] and forwards each
//!   method to [`Mock::invoke`], passing the method's name, its arguments
//!   recorded with [`args!`], and the same arguments as a tuple for
//!   callbacks.
//! * One matcher-builder function per method.  It takes one
//!   [`IntoMatcher`] per parameter and returns a [`MethodSetup`].
//! * Nothing else.  [`MethodSetup`] provides the call-count and action
//!   methods.
//!
//! Test code then configures the mock with [`Mock::setup`], hands the adapter
//! to the code under test, and afterwards checks what happened with
//! [`Mock::called`] or [`Mock::assert_called`].
//!
//! # User Guide
//!
//! * [`Getting started`](#getting-started)
//! * [`Matching arguments`](#matching-arguments)
//! * [`Actions`](#actions)
//! * [`Call counts`](#call-counts)
//! * [`Variadic methods`](#variadic-methods)
//! * [`Verification`](#verification)
//! * [`Threads`](#threads)
//! * [`Crate features`](#crate-features)
//!
//! ## Getting Started
//! ```
//! use understudy::*;
//!
//! trait Calculator {
//!     fn add(&self, a: i32, b: i32) -> i32;
//! }
//!
//! #[derive(Default)]
//! struct MockCalculator(Mock);
//!
//! impl Calculator for MockCalculator {
//!     fn add(&self, a: i32, b: i32) -> i32 {
//!         self.0.invoke("add", args![a, b], (a, b))
//!     }
//! }
//!
//! fn add<A, B>(a: A, b: B) -> MethodSetup<(i32, i32), i32>
//!     where A: IntoMatcher<i32>, B: IntoMatcher<i32>
//! {
//!     MethodSetup::new("add", matchers![a, b])
//! }
//!
//! fn total(c: &dyn Calculator) -> i32 {
//!     c.add(10, 20)
//! }
//!
//! let mock = MockCalculator::default();
//! mock.0.setup(add(10, 20).returns(30));
//! assert_eq!(30, total(&mock));
//! ```
//!
//! A call that no expectation governs is not an error.  It returns the zero
//! value of the method's return type.
//! ```
//! # use understudy::*;
//! # fn add<A, B>(a: A, b: B) -> MethodSetup<(i32, i32), i32>
//! #     where A: IntoMatcher<i32>, B: IntoMatcher<i32>
//! # {
//! #     MethodSetup::new("add", matchers![a, b])
//! # }
//! let mock = Mock::new();
//! mock.setup(add(10, 20).returns(30));
//! let r: i32 = mock.invoke("add", args![10, 21], (10, 21));
//! assert_eq!(0, r);
//! ```
//!
//! ## Matching arguments
//!
//! Every matcher-builder parameter accepts either a plain value, which must
//! be equal to the argument, or one of the matchers in this crate:
//!
//! * [`exact`]: equality, the same as passing the plain value.
//! * [`any`]: any argument of the right type.
//! * [`matching`]: a closure over a reference to the argument.
//! * [`satisfies`]: any [`Predicate`], such as those in [`predicate`].
//! * [`none`] and [`any_args`]: for variadic tails.  See below.
//!
//! Equality is structural, so structs, maps, vectors and `Option`s work as
//! expected.
//!
//! When more than one expectation accepts a call, the one set up most
//! recently wins.  This makes it easy to set a general default and then
//! override it for particular arguments.
//! ```
//! # use understudy::*;
//! # fn add<A, B>(a: A, b: B) -> MethodSetup<(i32, i32), i32>
//! #     where A: IntoMatcher<i32>, B: IntoMatcher<i32>
//! # {
//! #     MethodSetup::new("add", matchers![a, b])
//! # }
//! let mock = Mock::new();
//! mock.setup(add(any(), any()).returns(-1));
//! mock.setup(add(matching(|a: &i32| *a > 100), 20).returns(30));
//! assert_eq!(30, mock.invoke::<_, i32>("add", args![123, 20], (123, 20)));
//! assert_eq!(-1, mock.invoke::<_, i32>("add", args![1, 20], (1, 20)));
//! ```
//!
//! ## Actions
//!
//! Each expectation has exactly one action, chosen by the method that
//! finishes building it:
//!
//! * [`returns`](MethodSetup::returns) hands back a clone of a value.
//! * [`panics`](MethodSetup::panics) panics with a payload, just as the real
//!   method might.
//! * [`when`](MethodSetup::when) runs a closure instead of the real method.
//!   It receives the arguments as a tuple, and may capture state from the
//!   test.
//!
//! ```
//! # use understudy::*;
//! # use std::sync::{Arc, Mutex};
//! # fn add<A, B>(a: A, b: B) -> MethodSetup<(i32, i32), i32>
//! #     where A: IntoMatcher<i32>, B: IntoMatcher<i32>
//! # {
//! #     MethodSetup::new("add", matchers![a, b])
//! # }
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let log = seen.clone();
//! let mock = Mock::new();
//! mock.setup(add(any(), any()).when(move |(a, b)| {
//!     log.lock().unwrap().push(a);
//!     a + b
//! }));
//! assert_eq!(5, mock.invoke::<_, i32>("add", args![2, 3], (2, 3)));
//! assert_eq!(vec![2], *seen.lock().unwrap());
//! ```
//!
//! ## Call counts
//!
//! By default an expectation governs any number of calls.
//! [`times`](MethodSetup::times), [`once`](MethodSetup::once) and
//! [`never`](MethodSetup::never) limit it.  Once the limit is reached, calls
//! fall through to older expectations, or to the zero value.
//! ```
//! # use understudy::*;
//! # fn add<A, B>(a: A, b: B) -> MethodSetup<(i32, i32), i32>
//! #     where A: IntoMatcher<i32>, B: IntoMatcher<i32>
//! # {
//! #     MethodSetup::new("add", matchers![a, b])
//! # }
//! let mock = Mock::new();
//! mock.setup(add(any(), any()).returns(1));
//! mock.setup(add(any(), any()).times(2).returns(2));
//! let results = (0..3)
//!     .map(|_| mock.invoke::<_, i32>("add", args![0, 0], (0, 0)))
//!     .collect::<Vec<_>>();
//! assert_eq!(vec![2, 2, 1], results);
//! ```
//!
//! ## Variadic methods
//!
//! A variadic tail is recorded as a single [`VarArgs`] argument and matched
//! by a single [`VariadicMatcher`].  A lone [`none`] matches an empty tail, a
//! lone [`any_args`] matches every tail, and anything else is matched element
//! by element.
//! ```
//! # use understudy::*;
//! fn printf<F>(fmt: F, rest: Vec<Matcher<String>>)
//!     -> MethodSetup<(String, Vec<String>), usize>
//!     where F: IntoMatcher<String>
//! {
//!     MethodSetup::new("printf", vec![
//!         fmt.into_matcher().erase(),
//!         VariadicMatcher::from(rest).into()
//!     ])
//! }
//!
//! let mock = Mock::new();
//! mock.setup(printf("hello", vec![none()]).returns(5));
//! let r: usize = mock.invoke("printf",
//!     args![String::from("hello"), VarArgs::new()],
//!     (String::from("hello"), Vec::<String>::new()));
//! assert_eq!(5, r);
//! ```
//!
//! ## Verification
//!
//! [`Mock::called`] checks the ledger of recorded calls.  Without a call
//! count it asks whether any call fits the pattern.  With one, it asks
//! whether exactly that many do.  [`Mock::assert_called`] does the same but
//! panics with a description of the calls that were made.
//! ```
//! # use understudy::*;
//! # fn add<A, B>(a: A, b: B) -> MethodSetup<(i32, i32), i32>
//! #     where A: IntoMatcher<i32>, B: IntoMatcher<i32>
//! # {
//! #     MethodSetup::new("add", matchers![a, b])
//! # }
//! let mock = Mock::new();
//! mock.invoke::<_, i32>("add", args![1, 2], (1, 2));
//! mock.invoke::<_, i32>("add", args![1, 3], (1, 3));
//! assert!(mock.called(add(1, any())));
//! assert!(mock.called(add(1, any()).times(2)));
//! assert!(mock.called(add(2, any()).never()));
//! mock.assert_called(add(1, 3).once());
//! ```
//!
//! ## Threads
//!
//! [`Mock`] is `Send + Sync`, and [`when`](MethodSetup::when) requires a
//! `Send` closure.  For closures that can't be sent, use
//! [`when_st`](MethodSetup::when_st).  Calling such an expectation from any
//! other thread panics.
//!
//! ## Crate features
//!
//! * `tracing` (default): emit `tracing` events at the `understudy` target
//!   whenever an expectation is set up, a call is recorded and resolved, or
//!   the mock is reset.

#[macro_use]
mod log;

mod expectation;
mod ledger;
mod matcher;
mod method;
mod mock;
mod value;
mod variadic;

pub use crate::{
    expectation::{Action, Expectation, Failure, Observer, Returns},
    ledger::{CallLedger, MethodCall},
    matcher::{
        ArgumentMatcher,
        IntoMatcher,
        Matcher,
        ValuePredicate,
        any,
        any_args,
        exact,
        matching,
        none,
        satisfies
    },
    method::{MethodMatcher, MethodSetup},
    mock::Mock,
    value::{Value, VarArgs},
    variadic::VariadicMatcher
};
pub use predicates::prelude::{Predicate, predicate};

/// Record the arguments of a call.
///
/// Each argument is cloned into a `Box<dyn Value>`, so the caller keeps its
/// own copies.
///
/// # Examples
/// ```
/// # use understudy::*;
/// let name = String::from("Dolly");
/// let call = MethodCall::new("greet", args![name, 3u8]);
/// assert_eq!(Some(&name), call.arg::<String>(0));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        ::std::vec::Vec::<::std::boxed::Box<dyn $crate::Value>>::new()
    };
    ($($arg:expr),+ $(,)?) => {
        ::std::vec![$(
            ::std::boxed::Box::new(::std::clone::Clone::clone(&$arg))
                as ::std::boxed::Box<dyn $crate::Value>
        ),+]
    };
}

/// Convert each argument of a matcher-builder function into an
/// [`ArgumentMatcher`].
///
/// # Examples
/// ```
/// # use understudy::*;
/// fn steer<A, B>(a: A, b: B) -> MethodSetup<(u8, i16), ()>
///     where A: IntoMatcher<u8>, B: IntoMatcher<i16>
/// {
///     MethodSetup::new("steer", matchers![a, b])
/// }
/// assert_eq!("steer(var == 1, any)", steer(1, any()).matcher().to_string());
/// ```
#[macro_export]
macro_rules! matchers {
    () => {
        ::std::vec::Vec::<$crate::ArgumentMatcher>::new()
    };
    ($($m:expr),+ $(,)?) => {
        ::std::vec![$($crate::Matcher::erase(
            $crate::IntoMatcher::into_matcher($m)
        )),+]
    };
}
