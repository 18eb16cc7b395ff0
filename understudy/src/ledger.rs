// vim: tw=80
//! The record of every call made to a mock

use std::fmt;

use crate::{
    method::MethodMatcher,
    value::{Value, expect_type}
};

/// One recorded call: the method's name and its arguments, in order.
///
/// Arguments are owned clones, so later changes to the caller's values don't
/// affect what was recorded.
pub struct MethodCall {
    method: String,
    args: Vec<Box<dyn Value>>
}

impl MethodCall {
    pub fn new<S: Into<String>>(method: S, args: Vec<Box<dyn Value>>) -> Self {
        MethodCall{method: method.into(), args}
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn args(&self) -> &[Box<dyn Value>] {
        &self.args
    }

    /// Borrow argument `index` as a `T`.
    ///
    /// Returns `None` if the call has fewer arguments.  Panics if the argument
    /// isn't a `T`.
    ///
    /// # Examples
    /// ```
    /// # use understudy::*;
    /// let call = MethodCall::new("add", args![10, 20]);
    /// assert_eq!(Some(&20), call.arg::<i32>(1));
    /// assert_eq!(None, call.arg::<i32>(2));
    /// ```
    pub fn arg<T: Value>(&self, index: usize) -> Option<&T> {
        self.args.get(index).map(|v| expect_type::<T>(&**v))
    }
}

impl Clone for MethodCall {
    fn clone(&self) -> Self {
        let args = self.args.iter().map(|v| (**v).clone_value()).collect();
        MethodCall{method: self.method.clone(), args}
    }
}

impl fmt::Debug for MethodCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.method)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}", arg)?;
        }
        f.write_str(")")
    }
}

/// Every call made to a mock, in the order it was made.
///
/// The ledger is append-only until it's [`clear`](#method.clear)ed.
#[derive(Clone, Debug, Default)]
pub struct CallLedger {
    calls: Vec<MethodCall>
}

impl CallLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, call: MethodCall) {
        self.calls.push(call);
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MethodCall> {
        self.calls.iter()
    }

    /// The most recent call.
    pub fn last(&self) -> Option<&MethodCall> {
        self.calls.last()
    }

    /// Every recorded call of `method`, oldest first.
    pub fn of<'a>(&'a self, method: &'a str)
        -> impl Iterator<Item = &'a MethodCall> + 'a
    {
        self.calls.iter().filter(move |c| c.method() == method)
    }

    /// How many recorded calls fit `matcher`.  Its call count is ignored.
    ///
    /// # Panics
    ///
    /// If a recorded call of the same method has a different arity.
    pub fn count(&self, matcher: &MethodMatcher) -> usize {
        self.calls.iter().filter(|c| matcher.accepts(c)).count()
    }

    /// Does any recorded call fit `matcher`?
    pub fn contains(&self, matcher: &MethodMatcher) -> bool {
        self.calls.iter().any(|c| matcher.accepts(c))
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}
