// vim: tw=80
//! Type-erased argument and return values

use downcast::{downcast, Any};
use std::fmt;

/// A value that can be recorded in the call ledger, compared by an argument
/// matcher, or handed back from a `Returns` action.
///
/// Implemented for every `'static` type that is `Debug + Clone + Send + Sync`.
/// There is normally no need to implement it by hand.
pub trait Value: Any + fmt::Debug + Send + Sync + 'static {
    /// Clone this value into a fresh box.
    fn clone_value(&self) -> Box<dyn Value>;
}

downcast!(dyn Value);

impl<T> Value for T
    where T: Any + fmt::Debug + Clone + Send + Sync
{
    fn clone_value(&self) -> Box<dyn Value> {
        Box::new(self.clone())
    }
}

/// Downcast a recorded value, panicking if it has the wrong type.
///
/// Matchers are always built for a single parameter type, so a mismatch here
/// means an adapter and its matcher-builder disagree about a signature.
pub(crate) fn expect_type<'a, T: Value>(value: &'a dyn Value) -> &'a T {
    match value.downcast_ref::<T>() {
        Ok(v) => v,
        Err(_) => panic!(
            "type mismatch: expected a value of type `{}`, got {:?}",
            std::any::type_name::<T>(), value)
    }
}

/// The trailing variable-length arguments of a call, as recorded in the
/// ledger.
///
/// Adapters for variadic methods record the tail as a single `VarArgs`
/// argument so that a [`VariadicMatcher`](crate::VariadicMatcher) can inspect
/// its length and elements without knowing their type.
///
/// # Examples
/// ```
/// # use understudy::*;
/// let tail = VarArgs::from(vec![1u8, 2, 3]);
/// assert_eq!(3, tail.len());
/// assert_eq!(Some(&2u8), tail.get::<u8>(1));
/// ```
#[derive(Default)]
pub struct VarArgs(Vec<Box<dyn Value>>);

impl VarArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tail by cloning each element of `items`.
    pub fn from_slice<T: Value + Clone>(items: &[T]) -> Self {
        items.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the elements of the tail, in call order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Value> {
        self.0.iter().map(|v| &**v)
    }

    /// Borrow the element at `index` as a `T`.
    ///
    /// Returns `None` if the tail is shorter than that.  Panics if the element
    /// isn't a `T`.
    pub fn get<T: Value>(&self, index: usize) -> Option<&T> {
        self.0.get(index).map(|v| expect_type::<T>(&**v))
    }
}

impl Clone for VarArgs {
    fn clone(&self) -> Self {
        VarArgs(self.0.iter().map(|v| (**v).clone_value()).collect())
    }
}

impl fmt::Debug for VarArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<T: Value> From<Vec<T>> for VarArgs {
    fn from(items: Vec<T>) -> Self {
        items.into_iter().collect()
    }
}

impl<T: Value> FromIterator<T> for VarArgs {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        VarArgs(iter.into_iter()
            .map(|v| Box::new(v) as Box<dyn Value>)
            .collect())
    }
}
