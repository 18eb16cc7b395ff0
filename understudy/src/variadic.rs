// vim: tw=80
//! Matching of variable-length argument lists

use std::fmt;

use crate::{
    matcher::{ArgumentMatcher, Matcher},
    value::{Value, VarArgs}
};

/// Matches the whole trailing variadic argument list of a call.
///
/// A single [`none`](crate::none) or [`any_args`](crate::any_args) governs the
/// entire tail.  Otherwise the tail must have exactly one element per matcher,
/// and every element must satisfy the matcher in the same position.
///
/// # Examples
/// ```
/// # use understudy::*;
/// let empty = VariadicMatcher::from(vec![none::<u32>()]);
/// assert!(empty.is_match(&VarArgs::new()));
/// assert!(!empty.is_match(&VarArgs::from(vec![1u32])));
///
/// let pair = VariadicMatcher::from(vec![exact(1u32), any()]);
/// assert!(pair.is_match(&VarArgs::from(vec![1u32, 7])));
/// assert!(!pair.is_match(&VarArgs::from(vec![1u32])));
/// ```
#[derive(Clone, Debug, Default)]
pub struct VariadicMatcher {
    matchers: Vec<ArgumentMatcher>
}

impl VariadicMatcher {
    pub fn new(matchers: Vec<ArgumentMatcher>) -> Self {
        VariadicMatcher{matchers}
    }

    /// Does `candidate` satisfy this matcher?
    ///
    /// Anything other than a [`VarArgs`] is never a match.
    pub fn is_match(&self, candidate: &dyn Value) -> bool {
        let Ok(tail) = candidate.downcast_ref::<VarArgs>() else {
            return false;
        };
        match self.matchers.as_slice() {
            [ArgumentMatcher::None] => tail.is_empty(),
            [ArgumentMatcher::AnyArgs] => true,
            matchers => matchers.len() == tail.len() &&
                matchers.iter()
                    .zip(tail.iter())
                    .all(|(m, arg)| m.is_match(arg))
        }
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl fmt::Display for VariadicMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, m) in self.matchers.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", m)?;
        }
        f.write_str("]")
    }
}

impl<T> From<Vec<Matcher<T>>> for VariadicMatcher {
    fn from(matchers: Vec<Matcher<T>>) -> Self {
        VariadicMatcher::new(matchers.into_iter().map(Matcher::erase).collect())
    }
}

impl From<VariadicMatcher> for ArgumentMatcher {
    fn from(v: VariadicMatcher) -> Self {
        ArgumentMatcher::Variadic(v)
    }
}
