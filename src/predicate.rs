//! Predicates and their composition.

use std::fmt;
use std::rc::Rc;

/// A test applied to each element of a filtered view.
///
/// Implemented for every `Fn(&T) -> bool` closure, so callers rarely name
/// this trait directly. The two combinators in this module, [`Always`] and
/// [`And`], give the composed predicate of a view a nameable type.
pub trait Predicate<T> {
    /// Returns `true` if `item` passes.
    fn test(&self, item: &T) -> bool;
}

impl<T, F> Predicate<T> for F
where
    F: Fn(&T) -> bool,
{
    fn test(&self, item: &T) -> bool {
        self(item)
    }
}

/// The predicate that accepts every element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Always;

impl<T> Predicate<T> for Always {
    fn test(&self, _item: &T) -> bool {
        true
    }
}

/// Left-to-right short-circuit conjunction of two predicates.
///
/// `second` is only consulted for elements that `first` accepted. The left
/// side is shared through an [`Rc`] so that a view and every view derived
/// from it point at the same composed predicate.
pub struct And<P: ?Sized, Q> {
    first: Rc<P>,
    second: Q,
}

impl<P: ?Sized, Q> And<P, Q> {
    pub(crate) fn new(first: Rc<P>, second: Q) -> Self {
        Self { first, second }
    }
}

impl<T, P, Q> Predicate<T> for And<P, Q>
where
    P: Predicate<T> + ?Sized,
    Q: Predicate<T>,
{
    fn test(&self, item: &T) -> bool {
        self.first.test(item) && self.second.test(item)
    }
}

impl<P: ?Sized, Q> fmt::Debug for And<P, Q> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("And").finish_non_exhaustive()
    }
}
