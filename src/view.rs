//! The lazy filtered view over a slice.
//!
//! A [`FilteredView`] pairs a borrowed slice with one composed predicate.
//! Composing with [`FilteredView::with_filter`] never touches the slice; only
//! the terminal operations ([`map`](FilteredView::map),
//! [`reduce`](FilteredView::reduce), [`for_each`](FilteredView::for_each) and
//! friends) traverse it, evaluating the composed predicate exactly once per
//! element, in order.
//!
//! The slice is held by shared borrow, so it cannot be mutated while a view
//! exists. Elements with interior mutability that a callback changes during a
//! traversal produce unspecified results for that traversal; avoiding that is
//! the caller's responsibility.

use std::fmt;
use std::rc::Rc;

use crate::logging::trace;
use crate::predicate::{And, Predicate};

/// A not-yet-materialized filtered slice.
///
/// Views are immutable: [`with_filter`](Self::with_filter) returns a new view
/// and leaves `self` usable, so chains may branch. Cloning a view is cheap and
/// requires neither `T: Clone` nor `P: Clone`.
pub struct FilteredView<'a, T, P: ?Sized> {
    items: &'a [T],
    predicate: Rc<P>,
}

/// A view whose composed predicate has been type-erased.
///
/// Useful when the number of predicates is only known at runtime; see
/// [`FilteredView::into_dyn`].
pub type DynFilteredView<'a, T> = FilteredView<'a, T, dyn Predicate<T> + 'a>;

impl<'a, T, P> FilteredView<'a, T, P>
where
    P: Predicate<T>,
{
    /// Create a view over `items` filtered by `predicate`.
    ///
    /// Nothing is evaluated until a terminal operation is called.
    pub fn new(items: &'a [T], predicate: P) -> Self {
        Self {
            items,
            predicate: Rc::new(predicate),
        }
    }

    /// Erase the predicate type so views built in a loop share one type.
    pub fn into_dyn(self) -> DynFilteredView<'a, T>
    where
        P: 'a,
    {
        let predicate: Rc<dyn Predicate<T> + 'a> = self.predicate;
        FilteredView {
            items: self.items,
            predicate,
        }
    }
}

impl<'a, T, P> FilteredView<'a, T, P>
where
    P: Predicate<T> + ?Sized,
{
    /// Compose another predicate onto this view.
    ///
    /// The returned view accepts an element when this view's predicate
    /// accepts it *and then* `next` accepts it; `next` is never called for
    /// elements this view already rejects.
    pub fn with_filter<Q>(&self, next: Q) -> FilteredView<'a, T, And<P, Q>>
    where
        Q: Fn(&T) -> bool,
    {
        FilteredView {
            items: self.items,
            predicate: Rc::new(And::new(Rc::clone(&self.predicate), next)),
        }
    }

    /// The underlying, unfiltered slice.
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    /// Transform every accepted element, preserving order.
    pub fn map<N, F>(&self, transform: F) -> Vec<N>
    where
        F: FnMut(&T) -> N,
    {
        trace!(len = self.items.len(), "map over filtered view");
        self.accepted().map(transform).collect()
    }

    /// Left fold over the accepted elements, starting from `initial`.
    ///
    /// Equivalent to filtering the slice by the composed predicate and then
    /// folding with `combine`. An empty or fully rejected slice yields
    /// `initial` unchanged.
    pub fn reduce<N, F>(&self, mut combine: F, initial: N) -> N
    where
        F: FnMut(N, &T) -> N,
    {
        trace!(len = self.items.len(), "reduce over filtered view");
        self.accepted().fold(initial, |acc, item| combine(acc, item))
    }

    /// Run `action` on every accepted element, in order.
    pub fn for_each<F>(&self, action: F)
    where
        F: FnMut(&T),
    {
        trace!(len = self.items.len(), "for_each over filtered view");
        self.accepted().for_each(action);
    }

    /// Number of accepted elements.
    pub fn count(&self) -> usize {
        trace!(len = self.items.len(), "count over filtered view");
        self.accepted().count()
    }

    /// Like [`map`](Self::map), with a fallible transform.
    ///
    /// The first `Err` is returned as-is and the traversal stops there:
    /// later elements are neither tested nor transformed.
    pub fn try_map<N, E, F>(&self, transform: F) -> Result<Vec<N>, E>
    where
        F: FnMut(&T) -> Result<N, E>,
    {
        trace!(len = self.items.len(), "try_map over filtered view");
        self.accepted().map(transform).collect()
    }

    /// Like [`reduce`](Self::reduce), with a fallible combine step.
    pub fn try_reduce<N, E, F>(&self, mut combine: F, initial: N) -> Result<N, E>
    where
        F: FnMut(N, &T) -> Result<N, E>,
    {
        trace!(len = self.items.len(), "try_reduce over filtered view");
        self.accepted().try_fold(initial, |acc, item| combine(acc, item))
    }

    /// Like [`for_each`](Self::for_each), with a fallible action.
    pub fn try_for_each<E, F>(&self, action: F) -> Result<(), E>
    where
        F: FnMut(&T) -> Result<(), E>,
    {
        trace!(len = self.items.len(), "try_for_each over filtered view");
        self.accepted().try_for_each(action)
    }

    fn accepted(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.items.iter().filter(move |item| self.predicate.test(item))
    }
}

impl<T, P> FilteredView<'_, T, P>
where
    T: Clone,
    P: Predicate<T> + ?Sized,
{
    /// Collect clones of the accepted elements.
    pub fn cloned(&self) -> Vec<T> {
        self.map(T::clone)
    }
}

impl<T, P: ?Sized> Clone for FilteredView<'_, T, P> {
    fn clone(&self) -> Self {
        Self {
            items: self.items,
            predicate: Rc::clone(&self.predicate),
        }
    }
}

impl<T, P: ?Sized> fmt::Debug for FilteredView<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteredView")
            .field("len", &self.items.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::Always;
    use std::cell::Cell;

    fn counting<'c>(calls: &'c Cell<usize>, result: bool) -> impl Fn(&i32) -> bool + 'c {
        move |_: &i32| {
            calls.set(calls.get() + 1);
            result
        }
    }

    #[test]
    fn test_with_filter_is_lazy() {
        let items = [1, 2, 3];
        let (a, b) = (Cell::new(0), Cell::new(0));

        let view = FilteredView::new(&items, counting(&a, true));
        let _chained = view.with_filter(counting(&b, true));

        assert_eq!(a.get(), 0);
        assert_eq!(b.get(), 0);
    }

    #[test]
    fn test_map_filters_and_transforms_in_order() {
        let items = [5, -1, 8, 0, 3];
        let view = FilteredView::new(&items, |x: &i32| *x > 0).with_filter(|x: &i32| *x != 8);
        assert_eq!(view.map(|x| x * 10), vec![50, 30]);
    }

    #[test]
    fn test_transform_called_only_for_accepted() {
        let items = [1, 2, 3, 4];
        let calls = Cell::new(0);
        let view = FilteredView::new(&items, |x: &i32| x % 2 == 0);
        let out = view.map(|x| {
            calls.set(calls.get() + 1);
            *x
        });
        assert_eq!(out, vec![2, 4]);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_reduce_folds_left() {
        let items = [1, 2, 3, 4, 5, 6];
        let view = FilteredView::new(&items, |x: &i32| x % 2 == 1);
        let joined = view.reduce(|acc: String, x| format!("{acc}{x}"), String::new());
        assert_eq!(joined, "135");
    }

    #[test]
    fn test_for_each_visits_accepted_in_order() {
        let items = ["a", "", "bb", "ccc"];
        let mut seen = Vec::new();
        FilteredView::new(&items, |s: &&str| !s.is_empty()).for_each(|s| seen.push(*s));
        assert_eq!(seen, vec!["a", "bb", "ccc"]);
    }

    #[test]
    fn test_short_circuit_counts() {
        let items = [10, 20, 30, 40];
        let (p1, p2, p3) = (Cell::new(0), Cell::new(0), Cell::new(0));

        let view = FilteredView::new(&items, counting(&p1, true))
            .with_filter(counting(&p2, false))
            .with_filter(counting(&p3, true));
        let out = view.map(|x| *x);

        assert!(out.is_empty());
        assert_eq!(p1.get(), 4);
        assert_eq!(p2.get(), 4);
        assert_eq!(p3.get(), 0);
    }

    #[test]
    fn test_each_terminal_reevaluates() {
        let items = [1, 2, 3];
        let calls = Cell::new(0);
        let view = FilteredView::new(&items, counting(&calls, true));

        view.map(|x| *x);
        view.for_each(|_| {});
        view.reduce(|acc, _| acc, ());
        assert_eq!(calls.get(), 9);
    }

    #[test]
    fn test_empty_slice_yields_identity() {
        let items: [i32; 0] = [];
        let calls = Cell::new(0);
        let view = FilteredView::new(&items, counting(&calls, true));

        assert!(view.map(|x| *x).is_empty());
        assert_eq!(view.reduce(|acc: i32, x| acc + x, 42), 42);
        let mut visited = 0;
        view.for_each(|_| visited += 1);
        assert_eq!(visited, 0);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_branching_chains_share_base() {
        let items = [1, 2, 3, 4, 5, 6];
        let base = FilteredView::new(&items, |x: &i32| *x > 1);
        let evens = base.with_filter(|x: &i32| x % 2 == 0);
        let odds = base.with_filter(|x: &i32| x % 2 == 1);

        assert_eq!(base.cloned(), vec![2, 3, 4, 5, 6]);
        assert_eq!(evens.cloned(), vec![2, 4, 6]);
        assert_eq!(odds.cloned(), vec![3, 5]);
    }

    #[test]
    fn test_into_dyn_in_loop() {
        let items: Vec<i32> = (1..=20).collect();
        let bounds = [2, 3];

        let mut view: DynFilteredView<'_, i32> = FilteredView::new(&items, Always).into_dyn();
        for bound in bounds {
            view = view.with_filter(move |x: &i32| x % bound == 0).into_dyn();
        }

        assert_eq!(view.cloned(), vec![6, 12, 18]);
        assert_eq!(view.count(), 3);
    }

    #[test]
    fn test_try_map_stops_at_first_error() {
        let items = [1, 2, 3, 4];
        let tested = Cell::new(0);
        let view = FilteredView::new(&items, counting(&tested, true));

        let result: Result<Vec<i32>, String> = view.try_map(|x| {
            if *x == 2 {
                Err(format!("bad {x}"))
            } else {
                Ok(*x)
            }
        });

        assert_eq!(result, Err("bad 2".to_string()));
        assert_eq!(tested.get(), 2);
    }

    #[test]
    fn test_try_reduce_and_try_for_each() {
        let items = [1, 2, 3];
        let view = FilteredView::new(&items, |x: &i32| *x != 2);

        let sum: Result<i32, ()> = view.try_reduce(|acc, x| Ok(acc + x), 0);
        assert_eq!(sum, Ok(4));

        let overflow = view.try_reduce(|acc: u8, x| acc.checked_mul(100).ok_or(*x), 1);
        assert_eq!(overflow, Err(3));

        let mut seen = Vec::new();
        let visit: Result<(), &str> = view.try_for_each(|x| {
            seen.push(*x);
            Ok(())
        });
        assert!(visit.is_ok());
        assert_eq!(seen, vec![1, 3]);
    }

    #[test]
    #[should_panic(expected = "boom")]
    #[allow(clippy::panic)]
    fn test_panicking_predicate_propagates() {
        let items = [1];
        FilteredView::new(&items, |_: &i32| -> bool { panic!("boom") }).for_each(|_| {});
    }

    #[test]
    fn test_items_returns_unfiltered_slice() {
        let items = vec![3, 1, 2];
        let view = FilteredView::new(&items, |_: &i32| false);
        assert_eq!(view.items(), &[3, 1, 2]);
        assert_eq!(view.count(), 0);
        assert_eq!(format!("{view:?}"), "FilteredView { len: 3, .. }");
    }
}
