//! Opt-in `.with_filter()` method on slices.
//!
//! Nothing here is in scope unless a caller asks for it, either with
//! `use with_filter::ext::WithFilterExt` or through the
//! [`prelude`](crate::prelude). Once imported, `Vec`s, arrays and slices all
//! gain the method through auto-deref.
//!
//! ```
//! use with_filter::ext::WithFilterExt;
//!
//! let scores = vec![3, 9, 4, 10];
//! let high = scores.with_filter(|s| *s > 5).map(|s| s * 2);
//! assert_eq!(high, vec![18, 20]);
//! ```

use crate::view::FilteredView;

/// Start a filtered view directly from a slice.
pub trait WithFilterExt<T> {
    /// Same as [`crate::with_filter`] with `self` as the sequence.
    fn with_filter<P>(&self, predicate: P) -> FilteredView<'_, T, P>
    where
        P: Fn(&T) -> bool;
}

impl<T> WithFilterExt<T> for [T] {
    fn with_filter<P>(&self, predicate: P) -> FilteredView<'_, T, P>
    where
        P: Fn(&T) -> bool,
    {
        crate::with_filter(self, predicate)
    }
}
