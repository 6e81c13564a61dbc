//! Common test utilities and fixtures.
//!
//! Predicates here record how many times they were called, so tests can
//! assert on laziness and short-circuiting.

#![allow(dead_code)]

use proptest::prelude::*;
use std::cell::Cell;

/// A predicate that always answers `result` and counts its calls.
pub fn counting(calls: &Cell<usize>, result: bool) -> impl Fn(&i64) -> bool + '_ {
    move |_: &i64| {
        calls.set(calls.get() + 1);
        result
    }
}

/// Three fresh call counters.
pub fn counters() -> (Cell<usize>, Cell<usize>, Cell<usize>) {
    (Cell::new(0), Cell::new(0), Cell::new(0))
}

pub fn is_positive(x: &i64) -> bool {
    *x > 0
}

pub fn below_max(x: &i64) -> bool {
    *x < i64::MAX
}

/// Arbitrary integer sequences, including empty ones.
pub fn integers() -> impl Strategy<Value = Vec<i64>> {
    prop::collection::vec(any::<i64>(), 0..64)
}
