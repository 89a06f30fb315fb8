// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Configurable edit-cost models for fuzzy search.
//!
//! A fuzzy query is parameterized by a distance bound and two cost
//! functions: one for inserting *or* deleting a symbol (one function, not
//! two, since edit distance is symmetric and deleting from the query is
//! inserting into the candidate) and one for replacing a symbol with
//! another.
//!
//! [`Levenshtein`] is the classic unit-cost model. [`WeightedLevenshtein`]
//! accepts arbitrary cost closures and any numeric cost type, including
//! floating point, so a keyboard-adjacency table or phonetic weighting can
//! be plugged in without touching the traversal.

use std::ops::Add;

/// Numeric type usable as an edit distance.
///
/// Needs addition, comparison, and a zero (via `Default`). Integer and
/// floating-point types all qualify. The sum of penalties along a traversal
/// must stay within the type's range.
pub trait Cost: Copy + Default + PartialOrd + Add<Output = Self> {}

impl<T: Copy + Default + PartialOrd + Add<Output = T>> Cost for T {}

/// Edit-cost configuration consulted by the fuzzy traversal.
///
/// `replacement_cost(a, b)` must return zero when `a == b` under the
/// model's notion of equality; exact matches rely on it to come out at
/// distance zero.
pub trait CostModel<S> {
    /// The numeric distance type.
    type Cost: Cost;

    /// Candidates farther than this are pruned and never emitted.
    fn distance_limit(&self) -> Self::Cost;

    /// Cost of inserting `symbol` into (equivalently, deleting it from)
    /// the compared sequence.
    fn insertion_cost(&self, symbol: &S) -> Self::Cost;

    /// Cost of turning query symbol `a` into candidate symbol `b`.
    fn replacement_cost(&self, a: &S, b: &S) -> Self::Cost;
}

/// Unit-cost Levenshtein: every insertion, deletion, and substitution of
/// distinct symbols costs one.
#[derive(Debug, Clone, Copy)]
pub struct Levenshtein<C = usize> {
    limit: C,
}

impl<C> Levenshtein<C> {
    /// Unit costs with the given distance bound.
    pub fn bounded(limit: C) -> Self {
        Self { limit }
    }
}

impl Levenshtein<usize> {
    /// Unit costs with no effective distance bound.
    pub fn unbounded() -> Self {
        Self { limit: usize::MAX }
    }
}

impl<S: PartialEq, C: Cost + From<u8>> CostModel<S> for Levenshtein<C> {
    type Cost = C;

    fn distance_limit(&self) -> C {
        self.limit
    }

    fn insertion_cost(&self, _symbol: &S) -> C {
        C::from(1)
    }

    fn replacement_cost(&self, a: &S, b: &S) -> C {
        if a == b {
            C::default()
        } else {
            C::from(1)
        }
    }
}

/// Edit-cost model with caller-supplied insertion/deletion and replacement
/// weights.
#[derive(Debug, Clone, Copy)]
pub struct WeightedLevenshtein<C, I, R> {
    limit: C,
    insertion: I,
    replacement: R,
}

impl<C, I, R> WeightedLevenshtein<C, I, R> {
    /// A model charging `insertion(symbol)` per inserted or deleted symbol
    /// and `replacement(a, b)` per substitution.
    pub fn new(limit: C, insertion: I, replacement: R) -> Self {
        Self {
            limit,
            insertion,
            replacement,
        }
    }
}

impl<S, C, I, R> CostModel<S> for WeightedLevenshtein<C, I, R>
where
    C: Cost,
    I: Fn(&S) -> C,
    R: Fn(&S, &S) -> C,
{
    type Cost = C;

    fn distance_limit(&self) -> C {
        self.limit
    }

    fn insertion_cost(&self, symbol: &S) -> C {
        (self.insertion)(symbol)
    }

    fn replacement_cost(&self, a: &S, b: &S) -> C {
        (self.replacement)(a, b)
    }
}
