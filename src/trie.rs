// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Prefix tree over a transition-table automaton, with exact, prefix, and
//! fuzzy search.
//!
//! Construction takes `(sequence, label)` pairs. Each sequence spells a
//! path from the root; its terminal state records an index into the label
//! table. Duplicated sequences keep the label of their *first* occurrence.
//! Every state additionally caches the label indices of all accepting
//! states in its subtree, so prefix enumeration is linear in its output.
//!
//! Fuzzy search interleaves a depth-first walk of the tree with row-by-row
//! Wagner-Fischer dynamic programming: each pushed state carries the DP row
//! for its path, and a subtree is pruned as soon as every cell of the row
//! exceeds the distance bound. Costs are pluggable via [`CostModel`]; with
//! the default unit costs the rows are the textbook edit-distance table.

use std::cmp::Ordering;

use crate::fsm::{Fsm, StateId};
use crate::levenshtein::{CostModel, Levenshtein};
use crate::sink::Sink;

/// Per-state bookkeeping, kept parallel to the automaton's state ids.
#[derive(Debug, Clone, Default)]
struct StateData {
    /// Index into the value table when this state accepts a pattern.
    value_index: Option<usize>,
    /// Value-table indices of every accepting state in this state's
    /// subtree, itself included. Filled during construction.
    reachable: Vec<usize>,
}

/// Trie of labeled symbol sequences.
///
/// Immutable after construction; all queries are read-only, so concurrent
/// readers need no synchronization.
#[derive(Debug, Clone)]
pub struct Trie<S, V> {
    automaton: Fsm<S>,
    states: Vec<StateData>,
    values: Vec<V>,
}

impl<S: Ord + Clone, V> Trie<S, V> {
    /// Build a trie from `(sequence, label)` pairs.
    ///
    /// Sequence elements are converted into the symbol type. A sequence
    /// appearing more than once keeps the label of its first occurrence;
    /// later labels are dropped.
    pub fn new<I, Q>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Q, V)>,
        Q: IntoIterator,
        Q::Item: Into<S>,
    {
        let mut trie = Self {
            automaton: Fsm::new(),
            states: vec![StateData::default()],
            values: Vec::new(),
        };
        for (sequence, label) in pairs {
            let sequence: Vec<S> = sequence.into_iter().map(Into::into).collect();
            trie.insert(&sequence, label);
        }
        debug_assert_eq!(trie.states.len(), trie.automaton.len());
        trie
    }

    /// Number of labeled sequences.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the trie holds no labeled sequence at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The label table, in first-insertion order.
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Iterate the labels in first-insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.values.iter()
    }

    /// Look up a sequence, returning its label if the exact sequence was
    /// inserted.
    ///
    /// Runs in `O(|sequence|)`.
    pub fn find<Q>(&self, sequence: Q) -> Option<&V>
    where
        Q: IntoIterator,
        Q::Item: Into<S>,
    {
        let mut state = self.automaton.root();
        for symbol in sequence {
            let symbol = symbol.into();
            let (next, found) = self.automaton.next(state, &symbol);
            if !found {
                return None;
            }
            state = next;
        }
        self.value_of(state)
    }

    /// Emit the label of every inserted sequence that starts with `prefix`
    /// (equality included).
    ///
    /// Returns the number of labels written. Runs in
    /// `O(|prefix| + |output|)` thanks to the per-state reachable cache.
    pub fn find_prefix<Q>(&self, prefix: Q, out: &mut impl Sink<V>) -> usize
    where
        Q: IntoIterator,
        Q::Item: Into<S>,
        V: Clone,
    {
        let mut state = self.automaton.root();
        for symbol in prefix {
            let symbol = symbol.into();
            let (next, found) = self.automaton.next(state, &symbol);
            if !found {
                return 0;
            }
            state = next;
        }
        self.collect_reachable(state, out)
    }

    /// Emit `(label, distance)` for every inserted sequence within
    /// `model.distance_limit()` of `query` under the model's edit costs.
    ///
    /// Returns the number of pairs written. Emission order follows the
    /// depth-first traversal and is unspecified; sort if you need
    /// determinism across the output.
    pub fn find_fuzzy<M, Q>(&self, model: &M, query: Q, out: &mut impl Sink<(V, M::Cost)>) -> usize
    where
        M: CostModel<S>,
        Q: IntoIterator,
        Q::Item: Into<S>,
        V: Clone,
    {
        let query: Vec<S> = query.into_iter().map(Into::into).collect();
        let mut emitted = 0;
        self.visit_close_states(model, &query, |state, distance| {
            if let Some(value) = self.value_of(state) {
                out.accept((value.clone(), distance));
                emitted += 1;
            }
        });
        emitted
    }

    /// [`find_fuzzy`](Self::find_fuzzy) with unit costs and no distance
    /// bound: every inserted sequence is emitted with its plain Levenshtein
    /// distance to `query`.
    pub fn find_levenshtein<Q>(&self, query: Q, out: &mut impl Sink<(V, usize)>) -> usize
    where
        Q: IntoIterator,
        Q::Item: Into<S>,
        V: Clone,
    {
        self.find_fuzzy(&Levenshtein::unbounded(), query, out)
    }

    /// Emit `(label, distance)` for every inserted sequence that has *some
    /// prefix* within `model.distance_limit()` of `query`.
    ///
    /// The same label is usually reachable through several prefixes at
    /// different distances; the output carries each label exactly once,
    /// with the smallest such distance, ordered by label.
    pub fn find_prefix_fuzzy<M, Q>(
        &self,
        model: &M,
        query: Q,
        out: &mut impl Sink<(V, M::Cost)>,
    ) -> usize
    where
        M: CostModel<S>,
        Q: IntoIterator,
        Q::Item: Into<S>,
        V: Clone + Ord,
    {
        let query: Vec<S> = query.into_iter().map(Into::into).collect();
        let mut results: Vec<(V, M::Cost)> = Vec::new();
        self.visit_close_states(model, &query, |state, distance| {
            for &value_index in &self.states[state as usize].reachable {
                results.push((self.values[value_index].clone(), distance));
            }
        });

        // Lexicographic sort puts the smallest distance first within each
        // label, so keeping the first of each run retains the minimum.
        // Costs may be floats; incomparable pairs compare equal.
        results.sort_by(|l, r| {
            l.0.cmp(&r.0)
                .then_with(|| l.1.partial_cmp(&r.1).unwrap_or(Ordering::Equal))
        });
        results.dedup_by(|l, r| l.0 == r.0);

        let emitted = results.len();
        for pair in results {
            out.accept(pair);
        }
        emitted
    }

    /// Insert one sequence, wiring up the label and reachable caches.
    fn insert(&mut self, sequence: &[S], label: V) {
        let mut state = self.automaton.root();
        for symbol in sequence {
            let (next, created) = self.automaton.add_transition(state, symbol.clone());
            if created {
                self.states.push(StateData::default());
            }
            state = next;
        }

        // First pattern ending at this state wins; a duplicate keeps the
        // earlier label and leaves the caches untouched.
        if self.states[state as usize].value_index.is_some() {
            return;
        }
        let value_index = self.values.len();
        self.values.push(label);
        self.states[state as usize].value_index = Some(value_index);

        // Record the fresh label at every state on the path, terminal
        // included.
        let mut on_path = self.automaton.root();
        self.states[on_path as usize].reachable.push(value_index);
        for symbol in sequence {
            let (next, found) = self.automaton.next(on_path, symbol);
            debug_assert!(found);
            on_path = next;
            self.states[on_path as usize].reachable.push(value_index);
        }
    }

    /// Depth-first traversal of all states whose path stays within the
    /// model's distance bound of `query`, invoking `visit` with each
    /// qualifying state and the exact distance of its path.
    ///
    /// Each stack entry carries the Wagner-Fischer row of its path: cell
    /// `i` is the edit distance between the path and the first `i` query
    /// symbols, so the last cell is the distance to the whole query. A
    /// subtree is abandoned once every cell exceeds the bound: child rows
    /// are minima over these cells plus non-negative costs, so nothing
    /// below can come back under it.
    fn visit_close_states<M>(&self, model: &M, query: &[S], mut visit: impl FnMut(StateId, M::Cost))
    where
        M: CostModel<S>,
    {
        let limit = model.distance_limit();

        let mut initial_row = Vec::with_capacity(query.len() + 1);
        initial_row.push(M::Cost::default());
        for (i, symbol) in query.iter().enumerate() {
            let cost = initial_row[i] + model.insertion_cost(symbol);
            initial_row.push(cost);
        }

        let mut stack = vec![(self.automaton.root(), initial_row)];
        while let Some((state, row)) = stack.pop() {
            let distance = row[query.len()];
            if distance <= limit {
                visit(state, distance);
            }

            if !row.iter().any(|cell| *cell <= limit) {
                continue;
            }
            for (symbol, destination) in self.automaton.transitions(state) {
                stack.push((destination, fill_row(model, &row, symbol, query)));
            }
        }
    }

    /// Emit clones of every label reachable from `state`.
    fn collect_reachable(&self, state: StateId, out: &mut impl Sink<V>) -> usize
    where
        V: Clone,
    {
        let reachable = &self.states[state as usize].reachable;
        for &value_index in reachable {
            out.accept(self.values[value_index].clone());
        }
        reachable.len()
    }

    pub(crate) fn automaton(&self) -> &Fsm<S> {
        &self.automaton
    }

    pub(crate) fn state_count(&self) -> usize {
        self.states.len()
    }

    pub(crate) fn is_accept(&self, state: StateId) -> bool {
        self.states[state as usize].value_index.is_some()
    }

    pub(crate) fn value_of(&self, state: StateId) -> Option<&V> {
        self.states[state as usize]
            .value_index
            .map(|value_index| &self.values[value_index])
    }
}

impl<S: Ord + Clone, V> Default for Trie<S, V> {
    fn default() -> Self {
        Self::new(std::iter::empty::<(Vec<S>, V)>())
    }
}

/// Compute the Wagner-Fischer row of a path extended by `symbol` from the
/// row of its parent path.
///
/// Cell `i` minimizes over deleting `query[i - 1]`, inserting `symbol`,
/// and replacing `query[i - 1]` with `symbol`.
fn fill_row<S, M>(model: &M, row: &[M::Cost], symbol: &S, query: &[S]) -> Vec<M::Cost>
where
    M: CostModel<S>,
{
    let mut next = Vec::with_capacity(row.len());
    next.push(row[0] + model.insertion_cost(symbol));
    for (i, value) in query.iter().enumerate() {
        let deletion = next[i] + model.insertion_cost(value);
        let insertion = row[i + 1] + model.insertion_cost(symbol);
        let replacement = row[i] + model.replacement_cost(value, symbol);
        next.push(min3(deletion, insertion, replacement));
    }
    next
}

fn min3<C: PartialOrd>(a: C, b: C, c: C) -> C {
    let ab = if b < a { b } else { a };
    if c < ab {
        c
    } else {
        ab
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levenshtein::WeightedLevenshtein;
    use crate::testing::char_pairs;

    fn sorted<T: Ord>(mut items: Vec<T>) -> Vec<T> {
        items.sort();
        items
    }

    #[test]
    fn test_default_trie_is_empty() {
        let trie = Trie::<char, i32>::default();
        assert!(trie.is_empty());
        assert_eq!(trie.len(), 0);
    }

    #[test]
    fn test_len_counts_distinct_sequences() {
        let trie = Trie::<char, i32>::new(char_pairs(&[
            ("qwerty", 1),
            ("asdfgh", 2),
            ("qwe", 3),
            ("rty", 4),
        ]));
        assert!(!trie.is_empty());
        assert_eq!(trie.len(), 4);
    }

    #[test]
    fn test_duplicate_sequences_are_not_counted() {
        let trie = Trie::<char, i32>::new(char_pairs(&[
            ("qwerty", 1),
            ("qwerty", 2),
            ("qwe", 3),
            ("qwe", 4),
        ]));
        assert_eq!(trie.len(), 2);
    }

    #[test]
    fn test_find_returns_the_attached_label() {
        let trie = Trie::<char, i16>::new(char_pairs(&[
            ("qwerty", 1),
            ("asdfgh", 2),
            ("qwe", 3),
            ("rty", 4),
        ]));

        assert_eq!(trie.find("qwerty".chars()), Some(&1));
        assert_eq!(trie.find("asdfgh".chars()), Some(&2));
        assert_eq!(trie.find("qwe".chars()), Some(&3));
        assert_eq!(trie.find("rty".chars()), Some(&4));
    }

    #[test]
    fn test_first_occurrence_wins_for_duplicates() {
        let trie = Trie::<char, i32>::new(char_pairs(&[
            ("qwerty", 11),
            ("qwerty", 22),
            ("qwe", 33),
            ("qwe", 44),
        ]));

        assert_eq!(trie.find("qwerty".chars()), Some(&11));
        assert_eq!(trie.find("qwe".chars()), Some(&33));
    }

    #[test]
    fn test_find_misses_sequences_never_inserted() {
        let trie = Trie::<char, i16>::new(char_pairs(&[
            ("qwerty", 1),
            ("asdfgh", 2),
            ("qwe", 3),
            ("rty", 4),
        ]));

        assert_eq!(trie.find("qwert".chars()), None);
        assert_eq!(trie.find("aadfgh".chars()), None);
        assert_eq!(trie.find("we".chars()), None);
        assert_eq!(trie.find("y".chars()), None);
    }

    #[test]
    fn test_find_is_insertion_order_independent() {
        let orders: [&[(&str, i16)]; 3] = [
            &[("qwerty", 1), ("qwe", 3), ("rty", 4)],
            &[("qwe", 3), ("qwerty", 1), ("rty", 4)],
            &[("rty", 4), ("qwe", 3), ("qwerty", 1)],
        ];
        for entries in orders {
            let trie = Trie::<char, i16>::new(char_pairs(entries));
            assert_eq!(trie.find("qwerty".chars()), Some(&1));
            assert_eq!(trie.find("qwe".chars()), Some(&3));
            assert_eq!(trie.find("rty".chars()), Some(&4));
        }
    }

    #[test]
    fn test_empty_sequence_is_found_only_when_inserted() {
        let without: Trie<char, i32> = Trie::new(char_pairs(&[("abc", 1)]));
        assert_eq!(without.find("".chars()), None);

        let with: Trie<char, i32> = Trie::new(char_pairs(&[("", 7), ("abc", 1)]));
        assert_eq!(with.find("".chars()), Some(&7));
    }

    #[test]
    fn test_values_preserve_first_insertion_order() {
        let trie = Trie::<char, i32>::new(char_pairs(&[
            ("bb", 1),
            ("aa", 2),
            ("bb", 3),
            ("cc", 4),
        ]));
        assert_eq!(trie.values(), &[1, 2, 4]);
        assert_eq!(trie.iter().copied().collect::<Vec<_>>(), vec![1, 2, 4]);
    }

    #[test]
    fn test_find_levenshtein_reports_exact_distances() {
        let trie = Trie::<char, u64>::new(char_pairs(&[
            ("abcdef", 1),
            ("abcabc", 2),
            ("bcdefg", 3),
        ]));

        let mut matched = Vec::new();
        trie.find_levenshtein("abcdef".chars(), &mut matched);

        assert_eq!(sorted(matched), vec![(1, 0), (2, 3), (3, 2)]);
    }

    #[test]
    fn test_find_levenshtein_reaches_fully_mismatched_words() {
        let trie = Trie::<char, i64>::new(char_pairs(&[("abcd", 1), ("qwerty", 2)]));

        let mut matched = Vec::new();
        trie.find_levenshtein("bcd".chars(), &mut matched);

        assert_eq!(sorted(matched), vec![(1, 1), (2, 6)]);
    }

    #[test]
    fn test_distance_limit_filters_distant_words() {
        let trie = Trie::<char, i64>::new(char_pairs(&[("abcd", 1), ("qwerty", 2)]));

        let mut matched = Vec::new();
        trie.find_fuzzy(&Levenshtein::bounded(1usize), "bcd".chars(), &mut matched);

        assert_eq!(sorted(matched), vec![(1, 1)]);
    }

    #[test]
    fn test_distance_limit_may_be_fractional() {
        let trie = Trie::<char, i64>::new(char_pairs(&[("abcd", 1), ("aaad", 2)]));

        let mut matched = Vec::new();
        trie.find_fuzzy(&Levenshtein::bounded(2.5f64), "bd".chars(), &mut matched);

        assert_eq!(matched, vec![(1, 2.0)]);
    }

    #[test]
    fn test_free_replacement_matches_equal_length_words() {
        let trie = Trie::<char, i64>::new(char_pairs(&[
            ("asdfg", 1),
            ("zxcvb", 2),
            ("qwerty", 3),
        ]));

        // Insertions are prohibitively expensive but substitution is free,
        // so exactly the equal-length words come out at distance zero.
        let model = WeightedLevenshtein::new(1, |_: &char| 100_500, |_: &char, _: &char| 0);
        let mut matched = Vec::new();
        trie.find_fuzzy(&model, "qwert".chars(), &mut matched);

        assert_eq!(sorted(matched), vec![(1, 0), (2, 0)]);
    }

    #[test]
    fn test_expensive_replacement_falls_back_to_edits() {
        let trie = Trie::<char, i64>::new(char_pairs(&[("asdfg", 1)]));

        let model = WeightedLevenshtein::new(
            100_500,
            |_: &char| 10,
            |a: &char, b: &char| if a == b { 0 } else { 100_500 },
        );
        let mut matched = Vec::new();
        trie.find_fuzzy(&model, "123456".chars(), &mut matched);

        // Five deletions plus six insertions beat any substitution.
        assert_eq!(matched, vec![(1, 10 * 5 + 10 * 6)]);
    }

    #[test]
    fn test_find_prefix_collects_the_whole_subtree() {
        let trie = Trie::<char, i64>::new(char_pairs(&[
            ("abcdef", 1),
            ("abcabc", 2),
            ("abc", 6),
            ("ab", 7),
            ("bcdefg", 3),
            ("abdefg", 4),
        ]));

        let mut found = Vec::new();
        let written = trie.find_prefix("abc".chars(), &mut found);

        assert_eq!(written, 3);
        assert_eq!(sorted(found), vec![1, 2, 6]);
    }

    #[test]
    fn test_find_prefix_emits_nothing_for_missing_prefix() {
        let trie = Trie::<char, i64>::new(char_pairs(&[("abcdef", 1), ("abcabc", 2)]));

        let mut found = Vec::new();
        let written = trie.find_prefix("qwer".chars(), &mut found);

        assert_eq!(written, 0);
        assert!(found.is_empty());
    }

    #[test]
    fn test_empty_prefix_enumerates_everything() {
        let trie = Trie::<char, i64>::new(char_pairs(&[("ab", 1), ("cd", 2)]));

        let mut found = Vec::new();
        trie.find_prefix("".chars(), &mut found);

        assert_eq!(sorted(found), vec![1, 2]);
    }

    #[test]
    fn test_find_prefix_fuzzy_deduplicates_labels() {
        let trie = Trie::<char, i64>::new(char_pairs(&[
            // The query is a prefix of the whole word.
            ("abc", 11),
            ("abcdef", 21),
            ("abcabc", 22),
            ("abcdeh", 23),
            ("abcdefg", 24),
            // A prefix matches after one insertion or deletion.
            ("ab", 31),
            ("abdef", 32),
            ("ac", 41),
            ("acfgh", 42),
            ("bc", 51),
            ("bczxcg", 52),
            // A prefix matches after one substitution.
            ("Xbc", 61),
            ("Xbcdef", 62),
            ("aXc", 71),
            ("aXcdef", 72),
            ("abX", 81),
            ("abXdef", 82),
            // No prefix comes close.
            ("aXY", 91),
            ("aXYdef", 92),
            ("XbY", 101),
            ("XbYdef", 102),
            ("XYc", 111),
            ("XYcdef", 112),
            ("qwerty", 121),
        ]));

        let mut matched = Vec::new();
        trie.find_prefix_fuzzy(&Levenshtein::bounded(1usize), "abc".chars(), &mut matched);

        let expected = vec![
            (11, 0),
            (21, 0),
            (22, 0),
            (23, 0),
            (24, 0),
            (31, 1),
            (32, 1),
            (41, 1),
            (42, 1),
            (51, 1),
            (52, 1),
            (61, 1),
            (62, 1),
            (71, 1),
            (72, 1),
            (81, 1),
            (82, 1),
        ];
        assert_eq!(matched, expected);
    }

    #[test]
    fn test_fuzzy_emission_is_idempotent() {
        let trie = Trie::<char, i64>::new(char_pairs(&[("abcd", 1), ("abdc", 2), ("dcba", 3)]));

        let run = || {
            let mut matched = Vec::new();
            trie.find_fuzzy(&Levenshtein::bounded(2usize), "abcd".chars(), &mut matched);
            sorted(matched)
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_fuzzy_sink_may_be_a_closure() {
        let trie = Trie::<char, i32>::new(char_pairs(&[("abc", 5)]));

        let mut total = 0;
        let written = trie.find_fuzzy(
            &Levenshtein::bounded(0usize),
            "abc".chars(),
            &mut crate::sink::from_fn(|(label, _distance): (i32, usize)| total += label),
        );

        assert_eq!(written, 1);
        assert_eq!(total, 5);
    }
}
