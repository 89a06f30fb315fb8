// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Aho-Corasick automaton: the trie plus suffix links, for finding every
//! dictionary occurrence inside a text in one pass.
//!
//! Link construction is a breadth-first walk over the finished trie. Each
//! state gets a *suffix link* (the state spelling the longest proper
//! suffix of its path present in the trie, the root if none) and an
//! *accept-suffix link* pointing at the nearest accepting state down the
//! suffix-link chain. BFS order is what makes the computation well-founded:
//! a state's link only depends on links of strictly shallower states.
//!
//! Scanning advances one total transition per text symbol and reports the
//! labels of every pattern ending at that position by walking the
//! accept-suffix chain, so overlapping occurrences all surface.

use std::collections::VecDeque;

use crate::fsm::{Fsm, StateId};
use crate::levenshtein::CostModel;
use crate::sink::Sink;
use crate::trie::Trie;

/// Suffix bookkeeping for one state, parallel to the trie's state table.
#[derive(Debug, Clone, Copy)]
struct Links {
    /// State spelling the longest proper suffix of this state's path that
    /// is present in the trie. The root links to itself.
    suffix: StateId,
    /// Nearest accepting state along the suffix-link chain, if any.
    accept_suffix: Option<StateId>,
}

/// Trie with suffix links and an occurrence scan.
///
/// Exposes the full trie query surface, so a single structure serves exact,
/// prefix, fuzzy, and substring queries. Immutable after construction.
#[derive(Debug, Clone)]
pub struct AhoCorasick<S, V> {
    trie: Trie<S, V>,
    links: Vec<Links>,
}

impl<S: Ord + Clone, V> AhoCorasick<S, V> {
    /// Build the automaton from `(sequence, label)` pairs.
    ///
    /// Duplicate handling and label ordering follow [`Trie::new`]; link
    /// construction runs afterwards in one breadth-first pass.
    pub fn new<I, Q>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Q, V)>,
        Q: IntoIterator,
        Q::Item: Into<S>,
    {
        let trie = Trie::new(pairs);
        let links = Self::build_links(&trie);
        Self { trie, links }
    }

    /// Number of labeled sequences.
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    /// Whether the automaton holds no labeled sequence at all.
    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// The label table, in first-insertion order.
    pub fn values(&self) -> &[V] {
        self.trie.values()
    }

    /// Iterate the labels in first-insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.trie.iter()
    }

    /// See [`Trie::find`].
    pub fn find<Q>(&self, sequence: Q) -> Option<&V>
    where
        Q: IntoIterator,
        Q::Item: Into<S>,
    {
        self.trie.find(sequence)
    }

    /// See [`Trie::find_prefix`].
    pub fn find_prefix<Q>(&self, prefix: Q, out: &mut impl Sink<V>) -> usize
    where
        Q: IntoIterator,
        Q::Item: Into<S>,
        V: Clone,
    {
        self.trie.find_prefix(prefix, out)
    }

    /// See [`Trie::find_fuzzy`].
    pub fn find_fuzzy<M, Q>(&self, model: &M, query: Q, out: &mut impl Sink<(V, M::Cost)>) -> usize
    where
        M: CostModel<S>,
        Q: IntoIterator,
        Q::Item: Into<S>,
        V: Clone,
    {
        self.trie.find_fuzzy(model, query, out)
    }

    /// See [`Trie::find_levenshtein`].
    pub fn find_levenshtein<Q>(&self, query: Q, out: &mut impl Sink<(V, usize)>) -> usize
    where
        Q: IntoIterator,
        Q::Item: Into<S>,
        V: Clone,
    {
        self.trie.find_levenshtein(query, out)
    }

    /// See [`Trie::find_prefix_fuzzy`].
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
        self.trie.find_prefix_fuzzy(model, query, out)
    }

    /// Emit the label of every pattern occurrence inside `text`, counting
    /// overlapping occurrences separately.
    ///
    /// Matches ending at the same text position are grouped together,
    /// longest pattern first. Returns the number of labels written. Runs in
    /// `O(|text| + |emissions|)`.
    pub fn scan<Q>(&self, text: Q, out: &mut impl Sink<V>) -> usize
    where
        Q: IntoIterator,
        Q::Item: Into<S>,
        V: Clone,
    {
        let automaton = self.trie.automaton();
        let mut state = automaton.root();
        let mut emitted = 0;
        for symbol in text {
            let symbol = symbol.into();
            state = Self::follow_from(automaton, &self.links, state, &symbol);
            emitted += self.collect_matching(state, out);
        }
        emitted
    }

    /// Compute the suffix and accept-suffix links for every state of a
    /// finished trie.
    fn build_links(trie: &Trie<S, V>) -> Vec<Links> {
        let automaton = trie.automaton();
        let root = automaton.root();
        let mut links = vec![
            Links {
                suffix: root,
                accept_suffix: None,
            };
            trie.state_count()
        ];

        let mut queue = VecDeque::new();
        for (_, child) in automaton.transitions(root) {
            links[child as usize].suffix = root;
            queue.push_back(child);
        }

        while let Some(state) = queue.pop_front() {
            for (symbol, destination) in automaton.transitions(state) {
                // The whole suffix chain of `state` is strictly shallower
                // than `destination`, so its links are already final.
                let suffix =
                    Self::follow_from(automaton, &links, links[state as usize].suffix, symbol);
                links[destination as usize].suffix = suffix;
                links[destination as usize].accept_suffix = if trie.is_accept(suffix) {
                    Some(suffix)
                } else {
                    links[suffix as usize].accept_suffix
                };
                queue.push_back(destination);
            }
        }

        links
    }

    /// The total Aho-Corasick transition: follow the trie transition if it
    /// exists, otherwise retry from successive suffix links; at the root a
    /// missing transition stays at the root.
    fn follow_from(automaton: &Fsm<S>, links: &[Links], mut state: StateId, symbol: &S) -> StateId {
        while !automaton.is_root(state) {
            let (destination, found) = automaton.next(state, symbol);
            if found {
                return destination;
            }
            state = links[state as usize].suffix;
        }
        automaton.next(state, symbol).0
    }

    /// Emit the labels of every pattern ending at the current text
    /// position: the state's own label first, then down the accept-suffix
    /// chain from longest to shortest.
    fn collect_matching(&self, state: StateId, out: &mut impl Sink<V>) -> usize
    where
        V: Clone,
    {
        let mut emitted = 0;
        if let Some(value) = self.trie.value_of(state) {
            out.accept(value.clone());
            emitted += 1;
        }

        let mut current = self.links[state as usize].accept_suffix;
        while let Some(accept_state) = current {
            debug_assert!(self.trie.is_accept(accept_state));
            if let Some(value) = self.trie.value_of(accept_state) {
                out.accept(value.clone());
                emitted += 1;
            }
            current = self.links[accept_state as usize].accept_suffix;
        }
        emitted
    }
}

impl<S: Ord + Clone, V> Default for AhoCorasick<S, V> {
    fn default() -> Self {
        Self::new(std::iter::empty::<(Vec<S>, V)>())
    }
}
