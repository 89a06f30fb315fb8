//! Multi-pattern exact, prefix, fuzzy, and substring search over a finite
//! alphabet.
//!
//! A dictionary of labeled sequences is compiled once into a trie layered
//! on a transition-table automaton; four query families then run against
//! the immutable structure:
//!
//! | Query | Operation | Engine |
//! |-------|-----------|--------|
//! | membership | [`Trie::find`] | transition walk |
//! | prefix enumeration | [`Trie::find_prefix`] | reachable-values cache |
//! | approximate | [`Trie::find_fuzzy`], [`Trie::find_prefix_fuzzy`] | DFS + Wagner-Fischer rows |
//! | substring occurrences | [`AhoCorasick::scan`] | suffix links |
//!
//! [`AhoCorasick`] is a [`Trie`] extended with suffix links, so it answers
//! all four families; build the plain trie when the substring scan is not
//! needed. Symbols and labels are generic: `char` symbols with integer or
//! `String` labels are typical, but any ordered symbol type works.
//!
//! # Usage
//!
//! ```
//! use murex::{Levenshtein, Trie};
//!
//! let trie = Trie::<char, u32>::new(vec![
//!     ("lighthouse".chars(), 1),
//!     ("light".chars(), 2),
//! ]);
//! assert_eq!(trie.find("light".chars()), Some(&2));
//!
//! let mut close = Vec::new();
//! trie.find_fuzzy(&Levenshtein::bounded(1usize), "ligt".chars(), &mut close);
//! assert_eq!(close, vec![(2, 1)]);
//! ```
//!
//! Construction is single-threaded; afterwards the structure never
//! mutates, so queries are freely shareable across threads.

pub mod aho_corasick;
pub mod fsm;
pub mod levenshtein;
pub mod sink;
pub mod trie;

#[cfg(test)]
pub(crate) mod testing;

pub use aho_corasick::AhoCorasick;
pub use fsm::{Fsm, StateId};
pub use levenshtein::{Cost, CostModel, Levenshtein, WeightedLevenshtein};
pub use sink::{from_fn, Sink};
pub use trie::Trie;
