// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Shared fixtures for unit tests.

/// Convert a `(word, label)` table into the `(Vec<char>, label)` pairs the
/// builders consume.
pub(crate) fn char_pairs<V: Copy>(entries: &[(&str, V)]) -> Vec<(Vec<char>, V)> {
    entries
        .iter()
        .map(|&(word, label)| (word.chars().collect(), label))
        .collect()
}
