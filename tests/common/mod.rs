//! Shared test utilities and fixtures.

#![allow(dead_code)]

/// Convert a `(word, label)` table into the `(Vec<char>, label)` pairs the
/// builders consume.
pub fn char_pairs<V: Copy>(entries: &[(&str, V)]) -> Vec<(Vec<char>, V)> {
    entries
        .iter()
        .map(|&(word, label)| (word.chars().collect(), label))
        .collect()
}

/// Sort a result vector so multisets can be compared.
pub fn sorted<T: Ord>(mut items: Vec<T>) -> Vec<T> {
    items.sort();
    items
}

/// The four-entry keyboard-row dictionary used across scenarios.
pub fn keyboard_rows() -> Vec<(Vec<char>, i32)> {
    char_pairs(&[("qwerty", 1), ("asdfgh", 2), ("qwe", 3), ("rty", 4)])
}

/// Plain Wagner-Fischer edit distance between two char sequences, used as
/// the reference oracle for the fuzzy engine.
pub fn reference_levenshtein(a: &[char], b: &[char]) -> usize {
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, &ca) in a.iter().enumerate() {
        let mut diagonal = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let replaced = diagonal + usize::from(ca != cb);
            diagonal = row[j + 1];
            row[j + 1] = replaced.min(row[j] + 1).min(row[j + 1] + 1);
        }
    }
    row[b.len()]
}

/// Count (possibly overlapping) occurrences of `pattern` in `text`.
pub fn count_occurrences(text: &[char], pattern: &[char]) -> usize {
    if pattern.is_empty() || pattern.len() > text.len() {
        return 0;
    }
    text.windows(pattern.len())
        .filter(|window| *window == pattern)
        .count()
}
