// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Murex CLI: spell suggestion, line ranking, and occurrence counting over
//! plain-text dictionaries.
//!
//! ```bash
//! # Suggest corrections for a misspelled word
//! murex suggest words.txt reciept
//!
//! # Rank catalog lines against a free-form query
//! murex rank catalog.txt "wireles keybord" --limit 5
//!
//! # Count pattern occurrences in a document
//! murex scan patterns.txt document.txt --json
//! ```
//!
//! Every subcommand is a thin collaborator over the library's query
//! operations: indexes are built once, queries never mutate them.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::process;
use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use murex::{AhoCorasick, Levenshtein, Trie};

mod cli;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Suggest {
            dict,
            word,
            limit,
            distance,
            json,
        } => run_suggest(&dict, &word, limit, distance, json),
        Commands::Rank {
            dict,
            query,
            limit,
            distance,
            json,
        } => run_rank(&dict, &query, limit, distance, json),
        Commands::Scan {
            patterns,
            text,
            json,
        } => run_scan(&patterns, &text, json),
    };

    if let Err(e) = outcome {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

/// One spell-suggestion candidate with its ranking components.
#[derive(Debug, Serialize)]
struct Suggestion {
    word: String,
    distance: f64,
    distance_weight: f64,
    position_weight: f64,
    exact: bool,
}

/// One ranked dictionary line.
#[derive(Debug, Serialize)]
struct RankedLine {
    line: String,
    score: f64,
    exact_matches: usize,
}

/// Occurrence count for one pattern.
#[derive(Debug, Serialize)]
struct Occurrences {
    pattern: String,
    count: usize,
}

fn run_suggest(dict: &str, word: &str, limit: usize, distance: usize, json: bool) -> io::Result<()> {
    let words = read_lines(dict)?;

    let bar = spinner("Indexing dictionary...");
    let build_start = Instant::now();
    let trie: Trie<char, usize> =
        Trie::new(words.iter().enumerate().map(|(id, entry)| (entry.chars(), id)));
    bar.finish_with_message(format!(
        "Indexed {} words in {:.2?}",
        trie.len(),
        build_start.elapsed()
    ));

    let query: Vec<char> = word.chars().collect();
    let query_start = Instant::now();

    let mut candidates = Vec::new();
    trie.find_prefix_fuzzy(
        &Levenshtein::bounded(distance as f64),
        query.iter().copied(),
        &mut candidates,
    );
    let found = candidates.len();

    let mut suggestions: Vec<Suggestion> = candidates
        .into_iter()
        .map(|(word_id, d)| weigh(&query, &words[word_id], d))
        .collect();
    suggestions.sort_by(compare_suggestions);
    suggestions.truncate(limit);
    let query_time = query_start.elapsed();

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else {
        for s in &suggestions {
            println!(
                "  {:>5.2}  {:>5.2}  {}  {}",
                s.distance_weight,
                s.position_weight,
                if s.exact { "*" } else { " " },
                s.word
            );
        }
        println!("  ----");
        println!("  {} candidates, {} shown, {:.2?}", found, suggestions.len(), query_time);
    }
    Ok(())
}

fn run_rank(dict: &str, query: &str, limit: usize, distance: usize, json: bool) -> io::Result<()> {
    let lines = read_lines(dict)?;

    let bar = spinner("Indexing lines...");
    let build_start = Instant::now();

    // Word vocabulary plus an inverted word-id → line-ids mapping.
    let mut word_ids: HashMap<&str, usize> = HashMap::new();
    let mut words: Vec<&str> = Vec::new();
    let mut lines_of_word: Vec<Vec<usize>> = Vec::new();
    for (line_id, line) in lines.iter().enumerate() {
        for word in line.split_whitespace() {
            let id = *word_ids.entry(word).or_insert_with(|| {
                words.push(word);
                lines_of_word.push(Vec::new());
                words.len() - 1
            });
            if lines_of_word[id].last() != Some(&line_id) {
                lines_of_word[id].push(line_id);
            }
        }
    }

    let automaton: AhoCorasick<char, usize> =
        AhoCorasick::new(words.iter().enumerate().map(|(id, word)| (word.chars(), id)));
    bar.finish_with_message(format!(
        "Indexed {} words from {} lines in {:.2?}",
        automaton.len(),
        lines.len(),
        build_start.elapsed()
    ));

    let query_start = Instant::now();
    let query_words: Vec<Vec<char>> = query
        .split_whitespace()
        .map(|word| word.chars().collect())
        .collect();

    // The automaton is immutable, so per-query-word searches fan out
    // across threads without synchronization.
    let per_word: Vec<HashMap<usize, (f64, bool)>> = query_words
        .par_iter()
        .map(|query_word| {
            let mut candidates = Vec::new();
            automaton.find_prefix_fuzzy(
                &Levenshtein::bounded(distance as f64),
                query_word.iter().copied(),
                &mut candidates,
            );

            // Best weight per line for this query word.
            let mut best: HashMap<usize, (f64, bool)> = HashMap::new();
            for (word_id, d) in candidates {
                let suggestion = weigh(query_word, words[word_id], d);
                let weight = suggestion.distance_weight * suggestion.position_weight;
                for &line_id in &lines_of_word[word_id] {
                    let entry = best.entry(line_id).or_insert((f64::NEG_INFINITY, false));
                    if weight > entry.0 {
                        *entry = (weight, suggestion.exact);
                    }
                }
            }
            best
        })
        .collect();

    let mut totals: HashMap<usize, (f64, usize)> = HashMap::new();
    for word_scores in per_word {
        for (line_id, (weight, exact)) in word_scores {
            let entry = totals.entry(line_id).or_insert((0.0, 0));
            entry.0 += weight;
            entry.1 += usize::from(exact);
        }
    }

    let mut ranked: Vec<RankedLine> = totals
        .into_iter()
        .map(|(line_id, (score, exact_matches))| RankedLine {
            line: lines[line_id].clone(),
            score,
            exact_matches,
        })
        .collect();
    ranked.sort_by(compare_ranked);
    let found = ranked.len();
    ranked.truncate(limit);
    let query_time = query_start.elapsed();

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        for entry in &ranked {
            println!("  {:>5.2}  {:>2}  {}", entry.score, entry.exact_matches, entry.line);
        }
        println!("  ----");
        println!("  {} lines matched, {} shown, {:.2?}", found, ranked.len(), query_time);
    }
    Ok(())
}

fn run_scan(patterns_path: &str, text_path: &str, json: bool) -> io::Result<()> {
    let mut seen = HashSet::new();
    let patterns: Vec<String> = read_lines(patterns_path)?
        .into_iter()
        .filter(|pattern| seen.insert(pattern.clone()))
        .collect();
    let text = fs::read_to_string(text_path)?;

    let bar = spinner("Building automaton...");
    let build_start = Instant::now();
    let automaton: AhoCorasick<char, usize> = AhoCorasick::new(
        patterns
            .iter()
            .enumerate()
            .map(|(id, pattern)| (pattern.chars(), id)),
    );
    bar.finish_with_message(format!(
        "Automaton over {} patterns in {:.2?}",
        automaton.len(),
        build_start.elapsed()
    ));

    let scan_start = Instant::now();
    let mut counts = vec![0usize; patterns.len()];
    let emitted = automaton.scan(
        text.chars(),
        &mut murex::sink::from_fn(|word_id: usize| counts[word_id] += 1),
    );
    let scan_time = scan_start.elapsed();

    let mut report: Vec<Occurrences> = patterns
        .into_iter()
        .zip(counts)
        .map(|(pattern, count)| Occurrences { pattern, count })
        .collect();
    report.sort_by(|l, r| r.count.cmp(&l.count).then_with(|| l.pattern.cmp(&r.pattern)));

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for entry in &report {
            println!("  {:>8}  {}", entry.count, entry.pattern);
        }
        println!("  ----");
        println!("  {} occurrences, {:.2?}", emitted, scan_time);
    }
    Ok(())
}

/// Score one candidate against the query word.
///
/// `distance_weight` rewards closer words, `position_weight` rewards a
/// longer shared prefix: a typo late in the word is more forgivable than
/// one in the first letter.
fn weigh(query: &[char], word: &str, distance: f64) -> Suggestion {
    let word_chars: Vec<char> = word.chars().collect();
    let query_len = query.len() as f64;

    let distance_weight = (query_len - distance) / query_len;
    let matching = query
        .iter()
        .zip(word_chars.iter())
        .take_while(|(q, w)| q == w)
        .count();
    let position_weight = (matching as f64 + 1.0) / (query_len + 1.0);
    let exact = query == word_chars.as_slice();

    Suggestion {
        word: word.to_string(),
        distance,
        distance_weight,
        position_weight,
        exact,
    }
}

fn compare_suggestions(l: &Suggestion, r: &Suggestion) -> Ordering {
    r.distance_weight
        .partial_cmp(&l.distance_weight)
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            r.position_weight
                .partial_cmp(&l.position_weight)
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| r.exact.cmp(&l.exact))
        .then_with(|| l.word.cmp(&r.word))
}

fn compare_ranked(l: &RankedLine, r: &RankedLine) -> Ordering {
    r.score
        .partial_cmp(&l.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| r.exact_matches.cmp(&l.exact_matches))
        .then_with(|| l.line.cmp(&r.line))
}

/// Read a dictionary file: one entry per line, blank lines skipped.
fn read_lines(path: &str) -> io::Result<Vec<String>> {
    Ok(fs::read_to_string(path)?
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(std::time::Duration::from_millis(80));
    bar
}
