// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the murex command-line interface.
//!
//! Three subcommands: `suggest` corrects a word against a dictionary,
//! `rank` scores dictionary lines against a multi-word query, and `scan`
//! counts pattern occurrences in a text. Every subcommand can emit its
//! report as JSON instead of the human-readable table.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "murex",
    about = "Dictionary-backed exact, fuzzy, and substring search",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Suggest dictionary words close to a (possibly misspelled) word
    Suggest {
        /// Word list, one entry per line
        dict: String,

        /// Word to correct
        word: String,

        /// Maximum number of suggestions
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Edit-distance bound for candidate prefixes
        #[arg(short, long, default_value = "1")]
        distance: usize,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rank dictionary lines against a multi-word query
    Rank {
        /// Line-per-document file; lines are split on whitespace into words
        dict: String,

        /// Query; words are matched fuzzily and scores aggregated per line
        query: String,

        /// Maximum number of lines to report
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Edit-distance bound for candidate prefixes
        #[arg(short, long, default_value = "1")]
        distance: usize,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count pattern occurrences in a text
    Scan {
        /// Pattern list, one per line
        patterns: String,

        /// Text file to scan
        text: String,

        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}
