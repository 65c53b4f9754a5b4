//! Command-line or API options for the matrix shell.
//!
//! This module provides the `ShellOptions` struct, which names the two input
//! matrix files and the directory the shell writes its results into. The
//! defaults are relative to the working directory.

use std::path::PathBuf;

pub const DEFAULT_FIRST: &str = "../../sample_inputs/easy_sample_01_2.txt";
pub const DEFAULT_SECOND: &str = "../../sample_inputs/easy_sample_01_3.txt";
pub const DEFAULT_RESULTS_DIR: &str = "../../results";

/// Input files & output location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellOptions {
    /// Left operand file
    pub first: PathBuf,

    /// Right operand file
    pub second: PathBuf,

    /// Directory receiving `*_result.txt` files; created on demand
    pub results_dir: PathBuf,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            first: PathBuf::from(DEFAULT_FIRST),
            second: PathBuf::from(DEFAULT_SECOND),
            results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
        }
    }
}

impl ShellOptions {
    /// Replace a path with its default when the given string is blank.
    pub fn with_inputs(first: &str, second: &str) -> Self {
        let mut opts = Self::default();
        if !first.trim().is_empty() {
            opts.first = PathBuf::from(first.trim());
        }
        if !second.trim().is_empty() {
            opts.second = PathBuf::from(second.trim());
        }
        opts
    }
}
