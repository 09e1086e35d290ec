//! Supplementary content loader: static text files rendered below the main
//! view for specific indicators, cached per path for the process lifetime.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads a text file to a string, or returns "" when the file is absent or
/// unreadable. The caller decides whether absence is worth a warning.
pub fn load_text(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_default()
}

/// Memoization map over `load_text`, keyed by path. No eviction.
#[derive(Default)]
pub struct ContentCache {
    entries: HashMap<PathBuf, String>,
}

impl ContentCache {
    pub fn get(&mut self, path: &Path) -> &str {
        self.entries
            .entry(path.to_path_buf())
            .or_insert_with(|| load_text(path))
    }
}
