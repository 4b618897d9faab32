//! Collision avoidance for archive paths.

use std::collections::{HashMap, HashSet};

/// Hands out archive paths, renaming later duplicates to `stem_1.ext`,
/// `stem_2.ext`, ...
///
/// Counters are kept per natural path, so a run of identical names costs
/// one probe each instead of rescanning from `_1`.
#[derive(Debug, Default)]
pub struct UniquePaths {
    taken: HashSet<String>,
    counters: HashMap<String, usize>,
}

impl UniquePaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `path`. Returns the path actually reserved and whether it had
    /// to be changed.
    pub fn claim(&mut self, path: &str) -> (String, bool) {
        if self.taken.insert(path.to_string()) {
            return (path.to_string(), false);
        }

        let (parent, leaf) = match path.rfind('/') {
            Some(idx) => (&path[..=idx], &path[idx + 1..]),
            None => ("", path),
        };
        let (stem, extension) = match leaf.rfind('.') {
            Some(idx) if idx > 0 => (&leaf[..idx], &leaf[idx..]),
            _ => (leaf, ""),
        };

        let counter = self.counters.entry(path.to_string()).or_insert(1);
        loop {
            let candidate = format!("{}{}_{}{}", parent, stem, counter, extension);
            *counter += 1;
            if self.taken.insert(candidate.clone()) {
                return (candidate, true);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.taken.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}
