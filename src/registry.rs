//! The extension registry (`spec.md` §4.2): a mutable set of
//! (extension, major, minor) entries with idempotent insertion that
//! transitively pulls in declared dependencies at the selected
//! version.

use crate::tables::extensions::{find_row, ExtId};
use std::collections::BTreeMap;

/// At most one entry per (ext, major): the stored minor is the
/// highest minor ever added for that pair.
#[derive(Debug, Clone, Default)]
pub struct ExtensionRegistry {
    entries: BTreeMap<(ExtId, u16), u16>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure (ext, major, minor) is present, raising an existing
    /// entry's minor if needed, and recursively resolving the
    /// dependencies of every intermediate minor level exactly once.
    ///
    /// `spec.md` §9 flags the source's `for i in 0..=minor { add_deps(ext,
    /// major, minor) }` as ambiguous (the inner call should vary with
    /// `i`, not stay pinned to `minor`). This applies each level
    /// `(previous_minor, minor]`'s own dependencies once, which keeps
    /// `add` idempotent and makes repeated minor upgrades
    /// observationally equivalent to one upgrade straight to the
    /// final minor (`spec.md` §8 "Minor upgrade").
    pub fn add(&mut self, ext: ExtId, major: u16, minor: u16) {
        let previous = self.entries.get(&(ext, major)).copied();
        if let Some(existing) = previous {
            if existing >= minor {
                return;
            }
        }
        let start = previous.map_or(0, |m| m + 1);
        self.entries.insert((ext, major), minor);
        for level in start..=minor {
            if let Some(row) = find_row(ext, major, level) {
                for d in row.deps {
                    self.add(d.ext, d.major, d.minor);
                }
            }
        }
    }

    /// True iff some entry (ext, major, m) exists with m >= minor.
    pub fn has(&self, ext: ExtId, major: u16, minor: u16) -> bool {
        self.entries
            .get(&(ext, major))
            .is_some_and(|&m| m >= minor)
    }

    /// Ordered iteration for display (`-v`).
    pub fn enumerate(&self) -> impl Iterator<Item = (ExtId, u16, u16)> + '_ {
        self.entries
            .iter()
            .map(|(&(ext, major), &minor)| (ext, major, minor))
    }
}
