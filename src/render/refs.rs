//! Pointer identity tracking

use crate::value::TypeInfo;
use rustc_hash::FxHashMap;
use std::collections::hash_map::Entry;

/// Outcome of visiting a pointer target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// First time this target is seen; the id was just assigned
    First(usize),
    /// Target was already rendered under this id
    Seen(usize),
}

/// Assigns sequential ids to pointer targets, starting at 1.
///
/// Targets are keyed by address and pointee type, so a struct and its first
/// field (which share an address) are distinct targets.
#[derive(Debug)]
pub struct ReferenceTracker {
    ids: FxHashMap<(usize, &'static str), usize>,
    next_id: usize,
}

impl ReferenceTracker {
    pub fn new() -> Self {
        ReferenceTracker {
            ids: FxHashMap::default(),
            next_id: 1,
        }
    }

    /// Check and register a target in one step
    pub fn visit(&mut self, addr: usize, target: TypeInfo) -> Visit {
        match self.ids.entry((addr, target.path())) {
            Entry::Occupied(entry) => Visit::Seen(*entry.get()),
            Entry::Vacant(entry) => {
                let id = self.next_id;
                self.next_id += 1;
                entry.insert(id);
                log::trace!("ref &{} -> {:#x} ({})", id, addr, target.path());
                Visit::First(id)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Default for ReferenceTracker {
    fn default() -> Self {
        Self::new()
    }
}
