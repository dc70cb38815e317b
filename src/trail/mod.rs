// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Trail-based backtracking for the enumerator's assignment.
//!
//! Every write to an assignment slot goes through [`Trail::set`], which records
//! the slot's previous value. Rewinding to an earlier trail length replays those
//! records in reverse, restoring the slots exactly as they were.
//!
//! The engine takes a checkpoint (the trail length) before each predicate call
//! and rewinds to it before retrying, so predicates never undo their own writes.

/// A single entry in the trail, recording one overwritten slot.
#[derive(Debug, Clone, Copy)]
struct TrailEntry {
    /// Index of the slot that was overwritten
    slot: usize,
    /// The value the slot held before the write
    old_value: u32,
}

/// The trail system for O(1) per-write backtracking.
///
/// The trail does not own the slots it protects. Callers pass the same slice
/// to [`Trail::set`] and [`Trail::rewind_to`]; `SearchContext` keeps both
/// side by side so that pairing cannot drift.
#[derive(Debug, Default)]
pub struct Trail {
    entries: Vec<TrailEntry>,
}

impl Trail {
    /// Create a new empty trail.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `value` into `slots[slot]`, recording the previous value.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range for `slots`.
    pub fn set(&mut self, slots: &mut [u32], slot: usize, value: u32) {
        let old_value = slots[slot];
        self.entries.push(TrailEntry { slot, old_value });
        slots[slot] = value;
    }

    /// Write `value` only if it differs from the current one.
    ///
    /// Returns true if the slot changed.
    pub fn maybe_set(&mut self, slots: &mut [u32], slot: usize, value: u32) -> bool {
        if slots[slot] != value {
            self.set(slots, slot, value);
            true
        } else {
            false
        }
    }

    /// Undo every write recorded after trail length `checkpoint`.
    pub fn rewind_to(&mut self, checkpoint: usize, slots: &mut [u32]) {
        while self.entries.len() > checkpoint {
            if let Some(entry) = self.entries.pop() {
                slots[entry.slot] = entry.old_value;
            }
        }
    }

    /// Get the current number of entries in the trail.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the trail is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
