//! Merge thread records that share an identical call stack.
//!
//! Two records belong together when their formatted call-stack strings are
//! byte-identical. Entries are created in first-seen order, and within an
//! entry ids, states and durations keep first-seen order as well.

use crate::output::text::call_stack_string;
use crate::parser::goroutine::{CallFrame, ThreadRecord};
use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// A set of goroutines with the same call stack
///
/// **Public** - consumed by the formatter, metrics and viewer
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedEntry {
    /// Call stack shared with the first contributing record
    pub frames: Arc<[CallFrame]>,

    /// Goroutine ids, in input order
    pub ids: Vec<u64>,

    /// Distinct state labels, first-seen order
    pub states: Vec<String>,

    /// Distinct blocked durations, first-seen order
    pub blocked: Vec<Duration>,

    /// Indices into `DecodeResult::all` of every contributing record
    pub members: Vec<usize>,
}

impl GroupedEntry {
    /// Start a new entry from its first record
    fn seed(index: usize, record: &ThreadRecord) -> Self {
        Self {
            frames: Arc::clone(&record.frames),
            ids: vec![record.id],
            states: vec![record.state.clone()],
            blocked: vec![record.blocked],
            members: vec![index],
        }
    }

    /// Fold another record with the same stack into this entry
    fn absorb(&mut self, index: usize, record: &ThreadRecord) {
        self.ids.push(record.id);

        if !self.states.contains(&record.state) {
            self.states.push(record.state.clone());
        }

        if !self.blocked.contains(&record.blocked) {
            self.blocked.push(record.blocked);
        }

        self.members.push(index);
    }

    /// Number of goroutines in this entry
    pub fn goroutine_count(&self) -> usize {
        self.members.len()
    }
}

/// Group records by call stack
///
/// **Public** - main entry point for grouping
///
/// # Arguments
/// * `all` - Every decoded record, in input order
///
/// # Returns
/// Grouped entries in first-seen order. Member index lists partition
/// `0..all.len()`.
///
/// # Algorithm
/// 1. Format each record's call stack
/// 2. Look the string up in a map of stack -> entry position
/// 3. Absorb into the existing entry, or append a new one
pub fn group(all: &[ThreadRecord]) -> Vec<GroupedEntry> {
    debug!("Grouping {} goroutines by call stack", all.len());

    let mut grouped: Vec<GroupedEntry> = Vec::new();

    // Map to find existing entries: call stack string -> position in `grouped`
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (index, record) in all.iter().enumerate() {
        match positions.entry(call_stack_string(&record.frames)) {
            Entry::Occupied(slot) => grouped[*slot.get()].absorb(index, record),
            Entry::Vacant(slot) => {
                slot.insert(grouped.len());
                grouped.push(GroupedEntry::seed(index, record));
            }
        }
    }

    debug!("Built {} grouped entries", grouped.len());

    grouped
}
