use std::collections::VecDeque;

use crate::types::{InputLevels, Output, HISTORY_CAP};

/// One captured clock event, feeding the timing-diagram renderer.
///
/// `time` is a per-simulation sequence number: entries are appended
/// synchronously on each CLK write, so insertion order is capture order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryEntry {
    pub time: u64,
    pub clk: bool,
    pub inputs: InputLevels,
    pub outputs: Output,
}

/// Bounded FIFO of the most recent clock events. Appending past the cap
/// evicts the oldest entry.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    next_time: u64,
}

impl History {
    pub fn new() -> History {
        History {
            entries: VecDeque::with_capacity(HISTORY_CAP),
            next_time: 0,
        }
    }

    pub fn record(&mut self, inputs: InputLevels, outputs: Output) {
        if self.entries.len() == HISTORY_CAP {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            time: self.next_time,
            clk: inputs.clk,
            inputs,
            outputs,
        });
        self.next_time += 1;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        // the sequence counter keeps running; only ordering matters
    }
}
