// src/model.rs
// Core data model: sections, ranked entries, snapshots, bounded history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The three tracked leaderboard categories, in contract order.
/// Diff output and notification truncation depend on this order staying fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Intelligence,
    Coding,
    Agentic,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Intelligence, Section::Coding, Section::Agentic];

    /// Short display label used in change entries and logs.
    pub fn label(self) -> &'static str {
        match self {
            Section::Intelligence => "🧠 Intelligence",
            Section::Coding => "💻 Coding",
            Section::Agentic => "🤖 Agentic",
        }
    }

    /// Visible text of the chart tab that switches the page to this section.
    pub fn tab_label(self) -> &'static str {
        match self {
            Section::Intelligence => "Artificial Analysis Intelligence Index",
            Section::Coding => "Coding Index",
            Section::Agentic => "Agentic Index",
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One model's position in a section list. `rank` is 1-based and derived
/// purely from list position; it is never assigned independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: u32,
    #[serde(rename = "model")]
    pub name: String,
    pub score: u8,
}

/// The three per-section lists of one capture. Field names match the
/// persisted JSON layout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLists {
    #[serde(default)]
    pub intelligence_index: Vec<RankedEntry>,
    #[serde(default)]
    pub coding_index: Vec<RankedEntry>,
    #[serde(default)]
    pub agentic_index: Vec<RankedEntry>,
}

impl SectionLists {
    pub fn get(&self, section: Section) -> &[RankedEntry] {
        match section {
            Section::Intelligence => &self.intelligence_index,
            Section::Coding => &self.coding_index,
            Section::Agentic => &self.agentic_index,
        }
    }

    pub fn set(&mut self, section: Section, entries: Vec<RankedEntry>) {
        match section {
            Section::Intelligence => self.intelligence_index = entries,
            Section::Coding => self.coding_index = entries,
            Section::Agentic => self.agentic_index = entries,
        }
    }

    /// Total entry count across all sections.
    pub fn total(&self) -> usize {
        Section::ALL.iter().map(|s| self.get(*s).len()).sum()
    }
}

/// One complete timestamped capture. Immutable once assembled; a snapshot
/// with zero total entries is discarded by the monitor, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub source: String,
    #[serde(rename = "data")]
    pub sections: SectionLists,
}

impl Snapshot {
    pub fn new(source: impl Into<String>, sections: SectionLists) -> Self {
        Self {
            timestamp: Utc::now(),
            source: source.into(),
            sections,
        }
    }

    pub fn total_entries(&self) -> usize {
        self.sections.total()
    }
}

pub const HISTORY_CAP: usize = 500;

/// Bounded, oldest-first sequence of snapshots. Appending past the cap
/// evicts from the front.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<Snapshot>,
}

impl History {
    pub fn push(&mut self, snapshot: Snapshot) {
        self.entries.push(snapshot);
        if self.entries.len() > HISTORY_CAP {
            let excess = self.entries.len() - HISTORY_CAP;
            self.entries.drain(0..excess);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn oldest(&self) -> Option<&Snapshot> {
        self.entries.first()
    }

    pub fn newest(&self) -> Option<&Snapshot> {
        self.entries.last()
    }
}
