//! Diff engine: compares two snapshots and emits human-readable change
//! entries.
//!
//! Emission order is part of the contract: sections in `Section::ALL` order,
//! and within a section additions, then removals, then rank moves. The
//! notification layer truncates on this order, so it must stay deterministic.

use std::collections::HashMap;
use std::fmt;

use crate::model::{RankedEntry, Section, Snapshot};

/// Rank moves where both the old and the new rank sit below this threshold
/// are suppressed to bound notification volume.
pub const RANK_MOVE_THRESHOLD: u32 = 15;

/// One detected difference between two snapshots. Ephemeral per check
/// cycle, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEntry {
    Added {
        section: Section,
        name: String,
        rank: u32,
        score: u8,
    },
    Removed {
        section: Section,
        name: String,
    },
    RankMoved {
        section: Section,
        name: String,
        old_rank: u32,
        new_rank: u32,
    },
}

impl fmt::Display for ChangeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeEntry::Added {
                section,
                name,
                rank,
                score,
            } => write!(f, "🆕 {section}: {name} (#{rank}, score {score})"),
            ChangeEntry::Removed { section, name } => {
                write!(f, "❌ {section}: {name} removed")
            }
            ChangeEntry::RankMoved {
                section,
                name,
                old_rank,
                new_rank,
            } => {
                let arrow = if new_rank < old_rank { "📈" } else { "📉" };
                write!(f, "{arrow} {section}: {name} #{old_rank}→#{new_rank}")
            }
        }
    }
}

/// Compare two snapshots section by section. Either side absent means no
/// comparison is possible and the change list is empty.
pub fn diff_snapshots(
    previous: Option<&Snapshot>,
    current: Option<&Snapshot>,
) -> Vec<ChangeEntry> {
    let (prev, curr) = match (previous, current) {
        (Some(p), Some(c)) => (p, c),
        _ => return Vec::new(),
    };

    let mut changes = Vec::new();
    for section in Section::ALL {
        diff_section(
            section,
            prev.sections.get(section),
            curr.sections.get(section),
            &mut changes,
        );
    }
    changes
}

fn diff_section(
    section: Section,
    previous: &[RankedEntry],
    current: &[RankedEntry],
    out: &mut Vec<ChangeEntry>,
) {
    let prev_by_name: HashMap<&str, &RankedEntry> =
        previous.iter().map(|e| (e.name.as_str(), e)).collect();
    let curr_by_name: HashMap<&str, &RankedEntry> =
        current.iter().map(|e| (e.name.as_str(), e)).collect();

    // Additions, in current list order
    for entry in current {
        if !prev_by_name.contains_key(entry.name.as_str()) {
            out.push(ChangeEntry::Added {
                section,
                name: entry.name.clone(),
                rank: entry.rank,
                score: entry.score,
            });
        }
    }

    // Removals, in previous list order
    for entry in previous {
        if !curr_by_name.contains_key(entry.name.as_str()) {
            out.push(ChangeEntry::Removed {
                section,
                name: entry.name.clone(),
            });
        }
    }

    // Rank moves, in current list order; moves entirely below the
    // threshold on both sides are suppressed
    for entry in current {
        if let Some(old) = prev_by_name.get(entry.name.as_str()) {
            let (old_rank, new_rank) = (old.rank, entry.rank);
            if old_rank != new_rank
                && (old_rank <= RANK_MOVE_THRESHOLD || new_rank <= RANK_MOVE_THRESHOLD)
            {
                out.push(ChangeEntry::RankMoved {
                    section,
                    name: entry.name.clone(),
                    old_rank,
                    new_rank,
                });
            }
        }
    }
}
