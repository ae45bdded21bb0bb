// src/extract/mod.rs
pub mod classify;
pub mod segment;

use tracing::{debug, info};

use crate::model::{RankedEntry, Section, SectionLists, Snapshot};
use classify::{ClassifyPolicy, LineClass};

/// Build one section's ranked list from its isolated line range.
///
/// Names and scores are collected independently in page order, then paired
/// positionally; an unmatched tail on either side is dropped. The page's own
/// ordering is authoritative, so the result is never re-sorted.
pub fn build_section(
    policy: &dyn ClassifyPolicy,
    section: Section,
    lines: &[String],
) -> Vec<RankedEntry> {
    let mut names: Vec<String> = Vec::new();
    let mut scores: Vec<u8> = Vec::new();

    for line in lines {
        match policy.classify(line) {
            LineClass::Name(name) => names.push(name),
            LineClass::Score(score) => scores.push(score),
            LineClass::Discard => {}
        }
    }

    let paired = names.len().min(scores.len());
    if names.len() != scores.len() {
        debug!(
            section = %section,
            names = names.len(),
            scores = scores.len(),
            "name/score count mismatch, dropping unmatched tail"
        );
    }

    names
        .into_iter()
        .zip(scores)
        .take(paired)
        .enumerate()
        .map(|(i, (name, score))| RankedEntry {
            rank: i as u32 + 1,
            name,
            score,
        })
        .collect()
}

/// Segment and extract one section from a full page capture.
pub fn extract_section(
    policy: &dyn ClassifyPolicy,
    section: Section,
    page_lines: &[String],
) -> Vec<RankedEntry> {
    let range = segment::section_lines(page_lines, section);
    let entries = build_section(policy, section, &range);
    info!(
        section = %section,
        entries = entries.len(),
        "extracted chart data"
    );
    entries
}

/// Assemble a snapshot from per-section captures. `captures` holds the page
/// lines rendered while each section's tab was active.
pub fn assemble_snapshot(
    policy: &dyn ClassifyPolicy,
    source: &str,
    captures: &[(Section, Vec<String>)],
) -> Snapshot {
    let mut sections = SectionLists::default();
    for (section, page_lines) in captures {
        sections.set(*section, extract_section(policy, *section, page_lines));
    }
    Snapshot::new(source, sections)
}
