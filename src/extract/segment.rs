//! Section segmenter: isolates the contiguous run of page-text lines
//! belonging to one section's chart.
//!
//! Each section carries its own landmark strategy (start matcher, stop
//! matcher, optional fallback). The strategies are declared in one table so
//! adding a fourth section means adding a row, not another branch.

use crate::model::Section;

/// The page's own brand label, interleaved with chart rows; never part of
/// a section's data.
const BRAND_LABEL: &str = "Artificial Analysis";

/// Anchor fragment of the "N of 342 models" count line under each chart.
const MODEL_COUNT_ANCHOR: &str = "of 342 models";
const ADD_MODEL_ANCHOR: &str = "+ Add model";

/// JSON-LD opening token; marks the end of chart UI in the rendered text.
const STRUCTURED_DATA_MARKER: &str = "{\"@context\"";

/// How a section's chart is located within the full line sequence.
#[derive(Debug, Clone, Copy)]
enum Landmarks {
    /// Highlights-style chart: exact header line starts the range, any of
    /// the sibling headers stops it, a caption fragment is skipped inside.
    Highlights {
        header: &'static str,
        stops: &'static [&'static str],
        skip: &'static str,
    },
    /// Tabbed chart: a title substring (or a secondary title confirmed by a
    /// following count line) arms the scan, the count/add-model anchor opens
    /// the range, the structured-data marker closes it. If the title is
    /// never found, fall back to the bare anchor as the start landmark.
    Chart {
        title: &'static str,
        secondary_title: Option<&'static str>,
    },
}

/// Strategy table. Primary before fallback; fallback fires only when the
/// primary yields nothing.
fn landmarks(section: Section) -> Landmarks {
    match section {
        Section::Intelligence => Landmarks::Highlights {
            header: "INTELLIGENCE",
            stops: &["SPEED", "PRICE"],
            skip: "Higher is better",
        },
        Section::Coding => Landmarks::Chart {
            title: "Artificial Analysis Coding Index",
            secondary_title: Some("Coding Index"),
        },
        Section::Agentic => Landmarks::Chart {
            title: "Artificial Analysis Agentic Index",
            secondary_title: None,
        },
    }
}

/// Return the lines belonging to `section`'s chart, trimmed, with empty
/// lines and the brand label dropped. No start landmark found means an
/// empty result, never an error.
pub fn section_lines(lines: &[String], section: Section) -> Vec<String> {
    match landmarks(section) {
        Landmarks::Highlights {
            header,
            stops,
            skip,
        } => highlights_range(lines, header, stops, skip),
        Landmarks::Chart {
            title,
            secondary_title,
        } => {
            let primary = chart_range(lines, |i, line| {
                if line.contains(title) {
                    return true;
                }
                match secondary_title {
                    Some(sec) => {
                        line.contains(sec)
                            && lines
                                .get(i + 1)
                                .is_some_and(|next| next.contains(MODEL_COUNT_ANCHOR))
                    }
                    None => false,
                }
            });
            if !primary.is_empty() {
                return primary;
            }
            // Generic anchor fallback; precedence deliberately primary-first.
            chart_fallback_range(lines)
        }
    }
}

fn keep(line: &str) -> bool {
    !line.is_empty() && line != BRAND_LABEL
}

fn highlights_range(
    lines: &[String],
    header: &str,
    stops: &[&str],
    skip: &str,
) -> Vec<String> {
    let mut in_chart = false;
    let mut out = Vec::new();
    for raw in lines {
        let line = raw.trim();
        if !in_chart {
            if line == header {
                in_chart = true;
            }
            continue;
        }
        if stops.contains(&line) {
            break;
        }
        if line.contains(skip) {
            continue;
        }
        if keep(line) {
            out.push(line.to_string());
        }
    }
    out
}

fn is_chart_anchor(line: &str) -> bool {
    line.contains(MODEL_COUNT_ANCHOR) || line.contains(ADD_MODEL_ANCHOR)
}

fn chart_range<F>(lines: &[String], mut is_header: F) -> Vec<String>
where
    F: FnMut(usize, &str) -> bool,
{
    let mut found_header = false;
    let mut in_chart = false;
    let mut out = Vec::new();
    for (i, raw) in lines.iter().enumerate() {
        let line = raw.trim();
        if !found_header {
            if is_header(i, line) {
                found_header = true;
            }
            continue;
        }
        if !in_chart {
            if is_chart_anchor(line) {
                in_chart = true;
            }
            continue;
        }
        if line.contains(STRUCTURED_DATA_MARKER) {
            break;
        }
        if keep(line) {
            out.push(line.to_string());
        }
    }
    out
}

fn chart_fallback_range(lines: &[String]) -> Vec<String> {
    let mut in_chart = false;
    let mut out = Vec::new();
    for raw in lines {
        let line = raw.trim();
        if !in_chart {
            if is_chart_anchor(line) {
                in_chart = true;
            }
            continue;
        }
        if line.contains(STRUCTURED_DATA_MARKER) {
            break;
        }
        if keep(line) {
            out.push(line.to_string());
        }
    }
    out
}
