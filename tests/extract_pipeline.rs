// tests/extract_pipeline.rs
// End-to-end extraction: raw page lines through segmentation and
// classification into ranked lists.

use benchwatch::extract::{assemble_snapshot, build_section, extract_section};
use benchwatch::{HeuristicPolicy, LineClass, ClassifyPolicy, Section};

fn lines(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

/// A condensed rendition of the rendered page with all three sections.
fn full_page() -> Vec<String> {
    lines(&[
        "Artificial Analysis",
        "Models Leaderboard",
        "INTELLIGENCE",
        "Higher is better ↑",
        "GPT-X",
        "Claude-Y",
        "85",
        "80",
        "SPEED",
        "some speed rows",
        "PRICE",
        "Artificial Analysis Coding Index",
        "Independent evaluation across coding tasks.",
        "45 of 342 models",
        "+ Add model",
        "Claude-Y",
        "62",
        "GPT-X",
        "61",
        "{\"@context\":\"https://schema.org\"}",
        "Artificial Analysis Agentic Index",
        "88 of 342 models",
        "Grok-Z",
        "58",
        "{\"@context\":\"https://schema.org\"}",
        "Subscribe to our newsletter",
    ])
}

#[test]
fn classifier_score_band() {
    let policy = HeuristicPolicy::default();
    for v in 10..=99u8 {
        assert_eq!(policy.classify(&v.to_string()), LineClass::Score(v));
    }
    assert_eq!(policy.classify("9"), LineClass::Discard);
    assert_eq!(policy.classify("100"), LineClass::Discard);
}

#[test]
fn classifier_rejects_denylisted_ui_text() {
    let policy = HeuristicPolicy::default();
    for line in [
        "Models Leaderboard",
        "Subscribe",
        "Sign in",
        "Compare Models",
        "Intelligence Index",
    ] {
        assert_eq!(policy.classify(line), LineClass::Discard, "line: {line}");
    }
}

#[test]
fn intelligence_section_extracted_from_full_page() {
    let policy = HeuristicPolicy::default();
    let entries = extract_section(&policy, Section::Intelligence, &full_page());
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "GPT-X");
    assert_eq!(entries[0].rank, 1);
    assert_eq!(entries[0].score, 85);
    assert_eq!(entries[1].name, "Claude-Y");
    assert_eq!(entries[1].rank, 2);
    assert_eq!(entries[1].score, 80);
}

#[test]
fn all_sections_assembled_into_snapshot() {
    let policy = HeuristicPolicy::default();
    let page = full_page();
    let captures: Vec<_> = Section::ALL
        .iter()
        .map(|s| (*s, page.clone()))
        .collect();
    let snapshot = assemble_snapshot(&policy, "https://example.test/", &captures);

    assert_eq!(snapshot.sections.get(Section::Intelligence).len(), 2);
    let coding = snapshot.sections.get(Section::Coding);
    assert_eq!(coding.len(), 2);
    assert_eq!(coding[0].name, "Claude-Y");
    assert_eq!(coding[0].score, 62);
    let agentic = snapshot.sections.get(Section::Agentic);
    assert_eq!(agentic.len(), 1);
    assert_eq!(agentic[0].name, "Grok-Z");
    assert_eq!(snapshot.total_entries(), 5);
}

#[test]
fn unmatched_names_dropped_silently() {
    // Three classified names, two classified scores: exactly two entries
    let policy = HeuristicPolicy::default();
    let range = lines(&["GPT-X", "Claude-Y", "Grok-Z", "85", "80"]);
    let entries = build_section(&policy, Section::Intelligence, &range);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "GPT-X");
    assert_eq!(entries[1].name, "Claude-Y");
}

#[test]
fn missing_section_landmark_yields_empty_list() {
    let policy = HeuristicPolicy::default();
    let page = lines(&["nothing", "recognizable", "here"]);
    assert!(extract_section(&policy, Section::Coding, &page).is_empty());
}
