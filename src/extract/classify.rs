//! Line classifier: decides whether one line of rendered page text is a
//! model name, a score, or noise.
//!
//! The name test is an ordered cascade of independent reject rules; each rule
//! can only reject, never rescue a line an earlier rule rejected. The rule
//! order is load-bearing and must not be shuffled.

use once_cell::sync::Lazy;
use regex::Regex;

/// Classification of a single line of page text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// Normalized model name.
    Name(String),
    /// Benchmark score in [10, 99].
    Score(u8),
    Discard,
}

/// Pluggable classification policy. The heuristic rule set is fragile
/// against upstream page changes; swapping it out must not touch the
/// segmenter or the diff engine.
pub trait ClassifyPolicy: Send + Sync {
    fn classify(&self, line: &str) -> LineClass;
}

/// UI/navigation phrases that disqualify a line as a model name.
/// Full phrases where possible, to avoid partial matches.
const DEFAULT_DENYLIST: &[&str] = &[
    "add model",
    "specific provider",
    "artificial analysis",
    "benchmark",
    "leaderboard",
    "filter",
    "incorporates",
    "evaluations",
    "represents",
    "average",
    "open weights",
    "proprietary",
    "non-reasoning",
    "coding index",
    "agentic index",
    "intelligence index",
    "click here",
    "select",
    "compare models",
    "view all",
    "show more",
    "hide",
    "show less",
    "subscribe",
    "newsletter",
    "contact us",
    "about us",
    "privacy",
    "terms of",
    "cookie",
    "sign in",
    "log in",
    "register",
];

static RE_SCORE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,2}$").unwrap());
static RE_COUNT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\s+of\s+\d+\s+models?$").unwrap());
// Letters, digits, spaces, hyphens, underscores, dots, parentheses (Unicode).
static RE_NAME_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w\s\-\.\(\)]+$").unwrap());

/// Default heuristic policy tuned to the artificialanalysis.ai page layout.
#[derive(Debug, Clone)]
pub struct HeuristicPolicy {
    denylist: Vec<String>,
}

impl Default for HeuristicPolicy {
    fn default() -> Self {
        Self {
            denylist: DEFAULT_DENYLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl HeuristicPolicy {
    /// Replace the denylist, e.g. after the page's chrome text changes.
    pub fn with_denylist<I, S>(denylist: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            denylist: denylist.into_iter().map(Into::into).collect(),
        }
    }

    fn looks_like_name(&self, text: &str) -> bool {
        if text.len() < 2 || text.len() > 80 {
            return false;
        }

        let lower = text.to_lowercase();
        if self.denylist.iter().any(|p| lower.contains(p.as_str())) {
            return false;
        }

        // "25 of 342 models" style count lines
        if RE_COUNT_LINE.is_match(&lower) {
            return false;
        }

        // Bullet/arrow glyphs that prefix UI controls
        if text.starts_with(['+', '×', '•', '→', '←', '↑', '↓']) {
            return false;
        }

        if text.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }

        // Sentence-ish text: too many words, or sentence-terminal punctuation
        if text.matches(' ').count() > 6 {
            return false;
        }
        if text.ends_with(['.', '!', '?', ':']) {
            return false;
        }

        if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("www.")
        {
            return false;
        }

        if !RE_NAME_CHARS.is_match(text) {
            return false;
        }

        if !text.chars().any(char::is_alphabetic) {
            return false;
        }

        true
    }
}

impl ClassifyPolicy for HeuristicPolicy {
    fn classify(&self, line: &str) -> LineClass {
        let text = line.trim();

        if RE_SCORE.is_match(text) {
            // 1-2 digits always parse into u8
            let score: u8 = text.parse().unwrap_or(0);
            if (10..=99).contains(&score) {
                return LineClass::Score(score);
            }
            return LineClass::Discard;
        }

        if !self.looks_like_name(text) {
            return LineClass::Discard;
        }

        let clean = normalize_name(text);
        if clean.len() > 2 {
            LineClass::Name(clean)
        } else {
            LineClass::Discard
        }
    }
}

/// Strip pictographic/emoji code points and collapse whitespace runs.
fn normalize_name(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last_space = false;
    for ch in text.chars() {
        if ('\u{1F300}'..='\u{1F9FF}').contains(&ch) {
            continue;
        }
        if ch.is_whitespace() {
            if !last_space && !out.is_empty() {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(ch);
            last_space = false;
        }
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(line: &str) -> LineClass {
        HeuristicPolicy::default().classify(line)
    }

    #[test]
    fn scores_in_band_accepted() {
        assert_eq!(classify("10"), LineClass::Score(10));
        assert_eq!(classify(" 85 "), LineClass::Score(85));
        assert_eq!(classify("99"), LineClass::Score(99));
    }

    #[test]
    fn scores_out_of_band_discarded() {
        assert_eq!(classify("9"), LineClass::Discard);
        // Three digits fail the score shape and the purely-numeric name rule
        assert_eq!(classify("100"), LineClass::Discard);
    }

    #[test]
    fn denylist_beats_structure() {
        assert_eq!(classify("Intelligence Index v2"), LineClass::Discard);
        assert_eq!(classify("SUBSCRIBE"), LineClass::Discard);
    }

    #[test]
    fn count_lines_discarded() {
        assert_eq!(classify("25 of 342 models"), LineClass::Discard);
        assert_eq!(classify("1 of 1 model"), LineClass::Discard);
    }

    #[test]
    fn ui_glyph_prefixes_discarded() {
        assert_eq!(classify("+ Something"), LineClass::Discard);
        assert_eq!(classify("→ next"), LineClass::Discard);
    }

    #[test]
    fn sentences_and_urls_discarded() {
        assert_eq!(
            classify("This model is the best one we have seen so far today"),
            LineClass::Discard
        );
        assert_eq!(classify("Read the docs:"), LineClass::Discard);
        assert_eq!(classify("https://example.test/page"), LineClass::Discard);
        assert_eq!(classify("www.example.test"), LineClass::Discard);
    }

    #[test]
    fn plausible_model_names_accepted() {
        assert_eq!(
            classify("Claude 4.5 Sonnet"),
            LineClass::Name("Claude 4.5 Sonnet".into())
        );
        assert_eq!(
            classify("Llama 3.1 (70B)"),
            LineClass::Name("Llama 3.1 (70B)".into())
        );
        assert_eq!(classify("GPT-5 mini"), LineClass::Name("GPT-5 mini".into()));
    }

    #[test]
    fn whitespace_runs_collapsed() {
        assert_eq!(
            classify("Gemini   2.5\t Pro"),
            LineClass::Name("Gemini 2.5 Pro".into())
        );
    }

    #[test]
    fn normalization_strips_pictographs() {
        assert_eq!(normalize_name("Grok 🚀 4"), "Grok 4");
        assert_eq!(normalize_name("🔥 ab"), "ab");
    }

    #[test]
    fn name_too_short_after_normalization_discarded() {
        // Two chars survives the length gate but not the post-normalize cut
        assert_eq!(classify("ab"), LineClass::Discard);
    }

    #[test]
    fn no_alphabetic_content_discarded() {
        assert_eq!(classify("1.5.2"), LineClass::Discard);
        assert_eq!(classify("---"), LineClass::Discard);
    }

    #[test]
    fn custom_denylist_swaps_cleanly() {
        let policy = HeuristicPolicy::with_denylist(["gpt"]);
        assert_eq!(policy.classify("GPT-5"), LineClass::Discard);
        assert_eq!(
            policy.classify("Subscribe now"),
            LineClass::Name("Subscribe now".into())
        );
    }
}
