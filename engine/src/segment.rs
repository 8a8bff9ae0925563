//! Free-text to discrete-thought segmentation.
//!
//! A heuristic, not a grammar parser: split on sentence terminators, then on
//! spoken filler phrases, and drop fragments too short to be a thought.

use std::sync::LazyLock;

use regex::Regex;

static SENTENCE_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?。！？\n]+").expect("sentence terminator pattern is valid"));

static FILLER_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s+(?:and then|i think|you know|like|um|uh|so|well)\s+")
        .expect("filler phrase pattern is valid")
});

/// Fragments shorter than this (post-trim) are discarded as noise.
const MIN_THOUGHT_CHARS: usize = 4;

/// Split one raw string (a finalized transcript increment or a quick-add
/// entry) into an ordered sequence of non-empty trimmed thought strings.
///
/// Always returns zero or more strings; there are no error cases.
#[must_use]
pub fn segment(raw: &str) -> Vec<String> {
    let mut thoughts = Vec::new();

    for sentence in SENTENCE_SPLIT.split(raw) {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }

        for fragment in FILLER_SPLIT.split(sentence) {
            let fragment = fragment.trim();
            if fragment.chars().count() >= MIN_THOUGHT_CHARS {
                thoughts.push(fragment.to_string());
            }
        }
    }

    thoughts
}
