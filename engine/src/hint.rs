//! Keyword-based category hints.
//!
//! Hints are advisory only; the store never applies them to a thought's
//! category. Matching is plain substring containment on the lower-cased text,
//! and the keep set wins ties.

use mindsweep_types::Hint;

const KEEP_KEYWORDS: &[&str] = &[
    "todo",
    "plan",
    "call",
    "email",
    "buy",
    "next step",
    "remember",
    "important",
    "goal",
];

const LETGO_KEYWORDS: &[&str] = &[
    "worry",
    "fear",
    "useless",
    "ruminate",
    "can't control",
    "anxiety",
    "anxious",
    "stress",
    "overthink",
];

/// Suggest a category for one thought's text, or [`Hint::None`].
///
/// Keep keywords are checked first: a keep match returns [`Hint::Keep`] even
/// when a let-go keyword also matches elsewhere in the text.
#[must_use]
pub fn classify_hint(text: &str) -> Hint {
    let lower = text.to_lowercase();

    if KEEP_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
        return Hint::Keep;
    }
    if LETGO_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
        return Hint::LetGo;
    }

    Hint::None
}

#[cfg(test)]
mod tests {
    use super::classify_hint;
    use mindsweep_types::Hint;

    #[test]
    fn keep_keyword_matches() {
        assert_eq!(classify_hint("I need to call the bank"), Hint::Keep);
        assert_eq!(classify_hint("TODO: water the plants"), Hint::Keep);
    }

    #[test]
    fn keep_wins_ties() {
        assert_eq!(classify_hint("worry about my plan"), Hint::Keep);
    }

    #[test]
    fn letgo_keyword_matches() {
        assert_eq!(classify_hint("I'm so anxious"), Hint::LetGo);
        assert_eq!(classify_hint("this stress is pointless"), Hint::LetGo);
    }

    #[test]
    fn no_keyword_yields_none() {
        assert_eq!(classify_hint("hello there"), Hint::None);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        assert_eq!(classify_hint("REMEMBER the deadline"), Hint::Keep);
        assert_eq!(classify_hint("overthinking everything again"), Hint::LetGo);
    }
}
