//! Keyword rules for intent classification
//!
//! Dispatch is a data table of `(trigger substring, intent)` pairs evaluated
//! in order with first-match semantics. Triggers are plain substring checks
//! against the lowercased message, not whole-word matches.

/// The category of user request a message maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    SavePreference,
    ListPreferences,
    FilterByIngredient,
    Recommend,
    Fallback,
}

/// One keyword rule: a trigger substring and the intent it selects.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub trigger: &'static str,
    pub intent: Intent,
}

/// Rules in priority order; the first trigger found in the message wins.
pub const RULES: &[Rule] = &[
    Rule {
        trigger: "i like",
        intent: Intent::SavePreference,
    },
    Rule {
        trigger: "my favourite ingredients",
        intent: Intent::ListPreferences,
    },
    Rule {
        trigger: "cocktails containing",
        intent: Intent::FilterByIngredient,
    },
    Rule {
        trigger: "recommend",
        intent: Intent::Recommend,
    },
];

/// Classify a lowercased message; falls through to [`Intent::Fallback`]
/// when no trigger matches.
pub fn classify(message: &str) -> Intent {
    RULES
        .iter()
        .find(|rule| message.contains(rule.trigger))
        .map_or(Intent::Fallback, |rule| rule.intent)
}

/// The trimmed text after the last occurrence of `phrase`, or the empty
/// string when the phrase is absent. Using the last occurrence handles a
/// trigger phrase appearing earlier in the sentence incidentally.
pub fn text_after_last<'a>(message: &'a str, phrase: &str) -> &'a str {
    message
        .rsplit_once(phrase)
        .map_or("", |(_, after)| after.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_trigger() {
        assert_eq!(classify("i like lime"), Intent::SavePreference);
        assert_eq!(
            classify("what are my favourite ingredients"),
            Intent::ListPreferences
        );
        assert_eq!(
            classify("show me cocktails containing mint"),
            Intent::FilterByIngredient
        );
        assert_eq!(classify("recommend something"), Intent::Recommend);
        assert_eq!(classify("how do i muddle mint?"), Intent::Fallback);
    }

    #[test]
    fn test_priority_save_beats_filter() {
        // Both triggers present; the earlier rule wins
        assert_eq!(
            classify("i like cocktails containing mint"),
            Intent::SavePreference
        );
    }

    #[test]
    fn test_priority_filter_beats_recommend() {
        assert_eq!(
            classify("recommend cocktails containing rum"),
            Intent::FilterByIngredient
        );
    }

    #[test]
    fn test_triggers_are_substring_matches() {
        // No word boundaries: the trigger may sit anywhere in the message
        assert_eq!(
            classify("hi, like i said, i like rum"),
            Intent::SavePreference
        );
    }

    #[test]
    fn test_text_after_last_uses_last_occurrence() {
        assert_eq!(text_after_last("i like lime", "like"), "lime");
        assert_eq!(
            text_after_last("i like it when you like ginger", "like"),
            "ginger"
        );
        assert_eq!(
            text_after_last(
                "cocktails containing what? show cocktails containing rum",
                "cocktails containing"
            ),
            "rum"
        );
    }

    #[test]
    fn test_text_after_last_may_be_empty() {
        assert_eq!(text_after_last("i like", "like"), "");
        assert_eq!(text_after_last("no trigger here", "like"), "");
    }
}
