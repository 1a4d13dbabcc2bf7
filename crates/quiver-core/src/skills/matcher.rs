use crate::skills::descriptor::SkillDescriptor;
use regex::Regex;
use std::collections::HashSet;

const TOKEN_PATTERN: &str = "[a-z0-9]+";

/// Lowercase word tokens of `text`, in order.
pub(crate) fn word_tokens(text: &str) -> Vec<String> {
    let re = Regex::new(TOKEN_PATTERN).expect("token pattern is valid");
    let lowered = text.to_lowercase();
    re.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}

/// Decides which of a skill's trigger keywords a given intent activates.
///
/// The selection contract only depends on this seam; a higher-recall scorer
/// (fuzzy, embedding-based) can replace [`KeywordMatcher`] without touching
/// the selector.
pub trait Matcher: Send + Sync {
    /// Distinct keywords of `skill` that `intent` activates, in the
    /// descriptor's keyword order.
    fn hits(&self, intent: &str, skill: &SkillDescriptor) -> Vec<String>;
}

/// Case-insensitive keyword matching: single-word keywords must appear as a
/// whole word of the tokenized intent, multi-word (or punctuated) phrases
/// match as substrings of the lowercased intent.
pub struct KeywordMatcher {
    token_re: Regex,
}

impl KeywordMatcher {
    pub fn new() -> Self {
        Self {
            token_re: Regex::new(TOKEN_PATTERN).expect("token pattern is valid"),
        }
    }
}

impl Default for KeywordMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher for KeywordMatcher {
    fn hits(&self, intent: &str, skill: &SkillDescriptor) -> Vec<String> {
        let lowered = intent.to_lowercase();
        let tokens: HashSet<&str> = self
            .token_re
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();

        skill
            .keywords
            .iter()
            .filter(|kw| {
                if kw.chars().all(|c| c.is_ascii_alphanumeric()) {
                    tokens.contains(kw.as_str())
                } else {
                    lowered.contains(kw.as_str())
                }
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn skill(keywords: &[&str]) -> SkillDescriptor {
        SkillDescriptor {
            name: "sample".to_string(),
            description: "sample skill".to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            license: None,
            metadata: Default::default(),
            skill_dir: PathBuf::from("/skills/sample"),
        }
    }

    #[test]
    fn single_word_keyword_matches_whole_word_only() {
        let m = KeywordMatcher::new();
        let s = skill(&["test"]);
        assert_eq!(m.hits("write a test for this", &s), vec!["test"]);
        // "latest" contains "test" but is not a whole-word hit
        assert!(m.hits("pull the latest changes", &s).is_empty());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let m = KeywordMatcher::new();
        let s = skill(&["stripe", "payment"]);
        assert_eq!(
            m.hits("Integrate STRIPE Payment flow", &s),
            vec!["stripe", "payment"]
        );
    }

    #[test]
    fn phrase_keyword_matches_as_substring() {
        let m = KeywordMatcher::new();
        let s = skill(&["payment method"]);
        assert_eq!(
            m.hits("add a new payment method to checkout", &s),
            vec!["payment method"]
        );
        assert!(m.hits("add a payment option", &s).is_empty());
    }

    #[test]
    fn hyphenated_keyword_matches_as_substring() {
        let m = KeywordMatcher::new();
        let s = skill(&["data-grid"]);
        assert_eq!(m.hits("extend the data-grid columns", &s), vec!["data-grid"]);
    }

    #[test]
    fn hits_keep_descriptor_keyword_order() {
        let m = KeywordMatcher::new();
        let s = skill(&["paypal", "stripe", "payment"]);
        assert_eq!(
            m.hits("stripe and paypal payment", &s),
            vec!["paypal", "stripe", "payment"]
        );
    }

    #[test]
    fn word_tokens_lowercase_and_split() {
        assert_eq!(
            word_tokens("Fix my DataGrid, fast!"),
            vec!["fix", "my", "datagrid", "fast"]
        );
    }
}
