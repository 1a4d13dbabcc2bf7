use crate::skills::descriptor::SkillDescriptor;
use crate::skills::matcher::{KeywordMatcher, Matcher};
use crate::skills::registry::SkillRegistry;

/// One activated skill in a selection result.
#[derive(Debug)]
pub struct Activation<'a> {
    pub skill: &'a SkillDescriptor,
    /// The distinct keywords the intent hit, in descriptor order.
    pub matched: Vec<String>,
}

impl Activation<'_> {
    pub fn hit_count(&self) -> usize {
        self.matched.len()
    }
}

/// Ranks the skills a free-text intent activates. Stateless and pure over
/// the registry snapshot: the same intent against the same registry always
/// yields the same ordered result.
pub struct SkillSelector<M: Matcher = KeywordMatcher> {
    matcher: M,
}

impl SkillSelector<KeywordMatcher> {
    pub fn new() -> Self {
        Self {
            matcher: KeywordMatcher::new(),
        }
    }
}

impl Default for SkillSelector<KeywordMatcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Matcher> SkillSelector<M> {
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    /// Every skill the intent activates, ordered by descending distinct
    /// keyword hits; ties keep registry declaration order. An empty or
    /// unmatched intent yields an empty list, a normal outcome rather than
    /// an error.
    pub fn select<'a>(&self, intent: &str, registry: &'a SkillRegistry) -> Vec<Activation<'a>> {
        if intent.trim().is_empty() {
            return Vec::new();
        }

        let mut activations: Vec<Activation<'a>> = registry
            .skills()
            .iter()
            .filter_map(|skill| {
                let matched = self.matcher.hits(intent, skill);
                if matched.is_empty() {
                    None
                } else {
                    Some(Activation { skill, matched })
                }
            })
            .collect();

        // stable sort: declaration order survives equal hit counts
        activations.sort_by(|a, b| b.hit_count().cmp(&a.hit_count()));
        activations
    }
}
