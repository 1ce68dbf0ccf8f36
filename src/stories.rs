//! Bundled stories.
//!
//! Two complete fixtures ship inside the crate so the engine is playable
//! without any files on disk: a short treasure-hunt cave and a longer
//! derelict-ship scenario with a synonym table for free-text play. The RON
//! sources live under `story_data/` and are embedded at compile time.

use crate::core::grammar::{Grammar, GrammarError};
use crate::core::matcher::{ActionMatcher, MatcherError};
use crate::core::story::{Story, StoryError};

pub const CAVE_STORY_RON: &str = include_str!("../story_data/cave/story.ron");
pub const CAVE_GRAMMAR_RON: &str = include_str!("../story_data/cave/grammar.ron");
pub const DERELICT_STORY_RON: &str = include_str!("../story_data/derelict/story.ron");
pub const DERELICT_GRAMMAR_RON: &str = include_str!("../story_data/derelict/grammar.ron");
pub const DERELICT_SYNONYMS_RON: &str = include_str!("../story_data/derelict/synonyms.ron");

/// The cave treasure hunt: fourteen states, six endings.
pub fn cave_story() -> Result<Story, StoryError> {
    Story::parse_ron(CAVE_STORY_RON)
}

/// Flavor text for the cave story.
pub fn cave_grammar() -> Result<Grammar, GrammarError> {
    Grammar::parse_ron(CAVE_GRAMMAR_RON)
}

/// The derelict ship scenario: the long-form fixture.
pub fn derelict_story() -> Result<Story, StoryError> {
    Story::parse_ron(DERELICT_STORY_RON)
}

/// Flavor text for the derelict ship.
pub fn derelict_grammar() -> Result<Grammar, GrammarError> {
    Grammar::parse_ron(DERELICT_GRAMMAR_RON)
}

/// Free-text synonyms for the derelict ship's actions.
pub fn derelict_synonyms() -> Result<ActionMatcher, MatcherError> {
    ActionMatcher::parse_ron(DERELICT_SYNONYMS_RON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_fixtures_parse_and_validate() {
        let cave = cave_story().unwrap();
        assert_eq!(cave.start(), "start");
        let derelict = derelict_story().unwrap();
        assert_eq!(derelict.start(), "start");
        assert!(!cave_grammar().unwrap().rules.is_empty());
        assert!(!derelict_grammar().unwrap().rules.is_empty());
        assert!(!derelict_synonyms().unwrap().actions().is_empty());
    }
}
