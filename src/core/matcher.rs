//! Free-text action resolution.
//!
//! Players type phrases, the automaton wants action ids. An
//! [`ActionMatcher`] turns one into the other in three passes over the
//! actions currently available: exact id match, whole-phrase synonym match,
//! then a looser scan that looks for the id's underscore-separated keywords
//! appearing in order inside the input. The first pass that hits wins, so
//! an exact id is never shadowed by a fuzzy interpretation.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a synonym file.
#[derive(Debug, Error)]
pub enum MatcherError {
    #[error("IO error reading synonym file: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Maps typed phrases to action ids via per-action synonym lists.
///
/// File format:
/// ```ron
/// {
///     "back": ["return", "go back", "retreat"],
///     "examine_sample": ["inspect the sample", "look at the sample"],
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionMatcher {
    synonyms: HashMap<String, Vec<String>>,
}

impl ActionMatcher {
    /// A matcher with no synonyms; exact and keyword matching still work.
    pub fn new() -> ActionMatcher {
        ActionMatcher::default()
    }

    /// Build a matcher, normalizing every phrase to trimmed lowercase.
    pub fn with_synonyms(synonyms: HashMap<String, Vec<String>>) -> ActionMatcher {
        let synonyms = synonyms
            .into_iter()
            .map(|(action, phrases)| {
                let phrases = phrases
                    .into_iter()
                    .map(|phrase| phrase.trim().to_lowercase())
                    .filter(|phrase| !phrase.is_empty())
                    .collect();
                (action, phrases)
            })
            .collect();
        ActionMatcher { synonyms }
    }

    /// Load a synonym table from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<ActionMatcher, MatcherError> {
        let contents = fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a synonym table from a RON string.
    pub fn parse_ron(input: &str) -> Result<ActionMatcher, MatcherError> {
        let raw: HashMap<String, Vec<String>> = ron::from_str(input)?;
        Ok(Self::with_synonyms(raw))
    }

    /// The synonym phrases registered for an action.
    pub fn synonyms_of(&self, action: &str) -> &[String] {
        self.synonyms
            .get(action)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every action with a synonym entry, sorted.
    pub fn actions(&self) -> Vec<&str> {
        let mut actions: Vec<&str> = self.synonyms.keys().map(String::as_str).collect();
        actions.sort_unstable();
        actions
    }

    /// Resolve free text against the actions available right now.
    ///
    /// Returns the matched action from `available`, or `None` when nothing
    /// fits. Matching is case-insensitive and ignores surrounding
    /// whitespace; synonym phrases only match on word boundaries, so
    /// "go back now" resolves to `back` but "returning" does not.
    pub fn resolve<'a>(&self, input: &str, available: &[&'a str]) -> Option<&'a str> {
        let normalized = input.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        for &action in available {
            if action == normalized {
                return Some(action);
            }
        }

        let padded_input = format!(" {} ", normalized);
        for &action in available {
            for phrase in self.synonyms_of(action) {
                if padded_input.contains(&format!(" {} ", phrase)) {
                    return Some(action);
                }
            }
        }

        let words: Vec<&str> = normalized.split_whitespace().collect();
        for &action in available {
            let keywords: Vec<&str> = action.split('_').collect();
            if words.len() >= keywords.len() && keywords_in_order(&words, &keywords) {
                return Some(action);
            }
        }

        None
    }
}

/// Whether every keyword shows up, in order, inside successive input words.
fn keywords_in_order(words: &[&str], keywords: &[&str]) -> bool {
    let mut idx = 0;
    for keyword in keywords {
        let mut found = false;
        while idx < words.len() {
            let word = words[idx];
            idx += 1;
            if word.contains(keyword) {
                found = true;
                break;
            }
        }
        if !found {
            return false;
        }
    }
    true
}
