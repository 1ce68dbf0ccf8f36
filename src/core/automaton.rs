//! The deterministic walker over a story table.
//!
//! An [`Automaton`] holds a position in a validated [`Story`] plus the trail
//! of states seen so far. Actions either move it (exactly one target per
//! action, table validation guarantees the target exists) or are rejected
//! without side effects, so a caller can probe freely.

use std::sync::Arc;

use crate::core::story::Story;
use crate::schema::outcome::Outcome;
use crate::schema::state::State;

/// A playthrough in progress: current position plus visit history.
///
/// Cheap to clone; clones advance independently, which is how lookahead
/// and what-if exploration are done.
#[derive(Debug, Clone)]
pub struct Automaton {
    story: Arc<Story>,
    current: State,
    visited: Vec<String>,
}

impl Automaton {
    /// Start a fresh playthrough at the story's start state.
    pub fn new(story: Arc<Story>) -> Self {
        let current = story.start_state().clone();
        let visited = vec![current.id.clone()];
        Automaton {
            story,
            current,
            visited,
        }
    }

    /// Rebuild a playthrough from a stored position and trail.
    ///
    /// Unknown ids in `visited` are dropped rather than trusted; an unknown
    /// `current` falls back to a fresh playthrough. The start state is kept
    /// first in the trail and the current state is appended if the stored
    /// trail somehow lost it.
    pub fn resume(story: Arc<Story>, current: &str, visited: &[String]) -> Self {
        let current = match story.state(current) {
            Some(state) => state.clone(),
            None => return Self::new(story),
        };
        let mut trail: Vec<String> = vec![story.start().to_string()];
        for id in visited {
            if story.state(id).is_some() && !trail.contains(id) {
                trail.push(id.clone());
            }
        }
        if !trail.contains(&current.id) {
            trail.push(current.id.clone());
        }
        Automaton {
            story,
            current,
            visited: trail,
        }
    }

    /// The state the playthrough currently sits in.
    pub fn current_state(&self) -> &State {
        &self.current
    }

    /// Id of the current state.
    pub fn current_id(&self) -> &str {
        &self.current.id
    }

    /// Actions available from the current state, sorted.
    pub fn available_actions(&self) -> Vec<&str> {
        self.current.actions()
    }

    /// Attempt an action. Returns `true` and moves on success; returns
    /// `false` and leaves position and trail untouched when the action is
    /// not defined here (which includes every action at a terminal state).
    pub fn transition(&mut self, action: &str) -> bool {
        let target = match self.current.transitions.get(action) {
            Some(target) => target.clone(),
            None => return false,
        };
        let next = match self.story.state(&target) {
            Some(state) => state.clone(),
            // unreachable on a validated table, refuse rather than panic
            None => return false,
        };
        if !self.visited.contains(&next.id) {
            self.visited.push(next.id.clone());
        }
        self.current = next;
        true
    }

    /// Throw away position and trail and stand at the start again.
    pub fn reset(&mut self) {
        self.current = self.story.start_state().clone();
        self.visited = vec![self.current.id.clone()];
    }

    /// Whether the playthrough can go no further.
    pub fn is_terminal(&self) -> bool {
        self.current.is_terminal()
    }

    /// The ending classification, once a designated ending is reached.
    pub fn outcome(&self) -> Option<Outcome> {
        self.current.ending
    }

    /// Ids of every state seen so far, in first-visit order.
    pub fn visited(&self) -> &[String] {
        &self.visited
    }

    /// The story this playthrough walks.
    pub fn story(&self) -> &Story {
        &self.story
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loop_story() -> Arc<Story> {
        let story = Story::parse_ron(
            r#"(
                title: "Hub and Pit",
                start: "hub",
                states: {
                    "hub": (
                        description: "A round chamber.",
                        transitions: { "east": "east_room", "down": "pit" },
                    ),
                    "east_room": (
                        description: "A narrow room.",
                        transitions: { "west": "hub" },
                    ),
                    "pit": (
                        description: "You fall.",
                        ending: Some(Defeat),
                    ),
                },
            )"#,
        )
        .unwrap();
        Arc::new(story)
    }

    fn ids(v: &[String]) -> Vec<&str> {
        v.iter().map(String::as_str).collect()
    }

    #[test]
    fn fresh_playthrough_sits_at_start() {
        let auto = Automaton::new(loop_story());
        assert_eq!(auto.current_id(), "hub");
        assert_eq!(ids(auto.visited()), vec!["hub"]);
        assert!(!auto.is_terminal());
        assert!(auto.outcome().is_none());
    }

    #[test]
    fn valid_action_moves_and_records() {
        let mut auto = Automaton::new(loop_story());
        assert!(auto.transition("east"));
        assert_eq!(auto.current_id(), "east_room");
        assert_eq!(ids(auto.visited()), vec!["hub", "east_room"]);
    }

    #[test]
    fn invalid_action_changes_nothing() {
        let mut auto = Automaton::new(loop_story());
        assert!(!auto.transition("fly"));
        assert_eq!(auto.current_id(), "hub");
        assert_eq!(ids(auto.visited()), vec!["hub"]);
    }

    #[test]
    fn revisits_are_not_duplicated() {
        let mut auto = Automaton::new(loop_story());
        assert!(auto.transition("east"));
        assert!(auto.transition("west"));
        assert!(auto.transition("east"));
        assert_eq!(auto.current_id(), "east_room");
        assert_eq!(ids(auto.visited()), vec!["hub", "east_room"]);
    }

    #[test]
    fn terminal_state_rejects_everything() {
        let mut auto = Automaton::new(loop_story());
        assert!(auto.transition("down"));
        assert!(auto.is_terminal());
        assert_eq!(auto.outcome(), Some(Outcome::Defeat));
        assert!(auto.available_actions().is_empty());
        assert!(!auto.transition("east"));
        assert!(!auto.transition("down"));
        assert_eq!(auto.current_id(), "pit");
    }

    #[test]
    fn reset_returns_to_start() {
        let mut auto = Automaton::new(loop_story());
        auto.transition("down");
        auto.reset();
        assert_eq!(auto.current_id(), "hub");
        assert_eq!(ids(auto.visited()), vec!["hub"]);
        auto.reset();
        assert_eq!(auto.current_id(), "hub");
    }

    #[test]
    fn same_actions_same_trail() {
        let story = loop_story();
        let mut first = Automaton::new(Arc::clone(&story));
        let mut second = Automaton::new(story);
        for action in ["east", "west", "down"] {
            assert_eq!(first.transition(action), second.transition(action));
        }
        assert_eq!(first.current_id(), second.current_id());
        assert_eq!(first.visited(), second.visited());
    }

    #[test]
    fn available_actions_are_sorted() {
        let auto = Automaton::new(loop_story());
        assert_eq!(auto.available_actions(), vec!["down", "east"]);
    }

    #[test]
    fn resume_restores_position_and_trail() {
        let story = loop_story();
        let visited = vec!["hub".to_string(), "east_room".to_string()];
        let auto = Automaton::resume(Arc::clone(&story), "east_room", &visited);
        assert_eq!(auto.current_id(), "east_room");
        assert_eq!(ids(auto.visited()), vec!["hub", "east_room"]);
    }

    #[test]
    fn resume_with_unknown_current_starts_fresh() {
        let story = loop_story();
        let visited = vec!["hub".to_string()];
        let auto = Automaton::resume(story, "limbo", &visited);
        assert_eq!(auto.current_id(), "hub");
        assert_eq!(ids(auto.visited()), vec!["hub"]);
    }

    #[test]
    fn resume_scrubs_junk_from_the_trail() {
        let story = loop_story();
        let visited = vec![
            "east_room".to_string(),
            "limbo".to_string(),
            "east_room".to_string(),
        ];
        let auto = Automaton::resume(story, "pit", &visited);
        assert_eq!(auto.current_id(), "pit");
        assert_eq!(ids(auto.visited()), vec!["hub", "east_room", "pit"]);
    }
}
