use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::schema::outcome::Outcome;

/// A node in the narrative graph: one scene the player can occupy.
///
/// Transitions map an action label to the id of the target state. A state
/// with `ending: Some(..)` is a designated story ending and, in a validated
/// table, carries no transitions; a state whose transition map is empty is
/// treated as terminal either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: String,
    pub description: String,
    #[serde(default)]
    pub transitions: HashMap<String, String>,
    #[serde(default)]
    pub ending: Option<Outcome>,
}

impl State {
    /// True when this state has no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Action labels leaving this state, sorted for deterministic output.
    pub fn actions(&self) -> Vec<&str> {
        let mut actions: Vec<&str> = self.transitions.keys().map(String::as_str).collect();
        actions.sort_unstable();
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crossroads() -> State {
        let mut transitions = HashMap::new();
        transitions.insert("north".to_string(), "tower".to_string());
        transitions.insert("east".to_string(), "river".to_string());
        State {
            id: "crossroads".to_string(),
            description: "Paths split here.".to_string(),
            transitions,
            ending: None,
        }
    }

    #[test]
    fn terminal_means_no_transitions() {
        let mut state = crossroads();
        assert!(!state.is_terminal());
        state.transitions.clear();
        assert!(state.is_terminal());
    }

    #[test]
    fn actions_are_sorted() {
        assert_eq!(crossroads().actions(), vec!["east", "north"]);
    }

    #[test]
    fn an_undesignated_sink_is_still_terminal() {
        let state = State {
            id: "oubliette".to_string(),
            description: "No way out.".to_string(),
            transitions: HashMap::new(),
            ending: None,
        };
        assert!(state.is_terminal());
        assert!(state.ending.is_none());
    }
}
