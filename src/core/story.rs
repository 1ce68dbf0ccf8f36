//! Validated state tables: RON loading, construction-time invariant checks,
//! read accessors, and the graph export served to visualization front ends.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::outcome::Outcome;
use crate::schema::state::State;

/// Errors raised while loading or validating a story table.
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("duplicate state id: {0}")]
    DuplicateState(String),
    #[error("start state '{0}' is not in the table")]
    UnknownStart(String),
    #[error("state '{state}' action '{action}' targets unknown state '{target}'")]
    DanglingTransition {
        state: String,
        action: String,
        target: String,
    },
    #[error("ending state '{0}' still has outgoing transitions")]
    EndingWithExits(String),
    #[error("IO error reading story file: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// An immutable, validated narrative state table.
///
/// Construction is the only place invariants are checked, so a `Story` in
/// hand always satisfies them: the start state exists, every transition
/// target exists, and designated endings have no exits. Fields stay private
/// to keep a validated table from drifting afterwards.
#[derive(Debug, Clone)]
pub struct Story {
    title: String,
    start: String,
    states: HashMap<String, State>,
}

impl Story {
    /// Build a story from loose states, checking every table invariant.
    pub fn from_states(
        title: String,
        start: String,
        states: Vec<State>,
    ) -> Result<Self, StoryError> {
        let mut table: HashMap<String, State> = HashMap::with_capacity(states.len());
        for state in states {
            if table.contains_key(&state.id) {
                return Err(StoryError::DuplicateState(state.id));
            }
            table.insert(state.id.clone(), state);
        }
        if !table.contains_key(&start) {
            return Err(StoryError::UnknownStart(start));
        }
        for state in table.values() {
            for (action, target) in &state.transitions {
                if !table.contains_key(target) {
                    return Err(StoryError::DanglingTransition {
                        state: state.id.clone(),
                        action: action.clone(),
                        target: target.clone(),
                    });
                }
            }
            if state.ending.is_some() && !state.transitions.is_empty() {
                return Err(StoryError::EndingWithExits(state.id.clone()));
            }
        }
        Ok(Story {
            title,
            start,
            states: table,
        })
    }

    /// Load a story from a RON file on disk.
    pub fn load_from_ron(path: &Path) -> Result<Self, StoryError> {
        let text = fs::read_to_string(path)?;
        Self::parse_ron(&text)
    }

    /// Parse a story from RON text.
    ///
    /// File format:
    /// ```ron
    /// (
    ///     title: "Demo",
    ///     start: "gate",
    ///     states: {
    ///         "gate": (
    ///             description: "You stand at the gate.",
    ///             transitions: { "enter": "hall", "leave": "road" },
    ///         ),
    ///         "hall": (
    ///             description: "A great hall.",
    ///             transitions: { "back": "gate" },
    ///         ),
    ///         "road": (
    ///             description: "You walk away.",
    ///             ending: Some(NeutralEnding),
    ///         ),
    ///     },
    /// )
    /// ```
    pub fn parse_ron(text: &str) -> Result<Self, StoryError> {
        let raw: RonStory = ron::from_str(text)?;
        let states = raw
            .states
            .into_iter()
            .map(|(id, def)| State {
                id,
                description: def.description,
                transitions: def.transitions,
                ending: def.ending,
            })
            .collect();
        Self::from_states(raw.title, raw.start, states)
    }

    /// Display title of the story.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Id of the designated start state.
    pub fn start(&self) -> &str {
        &self.start
    }

    /// The start state record.
    pub fn start_state(&self) -> &State {
        // from_states guarantees the start id is a table key
        &self.states[&self.start]
    }

    /// Look up a state by id.
    pub fn state(&self, id: &str) -> Option<&State> {
        self.states.get(id)
    }

    /// All state ids, sorted.
    pub fn state_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.states.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// The transition map of a state, if the id exists.
    pub fn transitions_of(&self, id: &str) -> Option<&HashMap<String, String>> {
        self.states.get(id).map(|state| &state.transitions)
    }

    /// Every action label appearing on any transition in the table.
    pub fn alphabet(&self) -> FxHashSet<&str> {
        let mut alphabet = FxHashSet::default();
        for state in self.states.values() {
            for action in state.transitions.keys() {
                alphabet.insert(action.as_str());
            }
        }
        alphabet
    }

    /// Iterate over all states, in unspecified order.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.values()
    }

    /// Export the table for graph visualization front ends.
    pub fn graph(&self) -> StoryGraph {
        let mut nodes: Vec<GraphNode> = self
            .states
            .values()
            .map(|state| GraphNode {
                id: state.id.clone(),
                label: state.id.clone(),
                description: state.description.clone(),
                is_final: state.is_terminal(),
                final_type: state.ending.map(|outcome| outcome.tag().to_string()),
                transitions: state.transitions.clone(),
            })
            .collect();
        nodes.sort_unstable_by(|a, b| a.id.cmp(&b.id));
        let total_transitions = self.states.values().map(|s| s.transitions.len()).sum();
        let final_states = self.states.values().filter(|s| s.is_terminal()).count();
        StoryGraph {
            total_states: nodes.len(),
            total_transitions,
            final_states,
            states: nodes,
        }
    }
}

/// One state as exposed to the visualization collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub description: String,
    pub is_final: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_type: Option<String>,
    pub transitions: HashMap<String, String>,
}

/// Whole-table export: per-state nodes plus aggregate counts.
#[derive(Debug, Clone, Serialize)]
pub struct StoryGraph {
    pub states: Vec<GraphNode>,
    pub total_states: usize,
    pub total_transitions: usize,
    pub final_states: usize,
}

/// Serde intermediates for the RON story file format.
#[derive(Debug, Deserialize)]
struct RonStory {
    title: String,
    start: String,
    states: HashMap<String, RonState>,
}

#[derive(Debug, Deserialize)]
struct RonState {
    description: String,
    #[serde(default)]
    transitions: HashMap<String, String>,
    #[serde(default)]
    ending: Option<Outcome>,
}
