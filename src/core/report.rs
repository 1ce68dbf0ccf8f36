//! Turn reports: the snapshot handed to a front end after every step.
//!
//! A [`TurnReport`] bundles everything a client renders for one turn: where
//! the playthrough stands, the grammar-decorated scene text, the actions on
//! offer, the visit trail, and ending information once a sink is reached.
//! `success` is only present on reports produced in response to an action,
//! so a plain position snapshot serializes without it.

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::core::automaton::Automaton;
use crate::core::grammar::Grammar;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub current_state: String,
    pub story_text: String,
    pub possible_transitions: Vec<String>,
    pub visited_states: Vec<String>,
    pub is_final_state: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub grammar_sample: String,
}

impl TurnReport {
    /// Describe the current position without judging any action.
    pub fn snapshot(session: &Automaton, grammar: &Grammar, rng: &mut StdRng) -> TurnReport {
        Self::build(session, grammar, None, rng)
    }

    /// Describe the position after an action attempt; `accepted` records
    /// whether the automaton took it.
    pub fn after_action(
        session: &Automaton,
        grammar: &Grammar,
        accepted: bool,
        rng: &mut StdRng,
    ) -> TurnReport {
        Self::build(session, grammar, Some(accepted), rng)
    }

    fn build(
        session: &Automaton,
        grammar: &Grammar,
        success: Option<bool>,
        rng: &mut StdRng,
    ) -> TurnReport {
        let state = session.current_state();
        let story_text = grammar.enhance(&state.description, &state.id, rng);
        let grammar_sample = grammar.generate(rng);
        TurnReport {
            current_state: state.id.clone(),
            story_text,
            possible_transitions: state.actions().into_iter().map(str::to_string).collect(),
            visited_states: session.visited().to_vec(),
            is_final_state: state.is_terminal(),
            final_type: session.outcome().map(|outcome| outcome.tag().to_string()),
            success,
            grammar_sample,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::story::Story;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn gate_story() -> Arc<Story> {
        let story = Story::parse_ron(
            r#"(
                title: "Gate",
                start: "gate",
                states: {
                    "gate": (
                        description: "You stand at the gate.",
                        transitions: { "enter": "hall", "walk_away": "road" },
                    ),
                    "hall": (
                        description: "A great hall.",
                        transitions: { "back": "gate" },
                    ),
                    "road": (
                        description: "You walk away.",
                        ending: Some(NeutralEnding),
                    ),
                },
            )"#,
        )
        .unwrap();
        Arc::new(story)
    }

    fn wind_grammar() -> Grammar {
        Grammar::parse_ron(
            r#"(
                start: "S",
                rules: { "S": [ ["the", "wind", "howls"] ] },
                enhancements: { "gate": "The hinges creak." },
            )"#,
        )
        .unwrap()
    }

    #[test]
    fn snapshot_reports_the_current_position() {
        let session = Automaton::new(gate_story());
        let grammar = wind_grammar();
        let mut rng = StdRng::seed_from_u64(11);
        let report = TurnReport::snapshot(&session, &grammar, &mut rng);
        assert_eq!(report.current_state, "gate");
        assert_eq!(
            report.story_text,
            "You stand at the gate.\n\nThe hinges creak.\n\n\u{1f4ad} the wind howls"
        );
        assert_eq!(report.possible_transitions, vec!["enter", "walk_away"]);
        assert_eq!(report.visited_states, vec!["gate"]);
        assert!(!report.is_final_state);
        assert!(report.final_type.is_none());
        assert!(report.success.is_none());
        assert_eq!(report.grammar_sample, "the wind howls");
    }

    #[test]
    fn terminal_report_carries_the_ending() {
        let mut session = Automaton::new(gate_story());
        let grammar = wind_grammar();
        let mut rng = StdRng::seed_from_u64(11);
        let accepted = session.transition("walk_away");
        let report = TurnReport::after_action(&session, &grammar, accepted, &mut rng);
        assert_eq!(report.current_state, "road");
        assert!(report.is_final_state);
        assert_eq!(report.final_type.as_deref(), Some("neutral-ending"));
        assert_eq!(report.success, Some(true));
        assert!(report.possible_transitions.is_empty());
        assert_eq!(report.visited_states, vec!["gate", "road"]);
    }

    #[test]
    fn rejected_action_keeps_the_position() {
        let mut session = Automaton::new(gate_story());
        let grammar = wind_grammar();
        let mut rng = StdRng::seed_from_u64(11);
        let accepted = session.transition("fly");
        let report = TurnReport::after_action(&session, &grammar, accepted, &mut rng);
        assert_eq!(report.success, Some(false));
        assert_eq!(report.current_state, "gate");
        assert_eq!(report.visited_states, vec!["gate"]);
    }

    #[test]
    fn json_omits_absent_optional_fields() {
        let mut session = Automaton::new(gate_story());
        let grammar = wind_grammar();
        let mut rng = StdRng::seed_from_u64(11);

        let snapshot = TurnReport::snapshot(&session, &grammar, &mut rng);
        let value = serde_json::to_value(&snapshot).unwrap();
        assert!(value.get("success").is_none());
        assert!(value.get("final_type").is_none());
        assert_eq!(value["current_state"], "gate");

        session.transition("walk_away");
        let report = TurnReport::after_action(&session, &grammar, true, &mut rng);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["final_type"], "neutral-ending");

        let back: TurnReport = serde_json::from_value(value).unwrap();
        assert_eq!(back, report);
    }
}
