/// Cave Treasure demo: a scripted run through the bundled cave story.
///
/// Follows the boat route to the main treasure, printing the turn report
/// the engine would hand a front end after every step, and finishes with
/// the final report in its JSON wire shape.
///
/// Run with: cargo run --example cave_treasure

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use story_automaton::core::automaton::Automaton;
use story_automaton::core::report::TurnReport;
use story_automaton::stories;

fn main() {
    let story = Arc::new(stories::cave_story().expect("bundled cave story"));
    let grammar = stories::cave_grammar().expect("bundled cave grammar");
    let mut rng = StdRng::seed_from_u64(2026);

    let mut run = Automaton::new(Arc::clone(&story));

    println!("=== {} ===\n", story.title());
    let mut last = TurnReport::snapshot(&run, &grammar, &mut rng);
    print_turn(&last);

    for action in ["explore", "left", "find_boat", "explore"] {
        println!(">>> {}\n", action);
        let accepted = run.transition(action);
        last = TurnReport::after_action(&run, &grammar, accepted, &mut rng);
        print_turn(&last);
    }

    println!("--- Final report as JSON ---");
    println!(
        "{}",
        serde_json::to_string_pretty(&last).expect("report serializes")
    );
}

fn print_turn(report: &TurnReport) {
    println!("{}\n", report.story_text);
    if report.is_final_state {
        if let Some(ref final_type) = report.final_type {
            println!("[ending: {}]", final_type);
        }
        println!("[path: {}]", report.visited_states.join(" -> "));
    } else {
        println!("[actions: {}]", report.possible_transitions.join(", "));
    }
    println!();
}
