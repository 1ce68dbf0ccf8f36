/// Omega-Seven demo: free-text play through the derelict ship.
///
/// A scripted player types loose phrases; the synonym matcher resolves each
/// against the actions available in the current scene, and the run ends in
/// the coalition victory.
///
/// Run with: cargo run --example omega_seven

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use story_automaton::core::automaton::Automaton;
use story_automaton::stories;

fn main() {
    let story = Arc::new(stories::derelict_story().expect("bundled derelict story"));
    let grammar = stories::derelict_grammar().expect("bundled derelict grammar");
    let matcher = stories::derelict_synonyms().expect("bundled derelict synonyms");
    let mut rng = StdRng::seed_from_u64(7);

    let mut run = Automaton::new(Arc::clone(&story));
    println!("=== {} ===\n", story.title());

    let typed = [
        "look around",
        "lab",
        "inspect the sample",
        "make contact",
        "understand the message",
        "form an alliance",
        "joint attack",
        "join forces",
    ];

    for input in typed {
        {
            let state = run.current_state();
            println!("{}\n", grammar.enhance(&state.description, &state.id, &mut rng));
        }
        let resolved = {
            let available = run.available_actions();
            println!("[actions: {}]", available.join(", "));
            matcher.resolve(input, &available).map(str::to_string)
        };
        println!("player types: \"{}\"", input);
        match resolved {
            Some(action) => {
                println!("resolved to: {}\n", action);
                if !run.transition(&action) {
                    println!("(the ship does not respond)\n");
                }
            }
            None => println!("(nothing aboard answers to that)\n"),
        }
    }

    let state = run.current_state();
    println!("{}\n", grammar.enhance(&state.description, &state.id, &mut rng));
    if let Some(outcome) = run.outcome() {
        println!("[ending: {}]", outcome.tag());
    }
    println!("[path: {}]", run.visited().join(" -> "));
}
