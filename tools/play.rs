/// Play: run a story interactively in the terminal.
///
/// Usage: play [cave | derelict]
///        play --story <file> [--grammar <file>] [--synonyms <file>] [--seed <n>]
///
/// Type an action name or a free phrase at the prompt. 'restart' begins the
/// story again, 'quit' leaves.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use story_automaton::core::automaton::Automaton;
use story_automaton::core::grammar::Grammar;
use story_automaton::core::matcher::ActionMatcher;
use story_automaton::core::story::Story;
use story_automaton::schema::outcome::Outcome;
use story_automaton::stories;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut bundle: Option<String> = None;
    let mut story_path: Option<String> = None;
    let mut grammar_path: Option<String> = None;
    let mut synonyms_path: Option<String> = None;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_usage();
                return;
            }
            "--story" if i + 1 < args.len() => {
                i += 1;
                story_path = Some(args[i].clone());
            }
            "--grammar" if i + 1 < args.len() => {
                i += 1;
                grammar_path = Some(args[i].clone());
            }
            "--synonyms" if i + 1 < args.len() => {
                i += 1;
                synonyms_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().ok();
            }
            "cave" | "derelict" if bundle.is_none() => {
                bundle = Some(args[i].clone());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let (story, grammar, matcher) = if let Some(ref path) = story_path {
        let story = match Story::load_from_ron(Path::new(path)) {
            Ok(story) => story,
            Err(e) => {
                eprintln!("ERROR: failed to load story: {}", e);
                process::exit(1);
            }
        };
        let grammar = match grammar_path {
            Some(ref path) => match Grammar::load_from_ron(Path::new(path)) {
                Ok(grammar) => grammar,
                Err(e) => {
                    eprintln!("ERROR: failed to load grammar: {}", e);
                    process::exit(1);
                }
            },
            None => Grammar::default(),
        };
        let matcher = match synonyms_path {
            Some(ref path) => match ActionMatcher::load_from_ron(Path::new(path)) {
                Ok(matcher) => matcher,
                Err(e) => {
                    eprintln!("ERROR: failed to load synonyms: {}", e);
                    process::exit(1);
                }
            },
            None => ActionMatcher::new(),
        };
        (story, grammar, matcher)
    } else if bundle.as_deref() == Some("derelict") {
        (
            stories::derelict_story().unwrap(),
            stories::derelict_grammar().unwrap(),
            stories::derelict_synonyms().unwrap(),
        )
    } else {
        (
            stories::cave_story().unwrap(),
            stories::cave_grammar().unwrap(),
            ActionMatcher::new(),
        )
    };

    let story = Arc::new(story);
    let mut run = Automaton::new(Arc::clone(&story));
    let mut rng = match seed {
        Some(n) => StdRng::seed_from_u64(n),
        None => StdRng::from_entropy(),
    };

    println!("=== {} ===\n", story.title());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let state = run.current_state();
        let text = if grammar.rules.is_empty() {
            state.description.clone()
        } else {
            grammar.enhance(&state.description, &state.id, &mut rng)
        };
        println!("{}\n", text);

        if run.is_terminal() {
            match run.outcome() {
                Some(outcome) => println!("{}", banner(outcome)),
                None => println!("The story ends here."),
            }
            println!("Path: {}", run.visited().join(" -> "));
            println!("Type 'restart' to play again, or 'quit' to leave.");
        } else {
            println!("Actions: {}", run.available_actions().join(", "));
        }

        print!("> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        match input {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "restart" => {
                run.reset();
                continue;
            }
            _ => {}
        }
        if run.is_terminal() {
            println!("The story is over. 'restart' or 'quit'.\n");
            continue;
        }

        let resolved = {
            let available = run.available_actions();
            matcher.resolve(input, &available).map(str::to_string)
        };
        let moved = match resolved {
            Some(action) => run.transition(&action),
            None => false,
        };
        if !moved {
            println!("'{}' is not something you can do here.\n", input);
        }
    }
}

fn banner(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::VictoryMinor => "* A quiet win. You leave with more than you brought. *",
        Outcome::VictoryMajor => "* A famous victory. *",
        Outcome::VictorySupreme => "* A victory they will tell stories about. *",
        Outcome::Defeat => "* This is where your story ends. *",
        Outcome::NeutralEnding => "* Not every story ends in glory. *",
    }
}

fn print_usage() {
    println!("Play: run a story interactively in the terminal.");
    println!();
    println!("Usage: play [cave | derelict]");
    println!("       play --story <file> [--grammar <file>] [--synonyms <file>] [--seed <n>]");
    println!();
    println!("  cave | derelict    Play a bundled story (default: cave)");
    println!("  --story <file>     Load a story table from a RON file");
    println!("  --grammar <file>   Load a flavor-text grammar from a RON file");
    println!("  --synonyms <file>  Load free-text synonyms from a RON file");
    println!("  --seed <n>         Seed the flavor-text RNG for a reproducible run");
}
