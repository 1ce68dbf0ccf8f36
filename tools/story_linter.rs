/// Story Linter: validates a story table and its companion files.
///
/// Usage: story_linter <story.ron> [--grammar <file>] [--synonyms <file>]
///
/// Structural violations (dangling transitions, endings with exits) are
/// rejected at load time by the library itself; this tool reports the
/// softer problems on top of that, plus grammar cycles, which would hang
/// expansion at runtime.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::process;

use story_automaton::core::grammar::Grammar;
use story_automaton::core::matcher::ActionMatcher;
use story_automaton::core::story::Story;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: story_linter <story.ron> [--grammar <file>] [--synonyms <file>]");
        process::exit(0);
    }

    let story_path = &args[1];
    let mut grammar_path = None;
    let mut synonyms_path = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--grammar" if i + 1 < args.len() => {
                i += 1;
                grammar_path = Some(args[i].clone());
            }
            "--synonyms" if i + 1 < args.len() => {
                i += 1;
                synonyms_path = Some(args[i].clone());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let story = match Story::load_from_ron(Path::new(story_path)) {
        Ok(story) => story,
        Err(e) => {
            eprintln!("ERROR: failed to load story: {}", e);
            process::exit(1);
        }
    };
    let overview = story.graph();
    println!(
        "Loaded '{}': {} states, {} transitions, {} endings",
        story.title(),
        overview.total_states,
        overview.total_transitions,
        overview.final_states
    );

    let grammar = match grammar_path {
        Some(ref path) => match Grammar::load_from_ron(Path::new(path)) {
            Ok(grammar) => {
                println!("Loaded grammar: {} rules", grammar.rules.len());
                Some(grammar)
            }
            Err(e) => {
                eprintln!("ERROR: failed to load grammar: {}", e);
                process::exit(1);
            }
        },
        None => None,
    };

    let matcher = match synonyms_path {
        Some(ref path) => match ActionMatcher::load_from_ron(Path::new(path)) {
            Ok(matcher) => {
                println!("Loaded synonyms: {} actions", matcher.actions().len());
                Some(matcher)
            }
            Err(e) => {
                eprintln!("ERROR: failed to load synonyms: {}", e);
                process::exit(1);
            }
        },
        None => None,
    };

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    lint_story(&story, &mut warnings);
    if let Some(ref grammar) = grammar {
        lint_grammar(grammar, &mut errors, &mut warnings);
        lint_enhancements(&story, grammar, &mut warnings);
    }
    if let Some(ref matcher) = matcher {
        lint_synonyms(&story, matcher, &mut warnings);
    }

    println!("\n=== Story Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_story(story: &Story, warnings: &mut Vec<String>) {
    for id in unreachable_states(story) {
        warnings.push(format!("state '{}' is unreachable from the start", id));
    }

    let has_endings = story.states().any(|s| s.ending.is_some());
    if !has_endings {
        warnings.push("story has no ending states".to_string());
    }

    for state in story.states() {
        if state.is_terminal() && state.ending.is_none() {
            warnings.push(format!(
                "state '{}' is a dead end without an ending designation",
                state.id
            ));
        }
    }

    if has_endings {
        for id in states_that_cannot_finish(story) {
            warnings.push(format!("state '{}' cannot reach any ending", id));
        }
    }
}

fn unreachable_states(story: &Story) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(story.start().to_string());
    let mut queue = vec![story.start().to_string()];
    while let Some(id) = queue.pop() {
        if let Some(transitions) = story.transitions_of(&id) {
            for target in transitions.values() {
                if seen.insert(target.clone()) {
                    queue.push(target.clone());
                }
            }
        }
    }
    story
        .state_ids()
        .into_iter()
        .filter(|id| !seen.contains(*id))
        .map(str::to_string)
        .collect()
}

fn states_that_cannot_finish(story: &Story) -> Vec<String> {
    let mut reverse: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut terminals: Vec<&str> = Vec::new();
    for state in story.states() {
        if state.is_terminal() {
            terminals.push(state.id.as_str());
        }
        for target in state.transitions.values() {
            reverse
                .entry(target.as_str())
                .or_default()
                .push(state.id.as_str());
        }
    }
    let mut can_finish: HashSet<&str> = terminals.iter().copied().collect();
    let mut queue = terminals;
    while let Some(id) = queue.pop() {
        if let Some(parents) = reverse.get(id) {
            for &parent in parents {
                if can_finish.insert(parent) {
                    queue.push(parent);
                }
            }
        }
    }
    story
        .state_ids()
        .into_iter()
        .filter(|id| !can_finish.contains(*id))
        .map(str::to_string)
        .collect()
}

fn lint_grammar(grammar: &Grammar, errors: &mut Vec<String>, warnings: &mut Vec<String>) {
    find_cycles(grammar, errors);

    for (name, productions) in &grammar.rules {
        if productions.len() < 2 {
            warnings.push(format!(
                "rule '{}' has only {} alternatives",
                name,
                productions.len()
            ));
        }
        for production in productions {
            for word in &production.symbols {
                if looks_like_symbol(word) && !grammar.rules.contains_key(word) {
                    warnings.push(format!(
                        "rule '{}' references '{}' which has no rule; it will come out as literal text",
                        name, word
                    ));
                }
            }
        }
    }
}

fn looks_like_symbol(word: &str) -> bool {
    word.len() > 1 && word.chars().all(|c| c.is_ascii_uppercase() || c == '_')
}

fn find_cycles(grammar: &Grammar, errors: &mut Vec<String>) {
    let mut done: HashSet<&str> = HashSet::new();
    for symbol in grammar.non_terminals() {
        let mut path: Vec<&str> = Vec::new();
        visit(grammar, symbol, &mut path, &mut done, errors);
    }
}

fn visit<'a>(
    grammar: &'a Grammar,
    symbol: &'a str,
    path: &mut Vec<&'a str>,
    done: &mut HashSet<&'a str>,
    errors: &mut Vec<String>,
) {
    if done.contains(symbol) {
        return;
    }
    if let Some(pos) = path.iter().position(|s| *s == symbol) {
        let mut cycle: Vec<&str> = path[pos..].to_vec();
        cycle.push(symbol);
        errors.push(format!(
            "grammar cycle (expansion would never terminate): {}",
            cycle.join(" -> ")
        ));
        for member in cycle {
            done.insert(member);
        }
        return;
    }
    let productions = match grammar.rules.get(symbol) {
        Some(productions) => productions,
        None => return,
    };
    path.push(symbol);
    for production in productions {
        for word in &production.symbols {
            if grammar.rules.contains_key(word) {
                visit(grammar, word, path, done, errors);
            }
        }
    }
    path.pop();
    done.insert(symbol);
}

fn lint_enhancements(story: &Story, grammar: &Grammar, warnings: &mut Vec<String>) {
    let mut keys: Vec<&String> = grammar.enhancements.keys().collect();
    keys.sort();
    for key in keys {
        if story.state(key).is_none() {
            warnings.push(format!("enhancement key '{}' names no state", key));
        }
    }
}

fn lint_synonyms(story: &Story, matcher: &ActionMatcher, warnings: &mut Vec<String>) {
    let alphabet = story.alphabet();
    for action in matcher.actions() {
        if !alphabet.contains(action) {
            warnings.push(format!(
                "synonym entry '{}' names no action in the story",
                action
            ));
        }
    }
}
