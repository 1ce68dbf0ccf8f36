//! Context-free text generation.
//!
//! A [`Grammar`] maps symbol names to lists of alternative productions.
//! Expansion picks one alternative uniformly at random, expands each of its
//! symbols in turn, and joins the pieces with single spaces. Any symbol
//! without a rule is emitted as literal text, which is also how terminals
//! are written: plain words sitting inside a production.
//!
//! Grammars are expected to be acyclic. Expansion recurses without a depth
//! cap, so a cycle in the rules will overflow the stack; the linter tool
//! exists to catch that before a grammar ships.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix for the generated inner-monologue line appended to scene text.
pub const THOUGHT_MARKER: &str = "\u{1f4ad} ";

/// Errors raised while loading a grammar file.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("IO error reading grammar file: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// One alternative: the sequence of symbols it expands to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Production {
    pub symbols: Vec<String>,
}

/// A context-free grammar plus optional per-state enhancement snippets.
///
/// File format:
/// ```ron
/// (
///     start: "S",
///     rules: {
///         "S": [ ["GREETING", "NAME"] ],
///         "GREETING": [ ["Hello"], ["Good", "evening"] ],
///         "NAME": [ ["world"], ["stranger"] ],
///     },
///     enhancements: {
///         "gate": "The hinges creak.",
///     },
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Grammar {
    pub start: String,
    pub rules: HashMap<String, Vec<Production>>,
    #[serde(default)]
    pub enhancements: HashMap<String, String>,
}

impl Grammar {
    /// Load a grammar from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Grammar, GrammarError> {
        let contents = fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a grammar from a RON string.
    pub fn parse_ron(input: &str) -> Result<Grammar, GrammarError> {
        Ok(ron::from_str(input)?)
    }

    /// Expand the start symbol into a fresh sentence.
    pub fn generate(&self, rng: &mut StdRng) -> String {
        self.expand(&self.start, rng)
    }

    /// Expand one symbol. Symbols without a rule, and symbols whose rule
    /// lists no alternatives, come back as their own literal text.
    pub fn expand(&self, symbol: &str, rng: &mut StdRng) -> String {
        let productions = match self.rules.get(symbol) {
            Some(productions) => productions,
            None => return symbol.to_string(),
        };
        let production = match productions.choose(rng) {
            Some(production) => production,
            None => return symbol.to_string(),
        };
        production
            .symbols
            .iter()
            .map(|part| self.expand(part, rng))
            .collect::<Vec<String>>()
            .join(" ")
    }

    /// Decorate a scene description: append the enhancement snippet for
    /// `state_id` when one exists, then a generated thought line.
    pub fn enhance(&self, base: &str, state_id: &str, rng: &mut StdRng) -> String {
        let mut text = base.to_string();
        if let Some(snippet) = self.enhancements.get(state_id) {
            text.push_str("\n\n");
            text.push_str(snippet);
        }
        text.push_str("\n\n");
        text.push_str(THOUGHT_MARKER);
        text.push_str(&self.generate(rng));
        text
    }

    /// Every symbol that has a rule, sorted.
    pub fn non_terminals(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    /// Pick a random rule-bearing symbol, or `None` for an empty grammar.
    pub fn random_symbol(&self, rng: &mut StdRng) -> Option<&str> {
        self.non_terminals().choose(rng).copied()
    }

    /// Inspect one symbol's alternatives, or `None` if it has no rule.
    pub fn analyze(&self, symbol: &str) -> Option<SymbolInfo<'_>> {
        self.rules
            .get_key_value(symbol)
            .map(|(name, productions)| SymbolInfo {
                symbol: name.as_str(),
                productions: productions.as_slice(),
                count: productions.len(),
            })
    }
}

/// A borrowed view of one symbol's rule, for tooling and diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct SymbolInfo<'a> {
    pub symbol: &'a str,
    pub productions: &'a [Production],
    pub count: usize,
}
