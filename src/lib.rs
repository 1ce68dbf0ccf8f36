//! Story Automaton: deterministic branching stories with generated prose.
//!
//! A story is a finite state machine used generatively. States are scenes,
//! actions are the labelled edges a player may take, and designated sink
//! states classify how a playthrough ends. On top of that skeleton a
//! context-free grammar decorates every scene with freshly generated
//! flavor text, so replaying a branch reads differently each time while
//! the structure underneath stays deterministic and seed-replayable.

pub mod core;
pub mod schema;
pub mod stories;
