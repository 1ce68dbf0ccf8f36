pub mod automaton;
pub mod grammar;
pub mod matcher;
pub mod report;
pub mod story;
