pub mod outcome;
pub mod state;
