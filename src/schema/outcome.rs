use serde::{Deserialize, Serialize};

/// Closed classification of how a finished story ended.
///
/// Story files name variants directly as RON identifiers; JSON reports use
/// the kebab-case strings from [`Outcome::tag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    VictoryMajor,
    VictoryMinor,
    VictorySupreme,
    Defeat,
    NeutralEnding,
}

impl Outcome {
    /// Wire tag used in JSON reports, e.g. "victory-minor".
    pub fn tag(&self) -> &'static str {
        match self {
            Outcome::VictoryMajor => "victory-major",
            Outcome::VictoryMinor => "victory-minor",
            Outcome::VictorySupreme => "victory-supreme",
            Outcome::Defeat => "defeat",
            Outcome::NeutralEnding => "neutral-ending",
        }
    }

    /// True for any victory variant, supreme or otherwise.
    pub fn is_victory(&self) -> bool {
        matches!(
            self,
            Outcome::VictoryMajor | Outcome::VictoryMinor | Outcome::VictorySupreme
        )
    }
}
