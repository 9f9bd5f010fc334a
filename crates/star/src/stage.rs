use std::fmt;

use serde::Serialize;
use stellar_relations::Fate;

/// Evolutionary stage, in order of occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "stage", content = "fate", rename_all = "snake_case")]
pub enum Stage {
    Protostar,
    MainSequence,
    Giant,
    Supergiant,
    /// Life has ended; the stage is the frozen fate.
    Remnant(Fate),
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Protostar => "Protostar",
            Stage::MainSequence => "Main Sequence",
            Stage::Giant => "Giant",
            Stage::Supergiant => "Supergiant",
            Stage::Remnant(fate) => fate.label(),
        }
    }

    pub fn is_remnant(self) -> bool {
        matches!(self, Stage::Remnant(_))
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
