use std::fmt;

use serde::Serialize;
use stellar_relations::Fate;

/// Identifies one of the two stars owned by a simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StarId {
    Primary,
    Secondary,
}

impl StarId {
    /// The companion of this star in a binary.
    pub fn other(self) -> Self {
        match self {
            StarId::Primary => StarId::Secondary,
            StarId::Secondary => StarId::Primary,
        }
    }
}

impl fmt::Display for StarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StarId::Primary => f.write_str("primary"),
            StarId::Secondary => f.write_str("secondary"),
        }
    }
}

/// Discrete life-cycle transitions reported by an integration step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LifecycleEvent {
    /// The star reached the end of its life this step. `supernova` is set at most
    /// once per star, and only for initial masses at or above the core-collapse limit.
    EndOfLife {
        star: StarId,
        fate: Fate,
        supernova: bool,
    },
}

impl LifecycleEvent {
    pub fn star(&self) -> StarId {
        match self {
            LifecycleEvent::EndOfLife { star, .. } => *star,
        }
    }
}
