//! Star entity and its life-cycle state machine.
//!
//! A [`Star`] is created fresh for every initial mass; its phase durations, fate, and
//! display quantities always follow the *current* mass, while the giant/supergiant
//! branch and supernova eligibility follow the *initial* mass.

mod event;
mod pair;
mod stage;
mod star;

pub use event::{LifecycleEvent, StarId};
pub use pair::StarPair;
pub use stage::Stage;
pub use star::{Collapse, Star, StarDisplay};
pub use stellar_relations::{Fate, PhaseDurations};
