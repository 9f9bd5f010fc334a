//! Simulation driver surface: the clock that turns wall-clock frames into simulated
//! years, the integrator that ages stars and runs mass transfer, and the context
//! object that owns every piece of mutable state.
//!
//! The host owns the real-time loop. Nothing here blocks or sleeps.

pub mod clock;
pub mod integrator;
pub mod simulation;

pub use clock::{ClockMode, next_clock_tick};
pub use integrator::{StepReport, TimeIntegrator};
pub use simulation::{Playback, Simulation, SimulationSettings, SimulationSnapshot, StarSnapshot};
pub use stellar_binary::{BinarySystem, MassTransfer, RocheGeometry, TransferOutcome};
pub use stellar_star::{Fate, LifecycleEvent, Stage, Star, StarDisplay, StarId, StarPair};
