//! Binary star policy: Roche-lobe geometry, donor selection, and conservative mass
//! transfer between the two stars of a [`StarPair`].
//!
//! The separation is a fixed scalar; no orbital evolution is modelled.

pub mod roche;

mod system;

pub use roche::{overfills, physical_radius_au, roche_lobe_fraction, roche_lobe_radius_au};
pub use system::{BinarySystem, MassTransfer, RocheGeometry, TransferOutcome};
pub use stellar_star::StarPair;
