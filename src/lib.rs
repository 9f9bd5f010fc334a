//! Stellar evolution and binary mass-transfer engine.
//!
//! The physics lives in the member crates; this crate re-exports them so front-ends
//! (the `evolve` CLI, a browser host, tests) share one import path, and adds the glue
//! that turns a loaded scenario into a running simulation.

pub mod scenario;

pub use stellar_binary as binary;
pub use stellar_config as config;
pub use stellar_core as core;
pub use stellar_export as export;
pub use stellar_relations as relations;
pub use stellar_sim as sim;
pub use stellar_star as star;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
