//! Sample workers and helpers shared by the sample binaries.

pub mod definitions;
pub mod logging;
pub mod workers;

pub use workers::sample_registry;
