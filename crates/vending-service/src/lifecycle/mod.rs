//! Startup and shutdown of the actor that hosts the machines.

pub mod tracing;
pub mod vending_system;

pub use self::tracing::setup_tracing;
pub use vending_system::VendingSystem;
