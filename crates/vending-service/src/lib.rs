//! # Vending Service
//!
//! Hosts [`vending_core::VendingMachine`]s behind a Tokio actor so that any number of
//! async callers can operate them without locks.
//!
//! - [`actor`]: [`MachineActor`](actor::MachineActor) owns the machines and handles one
//!   request at a time.
//! - [`client`]: [`MachineClient`](client::MachineClient), the cloneable front door.
//! - [`lifecycle`]: [`VendingSystem`](lifecycle::VendingSystem) spawns and shuts down the
//!   actor; [`setup_tracing`](lifecycle::setup_tracing) configures logging.
//! - [`config`]: JSON load-out files.
//! - [`command`] and [`session`]: the console behind the `vending` binary.
//! - [`mock`]: test doubles for code that depends on a client.
//!
//! ```rust
//! use vending_core::MachineConfig;
//! use vending_service::lifecycle::VendingSystem;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let system = VendingSystem::new();
//!     let id = system.client.commission(MachineConfig::default()).await?;
//!
//!     let outcome = system.client.buy(id, "A2", &[100, 100]).await?;
//!     assert_eq!(outcome.to_string(), "Dispensed Cola. Change returned: $0.50");
//!
//!     system.shutdown().await?;
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod actor;
pub mod client;
pub mod command;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod message;
pub mod mock;
pub mod model;
pub mod session;

pub use actions::{MachineAction, MachineActionResult};
pub use actor::MachineActor;
pub use client::MachineClient;
pub use error::ServiceError;
pub use model::MachineId;
