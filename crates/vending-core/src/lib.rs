//! # Vending Core
//!
//! The synchronous transaction engine of a single vending machine: product selection,
//! coin acceptance, purchase with change dispensed from a finite coin reserve, and
//! cancellation.
//!
//! ## Layout
//!
//! - [`denomination`]: the coins the machine accepts, largest first.
//! - [`catalog`]: products and stock.
//! - [`inventory`]: the coin reserve and the greedy change algorithm.
//! - [`transaction`]: the customer's open session.
//! - [`machine`]: the orchestrator that commits a purchase all-or-nothing.
//! - [`model`]: product and configuration DTOs.
//! - [`error`]: [`VendingError`], one enum for every refusal.
//!
//! ## Example
//!
//! ```rust
//! use vending_core::{MachineConfig, VendingMachine};
//!
//! let mut machine = VendingMachine::new(MachineConfig::default()).unwrap();
//! machine.select_product("A2").unwrap(); // Cola, $1.50
//! machine.insert_coin(200).unwrap();
//!
//! let outcome = machine.purchase().unwrap();
//! assert_eq!(outcome.to_string(), "Dispensed Cola. Change returned: $0.50");
//! ```
//!
//! The machine is not internally synchronized. Hosts that serve concurrent callers put
//! each machine behind a single owner; see the `vending-service` crate.

pub mod catalog;
pub mod denomination;
pub mod error;
pub mod inventory;
pub mod machine;
pub mod model;
pub mod transaction;

pub use catalog::Catalog;
pub use denomination::{format_currency, Denomination};
pub use error::{FailureKind, VendingError, VendingResult};
pub use inventory::{Change, ChangeResult, CoinInventory};
pub use machine::{MachineStatus, PurchaseOutcome, RefundOutcome, Selection, VendingMachine};
pub use model::{MachineConfig, Product};
pub use transaction::Transaction;
