//! Error types for the vending machine core.

use crate::denomination::{format_currency, Denomination};
use serde::Serialize;
use thiserror::Error;

/// Every way a machine operation can be refused.
///
/// All variants are recoverable: the operation that produced them left the machine
/// exactly as it was.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum VendingError {
    /// The coin value is not one the machine recognizes.
    #[error("Invalid coin: {0} is not an accepted denomination")]
    InvalidDenomination(u32),

    /// A product id was blank.
    #[error("Invalid product id: must not be empty")]
    EmptyProductId,

    /// The machine configuration cannot be loaded as given.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Purchase was attempted before any product was chosen.
    #[error("No product selected. Please select a product first or insert coins and then select a product.")]
    NoProductSelected,

    /// The id does not name a product in the catalog.
    #[error("Unknown product: {0}")]
    ProductNotFound(String),

    /// The product exists but has no units left.
    #[error("{name} is out of stock. Please select another product.")]
    OutOfStock { product_id: String, name: String },

    /// Not enough money has been inserted for the selected product.
    #[error("Insufficient funds. {} more required.", format_currency(*.shortfall))]
    InsufficientFunds {
        price: u32,
        inserted: u32,
        shortfall: u32,
    },

    /// The coin reserve cannot pay out the exact change owed.
    #[error("Cannot dispense exact change ({} owed) with current coin inventory. Please insert exact change or choose another product.", format_currency(*.change_needed))]
    ChangeUnavailable { change_needed: u32, shortfall: u32 },

    /// The coin reserve has no room for another coin of this denomination.
    #[error("Coin storage for {0} coins is full. Please use other coins or cancel.")]
    CoinStorageFull(Denomination),

    /// A caller broke an internal contract, e.g. applying change the inventory does not hold.
    #[error("Precondition violated: {0}")]
    PreconditionViolation(String),
}

/// Coarse classification of a [`VendingError`] for callers that branch on category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    InvalidInput,
    NoProductSelected,
    ProductNotFound,
    OutOfStock,
    InsufficientFunds,
    ChangeUnavailable,
    CoinStorageFull,
    PreconditionViolation,
}

impl VendingError {
    pub fn kind(&self) -> FailureKind {
        match self {
            VendingError::InvalidDenomination(_)
            | VendingError::EmptyProductId
            | VendingError::InvalidConfig(_) => FailureKind::InvalidInput,
            VendingError::NoProductSelected => FailureKind::NoProductSelected,
            VendingError::ProductNotFound(_) => FailureKind::ProductNotFound,
            VendingError::OutOfStock { .. } => FailureKind::OutOfStock,
            VendingError::InsufficientFunds { .. } => FailureKind::InsufficientFunds,
            VendingError::ChangeUnavailable { .. } => FailureKind::ChangeUnavailable,
            VendingError::CoinStorageFull(_) => FailureKind::CoinStorageFull,
            VendingError::PreconditionViolation(_) => FailureKind::PreconditionViolation,
        }
    }
}

pub type VendingResult<T> = Result<T, VendingError>;
