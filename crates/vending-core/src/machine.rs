//! # Vending Machine
//!
//! [`VendingMachine`] ties a [`Catalog`], a [`CoinInventory`] and the open [`Transaction`]
//! together and is the only way to mutate them.
//!
//! ## Purchase commit
//!
//! Selecting and inserting never touch stock or the coin reserve. [`VendingMachine::purchase`]
//! is the one checkpoint that does, and it works on copies until the very end:
//!
//! 1. resolve the selected product and check stock and funds,
//! 2. copy the live inventory and deposit the customer's coins into the copy,
//! 3. compute greedy change against the copy and take it out of the copy,
//! 4. decrement stock (the last step that can fail), then swap the copy in and clear the
//!    transaction.
//!
//! Any failure returns before step 4 completes, so a refused purchase leaves stock, the
//! reserve and the inserted coins exactly as they were.

use crate::catalog::Catalog;
use crate::denomination::{format_coins, format_currency, total_value, Denomination};
use crate::error::{VendingError, VendingResult};
use crate::inventory::{ChangeResult, CoinInventory};
use crate::model::{MachineConfig, Product};
use crate::transaction::Transaction;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::{debug, info};

/// A single machine: catalog, coin reserve and the customer session in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct VendingMachine {
    catalog: Catalog,
    inventory: CoinInventory,
    transaction: Transaction,
}

/// Result of choosing a product slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub product_id: String,
    /// Details of the slot, if the catalog knows it.
    pub product: Option<Product>,
}

/// A completed sale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseOutcome {
    /// The product as it stands after the sale.
    pub product: Product,
    /// Coins paid out, largest first.
    pub change: Vec<Denomination>,
}

/// Coins handed back by a cancellation, in the order they were inserted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RefundOutcome {
    pub refunded: Vec<Denomination>,
}

/// Read-only view of a machine for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineStatus {
    pub products: Vec<Product>,
    pub selected_product_id: Option<String>,
    pub total_inserted: u32,
    pub inserted_coins: Vec<Denomination>,
    #[serde(rename = "machineCoinInventory")]
    pub coin_inventory: BTreeMap<Denomination, u32>,
}

impl VendingMachine {
    pub fn new(config: MachineConfig) -> VendingResult<Self> {
        config.validate()?;
        Ok(Self::from_validated(config))
    }

    fn from_validated(config: MachineConfig) -> Self {
        Self {
            catalog: Catalog::new(config.product_list),
            inventory: CoinInventory::from(config.coin_inventory),
            transaction: Transaction::new(),
        }
    }

    /// Administrative reset: reloads catalog and coins and abandons the open session.
    pub fn reset(&mut self, config: MachineConfig) -> VendingResult<()> {
        config.validate()?;
        self.catalog.reset_all(config.product_list);
        self.inventory = CoinInventory::from(config.coin_inventory);
        self.transaction.clear();
        Ok(())
    }

    pub fn select_product(&mut self, product_id: &str) -> VendingResult<Selection> {
        if product_id.trim().is_empty() {
            return Err(VendingError::EmptyProductId);
        }
        self.transaction.select(product_id);
        Ok(Selection {
            product_id: product_id.to_string(),
            product: self.catalog.find_product(product_id).ok().cloned(),
        })
    }

    /// Accepts a coin by face value and returns the new running total.
    pub fn insert_coin(&mut self, value: u32) -> VendingResult<u32> {
        let coin = Denomination::try_from(value)?;
        self.transaction.insert_coin(coin);
        Ok(self.transaction.total_inserted())
    }

    pub fn purchase(&mut self) -> VendingResult<PurchaseOutcome> {
        let result = self.try_purchase();
        match &result {
            Ok(outcome) => info!(
                product_id = %outcome.product.id,
                stock = outcome.product.stock,
                change = total_value(&outcome.change),
                "Purchase committed"
            ),
            Err(e) => debug!(kind = ?e.kind(), error = %e, "Purchase refused"),
        }
        result
    }

    fn try_purchase(&mut self) -> VendingResult<PurchaseOutcome> {
        let product_id = self
            .transaction
            .selected_product_id()
            .ok_or(VendingError::NoProductSelected)?
            .to_string();
        let product = self.catalog.find_product(&product_id)?.clone();
        if !product.is_available() {
            return Err(VendingError::OutOfStock {
                product_id,
                name: product.name,
            });
        }

        let inserted = self.transaction.total_inserted();
        if inserted < product.price {
            return Err(VendingError::InsufficientFunds {
                price: product.price,
                inserted,
                shortfall: product.price - inserted,
            });
        }
        let change_needed = inserted - product.price;

        // The customer's own coins may come straight back as change.
        let mut hypothetical = self.inventory.clone();
        hypothetical.deposit_batch(self.transaction.inserted_coins())?;
        let change = match hypothetical.compute_change(change_needed) {
            ChangeResult::Dispensable(change) => change,
            ChangeResult::Unavailable { shortfall } => {
                return Err(VendingError::ChangeUnavailable {
                    change_needed,
                    shortfall,
                })
            }
        };
        hypothetical.apply_change(&change)?;

        // Last fallible step; everything after it is plain assignment.
        self.catalog.decrement_stock(&product_id)?;
        self.inventory = hypothetical;
        self.transaction.clear();

        Ok(PurchaseOutcome {
            product: Product {
                stock: product.stock - 1,
                ..product
            },
            change: change.coins(),
        })
    }

    /// Refunds the inserted coins. The coin reserve is never involved.
    pub fn cancel(&mut self) -> RefundOutcome {
        RefundOutcome {
            refunded: self.transaction.cancel(),
        }
    }

    pub fn status(&self) -> MachineStatus {
        MachineStatus {
            products: self.catalog.products().to_vec(),
            selected_product_id: self.transaction.selected_product_id().map(str::to_string),
            total_inserted: self.transaction.total_inserted(),
            inserted_coins: self.transaction.inserted_coins().to_vec(),
            coin_inventory: self.inventory.snapshot(),
        }
    }

    /// Administrative override of how many coins of one face value the machine holds.
    pub fn set_coin_count(&mut self, value: u32, count: u32) -> VendingResult<()> {
        let denomination = Denomination::try_from(value)?;
        self.inventory.set_count(denomination, count);
        Ok(())
    }

    pub fn restock(&mut self, product_id: &str, quantity: u32) -> VendingResult<u32> {
        self.catalog.restock(product_id, quantity)
    }

    /// Administrative override of a product's stock level.
    pub fn set_stock(&mut self, product_id: &str, count: u32) -> VendingResult<u32> {
        self.catalog.set_stock(product_id, count)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn inventory(&self) -> &CoinInventory {
        &self.inventory
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }
}

impl Default for VendingMachine {
    /// A machine with the factory load-out.
    fn default() -> Self {
        let config = MachineConfig::default();
        debug_assert!(config.validate().is_ok());
        Self::from_validated(config)
    }
}

impl Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.product {
            Some(product) => write!(
                f,
                "{} selected ({})",
                product.name,
                format_currency(product.price)
            ),
            None => write!(f, "{} selected (not in catalog)", self.product_id),
        }
    }
}

impl Display for PurchaseOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.change.is_empty() {
            write!(f, "Dispensed {}. No change", self.product.name)
        } else {
            write!(
                f,
                "Dispensed {}. Change returned: {}",
                self.product.name,
                format_coins(&self.change)
            )
        }
    }
}

impl RefundOutcome {
    pub fn is_empty(&self) -> bool {
        self.refunded.is_empty()
    }
}

impl Display for RefundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.refunded.is_empty() {
            write!(f, "Nothing to cancel.")
        } else {
            write!(
                f,
                "Transaction cancelled: returned {} coin(s): {}",
                self.refunded.len(),
                format_coins(&self.refunded)
            )
        }
    }
}

impl Display for MachineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for product in &self.products {
            let marker = if self.selected_product_id.as_deref() == Some(product.id.as_str()) {
                '*'
            } else {
                ' '
            };
            writeln!(
                f,
                "{marker} {:<4} {:<18} {:>7}  stock {}",
                product.id,
                product.name,
                format_currency(product.price),
                product.stock
            )?;
        }
        writeln!(
            f,
            "Inserted: {} ({} coin(s))",
            format_currency(self.total_inserted),
            self.inserted_coins.len()
        )?;
        let coins = self
            .coin_inventory
            .iter()
            .rev()
            .map(|(d, n)| format!("{d} x {n}"))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "Coins: {coins}")
    }
}
