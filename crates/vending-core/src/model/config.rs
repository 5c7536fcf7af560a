//! Machine load-out used at construction and on administrative reset.

use crate::denomination::Denomination;
use crate::error::{VendingError, VendingResult};
use crate::model::Product;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Initial catalog and coin reserve for a machine.
///
/// Field names follow the external config format (`productList`, `coinInventory`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineConfig {
    pub product_list: Vec<Product>,
    #[serde(default)]
    pub coin_inventory: BTreeMap<Denomination, u32>,
}

impl MachineConfig {
    pub fn new(product_list: Vec<Product>, coin_inventory: BTreeMap<Denomination, u32>) -> Self {
        Self {
            product_list,
            coin_inventory,
        }
    }

    /// Rejects blank or duplicate product ids.
    pub fn validate(&self) -> VendingResult<()> {
        let mut seen = HashSet::new();
        for product in &self.product_list {
            if product.id.trim().is_empty() {
                return Err(VendingError::InvalidConfig(format!(
                    "product '{}' has an empty id",
                    product.name
                )));
            }
            if !seen.insert(product.id.as_str()) {
                return Err(VendingError::InvalidConfig(format!(
                    "duplicate product id '{}'",
                    product.id
                )));
            }
        }
        Ok(())
    }
}

impl Default for MachineConfig {
    /// The factory load-out: five drinks and a modest float of coins.
    fn default() -> Self {
        Self {
            product_list: vec![
                Product::new("A1", "Sparkling Water", 120, 5),
                Product::new("A2", "Cola", 150, 5),
                Product::new("A3", "Orange Juice", 180, 3),
                Product::new("B1", "Energy Drink", 250, 2),
                Product::new("B2", "Iced Tea", 130, 4),
            ],
            coin_inventory: BTreeMap::from([
                (Denomination::TwoDollars, 5),
                (Denomination::OneDollar, 10),
                (Denomination::FiftyCents, 10),
                (Denomination::TwentyCents, 20),
                (Denomination::TenCents, 50),
            ]),
        }
    }
}
