//! The customer's open session: which product they picked and what they paid in.

use crate::denomination::{total_value, Denomination};

/// One customer interaction.
///
/// Selection and inserted coins are independent: a customer may pay first and choose
/// later, or the other way round, and changing the selection keeps the money.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    selected_product_id: Option<String>,
    inserted_coins: Vec<Denomination>,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any earlier selection.
    pub fn select(&mut self, product_id: impl Into<String>) {
        self.selected_product_id = Some(product_id.into());
    }

    pub fn insert_coin(&mut self, coin: Denomination) {
        self.inserted_coins.push(coin);
    }

    pub fn total_inserted(&self) -> u32 {
        total_value(&self.inserted_coins)
    }

    /// Hands back every inserted coin in insertion order. The selection is kept.
    pub fn cancel(&mut self) -> Vec<Denomination> {
        std::mem::take(&mut self.inserted_coins)
    }

    pub fn clear(&mut self) {
        self.selected_product_id = None;
        self.inserted_coins.clear();
    }

    pub fn selected_product_id(&self) -> Option<&str> {
        self.selected_product_id.as_deref()
    }

    pub fn inserted_coins(&self) -> &[Denomination] {
        &self.inserted_coins
    }
}
