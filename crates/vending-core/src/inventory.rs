//! The machine's coin reserve and the change-making algorithm that draws on it.
//!
//! Change is computed greedily: walk the denominations from largest to smallest and take
//! as many of each as both the reserve and the remaining amount allow. This is a
//! heuristic, not an optimal solver. With one 50 and three 20s on hand, 60 cannot be paid
//! because the 50 is taken first and no 10 is left to finish.
//!
//! [`CoinInventory::compute_change`] never mutates; callers run it against a copy and only
//! [`CoinInventory::apply_change`] the result once they are ready to commit.

use crate::denomination::Denomination;
use crate::error::{VendingError, VendingResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Coins held by the machine, per denomination.
///
/// Every recognized denomination has an entry, so a count of zero is explicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Denomination, u32>", into = "BTreeMap<Denomination, u32>")]
pub struct CoinInventory {
    counts: BTreeMap<Denomination, u32>,
}

/// Coins to hand back, per denomination. Only produced by a successful computation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Change {
    counts: BTreeMap<Denomination, u32>,
}

/// Outcome of [`CoinInventory::compute_change`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeResult {
    /// The amount can be paid exactly from the reserve.
    Dispensable(Change),
    /// Greedy descent ended with `shortfall` minor units still owed.
    Unavailable { shortfall: u32 },
}

impl Change {
    pub fn count(&self, denomination: Denomination) -> u32 {
        self.counts.get(&denomination).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|(d, n)| d.value() * n).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.values().all(|&n| n == 0)
    }

    /// The individual coins, largest first.
    pub fn coins(&self) -> Vec<Denomination> {
        Denomination::ALL
            .into_iter()
            .flat_map(|d| std::iter::repeat(d).take(self.count(d) as usize))
            .collect()
    }
}

impl CoinInventory {
    /// An inventory with no coins at all.
    pub fn empty() -> Self {
        Self {
            counts: Denomination::ALL.into_iter().map(|d| (d, 0)).collect(),
        }
    }

    pub fn count(&self, denomination: Denomination) -> u32 {
        self.counts.get(&denomination).copied().unwrap_or(0)
    }

    /// Administrative override of a single count.
    pub fn set_count(&mut self, denomination: Denomination, count: u32) {
        self.counts.insert(denomination, count);
    }

    /// Adds one coin. Fails if the count for that denomination is already at its limit.
    pub fn deposit(&mut self, coin: Denomination) -> VendingResult<()> {
        let held = self.counts.entry(coin).or_insert(0);
        *held = held
            .checked_add(1)
            .ok_or(VendingError::CoinStorageFull(coin))?;
        Ok(())
    }

    /// Adds every coin or none of them.
    pub fn deposit_batch<'a>(
        &mut self,
        coins: impl IntoIterator<Item = &'a Denomination>,
    ) -> VendingResult<()> {
        let mut staged = self.counts.clone();
        for &coin in coins {
            let held = staged.entry(coin).or_insert(0);
            *held = held
                .checked_add(1)
                .ok_or(VendingError::CoinStorageFull(coin))?;
        }
        self.counts = staged;
        Ok(())
    }

    /// Total value held, in minor units.
    pub fn total_value(&self) -> u64 {
        self.counts
            .iter()
            .map(|(d, &n)| u64::from(d.value()) * u64::from(n))
            .sum()
    }

    pub fn snapshot(&self) -> BTreeMap<Denomination, u32> {
        self.counts.clone()
    }

    /// Works out which coins would pay `amount` exactly, without touching `self`.
    pub fn compute_change(&self, amount: u32) -> ChangeResult {
        let mut working = self.counts.clone();
        let mut remaining = amount;
        let mut change = BTreeMap::new();

        for denomination in Denomination::ALL {
            let available = working.get(&denomination).copied().unwrap_or(0);
            let take = available.min(remaining / denomination.value());
            if take > 0 {
                remaining -= take * denomination.value();
                working.insert(denomination, available - take);
                change.insert(denomination, take);
            }
        }

        if remaining == 0 {
            ChangeResult::Dispensable(Change { counts: change })
        } else {
            ChangeResult::Unavailable {
                shortfall: remaining,
            }
        }
    }

    /// Removes dispensed change from the reserve.
    ///
    /// Fails without modifying anything if the reserve does not hold every coin in
    /// `change`; that can only happen when the change was computed against some other
    /// inventory.
    pub fn apply_change(&mut self, change: &Change) -> VendingResult<()> {
        for (&denomination, &count) in &change.counts {
            let held = self.count(denomination);
            if held < count {
                return Err(VendingError::PreconditionViolation(format!(
                    "change needs {count} x {denomination} but only {held} held"
                )));
            }
        }
        for (&denomination, &count) in &change.counts {
            if let Some(held) = self.counts.get_mut(&denomination) {
                *held -= count;
            }
        }
        Ok(())
    }

    /// Computes and applies change in one step.
    pub fn withdraw_batch(&mut self, amount: u32) -> VendingResult<Change> {
        match self.compute_change(amount) {
            ChangeResult::Dispensable(change) => {
                self.apply_change(&change)?;
                Ok(change)
            }
            ChangeResult::Unavailable { shortfall } => Err(VendingError::ChangeUnavailable {
                change_needed: amount,
                shortfall,
            }),
        }
    }
}

impl Default for CoinInventory {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<BTreeMap<Denomination, u32>> for CoinInventory {
    fn from(counts: BTreeMap<Denomination, u32>) -> Self {
        let mut inventory = Self::empty();
        inventory.counts.extend(counts);
        inventory
    }
}

impl From<CoinInventory> for BTreeMap<Denomination, u32> {
    fn from(inventory: CoinInventory) -> Self {
        inventory.counts
    }
}
