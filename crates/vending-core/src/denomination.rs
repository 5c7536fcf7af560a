//! Coin face values the machine recognizes.
//!
//! Values are in minor currency units (cents). [`Denomination::ALL`] lists them
//! largest first, which is the order the change algorithm walks them in.

use crate::error::VendingError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Display;

/// A coin the machine accepts and can hand back as change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Denomination {
    TwoDollars,
    OneDollar,
    FiftyCents,
    TwentyCents,
    TenCents,
}

impl Denomination {
    /// Every recognized denomination, largest to smallest.
    pub const ALL: [Denomination; 5] = [
        Denomination::TwoDollars,
        Denomination::OneDollar,
        Denomination::FiftyCents,
        Denomination::TwentyCents,
        Denomination::TenCents,
    ];

    /// Face value in minor units.
    pub const fn value(self) -> u32 {
        match self {
            Denomination::TwoDollars => 200,
            Denomination::OneDollar => 100,
            Denomination::FiftyCents => 50,
            Denomination::TwentyCents => 20,
            Denomination::TenCents => 10,
        }
    }
}

impl TryFrom<u32> for Denomination {
    type Error = VendingError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Denomination::ALL
            .into_iter()
            .find(|d| d.value() == value)
            .ok_or(VendingError::InvalidDenomination(value))
    }
}

impl From<Denomination> for u32 {
    fn from(denomination: Denomination) -> Self {
        denomination.value()
    }
}

// Ordered by face value so maps keyed by denomination sort numerically.
impl Ord for Denomination {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl PartialOrd for Denomination {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Denomination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_currency(self.value()))
    }
}

/// Renders minor units the way the machine's screen does, e.g. `150` as `$1.50`.
pub fn format_currency(minor_units: u32) -> String {
    format!("${}.{:02}", minor_units / 100, minor_units % 100)
}

/// Sum of a sequence of coins in minor units.
pub fn total_value<'a>(coins: impl IntoIterator<Item = &'a Denomination>) -> u32 {
    coins.into_iter().map(|coin| coin.value()).sum()
}

/// Renders coins as a comma-separated list of amounts.
pub fn format_coins(coins: &[Denomination]) -> String {
    coins
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
