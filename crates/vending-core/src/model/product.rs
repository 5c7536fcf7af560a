use serde::{Deserialize, Serialize};

/// A product slot in the machine.
///
/// Owned by the [`Catalog`](crate::catalog::Catalog); the only mutations are a committed
/// purchase (one unit dispensed), a restock, or a wholesale reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Price in minor units.
    pub price: u32,
    pub stock: u32,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Slot identifier shown on the machine (e.g. `"A1"`)
    /// * `name` - Product name
    /// * `price` - Price in minor units
    /// * `stock` - Units loaded in the slot
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: u32, stock: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            stock,
        }
    }

    pub fn is_available(&self) -> bool {
        self.stock > 0
    }
}
