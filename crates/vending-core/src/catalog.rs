//! Product definitions and stock counts for one machine.

use crate::error::{VendingError, VendingResult};
use crate::model::Product;

/// The machine's product slots, kept in load order for display.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn find_product(&self, id: &str) -> VendingResult<&Product> {
        self.products
            .iter()
            .find(|product| product.id == id)
            .ok_or_else(|| VendingError::ProductNotFound(id.to_string()))
    }

    fn find_product_mut(&mut self, id: &str) -> VendingResult<&mut Product> {
        self.products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or_else(|| VendingError::ProductNotFound(id.to_string()))
    }

    /// Takes one unit out of stock. Only a committed purchase calls this.
    pub fn decrement_stock(&mut self, id: &str) -> VendingResult<()> {
        let product = self.find_product_mut(id)?;
        if product.stock == 0 {
            return Err(VendingError::OutOfStock {
                product_id: product.id.clone(),
                name: product.name.clone(),
            });
        }
        product.stock -= 1;
        Ok(())
    }

    /// Adds units to a slot and returns the new stock level.
    pub fn restock(&mut self, id: &str, quantity: u32) -> VendingResult<u32> {
        let product = self.find_product_mut(id)?;
        product.stock = product.stock.saturating_add(quantity);
        Ok(product.stock)
    }

    /// Overrides the stock level of a slot, e.g. to empty it for testing.
    pub fn set_stock(&mut self, id: &str, count: u32) -> VendingResult<u32> {
        let product = self.find_product_mut(id)?;
        product.stock = count;
        Ok(product.stock)
    }

    /// Replaces the whole catalog.
    pub fn reset_all(&mut self, products: Vec<Product>) {
        self.products = products;
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new("A2", "Cola", 150, 2),
            Product::new("B1", "Energy Drink", 250, 0),
        ])
    }

    #[test]
    fn test_find_product() {
        let catalog = catalog();
        assert_eq!(catalog.find_product("A2").unwrap().name, "Cola");
        assert_eq!(
            catalog.find_product("Z9"),
            Err(VendingError::ProductNotFound("Z9".into()))
        );
    }

    #[test]
    fn test_decrement_stock_stops_at_zero() {
        let mut catalog = catalog();
        catalog.decrement_stock("A2").unwrap();
        catalog.decrement_stock("A2").unwrap();
        assert_eq!(catalog.find_product("A2").unwrap().stock, 0);

        let result = catalog.decrement_stock("A2");
        assert!(matches!(result, Err(VendingError::OutOfStock { ref product_id, .. }) if product_id == "A2"));
        assert_eq!(catalog.find_product("A2").unwrap().stock, 0);
    }

    #[test]
    fn test_decrement_unknown_product() {
        let mut catalog = catalog();
        let before = catalog.clone();
        assert!(matches!(
            catalog.decrement_stock("nope"),
            Err(VendingError::ProductNotFound(_))
        ));
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_restock_and_reset() {
        let mut catalog = catalog();
        assert_eq!(catalog.restock("B1", 3), Ok(3));

        assert_eq!(catalog.restock("B1", u32::MAX), Ok(u32::MAX));

        catalog.reset_all(vec![Product::new("C1", "Crisps", 90, 1)]);
        assert_eq!(catalog.products().len(), 1);
        assert!(catalog.find_product("A2").is_err());
    }

    #[test]
    fn test_set_stock_can_lower_and_raise() {
        let mut catalog = catalog();
        assert_eq!(catalog.set_stock("A2", 0), Ok(0));
        assert!(!catalog.find_product("A2").unwrap().is_available());
        assert_eq!(catalog.set_stock("A2", 9), Ok(9));
        assert!(matches!(
            catalog.set_stock("Z9", 1),
            Err(VendingError::ProductNotFound(_))
        ));
    }
}
