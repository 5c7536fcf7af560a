//! Customer and maintenance operations that run against one hosted machine.

use vending_core::{PurchaseOutcome, RefundOutcome, Selection, VendingMachine, VendingResult};

#[derive(Debug, Clone, PartialEq)]
pub enum MachineAction {
    SelectProduct(String),
    /// Face value of the coin, in minor units.
    InsertCoin(u32),
    Purchase,
    Cancel,
    SetCoinCount { value: u32, count: u32 },
    Restock { product_id: String, quantity: u32 },
    SetStock { product_id: String, count: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum MachineActionResult {
    SelectProduct(Selection),
    /// Running total after the coin was accepted.
    InsertCoin(u32),
    Purchase(PurchaseOutcome),
    Cancel(RefundOutcome),
    SetCoinCount(()),
    /// Stock level after restocking.
    Restock(u32),
    SetStock(u32),
}

impl MachineAction {
    /// Runs the action. Refusals leave the machine as it was.
    pub fn apply(self, machine: &mut VendingMachine) -> VendingResult<MachineActionResult> {
        match self {
            MachineAction::SelectProduct(product_id) => machine
                .select_product(&product_id)
                .map(MachineActionResult::SelectProduct),
            MachineAction::InsertCoin(value) => {
                machine.insert_coin(value).map(MachineActionResult::InsertCoin)
            }
            MachineAction::Purchase => machine.purchase().map(MachineActionResult::Purchase),
            MachineAction::Cancel => Ok(MachineActionResult::Cancel(machine.cancel())),
            MachineAction::SetCoinCount { value, count } => machine
                .set_coin_count(value, count)
                .map(MachineActionResult::SetCoinCount),
            MachineAction::Restock {
                product_id,
                quantity,
            } => machine
                .restock(&product_id, quantity)
                .map(MachineActionResult::Restock),
            MachineAction::SetStock { product_id, count } => machine
                .set_stock(&product_id, count)
                .map(MachineActionResult::SetStock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vending_core::{Denomination, VendingError};

    #[test]
    fn test_purchase_flow_through_actions() {
        let mut machine = VendingMachine::default();
        MachineAction::SelectProduct("A2".into())
            .apply(&mut machine)
            .unwrap();
        let total = MachineAction::InsertCoin(200).apply(&mut machine).unwrap();
        assert_eq!(total, MachineActionResult::InsertCoin(200));

        match MachineAction::Purchase.apply(&mut machine).unwrap() {
            MachineActionResult::Purchase(outcome) => {
                assert_eq!(outcome.change, vec![Denomination::FiftyCents]);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_refusal_is_passed_through() {
        let mut machine = VendingMachine::default();
        let before = machine.clone();
        assert_eq!(
            MachineAction::InsertCoin(25).apply(&mut machine),
            Err(VendingError::InvalidDenomination(25))
        );
        assert_eq!(machine, before);
    }

    #[test]
    fn test_restock_reports_new_level() {
        let mut machine = VendingMachine::default();
        let result = MachineAction::Restock {
            product_id: "B1".into(),
            quantity: 3,
        }
        .apply(&mut machine)
        .unwrap();
        // Energy Drink starts with 2.
        assert_eq!(result, MachineActionResult::Restock(5));
    }

    #[test]
    fn test_emptied_slot_refuses_purchase() {
        let mut machine = VendingMachine::default();
        let result = MachineAction::SetStock {
            product_id: "B1".into(),
            count: 0,
        }
        .apply(&mut machine)
        .unwrap();
        assert_eq!(result, MachineActionResult::SetStock(0));

        MachineAction::SelectProduct("B1".into())
            .apply(&mut machine)
            .unwrap();
        MachineAction::InsertCoin(200).apply(&mut machine).unwrap();
        MachineAction::InsertCoin(100).apply(&mut machine).unwrap();
        assert!(matches!(
            MachineAction::Purchase.apply(&mut machine),
            Err(VendingError::OutOfStock { .. })
        ));
    }
}
