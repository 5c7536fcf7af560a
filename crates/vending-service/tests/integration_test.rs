use std::collections::BTreeMap;
use vending_core::{Denomination, MachineConfig, Product, VendingError};
use vending_service::lifecycle::VendingSystem;
use vending_service::{MachineId, ServiceError};

fn cola_config(stock: u32, coins: &[(Denomination, u32)]) -> MachineConfig {
    MachineConfig::new(
        vec![Product::new("A2", "Cola", 150, stock)],
        coins.iter().copied().collect::<BTreeMap<_, _>>(),
    )
}

/// Full walk through a machine's life with the real actor.
#[tokio::test]
async fn test_full_vending_system_integration() {
    let system = VendingSystem::new();
    let client = &system.client;

    let id = client
        .commission(MachineConfig::default())
        .await
        .expect("Failed to commission");

    let selection = client.select_product(id, "A3").await.unwrap();
    assert_eq!(selection.product.unwrap().name, "Orange Juice");

    assert_eq!(client.insert_coin(id, 200).await.unwrap(), 200);
    let outcome = client.purchase(id).await.unwrap();
    assert_eq!(outcome.change, vec![Denomination::TwentyCents]);
    assert_eq!(outcome.product.stock, 2);

    let status = client.status(id).await.unwrap();
    assert_eq!(status.total_inserted, 0);
    assert_eq!(status.selected_product_id, None);
    assert_eq!(status.coin_inventory[&Denomination::TwoDollars], 6);
    assert_eq!(status.coin_inventory[&Denomination::TwentyCents], 19);

    assert_eq!(client.restock(id, "A3", 10).await.unwrap(), 12);
    client.set_coin_count(id, 10, 0).await.unwrap();
    assert_eq!(
        client.status(id).await.unwrap().coin_inventory[&Denomination::TenCents],
        0
    );

    client.decommission(id).await.unwrap();
    assert_eq!(
        client.status(id).await,
        Err(ServiceError::MachineNotFound(id))
    );

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_refused_purchase_keeps_state_through_the_actor() {
    let system = VendingSystem::new();
    let client = &system.client;
    let id = client
        .commission(cola_config(5, &[(Denomination::OneDollar, 3)]))
        .await
        .unwrap();

    client.select_product(id, "A2").await.unwrap();
    client.insert_coin(id, 200).await.unwrap();
    let before = client.status(id).await.unwrap();

    let err = client.purchase(id).await.unwrap_err();
    assert_eq!(
        err,
        ServiceError::Vending(VendingError::ChangeUnavailable {
            change_needed: 50,
            shortfall: 50
        })
    );
    assert_eq!(client.status(id).await.unwrap(), before);

    let refund = client.cancel(id).await.unwrap();
    assert_eq!(refund.refunded, vec![Denomination::TwoDollars]);
}

#[tokio::test]
async fn test_machines_are_isolated() {
    let system = VendingSystem::new();
    let client = &system.client;
    let first = client.commission(cola_config(1, &[])).await.unwrap();
    let second = client.commission(cola_config(1, &[])).await.unwrap();
    assert_ne!(first, second);

    client.buy(first, "A2", &[100, 50]).await.unwrap();
    client.insert_coin(second, 20).await.unwrap();

    let first_status = client.status(first).await.unwrap();
    let second_status = client.status(second).await.unwrap();
    assert_eq!(first_status.products[0].stock, 0);
    assert_eq!(second_status.products[0].stock, 1);
    assert_eq!(first_status.total_inserted, 0);
    assert_eq!(second_status.total_inserted, 20);
}

/// Racing purchases against one paid-up transaction dispense exactly once.
#[tokio::test]
async fn test_concurrent_purchases_are_serialized() {
    let system = VendingSystem::new();
    let id = system
        .client
        .commission(cola_config(5, &[]))
        .await
        .unwrap();
    system.client.select_product(id, "A2").await.unwrap();
    system.client.insert_coin(id, 100).await.unwrap();
    system.client.insert_coin(id, 50).await.unwrap();

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let client = system.client.clone();
            tokio::spawn(async move { client.purchase(id).await })
        })
        .collect();

    let mut dispensed = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(_) => dispensed += 1,
            Err(e) => assert_eq!(e, ServiceError::Vending(VendingError::NoProductSelected)),
        }
    }
    assert_eq!(dispensed, 1);

    let status = system.client.status(id).await.unwrap();
    assert_eq!(status.products[0].stock, 4);
    assert_eq!(status.coin_inventory[&Denomination::OneDollar], 1);
    assert_eq!(status.coin_inventory[&Denomination::FiftyCents], 1);
}

#[tokio::test]
async fn test_parallel_customers_on_separate_machines() {
    let system = VendingSystem::new();
    let mut ids = Vec::new();
    for _ in 0..8 {
        let id = system
            .client
            .commission(cola_config(3, &[(Denomination::FiftyCents, 10)]))
            .await
            .unwrap();
        ids.push(id);
    }

    let tasks: Vec<_> = ids
        .iter()
        .map(|&id| {
            let client = system.client.clone();
            tokio::spawn(async move {
                for _ in 0..3 {
                    client.buy(id, "A2", &[200]).await.unwrap();
                }
                client.status(id).await.unwrap()
            })
        })
        .collect();

    for task in tasks {
        let status = task.await.unwrap();
        assert_eq!(status.products[0].stock, 0);
        assert_eq!(status.coin_inventory[&Denomination::TwoDollars], 3);
        assert_eq!(status.coin_inventory[&Denomination::FiftyCents], 7);
    }
}

#[tokio::test]
async fn test_reset_replaces_load_out_and_abandons_transaction() {
    let system = VendingSystem::new();
    let client = &system.client;
    let id = client.commission(cola_config(0, &[])).await.unwrap();

    client.select_product(id, "A2").await.unwrap();
    client.insert_coin(id, 100).await.unwrap();
    client.reset(id, MachineConfig::default()).await.unwrap();

    let status = client.status(id).await.unwrap();
    assert_eq!(status.products.len(), 5);
    assert_eq!(status.total_inserted, 0);
    assert_eq!(status.selected_product_id, None);

    let bad = cola_config(1, &[]);
    let bad = MachineConfig::new(
        [bad.product_list.clone(), bad.product_list].concat(),
        BTreeMap::new(),
    );
    assert!(matches!(
        client.reset(id, bad).await,
        Err(ServiceError::Vending(VendingError::InvalidConfig(_)))
    ));
    assert_eq!(client.status(id).await.unwrap().products.len(), 5);
}

#[tokio::test]
async fn test_restarted_system_starts_empty() {
    let system = VendingSystem::new();
    let client = system.client.clone();
    let id = client.commission(MachineConfig::default()).await.unwrap();

    drop(client);
    system.shutdown().await.unwrap();

    let system = VendingSystem::new();
    assert_eq!(
        system.client.status(id).await,
        Err(ServiceError::MachineNotFound(MachineId(1)))
    );
}
