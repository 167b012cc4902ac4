// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Sprintdeck Contributors

use super::*;
use sprintdeck_core::Event;

#[tokio::test]
async fn publishes_to_every_registered_client() {
    let bus = Bus::new();
    let mut a = bus.register().await;
    let mut b = bus.register().await;

    bus.publish(&Event::TokenBudgetApproaching).await;

    assert!(matches!(a.recv().await, Some(Event::TokenBudgetApproaching)));
    assert!(matches!(b.recv().await, Some(Event::TokenBudgetApproaching)));
}

#[tokio::test]
async fn drops_clients_whose_receiver_was_dropped() {
    let bus = Bus::new();
    let rx = bus.register().await;
    drop(rx);

    bus.publish(&Event::TokenBudgetApproaching).await;
    assert_eq!(bus.clients.lock().await.len(), 0);
}
