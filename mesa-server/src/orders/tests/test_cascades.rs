//! Downward cascades: order-level transitions drag items forward

use super::*;
use shared::order::OrderStatus;

#[tokio::test]
async fn confirmed_cascade_moves_pending_items_only() {
    let h = harness();
    let (order_id, items) = h.open_with_items(&["A", "B"]).await;
    h.force_item_status(&items[1], ItemStatus::Preparing).await;

    h.coordinator.advance_order(&order_id, "confirmed").await.unwrap();

    assert_eq!(h.item_status(&items[0]).await, ItemStatus::Confirmed);
    assert_eq!(h.item_status(&items[1]).await, ItemStatus::Preparing);
}

#[tokio::test]
async fn preparing_cascade_moves_pending_and_confirmed() {
    let h = harness();
    let (order_id, items) = h.open_with_items(&["A", "B", "C"]).await;
    h.force_item_status(&items[1], ItemStatus::Confirmed).await;
    h.force_item_status(&items[2], ItemStatus::Ready).await;

    let detail = h.coordinator.advance_order(&order_id, "preparing").await.unwrap();

    assert_eq!(detail.status, OrderStatus::Preparing);
    assert_eq!(h.item_status(&items[0]).await, ItemStatus::Preparing);
    assert_eq!(h.item_status(&items[1]).await, ItemStatus::Preparing);
    // Already past the cascade target, untouched
    assert_eq!(h.item_status(&items[2]).await, ItemStatus::Ready);

    // Property: no active item left behind the cascade target
    for item in detail.items.iter().filter(|i| i.status.is_active()) {
        assert!(
            !matches!(item.status, ItemStatus::Pending | ItemStatus::Confirmed),
            "item {} left behind at {}",
            item.id,
            item.status
        );
    }
}

#[tokio::test]
async fn ready_cascade_moves_preparing_items_only() {
    let h = harness();
    let (order_id, items) = h.open_with_items(&["A", "B"]).await;
    h.force_item_status(&items[0], ItemStatus::Preparing).await;

    h.coordinator.advance_order(&order_id, "ready").await.unwrap();

    assert_eq!(h.item_status(&items[0]).await, ItemStatus::Ready);
    // Pending item is not dragged to ready by this cascade
    assert_eq!(h.item_status(&items[1]).await, ItemStatus::Pending);
}

#[tokio::test]
async fn served_cascade_moves_ready_and_preparing() {
    let h = harness();
    let (order_id, items) = h.open_with_items(&["A", "B"]).await;
    h.force_item_status(&items[0], ItemStatus::Ready).await;
    h.force_item_status(&items[1], ItemStatus::Preparing).await;

    h.coordinator.advance_order(&order_id, "served").await.unwrap();

    assert_eq!(h.item_status(&items[0]).await, ItemStatus::Served);
    assert_eq!(h.item_status(&items[1]).await, ItemStatus::Served);
}

#[tokio::test]
async fn cancelled_cascade_hits_every_item() {
    let h = harness();
    let (order_id, items) = h.open_with_items(&["A", "B", "C"]).await;
    h.force_item_status(&items[0], ItemStatus::Served).await;
    h.force_item_status(&items[1], ItemStatus::Ready).await;

    let detail = h.coordinator.advance_order(&order_id, "cancelled").await.unwrap();

    assert_eq!(detail.status, OrderStatus::Cancelled);
    for item in &items {
        assert_eq!(h.item_status(item).await, ItemStatus::Cancelled);
    }
    // Nothing left on the bill
    assert_eq!(detail.total_amount, Decimal::ZERO);
}

#[tokio::test]
async fn money_transitions_never_touch_items() {
    let h = harness();
    let (order_id, items) = h.open_with_items(&["A"]).await;
    h.force_item_status(&items[0], ItemStatus::Served).await;

    h.coordinator.advance_order(&order_id, "payment").await.unwrap();
    assert_eq!(h.item_status(&items[0]).await, ItemStatus::Served);

    h.coordinator.advance_order(&order_id, "completed").await.unwrap();
    assert_eq!(h.item_status(&items[0]).await, ItemStatus::Served);
}
