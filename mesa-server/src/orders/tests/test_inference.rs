//! Upward inference: item-level changes recompute the parent order status

use super::*;
use crate::orders::error::OrderActionError;
use shared::order::OrderStatus;

#[tokio::test]
async fn order_promotes_only_when_last_item_fulfills() {
    // Items A and B preparing; B ready → order stays preparing;
    // A ready → order auto-promotes to ready
    let h = harness();
    let (order_id, items) = h.open_with_items(&["A", "B"]).await;
    h.coordinator.advance_order(&order_id, "preparing").await.unwrap();

    let detail = h.coordinator.advance_item(&items[1], "ready").await.unwrap();
    assert_eq!(detail.status, OrderStatus::Preparing);

    let detail = h.coordinator.advance_item(&items[0], "ready").await.unwrap();
    assert_eq!(detail.status, OrderStatus::Ready);
}

#[tokio::test]
async fn inference_is_idempotent() {
    let h = harness();
    let (order_id, items) = h.open_with_items(&["A"]).await;
    h.coordinator.advance_order(&order_id, "preparing").await.unwrap();

    let detail = h.coordinator.advance_item(&items[0], "ready").await.unwrap();
    assert_eq!(detail.status, OrderStatus::Ready);

    // Advancing an already-qualifying item again changes nothing
    let detail = h.coordinator.advance_item(&items[0], "ready").await.unwrap();
    assert_eq!(detail.status, OrderStatus::Ready);
}

#[tokio::test]
async fn cancelled_items_do_not_block_promotion() {
    let h = harness();
    let (order_id, items) = h.open_with_items(&["A", "B"]).await;
    h.coordinator.advance_order(&order_id, "preparing").await.unwrap();
    h.coordinator.advance_item(&items[1], "cancelled").await.unwrap();

    let detail = h.coordinator.advance_item(&items[0], "served").await.unwrap();
    assert_eq!(detail.status, OrderStatus::Ready);
}

#[tokio::test]
async fn cancelling_the_last_active_item_never_promotes() {
    let h = harness();
    let (order_id, items) = h.open_with_items(&["A"]).await;
    h.coordinator.advance_order(&order_id, "preparing").await.unwrap();

    let detail = h.coordinator.advance_item(&items[0], "cancelled").await.unwrap();
    assert_eq!(detail.status, OrderStatus::Preparing);
}

#[tokio::test]
async fn ready_order_demotes_when_item_reopens() {
    let h = harness();
    let (order_id, items) = h.open_with_items(&["A", "B"]).await;
    h.coordinator.advance_order(&order_id, "preparing").await.unwrap();
    h.coordinator.advance_item(&items[0], "ready").await.unwrap();
    let detail = h.coordinator.advance_item(&items[1], "ready").await.unwrap();
    assert_eq!(detail.status, OrderStatus::Ready);

    // Kitchen sends one dish back to the pan
    let detail = h
        .coordinator
        .advance_item(&items[1], "preparing")
        .await
        .unwrap();
    assert_eq!(detail.status, OrderStatus::Preparing);
}

#[tokio::test]
async fn served_and_later_orders_are_locked_for_inference() {
    let h = harness();
    let (order_id, items) = h.open_with_items(&["A", "B"]).await;
    h.coordinator.advance_order(&order_id, "served").await.unwrap();

    // Item falls back, but a served order is not demoted
    let detail = h
        .coordinator
        .advance_item(&items[0], "preparing")
        .await
        .unwrap();
    assert_eq!(detail.status, OrderStatus::Served);
}

#[tokio::test]
async fn advance_item_unknown_item_fails() {
    let h = harness();
    let result = h.coordinator.advance_item("order_item:ghost", "ready").await;
    assert!(matches!(result, Err(OrderActionError::ItemNotFound(_))));
}

#[tokio::test]
async fn advance_item_rejects_order_level_statuses() {
    let h = harness();
    let (_, items) = h.open_with_items(&["A"]).await;
    let result = h.coordinator.advance_item(&items[0], "payment").await;
    assert!(matches!(result, Err(OrderActionError::InvalidStatus(_))));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_item_advances_keep_order_consistent() {
    // Two racing advances must serialize on the order: after both, every
    // active item is fulfilled and the order is ready
    let h = harness();
    let (order_id, items) = h.open_with_items(&["A", "B"]).await;
    h.coordinator.advance_order(&order_id, "preparing").await.unwrap();

    let c1 = h.coordinator.clone();
    let c2 = h.coordinator.clone();
    let a = items[0].clone();
    let b = items[1].clone();
    let t1 = tokio::spawn(async move { c1.advance_item(&a, "ready").await });
    let t2 = tokio::spawn(async move { c2.advance_item(&b, "ready").await });
    t1.await.unwrap().unwrap();
    t2.await.unwrap().unwrap();

    let detail = h.order_detail(&order_id).await;
    assert_eq!(detail.status, OrderStatus::Ready);
    assert!(detail.items.iter().all(|i| i.status == ItemStatus::Ready));
}
