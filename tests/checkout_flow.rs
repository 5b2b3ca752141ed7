//! Checkout from a catalog asset through to a tracked order.

use chrono::Utc;
use orange_pages::catalog::Catalog;
use orange_pages::config::Config;
use orange_pages::flows::{milestones, progress, CheckoutFlow, CheckoutSeed};
use orange_pages::orders::{OrderBook, OrderQuery, StatusFilter};
use orange_pages::types::{Btc, OrderSide, OrderStatus, PaymentMethod};
use regex::Regex;

fn flow_for(seed: CheckoutSeed, amount: &str) -> CheckoutFlow {
    let flows = Config::default().flows;
    CheckoutFlow::new(seed, flows.fee_rate, amount)
}

#[test]
fn test_default_checkout_places_processing_order() {
    let mut flow = flow_for(CheckoutSeed::default(), "100");
    flow.continue_to_payment().unwrap();
    let order = flow.submit(Utc::now()).unwrap();

    let id_format = Regex::new(r"^ORD-\d+$").unwrap();
    assert!(id_format.is_match(&order.id), "unexpected id {}", order.id);
    assert_eq!(order.status, OrderStatus::Processing);
    assert_eq!(order.side, OrderSide::Buy);
    assert_eq!(order.total, Btc::scaled(1, 1));
    assert_eq!(order.payment_method, Some(PaymentMethod::Lightning));
    assert_eq!(flow.current_step(), 3);
}

#[test]
fn test_total_follows_amount_edits() {
    let catalog = Catalog::builtin();
    let asset = catalog.assets()[0].clone();
    let mut flow = flow_for(CheckoutSeed::buy(&asset), "100");

    flow.set_amount("3").unwrap();
    let quote = flow.draft().quote.unwrap();
    let expected = asset.price.checked_mul(rust_decimal::Decimal::from(3)).unwrap();
    assert_eq!(quote.subtotal, expected);
    assert_eq!(quote.total, quote.subtotal + quote.fee);

    flow.set_amount("").unwrap();
    assert!(flow.draft().quote.is_none());
    assert!(flow.continue_to_payment().is_err());
    assert_eq!(flow.current_step(), 1);
}

#[test]
fn test_submitted_order_shows_in_book_and_progress() {
    let mut book = OrderBook::seeded();
    let before = book.stats();

    let mut flow = flow_for(CheckoutSeed::default(), "100");
    flow.continue_to_payment().unwrap();
    flow.set_payment_method(PaymentMethod::Onchain).unwrap();
    let order = flow.submit(Utc::now()).unwrap();
    book.push(order.clone());

    let after = book.stats();
    assert_eq!(after.total, before.total + 1);
    // Only completed orders count towards volume
    assert_eq!(after.volume, before.volume);
    assert_eq!(book.orders()[0].id, order.id);
    assert_eq!(book.get(&order.id), Some(&order));

    let processing = OrderQuery {
        status: StatusFilter::Only(OrderStatus::Processing),
        ..OrderQuery::default()
    };
    assert!(book.filter(&processing).iter().any(|o| o.id == order.id));

    let reached: Vec<bool> = milestones(order.status).iter().map(|m| m.reached).collect();
    assert_eq!(reached, vec![true, true, false, false]);
    assert_eq!(progress::completed_count(order.status), 2);
}
