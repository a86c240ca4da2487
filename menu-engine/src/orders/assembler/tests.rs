use super::*;
use crate::feed::{InMemoryBackend, SinkError};
use async_trait::async_trait;
use shared::{MenuItem, PricedOption};
use tokio::sync::Notify;

fn five_percent() -> Decimal {
    Decimal::from(5)
}

fn assembler(table: Option<&str>, sink: Arc<dyn OrderSink>) -> OrderAssembler {
    let mut context = SessionContext::new("r1");
    context.table_number = table.map(str::to_string);
    OrderAssembler::new(context, sink, five_percent())
}

fn customer() -> CustomerInfo {
    CustomerInfo::new("Asha", "9845012345")
}

fn cart_of(total: f64) -> Cart {
    let mut cart = Cart::new();
    cart.add_item(&MenuItem::new("i1", "Thali", total), None, &[])
        .unwrap();
    cart
}

/// Sink that holds every submission until released
#[derive(Default)]
struct GatedSink {
    entered: Notify,
    release: Notify,
}

#[async_trait]
impl OrderSink for GatedSink {
    async fn submit_order(&self, _payload: &OrderPayload) -> Result<OrderConfirmation, SinkError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(OrderConfirmation {
            order_id: "gated-1".into(),
            status: Default::default(),
            created_at: None,
        })
    }
}

#[test]
fn test_tax_on_200() {
    let asm = assembler(Some("T1"), Arc::new(InMemoryBackend::new()));
    let payload = asm
        .assemble(&cart_of(200.0), &customer(), OrderType::DineIn, PaymentMethod::Cash)
        .unwrap();

    assert_eq!(payload.subtotal, 200.0);
    assert_eq!(payload.tax, 10.0);
    assert_eq!(payload.total, 210.0);
    assert_eq!(payload.tax_rate, 5.0);
    assert_eq!(payload.table_number.as_deref(), Some("T1"));
    assert_eq!(payload.restaurant_id, "r1");
}

#[test]
fn test_lines_carry_selections() {
    let item = MenuItem::new("bc", "Butter Chicken", 250.0)
        .with_sizes(vec![PricedOption::new("Large", 350.0)])
        .with_addons(vec![PricedOption::new("Butter Naan", 40.0)]);
    let mut cart = Cart::new();
    cart.add_item(&item, Some("Large"), &["Butter Naan"]).unwrap();
    cart.update_quantity(0, 1).unwrap();

    let asm = assembler(Some("T1"), Arc::new(InMemoryBackend::new()));
    let payload = asm
        .assemble(&cart, &customer(), OrderType::DineIn, PaymentMethod::Upi)
        .unwrap();

    assert_eq!(payload.items.len(), 1);
    assert_eq!(payload.items[0].quantity, 2);
    assert_eq!(payload.items[0].item_total, 390.0);
    assert_eq!(payload.items[0].base_price, Some(250.0));
    assert_eq!(payload.subtotal, 780.0);
    assert_eq!(payload.tax, 39.0);
    assert_eq!(payload.total, 819.0);
}

#[test]
fn test_takeaway_uses_marker() {
    let asm = assembler(None, Arc::new(InMemoryBackend::new()));
    let payload = asm
        .assemble(&cart_of(100.0), &customer(), OrderType::Takeaway, PaymentMethod::Card)
        .unwrap();
    assert_eq!(payload.table_number.as_deref(), Some(TAKEAWAY_TABLE_MARKER));
}

#[test]
fn test_dine_in_requires_table() {
    let asm = assembler(Some("   "), Arc::new(InMemoryBackend::new()));
    let err = asm
        .assemble(&cart_of(100.0), &customer(), OrderType::DineIn, PaymentMethod::Cash)
        .unwrap_err();
    assert!(matches!(err, OrderError::Validation { field: "table_number", .. }));
    assert_eq!(err.code(), shared::ErrorCode::OrderTableRequired);
}

#[test]
fn test_qr_table_optional() {
    let asm = assembler(None, Arc::new(InMemoryBackend::new()));
    let payload = asm
        .assemble(&cart_of(100.0), &customer(), OrderType::Qr, PaymentMethod::Online)
        .unwrap();
    assert!(payload.table_number.is_none());
}

#[test]
fn test_customer_validation() {
    let asm = assembler(Some("T1"), Arc::new(InMemoryBackend::new()));
    let cart = cart_of(100.0);

    let no_name = CustomerInfo::new(" ", "98450");
    assert!(matches!(
        asm.assemble(&cart, &no_name, OrderType::DineIn, PaymentMethod::Cash),
        Err(OrderError::Validation { field: "customer_name", .. })
    ));

    let no_phone = CustomerInfo::new("Asha", "");
    assert!(matches!(
        asm.assemble(&cart, &no_phone, OrderType::DineIn, PaymentMethod::Cash),
        Err(OrderError::Validation { field: "customer_phone", .. })
    ));

    let long_note = customer().with_instructions("x".repeat(MAX_NOTE_LEN + 1));
    assert!(matches!(
        asm.assemble(&cart, &long_note, OrderType::DineIn, PaymentMethod::Cash),
        Err(OrderError::Validation { field: "special_instructions", .. })
    ));
}

#[test]
fn test_customer_fields_trimmed() {
    let asm = assembler(Some("T1"), Arc::new(InMemoryBackend::new()));
    let padded = CustomerInfo::new("  Asha ", " 98450 ").with_instructions("  no onion ");
    let payload = asm
        .assemble(&cart_of(100.0), &padded, OrderType::DineIn, PaymentMethod::Cash)
        .unwrap();
    assert_eq!(payload.customer_name, "Asha");
    assert_eq!(payload.customer_phone, "98450");
    assert_eq!(payload.special_instructions.as_deref(), Some("no onion"));
}

#[test]
fn test_empty_cart_rejected() {
    let asm = assembler(Some("T1"), Arc::new(InMemoryBackend::new()));
    assert_eq!(
        asm.assemble(&Cart::new(), &customer(), OrderType::DineIn, PaymentMethod::Cash),
        Err(OrderError::EmptyCart)
    );
}

#[test]
fn test_each_payload_gets_fresh_idempotency_key() {
    let asm = assembler(Some("T1"), Arc::new(InMemoryBackend::new()));
    let cart = cart_of(100.0);
    let a = asm.assemble(&cart, &customer(), OrderType::DineIn, PaymentMethod::Cash).unwrap();
    let b = asm.assemble(&cart, &customer(), OrderType::DineIn, PaymentMethod::Cash).unwrap();
    assert_ne!(a.idempotency_key, b.idempotency_key);
}

#[tokio::test]
async fn test_submit_failure_carries_cause() {
    let backend = Arc::new(InMemoryBackend::new());
    backend.set_reject_orders(true);
    let asm = assembler(Some("T1"), backend.clone());

    let payload = asm
        .assemble(&cart_of(100.0), &customer(), OrderType::DineIn, PaymentMethod::Cash)
        .unwrap();
    let err = asm.submit(&payload).await.unwrap_err();
    assert!(matches!(err, OrderError::Submission(SinkError::Unavailable(_))));
    assert!(!asm.is_submitting());
    assert!(backend.orders().is_empty());
}

#[tokio::test]
async fn test_second_submit_while_pending_is_rejected() {
    let sink = Arc::new(GatedSink::default());
    let asm = Arc::new(assembler(Some("T1"), sink.clone()));
    let payload = asm
        .assemble(&cart_of(100.0), &customer(), OrderType::DineIn, PaymentMethod::Cash)
        .unwrap();

    let first = {
        let asm = asm.clone();
        let payload = payload.clone();
        tokio::spawn(async move { asm.submit(&payload).await })
    };
    sink.entered.notified().await;
    assert!(asm.is_submitting());

    assert_eq!(asm.submit(&payload).await, Err(OrderError::SubmitInFlight));

    sink.release.notify_one();
    let confirmation = first.await.unwrap().unwrap();
    assert_eq!(confirmation.order_id, "gated-1");
    assert!(!asm.is_submitting());
}

#[tokio::test]
async fn test_place_clears_cart_only_on_success() {
    let backend = Arc::new(InMemoryBackend::new());
    let asm = assembler(Some("T1"), backend.clone());
    let mut cart = cart_of(100.0);

    backend.set_reject_orders(true);
    let before = cart.clone();
    assert!(asm
        .place(&mut cart, &customer(), OrderType::DineIn, PaymentMethod::Cash)
        .await
        .is_err());
    assert_eq!(cart, before);

    backend.set_reject_orders(false);
    asm.place(&mut cart, &customer(), OrderType::DineIn, PaymentMethod::Cash)
        .await
        .unwrap();
    assert!(cart.is_empty());
    assert_eq!(backend.orders().len(), 1);
}

#[tokio::test]
async fn test_place_order_uses_session() {
    let backend = Arc::new(InMemoryBackend::new());
    let mut session = CustomerSession::from_table_qr("r9", "T7");
    session
        .cart
        .add_item(&MenuItem::new("i1", "Filter Coffee", 40.0), None, &[])
        .unwrap();

    let confirmation = place_order(
        &mut session,
        &customer(),
        PaymentMethod::Upi,
        backend.clone(),
        five_percent(),
    )
    .await
    .unwrap();

    assert!(!confirmation.order_id.is_empty());
    assert!(session.cart.is_empty());
    let stored = &backend.orders()[0];
    assert_eq!(stored.restaurant_id, "r9");
    assert_eq!(stored.order_type, OrderType::Qr);
    assert_eq!(stored.table_number.as_deref(), Some("T7"));
    assert_eq!(stored.total, 42.0);
}
