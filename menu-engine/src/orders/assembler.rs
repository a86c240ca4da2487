//! Order assembler
//!
//! Turns a cart plus checkout details into a priced [`OrderPayload`] and
//! hands it to the order store. Only one submission per assembler can be
//! pending at a time.

use rust_decimal::Decimal;
use shared::order::TAKEAWAY_TABLE_MARKER;
use shared::{CustomerInfo, OrderConfirmation, OrderPayload, OrderType, PaymentMethod};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;
use uuid::Uuid;

use super::error::{OrderError, OrderResult};
use super::session::{CustomerSession, SessionContext};
use crate::cart::{Cart, CartLine};
use crate::feed::OrderSink;
use crate::order_money::{order_amounts, to_f64};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text, validate_required_text,
};

pub struct OrderAssembler {
    context: SessionContext,
    sink: Arc<dyn OrderSink>,
    tax_rate_percent: Decimal,
    in_flight: AtomicBool,
}

/// Clears the in-flight flag however the submission ends
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl OrderAssembler {
    pub fn new(context: SessionContext, sink: Arc<dyn OrderSink>, tax_rate_percent: Decimal) -> Self {
        Self {
            context,
            sink,
            tax_rate_percent,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn tax_rate_percent(&self) -> Decimal {
        self.tax_rate_percent
    }

    /// Validate and price an order
    ///
    /// Dine-in orders need a table; takeaway orders carry the takeaway
    /// marker instead; QR orders keep the table if the session has one.
    pub fn assemble(
        &self,
        cart: &Cart,
        customer: &CustomerInfo,
        order_type: OrderType,
        payment_method: PaymentMethod,
    ) -> OrderResult<OrderPayload> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }

        let customer_name = validate_required_text(&customer.name, MAX_NAME_LEN)
            .map_err(|e| OrderError::validation("customer_name", e))?;
        let customer_phone = validate_required_text(&customer.phone, MAX_SHORT_TEXT_LEN)
            .map_err(|e| OrderError::validation("customer_phone", e))?;
        let special_instructions =
            validate_optional_text(customer.special_instructions.as_deref(), MAX_NOTE_LEN)
                .map_err(|e| OrderError::validation("special_instructions", e))?;

        let table = validate_optional_text(self.context.table_number.as_deref(), MAX_SHORT_TEXT_LEN)
            .map_err(|e| OrderError::validation("table_number", e))?;
        let table_number = match order_type {
            OrderType::Takeaway => Some(TAKEAWAY_TABLE_MARKER.to_string()),
            _ if order_type.requires_table() => Some(table.ok_or_else(|| {
                OrderError::validation("table_number", "is required for dine-in orders")
            })?),
            _ => table,
        };

        let amounts = order_amounts(cart.total_decimal(), self.tax_rate_percent);
        let payload = OrderPayload {
            idempotency_key: Uuid::new_v4(),
            restaurant_id: self.context.restaurant_id.clone(),
            order_type,
            table_number,
            customer_name,
            customer_phone,
            special_instructions,
            payment_method,
            items: cart.lines().iter().map(CartLine::to_order_line).collect(),
            subtotal: to_f64(amounts.subtotal),
            tax_rate: to_f64(self.tax_rate_percent),
            tax: to_f64(amounts.tax),
            total: to_f64(amounts.total),
        };

        debug!(
            restaurant_id = %payload.restaurant_id,
            lines = payload.items.len(),
            subtotal = payload.subtotal,
            tax = payload.tax,
            total = payload.total,
            "Assembled order"
        );
        Ok(payload)
    }

    /// Send `payload` to the order store
    ///
    /// Fails with [`OrderError::SubmitInFlight`] while another submission
    /// from this assembler is pending. Failures are not retried.
    pub async fn submit(&self, payload: &OrderPayload) -> OrderResult<OrderConfirmation> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            crate::order_log!(
                WARN,
                "duplicate_submit",
                restaurant_id = %payload.restaurant_id,
                idempotency_key = %payload.idempotency_key
            );
            return Err(OrderError::SubmitInFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        match self.sink.submit_order(payload).await {
            Ok(confirmation) => {
                crate::order_log!(
                    INFO,
                    "submitted",
                    restaurant_id = %payload.restaurant_id,
                    order_id = %confirmation.order_id,
                    idempotency_key = %payload.idempotency_key,
                    items = payload.item_count(),
                    total = payload.total
                );
                Ok(confirmation)
            }
            Err(e) => {
                crate::order_log!(
                    ERROR,
                    "submit_failed",
                    restaurant_id = %payload.restaurant_id,
                    idempotency_key = %payload.idempotency_key,
                    error = %e
                );
                Err(OrderError::Submission(e))
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Assemble, submit, and clear `cart` once the store accepted the order
    ///
    /// On any failure the cart is left exactly as it was.
    pub async fn place(
        &self,
        cart: &mut Cart,
        customer: &CustomerInfo,
        order_type: OrderType,
        payment_method: PaymentMethod,
    ) -> OrderResult<OrderConfirmation> {
        let payload = self.assemble(cart, customer, order_type, payment_method)?;
        let confirmation = self.submit(&payload).await?;
        cart.clear();
        Ok(confirmation)
    }
}

/// Place the order held in `session`
///
/// Uses the session's restaurant, table and order type. The cart is
/// cleared only when the store accepts the order.
pub async fn place_order(
    session: &mut CustomerSession,
    customer: &CustomerInfo,
    payment_method: PaymentMethod,
    sink: Arc<dyn OrderSink>,
    tax_rate_percent: Decimal,
) -> OrderResult<OrderConfirmation> {
    let assembler = OrderAssembler::new(session.context(), sink, tax_rate_percent);
    assembler
        .place(&mut session.cart, customer, session.order_type, payment_method)
        .await
}

#[cfg(test)]
mod tests;
