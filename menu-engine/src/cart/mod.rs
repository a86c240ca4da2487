//! Cart engine
//!
//! The authoritative list of what a customer has selected. Lines are keyed
//! by variant (item + size + add-on set, see [`generate_instance_id`]);
//! adding an existing variant increments its quantity instead of appending.
//!
//! Each line's `item_total` is fixed when the line is created. Later catalog
//! price changes do not re-price existing lines: what the customer saw is
//! what the order carries.
//!
//! The engine does no I/O and never panics on bad input; every invalid
//! operation comes back as a [`CartError`].

mod error;
mod key;

pub use error::{CartError, CartResult};
pub use key::generate_instance_id;

use crate::order_money::{self, line_total, to_f64};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::order::OrderLineItem;
use shared::{MenuItem, PricedOption};
use tracing::{debug, warn};

/// Maximum quantity on a single cart line
pub const MAX_LINE_QUANTITY: i32 = 9999;

/// One line in the customer's in-progress order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Variant key (content-addressed)
    pub instance_id: String,
    pub item_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<PricedOption>,
    #[serde(default)]
    pub selected_addons: Vec<PricedOption>,
    /// Per-unit price snapshot taken at add time
    pub item_total: f64,
}

impl CartLine {
    /// item_total × quantity
    pub fn line_total(&self) -> Decimal {
        line_total(self.item_total, self.quantity)
    }

    pub fn to_order_line(&self) -> OrderLineItem {
        OrderLineItem {
            item_id: self.item_id.clone(),
            name: self.name.clone(),
            quantity: self.quantity,
            base_price: self.base_price,
            selected_size: self.selected_size.clone(),
            selected_addons: self.selected_addons.clone(),
            item_total: self.item_total,
        }
    }
}

/// Cart-level aggregates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTotals {
    /// Sum of all line quantities
    pub count: i32,
    /// Sum of item_total × quantity
    pub total: f64,
}

/// Ordered cart lines (order matters for display only)
///
/// Deserialization goes through `CartRecord`: stored lines are
/// re-checked, re-keyed and merged before they become a cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "CartRecord")]
pub struct Cart {
    lines: Vec<CartLine>,
}

/// Cart as it comes back from storage
#[derive(Debug, Deserialize)]
struct CartRecord {
    #[serde(default)]
    lines: Vec<CartLine>,
}

impl From<CartRecord> for Cart {
    fn from(record: CartRecord) -> Self {
        let mut cart = Cart::new();
        for mut line in record.lines {
            if let Some(reason) = stored_line_defect(&line) {
                warn!(
                    item_id = %line.item_id,
                    quantity = line.quantity,
                    item_total = line.item_total,
                    reason,
                    "Dropping invalid stored cart line"
                );
                continue;
            }

            line.instance_id = generate_instance_id(
                &line.item_id,
                line.selected_size.as_ref().map(|s| s.name.as_str()),
                line.selected_addons.iter().map(|a| a.name.as_str()),
            );

            match cart.lines.iter_mut().find(|l| l.instance_id == line.instance_id) {
                Some(existing) => {
                    // both sides are within 1..=MAX_LINE_QUANTITY, no overflow
                    let merged = existing.quantity + line.quantity;
                    if merged > MAX_LINE_QUANTITY {
                        warn!(
                            item_id = %line.item_id,
                            merged,
                            max = MAX_LINE_QUANTITY,
                            "Stored cart line capped at quantity limit"
                        );
                    }
                    existing.quantity = merged.min(MAX_LINE_QUANTITY);
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }
}

fn stored_line_defect(line: &CartLine) -> Option<&'static str> {
    if line.item_id.trim().is_empty() {
        Some("missing item id")
    } else if !(1..=MAX_LINE_QUANTITY).contains(&line.quantity) {
        Some("quantity out of range")
    } else if !line.item_total.is_finite() || line.item_total < 0.0 {
        Some("invalid item total")
    } else {
        None
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of `item` with the given size and add-ons (by name)
    ///
    /// Selections are looked up on the item itself so prices always come
    /// from the catalog entry being added. Duplicate add-on names collapse
    /// to their first occurrence. Returns the index of the affected line.
    pub fn add_item(
        &mut self,
        item: &MenuItem,
        size: Option<&str>,
        addons: &[&str],
    ) -> CartResult<usize> {
        let selected_size = match size {
            Some(name) => Some(item.find_size(name).cloned().ok_or_else(|| {
                CartError::InvalidSelection {
                    item_id: item.id.clone(),
                    reason: format!("size '{name}' is not offered"),
                }
            })?),
            None if item.has_sizes() => {
                return Err(CartError::InvalidSelection {
                    item_id: item.id.clone(),
                    reason: "a size must be chosen".to_string(),
                });
            }
            None => None,
        };

        let mut selected_addons: Vec<PricedOption> = Vec::with_capacity(addons.len());
        for name in addons {
            if selected_addons.iter().any(|a| a.name == *name) {
                continue;
            }
            let addon = item
                .find_addon(name)
                .ok_or_else(|| CartError::InvalidSelection {
                    item_id: item.id.clone(),
                    reason: format!("add-on '{name}' is not offered"),
                })?;
            selected_addons.push(addon.clone());
        }

        let item_total =
            order_money::unit_price(item.base_price, selected_size.as_ref(), &selected_addons)
                .ok_or_else(|| CartError::InvalidItem {
                    item_id: item.id.clone(),
                })?;

        let instance_id = generate_instance_id(
            &item.id,
            selected_size.as_ref().map(|s| s.name.as_str()),
            selected_addons.iter().map(|a| a.name.as_str()),
        );

        if let Some(index) = self.lines.iter().position(|l| l.instance_id == instance_id) {
            self.apply_delta(index, 1)?;
            debug!(
                item_id = %item.id,
                instance_id = %instance_id,
                quantity = ?self.lines.get(index).map(|l| l.quantity),
                "Merged into existing cart line"
            );
            return Ok(index);
        }

        self.lines.push(CartLine {
            instance_id,
            item_id: item.id.clone(),
            name: item.name.clone(),
            base_price: item.base_price,
            image_url: item.image_url.clone(),
            quantity: 1,
            selected_size,
            selected_addons,
            item_total: to_f64(item_total),
        });
        debug!(item_id = %item.id, lines = self.lines.len(), "Added cart line");
        Ok(self.lines.len() - 1)
    }

    /// Add `delta` to the quantity of line `index`
    ///
    /// A resulting quantity of zero or less removes the line. An index past
    /// the end is an error, as is a zero delta.
    pub fn update_quantity(&mut self, index: usize, delta: i32) -> CartResult<()> {
        if delta == 0 {
            return Err(CartError::InvalidDelta);
        }
        if index >= self.lines.len() {
            return Err(CartError::LineNotFound {
                index,
                len: self.lines.len(),
            });
        }
        self.apply_delta(index, delta)
    }

    /// Remove one unit of the first line holding `item_id`
    ///
    /// Returns false (and leaves the cart untouched) when no line matches.
    pub fn remove_one_unit(&mut self, item_id: &str) -> bool {
        match self.lines.iter().position(|l| l.item_id == item_id) {
            Some(index) => self.apply_delta(index, -1).is_ok(),
            None => false,
        }
    }

    /// Units of `item_id` across every variant
    pub fn get_quantity(&self, item_id: &str) -> i32 {
        self.lines
            .iter()
            .filter(|l| l.item_id == item_id)
            .map(|l| l.quantity)
            .sum()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals {
            count: self.lines.iter().map(|l| l.quantity).sum(),
            total: to_f64(self.total_decimal()),
        }
    }

    /// Exact cart total for downstream money math
    pub fn total_decimal(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    fn apply_delta(&mut self, index: usize, delta: i32) -> CartResult<()> {
        let len = self.lines.len();
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CartError::LineNotFound { index, len })?;

        let quantity = i64::from(line.quantity) + i64::from(delta);
        if quantity <= 0 {
            let removed = self.lines.remove(index);
            debug!(item_id = %removed.item_id, instance_id = %removed.instance_id, "Removed cart line");
            return Ok(());
        }
        if quantity > i64::from(MAX_LINE_QUANTITY) {
            return Err(CartError::QuantityLimit {
                quantity,
                max: MAX_LINE_QUANTITY,
            });
        }
        line.quantity = quantity as i32;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
