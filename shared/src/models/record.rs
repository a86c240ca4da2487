//! Feed record parsing
//!
//! Rows arrive from the backend as loosely typed JSON: ids may be numbers,
//! numeric columns may come back as strings, and jsonb columns such as
//! `sizes` are sometimes double-encoded. Everything is validated here, once,
//! and only typed [`MenuItem`] / [`MenuCategory`] values leave this module.
//! Rows that fail validation are dropped with a warning.

use super::{DEFAULT_CATEGORY_ORDER, MenuCategory, MenuItem, PricedOption};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Upper bound for any single price in a feed record
pub const MAX_RECORD_PRICE: f64 = 1_000_000.0;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("missing or empty field: {0}")]
    MissingField(&'static str),

    #[error("invalid price in {field}: {value}")]
    InvalidPrice { field: &'static str, value: String },

    #[error("invalid option list in {field}: {reason}")]
    InvalidOptions { field: &'static str, reason: String },
}

/// Records accepted from one batch of rows, with a count of dropped rows
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecords<T> {
    pub records: Vec<T>,
    pub rejected: usize,
}

#[derive(Debug, Deserialize)]
struct CategoryRow {
    id: Value,
    name: Option<String>,
    display_order: Option<Value>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItemRow {
    id: Value,
    name: Option<String>,
    description: Option<String>,
    #[serde(alias = "price")]
    base_price: Option<Value>,
    image_url: Option<String>,
    is_available: Option<bool>,
    display_order: Option<Value>,
    category_id: Option<Value>,
    category: Option<String>,
    sizes: Option<Value>,
    addons: Option<Value>,
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn order_value(value: Option<&Value>) -> Option<i32> {
    match value? {
        Value::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn price_value(value: &Value, field: &'static str) -> Result<f64, RecordError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(p) if p.is_finite() && (0.0..=MAX_RECORD_PRICE).contains(&p) => Ok(p),
        _ => Err(RecordError::InvalidPrice {
            field,
            value: value.to_string(),
        }),
    }
}

fn option_list(value: Option<Value>, field: &'static str) -> Result<Vec<PricedOption>, RecordError> {
    let value = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        // double-encoded jsonb
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(Vec::new()),
        Some(Value::String(s)) => serde_json::from_str::<Value>(&s)?,
        Some(v) => v,
    };

    let Value::Array(entries) = value else {
        return Err(RecordError::InvalidOptions {
            field,
            reason: "expected an array".to_string(),
        });
    };

    entries
        .iter()
        .map(|entry| {
            let name = entry
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .ok_or_else(|| RecordError::InvalidOptions {
                    field,
                    reason: "option without a name".to_string(),
                })?;
            let price = entry.get("price").ok_or_else(|| RecordError::InvalidOptions {
                field,
                reason: format!("option '{name}' without a price"),
            })?;
            Ok(PricedOption::new(name, price_value(price, field)?))
        })
        .collect()
}

/// Parse one category row
pub fn parse_category(row: Value) -> Result<MenuCategory, RecordError> {
    let row: CategoryRow = serde_json::from_value(row)?;
    let id = id_string(&row.id).ok_or(RecordError::MissingField("id"))?;
    let name = non_empty(row.name).ok_or(RecordError::MissingField("name"))?;

    Ok(MenuCategory {
        id,
        name: name.trim().to_string(),
        display_order: order_value(row.display_order.as_ref()).unwrap_or(DEFAULT_CATEGORY_ORDER),
        description: non_empty(row.description),
    })
}

/// Parse one item row
pub fn parse_item(row: Value) -> Result<MenuItem, RecordError> {
    let row: ItemRow = serde_json::from_value(row)?;
    let id = id_string(&row.id).ok_or(RecordError::MissingField("id"))?;
    let name = non_empty(row.name).ok_or(RecordError::MissingField("name"))?;

    let base_price = match row.base_price {
        None | Some(Value::Null) => None,
        Some(ref v) => Some(price_value(v, "base_price")?),
    };

    Ok(MenuItem {
        id,
        name: name.trim().to_string(),
        description: non_empty(row.description),
        base_price,
        image_url: non_empty(row.image_url),
        is_available: row.is_available.unwrap_or(true),
        display_order: order_value(row.display_order.as_ref()).unwrap_or(0),
        category_id: row.category_id.as_ref().and_then(id_string),
        category: non_empty(row.category).map(|c| c.trim().to_string()),
        sizes: option_list(row.sizes, "sizes")?,
        addons: option_list(row.addons, "addons")?,
    })
}

fn parse_rows<T>(
    rows: Vec<Value>,
    kind: &'static str,
    parse: fn(Value) -> Result<T, RecordError>,
) -> ParsedRecords<T> {
    let mut records = Vec::with_capacity(rows.len());
    let mut rejected = 0;
    for row in rows {
        let id = row.get("id").map(Value::to_string);
        match parse(row) {
            Ok(record) => records.push(record),
            Err(e) => {
                rejected += 1;
                tracing::warn!(kind, id = ?id, error = %e, "Dropping invalid feed record");
            }
        }
    }
    ParsedRecords { records, rejected }
}

/// Parse a batch of category rows, dropping invalid ones
pub fn parse_categories(rows: Vec<Value>) -> ParsedRecords<MenuCategory> {
    parse_rows(rows, "category", parse_category)
}

/// Parse a batch of item rows, dropping invalid ones
pub fn parse_items(rows: Vec<Value>) -> ParsedRecords<MenuItem> {
    parse_rows(rows, "item", parse_item)
}
