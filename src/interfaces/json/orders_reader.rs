use super::{RawDecimal, format_error, open, unnamed_origin};
use crate::domain::order::Order;
use crate::domain::payment_method::PaymentMethods;
use crate::error::{PaymentError, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct RawOrder {
    id: String,
    value: Option<RawDecimal>,
    #[serde(default)]
    promotions: Option<Vec<Option<String>>>,
}

/// Reads the orders JSON array:
/// `[{"id": "ORDER1", "value": "100.00", "promotions": ["mZysk"]}]`.
///
/// Promotion ids are resolved against the already loaded payment methods.
pub struct OrdersReader<R: Read> {
    source: R,
    origin: PathBuf,
}

impl OrdersReader<File> {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(open(path)?).with_origin(path))
    }
}

impl<R: Read> OrdersReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            origin: unnamed_origin(),
        }
    }

    /// Names the source in error messages.
    pub fn with_origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Parses every order, keeping file order. The first invalid order fails the whole read.
    pub fn orders(self, methods: &PaymentMethods) -> Result<Vec<Order>> {
        let raw: Vec<RawOrder> =
            serde_json::from_reader(self.source).map_err(|e| format_error(&self.origin, e))?;

        raw.into_iter()
            .map(|entry| to_order(entry, methods))
            .collect()
    }
}

fn to_order(raw: RawOrder, methods: &PaymentMethods) -> Result<Order> {
    let owner = format!("Order ID: {}", raw.id);
    let value = raw
        .value
        .ok_or_else(|| PaymentError::validation(format!("Missing value for {owner}")))?
        .parse("value", &owner)?;

    let mut promotions = Vec::new();
    for promo_id in raw.promotions.into_iter().flatten().flatten() {
        let promo_id = promo_id.trim();
        if promo_id.is_empty() {
            continue;
        }
        match methods.get(promo_id) {
            Some(method) => promotions.push(method.clone()),
            None => warn!(order = %raw.id, promotion = promo_id, "unknown promotion ignored"),
        }
    }

    let order = Order::new(raw.id, value, promotions)?;
    debug!(
        id = order.id(),
        value = %order.value(),
        promotions = order.promotions().len(),
        "loaded order"
    );
    Ok(order)
}
