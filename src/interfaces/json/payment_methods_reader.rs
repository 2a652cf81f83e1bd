use super::{RawDecimal, format_error, open, unnamed_origin};
use crate::domain::money::{DiscountRate, Money};
use crate::domain::payment_method::{
    DEFAULT_POINTS_ID, MethodId, MethodKind, PaymentMethod, PaymentMethods,
};
use crate::error::Result;
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct RawPaymentMethod {
    id: String,
    discount: RawDecimal,
    limit: RawDecimal,
}

/// Reads the payment methods JSON array:
/// `[{"id": "mZysk", "discount": "10", "limit": "180.00"}]`.
///
/// The method whose id equals the configured points id becomes the points
/// method; every other entry is a card.
pub struct PaymentMethodsReader<R: Read> {
    source: R,
    origin: PathBuf,
    points_id: String,
}

impl PaymentMethodsReader<File> {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(open(path)?).with_origin(path))
    }
}

impl<R: Read> PaymentMethodsReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            origin: unnamed_origin(),
            points_id: DEFAULT_POINTS_ID.to_string(),
        }
    }

    /// Names the source in error messages.
    pub fn with_origin(mut self, origin: impl Into<PathBuf>) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn with_points_id(mut self, points_id: impl Into<String>) -> Self {
        self.points_id = points_id.into();
        self
    }

    /// Parses and validates every method. The first invalid entry fails the whole read.
    pub fn payment_methods(self) -> Result<PaymentMethods> {
        let Self {
            source,
            origin,
            points_id,
        } = self;
        let raw: Vec<RawPaymentMethod> =
            serde_json::from_reader(source).map_err(|e| format_error(&origin, e))?;

        let mut methods = PaymentMethods::default();
        for entry in raw {
            let method = to_payment_method(entry, &points_id)?;
            debug!(
                id = %method.id(),
                kind = ?method.kind(),
                discount = %method.discount(),
                limit = %method.limit(),
                "loaded payment method"
            );
            methods.insert(method)?;
        }
        Ok(methods)
    }
}

fn to_payment_method(raw: RawPaymentMethod, points_id: &str) -> Result<PaymentMethod> {
    let owner = format!("PaymentMethod ID: {}", raw.id);
    let discount = DiscountRate::new(raw.discount.parse("discount", &owner)?)
        .map_err(|e| e.context(&owner))?;
    let limit = Money::from_decimal(raw.limit.parse("limit", &owner)?)
        .map_err(|e| e.context(&owner))?;

    let kind = if raw.id == points_id {
        MethodKind::Points
    } else {
        MethodKind::Card
    };
    PaymentMethod::new(MethodId::new(raw.id), kind, discount, limit)
}
