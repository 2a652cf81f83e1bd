use super::money::Money;
use super::payment_method::PaymentMethod;
use crate::error::{PaymentError, Result};
use rust_decimal::Decimal;
use tracing::warn;

/// A purchase order to be paid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: String,
    value: Money,
    promotions: Vec<PaymentMethod>,
}

impl Order {
    /// Validates and normalizes an order.
    ///
    /// The value must be non-negative with at most 2 decimals. Points methods
    /// are never promotion cards and are dropped from `promotions`.
    pub fn new(id: impl Into<String>, value: Decimal, promotions: Vec<PaymentMethod>) -> Result<Self> {
        let id = id.into();
        if value < Decimal::ZERO {
            return Err(PaymentError::validation(format!(
                "Order value cannot be a negative number for order {id}: {value}"
            )));
        }
        let value = Money::from_decimal(value).map_err(|_| {
            PaymentError::validation(format!(
                "Order value cannot have more than 2 decimal places for order {id}: {value}"
            ))
        })?;

        let promotions = promotions
            .into_iter()
            .filter(|method| {
                if method.is_points() {
                    warn!(order = %id, method = %method.id(), "ignoring points method listed as promotion");
                }
                !method.is_points()
            })
            .collect();

        Ok(Self {
            id,
            value,
            promotions,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn value(&self) -> Money {
        self.value
    }

    /// Cards offering an order-specific discount, in the order they were listed.
    pub fn promotions(&self) -> &[PaymentMethod] {
        &self.promotions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::DiscountRate;
    use rust_decimal_macros::dec;

    fn card(id: &str) -> PaymentMethod {
        PaymentMethod::card(
            id,
            DiscountRate::new(dec!(10)).unwrap(),
            Money::from_decimal(dec!(100)).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_value_normalized_to_two_decimals() {
        let order = Order::new("ORDER1", dec!(100), vec![]).unwrap();
        assert_eq!(order.value().to_string(), "100.00");
        assert_eq!(order.id(), "ORDER1");
    }

    #[test]
    fn test_negative_value_rejected() {
        let result = Order::new("ORDER1", dec!(-0.01), vec![]);
        assert!(matches!(result, Err(PaymentError::Validation(msg)) if msg.contains("negative")));
    }

    #[test]
    fn test_excess_precision_rejected() {
        let result = Order::new("ORDER1", dec!(10.001), vec![]);
        assert!(matches!(result, Err(PaymentError::Validation(msg)) if msg.contains("decimal places")));
    }

    #[test]
    fn test_zero_value_allowed() {
        let order = Order::new("FREE", dec!(0), vec![]).unwrap();
        assert!(order.value().is_zero());
    }

    #[test]
    fn test_points_method_dropped_from_promotions() {
        let points = PaymentMethod::points(
            "PUNKTY",
            DiscountRate::new(dec!(15)).unwrap(),
            Money::from_decimal(dec!(100)).unwrap(),
        )
        .unwrap();
        let order = Order::new("ORDER1", dec!(50), vec![card("mZysk"), points, card("BosBankrut")]).unwrap();

        let ids: Vec<&str> = order.promotions().iter().map(|m| m.id().as_str()).collect();
        assert_eq!(ids, vec!["mZysk", "BosBankrut"]);
    }
}
