use super::money::Money;
use super::order::Order;
use super::payment_method::MethodId;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentStrategy {
    /// Whole order paid by a card carrying a promotion for it.
    FullCardWithPromotion,
    /// Whole order paid with points at the points method's own discount.
    FullPointsOwnDiscount,
    /// At least 10% paid with points, rest by card, earning a flat 10% discount.
    PartialPointsTenPercentGlobalDiscount,
    /// Whole order paid by a card at full price.
    FullPaymentNoPromotion,
}

impl PaymentStrategy {
    /// Strategies charging exactly one method, whose nominal spend is the realized spend.
    pub fn is_single_method(&self) -> bool {
        !matches!(self, Self::PartialPointsTenPercentGlobalDiscount)
    }
}

impl fmt::Display for PaymentStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FullCardWithPromotion => "full-card-with-promotion",
            Self::FullPointsOwnDiscount => "full-points-own-discount",
            Self::PartialPointsTenPercentGlobalDiscount => "partial-points-ten-percent",
            Self::FullPaymentNoPromotion => "full-payment-no-promotion",
        };
        f.write_str(name)
    }
}

/// Amounts charged per payment method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Spend(BTreeMap<MethodId, Money>);

impl Spend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(method: MethodId, amount: Money) -> Self {
        let mut spend = Self::new();
        spend.charge(method, amount);
        spend
    }

    /// Adds `amount` to whatever is already charged to `method`.
    pub fn charge(&mut self, method: MethodId, amount: Money) {
        *self.0.entry(method).or_default() += amount;
    }

    pub fn amount_for(&self, method: &str) -> Money {
        self.0.get(method).copied().unwrap_or_default()
    }

    pub fn total(&self) -> Money {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MethodId, Money)> {
        self.0.iter().map(|(id, amount)| (id, *amount))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(MethodId, Money)> for Spend {
    fn from_iter<I: IntoIterator<Item = (MethodId, Money)>>(iter: I) -> Self {
        let mut spend = Self::new();
        for (method, amount) in iter {
            spend.charge(method, amount);
        }
        spend
    }
}

/// One way an order could be paid, before any budget is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatedPaymentOption {
    order_id: String,
    final_price: Money,
    discount: Money,
    strategy: PaymentStrategy,
    spent: Spend,
}

impl CalculatedPaymentOption {
    /// The discount is always `order.value - final_price`; it is never taken from the caller.
    pub fn new(order: &Order, final_price: Money, strategy: PaymentStrategy, spent: Spend) -> Self {
        Self {
            order_id: order.id().to_string(),
            final_price,
            discount: order.value() - final_price,
            strategy,
            spent,
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn final_price(&self) -> Money {
        self.final_price
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    pub fn strategy(&self) -> PaymentStrategy {
        self.strategy
    }

    pub fn spent(&self) -> &Spend {
        &self.spent
    }
}

/// The payment chosen for one order in a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedPayment {
    pub order_id: String,
    pub final_price_paid: Money,
    pub strategy: PaymentStrategy,
    pub actual_amount_spent: Spend,
}

impl AppliedPayment {
    /// Entry for an order with nothing to pay.
    pub fn zero_value(order_id: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            final_price_paid: Money::ZERO,
            strategy: PaymentStrategy::FullPaymentNoPromotion,
            actual_amount_spent: Spend::new(),
        }
    }
}
