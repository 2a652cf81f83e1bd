use super::money::{DiscountRate, Money};
use crate::error::{PaymentError, Result};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of the points balance in the source data.
pub const DEFAULT_POINTS_ID: &str = "PUNKTY";

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MethodId(String);

impl MethodId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for MethodId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MethodId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// Loyalty points balance. Eligible for its own discount and for the partial-points rule.
    Points,
    /// A payment card, possibly carrying order-specific promotions.
    Card,
}

/// A payment method and its total spending budget.
///
/// Immutable once built: the remaining budget during planning lives in the
/// optimizer's ledger, never on the method itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentMethod {
    id: MethodId,
    kind: MethodKind,
    discount: DiscountRate,
    limit: Money,
}

impl PaymentMethod {
    pub fn new(id: MethodId, kind: MethodKind, discount: DiscountRate, limit: Money) -> Result<Self> {
        if id.as_str().trim().is_empty() {
            return Err(PaymentError::validation("Payment method id cannot be blank"));
        }
        if limit.is_negative() {
            return Err(PaymentError::validation(format!(
                "Limit for payment method {id} cannot be negative: {limit}"
            )));
        }
        Ok(Self {
            id,
            kind,
            discount,
            limit,
        })
    }

    pub fn card(id: impl Into<String>, discount: DiscountRate, limit: Money) -> Result<Self> {
        Self::new(MethodId::new(id), MethodKind::Card, discount, limit)
    }

    pub fn points(id: impl Into<String>, discount: DiscountRate, limit: Money) -> Result<Self> {
        Self::new(MethodId::new(id), MethodKind::Points, discount, limit)
    }

    pub fn id(&self) -> &MethodId {
        &self.id
    }

    pub fn kind(&self) -> MethodKind {
        self.kind
    }

    pub fn is_points(&self) -> bool {
        self.kind == MethodKind::Points
    }

    pub fn discount(&self) -> DiscountRate {
        self.discount
    }

    pub fn limit(&self) -> Money {
        self.limit
    }
}

/// All payment methods available to a batch, kept in input order.
///
/// Input order is the enumeration order used everywhere cards are visited,
/// which makes tie-breaking between equally good plans reproducible.
#[derive(Debug, Clone, Default)]
pub struct PaymentMethods {
    methods: Vec<PaymentMethod>,
}

impl PaymentMethods {
    pub fn new(methods: impl IntoIterator<Item = PaymentMethod>) -> Result<Self> {
        let mut registry = Self::default();
        for method in methods {
            registry.insert(method)?;
        }
        Ok(registry)
    }

    pub fn insert(&mut self, method: PaymentMethod) -> Result<()> {
        if self.get(method.id().as_str()).is_some() {
            return Err(PaymentError::validation(format!(
                "Duplicate payment method id: {}",
                method.id()
            )));
        }
        if method.is_points() && let Some(existing) = self.points() {
            return Err(PaymentError::validation(format!(
                "Only one points method is allowed, found {} and {}",
                existing.id(),
                method.id()
            )));
        }
        self.methods.push(method);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&PaymentMethod> {
        self.methods.iter().find(|method| method.id().as_str() == id)
    }

    pub fn points(&self) -> Option<&PaymentMethod> {
        self.methods.iter().find(|method| method.is_points())
    }

    pub fn cards(&self) -> impl Iterator<Item = &PaymentMethod> {
        self.methods.iter().filter(|method| !method.is_points())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaymentMethod> {
        self.methods.iter()
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
