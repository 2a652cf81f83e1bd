use crate::domain::money::Money;
use crate::domain::payment::Spend;
use crate::domain::payment_method::{MethodId, PaymentMethods};
use std::collections::HashMap;

/// Remaining budget per payment method along one search branch.
///
/// A ledger is never mutated once handed to a branch; charging a spend
/// produces a new ledger for the child branch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ledger {
    remaining: HashMap<MethodId, Money>,
}

impl Ledger {
    /// Starts every method at its full limit.
    pub fn from_methods(methods: &PaymentMethods) -> Self {
        Self {
            remaining: methods
                .iter()
                .map(|method| (method.id().clone(), method.limit()))
                .collect(),
        }
    }

    /// Remaining budget; unknown methods have none.
    pub fn balance(&self, method: &str) -> Money {
        self.remaining.get(method).copied().unwrap_or_default()
    }

    pub fn covers(&self, spend: &Spend) -> bool {
        spend
            .iter()
            .all(|(method, amount)| self.balance(method.as_str()) >= amount)
    }

    pub fn debited(&self, spend: &Spend) -> Self {
        let mut next = self.clone();
        for (method, amount) in spend.iter() {
            *next.remaining.entry(method.clone()).or_default() -= amount;
        }
        next
    }
}
