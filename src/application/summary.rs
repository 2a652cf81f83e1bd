use super::optimizer::PaymentPlan;
use crate::domain::money::Money;
use crate::domain::payment_method::{MethodId, PaymentMethods};
use std::collections::HashMap;

/// Total spent per payment method across a plan.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpendSummary {
    lines: Vec<(MethodId, Money)>,
}

impl SpendSummary {
    /// Sums every payment of `plan` per method.
    ///
    /// Methods with nothing spent are left out. Lines follow the input order
    /// of `methods`.
    pub fn from_plan(plan: &PaymentPlan, methods: &PaymentMethods) -> Self {
        let mut totals: HashMap<&MethodId, Money> = HashMap::new();
        for payment in &plan.payments {
            for (method, amount) in payment.actual_amount_spent.iter() {
                *totals.entry(method).or_default() += amount;
            }
        }

        let lines = methods
            .iter()
            .filter_map(|method| totals.get(method.id()).map(|total| (method.id().clone(), *total)))
            .filter(|(_, total)| !total.is_zero())
            .collect();

        Self { lines }
    }

    pub fn lines(&self) -> &[(MethodId, Money)] {
        &self.lines
    }

    pub fn total_for(&self, method: &str) -> Option<Money> {
        self.lines
            .iter()
            .find(|(id, _)| id.as_str() == method)
            .map(|(_, total)| *total)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
