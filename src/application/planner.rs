use super::optimizer::{PaymentOptimizer, PaymentPlan};
use crate::domain::money::Money;
use crate::domain::order::Order;
use crate::domain::payment::AppliedPayment;
use crate::domain::payment_method::PaymentMethods;
use tracing::info;

/// What happened when a batch of orders was planned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The batch had no orders at all.
    NoOrders,
    /// Something is owed but there is nothing to pay with.
    NoPaymentMethods,
    /// Every order is free; the plan holds one zero-spend entry per order.
    AllZeroValue(PaymentPlan),
    Planned(PaymentPlan),
    /// No assignment fits the budgets. The plan is empty.
    Infeasible(PaymentPlan),
}

impl BatchOutcome {
    pub fn plan(&self) -> Option<&PaymentPlan> {
        match self {
            Self::NoOrders | Self::NoPaymentMethods => None,
            Self::AllZeroValue(plan) | Self::Planned(plan) | Self::Infeasible(plan) => Some(plan),
        }
    }
}

/// Classifies the degenerate batches and runs the optimizer on the rest.
pub fn plan_batch(orders: &[Order], methods: &PaymentMethods) -> BatchOutcome {
    if orders.is_empty() {
        return BatchOutcome::NoOrders;
    }

    let total_value: Money = orders.iter().map(Order::value).sum();
    if total_value.is_positive() && methods.is_empty() {
        return BatchOutcome::NoPaymentMethods;
    }
    if !total_value.is_positive() {
        let payments = orders
            .iter()
            .map(|order| AppliedPayment::zero_value(order.id()))
            .collect();
        return BatchOutcome::AllZeroValue(PaymentPlan {
            payments,
            ..PaymentPlan::default()
        });
    }

    info!(
        orders = orders.len(),
        methods = methods.len(),
        total = %total_value,
        "searching for optimal payment plan"
    );
    let plan = PaymentOptimizer::new(orders, methods).find_optimal_plan();
    if plan.is_empty() {
        BatchOutcome::Infeasible(plan)
    } else {
        info!(discount = %plan.total_discount, points = %plan.points_spent, "payment plan found");
        BatchOutcome::Planned(plan)
    }
}
