//! Application layer: turns validated orders and payment methods into a plan.
//!
//! [`options::OptionGenerator`] enumerates candidate payments per order,
//! [`optimizer::PaymentOptimizer`] searches all orders jointly against a
//! per-branch [`ledger::Ledger`], and [`planner::plan_batch`] wraps the search
//! with the degenerate-batch checks the CLI reports on.

pub mod ledger;
pub mod optimizer;
pub mod options;
pub mod planner;
pub mod summary;
