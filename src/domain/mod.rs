//! Value objects of the payment planning domain.
//!
//! Everything here is immutable once constructed and validated; live budget
//! state belongs to the optimizer in the application layer.

pub mod money;
pub mod order;
pub mod payment;
pub mod payment_method;
