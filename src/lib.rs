//! Chooses how to pay a batch of orders so that the total discount is as large
//! as possible without exceeding any payment method's limit.

pub mod application;
pub mod domain;
pub mod error;
pub mod interfaces;
