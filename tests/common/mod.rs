#![allow(dead_code)]

use payplan::domain::money::{DiscountRate, Money};
use payplan::domain::order::Order;
use payplan::domain::payment_method::{PaymentMethod, PaymentMethods};
use rand::Rng;
use rust_decimal::Decimal;
use std::fs;
use std::io::Error;
use std::path::{Path, PathBuf};

pub fn write_json(dir: &Path, name: &str, content: &str) -> Result<PathBuf, Error> {
    let path = dir.join(name);
    fs::write(&path, content)?;
    Ok(path)
}

pub fn money(cents: i64) -> Money {
    Money::from_decimal(Decimal::new(cents, 2)).expect("two decimals")
}

pub fn card(id: &str, discount: u32, limit_cents: i64) -> PaymentMethod {
    PaymentMethod::card(id, rate(discount), money(limit_cents)).expect("valid card")
}

pub fn points(discount: u32, limit_cents: i64) -> PaymentMethod {
    PaymentMethod::points("PUNKTY", rate(discount), money(limit_cents)).expect("valid points")
}

fn rate(discount: u32) -> DiscountRate {
    DiscountRate::new(Decimal::from(discount)).expect("valid discount")
}

/// A random batch of up to 5 orders over 1-3 cards and, sometimes, points.
pub fn random_batch<R: Rng>(rng: &mut R) -> (PaymentMethods, Vec<Order>) {
    let mut methods = Vec::new();
    if rng.gen_bool(0.6) {
        methods.push(points(rng.gen_range(0..=20), rng.gen_range(0..=20_000)));
    }
    for i in 0..rng.gen_range(1..=3) {
        methods.push(card(
            &format!("CARD{i}"),
            rng.gen_range(0..=15),
            rng.gen_range(0..=30_000),
        ));
    }
    let methods = PaymentMethods::new(methods).expect("unique ids");
    let cards: Vec<PaymentMethod> = methods.cards().cloned().collect();

    let orders = (0..rng.gen_range(1..=5))
        .map(|i| {
            let value = if rng.gen_bool(0.1) {
                Decimal::ZERO
            } else {
                Decimal::new(rng.gen_range(1..=15_000), 2)
            };
            let promotions = cards
                .iter()
                .filter(|_| rng.gen_bool(0.4))
                .cloned()
                .collect();
            Order::new(format!("ORDER{i}"), value, promotions).expect("valid order")
        })
        .collect();

    (methods, orders)
}
