use payplan::application::optimizer::PaymentOptimizer;
use payplan::application::options::{OptionGenerator, min_points_for};
use payplan::domain::money::Money;
use payplan::domain::order::Order;
use payplan::domain::payment::{CalculatedPaymentOption, PaymentStrategy};
use payplan::domain::payment_method::PaymentMethods;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashMap;

mod common;

const CASES: usize = 60;

/// Best discount reachable using only single-method payments, by plain enumeration.
fn single_method_lower_bound(orders: &[Order], methods: &PaymentMethods) -> Option<Money> {
    fn go(
        orders: &[Order],
        methods: &PaymentMethods,
        remaining: &mut HashMap<String, Money>,
    ) -> Option<Money> {
        let Some((order, rest)) = orders.split_first() else {
            return Some(Money::ZERO);
        };
        if order.value().is_zero() {
            return go(rest, methods, remaining);
        }

        let mut choices: Vec<(String, Money)> = Vec::new();
        for promo in order.promotions() {
            choices.push((promo.id().to_string(), order.value().discounted(promo.discount())));
        }
        if let Some(points) = methods.points() {
            choices.push((points.id().to_string(), order.value().discounted(points.discount())));
        }
        for card in methods.cards() {
            choices.push((card.id().to_string(), order.value()));
        }

        let mut best: Option<Money> = None;
        for (method, price) in choices {
            let balance = remaining[&method];
            if balance < price {
                continue;
            }
            remaining.insert(method.clone(), balance - price);
            if let Some(tail) = go(rest, methods, remaining) {
                let total = tail + (order.value() - price);
                best = Some(best.map_or(total, |b| b.max(total)));
            }
            remaining.insert(method, balance);
        }
        best
    }

    let mut remaining = methods
        .iter()
        .map(|m| (m.id().to_string(), m.limit()))
        .collect();
    go(orders, methods, &mut remaining)
}

/// Best `(discount, points)` over every feasible assignment, with no pruning
/// and no de-duplication of equal spends.
///
/// A partial-points candidate is split against the live balances: as many
/// points as fit while leaving at least a cent for the card, never fewer than
/// the 10 % minimum.
fn exhaustive_best(orders: &[Order], methods: &PaymentMethods) -> Option<(Money, Money)> {
    struct Reference<'a> {
        methods: &'a PaymentMethods,
        options: Vec<Vec<CalculatedPaymentOption>>,
        points_id: Option<String>,
    }

    impl Reference<'_> {
        fn spends(
            &self,
            order: &Order,
            option: &CalculatedPaymentOption,
            remaining: &HashMap<String, Money>,
        ) -> Vec<Vec<(String, Money)>> {
            if option.strategy() != PaymentStrategy::PartialPointsTenPercentGlobalDiscount {
                return vec![
                    option
                        .spent()
                        .iter()
                        .map(|(id, amount)| (id.to_string(), amount))
                        .collect(),
                ];
            }
            let Some(points_id) = &self.points_id else {
                return Vec::new();
            };
            let min_required = min_points_for(order.value());
            let available = remaining[points_id];
            if available < min_required {
                return Vec::new();
            }
            let price = option.final_price();
            let points_amount = available
                .min((price - Money::CENT).max(Money::ZERO))
                .max(min_required);
            let card_amount = price - points_amount;
            if !card_amount.is_positive() {
                return Vec::new();
            }
            self.methods
                .cards()
                .map(|card| {
                    vec![
                        (points_id.clone(), points_amount),
                        (card.id().to_string(), card_amount),
                    ]
                })
                .collect()
        }

        fn go(
            &self,
            orders: &[Order],
            index: usize,
            remaining: &mut HashMap<String, Money>,
        ) -> Option<(Money, Money)> {
            let Some(order) = orders.get(index) else {
                return Some((Money::ZERO, Money::ZERO));
            };
            if order.value().is_zero() {
                return self.go(orders, index + 1, remaining);
            }

            let mut best: Option<(Money, Money)> = None;
            for option in &self.options[index] {
                for spend in self.spends(order, option, remaining) {
                    if spend.iter().any(|(id, amount)| remaining[id] < *amount) {
                        continue;
                    }
                    for (id, amount) in &spend {
                        *remaining.get_mut(id).unwrap() -= *amount;
                    }
                    if let Some((tail_discount, tail_points)) =
                        self.go(orders, index + 1, remaining)
                    {
                        let points_here: Money = spend
                            .iter()
                            .filter(|(id, _)| Some(id) == self.points_id.as_ref())
                            .map(|(_, amount)| *amount)
                            .sum();
                        let total = (tail_discount + option.discount(), tail_points + points_here);
                        if best.is_none_or(|b| total > b) {
                            best = Some(total);
                        }
                    }
                    for (id, amount) in &spend {
                        *remaining.get_mut(id).unwrap() += *amount;
                    }
                }
            }
            best
        }
    }

    let generator = OptionGenerator::new(methods);
    let reference = Reference {
        methods,
        options: orders.iter().map(|order| generator.options_for(order)).collect(),
        points_id: methods.points().map(|p| p.id().to_string()),
    };
    let mut remaining = methods
        .iter()
        .map(|m| (m.id().to_string(), m.limit()))
        .collect();
    reference.go(orders, 0, &mut remaining)
}

#[test]
fn test_search_matches_exhaustive_enumeration() {
    let mut rng = StdRng::seed_from_u64(99);

    for case in 0..400 {
        let (methods, orders) = common::random_batch(&mut rng);
        let plan = PaymentOptimizer::new(&orders, &methods).find_optimal_plan();

        match exhaustive_best(&orders, &methods) {
            Some((discount, points)) => {
                assert_eq!(
                    (plan.total_discount, plan.points_spent),
                    (discount, points),
                    "case {case}"
                );
            }
            None => assert!(plan.is_empty(), "case {case}: no feasible assignment exists"),
        }
    }
}

#[test]
fn test_random_batches_respect_plan_invariants() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for case in 0..CASES {
        let (methods, orders) = common::random_batch(&mut rng);
        let plan = PaymentOptimizer::new(&orders, &methods).find_optimal_plan();

        if plan.is_empty() {
            assert_eq!(
                single_method_lower_bound(&orders, &methods),
                None,
                "case {case}: engine found no plan but a single-method plan exists"
            );
            continue;
        }

        assert_eq!(plan.len(), orders.len(), "case {case}");

        let mut spent_per_method: HashMap<String, Money> = HashMap::new();
        let mut discount = Money::ZERO;
        for (payment, order) in plan.payments.iter().zip(&orders) {
            assert_eq!(payment.order_id, order.id(), "case {case}");
            assert_eq!(
                payment.actual_amount_spent.total(),
                payment.final_price_paid,
                "case {case}: spend must add up to the price"
            );
            if order.value().is_zero() {
                assert!(payment.actual_amount_spent.is_empty(), "case {case}");
            }
            discount += order.value() - payment.final_price_paid;
            for (method, amount) in payment.actual_amount_spent.iter() {
                assert!(amount.is_positive(), "case {case}: non-positive charge");
                *spent_per_method.entry(method.to_string()).or_default() += amount;
            }
        }

        assert_eq!(discount, plan.total_discount, "case {case}");
        for method in methods.iter() {
            let spent = spent_per_method
                .get(method.id().as_str())
                .copied()
                .unwrap_or_default();
            assert!(spent <= method.limit(), "case {case}: {} over its limit", method.id());
        }

        if let Some(bound) = single_method_lower_bound(&orders, &methods) {
            assert!(
                plan.total_discount >= bound,
                "case {case}: {} below single-method optimum {bound}",
                plan.total_discount
            );
        }
    }
}

#[test]
fn test_repeated_runs_agree() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..20 {
        let (methods, orders) = common::random_batch(&mut rng);
        let optimizer = PaymentOptimizer::new(&orders, &methods);
        let first = optimizer.find_optimal_plan();
        let second = optimizer.find_optimal_plan();
        assert_eq!(first.total_discount, second.total_discount);
        assert_eq!(first.points_spent, second.points_spent);
        assert_eq!(first, second);
    }
}
