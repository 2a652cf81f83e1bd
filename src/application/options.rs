use crate::domain::money::Money;
use crate::domain::order::Order;
use crate::domain::payment::{CalculatedPaymentOption, PaymentStrategy, Spend};
use crate::domain::payment_method::{PaymentMethod, PaymentMethods};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Share of the order value that must be paid with points to earn the flat discount.
pub const MIN_POINTS_SHARE: Decimal = dec!(0.10);

/// Minimum points spend unlocking the partial-points discount for `value`.
pub fn min_points_for(value: Money) -> Money {
    value.fraction(MIN_POINTS_SHARE)
}

/// Enumerates the candidate ways each order can be paid.
///
/// Candidates depend only on the order and the methods, never on remaining
/// budgets, so they are computed once per order.
#[derive(Debug, Clone)]
pub struct OptionGenerator {
    points: Option<PaymentMethod>,
    cards: Vec<PaymentMethod>,
}

impl OptionGenerator {
    pub fn new(methods: &PaymentMethods) -> Self {
        Self {
            points: methods.points().cloned(),
            cards: methods.cards().cloned().collect(),
        }
    }

    /// Candidates for `order`, in this order: promotion cards (as listed on the
    /// order), full points, partial points per card, full price per card.
    /// Cards are visited in input order. Exact duplicates keep their first occurrence.
    pub fn options_for(&self, order: &Order) -> Vec<CalculatedPaymentOption> {
        let mut options = Vec::new();

        self.card_with_promotion(order, &mut options);
        self.full_points(order, &mut options);
        self.partial_points(order, &mut options);
        self.full_card_no_promotion(order, &mut options);

        let mut unique: Vec<CalculatedPaymentOption> = Vec::with_capacity(options.len());
        for option in options {
            if !unique.contains(&option) {
                unique.push(option);
            }
        }
        unique
    }

    fn card_with_promotion(&self, order: &Order, options: &mut Vec<CalculatedPaymentOption>) {
        for card in order.promotions().iter().filter(|method| !method.is_points()) {
            let final_price = order.value().discounted(card.discount());
            options.push(CalculatedPaymentOption::new(
                order,
                final_price,
                PaymentStrategy::FullCardWithPromotion,
                Spend::single(card.id().clone(), final_price),
            ));
        }
    }

    fn full_points(&self, order: &Order, options: &mut Vec<CalculatedPaymentOption>) {
        if let Some(points) = &self.points {
            let final_price = order.value().discounted(points.discount());
            options.push(CalculatedPaymentOption::new(
                order,
                final_price,
                PaymentStrategy::FullPointsOwnDiscount,
                Spend::single(points.id().clone(), final_price),
            ));
        }
    }

    fn partial_points(&self, order: &Order, options: &mut Vec<CalculatedPaymentOption>) {
        let Some(points) = &self.points else {
            return;
        };

        let min_points = min_points_for(order.value());
        let final_price = order.value() - min_points;
        if !min_points.is_positive() || final_price < Money::CENT {
            return;
        }

        // Provisional split; the search recomputes it against live balances.
        let preferred_points = final_price - Money::CENT;
        let (points_amount, card_amount) = if preferred_points >= min_points {
            (preferred_points, Money::CENT)
        } else {
            (min_points, final_price - min_points)
        };
        if !card_amount.is_positive() {
            return;
        }

        for card in &self.cards {
            let spent: Spend = [
                (points.id().clone(), points_amount),
                (card.id().clone(), card_amount),
            ]
            .into_iter()
            .collect();
            options.push(CalculatedPaymentOption::new(
                order,
                final_price,
                PaymentStrategy::PartialPointsTenPercentGlobalDiscount,
                spent,
            ));
        }
    }

    fn full_card_no_promotion(&self, order: &Order, options: &mut Vec<CalculatedPaymentOption>) {
        for card in &self.cards {
            options.push(CalculatedPaymentOption::new(
                order,
                order.value(),
                PaymentStrategy::FullPaymentNoPromotion,
                Spend::single(card.id().clone(), order.value()),
            ));
        }
    }
}
