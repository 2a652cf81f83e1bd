use super::ledger::Ledger;
use super::options::{OptionGenerator, min_points_for};
use crate::domain::money::Money;
use crate::domain::order::Order;
use crate::domain::payment::{AppliedPayment, CalculatedPaymentOption, PaymentStrategy, Spend};
use crate::domain::payment_method::{MethodId, PaymentMethod, PaymentMethods};
use std::rc::Rc;
use tracing::{debug, trace};

/// The chosen payment for every order, plus the totals it was selected on.
///
/// An empty plan for a batch with a positive total value means no
/// budget-feasible assignment exists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaymentPlan {
    pub payments: Vec<AppliedPayment>,
    pub total_discount: Money,
    pub points_spent: Money,
}

impl PaymentPlan {
    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.payments.len()
    }
}

/// Counters describing how much of the search tree was visited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub leaves: u64,
    pub pruned: u64,
    pub dead_ends: u64,
}

/// Finds the budget-feasible plan with the largest total discount.
///
/// Ties on discount go to the plan spending more points; remaining ties go to
/// the first plan found. Orders are visited in input order and each order's
/// candidates in [`OptionGenerator`] order, so the result is reproducible.
#[derive(Debug)]
pub struct PaymentOptimizer<'a> {
    orders: &'a [Order],
    methods: &'a PaymentMethods,
    generator: OptionGenerator,
}

impl<'a> PaymentOptimizer<'a> {
    pub fn new(orders: &'a [Order], methods: &'a PaymentMethods) -> Self {
        Self {
            orders,
            methods,
            generator: OptionGenerator::new(methods),
        }
    }

    pub fn find_optimal_plan(&self) -> PaymentPlan {
        self.search().0
    }

    /// Runs the search and also reports traversal statistics.
    pub fn search(&self) -> (PaymentPlan, SearchStats) {
        let options: Vec<Vec<CalculatedPaymentOption>> = self
            .orders
            .iter()
            .map(|order| {
                let options = self.generator.options_for(order);
                debug!(order = order.id(), value = %order.value(), candidates = options.len(), "generated payment options");
                options
            })
            .collect();

        let mut search = Search::new(self.orders, self.methods, options);
        search.visit(0, &Ledger::from_methods(self.methods), Money::ZERO, Money::ZERO, None);

        let stats = search.stats;
        let plan = search.into_plan();
        debug!(
            leaves = stats.leaves,
            pruned = stats.pruned,
            dead_ends = stats.dead_ends,
            discount = %plan.total_discount,
            points = %plan.points_spent,
            "search finished"
        );
        (plan, stats)
    }
}

/// Ledger-feasible spend for one candidate at one search node.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Realization {
    strategy: PaymentStrategy,
    final_price: Money,
    discount: Money,
    spend: Spend,
}

/// Append-only path shared between a node and its descendants.
#[derive(Debug)]
struct PathNode {
    payment: AppliedPayment,
    parent: Path,
}

type Path = Option<Rc<PathNode>>;

#[derive(Debug)]
struct Best {
    discount: Money,
    points: Money,
    path: Path,
}

struct Search<'a> {
    orders: &'a [Order],
    options: Vec<Vec<CalculatedPaymentOption>>,
    /// Largest discount still obtainable from order `i` onwards, ignoring budgets.
    remaining_bound: Vec<Money>,
    points: Option<&'a MethodId>,
    cards: Vec<&'a PaymentMethod>,
    best: Option<Best>,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    fn new(
        orders: &'a [Order],
        methods: &'a PaymentMethods,
        options: Vec<Vec<CalculatedPaymentOption>>,
    ) -> Self {
        let mut remaining_bound = vec![Money::ZERO; options.len() + 1];
        for (index, candidates) in options.iter().enumerate().rev() {
            let best_here = candidates
                .iter()
                .map(CalculatedPaymentOption::discount)
                .max()
                .unwrap_or_default()
                .max(Money::ZERO);
            remaining_bound[index] = remaining_bound[index + 1] + best_here;
        }

        Self {
            orders,
            options,
            remaining_bound,
            points: methods.points().map(PaymentMethod::id),
            cards: methods.cards().collect(),
            best: None,
            stats: SearchStats::default(),
        }
    }

    fn visit(&mut self, index: usize, ledger: &Ledger, discount: Money, points: Money, path: Path) {
        let orders = self.orders;
        let Some(order) = orders.get(index) else {
            self.record_leaf(discount, points, path);
            return;
        };

        if let Some(best) = &self.best
            && discount + self.remaining_bound[index] < best.discount
        {
            self.stats.pruned += 1;
            return;
        }

        if order.value().is_zero() {
            let node = PathNode {
                payment: AppliedPayment::zero_value(order.id()),
                parent: path,
            };
            self.visit(index + 1, ledger, discount, points, Some(Rc::new(node)));
            return;
        }

        let realizations = self.realizations(index, order, ledger);
        if realizations.is_empty() {
            trace!(order = order.id(), "no feasible payment on this branch");
            self.stats.dead_ends += 1;
            return;
        }

        for realization in realizations {
            let next_ledger = ledger.debited(&realization.spend);
            let points_here = self
                .points
                .map(|id| realization.spend.amount_for(id.as_str()))
                .unwrap_or_default();
            let node = PathNode {
                payment: AppliedPayment {
                    order_id: order.id().to_string(),
                    final_price_paid: realization.final_price,
                    strategy: realization.strategy,
                    actual_amount_spent: realization.spend,
                },
                parent: path.clone(),
            };
            self.visit(
                index + 1,
                &next_ledger,
                discount + realization.discount,
                points + points_here,
                Some(Rc::new(node)),
            );
        }
    }

    fn record_leaf(&mut self, discount: Money, points: Money, path: Path) {
        self.stats.leaves += 1;
        let improves = match &self.best {
            None => true,
            Some(best) => discount > best.discount || (discount == best.discount && points > best.points),
        };
        if improves {
            trace!(%discount, %points, "new best plan");
            self.best = Some(Best {
                discount,
                points,
                path,
            });
        }
    }

    fn realizations(&self, index: usize, order: &Order, ledger: &Ledger) -> Vec<Realization> {
        let mut found: Vec<Realization> = Vec::new();
        for option in &self.options[index] {
            if option.strategy().is_single_method() {
                if ledger.covers(option.spent()) {
                    push_unique(
                        &mut found,
                        Realization {
                            strategy: option.strategy(),
                            final_price: option.final_price(),
                            discount: option.discount(),
                            spend: option.spent().clone(),
                        },
                    );
                }
            } else {
                self.partial_points_realizations(order, option, ledger, &mut found);
            }
        }
        found
    }

    /// Splits the partial-points price against the live balances: as many
    /// points as possible while leaving at least a cent for the card.
    fn partial_points_realizations(
        &self,
        order: &Order,
        option: &CalculatedPaymentOption,
        ledger: &Ledger,
        found: &mut Vec<Realization>,
    ) {
        let Some(points_id) = self.points else {
            return;
        };

        let min_required = min_points_for(order.value());
        let available = ledger.balance(points_id.as_str());
        if available < min_required {
            return;
        }

        let final_price = option.final_price();
        let max_leaving_card = (final_price - Money::CENT).max(Money::ZERO);
        let points_amount = available.min(max_leaving_card).max(min_required);
        let card_amount = final_price - points_amount;
        if !card_amount.is_positive() {
            return;
        }

        for card in &self.cards {
            if ledger.balance(card.id().as_str()) >= card_amount {
                let spend: Spend = [
                    (points_id.clone(), points_amount),
                    (card.id().clone(), card_amount),
                ]
                .into_iter()
                .collect();
                push_unique(
                    found,
                    Realization {
                        strategy: option.strategy(),
                        final_price,
                        discount: option.discount(),
                        spend,
                    },
                );
            }
        }
    }

    fn into_plan(self) -> PaymentPlan {
        let Some(best) = self.best else {
            return PaymentPlan::default();
        };

        let mut payments = Vec::with_capacity(self.orders.len());
        let mut cursor = best.path.as_deref();
        while let Some(node) = cursor {
            payments.push(node.payment.clone());
            cursor = node.parent.as_deref();
        }
        payments.reverse();

        PaymentPlan {
            payments,
            total_discount: best.discount,
            points_spent: best.points,
        }
    }
}

fn push_unique(found: &mut Vec<Realization>, realization: Realization) {
    if !found.contains(&realization) {
        found.push(realization);
    }
}
