//! Composable pricing: a base amount folded through discount rules.

use crate::types::Money;
use std::sync::Arc;

/// A single price transformation.
///
/// Implemented by any `Fn(Money) -> Money` closure; named rule types can
/// implement it directly when they carry configuration.
pub trait DiscountRule: Send + Sync {
    /// Applies this rule to the running amount.
    fn apply(&self, amount: Money) -> Money;
}

impl<F> DiscountRule for F
where
    F: Fn(Money) -> Money + Send + Sync,
{
    fn apply(&self, amount: Money) -> Money {
        self(amount)
    }
}

/// An ordered, immutable-on-append sequence of discount rules over a base
/// amount.
///
/// [`PriceChain::with_rule`] never mutates the receiver: it returns a new
/// chain sharing the existing rules, so a base chain can be shared across many
/// derived chains concurrently. [`PriceChain::evaluate`] is a pure fold of the
/// current rule sequence, safe to call repeatedly and from any thread.
#[derive(Clone)]
pub struct PriceChain {
    base: Money,
    rules: Vec<Arc<dyn DiscountRule>>,
}

impl PriceChain {
    /// Creates a chain with no rules.
    #[must_use]
    pub const fn new(base: Money) -> Self {
        Self {
            base,
            rules: Vec::new(),
        }
    }

    /// Returns a new chain with `rule` appended. The receiver is unchanged.
    #[must_use]
    pub fn with_rule(&self, rule: impl DiscountRule + 'static) -> Self {
        self.with_shared_rule(Arc::new(rule))
    }

    /// Returns a new chain with an already-shared rule appended.
    #[must_use]
    pub fn with_shared_rule(&self, rule: Arc<dyn DiscountRule>) -> Self {
        let mut rules = self.rules.clone();
        rules.push(rule);
        Self {
            base: self.base,
            rules,
        }
    }

    /// The base amount before any rules.
    #[must_use]
    pub const fn base(&self) -> Money {
        self.base
    }

    /// How many rules the chain carries.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Folds the base amount through every rule in append order and clamps
    /// the final result to zero. Intermediates may go negative; only the
    /// result is clamped.
    #[must_use]
    pub fn evaluate(&self) -> Money {
        self.rules
            .iter()
            .fold(self.base, |amount, rule| rule.apply(amount))
            .clamp_non_negative()
    }
}

impl PartialEq for PriceChain {
    /// Rule closures have no structural equality; two chains are equal when
    /// they share the same base amount and the same rule instances in the
    /// same order.
    fn eq(&self, other: &Self) -> bool {
        self.base == other.base
            && self.rules.len() == other.rules.len()
            && self
                .rules
                .iter()
                .zip(&other.rules)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }
}

impl std::fmt::Debug for PriceChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriceChain")
            .field("base", &self.base)
            .field("rules", &self.rules.len())
            .finish()
    }
}
