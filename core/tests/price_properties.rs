//! Property tests for price chain evaluation.

#![allow(clippy::unwrap_used)] // Test code can use unwrap

use proptest::prelude::*;
use reserva_core::price::PriceChain;
use reserva_core::types::Money;

/// Builds a chain of flat deductions over `base`.
fn chain_of(base: i64, deductions: &[i64]) -> PriceChain {
    deductions.iter().fold(
        PriceChain::new(Money::from_cents(base)),
        |chain, &deduction| {
            chain.with_rule(move |amount: Money| {
                amount.saturating_sub(Money::from_cents(deduction))
            })
        },
    )
}

proptest! {
    /// The final amount is clamped, never negative.
    #[test]
    fn evaluation_is_never_negative(
        base in -10_000_i64..10_000,
        deductions in prop::collection::vec(-5_000_i64..5_000, 0..8),
    ) {
        let evaluated = chain_of(base, &deductions).evaluate();
        prop_assert!(!evaluated.is_negative());
    }

    /// Evaluation equals the plain fold of the deductions, clamped at the end
    /// (intermediates may dip below zero).
    #[test]
    fn evaluation_matches_the_fold(
        base in -10_000_i64..10_000,
        deductions in prop::collection::vec(-5_000_i64..5_000, 0..8),
    ) {
        let expected = deductions
            .iter()
            .fold(base, |amount, deduction| amount.saturating_sub(*deduction))
            .max(0);
        prop_assert_eq!(chain_of(base, &deductions).evaluate(), Money::from_cents(expected));
    }

    /// Appending a rule never mutates the receiver.
    #[test]
    fn append_is_non_destructive(
        base in 0_i64..10_000,
        deductions in prop::collection::vec(0_i64..5_000, 0..6),
        extra in 0_i64..5_000,
    ) {
        let chain = chain_of(base, &deductions);
        let before = chain.evaluate();
        let _derived = chain.with_rule(move |amount: Money| {
            amount.saturating_sub(Money::from_cents(extra))
        });
        prop_assert_eq!(chain.evaluate(), before);
        prop_assert_eq!(chain.rule_count(), deductions.len());
    }
}
