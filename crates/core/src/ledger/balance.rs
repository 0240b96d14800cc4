//! Derived balance calculations.
//!
//! A balance is never stored: it is always recomputed from the opening
//! balance and the signed amounts of approved entries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use storebooks_shared::types::Money;

use super::entry::EntryType;

/// Normal balance side for an account type.
///
/// - Asset/Expense: balance += debit - credit (debit-normal)
/// - Liability/Equity/Income: balance += credit - debit (credit-normal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalBalance {
    /// Debit-normal accounts (Asset, Expense).
    DebitNormal,
    /// Credit-normal accounts (Liability, Equity, Income).
    CreditNormal,
}

impl NormalBalance {
    /// Calculates the balance change for a pair of debit/credit amounts.
    #[must_use]
    pub fn balance_change(self, debit: Money, credit: Money) -> Money {
        match self {
            Self::DebitNormal => debit - credit,
            Self::CreditNormal => credit - debit,
        }
    }
}

/// Returns the signed contribution of an entry to a balance on the given
/// normal-balance side: positive when the entry sits on the account's
/// normal side, negative otherwise.
#[must_use]
pub fn signed_amount(normal: NormalBalance, entry_type: EntryType, amount: Money) -> Money {
    match (normal, entry_type) {
        (NormalBalance::DebitNormal, EntryType::Debit)
        | (NormalBalance::CreditNormal, EntryType::Credit) => amount,
        (NormalBalance::DebitNormal, EntryType::Credit)
        | (NormalBalance::CreditNormal, EntryType::Debit) => -amount,
    }
}

/// Computes a ledger balance as of a date.
///
/// `entries` must contain only entries of approved transactions; the date
/// filter is applied here. The result is `opening` plus the signed sum of
/// entries dated on or before `as_of`.
#[must_use]
pub fn balance_as_of(
    opening: Money,
    normal: NormalBalance,
    entries: impl IntoIterator<Item = (NaiveDate, EntryType, Money)>,
    as_of: NaiveDate,
) -> Money {
    entries
        .into_iter()
        .filter(|(date, _, _)| *date <= as_of)
        .fold(opening, |acc, (_, entry_type, amount)| {
            acc + signed_amount(normal, entry_type, amount)
        })
}

/// Running balance for one step of a statement walk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RunningBalance {
    /// Balance before this entry.
    pub previous_balance: Money,
    /// Balance after this entry.
    pub current_balance: Money,
}

impl RunningBalance {
    /// Seeds a running balance walk at the opening position.
    #[must_use]
    pub const fn seed(opening: Money) -> Self {
        Self {
            previous_balance: opening,
            current_balance: opening,
        }
    }

    /// Advances the walk by one signed balance change.
    ///
    /// `current_balance[N] = current_balance[N-1] + change` and
    /// `previous_balance[N] = current_balance[N-1]`.
    #[must_use]
    pub fn apply(self, change: Money) -> Self {
        Self {
            previous_balance: self.current_balance,
            current_balance: self.current_balance + change,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn money_strategy() -> impl Strategy<Value = Money> {
        (-100_000i64..100_000i64).prop_map(Money::from_minor)
    }

    fn changes_strategy(max_len: usize) -> impl Strategy<Value = Vec<Money>> {
        prop::collection::vec(money_strategy(), 1..=max_len)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Walking a chain of changes ends at the opening plus their sum.
        #[test]
        fn prop_final_balance_equals_opening_plus_sum(
            opening in money_strategy(),
            changes in changes_strategy(20),
        ) {
            let mut walk = RunningBalance::seed(opening);
            for change in &changes {
                walk = walk.apply(*change);
            }

            let expected = opening + changes.into_iter().sum::<Money>();
            prop_assert_eq!(walk.current_balance, expected);
        }

        /// Each step's previous balance is the prior step's current balance.
        #[test]
        fn prop_previous_equals_prior_current(
            opening in money_strategy(),
            change1 in money_strategy(),
            change2 in money_strategy(),
        ) {
            let step1 = RunningBalance::seed(opening).apply(change1);
            let step2 = step1.apply(change2);
            prop_assert_eq!(step2.previous_balance, step1.current_balance);
        }

        /// Replaying the same changes yields the same balances.
        #[test]
        fn prop_walk_is_deterministic(
            opening in money_strategy(),
            changes in changes_strategy(10),
        ) {
            let walk = |changes: &[Money]| {
                let mut rb = RunningBalance::seed(opening);
                for change in changes {
                    rb = rb.apply(*change);
                }
                rb
            };

            prop_assert_eq!(walk(&changes).current_balance, walk(&changes).current_balance);
        }

        /// A zero change preserves the balance.
        #[test]
        fn prop_zero_change_preserves_balance(opening in money_strategy()) {
            let walk = RunningBalance::seed(opening).apply(Money::ZERO);
            prop_assert_eq!(walk.current_balance, opening);
        }

        /// Opposite entries on the same side cancel exactly.
        #[test]
        fn prop_signed_amounts_cancel(amount in 1i64..1_000_000) {
            let amount = Money::from_minor(amount);
            for normal in [NormalBalance::DebitNormal, NormalBalance::CreditNormal] {
                let debit = signed_amount(normal, EntryType::Debit, amount);
                let credit = signed_amount(normal, EntryType::Credit, amount);
                prop_assert_eq!(debit + credit, Money::ZERO);
            }
        }
    }

    #[test]
    fn test_debit_normal_balance_change() {
        let normal = NormalBalance::DebitNormal;
        assert_eq!(
            normal.balance_change(Money::from_minor(100), Money::ZERO),
            Money::from_minor(100)
        );
        assert_eq!(
            normal.balance_change(Money::ZERO, Money::from_minor(50)),
            Money::from_minor(-50)
        );
        assert_eq!(
            normal.balance_change(Money::from_minor(100), Money::from_minor(30)),
            Money::from_minor(70)
        );
    }

    #[test]
    fn test_credit_normal_balance_change() {
        let normal = NormalBalance::CreditNormal;
        assert_eq!(
            normal.balance_change(Money::ZERO, Money::from_minor(100)),
            Money::from_minor(100)
        );
        assert_eq!(
            normal.balance_change(Money::from_minor(50), Money::ZERO),
            Money::from_minor(-50)
        );
    }

    #[test]
    fn test_balance_as_of_applies_date_filter() {
        let jan = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let feb = NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
        let entries = vec![
            (jan, EntryType::Debit, Money::from_minor(5_000)),
            (feb, EntryType::Debit, Money::from_minor(7_000)),
        ];

        let opening = Money::from_minor(10_000);
        let as_of_jan = balance_as_of(
            opening,
            NormalBalance::DebitNormal,
            entries.iter().copied(),
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        );
        assert_eq!(as_of_jan, Money::from_minor(15_000));

        let as_of_feb = balance_as_of(
            opening,
            NormalBalance::DebitNormal,
            entries.iter().copied(),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap(),
        );
        assert_eq!(as_of_feb, Money::from_minor(22_000));
    }

    #[test]
    fn test_balance_as_of_credit_normal() {
        let jan = NaiveDate::from_ymd_opt(2026, 1, 10).unwrap();
        let entries = vec![
            (jan, EntryType::Credit, Money::from_minor(5_000)),
            (jan, EntryType::Debit, Money::from_minor(1_000)),
        ];

        let balance = balance_as_of(
            Money::ZERO,
            NormalBalance::CreditNormal,
            entries,
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        );
        assert_eq!(balance, Money::from_minor(4_000));
    }
}
