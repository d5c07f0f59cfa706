//! Property-based tests for ledger-store invariants
//!
//! - Conservation: a debit+credit pair never changes the sum of balances
//! - Overdraft guard: no sequence of adjustments observes a negative balance
//! - Lock order: lock_pair is symmetric in its arguments

use ledger_store::{AccountType, LedgerStore, MemoryLedger, UserId};
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Strategy for positive amounts in minor units (two decimal places)
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_00).prop_map(|minor| Decimal::new(minor, 2))
}

/// Strategy for signed deltas in minor units
fn delta_strategy() -> impl Strategy<Value = Decimal> {
    (-500_00i64..500_00).prop_map(|minor| Decimal::new(minor, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: paired debit/credit adjustments conserve the balance sum
    #[test]
    fn prop_transfer_pairs_conserve_sum(
        amounts in prop::collection::vec(amount_strategy(), 1..20),
        opening in 1_000_000_00i64..2_000_000_00,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let ledger = MemoryLedger::new();
            let opening = Decimal::new(opening, 2);
            let a = ledger.open_account(UserId::new(1), AccountType::Savings, opening).unwrap();
            let b = ledger.open_account(UserId::new(2), AccountType::Current, opening).unwrap();

            let total = opening + opening;

            for amount in amounts {
                if ledger.adjust_balance(a.id, -amount).await.is_ok() {
                    ledger.adjust_balance(b.id, amount).await.unwrap();
                }

                let bal_a = ledger.get_account(a.id).await.unwrap().balance;
                let bal_b = ledger.get_account(b.id).await.unwrap().balance;
                prop_assert_eq!(bal_a + bal_b, total);
            }
            Ok(())
        })?;
    }

    /// Property: no sequence of deltas ever leaves a balance negative
    #[test]
    fn prop_balance_never_negative(
        deltas in prop::collection::vec(delta_strategy(), 1..50),
        opening in 0i64..1_000_00,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let ledger = MemoryLedger::new();
            let account = ledger
                .open_account(UserId::new(1), AccountType::Savings, Decimal::new(opening, 2))
                .unwrap();

            for delta in deltas {
                // Rejected mutations must leave the balance untouched.
                let before = ledger.get_account(account.id).await.unwrap().balance;
                match ledger.adjust_balance(account.id, delta).await {
                    Ok(after) => prop_assert_eq!(after, before + delta),
                    Err(_) => {
                        let after = ledger.get_account(account.id).await.unwrap().balance;
                        prop_assert_eq!(after, before);
                    }
                }

                let balance = ledger.get_account(account.id).await.unwrap().balance;
                prop_assert!(balance >= Decimal::ZERO);
            }
            Ok(())
        })?;
    }

    /// Property: lock_pair acquires regardless of argument order
    #[test]
    fn prop_lock_pair_symmetric(x in 1u64..100, y in 1u64..100) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let ledger = MemoryLedger::new();
            let a = ledger_store::AccountId::new(x);
            let b = ledger_store::AccountId::new(y);

            drop(ledger.lock_accounts(a, b).await);
            drop(ledger.lock_accounts(b, a).await);
            Ok::<(), TestCaseError>(())
        })?;
    }
}
