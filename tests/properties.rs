use std::collections::HashMap;

use proptest::prelude::*;
use wallet::common::id::SequentialIds;
use wallet::domain::payment::{Payment, PaymentStatus};
use wallet::{Money, Service};

#[derive(Debug, Clone)]
enum Op {
    Register,
    Deposit { account: usize, amount: i64 },
    Pay { account: usize, amount: i64 },
    Reject { payment: usize },
    Repeat { payment: usize },
    Favorite { payment: usize },
    PayFavorite { favorite: usize },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Register),
        (0..6usize, -50i64..5_000).prop_map(|(account, amount)| Op::Deposit { account, amount }),
        (0..6usize, -50i64..3_000).prop_map(|(account, amount)| Op::Pay { account, amount }),
        (0..40usize).prop_map(|payment| Op::Reject { payment }),
        (0..40usize).prop_map(|payment| Op::Repeat { payment }),
        (0..40usize).prop_map(|payment| Op::Favorite { payment }),
        (0..10usize).prop_map(|favorite| Op::PayFavorite { favorite }),
    ]
}

/// Applies ops, ignoring refused ones, and returns successful deposits per account.
fn apply(svc: &mut Service, ops: &[Op]) -> HashMap<i64, i64> {
    let mut deposits: HashMap<i64, i64> = HashMap::new();
    let mut phones = 0;
    for op in ops {
        let ledger = svc.ledger();
        let account_id = |i: usize| ledger.accounts().get(i).map(|a| a.id).unwrap_or(i as i64 + 1);
        let payment_id = |i: usize| ledger.payments().get(i).map(|p| p.id.clone()).unwrap_or_default();
        let favorite_id =
            |i: usize| ledger.favorites().get(i).map(|f| f.id.clone()).unwrap_or_default();

        match op.clone() {
            Op::Register => {
                phones += 1;
                let _ = svc.register_account(&format!("+992{phones:09}"));
            }
            Op::Deposit { account, amount } => {
                let id = account_id(account);
                if svc.deposit(id, Money::new(amount)).is_ok() {
                    *deposits.entry(id).or_default() += amount;
                }
            }
            Op::Pay { account, amount } => {
                let id = account_id(account);
                let _ = svc.pay(id, Money::new(amount), "auto");
            }
            Op::Reject { payment } => {
                let id = payment_id(payment);
                let _ = svc.reject(&id);
            }
            Op::Repeat { payment } => {
                let id = payment_id(payment);
                let _ = svc.repeat(&id);
            }
            Op::Favorite { payment } => {
                let id = payment_id(payment);
                let _ = svc.favorite_payment(&id, "fav");
            }
            Op::PayFavorite { favorite } => {
                let id = favorite_id(favorite);
                let _ = svc.pay_from_favorite(&id);
            }
        }
    }
    deposits
}

fn sorted_ids(payments: &[Payment]) -> Vec<String> {
    let mut ids: Vec<String> = payments.iter().map(|p| p.id.clone()).collect();
    ids.sort();
    ids
}

proptest! {
    #[test]
    fn balances_match_deposits_minus_live_payments(ops in prop::collection::vec(op(), 1..120)) {
        let mut svc = Service::new().with_id_generator(SequentialIds::new("id"));
        let deposits = apply(&mut svc, &ops);
        let ledger = svc.ledger();

        for acc in ledger.accounts() {
            let spent: i64 = ledger
                .payments()
                .iter()
                .filter(|p| p.account_id == acc.id && p.status != PaymentStatus::Fail)
                .map(|p| p.amount.as_i64())
                .sum();
            let deposited = deposits.get(&acc.id).copied().unwrap_or(0);
            prop_assert_eq!(acc.balance.as_i64(), deposited - spent);
            prop_assert!(acc.balance >= Money::zero());
        }

        for p in ledger.payments() {
            prop_assert!(ledger.account(p.account_id).is_some());
            prop_assert!(p.amount > Money::zero());
        }
        for f in ledger.favorites() {
            prop_assert!(ledger.account(f.account_id).is_some());
        }

        let ids: Vec<i64> = ledger.accounts().iter().map(|a| a.id).collect();
        prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(ledger.last_account_id() >= ids.last().copied().unwrap_or(0));
    }

    #[test]
    fn parallel_scans_agree_with_sequential(
        amounts in prop::collection::vec((1i64..1_000, 0usize..3), 0..200),
        workers in 1usize..12,
    ) {
        let mut svc = Service::new().with_id_generator(SequentialIds::new("p"));
        for i in 1..=3 {
            let acc = svc.register_account(&format!("+99200000000{i}")).unwrap();
            svc.deposit(acc.id, Money::new(1_000_000)).unwrap();
        }
        for (amount, account) in &amounts {
            svc.pay(*account as i64 + 1, Money::new(*amount), "auto").unwrap();
        }

        prop_assert_eq!(svc.sum_payments(workers), svc.sum_payments(1));

        let all = svc.filter_payments_by_fn(|_| true, workers);
        prop_assert_eq!(sorted_ids(&all), sorted_ids(svc.ledger().payments()));

        let mine = svc.filter_payments(2, workers).unwrap();
        let expected = svc.filter_payments(2, 1).unwrap();
        prop_assert_eq!(sorted_ids(&mine), sorted_ids(&expected));
    }
}
