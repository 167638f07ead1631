use std::sync::{Mutex, PoisonError};
use std::thread;

use crate::{common::money::Money, domain::payment::Payment, worker::shard::shards};

/// Sums every payment amount regardless of status.
///
/// With two or more workers each shard is summed on its own thread and the
/// partials are merged under a mutex. Partials are `i128`, so the total is
/// exact until the final narrowing, which clamps at `i64::MAX`. The result
/// equals the sequential sum.
pub fn sum_payments(payments: &[Payment], workers: usize) -> Money {
    if workers <= 1 {
        return Money::saturating_from_wide(sum_shard(payments));
    }

    let total = Mutex::new(0i128);
    thread::scope(|s| {
        for range in shards(payments.len(), workers) {
            let shard = &payments[range];
            let total = &total;
            s.spawn(move || {
                let partial = sum_shard(shard);
                *total.lock().unwrap_or_else(PoisonError::into_inner) += partial;
            });
        }
    });

    let total = Money::saturating_from_wide(
        total.into_inner().unwrap_or_else(PoisonError::into_inner),
    );
    tracing::debug!(payments = payments.len(), workers, %total, "payments summed");
    total
}

fn sum_shard(shard: &[Payment]) -> i128 {
    shard.iter().map(|p| p.amount.as_wide()).sum()
}
