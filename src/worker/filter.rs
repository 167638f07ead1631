use std::sync::{Mutex, PoisonError};
use std::thread;

use crate::{domain::payment::Payment, worker::shard::shards};

/// Copies out every payment matching `predicate`.
///
/// Each worker fills a private buffer; buffers are appended to the result
/// under a mutex in completion order. Order is kept within a shard only.
pub fn filter_payments_by_fn<F>(payments: &[Payment], predicate: F, workers: usize) -> Vec<Payment>
where
    F: Fn(&Payment) -> bool + Sync,
{
    if workers <= 1 {
        return filter_shard(payments, &predicate);
    }

    let found = Mutex::new(Vec::new());
    thread::scope(|s| {
        for range in shards(payments.len(), workers) {
            let shard = &payments[range];
            let (found, predicate) = (&found, &predicate);
            s.spawn(move || {
                let buf = filter_shard(shard, predicate);
                if !buf.is_empty() {
                    found
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .extend(buf);
                }
            });
        }
    });

    let found = found.into_inner().unwrap_or_else(PoisonError::into_inner);
    tracing::debug!(payments = payments.len(), workers, matched = found.len(), "payments filtered");
    found
}

/// Payments of one account; see [`filter_payments_by_fn`] for ordering.
pub fn filter_by_account(payments: &[Payment], account_id: i64, workers: usize) -> Vec<Payment> {
    filter_payments_by_fn(payments, |p| p.account_id == account_id, workers)
}

fn filter_shard<F>(shard: &[Payment], predicate: &F) -> Vec<Payment>
where
    F: Fn(&Payment) -> bool,
{
    shard.iter().filter(|&p| predicate(p)).cloned().collect()
}
