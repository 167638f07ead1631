use std::sync::mpsc::{self, Receiver};
use std::thread;

use crate::common::money::Money;

/// One finished chunk of a streaming sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Chunks accounted for by this record (always 1).
    pub part: usize,
    /// Sum of the chunk's amounts.
    pub result: Money,
}

/// Sums `amounts` in chunks of `chunk_size`, one thread per chunk.
///
/// At most `workers` chunk threads run at once; chunks are started in
/// batches of that size. Each finished chunk is sent as a [`Progress`] record in completion order.
/// The channel closes once every chunk has reported, so the caller can
/// iterate the receiver to the end and add up `result`.
///
/// ```
/// use wallet::common::money::Money;
/// use wallet::worker::progress::sum_with_progress;
///
/// let amounts = vec![Money::new(5); 10];
/// let total: Money = sum_with_progress(amounts, 3, 2).iter().map(|p| p.result).sum();
/// assert_eq!(total, Money::new(50));
/// ```
pub fn sum_with_progress(
    amounts: Vec<Money>,
    chunk_size: usize,
    workers: usize,
) -> Receiver<Progress> {
    let chunk_size = chunk_size.max(1);
    let workers = workers.max(1);
    let chunks = amounts.len().div_ceil(chunk_size);
    let (tx, rx) = mpsc::sync_channel(chunks.max(1));

    thread::spawn(move || {
        let parts: Vec<&[Money]> = amounts.chunks(chunk_size).collect();
        for batch in parts.chunks(workers) {
            thread::scope(|s| {
                for &chunk in batch {
                    let tx = tx.clone();
                    s.spawn(move || {
                        let result: Money = chunk.iter().sum();
                        // a dropped receiver just means nobody is listening
                        let _ = tx.send(Progress { part: 1, result });
                    });
                }
            });
        }
        tracing::debug!(
            payments = amounts.len(),
            chunks,
            chunk_size,
            workers,
            "progress sum finished"
        );
    });

    rx
}
