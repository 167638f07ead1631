use std::ops::Range;

/// Splits `len` items into `workers` contiguous ranges.
///
/// Every shard but the last holds `len / workers` items; the last one takes
/// the remainder. Shards may be empty. `workers <= 1` yields a single range.
///
/// ```
/// use wallet::worker::shard::shards;
///
/// assert_eq!(shards(11, 2), vec![0..5, 5..11]);
/// assert_eq!(shards(2, 3), vec![0..0, 0..0, 0..2]);
/// ```
pub fn shards(len: usize, workers: usize) -> Vec<Range<usize>> {
    if workers <= 1 {
        return vec![0..len];
    }

    let size = len / workers;
    (0..workers)
        .map(|i| {
            let start = i * size;
            let end = if i == workers - 1 { len } else { start + size };
            start..end
        })
        .collect()
}
