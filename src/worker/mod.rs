//! Parallel reductions and filters over the payment log.
//!
//! The log is read-only while a scan runs. Workers accumulate into private
//! partials; merging them is the only shared write and happens under a lock.

pub mod filter;
pub mod progress;
pub mod shard;
pub mod sum;
