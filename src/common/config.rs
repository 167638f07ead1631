/// Tuning knobs for the aggregation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalletConfig {
    /// Worker count used by the binary and by callers that don't pick one.
    pub workers: usize,
    /// Payments per chunk in the progress stream.
    pub progress_chunk_size: usize,
}

pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_PROGRESS_CHUNK_SIZE: usize = 100_000;

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            progress_chunk_size: DEFAULT_PROGRESS_CHUNK_SIZE,
        }
    }
}

impl WalletConfig {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Zero is clamped to one payment per chunk.
    pub fn with_progress_chunk_size(mut self, size: usize) -> Self {
        self.progress_chunk_size = size.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let cfg = WalletConfig::default()
            .with_workers(8)
            .with_progress_chunk_size(0);
        assert_eq!(cfg.workers, 8);
        assert_eq!(cfg.progress_chunk_size, 1);
        assert_eq!(WalletConfig::default().progress_chunk_size, 100_000);
    }
}
