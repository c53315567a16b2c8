use analytics::{AnalysisDataset, AnalysisParams};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// The full input configuration of one load-and-transform pass. Two
/// requests with the same key are guaranteed the same (memoized) dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetKey {
    pub transactions_path: PathBuf,
    pub reference_path: PathBuf,
    pub params: AnalysisParams,
}

/// An explicit memoization cache for the load-and-transform step.
///
/// The pipeline is deterministic per key (the seed is part of the key), so
/// recomputing it within a session is pure waste. Entries live until
/// `clear` is called or the process exits; there is no eviction policy.
#[derive(Debug, Default)]
pub struct DatasetCache {
    inner: Mutex<HashMap<DatasetKey, Arc<AnalysisDataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached dataset for `key`, computing and storing it on a
    /// miss. A failed computation is not cached.
    pub fn get_or_compute<F, E>(&self, key: &DatasetKey, compute: F) -> Result<Arc<AnalysisDataset>, E>
    where
        F: FnOnce() -> Result<AnalysisDataset, E>,
    {
        if let Some(hit) = self.inner.lock().expect("cache lock poisoned").get(key) {
            tracing::debug!("Dataset cache hit");
            return Ok(Arc::clone(hit));
        }

        // Computed outside the lock; a concurrent duplicate compute is
        // idempotent and last-write-wins.
        let dataset = Arc::new(compute()?);
        self.inner
            .lock()
            .expect("cache lock poisoned")
            .insert(key.clone(), Arc::clone(&dataset));
        tracing::info!("Dataset cache filled");
        Ok(dataset)
    }

    /// The explicit invalidation hook. Returns how many entries were dropped.
    pub fn clear(&self) -> usize {
        let mut inner = self.inner.lock().expect("cache lock poisoned");
        let dropped = inner.len();
        inner.clear();
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::{ExportMatrix, TradeSummary};
    use rust_decimal::Decimal;

    fn key(seed: Option<u64>) -> DatasetKey {
        DatasetKey {
            transactions_path: PathBuf::from("a.csv"),
            reference_path: PathBuf::from("b.csv"),
            params: AnalysisParams {
                product: 852352,
                year_min: 2020,
                year_max: 2023,
                seed,
                top_n: 10,
            },
        }
    }

    fn empty_dataset() -> AnalysisDataset {
        AnalysisDataset {
            records: vec![],
            summary: TradeSummary {
                record_count: 0,
                total_value: Decimal::ZERO,
                total_quantity: Decimal::ZERO,
                average_unit_price: None,
            },
            yearly: vec![],
            importers: vec![],
            matrix: ExportMatrix::default(),
        }
    }

    #[test]
    fn computes_once_per_key() {
        let cache = DatasetCache::new();
        let mut calls = 0;
        for _ in 0..3 {
            let result: Result<_, ()> = cache.get_or_compute(&key(Some(1)), || {
                calls += 1;
                Ok(empty_dataset())
            });
            result.unwrap();
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn distinct_keys_compute_separately() {
        let cache = DatasetCache::new();
        let mut calls = 0;
        let mut run = |k: &DatasetKey| {
            let result: Result<_, ()> = cache.get_or_compute(k, || {
                calls += 1;
                Ok(empty_dataset())
            });
            result.unwrap();
        };
        run(&key(Some(1)));
        run(&key(Some(2)));
        assert_eq!(calls, 2);
    }

    #[test]
    fn clear_forces_recompute() {
        let cache = DatasetCache::new();
        let mut calls = 0;
        let mut run = || {
            let result: Result<_, ()> = cache.get_or_compute(&key(None), || {
                calls += 1;
                Ok(empty_dataset())
            });
            result.unwrap();
        };
        run();
        assert_eq!(cache.clear(), 1);
        run();
        assert_eq!(calls, 2);
    }

    #[test]
    fn failed_compute_is_not_cached() {
        let cache = DatasetCache::new();
        let failed: Result<_, &str> = cache.get_or_compute(&key(None), || Err("boom"));
        assert!(failed.is_err());

        let mut calls = 0;
        let ok: Result<_, &str> = cache.get_or_compute(&key(None), || {
            calls += 1;
            Ok(empty_dataset())
        });
        ok.unwrap();
        assert_eq!(calls, 1);
    }
}
