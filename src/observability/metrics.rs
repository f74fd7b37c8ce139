//! Checksum counters
//!
//! - Counters only, monotonic
//! - Relaxed atomics; the registry can be shared between threads

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters for a checksum engine
#[derive(Debug, Default)]
pub struct ChecksumMetrics {
    calculations: AtomicU64,
    bytes_hashed: AtomicU64,
    verifications: AtomicU64,
    mismatches: AtomicU64,
    updates: AtomicU64,
    out_of_range: AtomicU64,
}

impl ChecksumMetrics {
    /// Create a registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one `calculate` over `bytes` hashed bytes
    pub fn record_calculation(&self, bytes: u64) {
        self.calculations.fetch_add(1, Ordering::Relaxed);
        self.bytes_hashed.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Record a completed verification
    pub fn record_verification(&self, valid: bool) {
        self.verifications.fetch_add(1, Ordering::Relaxed);
        if !valid {
            self.mismatches.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn increment_updates(&self) {
        self.updates.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_out_of_range(&self) {
        self.out_of_range.fetch_add(1, Ordering::Relaxed);
    }

    /// Point-in-time copy of every counter
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            calculations: self.calculations.load(Ordering::Relaxed),
            bytes_hashed: self.bytes_hashed.load(Ordering::Relaxed),
            verifications: self.verifications.load(Ordering::Relaxed),
            mismatches: self.mismatches.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            out_of_range: self.out_of_range.load(Ordering::Relaxed),
        }
    }

    /// Current counters as a JSON object
    pub fn to_json(&self) -> String {
        self.snapshot().to_json()
    }
}

/// A point-in-time snapshot of all counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub calculations: u64,
    pub bytes_hashed: u64,
    pub verifications: u64,
    pub mismatches: u64,
    pub updates: u64,
    pub out_of_range: u64,
}

impl MetricsSnapshot {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_new_registry_is_zero() {
        assert_eq!(ChecksumMetrics::new().snapshot(), MetricsSnapshot::default());
    }

    #[test]
    fn test_verification_counts_mismatches() {
        let metrics = ChecksumMetrics::new();
        metrics.record_verification(true);
        metrics.record_verification(false);
        metrics.record_verification(false);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.verifications, 3);
        assert_eq!(snapshot.mismatches, 2);
    }

    #[test]
    fn test_calculation_accumulates_bytes() {
        let metrics = ChecksumMetrics::new();
        metrics.record_calculation(16);
        metrics.record_calculation(4);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.calculations, 2);
        assert_eq!(snapshot.bytes_hashed, 20);
    }

    #[test]
    fn test_to_json() {
        let metrics = ChecksumMetrics::new();
        metrics.increment_updates();
        metrics.increment_out_of_range();

        let parsed: serde_json::Value = serde_json::from_str(&metrics.to_json()).unwrap();
        assert_eq!(parsed["updates"], 1);
        assert_eq!(parsed["out_of_range"], 1);
        assert_eq!(parsed["verifications"], 0);
    }

    #[test]
    fn test_concurrent_increments() {
        let metrics = Arc::new(ChecksumMetrics::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let metrics = Arc::clone(&metrics);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        metrics.increment_updates();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(metrics.snapshot().updates, 4000);
    }
}
