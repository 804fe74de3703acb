//! Bucketed distribution of observations.
//!
//! Per-bucket counts are stored non-cumulatively and summed up at collect
//! time; the last bucket is the implicit `+Inf` bucket.

use std::sync::atomic::{AtomicU64, Ordering};

use super::atomic::AtomicF64;
use super::{Bucket, Metric, MetricType, MetricValue};
use crate::error::{FamilyError, Result};

/// Conventional default upper bounds (seconds).
const DEFAULT_BUCKETS: [f64; 11] = [
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

/// Validated, strictly increasing, finite upper bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketBoundaries(Vec<f64>);

impl Default for BucketBoundaries {
    fn default() -> Self {
        Self(DEFAULT_BUCKETS.to_vec())
    }
}

impl BucketBoundaries {
    pub fn new(bounds: Vec<f64>) -> Result<Self> {
        if let Some(b) = bounds.iter().find(|b| !b.is_finite()) {
            return Err(FamilyError::InvalidBuckets(format!(
                "bound {b} is not finite"
            )));
        }
        if bounds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(FamilyError::InvalidBuckets(
                "bounds must be strictly increasing".into(),
            ));
        }
        Ok(Self(bounds))
    }

    /// `count` bounds starting at `start`, each `factor` times the previous.
    pub fn exponential(start: f64, factor: f64, count: usize) -> Result<Self> {
        if count < 1 || start.is_nan() || start <= 0.0 || factor.is_nan() || factor <= 1.0 {
            return Err(FamilyError::InvalidBuckets(format!(
                "exponential buckets need count >= 1, start > 0, factor > 1 \
                 (got start={start}, factor={factor}, count={count})"
            )));
        }
        let mut bounds = Vec::with_capacity(count);
        let mut next = start;
        for _ in 0..count {
            bounds.push(next);
            next *= factor;
        }
        Self::new(bounds)
    }

    /// `count` bounds starting at `start`, `width` apart.
    pub fn linear(start: f64, width: f64, count: usize) -> Result<Self> {
        if count < 1 || width.is_nan() || width <= 0.0 {
            return Err(FamilyError::InvalidBuckets(format!(
                "linear buckets need count >= 1, width > 0 \
                 (got width={width}, count={count})"
            )));
        }
        Self::new((0..count).map(|i| start + width * i as f64).collect())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

#[derive(Debug)]
pub struct Histogram {
    bounds: BucketBoundaries,
    counts: Vec<AtomicU64>,
    sum: AtomicF64,
}

impl Histogram {
    pub fn with_boundaries(bounds: BucketBoundaries) -> Self {
        let counts = (0..=bounds.0.len()).map(|_| AtomicU64::new(0)).collect();
        Self {
            bounds,
            counts,
            sum: AtomicF64::default(),
        }
    }

    /// Count `value` in the first bucket whose upper bound is `>= value`.
    pub fn observe(&self, value: f64) {
        let idx = self
            .bounds
            .0
            .iter()
            .position(|b| *b >= value)
            .unwrap_or(self.bounds.0.len());
        self.sum.fetch_add(value);
        self.counts[idx].fetch_add(1, Ordering::Relaxed);
    }

    /// Bulk observation: one (non-cumulative) increment per bucket including
    /// `+Inf`, plus the sum of all observed values.
    pub fn observe_multiple(&self, bucket_increments: &[u64], sum_of_values: f64) -> Result<()> {
        if bucket_increments.len() != self.counts.len() {
            return Err(FamilyError::BucketCountMismatch {
                expected: self.counts.len(),
                actual: bucket_increments.len(),
            });
        }
        self.sum.fetch_add(sum_of_values);
        for (count, inc) in self.counts.iter().zip(bucket_increments) {
            count.fetch_add(*inc, Ordering::Relaxed);
        }
        Ok(())
    }

    pub fn boundaries(&self) -> &BucketBoundaries {
        &self.bounds
    }
}

impl Metric for Histogram {
    const TYPE: MetricType = MetricType::Histogram;
    type Args = BucketBoundaries;

    fn new(args: &BucketBoundaries) -> Self {
        Self::with_boundaries(args.clone())
    }

    fn collect(&self) -> MetricValue {
        let mut cumulative = 0u64;
        let buckets = self
            .counts
            .iter()
            .enumerate()
            .map(|(i, count)| {
                cumulative += count.load(Ordering::Relaxed);
                Bucket {
                    cumulative_count: cumulative,
                    upper_bound: self.bounds.0.get(i).copied().unwrap_or(f64::INFINITY),
                }
            })
            .collect();
        MetricValue::Histogram {
            buckets,
            sample_count: cumulative,
            sample_sum: self.sum.load(),
        }
    }
}
