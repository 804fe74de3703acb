//! Metric kinds managed by a [`Family`](crate::family::Family).
//!
//! A family only relies on three facts about its metric kind: it can be built
//! from kind-specific arguments, it can report a value snapshot, and it is
//! safe to share across threads. Value mutation is the metric's own business
//! and is done with atomics, never under the family lock.

mod atomic;
pub mod counter;
pub mod gauge;
pub mod histogram;

use serde::Serialize;

pub use counter::Counter;
pub use gauge::Gauge;
pub use histogram::{BucketBoundaries, Histogram};

/// Exposition type of a metric kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Counter,
    Gauge,
    Histogram,
}

impl MetricType {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::Counter => "counter",
            MetricType::Gauge => "gauge",
            MetricType::Histogram => "histogram",
        }
    }
}

/// One histogram bucket as reported by collect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub cumulative_count: u64,
    /// `f64::INFINITY` for the implicit last bucket.
    pub upper_bound: f64,
}

/// Point-in-time value of a single metric instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricValue {
    Counter {
        value: f64,
    },
    Gauge {
        value: f64,
    },
    Histogram {
        buckets: Vec<Bucket>,
        sample_count: u64,
        sample_sum: f64,
    },
}

/// Capability every metric kind exposes to its family.
pub trait Metric: Send + Sync + 'static {
    const TYPE: MetricType;

    /// Construction arguments forwarded opaquely by the family.
    type Args: Clone + Default + Send + Sync;

    fn new(args: &Self::Args) -> Self;

    fn collect(&self) -> MetricValue;
}
