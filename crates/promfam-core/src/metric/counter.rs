use super::atomic::AtomicF64;
use super::{Metric, MetricType, MetricValue};

/// Monotonically increasing value.
#[derive(Debug, Default)]
pub struct Counter {
    value: AtomicF64,
}

impl Counter {
    /// Increment by 1.
    pub fn inc(&self) {
        self.value.fetch_add(1.0);
    }

    /// Increment by `v`. Negative and non-finite deltas are ignored.
    pub fn inc_by(&self, v: f64) {
        if !v.is_finite() || v < 0.0 {
            return;
        }
        self.value.fetch_add(v);
    }

    pub fn value(&self) -> f64 {
        self.value.load()
    }
}

impl Metric for Counter {
    const TYPE: MetricType = MetricType::Counter;
    type Args = ();

    fn new(_: &()) -> Self {
        Self::default()
    }

    fn collect(&self) -> MetricValue {
        MetricValue::Counter {
            value: self.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignores_negative_and_non_finite_increments() {
        let c = Counter::default();
        c.inc();
        c.inc_by(2.5);
        c.inc_by(-10.0);
        c.inc_by(f64::NAN);
        c.inc_by(f64::INFINITY);
        assert_eq!(c.value(), 3.5);
        assert_eq!(c.collect(), MetricValue::Counter { value: 3.5 });
    }
}
