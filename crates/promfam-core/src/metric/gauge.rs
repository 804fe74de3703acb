use super::atomic::AtomicF64;
use super::{Metric, MetricType, MetricValue};

/// Value that can go up and down.
#[derive(Debug, Default)]
pub struct Gauge {
    value: AtomicF64,
}

impl Gauge {
    pub fn set(&self, v: f64) {
        self.value.store(v);
    }
    pub fn inc(&self) {
        self.add(1.0);
    }
    pub fn dec(&self) {
        self.add(-1.0);
    }
    pub fn add(&self, v: f64) {
        self.value.fetch_add(v);
    }
    pub fn sub(&self, v: f64) {
        self.value.fetch_add(-v);
    }
    pub fn value(&self) -> f64 {
        self.value.load()
    }
}

impl Metric for Gauge {
    const TYPE: MetricType = MetricType::Gauge;
    type Args = ();

    fn new(_: &()) -> Self {
        Self::default()
    }

    fn collect(&self) -> MetricValue {
        MetricValue::Gauge {
            value: self.value(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_and_down() {
        let g = Gauge::default();
        g.inc();
        g.inc();
        g.dec();
        g.add(4.0);
        g.sub(1.5);
        assert_eq!(g.value(), 3.5);
        g.set(-2.0);
        assert_eq!(g.collect(), MetricValue::Gauge { value: -2.0 });
    }
}
