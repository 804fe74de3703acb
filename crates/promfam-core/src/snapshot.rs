//! Immutable export snapshots.
//!
//! This is the only data handed to whatever renders an exposition format.
//! Everything here is an owned copy; nothing aliases live metric state.

use serde::Serialize;

use crate::label::Label;
use crate::metric::{MetricType, MetricValue};

/// One time series: its resolved labels and the value at collect time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub labels: Vec<Label>,
    pub value: MetricValue,
}

/// Snapshot of a whole family.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricFamily {
    pub name: String,
    pub help: String,
    #[serde(rename = "type")]
    pub metric_type: MetricType,
    /// Instance insertion order.
    pub samples: Vec<Sample>,
}

/// Anything that can contribute snapshots to an export cycle.
pub trait Collectable: Send + Sync {
    /// Zero or more families; empty when there is nothing to export.
    fn collect(&self) -> Vec<MetricFamily>;
}
