//! promfam core: metric families keyed by label sets.
//!
//! A [`Family`] groups metric instances that share a name and a kind but
//! differ by label values. It validates metric and label names, deduplicates
//! instances by their resolved label set, and produces owned
//! [`MetricFamily`] snapshots for whatever renders the exposition format.
//! Metric kinds plug in through the [`Metric`] trait; [`Counter`], [`Gauge`]
//! and [`Histogram`] ship here.
//!
//! ```
//! use promfam_core::{Counter, Family};
//!
//! let requests = Family::<Counter>::with_variable_labels(
//!     "http_requests_total",
//!     "Counts all requests",
//!     &["status"],
//!     &[("component", "api")],
//! )?;
//! requests.with_label_values(&["200"])?.inc();
//!
//! let snapshot = requests.collect();
//! assert_eq!(snapshot[0].samples.len(), 1);
//! # Ok::<(), promfam_core::FamilyError>(())
//! ```
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Every invalid name
//! or label surfaces as a [`FamilyError`] at the call that supplied it.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod family;
pub mod label;
pub mod metric;
pub mod snapshot;

pub use error::{ErrorCode, FamilyError, Result};
pub use family::{Family, MetricHandle};
pub use label::Label;
pub use metric::{
    Bucket, BucketBoundaries, Counter, Gauge, Histogram, Metric, MetricType, MetricValue,
};
pub use snapshot::{Collectable, MetricFamily, Sample};
