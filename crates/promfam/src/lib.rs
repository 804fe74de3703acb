//! Top-level facade crate for promfam.
//!
//! Re-exports the core family types and the YAML config loader so users can
//! depend on a single crate.

pub mod core {
    pub use promfam_core::*;
}

pub mod config {
    pub use promfam_config::*;
}

pub use promfam_core::{Collectable, Counter, Family, FamilyError, Gauge, Histogram, MetricFamily};
