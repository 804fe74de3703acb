//! Family declarations loaded from YAML (strict parsing).
//!
//! Unknown fields are rejected at every level, and declarations are validated
//! before they are handed out, so a typo in a config file fails at startup
//! instead of silently producing an unlabeled family.

pub mod schema;

use std::fs;

use promfam_core::error::{FamilyError, Result};

pub use schema::{FamiliesConfig, FamilyConfig, MetricKind};

pub fn load_from_file(path: &str) -> Result<FamiliesConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| FamilyError::Io(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<FamiliesConfig> {
    let cfg: FamiliesConfig = serde_yaml::from_str(s)
        .map_err(|e| FamilyError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    tracing::debug!(families = cfg.families.len(), "family config loaded");
    Ok(cfg)
}
