//! Label grammar checks and label-set resolution.
//!
//! Two concerns are kept apart here:
//! - identity: a [`LabelKey`] is a sorted map of the dynamic labels, so two
//!   assignments with the same pairs resolve to the same key regardless of the
//!   order they were supplied in;
//! - presentation: [`emission_order`] lays out the full label list as constant
//!   labels (sorted by name) followed by the variable labels in declaration
//!   order.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{FamilyError, Result};

/// Dedup key for one metric instance within a family (dynamic labels only;
/// the constant labels are identical for every instance).
pub type LabelKey = BTreeMap<String, String>;

/// One resolved label pair as handed to exporters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Label {
    pub name: String,
    pub value: String,
}

impl Label {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
pub fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`, excluding the reserved `__` prefix.
pub fn is_valid_label_name(name: &str) -> bool {
    if name.starts_with("__") {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn check_metric_name(name: &str) -> Result<()> {
    if is_valid_metric_name(name) {
        Ok(())
    } else {
        Err(FamilyError::InvalidName(name.to_string()))
    }
}

pub fn check_label_name(name: &str) -> Result<()> {
    if is_valid_label_name(name) {
        Ok(())
    } else {
        Err(FamilyError::InvalidLabelName(name.to_string()))
    }
}

/// Declarations of one family: every name valid, no variable label declared
/// twice or shadowing a constant label.
pub fn check_declared_labels(
    constant: &BTreeMap<String, String>,
    variable: &[String],
) -> Result<()> {
    for k in constant.keys() {
        check_label_name(k)?;
    }
    for (i, k) in variable.iter().enumerate() {
        check_label_name(k)?;
        if constant.contains_key(k) || variable[..i].contains(k) {
            return Err(FamilyError::LabelNameCollision(k.clone()));
        }
    }
    Ok(())
}

/// Build the full label list for one instance.
///
/// Declared variable labels come first in declaration order; dynamic labels
/// that were never declared follow, sorted by name.
pub fn emission_order(
    constant: &BTreeMap<String, String>,
    declared: &[String],
    dynamic: &LabelKey,
) -> Vec<Label> {
    let mut out = Vec::with_capacity(constant.len() + dynamic.len());
    out.extend(constant.iter().map(|(k, v)| Label::new(k.as_str(), v.as_str())));

    for name in declared {
        if let Some(v) = dynamic.get(name) {
            out.push(Label::new(name.as_str(), v.as_str()));
        }
    }
    out.extend(
        dynamic
            .iter()
            .filter(|(k, _)| !declared.contains(k))
            .map(|(k, v)| Label::new(k.as_str(), v.as_str())),
    );
    out
}
