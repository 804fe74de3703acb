//! Label-keyed collection of metric instances.
//!
//! A [`Family`] owns every instance it creates. Instances live in an
//! id-ordered arena (`BTreeMap<u64, Entry>`); ids grow monotonically so
//! iterating the arena yields insertion order. A second map resolves a
//! label key to its id. Both maps sit behind one mutex that is only held for
//! lookup/insert/remove/walk, never while a metric value is being mutated.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, trace};

use crate::error::{FamilyError, Result};
use crate::label::{
    check_declared_labels, check_label_name, check_metric_name, emission_order, Label, LabelKey,
};
use crate::metric::Metric;
use crate::snapshot::{Collectable, MetricFamily, Sample};

/// Handle to one instance inside a family.
///
/// Cloning is cheap. After [`Family::remove`] the handle stays usable memory
/// wise, but the instance it points to is detached and never collected again.
pub struct MetricHandle<T> {
    id: u64,
    metric: Arc<T>,
}

impl<T> MetricHandle<T> {
    /// Family-local identity of the instance.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// True when both handles point at the same instance.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.metric, &other.metric)
    }
}

impl<T> Clone for MetricHandle<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            metric: Arc::clone(&self.metric),
        }
    }
}

impl<T> Deref for MetricHandle<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.metric
    }
}

impl<T: fmt::Debug> fmt::Debug for MetricHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricHandle")
            .field("id", &self.id)
            .field("metric", &self.metric)
            .finish()
    }
}

struct Entry<T> {
    metric: Arc<T>,
    key: LabelKey,
    labels: Vec<Label>,
}

struct Instances<T> {
    by_key: HashMap<LabelKey, u64>,
    arena: BTreeMap<u64, Entry<T>>,
    next_id: u64,
}

impl<T> Default for Instances<T> {
    fn default() -> Self {
        Self {
            by_key: HashMap::new(),
            arena: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// A metric of kind `T` with a set of labeled dimensions.
///
/// Each distinct label assignment passed to [`Family::add`] (or
/// [`Family::with_label_values`]) is one time series at export time.
pub struct Family<T: Metric> {
    name: String,
    help: String,
    constant_labels: BTreeMap<String, String>,
    variable_labels: Vec<String>,
    default_args: T::Args,
    instances: Mutex<Instances<T>>,
}

impl<T: Metric> Family<T> {
    /// Family without declared variable labels.
    pub fn new(name: &str, help: &str, constant_labels: &[(&str, &str)]) -> Result<Self> {
        Self::with_variable_labels(name, help, &[], constant_labels)
    }

    /// Family whose instances are addressed positionally through
    /// [`Family::with_label_values`].
    pub fn with_variable_labels(
        name: &str,
        help: &str,
        variable_labels: &[&str],
        constant_labels: &[(&str, &str)],
    ) -> Result<Self> {
        check_metric_name(name)?;
        let mut constant = BTreeMap::new();
        for (k, v) in constant_labels {
            check_label_name(k)?;
            if constant.insert(k.to_string(), v.to_string()).is_some() {
                return Err(FamilyError::LabelNameCollision(k.to_string()));
            }
        }
        Self::from_parts(
            name.to_string(),
            help.to_string(),
            constant,
            variable_labels.iter().map(|s| s.to_string()).collect(),
        )
    }

    /// Owned-data constructor; every other constructor ends up here.
    pub fn from_parts(
        name: String,
        help: String,
        constant_labels: BTreeMap<String, String>,
        variable_labels: Vec<String>,
    ) -> Result<Self> {
        check_metric_name(&name)?;
        check_declared_labels(&constant_labels, &variable_labels)?;

        debug!(
            family = %name,
            constant = constant_labels.len(),
            variable = variable_labels.len(),
            "metric family created"
        );

        Ok(Self {
            name,
            help,
            constant_labels,
            variable_labels,
            default_args: T::Args::default(),
            instances: Mutex::new(Instances::default()),
        })
    }

    /// Construction arguments used by [`Family::add`] and
    /// [`Family::with_label_values`] (e.g. histogram bucket boundaries).
    pub fn with_args(mut self, args: T::Args) -> Self {
        self.default_args = args;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn constant_labels(&self) -> &BTreeMap<String, String> {
        &self.constant_labels
    }

    pub fn variable_labels(&self) -> &[String] {
        &self.variable_labels
    }

    pub fn default_args(&self) -> &T::Args {
        &self.default_args
    }

    /// Number of registered instances.
    pub fn len(&self) -> usize {
        self.lock().arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve-or-create the instance for `labels` using the family's
    /// default construction arguments.
    pub fn add(&self, labels: &[(&str, &str)]) -> Result<MetricHandle<T>> {
        self.add_with(labels, &self.default_args)
    }

    /// Like [`Family::add`], but a newly created instance is built from
    /// `args`. An existing instance is returned unchanged.
    pub fn add_with(&self, labels: &[(&str, &str)], args: &T::Args) -> Result<MetricHandle<T>> {
        let key = self.resolve_key(labels)?;
        Ok(self.get_or_insert(key, args))
    }

    /// Resolve-or-create by positional values, zipped with the declared
    /// variable label names.
    pub fn with_label_values(&self, values: &[&str]) -> Result<MetricHandle<T>> {
        if values.len() != self.variable_labels.len() {
            return Err(FamilyError::LabelCountMismatch {
                expected: self.variable_labels.len(),
                actual: values.len(),
            });
        }
        let labels: Vec<(&str, &str)> = self
            .variable_labels
            .iter()
            .map(String::as_str)
            .zip(values.iter().copied())
            .collect();
        self.add(&labels)
    }

    /// Remove the instance behind `handle`. Handles that are unknown to this
    /// family (already removed, or issued by another family) are ignored.
    ///
    /// Returns whether an instance was removed.
    pub fn remove(&self, handle: &MetricHandle<T>) -> bool {
        let mut inner = self.lock();
        let owned = inner
            .arena
            .get(&handle.id)
            .is_some_and(|e| Arc::ptr_eq(&e.metric, &handle.metric));
        if !owned {
            return false;
        }
        if let Some(entry) = inner.arena.remove(&handle.id) {
            inner.by_key.remove(&entry.key);
            debug!(family = %self.name, id = handle.id, "metric instance removed");
        }
        true
    }

    /// Snapshot of every registered instance; empty when there are none.
    pub fn collect(&self) -> Vec<MetricFamily> {
        let inner = self.lock();
        if inner.arena.is_empty() {
            return Vec::new();
        }
        let samples = inner
            .arena
            .values()
            .map(|e| Sample {
                labels: e.labels.clone(),
                value: e.metric.collect(),
            })
            .collect();
        vec![MetricFamily {
            name: self.name.clone(),
            help: self.help.clone(),
            metric_type: T::TYPE,
            samples,
        }]
    }

    /// Validate dynamic labels and build the dedup key. Runs before the lock
    /// is taken so a failed call never touches the collection.
    fn resolve_key(&self, labels: &[(&str, &str)]) -> Result<LabelKey> {
        let mut key = LabelKey::new();
        for (name, value) in labels {
            if self.constant_labels.contains_key(*name) {
                return Err(FamilyError::LabelNameCollision(name.to_string()));
            }
            check_label_name(name)?;
            if key.insert(name.to_string(), value.to_string()).is_some() {
                return Err(FamilyError::LabelNameCollision(name.to_string()));
            }
        }
        Ok(key)
    }

    fn get_or_insert(&self, key: LabelKey, args: &T::Args) -> MetricHandle<T> {
        let mut inner = self.lock();

        if let Some(id) = inner.by_key.get(&key).copied() {
            if let Some(entry) = inner.arena.get(&id) {
                trace!(family = %self.name, id, "metric instance reused");
                return MetricHandle {
                    id,
                    metric: Arc::clone(&entry.metric),
                };
            }
        }

        let id = inner.next_id;
        inner.next_id += 1;

        let metric = Arc::new(T::new(args));
        let labels = emission_order(&self.constant_labels, &self.variable_labels, &key);
        inner.by_key.insert(key.clone(), id);
        inner.arena.insert(
            id,
            Entry {
                metric: Arc::clone(&metric),
                key,
                labels,
            },
        );
        debug!(family = %self.name, id, "metric instance created");

        MetricHandle { id, metric }
    }

    // Nothing panics while the guard is held, so a poisoned lock still
    // guards a consistent collection.
    fn lock(&self) -> MutexGuard<'_, Instances<T>> {
        self.instances.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Metric> Collectable for Family<T> {
    fn collect(&self) -> Vec<MetricFamily> {
        Family::collect(self)
    }
}

impl<T: Metric> fmt::Debug for Family<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Family")
            .field("name", &self.name)
            .field("type", &T::TYPE)
            .field("constant_labels", &self.constant_labels)
            .field("variable_labels", &self.variable_labels)
            .field("instances", &self.len())
            .finish()
    }
}
