use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use promfam_core::error::{FamilyError, Result};
use promfam_core::label::{check_declared_labels, check_metric_name};
use promfam_core::{BucketBoundaries, Counter, Family, Gauge, Histogram, Metric, MetricType};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamiliesConfig {
    pub version: u32,

    #[serde(default)]
    pub families: Vec<FamilyConfig>,
}

impl FamiliesConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(FamilyError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        let mut seen = HashSet::new();
        for f in &self.families {
            f.validate()?;
            if !seen.insert(f.name.as_str()) {
                return Err(FamilyError::Config(format!(
                    "family {} declared twice",
                    f.name
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&FamilyConfig> {
        self.families.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    Counter,
    Gauge,
    Histogram,
}

impl MetricKind {
    pub fn metric_type(self) -> MetricType {
        match self {
            MetricKind::Counter => MetricType::Counter,
            MetricKind::Gauge => MetricType::Gauge,
            MetricKind::Histogram => MetricType::Histogram,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FamilyConfig {
    pub name: String,

    #[serde(default)]
    pub help: String,

    pub kind: MetricKind,

    #[serde(default)]
    pub constant_labels: BTreeMap<String, String>,

    #[serde(default)]
    pub variable_labels: Vec<String>,

    /// Histogram only; defaults to the conventional bucket set.
    #[serde(default)]
    pub buckets: Option<Vec<f64>>,
}

impl FamilyConfig {
    /// Name and label checks up front, so a bad file fails at load time.
    pub fn validate(&self) -> Result<()> {
        check_metric_name(&self.name)?;
        check_declared_labels(&self.constant_labels, &self.variable_labels)?;
        match (&self.buckets, self.kind) {
            (Some(_), MetricKind::Counter | MetricKind::Gauge) => {
                return Err(FamilyError::Config(format!(
                    "{}: buckets are only valid for histogram families",
                    self.name
                )));
            }
            (Some(_), MetricKind::Histogram) => {
                self.bucket_boundaries()?;
            }
            (None, _) => {}
        }
        Ok(())
    }

    pub fn bucket_boundaries(&self) -> Result<BucketBoundaries> {
        match &self.buckets {
            Some(b) => BucketBoundaries::new(b.clone()),
            None => Ok(BucketBoundaries::default()),
        }
    }

    pub fn build_counter(&self) -> Result<Family<Counter>> {
        self.expect_kind(MetricKind::Counter)?;
        self.family()
    }

    pub fn build_gauge(&self) -> Result<Family<Gauge>> {
        self.expect_kind(MetricKind::Gauge)?;
        self.family()
    }

    pub fn build_histogram(&self) -> Result<Family<Histogram>> {
        self.expect_kind(MetricKind::Histogram)?;
        Ok(self.family::<Histogram>()?.with_args(self.bucket_boundaries()?))
    }

    fn expect_kind(&self, kind: MetricKind) -> Result<()> {
        if self.kind != kind {
            return Err(FamilyError::Config(format!(
                "{} is declared as {}, not {}",
                self.name,
                self.kind.metric_type().as_str(),
                kind.metric_type().as_str()
            )));
        }
        Ok(())
    }

    fn family<T: Metric>(&self) -> Result<Family<T>> {
        Family::from_parts(
            self.name.clone(),
            self.help.clone(),
            self.constant_labels.clone(),
            self.variable_labels.clone(),
        )
    }
}
