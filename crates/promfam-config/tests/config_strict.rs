#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::io::Write;

use promfam_config as config;
use promfam_core::{ErrorCode, Label, MetricValue};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
families:
  - name: http_requests_total
    kind: counter
    variable_lables: [status] # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
families:
  - name: up
    kind: gauge
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.families[0].name, "up");
    assert!(cfg.families[0].constant_labels.is_empty());
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code(), ErrorCode::Config);
}

#[test]
fn invalid_names_fail_at_load() {
    let bad_name = r#"
version: 1
families:
  - name: "http-requests"
    kind: counter
"#;
    assert_eq!(
        config::load_from_str(bad_name).unwrap_err().code(),
        ErrorCode::InvalidName
    );

    let reserved = r#"
version: 1
families:
  - name: http_requests_total
    kind: counter
    constant_labels: { __job: api }
"#;
    assert_eq!(
        config::load_from_str(reserved).unwrap_err().code(),
        ErrorCode::InvalidLabelName
    );

    let collision = r#"
version: 1
families:
  - name: http_requests_total
    kind: counter
    constant_labels: { status: "200" }
    variable_labels: [status]
"#;
    assert_eq!(
        config::load_from_str(collision).unwrap_err().code(),
        ErrorCode::LabelNameCollision
    );
}

#[test]
fn duplicate_family_names() {
    let dup = r#"
version: 1
families:
  - name: up
    kind: gauge
  - name: up
    kind: counter
"#;
    assert_eq!(config::load_from_str(dup).unwrap_err().code(), ErrorCode::Config);
}

#[test]
fn buckets_only_for_histograms() {
    let bad = r#"
version: 1
families:
  - name: up
    kind: gauge
    buckets: [1.0]
"#;
    assert_eq!(config::load_from_str(bad).unwrap_err().code(), ErrorCode::Config);

    let unsorted = r#"
version: 1
families:
  - name: latency
    kind: histogram
    buckets: [2.0, 1.0]
"#;
    assert_eq!(
        config::load_from_str(unsorted).unwrap_err().code(),
        ErrorCode::InvalidBuckets
    );
}

#[test]
fn builds_working_families() {
    let ok = r#"
version: 1
families:
  - name: http_requests_total
    help: Counts all requests
    kind: counter
    constant_labels: { component: test }
    variable_labels: [status]
  - name: request_latency
    kind: histogram
    buckets: [0.1, 0.5, 1.0]
"#;
    let cfg = config::load_from_str(ok).unwrap();

    let requests = cfg.get("http_requests_total").unwrap().build_counter().unwrap();
    requests.with_label_values(&["200"]).unwrap().inc();
    let collected = requests.collect();
    assert_eq!(collected[0].help, "Counts all requests");
    assert_eq!(
        collected[0].samples[0].labels,
        vec![Label::new("component", "test"), Label::new("status", "200")]
    );

    let latency = cfg.get("request_latency").unwrap().build_histogram().unwrap();
    latency.add(&[]).unwrap().observe(0.3);
    match &latency.collect()[0].samples[0].value {
        MetricValue::Histogram { buckets, .. } => {
            let counts: Vec<u64> = buckets.iter().map(|b| b.cumulative_count).collect();
            assert_eq!(counts, [0, 1, 1, 1]);
        }
        other => panic!("not a histogram: {other:?}"),
    }

    let err = cfg.get("request_latency").unwrap().build_counter().unwrap_err();
    assert_eq!(err.code(), ErrorCode::Config);
}

#[test]
fn load_from_file_reports_missing_file() {
    let err = config::load_from_file("/nonexistent/promfam.yaml").unwrap_err();
    assert_eq!(err.code(), ErrorCode::Io);
}

#[test]
fn load_from_file_reads_yaml() {
    let path = std::env::temp_dir().join(format!("promfam-{}.yaml", std::process::id()));
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "version: 1\nfamilies:\n  - name: up\n    kind: gauge").unwrap();
    drop(f);

    let cfg = config::load_from_file(path.to_str().unwrap()).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(cfg.families.len(), 1);
}
