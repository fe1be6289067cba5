#![allow(dead_code)]

use oi2yolo::detections::DetectionRow;
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub const EPS_DERIVED: f64 = 1e-12;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// An Open Images style label code, e.g. `/m/01g317`.
pub fn arb_label_code() -> impl Strategy<Value = String> {
    "[0-9a-z]{1,6}".prop_map(|suffix| format!("/m/{suffix}"))
}

/// A short alphanumeric image identifier.
pub fn arb_image_id() -> impl Strategy<Value = String> {
    "[0-9a-f]{4,12}"
}

/// A valid normalized corner pair with min <= max.
pub fn arb_corner_pair() -> impl Strategy<Value = (f64, f64)> {
    (0.0f64..=1.0, 0.0f64..=1.0).prop_map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
}

/// A detection row drawing its label from the given pool so that some
/// rows land on listed classes and some do not.
pub fn arb_detection_row(label_pool: Vec<String>) -> impl Strategy<Value = DetectionRow> {
    (
        arb_image_id(),
        proptest::sample::select(label_pool),
        arb_corner_pair(),
        arb_corner_pair(),
    )
        .prop_map(|(image_id, label_name, (xmin, xmax), (ymin, ymax))| DetectionRow {
            image_id,
            label_name,
            xmin,
            xmax,
            ymin,
            ymax,
        })
}

/// A class list (as file text) plus detection rows whose labels are
/// drawn from a strict superset of the listed classes, so filtering
/// always has both survivors and casualties to exercise.
pub fn arb_scenario() -> impl Strategy<Value = (String, Vec<DetectionRow>)> {
    proptest::collection::btree_set(arb_label_code(), 1..8).prop_flat_map(|labels| {
        let listed: Vec<String> = labels.into_iter().collect();
        let mut pool = listed.clone();
        // Guaranteed-unlisted labels; listed codes never use this prefix.
        pool.push("/x/unlisted0".to_string());
        pool.push("/x/unlisted1".to_string());
        let text = listed.iter().map(|l| format!("{l}\n")).collect::<String>();

        proptest::collection::vec(arb_detection_row(pool), 0..40)
            .prop_map(move |rows| (text.clone(), rows))
    })
}
