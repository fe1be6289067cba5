//! Detection table loading and the pure transform steps.
//!
//! The input is a single global CSV in Google Open Images V6 detection
//! format: one row per bounding box across the whole dataset, with
//! normalized min/max corner coordinates. Required columns are `ImageID`,
//! `LabelName`, `XMin`, `XMax`, `YMin`, `YMax`; the real export carries
//! more (`Source`, `Confidence`, `IsOccluded`, ...), which are ignored.
//!
//! This module owns everything that is a pure data transform — loading,
//! filtering to known classes, corner → center+size conversion, grouping
//! by image — so each step is testable without touching the filesystem.
//! The side-effecting per-group emission lives in [`crate::export`].

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::classes::ClassIndexMap;
use crate::error::Oi2YoloError;

/// One row of the Open Images detection table: a single bounding box,
/// expressed as normalized `[0,1]` min/max corners.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DetectionRow {
    #[serde(rename = "ImageID")]
    pub image_id: String,
    #[serde(rename = "LabelName")]
    pub label_name: String,
    #[serde(rename = "XMin")]
    pub xmin: f64,
    #[serde(rename = "XMax")]
    pub xmax: f64,
    #[serde(rename = "YMin")]
    pub ymin: f64,
    #[serde(rename = "YMax")]
    pub ymax: f64,
}

/// A retained detection row with the YOLO center+size fields derived
/// from its corners. Derivation is a pure function of the row's own
/// corner values, so it commutes with grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredRow {
    pub image_id: String,
    pub label_name: String,
    pub x_center: f64,
    pub y_center: f64,
    pub width: f64,
    pub height: f64,
}

impl FilteredRow {
    /// Converts a corner-coordinate detection into center+size form.
    pub fn from_detection(row: &DetectionRow) -> Self {
        Self {
            image_id: row.image_id.clone(),
            label_name: row.label_name.clone(),
            x_center: (row.xmin + row.xmax) / 2.0,
            y_center: (row.ymin + row.ymax) / 2.0,
            width: row.xmax - row.xmin,
            height: row.ymax - row.ymin,
        }
    }
}

/// Rows of one image, in the order they survived filtering, keyed by
/// image identifier. BTreeMap keeps group iteration deterministic;
/// groups are independent so any order is legal, but a stable order
/// keeps repeated runs diffable.
pub type ImageGroups = BTreeMap<String, Vec<FilteredRow>>;

/// Reads the full detection table into memory.
///
/// # Errors
/// [`Oi2YoloError::DetectionCsvOpen`] if the file is missing or
/// unreadable, [`Oi2YoloError::DetectionCsvParse`] if a required column
/// is absent or a coordinate fails to parse as a number.
pub fn read_detections_csv(path: &Path) -> Result<Vec<DetectionRow>, Oi2YoloError> {
    let file = File::open(path).map_err(|source| Oi2YoloError::DetectionCsvOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: DetectionRow = result.map_err(|source| Oi2YoloError::DetectionCsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(row);
    }

    Ok(rows)
}

/// Reads detection rows from a CSV string.
///
/// Useful for testing without file I/O.
pub fn from_detections_csv_str(csv_str: &str) -> Result<Vec<DetectionRow>, Oi2YoloError> {
    let dummy_path = Path::new("<string>");
    let mut csv_reader = csv::Reader::from_reader(csv_str.as_bytes());
    let mut rows = Vec::new();

    for result in csv_reader.deserialize() {
        let row: DetectionRow = result.map_err(|source| Oi2YoloError::DetectionCsvParse {
            path: dummy_path.to_path_buf(),
            source,
        })?;
        rows.push(row);
    }

    Ok(rows)
}

/// Retains only rows whose `LabelName` is a key of the class index map,
/// converting each survivor to center+size form. Exact set membership,
/// original table order preserved.
pub fn filter_known_classes(rows: &[DetectionRow], classes: &ClassIndexMap) -> Vec<FilteredRow> {
    rows.iter()
        .filter(|row| classes.contains(&row.label_name))
        .map(FilteredRow::from_detection)
        .collect()
}

/// Partitions filtered rows by image identifier.
///
/// Every distinct image identifier among the rows yields exactly one
/// group; within a group, rows keep the order they arrived in.
pub fn group_by_image(rows: Vec<FilteredRow>) -> ImageGroups {
    let mut groups = ImageGroups::new();
    for row in rows {
        groups.entry(row.image_id.clone()).or_default().push(row);
    }
    groups
}
