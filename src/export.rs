//! Per-group emission: label files and image copies.
//!
//! For every image group this module writes one label file to the labels
//! destination and copies the matching `.jpg` from the image source tree
//! to the image destination. Rendering the label text is a pure function
//! kept separate from the filesystem work so it can be tested on its own.
//!
//! # Label file format
//!
//! One line per retained box, `<class-index> <cx> <cy> <w> <h>`, floats
//! printed with six decimal places. Lines are newline-joined with no
//! trailing newline after the last line.
//!
//! # Non-transactional emission
//!
//! Within a group the label file is written before the image copy is
//! attempted. A missing source image aborts the run, but the label file
//! already written for that group stays on disk — there is no rollback.
//! This ordering is part of the preserved contract.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::classes::ClassIndexMap;
use crate::detections::{FilteredRow, ImageGroups};
use crate::error::Oi2YoloError;

const IMAGE_EXTENSION: &str = "jpg";
const LABEL_EXTENSION: &str = "txt";

/// The three filesystem locations the transformer writes to or reads
/// from, threaded explicitly through the pipeline rather than held as
/// process-wide state.
#[derive(Debug, Clone)]
pub struct ExportPaths {
    /// Receives one `<ImageID>.txt` per group.
    pub labels_dir: PathBuf,
    /// Holds the source `<ImageID>.jpg` files.
    pub images_src_dir: PathBuf,
    /// Receives one copied `<ImageID>.jpg` per group.
    pub images_dest_dir: PathBuf,
}

impl ExportPaths {
    pub fn new(labels_dir: PathBuf, images_src_dir: PathBuf, images_dest_dir: PathBuf) -> Self {
        Self {
            labels_dir,
            images_src_dir,
            images_dest_dir,
        }
    }

    /// Verifies all three locations are existing directories before any
    /// processing starts, so a bad path argument surfaces before the
    /// first label is written rather than mid-run.
    pub fn preflight(&self) -> Result<(), Oi2YoloError> {
        for dir in [&self.labels_dir, &self.images_src_dir, &self.images_dest_dir] {
            if !dir.is_dir() {
                return Err(Oi2YoloError::DestinationUnavailable {
                    path: dir.clone(),
                });
            }
        }
        Ok(())
    }

    // File names are built by concatenation, not `with_extension`: an
    // image identifier may itself contain dots, and the full identifier
    // must survive into the file name.
    fn label_path(&self, image_id: &str) -> PathBuf {
        self.labels_dir.join(format!("{image_id}.{LABEL_EXTENSION}"))
    }

    fn image_src_path(&self, image_id: &str) -> PathBuf {
        self.images_src_dir
            .join(format!("{image_id}.{IMAGE_EXTENSION}"))
    }

    fn image_dest_path(&self, image_id: &str) -> PathBuf {
        self.images_dest_dir
            .join(format!("{image_id}.{IMAGE_EXTENSION}"))
    }
}

/// Renders one group's label file text.
///
/// Rows were pre-filtered against the class map, so the index lookup
/// here can only miss if the pipeline is wired wrong; that surfaces as
/// [`Oi2YoloError::UnknownLabel`] rather than a panic.
pub fn render_label_file(
    rows: &[FilteredRow],
    classes: &ClassIndexMap,
) -> Result<String, Oi2YoloError> {
    let mut lines = Vec::with_capacity(rows.len());

    for row in rows {
        let class_index =
            classes
                .index_of(&row.label_name)
                .ok_or_else(|| Oi2YoloError::UnknownLabel {
                    label: row.label_name.clone(),
                })?;
        lines.push(format!(
            "{} {:.6} {:.6} {:.6} {:.6}",
            class_index, row.x_center, row.y_center, row.width, row.height
        ));
    }

    Ok(lines.join("\n"))
}

/// Emits every group: label file first, then the image copy.
///
/// Groups are processed in map order; the first failing group aborts the
/// run. Returns the number of groups fully emitted.
pub fn export_groups(
    groups: &ImageGroups,
    classes: &ClassIndexMap,
    paths: &ExportPaths,
) -> Result<usize, Oi2YoloError> {
    let mut emitted = 0;
    for (image_id, rows) in groups {
        emit_group(image_id, rows, classes, paths)?;
        emitted += 1;
    }
    Ok(emitted)
}

fn emit_group(
    image_id: &str,
    rows: &[FilteredRow],
    classes: &ClassIndexMap,
    paths: &ExportPaths,
) -> Result<(), Oi2YoloError> {
    let label_text = render_label_file(rows, classes)?;
    let label_path = paths.label_path(image_id);
    fs::write(&label_path, label_text).map_err(|source| Oi2YoloError::LabelWrite {
        path: label_path.clone(),
        source,
    })?;

    let src = paths.image_src_path(image_id);
    let dest = paths.image_dest_path(image_id);
    // Destinations were preflighted, so NotFound here means the source
    // image itself is missing.
    fs::copy(&src, &dest).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            Oi2YoloError::ImageNotFound {
                image_id: image_id.to_string(),
                path: src.clone(),
                source,
            }
        } else {
            Oi2YoloError::Io(source)
        }
    })?;

    Ok(())
}
