//! oi2yolo: Open Images detections → YOLO training layout.
//!
//! Converts a single global Open Images V6 detection CSV into one YOLO
//! label file per image and copies each retained image alongside, so a
//! training job finds labels and images co-located. The pipeline is
//! load → filter → derive center+size → group by image → emit per group.
//!
//! # Modules
//!
//! - [`classes`]: class identifier → dense index mapping
//! - [`detections`]: detection table model and pure transform steps
//! - [`export`]: per-group label writing and image copying
//! - [`error`]: error types for oi2yolo operations

pub mod classes;
pub mod detections;
pub mod error;
pub mod export;

use std::path::{Path, PathBuf};

use clap::Parser;

pub use error::Oi2YoloError;

use classes::ClassIndexMap;
use export::ExportPaths;

/// The oi2yolo CLI application.
///
/// All five arguments are positional and their order is fixed; the three
/// directory arguments must already exist (none are created).
#[derive(Parser)]
#[command(name = "oi2yolo")]
#[command(version, about)]
struct Cli {
    /// Class list file, one class identifier per line. Line order fixes
    /// each class's index in the output labels.
    class_list: PathBuf,

    /// Detection table CSV (Open Images V6 format; columns ImageID,
    /// LabelName, XMin, XMax, YMin, YMax required).
    detections_csv: PathBuf,

    /// Existing directory that receives per-image label .txt files.
    labels_dest: PathBuf,

    /// Existing directory holding source <ImageID>.jpg images.
    images_source: PathBuf,

    /// Existing directory that receives copied <ImageID>.jpg images.
    images_dest: PathBuf,
}

/// Run the oi2yolo CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), Oi2YoloError> {
    let cli = Cli::parse();
    convert(
        &cli.class_list,
        &cli.detections_csv,
        ExportPaths::new(cli.labels_dest, cli.images_source, cli.images_dest),
    )
}

/// Executes the whole conversion pipeline.
///
/// Separated from [`run`] so the pipeline is callable without going
/// through argument parsing.
pub fn convert(
    class_list: &Path,
    detections_csv: &Path,
    paths: ExportPaths,
) -> Result<(), Oi2YoloError> {
    let classes = ClassIndexMap::from_path(class_list)?;
    paths.preflight()?;

    println!("Reading detection labels from {}...", detections_csv.display());
    let rows = detections::read_detections_csv(detections_csv)?;

    println!(
        "Extracting rows for the {} listed class(es) from {} detection(s)...",
        classes.len(),
        rows.len()
    );
    let filtered = detections::filter_known_classes(&rows, &classes);
    let groups = detections::group_by_image(filtered);

    println!(
        "Writing {} YOLO label file(s) and copying the matching image(s)...",
        groups.len()
    );
    let emitted = export::export_groups(&groups, &classes, &paths)?;
    println!("Done: {} image(s) labeled and copied.", emitted);

    Ok(())
}
