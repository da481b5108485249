//! GPX Run Converter - Conversion pipeline library
//!
//! Loads GPX tracks, runs them through the metrics engine of `run-metrics-lib`
//! and writes one JSON run report per track.
//!
//! - **[`loader`]**: GPX file to ordered track points
//! - **[`report`]**: JSON document layout
//! - **[`convert`]**: Single file and parallel batch conversion
//! - **[`settings`]**: Command line configuration

pub mod convert;
pub mod loader;
pub mod logging;
pub mod metadata;
pub mod report;
pub mod settings;

pub use convert::{BatchReport, ConvertOptions, convert_batch, convert_file, convert_path};
pub use loader::{LoadedTrack, load_track};
pub use report::RunReport;
pub use settings::Settings;

use std::path::PathBuf;

/// Error types for the conversion pipeline
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("GPX parsing error: {0}")]
    GpxParse(#[from] gpx::errors::GpxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Timestamp formatting error: {0}")]
    TimestampFormat(#[from] time::error::Format),

    #[error("cannot find input folder: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Invalid input file name: {}", .0.display())]
    InvalidFileName(PathBuf),

    #[error("duplicate output name {}, already written for another input", .0.display())]
    DuplicateOutput(PathBuf),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
