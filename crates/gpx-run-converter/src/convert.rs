//! File conversion
//!
//! Converts one GPX file, or every `.gpx` file of a folder, into JSON run
//! reports. Batch conversions run in parallel: conversions share no state and
//! each output name derives from its own input file stem. Inputs whose stems
//! map to the same output (`a.gpx` and `a.GPX`) are only converted once.

use crate::loader::load_track;
use crate::report::RunReport;
use crate::{ConvertError, Result};
use rayon::prelude::*;
use run_metrics_lib::{MetricsConfig, analyze};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Options of the conversion pipeline
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Constants used by the metrics engine
    pub metrics: MetricsConfig,
    /// Extension of report files, without the dot.
    /// Default: "txt"
    pub extension: String,
    /// Indent the JSON output
    pub pretty: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            metrics: MetricsConfig::default(),
            extension: "txt".to_string(),
            pretty: false,
        }
    }
}

/// Outcome of converting a set of files
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// (input, output) of every converted file
    pub converted: Vec<(PathBuf, PathBuf)>,
    /// (input, error message) of every file that failed
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    /// True if no file failed
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of files attempted
    pub fn total(&self) -> usize {
        self.converted.len() + self.failed.len()
    }
}

/// Path of the report written for `input` into `output_dir`
pub fn output_path(input: &Path, output_dir: &Path, extension: &str) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| ConvertError::InvalidFileName(input.to_path_buf()))?;
    let mut file_name = stem.to_os_string();
    file_name.push(".");
    file_name.push(extension);
    Ok(output_dir.join(file_name))
}

/// Split `files` into those to convert and those whose output path was already
/// claimed by an earlier file
fn claim_output_paths(
    files: Vec<PathBuf>,
    output_dir: &Path,
    extension: &str,
) -> (Vec<PathBuf>, Vec<(PathBuf, ConvertError)>) {
    let mut claimed = HashSet::new();
    let mut unique = Vec::with_capacity(files.len());
    let mut duplicates = Vec::new();
    for input in files {
        match output_path(&input, output_dir, extension) {
            Ok(output) if !claimed.insert(output.clone()) => {
                duplicates.push((input, ConvertError::DuplicateOutput(output)));
            }
            // Invalid names are left to fail in convert_file
            _ => unique.push(input),
        }
    }
    (unique, duplicates)
}

/// Convert a single GPX file, returning the path of the written report
///
/// The output folder must exist. Tracks too short to measure, or with broken
/// timestamps, are still written and only reported through warnings.
pub fn convert_file(input: &Path, output_dir: &Path, options: &ConvertOptions) -> Result<PathBuf> {
    #[cfg(feature = "profiling")]
    profiling::scope!("convert::convert_file");

    let track = load_track(input)?;
    let analysis = analyze(&options.metrics, &track.points);
    let summary = analysis.summary.with_location(track.location.as_str());

    if summary.is_degenerate() {
        tracing::warn!(
            "{}: only {} GPS points, writing an empty run report",
            input.display(),
            track.points.len()
        );
    } else if summary.is_degraded() {
        tracing::warn!(
            "{}: {} segments with unreadable timestamps counted as 0 s",
            input.display(),
            summary.diagnostics.len()
        );
    }

    let output = output_path(input, output_dir, &options.extension)?;
    let report = RunReport::new(&summary, &analysis.sections, &track.points);

    let mut writer = BufWriter::new(File::create(&output)?);
    report.write_to(&mut writer, options.pretty)?;
    writer.flush()?;

    Ok(output)
}

/// List the `.gpx` files directly inside `dir`, sorted by path
pub fn gpx_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_gpx = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gpx"));
        if is_gpx && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Convert every `.gpx` file of `input_dir` in parallel
///
/// A file that fails is logged and recorded in the returned report without
/// stopping the others. Only a missing input folder or an output folder that
/// cannot be created is an error.
pub fn convert_batch(
    input_dir: &Path,
    output_dir: &Path,
    options: &ConvertOptions,
) -> Result<BatchReport> {
    #[cfg(feature = "profiling")]
    profiling::scope!("convert::convert_batch");

    if !input_dir.is_dir() {
        return Err(ConvertError::InputNotFound(input_dir.to_path_buf()));
    }
    fs::create_dir_all(output_dir)?;

    let files = gpx_files_in(input_dir)?;
    tracing::info!("Converting {} GPX files from {}", files.len(), input_dir.display());
    let (files, duplicates) = claim_output_paths(files, output_dir, &options.extension);

    let results: Vec<(PathBuf, std::result::Result<PathBuf, String>)> = files
        .into_par_iter()
        .map(|input| {
            let result = convert_file(&input, output_dir, options);
            log_result(&input, &result);
            (input, result.map_err(|err| err.to_string()))
        })
        .collect();

    let mut report = BatchReport::default();
    for (input, err) in duplicates {
        tracing::error!("CONVERT ERROR: {}: {}", input.display(), err);
        report.failed.push((input, err.to_string()));
    }
    for (input, result) in results {
        match result {
            Ok(output) => report.converted.push((input, output)),
            Err(message) => report.failed.push((input, message)),
        }
    }
    Ok(report)
}

/// Convert a folder of GPX files, or a single GPX file
pub fn convert_path(
    input: &Path,
    output_dir: &Path,
    options: &ConvertOptions,
) -> Result<BatchReport> {
    if input.is_dir() {
        return convert_batch(input, output_dir, options);
    }
    if !input.is_file() {
        return Err(ConvertError::InputNotFound(input.to_path_buf()));
    }

    fs::create_dir_all(output_dir)?;
    let result = convert_file(input, output_dir, options);
    log_result(input, &result);

    let mut report = BatchReport::default();
    match result {
        Ok(output) => report.converted.push((input.to_path_buf(), output)),
        Err(err) => report.failed.push((input.to_path_buf(), err.to_string())),
    }
    Ok(report)
}

fn log_result(input: &Path, result: &Result<PathBuf>) {
    match result {
        Ok(output) => tracing::info!("CONVERTED: {} -> {}", input.display(), output.display()),
        Err(err) => tracing::error!("CONVERT ERROR: {}: {}", input.display(), err),
    }
}
