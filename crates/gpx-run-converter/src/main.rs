use gpx_run_converter::{BatchReport, Result, Settings, convert_path, logging, metadata};
use std::process::ExitCode;

fn main() -> ExitCode {
    let settings = Settings::from_cli();
    let _logging = logging::setup_logging(settings.trace_file.as_deref());
    metadata::log_version_info();

    match run(&settings) {
        Ok(report) if report.is_success() => {
            println!("SUCCESS");
            ExitCode::SUCCESS
        }
        Ok(report) => {
            eprintln!(
                "ERROR: {} of {} files failed to convert",
                report.failed.len(),
                report.total()
            );
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("ERROR: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(settings: &Settings) -> Result<BatchReport> {
    if let Some(threads) = settings.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    if settings.legacy_pi {
        tracing::warn!("Using the legacy pi constant, distances will be underestimated");
    }

    convert_path(
        &settings.input,
        &settings.output_dir,
        &settings.convert_options(),
    )
}
