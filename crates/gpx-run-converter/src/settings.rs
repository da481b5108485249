use crate::convert::ConvertOptions;
use clap::Parser;
use run_metrics_lib::MetricsConfig;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// GPX Run Converter - Converts GPS tracks of runs into JSON reports with pace and calorie splits
pub struct Settings {
    /// Folder of GPX files, or a single GPX file, to convert
    #[clap(value_name = "INPUT")]
    pub input: PathBuf,

    /// Folder receiving one report per track (created if missing)
    #[clap(value_name = "OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Extension of the written reports
    #[clap(short, long, default_value = "txt")]
    pub extension: String,

    /// Indent the JSON reports
    #[clap(long)]
    pub pretty: bool,

    /// Use pi = 3.14 to reproduce reports of older versions
    #[clap(long)]
    pub legacy_pi: bool,

    /// Runner body mass in kilograms, for the calorie estimate
    #[clap(long, default_value = "70.0", value_parser = parse_positive)]
    pub body_mass_kg: f64,

    /// Distance covered by one split section, in meters
    #[clap(long, default_value = "1000.0", value_parser = parse_positive)]
    pub section_length_m: f64,

    /// Number of worker threads (defaults to one per CPU)
    #[clap(short = 'j', long)]
    pub threads: Option<usize>,

    /// Write a Chrome trace of the run to this file (needs the `profiling` feature)
    #[clap(long, value_name = "FILE")]
    pub trace_file: Option<PathBuf>,
}

impl Settings {
    /// Parse settings from the command line, exiting with usage on error
    pub fn from_cli() -> Self {
        Settings::parse()
    }

    /// Engine constants selected on the command line
    pub fn metrics_config(&self) -> MetricsConfig {
        let base = if self.legacy_pi {
            MetricsConfig::legacy()
        } else {
            MetricsConfig::default()
        };
        MetricsConfig {
            body_mass_kg: self.body_mass_kg,
            section_length_m: self.section_length_m,
            ..base
        }
    }

    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            metrics: self.metrics_config(),
            extension: self.extension.trim_start_matches('.').to_string(),
            pretty: self.pretty,
        }
    }
}

fn parse_positive(value: &str) -> Result<f64, String> {
    let number: f64 = value.parse().map_err(|e| format!("{e}"))?;
    if number.is_finite() && number > 0.0 {
        Ok(number)
    } else {
        Err(format!("expected a positive number, got {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::try_parse_from(["gpx-run-converter", "in", "out"]).unwrap();
        assert_eq!(settings.input, PathBuf::from("in"));
        assert_eq!(settings.output_dir, PathBuf::from("out"));
        assert_eq!(settings.metrics_config(), MetricsConfig::default());

        let options = settings.convert_options();
        assert_eq!(options.extension, "txt");
        assert!(!options.pretty);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::try_parse_from([
            "gpx-run-converter",
            "runs",
            "reports",
            "--legacy-pi",
            "--body-mass-kg",
            "82.5",
            "--extension",
            ".json",
            "--pretty",
            "-j",
            "4",
        ])
        .unwrap();

        let config = settings.metrics_config();
        assert!(config.is_legacy());
        assert_eq!(config.body_mass_kg, 82.5);
        assert_eq!(config.section_length_m, 1000.0);
        assert_eq!(settings.threads, Some(4));

        let options = settings.convert_options();
        assert_eq!(options.extension, "json");
        assert!(options.pretty);
    }

    #[test]
    fn test_rejects_non_positive_values() {
        assert!(
            Settings::try_parse_from(["gpx-run-converter", "in", "out", "--body-mass-kg", "0"])
                .is_err()
        );
        assert!(
            Settings::try_parse_from([
                "gpx-run-converter",
                "in",
                "out",
                "--section-length-m",
                "-5"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_requires_both_paths() {
        assert!(Settings::try_parse_from(["gpx-run-converter", "in"]).is_err());
    }
}
