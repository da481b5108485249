use shadow_rs::shadow;

shadow!(build);

/// Log version and build info
pub fn log_version_info() {
    tracing::info!("{}", short_version_info());
    tracing::info!(
        "Build date: {} ({})",
        build::BUILD_TIME_2822,
        build::BUILD_RUST_CHANNEL
    );
}

pub fn short_version_info() -> String {
    format!(
        "{} {} ({}@{}{})",
        build::PROJECT_NAME,
        build::PKG_VERSION,
        build::BRANCH,
        build::SHORT_COMMIT,
        if build::GIT_CLEAN { "" } else { "+dirty" }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_version_info_names_the_package() {
        let info = short_version_info();
        assert!(info.starts_with("gpx-run-converter "));
        assert!(info.contains(env!("CARGO_PKG_VERSION")));
    }
}
