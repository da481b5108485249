fn main() {
    // Exposes version and git information to `metadata::log_version_info`
    shadow_rs::ShadowBuilder::builder()
        .build()
        .expect("failed to generate build metadata");
}
