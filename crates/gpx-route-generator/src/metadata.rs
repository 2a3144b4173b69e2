use shadow_rs::shadow;

shadow!(build);

/// Log version info at startup
#[allow(dead_code)] // Allow auto-generated code containing unused build metadata
pub fn log_version_info() {
    tracing::info!("{}", short_version_info());
    tracing::info!(
        "Build date: {} ({})",
        build::BUILD_TIME_2822,
        build::BUILD_RUST_CHANNEL
    );
}

#[allow(dead_code)] // Allow auto-generated code containing unused build metadata
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
    fn test_short_version_info() {
        let info = short_version_info();
        assert!(info.starts_with(build::PROJECT_NAME));
        assert!(info.contains(build::PKG_VERSION));
    }
}
