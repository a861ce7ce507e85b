use crate::core::error::{UpmError, UpmResult};
use std::path::{Path, PathBuf};

/// The unified root dependencies manifest.
pub const DEPENDENCIES_FILE: &str = "upm.dependencies";

/// The per-project reference file, a sibling of the legacy file it replaces.
pub const REFERENCES_FILE: &str = "upm.references";

/// Legacy per-project package reference file.
pub const LEGACY_PACKAGES_FILE: &str = "packages.config";

/// Legacy package-sources configuration file.
pub const LEGACY_SOURCES_FILE: &str = "nuget.config";

/// Legacy solution-level integration directory.
pub const LEGACY_INTEGRATION_DIR: &str = ".nuget";

/// Get the UPM home directory
///
/// Platform-specific locations:
/// - Windows: %APPDATA%\upm
/// - Linux: ~/.config/upm
/// - macOS: ~/Library/Application Support/upm
pub fn upm_home() -> UpmResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| UpmError::Path("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("upm"))
}

/// Get the config file path (<upm home>/config.yaml)
pub fn config_file() -> UpmResult<PathBuf> {
    Ok(upm_home()?.join("config.yaml"))
}

/// Default location of the unified manifest for a conversion root.
pub fn dependencies_file(root: &Path) -> PathBuf {
    root.join(DEPENDENCIES_FILE)
}

/// Location of the reference file for a project directory.
pub fn references_file(project_dir: &Path) -> PathBuf {
    project_dir.join(REFERENCES_FILE)
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> UpmResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
