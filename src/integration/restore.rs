use crate::convert::orchestrator::PackageInstaller;
use crate::core::path::ensure_dir;
use crate::core::{UpmError, UpmResult};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Directory holding the auto-restore build hook.
pub const RESTORE_DIR: &str = ".upm";

/// MSBuild targets file imported by converted projects.
pub const RESTORE_TARGETS_FILE: &str = "upm.targets";

const RESTORE_TARGETS: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="14.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <Target Name="RestorePackages" BeforeTargets="Build">
    <Exec Command="upm restore" WorkingDirectory="$(SolutionDir)" />
  </Target>
</Project>
"#;

/// Write the auto-restore MSBuild hook for the converted tree.
pub fn write_restore_targets(root: &Path) -> UpmResult<PathBuf> {
    let dir = root.join(RESTORE_DIR);
    ensure_dir(&dir)?;
    let path = dir.join(RESTORE_TARGETS_FILE);
    fs::write(&path, RESTORE_TARGETS)?;
    Ok(path)
}

/// Runs the configured install command with the manifest path appended.
///
/// The install pipeline itself lives outside the converter; this is the
/// seam the conversion triggers it through.
pub struct CommandInstaller {
    command: String,
}

impl CommandInstaller {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl PackageInstaller for CommandInstaller {
    fn install(&self, manifest: &Path) -> UpmResult<()> {
        let mut parts = self.command.split_whitespace();
        let program = parts
            .next()
            .ok_or_else(|| UpmError::Install("install command is empty".to_string()))?;

        let status = Command::new(program)
            .args(parts)
            .arg(manifest)
            .status()
            .map_err(|e| {
                UpmError::Install(format!("failed to run '{}': {}", self.command, e))
            })?;

        if !status.success() {
            return Err(UpmError::Install(format!(
                "'{}' exited with {}",
                self.command, status
            )));
        }
        Ok(())
    }
}
