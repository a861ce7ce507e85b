use crate::convert::{dependencies_file, reconciler, references_file};
use crate::core::path::references_file as references_file_path;
use crate::core::{Reporter, UpmError, UpmResult};
use crate::integration::restore;
use crate::nuget::{discovery, LegacyManifest, LegacyScope};
use std::fs;
use std::path::{Path, PathBuf};

/// Everything the conversion needs to know up front.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Root of the tree to convert.
    pub root: PathBuf,
    /// Location of the unified manifest.
    pub manifest_path: PathBuf,
    /// Merge into existing upm files instead of aborting.
    pub force: bool,
    /// Run the install pipeline once conversion is done.
    pub install_after: bool,
    /// Set up MSBuild auto-restore integration while retiring the legacy
    /// integration directory.
    pub init_auto_restore: bool,
    /// Feed every generated manifest can fall back to.
    pub default_feed: String,
}

/// Solution and project rewiring, performed by the build-system side of
/// the conversion rather than the merge logic.
pub trait BuildIntegration {
    /// Strip legacy restore artifacts from a solution file.
    fn clean_solution(&self, solution: &Path) -> UpmResult<()>;

    /// Rewire a project file to the unified model and persist it.
    fn convert_project(&self, project: &Path) -> UpmResult<()>;
}

/// Post-conversion install trigger.
pub trait PackageInstaller {
    fn install(&self, manifest: &Path) -> UpmResult<()>;
}

/// Sequences the whole migration.
///
/// Every step depends on the side effects of the previous one, and a fatal
/// condition stops the run where it occurs: steps already completed are not
/// rolled back, so an abort can leave a mixed legacy/unified tree for the
/// user to resolve (typically by re-running with force).
pub struct Converter<'a> {
    options: ConvertOptions,
    reporter: &'a dyn Reporter,
    integration: &'a dyn BuildIntegration,
    installer: &'a dyn PackageInstaller,
}

impl<'a> Converter<'a> {
    pub fn new(
        options: ConvertOptions,
        reporter: &'a dyn Reporter,
        integration: &'a dyn BuildIntegration,
        installer: &'a dyn PackageInstaller,
    ) -> Self {
        Self {
            options,
            reporter,
            integration,
            installer,
        }
    }

    pub fn run(&self) -> UpmResult<()> {
        let manifest_path = &self.options.manifest_path;
        let root = &self.options.root;

        if manifest_path.exists() && !self.options.force {
            return Err(UpmError::ManifestExists(manifest_path.clone()));
        }

        let mut manifests = Vec::new();
        for path in discovery::find_legacy_reference_files(root) {
            manifests.push(LegacyManifest::load(&path)?);
        }

        let reconciled = reconciler::reconcile(&manifests, self.reporter);
        dependencies_file::merge_dependencies(
            manifest_path,
            root,
            &reconciled,
            &self.options.default_feed,
            self.reporter,
        )?;

        for manifest in manifests.iter().filter(|m| m.scope == LegacyScope::Project) {
            let project_dir = manifest.project_dir();
            let references = references_file_path(project_dir);
            if references.exists() && !self.options.force {
                return Err(UpmError::ReferencesExist(references));
            }
            let names: Vec<String> = manifest
                .packages
                .iter()
                .map(|entry| entry.name.clone())
                .collect();
            references_file::merge_references(project_dir, &names, self.reporter)?;
        }

        for solution in discovery::find_solution_files(root) {
            self.integration.clean_solution(&solution)?;
        }

        for project in discovery::find_project_files(root) {
            self.integration.convert_project(&project)?;
        }

        for manifest in &manifests {
            fs::remove_file(&manifest.path)?;
            self.reporter
                .info(&format!("✓ removed {}", manifest.path.display()));
        }

        if let Some(dir) = discovery::find_legacy_integration_dir(root) {
            self.retire_integration_dir(&dir, manifest_path)?;
        }

        if self.options.install_after {
            self.installer.install(manifest_path)?;
        }

        Ok(())
    }

    /// Retire the legacy integration directory: drop its bundled executable
    /// and build targets, make sure the manifest can bootstrap the
    /// command-line tooling instead, and remove the directory once empty.
    fn retire_integration_dir(&self, dir: &Path, manifest_path: &Path) -> UpmResult<()> {
        for name in ["NuGet.exe", "NuGet.targets"] {
            let file = dir.join(name);
            if file.exists() {
                fs::remove_file(&file)?;
                self.reporter.info(&format!("✓ removed {}", file.display()));
            }
        }

        dependencies_file::ensure_bootstrap_dependency(manifest_path, self.reporter)?;

        if self.options.init_auto_restore {
            let targets = restore::write_restore_targets(&self.options.root)?;
            self.reporter
                .info(&format!("✓ generated {}", targets.display()));
        }

        if fs::read_dir(dir)?.next().is_none() {
            fs::remove_dir(dir)?;
            self.reporter.info(&format!("✓ removed {}", dir.display()));
        }

        Ok(())
    }
}
