use crate::convert::merge::{self, MergeOutcome};
use crate::core::{Reporter, UpmResult, Version};
use crate::nuget::{discovery, sources, PackageSource};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

/// Command-line package every converted tree depends on, so the unified
/// manifest can be restored without the legacy bundled executable.
pub const BOOTSTRAP_PACKAGE: &str = "Upm.CommandLine";

/// How future version ranges are resolved for a requirement. The converter
/// only emits `Max` (prefer the highest satisfying version), which is the
/// resolver default and therefore carries no directive in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverStrategy {
    Max,
}

/// One requirement written into a freshly generated manifest: an exact
/// version pin resolved against the file's source set.
#[derive(Debug, Clone)]
pub struct PackageRequirement {
    pub name: String,
    pub version: Version,
    pub strategy: ResolverStrategy,
}

impl PackageRequirement {
    pub fn exact(name: impl Into<String>, version: Version) -> Self {
        Self {
            name: name.into(),
            version,
            strategy: ResolverStrategy::Max,
        }
    }
}

/// In-memory form of a freshly generated manifest. All requirements share
/// the same source set, so sources are hoisted into a file-level header.
#[derive(Debug, Clone)]
pub struct DependenciesFile {
    pub sources: Vec<PackageSource>,
    pub requirements: Vec<PackageRequirement>,
}

impl fmt::Display for DependenciesFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for source in &self.sources {
            match &source.auth {
                Some(auth) => writeln!(
                    f,
                    "source {} username: \"{}\" password: \"{}\"",
                    source.url, auth.username, auth.password
                )?,
                None => writeln!(f, "source {}", source.url)?,
            }
        }
        if !self.sources.is_empty() && !self.requirements.is_empty() {
            writeln!(f)?;
        }
        for requirement in &self.requirements {
            writeln!(f, "nuget {} {}", requirement.name, requirement.version)?;
        }
        Ok(())
    }
}

/// Merge reconciled packages into the unified manifest at `manifest_path`.
///
/// Packages already declared there (case-insensitive) are warned about and
/// dropped; the existing file wins. An absent manifest is generated in one
/// shot with a source header taken from the first legacy source config
/// under `root` (consumed and deleted) plus the default feed. An existing
/// manifest gets plain `<name> <version>` lines appended.
pub fn merge_dependencies(
    manifest_path: &Path,
    root: &Path,
    reconciled: &BTreeMap<String, Version>,
    default_feed: &str,
    reporter: &dyn Reporter,
) -> UpmResult<MergeOutcome> {
    let existing = declared_packages(manifest_path)?;

    let mut additions: Vec<(&str, &Version)> = Vec::new();
    for (name, version) in reconciled {
        if existing.contains(&name.to_lowercase()) {
            reporter.warn(&format!(
                "{} is already defined in {}",
                name,
                manifest_path.display()
            ));
        } else {
            additions.push((name, version));
        }
    }

    let lines: Vec<String> = additions
        .iter()
        .map(|(name, version)| format!("{} {}", name, version))
        .collect();

    let outcome = merge::merge_lines(manifest_path, &lines, || {
        let sources = collect_sources(root, default_feed, reporter)?;
        let requirements = additions
            .iter()
            .map(|(name, version)| PackageRequirement::exact(*name, (*version).clone()))
            .collect();
        Ok(DependenciesFile {
            sources,
            requirements,
        }
        .to_string())
    })?;

    match outcome {
        MergeOutcome::Created => {
            reporter.info(&format!("✓ generated {}", manifest_path.display()))
        }
        MergeOutcome::Appended => {
            reporter.info(&format!("✓ overwritten {}", manifest_path.display()))
        }
        MergeOutcome::UpToDate => {
            reporter.info(&format!("{} is up to date", manifest_path.display()))
        }
    }
    Ok(outcome)
}

/// Append the bootstrap command-line dependency unless already declared.
pub fn ensure_bootstrap_dependency(
    manifest_path: &Path,
    reporter: &dyn Reporter,
) -> UpmResult<()> {
    if declared_packages(manifest_path)?.contains(&BOOTSTRAP_PACKAGE.to_lowercase()) {
        return Ok(());
    }

    let line = format!("nuget {}", BOOTSTRAP_PACKAGE);
    merge::merge_lines(manifest_path, std::slice::from_ref(&line), || {
        Ok(format!("{}\n", line))
    })?;
    reporter.info(&format!(
        "✓ added {} to {}",
        BOOTSTRAP_PACKAGE,
        manifest_path.display()
    ));
    Ok(())
}

/// Gather the source set for a generated manifest.
///
/// The first legacy source config found under `root` wins and is deleted
/// after reading; the default feed is always part of the set. Set
/// semantics, so the final order is not guaranteed.
fn collect_sources(
    root: &Path,
    default_feed: &str,
    reporter: &dyn Reporter,
) -> UpmResult<Vec<PackageSource>> {
    let mut set: HashSet<PackageSource> = HashSet::new();

    if let Some(config) = discovery::find_legacy_source_configs(root).first() {
        for source in sources::read_sources(config)? {
            set.insert(source);
        }
        fs::remove_file(config)?;
        reporter.info(&format!("✓ removed {}", config.display()));
    }

    set.insert(PackageSource::new(default_feed));
    Ok(set.into_iter().collect())
}

/// Package names already declared in the manifest, lower-cased for
/// case-insensitive conflict detection.
fn declared_packages(manifest_path: &Path) -> UpmResult<HashSet<String>> {
    if !manifest_path.exists() {
        return Ok(HashSet::new());
    }
    let content = fs::read_to_string(manifest_path)?;
    Ok(parse_declared(&content))
}

/// Extract declared package names from manifest content. Handles both
/// `nuget <name> <version>` directives and the bare `<name> <version>`
/// lines the merge step appends; `source` directives, comments and blank
/// lines carry no package name.
fn parse_declared(content: &str) -> HashSet<String> {
    let mut names = HashSet::new();
    for line in content.lines() {
        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else { continue };
        if first.starts_with('#') || first.starts_with("//") {
            continue;
        }
        let name = if first.eq_ignore_ascii_case("nuget") {
            match tokens.next() {
                Some(name) => name,
                None => continue,
            }
        } else if first.eq_ignore_ascii_case("source") {
            continue;
        } else {
            first
        };
        names.insert(name.to_lowercase());
    }
    names
}
