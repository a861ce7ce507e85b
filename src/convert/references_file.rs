use crate::convert::merge::{self, MergeOutcome};
use crate::core::path::references_file;
use crate::core::{Reporter, UpmResult};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Merge package names into the project's reference file, a sibling of the
/// legacy file it replaces.
///
/// Names already present (case-insensitive) are warned about and dropped.
/// An absent file is written with all remaining names, one per line; an
/// existing file gets them appended.
pub fn merge_references(
    project_dir: &Path,
    names: &[String],
    reporter: &dyn Reporter,
) -> UpmResult<MergeOutcome> {
    let path = references_file(project_dir);
    let existing = existing_names(&path)?;

    let mut additions: Vec<String> = Vec::new();
    for name in names {
        if existing.contains(&name.to_lowercase()) {
            reporter.warn(&format!(
                "{} is already referenced in {}",
                name,
                path.display()
            ));
        } else {
            additions.push(name.clone());
        }
    }

    let outcome = merge::merge_lines(&path, &additions, || Ok(merge::lines_content(&additions)))?;

    match outcome {
        MergeOutcome::Created => reporter.info(&format!("✓ converted {}", path.display())),
        MergeOutcome::Appended => reporter.info(&format!("✓ overwritten {}", path.display())),
        MergeOutcome::UpToDate => reporter.info(&format!("{} is up to date", path.display())),
    }
    Ok(outcome)
}

/// Names already listed in the reference file, lower-cased for comparison.
fn existing_names(path: &Path) -> UpmResult<HashSet<String>> {
    if !path.exists() {
        return Ok(HashSet::new());
    }
    let content = fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(|line| line.to_lowercase())
        .collect())
}
