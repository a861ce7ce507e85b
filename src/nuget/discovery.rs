use crate::core::path::{LEGACY_INTEGRATION_DIR, LEGACY_PACKAGES_FILE, LEGACY_SOURCES_FILE};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions of project files the converter rewires.
const PROJECT_EXTENSIONS: [&str; 3] = ["csproj", "fsproj", "vbproj"];

fn walk(root: &Path) -> impl Iterator<Item = walkdir::DirEntry> {
    // Sorted so discovery order (and "first config wins") is deterministic.
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
}

fn find_files_named(root: &Path, name: &'static str) -> Vec<PathBuf> {
    walk(root)
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|file| file.eq_ignore_ascii_case(name))
        })
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

/// All legacy per-project reference files under `root`.
pub fn find_legacy_reference_files(root: &Path) -> Vec<PathBuf> {
    find_files_named(root, LEGACY_PACKAGES_FILE)
}

/// All legacy package-source configuration files under `root`.
pub fn find_legacy_source_configs(root: &Path) -> Vec<PathBuf> {
    find_files_named(root, LEGACY_SOURCES_FILE)
}

/// All solution files under `root`.
pub fn find_solution_files(root: &Path) -> Vec<PathBuf> {
    walk(root)
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("sln"))
        })
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

/// All project files under `root`.
pub fn find_project_files(root: &Path) -> Vec<PathBuf> {
    walk(root)
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| {
                        PROJECT_EXTENSIONS
                            .iter()
                            .any(|known| ext.eq_ignore_ascii_case(known))
                    })
        })
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

/// The legacy integration directory, if the tree has one.
pub fn find_legacy_integration_dir(root: &Path) -> Option<PathBuf> {
    walk(root)
        .find(|entry| {
            entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.eq_ignore_ascii_case(LEGACY_INTEGRATION_DIR))
        })
        .map(|entry| entry.path().to_path_buf())
}
