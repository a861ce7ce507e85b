use std::path::PathBuf;
use thiserror::Error;

pub type UpmResult<T> = Result<T, UpmError>;

#[derive(Error, Debug)]
pub enum UpmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("Source config error: {0}")]
    SourceConfig(String),

    #[error("Package reference error: {0}")]
    PackageReference(String),

    #[error("{} already exists, aborting conversion. Re-run with --force to merge into it", .0.display())]
    ManifestExists(PathBuf),

    #[error("{} already exists, aborting conversion. Re-run with --force to merge into it", .0.display())]
    ReferencesExist(PathBuf),

    #[error("Install error: {0}")]
    Install(String),

    #[error("WalkDir error: {0}")]
    WalkDir(#[from] walkdir::Error),
}
