use crate::core::path::LEGACY_INTEGRATION_DIR;
use crate::core::{UpmError, UpmResult, Version};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs;
use std::path::{Path, PathBuf};

/// One pinned package reference from a legacy file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegacyEntry {
    pub name: String,
    pub version: Version,
}

/// Where a legacy reference file sits in the tree.
///
/// Files inside the legacy integration directory pin solution-wide tooling
/// packages; everything else belongs to a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyScope {
    Project,
    Solution,
}

/// A parsed legacy reference file, immutable once read.
#[derive(Debug, Clone)]
pub struct LegacyManifest {
    pub path: PathBuf,
    pub scope: LegacyScope,
    pub packages: Vec<LegacyEntry>,
}

impl LegacyManifest {
    /// Parse the legacy reference file at `path`.
    pub fn load(path: &Path) -> UpmResult<Self> {
        let content = fs::read_to_string(path)?;
        let packages = parse_packages(&content)
            .map_err(|e| UpmError::PackageReference(format!("{}: {}", path.display(), e)))?;

        Ok(Self {
            path: path.to_path_buf(),
            scope: scope_of(path),
            packages,
        })
    }

    /// The directory whose project this file belongs to.
    pub fn project_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

fn scope_of(path: &Path) -> LegacyScope {
    let parent = path
        .parent()
        .and_then(|dir| dir.file_name())
        .and_then(|name| name.to_str());
    match parent {
        Some(dir) if dir.eq_ignore_ascii_case(LEGACY_INTEGRATION_DIR) => LegacyScope::Solution,
        _ => LegacyScope::Project,
    }
}

/// Parse `<packages><package id=".." version=".."/></packages>` content.
///
/// Both attributes are required per entry; a missing attribute or malformed
/// XML is a fatal parse error.
pub fn parse_packages(content: &str) -> UpmResult<Vec<LegacyEntry>> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut saw_root = false;
    let mut packages = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) => match e.name().as_ref() {
                b"packages" => saw_root = true,
                b"package" => {
                    let mut id = None;
                    let mut version = None;
                    for attr in e.attributes() {
                        let attr = attr.map_err(quick_xml::Error::from)?;
                        match attr.key.as_ref() {
                            b"id" => id = Some(attr.unescape_value()?.into_owned()),
                            b"version" => version = Some(attr.unescape_value()?.into_owned()),
                            _ => {}
                        }
                    }
                    let name = id.ok_or_else(|| {
                        UpmError::PackageReference("package entry missing id attribute".to_string())
                    })?;
                    let version = version.ok_or_else(|| {
                        UpmError::PackageReference(format!(
                            "package entry '{}' missing version attribute",
                            name
                        ))
                    })?;
                    packages.push(LegacyEntry {
                        name,
                        version: Version::parse(&version)?,
                    });
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(UpmError::PackageReference(
            "missing <packages> root element".to_string(),
        ));
    }

    Ok(packages)
}
