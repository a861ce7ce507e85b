use crate::core::{UpmError, UpmResult};
use quick_xml::events::BytesStart;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// A package feed declared in a legacy nuget.config.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageSource {
    pub url: String,
    pub auth: Option<SourceAuth>,
}

/// Clear-text feed credentials carried over from the legacy config.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceAuth {
    pub username: String,
    pub password: String,
}

impl PackageSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth: None,
        }
    }

    pub fn with_auth(url: impl Into<String>, username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth: Some(SourceAuth {
                username: username.into(),
                password: password.into(),
            }),
        }
    }
}

/// Read all package sources from a legacy nuget.config file.
pub fn read_sources(path: &Path) -> UpmResult<Vec<PackageSource>> {
    let content = fs::read_to_string(path)?;
    parse_sources(&content)
        .map_err(|e| UpmError::SourceConfig(format!("{}: {}", path.display(), e)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Sources,
    Credentials,
}

#[derive(Debug, Default)]
struct CredentialDraft {
    username: Option<String>,
    password: Option<String>,
}

/// Parse nuget.config content.
///
/// Sources come from `packageSources/add` entries; an entry without a
/// `value` attribute is never produced. Credentials come from the
/// `packageSourceCredentials` section whose child element name matches the
/// source's key, with `add` entries keyed `Username` and
/// `ClearTextPassword`. Malformed XML fails the whole read.
pub fn parse_sources(content: &str) -> UpmResult<Vec<PackageSource>> {
    let mut reader = Reader::from_str(content);
    reader.trim_text(true);

    let mut saw_configuration = false;
    let mut section = Section::None;
    let mut credential_key: Option<String> = None;

    // key -> url, in document order
    let mut entries: Vec<(String, String)> = Vec::new();
    let mut credentials: HashMap<String, CredentialDraft> = HashMap::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                handle_element(
                    &e,
                    true,
                    &mut saw_configuration,
                    &mut section,
                    &mut credential_key,
                    &mut entries,
                    &mut credentials,
                )?;
            }
            Event::Empty(e) => {
                handle_element(
                    &e,
                    false,
                    &mut saw_configuration,
                    &mut section,
                    &mut credential_key,
                    &mut entries,
                    &mut credentials,
                )?;
            }
            Event::End(e) => match e.name().as_ref() {
                b"packageSources" | b"packageSourceCredentials" => section = Section::None,
                b"configuration" | b"add" | b"clear" => {}
                _ => {
                    if section == Section::Credentials {
                        credential_key = None;
                    }
                }
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_configuration {
        return Err(UpmError::SourceConfig(
            "missing <configuration> root element".to_string(),
        ));
    }

    Ok(entries
        .into_iter()
        .map(|(key, url)| {
            let auth = credentials.get(&key).and_then(|draft| {
                match (&draft.username, &draft.password) {
                    (Some(username), Some(password)) => Some(SourceAuth {
                        username: username.clone(),
                        password: password.clone(),
                    }),
                    _ => None,
                }
            });
            PackageSource { url, auth }
        })
        .collect())
}

fn handle_element(
    e: &BytesStart<'_>,
    is_container: bool,
    saw_configuration: &mut bool,
    section: &mut Section,
    credential_key: &mut Option<String>,
    entries: &mut Vec<(String, String)>,
    credentials: &mut HashMap<String, CredentialDraft>,
) -> UpmResult<()> {
    match e.name().as_ref() {
        b"configuration" => *saw_configuration = true,
        b"packageSources" => {
            if is_container {
                *section = Section::Sources;
            }
        }
        b"packageSourceCredentials" => {
            if is_container {
                *section = Section::Credentials;
            }
        }
        b"add" => match section {
            Section::Sources => {
                // Entries without a value attribute are skipped, not errors.
                if let (Some(key), Some(value)) =
                    (attr_value(e, b"key")?, attr_value(e, b"value")?)
                {
                    entries.push((key, value));
                }
            }
            Section::Credentials => {
                if let Some(source_key) = credential_key {
                    let draft = credentials.entry(source_key.clone()).or_default();
                    match (attr_value(e, b"key")?, attr_value(e, b"value")?) {
                        (Some(key), Some(value)) if key == "Username" => {
                            draft.username = Some(value);
                        }
                        (Some(key), Some(value)) if key == "ClearTextPassword" => {
                            draft.password = Some(value);
                        }
                        _ => {}
                    }
                }
            }
            Section::None => {}
        },
        b"clear" => {}
        name => {
            // Inside packageSourceCredentials every other element names the
            // source its add entries belong to.
            if *section == Section::Credentials && is_container {
                *credential_key = Some(String::from_utf8_lossy(name).into_owned());
            }
        }
    }
    Ok(())
}

fn attr_value(e: &BytesStart<'_>, name: &[u8]) -> UpmResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_ref() == name {
            let value = attr.unescape_value()?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}
