use crate::core::error::{UpmError, UpmResult};
use std::cmp::Ordering;
use std::fmt;

/// A NuGet-flavored semantic version: two to four numeric parts plus an
/// optional pre-release tag ("1.2", "1.2.3.4", "1.0.0-beta.2").
///
/// Ordering follows semantic-version precedence: numeric parts first, then
/// a release sorts above any pre-release of the same numbers, and
/// pre-release tags compare identifier by identifier (numeric identifiers
/// numerically and below alphanumeric ones). Two versions are equal only
/// when their source text is identical, so "1.0" and "1.0.0" stay distinct
/// values; the source text breaks precedence ties to keep the order total.
#[derive(Debug, Clone)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub revision: u64,
    pub prerelease: Option<String>,
    raw: String,
}

impl Version {
    /// Parse a version string (e.g., "1.2.3" or "2.1.0-alpha")
    pub fn parse(s: &str) -> UpmResult<Self> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(UpmError::Version("Empty version".to_string()));
        }

        let (numbers, prerelease) = match raw.split_once('-') {
            Some((numbers, tag)) if !tag.is_empty() => (numbers, Some(tag.to_string())),
            Some(_) => {
                return Err(UpmError::Version(format!(
                    "Invalid version format: {}",
                    s
                )))
            }
            None => (raw, None),
        };

        let parts: Vec<&str> = numbers.split('.').collect();
        if parts.len() < 2 || parts.len() > 4 {
            return Err(UpmError::Version(format!(
                "Invalid version format: {}",
                s
            )));
        }

        let mut fields = [0u64; 4];
        for (i, part) in parts.iter().enumerate() {
            fields[i] = part.parse().map_err(|_| {
                UpmError::Version(format!("Invalid version component '{}' in {}", part, s))
            })?;
        }

        Ok(Self {
            major: fields[0],
            minor: fields[1],
            patch: fields[2],
            revision: fields[3],
            prerelease,
            raw: raw.to_string(),
        })
    }

    /// The version exactly as it appeared in the source file.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Version {}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let numbers = (self.major, self.minor, self.patch, self.revision).cmp(&(
            other.major,
            other.minor,
            other.patch,
            other.revision,
        ));
        if numbers != Ordering::Equal {
            return numbers;
        }

        let tags = match (&self.prerelease, &other.prerelease) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) => compare_prerelease(a, b),
        };
        if tags != Ordering::Equal {
            return tags;
        }

        // Same precedence but possibly different spellings ("1.0" vs
        // "1.0.0"); the source text keeps the order total and consistent
        // with equality.
        self.raw.cmp(&other.raw)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Compare pre-release tags identifier by identifier, semver style.
fn compare_prerelease(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.parse::<u64>(), y.parse::<u64>()) {
                    (Ok(m), Ok(n)) => m.cmp(&n),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}
