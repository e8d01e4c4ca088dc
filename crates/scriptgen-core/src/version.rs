//! Gradle version values.
//!
//! Versions look like `major.minor[.patch][-suffix]` (`7.6`, `8.0.2`,
//! `8.1-rc-2`, `7.5-20220613220235+0000`). Feature checks use the base
//! version, so a release candidate counts as the release it precedes.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when parsing a version string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VersionError {
    #[error("Empty version string")]
    Empty,

    #[error("Invalid version '{0}': expected major.minor[.patch][-suffix]")]
    Malformed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GradleVersion {
    major: u32,
    minor: u32,
    patch: u32,
    suffix: Option<String>,
}

impl GradleVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self { major, minor, patch, suffix: None }
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> u32 {
        self.patch
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    /// The version with any pre-release or snapshot suffix removed.
    pub fn base_version(&self) -> GradleVersion {
        Self::new(self.major, self.minor, self.patch)
    }

    /// Compares base versions, so `6.4-rc-1` is at least `6.4`.
    pub fn is_at_least(&self, other: &GradleVersion) -> bool {
        self.base_version() >= other.base_version()
    }
}

impl Default for GradleVersion {
    fn default() -> Self {
        Self::new(8, 5, 0)
    }
}

impl PartialOrd for GradleVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GradleVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.suffix, &other.suffix) {
                (None, None) => Ordering::Equal,
                // Pre-release and snapshot builds sort before the release itself.
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (Some(left), Some(right)) => compare_suffixes(left, right),
            })
    }
}

/// Segment-wise comparison so that `rc-10` sorts after `rc-2`. Numeric
/// segments sort before textual ones.
fn compare_suffixes(left: &str, right: &str) -> Ordering {
    let left_segments: Vec<&str> = left.split(|c: char| c == '-' || c == '.').collect();
    let right_segments: Vec<&str> = right.split(|c: char| c == '-' || c == '.').collect();
    for (l, r) in left_segments.iter().zip(&right_segments) {
        let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
            (Ok(l), Ok(r)) => l.cmp(&r),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => l.cmp(r),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    left_segments
        .len()
        .cmp(&right_segments.len())
        // Keeps the order total and consistent with `Eq` (`rc-01` vs `rc-1`).
        .then_with(|| left.cmp(right))
}

impl fmt::Display for GradleVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.patch == 0 {
            write!(f, "{}.{}", self.major, self.minor)?;
        } else {
            write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        }
        if let Some(suffix) = &self.suffix {
            write!(f, "-{}", suffix)?;
        }
        Ok(())
    }
}

impl FromStr for GradleVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(VersionError::Empty);
        }
        let malformed = || VersionError::Malformed(s.to_string());

        let (numbers, suffix) = match s.split_once('-') {
            Some((numbers, suffix)) if !suffix.is_empty() => (numbers, Some(suffix.to_string())),
            Some(_) => return Err(malformed()),
            None => (s, None),
        };

        let parts = numbers
            .split('.')
            .map(|part| part.parse::<u32>().map_err(|_| malformed()))
            .collect::<Result<Vec<_>, _>>()?;

        match parts.as_slice() {
            [major, minor] => Ok(Self { major: *major, minor: *minor, patch: 0, suffix }),
            [major, minor, patch] => Ok(Self {
                major: *major,
                minor: *minor,
                patch: *patch,
                suffix,
            }),
            _ => Err(malformed()),
        }
    }
}

impl TryFrom<String> for GradleVersion {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GradleVersion> for String {
    fn from(value: GradleVersion) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> GradleVersion {
        s.parse().unwrap()
    }

    #[test]
    fn parses_major_minor() {
        let version = v("4.10");
        assert_eq!((version.major(), version.minor(), version.patch()), (4, 10, 0));
        assert!(version.suffix().is_none());
    }

    #[test]
    fn parses_patch_and_suffix() {
        let version = v("8.1.1-rc-2");
        assert_eq!((version.major(), version.minor(), version.patch()), (8, 1, 1));
        assert_eq!(version.suffix(), Some("rc-2"));
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!("".parse::<GradleVersion>(), Err(VersionError::Empty));
        assert!("8".parse::<GradleVersion>().is_err());
        assert!("8.x".parse::<GradleVersion>().is_err());
        assert!("8.1.2.3".parse::<GradleVersion>().is_err());
        assert!("8.1-".parse::<GradleVersion>().is_err());
    }

    #[test]
    fn orders_numerically_not_lexically() {
        assert!(v("4.10") > v("4.9"));
        assert!(v("10.0") > v("9.9.9"));
    }

    #[test]
    fn pre_release_sorts_before_release() {
        assert!(v("6.4-rc-1") < v("6.4"));
        assert!(v("6.4-rc-1") > v("6.3"));
    }

    #[test]
    fn suffix_numbers_compare_numerically() {
        assert!(v("8.1-rc-2") < v("8.1-rc-10"));
        assert!(v("8.0-milestone-9") < v("8.0-milestone-10"));
        assert!(v("8.1-rc-1") < v("8.1-rc-1.1"));
        assert!(v("8.1-rc-01") != v("8.1-rc-1"));
        assert_ne!(v("8.1-rc-01").cmp(&v("8.1-rc-1")), Ordering::Equal);
    }

    #[test]
    fn suffix_is_ignored_for_feature_checks() {
        assert!(v("6.4-rc-1").is_at_least(&v("6.4")));
        assert_eq!(v("6.4-rc-1").base_version(), v("6.4"));
    }

    #[test]
    fn display_round_trips_input_form() {
        assert_eq!(v("7.6").to_string(), "7.6");
        assert_eq!(v("7.6.1").to_string(), "7.6.1");
        assert_eq!(v("8.0-milestone-1").to_string(), "8.0-milestone-1");
    }

    #[test]
    fn serde_uses_string_form() {
        let json = serde_json::to_string(&v("7.4.2")).unwrap();
        assert_eq!(json, "\"7.4.2\"");
        let parsed: GradleVersion = serde_json::from_str("\"5.6\"").unwrap();
        assert_eq!(parsed, v("5.6"));
        assert!(serde_json::from_str::<GradleVersion>("\"five\"").is_err());
    }
}
