use crate::artifacts::core::error::{DiffSetError, DiffSetResult};
use crate::artifacts::revision::{REVISION_ALIASES, REVISION_NUMBER_REGEX, WORKING_COPY_LABEL};
use std::fmt;

/// The revision half of a comparison endpoint.
///
/// Supported spellings:
/// - `HEAD` (alias `@`): the newest revision in the repository
/// - `BASE` (alias `PRISTINE`): the last-synchronized copy of each local path
/// - `WORKING` (aliases `WC`, `LOCAL`): the live, possibly modified local files
/// - `42` or `r42`: a fixed repository revision
///
/// `BASE` and `WORKING` only make sense per local path, so they are resolved
/// to a [`RemoteRevision`] before anything is sent to the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Revision {
    Number(u64),
    Head,
    Base,
    Working,
}

impl Revision {
    pub fn try_parse(revision: &str) -> DiffSetResult<Self> {
        let upper = revision.trim().to_ascii_uppercase();
        let canonical = REVISION_ALIASES
            .get(upper.as_str())
            .copied()
            .unwrap_or(upper.as_str());

        match canonical {
            "HEAD" => return Ok(Revision::Head),
            "BASE" => return Ok(Revision::Base),
            "WORKING" => return Ok(Revision::Working),
            _ => {}
        }

        let number_regex = regex::Regex::new(REVISION_NUMBER_REGEX).map_err(|e| {
            DiffSetError::InvalidEndpoint(format!(
                "invalid revision regex {REVISION_NUMBER_REGEX}: {e}"
            ))
        })?;
        let caps = number_regex.captures(canonical).ok_or_else(|| {
            DiffSetError::InvalidEndpoint(format!("unknown revision '{}'", revision.trim()))
        })?;
        let number = caps[1].parse::<u64>().map_err(|e| {
            DiffSetError::InvalidEndpoint(format!("revision '{}' out of range: {e}", revision.trim()))
        })?;

        Ok(Revision::Number(number))
    }

    pub fn is_working(&self) -> bool {
        matches!(self, Revision::Working)
    }

    pub fn to_remote(self) -> Option<RemoteRevision> {
        match self {
            Revision::Number(number) => Some(RemoteRevision::Number(number)),
            Revision::Head => Some(RemoteRevision::Head),
            Revision::Base | Revision::Working => None,
        }
    }

    /// Human readable label of this side; `resolved` is the number `BASE`
    /// resolved to for the path being shown, if any.
    pub fn label(&self, resolved: Option<u64>) -> String {
        match (self, resolved) {
            (Revision::Working, _) => WORKING_COPY_LABEL.to_string(),
            (Revision::Base, Some(number)) => format!("Base (r{number})"),
            (Revision::Base, None) => "Base".to_string(),
            (Revision::Head, _) => "HEAD".to_string(),
            (Revision::Number(number), _) => format!("r{number}"),
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::Number(number) => write!(f, "{number}"),
            Revision::Head => write!(f, "HEAD"),
            Revision::Base => write!(f, "BASE"),
            Revision::Working => write!(f, "WORKING"),
        }
    }
}

/// A revision the remote repository can answer queries for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RemoteRevision {
    Number(u64),
    Head,
}

impl RemoteRevision {
    pub fn number(&self) -> Option<u64> {
        match self {
            RemoteRevision::Number(number) => Some(*number),
            RemoteRevision::Head => None,
        }
    }
}

impl From<RemoteRevision> for Revision {
    fn from(revision: RemoteRevision) -> Self {
        match revision {
            RemoteRevision::Number(number) => Revision::Number(number),
            RemoteRevision::Head => Revision::Head,
        }
    }
}

impl fmt::Display for RemoteRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&Revision::from(*self), f)
    }
}
