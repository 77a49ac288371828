use crate::artifacts::core::error::{DiffSetError, DiffSetResult};
use crate::artifacts::revision::REPO_URL_REGEX;
use std::fmt;

/// A location inside a remote repository, e.g. `svn://host/repo/trunk/src`.
///
/// Stored without a trailing separator so that equal locations compare equal
/// regardless of how they were spelled.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RepoUrl(String);

impl RepoUrl {
    pub fn try_parse(raw: &str) -> DiffSetResult<Self> {
        let trimmed = raw.trim().trim_end_matches('/');

        let pattern = regex::Regex::new(REPO_URL_REGEX).map_err(|e| {
            DiffSetError::InvalidEndpoint(format!("invalid url regex {REPO_URL_REGEX}: {e}"))
        })?;

        if !pattern.is_match(trimmed) {
            return Err(DiffSetError::InvalidEndpoint(format!(
                "invalid repository url: {raw}"
            )));
        }
        if trimmed.split('/').any(|segment| segment == "..") {
            return Err(DiffSetError::InvalidEndpoint(format!(
                "repository url must not contain '..': {raw}"
            )));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Appends a `/`-separated relative path; an empty path yields the same location.
    pub fn join(&self, relative: &str) -> Self {
        let relative = relative.trim_matches('/');
        if relative.is_empty() {
            return self.clone();
        }

        Self(format!("{}/{}", self.0, relative))
    }

    /// The enclosing location, or `None` once only the authority is left.
    pub fn parent(&self) -> Option<Self> {
        let authority_end = self.authority_end();
        let path = &self.0[authority_end..];

        path.rfind('/')
            .map(|idx| Self(self.0[..authority_end + idx].to_string()))
    }

    /// This location followed by every enclosing location, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = RepoUrl> {
        std::iter::successors(Some(self.clone()), RepoUrl::parent)
    }

    /// The `/`-separated path leading from `base` to this location.
    pub fn relative_to(&self, base: &RepoUrl) -> Option<String> {
        if self == base {
            return Some(String::new());
        }

        self.0
            .strip_prefix(base.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .map(str::to_string)
    }

    pub fn is_descendant_of(&self, ancestor: &RepoUrl) -> bool {
        self != ancestor && self.relative_to(ancestor).is_some()
    }

    fn authority_end(&self) -> usize {
        let after_scheme = self.0.find("://").map(|idx| idx + 3).unwrap_or(0);

        self.0[after_scheme..]
            .find('/')
            .map(|idx| after_scheme + idx)
            .unwrap_or(self.0.len())
    }
}

impl fmt::Display for RepoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
