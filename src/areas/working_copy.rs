use crate::artifacts::core::error::{DiffSetError, DiffSetResult};
use crate::artifacts::revision::repo_url::RepoUrl;
use derive_new::new;
use std::path::{Component, Path, PathBuf};

/// A checked-out tree: the local directory and the repository location it tracks.
///
/// Maps local paths to the `/`-separated relative paths joined onto each endpoint's
/// location, so both sides of a comparison may live at different repository paths.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct WorkingCopy {
    root: PathBuf,
    url: RepoUrl,
}

impl WorkingCopy {
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn url(&self) -> &RepoUrl {
        &self.url
    }

    pub fn relative_path(&self, file: &Path) -> DiffSetResult<String> {
        let relative = file.strip_prefix(&self.root).map_err(|_| {
            DiffSetError::InvalidEndpoint(format!(
                "{} is outside of the working copy {}",
                file.display(),
                self.root.display()
            ))
        })?;

        relative
            .components()
            .map(|component| match component {
                Component::Normal(segment) => Ok(segment.to_string_lossy().to_string()),
                other => Err(DiffSetError::InvalidEndpoint(format!(
                    "unsupported path component {:?} in {}",
                    other,
                    file.display()
                ))),
            })
            .collect::<DiffSetResult<Vec<_>>>()
            .map(|segments| segments.join("/"))
    }
}
