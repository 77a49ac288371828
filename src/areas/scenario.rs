//! Scenario files
//!
//! A scenario describes a repository history, a working copy and the local status of
//! its paths in TOML, and loads them into the in-memory collaborators:
//!
//! ```toml
//! repository = "svn://host/repo"
//!
//! [working_copy]
//! root = "/proj"
//! url = "svn://host/repo/trunk"
//!
//! [[revisions]]
//! files = { "trunk/a.txt" = "one", "trunk/b.txt" = "two" }
//!
//! [[local]]
//! path = "a.txt"
//! status = "modified"
//! revision = 1
//! ```

use crate::areas::memory::{MemoryNode, MemoryRepository, MemoryStatusCache, Snapshot};
use crate::areas::working_copy::WorkingCopy;
use crate::artifacts::diff::path_change::local_path;
use crate::artifacts::revision::repo_url::RepoUrl;
use crate::artifacts::status::local_status::{LocalStatus, LocalStatusInfo};
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScenarioFile {
    repository: String,
    working_copy: WorkingCopySpec,
    #[serde(default)]
    revisions: Vec<RevisionSpec>,
    #[serde(default)]
    local: Vec<LocalEntrySpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WorkingCopySpec {
    root: PathBuf,
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RevisionSpec {
    #[serde(default)]
    files: BTreeMap<String, String>,
    #[serde(default)]
    directories: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LocalEntrySpec {
    path: String,
    status: String,
    revision: Option<u64>,
    #[serde(default)]
    directory: bool,
    #[serde(default)]
    copied: bool,
    url: Option<String>,
}

#[derive(Debug)]
pub struct Scenario {
    pub repository: MemoryRepository,
    pub status_cache: MemoryStatusCache,
    pub working_copy: WorkingCopy,
}

impl Scenario {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;

        Self::parse(&raw).with_context(|| format!("invalid scenario {}", path.display()))
    }

    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let file: ScenarioFile = toml::from_str(raw)?;

        let mut repository = MemoryRepository::new(RepoUrl::try_parse(&file.repository)?);
        for revision in file.revisions {
            let mut snapshot = revision
                .files
                .into_iter()
                .map(|(path, content)| (path, MemoryNode::File(content)))
                .collect::<Snapshot>();
            snapshot.extend(
                revision
                    .directories
                    .into_iter()
                    .map(|path| (path, MemoryNode::Directory)),
            );
            repository.commit_snapshot(snapshot);
        }

        let working_copy = WorkingCopy::new(
            file.working_copy.root,
            RepoUrl::try_parse(&file.working_copy.url)?,
        );

        let mut status_cache = MemoryStatusCache::new();
        for entry in file.local {
            let status = LocalStatus::try_parse(&entry.status)
                .ok_or_else(|| anyhow::anyhow!("unknown status '{}' for {}", entry.status, entry.path))?;
            let url = entry.url.as_deref().map(RepoUrl::try_parse).transpose()?;
            let info = LocalStatusInfo::new(status, entry.directory, entry.copied, entry.revision, url);

            status_cache.insert(local_path(working_copy.root(), &entry.path), info);
        }

        Ok(Self {
            repository,
            status_cache,
            working_copy,
        })
    }
}
