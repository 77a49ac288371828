use crate::areas::scenario::Scenario;
use crate::artifacts::diff::diff_unit::DiffUnit;
use crate::artifacts::diff::path_change::{ChangeKind, DiffFilter};
use crate::artifacts::diff_set::builder::{BuildOptions, DiffSetBuilder, DiffSetOutcome};
use crate::artifacts::diff_set::task::DiffSetTask;
use crate::artifacts::revision::endpoint::RevisionEndpoint;
use crate::artifacts::revision::repo_url::RepoUrl;
use crate::artifacts::revision::revision::Revision;
use colored::Colorize;
use derive_new::new;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// What to compare, as given on the command line.
#[derive(Debug, Clone, new)]
pub struct DiffArgs {
    left: String,
    right: String,
    left_url: Option<String>,
    right_url: Option<String>,
    roots: Vec<PathBuf>,
    diff_filter: Option<String>,
    options: BuildOptions,
}

impl Scenario {
    pub async fn diff(self, args: DiffArgs, writer: &mut dyn Write) -> anyhow::Result<()> {
        let filter = match &args.diff_filter {
            Some(filter) => DiffFilter::try_parse(filter)
                .ok_or_else(|| anyhow::anyhow!("invalid diff filter: {filter}"))?,
            None => DiffFilter::all(),
        };
        let left = self.endpoint(&args.left, args.left_url.as_deref())?;
        let right = self.endpoint(&args.right, args.right_url.as_deref())?;
        let roots = if args.roots.is_empty() {
            vec![self.working_copy.root().to_path_buf()]
        } else {
            args.roots
                .iter()
                .map(|root| self.working_copy.root().join(root))
                .collect()
        };

        let builder = DiffSetBuilder::new(
            Arc::new(self.repository),
            Arc::new(self.status_cache),
            self.working_copy,
            left,
            right,
        )
        .with_roots(roots)
        .with_options(args.options);

        let task = DiffSetTask::spawn(builder);
        let cancellation = task.cancellation().clone();
        let interrupt = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("interrupted, canceling the build");
                cancellation.cancel();
            }
        });
        let outcome = task.outcome().await;
        interrupt.abort();

        match outcome? {
            DiffSetOutcome::Canceled => writeln!(writer, "Canceled.")?,
            DiffSetOutcome::Completed(units) => {
                let units = units
                    .iter()
                    .filter(|unit| unit.kind().matches_filter(filter))
                    .collect::<Vec<_>>();

                if units.is_empty() {
                    writeln!(writer, "No changes.")?;
                }
                for unit in units {
                    Self::print_unit(unit, writer)?;
                }
            }
        }

        Ok(())
    }

    fn endpoint(&self, revision: &str, url: Option<&str>) -> anyhow::Result<RevisionEndpoint> {
        let location = match url {
            Some(url) => RepoUrl::try_parse(url)?,
            None => self.working_copy.url().clone(),
        };

        Ok(RevisionEndpoint::new(location, Revision::try_parse(revision)?))
    }

    fn print_unit(unit: &DiffUnit, writer: &mut dyn Write) -> anyhow::Result<()> {
        let status = unit.kind().status_char().to_string();
        let status = match unit.kind() {
            ChangeKind::Added => status.green(),
            ChangeKind::Deleted => status.red(),
            ChangeKind::Modified => status.yellow(),
            ChangeKind::Unchanged => status.normal(),
        };

        writeln!(
            writer,
            "{} {}  {} -> {}",
            status,
            unit.local_file().display(),
            unit.left_label(),
            unit.right_label()
        )?;

        Ok(())
    }
}
