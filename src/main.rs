use anyhow::Result;
use clap::Parser;
use diffset::areas::scenario::Scenario;
use diffset::artifacts::diff_set::builder::BuildOptions;
use diffset::commands::diff::DiffArgs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "diffset",
    version = "0.1.0",
    about = "Compute the set of changed paths between two revisions",
    long_about = "This command computes which paths differ between two revision endpoints \
    of a working copy (a repository revision, the pristine BASE copy or the live WORKING copy) \
    and prints one line per change with the labels each side would be shown under.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(index = 1, help = "The scenario file describing repository, working copy and local status")]
    scenario: PathBuf,
    #[arg(long, default_value = "BASE", help = "The left revision (HEAD, BASE, WORKING, <n>)")]
    left: String,
    #[arg(long, default_value = "WORKING", help = "The right revision (HEAD, BASE, WORKING, <n>)")]
    right: String,
    #[arg(long, help = "Repository location of the left side, defaults to the working copy url")]
    left_url: Option<String>,
    #[arg(long, help = "Repository location of the right side, defaults to the working copy url")]
    right_url: Option<String>,
    #[arg(long = "root", help = "A path inside the working copy to compare, may be repeated")]
    roots: Vec<PathBuf>,
    #[arg(long, help = "Only show changes of the given kinds (A, D, M)")]
    diff_filter: Option<String>,
    #[arg(long, help = "Always hide deletions below a deleted directory")]
    no_reverted_heuristic: bool,
    #[arg(long, help = "Do not report directories")]
    no_dirs: bool,
    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase logging verbosity")]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    let options = BuildOptions {
        keep_locally_reverted_deletions: !cli.no_reverted_heuristic,
        include_directories: !cli.no_dirs,
    };
    let args = DiffArgs::new(
        cli.left,
        cli.right,
        cli.left_url,
        cli.right_url,
        cli.roots,
        cli.diff_filter,
        options,
    );

    let scenario = Scenario::load(&cli.scenario)?;
    scenario.diff(args, &mut std::io::stdout()).await
}
