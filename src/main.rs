use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use gen_changelog::cli::{run_changelog, split_git_separator, ChangelogArgs};
use gen_changelog::git::GitCli;
use gen_changelog::{config, ui, ChangelogError};

/// Options are long-only so they never shadow `git log` short flags;
/// clap's `-h` and `-V` are replaced by long-only `--help` and `--version`.
#[derive(clap::Parser)]
#[command(
    name = "gen-changelog",
    version,
    about = "Generate a GNU-style ChangeLog from git history",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Args {
    #[arg(long, action = ArgAction::Help, help = "Print help")]
    #[allow(dead_code)]
    help: Option<bool>,

    #[arg(long, action = ArgAction::Version, help = "Print version")]
    #[allow(dead_code)]
    version: Option<bool>,

    #[arg(long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Path inside the git work tree to read")]
    repo: Option<String>,

    #[arg(long, help = "Release tag prefix, as in PREFIX-1.2.3")]
    tag_prefix: Option<String>,

    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        help = "Arguments passed to git log (ignored when the start tag exists)"
    )]
    git_args: Vec<String>,
}

impl From<Args> for ChangelogArgs {
    fn from(args: Args) -> Self {
        ChangelogArgs {
            config_path: args.config,
            repo_path: args.repo,
            tag_prefix: args.tag_prefix,
            git_args: args.git_args,
        }
    }
}

fn main() {
    init_tracing();

    let args = parse_command_line(std::env::args().collect()).unwrap_or_else(|e| e.exit());

    if let Err(e) = run(&args) {
        if is_broken_pipe(&e) {
            return;
        }
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Parse our own options, then hand `--` and everything after it to
/// `git log` exactly as given.
fn parse_command_line(argv: Vec<String>) -> std::result::Result<ChangelogArgs, clap::Error> {
    let (own, passthrough) = split_git_separator(argv);
    let mut args: ChangelogArgs = Args::try_parse_from(own)?.into();
    args.git_args.extend(passthrough);
    Ok(args)
}

fn run(args: &ChangelogArgs) -> Result<()> {
    let config = config::load_config(args.config_path.as_deref())
        .context("Error loading config")?;
    let config = args.apply_overrides(config);

    let repo_path = args.repo_path.as_deref().unwrap_or(".");
    let repo = GitCli::discover(repo_path)
        .with_context(|| format!("Not in a git repository: {}", repo_path))?;

    let stdout = io::stdout();
    let out = BufWriter::new(stdout.lock());
    let summary = run_changelog(&repo, &config, &args.git_args, out)?;

    tracing::info!(
        stanzas = summary.stanzas,
        releases = summary.releases_marked,
        bounded = summary.bounded_by_start_tag,
        "done"
    );
    Ok(())
}

/// Console logging on stderr, controlled by RUST_LOG (default: warn).
/// stdout carries the ChangeLog itself.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// A reader such as `head` closing the pipe early is not a failure.
fn is_broken_pipe(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<ChangelogError>(),
        Some(ChangelogError::Io(io_err)) if io_err.kind() == io::ErrorKind::BrokenPipe
    )
}
