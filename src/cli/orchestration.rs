//! Main changelog workflow
//!
//! Wires the tag resolver, the log reader and the stanza writer together.
//! Kept apart from `main.rs` so the whole pipeline can run against any
//! [Repository] and any output sink without depending on clap.

use std::io::Write;

use crate::config::Config;
use crate::error::Result;
use crate::formatter::ChangelogWriter;
use crate::git::Repository;
use crate::log::{log_args, LogReader, LogTotals};
use crate::tags::ReleaseTags;

/// Arguments for the changelog workflow
///
/// Mirrors the CLI Args in a form suitable for programmatic calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangelogArgs {
    /// Path to custom config file
    pub config_path: Option<String>,

    /// Path inside the work tree to read
    pub repo_path: Option<String>,

    /// Overrides the configured release tag prefix
    pub tag_prefix: Option<String>,

    /// Arguments forwarded to `git log`
    pub git_args: Vec<String>,
}

impl ChangelogArgs {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(prefix) = &self.tag_prefix {
            config.release_tag_prefix = prefix.clone();
        }
        config
    }
}

/// Split the raw command line at the first `--` after the program name
///
/// The part before goes to the option parser. The `--` and everything
/// after it belong to `git log` and are returned untouched, so pathspecs
/// naming files that no longer exist still reach git as paths.
pub fn split_git_separator(argv: Vec<String>) -> (Vec<String>, Vec<String>) {
    match argv.iter().skip(1).position(|arg| arg == "--") {
        Some(index) => {
            let mut own = argv;
            let passthrough = own.split_off(index + 1);
            (own, passthrough)
        }
        None => (argv, Vec::new()),
    }
}

/// Result of a successful changelog run
#[derive(Debug, Clone, PartialEq)]
pub struct ChangelogSummary {
    /// Stanzas written
    pub stanzas: usize,

    /// Release markers written
    pub releases_marked: usize,

    /// Release tags known to the resolver
    pub releases_known: usize,

    /// Whether the history was bounded by the start tag
    pub bounded_by_start_tag: bool,
}

/// Generate the changelog for `repo` into `out`
///
/// 1. Resolve release tags and the start tag
/// 2. Run `git log`, streaming each commit to the stanza writer
/// 3. Flush the output
///
/// Stanzas are written as soon as each commit is complete; nothing is
/// buffered beyond the commit being read and the sink's own buffer.
pub fn run_changelog<R, W>(
    repo: &R,
    config: &Config,
    git_args: &[String],
    out: W,
) -> Result<ChangelogSummary>
where
    R: Repository + ?Sized,
    W: Write,
{
    let release_tags = ReleaseTags::resolve(repo, config)?;
    let args = log_args(&release_tags, git_args);

    let writer = ChangelogWriter::new(out, &config.author_rewrites);
    let mut reader = LogReader::new(&release_tags, writer);

    repo.log(&args, &mut |line: &str| reader.feed_line(line))?;

    let (_, LogTotals { stanzas, releases }) = reader.finish()?;
    tracing::debug!(stanzas, releases, "changelog written");

    Ok(ChangelogSummary {
        stanzas,
        releases_marked: releases,
        releases_known: release_tags.len(),
        bounded_by_start_tag: release_tags.start().is_some(),
    })
}
