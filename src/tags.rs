//! Release tag resolution
//!
//! Maps commit ids to the release versions tagged on them, and finds the
//! tag that bounds how far back the changelog goes.

use std::collections::HashMap;

use crate::config::Config;
use crate::domain::{parse_named_tag_line, ReleaseTagPattern, ReleaseVersion};
use crate::error::Result;
use crate::git::Repository;

/// Release lookup tables, built once before any output is written
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseTags {
    releases: HashMap<String, ReleaseVersion>,
    start: Option<String>,
}

impl ReleaseTags {
    /// Query `repo` for release tags and the start tag named in `config`
    pub fn resolve<R: Repository + ?Sized>(repo: &R, config: &Config) -> Result<Self> {
        let pattern = ReleaseTagPattern::new(config.release_tag_prefix.as_str())?;

        let releases = collect_releases(&repo.show_tag_refs(true)?, &pattern);
        tracing::debug!(
            count = releases.len(),
            prefix = pattern.prefix(),
            "resolved release tags"
        );

        let start = find_start_tag(&repo.show_tag_refs(false)?, &config.start_tag);
        if let Some(sha) = &start {
            tracing::debug!(tag = %config.start_tag, %sha, "found start tag");
        }

        Ok(ReleaseTags { releases, start })
    }

    /// Build lookup tables directly
    pub fn from_parts(releases: HashMap<String, ReleaseVersion>, start: Option<String>) -> Self {
        ReleaseTags { releases, start }
    }

    /// The release tagged on `sha`, if any
    pub fn release_for(&self, sha: &str) -> Option<&ReleaseVersion> {
        self.releases.get(sha)
    }

    /// Commit id of the start tag, if the repository has one
    pub fn start(&self) -> Option<&str> {
        self.start.as_deref()
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

/// Map every matching ref line to its version; later lines win
pub fn collect_releases<S: AsRef<str>>(
    lines: &[S],
    pattern: &ReleaseTagPattern,
) -> HashMap<String, ReleaseVersion> {
    lines
        .iter()
        .filter_map(|line| pattern.parse_line(line.as_ref()))
        .collect()
}

/// First ref line naming exactly `refs/tags/<tag_name>`
pub fn find_start_tag<S: AsRef<str>>(lines: &[S], tag_name: &str) -> Option<String> {
    lines
        .iter()
        .find_map(|line| parse_named_tag_line(line.as_ref(), tag_name))
}
