use regex::Regex;

use crate::domain::ReleaseVersion;
use crate::error::{ChangelogError, Result};

/// Matches `git show-ref` lines naming release tags
/// (e.g., `<sha> refs/tags/GNET-1.2.3` or `<sha> refs/tags/GNET-1_2-3^{}`)
#[derive(Debug, Clone)]
pub struct ReleaseTagPattern {
    prefix: String,
    regex: Regex,
}

impl ReleaseTagPattern {
    /// Build the pattern for tags named `<prefix>-MAJOR[-_.]MINOR[-_.]PATCH`
    ///
    /// The prefix is matched literally. Only the start of the line is
    /// anchored, so the `^{}` line git prints for a dereferenced annotated
    /// tag matches as well and maps the tagged commit.
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(ChangelogError::config("Release tag prefix must not be empty"));
        }

        let pattern = format!(
            r"^([0-9a-f]{{40}}) refs/tags/{}-([0-9]+)[-_.]([0-9]+)[-_.]([0-9]+)",
            regex::escape(&prefix)
        );
        let regex = Regex::new(&pattern)
            .map_err(|e| ChangelogError::config(format!("Invalid tag prefix '{}': {}", prefix, e)))?;

        Ok(ReleaseTagPattern { prefix, regex })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Extract the commit id and version from one `show-ref` line
    ///
    /// Returns `None` for lines that do not name a release tag.
    pub fn parse_line(&self, line: &str) -> Option<(String, ReleaseVersion)> {
        let captures = self.regex.captures(line)?;
        let sha = captures.get(1)?.as_str().to_string();
        let version = ReleaseVersion::new(
            captures.get(2)?.as_str(),
            captures.get(3)?.as_str(),
            captures.get(4)?.as_str(),
        );
        Some((sha, version))
    }
}

/// Extract the commit id from a `show-ref` line for exactly `refs/tags/<tag_name>`
pub fn parse_named_tag_line(line: &str, tag_name: &str) -> Option<String> {
    let (sha, reference) = line.trim_end().split_once(' ')?;
    let is_object_id = sha.len() == 40
        && sha
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));

    if is_object_id && reference.strip_prefix("refs/tags/") == Some(tag_name) {
        Some(sha.to_string())
    } else {
        None
    }
}
