//! GNU ChangeLog stanza formatting.
//!
//! A stanza is written as:
//!
//! ```text
//! 2008-05-13  Alice <a@example.com>
//!
//! 	Fix leak
//! 	* src/foo.c:
//!
//! ```
//!
//! The subject line is skipped when the message opens with a bullet, the
//! file list is skipped when the message already carries `* ` entries, and
//! the body is written from the first bullet onwards.

use std::collections::HashMap;
use std::io::Write;

use crate::domain::{CommitBlock, ReleaseVersion};
use crate::error::Result;

/// Writes stanzas and release markers to an output sink
pub struct ChangelogWriter<'a, W: Write> {
    out: W,
    author_rewrites: &'a HashMap<String, String>,
    stanzas: usize,
}

impl<'a, W: Write> ChangelogWriter<'a, W> {
    pub fn new(out: W, author_rewrites: &'a HashMap<String, String>) -> Self {
        ChangelogWriter {
            out,
            author_rewrites,
            stanzas: 0,
        }
    }

    /// Write `=== release X.Y.Z ===` followed by a blank line
    pub fn write_release_marker(&mut self, version: &ReleaseVersion) -> Result<()> {
        writeln!(self.out, "=== release {} ===", version)?;
        writeln!(self.out)?;
        Ok(())
    }

    /// Write one stanza for `block`
    ///
    /// A block with no content lines writes nothing.
    pub fn write_stanza(&mut self, block: &CommitBlock) -> Result<()> {
        let lines = block.content_lines();
        let Some((header, rest)) = lines.split_first() else {
            tracing::warn!(hash = ?block.hash, "skipping commit with an empty message");
            return Ok(());
        };

        let has_file_bullets = lines.iter().any(|line| line.starts_with("* "));

        writeln!(self.out, "{}", normalize_header(header, self.author_rewrites))?;
        writeln!(self.out)?;

        if let Some(subject) = rest.first().filter(|line| !line.starts_with('*')) {
            writeln!(self.out, "\t{}", subject)?;
        }

        if !has_file_bullets {
            for file in block.file_paths() {
                writeln!(self.out, "\t* {}:", file)?;
            }
            writeln!(self.out)?;
        }

        if let Some(first_bullet) = rest.iter().position(|line| line.starts_with('*')) {
            for line in &rest[first_bullet..] {
                if line.starts_with("Signed-off-by:") {
                    continue;
                }
                writeln!(self.out, "\t{}", line)?;
            }
            writeln!(self.out)?;
        }

        self.stanzas += 1;
        Ok(())
    }

    /// Number of stanzas written so far
    pub fn stanzas(&self) -> usize {
        self.stanzas
    }

    /// Flush and hand back the sink
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// Reduce a `DATE TIME OFFSET  NAME <EMAIL>` header to `DATE  NAME <EMAIL>`
///
/// Fields are split on single spaces, so the double space after the offset
/// survives as an empty field and the result keeps it. A third field
/// starting with `+` or `-` is dropped, then a second field shaped like
/// `HH:MM:SS`. A trailing field listed in `author_rewrites` is replaced.
pub fn normalize_header(line: &str, author_rewrites: &HashMap<String, String>) -> String {
    let mut fields: Vec<&str> = line.split(' ').collect();

    if fields
        .get(2)
        .is_some_and(|field| field.starts_with('+') || field.starts_with('-'))
    {
        fields.remove(2);
    }
    if fields.get(1).is_some_and(|field| is_clock_time(field)) {
        fields.remove(1);
    }

    if let Some(last) = fields.last_mut() {
        if let Some(replacement) = author_rewrites.get(*last) {
            *last = replacement.as_str();
        }
    }

    fields.join(" ").trim().to_string()
}

fn is_clock_time(field: &str) -> bool {
    let mut chars = field.chars();
    chars.nth(2) == Some(':') && chars.nth(2) == Some(':')
}
