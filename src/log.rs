//! Reading the sentinel-delimited `git log` stream.
//!
//! Every commit is printed as a start sentinel carrying its id, the header
//! and message lines, an end sentinel, then the paths it touched:
//!
//! ```text
//! --START-COMMIT--<sha>
//! 2008-05-13 07:10:28 +0000  Alice <a@example.com>
//!
//! Fix leak
//! <body>
//! --END-COMMIT--
//! src/foo.c
//! ```

use std::io::Write;

use crate::domain::CommitBlock;
use crate::error::Result;
use crate::formatter::ChangelogWriter;
use crate::tags::ReleaseTags;

pub const START_SENTINEL: &str = "--START-COMMIT--";
pub const END_SENTINEL: &str = "--END-COMMIT--";

/// `git log` pretty format producing the stream described above
pub const LOG_FORMAT: &str =
    "--pretty=format:--START-COMMIT--%H%n%ai  %an <%ae>%n%n%s%n%b%n--END-COMMIT--";

/// Build the `git log` argument list
///
/// With a start tag the caller's arguments are replaced by `<start>..HEAD`.
pub fn log_args(release_tags: &ReleaseTags, caller_args: &[String]) -> Vec<String> {
    let mut args = vec![
        LOG_FORMAT.to_string(),
        "--date=short".to_string(),
        "--name-only".to_string(),
    ];

    match release_tags.start() {
        Some(start) => {
            if !caller_args.is_empty() {
                tracing::warn!(
                    ignored = ?caller_args,
                    "start tag present, ignoring git log arguments"
                );
            }
            args.push(format!("{}..HEAD", start));
        }
        None => args.extend(caller_args.iter().cloned()),
    }

    args
}

/// Where non-sentinel lines go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectState {
    /// Header and message lines
    Body,
    /// Paths after the end sentinel
    Files,
}

/// Splits the log stream into commit blocks and writes each one as soon as
/// the next commit starts
pub struct LogReader<'a, W: Write> {
    release_tags: &'a ReleaseTags,
    writer: ChangelogWriter<'a, W>,
    block: CommitBlock,
    state: CollectState,
    releases_marked: usize,
}

impl<'a, W: Write> LogReader<'a, W> {
    pub fn new(release_tags: &'a ReleaseTags, writer: ChangelogWriter<'a, W>) -> Self {
        LogReader {
            release_tags,
            writer,
            block: CommitBlock::default(),
            state: CollectState::Body,
            releases_marked: 0,
        }
    }

    pub fn state(&self) -> CollectState {
        self.state
    }

    /// Feed one line of log output, without its newline
    pub fn feed_line(&mut self, line: &str) -> Result<()> {
        if let Some(rest) = line.strip_prefix(START_SENTINEL) {
            self.flush()?;

            let hash = rest.trim();
            if let Some(version) = self.release_tags.release_for(hash) {
                self.writer.write_release_marker(version)?;
                self.releases_marked += 1;
            }

            self.block = CommitBlock::new(hash);
            self.state = CollectState::Body;
        } else if line.starts_with(END_SENTINEL) {
            self.state = CollectState::Files;
        } else {
            match self.state {
                CollectState::Files => self.block.push_file(line),
                CollectState::Body => self.block.push_line(line),
            }
        }

        Ok(())
    }

    /// Write out the last block and return the sink with run totals
    pub fn finish(mut self) -> Result<(W, LogTotals)> {
        self.flush()?;
        let totals = LogTotals {
            stanzas: self.writer.stanzas(),
            releases: self.releases_marked,
        };
        Ok((self.writer.finish()?, totals))
    }

    fn flush(&mut self) -> Result<()> {
        if self.block.has_lines() {
            let block = std::mem::take(&mut self.block);
            self.writer.write_stanza(&block)?;
        }
        Ok(())
    }
}

/// What one run wrote
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogTotals {
    pub stanzas: usize,
    pub releases: usize,
}
