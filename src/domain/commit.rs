/// Raw text of one commit as read from the log stream
///
/// `lines` holds the header, subject and body lines; `files` the paths
/// listed after the end sentinel. Both are kept exactly as read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitBlock {
    pub hash: Option<String>,
    pub lines: Vec<String>,
    pub files: Vec<String>,
}

impl CommitBlock {
    /// Start an empty block for the given commit id
    pub fn new(hash: impl Into<String>) -> Self {
        CommitBlock {
            hash: Some(hash.into()),
            ..Default::default()
        }
    }

    /// Build a block directly from its lines and files
    pub fn from_parts<L, F>(lines: L, files: F) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        CommitBlock {
            hash: None,
            lines: lines.into_iter().map(Into::into).collect(),
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn push_file(&mut self, file: impl Into<String>) {
        self.files.push(file.into());
    }

    /// A block is flushed only once it has collected message lines
    pub fn has_lines(&self) -> bool {
        !self.lines.is_empty()
    }

    /// Message lines with `git-svn-id` trailers and blank lines removed,
    /// each trimmed
    pub fn content_lines(&self) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|line| !line.starts_with("git-svn-id"))
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Non-blank file paths, trimmed, in log order
    pub fn file_paths(&self) -> Vec<&str> {
        self.files
            .iter()
            .map(|file| file.trim())
            .filter(|file| !file.is_empty())
            .collect()
    }
}
