use std::cell::RefCell;

use crate::error::{ChangelogError, Result};
use crate::git::Repository;

/// Mock repository for testing without running git
#[derive(Default)]
pub struct MockRepository {
    tag_refs: Vec<String>,
    dereferenced_refs: Vec<String>,
    log_output: String,
    log_exit_code: Option<i32>,
    log_calls: RefCell<Vec<Vec<String>>>,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag ref line as both `show-ref --tags` and
    /// `show-ref --tags --dereference` would print it
    pub fn add_tag(&mut self, sha: &str, name: &str) {
        let line = format!("{} refs/tags/{}", sha, name);
        self.tag_refs.push(line.clone());
        self.dereferenced_refs.push(line);
    }

    /// Add an annotated tag: the tag object id is listed plainly, and the
    /// dereferenced listing adds the `^{}` line for the tagged commit
    pub fn add_annotated_tag(&mut self, tag_object: &str, commit: &str, name: &str) {
        let line = format!("{} refs/tags/{}", tag_object, name);
        self.tag_refs.push(line.clone());
        self.dereferenced_refs.push(line);
        self.dereferenced_refs
            .push(format!("{} refs/tags/{}^{{}}", commit, name));
    }

    /// Add a raw line to the dereferenced listing only
    pub fn add_raw_ref_line(&mut self, line: impl Into<String>) {
        self.dereferenced_refs.push(line.into());
    }

    /// Set the text `git log` prints
    pub fn set_log_output(&mut self, output: impl Into<String>) {
        self.log_output = output.into();
    }

    /// Make `git log` fail with the given exit code after printing its output
    pub fn fail_log_with(&mut self, exit_code: i32) {
        self.log_exit_code = Some(exit_code);
    }

    /// Arguments of every `log` call so far
    pub fn log_calls(&self) -> Vec<Vec<String>> {
        self.log_calls.borrow().clone()
    }
}

impl Repository for MockRepository {
    fn show_tag_refs(&self, dereference: bool) -> Result<Vec<String>> {
        if dereference {
            Ok(self.dereferenced_refs.clone())
        } else {
            Ok(self.tag_refs.clone())
        }
    }

    fn log(&self, args: &[String], on_line: &mut dyn FnMut(&str) -> Result<()>) -> Result<()> {
        self.log_calls.borrow_mut().push(args.to_vec());

        for line in self.log_output.lines() {
            on_line(line)?;
        }

        match self.log_exit_code {
            Some(code) => Err(ChangelogError::process(format!(
                "git log failed with exit code {}",
                code
            ))),
            None => Ok(()),
        }
    }
}
