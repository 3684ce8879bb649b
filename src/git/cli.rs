use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use git2::Repository as Git2Repo;

use crate::error::{ChangelogError, Result};

/// Runs the `git` binary inside a work tree
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Discover the repository containing `path`
    ///
    /// Commands run from the work tree root, or from the git directory of a
    /// bare repository.
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        let workdir = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(GitCli { workdir })
    }

    /// Use `workdir` as-is, without checking that it is a repository
    pub fn from_workdir(workdir: impl Into<PathBuf>) -> Self {
        GitCli {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn command(&self, subcommand: &str) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg(subcommand).current_dir(&self.workdir);
        cmd
    }
}

impl super::Repository for GitCli {
    fn show_tag_refs(&self, dereference: bool) -> Result<Vec<String>> {
        let mut cmd = self.command("show-ref");
        cmd.arg("--tags");
        if dereference {
            cmd.arg("--dereference");
        }
        tracing::debug!(?cmd, "listing tag refs");

        let output = cmd
            .output()
            .map_err(|e| ChangelogError::process(format!("Failed to run git show-ref: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);

        // show-ref exits with 1 when there is nothing to show
        if !output.status.success() && !(output.status.code() == Some(1) && stdout.is_empty()) {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ChangelogError::process(format!(
                "git show-ref failed with exit code {}\nStderr: {}",
                output.status.code().unwrap_or(-1),
                stderr.trim_end()
            )));
        }

        Ok(stdout.lines().map(str::to_string).collect())
    }

    fn log(&self, args: &[String], on_line: &mut dyn FnMut(&str) -> Result<()>) -> Result<()> {
        let mut cmd = self.command("log");
        cmd.args(args).stdout(Stdio::piped()).stderr(Stdio::inherit());
        tracing::debug!(?cmd, "spawning git log");

        let mut child = cmd
            .spawn()
            .map_err(|e| ChangelogError::process(format!("Failed to run git log: {}", e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ChangelogError::process("git log stdout was not captured"))?;
        let mut reader = BufReader::new(stdout);
        let mut raw = Vec::new();

        loop {
            raw.clear();
            let read = match reader.read_until(b'\n', &mut raw) {
                Ok(read) => read,
                Err(e) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(e.into());
                }
            };
            if read == 0 {
                break;
            }

            let decoded = String::from_utf8_lossy(&raw);
            let line = decoded.strip_suffix('\n').unwrap_or(decoded.as_ref());
            if let Err(e) = on_line(line) {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e);
            }
        }

        let status = child.wait()?;
        if !status.success() {
            return Err(ChangelogError::process(format!(
                "git log failed with exit code {}",
                status.code().unwrap_or(-1)
            )));
        }

        Ok(())
    }
}
