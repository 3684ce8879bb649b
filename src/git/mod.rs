//! Git access layer
//!
//! The changelog pipeline only needs two things from git: the tag refs
//! (`git show-ref`) and a formatted history (`git log`). The [Repository]
//! trait abstracts both so the pipeline can run against a real work tree
//! or a canned one.
//!
//! - [cli::GitCli]: runs the `git` binary in a discovered work tree
//! - [mock::MockRepository]: replays fixed output for tests
//!
//! ```rust,no_run
//! # use gen_changelog::git::{GitCli, Repository};
//! # fn example() -> gen_changelog::Result<()> {
//! let repo = GitCli::discover(".")?;
//! for line in repo.show_tag_refs(true)? {
//!     println!("{}", line);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod mock;

pub use cli::GitCli;
pub use mock::MockRepository;

use crate::error::Result;

/// Source of tag refs and log output
pub trait Repository {
    /// Lines of `git show-ref --tags`, with `--dereference` when asked
    ///
    /// Each line has the form `<40-hex id> refs/tags/<name>`; dereferenced
    /// annotated tags add a second line ending in `^{}`. A repository
    /// without tags yields an empty list.
    fn show_tag_refs(&self, dereference: bool) -> Result<Vec<String>>;

    /// Run `git log` with the given arguments, handing each output line
    /// (without its newline) to `on_line` as it is read
    ///
    /// Stops at the first error returned by `on_line`. Fails if the
    /// command cannot be started or exits unsuccessfully.
    fn log(&self, args: &[String], on_line: &mut dyn FnMut(&str) -> Result<()>) -> Result<()>;
}
