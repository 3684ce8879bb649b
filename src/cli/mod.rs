pub mod orchestration;

pub use orchestration::{run_changelog, split_git_separator, ChangelogArgs, ChangelogSummary};
