//! Domain types - pure parsing rules independent of how git is invoked

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::CommitBlock;
pub use tag::{parse_named_tag_line, ReleaseTagPattern};
pub use version::ReleaseVersion;
