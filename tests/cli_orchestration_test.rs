// tests/cli_orchestration_test.rs
use gen_changelog::cli::{run_changelog, ChangelogArgs, ChangelogSummary};
use gen_changelog::config::Config;
use gen_changelog::git::MockRepository;
use gen_changelog::ChangelogError;

const HEAD: &str = "3333333333333333333333333333333333333333";
const MIDDLE: &str = "2222222222222222222222222222222222222222";
const ROOT: &str = "1111111111111111111111111111111111111111";
const TAG_OBJECT: &str = "9999999999999999999999999999999999999999";

/// Three commits, newest first, as `git log` prints them
fn three_commit_log() -> String {
    format!(
        "--START-COMMIT--{HEAD}
2008-06-01 12:00:00 +0100  Tim <tpm@src.gnome.org>

Release 0.2.0

--END-COMMIT--
configure.ac
NEWS

--START-COMMIT--{MIDDLE}
2008-05-20 18:30:00 -0700  Bob <b@example.com>

* src/gnet.c (gnet_init): Initialize threads.
* src/gnet.h: Add prototype.

Signed-off-by: Bob <b@example.com>
--END-COMMIT--
src/gnet.c
src/gnet.h

--START-COMMIT--{ROOT}
2008-05-13 07:10:28 +0000  Alice <a@example.com>

Fix leak

Signed-off-by: Alice <a@example.com>
git-svn-id: svn+ssh://svn.gnome.org/svn/gnet/trunk@1 0f
--END-COMMIT--
src/foo.c
"
    )
}

fn generate(repo: &MockRepository, config: &Config, args: &[&str]) -> (String, ChangelogSummary) {
    let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
    let mut out = Vec::new();
    let summary = run_changelog(repo, config, &args, &mut out).expect("changelog should succeed");
    (String::from_utf8(out).unwrap(), summary)
}

#[test]
fn test_full_changelog_with_releases() {
    let mut repo = MockRepository::new();
    repo.add_annotated_tag(TAG_OBJECT, HEAD, "GNET-0.2.0");
    repo.add_tag(ROOT, "GNET-0_1_0");
    repo.set_log_output(three_commit_log());

    let (out, summary) = generate(&repo, &Config::default(), &[]);

    let expected = "\
=== release 0.2.0 ===

2008-06-01  Tim <tim@centricular.net>

\tRelease 0.2.0
\t* configure.ac:
\t* NEWS:

2008-05-20  Bob <b@example.com>

\t* src/gnet.c (gnet_init): Initialize threads.
\t* src/gnet.h: Add prototype.

=== release 0.1.0 ===

2008-05-13  Alice <a@example.com>

\tFix leak
\t* src/foo.c:

";
    assert_eq!(out, expected);
    assert_eq!(
        summary,
        ChangelogSummary {
            stanzas: 3,
            releases_marked: 2,
            releases_known: 3,
            bounded_by_start_tag: false,
        }
    );
}

#[test]
fn test_caller_arguments_forwarded() {
    let repo = MockRepository::new();
    generate(&repo, &Config::default(), &["--since=2008-05-01", "--", "src"]);

    let calls = repo.log_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        &calls[0][3..],
        &["--since=2008-05-01".to_string(), "--".to_string(), "src".to_string()]
    );
    assert!(calls[0].contains(&"--name-only".to_string()));
    assert!(calls[0].contains(&"--date=short".to_string()));
}

#[test]
fn test_start_tag_replaces_caller_arguments() {
    let mut repo = MockRepository::new();
    repo.add_tag(ROOT, "CHANGELOG_START");

    let (_, summary) = generate(&repo, &Config::default(), &["--all", "v1..v2"]);

    let calls = repo.log_calls();
    assert_eq!(calls[0].last().unwrap(), &format!("{}..HEAD", ROOT));
    assert!(!calls[0].contains(&"--all".to_string()));
    assert!(summary.bounded_by_start_tag);
}

#[test]
fn test_prefix_override_selects_other_releases() {
    let mut repo = MockRepository::new();
    repo.add_tag(HEAD, "LIBABIGAIL-2.4.0");
    repo.add_tag(ROOT, "GNET-0.1.0");
    repo.set_log_output(three_commit_log());

    let args = ChangelogArgs {
        tag_prefix: Some("LIBABIGAIL".to_string()),
        ..Default::default()
    };
    let config = args.apply_overrides(Config::default());
    let (out, summary) = generate(&repo, &config, &[]);

    assert!(out.starts_with("=== release 2.4.0 ===\n\n"));
    assert!(!out.contains("release 0.1.0"));
    assert_eq!(summary.releases_marked, 1);
}

#[test]
fn test_log_failure_is_fatal() {
    let mut repo = MockRepository::new();
    repo.set_log_output(three_commit_log());
    repo.fail_log_with(128);

    let mut out = Vec::new();
    let err = run_changelog(&repo, &Config::default(), &[], &mut out).unwrap_err();
    assert!(matches!(err, ChangelogError::Process(_)));
    assert!(err.to_string().contains("128"));
}

#[test]
fn test_empty_history_writes_nothing() {
    let repo = MockRepository::new();
    let (out, summary) = generate(&repo, &Config::default(), &[]);
    assert!(out.is_empty());
    assert_eq!(summary.stanzas, 0);
}
