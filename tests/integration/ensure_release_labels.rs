#![cfg(unix)]

use predicates::prelude::*;
use test_support::{providers_json, FakeGh};

#[test]
fn creates_three_labels_per_repo_idempotently() {
  let td = test_support::tempdir();
  let gh = FakeGh::install(td.path(), "[]");
  let list = providers_json(td.path(), &["aws", "random"]);

  for _ in 0..2 {
    test_support::cmd_bin("provider-ops")
      .args(["ensure-release-labels", "--gh-bin", gh.bin_str(), "--providers-file"])
      .arg(&list)
      .assert()
      .success()
      .stdout(predicate::str::contains("Exec: "));
  }

  let calls = gh.calls();
  assert_eq!(calls.len(), 12);
  assert_eq!(calls[..6], calls[6..]);
  assert_eq!(
    calls[0],
    "label create needs-release/major --repo pulumi/pulumi-aws --color #C5DEF5 --force --description When a PR with this label merges, it initiates a release of vX+1.0.0"
  );
  assert!(calls[5].starts_with("label create needs-release/patch --repo pulumi/pulumi-random"));
}

#[test]
fn dry_run_runs_nothing() {
  let td = test_support::tempdir();
  let gh = FakeGh::install(td.path(), "[]");
  let list = providers_json(td.path(), &["aws"]);

  test_support::cmd_bin("provider-ops")
    .args(["ensure-release-labels", "--dry-run", "--gh-bin", gh.bin_str(), "--providers-file"])
    .arg(&list)
    .assert()
    .success()
    .stdout(predicate::str::contains(format!(
      "Would run: {} label create needs-release/minor --repo pulumi/pulumi-aws",
      gh.bin_str()
    )));

  assert!(gh.calls().is_empty());
}

#[test]
fn label_failure_is_fatal() {
  let td = test_support::tempdir();
  let gh = FakeGh::install(td.path(), "[]");
  let list = providers_json(td.path(), &["aws", "random"]);

  test_support::cmd_bin("provider-ops")
    .env("FAKE_GH_FAIL", "label")
    .args(["ensure-release-labels", "--gh-bin", gh.bin_str(), "--providers-file"])
    .arg(&list)
    .assert()
    .failure()
    .stderr(predicate::str::contains("ensuring label needs-release/major on pulumi/pulumi-aws"));

  assert_eq!(gh.calls().len(), 1);
}
