fn native_tree() -> tempfile::TempDir {
  let td = test_support::tempdir();
  for name in ["command", "azure-native", "aws-native", "google-native"] {
    std::fs::create_dir_all(td.path().join(name)).unwrap();
  }
  td
}

#[test]
fn lists_native_providers_sorted() {
  let td = native_tree();

  test_support::cmd_bin("provider-ops")
    .args(["native-providers-list", "--providers-dir"])
    .arg(td.path())
    .assert()
    .success()
    .stdout("[\"aws-native\", \"azure-native\", \"command\", \"google-native\"]\n");
}

#[test]
fn for_auto_pr_drops_excluded_provider() {
  let td = native_tree();

  let out = test_support::cmd_bin("provider-ops")
    .args(["native-providers-list", "--for-auto-pr", "--providers-dir"])
    .arg(td.path())
    .output()
    .unwrap();
  assert!(out.status.success());

  let names: Vec<String> = serde_json::from_slice(&out.stdout).unwrap();
  assert_eq!(names, vec!["aws-native", "command", "google-native"]);
}

#[test]
fn missing_directory_fails() {
  let td = test_support::tempdir();

  let out = test_support::cmd_bin("provider-ops")
    .args(["native-providers-list", "--providers-dir"])
    .arg(td.path().join("nope"))
    .output()
    .unwrap();
  assert!(!out.status.success());
  assert!(out.stdout.is_empty());
  assert!(String::from_utf8_lossy(&out.stderr).contains("listing providers"));
}
