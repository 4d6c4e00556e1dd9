//! test-support: helpers for robust, nextest-friendly tests.
//!
//! Add as a dev-dependency in your top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support", features = ["serde"] }
//! ```
//!
//! Then in tests:
//! ```rust,ignore
//! use test_support::{init_tracing, provider_tree};
//!
//! #[test]
//! fn example() {
//!     init_tracing();
//!     let td = test_support::tempdir();
//!     provider_tree(td.path(), &[("aws", Some("providers"))]);
//! }
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

use std::path::{Path, PathBuf};

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,test=info"))
            .unwrap();
        // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Return the path to the repository's `tests/fixtures` directory.
///
/// Uses the top-level package directory, so it's stable regardless of the runner's
/// working directory (cargo vs nextest).
pub fn fixtures_dir() -> PathBuf {
    // <repo>/tests/support (manifest dir) → parent() is <repo>/tests
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(|tests| tests.join("fixtures"))
        .expect("tests/support has a parent directory")
}

/// Read a UTF-8 text fixture into a string.
pub fn read_fixture_text<P: AsRef<Path>>(rel_path: P) -> String {
    let path = fixtures_dir().join(rel_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// Deserialize a JSON fixture into `T` (enable `serde` feature).
#[cfg(feature = "serde")]
pub fn read_fixture_json<T, P>(rel_path: P) -> T
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = fixtures_dir().join(rel_path);
    let file = std::fs::File::open(&path)
        .unwrap_or_else(|e| panic!("failed to open fixture {}: {e}", path.display()));
    serde_json::from_reader::<_, T>(file)
        .unwrap_or_else(|e| panic!("failed to parse JSON fixture {}: {e}", path.display()))
}

/// Create a temp directory that deletes on drop.
pub fn tempdir() -> tempfile::TempDir {
    tempfile::tempdir().expect("create tempdir")
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
///
/// Example:
/// ```rust,ignore
/// use test_support::cmd_bin;
/// use predicates::prelude::*;
///
/// let mut cmd = cmd_bin("my-cli");
/// cmd.arg("--help").assert().success().stdout(predicate::str::contains("Usage"));
/// ```
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
    init_tracing();
    assert_cmd::Command::cargo_bin(bin).expect("binary target not found")
}

/// Lay out `<root>/<name>/config.yaml` per provider; `None` writes a config without a `team:` line.
pub fn provider_tree(root: &Path, providers: &[(&str, Option<&str>)]) {
    for (name, team) in providers {
        let dir = root.join(name);
        std::fs::create_dir_all(&dir).unwrap();
        let mut config = format!("provider: {name}\nmajor-version: 6\n");
        if let Some(team) = team {
            config.push_str(&format!("team: {team}\n"));
        }
        std::fs::write(dir.join("config.yaml"), config).unwrap();
    }
}

/// Write `providers.json` listing `names` and return its path.
pub fn providers_json(root: &Path, names: &[&str]) -> PathBuf {
    let path = root.join("providers.json");
    let quoted: Vec<String> = names.iter().map(|n| format!("\"{n}\"")).collect();
    std::fs::write(&path, format!("[{}]", quoted.join(", "))).unwrap();
    path
}

/// A stand-in `gh` executable: appends its argv to a log and replays a canned `pr list` payload.
///
/// Setting `FAKE_GH_FAIL=<first arg>` in the child environment makes matching calls exit 1.
#[cfg(unix)]
pub struct FakeGh {
    pub bin: PathBuf,
    log: PathBuf,
}

#[cfg(unix)]
impl FakeGh {
    pub fn install(dir: &Path, pr_list_json: &str) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let bin = dir.join("gh");
        let log = dir.join("gh-calls.log");
        let payload = dir.join("pr-list.json");
        std::fs::write(&payload, pr_list_json).unwrap();

        let script = format!(
            "#!/bin/sh\nprintf '%s\\n' \"$*\" >> '{log}'\nif [ -n \"$FAKE_GH_FAIL\" ] && [ \"$1\" = \"$FAKE_GH_FAIL\" ]; then\n  echo 'HTTP 403: Resource not accessible' >&2\n  exit 1\nfi\nif [ \"$1\" = pr ] && [ \"$2\" = list ]; then\n  cat '{payload}'\nfi\nexit 0\n",
            log = log.display(),
            payload = payload.display(),
        );
        std::fs::write(&bin, script).unwrap();
        std::fs::set_permissions(&bin, std::fs::Permissions::from_mode(0o755)).unwrap();

        Self { bin, log }
    }

    pub fn bin_str(&self) -> &str {
        self.bin.to_str().expect("utf-8 temp path")
    }

    /// One entry per invocation, arguments joined by single spaces.
    pub fn calls(&self) -> Vec<String> {
        std::fs::read_to_string(&self.log)
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }
}
