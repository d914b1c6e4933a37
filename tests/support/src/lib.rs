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
//! use test_support::{init_tracing, Workspace};
//!
//! #[test]
//! fn example() {
//!     init_tracing();
//!     let ws = Workspace::new();
//!     let _cfg = ws.write("config.yaml", "github: {}");
//! }
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

use std::env;
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

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
///
/// GitHub credentials and fixture variables from the outer environment are cleared
/// so tests never reach the network by accident.
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
    init_tracing();
    let mut cmd = assert_cmd::Command::cargo_bin(bin).expect("binary target not found");
    for var in ["GITHUB_TOKEN", "GH_TOKEN", "PJT_TEST_PULL_JSON", "PJT_TEST_STATUS_OUT", "RUST_LOG"] {
        cmd.env_remove(var);
    }
    cmd
}

/// A temp directory holding config files, pull request fixtures and job logs for one test.
pub struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self { dir: tempfile::tempdir().expect("create tempdir") }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a text file relative to the workspace and return its absolute path.
    pub fn write(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        std::fs::write(&path, contents)
            .unwrap_or_else(|e| panic!("failed to write fixture {}: {e}", path.display()));
        path
    }

    /// Read a workspace file, returning an empty string when it does not exist yet.
    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(rel)).unwrap_or_default()
    }

    /// Serialize `value` as JSON into the workspace (enable `serde` feature).
    ///
    /// YAML is a superset of JSON, so this also writes valid YAML configs.
    #[cfg(feature = "serde")]
    pub fn write_json<T: serde::Serialize>(&self, rel: &str, value: &T) -> PathBuf {
        let text = serde_json::to_string_pretty(value).expect("serialize fixture");
        self.write(rel, &text)
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Set multiple environment variables for the duration of the returned guard.
pub fn with_env(vars: &[(&str, &str)]) -> EnvGuard {
    EnvGuard::set_many(vars)
}

/// Guard for temporarily setting environment variables.
pub struct EnvGuard {
    prev: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    pub fn set_many(kv: &[(&str, &str)]) -> Self {
        let mut prev = Vec::with_capacity(kv.len());
        for (k, v) in kv {
            let k_owned = k.to_string();
            prev.push((k_owned.clone(), env::var(k).ok()));
            env::set_var(k, v);
        }
        Self { prev }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (k, old) in self.prev.drain(..) {
            match old {
                Some(v) => env::set_var(&k, v),
                None => env::remove_var(&k),
            }
        }
    }
}
