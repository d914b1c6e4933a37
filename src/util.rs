// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Process-wide helpers: tracing setup, pull request JSON loading, man page rendering
// role: utilities/helpers
// inputs: RUST_LOG; file paths; clap CommandFactory
// outputs: Installed tracing subscriber, parsed pull requests, man page text
// side_effects: init_tracing installs the global subscriber; read_pulls_json reads a file
// invariants: Logs go to stderr so stdout carries only diagnostic detail lines and man pages
// errors: IO and parse errors bubble with the file path as context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use anyhow::{Context, Result};
use clap::CommandFactory;
use tracing_subscriber::EnvFilter;

use crate::model::{PullRequest, PullRequestInput};

/// Install the fmt subscriber on stderr, honoring `RUST_LOG` (default `info`).
pub fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}

/// Read one pull request object or an array of them from a JSON file.
pub fn read_pulls_json(path: &Path) -> Result<Vec<PullRequest>> {
  let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
  let input: PullRequestInput =
    serde_json::from_str(&text).with_context(|| format!("parsing pull request JSON {}", path.display()))?;
  Ok(input.into_vec())
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
