// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Write a short human-readable summary of a pull request to the diagnostic sink
// role: diagnostics/pull-request
// inputs: PullRequest; any io::Write sink
// outputs: A header line plus indented author/head/base/url lines
// invariants: Optional fields (title, author, url) are skipped rather than printed empty
// errors: Sink write errors propagate
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;

use anyhow::Result;

use crate::model::PullRequest;

pub fn log_pull_request_details(pull: &PullRequest, sink: &mut dyn Write) -> Result<()> {
  match pull.title.as_deref() {
    Some(title) => writeln!(sink, "PR #{}: {}", pull.number, title)?,
    None => writeln!(sink, "PR #{}", pull.number)?,
  }

  if let Some(user) = &pull.user {
    writeln!(sink, "  Author: {}", user.login)?;
  }

  let head_repo = pull.head_repo_full_name();
  if head_repo.is_empty() {
    writeln!(sink, "  Head: (deleted fork) @ {}", pull.head.sha)?;
  } else {
    writeln!(sink, "  Head: {} @ {}", head_repo, pull.head.sha)?;
  }
  writeln!(sink, "  Base: {}", pull.base.r#ref)?;

  if let Some(url) = &pull.html_url {
    writeln!(sink, "  URL: {}", url)?;
  }

  Ok(())
}
