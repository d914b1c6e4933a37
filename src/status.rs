// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Build and submit the "not trusted" failure status for a pull request head commit
// role: reporting/commit-status
// inputs: PullRequest, Config (job name, build modes, base URL, target_url, status context), GithubApi
// outputs: One StatusPayload delivered through GithubApi::create_status
// invariants:
// - state is always failure
// - the rebuild link is resolved with the same builder/renderer as the trigger path
// - link source is the standard build mode, else the first configured mode; omitted when none exist
// - description never exceeds 140 chars; a link that does not fit goes to target_url unless one is configured
// errors: Builder and delivery errors propagate unchanged
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::Result;

use crate::config::Config;
use crate::github_api::GithubApi;
use crate::model::{PullRequest, StatusPayload, StatusState};
use crate::params::{resolve_build_mode, ExtraParameters, PrExtraParameters, STANDARD_BUILD_MODE};
use crate::render::rebuild_url;

const NOT_TRUSTED_MESSAGE: &str = "Not a valid CI user, please ask a project contributor to trigger your build";

/// GitHub rejects commit status descriptions longer than this (422).
const MAX_DESCRIPTION_CHARS: usize = 140;

/// Rebuild link for the build mode a contributor would trigger by hand.
pub fn default_rebuild_url(
  pull: &PullRequest,
  config: &Config,
  extra: Option<&dyn ExtraParameters>,
) -> Result<Option<String>> {
  let modes = &config.jenkins.job_parameters;
  let chosen = match modes.get(STANDARD_BUILD_MODE) {
    Some(template) => Some((STANDARD_BUILD_MODE, template)),
    None => modes.first(),
  };

  let Some((build_mode, template)) = chosen else {
    return Ok(None);
  };

  let params = resolve_build_mode(pull, build_mode, template, extra)?;
  Ok(Some(rebuild_url(&config.jenkins.base_url, &config.jenkins.job_name, &params)))
}

pub fn not_trusted_status(pull: &PullRequest, config: &Config) -> Result<StatusPayload> {
  let hook = PrExtraParameters::new(&config.github.organization, &config.github.repository);
  let mut target_url = config.jenkins.target_url.clone();

  let message = match default_rebuild_url(pull, config, Some(&hook))? {
    Some(url) => {
      let full = format!("{} via {}", NOT_TRUSTED_MESSAGE, url);
      if full.chars().count() <= MAX_DESCRIPTION_CHARS {
        full
      } else if target_url.is_none() {
        // the link moves to the status "Details" target
        target_url = Some(url);
        format!("{} via the Details link.", NOT_TRUSTED_MESSAGE)
      } else {
        tracing::warn!(pr = pull.number, rebuild_url = %url, "rebuild link does not fit the status description");
        full
      }
    }
    None => format!("{}.", NOT_TRUSTED_MESSAGE),
  };

  Ok(StatusPayload {
    state: StatusState::Failure,
    message: truncate_description(&message),
    target_url,
    context: config.github.status_context.clone(),
  })
}

/// Cut to GitHub's description limit on a char boundary, marking the cut with `...`.
fn truncate_description(message: &str) -> String {
  if message.chars().count() <= MAX_DESCRIPTION_CHARS {
    return message.to_string();
  }
  let kept: String = message.chars().take(MAX_DESCRIPTION_CHARS - 3).collect();
  format!("{}...", kept)
}

pub fn report_not_trusted(pull: &PullRequest, config: &Config, api: &dyn GithubApi) -> Result<StatusPayload> {
  let payload = not_trusted_status(pull, config)?;
  api.create_status(&config.github.organization, &config.github.repository, &pull.head.sha, &payload)?;
  tracing::info!(pr = pull.number, sha = %pull.head.sha, "reported not-trusted status");
  Ok(payload)
}
