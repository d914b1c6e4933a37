// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Wire one run together: apply CLI overrides, load pull requests, dispatch the selected action per PR
// role: processing/dispatch
// inputs: EffectiveConfig, Config, CommandRunner, diagnostic sink, optional GithubApi
// outputs: Triggered jobs, submitted statuses, or detail lines, depending on the action
// side_effects: Those of the dispatched action (processes, HTTP, sink writes)
// invariants:
// - pull requests are processed in the order given; the first failure aborts the rest
// - trigger-pr is the only action that installs the extra-parameter hook
// errors: Propagated with the PR number as context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;

use anyhow::{anyhow, Context, Result};

use crate::cli::{Action, EffectiveConfig, PullSource};
use crate::config::{load_config, Config};
use crate::details::log_pull_request_details;
use crate::github_api::{build_api, GithubApi};
use crate::model::PullRequest;
use crate::params::{ExtraParameters, PrExtraParameters};
use crate::status::report_not_trusted;
use crate::trigger::{trigger_jobs, CommandRunner, ProcessRunner};
use crate::util::read_pulls_json;

pub fn apply_overrides(config: &mut Config, eff: &EffectiveConfig) {
  if eff.detail_logging {
    config.jenkins.detail_logging = true;
  }
  if let Some(url) = &eff.jenkins_url {
    config.jenkins.base_url = url.trim_end_matches('/').to_string();
  }
}

pub fn load_pulls(source: &PullSource, config: &Config, api: Option<&dyn GithubApi>) -> Result<Vec<PullRequest>> {
  match source {
    PullSource::JsonFile(path) => read_pulls_json(path),
    PullSource::Numbers(numbers) => {
      let api = api.ok_or_else(|| anyhow!("fetching pull requests requires GitHub access"))?;
      numbers
        .iter()
        .map(|n| api.get_pull(&config.github.organization, &config.github.repository, *n))
        .collect()
    }
  }
}

pub fn run_action(
  action: Action,
  pull: &PullRequest,
  config: &Config,
  runner: &mut dyn CommandRunner,
  sink: &mut dyn Write,
  api: Option<&dyn GithubApi>,
) -> Result<()> {
  match action {
    Action::Trigger => trigger_jobs(pull, &config.jenkins, None, runner, sink),
    Action::TriggerPr => {
      let hook = PrExtraParameters::new(&config.github.organization, &config.github.repository);
      trigger_jobs(pull, &config.jenkins, Some(&hook as &dyn ExtraParameters), runner, sink)
    }
    Action::NotTrusted => {
      let api = api.ok_or_else(|| anyhow!("reporting a commit status requires GitHub access"))?;
      report_not_trusted(pull, config, api).map(|_| ())
    }
    Action::LogDetails => log_pull_request_details(pull, sink),
  }
}

pub fn run_all(
  action: Action,
  pulls: &[PullRequest],
  config: &Config,
  runner: &mut dyn CommandRunner,
  sink: &mut dyn Write,
  api: Option<&dyn GithubApi>,
) -> Result<()> {
  if pulls.is_empty() {
    tracing::warn!("no pull requests to process");
  }

  for pull in pulls {
    run_action(action, pull, config, runner, sink, api).with_context(|| format!("PR #{}", pull.number))?;
  }

  Ok(())
}

/// Entry point behind `main`: load everything and run the action against the real process runner and stdout.
pub fn process(eff: &EffectiveConfig) -> Result<()> {
  let mut config = load_config(&eff.config_path)?;
  apply_overrides(&mut config, eff);

  let api = if eff.needs_github() { Some(build_api(&config.github.api_url)?) } else { None };
  let api_ref = api.as_deref();

  let pulls = load_pulls(&eff.source, &config, api_ref)?;

  let stdout = std::io::stdout();
  let mut sink = stdout.lock();
  let result = run_all(eff.action, &pulls, &config, &mut ProcessRunner, &mut sink, api_ref);
  sink.flush()?;
  result
}
