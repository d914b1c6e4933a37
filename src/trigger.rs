// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Trigger one Jenkins job per configured build mode for a pull request via the external job command
// role: processing/orchestrator
// inputs: PullRequest, JenkinsConfig (job_cmd, job_name, job_parameters, detail_logging, base_url), optional ExtraParameters hook
// outputs: External job-trigger processes; optional detail lines on the diagnostic sink
// side_effects: Spawns one child process per build mode, sequentially, blocking on each
// invariants:
// - argv is job_cmd ++ [job_name] ++ key=value tokens, passed without a shell
// - build modes run in configuration order, one invocation each
// - the first failing invocation aborts the run; later modes are not started
// - detail lines are written only when detail_logging is set
// errors: Spawn failures and non-zero exits propagate with the build mode as context; no retry, no rollback
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::process::Command;

use anyhow::{anyhow, bail, Context, Result};

use crate::config::JenkinsConfig;
use crate::details::log_pull_request_details;
use crate::model::PullRequest;
use crate::params::{build_job_parameters, ExtraParameters};
use crate::render::{rebuild_url, to_command_tokens};

/// Seam over child process execution.
pub trait CommandRunner {
  fn run(&mut self, argv: &[String]) -> Result<()>;
}

/// Runs the command directly (argv array, inherited stdio).
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
  fn run(&mut self, argv: &[String]) -> Result<()> {
    let (program, args) = argv.split_first().ok_or_else(|| anyhow!("empty job command"))?;

    let status = Command::new(program)
      .args(args)
      .status()
      .with_context(|| format!("spawning {:?}", argv))?;

    if !status.success() {
      bail!("{:?} failed: {}", argv, status);
    }

    Ok(())
  }
}

pub fn job_command(jenkins: &JenkinsConfig, tokens: Vec<String>) -> Vec<String> {
  let mut argv: Vec<String> = jenkins.job_cmd.argv().to_vec();
  argv.push(jenkins.job_name.clone());
  argv.extend(tokens);
  argv
}

pub fn trigger_jobs(
  pull: &PullRequest,
  jenkins: &JenkinsConfig,
  extra: Option<&dyn ExtraParameters>,
  runner: &mut dyn CommandRunner,
  sink: &mut dyn Write,
) -> Result<()> {
  let logging = jenkins.detail_logging;

  if logging {
    log_pull_request_details(pull, sink)?;
  }

  if jenkins.job_parameters.is_empty() {
    tracing::warn!(job = %jenkins.job_name, "no build modes configured; nothing to trigger");
  }

  let resolved = build_job_parameters(pull, &jenkins.job_parameters, extra)?;

  for (build_mode, params) in &resolved {
    let argv = job_command(jenkins, to_command_tokens(params));
    tracing::info!("Executing {:?}", argv);

    runner
      .run(&argv)
      .with_context(|| format!("triggering {} (PR #{}) in mode {}", jenkins.job_name, pull.number, build_mode))?;

    if logging {
      writeln!(sink, "  Triggered jenkins job in mode: {}", build_mode)?;
      writeln!(sink, "  Rebuild Link: {}", rebuild_url(&jenkins.base_url, &jenkins.job_name, params))?;
      writeln!(sink, "  => NOTE: Job already triggered. Make sure there are no identical parallel jobs!")?;
    }
  }

  Ok(())
}
