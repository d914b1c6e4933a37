use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pr-jenkins-trigger",
    version,
    about = "Trigger Jenkins jobs for GitHub pull requests and report commit status",
    long_about = None
)]
pub struct Cli {
  /// YAML configuration (GitHub repository, Jenkins job command and build modes)
  #[arg(long, default_value = "pr-jenkins.yaml")]
  pub config: PathBuf,

  /// What to do with each pull request
  #[arg(long, value_enum, default_value_t = Action::TriggerPr)]
  pub action: Action,

  /// Pull request number to fetch from GitHub (repeatable)
  #[arg(long = "pr", value_name = "NUMBER")]
  pub prs: Vec<u64>,

  /// Read pull request JSON (one object or an array, GitHub REST shape) instead of fetching
  #[arg(long, value_name = "FILE")]
  pub pull_json: Option<PathBuf>,

  /// Force detail logging (PR details and rebuild links) regardless of the config
  #[arg(long)]
  pub detail_logging: bool,

  /// Override the Jenkins base URL used for rebuild links
  #[arg(long, value_name = "URL")]
  pub jenkins_url: Option<String>,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
  /// Trigger one job per build mode with the configured parameters only
  Trigger,
  /// Trigger one job per build mode, adding job_name and github_pr parameters
  TriggerPr,
  /// Mark the head commit with a failure status asking for a trusted trigger
  NotTrusted,
  /// Print pull request details only
  LogDetails,
}

impl Action {
  pub fn needs_github(&self) -> bool {
    matches!(self, Action::NotTrusted)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PullSource {
  Numbers(Vec<u64>),
  JsonFile(PathBuf),
}

#[derive(Debug)]
pub struct EffectiveConfig {
  pub config_path: PathBuf,
  pub action: Action,
  pub source: PullSource,
  pub detail_logging: bool,
  pub jenkins_url: Option<String>,
}

impl EffectiveConfig {
  pub fn needs_github(&self) -> bool {
    self.action.needs_github() || matches!(self.source, PullSource::Numbers(_))
  }
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let source = match (cli.prs.is_empty(), cli.pull_json) {
    (false, None) => PullSource::Numbers(cli.prs),
    (true, Some(path)) => PullSource::JsonFile(path),
    (true, None) => bail!("Provide --pr NUMBER or --pull-json FILE"),
    (false, Some(_)) => bail!("Ambiguous pull request source: choose only one of --pr | --pull-json"),
  };

  Ok(EffectiveConfig {
    config_path: cli.config,
    action: cli.action,
    source,
    detail_logging: cli.detail_logging,
    jenkins_url: cli.jenkins_url,
  })
}
