// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Load and validate the YAML configuration (GitHub repo identity, Jenkins job command and build modes)
// role: config/loading
// inputs: Path to a YAML file, or YAML text
// outputs: Config { github, jenkins } with defaults applied
// side_effects: Reads the config file
// invariants:
// - job_parameters keep document order
// - job_cmd is never empty after a successful load
// - jenkins.base_url defaults to https://ci.opensuse.org
// errors: Missing required keys and malformed YAML fail with the file path and serde location
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::params::BuildModes;
use crate::render::DEFAULT_JENKINS_URL;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_STATUS_CONTEXT: &str = "jenkins";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  pub github: GithubConfig,
  pub jenkins: JenkinsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubConfig {
  pub organization: String,
  pub repository: String,
  #[serde(default = "default_api_url")]
  pub api_url: String,
  #[serde(default = "default_status_context")]
  pub status_context: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JenkinsConfig {
  #[serde(default = "default_jenkins_url")]
  pub base_url: String,
  pub job_name: String,
  pub job_cmd: JobCommand,
  pub job_parameters: BuildModes,
  #[serde(default)]
  pub detail_logging: bool,
  #[serde(default)]
  pub target_url: Option<String>,
}

/// Base argv of the job-trigger command. Written either as a list or as one whitespace-separated string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "JobCommandRepr")]
pub struct JobCommand(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum JobCommandRepr {
  List(Vec<String>),
  Line(String),
}

impl From<JobCommandRepr> for JobCommand {
  fn from(repr: JobCommandRepr) -> Self {
    match repr {
      JobCommandRepr::List(v) => JobCommand(v),
      JobCommandRepr::Line(s) => JobCommand(s.split_whitespace().map(|t| t.to_string()).collect()),
    }
  }
}

impl JobCommand {
  pub fn argv(&self) -> &[String] {
    &self.0
  }
}

fn default_api_url() -> String {
  DEFAULT_GITHUB_API_URL.to_string()
}

fn default_status_context() -> String {
  DEFAULT_STATUS_CONTEXT.to_string()
}

fn default_jenkins_url() -> String {
  DEFAULT_JENKINS_URL.to_string()
}

impl Config {
  pub fn from_yaml_str(text: &str) -> Result<Self> {
    let mut cfg: Config = serde_yaml::from_str(text)?;
    cfg.validate()?;
    Ok(cfg)
  }

  fn validate(&mut self) -> Result<()> {
    if self.jenkins.job_cmd.argv().is_empty() {
      bail!("jenkins.job_cmd must name a command");
    }
    if self.jenkins.job_name.trim().is_empty() {
      bail!("jenkins.job_name must not be empty");
    }
    self.jenkins.base_url = self.jenkins.base_url.trim_end_matches('/').to_string();
    self.github.api_url = self.github.api_url.trim_end_matches('/').to_string();
    Ok(())
  }
}

pub fn load_config(path: &Path) -> Result<Config> {
  let text = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
  Config::from_yaml_str(&text).with_context(|| format!("parsing config {}", path.display()))
}
