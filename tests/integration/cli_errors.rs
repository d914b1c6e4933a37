use predicates::prelude::*;
use test_support::{cmd_bin, Workspace};

use super::fixtures::{write_config, BIN, PULL_JSON};

#[test]
fn errors_when_no_pull_source() {
  let ws = Workspace::new();
  let cfg = write_config(&ws, "    standard: {}\n");

  cmd_bin(BIN)
    .arg("--config")
    .arg(&cfg)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Provide --pr NUMBER or --pull-json FILE"));
}

#[test]
fn errors_when_both_pull_sources_given() {
  let ws = Workspace::new();
  let cfg = write_config(&ws, "    standard: {}\n");
  let pulls = ws.write("pull.json", PULL_JSON);

  cmd_bin(BIN)
    .arg("--config")
    .arg(&cfg)
    .arg("--pull-json")
    .arg(&pulls)
    .args(["--pr", "42"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Ambiguous pull request source"));
}

#[test]
fn missing_config_file_names_the_path() {
  let ws = Workspace::new();
  let pulls = ws.write("pull.json", PULL_JSON);

  cmd_bin(BIN)
    .arg("--config")
    .arg(ws.path().join("absent.yaml"))
    .arg("--pull-json")
    .arg(&pulls)
    .assert()
    .failure()
    .stderr(predicate::str::contains("absent.yaml"));
}

#[test]
fn missing_job_parameters_is_fatal_before_any_trigger() {
  let ws = Workspace::new();
  let cfg = ws.write(
    "pr-jenkins.yaml",
    "github:\n  organization: openSUSE\n  repository: libzypp\njenkins:\n  job_name: libzypp-pr\n  job_cmd: [\"true\"]\n",
  );
  let pulls = ws.write("pull.json", PULL_JSON);

  cmd_bin(BIN)
    .arg("--config")
    .arg(&cfg)
    .arg("--pull-json")
    .arg(&pulls)
    .assert()
    .failure()
    .stderr(predicate::str::contains("job_parameters"));
}

#[test]
fn github_source_without_token_fails() {
  let ws = Workspace::new();
  let cfg = write_config(&ws, "    standard: {}\n");

  // empty PATH keeps `gh auth token` from supplying a token
  cmd_bin(BIN)
    .arg("--config")
    .arg(&cfg)
    .args(["--pr", "42"])
    .env("PATH", "")
    .assert()
    .failure()
    .stderr(predicate::str::contains("Missing GitHub token"));
}

#[test]
fn malformed_pull_json_names_the_file() {
  let ws = Workspace::new();
  let cfg = write_config(&ws, "    standard: {}\n");
  let pulls = ws.write("broken.json", "{\"number\": ");

  cmd_bin(BIN)
    .arg("--config")
    .arg(&cfg)
    .arg("--pull-json")
    .arg(&pulls)
    .assert()
    .failure()
    .stderr(predicate::str::contains("broken.json"));

  assert_eq!(ws.read("jobs.log"), "");
}
