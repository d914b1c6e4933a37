use predicates::prelude::*;
use test_support::{cmd_bin, Workspace};

use super::fixtures::{invocations, write_config, BIN, PULL_JSON};

const THREE_MODES: &str = "    standard:\n      FLAVOR: x86_64\n    extra:\n      FLAVOR: aarch64\n    nightly:\n      FLAVOR: s390x\n";

const LINK: &str = "https://ci.opensuse.org/job/libzypp-pr/parambuild/?FLAVOR=x86_64&job_name=libzypp+PR+42+abcdef12+&github_pr=openSUSE%3Alibzypp%3Amaster%3A42%3Acontributor%2Flibzypp%3Aabcdef1234567";

fn setup(modes: &str) -> (Workspace, std::path::PathBuf, std::path::PathBuf) {
  let ws = Workspace::new();
  let cfg = write_config(&ws, modes);
  let pulls = ws.write("pull.json", PULL_JSON);
  (ws, cfg, pulls)
}

#[test]
fn trigger_pr_runs_one_job_per_mode_in_order() {
  let (ws, cfg, pulls) = setup(THREE_MODES);

  cmd_bin(BIN)
    .arg("--config")
    .arg(&cfg)
    .arg("--pull-json")
    .arg(&pulls)
    .assert()
    .success()
    .stdout(predicate::str::is_empty());

  let calls = invocations(&ws);
  assert_eq!(calls.len(), 3);
  assert_eq!(
    calls[0],
    vec![
      "libzypp-pr",
      "FLAVOR=x86_64",
      "job_name=libzypp PR 42 abcdef12 ",
      "github_pr=openSUSE:libzypp:master:42:contributor/libzypp:abcdef1234567",
    ]
  );
  assert_eq!(calls[1][1], "FLAVOR=aarch64");
  assert_eq!(calls[1][2], "job_name=libzypp PR 42 abcdef12 extra");
  assert_eq!(calls[1][3], "github_pr=openSUSE:libzypp:master:42:contributor/libzypp:abcdef1234567:extra");
  assert_eq!(calls[2][1], "FLAVOR=s390x");
}

#[test]
fn failing_mode_aborts_remaining_modes() {
  let (ws, cfg, pulls) = setup("    standard:\n      FLAVOR: x86_64\n    extra:\n      FLAVOR: FAIL\n    nightly:\n      FLAVOR: s390x\n");

  cmd_bin(BIN)
    .arg("--config")
    .arg(&cfg)
    .arg("--pull-json")
    .arg(&pulls)
    .assert()
    .failure()
    .stderr(predicate::str::contains("mode extra").and(predicate::str::contains("PR #42")));

  let calls = invocations(&ws);
  assert_eq!(calls.len(), 2, "nightly must not run: {:?}", calls);
}

#[test]
fn detail_logging_prints_details_and_rebuild_links() {
  let (_ws, cfg, pulls) = setup("    standard:\n      FLAVOR: x86_64\n");

  let out = cmd_bin(BIN)
    .arg("--config")
    .arg(&cfg)
    .arg("--pull-json")
    .arg(&pulls)
    .arg("--detail-logging")
    .output()
    .unwrap();
  assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

  let stdout = String::from_utf8(out.stdout).unwrap();
  assert!(stdout.starts_with("PR #42: Fix solver crash\n"), "stdout: {}", stdout);
  assert!(stdout.contains("  Triggered jenkins job in mode: standard\n"));
  assert!(stdout.contains(&format!("  Rebuild Link: {}\n", LINK)), "stdout: {}", stdout);
  assert!(stdout.contains("  => NOTE: Job already triggered. Make sure there are no identical parallel jobs!\n"));
}

#[test]
fn jenkins_url_override_changes_rebuild_links() {
  let (_ws, cfg, pulls) = setup("    standard:\n      FLAVOR: x86_64\n");

  cmd_bin(BIN)
    .arg("--config")
    .arg(&cfg)
    .arg("--pull-json")
    .arg(&pulls)
    .args(["--detail-logging", "--jenkins-url", "https://jenkins.local/"])
    .assert()
    .success()
    .stdout(predicate::str::contains("  Rebuild Link: https://jenkins.local/job/libzypp-pr/parambuild/?FLAVOR=x86_64&"));
}

#[test]
fn plain_trigger_passes_configured_parameters_only() {
  let (ws, cfg, pulls) = setup("    standard:\n      FLAVOR: x86_64\n      COUNT: 2\n");

  cmd_bin(BIN)
    .arg("--config")
    .arg(&cfg)
    .arg("--pull-json")
    .arg(&pulls)
    .args(["--action", "trigger"])
    .assert()
    .success();

  assert_eq!(invocations(&ws), vec![vec!["libzypp-pr", "FLAVOR=x86_64", "COUNT=2"]]);
}

#[test]
fn log_details_triggers_nothing() {
  let (ws, cfg, pulls) = setup(THREE_MODES);

  cmd_bin(BIN)
    .arg("--config")
    .arg(&cfg)
    .arg("--pull-json")
    .arg(&pulls)
    .args(["--action", "log-details"])
    .assert()
    .success()
    .stdout(predicate::str::contains("  Head: contributor/libzypp @ abcdef1234567"));

  assert!(invocations(&ws).is_empty());
}

#[test]
fn pull_array_is_processed_in_order() {
  let ws = Workspace::new();
  let cfg = write_config(&ws, "    standard: {}\n");
  let pulls = ws.write_json(
    "pulls.json",
    &serde_json::json!([
      { "number": 7, "head": { "sha": "1111111111", "repo": { "full_name": "a/libzypp" } }, "base": { "ref": "master" } },
      { "number": 9, "head": { "sha": "2222222222", "repo": null }, "base": { "ref": "SLE-15" } }
    ]),
  );

  cmd_bin(BIN).arg("--config").arg(&cfg).arg("--pull-json").arg(&pulls).assert().success();

  let calls = invocations(&ws);
  assert_eq!(calls.len(), 2);
  assert_eq!(calls[0][1], "job_name=libzypp PR 7 11111111 ");
  assert_eq!(calls[1][1], "job_name=libzypp PR 9 22222222 ");
  assert!(calls[1][2].starts_with("github_pr=openSUSE:libzypp:SLE-15:9:"), "{:?}", calls[1]);
}
