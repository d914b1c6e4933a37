// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Render resolved job parameters as command-line tokens and as a form-encoded rebuild link
// role: rendering/command
// inputs: ParamMap (ordered); Jenkins base URL and job name for rebuild links
// outputs: Vec<String> of key=value tokens; application/x-www-form-urlencoded query string; rebuild URL
// invariants:
// - tokens and query pairs follow the map's iteration order
// - decoding the query string yields the original pairs
// - rebuild URL shape is <base>/job/<job_name>/parambuild/?<query>
// errors: None; all functions are total
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use url::form_urlencoded;

use crate::params::ParamMap;

/// Default Jenkins instance for rebuild links.
pub const DEFAULT_JENKINS_URL: &str = "https://ci.opensuse.org";

/// One `key=value` argv token per parameter.
pub fn to_command_tokens(params: &ParamMap) -> Vec<String> {
  params.iter().map(|(k, v)| format!("{}={}", k, v)).collect()
}

/// Form-encode the parameters (spaces become `+`, reserved bytes are percent-encoded).
pub fn to_query_string(params: &ParamMap) -> String {
  form_urlencoded::Serializer::new(String::new()).extend_pairs(params.iter()).finish()
}

/// Link to the Jenkins "build with parameters" page, prefilled with `params`.
pub fn rebuild_url(jenkins_url: &str, job_name: &str, params: &ParamMap) -> String {
  format!(
    "{}/job/{}/parambuild/?{}",
    jenkins_url.trim_end_matches('/'),
    job_name,
    to_query_string(params)
  )
}
