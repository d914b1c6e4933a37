// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Resolve per-build-mode job parameters from the configured templates plus optional computed extras
// role: builder/parameters
// inputs: PullRequest, BuildModes template from configuration, optional ExtraParameters hook
// outputs: Vec<(build_mode, ParamMap)> in configuration order
// invariants:
// - the configured templates are never mutated; each mode starts from a clone
// - merge is right-biased: computed extras overwrite same-named template keys in place
// - exactly the configured build modes are produced, none skipped or added
// errors: hook errors propagate unchanged; no fallback to base parameters
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt;

use anyhow::Result;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::model::PullRequest;

/// Build mode whose jobs carry no sub-context suffix.
pub const STANDARD_BUILD_MODE: &str = "standard";

/// Parameter key carrying the correlation tag back to the pull request.
pub const CORRELATION_TAG_KEY: &str = "github_pr";

/// Parameter key carrying the computed display name of the job.
pub const JOB_NAME_KEY: &str = "job_name";

/// Insertion-ordered string map. Re-inserting a key keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamMap {
  entries: Vec<(String, String)>,
}

impl ParamMap {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
    let key = key.into();
    let value = value.into();

    match self.entries.iter_mut().find(|(k, _)| *k == key) {
      Some(slot) => slot.1 = value,
      None => self.entries.push((key, value)),
    }
  }

  /// Right-biased merge: values from `other` win.
  pub fn merge(&mut self, other: ParamMap) {
    for (k, v) in other.entries {
      self.insert(k, v);
    }
  }

  #[cfg(test)]
  pub fn get(&self, key: &str) -> Option<&str> {
    self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParamMap {
  fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
    let mut map = ParamMap::new();
    for (k, v) in iter {
      map.insert(k, v);
    }
    map
  }
}

/// Template values may be written as plain YAML scalars (`COUNT: 2`, `DEBUG: true`, `EMPTY:`).
#[derive(Deserialize)]
#[serde(untagged)]
enum ScalarValue {
  Str(String),
  Int(i64),
  Float(f64),
  Bool(bool),
  Null,
}

impl ScalarValue {
  fn into_string(self) -> String {
    match self {
      ScalarValue::Str(s) => s,
      ScalarValue::Int(i) => i.to_string(),
      // Debug keeps the fractional part: 1.0 stays "1.0"
      ScalarValue::Float(f) => format!("{:?}", f),
      ScalarValue::Bool(b) => b.to_string(),
      ScalarValue::Null => String::new(),
    }
  }
}

impl<'de> Deserialize<'de> for ParamMap {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct ParamMapVisitor;

    impl<'de> Visitor<'de> for ParamMapVisitor {
      type Value = ParamMap;

      fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of parameter names to scalar values")
      }

      fn visit_unit<E: serde::de::Error>(self) -> Result<ParamMap, E> {
        Ok(ParamMap::new())
      }

      fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<ParamMap, A::Error> {
        let mut map = ParamMap::new();
        while let Some((k, v)) = access.next_entry::<String, ScalarValue>()? {
          map.insert(k, v.into_string());
        }
        Ok(map)
      }
    }

    deserializer.deserialize_any(ParamMapVisitor)
  }
}

/// Ordered `build_mode -> template` list as written in the configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildModes {
  modes: Vec<(String, ParamMap)>,
}

impl BuildModes {
  pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamMap)> {
    self.modes.iter().map(|(m, p)| (m.as_str(), p))
  }

  pub fn get(&self, build_mode: &str) -> Option<&ParamMap> {
    self.modes.iter().find(|(m, _)| m == build_mode).map(|(_, p)| p)
  }

  pub fn first(&self) -> Option<(&str, &ParamMap)> {
    self.modes.first().map(|(m, p)| (m.as_str(), p))
  }

  pub fn len(&self) -> usize {
    self.modes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.modes.is_empty()
  }
}

impl<K: Into<String>> FromIterator<(K, ParamMap)> for BuildModes {
  fn from_iter<I: IntoIterator<Item = (K, ParamMap)>>(iter: I) -> Self {
    let mut modes: Vec<(String, ParamMap)> = Vec::new();
    for (k, p) in iter {
      let k = k.into();
      match modes.iter_mut().find(|(m, _)| *m == k) {
        Some(slot) => slot.1 = p,
        None => modes.push((k, p)),
      }
    }
    BuildModes { modes }
  }
}

impl<'de> Deserialize<'de> for BuildModes {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct BuildModesVisitor;

    impl<'de> Visitor<'de> for BuildModesVisitor {
      type Value = BuildModes;

      fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of build mode names to parameter mappings")
      }

      fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<BuildModes, A::Error> {
        let mut entries: Vec<(String, ParamMap)> = Vec::new();
        while let Some(entry) = access.next_entry::<String, ParamMap>()? {
          entries.push(entry);
        }
        Ok(entries.into_iter().collect())
      }
    }

    deserializer.deserialize_map(BuildModesVisitor)
  }
}

/// Optional capability: contribute computed parameters for one pull request and build mode.
pub trait ExtraParameters {
  fn extra_parameters(&self, pull: &PullRequest, build_mode: &str) -> Result<ParamMap>;
}

/// Computes the job display name and correlation tag for pull-request-triggered jobs.
#[derive(Debug, Clone)]
pub struct PrExtraParameters {
  pub organization: String,
  pub repository: String,
}

impl PrExtraParameters {
  pub fn new(organization: impl Into<String>, repository: impl Into<String>) -> Self {
    Self { organization: organization.into(), repository: repository.into() }
  }
}

/// Empty for the standard build mode, otherwise the mode name verbatim.
pub fn sub_context(build_mode: &str) -> &str {
  if build_mode == STANDARD_BUILD_MODE {
    ""
  } else {
    build_mode
  }
}

impl ExtraParameters for PrExtraParameters {
  fn extra_parameters(&self, pull: &PullRequest, build_mode: &str) -> Result<ParamMap> {
    let short_sha: String = pull.head.sha.chars().take(8).collect();
    let job_base_name = format!("{} PR {} {}", self.repository, pull.number, short_sha);
    let tag_base = format!(
      "{}:{}:{}:{}:{}:{}",
      self.organization,
      self.repository,
      pull.base.r#ref,
      pull.number,
      pull.head_repo_full_name(),
      pull.head.sha
    );

    let sub = sub_context(build_mode);
    // standard mode has an empty sub-context, leaving a trailing space
    let job_name = format!("{} {}", job_base_name, sub);
    let correlation_tag = if sub.is_empty() { tag_base } else { format!("{}:{}", tag_base, sub) };

    let mut extras = ParamMap::new();
    extras.insert(JOB_NAME_KEY, job_name);
    extras.insert(CORRELATION_TAG_KEY, correlation_tag);
    Ok(extras)
  }
}

/// Resolve one build mode: clone the template, then apply the hook (if any) on top.
pub fn resolve_build_mode(
  pull: &PullRequest,
  build_mode: &str,
  template: &ParamMap,
  extra: Option<&dyn ExtraParameters>,
) -> Result<ParamMap> {
  let mut params = template.clone();

  if let Some(hook) = extra {
    params.merge(hook.extra_parameters(pull, build_mode)?);
  }

  Ok(params)
}

/// Resolve every configured build mode, in configuration order.
pub fn build_job_parameters(
  pull: &PullRequest,
  job_parameters: &BuildModes,
  extra: Option<&dyn ExtraParameters>,
) -> Result<Vec<(String, ParamMap)>> {
  let mut out = Vec::with_capacity(job_parameters.len());

  for (build_mode, template) in job_parameters.iter() {
    let params = resolve_build_mode(pull, build_mode, template, extra)?;
    tracing::debug!(build_mode, ?params, "resolved job parameters");
    out.push((build_mode.to_string(), params));
  }

  Ok(out)
}
