use std::collections::HashMap;
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::RwLock;

/// Parsed runtime debug/configuration toggles sourced from `FASTFLEX_*`
/// environment variables.
///
/// Values are captured once (via [`RuntimeToggles::from_env`]) and then
/// reused throughout a layout pass. Callers can also construct instances
/// manually to override environment-derived behavior when embedding the
/// library.
#[derive(Debug, Clone, Default)]
pub struct RuntimeToggles {
  raw: HashMap<String, String>,
  config: DebugConfig,
}

impl RuntimeToggles {
  /// Parse all `FASTFLEX_*` environment variables into a toggle map.
  pub fn from_env() -> Self {
    let raw = std::env::vars()
      .filter(|(k, _)| k.starts_with("FASTFLEX_"))
      .collect::<HashMap<_, _>>();
    let config = DebugConfig::from_env_map(&raw);
    Self { raw, config }
  }

  /// Construct a toggle set from a provided map of key/value pairs.
  pub fn from_map(raw: HashMap<String, String>) -> Self {
    let config = DebugConfig::from_env_map(&raw);
    Self { raw, config }
  }

  /// Returns parsed, typed debug configuration derived from the environment.
  pub fn config(&self) -> &DebugConfig {
    &self.config
  }

  /// Returns the raw string value for a toggle, if set.
  pub fn get(&self, key: &str) -> Option<&str> {
    self.raw.get(key).map(String::as_str)
  }

  /// Returns true when the toggle is present and truthy (`!= 0`/`false`/`off`).
  pub fn truthy(&self, key: &str) -> bool {
    self.truthy_with_default(key, false)
  }

  /// Returns true when the toggle is present and truthy, otherwise the provided default.
  pub fn truthy_with_default(&self, key: &str, default: bool) -> bool {
    if let Some(val) = self.config.bools.get(key) {
      *val
    } else {
      self
        .get(key)
        .map(|v| !matches_ignore_case(v, &["0", "false", "off"]))
        .unwrap_or(default)
    }
  }

  /// Parse a toggle as `usize`, returning `None` when unset or unparseable.
  pub fn usize(&self, key: &str) -> Option<usize> {
    if let Some(v) = self.config.usizes.get(key) {
      *v
    } else {
      self.get(key).and_then(|v| v.trim().parse::<usize>().ok())
    }
  }

  /// Parse a toggle as `usize`, falling back to a default when unset or invalid.
  pub fn usize_with_default(&self, key: &str, default: usize) -> usize {
    self.usize(key).unwrap_or(default)
  }

  /// Parse a toggle as `u128`, returning `None` when unset or unparseable.
  pub fn u128(&self, key: &str) -> Option<u128> {
    if let Some(v) = self.config.u128s.get(key) {
      *v
    } else {
      self.get(key).and_then(|v| v.trim().parse::<u128>().ok())
    }
  }
}

fn matches_ignore_case(value: &str, candidates: &[&str]) -> bool {
  let lower = value.trim().to_ascii_lowercase();
  candidates.iter().any(|c| lower == *c)
}

static DEFAULT_TOGGLES: OnceLock<Arc<RuntimeToggles>> = OnceLock::new();
static ACTIVE_TOGGLES: OnceLock<RwLock<Arc<RuntimeToggles>>> = OnceLock::new();

/// Returns the currently active runtime toggles.
///
/// Defaults to `RuntimeToggles::from_env()` if no overrides are installed.
pub fn runtime_toggles() -> Arc<RuntimeToggles> {
  ACTIVE_TOGGLES
    .get_or_init(|| {
      let default = default_toggles();
      RwLock::new(default)
    })
    .read()
    .expect("runtime toggles lock poisoned")
    .clone()
}

fn default_toggles() -> Arc<RuntimeToggles> {
  DEFAULT_TOGGLES
    .get_or_init(|| Arc::new(RuntimeToggles::from_env()))
    .clone()
}

/// Guard that restores the previous active toggles when dropped.
pub struct RuntimeTogglesGuard {
  previous: Arc<RuntimeToggles>,
}

impl Drop for RuntimeTogglesGuard {
  fn drop(&mut self) {
    if let Some(lock) = ACTIVE_TOGGLES.get() {
      if let Ok(mut guard) = lock.write() {
        *guard = self.previous.clone();
      }
    }
  }
}

/// Install the provided toggles as the active set for the duration of the returned guard.
pub fn set_runtime_toggles(toggles: Arc<RuntimeToggles>) -> RuntimeTogglesGuard {
  let previous = ACTIVE_TOGGLES
    .get_or_init(|| RwLock::new(default_toggles()))
    .write()
    .expect("runtime toggles lock poisoned")
    .clone();
  if let Some(lock) = ACTIVE_TOGGLES.get() {
    if let Ok(mut guard) = lock.write() {
      *guard = toggles;
    }
  }
  RuntimeTogglesGuard { previous }
}

/// Convenience helper to run a closure with a temporary toggles override.
pub fn with_runtime_toggles<T>(toggles: Arc<RuntimeToggles>, f: impl FnOnce() -> T) -> T {
  let guard = set_runtime_toggles(toggles);
  let result = f();
  drop(guard);
  result
}

/// Typed view over the known toggles. Unknown `FASTFLEX_*` variables stay
/// available through the raw getters on [`RuntimeToggles`].
#[derive(Debug, Clone, Default)]
pub struct DebugConfig {
  pub bools: HashMap<&'static str, bool>,
  pub usizes: HashMap<&'static str, Option<usize>>,
  pub u128s: HashMap<&'static str, Option<u128>>,
}

impl DebugConfig {
  pub fn from_env_map(raw: &HashMap<String, String>) -> Self {
    let mut config = DebugConfig::default();
    config.insert_bool(
      "FASTFLEX_PRINT_TREE",
      truthy(raw.get("FASTFLEX_PRINT_TREE"), false),
    );
    config.insert_bool(
      "FASTFLEX_PRINT_CHANGES",
      truthy(raw.get("FASTFLEX_PRINT_CHANGES"), false),
    );
    config.insert_bool(
      "FASTFLEX_PRINT_SKIPS",
      truthy(raw.get("FASTFLEX_PRINT_SKIPS"), false),
    );
    config.insert_bool(
      "FASTFLEX_LAYOUT_STATS",
      raw.contains_key("FASTFLEX_LAYOUT_STATS"),
    );
    config.insert_bool(
      "FASTFLEX_DISABLE_LAYOUT_CACHE",
      truthy(raw.get("FASTFLEX_DISABLE_LAYOUT_CACHE"), false),
    );
    config.insert_u128(
      "FASTFLEX_LOG_SLOW_LAYOUT_MS",
      raw
        .get("FASTFLEX_LOG_SLOW_LAYOUT_MS")
        .and_then(|v| v.trim().parse::<u128>().ok()),
    );
    config
  }

  fn insert_bool(&mut self, key: &'static str, value: bool) {
    self.bools.insert(key, value);
  }

  fn insert_u128(&mut self, key: &'static str, value: Option<u128>) {
    self.u128s.insert(key, value);
  }
}

fn truthy(raw: Option<&String>, default: bool) -> bool {
  raw
    .map(|v| !matches_ignore_case(v, &["0", "false", "off"]))
    .unwrap_or(default)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  struct EnvGuard {
    vars: Vec<(String, Option<String>)>,
  }

  impl EnvGuard {
    fn set(pairs: &[(&str, &str)]) -> Self {
      let vars = pairs
        .iter()
        .map(|(key, val)| {
          let key = key.to_string();
          let prev = std::env::var(key.clone()).ok();
          std::env::set_var(key.clone(), val);
          (key, prev)
        })
        .collect();
      Self { vars }
    }
  }

  impl Drop for EnvGuard {
    fn drop(&mut self) {
      for (key, prev) in self.vars.iter().rev() {
        if let Some(val) = prev {
          std::env::set_var(key, val);
        } else {
          std::env::remove_var(key);
        }
      }
    }
  }

  #[test]
  fn test_parses_debug_config_from_map() {
    let raw = HashMap::from([
      ("FASTFLEX_PRINT_CHANGES".to_string(), "1".to_string()),
      ("FASTFLEX_PRINT_SKIPS".to_string(), "off".to_string()),
      ("FASTFLEX_LOG_SLOW_LAYOUT_MS".to_string(), "150".to_string()),
      ("FASTFLEX_CUSTOM_FLAG".to_string(), "yes".to_string()),
    ]);
    let toggles = RuntimeToggles::from_map(raw);

    assert!(toggles.truthy("FASTFLEX_PRINT_CHANGES"));
    assert!(!toggles.truthy("FASTFLEX_PRINT_SKIPS"));
    assert!(!toggles.truthy("FASTFLEX_PRINT_TREE"));
    assert_eq!(toggles.u128("FASTFLEX_LOG_SLOW_LAYOUT_MS"), Some(150));
    // Unknown keys still resolve through the raw map.
    assert!(toggles.truthy("FASTFLEX_CUSTOM_FLAG"));
    assert_eq!(toggles.get("FASTFLEX_CUSTOM_FLAG"), Some("yes"));
  }

  #[test]
  fn test_parses_debug_config_from_env() {
    let _guard = EnvGuard::set(&[
      ("FASTFLEX_PRINT_TREE", "1"),
      ("FASTFLEX_DISABLE_LAYOUT_CACHE", "true"),
      ("FASTFLEX_LOG_SLOW_LAYOUT_MS", "250"),
    ]);

    let toggles = RuntimeToggles::from_env();

    assert!(toggles.truthy("FASTFLEX_PRINT_TREE"));
    assert!(toggles.truthy("FASTFLEX_DISABLE_LAYOUT_CACHE"));
    assert_eq!(toggles.u128("FASTFLEX_LOG_SLOW_LAYOUT_MS"), Some(250));
  }

  #[test]
  fn test_override_guard_restores_previous_toggles() {
    let overrides = Arc::new(RuntimeToggles::from_map(HashMap::from([(
      "FASTFLEX_PRINT_CHANGES".to_string(),
      "1".to_string(),
    )])));
    let before = runtime_toggles().truthy("FASTFLEX_PRINT_CHANGES");
    {
      let _guard = set_runtime_toggles(overrides);
      assert!(runtime_toggles().truthy("FASTFLEX_PRINT_CHANGES"));
    }
    assert_eq!(runtime_toggles().truthy("FASTFLEX_PRINT_CHANGES"), before);

    let overrides = Arc::new(RuntimeToggles::from_map(HashMap::from([(
      "FASTFLEX_LAYOUT_STATS".to_string(),
      "1".to_string(),
    )])));
    let inside = with_runtime_toggles(overrides, || {
      runtime_toggles().truthy("FASTFLEX_LAYOUT_STATS")
    });
    assert!(inside);
  }
}
