/* src/server/core/rust/src/config.rs */

use std::path::Path;
use std::time::Duration;

use inertia_engine::{DEFAULT_MOUNT_ID, InertiaError};
use serde::Deserialize;

pub const DEFAULT_ROOT_VIEW: &str = "app";
pub const DEFAULT_SSR_URL: &str = "http://127.0.0.1:13714";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InertiaConfig {
  #[serde(default = "default_root_view")]
  pub root_view: String,
  #[serde(default = "default_mount_id")]
  pub mount_id: String,
  /// History encryption when a response does not override it.
  #[serde(default)]
  pub encrypt_history: bool,
  #[serde(default)]
  pub ssr: SsrConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SsrConfig {
  #[serde(default)]
  pub enabled: bool,
  #[serde(default = "default_ssr_url")]
  pub url: String,
  #[serde(default = "default_ssr_timeout_ms")]
  pub timeout_ms: u64,
}

fn default_root_view() -> String {
  DEFAULT_ROOT_VIEW.to_string()
}

fn default_mount_id() -> String {
  DEFAULT_MOUNT_ID.to_string()
}

fn default_ssr_url() -> String {
  DEFAULT_SSR_URL.to_string()
}

fn default_ssr_timeout_ms() -> u64 {
  1500
}

impl Default for SsrConfig {
  fn default() -> Self {
    Self { enabled: false, url: default_ssr_url(), timeout_ms: default_ssr_timeout_ms() }
  }
}

impl SsrConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_millis(self.timeout_ms)
  }

  /// Endpoint the page object is posted to.
  pub fn render_url(&self) -> String {
    format!("{}/render", self.url.trim_end_matches('/'))
  }
}

impl Default for InertiaConfig {
  fn default() -> Self {
    Self {
      root_view: default_root_view(),
      mount_id: default_mount_id(),
      encrypt_history: false,
      ssr: SsrConfig::default(),
    }
  }
}

impl InertiaConfig {
  pub fn from_toml_str(content: &str) -> Result<Self, InertiaError> {
    toml::from_str(content).map_err(|e| InertiaError::config(e.to_string()))
  }

  /// Read a TOML file, then apply `INERTIA_SSR_ENABLED` / `INERTIA_SSR_URL`.
  pub fn load(path: &Path) -> Result<Self, InertiaError> {
    let content = std::fs::read_to_string(path)
      .map_err(|e| InertiaError::config(format!("failed to read {}: {e}", path.display())))?;
    let mut config = Self::from_toml_str(&content)?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    Ok(config)
  }

  pub fn apply_env_overrides<F>(&mut self, var: F)
  where
    F: Fn(&str) -> Option<String>,
  {
    if let Some(enabled) = var("INERTIA_SSR_ENABLED") {
      self.ssr.enabled = matches!(enabled.trim(), "1" | "true" | "yes" | "on");
    }
    if let Some(url) = var("INERTIA_SSR_URL").filter(|u| !u.is_empty()) {
      self.ssr.url = url;
    }
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  #[test]
  fn defaults() {
    let config = InertiaConfig::default();
    assert_eq!(config.root_view, "app");
    assert_eq!(config.mount_id, "app");
    assert!(!config.encrypt_history);
    assert!(!config.ssr.enabled);
    assert_eq!(config.ssr.url, "http://127.0.0.1:13714");
    assert_eq!(config.ssr.timeout(), Duration::from_millis(1500));
  }

  #[test]
  fn empty_toml_is_default() {
    assert_eq!(InertiaConfig::from_toml_str("").unwrap(), InertiaConfig::default());
  }

  #[test]
  fn parses_sections() {
    let config = InertiaConfig::from_toml_str(
      r#"
root_view = "admin"
encrypt_history = true

[ssr]
enabled = true
url = "http://ssr.internal:13714/"
timeout_ms = 250
"#,
    )
    .unwrap();
    assert_eq!(config.root_view, "admin");
    assert!(config.encrypt_history);
    assert!(config.ssr.enabled);
    assert_eq!(config.ssr.render_url(), "http://ssr.internal:13714/render");
    assert_eq!(config.ssr.timeout_ms, 250);
  }

  #[test]
  fn invalid_toml_is_config_error() {
    let err = InertiaConfig::from_toml_str("root_view = [").unwrap_err();
    assert_eq!(err.code(), "CONFIG");
  }

  #[test]
  fn env_overrides() {
    let vars: HashMap<&str, &str> =
      [("INERTIA_SSR_ENABLED", "true"), ("INERTIA_SSR_URL", "http://node:9000")].into();
    let mut config = InertiaConfig::default();
    config.apply_env_overrides(|k| vars.get(k).map(|v| (*v).to_string()));
    assert!(config.ssr.enabled);
    assert_eq!(config.ssr.url, "http://node:9000");
  }

  #[test]
  fn load_missing_file_is_config_error() {
    let err = InertiaConfig::load(Path::new("/definitely/not/here/inertia.toml")).unwrap_err();
    assert_eq!(err.code(), "CONFIG");
  }
}
