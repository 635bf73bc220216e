//! Form configuration
//!
//! The framework catalogue, the simulated backend's denylist and its delay are
//! plain data so hosts and tests can override them. A `regform.toml` only needs
//! to name what it changes:
//!
//! ```toml
//! submit_delay_ms = 0
//!
//! [[frameworks]]
//! framework = "vue"
//! versions = ["3.1.1", "3.2.1", "3.3.3"]
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FormError, Result};
use crate::record::Framework;

/// File name looked up by [`FormConfig::load_from_dir`]
pub const CONFIG_FILE: &str = "regform.toml";

/// Versions offered for one framework
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FrameworkVersions {
    pub framework: Framework,
    pub versions: Vec<String>,
}

impl FrameworkVersions {
    pub fn new(framework: Framework, versions: &[&str]) -> Self {
        Self {
            framework,
            versions: versions.iter().map(|v| v.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormConfig {
    /// Emails the simulated backend treats as already registered
    #[serde(default = "default_denylist")]
    pub denylist: Vec<String>,
    /// Simulated round-trip time for a submission
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
    /// Selectable frameworks, in display order
    #[serde(default = "default_frameworks")]
    pub frameworks: Vec<FrameworkVersions>,
}

fn default_frameworks() -> Vec<FrameworkVersions> {
    vec![
        FrameworkVersions::new(Framework::Angular, &["1.1.1", "1.2.1", "1.3.3"]),
        FrameworkVersions::new(Framework::React, &["2.1.1", "2.2.1", "2.3.3"]),
        FrameworkVersions::new(Framework::Vue, &["3.1.1", "3.2.1", "3.3.3"]),
    ]
}

fn default_denylist() -> Vec<String> {
    vec!["test@test.test".to_string()]
}

fn default_submit_delay_ms() -> u64 {
    2000
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            denylist: default_denylist(),
            submit_delay_ms: default_submit_delay_ms(),
            frameworks: default_frameworks(),
        }
    }
}

impl FormConfig {
    /// Load `regform.toml` from a directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILE);
        let content = fs::read_to_string(&config_path).map_err(|source| FormError::Io {
            path: config_path.clone(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FormConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that each framework appears once and offers at least one version
    pub fn validate(&self) -> Result<()> {
        for (i, entry) in self.frameworks.iter().enumerate() {
            if self.frameworks[..i]
                .iter()
                .any(|earlier| earlier.framework == entry.framework)
            {
                return Err(FormError::Config(format!(
                    "framework '{}' is listed more than once",
                    entry.framework
                )));
            }
            if entry.versions.is_empty() {
                return Err(FormError::Config(format!(
                    "framework '{}' has no versions",
                    entry.framework
                )));
            }
        }
        Ok(())
    }

    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay_ms = delay.as_millis() as u64;
        self
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    /// Frameworks in display order
    pub fn frameworks(&self) -> impl Iterator<Item = Framework> + '_ {
        self.frameworks.iter().map(|entry| entry.framework)
    }

    pub fn offers(&self, framework: Framework) -> bool {
        self.frameworks().any(|f| f == framework)
    }

    /// Versions selectable for `framework`; empty when it is not configured
    pub fn versions(&self, framework: Framework) -> &[String] {
        self.frameworks
            .iter()
            .find(|entry| entry.framework == framework)
            .map(|entry| entry.versions.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_denylisted(&self, email: &str) -> bool {
        self.denylist.iter().any(|denied| denied == email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FormConfig::default();
        assert_eq!(
            config.frameworks().collect::<Vec<_>>(),
            vec![Framework::Angular, Framework::React, Framework::Vue]
        );
        assert_eq!(config.versions(Framework::Vue), ["3.1.1", "3.2.1", "3.3.3"]);
        assert_eq!(config.versions(Framework::React), ["2.1.1", "2.2.1", "2.3.3"]);
        assert!(config.is_denylisted("test@test.test"));
        assert_eq!(config.submit_delay(), Duration::from_millis(2000));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = FormConfig::from_toml_str(
            r#"
            submit_delay_ms = 0
            denylist = ["taken@example.com"]
            "#,
        )
        .unwrap();

        assert_eq!(config.submit_delay(), Duration::ZERO);
        assert!(config.is_denylisted("taken@example.com"));
        assert!(!config.is_denylisted("test@test.test"));
        assert_eq!(config.frameworks, default_frameworks());
    }

    #[test]
    fn test_framework_override() {
        let config = FormConfig::from_toml_str(
            r#"
            [[frameworks]]
            framework = "react"
            versions = ["18.2.0"]
            "#,
        )
        .unwrap();

        assert!(config.offers(Framework::React));
        assert!(!config.offers(Framework::Vue));
        assert!(config.versions(Framework::Vue).is_empty());
    }

    #[test]
    fn test_rejects_duplicate_or_empty_frameworks() {
        let duplicate = r#"
            [[frameworks]]
            framework = "vue"
            versions = ["1"]
            [[frameworks]]
            framework = "vue"
            versions = ["2"]
        "#;
        assert!(matches!(
            FormConfig::from_toml_str(duplicate),
            Err(FormError::Config(_))
        ));

        let empty = r#"
            [[frameworks]]
            framework = "angular"
            versions = []
        "#;
        assert!(matches!(FormConfig::from_toml_str(empty), Err(FormError::Config(_))));
    }

    #[test]
    fn test_unknown_framework_fails_to_parse() {
        let config = r#"
            [[frameworks]]
            framework = "svelte"
            versions = ["4.0.0"]
        "#;
        assert!(matches!(FormConfig::from_toml_str(config), Err(FormError::Parse(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = FormConfig::default().with_submit_delay(Duration::from_millis(150));
        let text = config.to_toml().unwrap();
        assert_eq!(FormConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let dir = std::env::temp_dir().join("regform-config-missing-test");
        assert!(matches!(
            FormConfig::load_from_dir(&dir),
            Err(FormError::Io { .. })
        ));
    }
}
