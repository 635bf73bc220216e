//! The registration record being composed by the user

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// Frontend framework the user can pick
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    Angular,
    React,
    Vue,
}

impl Framework {
    /// All frameworks, in display order
    pub const ALL: [Framework; 3] = [Framework::Angular, Framework::React, Framework::Vue];

    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::Angular => "angular",
            Framework::React => "react",
            Framework::Vue => "vue",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Framework::ALL
            .into_iter()
            .find(|framework| framework.as_str() == s)
            .ok_or_else(|| FormError::UnknownFramework(s.to_string()))
    }
}

/// A committed hobby row
///
/// Rows are identified by `name` only; two rows may share a name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HobbyEntry {
    pub name: String,
    pub duration: String,
}

impl HobbyEntry {
    pub fn new(name: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration: duration.into(),
        }
    }
}

/// Everything the form collects
///
/// Only [`crate::action::apply`] produces new records; fields are public so
/// hosts and tests can read them directly.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Date string as produced by a date input (`YYYY-MM-DD`)
    pub date_of_birth: Option<String>,
    pub email: Option<String>,
    pub framework: Option<Framework>,
    pub version: Option<String>,
    pub hobbies: Vec<HobbyEntry>,
}

impl RegistrationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when every field a registration needs holds a non-empty value
    ///
    /// Hobbies are optional.
    pub fn is_complete(&self) -> bool {
        let texts = [
            &self.first_name,
            &self.last_name,
            &self.date_of_birth,
            &self.email,
            &self.version,
        ];
        texts.iter().all(|field| is_filled(field)) && self.framework.is_some()
    }
}

pub(crate) fn is_filled(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_record() -> RegistrationRecord {
        RegistrationRecord {
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
            date_of_birth: Some("1815-12-10".into()),
            email: Some("ada@example.com".into()),
            framework: Some(Framework::Vue),
            version: Some("3.2.1".into()),
            hobbies: Vec::new(),
        }
    }

    #[test]
    fn test_framework_parse_and_display() {
        assert_eq!("react".parse::<Framework>().unwrap(), Framework::React);
        assert_eq!(Framework::Angular.to_string(), "angular");
        assert!(matches!(
            "svelte".parse::<Framework>(),
            Err(FormError::UnknownFramework(name)) if name == "svelte"
        ));
    }

    #[test]
    fn test_complete_without_hobbies() {
        assert!(complete_record().is_complete());
        assert!(!RegistrationRecord::new().is_complete());
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let mut record = complete_record();
        record.last_name = Some(String::new());
        assert!(!record.is_complete());

        let mut record = complete_record();
        record.framework = None;
        assert!(!record.is_complete());
    }
}
