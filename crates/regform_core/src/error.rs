//! Error types for regform_core

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned when an operation is attempted that the rendered form
/// would have disabled, or when configuration cannot be loaded.
///
/// None of these change form state: the form stays editable after every one.
#[derive(Error, Debug)]
pub enum FormError {
    /// Hobby draft committed with an empty name or duration
    #[error("hobby draft needs both a name and a duration")]
    IncompleteHobby,

    /// Version chosen before a framework
    #[error("select a framework before choosing a version")]
    VersionWithoutFramework,

    /// Version not offered for the selected framework
    #[error("version '{version}' is not available for {framework}")]
    UnknownVersion { framework: String, version: String },

    /// Framework name not present in the configuration
    #[error("unknown framework '{0}'")]
    UnknownFramework(String),

    /// No hobby row at the given position
    #[error("no hobby at index {0}")]
    NoSuchHobby(usize),

    /// Submit requested while required fields are empty or the email is invalid
    #[error("form is incomplete or has an email error")]
    SubmissionBlocked,

    /// Submit requested while a previous attempt is still pending
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// Submit requested after a successful registration
    #[error("user is already registered")]
    AlreadyRegistered,

    /// Configuration content is inconsistent
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`crate::FormConfig`]
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration could not be serialized
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Result type for regform_core operations
pub type Result<T> = std::result::Result<T, FormError>;
