//! Email validation
//!
//! The format check is a deliberately loose heuristic, not RFC 5322: an
//! address passes when it is longer than three characters and contains both
//! `@` and `.`. The uniqueness check lives in [`crate::submission`] because it
//! only runs against the backend at submit time.

/// Shown when the email fails the format heuristic
pub const EMAIL_NOT_VALID: &str = "Email is not valid";

/// Shown when the backend reports the email as taken
pub const EMAIL_ALREADY_EXISTS: &str = "Email is already exists";

/// Format error for an email value, if any
///
/// Empty or unset emails have no error; the submit guard catches them.
pub fn email_format_error(email: Option<&str>) -> Option<&'static str> {
    match email {
        None | Some("") => None,
        Some(email) if is_plausible_email(email) => None,
        Some(_) => Some(EMAIL_NOT_VALID),
    }
}

fn is_plausible_email(email: &str) -> bool {
    email.chars().count() > 3 && email.contains('@') && email.contains('.')
}

/// Validation state as the view sees it
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationState {
    /// Format error, or the last submission conflict while the email is unchanged
    pub email_error: Option<String>,
    /// A submission check is pending
    pub loading: bool,
    /// Registration succeeded
    pub finished: bool,
}
