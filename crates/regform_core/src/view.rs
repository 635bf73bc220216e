//! Rendered form state
//!
//! [`FormView`] is what a host draws: every value, option list, disabled flag
//! and banner, already derived. Hosts never inspect the form's internals.

use crate::record::{Framework, HobbyEntry};

/// Shown once registration succeeds
pub const REGISTERED_MESSAGE: &str = "User registered :)";

/// What sits in the submit slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitControl {
    Button { disabled: bool },
    /// Replaces the button while a check is pending
    Progress,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormView {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub email: String,
    pub frameworks: Vec<Framework>,
    pub framework: Option<Framework>,
    pub version: Option<String>,
    /// Empty while no framework is selected
    pub version_options: Vec<String>,
    pub version_disabled: bool,
    /// Drives both the field's error state and the error banner
    pub email_error: Option<String>,
    pub hobbies: Vec<HobbyEntry>,
    pub draft_name: String,
    pub draft_duration: String,
    pub add_hobby_disabled: bool,
    pub submit: SubmitControl,
    pub success_message: Option<&'static str>,
}

impl FormView {
    pub fn is_loading(&self) -> bool {
        self.submit == SubmitControl::Progress
    }

    pub fn submit_enabled(&self) -> bool {
        self.submit == SubmitControl::Button { disabled: false }
    }
}
