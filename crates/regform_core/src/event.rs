//! Interaction events delivered by a host
//!
//! Events carry raw widget values (selection values arrive as strings) and are
//! decoded from data so an interaction can be scripted:
//!
//! ```json
//! [
//!   { "event": "email_changed", "value": "ada@example.com" },
//!   { "event": "framework_selected", "value": "vue" },
//!   { "event": "submit_clicked" }
//! ]
//! ```

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum FormEvent {
    FirstNameChanged(String),
    LastNameChanged(String),
    DateOfBirthChanged(String),
    EmailChanged(String),
    FrameworkSelected(String),
    VersionSelected(String),
    HobbyNameChanged(String),
    HobbyDurationChanged(String),
    AddHobbyClicked,
    /// Delete button on a hobby row; removes every row with this name
    DeleteHobbyClicked(String),
    /// Typing into a committed hobby row at this position
    HobbyRowEdited(usize),
    SubmitClicked,
}
