//! Record update actions and the reduction function
//!
//! Every change to a [`RegistrationRecord`] goes through [`apply`], which takes
//! the current record by reference and returns the next one. Actions also have
//! a tagged data form so hosts can dispatch them from scripts:
//!
//! ```
//! use regform_core::action::{apply, FormAction};
//! use regform_core::{HobbyEntry, RegistrationRecord};
//!
//! let record = RegistrationRecord::new();
//! let record = apply(&record, FormAction::AddHobby(HobbyEntry::new("chess", "2y")));
//! let record = apply(&record, FormAction::DeleteHobby("chess".into()));
//! assert!(record.hobbies.is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::record::{Framework, HobbyEntry, RegistrationRecord};

/// The closed set of record updates
///
/// Field setters replace the field as-is; nothing is validated here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormAction {
    SetFirstName(Option<String>),
    SetLastName(Option<String>),
    SetDateOfBirth(Option<String>),
    SetEmail(Option<String>),
    SetFramework(Option<Framework>),
    SetVersion(Option<String>),
    /// Append to the end of the hobby list, duplicates included
    AddHobby(HobbyEntry),
    /// Remove every hobby with this name
    DeleteHobby(String),
    /// Any tag this build does not recognise; leaves the record untouched
    #[serde(other)]
    Unknown,
}

impl FormAction {
    /// Short tag used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            FormAction::SetFirstName(_) => "set_first_name",
            FormAction::SetLastName(_) => "set_last_name",
            FormAction::SetDateOfBirth(_) => "set_date_of_birth",
            FormAction::SetEmail(_) => "set_email",
            FormAction::SetFramework(_) => "set_framework",
            FormAction::SetVersion(_) => "set_version",
            FormAction::AddHobby(_) => "add_hobby",
            FormAction::DeleteHobby(_) => "delete_hobby",
            FormAction::Unknown => "unknown",
        }
    }
}

/// Produce the record that results from applying `action` to `record`
pub fn apply(record: &RegistrationRecord, action: FormAction) -> RegistrationRecord {
    let mut next = record.clone();
    match action {
        FormAction::SetFirstName(value) => next.first_name = value,
        FormAction::SetLastName(value) => next.last_name = value,
        FormAction::SetDateOfBirth(value) => next.date_of_birth = value,
        FormAction::SetEmail(value) => next.email = value,
        FormAction::SetFramework(value) => next.framework = value,
        FormAction::SetVersion(value) => next.version = value,
        FormAction::AddHobby(entry) => next.hobbies.push(entry),
        FormAction::DeleteHobby(name) => next.hobbies.retain(|hobby| hobby.name != name),
        FormAction::Unknown => {}
    }
    next
}
