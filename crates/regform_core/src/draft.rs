//! Single-hobby editing buffer
//!
//! The draft sits beside the committed hobby list. Committing it yields a
//! [`HobbyEntry`] for the form to dispatch and clears the buffer.

use tracing::debug;

use crate::error::{FormError, Result};
use crate::record::{is_filled, HobbyEntry};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HobbyDraft {
    pub name: Option<String>,
    pub duration: Option<String>,
}

impl HobbyDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update_name(&mut self, text: impl Into<String>) {
        self.name = Some(text.into());
    }

    pub fn update_duration(&mut self, text: impl Into<String>) {
        self.duration = Some(text.into());
    }

    /// Whether the "add" control is enabled
    pub fn can_commit(&self) -> bool {
        is_filled(&self.name) && is_filled(&self.duration)
    }

    /// Take the drafted entry and reset the buffer
    ///
    /// Leaves the draft untouched when either field is empty.
    pub fn commit(&mut self) -> Result<HobbyEntry> {
        if !self.can_commit() {
            return Err(FormError::IncompleteHobby);
        }
        let draft = std::mem::take(self);
        let entry = HobbyEntry {
            name: draft.name.unwrap_or_default(),
            duration: draft.duration.unwrap_or_default(),
        };
        debug!(name = %entry.name, duration = %entry.duration, "hobby draft committed");
        Ok(entry)
    }

    /// Load a committed entry into the buffer for re-editing
    ///
    /// Only the draft changes; the entry in the hobby list keeps its values.
    pub fn edit_existing(&mut self, entry: &HobbyEntry) {
        self.name = Some(entry.name.clone());
        self.duration = Some(entry.duration.clone());
    }

    pub fn is_empty(&self) -> bool {
        !is_filled(&self.name) && !is_filled(&self.duration)
    }
}
