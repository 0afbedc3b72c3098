//! User preference store.
//!
//! Two optional fields (display name, home location) collected once
//! through a guided question flow and then held for the rest of the
//! session. Updates are unconditional last-write-wins; the pending
//! question is a pure function of which fields are still unset.

use serde::{Deserialize, Serialize};

/// Confirmation text returned by every successful preference update.
pub const UPDATE_CONFIRMATION: &str = "Preferences updated successfully!";

/// Which preference question is outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingPreference {
    Name,
    Location,
}

/// Session-scoped user preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub name: Option<String>,
    pub location: Option<String>,
}

impl Preferences {
    /// Store a value in the given field, replacing any previous value.
    ///
    /// Returns the confirmation text shown to the user.
    pub fn set(&mut self, field: PendingPreference, value: &str) -> &'static str {
        match field {
            PendingPreference::Name => self.name = Some(value.to_string()),
            PendingPreference::Location => self.location = Some(value.to_string()),
        }
        UPDATE_CONFIRMATION
    }

    /// The next field still awaiting an answer: name first, then
    /// location, then none.
    pub fn next_pending(&self) -> Option<PendingPreference> {
        if self.name.is_none() {
            Some(PendingPreference::Name)
        } else if self.location.is_none() {
            Some(PendingPreference::Location)
        } else {
            None
        }
    }

    /// The question text for a given field.
    ///
    /// The location question addresses the user by name, so it is only
    /// meaningful once the name is set.
    pub fn question_for(&self, field: PendingPreference) -> String {
        match field {
            PendingPreference::Name => {
                "Welcome! To personalize your experience, may I know your name?".to_string()
            }
            PendingPreference::Location => format!(
                "Thanks {}! Where are you located? (This helps with weather reports)",
                self.name.as_deref().unwrap_or_default()
            ),
        }
    }

    /// True if neither field has been set yet.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.location.is_none()
    }
}
