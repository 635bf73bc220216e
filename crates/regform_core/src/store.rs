//! Form state store
//!
//! Holds the current [`RegistrationRecord`] and moves it forward only through
//! [`FormAction`]s. Each dispatch replaces the record with the result of
//! [`apply`] and then notifies subscribers with the new value.
//!
//! # Example
//!
//! ```
//! use regform_core::action::FormAction;
//! use regform_core::store::FormStore;
//!
//! let mut store = FormStore::new();
//! let handle = store.subscribe(|record| {
//!     println!("email is now {:?}", record.email);
//! });
//!
//! store.dispatch(FormAction::SetEmail(Some("ada@example.com".into())));
//! assert_eq!(store.record().email.as_deref(), Some("ada@example.com"));
//!
//! store.unsubscribe(handle);
//! ```

use slotmap::{new_key_type, SlotMap};
use tracing::debug;

use crate::action::{apply, FormAction};
use crate::record::RegistrationRecord;

new_key_type! {
    /// Unique identifier for a store subscriber
    pub struct SubscriptionId;
}

type Subscriber = Box<dyn Fn(&RegistrationRecord) + Send + Sync>;

/// Owner of the in-progress registration record
pub struct FormStore {
    record: RegistrationRecord,
    subscribers: SlotMap<SubscriptionId, Subscriber>,
}

impl FormStore {
    /// Create a store holding an empty record
    pub fn new() -> Self {
        Self::with_record(RegistrationRecord::default())
    }

    /// Create a store starting from an existing record
    pub fn with_record(record: RegistrationRecord) -> Self {
        Self {
            record,
            subscribers: SlotMap::with_key(),
        }
    }

    /// Current record
    pub fn record(&self) -> &RegistrationRecord {
        &self.record
    }

    /// Apply an action and notify subscribers
    pub fn dispatch(&mut self, action: FormAction) {
        debug!(action = action.kind(), "dispatch");
        self.record = apply(&self.record, action);
        self.notify_subscribers();
    }

    /// Subscribe to record changes
    ///
    /// The callback runs after every dispatch, in subscription order.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionHandle
    where
        F: Fn(&RegistrationRecord) + Send + Sync + 'static,
    {
        SubscriptionHandle {
            id: self.subscribers.insert(Box::new(callback)),
        }
    }

    /// Stop notifying a subscriber; returns false if it was already removed
    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        self.subscribers.remove(handle.id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify_subscribers(&self) {
        for callback in self.subscribers.values() {
            callback(&self.record);
        }
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FormStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormStore")
            .field("record", &self.record)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Handle for unsubscribing from store updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionHandle {
    id: SubscriptionId,
}
