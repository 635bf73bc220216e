//! Regform Core
//!
//! Headless state for a single registration form:
//!
//! - **Record Store**: the in-progress registration, updated only through
//!   [`FormAction`]s reduced by a pure [`action::apply`]
//! - **Hobby Draft**: an editing buffer for the next hobby row
//! - **Validation**: a reactive email format check plus an async uniqueness
//!   check against a (simulated) backend
//! - **Submission Flow**: idle, loading and success states gating registration
//! - **View**: a derived snapshot of everything a host renders
//!
//! # Example
//!
//! ```rust
//! use regform_core::{FormEvent, RegistrationForm};
//!
//! let mut form: RegistrationForm = RegistrationForm::default();
//!
//! form.handle(FormEvent::FrameworkSelected("vue".into())).unwrap();
//! form.handle(FormEvent::EmailChanged("ab@".into())).unwrap();
//!
//! let view = form.view();
//! assert_eq!(view.version_options, ["3.1.1", "3.2.1", "3.3.3"]);
//! assert_eq!(view.email_error.as_deref(), Some("Email is not valid"));
//! assert!(!view.submit_enabled());
//! ```

pub mod action;
pub mod config;
pub mod draft;
pub mod error;
pub mod event;
pub mod form;
pub mod record;
pub mod store;
pub mod submission;
pub mod validation;
pub mod view;

pub use action::{apply, FormAction};
pub use config::{FormConfig, FrameworkVersions, CONFIG_FILE};
pub use draft::HobbyDraft;
pub use error::{FormError, Result};
pub use event::FormEvent;
pub use form::{Dispatched, RegistrationForm};
pub use record::{Framework, HobbyEntry, RegistrationRecord};
pub use store::{FormStore, SubscriptionHandle, SubscriptionId};
pub use submission::{
    PendingCheck, RegistrationBackend, SimulatedBackend, SubmissionFlow, SubmissionOutcome,
    SubmissionPhase,
};
pub use validation::{email_format_error, ValidationState, EMAIL_ALREADY_EXISTS, EMAIL_NOT_VALID};
pub use view::{FormView, SubmitControl, REGISTERED_MESSAGE};
