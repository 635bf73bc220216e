//! The registration form component
//!
//! [`RegistrationForm`] ties the record store, the hobby draft, email
//! validation and the submission flow together. Hosts feed it
//! [`FormEvent`]s (or call the named methods) and render [`FormView`]
//! snapshots.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use regform_core::{Framework, FormConfig, RegistrationForm};
//!
//! let config = FormConfig::default().with_submit_delay(Duration::ZERO);
//! let mut form = RegistrationForm::new(config);
//!
//! form.set_first_name("Ada");
//! form.set_last_name("Lovelace");
//! form.set_date_of_birth("1815-12-10");
//! form.set_email("ada@example.com");
//! form.select_framework(Framework::Vue).unwrap();
//! form.select_version("3.2.1").unwrap();
//! assert!(form.can_submit());
//!
//! let rt = tokio::runtime::Builder::new_current_thread()
//!     .enable_time()
//!     .build()
//!     .unwrap();
//! rt.block_on(form.submit()).unwrap();
//! assert!(form.validation().finished);
//! ```
//!
//! Choosing a framework clears a version the new framework does not offer.

use std::fmt;

use tracing::{debug, info, warn};

use crate::action::FormAction;
use crate::config::FormConfig;
use crate::draft::HobbyDraft;
use crate::error::{FormError, Result};
use crate::event::FormEvent;
use crate::record::{Framework, RegistrationRecord};
use crate::store::{FormStore, SubscriptionHandle};
use crate::submission::{
    PendingCheck, RegistrationBackend, SimulatedBackend, SubmissionFlow, SubmissionOutcome,
};
use crate::validation::{email_format_error, ValidationState};
use crate::view::{FormView, SubmitControl, REGISTERED_MESSAGE};

/// What handling an event produced
pub enum Dispatched {
    /// State changed synchronously
    Applied,
    /// A submission started; await the check and pass the outcome to
    /// [`RegistrationForm::finish_submit`]
    Submitting(PendingCheck),
}

impl fmt::Debug for Dispatched {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatched::Applied => f.write_str("Applied"),
            Dispatched::Submitting(_) => f.write_str("Submitting(..)"),
        }
    }
}

pub struct RegistrationForm<B = SimulatedBackend> {
    config: FormConfig,
    store: FormStore,
    draft: HobbyDraft,
    submission: SubmissionFlow,
    backend: B,
}

impl RegistrationForm<SimulatedBackend> {
    /// Create a form backed by the simulated server described in `config`
    pub fn new(config: FormConfig) -> Self {
        let backend = SimulatedBackend::from_config(&config);
        Self::with_backend(config, backend)
    }
}

impl Default for RegistrationForm<SimulatedBackend> {
    fn default() -> Self {
        Self::new(FormConfig::default())
    }
}

impl<B: RegistrationBackend> RegistrationForm<B> {
    pub fn with_backend(config: FormConfig, backend: B) -> Self {
        Self {
            config,
            store: FormStore::new(),
            draft: HobbyDraft::new(),
            submission: SubmissionFlow::new(),
            backend,
        }
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn record(&self) -> &RegistrationRecord {
        self.store.record()
    }

    pub fn draft(&self) -> &HobbyDraft {
        &self.draft
    }

    pub fn submission(&self) -> &SubmissionFlow {
        &self.submission
    }

    /// Subscribe to record changes; see [`FormStore::subscribe`]
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionHandle
    where
        F: Fn(&RegistrationRecord) + Send + Sync + 'static,
    {
        self.store.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, handle: SubscriptionHandle) -> bool {
        self.store.unsubscribe(handle)
    }

    // =========================================================================
    // Personal fields
    // =========================================================================

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        self.store.dispatch(FormAction::SetFirstName(Some(value.into())));
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        self.store.dispatch(FormAction::SetLastName(Some(value.into())));
    }

    pub fn set_date_of_birth(&mut self, value: impl Into<String>) {
        self.store
            .dispatch(FormAction::SetDateOfBirth(Some(value.into())));
    }

    /// Replace the email; any earlier submission conflict no longer applies
    pub fn set_email(&mut self, value: impl Into<String>) {
        self.store.dispatch(FormAction::SetEmail(Some(value.into())));
        self.submission.clear_conflict();
        if let Some(error) = email_format_error(self.record().email.as_deref()) {
            debug!(error, "email format check failed");
        }
    }

    pub fn select_framework(&mut self, framework: Framework) -> Result<()> {
        if !self.config.offers(framework) {
            warn!(%framework, "framework is not configured");
            return Err(FormError::UnknownFramework(framework.to_string()));
        }
        self.store
            .dispatch(FormAction::SetFramework(Some(framework)));

        let stale = self
            .record()
            .version
            .as_ref()
            .is_some_and(|version| !self.config.versions(framework).contains(version));
        if stale {
            debug!(%framework, "clearing version not offered by new framework");
            self.store.dispatch(FormAction::SetVersion(None));
        }
        Ok(())
    }

    /// Choose one of [`Self::version_options`]
    pub fn select_version(&mut self, version: impl Into<String>) -> Result<()> {
        let version = version.into();
        let framework = self
            .record()
            .framework
            .ok_or(FormError::VersionWithoutFramework)?;
        if !self.config.versions(framework).contains(&version) {
            return Err(FormError::UnknownVersion {
                framework: framework.to_string(),
                version,
            });
        }
        self.store.dispatch(FormAction::SetVersion(Some(version)));
        Ok(())
    }

    /// Versions selectable for the current framework
    pub fn version_options(&self) -> &[String] {
        match self.record().framework {
            Some(framework) => self.config.versions(framework),
            None => &[],
        }
    }

    // =========================================================================
    // Hobbies
    // =========================================================================

    pub fn update_draft_name(&mut self, text: impl Into<String>) {
        self.draft.update_name(text);
    }

    pub fn update_draft_duration(&mut self, text: impl Into<String>) {
        self.draft.update_duration(text);
    }

    pub fn can_add_hobby(&self) -> bool {
        self.draft.can_commit()
    }

    /// Commit the draft to the end of the hobby list
    pub fn add_hobby(&mut self) -> Result<()> {
        let entry = self.draft.commit()?;
        self.store.dispatch(FormAction::AddHobby(entry));
        Ok(())
    }

    /// Remove every hobby named `name`
    pub fn delete_hobby(&mut self, name: impl Into<String>) {
        self.store.dispatch(FormAction::DeleteHobby(name.into()));
    }

    /// Load the hobby at `index` into the draft
    ///
    /// The committed row is not changed by later draft edits.
    pub fn edit_hobby(&mut self, index: usize) -> Result<()> {
        let entry = self
            .record()
            .hobbies
            .get(index)
            .cloned()
            .ok_or(FormError::NoSuchHobby(index))?;
        self.draft.edit_existing(&entry);
        Ok(())
    }

    // =========================================================================
    // Validation & submission
    // =========================================================================

    /// Current email message: a format error, else the last conflict
    pub fn email_error(&self) -> Option<String> {
        email_format_error(self.record().email.as_deref())
            .map(str::to_string)
            .or_else(|| self.submission.conflict().map(str::to_string))
    }

    pub fn validation(&self) -> ValidationState {
        ValidationState {
            email_error: self.email_error(),
            loading: self.submission.is_loading(),
            finished: self.submission.is_finished(),
        }
    }

    /// Whether the submit control is enabled
    ///
    /// Requires every required field, no email error and an idle flow.
    pub fn can_submit(&self) -> bool {
        self.submission.is_idle() && self.record().is_complete() && self.email_error().is_none()
    }

    /// Start a submission and hand back the pending check
    pub fn begin_submit(&mut self) -> Result<PendingCheck> {
        if self.submission.is_idle() && !self.can_submit() {
            warn!("submit refused: form incomplete or email invalid");
            return Err(FormError::SubmissionBlocked);
        }
        self.submission.begin()?;
        info!(email = ?self.record().email, "submission started");
        Ok(self.backend.check(self.record()))
    }

    /// Apply the outcome of a check started by [`Self::begin_submit`]
    pub fn finish_submit(&mut self, outcome: SubmissionOutcome) {
        self.submission.resolve(outcome);
    }

    /// Submit and wait for the backend
    pub async fn submit(&mut self) -> Result<SubmissionOutcome> {
        let pending = self.begin_submit()?;
        let outcome = pending.await;
        self.finish_submit(outcome);
        Ok(outcome)
    }

    // =========================================================================
    // Host interface
    // =========================================================================

    /// Apply one interaction event
    pub fn handle(&mut self, event: FormEvent) -> Result<Dispatched> {
        match event {
            FormEvent::FirstNameChanged(value) => self.set_first_name(value),
            FormEvent::LastNameChanged(value) => self.set_last_name(value),
            FormEvent::DateOfBirthChanged(value) => self.set_date_of_birth(value),
            FormEvent::EmailChanged(value) => self.set_email(value),
            FormEvent::FrameworkSelected(value) => self.select_framework(value.parse()?)?,
            FormEvent::VersionSelected(value) => self.select_version(value)?,
            FormEvent::HobbyNameChanged(value) => self.update_draft_name(value),
            FormEvent::HobbyDurationChanged(value) => self.update_draft_duration(value),
            FormEvent::AddHobbyClicked => self.add_hobby()?,
            FormEvent::DeleteHobbyClicked(name) => self.delete_hobby(name),
            FormEvent::HobbyRowEdited(index) => self.edit_hobby(index)?,
            FormEvent::SubmitClicked => return self.begin_submit().map(Dispatched::Submitting),
        }
        Ok(Dispatched::Applied)
    }

    /// Snapshot of everything a host renders
    pub fn view(&self) -> FormView {
        let record = self.record();
        let text = |field: &Option<String>| field.clone().unwrap_or_default();

        let submit = if self.submission.is_loading() {
            SubmitControl::Progress
        } else {
            SubmitControl::Button {
                disabled: !self.can_submit(),
            }
        };

        FormView {
            first_name: text(&record.first_name),
            last_name: text(&record.last_name),
            date_of_birth: text(&record.date_of_birth),
            email: text(&record.email),
            frameworks: self.config.frameworks().collect(),
            framework: record.framework,
            version: record.version.clone(),
            version_options: self.version_options().to_vec(),
            version_disabled: record.framework.is_none(),
            email_error: self.email_error(),
            hobbies: record.hobbies.clone(),
            draft_name: text(&self.draft.name),
            draft_duration: text(&self.draft.duration),
            add_hobby_disabled: !self.draft.can_commit(),
            submit,
            success_message: self.submission.is_finished().then_some(REGISTERED_MESSAGE),
        }
    }
}

impl<B> fmt::Debug for RegistrationForm<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("store", &self.store)
            .field("draft", &self.draft)
            .field("submission", &self.submission)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::HobbyEntry;
    use crate::validation::{EMAIL_ALREADY_EXISTS, EMAIL_NOT_VALID};
    use std::time::Duration;

    fn instant_form() -> RegistrationForm {
        RegistrationForm::new(FormConfig::default().with_submit_delay(Duration::ZERO))
    }

    fn filled_form(email: &str) -> RegistrationForm {
        let mut form = instant_form();
        form.set_first_name("Ada");
        form.set_last_name("Lovelace");
        form.set_date_of_birth("1815-12-10");
        form.set_email(email);
        form.select_framework(Framework::Angular).unwrap();
        form.select_version("1.2.1").unwrap();
        form
    }

    #[test]
    fn test_version_options_follow_framework() {
        let mut form = instant_form();
        assert!(form.version_options().is_empty());
        assert!(form.view().version_disabled);

        form.select_framework(Framework::Vue).unwrap();

        assert_eq!(form.version_options(), ["3.1.1", "3.2.1", "3.3.3"]);
        assert!(!form.view().version_disabled);
    }

    #[test]
    fn test_version_requires_framework() {
        let mut form = instant_form();
        assert!(matches!(
            form.select_version("3.1.1"),
            Err(FormError::VersionWithoutFramework)
        ));
        assert_eq!(form.record().version, None);
    }

    #[test]
    fn test_version_must_be_offered() {
        let mut form = instant_form();
        form.select_framework(Framework::React).unwrap();
        assert!(matches!(
            form.select_version("3.1.1"),
            Err(FormError::UnknownVersion { .. })
        ));
    }

    #[test]
    fn test_framework_change_clears_stale_version() {
        let mut form = instant_form();
        form.select_framework(Framework::React).unwrap();
        form.select_version("2.2.1").unwrap();

        form.select_framework(Framework::React).unwrap();
        assert_eq!(form.record().version.as_deref(), Some("2.2.1"));

        form.select_framework(Framework::Vue).unwrap();
        assert_eq!(form.record().version, None);
    }

    #[test]
    fn test_unconfigured_framework_rejected() {
        let config = FormConfig::from_toml_str(
            r#"
            [[frameworks]]
            framework = "react"
            versions = ["18.2.0"]
            "#,
        )
        .unwrap();
        let mut form = RegistrationForm::new(config);
        assert!(matches!(
            form.select_framework(Framework::Vue),
            Err(FormError::UnknownFramework(_))
        ));
        assert_eq!(form.record().framework, None);
    }

    #[test]
    fn test_email_error_recomputed_on_write() {
        let mut form = instant_form();
        form.set_email("ab@");
        assert_eq!(form.email_error().as_deref(), Some(EMAIL_NOT_VALID));

        form.set_email("ab@c.d");
        assert_eq!(form.email_error(), None);

        form.set_email("");
        assert_eq!(form.email_error(), None);
    }

    #[test]
    fn test_add_hobby_commits_draft() {
        let mut form = instant_form();
        assert!(!form.can_add_hobby());
        assert!(matches!(form.add_hobby(), Err(FormError::IncompleteHobby)));

        form.update_draft_name("chess");
        form.update_draft_duration("2y");
        form.add_hobby().unwrap();

        assert_eq!(form.record().hobbies, vec![HobbyEntry::new("chess", "2y")]);
        assert!(form.draft().is_empty());
        assert!(form.view().add_hobby_disabled);
    }

    #[test]
    fn test_editing_row_only_touches_draft() {
        let mut form = instant_form();
        form.update_draft_name("chess");
        form.update_draft_duration("2y");
        form.add_hobby().unwrap();

        form.edit_hobby(0).unwrap();
        form.update_draft_duration("3y");

        assert_eq!(form.draft().duration.as_deref(), Some("3y"));
        assert_eq!(form.record().hobbies[0].duration, "2y");
        assert!(matches!(form.edit_hobby(5), Err(FormError::NoSuchHobby(5))));
    }

    #[test]
    fn test_submit_gate() {
        let mut form = instant_form();
        assert!(!form.can_submit());
        assert!(matches!(form.begin_submit(), Err(FormError::SubmissionBlocked)));

        let form = filled_form("ada@example.com");
        assert!(form.can_submit());
        assert!(form.view().submit_enabled());

        let mut form = filled_form("not-an-email");
        assert!(!form.can_submit());
        assert!(matches!(form.begin_submit(), Err(FormError::SubmissionBlocked)));
    }

    #[test]
    fn test_hobbies_are_optional_for_submit() {
        let form = filled_form("ada@example.com");
        assert!(form.record().hobbies.is_empty());
        assert!(form.can_submit());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_state_while_pending() {
        let mut form = filled_form("ada@example.com");

        let pending = form.begin_submit().unwrap();

        let view = form.view();
        assert!(view.is_loading());
        assert!(form.validation().loading);
        assert!(!form.can_submit());
        assert!(matches!(form.begin_submit(), Err(FormError::SubmissionInFlight)));

        let outcome = pending.await;
        form.finish_submit(outcome);
        assert!(!form.validation().loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_denylisted_submit_returns_to_editing() {
        let mut form = filled_form("test@test.test");

        let outcome = form.submit().await.unwrap();

        assert_eq!(outcome, SubmissionOutcome::EmailTaken);
        let validation = form.validation();
        assert!(!validation.loading);
        assert!(!validation.finished);
        assert_eq!(validation.email_error.as_deref(), Some(EMAIL_ALREADY_EXISTS));
        assert!(!form.can_submit());

        form.set_email("ada@example.com");
        assert_eq!(form.email_error(), None);
        assert!(form.can_submit());
        assert_eq!(form.submit().await.unwrap(), SubmissionOutcome::Registered);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_is_terminal() {
        let mut form = filled_form("new@user.com");
        let before = form.email_error();

        form.submit().await.unwrap();

        let validation = form.validation();
        assert!(validation.finished);
        assert!(!validation.loading);
        assert_eq!(validation.email_error, before);
        assert_eq!(form.view().success_message, Some(REGISTERED_MESSAGE));
        assert!(matches!(form.submit().await, Err(FormError::AlreadyRegistered)));
    }

    #[test]
    fn test_handle_routes_events() {
        let mut form = instant_form();
        form.handle(FormEvent::FrameworkSelected("react".into())).unwrap();
        form.handle(FormEvent::VersionSelected("2.3.3".into())).unwrap();
        form.handle(FormEvent::HobbyNameChanged("go".into())).unwrap();
        form.handle(FormEvent::HobbyDurationChanged("1y".into())).unwrap();
        form.handle(FormEvent::AddHobbyClicked).unwrap();

        assert_eq!(form.record().framework, Some(Framework::React));
        assert_eq!(form.record().version.as_deref(), Some("2.3.3"));
        assert_eq!(form.record().hobbies.len(), 1);

        form.handle(FormEvent::DeleteHobbyClicked("go".into())).unwrap();
        assert!(form.record().hobbies.is_empty());

        assert!(matches!(
            form.handle(FormEvent::FrameworkSelected("svelte".into())),
            Err(FormError::UnknownFramework(_))
        ));
    }
}
