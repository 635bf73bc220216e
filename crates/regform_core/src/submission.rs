//! Submission flow and the simulated registration backend
//!
//! A submission moves `Idle -> Loading -> Success` when the backend accepts
//! the email, or back to `Idle` carrying a conflict message when it does not.
//! `Success` is terminal.
//!
//! The backend check is a plain future with no cancellation, timeout or
//! retry: once started it always resolves. Only one check runs at a time
//! because [`SubmissionFlow::begin`] refuses while `Loading`. A caller that
//! drives a [`RegistrationBackend`] directly bypasses that guard.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::FormConfig;
use crate::error::{FormError, Result};
use crate::record::RegistrationRecord;
use crate::validation::EMAIL_ALREADY_EXISTS;

/// Result of a backend check
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// The email is free and the user is registered
    Registered,
    /// The email is already taken
    EmailTaken,
}

/// A pending backend check
pub type PendingCheck = Pin<Box<dyn Future<Output = SubmissionOutcome> + Send + 'static>>;

/// The server side of a registration
///
/// The returned future owns everything it needs, so the form stays free to
/// render while it is pending.
pub trait RegistrationBackend: Send + Sync {
    fn check(&self, record: &RegistrationRecord) -> PendingCheck;
}

/// In-process stand-in for a registration server
///
/// Waits `delay` on the tokio timer, then rejects emails on the denylist.
#[derive(Clone, Debug)]
pub struct SimulatedBackend {
    denylist: Vec<String>,
    delay: Duration,
}

impl SimulatedBackend {
    pub fn new(denylist: Vec<String>, delay: Duration) -> Self {
        Self { denylist, delay }
    }

    pub fn from_config(config: &FormConfig) -> Self {
        Self::new(config.denylist.clone(), config.submit_delay())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::from_config(&FormConfig::default())
    }
}

impl RegistrationBackend for SimulatedBackend {
    fn check(&self, record: &RegistrationRecord) -> PendingCheck {
        let taken = record
            .email
            .as_deref()
            .is_some_and(|email| self.denylist.iter().any(|denied| denied == email));
        let delay = self.delay;

        Box::pin(async move {
            tokio::time::sleep(delay).await;
            if taken {
                SubmissionOutcome::EmailTaken
            } else {
                SubmissionOutcome::Registered
            }
        })
    }
}

/// Where the submission currently stands
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    /// Editable again after the backend rejected the email
    IdleWithConflict(String),
    Loading,
    Success,
}

/// The idle/loading/success state machine
#[derive(Clone, Debug, Default)]
pub struct SubmissionFlow {
    phase: SubmissionPhase,
}

impl SubmissionFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &SubmissionPhase {
        &self.phase
    }

    pub fn is_idle(&self) -> bool {
        matches!(
            self.phase,
            SubmissionPhase::Idle | SubmissionPhase::IdleWithConflict(_)
        )
    }

    pub fn is_loading(&self) -> bool {
        self.phase == SubmissionPhase::Loading
    }

    pub fn is_finished(&self) -> bool {
        self.phase == SubmissionPhase::Success
    }

    /// Rejection message from the last attempt
    pub fn conflict(&self) -> Option<&str> {
        match &self.phase {
            SubmissionPhase::IdleWithConflict(message) => Some(message),
            _ => None,
        }
    }

    /// Drop the rejection message once the email it refers to is edited
    pub fn clear_conflict(&mut self) {
        if let SubmissionPhase::IdleWithConflict(_) = self.phase {
            self.phase = SubmissionPhase::Idle;
        }
    }

    /// Enter `Loading`
    pub fn begin(&mut self) -> Result<()> {
        match self.phase {
            SubmissionPhase::Loading => Err(FormError::SubmissionInFlight),
            SubmissionPhase::Success => Err(FormError::AlreadyRegistered),
            SubmissionPhase::Idle | SubmissionPhase::IdleWithConflict(_) => {
                self.phase = SubmissionPhase::Loading;
                Ok(())
            }
        }
    }

    /// Apply the backend's answer
    ///
    /// Ignored unless a check is pending.
    pub fn resolve(&mut self, outcome: SubmissionOutcome) {
        if !self.is_loading() {
            warn!(?outcome, "submission resolved while not loading, ignoring");
            return;
        }
        self.phase = match outcome {
            SubmissionOutcome::Registered => {
                info!("registration accepted");
                SubmissionPhase::Success
            }
            SubmissionOutcome::EmailTaken => {
                warn!("registration rejected: email already exists");
                SubmissionPhase::IdleWithConflict(EMAIL_ALREADY_EXISTS.to_string())
            }
        };
    }

    /// Run a whole check for `record` against `backend`
    ///
    /// No completeness gate is applied here; [`crate::RegistrationForm::submit`]
    /// is the guarded entry point.
    pub async fn run<B>(
        &mut self,
        backend: &B,
        record: &RegistrationRecord,
    ) -> Result<SubmissionOutcome>
    where
        B: RegistrationBackend + ?Sized,
    {
        self.begin()?;
        info!(email = ?record.email, "submission started");
        let outcome = backend.check(record).await;
        self.resolve(outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_email(email: &str) -> RegistrationRecord {
        RegistrationRecord {
            email: Some(email.to_string()),
            ..Default::default()
        }
    }

    fn instant_backend() -> SimulatedBackend {
        SimulatedBackend::new(vec!["test@test.test".into()], Duration::ZERO)
    }

    #[tokio::test(start_paused = true)]
    async fn test_denylisted_email_is_rejected() {
        let mut flow = SubmissionFlow::new();
        let outcome = flow
            .run(&instant_backend(), &record_with_email("test@test.test"))
            .await
            .unwrap();

        assert_eq!(outcome, SubmissionOutcome::EmailTaken);
        assert!(!flow.is_loading());
        assert!(!flow.is_finished());
        assert_eq!(flow.conflict(), Some("Email is already exists"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fresh_email_is_registered() {
        let mut flow = SubmissionFlow::new();
        let outcome = flow
            .run(&instant_backend(), &record_with_email("new@user.com"))
            .await
            .unwrap();

        assert_eq!(outcome, SubmissionOutcome::Registered);
        assert!(!flow.is_loading());
        assert!(flow.is_finished());
        assert_eq!(flow.conflict(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_waits_for_delay() {
        let backend = SimulatedBackend::new(Vec::new(), Duration::from_millis(2000));
        let start = tokio::time::Instant::now();

        let outcome = backend.check(&record_with_email("new@user.com")).await;

        assert_eq!(outcome, SubmissionOutcome::Registered);
        assert!(start.elapsed() >= Duration::from_millis(2000));
    }

    #[test]
    fn test_begin_is_single_flight() {
        let mut flow = SubmissionFlow::new();
        flow.begin().unwrap();
        assert!(flow.is_loading());
        assert!(matches!(flow.begin(), Err(FormError::SubmissionInFlight)));
    }

    #[test]
    fn test_success_is_terminal() {
        let mut flow = SubmissionFlow::new();
        flow.begin().unwrap();
        flow.resolve(SubmissionOutcome::Registered);
        assert!(matches!(flow.begin(), Err(FormError::AlreadyRegistered)));
        assert_eq!(flow.phase(), &SubmissionPhase::Success);
    }

    #[test]
    fn test_conflict_allows_retry() {
        let mut flow = SubmissionFlow::new();
        flow.begin().unwrap();
        flow.resolve(SubmissionOutcome::EmailTaken);
        assert!(flow.is_idle());

        flow.clear_conflict();
        assert_eq!(flow.phase(), &SubmissionPhase::Idle);
        flow.begin().unwrap();
        assert!(flow.is_loading());
    }

    #[test]
    fn test_resolve_without_begin_is_ignored() {
        let mut flow = SubmissionFlow::new();
        flow.resolve(SubmissionOutcome::Registered);
        assert_eq!(flow.phase(), &SubmissionPhase::Idle);
    }
}
