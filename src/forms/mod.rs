//! Form state controller shared by the booking, contact and auth forms
//!
//! A controller moves through `Editing → Submitting → {Succeeded, Failed}`.
//! Local validation gates the move to `Submitting`; each submit attempt makes
//! exactly one call through a [`Submitter`] and nothing is retried on its own.

mod auth;
mod booking;
mod contact;
mod validate;

use async_trait::async_trait;
use log::{info, warn};
use std::fmt;
use tokio::sync::watch;

use crate::error::{Result, GENERIC_ERROR_MESSAGE};
use crate::models::Confirmation;

pub use auth::*;
pub use booking::*;
pub use contact::*;
pub use validate::*;

/// Identifies one input of a form
pub trait FormField: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    fn as_str(&self) -> &'static str;
}

/// Raw input values plus the rules that turn them into a request payload
pub trait Form: Send {
    type Field: FormField;
    type Payload: Send + Sync;

    /// Shown after success when the server sends no message
    const SUCCESS_MESSAGE: &'static str;

    fn value(&self, field: Self::Field) -> &str;

    fn set_value(&mut self, field: Self::Field, value: String);

    fn validate(&self) -> std::result::Result<Self::Payload, ValidationErrors>;

    /// Blank the user-entered fields after a successful submission
    fn clear(&mut self);
}

/// Sends a validated payload somewhere. One call, no retries.
#[async_trait]
pub trait Submitter<P: Sync>: Send + Sync {
    async fn submit(&self, payload: &P) -> Result<Confirmation>;
}

/// Where a form is in its submit lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Editing,
    Submitting,
    Succeeded { message: String },
    Failed { message: String },
}

impl FormState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormState::Submitting)
    }

    /// The confirmation or error banner text, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            FormState::Succeeded { message } | FormState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

pub struct FormController<F: Form> {
    form: F,
    errors: ValidationErrors,
    state: watch::Sender<FormState>,
    failure_message: String,
}

impl<F: Form> FormController<F> {
    pub fn new(form: F) -> Self {
        let (state, _) = watch::channel(FormState::Editing);
        Self {
            form,
            errors: ValidationErrors::new(),
            state,
            failure_message: GENERIC_ERROR_MESSAGE.to_string(),
        }
    }

    /// Message shown when a failure carries no server message
    pub fn with_failure_message(mut self, message: &str) -> Self {
        self.failure_message = message.to_string();
        self
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn value(&self, field: F::Field) -> &str {
        self.form.value(field)
    }

    /// Change a field. Clears that field's error and leaves `Failed`.
    pub fn set(&mut self, field: F::Field, value: impl Into<String>) {
        self.form.set_value(field, value.into());
        self.errors.remove(field.as_str());
        if matches!(*self.state.borrow(), FormState::Failed { .. }) {
            self.state.send_replace(FormState::Editing);
        }
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn field_error(&self, field: F::Field) -> Option<&str> {
        self.errors.get(field.as_str())
    }

    pub fn state(&self) -> FormState {
        self.state.borrow().clone()
    }

    /// Watch state changes, e.g. to drive a loading indicator
    pub fn subscribe(&self) -> watch::Receiver<FormState> {
        self.state.subscribe()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.borrow().is_submitting()
    }

    /// Validate, then submit once.
    ///
    /// Invalid input stays in `Editing` with field errors and makes no call.
    /// On success the fields are cleared; on failure they are kept so the
    /// user can correct them and submit again.
    pub async fn submit<S>(&mut self, submitter: &S) -> FormState
    where
        S: Submitter<F::Payload> + ?Sized,
    {
        let payload = match self.form.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                self.errors = errors;
                self.state.send_replace(FormState::Editing);
                return self.state();
            }
        };

        self.errors.clear();
        self.state.send_replace(FormState::Submitting);

        let next = match submitter.submit(&payload).await {
            Ok(confirmation) => {
                info!("form submitted");
                self.form.clear();
                FormState::Succeeded {
                    message: confirmation
                        .message
                        .unwrap_or_else(|| F::SUCCESS_MESSAGE.to_string()),
                }
            }
            Err(err) => {
                warn!("form submission failed: {}", err);
                FormState::Failed {
                    message: err.user_message(&self.failure_message),
                }
            }
        };
        self.state.send_replace(next);
        self.state()
    }

    /// Back to a blank `Editing` form
    pub fn reset(&mut self) {
        self.form.clear();
        self.errors.clear();
        self.state.send_replace(FormState::Editing);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::ContactMessage;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Recording {
        calls: AtomicUsize,
        fail_with: Option<(u16, Option<&'static str>)>,
    }

    impl Recording {
        fn ok() -> Self {
            Self { calls: AtomicUsize::new(0), fail_with: None }
        }

        fn failing(status: u16, message: Option<&'static str>) -> Self {
            Self { calls: AtomicUsize::new(0), fail_with: Some((status, message)) }
        }
    }

    #[async_trait]
    impl Submitter<ContactMessage> for Recording {
        async fn submit(&self, _payload: &ContactMessage) -> Result<Confirmation> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.fail_with {
                Some((status, message)) => Err(Error::HttpStatus {
                    status,
                    message: message.map(str::to_string),
                    body: String::new(),
                }),
                None => Ok(Confirmation::default()),
            }
        }
    }

    fn filled() -> FormController<ContactForm> {
        let mut controller = FormController::new(ContactForm::default());
        controller.set(ContactField::Name, "Meera");
        controller.set(ContactField::Email, "meera@example.com");
        controller.set(ContactField::Phone, "9876543210");
        controller.set(ContactField::Message, "Is a double room free in December?");
        controller
    }

    #[tokio::test]
    async fn invalid_input_makes_no_call() {
        let submitter = Recording::ok();
        let mut controller = filled();
        controller.set(ContactField::Email, "");

        let state = controller.submit(&submitter).await;

        assert_eq!(state, FormState::Editing);
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 0);
        assert_eq!(controller.field_error(ContactField::Email), Some("Email is required"));
    }

    #[tokio::test]
    async fn success_clears_fields() {
        let submitter = Recording::ok();
        let mut controller = filled();

        let state = controller.submit(&submitter).await;

        assert_eq!(
            state,
            FormState::Succeeded { message: ContactForm::SUCCESS_MESSAGE.to_string() }
        );
        assert_eq!(controller.value(ContactField::Name), "");
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 1);

        controller.reset();
        assert_eq!(controller.state(), FormState::Editing);
    }

    #[tokio::test]
    async fn failure_keeps_values_and_allows_retry() {
        let submitter = Recording::failing(422, Some("Message too short"));
        let mut controller = filled();

        let state = controller.submit(&submitter).await;
        assert_eq!(state.message(), Some("Message too short"));
        assert_eq!(controller.value(ContactField::Email), "meera@example.com");

        // explicit retry is a second, separate call
        controller.submit(&submitter).await;
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 2);

        controller.set(ContactField::Message, "Is a double room free in January?");
        assert_eq!(controller.state(), FormState::Editing);
    }

    #[tokio::test]
    async fn failure_without_server_message_uses_fallback() {
        let submitter = Recording::failing(500, None);
        let mut controller = filled().with_failure_message("Could not send your message");

        let state = controller.submit(&submitter).await;
        assert_eq!(
            state,
            FormState::Failed { message: "Could not send your message".to_string() }
        );
    }

    #[tokio::test]
    async fn editing_a_field_clears_its_error() {
        let submitter = Recording::ok();
        let mut controller = FormController::new(ContactForm::default());
        controller.submit(&submitter).await;
        assert!(controller.field_error(ContactField::Name).is_some());

        controller.set(ContactField::Name, "Meera");
        assert!(controller.field_error(ContactField::Name).is_none());
        assert!(controller.field_error(ContactField::Email).is_some());
    }

    #[tokio::test]
    async fn state_changes_are_observable() {
        let submitter = Recording::ok();
        let mut controller = filled();
        let mut rx = controller.subscribe();

        controller.submit(&submitter).await;

        assert!(rx.has_changed().unwrap());
        assert!(matches!(*rx.borrow_and_update(), FormState::Succeeded { .. }));
    }
}
