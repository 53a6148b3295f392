//! Authentication through the external auth collaborator

mod session;
mod types;

use async_trait::async_trait;
use log::info;
use serde_json::Value;

use crate::api::ApiClient;
use crate::error::Result;
use crate::fetch::ItemResponse;
use crate::models::Confirmation;

pub use session::*;
pub use types::*;

/// The auth collaborator: submit credentials, get a session or an error.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<AuthSession>;

    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthSession>;

    async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<Confirmation>;

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<Confirmation>;

    fn sign_out(&self);
}

/// `AuthProvider` backed by the rental API's auth endpoints
#[derive(Clone)]
pub struct HttpAuthProvider {
    api: ApiClient,
    session: SessionStore,
}

impl HttpAuthProvider {
    pub(crate) fn new(api: ApiClient, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// Get the current session
    pub fn session(&self) -> Option<AuthSession> {
        self.session.get()
    }

    fn store(&self, value: Value) -> Result<AuthSession> {
        let session = serde_json::from_value::<ItemResponse<AuthSession>>(value)?.into_inner();
        info!("signed in as {} ({})", session.user.email, session.role());
        self.session.set(session.clone());
        Ok(session)
    }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn sign_in(&self, credentials: &SignInCredentials) -> Result<AuthSession> {
        let value = self.api.post("/login", credentials).await?;
        self.store(value)
    }

    async fn sign_up(&self, request: &SignUpRequest) -> Result<AuthSession> {
        let value = self.api.post("/register", request).await?;
        self.store(value)
    }

    async fn forgot_password(&self, request: &ForgotPasswordRequest) -> Result<Confirmation> {
        let value = self.api.post("/forgot-password", request).await?;
        Ok(Confirmation::from_value(&value))
    }

    async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<Confirmation> {
        let value = self.api.post("/reset-password", request).await?;
        Ok(Confirmation::from_value(&value))
    }

    fn sign_out(&self) {
        self.session.clear();
    }
}
