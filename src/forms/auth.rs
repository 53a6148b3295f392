//! Sign-in, sign-up and password reset forms

use async_trait::async_trait;

use super::{Form, FormField, Submitter, ValidationErrors, Validator};
use crate::auth::{
    AuthProvider, ForgotPasswordRequest, ResetPasswordRequest, SignInCredentials, SignUpRequest,
};
use crate::error::Result;
use crate::models::Confirmation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Name,
    Email,
    Phone,
    Password,
    ConfirmPassword,
}

impl FormField for AuthField {
    fn as_str(&self) -> &'static str {
        match self {
            AuthField::Name => "name",
            AuthField::Email => "email",
            AuthField::Phone => "phone",
            AuthField::Password => "password",
            AuthField::ConfirmPassword => "password_confirmation",
        }
    }
}

// Auth forms only read the fields they show; the rest stay empty.
#[derive(Debug, Clone, Default)]
struct AuthInputs {
    name: String,
    email: String,
    phone: String,
    password: String,
    confirm_password: String,
}

impl AuthInputs {
    fn get(&self, field: AuthField) -> &str {
        match field {
            AuthField::Name => &self.name,
            AuthField::Email => &self.email,
            AuthField::Phone => &self.phone,
            AuthField::Password => &self.password,
            AuthField::ConfirmPassword => &self.confirm_password,
        }
    }

    fn set(&mut self, field: AuthField, value: String) {
        match field {
            AuthField::Name => self.name = value,
            AuthField::Email => self.email = value,
            AuthField::Phone => self.phone = value,
            AuthField::Password => self.password = value,
            AuthField::ConfirmPassword => self.confirm_password = value,
        }
    }

    fn confirmed_password<'a>(&'a self, v: &mut Validator) -> Option<&'a str> {
        let password = v.password(AuthField::Password.as_str(), &self.password)?;
        if self.confirm_password != password {
            v.error(AuthField::ConfirmPassword.as_str(), "Passwords do not match");
            return None;
        }
        Some(password)
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    inputs: AuthInputs,
}

impl Form for SignInForm {
    type Field = AuthField;
    type Payload = SignInCredentials;

    const SUCCESS_MESSAGE: &'static str = "Signed in successfully.";

    fn value(&self, field: AuthField) -> &str {
        self.inputs.get(field)
    }

    fn set_value(&mut self, field: AuthField, value: String) {
        self.inputs.set(field, value);
    }

    fn validate(&self) -> std::result::Result<SignInCredentials, ValidationErrors> {
        let mut v = Validator::new();
        let email = v.email(AuthField::Email.as_str(), &self.inputs.email);
        // Existing accounts may predate the length rule, so only presence is checked.
        let password = if self.inputs.password.is_empty() {
            v.error(AuthField::Password.as_str(), "Password is required");
            None
        } else {
            Some(self.inputs.password.as_str())
        };

        match (email, password) {
            (Some(email), Some(password)) => Ok(SignInCredentials {
                email: email.to_string(),
                password: password.to_string(),
            }),
            _ => Err(v.into_errors()),
        }
    }

    fn clear(&mut self) {
        self.inputs = AuthInputs::default();
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    inputs: AuthInputs,
}

impl Form for SignUpForm {
    type Field = AuthField;
    type Payload = SignUpRequest;

    const SUCCESS_MESSAGE: &'static str = "Account created. Welcome!";

    fn value(&self, field: AuthField) -> &str {
        self.inputs.get(field)
    }

    fn set_value(&mut self, field: AuthField, value: String) {
        self.inputs.set(field, value);
    }

    fn validate(&self) -> std::result::Result<SignUpRequest, ValidationErrors> {
        let mut v = Validator::new();
        let name = v.required(AuthField::Name.as_str(), "Name", &self.inputs.name);
        let email = v.email(AuthField::Email.as_str(), &self.inputs.email);
        let phone = v.phone(AuthField::Phone.as_str(), &self.inputs.phone);
        let password = self.inputs.confirmed_password(&mut v);

        match (name, email, phone, password) {
            (Some(name), Some(email), Some(phone), Some(password)) => Ok(SignUpRequest {
                name: name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                password: password.to_string(),
                password_confirmation: password.to_string(),
            }),
            _ => Err(v.into_errors()),
        }
    }

    fn clear(&mut self) {
        self.inputs = AuthInputs::default();
    }
}

#[derive(Debug, Clone, Default)]
pub struct ForgotPasswordForm {
    inputs: AuthInputs,
}

impl Form for ForgotPasswordForm {
    type Field = AuthField;
    type Payload = ForgotPasswordRequest;

    const SUCCESS_MESSAGE: &'static str = "If the address is registered, a reset link is on its way.";

    fn value(&self, field: AuthField) -> &str {
        self.inputs.get(field)
    }

    fn set_value(&mut self, field: AuthField, value: String) {
        self.inputs.set(field, value);
    }

    fn validate(&self) -> std::result::Result<ForgotPasswordRequest, ValidationErrors> {
        let mut v = Validator::new();
        match v.email(AuthField::Email.as_str(), &self.inputs.email) {
            Some(email) => Ok(ForgotPasswordRequest {
                email: email.to_string(),
            }),
            None => Err(v.into_errors()),
        }
    }

    fn clear(&mut self) {
        self.inputs = AuthInputs::default();
    }
}

/// Reset form opened from the emailed link, which carries the reset token
#[derive(Debug, Clone)]
pub struct ResetPasswordForm {
    token: String,
    inputs: AuthInputs,
}

impl ResetPasswordForm {
    pub fn new(token: &str, email: Option<&str>) -> Self {
        let mut inputs = AuthInputs::default();
        if let Some(email) = email {
            inputs.email = email.to_string();
        }
        Self {
            token: token.to_string(),
            inputs,
        }
    }
}

impl Form for ResetPasswordForm {
    type Field = AuthField;
    type Payload = ResetPasswordRequest;

    const SUCCESS_MESSAGE: &'static str = "Password updated. You can sign in now.";

    fn value(&self, field: AuthField) -> &str {
        self.inputs.get(field)
    }

    fn set_value(&mut self, field: AuthField, value: String) {
        self.inputs.set(field, value);
    }

    fn validate(&self) -> std::result::Result<ResetPasswordRequest, ValidationErrors> {
        let mut v = Validator::new();
        if self.token.trim().is_empty() {
            v.error("token", "This reset link is invalid or has expired");
        }
        let email = v.email(AuthField::Email.as_str(), &self.inputs.email);
        let password = self.inputs.confirmed_password(&mut v);

        match (email, password) {
            (Some(email), Some(password)) if v.is_valid() => Ok(ResetPasswordRequest {
                token: self.token.clone(),
                email: email.to_string(),
                password: password.to_string(),
                password_confirmation: password.to_string(),
            }),
            _ => Err(v.into_errors()),
        }
    }

    fn clear(&mut self) {
        self.inputs = AuthInputs::default();
    }
}

#[async_trait]
impl<A: AuthProvider + ?Sized> Submitter<SignInCredentials> for A {
    async fn submit(&self, payload: &SignInCredentials) -> Result<Confirmation> {
        let session = self.sign_in(payload).await?;
        Ok(Confirmation {
            message: Some(format!("Welcome back, {}!", display_name(&session.user))),
        })
    }
}

#[async_trait]
impl<A: AuthProvider + ?Sized> Submitter<SignUpRequest> for A {
    async fn submit(&self, payload: &SignUpRequest) -> Result<Confirmation> {
        let session = self.sign_up(payload).await?;
        Ok(Confirmation {
            message: Some(format!("Welcome, {}!", display_name(&session.user))),
        })
    }
}

#[async_trait]
impl<A: AuthProvider + ?Sized> Submitter<ForgotPasswordRequest> for A {
    async fn submit(&self, payload: &ForgotPasswordRequest) -> Result<Confirmation> {
        self.forgot_password(payload).await
    }
}

#[async_trait]
impl<A: AuthProvider + ?Sized> Submitter<ResetPasswordRequest> for A {
    async fn submit(&self, payload: &ResetPasswordRequest) -> Result<Confirmation> {
        self.reset_password(payload).await
    }
}

fn display_name(user: &crate::auth::AuthUser) -> &str {
    user.name.as_deref().unwrap_or(&user.email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_in_requires_email_and_password() {
        let errors = SignInForm::default().validate().unwrap_err();
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[test]
    fn sign_up_checks_confirmation() {
        let mut form = SignUpForm::default();
        form.set_value(AuthField::Name, "Kiran".to_string());
        form.set_value(AuthField::Email, "kiran@example.com".to_string());
        form.set_value(AuthField::Phone, "9000012345".to_string());
        form.set_value(AuthField::Password, "longenough".to_string());
        form.set_value(AuthField::ConfirmPassword, "longenougH".to_string());

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("password_confirmation"), Some("Passwords do not match"));

        form.set_value(AuthField::ConfirmPassword, "longenough".to_string());
        let request = form.validate().unwrap();
        assert_eq!(request.password_confirmation, "longenough");
    }

    #[test]
    fn reset_needs_token() {
        let mut form = ResetPasswordForm::new("", Some("kiran@example.com"));
        form.set_value(AuthField::Password, "newpassword".to_string());
        form.set_value(AuthField::ConfirmPassword, "newpassword".to_string());
        let errors = form.validate().unwrap_err();
        assert!(errors.get("token").is_some());

        let mut form = ResetPasswordForm::new("abc123", Some("kiran@example.com"));
        form.set_value(AuthField::Password, "newpassword".to_string());
        form.set_value(AuthField::ConfirmPassword, "newpassword".to_string());
        assert_eq!(form.validate().unwrap().token, "abc123");
    }
}
