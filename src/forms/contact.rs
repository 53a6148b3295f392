use async_trait::async_trait;

use super::{Form, FormField, Submitter, ValidationErrors, Validator};
use crate::api::ApiClient;
use crate::error::Result;
use crate::models::{Confirmation, ContactMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Message,
}

impl FormField for ContactField {
    fn as_str(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Phone => "phone",
            ContactField::Message => "message",
        }
    }
}

/// The enquiry form on the contact page
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    name: String,
    email: String,
    phone: String,
    message: String,
}

impl Form for ContactForm {
    type Field = ContactField;
    type Payload = ContactMessage;

    const SUCCESS_MESSAGE: &'static str = "Thanks! We will get back to you shortly.";

    fn value(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
            ContactField::Message => &self.message,
        }
    }

    fn set_value(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Phone => self.phone = value,
            ContactField::Message => self.message = value,
        }
    }

    fn validate(&self) -> std::result::Result<ContactMessage, ValidationErrors> {
        let mut v = Validator::new();
        let name = v.required(ContactField::Name.as_str(), "Name", &self.name);
        let email = v.email(ContactField::Email.as_str(), &self.email);
        let phone = v.phone(ContactField::Phone.as_str(), &self.phone);
        let message = v.required(ContactField::Message.as_str(), "Message", &self.message);

        match (name, email, phone, message) {
            (Some(name), Some(email), Some(phone), Some(message)) if v.is_valid() => Ok(ContactMessage {
                name: name.to_string(),
                email: email.to_string(),
                phone: phone.to_string(),
                message: message.to_string(),
            }),
            _ => Err(v.into_errors()),
        }
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Client for `POST /contact`
#[derive(Clone)]
pub struct ContactClient {
    api: ApiClient,
}

impl ContactClient {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn send(&self, message: &ContactMessage) -> Result<Confirmation> {
        let value = self.api.post("/contact", message).await?;
        Ok(Confirmation::from_value(&value))
    }
}

#[async_trait]
impl Submitter<ContactMessage> for ContactClient {
    async fn submit(&self, payload: &ContactMessage) -> Result<Confirmation> {
        self.send(payload).await
    }
}
