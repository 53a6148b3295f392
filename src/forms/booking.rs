//! The tenant booking form

use async_trait::async_trait;
use log::info;

use super::{Form, FormField, Submitter, ValidationErrors, Validator};
use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::models::{BookingRequest, Confirmation, Room};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingField {
    Name,
    Email,
    Phone,
    LeaseStartDate,
    LeaseEndDate,
    SecurityDeposit,
    PaymentDueDay,
    Notes,
}

impl FormField for BookingField {
    fn as_str(&self) -> &'static str {
        match self {
            BookingField::Name => "name",
            BookingField::Email => "email",
            BookingField::Phone => "phone",
            BookingField::LeaseStartDate => "lease_start_date",
            BookingField::LeaseEndDate => "lease_end_date",
            BookingField::SecurityDeposit => "security_deposit",
            BookingField::PaymentDueDay => "payment_due_day",
            BookingField::Notes => "notes",
        }
    }
}

/// Booking form for one room.
///
/// Room, property and rent are fixed when the form is built from the fetched
/// room; only the tenant's inputs are editable.
#[derive(Debug, Clone)]
pub struct BookingForm {
    room_id: i64,
    property_id: i64,
    rent_amount: f64,
    default_deposit: String,

    name: String,
    email: String,
    phone: String,
    lease_start_date: String,
    lease_end_date: String,
    security_deposit: String,
    payment_due_day: String,
    notes: String,
}

impl BookingForm {
    /// Build the form from a room fetched via `GET /rooms/{id}`
    pub fn for_room(room: &Room) -> Result<Self> {
        let property_id = room
            .property_id
            .ok_or_else(|| Error::general(format!("room {} has no property", room.id)))?;
        let rent_amount = room
            .base_rent
            .ok_or_else(|| Error::general(format!("room {} has no rent set", room.id)))?;
        let default_deposit = room
            .security_deposit
            .map(|d| d.to_string())
            .unwrap_or_default();

        Ok(Self {
            room_id: room.id,
            property_id,
            rent_amount,
            security_deposit: default_deposit.clone(),
            default_deposit,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            lease_start_date: String::new(),
            lease_end_date: String::new(),
            payment_due_day: String::new(),
            notes: String::new(),
        })
    }

    pub fn room_id(&self) -> i64 {
        self.room_id
    }

    pub fn property_id(&self) -> i64 {
        self.property_id
    }

    pub fn rent_amount(&self) -> f64 {
        self.rent_amount
    }
}

impl Form for BookingForm {
    type Field = BookingField;
    type Payload = BookingRequest;

    const SUCCESS_MESSAGE: &'static str = "Booking request submitted. We will confirm shortly.";

    fn value(&self, field: BookingField) -> &str {
        match field {
            BookingField::Name => &self.name,
            BookingField::Email => &self.email,
            BookingField::Phone => &self.phone,
            BookingField::LeaseStartDate => &self.lease_start_date,
            BookingField::LeaseEndDate => &self.lease_end_date,
            BookingField::SecurityDeposit => &self.security_deposit,
            BookingField::PaymentDueDay => &self.payment_due_day,
            BookingField::Notes => &self.notes,
        }
    }

    fn set_value(&mut self, field: BookingField, value: String) {
        match field {
            BookingField::Name => self.name = value,
            BookingField::Email => self.email = value,
            BookingField::Phone => self.phone = value,
            BookingField::LeaseStartDate => self.lease_start_date = value,
            BookingField::LeaseEndDate => self.lease_end_date = value,
            BookingField::SecurityDeposit => self.security_deposit = value,
            BookingField::PaymentDueDay => self.payment_due_day = value,
            BookingField::Notes => self.notes = value,
        }
    }

    fn validate(&self) -> std::result::Result<BookingRequest, ValidationErrors> {
        use BookingField::*;

        let mut v = Validator::new();
        let name = v.required(Name.as_str(), "Name", &self.name);
        let email = v.email(Email.as_str(), &self.email);
        let phone = v.phone(Phone.as_str(), &self.phone);
        let start = v.date(LeaseStartDate.as_str(), "Lease start date", &self.lease_start_date);
        let end = v.date(LeaseEndDate.as_str(), "Lease end date", &self.lease_end_date);
        let deposit = v.amount(SecurityDeposit.as_str(), "Security deposit", &self.security_deposit);
        let due_day = v.number::<u32>(PaymentDueDay.as_str(), "Payment due day", &self.payment_due_day);

        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                v.error(LeaseEndDate.as_str(), "Lease end date must be on or after the start date");
            }
        }
        let due_day = due_day.and_then(|day| match u8::try_from(day) {
            Ok(day) if (1..=31).contains(&day) => Some(day),
            _ => {
                v.error(PaymentDueDay.as_str(), "Payment due day must be between 1 and 31");
                None
            }
        });

        match (name, email, phone, start, end, deposit, due_day) {
            (Some(name), Some(email), Some(phone), Some(start), Some(end), Some(deposit), Some(day))
                if v.is_valid() =>
            {
                Ok(BookingRequest {
                    name: name.to_string(),
                    email: email.to_string(),
                    phone: phone.to_string(),
                    room_id: self.room_id,
                    property_id: self.property_id,
                    lease_start_date: start,
                    lease_end_date: end,
                    rent_amount: self.rent_amount,
                    security_deposit: deposit,
                    payment_due_day: day,
                    notes: self.notes.trim().to_string(),
                })
            }
            _ => Err(v.into_errors()),
        }
    }

    fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.phone.clear();
        self.lease_start_date.clear();
        self.lease_end_date.clear();
        self.payment_due_day.clear();
        self.notes.clear();
        self.security_deposit = self.default_deposit.clone();
    }
}

/// Client for `POST /book-tenant`
#[derive(Clone)]
pub struct BookingsClient {
    api: ApiClient,
}

impl BookingsClient {
    pub(crate) fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Send a booking request once
    pub async fn book(&self, request: &BookingRequest) -> Result<Confirmation> {
        info!(
            "booking room {} of property {} from {}",
            request.room_id, request.property_id, request.lease_start_date
        );
        let value = self.api.post("/book-tenant", request).await?;
        Ok(Confirmation::from_value(&value))
    }
}

#[async_trait]
impl Submitter<BookingRequest> for BookingsClient {
    async fn submit(&self, payload: &BookingRequest) -> Result<Confirmation> {
        self.book(payload).await
    }
}
