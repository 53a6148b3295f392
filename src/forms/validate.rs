//! Field-level validation rules

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref EMAIL_PATTERN: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
    static ref PHONE_PATTERN: Regex = Regex::new(r"^\+?[0-9][0-9 \-]{6,16}[0-9]$").unwrap();
}

pub const MIN_PASSWORD_LEN: usize = 8;

pub fn is_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

pub fn is_phone(value: &str) -> bool {
    PHONE_PATTERN.is_match(value.trim())
}

/// Per-field error messages, in the order they were raised
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    entries: Vec<(&'static str, String)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; the first error raised for a field is kept
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.entries.push((field, message.into()));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn remove(&mut self, field: &str) {
        self.entries.retain(|(name, _)| *name != field);
    }

    pub fn first(&self) -> Option<(&str, &str)> {
        self.entries
            .first()
            .map(|(name, message)| (*name, message.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, message)| (*name, message.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(name, message)| format!("{}: {}", name, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Accumulates errors while parsing raw form input
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.add(field, message);
    }

    /// Trimmed value, or an error when blank
    pub fn required<'a>(&mut self, field: &'static str, label: &str, value: &'a str) -> Option<&'a str> {
        let value = value.trim();
        if value.is_empty() {
            self.error(field, format!("{} is required", label));
            return None;
        }
        Some(value)
    }

    pub fn email<'a>(&mut self, field: &'static str, value: &'a str) -> Option<&'a str> {
        let value = self.required(field, "Email", value)?;
        if !is_email(value) {
            self.error(field, "Enter a valid email address");
            return None;
        }
        Some(value)
    }

    pub fn phone<'a>(&mut self, field: &'static str, value: &'a str) -> Option<&'a str> {
        let value = self.required(field, "Phone", value)?;
        if !is_phone(value) {
            self.error(field, "Enter a valid phone number");
            return None;
        }
        Some(value)
    }

    pub fn number<T: FromStr>(&mut self, field: &'static str, label: &str, value: &str) -> Option<T> {
        let value = self.required(field, label, value)?;
        match value.parse::<T>() {
            Ok(n) => Some(n),
            Err(_) => {
                self.error(field, format!("{} must be a number", label));
                None
            }
        }
    }

    /// A finite, non-negative amount of money
    pub fn amount(&mut self, field: &'static str, label: &str, value: &str) -> Option<f64> {
        let amount: f64 = self.number(field, label, value)?;
        if !amount.is_finite() {
            self.error(field, format!("{} must be a number", label));
            return None;
        }
        if amount < 0.0 {
            self.error(field, format!("{} cannot be negative", label));
            return None;
        }
        Some(amount)
    }

    /// `YYYY-MM-DD`
    pub fn date(&mut self, field: &'static str, label: &str, value: &str) -> Option<NaiveDate> {
        let value = self.required(field, label, value)?;
        match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.error(field, format!("{} must be a date (YYYY-MM-DD)", label));
                None
            }
        }
    }

    pub fn password<'a>(&mut self, field: &'static str, value: &'a str) -> Option<&'a str> {
        if value.is_empty() {
            self.error(field, "Password is required");
            return None;
        }
        if value.chars().count() < MIN_PASSWORD_LEN {
            self.error(
                field,
                format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
            );
            return None;
        }
        Some(value)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_email("tenant@example.com"));
        assert!(is_email("  a.b+c@pg.co.in "));
        assert!(!is_email("tenant@example"));
        assert!(!is_email("tenant example.com"));
        assert!(!is_email("@example.com"));
    }

    #[test]
    fn phone_shape() {
        assert!(is_phone("9876543210"));
        assert!(is_phone("+91 98765-43210"));
        assert!(!is_phone("12345"));
        assert!(!is_phone("call me"));
    }

    #[test]
    fn first_error_per_field_wins() {
        let mut errors = ValidationErrors::new();
        errors.add("email", "Email is required");
        errors.add("email", "Enter a valid email address");
        errors.add("phone", "Phone is required");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email"), Some("Email is required"));
        assert_eq!(errors.to_string(), "email: Email is required; phone: Phone is required");

        errors.remove("email");
        assert_eq!(errors.first(), Some(("phone", "Phone is required")));
    }

    #[test]
    fn non_finite_amounts_are_not_numbers() {
        for raw in ["NaN", "inf", "-inf"] {
            let mut v = Validator::new();
            assert_eq!(v.amount("security_deposit", "Security deposit", raw), None);
            assert_eq!(
                v.into_errors().get("security_deposit"),
                Some("Security deposit must be a number"),
                "{}",
                raw
            );
        }

        let mut v = Validator::new();
        v.amount("security_deposit", "Security deposit", "-5");
        assert_eq!(
            v.into_errors().get("security_deposit"),
            Some("Security deposit cannot be negative")
        );
    }

    #[test]
    fn validator_rules() {
        let mut v = Validator::new();
        assert_eq!(v.required("name", "Name", "  Ravi "), Some("Ravi"));
        assert_eq!(v.number::<u8>("day", "Payment due day", "x"), None);
        assert_eq!(v.amount("deposit", "Security deposit", "-5"), None);
        assert_eq!(
            v.date("start", "Lease start date", "2026-11-01"),
            NaiveDate::from_ymd_opt(2026, 11, 1)
        );
        assert_eq!(v.date("end", "Lease end date", "01/11/2026"), None);
        assert_eq!(v.password("password", "short"), None);

        let errors = v.into_errors();
        assert_eq!(errors.get("day"), Some("Payment due day must be a number"));
        assert_eq!(errors.get("deposit"), Some("Security deposit cannot be negative"));
        assert!(errors.get("end").is_some());
        assert!(errors.get("password").unwrap().contains("at least 8"));
        assert!(errors.get("name").is_none());
    }
}
