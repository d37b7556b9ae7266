//! Registration and login form validation.
//!
//! Every check runs on submit and all failures are collected per field, so a
//! front end can show each message next to its input.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Shortest accepted password, counted in Unicode characters.
///
/// The web form counted UTF-16 code units, so four emoji passed there and
/// fail here.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Form inputs, ordered as they appear on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FullName,
    Email,
    Password,
    ConfirmPassword,
    BusinessName,
    Location,
    AgreeToTerms,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::FullName => "Full name",
            Field::Email => "Email",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm password",
            Field::BusinessName => "Business name",
            Field::Location => "Location",
            Field::AgreeToTerms => "Terms",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} is required")]
    Required(Field),

    #[error("Email is invalid")]
    InvalidEmail,

    #[error("Password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    PasswordTooShort,

    #[error("Please confirm your password")]
    ConfirmationMissing,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("You must agree to the terms")]
    TermsNotAccepted,
}

/// Field-level errors from one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, error: FieldError) {
        self.errors.insert(field, error);
    }

    pub fn get(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Drop the error shown for `field`, e.g. once the user edits it again.
    pub fn clear(&mut self, field: Field) -> Option<FieldError> {
        self.errors.remove(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.errors.values().map(|e| e.to_string()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for FormErrors {}

fn email_pattern() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"\S+@\S+\.\S+").ok())
        .as_ref()
}

/// Loose shape check: something, an `@`, something, a dot, something.
pub fn looks_like_email(value: &str) -> bool {
    email_pattern().is_some_and(|re| re.is_match(value))
}

fn check_email(value: &str, errors: &mut FormErrors) {
    if value.trim().is_empty() {
        errors.insert(Field::Email, FieldError::Required(Field::Email));
    } else if !looks_like_email(value) {
        errors.insert(Field::Email, FieldError::InvalidEmail);
    }
}

fn check_required(field: Field, value: &str, errors: &mut FormErrors) {
    if value.trim().is_empty() {
        errors.insert(field, FieldError::Required(field));
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub business_name: String,
    pub location: String,
    pub agree_to_terms: bool,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();

        check_required(Field::FullName, &self.full_name, &mut errors);
        check_email(&self.email, &mut errors);

        if self.password.is_empty() {
            errors.insert(Field::Password, FieldError::Required(Field::Password));
        } else if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            errors.insert(Field::Password, FieldError::PasswordTooShort);
        }

        if self.confirm_password.is_empty() {
            errors.insert(Field::ConfirmPassword, FieldError::ConfirmationMissing);
        } else if self.password != self.confirm_password {
            errors.insert(Field::ConfirmPassword, FieldError::PasswordMismatch);
        }

        check_required(Field::BusinessName, &self.business_name, &mut errors);
        check_required(Field::Location, &self.location, &mut errors);

        if !self.agree_to_terms {
            errors.insert(Field::AgreeToTerms, FieldError::TermsNotAccepted);
        }

        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::new();
        check_email(&self.email, &mut errors);
        if self.password.is_empty() {
            errors.insert(Field::Password, FieldError::Required(Field::Password));
        }
        errors.into_result()
    }
}
