//! Contact domain model.
//!
//! # Responsibility
//! - Define the canonical contact record held by the store.
//! - Validate untrusted add-form input into a storable shape.
//!
//! # Invariants
//! - `id` is unique for the session and never reused for another contact.
//! - `name` and `phone` are non-empty after trim.
//! - `email` matches the `local@domain.tld` shape.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email regex"));

/// Stable identifier for one contact.
///
/// Ordering follows assignment order, so the greatest id is the most
/// recently added contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(pub u64);

impl ContactId {
    /// Returns the raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }

    /// The following id, or `None` once the `u64` space is spent.
    pub(crate) fn checked_next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl Display for ContactId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Canonical contact record.
///
/// Raw snapshot records carry no favorite flag; it defaults to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Serialized as `isFavorite` to match the snapshot schema.
    #[serde(rename = "isFavorite", default)]
    pub is_favorite: bool,
}

impl Contact {
    /// Creates a non-favorite contact with a caller-provided id.
    pub fn new(
        id: ContactId,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            is_favorite: false,
        }
    }

    /// Checks stored-record invariants.
    ///
    /// Used by snapshot sources before records enter the store.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        check_fields(&self.name, &self.email, &self.phone)
    }

    /// Uppercased first character of the name, if any.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().and_then(|c| c.to_uppercase().next())
    }
}

/// Add-form input. Values are untrusted until [`ContactDraft::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ContactDraft {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Trims every field and checks each one independently.
    ///
    /// # Errors
    /// - Returns every failing field at once; never a partial result.
    pub fn validate(&self) -> Result<NewContact, ContactValidationError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let phone = self.phone.trim();
        check_fields(name, email, phone)?;

        Ok(NewContact {
            id: None,
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        })
    }
}

/// Validated record ready for insertion.
///
/// `id = None` asks the store to assign a fresh one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub id: Option<ContactId>,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl NewContact {
    pub(crate) fn into_contact(self, id: ContactId) -> Contact {
        Contact::new(id, self.name, self.email, self.phone)
    }
}

/// Form field a validation error is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ContactField {
    Name,
    Email,
    Phone,
}

impl ContactField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorReason {
    Required,
    Invalid,
}

/// One rejected field with its human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: ContactField,
    pub reason: FieldErrorReason,
}

impl FieldError {
    /// Message shown next to the form field.
    pub fn message(&self) -> &'static str {
        match (self.field, self.reason) {
            (ContactField::Name, _) => "Name is required",
            (ContactField::Email, FieldErrorReason::Required) => "Email is required",
            (ContactField::Email, FieldErrorReason::Invalid) => "Email is invalid",
            (ContactField::Phone, _) => "Phone is required",
        }
    }
}

/// Per-field validation failure for contact input.
///
/// Always holds at least one field, in `name`, `email`, `phone` order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactValidationError {
    errors: Vec<FieldError>,
}

impl ContactValidationError {
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Returns the error for one field, if that field failed.
    pub fn field(&self, field: ContactField) -> Option<&FieldError> {
        self.errors.iter().find(|err| err.field == field)
    }

    pub fn fields(&self) -> Vec<ContactField> {
        self.errors.iter().map(|err| err.field).collect()
    }
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let parts = self
            .errors
            .iter()
            .map(|err| format!("{}: {}", err.field.as_str(), err.message()))
            .collect::<Vec<_>>();
        write!(f, "invalid contact: {}", parts.join("; "))
    }
}

impl Error for ContactValidationError {}

/// Returns whether `value` has the `local@domain.tld` shape.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

fn check_fields(name: &str, email: &str, phone: &str) -> Result<(), ContactValidationError> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push(FieldError {
            field: ContactField::Name,
            reason: FieldErrorReason::Required,
        });
    }

    if email.trim().is_empty() {
        errors.push(FieldError {
            field: ContactField::Email,
            reason: FieldErrorReason::Required,
        });
    } else if !is_valid_email(email) {
        errors.push(FieldError {
            field: ContactField::Email,
            reason: FieldErrorReason::Invalid,
        });
    }

    if phone.trim().is_empty() {
        errors.push(FieldError {
            field: ContactField::Phone,
            reason: FieldErrorReason::Required,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ContactValidationError { errors })
    }
}
