//! Strongly-typed value objects used by passenger drafts and payloads.
//!
//! These wrappers enforce basic invariants (non-empty names, positive ages,
//! loosely-shaped emails) so that once a value reaches a
//! [`PassengerPayload`](crate::domain::passenger::PassengerPayload) it can be
//! sent to the remote API without further checks.
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided age was not a number.
    #[error("age must be a number")]
    InvalidAge,
    /// Provided age was zero or negative.
    #[error("age must be greater than zero")]
    NonPositiveAge,
    /// Provided email failed the shape check.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided gender is not one of the known options.
    #[error("invalid gender: {0}")]
    InvalidGender(String),
    /// Provided attachment slot name is unknown.
    #[error("invalid attachment slot: {0}")]
    InvalidSlot(String),
    /// Provided draft identifier could not be parsed.
    #[error("invalid draft id")]
    InvalidDraftId,
}

/// Matches `<non-whitespace>@<non-whitespace>.<non-whitespace>` anywhere in the value.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\S+@\S+\.\S+").unwrap_or_else(|err| panic!("invalid email pattern: {err}"))
});

/// Returns `true` when the value looks like `local@domain.tld`.
pub fn is_email_shaped(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

/// Stable identifier of a draft row within one intake form.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DraftId(u64);

impl DraftId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw `u64` backing this identifier.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Identifier following this one.
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Display for DraftId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DraftId {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| TypeConstraintError::InvalidDraftId)
    }
}

/// Passenger name trimmed and guaranteed non-empty.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PassengerName(String);

impl PassengerName {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for PassengerName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for PassengerName {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Positive age, keeping the text the user typed for the wire.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PassengerAge {
    raw: String,
    value: f64,
}

impl PassengerAge {
    /// Parses a trimmed, finite, strictly positive number.
    pub fn new(value: &str) -> Result<Self, TypeConstraintError> {
        let raw = value.trim();
        if raw.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        let parsed = raw
            .parse::<f64>()
            .map_err(|_| TypeConstraintError::InvalidAge)?;
        if !parsed.is_finite() {
            return Err(TypeConstraintError::InvalidAge);
        }
        if parsed <= 0.0 {
            return Err(TypeConstraintError::NonPositiveAge);
        }
        Ok(Self {
            raw: raw.to_string(),
            value: parsed,
        })
    }

    /// Borrow the age as typed (trimmed).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Display for PassengerAge {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Gender options offered by the intake form.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub const fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            other => Err(TypeConstraintError::InvalidGender(other.to_string())),
        }
    }
}

/// Optional contact email; empty input means "not provided".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct PassengerEmail(String);

impl PassengerEmail {
    /// Trims the value and checks it against the `x@y.z` shape.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        if !is_email_shaped(&trimmed) {
            return Err(TypeConstraintError::InvalidEmail);
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for PassengerEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for PassengerEmail {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// One of the two binary-file slots on a draft.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttachmentSlot {
    Photo,
    IdCard,
}

impl AttachmentSlot {
    pub const ALL: [AttachmentSlot; 2] = [AttachmentSlot::Photo, AttachmentSlot::IdCard];

    /// Multipart part name used on the wire.
    pub const fn field_name(self) -> &'static str {
        match self {
            AttachmentSlot::Photo => "photo",
            AttachmentSlot::IdCard => "idCard",
        }
    }
}

impl Display for AttachmentSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_name())
    }
}

impl FromStr for AttachmentSlot {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "photo" => Ok(AttachmentSlot::Photo),
            "idCard" => Ok(AttachmentSlot::IdCard),
            other => Err(TypeConstraintError::InvalidSlot(other.to_string())),
        }
    }
}
