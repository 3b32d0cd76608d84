//! Draft rows of the intake form.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::domain::passenger::{Attachment, PassengerPayload};
use crate::domain::types::{
    AttachmentSlot, DraftId, Gender, PassengerAge, PassengerEmail, PassengerName,
    TypeConstraintError,
};

/// Fields of a draft that can carry a validation error.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Name,
    Age,
    Gender,
    Contact,
    Email,
    Photo,
    IdCard,
}

impl DraftField {
    pub const fn as_str(self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Age => "age",
            DraftField::Gender => "gender",
            DraftField::Contact => "contact",
            DraftField::Email => "email",
            DraftField::Photo => "photo",
            DraftField::IdCard => "id_card",
        }
    }
}

impl From<AttachmentSlot> for DraftField {
    fn from(slot: AttachmentSlot) -> Self {
        match slot {
            AttachmentSlot::Photo => DraftField::Photo,
            AttachmentSlot::IdCard => DraftField::IdCard,
        }
    }
}

impl Display for DraftField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a single draft row.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    #[default]
    Empty,
    Editing,
    Valid,
    Invalid,
    Submitting,
    Committed,
    Failed,
}

/// Single-field replacement applied to a draft.
#[derive(Clone, Debug, PartialEq)]
pub enum DraftEdit {
    Name(String),
    Age(String),
    Gender(Option<Gender>),
    Contact(String),
    Email(String),
    Attachment(AttachmentSlot, Option<Attachment>),
}

impl DraftEdit {
    pub fn field(&self) -> DraftField {
        match self {
            DraftEdit::Name(_) => DraftField::Name,
            DraftEdit::Age(_) => DraftField::Age,
            DraftEdit::Gender(_) => DraftField::Gender,
            DraftEdit::Contact(_) => DraftField::Contact,
            DraftEdit::Email(_) => DraftField::Email,
            DraftEdit::Attachment(slot, _) => DraftField::from(*slot),
        }
    }
}

/// Passenger data entered by the user but not yet sent to the API.
#[derive(Clone, Debug, PartialEq)]
pub struct PassengerDraft {
    pub id: DraftId,
    pub name: String,
    pub age: String,
    pub gender: Option<Gender>,
    pub contact: String,
    pub email: String,
    pub photo: Option<Attachment>,
    pub id_card: Option<Attachment>,
    pub status: DraftStatus,
}

impl PassengerDraft {
    pub fn empty(id: DraftId) -> Self {
        Self {
            id,
            name: String::new(),
            age: String::new(),
            gender: None,
            contact: String::new(),
            email: String::new(),
            photo: None,
            id_card: None,
            status: DraftStatus::Empty,
        }
    }

    /// `true` when nothing has been entered into any field.
    pub fn is_blank(&self) -> bool {
        self.name.is_empty()
            && self.age.is_empty()
            && self.gender.is_none()
            && self.contact.is_empty()
            && self.email.is_empty()
            && self.photo.is_none()
            && self.id_card.is_none()
    }

    pub fn attachment(&self, slot: AttachmentSlot) -> Option<&Attachment> {
        match slot {
            AttachmentSlot::Photo => self.photo.as_ref(),
            AttachmentSlot::IdCard => self.id_card.as_ref(),
        }
    }

    /// Returns `true` when applying `edit` would change the draft.
    pub fn differs(&self, edit: &DraftEdit) -> bool {
        match edit {
            DraftEdit::Name(value) => &self.name != value,
            DraftEdit::Age(value) => &self.age != value,
            DraftEdit::Gender(value) => &self.gender != value,
            DraftEdit::Contact(value) => &self.contact != value,
            DraftEdit::Email(value) => &self.email != value,
            DraftEdit::Attachment(slot, value) => self.attachment(*slot) != value.as_ref(),
        }
    }

    /// Replaces one field and moves the row back into editing.
    pub fn apply(&mut self, edit: DraftEdit) {
        match edit {
            DraftEdit::Name(value) => self.name = value,
            DraftEdit::Age(value) => self.age = value,
            DraftEdit::Gender(value) => self.gender = value,
            DraftEdit::Contact(value) => self.contact = value,
            DraftEdit::Email(value) => self.email = value,
            DraftEdit::Attachment(AttachmentSlot::Photo, value) => self.photo = value,
            DraftEdit::Attachment(AttachmentSlot::IdCard, value) => self.id_card = value,
        }
        self.status = if self.is_blank() {
            DraftStatus::Empty
        } else {
            DraftStatus::Editing
        };
    }

    /// Checks every field and returns the violations keyed by field.
    pub fn check(&self) -> Vec<(DraftField, &'static str)> {
        let mut violations = Vec::new();

        if PassengerName::new(self.name.as_str()).is_err() {
            violations.push((DraftField::Name, "Name is required"));
        }

        match PassengerAge::new(&self.age) {
            Ok(_) => {}
            Err(TypeConstraintError::EmptyString) => {
                violations.push((DraftField::Age, "Age is required"));
            }
            Err(_) => violations.push((DraftField::Age, "Age must be a positive number")),
        }

        if self.gender.is_none() {
            violations.push((DraftField::Gender, "Gender is required"));
        }

        // Only a field left untouched counts as absent.
        if !self.email.is_empty() && PassengerEmail::new(self.email.as_str()).is_err() {
            violations.push((DraftField::Email, "Invalid email format"));
        }

        violations
    }

    /// Builds the wire payload; fails on the first constraint the draft breaks.
    pub fn to_payload(&self) -> Result<PassengerPayload, TypeConstraintError> {
        let email = match self.email.as_str() {
            "" => None,
            email => Some(PassengerEmail::new(email)?),
        };
        let contact = Some(self.contact.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Ok(PassengerPayload {
            name: PassengerName::new(self.name.as_str())?,
            age: PassengerAge::new(&self.age)?,
            gender: self.gender.ok_or(TypeConstraintError::EmptyString)?,
            contact,
            email,
            photo: self.photo.clone(),
            id_card: self.id_card.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(id: u64) -> PassengerDraft {
        let mut draft = PassengerDraft::empty(DraftId::new(id));
        draft.apply(DraftEdit::Name("Ada".into()));
        draft.apply(DraftEdit::Age("36".into()));
        draft.apply(DraftEdit::Gender(Some(Gender::Female)));
        draft
    }

    #[test]
    fn editing_moves_status_and_back_to_empty() {
        let mut draft = PassengerDraft::empty(DraftId::new(1));
        assert_eq!(draft.status, DraftStatus::Empty);

        draft.apply(DraftEdit::Contact("555".into()));
        assert_eq!(draft.status, DraftStatus::Editing);

        draft.apply(DraftEdit::Contact(String::new()));
        assert_eq!(draft.status, DraftStatus::Empty);
    }

    #[test]
    fn check_reports_each_violation() {
        let mut draft = PassengerDraft::empty(DraftId::new(1));
        draft.apply(DraftEdit::Age("-1".into()));
        draft.apply(DraftEdit::Email("broken".into()));

        let fields: Vec<_> = draft.check().into_iter().collect();
        assert_eq!(
            fields,
            vec![
                (DraftField::Name, "Name is required"),
                (DraftField::Age, "Age must be a positive number"),
                (DraftField::Gender, "Gender is required"),
                (DraftField::Email, "Invalid email format"),
            ]
        );
    }

    #[test]
    fn valid_draft_builds_payload() {
        let mut draft = filled(3);
        draft.apply(DraftEdit::Contact("  ".into()));

        assert!(draft.check().is_empty());
        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.name.as_str(), "Ada");
        assert_eq!(payload.contact, None);
        assert_eq!(payload.email, None);
    }

    #[test]
    fn blank_email_is_not_absent() {
        let mut draft = filled(4);
        draft.apply(DraftEdit::Email("   ".into()));

        assert_eq!(draft.check(), vec![(DraftField::Email, "Invalid email format")]);
        assert!(draft.to_payload().is_err());
    }

    #[test]
    fn padded_email_is_sent_trimmed() {
        let mut draft = filled(5);
        draft.apply(DraftEdit::Email(" ada@example.com ".into()));

        assert!(draft.check().is_empty());
        let payload = draft.to_payload().unwrap();
        let email = payload.email.map(PassengerEmail::into_inner);
        assert_eq!(email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn differs_compares_attachments() {
        let mut draft = filled(1);
        let photo = Attachment::new("me.png", Some("image/png".into()), vec![9]);
        let edit = DraftEdit::Attachment(AttachmentSlot::Photo, Some(photo.clone()));

        assert!(draft.differs(&edit));
        draft.apply(edit.clone());
        assert!(!draft.differs(&edit));
        assert_eq!(draft.attachment(AttachmentSlot::Photo), Some(&photo));
    }
}
