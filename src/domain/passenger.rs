use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::types::{AttachmentSlot, Gender, PassengerAge, PassengerEmail, PassengerName};

/// Scalar as stored by the remote API. Records are not normalized server-side,
/// so any field may come back as a string, a number or something else entirely.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RecordValue {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Other(serde_json::Value),
}

impl RecordValue {
    /// The value when the server stored it as a string.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RecordValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl Display for RecordValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordValue::Text(text) => f.write_str(text),
            RecordValue::Number(number) => write!(f, "{number}"),
            RecordValue::Bool(flag) => write!(f, "{flag}"),
            RecordValue::Other(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for RecordValue {
    fn from(value: &str) -> Self {
        RecordValue::Text(value.to_string())
    }
}

impl From<String> for RecordValue {
    fn from(value: String) -> Self {
        RecordValue::Text(value)
    }
}

/// Passenger record confirmed by the remote API.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Passenger {
    #[serde(default)]
    pub name: Option<RecordValue>,
    #[serde(default)]
    pub age: Option<RecordValue>,
    #[serde(default)]
    pub gender: Option<RecordValue>,
    #[serde(default)]
    pub contact: Option<RecordValue>,
    #[serde(default)]
    pub email: Option<RecordValue>,
    /// Locator of the stored photo (URL or storage path).
    #[serde(default)]
    pub photo: Option<RecordValue>,
    /// Locator of the stored ID document (URL or storage path).
    #[serde(default, rename = "idCard")]
    pub id_card: Option<RecordValue>,
}

impl Passenger {
    /// Returns the locator for the given attachment slot, if present and non-blank.
    /// Only string values are locators.
    pub fn attachment(&self, slot: AttachmentSlot) -> Option<&str> {
        let locator = match slot {
            AttachmentSlot::Photo => self.photo.as_ref(),
            AttachmentSlot::IdCard => self.id_card.as_ref(),
        };
        locator
            .and_then(RecordValue::as_text)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Uploaded file held in memory until the draft is submitted.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl std::fmt::Debug for Attachment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Validated draft ready to be sent to `POST {base}/add`.
#[derive(Clone, Debug, PartialEq)]
pub struct PassengerPayload {
    pub name: PassengerName,
    pub age: PassengerAge,
    pub gender: Gender,
    pub contact: Option<String>,
    pub email: Option<PassengerEmail>,
    pub photo: Option<Attachment>,
    pub id_card: Option<Attachment>,
}

impl PassengerPayload {
    /// Text parts in wire order; absent optional values become empty strings.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.as_str().to_string()),
            ("age", self.age.as_str().to_string()),
            ("gender", self.gender.as_str().to_string()),
            ("contact", self.contact.clone().unwrap_or_default()),
            (
                "email",
                self.email
                    .as_ref()
                    .map(|email| email.as_str().to_string())
                    .unwrap_or_default(),
            ),
        ]
    }

    /// File parts that are actually present; empty slots are omitted entirely.
    pub fn attachments(&self) -> Vec<(AttachmentSlot, &Attachment)> {
        [
            (AttachmentSlot::Photo, self.photo.as_ref()),
            (AttachmentSlot::IdCard, self.id_card.as_ref()),
        ]
        .into_iter()
        .filter_map(|(slot, attachment)| attachment.map(|a| (slot, a)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_decodes_leniently() {
        let json = r#"{"_id":"x1","name":"Ada","age":36,"idCard":"uploads\\id.pdf"}"#;
        let passenger: Passenger = serde_json::from_str(json).unwrap();

        assert_eq!(passenger.name, Some("Ada".into()));
        assert_eq!(passenger.age.as_ref().map(ToString::to_string), Some("36".to_string()));
        assert_eq!(passenger.contact, None);
        assert_eq!(passenger.attachment(AttachmentSlot::IdCard), Some("uploads\\id.pdf"));
        assert_eq!(passenger.attachment(AttachmentSlot::Photo), None);
    }

    #[test]
    fn scalars_of_any_type_are_kept_verbatim() {
        let passenger: Passenger = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "age": "41",
            "contact": 5551234,
            "email": null,
            "gender": true,
            "photo": { "path": "a.png" }
        }))
        .unwrap();

        let shown = |value: &Option<RecordValue>| value.as_ref().map(ToString::to_string);
        assert_eq!(passenger.age, Some("41".into()));
        assert_eq!(shown(&passenger.contact).as_deref(), Some("5551234"));
        assert_eq!(shown(&passenger.gender).as_deref(), Some("true"));
        assert_eq!(passenger.email, None);
        assert_eq!(passenger.attachment(AttachmentSlot::Photo), None);
    }

    #[test]
    fn payload_fills_blank_optionals_and_skips_empty_slots() {
        let payload = PassengerPayload {
            name: PassengerName::new("Ada").unwrap(),
            age: PassengerAge::new("36").unwrap(),
            gender: Gender::Female,
            contact: None,
            email: None,
            photo: None,
            id_card: Some(Attachment::new("id.pdf", None, vec![1, 2, 3])),
        };

        let fields = payload.text_fields();
        assert!(fields.contains(&("contact", String::new())));
        assert!(fields.contains(&("email", String::new())));

        let slots: Vec<_> = payload.attachments().into_iter().map(|(s, _)| s).collect();
        assert_eq!(slots, vec![AttachmentSlot::IdCard]);
    }
}
