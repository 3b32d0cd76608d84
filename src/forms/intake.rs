//! Multipart binding of the intake page.
//!
//! The page posts every row at once. Text inputs are named `{field}_{id}`,
//! file inputs `photo_{id}` / `idCard_{id}`, the rows themselves are listed in
//! display order through repeated `row` fields and the pressed button arrives
//! as `action`.

use std::collections::HashMap;

use actix_multipart::Multipart;
use futures_util::StreamExt;

use crate::domain::draft::DraftEdit;
use crate::domain::passenger::Attachment;
use crate::domain::types::{AttachmentSlot, DraftId, Gender};
use crate::forms::FormError;

/// Button pressed on the intake page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntakeAction {
    /// Keep the edits, do nothing else.
    Save,
    AddRow,
    RemoveRow(DraftId),
    #[default]
    Submit,
}

impl IntakeAction {
    /// Parses the `action` value; unknown values fall back to submit.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if let Some(id) = value.strip_prefix("remove_row:") {
            return match id.parse::<DraftId>() {
                Ok(id) => IntakeAction::RemoveRow(id),
                Err(_) => IntakeAction::Save,
            };
        }
        match value {
            "save" => IntakeAction::Save,
            "add_row" => IntakeAction::AddRow,
            _ => IntakeAction::Submit,
        }
    }
}

/// Values posted for one draft row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowUpload {
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub photo: Option<Attachment>,
    pub id_card: Option<Attachment>,
}

impl RowUpload {
    /// Edits carried by this row. Missing text inputs and empty file inputs
    /// produce no edit.
    pub fn edits(&self) -> Vec<DraftEdit> {
        let mut edits = Vec::new();
        if let Some(name) = &self.name {
            edits.push(DraftEdit::Name(name.clone()));
        }
        if let Some(age) = &self.age {
            edits.push(DraftEdit::Age(age.clone()));
        }
        if let Some(gender) = &self.gender {
            edits.push(DraftEdit::Gender(gender.parse::<Gender>().ok()));
        }
        if let Some(contact) = &self.contact {
            edits.push(DraftEdit::Contact(contact.clone()));
        }
        if let Some(email) = &self.email {
            edits.push(DraftEdit::Email(email.clone()));
        }
        if let Some(photo) = &self.photo {
            edits.push(DraftEdit::Attachment(
                AttachmentSlot::Photo,
                Some(photo.clone()),
            ));
        }
        if let Some(id_card) = &self.id_card {
            edits.push(DraftEdit::Attachment(
                AttachmentSlot::IdCard,
                Some(id_card.clone()),
            ));
        }
        edits
    }
}

/// Parsed submission of the intake page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakeUpload {
    /// Row ids in display order.
    pub order: Vec<DraftId>,
    pub rows: HashMap<DraftId, RowUpload>,
    pub action: IntakeAction,
}

/// Splits `name_12` into (`name`, 12).
fn split_field_name(name: &str) -> Option<(&str, DraftId)> {
    let (field, id) = name.rsplit_once('_')?;
    let id = id.parse::<DraftId>().ok()?;
    Some((field, id))
}

impl IntakeUpload {
    /// Records a text part.
    pub fn push_text(&mut self, name: &str, value: String) -> Result<(), FormError> {
        match name {
            "action" => {
                self.action = IntakeAction::parse(&value);
                return Ok(());
            }
            "row" => {
                let id = value
                    .parse::<DraftId>()
                    .map_err(|_| FormError::InvalidDraftId)?;
                if !self.order.contains(&id) {
                    self.order.push(id);
                }
                return Ok(());
            }
            _ => {}
        }

        let Some((field, id)) = split_field_name(name) else {
            return Ok(());
        };
        let row = self.rows.entry(id).or_default();
        match field {
            "name" => row.name = Some(value),
            "age" => row.age = Some(value),
            "gender" => row.gender = Some(value),
            "contact" => row.contact = Some(value),
            "email" => row.email = Some(value),
            _ => {}
        }
        Ok(())
    }

    /// Records a file part. Empty file inputs are ignored.
    pub fn push_file(&mut self, name: &str, attachment: Attachment) {
        if attachment.file_name.is_empty() && attachment.bytes.is_empty() {
            return;
        }
        let Some((field, id)) = split_field_name(name) else {
            return;
        };
        let Ok(slot) = field.parse::<AttachmentSlot>() else {
            return;
        };
        let row = self.rows.entry(id).or_default();
        match slot {
            AttachmentSlot::Photo => row.photo = Some(attachment),
            AttachmentSlot::IdCard => row.id_card = Some(attachment),
        }
    }

    /// Drains the multipart stream, limiting each part to `max_part_bytes`.
    pub async fn from_multipart(
        mut payload: Multipart,
        max_part_bytes: usize,
    ) -> Result<Self, FormError> {
        let mut upload = Self::default();

        while let Some(item) = payload.next().await {
            let mut field = item.map_err(|e| FormError::Multipart(e.to_string()))?;
            let name = field.name().unwrap_or_default().to_string();
            let file_name = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .map(str::to_string);
            let content_type = field.content_type().map(|mime| mime.to_string());

            let mut bytes = Vec::new();
            while let Some(chunk) = field.next().await {
                let chunk = chunk.map_err(|e| FormError::Multipart(e.to_string()))?;
                if bytes.len() + chunk.len() > max_part_bytes {
                    return Err(FormError::PartTooLarge(name));
                }
                bytes.extend_from_slice(&chunk);
            }

            match file_name {
                Some(file_name) => {
                    upload.push_file(&name, Attachment::new(file_name, content_type, bytes));
                }
                None => {
                    let value = String::from_utf8(bytes)
                        .map_err(|_| FormError::InvalidText(name.clone()))?;
                    upload.push_text(&name, value)?;
                }
            }
        }

        Ok(upload)
    }

    /// Rows with their edits, in display order. Rows posted without a `row`
    /// marker follow in id order.
    pub fn row_edits(&self) -> Vec<(DraftId, Vec<DraftEdit>)> {
        let mut ids = self.order.clone();
        let mut extra: Vec<_> = self
            .rows
            .keys()
            .filter(|id| !ids.contains(id))
            .copied()
            .collect();
        extra.sort();
        ids.extend(extra);

        ids.into_iter()
            .filter_map(|id| self.rows.get(&id).map(|row| (id, row.edits())))
            .collect()
    }
}
