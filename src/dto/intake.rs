//! View model of the intake form.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::draft::{DraftStatus, PassengerDraft};
use crate::domain::intake::PassengerIntake;
use crate::domain::types::{AttachmentSlot, Gender};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DraftRowView {
    pub id: u64,
    /// 1-based position shown as "Passenger #n".
    pub number: usize,
    pub name: String,
    pub age: String,
    pub gender: Option<&'static str>,
    pub contact: String,
    pub email: String,
    pub photo_name: Option<String>,
    pub id_card_name: Option<String>,
    pub status: DraftStatus,
    /// Validation messages keyed by field name.
    pub errors: BTreeMap<&'static str, &'static str>,
}

impl DraftRowView {
    fn new(number: usize, draft: &PassengerDraft, intake: &PassengerIntake) -> Self {
        let errors = intake
            .errors_for(draft.id)
            .map(|row| row.iter().map(|(f, m)| (f.as_str(), *m)).collect())
            .unwrap_or_default();
        let file_name = |slot| draft.attachment(slot).map(|a| a.file_name.clone());

        Self {
            id: draft.id.get(),
            number,
            name: draft.name.clone(),
            age: draft.age.clone(),
            gender: draft.gender.map(Gender::as_str),
            contact: draft.contact.clone(),
            email: draft.email.clone(),
            photo_name: file_name(AttachmentSlot::Photo),
            id_card_name: file_name(AttachmentSlot::IdCard),
            status: draft.status,
            errors,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct IntakeView {
    pub rows: Vec<DraftRowView>,
    /// Rows can be removed only while more than one exists.
    pub removable: bool,
    pub submitting: bool,
    pub genders: Vec<&'static str>,
}

impl From<&PassengerIntake> for IntakeView {
    fn from(intake: &PassengerIntake) -> Self {
        Self {
            rows: intake
                .drafts()
                .iter()
                .enumerate()
                .map(|(i, draft)| DraftRowView::new(i + 1, draft, intake))
                .collect(),
            removable: intake.len() > 1,
            submitting: intake.is_submitting(),
            genders: Gender::ALL.iter().map(|g| g.as_str()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::draft::DraftEdit;

    #[test]
    fn view_numbers_rows_and_exposes_errors() {
        let mut intake = PassengerIntake::new();
        let second = intake.add_row().unwrap();
        intake
            .edit(second, DraftEdit::Name("Bob".into()))
            .unwrap();
        intake.validate();

        let view = IntakeView::from(&intake);
        assert!(view.removable);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[1].number, 2);
        assert_eq!(view.rows[1].id, second.get());
        assert_eq!(view.rows[1].errors.get("age"), Some(&"Age is required"));
        assert!(!view.rows[1].errors.contains_key("name"));
        assert_eq!(view.rows[0].status, DraftStatus::Invalid);
        assert_eq!(view.genders, vec!["Male", "Female", "Other"]);
    }

    #[test]
    fn single_row_is_not_removable() {
        let view = IntakeView::from(&PassengerIntake::new());
        assert!(!view.removable);
        assert!(!view.submitting);
    }
}
