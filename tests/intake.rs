use pushkind_passengers::domain::draft::{DraftEdit, DraftField, DraftStatus};
use pushkind_passengers::domain::intake::{IntakeError, PassengerIntake, RowOutcome};
use pushkind_passengers::domain::types::{DraftId, Gender};

fn fill(intake: &mut PassengerIntake, id: DraftId, name: &str, age: &str) {
    intake.edit(id, DraftEdit::Name(name.into())).unwrap();
    intake.edit(id, DraftEdit::Age(age.into())).unwrap();
    intake.edit(id, DraftEdit::Gender(Some(Gender::Male))).unwrap();
}

#[test]
fn missing_age_blocks_submission_for_that_row_only() {
    let mut intake = PassengerIntake::new();
    let first = intake.drafts()[0].id;
    let second = intake.add_row().unwrap();
    fill(&mut intake, first, "Ada", "36");
    intake.edit(second, DraftEdit::Name("Bob".into())).unwrap();
    intake.edit(second, DraftEdit::Gender(Some(Gender::Male))).unwrap();

    assert_eq!(intake.begin_submit(), Err(IntakeError::Invalid(1)));
    assert!(!intake.is_submitting());

    assert_eq!(intake.errors().len(), 1);
    let errors = intake.errors_for(second).unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(&DraftField::Age), Some(&"Age is required"));
    assert_eq!(intake.drafts()[0].status, DraftStatus::Valid);
    assert_eq!(intake.drafts()[1].status, DraftStatus::Invalid);
}

#[test]
fn removing_a_row_keeps_other_errors() {
    let mut intake = PassengerIntake::new();
    let first = intake.drafts()[0].id;
    let second = intake.add_row().unwrap();
    let third = intake.add_row().unwrap();
    intake.edit(first, DraftEdit::Email("bad".into())).unwrap();
    assert!(!intake.validate());
    assert_eq!(intake.errors().len(), 3);

    assert_eq!(intake.remove_row(second), Ok(true));

    assert_eq!(intake.len(), 2);
    assert!(intake.errors_for(second).is_none());
    assert!(intake.errors_for(first).is_some());
    assert!(intake.errors_for(third).is_some());
}

#[test]
fn editing_a_field_clears_only_its_error() {
    let mut intake = PassengerIntake::new();
    let id = intake.drafts()[0].id;
    intake.validate();
    assert_eq!(intake.errors_for(id).map(|e| e.len()), Some(3));

    intake.edit(id, DraftEdit::Name("Ada".into())).unwrap();

    let errors = intake.errors_for(id).unwrap();
    assert!(!errors.contains_key(&DraftField::Name));
    assert!(errors.contains_key(&DraftField::Age));
}

#[test]
fn resubmitting_after_partial_failure_sends_every_row() {
    let mut intake = PassengerIntake::new();
    let first = intake.drafts()[0].id;
    let second = intake.add_row().unwrap();
    fill(&mut intake, first, "Ada", "36");
    fill(&mut intake, second, "Bob", "40");

    intake.begin_submit().unwrap();
    let report = intake
        .finish_submit(&[RowOutcome::Committed(first), RowOutcome::Failed(second)])
        .unwrap();
    assert!(!report.is_success());

    let batch = intake.begin_submit().unwrap();
    let ids: Vec<_> = batch.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![first, second]);
}

#[test]
fn whitespace_only_email_is_rejected() {
    let mut intake = PassengerIntake::new();
    let id = intake.drafts()[0].id;
    fill(&mut intake, id, "Ada", "36");
    intake.edit(id, DraftEdit::Email("   ".into())).unwrap();

    assert_eq!(intake.begin_submit(), Err(IntakeError::Invalid(1)));
    let errors = intake.errors_for(id).unwrap();
    assert_eq!(errors.get(&DraftField::Email), Some(&"Invalid email format"));
    assert!(!intake.is_submitting());
}
