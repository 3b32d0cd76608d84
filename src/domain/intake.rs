//! Multi-row intake form state.
//!
//! [`PassengerIntake`] owns the ordered draft rows, the validation errors keyed
//! by [`DraftId`] and the submission-in-progress flag. Network work happens
//! outside: the submit service calls [`PassengerIntake::begin_submit`] to
//! snapshot payloads, talks to the API, then reports back through
//! [`PassengerIntake::finish_submit`].

use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::draft::{DraftEdit, DraftField, DraftStatus, PassengerDraft};
use crate::domain::passenger::PassengerPayload;
use crate::domain::types::DraftId;

/// Validation messages of one row, keyed by field.
pub type FieldErrors = BTreeMap<DraftField, &'static str>;

/// Rejections raised by the intake state machine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IntakeError {
    #[error("a submission is already in progress")]
    SubmissionInProgress,

    #[error("no submission is in progress")]
    NotSubmitting,

    #[error("draft {0} does not exist")]
    UnknownDraft(DraftId),

    #[error("{0} passenger row(s) failed validation")]
    Invalid(usize),
}

/// Result of one row in a submitted batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowOutcome {
    Committed(DraftId),
    Failed(DraftId),
}

/// Summary of a finished batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchReport {
    /// Rows accepted by the API, in submission order.
    pub committed: Vec<DraftId>,
    /// Row that was rejected, if any; later rows were not attempted.
    pub failed: Option<DraftId>,
    /// Number of rows in the batch.
    pub total: usize,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_none() && self.committed.len() == self.total
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PassengerIntake {
    drafts: Vec<PassengerDraft>,
    errors: BTreeMap<DraftId, FieldErrors>,
    submitting: bool,
    next_id: DraftId,
}

impl Default for PassengerIntake {
    fn default() -> Self {
        Self::new()
    }
}

impl PassengerIntake {
    /// Starts with a single empty draft.
    pub fn new() -> Self {
        let first = DraftId::new(1);
        Self {
            drafts: vec![PassengerDraft::empty(first)],
            errors: BTreeMap::new(),
            submitting: false,
            next_id: first.next(),
        }
    }

    pub fn drafts(&self) -> &[PassengerDraft] {
        &self.drafts
    }

    pub fn draft(&self, id: DraftId) -> Option<&PassengerDraft> {
        self.drafts.iter().find(|d| d.id == id)
    }

    pub fn errors(&self) -> &BTreeMap<DraftId, FieldErrors> {
        &self.errors
    }

    pub fn errors_for(&self, id: DraftId) -> Option<&FieldErrors> {
        self.errors.get(&id)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    fn ensure_idle(&self) -> Result<(), IntakeError> {
        if self.submitting {
            Err(IntakeError::SubmissionInProgress)
        } else {
            Ok(())
        }
    }

    fn allocate_id(&mut self) -> DraftId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    /// Appends an empty draft and returns its id.
    pub fn add_row(&mut self) -> Result<DraftId, IntakeError> {
        self.ensure_idle()?;
        let id = self.allocate_id();
        self.drafts.push(PassengerDraft::empty(id));
        Ok(id)
    }

    /// Removes a draft and its errors. Returns `false` when nothing was removed,
    /// which includes the attempt to remove the last remaining row.
    pub fn remove_row(&mut self, id: DraftId) -> Result<bool, IntakeError> {
        self.ensure_idle()?;
        if self.drafts.len() <= 1 {
            return Ok(false);
        }
        let Some(position) = self.drafts.iter().position(|d| d.id == id) else {
            return Ok(false);
        };
        self.drafts.remove(position);
        self.errors.remove(&id);
        Ok(true)
    }

    /// Positional variant of [`Self::remove_row`].
    pub fn remove_row_at(&mut self, index: usize) -> Result<bool, IntakeError> {
        match self.drafts.get(index) {
            Some(draft) => {
                let id = draft.id;
                self.remove_row(id)
            }
            None => {
                self.ensure_idle()?;
                Ok(false)
            }
        }
    }

    /// Replaces one field. Does not validate; clears the stale error of that field.
    pub fn edit(&mut self, id: DraftId, edit: DraftEdit) -> Result<(), IntakeError> {
        self.ensure_idle()?;
        let draft = self
            .drafts
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(IntakeError::UnknownDraft(id))?;
        let field = edit.field();
        draft.apply(edit);

        if let Some(row_errors) = self.errors.get_mut(&id) {
            row_errors.remove(&field);
            if row_errors.is_empty() {
                self.errors.remove(&id);
            }
        }
        Ok(())
    }

    /// Validates every row independently and replaces the error map.
    /// Returns `true` when no row has a violation.
    pub fn validate(&mut self) -> bool {
        let mut errors = BTreeMap::new();
        for draft in &mut self.drafts {
            let violations: FieldErrors = draft.check().into_iter().collect();
            if violations.is_empty() {
                draft.status = DraftStatus::Valid;
            } else {
                draft.status = DraftStatus::Invalid;
                errors.insert(draft.id, violations);
            }
        }
        self.errors = errors;
        self.errors.is_empty()
    }

    /// Validates the batch and, when it passes, marks it in flight and hands out
    /// one payload per row in display order.
    pub fn begin_submit(&mut self) -> Result<Vec<(DraftId, PassengerPayload)>, IntakeError> {
        self.ensure_idle()?;
        if !self.validate() {
            return Err(IntakeError::Invalid(self.errors.len()));
        }

        let mut batch = Vec::with_capacity(self.drafts.len());
        for draft in &self.drafts {
            // validate() already accepted every row
            let payload = draft
                .to_payload()
                .map_err(|_| IntakeError::Invalid(1))?;
            batch.push((draft.id, payload));
        }

        for draft in &mut self.drafts {
            draft.status = DraftStatus::Submitting;
        }
        self.submitting = true;
        Ok(batch)
    }

    /// Records the outcome of a batch started with [`Self::begin_submit`].
    ///
    /// A fully committed batch resets the form to one empty draft. Otherwise
    /// the drafts keep their values and carry their per-row status.
    pub fn finish_submit(&mut self, outcomes: &[RowOutcome]) -> Result<BatchReport, IntakeError> {
        if !self.submitting {
            return Err(IntakeError::NotSubmitting);
        }
        self.submitting = false;

        let mut report = BatchReport {
            committed: Vec::new(),
            failed: None,
            total: self.drafts.len(),
        };
        for outcome in outcomes {
            match outcome {
                RowOutcome::Committed(id) => report.committed.push(*id),
                RowOutcome::Failed(id) => report.failed = Some(*id),
            }
        }

        if report.is_success() {
            let id = self.allocate_id();
            self.drafts = vec![PassengerDraft::empty(id)];
            self.errors.clear();
            return Ok(report);
        }

        for draft in &mut self.drafts {
            draft.status = if report.committed.contains(&draft.id) {
                DraftStatus::Committed
            } else if report.failed == Some(draft.id) {
                DraftStatus::Failed
            } else {
                DraftStatus::Valid
            };
        }
        Ok(report)
    }
}
