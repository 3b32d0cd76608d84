//! Intake page actions: editing drafts, managing rows and batch submission.

use std::future::Future;

use crate::api::PassengerApi;
use crate::domain::intake::{BatchReport, IntakeError, RowOutcome};
use crate::domain::types::DraftId;
use crate::forms::intake::{IntakeAction, IntakeUpload};
use crate::services::{ServiceError, ServiceResult};
use crate::workspace::{WorkspaceHandle, lock_workspace};

/// What happened to the intake after one form post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeOutcome {
    Saved,
    RowAdded(DraftId),
    /// `false` when the row was the last one or did not exist.
    RowRemoved(bool),
    Submitted(BatchReport),
}

/// Copies posted values into the drafts. Values equal to what the draft
/// already holds are skipped so unchanged rows keep their status.
pub fn apply_upload(workspace: &WorkspaceHandle, upload: &IntakeUpload) -> ServiceResult<usize> {
    let mut workspace = lock_workspace(workspace).ok_or(ServiceError::Internal)?;
    if workspace.intake.is_submitting() {
        return Err(IntakeError::SubmissionInProgress.into());
    }

    let mut applied = 0;
    for (id, edits) in upload.row_edits() {
        let Some(draft) = workspace.intake.draft(id) else {
            log::warn!("Ignoring values posted for unknown draft {id}");
            continue;
        };
        let changed: Vec<_> = edits.into_iter().filter(|e| draft.differs(e)).collect();
        for edit in changed {
            workspace.intake.edit(id, edit)?;
            applied += 1;
        }
    }
    Ok(applied)
}

pub fn add_row(workspace: &WorkspaceHandle) -> ServiceResult<DraftId> {
    let mut workspace = lock_workspace(workspace).ok_or(ServiceError::Internal)?;
    Ok(workspace.intake.add_row()?)
}

pub fn remove_row(workspace: &WorkspaceHandle, id: DraftId) -> ServiceResult<bool> {
    let mut workspace = lock_workspace(workspace).ok_or(ServiceError::Internal)?;
    Ok(workspace.intake.remove_row(id)?)
}

/// Validates every draft and submits them one at a time, in display order.
///
/// The first rejected row stops the batch. `on_committed` runs only after the
/// whole batch was accepted; by then the intake is back to a single empty row.
/// The workspace lock is never held while a request is in flight.
pub async fn submit_intake<A, F, Fut>(
    api: &A,
    workspace: &WorkspaceHandle,
    on_committed: F,
) -> ServiceResult<BatchReport>
where
    A: PassengerApi + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = ServiceResult<()>>,
{
    let batch = {
        let mut workspace = lock_workspace(workspace).ok_or(ServiceError::Internal)?;
        workspace.intake.begin_submit()?
    };

    let total = batch.len();
    let mut pending = PendingBatch::new(workspace, total);
    for (position, (id, payload)) in batch.iter().enumerate() {
        match api.submit_passenger(payload).await {
            Ok(ack) => {
                log::info!("Passenger row {id} accepted: {}", ack.0);
                pending.outcomes.push(RowOutcome::Committed(*id));
            }
            Err(err) => {
                log::error!(
                    "Failed to submit passenger row {id} ({} of {total}): {err}",
                    position + 1
                );
                pending.outcomes.push(RowOutcome::Failed(*id));
                break;
            }
        }
    }

    let report = pending.finish()?;

    if report.is_success() {
        on_committed().await?;
    }
    Ok(report)
}

/// Outcomes of a batch in flight. Dropping it unfinished, e.g. when the client
/// disconnects mid-request, still closes the batch with the rows seen so far.
struct PendingBatch<'a> {
    workspace: &'a WorkspaceHandle,
    outcomes: Vec<RowOutcome>,
    finished: bool,
}

impl<'a> PendingBatch<'a> {
    fn new(workspace: &'a WorkspaceHandle, total: usize) -> Self {
        Self {
            workspace,
            outcomes: Vec::with_capacity(total),
            finished: false,
        }
    }

    fn finish(mut self) -> ServiceResult<BatchReport> {
        self.finished = true;
        let mut workspace = lock_workspace(self.workspace).ok_or(ServiceError::Internal)?;
        Ok(workspace.intake.finish_submit(&self.outcomes)?)
    }
}

impl Drop for PendingBatch<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        log::warn!(
            "Passenger batch abandoned after {} row(s); releasing the intake",
            self.outcomes.len()
        );
        let Some(mut workspace) = lock_workspace(self.workspace) else {
            return;
        };
        if let Err(err) = workspace.intake.finish_submit(&self.outcomes) {
            log::error!("Failed to close abandoned passenger batch: {err}");
        }
    }
}

/// Applies the posted values, then performs the pressed action.
pub async fn handle_upload<A, F, Fut>(
    api: &A,
    workspace: &WorkspaceHandle,
    upload: IntakeUpload,
    on_committed: F,
) -> ServiceResult<IntakeOutcome>
where
    A: PassengerApi + ?Sized,
    F: FnOnce() -> Fut,
    Fut: Future<Output = ServiceResult<()>>,
{
    apply_upload(workspace, &upload)?;

    match upload.action {
        IntakeAction::Save => Ok(IntakeOutcome::Saved),
        IntakeAction::AddRow => add_row(workspace).map(IntakeOutcome::RowAdded),
        IntakeAction::RemoveRow(id) => remove_row(workspace, id).map(IntakeOutcome::RowRemoved),
        IntakeAction::Submit => submit_intake(api, workspace, on_committed)
            .await
            .map(IntakeOutcome::Submitted),
    }
}
