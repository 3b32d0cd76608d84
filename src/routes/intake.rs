use actix_multipart::Multipart;
use actix_session::Session;
use actix_web::{HttpResponse, Responder, post, web};
use actix_web_flash_messages::FlashMessage;

use crate::api::PassengerApi;
use crate::domain::intake::IntakeError;
use crate::forms::intake::IntakeUpload;
use crate::models::config::ServerConfig;
use crate::routes::{redirect, session_workspace};
use crate::services::ServiceError;
use crate::services::intake::{self as intake_service, IntakeOutcome};
use crate::services::main as main_service;
use crate::workspace::WorkspaceStore;

#[post("/intake")]
pub async fn post_intake(
    session: Session,
    store: web::Data<WorkspaceStore>,
    api: web::Data<dyn PassengerApi>,
    server_config: web::Data<ServerConfig>,
    payload: Multipart,
) -> impl Responder {
    let workspace = match session_workspace(&session, &store) {
        Ok(workspace) => workspace,
        Err(response) => return response,
    };

    let max_part_bytes = server_config.max_attachment_bytes;
    let upload = match IntakeUpload::from_multipart(payload, max_part_bytes).await {
        Ok(upload) => upload,
        Err(err) => {
            log::error!("Failed to read intake form: {err}");
            FlashMessage::error("Failed to read the submitted form. Please try again.").send();
            return redirect("/");
        }
    };

    let api = api.get_ref();
    let outcome = intake_service::handle_upload(api, &workspace, upload, || {
        main_service::reload_passengers(api, &workspace)
    })
    .await;

    match outcome {
        Ok(IntakeOutcome::Submitted(report)) if report.is_success() => {
            FlashMessage::success("Passengers added successfully!").send();
        }
        Ok(IntakeOutcome::Submitted(_)) => {
            FlashMessage::error("Failed to add passengers. Please try again.").send();
        }
        Ok(IntakeOutcome::Saved | IntakeOutcome::RowAdded(_) | IntakeOutcome::RowRemoved(_)) => {}
        Err(ServiceError::Intake(IntakeError::Invalid(_))) => {
            FlashMessage::warning("Please fix the highlighted fields.").send();
        }
        Err(ServiceError::Intake(IntakeError::SubmissionInProgress)) => {
            FlashMessage::warning("Submission already in progress.").send();
        }
        Err(ServiceError::Internal) => {
            return HttpResponse::InternalServerError().finish();
        }
        Err(err) => {
            log::error!("Failed to process intake form: {err}");
            FlashMessage::error("Failed to add passengers. Please try again.").send();
        }
    }

    redirect("/")
}
