//! HTTP handlers and the helpers they share.

use actix_session::Session;
use actix_web::HttpResponse;
use actix_web::http::header;
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::workspace::{WorkspaceHandle, WorkspaceId, WorkspaceStore};

pub mod intake;
pub mod main;

/// Session key holding the id of the browser's workspace.
pub const WORKSPACE_SESSION_KEY: &str = "workspace_id";

/// Maps a flash message level to the Bootstrap alert class.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every page: pending alerts and the active navigation item.
pub fn base_context(flash_messages: &IncomingFlashMessages, current_page: &str) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Resolves the workspace of the current session, creating one on first visit.
///
/// Returns a ready-made error response when the session or the store is
/// unusable.
pub fn session_workspace(
    session: &Session,
    store: &WorkspaceStore,
) -> Result<WorkspaceHandle, HttpResponse> {
    let known = match session.get::<String>(WORKSPACE_SESSION_KEY) {
        Ok(value) => value.and_then(|raw| raw.parse::<WorkspaceId>().ok()),
        Err(err) => {
            log::warn!("Discarding unreadable session: {err}");
            None
        }
    };

    let Some((id, handle)) = store.checkout(known) else {
        return Err(HttpResponse::InternalServerError().finish());
    };

    if known != Some(id) {
        if let Err(err) = session.insert(WORKSPACE_SESSION_KEY, id.to_string()) {
            log::error!("Failed to store workspace id in session: {err}");
            return Err(HttpResponse::InternalServerError().finish());
        }
    }
    Ok(handle)
}
