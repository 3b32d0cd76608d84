use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::{Deserialize, Serialize};
use tera::Tera;

use crate::api::PassengerApi;
use crate::dto::main::IndexQuery;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template, session_workspace};
use crate::services::main as main_service;
use crate::workspace::WorkspaceStore;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SearchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl SearchParams {
    /// Location of the index page keeping the current search term.
    pub fn index_location(&self) -> String {
        match self.q.as_deref() {
            Some(term) if !term.is_empty() => match serde_html_form::to_string(self) {
                Ok(query) => format!("/?{query}"),
                Err(err) => {
                    log::warn!("Failed to encode search term: {err}");
                    "/".to_string()
                }
            },
            _ => "/".to_string(),
        }
    }
}

#[get("/")]
pub async fn show_index(
    params: web::Query<SearchParams>,
    session: Session,
    store: web::Data<WorkspaceStore>,
    api: web::Data<dyn PassengerApi>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let workspace = match session_workspace(&session, &store) {
        Ok(workspace) => workspace,
        Err(response) => return response,
    };

    let query = IndexQuery {
        search: params.into_inner().q,
    };
    let data = match main_service::load_index_page(
        api.get_ref(),
        &workspace,
        query,
        server_config.files_base_url.as_deref(),
    )
    .await
    {
        Ok(data) => data,
        Err(err) => {
            log::error!("Failed to load index page: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, "index");
    context.insert("intake", &data.intake);
    context.insert("listing", &data.listing);
    context.insert("load_error", &data.load_error);

    render_template(&tera, "main/index.html", &context)
}

#[post("/refresh")]
pub async fn refresh_passengers(
    session: Session,
    store: web::Data<WorkspaceStore>,
    api: web::Data<dyn PassengerApi>,
    web::Form(params): web::Form<SearchParams>,
) -> impl Responder {
    let workspace = match session_workspace(&session, &store) {
        Ok(workspace) => workspace,
        Err(response) => return response,
    };

    if let Err(err) = main_service::reload_passengers(api.get_ref(), &workspace).await {
        log::error!("Failed to refresh passengers: {err}");
        return HttpResponse::InternalServerError().finish();
    }

    redirect(&params.index_location())
}
