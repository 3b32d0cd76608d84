#[cfg(feature = "server")]
use std::sync::Arc;
#[cfg(feature = "server")]
use std::time::Duration;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::api::PassengerApi;
#[cfg(feature = "server")]
use crate::api::http::HttpPassengerApi;
#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::routes::intake::post_intake;
#[cfg(feature = "server")]
use crate::routes::main::{refresh_passengers, show_index};
#[cfg(feature = "server")]
use crate::workspace::WorkspaceStore;

#[cfg(feature = "server")]
pub mod api;
pub mod domain;
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod workspace;

/// Registers the page handlers. Shared state is expected as app data:
/// `Tera`, `dyn PassengerApi`, `WorkspaceStore` and `ServerConfig`.
#[cfg(feature = "server")]
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(show_index)
        .service(refresh_passengers)
        .service(post_intake);
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let api = HttpPassengerApi::new(
        &server_config.api_base_url,
        Duration::from_secs(server_config.api_timeout_secs),
    )
    .map_err(|e| std::io::Error::other(format!("Failed to build API client: {e}")))?;
    let api: Arc<dyn PassengerApi> = Arc::new(api);
    let api = web::Data::from(api);

    let store = web::Data::new(WorkspaceStore::new(
        chrono::Duration::minutes(server_config.workspace_idle_minutes),
        server_config.max_workspaces,
    ));

    // Keys and stores for sessions and flash messages.
    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving passengers from {} on {}:{}",
        server_config.api_base_url,
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", server_config.assets_dir.clone()))
            .configure(configure)
            .app_data(web::Data::new(tera.clone()))
            .app_data(api.clone())
            .app_data(store.clone())
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
