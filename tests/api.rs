use std::sync::{Arc, Mutex};

use pushkind_passengers::api::ApiError;
use pushkind_passengers::api::http::decode_passenger_list;
use pushkind_passengers::domain::roster::{LoadFailure, Roster};
use pushkind_passengers::dto::main::IndexQuery;
use pushkind_passengers::services::main::{load_index_page, reload_passengers};
use pushkind_passengers::workspace::Workspace;

mod common;

use common::{FakePassengerApi, passenger};

#[test]
fn non_list_data_is_a_format_error() {
    let result = decode_passenger_list(br#"{ "data": "not-a-list" }"#);
    assert!(matches!(result, Err(ApiError::Format(_))));
}

#[actix_web::test]
async fn format_error_empties_the_list_and_offers_retry() {
    let response = decode_passenger_list(br#"{ "data": "not-a-list" }"#);
    let api = FakePassengerApi::with_response(response);
    let workspace = Arc::new(Mutex::new(Workspace::default()));

    let page = load_index_page(&api, &workspace, IndexQuery::default(), None)
        .await
        .unwrap();

    assert!(page.listing.is_none());
    assert_eq!(page.load_error, Some(LoadFailure::InvalidFormat.message()));
    let workspace = workspace.lock().unwrap();
    assert_eq!(workspace.roster, Roster::Failed(LoadFailure::InvalidFormat));
    assert!(workspace.roster.passengers().is_empty());
}

#[actix_web::test]
async fn search_uses_the_list_already_loaded() {
    let api = FakePassengerApi::with_passengers(vec![
        passenger("Ada", Some("ada@example.com")),
        passenger("Bob", Some("bob@foo.org")),
    ]);
    let workspace = Arc::new(Mutex::new(Workspace::default()));

    load_index_page(&api, &workspace, IndexQuery::default(), None)
        .await
        .unwrap();
    let page = load_index_page(
        &api,
        &workspace,
        IndexQuery {
            search: Some("FOO".into()),
        },
        None,
    )
    .await
    .unwrap();

    assert_eq!(api.list_calls(), 1);
    let listing = page.listing.unwrap();
    assert_eq!(listing.rows.len(), 1);
    assert_eq!(listing.rows[0].name, "Bob");
}

#[actix_web::test]
async fn explicit_reload_always_fetches() {
    let api = FakePassengerApi::with_passengers(vec![passenger("Ada", None)]);
    let workspace = Arc::new(Mutex::new(Workspace::default()));

    reload_passengers(&api, &workspace).await.unwrap();
    reload_passengers(&api, &workspace).await.unwrap();

    assert_eq!(api.list_calls(), 2);
    assert_eq!(workspace.lock().unwrap().roster.passengers().len(), 1);
}
