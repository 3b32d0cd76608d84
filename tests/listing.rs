use pushkind_passengers::api::http::decode_passenger_list;
use pushkind_passengers::domain::passenger::Passenger;
use pushkind_passengers::dto::listing::{ListingView, PLACEHOLDER, filter_passengers};
use serde_json::json;

fn record(name: &str, email: &str) -> Passenger {
    Passenger {
        name: Some(name.into()),
        email: Some(email.into()),
        ..Passenger::default()
    }
}

#[test]
fn search_matches_only_the_record_with_the_term() {
    let records = vec![
        record("Ada", "ada@example.com"),
        record("Bob", "bob@foo.org"),
        record("Cy", "cy@example.com"),
    ];

    let found = filter_passengers(&records, "foo");

    assert_eq!(found, vec![&records[1]]);
}

#[test]
fn empty_search_keeps_server_order() {
    let records = vec![
        record("Zed", "z@example.com"),
        record("Ada", "a@example.com"),
    ];

    let view = ListingView::build(&records, "", None);

    let names: Vec<_> = view.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Zed", "Ada"]);
    assert_eq!(view.total, 2);
    assert_eq!(view.empty_message, None);
    assert_eq!(view.placeholder, PLACEHOLDER);
}

#[test]
fn records_with_odd_shapes_still_render() {
    let records: Vec<Passenger> = serde_json::from_value(json!([
        {
            "name": "Ada",
            "age": 36.5,
            "photo": "uploads\\ada.png",
            "idCard": "https://cdn.example.com/id.pdf"
        },
        {}
    ]))
    .unwrap();

    let view = ListingView::build(&records, "", Some("http://files.example.com/uploads"));

    assert_eq!(view.rows[0].age, "36.5");
    assert_eq!(
        view.rows[0].photo_url.as_deref(),
        Some("http://files.example.com/uploads/ada.png")
    );
    assert_eq!(
        view.rows[0].id_card_url.as_deref(),
        Some("https://cdn.example.com/id.pdf")
    );
    assert_eq!(view.rows[1].name, "");
    assert_eq!(view.rows[1].photo_url, None);
}

#[test]
fn numeric_contact_does_not_fail_the_listing() {
    let records = decode_passenger_list(br#"{"data":[{"name":"Ada","contact":5551234}]}"#).unwrap();

    let view = ListingView::build(&records, "", None);

    assert_eq!(view.rows[0].name, "Ada");
    assert_eq!(view.rows[0].contact.as_deref(), Some("5551234"));
}

#[test]
fn script_locators_are_not_rendered_as_links() {
    let records: Vec<Passenger> = serde_json::from_value(json!([
        { "name": "Mallory", "photo": "javascript:alert(1)", "idCard": "data:text/html,x" }
    ]))
    .unwrap();

    let view = ListingView::build(&records, "", None);

    assert_eq!(view.rows[0].photo_url, None);
    assert_eq!(view.rows[0].id_card_url, None);
}
