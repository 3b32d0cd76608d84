//! Passenger table: filtering and row view models.

use serde::Serialize;

use crate::domain::passenger::{Passenger, RecordValue};
use crate::domain::types::AttachmentSlot;

/// Glyph shown for missing contact or email values.
pub const PLACEHOLDER: &str = "-";

/// Case-insensitive substring match on name or email. The empty term matches
/// everything; the input order is preserved.
pub fn filter_passengers<'a>(passengers: &'a [Passenger], term: &str) -> Vec<&'a Passenger> {
    if term.is_empty() {
        return passengers.iter().collect();
    }
    let needle = term.to_lowercase();
    let contains = |value: &Option<RecordValue>| {
        value
            .as_ref()
            .is_some_and(|v| v.to_string().to_lowercase().contains(&needle))
    };
    passengers
        .iter()
        .filter(|p| contains(&p.name) || contains(&p.email))
        .collect()
}

/// Turns a stored attachment locator into a link the browser can follow.
///
/// Absolute `http(s)` URLs are kept. Storage paths such as `uploads\photo.png`
/// are normalized and joined onto `files_base_url` when one is configured.
/// Locators carrying any other scheme (`javascript:`, `data:`, ...) or naming
/// another host (`//host/...`) are not links and yield `None`.
pub fn resolve_locator(locator: &str, files_base_url: Option<&str>) -> Option<String> {
    let locator = locator.trim();
    let normalized = locator.replace('\\', "/");
    match scheme(&normalized) {
        Some(scheme) if scheme == "http" || scheme == "https" => {
            return Some(locator.to_string());
        }
        Some(_) => return None,
        None => {}
    }
    let path = normalized.trim_start_matches('/');
    let path = path.strip_prefix("uploads/").unwrap_or(path);
    match files_base_url {
        Some(base) => Some(format!("{}/{}", base.trim_end_matches('/'), path)),
        None if normalized.starts_with("//") => None,
        None => Some(normalized),
    }
}

/// Lowercased URL scheme, when the locator starts with one.
fn scheme(locator: &str) -> Option<String> {
    let (scheme, _) = locator.split_once(':')?;
    let mut chars = scheme.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_valid = chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    (starts_alpha && rest_valid).then(|| scheme.to_ascii_lowercase())
}

/// One table row ready for the template.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PassengerRow {
    pub name: String,
    pub age: String,
    pub gender: String,
    pub contact: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub id_card_url: Option<String>,
}

impl PassengerRow {
    pub fn new(passenger: &Passenger, files_base_url: Option<&str>) -> Self {
        let shown = |value: &Option<RecordValue>| {
            value.as_ref().map(ToString::to_string).unwrap_or_default()
        };
        let present = |value: &Option<RecordValue>| Some(shown(value)).filter(|v| !v.is_empty());
        Self {
            name: shown(&passenger.name),
            age: shown(&passenger.age),
            gender: shown(&passenger.gender),
            contact: present(&passenger.contact),
            email: present(&passenger.email),
            photo_url: passenger
                .attachment(AttachmentSlot::Photo)
                .and_then(|l| resolve_locator(l, files_base_url)),
            id_card_url: passenger
                .attachment(AttachmentSlot::IdCard)
                .and_then(|l| resolve_locator(l, files_base_url)),
        }
    }
}

/// Filtered table plus the state needed to render its empty message.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListingView {
    pub rows: Vec<PassengerRow>,
    pub search: String,
    pub total: usize,
    pub empty_message: Option<&'static str>,
    pub placeholder: &'static str,
}

impl ListingView {
    pub fn build(passengers: &[Passenger], search: &str, files_base_url: Option<&str>) -> Self {
        let rows: Vec<_> = filter_passengers(passengers, search)
            .into_iter()
            .map(|p| PassengerRow::new(p, files_base_url))
            .collect();
        let empty_message = match (rows.is_empty(), search.is_empty()) {
            (false, _) => None,
            (true, false) => Some("No passengers match your search criteria."),
            (true, true) => Some("No passengers available."),
        };
        Self {
            rows,
            search: search.to_string(),
            total: passengers.len(),
            empty_message,
            placeholder: PLACEHOLDER,
        }
    }
}
