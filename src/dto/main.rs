use serde::Serialize;

use crate::dto::intake::IntakeView;
use crate::dto::listing::ListingView;

/// Query parameters accepted by the index page service.
#[derive(Debug, Default)]
pub struct IndexQuery {
    /// Search string entered by the user; filtering happens locally.
    pub search: Option<String>,
}

/// Data required to render the main index template.
#[derive(Debug, Serialize)]
pub struct IndexPageData {
    pub intake: IntakeView,
    /// `None` when the last load failed; the page shows the retry banner instead.
    pub listing: Option<ListingView>,
    pub load_error: Option<&'static str>,
}
