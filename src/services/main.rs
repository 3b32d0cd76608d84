//! Controller of the main page: owns the canonical passenger list.

use crate::api::{ApiError, PassengerApi};
use crate::domain::roster::{LoadFailure, Roster};
use crate::dto::intake::IntakeView;
use crate::dto::listing::ListingView;
use crate::dto::main::{IndexPageData, IndexQuery};
use crate::services::{ServiceError, ServiceResult};
use crate::workspace::{WorkspaceHandle, lock_workspace};

/// Fetches the passenger list and replaces the roster wholesale.
///
/// Load failures are not errors here: they turn the roster into
/// [`Roster::Failed`], which the page renders as a retry banner.
pub async fn reload_passengers<A>(api: &A, workspace: &WorkspaceHandle) -> ServiceResult<()>
where
    A: PassengerApi + ?Sized,
{
    let roster = match api.list_passengers().await {
        Ok(passengers) => {
            log::info!("Loaded {} passenger(s)", passengers.len());
            Roster::Loaded(passengers)
        }
        Err(err @ ApiError::Format(_)) => {
            log::error!("Unexpected passenger list format: {err}");
            Roster::Failed(LoadFailure::InvalidFormat)
        }
        Err(err @ ApiError::Transport(_)) => {
            log::error!("Failed to load passengers: {err}");
            Roster::Failed(LoadFailure::Unavailable)
        }
    };

    let mut workspace = lock_workspace(workspace).ok_or(ServiceError::Internal)?;
    workspace.roster = roster;
    Ok(())
}

/// Loads everything the main page shows.
///
/// The list is fetched only on the first visit of a workspace; afterwards the
/// search term filters the list already held.
pub async fn load_index_page<A>(
    api: &A,
    workspace: &WorkspaceHandle,
    query: IndexQuery,
    files_base_url: Option<&str>,
) -> ServiceResult<IndexPageData>
where
    A: PassengerApi + ?Sized,
{
    let needs_load = {
        let workspace = lock_workspace(workspace).ok_or(ServiceError::Internal)?;
        !workspace.roster.is_loaded()
    };
    if needs_load {
        reload_passengers(api, workspace).await?;
    }

    let workspace = lock_workspace(workspace).ok_or(ServiceError::Internal)?;
    let search = query.search.unwrap_or_default();

    let (listing, load_error) = match workspace.roster.failure() {
        Some(failure) => (None, Some(failure.message())),
        None => (
            Some(ListingView::build(
                workspace.roster.passengers(),
                &search,
                files_base_url,
            )),
            None,
        ),
    };

    Ok(IndexPageData {
        intake: IntakeView::from(&workspace.intake),
        listing,
        load_error,
    })
}
