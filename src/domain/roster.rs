use crate::domain::passenger::Passenger;

/// User-facing reason a passenger list load failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadFailure {
    /// Network failure or non-success status.
    Unavailable,
    /// The server answered with an unexpected body shape.
    InvalidFormat,
}

impl LoadFailure {
    pub const fn message(self) -> &'static str {
        match self {
            LoadFailure::Unavailable => "Failed to load passengers. Please try again later.",
            LoadFailure::InvalidFormat => "Received invalid data format from the server",
        }
    }
}

/// Canonical passenger list held by the controller.
///
/// Always either the last successful load or empty; never merged.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Roster {
    #[default]
    NotLoaded,
    Loaded(Vec<Passenger>),
    Failed(LoadFailure),
}

impl Roster {
    pub fn is_loaded(&self) -> bool {
        !matches!(self, Roster::NotLoaded)
    }

    /// Passengers to display; empty unless the last load succeeded.
    pub fn passengers(&self) -> &[Passenger] {
        match self {
            Roster::Loaded(passengers) => passengers,
            Roster::NotLoaded | Roster::Failed(_) => &[],
        }
    }

    pub fn failure(&self) -> Option<LoadFailure> {
        match self {
            Roster::Failed(failure) => Some(*failure),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_roster_is_empty() {
        let roster = Roster::Failed(LoadFailure::InvalidFormat);
        assert!(roster.is_loaded());
        assert!(roster.passengers().is_empty());
        assert_eq!(
            roster.failure().map(LoadFailure::message),
            Some("Received invalid data format from the server")
        );
    }

    #[test]
    fn loaded_roster_exposes_list() {
        let roster = Roster::Loaded(vec![Passenger::default(), Passenger::default()]);
        assert_eq!(roster.passengers().len(), 2);
        assert_eq!(roster.failure(), None);
        assert!(!Roster::NotLoaded.is_loaded());
    }
}
