//! In-memory per-session state.
//!
//! Every browser session gets a [`Workspace`] holding its intake form and the
//! canonical passenger list. Workspaces live only in memory and are swept once
//! they have been idle for longer than the configured TTL. The store holds at
//! most `max_workspaces`; beyond that the least recently seen one is dropped.

use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::domain::intake::PassengerIntake;
use crate::domain::roster::Roster;

/// Random identifier stored in the session cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorkspaceId(Uuid);

impl WorkspaceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WorkspaceId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for WorkspaceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkspaceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Default)]
pub struct Workspace {
    pub intake: PassengerIntake,
    pub roster: Roster,
}

pub type WorkspaceHandle = Arc<Mutex<Workspace>>;

/// Locks a workspace, mapping a poisoned lock to `None`.
pub fn lock_workspace(handle: &WorkspaceHandle) -> Option<MutexGuard<'_, Workspace>> {
    match handle.lock() {
        Ok(guard) => Some(guard),
        Err(_) => {
            log::error!("Workspace lock is poisoned");
            None
        }
    }
}

struct Entry {
    handle: WorkspaceHandle,
    last_seen: DateTime<Utc>,
}

pub struct WorkspaceStore {
    entries: Mutex<HashMap<WorkspaceId, Entry>>,
    idle_ttl: Duration,
    max_workspaces: usize,
}

impl WorkspaceStore {
    pub fn new(idle_ttl: Duration, max_workspaces: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            idle_ttl,
            max_workspaces: max_workspaces.max(1),
        }
    }

    /// Returns the workspace for `id`, creating a fresh one when the id is
    /// missing or unknown. Idle workspaces are swept on the way.
    pub fn checkout(&self, id: Option<WorkspaceId>) -> Option<(WorkspaceId, WorkspaceHandle)> {
        self.checkout_at(id, Utc::now())
    }

    fn checkout_at(
        &self,
        id: Option<WorkspaceId>,
        now: DateTime<Utc>,
    ) -> Option<(WorkspaceId, WorkspaceHandle)> {
        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(_) => {
                log::error!("Workspace store lock is poisoned");
                return None;
            }
        };

        let before = entries.len();
        entries.retain(|_, entry| now - entry.last_seen <= self.idle_ttl);
        let swept = before - entries.len();
        if swept > 0 {
            log::info!("Swept {swept} idle workspace(s)");
        }

        if let Some(id) = id {
            if let Some(entry) = entries.get_mut(&id) {
                entry.last_seen = now;
                return Some((id, entry.handle.clone()));
            }
        }

        while entries.len() >= self.max_workspaces {
            let Some(oldest) = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| *id)
            else {
                break;
            };
            entries.remove(&oldest);
            log::warn!("Workspace limit reached; evicted workspace {oldest}");
        }

        let id = WorkspaceId::new();
        let handle = Arc::new(Mutex::new(Workspace::default()));
        entries.insert(
            id,
            Entry {
                handle: handle.clone(),
                last_seen: now,
            },
        );
        log::debug!("Created workspace {id}");
        Some((id, handle))
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
