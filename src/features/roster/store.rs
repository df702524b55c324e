//! # Roster Store
//!
//! Owns the list of tracked people. All reads hand out clones; all
//! mutations go through `add`/`remove_*`, which validate, update the
//! in-memory roster and then mirror the full snapshot to the configured
//! backend. A failed mirror write is logged and swallowed: the in-memory
//! roster stays authoritative for the running process.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Case-insensitive substring search for /find
//! - 1.1.0: Remove-by-name delegating to remove-by-id
//! - 1.0.0: Initial creation with add/remove/list and JSON mirroring

use crate::core::errors::RosterError;
use crate::features::roster::person::{normalize_handle, parse_birth_date, NewPerson, Person};
use crate::features::roster::persistence::RosterBackend;
use log::{error, info, warn};
use std::sync::Arc;
use tokio::sync::RwLock;

struct RosterState {
    people: Vec<Person>,
    /// High-water mark + 1; IDs are never handed out twice within a
    /// process even after the highest record is removed
    next_id: u64,
}

impl RosterState {
    fn new(people: Vec<Person>) -> Self {
        let next_id = people.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        RosterState { people, next_id }
    }
}

/// Clonable handle to the shared roster.
#[derive(Clone)]
pub struct RosterStore {
    state: Arc<RwLock<RosterState>>,
    backend: Arc<dyn RosterBackend>,
}

impl RosterStore {
    /// Create a store over an already-materialized roster.
    pub fn new(people: Vec<Person>, backend: Arc<dyn RosterBackend>) -> Self {
        RosterStore {
            state: Arc::new(RwLock::new(RosterState::new(people))),
            backend,
        }
    }

    /// Create a store by loading the backend snapshot. A failed load is
    /// logged and the store starts empty rather than refusing to start.
    pub async fn load(backend: Arc<dyn RosterBackend>) -> Self {
        let people = match backend.load_all().await {
            Ok(people) => {
                info!("Loaded {} people from roster backing", people.len());
                people
            }
            Err(e) => {
                warn!("Failed to load roster backing, starting empty: {e}");
                Vec::new()
            }
        };
        Self::new(people, backend)
    }

    /// All people in insertion order.
    pub async fn list(&self) -> Vec<Person> {
        self.state.read().await.people.clone()
    }

    /// Number of tracked people.
    pub async fn len(&self) -> usize {
        self.state.read().await.people.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.people.is_empty()
    }

    /// Look up a person by ID.
    pub async fn get_by_id(&self, id: u64) -> Option<Person> {
        self.state
            .read()
            .await
            .people
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Validate a candidate, assign the next ID, append and mirror.
    ///
    /// Rejects empty names and malformed or impossible birth dates with
    /// [`RosterError::Validation`], and case-insensitive handle collisions
    /// with [`RosterError::Duplicate`].
    pub async fn add(&self, candidate: NewPerson) -> Result<Person, RosterError> {
        let name = candidate.name.trim().to_string();
        if name.is_empty() {
            return Err(RosterError::validation("name must not be empty"));
        }
        parse_birth_date(&candidate.birth_date)?;
        let handle = candidate.handle.as_deref().and_then(normalize_handle);

        let mut state = self.state.write().await;

        if let Some(handle) = &handle {
            let lowered = handle.to_lowercase();
            let collision = state
                .people
                .iter()
                .filter_map(|p| p.handle.as_deref())
                .any(|existing| existing.to_lowercase() == lowered);
            if collision {
                return Err(RosterError::Duplicate {
                    handle: handle.clone(),
                });
            }
        }

        let person = Person {
            id: state.next_id,
            name,
            birth_date: candidate.birth_date,
            handle,
        };
        state.next_id += 1;
        state.people.push(person.clone());

        self.mirror(&state.people).await;
        info!("Added #{} {} ({})", person.id, person.name, person.birth_date);
        Ok(person)
    }

    /// Remove a person by ID. Returns whether a record was removed.
    pub async fn remove_by_id(&self, id: u64) -> bool {
        let mut state = self.state.write().await;
        let before = state.people.len();
        state.people.retain(|p| p.id != id);
        let removed = state.people.len() < before;

        if removed {
            self.mirror(&state.people).await;
            info!("Removed #{id} from roster");
        }
        removed
    }

    /// Remove a person by case-insensitive exact name match.
    pub async fn remove_by_name(&self, name: &str) -> Result<(), RosterError> {
        let lowered = name.trim().to_lowercase();
        let id = {
            let state = self.state.read().await;
            state
                .people
                .iter()
                .find(|p| p.name.to_lowercase() == lowered)
                .map(|p| p.id)
        };

        match id {
            Some(id) => {
                self.remove_by_id(id).await;
                Ok(())
            }
            None => Err(RosterError::NotFound),
        }
    }

    /// Case-insensitive substring search over names, in roster order.
    pub async fn find_by_name_substring(&self, term: &str) -> Vec<Person> {
        let lowered = term.trim().to_lowercase();
        self.state
            .read()
            .await
            .people
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&lowered))
            .cloned()
            .collect()
    }

    /// Best-effort snapshot write behind every successful mutation.
    async fn mirror(&self, people: &[Person]) {
        if let Err(e) = self.backend.save_all(people).await {
            error!("Roster snapshot write failed (in-memory state kept): {e}");
        }
    }
}
