use crate::error::RoutineError;
use crate::models::{Routine, SavedRoutine};
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::cmp::Reverse;
use uuid::Uuid;

/// In-memory collection of saved routines.
#[derive(Debug, Clone, Default)]
pub struct RoutineLibrary {
    routines: Vec<SavedRoutine>,
}

fn not_found(id: Uuid) -> RoutineError {
    RoutineError::NotFound { entity: "saved routine", id }
}

/// Routines whose name, block names or block categories contain `query`
/// (ignoring case), most recently modified first. A blank query matches
/// everything.
pub fn search<'a, I>(routines: I, query: &str) -> Vec<&'a SavedRoutine>
where
    I: IntoIterator<Item = &'a SavedRoutine>,
{
    let needle = query.trim().to_lowercase();
    let mut found: Vec<&SavedRoutine> = routines
        .into_iter()
        .filter(|saved| needle.is_empty() || saved.routine.matches(&needle))
        .collect();
    found.sort_by_key(|saved| Reverse(saved.last_modified));
    found
}

impl RoutineLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_routines(routines: Vec<SavedRoutine>) -> Self {
        Self { routines }
    }

    pub fn len(&self) -> usize {
        self.routines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routines.is_empty()
    }

    /// Saved routines in insertion order.
    pub fn all(&self) -> &[SavedRoutine] {
        &self.routines
    }

    pub fn get(&self, id: Uuid) -> Option<&SavedRoutine> {
        self.routines.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: Uuid) -> Result<&mut SavedRoutine, RoutineError> {
        self.routines
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| not_found(id))
    }

    /// Store `routine` as a new entry and return its id.
    pub fn save_new(&mut self, routine: Routine, now: DateTime<Utc>) -> Uuid {
        let saved = SavedRoutine::new(routine, now);
        let id = saved.id;
        info!("Saved routine '{}' as {id}", saved.name());
        self.routines.push(saved);
        id
    }

    /// Overwrite the routine stored under `id`.
    pub fn update(
        &mut self,
        id: Uuid,
        routine: Routine,
        now: DateTime<Utc>,
    ) -> Result<&SavedRoutine, RoutineError> {
        let saved = self.get_mut(id)?;
        saved.replace(routine, now);
        debug!("Updated saved routine {id}");
        Ok(saved)
    }

    pub fn remove(&mut self, id: Uuid) -> Result<SavedRoutine, RoutineError> {
        let index = self
            .routines
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| not_found(id))?;
        let removed = self.routines.remove(index);
        info!("Removed saved routine '{}'", removed.name());
        Ok(removed)
    }

    /// Count one play of the routine stored under `id`.
    pub fn record_play(&mut self, id: Uuid, now: DateTime<Utc>) -> Result<&SavedRoutine, RoutineError> {
        let saved = self.get_mut(id)?;
        saved.record_play(now);
        debug!("Routine {id} played {} times", saved.play_count);
        Ok(saved)
    }

    /// See [`search`].
    pub fn search(&self, query: &str) -> Vec<&SavedRoutine> {
        search(&self.routines, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::sample_library;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 9, 8, 0, 0).unwrap()
    }

    fn search_names(library: &RoutineLibrary, query: &str) -> Vec<String> {
        library
            .search(query)
            .into_iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    #[test]
    fn test_search_by_routine_name_any_case() {
        let library = sample_library(now()).unwrap();

        assert_eq!(search_names(&library, "morning"), vec!["Morning Meditation"]);
        assert_eq!(search_names(&library, "MORNING"), vec!["Morning Meditation"]);
    }

    #[test]
    fn test_search_without_match_is_empty() {
        let library = sample_library(now()).unwrap();
        assert!(library.search("zz").is_empty());
    }

    #[test]
    fn test_search_matches_blocks_and_categories() {
        let library = sample_library(now()).unwrap();

        // Only Evening Wind Down contains a body scan block
        assert_eq!(search_names(&library, "body scan"), vec!["Evening Wind Down"]);
        // Every sample contains a silence block
        assert_eq!(search_names(&library, "silence").len(), 3);
    }

    #[test]
    fn test_blank_search_returns_all_newest_first() {
        let library = sample_library(now()).unwrap();

        assert_eq!(
            search_names(&library, "  "),
            vec!["Morning Meditation", "Evening Wind Down", "Quick Focus"]
        );
    }

    #[test]
    fn test_results_sorted_by_last_modified() {
        let mut library = sample_library(now()).unwrap();
        let quick = library.search("quick")[0].id;

        let routine = library.get(quick).unwrap().routine.clone();
        library.update(quick, routine, now() + Duration::hours(1)).unwrap();

        assert_eq!(search_names(&library, "")[0], "Quick Focus");
    }

    #[test]
    fn test_filtered_results_sorted_by_last_modified() {
        let mut library = sample_library(now()).unwrap();
        let quick = library.search("quick")[0].id;

        let routine = library.get(quick).unwrap().routine.clone();
        library.update(quick, routine, now() + Duration::hours(1)).unwrap();

        assert_eq!(
            search_names(&library, "silence"),
            vec!["Quick Focus", "Morning Meditation", "Evening Wind Down"]
        );
        assert_eq!(search_names(&library, "breath"), vec!["Quick Focus", "Morning Meditation"]);
    }

    #[test]
    fn test_save_new_and_get() {
        let mut library = RoutineLibrary::new();
        let id = library.save_new(Routine::new("Lunch Reset").unwrap(), now());

        let saved = library.get(id).unwrap();
        assert_eq!(saved.name(), "Lunch Reset");
        assert_eq!(saved.created_at, now());
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_update_unknown_id() {
        let mut library = RoutineLibrary::new();
        let result = library.update(Uuid::new_v4(), Routine::default(), now());
        assert!(matches!(result, Err(RoutineError::NotFound { entity: "saved routine", .. })));
    }

    #[test]
    fn test_remove() {
        let mut library = sample_library(now()).unwrap();
        let id = library.all()[1].id;

        let removed = library.remove(id).unwrap();

        assert_eq!(removed.name(), "Evening Wind Down");
        assert_eq!(library.len(), 2);
        assert!(library.get(id).is_none());
        assert!(library.remove(id).is_err());
    }

    #[test]
    fn test_record_play() {
        let mut library = sample_library(now()).unwrap();
        let id = library.all()[0].id;
        let later = now() + Duration::minutes(20);

        library.record_play(id, now()).unwrap();
        let saved = library.record_play(id, later).unwrap();

        assert_eq!(saved.play_count, 2);
        assert_eq!(saved.last_played, Some(later));
        assert!(library.record_play(Uuid::new_v4(), later).is_err());
    }

    #[test]
    fn test_free_search_over_slice() {
        let library = sample_library(now()).unwrap();
        let routines: Vec<SavedRoutine> = library.all().to_vec();

        let found = search(&routines, "focus");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name(), "Quick Focus");
    }
}
