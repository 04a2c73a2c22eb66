use crate::models::Routine;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A routine kept in the library, with usage metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRoutine {
    pub id: Uuid,
    pub routine: Routine,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    pub play_count: u32,
    pub last_played: Option<DateTime<Utc>>,
}

impl SavedRoutine {
    pub fn new(routine: Routine, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            routine,
            created_at: now,
            last_modified: now,
            play_count: 0,
            last_played: None,
        }
    }

    pub fn name(&self) -> &str {
        self.routine.name()
    }

    /// Replace the stored routine and bump `last_modified`.
    pub fn replace(&mut self, routine: Routine, now: DateTime<Utc>) {
        self.routine = routine;
        self.touch(now);
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_modified = now;
    }

    /// Count one play. Count and timestamp change together.
    pub fn record_play(&mut self, now: DateTime<Utc>) {
        self.play_count = self.play_count.saturating_add(1);
        self.last_played = Some(now);
    }
}
