// src/bridge/dtos.rs

use crate::models::{BellSound, Block, BlockCategory, Routine, SavedRoutine};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockResponse {
    pub id: Uuid,
    pub name: String,
    pub duration_minutes: u32,
    pub category: BlockCategory,
    pub icon: &'static str,
}

impl From<&Block> for BlockResponse {
    fn from(block: &Block) -> Self {
        Self {
            id: block.id(),
            name: block.name().to_string(),
            duration_minutes: block.duration_minutes(),
            category: block.category(),
            icon: block.category().icon(),
        }
    }
}

/// Read-only view of the routine being edited, as rendered by the host.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineSnapshot {
    pub name: String,
    pub blocks: Vec<BlockResponse>,
    pub transition_bells: Vec<Option<BellSound>>,
    pub opening_bell: Option<BellSound>,
    pub closing_bell: Option<BellSound>,
    pub total_duration_minutes: u32,
}

impl From<&Routine> for RoutineSnapshot {
    fn from(routine: &Routine) -> Self {
        Self {
            name: routine.name().to_string(),
            blocks: routine.blocks().iter().map(BlockResponse::from).collect(),
            transition_bells: routine.transition_bells().to_vec(),
            opening_bell: routine.opening_bell(),
            closing_bell: routine.closing_bell(),
            total_duration_minutes: routine.total_duration(),
        }
    }
}

/// One row of the library list.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRoutineSummary {
    pub id: Uuid,
    pub name: String,
    pub block_count: usize,
    pub total_duration_minutes: u32,
    pub categories: Vec<BlockCategory>,
    pub last_modified: DateTime<Utc>,
    pub play_count: u32,
    pub last_played: Option<DateTime<Utc>>,
}

impl From<&SavedRoutine> for SavedRoutineSummary {
    fn from(saved: &SavedRoutine) -> Self {
        Self {
            id: saved.id,
            name: saved.name().to_string(),
            block_count: saved.routine.len(),
            total_duration_minutes: saved.routine.total_duration(),
            categories: saved.routine.blocks().iter().map(Block::category).collect(),
            last_modified: saved.last_modified,
            play_count: saved.play_count,
            last_played: saved.last_played,
        }
    }
}
