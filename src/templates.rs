//! Starter content shown before the user has built anything.

use crate::error::RoutineError;
use crate::library::RoutineLibrary;
use crate::models::{BellSound, Block, BlockCategory, Routine, SavedRoutine};
use chrono::{DateTime, Duration, Utc};
use log::debug;

const SOFT: Option<BellSound> = Some(BellSound::SoftBell);
const BOWL: Option<BellSound> = Some(BellSound::TibetanBowl);
const CHIME: Option<BellSound> = Some(BellSound::DigitalChime);

fn preset(category: BlockCategory, minutes: u32) -> Result<Block, RoutineError> {
    Block::new(category.display_name(), minutes, category)
}

/// Silence, breathwork and chanting at their default lengths, with
/// `bell` in both gaps.
pub fn starter_routine(bell: Option<BellSound>) -> Routine {
    let mut routine = Routine::default();
    for category in [BlockCategory::Silence, BlockCategory::Breathwork, BlockCategory::Chanting] {
        routine.add_block(Block::from_category(category), bell);
    }
    routine
}

fn sample(
    name: &str,
    blocks: &[(BlockCategory, u32)],
    bells: Vec<Option<BellSound>>,
) -> Result<Routine, RoutineError> {
    let blocks = blocks
        .iter()
        .map(|&(category, minutes)| preset(category, minutes))
        .collect::<Result<Vec<_>, _>>()?;
    Routine::from_parts(name, blocks, bells)
}

fn sample_routines(now: DateTime<Utc>) -> Result<Vec<SavedRoutine>, RoutineError> {
    let morning = sample(
        "Morning Meditation",
        &[
            (BlockCategory::Silence, 5),
            (BlockCategory::Breathwork, 10),
            (BlockCategory::Visualization, 8),
        ],
        vec![SOFT, BOWL],
    )?;
    let evening = sample(
        "Evening Wind Down",
        &[(BlockCategory::BodyScan, 15), (BlockCategory::Silence, 10)],
        vec![SOFT],
    )?;
    let quick = sample(
        "Quick Focus",
        &[(BlockCategory::Breathwork, 3), (BlockCategory::Silence, 2)],
        vec![CHIME],
    )?;

    let mut evening = SavedRoutine::new(evening, now - Duration::days(1));
    evening.touch(now - Duration::hours(1));
    let mut quick = SavedRoutine::new(quick, now - Duration::days(2));
    quick.touch(now - Duration::hours(2));

    Ok(vec![SavedRoutine::new(morning, now), evening, quick])
}

/// Library pre-filled with three example routines, modified one hour
/// apart ending at `now`.
pub fn sample_library(now: DateTime<Utc>) -> Result<RoutineLibrary, RoutineError> {
    let routines = sample_routines(now)?;
    debug!("Loaded {} sample routines", routines.len());
    Ok(RoutineLibrary::with_routines(routines))
}
