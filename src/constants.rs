// src/constants.rs

use crate::models::BellSound;

/// Shortest block duration in minutes
pub const MIN_DURATION_MINUTES: u32 = 1;

/// Longest block duration in minutes
pub const MAX_DURATION_MINUTES: u32 = 60;

/// Maximum block name length
pub const MAX_BLOCK_NAME_LEN: usize = 100;

/// Maximum routine name length
pub const MAX_ROUTINE_NAME_LEN: usize = 100;

/// Bell placed in a newly created gap, and in every gap after a reset reorder.
pub const DEFAULT_TRANSITION_BELL: Option<BellSound> = Some(BellSound::SoftBell);

/// Name given to a routine that has not been named yet
pub const UNTITLED_ROUTINE_NAME: &str = "Untitled Routine";
