//! Shared test fixtures.
//!
//! Blocks built here are always valid; durations outside 1-60 panic.

#![cfg(test)]

use crate::models::{BellSound, Block, BlockCategory, Routine};

/// A custom block with the given name and duration.
pub fn block(name: &str, minutes: u32) -> Block {
    Block::new(name, minutes, BlockCategory::Custom).expect("Fixture block must be valid")
}

/// Blocks `[A(5m), B(3m), C(4m)]` with the given gap bells.
pub fn three_block_routine(bells: Vec<Option<BellSound>>) -> Routine {
    Routine::from_parts("Test", vec![block("A", 5), block("B", 3), block("C", 4)], bells)
        .expect("Fixture routine must be valid")
}

/// Block names in order.
pub fn names(routine: &Routine) -> Vec<&str> {
    routine.blocks().iter().map(Block::name).collect()
}
