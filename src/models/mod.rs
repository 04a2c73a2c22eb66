pub mod bell;
pub mod block;
pub mod routine;
pub mod saved_routine;

pub use bell::BellSound;
pub use block::{Block, BlockCategory, BlockUpdate};
pub use routine::{ReorderPolicy, Routine};
pub use saved_routine::SavedRoutine;
