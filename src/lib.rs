//! Routine model for a meditation builder app.
//!
//! A routine is an ordered list of timed blocks with an optional bell in
//! each gap between neighbours. [`RoutineEditor`] keeps blocks and gap
//! bells consistent under insert, delete, reorder and edit;
//! [`RoutineLibrary`] holds saved routines; [`bridge`] exposes both to a
//! UI host as JSON messages.

pub mod bridge;
pub mod constants;
pub mod editor;
pub mod error;
pub mod library;
pub mod models;
pub mod templates;
#[cfg(test)]
mod test_utils;
pub mod validation;

pub use bridge::Bridge;
pub use editor::{EditorConfig, RoutineChange, RoutineEditor, SubscriptionId};
pub use error::RoutineError;
pub use library::RoutineLibrary;
pub use models::{BellSound, Block, BlockCategory, BlockUpdate, ReorderPolicy, Routine, SavedRoutine};
