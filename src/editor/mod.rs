pub mod events;

pub use events::{RoutineChange, SubscriptionId};

use crate::constants::DEFAULT_TRANSITION_BELL;
use crate::error::RoutineError;
use crate::models::{BellSound, Block, BlockUpdate, ReorderPolicy, Routine};
use events::Observers;
use log::{debug, warn};
use serde::Deserialize;
use uuid::Uuid;

/// Editor behaviour a host may override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Bell placed in new gaps, and in every gap after a reset reorder.
    pub default_transition_bell: Option<BellSound>,
    pub reorder_policy: ReorderPolicy,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_transition_bell: DEFAULT_TRANSITION_BELL,
            reorder_policy: ReorderPolicy::Reset,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON config; missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, RoutineError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Owns one routine and applies edits to it.
///
/// Every operation runs to completion on the calling thread. Observers
/// run after each successful mutation and see the routine as it is
/// after the change; failed and no-op calls notify nobody.
pub struct RoutineEditor {
    routine: Routine,
    config: EditorConfig,
    observers: Observers,
}

impl Default for RoutineEditor {
    fn default() -> Self {
        Self::new(Routine::default(), EditorConfig::default())
    }
}

impl RoutineEditor {
    pub fn new(routine: Routine, config: EditorConfig) -> Self {
        Self {
            routine,
            config,
            observers: Observers::default(),
        }
    }

    pub fn routine(&self) -> &Routine {
        &self.routine
    }

    pub fn into_routine(self) -> Routine {
        self.routine
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.routine.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routine.is_empty()
    }

    pub fn block(&self, id: Uuid) -> Option<&Block> {
        self.routine.block(id)
    }

    pub fn block_index(&self, id: Uuid) -> Option<usize> {
        self.routine.block_index(id)
    }

    pub fn transition_bell(&self, gap_index: usize) -> Result<Option<BellSound>, RoutineError> {
        self.routine.transition_bell(gap_index)
    }

    pub fn total_duration(&self) -> u32 {
        self.routine.total_duration()
    }

    /// Register a callback run after every successful mutation.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&RoutineChange, &Routine) + 'static,
    {
        self.observers.subscribe(observer)
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    fn changed(&mut self, change: &RoutineChange) {
        debug!("Routine '{}' changed: {change:?}", self.routine.name());
        self.observers.notify(change, &self.routine);
    }

    /// Replace the whole routine, e.g. when opening one from the library.
    pub fn load(&mut self, routine: Routine) {
        self.routine = routine;
        self.changed(&RoutineChange::Loaded);
    }

    /// Append `block`. Always succeeds; returns the block's id, which is
    /// fresh if the given id was already taken.
    pub fn add_block(&mut self, block: Block) -> Uuid {
        let id = self
            .routine
            .add_block(block, self.config.default_transition_bell);
        let index = self.routine.len() - 1;
        self.changed(&RoutineChange::BlockAdded { id, index });
        id
    }

    pub fn delete_block(&mut self, index: usize) -> Result<Block, RoutineError> {
        let removed = self.routine.delete_block(index).inspect_err(|e| {
            warn!("Rejected delete of block {index}: {e}");
        })?;
        self.changed(&RoutineChange::BlockDeleted { id: removed.id(), index });
        Ok(removed)
    }

    /// Move the block at `from` to `to`. `from == to` is accepted and does
    /// nothing.
    pub fn move_block(&mut self, from: usize, to: usize) -> Result<(), RoutineError> {
        let moved = self
            .routine
            .move_block(
                from,
                to,
                self.config.reorder_policy,
                self.config.default_transition_bell,
            )
            .inspect_err(|e| warn!("Rejected move of block {from} to {to}: {e}"))?;

        if moved {
            let id = self
                .routine
                .blocks()
                .get(to)
                .map(Block::id)
                .unwrap_or_default();
            self.changed(&RoutineChange::BlockMoved { id, from, to });
        }
        Ok(())
    }

    pub fn set_transition_bell(
        &mut self,
        gap_index: usize,
        bell: Option<BellSound>,
    ) -> Result<(), RoutineError> {
        self.routine
            .set_transition_bell(gap_index, bell)
            .inspect_err(|e| warn!("Rejected bell change for gap {gap_index}: {e}"))?;
        let bell = self.routine.transition_bell(gap_index)?;
        self.changed(&RoutineChange::TransitionBellSet { gap_index, bell });
        Ok(())
    }

    pub fn set_opening_bell(&mut self, bell: Option<BellSound>) {
        self.routine.set_opening_bell(bell);
        let bell = self.routine.opening_bell();
        self.changed(&RoutineChange::OpeningBellSet { bell });
    }

    pub fn set_closing_bell(&mut self, bell: Option<BellSound>) {
        self.routine.set_closing_bell(bell);
        let bell = self.routine.closing_bell();
        self.changed(&RoutineChange::ClosingBellSet { bell });
    }

    pub fn update_block(&mut self, id: Uuid, update: &BlockUpdate) -> Result<&Block, RoutineError> {
        self.routine
            .update_block(id, update)
            .inspect_err(|e| warn!("Rejected update of block {id}: {e}"))?;
        self.changed(&RoutineChange::BlockUpdated { id });
        self.routine
            .block(id)
            .ok_or(RoutineError::NotFound { entity: "block", id })
    }

    pub fn rename(&mut self, name: &str) -> Result<(), RoutineError> {
        self.routine
            .rename(name)
            .inspect_err(|e| warn!("Rejected routine rename: {e}"))?;
        let name = self.routine.name().to_string();
        self.changed(&RoutineChange::Renamed { name });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BlockCategory;
    use crate::test_utils::{block, names, three_block_routine};
    use std::cell::RefCell;
    use std::rc::Rc;

    const SOFT: Option<BellSound> = Some(BellSound::SoftBell);
    const BOWL: Option<BellSound> = Some(BellSound::TibetanBowl);

    /// Editor plus a log of every change it reported.
    fn recording_editor(routine: Routine) -> (RoutineEditor, Rc<RefCell<Vec<RoutineChange>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut editor = RoutineEditor::new(routine, EditorConfig::default());
        let sink = Rc::clone(&log);
        editor.subscribe(move |change, _| sink.borrow_mut().push(change.clone()));
        (editor, log)
    }

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.default_transition_bell, SOFT);
        assert_eq!(config.reorder_policy, ReorderPolicy::Reset);
    }

    #[test]
    fn test_config_from_partial_json() {
        let config = EditorConfig::from_json(r#"{"reorderPolicy": "follow_gap"}"#).unwrap();
        assert_eq!(config.reorder_policy, ReorderPolicy::FollowGap);
        assert_eq!(config.default_transition_bell, SOFT);

        let config = EditorConfig::from_json(r#"{"defaultTransitionBell": null}"#).unwrap();
        assert_eq!(config.default_transition_bell, None);
    }

    #[test]
    fn test_config_from_bad_json() {
        let result = EditorConfig::from_json(r#"{"reorderPolicy": "shuffle"}"#);
        assert!(matches!(result, Err(RoutineError::Json(_))));
    }

    #[test]
    fn test_add_block_notifies_and_grows_bells() {
        let (mut editor, log) = recording_editor(Routine::default());

        let a = editor.add_block(Block::from_category(BlockCategory::Silence));
        let b = editor.add_block(Block::from_category(BlockCategory::Breathwork));

        assert_eq!(editor.len(), 2);
        assert_eq!(editor.transition_bell(0).unwrap(), SOFT);
        assert_eq!(editor.total_duration(), 8);
        assert_eq!(
            *log.borrow(),
            vec![
                RoutineChange::BlockAdded { id: a, index: 0 },
                RoutineChange::BlockAdded { id: b, index: 1 },
            ]
        );
    }

    #[test]
    fn test_add_uses_configured_default_bell() {
        let config = EditorConfig {
            default_transition_bell: None,
            ..EditorConfig::default()
        };
        let mut editor = RoutineEditor::new(Routine::default(), config);
        editor.add_block(block("A", 5));
        editor.add_block(block("B", 5));

        assert_eq!(editor.routine().transition_bells(), &[None]);
    }

    #[test]
    fn test_failed_delete_does_not_notify() {
        let (mut editor, log) = recording_editor(three_block_routine(vec![SOFT, BOWL]));
        let before = editor.routine().clone();

        assert!(editor.delete_block(7).is_err());

        assert_eq!(*editor.routine(), before);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_delete_reports_removed_block() {
        let routine = three_block_routine(vec![SOFT, BOWL]);
        let b = routine.blocks()[1].id();
        let (mut editor, log) = recording_editor(routine);

        let removed = editor.delete_block(1).unwrap();

        assert_eq!(removed.id(), b);
        assert_eq!(names(editor.routine()), vec!["A", "C"]);
        assert_eq!(editor.routine().transition_bells(), &[SOFT]);
        assert_eq!(*log.borrow(), vec![RoutineChange::BlockDeleted { id: b, index: 1 }]);
    }

    #[test]
    fn test_move_resets_bells_by_default() {
        let routine = three_block_routine(vec![BOWL, BOWL]);
        let a = routine.blocks()[0].id();
        let (mut editor, log) = recording_editor(routine);

        editor.move_block(0, 2).unwrap();

        assert_eq!(names(editor.routine()), vec!["B", "C", "A"]);
        assert_eq!(editor.routine().transition_bells(), &[SOFT, SOFT]);
        assert_eq!(editor.block_index(a), Some(2));
        assert_eq!(*log.borrow(), vec![RoutineChange::BlockMoved { id: a, from: 0, to: 2 }]);
    }

    #[test]
    fn test_move_same_index_is_silent_noop() {
        let (mut editor, log) = recording_editor(three_block_routine(vec![BOWL, BOWL]));
        let before = editor.routine().clone();

        editor.move_block(1, 1).unwrap();

        assert_eq!(*editor.routine(), before);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_move_out_of_range() {
        let mut editor = RoutineEditor::new(three_block_routine(vec![BOWL, BOWL]), EditorConfig::default());
        assert!(matches!(
            editor.move_block(0, 3),
            Err(RoutineError::OutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn test_set_transition_bell_reports_normalized_value() {
        let (mut editor, log) = recording_editor(three_block_routine(vec![BOWL, BOWL]));

        editor.set_transition_bell(1, Some(BellSound::Silent)).unwrap();
        assert!(editor.set_transition_bell(2, SOFT).is_err());

        assert_eq!(editor.transition_bell(1).unwrap(), None);
        assert_eq!(
            *log.borrow(),
            vec![RoutineChange::TransitionBellSet { gap_index: 1, bell: None }]
        );
    }

    #[test]
    fn test_update_block() {
        let routine = three_block_routine(vec![SOFT, SOFT]);
        let c = routine.blocks()[2].id();
        let (mut editor, log) = recording_editor(routine);

        let updated = editor
            .update_block(c, &BlockUpdate::new().duration_minutes(10).category(BlockCategory::Walking))
            .unwrap();
        assert_eq!(updated.duration_minutes(), 10);
        assert_eq!(updated.category(), BlockCategory::Walking);

        assert!(editor.update_block(c, &BlockUpdate::new().duration_minutes(0)).is_err());
        assert!(editor.update_block(Uuid::new_v4(), &BlockUpdate::new()).is_err());

        assert_eq!(editor.total_duration(), 5 + 3 + 10);
        assert_eq!(*log.borrow(), vec![RoutineChange::BlockUpdated { id: c }]);
    }

    #[test]
    fn test_rename_and_routine_bells() {
        let (mut editor, log) = recording_editor(Routine::default());

        editor.rename("Morning Meditation").unwrap();
        assert!(editor.rename("   ").is_err());
        editor.set_opening_bell(BOWL);
        editor.set_closing_bell(Some(BellSound::Silent));

        assert_eq!(editor.routine().name(), "Morning Meditation");
        assert_eq!(editor.routine().opening_bell(), BOWL);
        assert_eq!(editor.routine().closing_bell(), None);
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn test_unsubscribed_observer_is_not_called() {
        let count = Rc::new(RefCell::new(0));
        let mut editor = RoutineEditor::default();
        let counter = Rc::clone(&count);
        let id = editor.subscribe(move |_, _| *counter.borrow_mut() += 1);

        editor.add_block(block("A", 5));
        assert!(editor.unsubscribe(id));
        editor.add_block(block("B", 5));

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_observer_sees_post_change_routine() {
        let totals = Rc::new(RefCell::new(Vec::new()));
        let mut editor = RoutineEditor::default();
        let sink = Rc::clone(&totals);
        editor.subscribe(move |_, routine| sink.borrow_mut().push(routine.total_duration()));

        editor.add_block(block("A", 5));
        editor.add_block(block("B", 3));
        editor.delete_block(0).unwrap();

        assert_eq!(*totals.borrow(), vec![5, 8, 3]);
    }

    #[test]
    fn test_load_replaces_routine() {
        let (mut editor, log) = recording_editor(Routine::default());
        let routine = three_block_routine(vec![SOFT, BOWL]);

        editor.load(routine.clone());

        assert_eq!(*editor.routine(), routine);
        assert_eq!(*log.borrow(), vec![RoutineChange::Loaded]);
        assert_eq!(editor.into_routine(), routine);
    }
}
