use crate::models::{BellSound, Routine};
use serde::Serialize;
use uuid::Uuid;

/// A mutation the editor applied successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoutineChange {
    BlockAdded { id: Uuid, index: usize },
    BlockDeleted { id: Uuid, index: usize },
    BlockMoved { id: Uuid, from: usize, to: usize },
    BlockUpdated { id: Uuid },
    TransitionBellSet { gap_index: usize, bell: Option<BellSound> },
    OpeningBellSet { bell: Option<BellSound> },
    ClosingBellSet { bell: Option<BellSound> },
    Renamed { name: String },
    Loaded,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&RoutineChange, &Routine)>;

/// Callbacks fired after each applied mutation, in subscription order.
#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(SubscriptionId, Observer)>,
}

impl Observers {
    pub(crate) fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&RoutineChange, &Routine) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(observer)));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub(crate) fn notify(&mut self, change: &RoutineChange, routine: &Routine) {
        for (_, observer) in &mut self.entries {
            observer(change, routine);
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
