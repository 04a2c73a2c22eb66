use crate::constants::UNTITLED_ROUTINE_NAME;
use crate::error::{check_index, RoutineError};
use crate::models::bell::normalize_selection;
use crate::models::{BellSound, Block, BlockUpdate};
use crate::validation::validate_routine_name;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// What happens to gap bells when a block is moved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReorderPolicy {
    /// Every gap is reset to the default bell after a move.
    #[default]
    Reset,
    /// The bell that followed the moved block moves with it; the rest
    /// keep their relative order.
    FollowGap,
}

/// An ordered sequence of blocks with one optional bell per gap.
///
/// `transition_bells[i]` plays between `blocks[i]` and `blocks[i + 1]`, so
/// there are always `max(0, blocks.len() - 1)` entries. Every method
/// either applies completely or returns an error and leaves the routine
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    name: String,
    blocks: Vec<Block>,
    transition_bells: Vec<Option<BellSound>>,
    opening_bell: Option<BellSound>,
    closing_bell: Option<BellSound>,
}

impl Default for Routine {
    fn default() -> Self {
        Self {
            name: UNTITLED_ROUTINE_NAME.to_string(),
            blocks: Vec::new(),
            transition_bells: Vec::new(),
            opening_bell: None,
            closing_bell: None,
        }
    }
}

fn gap_count(block_count: usize) -> usize {
    block_count.saturating_sub(1)
}

impl Routine {
    /// Create an empty routine.
    pub fn new(name: &str) -> Result<Self, RoutineError> {
        let name = validate_routine_name(name)?;
        Ok(Self {
            name: name.to_string(),
            ..Self::default()
        })
    }

    /// Assemble a routine from existing blocks and gap bells.
    ///
    /// Fails if the bell count does not match the gap count or if two
    /// blocks share an id.
    pub fn from_parts(
        name: &str,
        blocks: Vec<Block>,
        transition_bells: Vec<Option<BellSound>>,
    ) -> Result<Self, RoutineError> {
        let name = validate_routine_name(name)?;
        let gaps = gap_count(blocks.len());
        if transition_bells.len() != gaps {
            return Err(RoutineError::InvalidInput {
                field: "transition_bells",
                reason: format!("expected {gaps} entries, got {}", transition_bells.len()),
            });
        }

        let mut seen = HashSet::with_capacity(blocks.len());
        if let Some(dup) = blocks.iter().find(|b| !seen.insert(b.id())) {
            return Err(RoutineError::InvalidInput {
                field: "blocks",
                reason: format!("duplicate block id {}", dup.id()),
            });
        }

        Ok(Self {
            name: name.to_string(),
            blocks,
            transition_bells: transition_bells.into_iter().map(normalize_selection).collect(),
            opening_bell: None,
            closing_bell: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn transition_bells(&self) -> &[Option<BellSound>] {
        &self.transition_bells
    }

    pub fn opening_bell(&self) -> Option<BellSound> {
        self.opening_bell
    }

    pub fn closing_bell(&self) -> Option<BellSound> {
        self.closing_bell
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn block(&self, id: Uuid) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id() == id)
    }

    pub fn block_index(&self, id: Uuid) -> Option<usize> {
        self.blocks.iter().position(|b| b.id() == id)
    }

    /// Bell between block `gap_index` and the one after it.
    pub fn transition_bell(&self, gap_index: usize) -> Result<Option<BellSound>, RoutineError> {
        self.transition_bells
            .get(gap_index)
            .copied()
            .ok_or(RoutineError::OutOfRange {
                index: gap_index,
                len: self.transition_bells.len(),
            })
    }

    /// Sum of all block durations in minutes.
    pub fn total_duration(&self) -> u32 {
        self.blocks.iter().map(Block::duration_minutes).sum()
    }

    /// Case-insensitive match on the routine name or any block.
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.blocks.iter().any(|b| b.matches(needle))
    }

    pub fn rename(&mut self, name: &str) -> Result<(), RoutineError> {
        self.name = validate_routine_name(name)?.to_string();
        Ok(())
    }

    pub fn set_opening_bell(&mut self, bell: Option<BellSound>) {
        self.opening_bell = normalize_selection(bell);
    }

    pub fn set_closing_bell(&mut self, bell: Option<BellSound>) {
        self.closing_bell = normalize_selection(bell);
    }

    /// Append a block, opening a new gap with `default_bell` when it is
    /// not the first one. A block whose id is already present gets a
    /// fresh id. Returns the id the block ends up with.
    pub fn add_block(&mut self, mut block: Block, default_bell: Option<BellSound>) -> Uuid {
        if self.block(block.id()).is_some() {
            let old = block.id();
            block.reissue_id();
            log::warn!("Block id {old} already in routine, reissued as {}", block.id());
        }
        let id = block.id();

        self.blocks.push(block);
        if self.blocks.len() > 1 {
            self.transition_bells.push(normalize_selection(default_bell));
        }
        id
    }

    /// Remove the block at `index` together with one neighbouring gap:
    /// the gap after it, or the gap before it when it is the last block.
    pub fn delete_block(&mut self, index: usize) -> Result<Block, RoutineError> {
        check_index(index, self.blocks.len())?;

        let removed = self.blocks.remove(index);
        if index < self.transition_bells.len() {
            self.transition_bells.remove(index);
        } else if index > 0 {
            self.transition_bells.remove(index - 1);
        }
        Ok(removed)
    }

    /// Move the block at `from` to position `to`, shifting the blocks in
    /// between. Returns `false` when `from == to` and nothing changed.
    pub fn move_block(
        &mut self,
        from: usize,
        to: usize,
        policy: ReorderPolicy,
        default_bell: Option<BellSound>,
    ) -> Result<bool, RoutineError> {
        check_index(from, self.blocks.len())?;
        check_index(to, self.blocks.len())?;
        if from == to {
            return Ok(false);
        }

        let moved = self.blocks.remove(from);
        self.blocks.insert(to, moved);

        match policy {
            ReorderPolicy::Reset => {
                let default_bell = normalize_selection(default_bell);
                self.transition_bells = vec![default_bell; gap_count(self.blocks.len())];
            }
            ReorderPolicy::FollowGap => {
                // The last block owns no gap; leave the bells where they are.
                if from < self.transition_bells.len() {
                    let bell = self.transition_bells.remove(from);
                    let at = to.min(self.transition_bells.len());
                    self.transition_bells.insert(at, bell);
                }
            }
        }
        Ok(true)
    }

    pub fn set_transition_bell(
        &mut self,
        gap_index: usize,
        bell: Option<BellSound>,
    ) -> Result<(), RoutineError> {
        let len = self.transition_bells.len();
        let slot = self
            .transition_bells
            .get_mut(gap_index)
            .ok_or(RoutineError::OutOfRange { index: gap_index, len })?;
        *slot = normalize_selection(bell);
        Ok(())
    }

    /// Apply `update` to the block with `id`. Nothing changes unless every
    /// field in the update is valid.
    pub fn update_block(&mut self, id: Uuid, update: &BlockUpdate) -> Result<&Block, RoutineError> {
        let validated = update.validate()?;
        let block = self
            .blocks
            .iter_mut()
            .find(|b| b.id() == id)
            .ok_or(RoutineError::NotFound { entity: "block", id })?;
        block.apply(validated);
        Ok(block)
    }
}
