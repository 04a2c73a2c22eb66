//! JSON message boundary between the routine model and a UI host.
//!
//! The host sends one tagged message per user intent and gets back the
//! state it should render, or an error it can surface.

mod dtos;

pub use dtos::*;

use crate::editor::RoutineEditor;
use crate::error::RoutineError;
use crate::library::RoutineLibrary;
use crate::models::{BellSound, Block, BlockCategory, BlockUpdate, Routine};
use crate::templates::starter_routine;
use chrono::Utc;
use log::{error, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IncomingMessage {
    RequestState,
    #[serde(rename_all = "camelCase")]
    AddBlock {
        category: BlockCategory,
        name: Option<String>,
        duration_minutes: Option<u32>,
    },
    DeleteBlock { index: usize },
    MoveBlock { from: usize, to: usize },
    #[serde(rename_all = "camelCase")]
    UpdateBlock {
        id: Uuid,
        name: Option<String>,
        duration_minutes: Option<u32>,
        category: Option<BlockCategory>,
    },
    #[serde(rename_all = "camelCase")]
    SetTransitionBell { gap_index: usize, bell: Option<BellSound> },
    SetOpeningBell { bell: Option<BellSound> },
    SetClosingBell { bell: Option<BellSound> },
    RenameRoutine { name: String },
    /// Start a fresh, unsaved routine; `starter` pre-fills it with the
    /// starter blocks.
    NewRoutine {
        #[serde(default)]
        starter: bool,
    },
    SaveRoutine,
    OpenRoutine { id: Uuid },
    SearchLibrary { query: String },
    RecordPlay { id: Uuid },
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutgoingMessage {
    State { routine: RoutineSnapshot },
    Library { routines: Vec<SavedRoutineSummary> },
    Saved { id: Uuid },
    Error { kind: &'static str, message: String },
}

impl From<RoutineError> for OutgoingMessage {
    fn from(e: RoutineError) -> Self {
        OutgoingMessage::Error {
            kind: e.kind(),
            message: e.to_string(),
        }
    }
}

/// Preset block unless a name or duration was given; a custom block
/// without a name is called "Custom".
fn requested_block(
    category: BlockCategory,
    name: Option<&str>,
    duration_minutes: Option<u32>,
) -> Result<Block, RoutineError> {
    if name.is_none() && duration_minutes.is_none() {
        return Ok(Block::from_category(category));
    }
    let minutes = duration_minutes.unwrap_or_else(|| category.default_duration());
    if category == BlockCategory::Custom {
        Block::custom(name.unwrap_or_default(), minutes)
    } else {
        Block::new(name.unwrap_or(category.display_name()), minutes, category)
    }
}

/// Editor and library behind a single message handler.
pub struct Bridge {
    editor: RoutineEditor,
    library: RoutineLibrary,
    /// Library entry the editor was opened from, if any.
    open_id: Option<Uuid>,
}

impl Bridge {
    pub fn new(editor: RoutineEditor, library: RoutineLibrary) -> Self {
        Self { editor, library, open_id: None }
    }

    pub fn editor(&self) -> &RoutineEditor {
        &self.editor
    }

    /// Mutable access, e.g. to subscribe to changes.
    pub fn editor_mut(&mut self) -> &mut RoutineEditor {
        &mut self.editor
    }

    pub fn library(&self) -> &RoutineLibrary {
        &self.library
    }

    /// Decode one JSON message, handle it, and encode the reply.
    pub fn handle_json(&mut self, input: &str) -> String {
        let response = match serde_json::from_str::<IncomingMessage>(input) {
            Ok(message) => self.handle_message(message),
            Err(e) => {
                warn!("Dropping malformed message: {e}");
                RoutineError::from(e).into()
            }
        };

        serde_json::to_string(&response).unwrap_or_else(|e| {
            error!("Failed to encode response: {e}");
            r#"{"type":"error","kind":"internal","message":"failed to encode response"}"#.to_string()
        })
    }

    pub fn handle_message(&mut self, message: IncomingMessage) -> OutgoingMessage {
        self.dispatch(message).unwrap_or_else(OutgoingMessage::from)
    }

    fn state(&self) -> OutgoingMessage {
        OutgoingMessage::State {
            routine: RoutineSnapshot::from(self.editor.routine()),
        }
    }

    fn dispatch(&mut self, message: IncomingMessage) -> Result<OutgoingMessage, RoutineError> {
        match message {
            IncomingMessage::RequestState => {}
            IncomingMessage::AddBlock { category, name, duration_minutes } => {
                let block = requested_block(category, name.as_deref(), duration_minutes)?;
                self.editor.add_block(block);
            }
            IncomingMessage::DeleteBlock { index } => {
                self.editor.delete_block(index)?;
            }
            IncomingMessage::MoveBlock { from, to } => {
                self.editor.move_block(from, to)?;
            }
            IncomingMessage::UpdateBlock { id, name, duration_minutes, category } => {
                let update = BlockUpdate { name, duration_minutes, category };
                self.editor.update_block(id, &update)?;
            }
            IncomingMessage::SetTransitionBell { gap_index, bell } => {
                self.editor.set_transition_bell(gap_index, bell)?;
            }
            IncomingMessage::SetOpeningBell { bell } => self.editor.set_opening_bell(bell),
            IncomingMessage::SetClosingBell { bell } => self.editor.set_closing_bell(bell),
            IncomingMessage::RenameRoutine { name } => {
                self.editor.rename(&name)?;
            }
            IncomingMessage::NewRoutine { starter } => {
                let routine = if starter {
                    starter_routine(self.editor.config().default_transition_bell)
                } else {
                    Routine::default()
                };
                self.editor.load(routine);
                self.open_id = None;
            }
            IncomingMessage::SaveRoutine => {
                let routine = self.editor.routine().clone();
                let id = match self.open_id {
                    Some(id) => self.library.update(id, routine, Utc::now())?.id,
                    None => self.library.save_new(routine, Utc::now()),
                };
                self.open_id = Some(id);
                return Ok(OutgoingMessage::Saved { id });
            }
            IncomingMessage::OpenRoutine { id } => {
                let routine = self
                    .library
                    .get(id)
                    .map(|saved| saved.routine.clone())
                    .ok_or(RoutineError::NotFound { entity: "saved routine", id })?;
                self.editor.load(routine);
                self.open_id = Some(id);
            }
            IncomingMessage::SearchLibrary { query } => {
                return Ok(self.library_listing(&query));
            }
            IncomingMessage::RecordPlay { id } => {
                self.library.record_play(id, Utc::now())?;
                return Ok(self.library_listing(""));
            }
        }
        Ok(self.state())
    }

    fn library_listing(&self, query: &str) -> OutgoingMessage {
        OutgoingMessage::Library {
            routines: self
                .library
                .search(query)
                .into_iter()
                .map(SavedRoutineSummary::from)
                .collect(),
        }
    }
}
