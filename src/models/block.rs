use crate::error::RoutineError;
use crate::validation::{validate_block_name, validate_duration_minutes};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockCategory {
    Silence,
    Breathwork,
    Chanting,
    Visualization,
    BodyScan,
    Walking,
    Custom,
}

impl BlockCategory {
    pub const ALL: [BlockCategory; 7] = [
        BlockCategory::Silence,
        BlockCategory::Breathwork,
        BlockCategory::Chanting,
        BlockCategory::Visualization,
        BlockCategory::BodyScan,
        BlockCategory::Walking,
        BlockCategory::Custom,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            BlockCategory::Silence => "Silence",
            BlockCategory::Breathwork => "Breathwork",
            BlockCategory::Chanting => "Chanting",
            BlockCategory::Visualization => "Visualization",
            BlockCategory::BodyScan => "Body Scan",
            BlockCategory::Walking => "Walking",
            BlockCategory::Custom => "Custom",
        }
    }

    /// SF Symbol name for the category badge.
    pub fn icon(self) -> &'static str {
        match self {
            BlockCategory::Silence => "bell.fill",
            BlockCategory::Breathwork => "leaf.fill",
            BlockCategory::Chanting => "om.symbol",
            BlockCategory::Visualization => "eye.fill",
            BlockCategory::BodyScan => "figure.mind.and.body",
            BlockCategory::Walking => "figure.walk",
            BlockCategory::Custom => "sparkles",
        }
    }

    /// Duration a freshly added block of this category starts with.
    pub fn default_duration(self) -> u32 {
        match self {
            BlockCategory::Silence | BlockCategory::Custom => 5,
            BlockCategory::Breathwork => 3,
            BlockCategory::Chanting => 4,
            BlockCategory::Visualization => 6,
            BlockCategory::BodyScan => 8,
            BlockCategory::Walking => 10,
        }
    }

    /// Categories offered as ready-made blocks (everything but `Custom`).
    pub fn presets() -> impl Iterator<Item = BlockCategory> {
        Self::ALL.into_iter().filter(|c| *c != BlockCategory::Custom)
    }

    /// Presets whose display name contains `query`, ignoring case.
    /// An empty query returns every preset.
    pub fn search_presets(query: &str) -> Vec<BlockCategory> {
        let query = query.trim().to_lowercase();
        Self::presets()
            .filter(|c| query.is_empty() || c.display_name().to_lowercase().contains(&query))
            .collect()
    }
}

/// One timed segment of a routine.
///
/// Fields are private so a block can only exist with a valid name and
/// duration; use [`BlockUpdate`] through the editor to change one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    id: Uuid,
    name: String,
    duration_minutes: u32,
    category: BlockCategory,
}

impl Block {
    pub fn new(name: &str, duration_minutes: u32, category: BlockCategory) -> Result<Self, RoutineError> {
        let name = validate_block_name(name)?;
        let duration_minutes = validate_duration_minutes(duration_minutes)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            duration_minutes,
            category,
        })
    }

    /// Preset block named after its category, with the category's default duration.
    pub fn from_category(category: BlockCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: category.display_name().to_string(),
            duration_minutes: category.default_duration(),
            category,
        }
    }

    /// User-defined block. A blank name falls back to "Custom".
    pub fn custom(name: &str, duration_minutes: u32) -> Result<Self, RoutineError> {
        let name = if name.trim().is_empty() {
            BlockCategory::Custom.display_name()
        } else {
            name
        };
        Self::new(name, duration_minutes, BlockCategory::Custom)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn category(&self) -> BlockCategory {
        self.category
    }

    pub(crate) fn reissue_id(&mut self) {
        self.id = Uuid::new_v4();
    }

    /// Apply an already validated update.
    pub(crate) fn apply(&mut self, update: ValidatedUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(minutes) = update.duration_minutes {
            self.duration_minutes = minutes;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
    }

    /// Case-insensitive match on the block name or category name.
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.category.display_name().to_lowercase().contains(needle)
    }
}

/// Field changes for an existing block. Unset fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockUpdate {
    pub name: Option<String>,
    pub duration_minutes: Option<u32>,
    pub category: Option<BlockCategory>,
}

impl BlockUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    #[must_use]
    pub fn duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    #[must_use]
    pub fn category(mut self, category: BlockCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Check every field up front so a rejected update changes nothing.
    pub(crate) fn validate(&self) -> Result<ValidatedUpdate, RoutineError> {
        let name = self
            .name
            .as_deref()
            .map(validate_block_name)
            .transpose()?
            .map(str::to_string);
        let duration_minutes = self
            .duration_minutes
            .map(validate_duration_minutes)
            .transpose()?;
        Ok(ValidatedUpdate {
            name,
            duration_minutes,
            category: self.category,
        })
    }
}

#[derive(Debug)]
pub(crate) struct ValidatedUpdate {
    name: Option<String>,
    duration_minutes: Option<u32>,
    category: Option<BlockCategory>,
}
