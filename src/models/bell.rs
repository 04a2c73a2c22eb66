use serde::{Deserialize, Serialize};

/// Sounds a bell slot can hold. `Silent` exists for pickers; stored
/// selections use `None` for silence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BellSound {
    Silent,
    SoftBell,
    TibetanBowl,
    DigitalChime,
}

impl BellSound {
    pub const ALL: [BellSound; 4] = [
        BellSound::Silent,
        BellSound::SoftBell,
        BellSound::TibetanBowl,
        BellSound::DigitalChime,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            BellSound::Silent => "None",
            BellSound::SoftBell => "Soft Bell",
            BellSound::TibetanBowl => "Tibetan Bowl",
            BellSound::DigitalChime => "Digital Chime",
        }
    }

    /// SF Symbol name shown next to the bell in pickers.
    pub fn icon(self) -> &'static str {
        match self {
            BellSound::Silent => "speaker.slash.fill",
            BellSound::SoftBell => "bell.fill",
            BellSound::TibetanBowl => "circle.circle.fill",
            BellSound::DigitalChime => "waveform",
        }
    }

    /// Stored form of a picker choice: `Silent` becomes `None`.
    pub fn into_selection(self) -> Option<BellSound> {
        match self {
            BellSound::Silent => None,
            BellSound::SoftBell | BellSound::TibetanBowl | BellSound::DigitalChime => Some(self),
        }
    }
}

/// Collapse any selection to its stored form.
pub fn normalize_selection(bell: Option<BellSound>) -> Option<BellSound> {
    bell.and_then(BellSound::into_selection)
}
