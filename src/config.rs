use serde::{Deserialize, Serialize};

/// What happens when the last level of the sequence is completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceEnd {
    /// Keep replaying the final level.
    #[default]
    RepeatLast,
    /// Start over from the first level.
    Wrap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub sequence_end: SequenceEnd,
    #[serde(default = "default_background_music")]
    pub background_music: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            sequence_end: SequenceEnd::default(),
            background_music: default_background_music(),
        }
    }
}

fn default_background_music() -> bool {
    true
}

impl SequenceEnd {
    /// Index of the level that follows `current` in a sequence of `len`.
    pub fn next_index(self, current: usize, len: usize) -> usize {
        if current + 1 < len {
            return current + 1;
        }
        match self {
            SequenceEnd::RepeatLast => len.saturating_sub(1),
            SequenceEnd::Wrap => 0,
        }
    }
}
