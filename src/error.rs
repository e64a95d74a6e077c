use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced while setting up a game. Gameplay itself never fails.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("level sequence is empty")]
    EmptySequence,
    #[error("unable to read level pack {}", path.display())]
    LevelPackIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("level pack {} does not contain any level", .0.display())]
    EmptyLevelPack(PathBuf),
}

/// Failure reported by an audio backend. Always logged and swallowed.
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("sound {0} is not loaded")]
    NotLoaded(String),
    #[error("audio playback failed: {0}")]
    Playback(String),
}
