use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::AudioError;
use crate::events::GameEvent;

/// Sounds the game asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    /// Looping background track.
    BackgroundLoop,
    /// One-shot effect for every successful push.
    BoxPushed,
}

impl AudioCue {
    /// Asset path of the bundled sound for this cue.
    pub fn asset_path(self) -> &'static str {
        match self {
            AudioCue::BackgroundLoop => "sounds/gameMusik.mp3",
            AudioCue::BoxPushed => "sounds/push-Box.wav",
        }
    }

    pub fn looping(self) -> bool {
        matches!(self, AudioCue::BackgroundLoop)
    }

    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BackgroundMusic => Some(AudioCue::BackgroundLoop),
            GameEvent::BoxPushed { .. } => Some(AudioCue::BoxPushed),
            _ => None,
        }
    }
}

/// Platform audio output. Loading, decoding and mixing live behind it.
pub trait AudioBackend {
    fn play(&mut self, cue: AudioCue) -> Result<(), AudioError>;
}

/// Backend that plays nothing, for headless runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioBackend for SilentAudio {
    fn play(&mut self, cue: AudioCue) -> Result<(), AudioError> {
        debug!("audio cue {cue:?} (silent)");
        Ok(())
    }
}

/// Turns game events into cues. Backend failures are logged and dropped so
/// gameplay never depends on audio.
#[derive(Debug)]
pub struct AudioDirector<A> {
    backend: A,
    background_started: bool,
    failures: u32,
}

impl<A: AudioBackend> AudioDirector<A> {
    pub fn new(backend: A) -> Self {
        Self {
            backend,
            background_started: false,
            failures: 0,
        }
    }

    pub fn handle_event(&mut self, event: &GameEvent) {
        let Some(cue) = AudioCue::for_event(event) else {
            return;
        };
        if cue == AudioCue::BackgroundLoop {
            if self.background_started {
                return;
            }
            self.background_started = true;
        }
        if let Err(err) = self.backend.play(cue) {
            self.failures = self.failures.saturating_add(1);
            warn!("failed to play {}: {err}", cue.asset_path());
        }
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn backend(&self) -> &A {
        &self.backend
    }
}
