#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::audio::{AudioBackend, AudioCue};
use crate::error::AudioError;
use crate::input::{command_for_key, KeyCode};
use crate::scene::{EntityKind, SceneObject};
use crate::{builtin_levels, App, Game, GameConfig};

#[wasm_bindgen(start)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
}

/// Forwards cues to a page supplied `(path, looping) => void` callback.
struct JsAudio {
    play_sound: Option<Function>,
}

impl AudioBackend for JsAudio {
    fn play(&mut self, cue: AudioCue) -> Result<(), AudioError> {
        let Some(play_sound) = &self.play_sound else {
            return Err(AudioError::NotLoaded(cue.asset_path().to_string()));
        };
        play_sound
            .call2(
                &JsValue::NULL,
                &JsValue::from_str(cue.asset_path()),
                &JsValue::from_bool(cue.looping()),
            )
            .map(|_| ())
            .map_err(|err| AudioError::Playback(format!("{err:?}")))
    }
}

/// Browser entry point. The page owns the 3D scene and polls
/// [`WasmGame::objects`] every animation frame.
#[wasm_bindgen]
pub struct WasmGame {
    app: App<JsAudio>,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new(play_sound: Option<Function>) -> Result<WasmGame, JsValue> {
        let game = Game::new(builtin_levels(), GameConfig::default())
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        Ok(Self {
            app: App::new(game, JsAudio { play_sound }),
        })
    }

    /// Handles a `KeyboardEvent.key` value. Returns true when the key
    /// mapped to a game command.
    pub fn key(&mut self, key: &str) -> bool {
        let Some(command) = KeyCode::from_name(key).and_then(command_for_key) else {
            return false;
        };
        let outcome = self.app.execute(command);
        if let Some(index) = outcome.and_then(|outcome| outcome.completed_level) {
            log_to_console(&format!(
                "Level {} completed! Moving to the next level...",
                index + 1
            ));
        }
        true
    }

    pub fn start(&mut self) {
        self.app.execute(crate::Command::Start);
    }

    pub fn restart(&mut self) {
        self.app.execute(crate::Command::Restart);
    }

    #[wasm_bindgen(js_name = bannerVisible)]
    pub fn banner_visible(&self) -> bool {
        self.app.banner_visible()
    }

    #[wasm_bindgen(js_name = hideBanner)]
    pub fn hide_banner(&mut self) {
        self.app.hide_banner();
    }

    pub fn summary(&self) -> String {
        self.app.summary()
    }

    /// Snapshot of `{ name, kind, x, y, z, rotationY }` records.
    pub fn objects(&self) -> Array {
        self.app
            .objects()
            .iter()
            .map(|object| JsValue::from(object_record(object)))
            .collect()
    }
}

fn object_record(object: &SceneObject) -> Object {
    let record = Object::new();
    let kind = match object.kind {
        EntityKind::Wall => "wall",
        EntityKind::Goal => "goal",
        EntityKind::Box => "box",
        EntityKind::Player => "player",
    };
    let fields = [
        ("name", JsValue::from_str(&object.name)),
        ("kind", JsValue::from_str(kind)),
        ("x", JsValue::from_f64(object.position.x.into())),
        ("y", JsValue::from_f64(object.position.y.into())),
        ("z", JsValue::from_f64(object.position.z.into())),
        ("rotationY", JsValue::from_f64(object.rotation_y.into())),
    ];
    for (key, value) in fields {
        // Setting a string key on a fresh plain object cannot fail.
        let stored = Reflect::set(&record, &JsValue::from_str(key), &value);
        debug_assert!(matches!(stored, Ok(true)));
    }
    record
}

fn log_to_console(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}
