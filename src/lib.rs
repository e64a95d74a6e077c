//! Grid puzzle engine for a 3D box-pushing game.
//!
//! The crate keeps the puzzle itself (level parsing, push rules, completion
//! and the level lifecycle) free of any engine so it can be driven and
//! tested headless. Rendering, audio and input are reached through small
//! seams: a shared scene mirror polled by render loops, an audio backend
//! trait and a queue of discrete key presses.

pub mod app;
pub mod audio;
pub mod completion;
pub mod config;
pub mod data_model;
pub mod error;
pub mod events;
pub mod grid;
pub mod input;
pub mod level;
pub mod lifecycle;
pub mod movement;
pub mod render;
pub mod scene;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use app::App;
pub use audio::{AudioBackend, AudioCue, AudioDirector, SilentAudio};
pub use completion::{boxes_on_goals, is_complete};
pub use config::{GameConfig, SequenceEnd};
pub use data_model::DataModel;
pub use error::{AudioError, GameError};
pub use events::{GameEvent, LoadReason};
pub use grid::{BoxId, GridState, Player, DEFAULT_PLAYER_START};
pub use input::{command_for_key, Command, InputQueue, KeyCode, NamedKey};
pub use level::{
    builtin_levels, load_level_pack, parse_level, parse_level_pack, LevelDefinition, ParsedLevel,
    LEVEL_ORIGIN,
};
pub use lifecycle::{Game, LevelStats, LifecycleState, MoveOutcome};
pub use movement::{try_move, Direction, MoveResult};
pub use render::{Renderer, TextRenderer};
pub use scene::{grid_to_world, world_to_grid, EntityKind, Scene, SceneObject};
