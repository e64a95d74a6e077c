use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::completion::{boxes_on_goals, is_complete};
use crate::config::GameConfig;
use crate::error::GameError;
use crate::events::{EventQueue, GameEvent, LoadReason};
use crate::grid::GridState;
use crate::level::{parse_level, LevelDefinition};
use crate::movement::{try_move, Direction, MoveResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleState {
    Loading,
    Playing,
    Completed,
}

/// Counters for the level currently being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LevelStats {
    pub moves: u32,
    pub pushes: u32,
}

/// Result of routing one move request through the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub result: Option<MoveResult>,
    /// Set when this move solved the level and the next one was loaded.
    pub completed_level: Option<usize>,
}

impl MoveOutcome {
    pub fn moved(&self) -> bool {
        self.result.map_or(false, |result| result.moved)
    }
}

/// Owns the level sequence and the live grid, and drives
/// `Loading -> Playing -> Completed -> Loading`.
#[derive(Debug)]
pub struct Game {
    levels: Vec<LevelDefinition>,
    current: usize,
    grid: GridState,
    state: LifecycleState,
    stats: LevelStats,
    config: GameConfig,
    events: EventQueue,
}

impl Game {
    pub fn new(levels: Vec<LevelDefinition>, config: GameConfig) -> Result<Self, GameError> {
        if levels.is_empty() {
            return Err(GameError::EmptySequence);
        }
        let mut game = Self {
            levels,
            current: 0,
            grid: GridState::new(),
            state: LifecycleState::Loading,
            stats: LevelStats::default(),
            config,
            events: EventQueue::new(),
        };
        if game.config.background_music {
            game.events.emit(GameEvent::BackgroundMusic);
        }
        game.load_current(LoadReason::Initial);
        Ok(game)
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn grid(&self) -> &GridState {
        &self.grid
    }

    pub fn level_index(&self) -> usize {
        self.current
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn current_level(&self) -> &LevelDefinition {
        &self.levels[self.current]
    }

    pub fn stats(&self) -> LevelStats {
        self.stats
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn boxes_on_goals(&self) -> usize {
        boxes_on_goals(&self.grid)
    }

    /// Routes a move to the grid. Requests outside `Playing` are ignored.
    pub fn handle_move(&mut self, direction: Direction) -> MoveOutcome {
        if self.state != LifecycleState::Playing {
            debug!("ignoring {direction:?} while {:?}", self.state);
            return MoveOutcome {
                result: None,
                completed_level: None,
            };
        }

        let result = try_move(&mut self.grid, direction);
        if !result.moved {
            return MoveOutcome {
                result: Some(result),
                completed_level: None,
            };
        }

        self.stats.moves = self.stats.moves.saturating_add(1);
        if let Some(id) = result.pushed_box {
            self.stats.pushes = self.stats.pushes.saturating_add(1);
            let to = self.grid.box_position(id).unwrap_or(result.player_to);
            self.events.emit(GameEvent::BoxPushed {
                id,
                from: result.player_to,
                to,
            });
        }
        self.events.emit(GameEvent::PlayerMoved {
            from: result.player_from,
            to: result.player_to,
            facing: direction,
        });

        let completed_level = is_complete(&self.grid).then(|| self.complete_level());
        MoveOutcome {
            result: Some(result),
            completed_level,
        }
    }

    /// Reloads the current level from any state.
    pub fn start(&mut self) {
        info!("start requested for level {}", self.current + 1);
        self.grid.reset();
        self.transition(LifecycleState::Loading);
        self.load_current(LoadReason::Restart);
    }

    /// Same transition as [`Game::start`].
    pub fn restart(&mut self) {
        self.start();
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }

    fn complete_level(&mut self) -> usize {
        let finished = self.current;
        info!(
            "level {} completed in {} moves ({} pushes)",
            finished + 1,
            self.stats.moves,
            self.stats.pushes
        );
        self.transition(LifecycleState::Completed);
        self.events.emit(GameEvent::LevelCompleted {
            index: finished,
            stats: self.stats,
        });

        self.grid.reset();
        self.current = self
            .config
            .sequence_end
            .next_index(self.current, self.levels.len());
        self.transition(LifecycleState::Loading);
        self.load_current(LoadReason::Advance);
        finished
    }

    fn load_current(&mut self, reason: LoadReason) {
        let parsed = parse_level(&self.levels[self.current]);
        self.grid.load(&parsed);
        self.stats = LevelStats::default();
        info!(
            "loaded level {}/{} ({} boxes, {} goals)",
            self.current + 1,
            self.levels.len(),
            parsed.boxes.len(),
            parsed.goals.len()
        );
        self.events.emit(GameEvent::LevelLoaded {
            index: self.current,
            reason,
        });
        self.transition(LifecycleState::Playing);
    }

    fn transition(&mut self, to: LifecycleState) {
        let from = self.state;
        if from == to {
            return;
        }
        debug!("lifecycle {from:?} -> {to:?}");
        self.state = to;
        self.events.emit(GameEvent::StateChanged { from, to });
    }
}
