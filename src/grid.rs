use std::collections::{HashMap, HashSet};

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::level::{ParsedLevel, BOX, FLOOR, GOAL, LEVEL_ORIGIN, WALL};
use crate::movement::Direction;

/// Start cell used when a level has no `@`: one step inside the top-left
/// corner of the authored rows.
pub const DEFAULT_PLAYER_START: IVec2 = IVec2::new(1 - LEVEL_ORIGIN.x, 1 - LEVEL_ORIGIN.y);

pub const DEFAULT_FACING: Direction = Direction::Down;

/// Stable handle to a box for the lifetime of a loaded level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BoxId(usize);

impl BoxId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub position: IVec2,
    pub facing: Direction,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: DEFAULT_PLAYER_START,
            facing: DEFAULT_FACING,
        }
    }
}

/// Live positions of every grid entity.
///
/// Boxes live in a list addressed by [`BoxId`] and are indexed by cell so
/// lookups stay O(1). The index always mirrors the list.
#[derive(Debug, Clone, Default)]
pub struct GridState {
    walls: HashSet<IVec2>,
    goals: HashSet<IVec2>,
    boxes: Vec<IVec2>,
    box_index: HashMap<IVec2, BoxId>,
    player: Player,
    bounds: (usize, usize),
    loaded: bool,
}

impl GridState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state already populated from `level`.
    pub fn from_level(level: &ParsedLevel) -> Self {
        let mut grid = Self::new();
        grid.load(level);
        grid
    }

    pub fn is_wall(&self, cell: IVec2) -> bool {
        self.walls.contains(&cell)
    }

    pub fn is_goal(&self, cell: IVec2) -> bool {
        self.goals.contains(&cell)
    }

    pub fn box_at(&self, cell: IVec2) -> Option<BoxId> {
        self.box_index.get(&cell).copied()
    }

    /// Wall or box.
    pub fn is_solid(&self, cell: IVec2) -> bool {
        self.is_wall(cell) || self.box_index.contains_key(&cell)
    }

    pub fn box_position(&self, id: BoxId) -> Option<IVec2> {
        self.boxes.get(id.0).copied()
    }

    /// Boxes with their handles, in handle order.
    pub fn boxes(&self) -> impl Iterator<Item = (BoxId, IVec2)> + '_ {
        self.boxes
            .iter()
            .enumerate()
            .map(|(index, position)| (BoxId(index), *position))
    }

    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    pub fn walls(&self) -> &HashSet<IVec2> {
        &self.walls
    }

    pub fn goals(&self) -> &HashSet<IVec2> {
        &self.goals
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Replaces every entity with the contents of `level` and places the
    /// player on its start cell.
    pub fn load(&mut self, level: &ParsedLevel) {
        self.walls = level.walls.clone();
        self.goals = level.goals.clone();
        self.boxes.clear();
        self.box_index.clear();
        for &cell in &level.boxes {
            // A second box on the same cell cannot come out of the parser,
            // but keep the no-overlap rule regardless of input.
            if self.box_index.contains_key(&cell) {
                continue;
            }
            self.box_index.insert(cell, BoxId(self.boxes.len()));
            self.boxes.push(cell);
        }
        self.player = Player {
            position: self.resolve_start(level),
            facing: DEFAULT_FACING,
        };
        self.bounds = (level.width, level.height);
        self.loaded = true;
    }

    /// Drops every entity. A [`GridState::load`] must follow before the
    /// state is used for gameplay again.
    pub fn reset(&mut self) {
        self.walls.clear();
        self.goals.clear();
        self.boxes.clear();
        self.box_index.clear();
        self.player = Player::default();
        self.bounds = (0, 0);
        self.loaded = false;
    }

    fn resolve_start(&self, level: &ParsedLevel) -> IVec2 {
        if let Some(start) = level.player_start {
            return start;
        }
        if !self.is_solid(DEFAULT_PLAYER_START) {
            return DEFAULT_PLAYER_START;
        }
        level
            .open_cells
            .iter()
            .copied()
            .find(|cell| !self.is_solid(*cell))
            .unwrap_or_else(|| {
                // No open cell at all: one past the widest row is never solid.
                IVec2::new(level.width as i32, 0) - LEVEL_ORIGIN
            })
    }

    pub(crate) fn place_player(&mut self, position: IVec2, facing: Direction) {
        self.player = Player { position, facing };
    }

    pub(crate) fn relocate_box(&mut self, id: BoxId, to: IVec2) {
        let Some(slot) = self.boxes.get_mut(id.0) else {
            return;
        };
        let from = *slot;
        *slot = to;
        self.box_index.remove(&from);
        self.box_index.insert(to, id);
    }

    /// Text picture of the live state, one string per row of the loaded
    /// level. Boxes resting on goals are drawn as `%`, the player as `@`
    /// (or `+` on a goal).
    pub fn to_rows(&self) -> Vec<String> {
        let (width, height) = self.bounds;
        (0..height as i32)
            .map(|z| {
                (0..width as i32)
                    .map(|x| {
                        let cell = IVec2::new(x, z) - LEVEL_ORIGIN;
                        let goal = self.is_goal(cell);
                        if self.is_wall(cell) {
                            WALL
                        } else if self.box_at(cell).is_some() {
                            if goal {
                                '%'
                            } else {
                                BOX
                            }
                        } else if self.player.position == cell {
                            if goal {
                                '+'
                            } else {
                                '@'
                            }
                        } else if goal {
                            GOAL
                        } else {
                            FLOOR
                        }
                    })
                    .collect()
            })
            .collect()
    }
}
