use glam::IVec2;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::grid::{BoxId, GridState};

/// One of the four cardinal moves. `Up` points towards row zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step in grid coordinates.
    pub const fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_uppercase() {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Outcome of [`try_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    pub moved: bool,
    pub pushed_box: Option<BoxId>,
    pub player_from: IVec2,
    pub player_to: IVec2,
}

impl MoveResult {
    fn rejected(at: IVec2) -> Self {
        Self {
            moved: false,
            pushed_box: None,
            player_from: at,
            player_to: at,
        }
    }
}

/// Applies a player move with push rules. Either the whole move happens or
/// nothing changes.
pub fn try_move(grid: &mut GridState, direction: Direction) -> MoveResult {
    let step = direction.delta();
    let from = grid.player().position;
    let target = from + step;

    if grid.is_wall(target) {
        debug!("move {direction:?} from {from} blocked by wall");
        return MoveResult::rejected(from);
    }

    let pushed_box = match grid.box_at(target) {
        Some(id) => {
            let box_target = target + step;
            if grid.is_wall(box_target) || grid.box_at(box_target).is_some() {
                debug!("push {direction:?} of box at {target} blocked");
                return MoveResult::rejected(from);
            }
            grid.relocate_box(id, box_target);
            Some(id)
        }
        None => None,
    };

    grid.place_player(target, direction);
    debug!("player moved {direction:?} {from} -> {target}");
    MoveResult {
        moved: true,
        pushed_box,
        player_from: from,
        player_to: target,
    }
}
