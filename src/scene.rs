use std::f32::consts::{FRAC_PI_2, PI};

use glam::{IVec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::grid::GridState;
use crate::movement::Direction;

/// Height at which every grid entity sits above the floor plane.
pub const ENTITY_HEIGHT: f32 = 0.5;

/// Maps a grid cell to the world position of the entity standing on it.
/// This is the only place grid and world space meet.
pub fn grid_to_world(cell: IVec2) -> Vec3 {
    Vec3::new(cell.x as f32, ENTITY_HEIGHT, cell.y as f32)
}

/// Inverse of [`grid_to_world`], rounding to the nearest cell.
pub fn world_to_grid(position: Vec3) -> IVec2 {
    IVec2::new(position.x.round() as i32, position.z.round() as i32)
}

/// Rotation around the vertical axis for a facing. `Down` looks towards
/// the default camera.
pub fn facing_yaw(facing: Direction) -> f32 {
    match facing {
        Direction::Right => FRAC_PI_2,
        Direction::Left => -FRAC_PI_2,
        Direction::Up => PI,
        Direction::Down => 0.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Wall,
    Goal,
    Box,
    Player,
}

/// One visual primitive the renderer should place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub kind: EntityKind,
    pub position: Vec3,
    #[serde(default)]
    pub rotation_y: f32,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, kind: EntityKind, cell: IVec2) -> Self {
        Self {
            name: name.into(),
            kind,
            position: grid_to_world(cell),
            rotation_y: 0.0,
        }
    }

    pub fn cell(&self) -> IVec2 {
        world_to_grid(self.position)
    }
}

pub const PLAYER_NAME: &str = "player";

pub fn box_name(index: usize) -> String {
    format!("box-{index}")
}

/// Render snapshot of a grid state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
}

impl Scene {
    /// Builds one object per wall, goal and box plus the player. Static
    /// entities are sorted by cell so snapshots are deterministic.
    pub fn from_grid(grid: &GridState) -> Self {
        let mut walls: Vec<IVec2> = grid.walls().iter().copied().collect();
        walls.sort_by_key(|cell| (cell.y, cell.x));
        let mut goals: Vec<IVec2> = grid.goals().iter().copied().collect();
        goals.sort_by_key(|cell| (cell.y, cell.x));

        let mut objects = Vec::with_capacity(walls.len() + goals.len() + grid.box_count() + 1);
        objects.extend(walls.into_iter().enumerate().map(|(index, cell)| {
            SceneObject::new(format!("wall-{index}"), EntityKind::Wall, cell)
        }));
        objects.extend(goals.into_iter().enumerate().map(|(index, cell)| {
            SceneObject::new(format!("goal-{index}"), EntityKind::Goal, cell)
        }));
        objects.extend(
            grid.boxes()
                .map(|(id, cell)| SceneObject::new(box_name(id.index()), EntityKind::Box, cell)),
        );

        let player = grid.player();
        let mut avatar = SceneObject::new(PLAYER_NAME, EntityKind::Player, player.position);
        avatar.rotation_y = facing_yaw(player.facing);
        objects.push(avatar);

        Self { objects }
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.objects.iter().filter(|o| o.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{builtin_levels, parse_level};

    #[test]
    fn world_conversion_round_trips() {
        let cell = IVec2::new(-3, 4);
        let world = grid_to_world(cell);
        assert_eq!(world, Vec3::new(-3.0, ENTITY_HEIGHT, 4.0));
        assert_eq!(world_to_grid(world), cell);
    }

    #[test]
    fn scene_mirrors_grid_entities() {
        let grid = GridState::from_level(&parse_level(&builtin_levels()[1]));
        let scene = Scene::from_grid(&grid);
        assert_eq!(scene.count(EntityKind::Wall), grid.walls().len());
        assert_eq!(scene.count(EntityKind::Goal), 3);
        assert_eq!(scene.count(EntityKind::Box), 2);
        assert_eq!(scene.count(EntityKind::Player), 1);

        let player = scene.objects.iter().find(|o| o.name == PLAYER_NAME).unwrap();
        assert_eq!(player.cell(), grid.player().position);
        assert_eq!(player.rotation_y, 0.0);
        assert!(scene.objects.iter().any(|o| o.name == "box-1"));
    }

    #[test]
    fn facing_yaw_covers_all_directions() {
        assert_eq!(facing_yaw(Direction::Right), FRAC_PI_2);
        assert_eq!(facing_yaw(Direction::Left), -FRAC_PI_2);
        assert_eq!(facing_yaw(Direction::Up), PI);
    }
}
