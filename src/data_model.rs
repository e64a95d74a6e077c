use std::sync::Arc;

use glam::IVec2;
use parking_lot::RwLock;

use crate::events::GameEvent;
use crate::grid::GridState;
use crate::scene::{box_name, facing_yaw, grid_to_world, Scene, SceneObject, PLAYER_NAME};

/// Shared render-side mirror of the grid. Render loops poll it every frame;
/// gameplay updates it only in response to events.
#[derive(Debug, Default)]
pub struct DataModel {
    objects: Arc<RwLock<Vec<SceneObject>>>,
}

impl Clone for DataModel {
    fn clone(&self) -> Self {
        Self {
            objects: Arc::clone(&self.objects),
        }
    }
}

impl DataModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_grid(grid: &GridState) -> Self {
        let model = Self::new();
        model.sync(grid);
        model
    }

    /// Rebuilds every object from `grid`. Used after loads and resets.
    pub fn sync(&self, grid: &GridState) {
        *self.objects.write() = Scene::from_grid(grid).objects;
    }

    /// Returns a snapshot of all stored objects.
    pub fn all_objects(&self) -> Vec<SceneObject> {
        self.objects.read().clone()
    }

    /// Returns a clone of the requested object.
    pub fn get(&self, name: &str) -> Option<SceneObject> {
        self.objects
            .read()
            .iter()
            .find(|object| object.name == name)
            .cloned()
    }

    /// Applies a mutation to the requested object.
    pub fn update<F, R>(&self, name: &str, mut updater: F) -> Option<R>
    where
        F: FnMut(&mut SceneObject) -> R,
    {
        let mut guard = self.objects.write();
        let object = guard.iter_mut().find(|object| object.name == name)?;
        Some(updater(object))
    }

    pub fn set_cell(&self, name: &str, cell: IVec2) -> bool {
        self.update(name, |obj| obj.position = grid_to_world(cell))
            .is_some()
    }

    /// Incrementally applies a move or push. Returns false for events that
    /// need a full [`DataModel::sync`] or have no visual effect.
    pub fn apply_event(&self, event: &GameEvent) -> bool {
        match event {
            GameEvent::PlayerMoved { to, facing, .. } => self
                .update(PLAYER_NAME, |obj| {
                    obj.position = grid_to_world(*to);
                    obj.rotation_y = facing_yaw(*facing);
                })
                .is_some(),
            GameEvent::BoxPushed { id, to, .. } => self.set_cell(&box_name(id.index()), *to),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{parse_level, LevelDefinition};
    use crate::movement::{try_move, Direction};
    use crate::scene::EntityKind;

    fn grid() -> GridState {
        GridState::from_level(&parse_level(&LevelDefinition::new([
            "######", "#@$ *#", "######",
        ])))
    }

    #[test]
    fn incremental_updates_match_full_sync() {
        let mut state = grid();
        let model = DataModel::from_grid(&state);

        let result = try_move(&mut state, Direction::Right);
        let id = result.pushed_box.unwrap();
        model.apply_event(&GameEvent::BoxPushed {
            id,
            from: result.player_to,
            to: state.box_position(id).unwrap(),
        });
        model.apply_event(&GameEvent::PlayerMoved {
            from: result.player_from,
            to: result.player_to,
            facing: Direction::Right,
        });

        assert_eq!(model.all_objects(), Scene::from_grid(&state).objects);
    }

    #[test]
    fn clones_share_the_same_snapshot() {
        let model = DataModel::new();
        let render_side = model.clone();
        model.sync(&grid());
        assert_eq!(
            render_side
                .all_objects()
                .iter()
                .filter(|o| o.kind == EntityKind::Box)
                .count(),
            1
        );
    }

    #[test]
    fn update_returns_false_for_missing_object() {
        let model = DataModel::new();
        assert!(!model.set_cell("box-9", IVec2::ZERO));
        assert!(!model.apply_event(&GameEvent::BackgroundMusic));
    }
}
