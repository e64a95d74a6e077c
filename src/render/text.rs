use std::collections::HashMap;
use std::convert::Infallible;

use glam::IVec2;

use super::Renderer;
use crate::scene::{EntityKind, SceneObject};

/// Rasterises scene objects back into level glyphs: `#` wall, `*` goal,
/// `$` box, `%` box on goal, `@` player, `+` player on goal.
#[derive(Debug, Default)]
pub struct TextRenderer {
    frame: Vec<String>,
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows of the last rendered frame.
    pub fn frame(&self) -> &[String] {
        &self.frame
    }

    pub fn frame_text(&self) -> String {
        self.frame.join("\n")
    }
}

impl Renderer for TextRenderer {
    type Error = Infallible;

    fn render(&mut self, objects: &[SceneObject]) -> Result<(), Self::Error> {
        self.frame.clear();
        let Some((min, max)) = bounds(objects) else {
            return Ok(());
        };

        let mut cells: HashMap<IVec2, char> = HashMap::new();
        // Floor markers first so solids and the player are drawn over them.
        let mut ordered: Vec<&SceneObject> = objects.iter().collect();
        ordered.sort_by_key(|object| layer(object.kind));
        for object in ordered {
            let cell = object.cell();
            let under_goal = cells.get(&cell) == Some(&'*');
            let glyph = match (object.kind, under_goal) {
                (EntityKind::Wall, _) => '#',
                (EntityKind::Goal, _) => '*',
                (EntityKind::Box, true) => '%',
                (EntityKind::Box, false) => '$',
                (EntityKind::Player, true) => '+',
                (EntityKind::Player, false) => '@',
            };
            cells.insert(cell, glyph);
        }

        for z in min.y..=max.y {
            let row: String = (min.x..=max.x)
                .map(|x| cells.get(&IVec2::new(x, z)).copied().unwrap_or(' '))
                .collect();
            self.frame.push(row.trim_end().to_string());
        }
        Ok(())
    }
}

fn layer(kind: EntityKind) -> u8 {
    match kind {
        EntityKind::Goal => 0,
        EntityKind::Wall => 1,
        EntityKind::Box => 2,
        EntityKind::Player => 3,
    }
}

fn bounds(objects: &[SceneObject]) -> Option<(IVec2, IVec2)> {
    let mut cells = objects.iter().map(SceneObject::cell);
    let first = cells.next()?;
    Some(cells.fold((first, first), |(min, max), cell| {
        (min.min(cell), max.max(cell))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridState;
    use crate::level::{parse_level, LevelDefinition};
    use crate::movement::{try_move, Direction};
    use crate::scene::Scene;

    fn render(grid: &GridState) -> Vec<String> {
        let mut renderer = TextRenderer::new();
        renderer.render(&Scene::from_grid(grid).objects).unwrap();
        renderer.frame().to_vec()
    }

    #[test]
    fn frame_matches_level_text() {
        let rows = ["######", "#@$ *#", "######"];
        let grid = GridState::from_level(&parse_level(&LevelDefinition::new(rows)));
        assert_eq!(render(&grid), rows);
    }

    #[test]
    fn box_on_goal_and_player_on_goal_glyphs() {
        let mut grid = GridState::from_level(&parse_level(&LevelDefinition::new([
            "#####", "#@$*#", "#####",
        ])));
        try_move(&mut grid, Direction::Right);
        assert_eq!(render(&grid), ["#####", "# @%#", "#####"]);
        assert_eq!(render(&grid), grid.to_rows());
    }

    #[test]
    fn empty_scene_renders_nothing() {
        let mut renderer = TextRenderer::new();
        renderer.render(&[]).unwrap();
        assert!(renderer.frame().is_empty());
        assert_eq!(renderer.frame_text(), "");
    }
}
