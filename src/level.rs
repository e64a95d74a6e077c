use std::collections::HashSet;
use std::fs;
use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Translation subtracted from row/column indices so authored levels end up
/// centred around the world origin.
pub const LEVEL_ORIGIN: IVec2 = IVec2::new(3, 3);

pub const WALL: char = '#';
pub const BOX: char = '$';
pub const GOAL: char = '*';
pub const PLAYER_START: char = '@';
pub const FLOOR: char = ' ';

/// Authored text description of one puzzle layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelDefinition {
    rows: Vec<String>,
}

impl LevelDefinition {
    pub fn new<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
        }
    }

    /// Builds a definition with one row per line of `text`.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }
}

/// Typed placements extracted from a [`LevelDefinition`], already in grid
/// coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedLevel {
    pub walls: HashSet<IVec2>,
    /// Row-major order; box handles are assigned in this order.
    pub boxes: Vec<IVec2>,
    pub goals: HashSet<IVec2>,
    pub player_start: Option<IVec2>,
    /// Cells that are neither wall nor box, row-major.
    pub open_cells: Vec<IVec2>,
    pub width: usize,
    pub height: usize,
}

impl ParsedLevel {
    /// Rebuilds the authored rows. Lossless for rectangular levels written
    /// with the level alphabet and spaces.
    pub fn to_rows(&self) -> Vec<String> {
        let boxes: HashSet<IVec2> = self.boxes.iter().copied().collect();
        (0..self.height)
            .map(|z| {
                (0..self.width)
                    .map(|x| {
                        let cell = to_grid(x, z);
                        if self.walls.contains(&cell) {
                            WALL
                        } else if boxes.contains(&cell) {
                            BOX
                        } else if self.goals.contains(&cell) {
                            GOAL
                        } else if self.player_start == Some(cell) {
                            PLAYER_START
                        } else {
                            FLOOR
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Converts text rows into placements. Never fails: unknown characters are
/// floor and ragged rows are treated as floor past their end.
pub fn parse_level(level: &LevelDefinition) -> ParsedLevel {
    let mut parsed = ParsedLevel {
        height: level.rows.len(),
        ..ParsedLevel::default()
    };

    for (z, row) in level.rows.iter().enumerate() {
        let mut columns = 0;
        for (x, ch) in row.chars().enumerate() {
            columns = x + 1;
            let cell = to_grid(x, z);
            match ch {
                WALL => {
                    parsed.walls.insert(cell);
                }
                BOX => parsed.boxes.push(cell),
                GOAL => {
                    parsed.goals.insert(cell);
                    parsed.open_cells.push(cell);
                }
                PLAYER_START => {
                    parsed.player_start.get_or_insert(cell);
                    parsed.open_cells.push(cell);
                }
                _ => parsed.open_cells.push(cell),
            }
        }
        parsed.width = parsed.width.max(columns);
    }

    parsed
}

fn to_grid(x: usize, z: usize) -> IVec2 {
    IVec2::new(x as i32, z as i32) - LEVEL_ORIGIN
}

/// The two layouts shipped with the game, in play order.
pub fn builtin_levels() -> Vec<LevelDefinition> {
    vec![
        LevelDefinition::new([
            "###########",
            "#         #",
            "#         #",
            "#  $      #",
            "#      $  #",
            "#     *   #",
            "#  $      #",
            "#*   *    #",
            "###########",
        ]),
        LevelDefinition::new([
            "###########",
            "#         #",
            "#  @      #",
            "#         #",
            "#      $  #",
            "#     *   #",
            "#  $      #",
            "#*   *    #",
            "###########",
        ]),
    ]
}

/// Splits a level pack into definitions. Levels are separated by empty
/// lines; a row of spaces is floor and stays part of its level. Lines
/// starting with `;` are comments.
pub fn parse_level_pack(text: &str) -> Vec<LevelDefinition> {
    let mut levels = Vec::new();
    let mut rows: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.starts_with(';') {
            continue;
        }
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            if !rows.is_empty() {
                levels.push(LevelDefinition::new(rows.drain(..)));
            }
            continue;
        }
        rows.push(line);
    }
    if !rows.is_empty() {
        levels.push(LevelDefinition::new(rows));
    }

    levels
}

/// Reads a level pack from disk.
pub fn load_level_pack<P: AsRef<Path>>(path: P) -> Result<Vec<LevelDefinition>, GameError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| GameError::LevelPackIo {
        path: path.to_path_buf(),
        source,
    })?;
    let levels = parse_level_pack(&text);
    if levels.is_empty() {
        return Err(GameError::EmptyLevelPack(path.to_path_buf()));
    }
    Ok(levels)
}
