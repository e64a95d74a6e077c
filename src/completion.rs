use crate::grid::GridState;

/// True when every box rests on a goal. A level without boxes is complete.
pub fn is_complete(grid: &GridState) -> bool {
    grid.boxes().all(|(_, cell)| grid.is_goal(cell))
}

pub fn boxes_on_goals(grid: &GridState) -> usize {
    grid.boxes().filter(|(_, cell)| grid.is_goal(*cell)).count()
}

#[cfg(test)]
mod tests {
    use glam::IVec2;

    use super::*;
    use crate::level::{parse_level, LevelDefinition, ParsedLevel};

    const GOALS: [IVec2; 3] = [IVec2::new(0, 0), IVec2::new(1, 0), IVec2::new(2, 0)];
    const PARKING: [IVec2; 3] = [IVec2::new(0, 2), IVec2::new(1, 2), IVec2::new(2, 2)];

    fn with_boxes(boxes: Vec<IVec2>) -> GridState {
        let level = ParsedLevel {
            boxes,
            goals: GOALS.into_iter().collect(),
            player_start: Some(IVec2::new(5, 5)),
            ..ParsedLevel::default()
        };
        GridState::from_level(&level)
    }

    #[test]
    fn matches_every_box_on_goal_for_all_placements() {
        for mask in 0u8..8 {
            let boxes = (0..3)
                .map(|i| {
                    if mask & (1 << i) != 0 {
                        GOALS[i]
                    } else {
                        PARKING[i]
                    }
                })
                .collect();
            let state = with_boxes(boxes);
            let on_goals = mask.count_ones() as usize;
            assert_eq!(boxes_on_goals(&state), on_goals);
            assert_eq!(is_complete(&state), on_goals == 3, "mask {mask:03b}");
        }
    }

    #[test]
    fn two_of_three_is_not_complete() {
        let state = with_boxes(vec![GOALS[0], GOALS[2], PARKING[1]]);
        assert!(!is_complete(&state));
        let state = with_boxes(vec![GOALS[2], GOALS[0], GOALS[1]]);
        assert!(is_complete(&state));
    }

    #[test]
    fn zero_boxes_is_vacuously_complete() {
        let state =
            GridState::from_level(&parse_level(&LevelDefinition::new(["####", "#@*#", "####"])));
        assert!(is_complete(&state));
        assert_eq!(boxes_on_goals(&state), 0);
    }
}
