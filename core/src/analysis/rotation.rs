use std::collections::{HashSet, VecDeque};

use smallvec::SmallVec;

use super::*;

/// Orientation assignment per rotatable element, by behavior class rather
/// than raw angle. Mirrors have three classes (the two diagonal families
/// and pass-through), prisms have three (one per split color).
type ClassState = SmallVec<[u8; 8]>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum RotKind {
    Mirror,
    Prism,
}

impl RotKind {
    const CLASS_COUNT: u8 = 3;

    fn class_of(self, angle_deg: u16) -> u8 {
        match self {
            RotKind::Mirror => match angle_deg % 360 {
                45 | 225 => 0,
                135 | 315 => 1,
                _ => 2,
            },
            RotKind::Prism => ((angle_deg % 360) / 90 % 3) as u8,
        }
    }

    /// A representative angle for each class.
    fn angle_of(self, class: u8) -> u16 {
        match self {
            RotKind::Mirror => [45, 135, 0][usize::from(class)],
            RotKind::Prism => [0, 90, 180][usize::from(class)],
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Rotatable {
    coords: Coord2,
    kind: RotKind,
    start_class: u8,
}

/// One orientation assignment that solves a layout.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RotationSolution {
    /// Absolute target angles for every element whose orientation has to
    /// change from the current board, in grid-scan order. Empty means the
    /// board is solved as it stands.
    pub rotations: Vec<(Coord2, u16)>,
}

impl RotationSolution {
    /// Replays the solution through the ordinary rotate operation. Returns
    /// whether every entry was applied.
    pub fn apply_to(&self, board: &mut Board) -> bool {
        self.rotations.iter().all(|&(coords, target_deg)| {
            let current = match board[coords] {
                Cell::Mirror { angle_deg, .. } | Cell::Prism { angle_deg, .. } => angle_deg,
                _ => return false,
            };
            let delta = (i32::from(target_deg) - i32::from(current)).rem_euclid(360) as i16;
            board.rotate_element(coords, delta)
        })
    }
}

/// Breadth-first search over the rotation classes of the board's rotatable
/// elements. The first hit is returned, so the solution uses as few
/// rotation edits as any within the limits; `None` means nothing inside the
/// limits satisfies the goal.
pub fn find_rotation_solution(
    board: &Board,
    goal: &Goal,
    limits: SearchLimits,
) -> Option<RotationSolution> {
    let rotatables: Vec<Rotatable> = board
        .iter_cells()
        .filter_map(|(coords, cell)| match cell {
            Cell::Mirror {
                angle_deg,
                rotatable: true,
                ..
            } => Some(Rotatable {
                coords,
                kind: RotKind::Mirror,
                start_class: RotKind::Mirror.class_of(angle_deg),
            }),
            Cell::Prism {
                angle_deg,
                rotatable: true,
                ..
            } => Some(Rotatable {
                coords,
                kind: RotKind::Prism,
                start_class: RotKind::Prism.class_of(angle_deg),
            }),
            _ => None,
        })
        .collect();

    let start: ClassState = rotatables.iter().map(|r| r.start_class).collect();
    let mut visited: HashSet<ClassState> = HashSet::from([start.clone()]);
    let mut queue: VecDeque<(ClassState, usize)> = VecDeque::from([(start, 0)]);
    let mut examined = 0usize;

    while let Some((state, depth)) = queue.pop_front() {
        examined += 1;
        if examined > limits.max_states {
            log::debug!("Rotation search hit the state cap at depth {}", depth);
            return None;
        }

        if solves(board, goal, &rotatables, &state) {
            return Some(solution_from(&rotatables, &state));
        }

        if depth >= limits.max_depth {
            continue;
        }

        for i in 0..rotatables.len() {
            for class in 0..RotKind::CLASS_COUNT {
                if class == state[i] {
                    continue;
                }
                let mut next = state.clone();
                next[i] = class;
                if visited.insert(next.clone()) {
                    queue.push_back((next, depth + 1));
                }
            }
        }
    }

    None
}

fn solves(board: &Board, goal: &Goal, rotatables: &[Rotatable], state: &ClassState) -> bool {
    let mut candidate = board.clone();
    for (rotatable, &class) in rotatables.iter().zip(state) {
        if class != rotatable.start_class {
            set_angle(&mut candidate, rotatable.coords, rotatable.kind.angle_of(class));
        }
    }
    goal.is_satisfied(&trace_board(&candidate))
}

fn solution_from(rotatables: &[Rotatable], state: &ClassState) -> RotationSolution {
    let rotations = rotatables
        .iter()
        .zip(state)
        .filter(|&(rotatable, &class)| class != rotatable.start_class)
        .map(|(rotatable, &class)| (rotatable.coords, rotatable.kind.angle_of(class)))
        .collect();
    RotationSolution { rotations }
}

fn set_angle(board: &mut Board, coords: Coord2, target_deg: u16) {
    let current = match board[coords] {
        Cell::Mirror { angle_deg, .. } | Cell::Prism { angle_deg, .. } => angle_deg,
        _ => return,
    };
    let delta = (i32::from(target_deg) - i32::from(current)).rem_euclid(360) as i16;
    board.rotate_element(coords, delta);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corridor(first_mirror_angle: u16) -> (Board, Goal) {
        let mut board = Board::empty((8, 8));
        board
            .place(
                (0, 0),
                Cell::Source {
                    direction: Direction::Right,
                    color: LightColor::White,
                },
            )
            .unwrap();
        board.place((3, 0), Cell::mirror(first_mirror_angle)).unwrap();
        board.place((3, 3), Cell::mirror(135)).unwrap();
        board.place((0, 3), Cell::Target).unwrap();
        let goal = Goal::new([GoalSpot {
            position: (0, 3),
            color: LightColor::White,
        }]);
        (board, goal)
    }

    #[test]
    fn solved_boards_need_no_rotations() {
        let (board, goal) = corridor(45);

        let solution = find_rotation_solution(&board, &goal, SearchLimits::DEFAULT).unwrap();

        assert!(solution.rotations.is_empty());
    }

    #[test]
    fn single_edit_fix_is_found_and_replays() {
        let (board, goal) = corridor(135);

        let solution = find_rotation_solution(&board, &goal, SearchLimits::DEFAULT).unwrap();
        assert_eq!(solution.rotations, [((3, 0), 45)]);

        let mut fixed = board.clone();
        assert!(solution.apply_to(&mut fixed));
        assert!(goal.is_satisfied(&trace_board(&fixed)));
    }

    #[test]
    fn prism_recoloring_is_found() {
        let mut board = Board::empty((8, 8));
        board
            .place(
                (0, 0),
                Cell::Source {
                    direction: Direction::Right,
                    color: LightColor::White,
                },
            )
            .unwrap();
        board.place((2, 0), Cell::prism(0)).unwrap();
        board.place((2, 5), Cell::Target).unwrap();
        let goal = Goal::new([GoalSpot {
            position: (2, 5),
            color: LightColor::Green,
        }]);

        let solution = find_rotation_solution(&board, &goal, SearchLimits::DEFAULT).unwrap();

        assert_eq!(solution.rotations, [((2, 0), 90)]);
    }

    #[test]
    fn blocked_boards_have_no_solution() {
        let (mut board, goal) = corridor(45);
        board.place((1, 0), Cell::Obstacle).unwrap();

        assert_eq!(
            find_rotation_solution(&board, &goal, SearchLimits::DEFAULT),
            None
        );
    }

    #[test]
    fn depth_limit_is_respected() {
        let (mut board, goal) = corridor(135);
        // put the closing mirror in the wrong family too; now two edits are needed
        assert!(board.rotate_element((3, 3), -90));

        let shallow = SearchLimits {
            max_depth: 1,
            ..SearchLimits::DEFAULT
        };
        assert_eq!(find_rotation_solution(&board, &goal, shallow), None);

        let solution = find_rotation_solution(&board, &goal, SearchLimits::DEFAULT).unwrap();
        assert_eq!(solution.rotations.len(), 2);

        let mut fixed = board.clone();
        assert!(solution.apply_to(&mut fixed));
        assert!(goal.is_satisfied(&trace_board(&fixed)));
    }

    #[test]
    fn state_cap_stops_the_search() {
        let (board, goal) = corridor(135);

        let tiny = SearchLimits {
            max_depth: 4,
            max_states: 1,
        };

        assert_eq!(find_rotation_solution(&board, &goal, tiny), None);
    }
}
