use rand::prelude::*;
use smallvec::SmallVec;

use super::*;

/// Orientations a generated mirror can start with.
const MIRROR_ANGLES: [u16; 4] = [45, 135, 225, 315];

/// Generated sources emit white, and generated goals ask for white back.
const SOURCE_COLOR: LightColor = LightColor::White;

/// Boards rebuilt from scratch when placement stalls or the fresh board
/// comes out already solved.
const MAX_BOARD_ATTEMPTS: u32 = 64;

/// Random cell draws per element before a board attempt is abandoned.
const MAX_PLACE_ATTEMPTS: u32 = 256;

/// Purely random placement seeded for reproducibility: the same seed and
/// difficulty always produce the same layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, difficulty: Difficulty) -> Result<PuzzleLayout> {
        let config = difficulty.config();

        if config.element_count() > config.total_cells() {
            log::error!(
                "Tier does not fit its board, {} elements on {} cells",
                config.element_count(),
                config.total_cells()
            );
            return Err(PuzzleError::GenerationFailed { attempts: 0 });
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        for _ in 0..MAX_BOARD_ATTEMPTS {
            let Some(layout) = try_build(&mut rng, config) else {
                continue;
            };

            // a board that starts solved would finish on the first no-op move
            if layout.goal.is_satisfied(&trace_board(&layout.board)) {
                log::warn!("Generated board starts solved, retrying");
                continue;
            }

            // double check element counts
            let counts = layout.board.element_counts();
            if counts.sources != 1 || counts.targets != CellCount::from(config.targets) {
                log::warn!("Generated board count mismatch: {:?}", counts);
            }

            return Ok(layout);
        }

        log::error!(
            "Board generation failed after {} attempts",
            MAX_BOARD_ATTEMPTS
        );
        Err(PuzzleError::GenerationFailed {
            attempts: MAX_BOARD_ATTEMPTS,
        })
    }
}

fn try_build(rng: &mut SmallRng, config: TierConfig) -> Option<PuzzleLayout> {
    let mut board = Board::empty(config.size);
    let (size_x, size_y) = config.size;

    // source on a random border cell, aimed into the grid
    let (source_pos, direction) = match rng.random_range(0..4u8) {
        0 => ((0, rng.random_range(0..size_y)), Direction::Right),
        1 => ((size_x - 1, rng.random_range(0..size_y)), Direction::Left),
        2 => ((rng.random_range(0..size_x), 0), Direction::Up),
        _ => ((rng.random_range(0..size_x), size_y - 1), Direction::Down),
    };
    let source = Cell::Source {
        direction,
        color: SOURCE_COLOR,
    };
    board.place(source_pos, source).ok()?;

    // targets on the border the beam is heading toward
    let mut spots: SmallVec<[GoalSpot; 2]> = SmallVec::new();
    for _ in 0..config.targets {
        let position = place_free(rng, &mut board, Cell::Target, |rng| {
            opposite_border(rng, direction, config.size)
        })?;
        spots.push(GoalSpot {
            position,
            color: SOURCE_COLOR,
        });
    }

    // movable elements anywhere free
    for _ in 0..config.mirrors {
        let angle = MIRROR_ANGLES[rng.random_range(0..MIRROR_ANGLES.len())];
        place_free(rng, &mut board, Cell::mirror(angle), |rng| {
            any_cell(rng, config.size)
        })?;
    }
    for _ in 0..config.prisms {
        let angle = 90 * rng.random_range(0..4u16);
        place_free(rng, &mut board, Cell::prism(angle), |rng| {
            any_cell(rng, config.size)
        })?;
    }
    for _ in 0..config.obstacles {
        place_free(rng, &mut board, Cell::Obstacle, |rng| {
            any_cell(rng, config.size)
        })?;
    }

    Some(PuzzleLayout {
        board,
        goal: Goal::new(spots),
    })
}

/// Draws candidate cells until `cell` lands on a free one, reporting where
/// it ended up.
fn place_free(
    rng: &mut SmallRng,
    board: &mut Board,
    cell: Cell,
    mut pick: impl FnMut(&mut SmallRng) -> Coord2,
) -> Option<Coord2> {
    for _ in 0..MAX_PLACE_ATTEMPTS {
        let coords = pick(rng);
        if board.place(coords, cell).is_ok() {
            return Some(coords);
        }
    }
    log::warn!("No free cell found after {} draws", MAX_PLACE_ATTEMPTS);
    None
}

/// A uniform cell on the border the beam is heading toward.
fn opposite_border(rng: &mut SmallRng, direction: Direction, (size_x, size_y): Coord2) -> Coord2 {
    match direction {
        Direction::Right => (size_x - 1, rng.random_range(0..size_y)),
        Direction::Left => (0, rng.random_range(0..size_y)),
        Direction::Up => (rng.random_range(0..size_x), size_y - 1),
        Direction::Down => (rng.random_range(0..size_x), 0),
    }
}

fn any_cell(rng: &mut SmallRng, (size_x, size_y): Coord2) -> Coord2 {
    (rng.random_range(0..size_x), rng.random_range(0..size_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_reproduces_the_same_layout() {
        let first = RandomBoardGenerator::new(99)
            .generate(Difficulty::Medium)
            .unwrap();
        let second = RandomBoardGenerator::new(99)
            .generate(Difficulty::Medium)
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn generated_boards_are_structurally_valid_across_seeds() {
        for difficulty in Difficulty::ALL {
            let config = difficulty.config();
            for seed in 0..1000u64 {
                let layout = RandomBoardGenerator::new(seed).generate(difficulty).unwrap();

                let counts = layout.board.element_counts();
                assert_eq!(counts.sources, 1);
                assert_eq!(counts.mirrors, CellCount::from(config.mirrors));
                assert_eq!(counts.prisms, CellCount::from(config.prisms));
                assert_eq!(counts.obstacles, CellCount::from(config.obstacles));
                assert_eq!(counts.targets, CellCount::from(config.targets));
                assert_eq!(layout.goal.spots().len(), usize::from(config.targets));
                assert!(layout.validate().is_ok());

                // never born solved
                assert!(!layout.goal.is_satisfied(&trace_board(&layout.board)));
            }
        }
    }

    #[test]
    fn source_faces_into_the_grid_and_targets_sit_opposite() {
        for seed in 0..100u64 {
            let layout = RandomBoardGenerator::new(seed)
                .generate(Difficulty::Hard)
                .unwrap();
            let (size_x, size_y) = layout.board.size();
            let (pos, direction, color) = layout.board.iter_sources().next().unwrap();

            assert_eq!(color, LightColor::White);
            match direction {
                Direction::Right => assert_eq!(pos.0, 0),
                Direction::Left => assert_eq!(pos.0, size_x - 1),
                Direction::Up => assert_eq!(pos.1, 0),
                Direction::Down => assert_eq!(pos.1, size_y - 1),
            }

            for spot in layout.goal.spots() {
                assert_eq!(spot.color, LightColor::White);
                assert_eq!(layout.board[spot.position], Cell::Target);
                match direction {
                    Direction::Right => assert_eq!(spot.position.0, size_x - 1),
                    Direction::Left => assert_eq!(spot.position.0, 0),
                    Direction::Up => assert_eq!(spot.position.1, size_y - 1),
                    Direction::Down => assert_eq!(spot.position.1, 0),
                }
            }
        }
    }

    #[test]
    fn generated_elements_are_playable() {
        for seed in 0..50u64 {
            let layout = RandomBoardGenerator::new(seed)
                .generate(Difficulty::Hard)
                .unwrap();

            for (_, cell) in layout.board.iter_cells() {
                match cell {
                    Cell::Mirror {
                        angle_deg,
                        movable,
                        rotatable,
                    } => {
                        assert!(movable && rotatable);
                        assert!(MIRROR_ANGLES.contains(&angle_deg));
                    }
                    Cell::Prism {
                        angle_deg,
                        movable,
                        rotatable,
                    } => {
                        assert!(movable && rotatable);
                        assert_eq!(angle_deg % 90, 0);
                        assert!(angle_deg < 360);
                    }
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn layouts_round_trip_through_serde() {
        let layout = RandomBoardGenerator::new(5)
            .generate(Difficulty::Hard)
            .unwrap();

        let json = serde_json::to_string(&layout).unwrap();
        let back: PuzzleLayout = serde_json::from_str(&json).unwrap();

        assert_eq!(back, layout);
    }
}
