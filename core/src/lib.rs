use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::Index;

pub use analysis::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use optics::*;
pub use score::*;
pub use tracer::*;
pub use types::*;

mod analysis;
mod cell;
mod engine;
mod error;
mod generator;
mod optics;
mod score;
mod tracer;
mod types;

/// Closed set of mini-game kinds the surrounding application knows about.
/// Only the light puzzle has an engine; asking for any other kind is
/// reported as [`PuzzleError::NotImplemented`] rather than silently mapped
/// to something else.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleKind {
    Light,
    Microbe,
    Crypto,
    Geology,
    Ai,
}

impl PuzzleKind {
    pub const ALL: [PuzzleKind; 5] = [
        Self::Light,
        Self::Microbe,
        Self::Crypto,
        Self::Geology,
        Self::Ai,
    ];

    pub const fn is_implemented(self) -> bool {
        matches!(self, Self::Light)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// The static per-tier table: board size, element counts, and scoring
    /// parameters.
    pub const fn config(self) -> TierConfig {
        match self {
            Self::Easy => TierConfig {
                size: (8, 8),
                mirrors: 3,
                prisms: 0,
                obstacles: 2,
                targets: 1,
                time_budget_secs: 120,
                multiplier: 1.0,
            },
            Self::Medium => TierConfig {
                size: (8, 8),
                mirrors: 4,
                prisms: 1,
                obstacles: 4,
                targets: 1,
                time_budget_secs: 180,
                multiplier: 1.5,
            },
            Self::Hard => TierConfig {
                size: (8, 8),
                mirrors: 5,
                prisms: 2,
                obstacles: 6,
                targets: 2,
                time_budget_secs: 240,
                multiplier: 2.0,
            },
        }
    }
}

/// Board composition and scoring parameters of one difficulty tier.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TierConfig {
    pub size: Coord2,
    pub mirrors: u8,
    pub prisms: u8,
    pub obstacles: u8,
    pub targets: u8,
    pub time_budget_secs: u32,
    pub multiplier: f32,
}

impl TierConfig {
    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Cells occupied by a freshly generated board, the single source
    /// included.
    pub const fn element_count(&self) -> CellCount {
        1 + self.mirrors as CellCount
            + self.prisms as CellCount
            + self.obstacles as CellCount
            + self.targets as CellCount
    }
}

/// The playing field: a fixed-size grid of typed cells.
///
/// Construction goes through [`Board::place`] or [`Board::from_cells`];
/// gameplay mutation goes through [`Board::move_element`] and
/// [`Board::rotate_element`], which refuse anything the rules forbid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    pub fn empty(size: Coord2) -> Board {
        Board {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    /// Builds a board from a flat cell vector in grid-scan order, checking
    /// the declared shape.
    pub fn from_cells(size: Coord2, cells: Vec<Cell>) -> Result<Board> {
        let cells = Array2::from_shape_vec(size.to_nd_index(), cells)
            .map_err(|_| PuzzleError::InvalidBoardShape)?;
        Ok(Board { cells })
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cells.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len().try_into().unwrap()
    }

    pub fn in_bounds(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size.0 && coords.1 < size.1
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.in_bounds(coords) {
            Ok(coords)
        } else {
            Err(PuzzleError::InvalidCoords)
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    /// Puts an element on an empty in-range cell. Board construction only;
    /// player actions go through the move and rotate operations.
    pub fn place(&mut self, coords: Coord2, cell: Cell) -> Result<()> {
        let coords = self.validate_coords(coords)?;
        if !self[coords].is_empty() {
            return Err(PuzzleError::CellOccupied);
        }
        self.cells[coords.to_nd_index()] = cell;
        Ok(())
    }

    /// Relocates a movable element onto an empty cell, returning whether the
    /// board changed. Out-of-range coordinates, fixed elements, and occupied
    /// destinations are rejected without touching the board.
    pub fn move_element(&mut self, from: Coord2, to: Coord2) -> bool {
        if !self.in_bounds(from) || !self.in_bounds(to) {
            return false;
        }
        // also rejects from == to
        if !self[to].is_empty() {
            return false;
        }
        let cell = self[from];
        if !cell.is_movable() {
            return false;
        }
        self.cells[from.to_nd_index()] = Cell::Empty;
        self.cells[to.to_nd_index()] = cell;
        true
    }

    /// Rotates a rotatable element by a signed number of degrees, returning
    /// whether the board changed.
    pub fn rotate_element(&mut self, coords: Coord2, delta_deg: i16) -> bool {
        if !self.in_bounds(coords) {
            return false;
        }
        match &mut self.cells[coords.to_nd_index()] {
            Cell::Mirror {
                angle_deg,
                rotatable: true,
                ..
            }
            | Cell::Prism {
                angle_deg,
                rotatable: true,
                ..
            } => {
                *angle_deg = rotate_angle(*angle_deg, delta_deg);
                true
            }
            _ => false,
        }
    }

    /// Iterates every cell with its coordinates in grid-scan order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> {
        self.cells.indexed_iter().map(|((x, y), cell)| {
            let coords = (x.try_into().unwrap(), y.try_into().unwrap());
            (coords, *cell)
        })
    }

    /// Iterates all light sources in grid-scan order.
    pub fn iter_sources(&self) -> impl Iterator<Item = (Coord2, Direction, LightColor)> {
        self.cells
            .indexed_iter()
            .filter_map(|((x, y), cell)| match *cell {
                Cell::Source { direction, color } => {
                    let coords = (x.try_into().unwrap(), y.try_into().unwrap());
                    Some((coords, direction, color))
                }
                _ => None,
            })
    }

    pub fn element_counts(&self) -> ElementCounts {
        let mut counts = ElementCounts::default();
        for cell in self.cells.iter() {
            match cell {
                Cell::Empty => {}
                Cell::Mirror { .. } => counts.mirrors += 1,
                Cell::Prism { .. } => counts.prisms += 1,
                Cell::Source { .. } => counts.sources += 1,
                Cell::Target => counts.targets += 1,
                Cell::Obstacle => counts.obstacles += 1,
            }
        }
        counts
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.cells[(x as usize, y as usize)]
    }
}

/// Per-kind element tallies of a board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementCounts {
    pub sources: CellCount,
    pub targets: CellCount,
    pub mirrors: CellCount,
    pub prisms: CellCount,
    pub obstacles: CellCount,
}

/// One goal requirement: some beam must end on `position` carrying `color`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSpot {
    pub position: Coord2,
    pub color: LightColor,
}

/// The win condition of a puzzle. Every spot must be matched simultaneously
/// by the current set of traced paths.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    spots: SmallVec<[GoalSpot; 2]>,
}

impl Goal {
    pub fn new(spots: impl IntoIterator<Item = GoalSpot>) -> Goal {
        Goal {
            spots: spots.into_iter().collect(),
        }
    }

    pub fn spots(&self) -> &[GoalSpot] {
        &self.spots
    }

    pub fn is_satisfied(&self, paths: &[LightPath]) -> bool {
        self.spots.iter().all(|spot| {
            paths
                .iter()
                .any(|path| path.terminal() == spot.position && path.color() == spot.color)
        })
    }
}

/// A generated or hand-built starting position: the board plus its goal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleLayout {
    pub board: Board,
    pub goal: Goal,
}

impl PuzzleLayout {
    /// Structural checks for hand-built layouts: at least one source, a
    /// non-empty goal, and a target under every goal spot.
    pub fn validate(&self) -> Result<()> {
        if self.board.iter_sources().next().is_none() {
            return Err(PuzzleError::MissingSource);
        }
        if self.goal.spots().is_empty() {
            return Err(PuzzleError::GoalMismatch);
        }
        for spot in self.goal.spots() {
            let coords = self.board.validate_coords(spot.position)?;
            if self.board[coords] != Cell::Target {
                return Err(PuzzleError::GoalMismatch);
            }
        }
        Ok(())
    }
}

/// Outcome of a play operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The operation was rejected or was a no-op; nothing changed.
    NoChange,
    /// The board changed but the goal is still unmet.
    Applied,
    /// The board changed and the goal is now met; the puzzle is finished.
    Completed,
}

impl MoveOutcome {
    /// Whether this outcome could have caused an update to the puzzle
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Applied => true,
            Self::Completed => true,
        }
    }
}
