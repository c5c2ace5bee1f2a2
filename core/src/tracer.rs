use crate::*;

/// Hard cap on cell advances per traced beam. Reflections can form closed
/// loops, so the walk is cut off rather than trusted to exit the board.
pub const MAX_TRACE_STEPS: usize = 100;

/// One traced beam: every cell it visited in order, including the source
/// cell and the terminating cell, plus its color on arrival.
///
/// Paths are derived data. They are recomputed from the board after every
/// mutation and never stored across moves or persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LightPath {
    points: Vec<Coord2>,
    color: LightColor,
}

impl LightPath {
    pub fn points(&self) -> &[Coord2] {
        &self.points
    }

    pub fn color(&self) -> LightColor {
        self.color
    }

    /// The cell where the beam stopped, left the board, or was cut off.
    pub fn terminal(&self) -> Coord2 {
        *self
            .points
            .last()
            .expect("a traced path always contains its source")
    }
}

/// Traces one beam per source, in grid-scan order of the source cells.
pub fn trace_board(board: &Board) -> Vec<LightPath> {
    board
        .iter_sources()
        .map(|(pos, direction, color)| trace_ray(board, pos, direction, color))
        .collect()
}

/// Walks a single beam across the board.
///
/// The beam advances one cell at a time. Mirrors bend it, prisms turn and
/// color it, obstacles and targets absorb it (the absorbing cell is kept in
/// the path), and source cells are transparent to beams passing through.
pub fn trace_ray(board: &Board, start: Coord2, direction: Direction, color: LightColor) -> LightPath {
    let bounds = board.size();
    let mut points = vec![start];
    let mut pos = start;
    let mut direction = direction;
    let mut color = color;

    for _ in 0..MAX_TRACE_STEPS {
        let Some(next) = direction.step(pos, bounds) else {
            break;
        };
        points.push(next);
        pos = next;

        match board[next] {
            Cell::Empty | Cell::Source { .. } => {}
            Cell::Obstacle | Cell::Target => break,
            Cell::Mirror { angle_deg, .. } => {
                let out = reflect(direction, angle_deg);
                log::trace!("Mirror at {:?} bends beam {:?} -> {:?}", next, direction, out);
                direction = out;
            }
            Cell::Prism { angle_deg, .. } => {
                let (out_dir, out_color) = refract(direction, angle_deg, color);
                log::trace!(
                    "Prism at {:?} turns beam {:?} -> {:?}, {:?} -> {:?}",
                    next,
                    direction,
                    out_dir,
                    color,
                    out_color
                );
                direction = out_dir;
                color = out_color;
            }
        }
    }

    LightPath { points, color }
}
