use serde::{Deserialize, Serialize};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for element counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Applies a signed rotation to an element angle, wrapping into `0..360`.
pub fn rotate_angle(angle_deg: u16, delta: i16) -> u16 {
    (i32::from(angle_deg) + i32::from(delta)).rem_euclid(360) as u16
}

/// Cardinal travel direction of a beam, measured counterclockwise from the
/// positive x axis: `Right` is 0°, `Up` is 90°, `Left` is 180°, `Down` is 270°.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Up,
    Left,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Right, Self::Up, Self::Left, Self::Down];

    pub const fn degrees(self) -> u16 {
        match self {
            Self::Right => 0,
            Self::Up => 90,
            Self::Left => 180,
            Self::Down => 270,
        }
    }

    pub const fn from_degrees(angle_deg: u16) -> Option<Direction> {
        match angle_deg % 360 {
            0 => Some(Self::Right),
            90 => Some(Self::Up),
            180 => Some(Self::Left),
            270 => Some(Self::Down),
            _ => None,
        }
    }

    /// The direction a quarter turn counterclockwise from this one.
    pub const fn rotated_90(self) -> Direction {
        match self {
            Self::Right => Self::Up,
            Self::Up => Self::Left,
            Self::Left => Self::Down,
            Self::Down => Self::Right,
        }
    }

    /// Advances one cell in this direction, returning a value only when it
    /// remains in bounds.
    pub fn step(self, from: Coord2, bounds: Coord2) -> Option<Coord2> {
        let (dx, dy): (i8, i8) = match self {
            Self::Right => (1, 0),
            Self::Up => (0, 1),
            Self::Left => (-1, 0),
            Self::Down => (0, -1),
        };
        let (x, y) = from;
        let (max_x, max_y) = bounds;

        let next_x = x.checked_add_signed(dx)?;
        if next_x >= max_x {
            return None;
        }

        let next_y = y.checked_add_signed(dy)?;
        if next_y >= max_y {
            return None;
        }

        Some((next_x, next_y))
    }
}
