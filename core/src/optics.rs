//! Pure interaction rules between a traveling beam and a single element.

use crate::{Direction, LightColor};

/// Reflects a beam off a mirror with the given orientation.
///
/// The 45°/225° class swaps `Right`↔`Up` and `Left`↔`Down`; the 135°/315°
/// class swaps `Right`↔`Down` and `Left`↔`Up`. Any other orientation is not a
/// reflecting surface for an axis-aligned beam and leaves the direction
/// unchanged.
pub const fn reflect(direction: Direction, mirror_angle_deg: u16) -> Direction {
    use Direction::*;

    match mirror_angle_deg % 360 {
        45 | 225 => match direction {
            Right => Up,
            Up => Right,
            Left => Down,
            Down => Left,
        },
        135 | 315 => match direction {
            Right => Down,
            Down => Right,
            Left => Up,
            Up => Left,
        },
        _ => direction,
    }
}

/// Refracts a beam through a prism: the beam always turns a quarter turn
/// counterclockwise, and a white beam leaves as the prism's split color.
/// Already-colored beams keep their color.
pub const fn refract(
    direction: Direction,
    prism_angle_deg: u16,
    color: LightColor,
) -> (Direction, LightColor) {
    let out_color = match color {
        LightColor::White => split_color(prism_angle_deg),
        colored => colored,
    };
    (direction.rotated_90(), out_color)
}

/// The color a white beam takes when passing through a prism at the given
/// orientation. Purely a function of the orientation, so replaying the same
/// board always splits the same way.
pub const fn split_color(prism_angle_deg: u16) -> LightColor {
    match (prism_angle_deg % 360) / 90 % 3 {
        0 => LightColor::Red,
        1 => LightColor::Green,
        _ => LightColor::Blue,
    }
}
