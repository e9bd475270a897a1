use serde::{Deserialize, Serialize};

use super::code::Direction;

/// A single pointer sample in viewport coordinates.
///
/// `timestamp` is a monotonic millisecond reading taken when the sample was
/// captured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub timestamp: u64,
}

impl Point {
    pub fn new(x: f64, y: f64, timestamp: u64) -> Self {
        Self { x, y, timestamp }
    }
}

impl From<(f64, f64)> for Point {
    fn from(value: (f64, f64)) -> Self {
        Self {
            x: value.0,
            y: value.1,
            timestamp: 0,
        }
    }
}

pub fn distance(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Angle in degrees from `a` to `b`, atan2 convention with the Y axis
/// pointing down the screen. Result lies in (-180, 180].
pub fn angle(a: Point, b: Point) -> f64 {
    (b.y - a.y).atan2(b.x - a.x).to_degrees()
}

/// Folds any angle into [0, 360).
pub fn normalize_angle(angle: f64) -> f64 {
    let normalized = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Quantizes an angle to one of the four compass directions.
///
/// Sectors are 90° wide and centred on right (0°), down (90°), left (180°)
/// and up (270°). Lower bounds are inclusive: 45° is down, 135° is left,
/// 225° is up and 315° is right.
pub fn snap_to_direction(angle: f64) -> Direction {
    let normalized = normalize_angle(angle);
    if !(45.0..315.0).contains(&normalized) {
        Direction::Right
    } else if normalized < 135.0 {
        Direction::Down
    } else if normalized < 225.0 {
        Direction::Left
    } else {
        Direction::Up
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_wraps_negative_angles() {
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(360.0), 0.0);
        assert_eq!(normalize_angle(725.0), 5.0);
    }

    #[test]
    fn screen_down_is_positive_angle() {
        let origin = Point::new(0.0, 0.0, 0);
        assert_eq!(angle(origin, Point::new(0.0, 10.0, 0)), 90.0);
        assert_eq!(angle(origin, Point::new(-10.0, 0.0, 0)), 180.0);
    }

    #[test]
    fn boundaries_resolve_to_lower_inclusive_sector() {
        assert_eq!(snap_to_direction(45.0), Direction::Down);
        assert_eq!(snap_to_direction(135.0), Direction::Left);
        assert_eq!(snap_to_direction(225.0), Direction::Up);
        assert_eq!(snap_to_direction(315.0), Direction::Right);
        assert_eq!(snap_to_direction(-45.0), Direction::Right);
        assert_eq!(snap_to_direction(44.999), Direction::Right);
    }

    #[test]
    fn every_whole_degree_maps_to_a_direction() {
        for deg in 0..360 {
            let dir = snap_to_direction(deg as f64);
            let expected = match deg {
                45..=134 => Direction::Down,
                135..=224 => Direction::Left,
                225..=314 => Direction::Up,
                _ => Direction::Right,
            };
            assert_eq!(dir, expected, "angle {deg}");
        }
    }
}
