//! Reduces a captured pointer path to a collapsed direction code.
//!
//! The recognizer is a pure function of its inputs: settings are read once per
//! call and nothing is retained between strokes.

use super::code::{Direction, GestureCode, MAX_GESTURE_SEGMENTS};
use super::geometry::{angle, distance, snap_to_direction, Point};
use crate::settings::RecognitionSettings;

/// Absolute floor applied after resampling so near-duplicate samples never
/// contribute a direction, whatever `min_segment_length_px` is set to.
pub const MIN_GESTURE_DISTANCE: f64 = 10.0;

/// Recognizes `path`, returning an empty code when no gesture can be derived.
pub fn recognize(path: &[Point], settings: &RecognitionSettings) -> GestureCode {
    if path.len() < 2 {
        return GestureCode::empty();
    }

    let resampled = dedupe(&resample(path, settings.min_segment_length_px));
    if resampled.len() < 2 {
        return GestureCode::empty();
    }

    let directions = extract_directions(&resampled);
    GestureCode::from_directions(&collapse(&directions, MAX_GESTURE_SEGMENTS))
}

/// Keeps a point only once it is at least `min_segment` away from the last
/// kept point. The origin is always kept.
pub fn resample(path: &[Point], min_segment: f64) -> Vec<Point> {
    let mut iter = path.iter().copied();
    let Some(first) = iter.next() else {
        return Vec::new();
    };
    let mut kept = vec![first];
    let mut last = first;
    for point in iter {
        if distance(last, point) >= min_segment {
            kept.push(point);
            last = point;
        }
    }
    kept
}

pub fn dedupe(path: &[Point]) -> Vec<Point> {
    let mut filtered: Vec<Point> = Vec::with_capacity(path.len());
    for &point in path {
        match filtered.last() {
            Some(&last) if distance(last, point) < MIN_GESTURE_DISTANCE => {}
            _ => filtered.push(point),
        }
    }
    filtered
}

pub fn extract_directions(path: &[Point]) -> Vec<Direction> {
    path.windows(2)
        .map(|pair| snap_to_direction(angle(pair[0], pair[1])))
        .collect()
}

/// Merges runs of equal directions and truncates to `max_segments`.
pub fn collapse(directions: &[Direction], max_segments: usize) -> Vec<Direction> {
    let mut collapsed: Vec<Direction> = Vec::new();
    for &dir in directions {
        if collapsed.last() != Some(&dir) {
            collapsed.push(dir);
        }
    }
    collapsed.truncate(max_segments);
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Point::new(x, y, i as u64 * 10))
            .collect()
    }

    #[test]
    fn resample_skips_points_inside_segment_length() {
        let path = pts(&[(0.0, 0.0), (5.0, 0.0), (19.0, 0.0), (20.0, 0.0), (30.0, 0.0)]);
        let kept = resample(&path, 20.0);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].x, 20.0);
    }

    #[test]
    fn dedupe_uses_fixed_floor() {
        let path = pts(&[(0.0, 0.0), (4.0, 0.0), (12.0, 0.0)]);
        let kept = dedupe(&path);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[1].x, 12.0);
    }

    #[test]
    fn collapse_merges_runs_and_truncates() {
        use Direction::*;
        let dirs = [Right, Right, Down, Down, Left, Up, Up];
        assert_eq!(collapse(&dirs, 8), vec![Right, Down, Left, Up]);
        assert_eq!(collapse(&dirs, 2), vec![Right, Down]);
        assert!(collapse(&[], 8).is_empty());
    }
}
