//! Polyline sampling helpers used by the world crate.

use glam::Vec2;
use relay_defence_core::Point;

/// Locates the point at fractional `progress` along a polyline.
///
/// The walk accumulates segment lengths and interpolates within the segment
/// containing the requested distance. Degenerate zero-length segments are
/// skipped. A single-point polyline returns that point for any progress
/// value; an empty polyline returns the origin so callers never observe an
/// invalid position.
#[must_use]
pub fn sample_point_on_polyline(points: &[Point], progress: f32) -> Point {
    let Some(first) = points.first() else {
        return Point::default();
    };

    if points.len() == 1 {
        return *first;
    }

    let total = polyline_length(points);
    if total <= f32::EPSILON {
        return *first;
    }

    let clamped = progress.clamp(0.0, 1.0);
    let mut remaining = total * clamped;

    for pair in points.windows(2) {
        let from = to_vec2(pair[0]);
        let to = to_vec2(pair[1]);
        let segment = from.distance(to);

        if segment <= f32::EPSILON {
            continue;
        }

        if remaining <= segment {
            let position = from.lerp(to, remaining / segment);
            return Point::new(position.x, position.y);
        }

        remaining -= segment;
    }

    points[points.len() - 1]
}

/// Total length of the polyline in world units.
#[must_use]
pub fn polyline_length(points: &[Point]) -> f32 {
    points
        .windows(2)
        .map(|pair| to_vec2(pair[0]).distance(to_vec2(pair[1])))
        .sum()
}

fn to_vec2(point: Point) -> Vec2 {
    Vec2::new(point.x, point.y)
}
