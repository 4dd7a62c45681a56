//! Piecewise-linear polyline primitives used by the rail-side check.
//!
//! Coordinates are image coordinates: `y` grows downwards, so the greatest
//! `y` is the point closest to the camera.

use crate::scene::{Point2d, Polyline2d};

/// First pair of consecutive points whose y-span contains `y` (inclusive).
fn segment_at_y(y: f64, line: &Polyline2d) -> Option<(Point2d, Point2d)> {
    line.points.windows(2).find_map(|pair| {
        let (p1, p2) = (pair[0], pair[1]);
        let inside = (p1.y >= y && y >= p2.y) || (p1.y <= y && y <= p2.y);
        inside.then_some((p1, p2))
    })
}

/// Whether the polyline passes through height `y`.
pub fn y_in_polyline(y: f64, line: &Polyline2d) -> bool {
    segment_at_y(y, line).is_some()
}

pub fn max_y(line: &Polyline2d) -> Option<f64> {
    line.points.iter().map(|p| p.y).reduce(f64::max)
}

/// Greatest y reached by both polylines, or `None` when their y-ranges do
/// not overlap or either line is empty.
pub fn max_common_y(first: &Polyline2d, second: &Polyline2d) -> Option<f64> {
    let max_first = max_y(first)?;
    let max_second = max_y(second)?;

    if y_in_polyline(max_first, second) {
        return Some(max_first);
    }
    if y_in_polyline(max_second, first) {
        return Some(max_second);
    }
    None
}

/// The x at which the polyline passes through `y`, interpolated on the first
/// segment spanning `y`. `None` means the line does not reach that height.
pub fn x_at_y(y: f64, line: &Polyline2d) -> Option<f64> {
    let (p1, p2) = segment_at_y(y, line)?;

    if p1.x == p2.x {
        return Some(p1.x);
    }

    let slope = (p2.y - p1.y) / (p2.x - p1.x);
    if slope == 0.0 {
        // Horizontal segment: p1.y == p2.y == y.
        return Some(p1.x);
    }
    let intercept = p1.y - slope * p1.x;
    Some((y - intercept) / slope)
}

/// Every distinct y coordinate of both lines, ascending.
fn sorted_ys(first: &Polyline2d, second: &Polyline2d) -> Vec<f64> {
    let mut ys: Vec<f64> = first
        .points
        .iter()
        .chain(&second.points)
        .map(|p| p.y)
        .collect();
    ys.sort_by(f64::total_cmp);
    ys.dedup();
    ys
}

/// Scans the union of both lines' y coordinates and returns the y interval
/// in which `left` and `right` swap order, or the single y at which they
/// touch. Heights one of the lines does not reach reset the scan.
pub fn intersection_interval(left: &Polyline2d, right: &Polyline2d) -> Option<(f64, f64)> {
    let mut order: Option<bool> = None;
    let mut last_y: Option<f64> = None;

    for y in sorted_ys(left, right) {
        let (Some(x_left), Some(x_right)) = (x_at_y(y, left), x_at_y(y, right)) else {
            order = None;
            continue;
        };

        if x_left == x_right {
            return Some((y, y));
        }

        let left_first = x_left < x_right;
        if let (Some(previous), Some(previous_y)) = (order, last_y)
            && previous != left_first
        {
            return Some((previous_y, y));
        }

        order = Some(left_first);
        last_y = Some(y);
    }

    None
}
