//! Left/right rail consistency of track polylines.
//!
//! Per camera and frame, every track may have at most one `leftRail` and one
//! `rightRail` 2D polyline, and the left rail must stay left of the right
//! rail without crossing it.

use crate::enums::{RailSide, SensorType};
use crate::geometry::{intersection_interval, max_common_y, x_at_y};
use crate::issue::{Issue, IssueIdentifiers, IssueKind};
use crate::scene::{Frame, Polyline2d, Scene};
use std::collections::BTreeMap;
use tracing::trace;

pub const TRACK_OBJECT_TYPE: &str = "track";

/// Left and right rail counts per track object id.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RailCount {
    pub left: usize,
    pub right: usize,
}

struct Rail<'a> {
    object_id: &'a str,
    side: RailSide,
    line: &'a Polyline2d,
}

/// Validates every track observed by every camera sensor. Each sensor is
/// checked independently.
pub fn validate_rail_side(scene: &Scene) -> Vec<Issue> {
    let mut issues = Vec::new();

    let cameras = scene
        .sensors
        .iter()
        .filter(|(_, sensor)| sensor.sensor_type == SensorType::Camera)
        .map(|(id, _)| id.as_str());

    for camera in cameras {
        for (frame_id, frame) in &scene.frames {
            let rails = track_rails(scene, frame, camera);
            issues.extend(check_frame(camera, *frame_id, &rails));
        }
    }

    issues
}

/// Counts rails per track among the track polylines of one camera in one frame.
pub fn count_rails_per_track(scene: &Scene, frame: &Frame, camera: &str) -> BTreeMap<String, RailCount> {
    count(&track_rails(scene, frame, camera))
        .into_iter()
        .map(|(id, count)| (id.to_string(), count))
        .collect()
}

/// Track 2D polylines of `camera` carrying a recognised `railSide` value.
/// Other values are left to the ontology check.
fn track_rails<'a>(scene: &'a Scene, frame: &'a Frame, camera: &str) -> Vec<Rail<'a>> {
    frame
        .annotations
        .values()
        .filter(|a| a.sensor_id.as_deref() == Some(camera))
        .filter(|a| scene.object_type(&a.object_id) == Some(TRACK_OBJECT_TYPE))
        .filter_map(|a| {
            let line = a.polyline_2d()?;
            let side = a
                .attributes
                .get(RailSide::ATTRIBUTE)
                .and_then(|v| v.as_str())
                .and_then(RailSide::from_value)?;
            Some(Rail {
                object_id: a.object_id.as_str(),
                side,
                line,
            })
        })
        .collect()
}

fn count<'a>(rails: &[Rail<'a>]) -> BTreeMap<&'a str, RailCount> {
    let mut counts: BTreeMap<&str, RailCount> = BTreeMap::new();
    for rail in rails {
        let entry = counts.entry(rail.object_id).or_default();
        match rail.side {
            RailSide::Left => entry.left += 1,
            RailSide::Right => entry.right += 1,
        }
    }
    counts
}

fn check_frame(camera: &str, frame_id: u64, rails: &[Rail<'_>]) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (object_id, counts) in count(rails) {
        let identifiers = IssueIdentifiers::new()
            .frame(frame_id)
            .object(object_id)
            .object_type(TRACK_OBJECT_TYPE)
            .sensor(camera);
        trace!(camera, frame_id, object_id, left = counts.left, right = counts.right, "rail_counts");

        if counts.left > 1 || counts.right > 1 {
            for (side, n) in [(RailSide::Left, counts.left), (RailSide::Right, counts.right)] {
                if n > 1 {
                    issues.push(
                        Issue::new(IssueKind::RailSide, identifiers.clone()).with_reason(format!(
                            "The track has more than one ({}) {} rail.",
                            n,
                            side.as_str()
                        )),
                    );
                }
            }
            continue;
        }

        let left = find_rail(rails, object_id, RailSide::Left);
        let right = find_rail(rails, object_id, RailSide::Right);
        if let (Some(left), Some(right)) = (left, right)
            && let Some(reason) = check_rails_for_swap(left, right)
        {
            issues.push(Issue::new(IssueKind::RailSide, identifiers).with_reason(reason));
        }
    }

    issues
}

fn find_rail<'a>(rails: &[Rail<'a>], object_id: &str, side: RailSide) -> Option<&'a Polyline2d> {
    rails
        .iter()
        .find(|r| r.object_id == object_id && r.side == side)
        .map(|r| r.line)
}

/// Describes why a left/right rail pair is inconsistent, if it is.
pub fn check_rails_for_swap(left: &Polyline2d, right: &Polyline2d) -> Option<String> {
    let y = max_common_y(left, right)?;
    let x_left = x_at_y(y, left)?;
    let x_right = x_at_y(y, right)?;
    trace!(y, x_left, x_right, "rail_max_common_y");

    if x_left >= x_right {
        return Some(format!(
            "The track has its rails swapped. At the maximum common y={}, the left rail has x={} while the right rail has x={}.",
            y, x_left, x_right
        ));
    }

    intersection_interval(left, right).map(|(from, to)| {
        format!(
            "The track intersects with itself. The left and right rail intersect in y interval ({}, {}).",
            from, to
        )
    })
}
