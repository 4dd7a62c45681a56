use crate::common::line;
use proptest::prelude::*;
use raillabel_validator::geometry::{intersection_interval, max_common_y, max_y, x_at_y};
use raillabel_validator::rail_side::check_rails_for_swap;
use raillabel_validator::scene::Polyline2d;

/// Polylines of 2 to 8 points on an integer grid.
fn arb_points() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-100i32..=100, 0i32..=100), 2..8).prop_map(|points| {
        points
            .into_iter()
            .map(|(x, y)| (f64::from(x), f64::from(y)))
            .collect()
    })
}

fn shifted(points: &[(f64, f64)], dx: f64) -> Polyline2d {
    line(
        &points
            .iter()
            .map(|&(x, y)| (x + dx, y))
            .collect::<Vec<_>>(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn every_vertex_height_has_an_x(points in arb_points()) {
        let l = line(&points);
        for &(_, y) in &points {
            prop_assert!(x_at_y(y, &l).is_some(), "no x at y={} for {:?}", y, points);
        }
    }

    #[test]
    fn line_shares_its_own_top(points in arb_points()) {
        let l = line(&points);
        prop_assert_eq!(max_common_y(&l, &l), max_y(&l));
    }

    #[test]
    fn parallel_copy_never_intersects(points in arb_points(), dx in 1i32..50) {
        let left = line(&points);
        let right = shifted(&points, f64::from(dx));
        prop_assert_eq!(intersection_interval(&left, &right), None);
        prop_assert_eq!(check_rails_for_swap(&left, &right), None);
    }

    #[test]
    fn mirrored_parallel_copy_is_swapped(points in arb_points(), dx in 1i32..50) {
        let left = shifted(&points, f64::from(dx));
        let right = line(&points);
        let reason = check_rails_for_swap(&left, &right);
        prop_assert!(
            reason.as_deref().is_some_and(|r| r.starts_with("The track has its rails swapped.")),
            "unexpected result {:?}",
            reason
        );
    }
}
