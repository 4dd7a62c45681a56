#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use raillabel_validator::geometry::intersection_interval;
use raillabel_validator::rail_side::check_rails_for_swap;
use raillabel_validator::scene::Polyline2d;

#[derive(Debug, Arbitrary)]
struct Rails {
    left: Vec<(f64, f64)>,
    right: Vec<(f64, f64)>,
}

fuzz_target!(|rails: Rails| {
    let left = Polyline2d::new(rails.left);
    let right = Polyline2d::new(rails.right);

    // NaN and infinite coordinates must not panic either.
    let _ = check_rails_for_swap(&left, &right);

    if let Some((from, to)) = intersection_interval(&left, &right) {
        assert!(from <= to, "interval ({}, {}) is reversed", from, to);
    }
});
