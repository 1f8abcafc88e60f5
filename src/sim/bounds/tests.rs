use bevy::math::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::*;

const T: f32 = 0.05;
const P: f32 = 0.1;

fn wrapper() -> BoundsWrapper {
    BoundsWrapper::new(Viewport::centered(Vec2::new(1280.0, 720.0)), T, P)
}

fn aspect() -> f32 {
    1280.0 / 720.0
}

/// Viewport-space point inside the safe zone on both axes (with margin).
fn safe_vp(rng: &mut StdRng) -> Vec2 {
    let a = aspect();
    Vec2::new(
        rng.gen_range(T / a + 0.01..1.0 - T / a - 0.01),
        rng.gen_range(T + 0.01..1.0 - T - 0.01),
    )
}

fn in_safe_zone(vp: Vec2) -> bool {
    let a = aspect();
    vp.x >= T / a && vp.x <= 1.0 - T / a && vp.y >= T && vp.y <= 1.0 - T
}

#[test]
fn viewport_round_trip() {
    let vp = Viewport::new(Vec2::new(50.0, -20.0), Vec2::new(800.0, 600.0));
    let world = Vec2::new(123.0, -77.0);
    let back = vp.viewport_to_world(vp.world_to_viewport(world));
    assert!((back - world).length() < 1e-3);

    assert_eq!(vp.world_to_viewport(vp.center), Vec2::splat(0.5));
}

#[test]
fn safe_zone_positions_are_untouched() {
    let w = wrapper();
    let mut rng = StdRng::seed_from_u64(0xB0B);

    for _ in 0..5_000 {
        let world = w.viewport().viewport_to_world(safe_vp(&mut rng));
        assert_eq!(w.wrap_position(world), world);
    }
}

#[test]
fn crossing_right_edge_lands_on_left_side() {
    let w = wrapper();
    let a = aspect();
    let mut rng = StdRng::seed_from_u64(1);

    for _ in 0..1_000 {
        let x = rng.gen_range(1.0 - T / a + 1e-4..=1.0);
        let y = rng.gen_range(0.2..0.8);
        let world = w.viewport().viewport_to_world(Vec2::new(x, y));

        let wrapped = w.wrap_position(world);
        let vp = w.viewport().world_to_viewport(wrapped);

        assert!(vp.x < 0.5, "expected left half, got {vp:?}");
        assert!(in_safe_zone(vp), "wrapped into a wrap zone: {vp:?}");
        assert!((vp.y - y).abs() < 1e-4, "vertical axis must be untouched");
        // Lands in the safe zone, so a second wrap is a no-op.
        assert_eq!(w.wrap_position(wrapped), wrapped);
    }
}

#[test]
fn crossing_left_edge_lands_on_right_side() {
    let w = wrapper();
    let a = aspect();
    let mut rng = StdRng::seed_from_u64(2);

    for _ in 0..1_000 {
        let x = rng.gen_range(0.0..T / a - 1e-4);
        let world = w.viewport().viewport_to_world(Vec2::new(x, 0.5));

        let wrapped = w.wrap_position(world);
        let vp = w.viewport().world_to_viewport(wrapped);

        assert!(vp.x > 0.5);
        assert!(in_safe_zone(vp));
        assert_eq!(w.wrap_position(wrapped), wrapped);
    }
}

#[test]
fn crossing_top_and_bottom_edges() {
    let w = wrapper();
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..1_000 {
        let top = rng.gen_range(1.0 - T + 1e-4..=1.0);
        let bottom = rng.gen_range(0.0..T - 1e-4);

        let from_top = w
            .viewport()
            .world_to_viewport(w.wrap_position(w.viewport().viewport_to_world(Vec2::new(0.5, top))));
        let from_bottom = w.viewport().world_to_viewport(
            w.wrap_position(w.viewport().viewport_to_world(Vec2::new(0.5, bottom))),
        );

        assert!(from_top.y < 0.5 && in_safe_zone(from_top), "{from_top:?}");
        assert!(from_bottom.y > 0.5 && in_safe_zone(from_bottom), "{from_bottom:?}");
        assert!((from_top.y - (1.0 - top + P)).abs() < 1e-4);
        assert!((from_bottom.y - (1.0 - bottom - P)).abs() < 1e-4);
    }
}

#[test]
fn corner_wraps_both_axes() {
    let w = wrapper();
    let corner = w.viewport().viewport_to_world(Vec2::new(0.999, 0.999));
    let vp = w.viewport().world_to_viewport(w.wrap_position(corner));
    assert!(vp.x < 0.5 && vp.y < 0.5);
    assert!(in_safe_zone(vp));
}

#[test]
fn random_positions_stay_inside_inset_rectangle() {
    let w = wrapper();
    let mut rng = StdRng::seed_from_u64(0xFEED);
    let (lo, hi) = w.inset_corners();

    for _ in 0..20_000 {
        let p = w.random_position_in_bounds(&mut rng);
        assert!(p.x >= lo.x && p.x <= hi.x);
        assert!(p.y >= lo.y && p.y <= hi.y);

        let vp = w.viewport().world_to_viewport(p);
        assert!(in_safe_zone(vp), "{vp:?}");
        // Spawned entities never start inside a wrap zone.
        assert_eq!(w.wrap_position(p), p);
    }
}

#[test]
fn zero_thresholds_leave_edge_points_alone() {
    let w = BoundsWrapper::new(Viewport::centered(Vec2::new(1280.0, 720.0)), 0.0, 0.0);
    let edge = w.viewport().viewport_to_world(Vec2::new(0.0, 0.5));
    assert_eq!(w.wrap_position(edge), edge);

    let top_edge = w.viewport().viewport_to_world(Vec2::new(0.5, 1.0));
    assert_eq!(w.wrap_position(top_edge), top_edge);
}

#[test]
fn zero_threshold_with_teleport_still_jumps_past_the_edge() {
    let w = BoundsWrapper::new(Viewport::centered(Vec2::new(1280.0, 720.0)), 0.0, 0.1);

    // Exactly on the edge is not "below" the threshold.
    let edge = w.viewport().viewport_to_world(Vec2::new(0.5, 0.0));
    assert_eq!(w.wrap_position(edge), edge);

    // Just past it jumps to the far side, pulled in by the teleport offset.
    let past = w.viewport().viewport_to_world(Vec2::new(0.5, -0.01));
    let vp = w.viewport().world_to_viewport(w.wrap_position(past));
    assert!((vp.y - (1.0 + 0.01 - 0.1)).abs() < 1e-4, "{vp:?}");
}
