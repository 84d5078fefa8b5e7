// Host-side tests for the control surface and the gallery.

use field_core::{
    Camera, CameraRotationControl, ControlSurface, FieldError, Gallery, GestureBundle, HitZone,
    SurfaceState,
};
use glam::{Vec2, Vec3, Vec4};

#[derive(Default)]
struct Switch {
    enabled: bool,
    writes: u32,
}

impl CameraRotationControl for Switch {
    fn set_rotation_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.writes += 1;
    }
}

fn at(uv: Vec2, pinching: bool) -> GestureBundle {
    GestureBundle {
        position: uv,
        is_pinching: pinching,
        pinch_distance: if pinching { 0.0 } else { 1.0 },
        ..GestureBundle::NEUTRAL
    }
}

/// Screen position of a world point for `camera`.
fn project(camera: &Camera, p: Vec3) -> Vec2 {
    let clip = camera.projection_matrix() * camera.view_matrix() * Vec4::new(p.x, p.y, p.z, 1.0);
    let ndc = clip.truncate() / clip.w;
    Vec2::new((ndc.x + 1.0) * 0.5, (1.0 - ndc.y) * 0.5)
}

fn surface() -> ControlSurface {
    let zones = vec![
        HitZone::new("left", Vec2::new(-0.6, 0.0), 0.2).unwrap(),
        HitZone::new("centre", Vec2::ZERO, 0.2).unwrap(),
    ];
    ControlSurface::new(zones, Vec3::ZERO)
}

#[test]
fn zone_radius_must_be_positive() {
    assert!(matches!(
        HitZone::new("x", Vec2::ZERO, 0.0),
        Err(FieldError::InvalidZoneRadius { .. })
    ));
    assert!(HitZone::new("x", Vec2::ZERO, f32::NAN).is_err());
    let z = HitZone::new("x", Vec2::new(1.0, 0.0), 0.5).unwrap();
    assert!(z.contains(Vec2::new(1.4, 0.0)));
    assert!(!z.contains(Vec2::new(1.6, 0.0)));
}

#[test]
fn screen_centre_hits_the_origin_plane() {
    let camera = Camera::default();
    let hit = camera.cursor_on_plane(Vec2::new(0.5, 0.5), 0.0).unwrap();
    assert!(hit.length() < 1e-4, "{hit}");
    let p = Vec3::new(0.7, -0.4, 0.0);
    let back = camera.cursor_on_plane(project(&camera, p), 0.0).unwrap();
    assert!(back.distance(p) < 1e-3, "{back}");
}

#[test]
fn pinch_over_a_zone_fires_without_dragging() {
    let camera = Camera::default();
    let mut s = surface();
    let mut switch = Switch::default();
    let centre = project(&camera, Vec3::ZERO);

    let out = s.step_with_camera(&at(centre, false), &camera, &mut switch);
    assert_eq!(out.state, SurfaceState::Hover(1));
    assert_eq!(out.hovered.as_deref(), Some("centre"));
    assert_eq!(out.fired, None);
    assert!(!switch.enabled);

    let out = s.step_with_camera(&at(centre, true), &camera, &mut switch);
    assert_eq!(out.fired.as_deref(), Some("centre"));
    assert_ne!(out.state, SurfaceState::Dragging);

    // Holding the pinch does not fire again.
    let out = s.step_with_camera(&at(centre, true), &camera, &mut switch);
    assert_eq!(out.fired, None);
    assert_eq!(s.origin(), Vec3::ZERO);

    let left = project(&camera, Vec3::new(-0.6, 0.0, 0.0));
    s.step(&at(left, false), &camera);
    let out = s.step(&at(left, true), &camera);
    assert_eq!(out.fired.as_deref(), Some("left"));
}

#[test]
fn drag_tracks_cursor_plus_offset_and_freezes_on_release() {
    let camera = Camera::default();
    let mut s = surface();
    let mut switch = Switch::default();
    let grab = Vec2::new(0.8, 0.3);
    let c0 = camera.cursor_on_plane(grab, 0.0).unwrap();

    let out = s.step_with_camera(&at(grab, false), &camera, &mut switch);
    assert_eq!(out.state, SurfaceState::Idle);
    assert!(switch.enabled);

    let out = s.step_with_camera(&at(grab, true), &camera, &mut switch);
    assert_eq!(out.state, SurfaceState::Dragging);
    assert_eq!(out.origin, Vec3::ZERO);
    assert!(!switch.enabled);
    let offset = Vec3::ZERO - c0;

    let mut last = Vec3::ZERO;
    for k in 1..=10 {
        let uv = grab - Vec2::new(0.02, -0.01) * k as f32;
        let c = camera.cursor_on_plane(uv, 0.0).unwrap();
        let out = s.step_with_camera(&at(uv, true), &camera, &mut switch);
        assert_eq!(out.state, SurfaceState::Dragging);
        assert_eq!(out.origin, c + offset);
        assert_eq!(out.fired, None);
        last = out.origin;
    }

    let out = s.step_with_camera(&at(Vec2::new(0.5, 0.5), false), &camera, &mut switch);
    assert_eq!(out.state, SurfaceState::Idle);
    assert_eq!(out.origin, last);
    assert!(switch.enabled);

    s.step(&at(Vec2::new(0.1, 0.9), false), &camera);
    assert_eq!(s.origin(), last);
}

#[test]
fn rotation_flag_is_reasserted_every_step() {
    let camera = Camera::default();
    let mut s = surface();
    let mut switch = Switch::default();
    let empty = Vec2::new(0.9, 0.9);
    s.step_with_camera(&at(empty, false), &camera, &mut switch);
    assert!(switch.enabled);

    // Something else turned rotation off between frames.
    switch.enabled = false;
    s.step_with_camera(&at(empty, false), &camera, &mut switch);
    assert!(switch.enabled);
    assert_eq!(switch.writes, 2);
}

#[test]
fn cursor_behind_the_camera_is_idle() {
    let camera = Camera::default();
    let mut s = surface().with_plane(10.0);
    let out = s.step(&at(Vec2::new(0.5, 0.5), true), &camera);
    assert_eq!(out.cursor, None);
    assert_eq!(out.state, SurfaceState::Idle);
    assert!(out.camera_rotation_enabled);
}

#[test]
fn focused_item_moves_in_front_of_the_camera() {
    let camera = Camera::default();
    let mut g = Gallery::new(3);
    let homes = [Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(-1.0, 0.0, 0.0)];
    g.set_focus(Some(1));
    for _ in 0..300 {
        g.step(&homes, &camera);
    }
    let items = g.items();
    assert!(items[1].position.distance(Vec3::new(0.0, 0.0, 3.0)) < 1e-3);
    assert!((items[1].scale - 2.5).abs() < 1e-3);
    assert!((items[1].opacity - 1.0).abs() < 1e-3);
    for i in [0, 2] {
        assert!(items[i].position.distance(homes[i]) < 1e-3);
        assert!((items[i].opacity - 0.15).abs() < 1e-3);
    }

    g.set_focus(Some(7));
    assert_eq!(g.focus(), None);
    for _ in 0..300 {
        g.step(&homes, &camera);
    }
    assert!(g.items().iter().all(|it| (it.opacity - 1.0).abs() < 1e-3));
    assert!(g.items()[1].position.distance(homes[1]) < 1e-3);

    let mut out = Vec::new();
    g.write_transforms(&mut out);
    assert_eq!(out.len(), 3);
}

#[test]
fn pick_returns_the_item_under_the_cursor() {
    let camera = Camera::default();
    let mut g = Gallery::new(2);
    let homes = [Vec3::ZERO, Vec3::new(1.5, 0.0, 0.0)];
    for _ in 0..400 {
        g.step(&homes, &camera);
    }
    assert_eq!(g.pick(&camera, project(&camera, homes[0])), Some(0));
    assert_eq!(g.pick(&camera, project(&camera, homes[1])), Some(1));
    assert_eq!(g.pick(&camera, Vec2::new(0.02, 0.02)), None);

    g.resize(1);
    assert_eq!(g.len(), 1);
    assert_eq!(g.pick(&camera, project(&camera, homes[1])), None);
}

#[test]
fn releasing_a_drag_over_a_zone_hovers_at_once() {
    let camera = Camera::default();
    let mut s = surface();
    let grab = Vec2::new(0.8, 0.3);
    s.step(&at(grab, false), &camera);
    s.step(&at(grab, true), &camera);
    let uv = grab - Vec2::new(0.1, 0.0);
    let out = s.step(&at(uv, true), &camera);
    assert_eq!(out.state, SurfaceState::Dragging);

    // Release with the cursor on the moved surface's centre zone.
    let over_centre = project(&camera, out.origin);
    let mut switch = Switch {
        enabled: true,
        writes: 0,
    };
    let out = s.step_with_camera(&at(over_centre, false), &camera, &mut switch);
    assert_eq!(out.state, SurfaceState::Hover(1));
    assert_eq!(out.hovered.as_deref(), Some("centre"));
    assert_eq!(out.fired, None);
    assert!(!out.camera_rotation_enabled);
    assert!(!switch.enabled);
}

#[test]
fn grab_radius_limits_where_a_drag_can_start() {
    let camera = Camera::default();
    let mut s = surface().with_grab_radius(1.0);
    let far = project(&camera, Vec3::new(2.5, 0.0, 0.0));
    s.step(&at(far, false), &camera);
    let out = s.step(&at(far, true), &camera);
    assert_eq!(out.state, SurfaceState::Idle);
    assert!(out.camera_rotation_enabled);

    let near = project(&camera, Vec3::new(0.0, 0.6, 0.0));
    s.step(&at(near, false), &camera);
    let out = s.step(&at(near, true), &camera);
    assert_eq!(out.state, SurfaceState::Dragging);
}
