//! 3D control surface: hover, click and drag driven by cursor + pinch.
//!
//! Free camera rotation is only allowed while the surface is idle. That flag
//! is level-triggered and pushed to the camera control on every step, since
//! other code may flip the same switch between frames.

use crate::camera::Camera;
use crate::error::{FieldError, Result};
use crate::events::{GestureEvent, PinchEdge};
use crate::gesture::GestureBundle;
use glam::{Vec2, Vec3};

/// Circular hit region in the surface's local XY plane.
#[derive(Clone, Debug, PartialEq)]
pub struct HitZone {
    pub id: String,
    pub center: Vec2,
    pub radius: f32,
}

impl HitZone {
    pub fn new(id: impl Into<String>, center: Vec2, radius: f32) -> Result<Self> {
        let id = id.into();
        if !(radius.is_finite() && radius > 0.0) {
            return Err(FieldError::InvalidZoneRadius { id, radius });
        }
        Ok(Self { id, center, radius })
    }

    #[inline]
    pub fn contains(&self, local: Vec2) -> bool {
        local.distance_squared(self.center) <= self.radius * self.radius
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SurfaceState {
    #[default]
    Idle,
    /// Index into the zone list.
    Hover(usize),
    Dragging,
}

/// Whatever owns orbit-style camera controls.
pub trait CameraRotationControl {
    fn set_rotation_enabled(&mut self, enabled: bool);
}

/// Result of one step, for the renderer and the host.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceOutput {
    pub state: SurfaceState,
    pub hovered: Option<String>,
    /// Zone whose action fired this frame.
    pub fired: Option<String>,
    pub cursor: Option<Vec3>,
    pub origin: Vec3,
    pub camera_rotation_enabled: bool,
}

#[derive(Clone, Debug)]
pub struct ControlSurface {
    zones: Vec<HitZone>,
    state: SurfaceState,
    origin: Vec3,
    drag_offset: Vec3,
    plane_z: f32,
    grab_radius: Option<f32>,
    pinch: PinchEdge,
}

impl ControlSurface {
    pub fn new(zones: Vec<HitZone>, origin: Vec3) -> Self {
        Self {
            zones,
            state: SurfaceState::Idle,
            origin,
            drag_offset: Vec3::ZERO,
            plane_z: origin.z,
            grab_radius: None,
            pinch: PinchEdge::new(),
        }
    }

    /// Cursor rays are intersected with `z = plane_z`.
    pub fn with_plane(mut self, plane_z: f32) -> Self {
        self.plane_z = plane_z;
        self
    }

    /// Only start a drag when the press lands within `radius` of the
    /// origin. Without it a press anywhere off the zones grabs the surface.
    pub fn with_grab_radius(mut self, radius: f32) -> Self {
        self.grab_radius = Some(radius);
        self
    }

    pub fn zones(&self) -> &[HitZone] {
        &self.zones
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// First zone, in declaration order, containing the cursor point.
    fn hit_test(&self, cursor: Vec3) -> Option<usize> {
        let local = (cursor - self.origin).truncate();
        self.zones.iter().position(|z| z.contains(local))
    }

    fn hover_state(&self, cursor: Option<Vec3>) -> SurfaceState {
        match cursor.and_then(|c| self.hit_test(c)) {
            Some(i) => SurfaceState::Hover(i),
            None => SurfaceState::Idle,
        }
    }

    fn can_grab(&self, cursor: Vec3) -> bool {
        self.grab_radius
            .map_or(true, |r| (cursor - self.origin).truncate().length() <= r)
    }

    pub fn step(&mut self, bundle: &GestureBundle, camera: &Camera) -> SurfaceOutput {
        let cursor = camera.cursor_on_plane(bundle.position, self.plane_z);
        let edge = self.pinch.update(bundle.is_pinching);
        let mut fired = None;

        if self.state != SurfaceState::Dragging {
            self.state = self.hover_state(cursor);
        }

        match (self.state, edge) {
            (SurfaceState::Hover(i), Some(GestureEvent::PinchStart)) => {
                let id = self.zones[i].id.clone();
                log::debug!("[surface] click {}", id);
                fired = Some(id);
            }
            (SurfaceState::Idle, Some(GestureEvent::PinchStart)) => {
                if let Some(c) = cursor.filter(|c| self.can_grab(*c)) {
                    self.drag_offset = self.origin - c;
                    self.state = SurfaceState::Dragging;
                    log::debug!("[surface] drag start");
                }
            }
            (SurfaceState::Dragging, Some(GestureEvent::PinchEnd)) => {
                self.state = self.hover_state(cursor);
                log::debug!("[surface] drag end");
            }
            _ => {}
        }

        if self.state == SurfaceState::Dragging && bundle.is_pinching {
            if let Some(c) = cursor {
                self.origin = c + self.drag_offset;
            }
        }

        let hovered = match self.state {
            SurfaceState::Hover(i) => Some(self.zones[i].id.clone()),
            _ => None,
        };
        SurfaceOutput {
            state: self.state,
            hovered,
            fired,
            cursor,
            origin: self.origin,
            camera_rotation_enabled: self.state == SurfaceState::Idle,
        }
    }

    /// Step and re-assert the camera rotation flag.
    pub fn step_with_camera<C: CameraRotationControl + ?Sized>(
        &mut self,
        bundle: &GestureBundle,
        camera: &Camera,
        control: &mut C,
    ) -> SurfaceOutput {
        let out = self.step(bundle, camera);
        control.set_rotation_enabled(out.camera_rotation_enabled);
        out
    }
}
