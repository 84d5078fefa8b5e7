//! Gallery variant: a handful of media cards riding on the field, one of
//! which can be pulled in front of the camera.

use crate::camera::{ray_sphere, Camera};
use crate::constants::{FOCUS_DISTANCE, FOCUS_LERP, FOCUS_SCALE, UNFOCUSED_OPACITY, UNFOCUS_LERP};
use crate::physics::SampleTransform;
use glam::{Mat3, Quat, Vec2, Vec3};

const PICK_RADIUS: f32 = 0.35;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalleryItem {
    pub position: Vec3,
    pub scale: f32,
    pub rotation: Quat,
    pub opacity: f32,
}

impl GalleryItem {
    fn new(position: Vec3) -> Self {
        Self {
            position,
            scale: 1.0,
            rotation: Quat::IDENTITY,
            opacity: 1.0,
        }
    }

    pub fn transform(&self) -> SampleTransform {
        SampleTransform {
            position: self.position.to_array(),
            scale: self.scale,
            rotation: self.rotation.to_array(),
            opacity: self.opacity,
        }
    }
}

/// Rotation that turns an item's +Z face toward `eye`.
pub fn facing(position: Vec3, eye: Vec3, up: Vec3) -> Quat {
    let forward = (eye - position).normalize_or_zero();
    if forward == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let right = up.cross(forward).normalize_or_zero();
    if right == Vec3::ZERO {
        return Quat::from_rotation_arc(Vec3::Z, forward);
    }
    let true_up = forward.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, true_up, forward))
}

#[derive(Clone, Debug, Default)]
pub struct Gallery {
    items: Vec<GalleryItem>,
    focus: Option<usize>,
}

impl Gallery {
    pub fn new(count: usize) -> Self {
        Self {
            items: vec![GalleryItem::new(Vec3::ZERO); count],
            focus: None,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn focus(&self) -> Option<usize> {
        self.focus
    }

    /// Focus an item, or clear focus with `None`. Out-of-range indices clear.
    pub fn set_focus(&mut self, index: Option<usize>) {
        self.focus = index.filter(|&i| i < self.items.len());
    }

    pub fn resize(&mut self, count: usize) {
        self.items.resize(count, GalleryItem::new(Vec3::ZERO));
        if self.focus.is_some_and(|f| f >= count) {
            self.focus = None;
        }
    }

    /// Nearest item under the cursor.
    pub fn pick(&self, camera: &Camera, uv: Vec2) -> Option<usize> {
        let (ro, rd) = camera.screen_ray(uv);
        let mut best = None::<(usize, f32)>;
        for (i, item) in self.items.iter().enumerate() {
            if let Some(t) = ray_sphere(ro, rd, item.position, PICK_RADIUS * item.scale) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((i, t)),
                }
            }
        }
        best.map(|(i, _)| i)
    }

    /// Advance one frame. `homes[i]` is where item `i` rests when unfocused;
    /// missing homes leave the item where it is.
    pub fn step(&mut self, homes: &[Vec3], camera: &Camera) {
        let focus_point = camera.eye + camera.forward() * FOCUS_DISTANCE;
        let any_focus = self.focus.is_some();
        for (i, item) in self.items.iter_mut().enumerate() {
            let home = homes.get(i).copied().unwrap_or(item.position);
            if self.focus == Some(i) {
                item.position = item.position.lerp(focus_point, FOCUS_LERP);
                item.scale += (FOCUS_SCALE - item.scale) * FOCUS_LERP;
                item.opacity += (1.0 - item.opacity) * FOCUS_LERP;
                let face = facing(item.position, camera.eye, camera.up);
                item.rotation = item.rotation.slerp(face, FOCUS_LERP);
            } else {
                let opacity = if any_focus { UNFOCUSED_OPACITY } else { 1.0 };
                item.position = item.position.lerp(home, UNFOCUS_LERP);
                item.scale += (1.0 - item.scale) * UNFOCUS_LERP;
                item.opacity += (opacity - item.opacity) * UNFOCUS_LERP;
                item.rotation = item.rotation.slerp(Quat::IDENTITY, UNFOCUS_LERP);
            }
        }
    }

    pub fn write_transforms(&self, out: &mut Vec<SampleTransform>) {
        out.clear();
        out.extend(self.items.iter().map(GalleryItem::transform));
    }
}
