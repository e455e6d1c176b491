//! Pointer-to-world projection
//!
//! The field converts raw screen-space pointer coordinates into points on
//! the z = 0 world plane by unprojecting through a camera and intersecting
//! the resulting view ray with the plane in closed form. The camera is an
//! injected collaborator behind the [`Projector`] trait; it may be absent
//! during startup, and the field simply skips projection until it arrives.

use crate::core_types::vec3::Vec3;
use nalgebra::{Isometry3, Perspective3, Point3, Vector3};

/// Viewport dimensions in pixels, fed to the field by the window-resize
/// collaborator before the next pointer projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        // Non-zero placeholder so projection stays finite before the first
        // resize event arrives
        Self {
            width: 1.0,
            height: 1.0,
        }
    }
}

/// Camera collaborator interface: world position plus NDC unprojection.
///
/// Implementations only need to return *some* world-space point along the
/// pointer ray for a given NDC coordinate; [`pointer_to_world`] rebuilds the
/// ray from the camera position and intersects it with the z = 0 plane.
pub trait Projector {
    /// Camera position in world space.
    fn position(&self) -> Vec3;

    /// Map a normalized-device-coordinate point (each axis in `[-1, 1]`)
    /// to world space.
    fn unproject(&self, ndc: Vec3) -> Vec3;
}

/// Perspective camera with a look-at view transform.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    eye: Point3<f32>,
    target: Point3<f32>,
    projection: Perspective3<f32>,
}

impl PerspectiveCamera {
    /// Create a camera at `eye` looking at `target`.
    ///
    /// `fovy` is the vertical field of view in radians, `aspect` is
    /// width / height.
    pub fn new(eye: Vec3, target: Vec3, fovy: f32, aspect: f32) -> Self {
        Self {
            eye: Point3::from(eye),
            target: Point3::from(target),
            projection: Perspective3::new(aspect, fovy, 0.1, 2000.0),
        }
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.projection.set_aspect(aspect);
    }

    fn view(&self) -> Isometry3<f32> {
        Isometry3::look_at_rh(&self.eye, &self.target, &Vector3::y())
    }
}

impl Default for PerspectiveCamera {
    /// Camera 20 world units up the z axis, looking at the origin with a
    /// 45-degree vertical field of view.
    fn default() -> Self {
        Self::new(
            Vec3::new(0.0, 0.0, 20.0),
            Vec3::zeros(),
            45.0_f32.to_radians(),
            1.0,
        )
    }
}

impl Projector for PerspectiveCamera {
    fn position(&self) -> Vec3 {
        self.eye.coords
    }

    fn unproject(&self, ndc: Vec3) -> Vec3 {
        let view_point = self.projection.unproject_point(&Point3::from(ndc));
        self.view().inverse_transform_point(&view_point).coords
    }
}

/// Project a screen-space pointer position onto the z = 0 world plane.
///
/// Normalizes the pixel coordinate to NDC (`z = 0.5`, i.e. between the near
/// and far planes), unprojects it, forms the ray from the camera through the
/// unprojected point and solves `t = -camera.z / direction.z` in closed
/// form.
///
/// Returns `None` when the ray is parallel to the plane or degenerate; a
/// perspective camera looking along the plane is a practically unreachable
/// configuration, and the caller skips the frame's movement-dependent
/// updates.
pub fn pointer_to_world(
    pointer: Vec3,
    viewport: Viewport,
    projector: &dyn Projector,
) -> Option<Vec3> {
    let ndc = Vec3::new(
        (pointer.x / viewport.width) * 2.0 - 1.0,
        -(pointer.y / viewport.height) * 2.0 + 1.0,
        0.5,
    );
    let camera = projector.position();
    let direction = (projector.unproject(ndc) - camera).try_normalize(0.0)?;
    if direction.z.abs() <= f32::EPSILON {
        return None;
    }
    let distance = -camera.z / direction.z;
    Some(camera + direction * distance)
}
