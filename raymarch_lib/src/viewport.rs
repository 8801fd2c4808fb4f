//! Viewport, the plane rays are cast from
//!
//! Viewport lives in normalized (intermediate) space. The volume is centered in origin
//! and its largest dimension spans <-0.5;0.5>. Model space of the volume is obtained by scaling
//! with the largest dimension and moving the origin to the volume's lowest corner.

use std::fmt;

use nalgebra::{point, vector, Matrix4, Point3, Vector2, Vector3};

use crate::{
    common::{Ray, RaySegment},
    volumetric::Volume,
};

const INITIAL_UPPER_LEFT: Point3<f32> = point![-0.7, 0.7, 0.0];
const INITIAL_UPPER_RIGHT: Point3<f32> = point![0.7, 0.7, 0.0];
const INITIAL_BOTTOM_RIGHT: Point3<f32> = point![0.7, -0.7, 0.0];
const INITIAL_BOTTOM_LEFT: Point3<f32> = point![-0.7, -0.7, 0.0];

/// Default position, slightly outside of the volume on the Z axis
const INITIAL_TRANSLATION: Vector3<f32> = vector![0.0, 0.0, -0.8];

/// Scale never drops below this
pub const MIN_SCALE: f32 = 0.01;

/// Planar quad facing the volume
///
/// Corners are always recomputed from the initial corners and the accumulated
/// scale, translation and rotation, in this order. Rotation is applied last, so the
/// viewport orbits around the volume's center.
#[derive(Debug, Clone)]
pub struct Viewport {
    upper_left: Point3<f32>,
    upper_right: Point3<f32>,
    bottom_right: Point3<f32>,
    bottom_left: Point3<f32>,

    /// Normal of the plane, facing the volume
    projection_direction: Vector3<f32>,
    /// Bottom left to upper left
    up_span: Vector3<f32>,
    /// Upper left to upper right
    right_span: Vector3<f32>,

    scaling_matrix: Matrix4<f32>,
    translation_matrix: Matrix4<f32>,
    rotation_matrix_x: Matrix4<f32>,
    rotation_matrix_y: Matrix4<f32>,

    current_translation: Vector3<f32>,
    current_rotation: Vector2<f32>,
    current_scaling: f32,
}

impl Viewport {
    pub fn new() -> Viewport {
        let mut viewport = Viewport {
            upper_left: INITIAL_UPPER_LEFT,
            upper_right: INITIAL_UPPER_RIGHT,
            bottom_right: INITIAL_BOTTOM_RIGHT,
            bottom_left: INITIAL_BOTTOM_LEFT,
            projection_direction: vector![0.0, 0.0, 1.0],
            up_span: INITIAL_UPPER_LEFT - INITIAL_BOTTOM_LEFT,
            right_span: INITIAL_UPPER_RIGHT - INITIAL_UPPER_LEFT,
            scaling_matrix: Matrix4::identity(),
            translation_matrix: Matrix4::identity(),
            rotation_matrix_x: Matrix4::identity(),
            rotation_matrix_y: Matrix4::identity(),
            current_translation: vector![0.0, 0.0, 0.0],
            current_rotation: vector![0.0, 0.0],
            current_scaling: 1.0,
        };
        viewport.move_by(INITIAL_TRANSLATION);
        viewport
    }

    /// Zoom by changing the size of the viewport
    ///
    /// Scale is clamped to [`MIN_SCALE`].
    pub fn zoom(&mut self, increment: f32) {
        self.current_scaling += increment;

        if self.current_scaling <= MIN_SCALE {
            self.current_scaling = MIN_SCALE;
        }

        self.scaling_matrix = Matrix4::new_scaling(self.current_scaling);
        self.recalculate_plane();
    }

    /// Move the viewport, before rotation is applied
    pub fn move_by(&mut self, translation: Vector3<f32>) {
        self.current_translation += translation;

        self.translation_matrix = Matrix4::new_translation(&self.current_translation);
        self.recalculate_plane();
    }

    /// Rotate around the volume
    ///
    /// `rotation.x` is the angle around X axis, `rotation.y` around Y axis, in radians.
    pub fn rotate(&mut self, rotation: Vector2<f32>) {
        self.current_rotation += rotation;

        self.rotation_matrix_x =
            Matrix4::from_axis_angle(&Vector3::x_axis(), self.current_rotation.x);
        self.rotation_matrix_y =
            Matrix4::from_axis_angle(&Vector3::y_axis(), self.current_rotation.y);
        self.recalculate_plane();
    }

    pub fn projection_direction(&self) -> Vector3<f32> {
        self.projection_direction
    }

    pub fn up_span(&self) -> Vector3<f32> {
        self.up_span
    }

    pub fn right_span(&self) -> Vector3<f32> {
        self.right_span
    }

    /// Corners in order upper left, upper right, bottom right, bottom left
    pub fn corners(&self) -> [Point3<f32>; 4] {
        [
            self.upper_left,
            self.upper_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    pub fn current_scaling(&self) -> f32 {
        self.current_scaling
    }

    pub fn current_translation(&self) -> Vector3<f32> {
        self.current_translation
    }

    pub fn current_rotation(&self) -> Vector2<f32> {
        self.current_rotation
    }

    /// Model space origin of ray cast from viewport point `(x, y)`
    ///
    /// `(0, 0)` is the bottom left corner, `(1, 1)` the upper right.
    pub fn ray_origin(&self, volume: &Volume, x: f32, y: f32) -> Point3<f32> {
        let intermediate = self.bottom_left + self.right_span * x + self.up_span * y;
        volume.center() + intermediate.coords * volume.size_of_largest_dimension()
    }

    /// Part of the ray cast from viewport point `(x, y)` inside the volume
    ///
    /// Direction of the ray is the projection direction, the same in both spaces,
    /// since they differ only by uniform scale and translation.
    /// Returns `None` if the ray misses the volume.
    pub fn ray_for_pixel(&self, volume: &Volume, x: f32, y: f32) -> Option<RaySegment> {
        let origin = self.ray_origin(volume, x, y);
        self.intersect_ray_with_volume_bounding_box(volume, origin)
    }

    /// Entry and exit point of ray starting at model space `origin`
    ///
    /// Ray is treated as a line, entry can lie behind the origin.
    pub fn intersect_ray_with_volume_bounding_box(
        &self,
        volume: &Volume,
        origin: Point3<f32>,
    ) -> Option<RaySegment> {
        let ray = Ray::new(origin, self.projection_direction);
        let (t_min, t_max) = volume.get_bound_box().intersect(&ray)?;

        Some(RaySegment::new(
            ray.point_from_t(t_min),
            ray.point_from_t(t_max),
            self.projection_direction,
        ))
    }

    // Full recalculation, incremental updates would drift
    fn recalculate_plane(&mut self) {
        let transform = self.rotation_matrix_y
            * self.rotation_matrix_x
            * self.translation_matrix
            * self.scaling_matrix;

        self.upper_left = transform.transform_point(&INITIAL_UPPER_LEFT);
        self.upper_right = transform.transform_point(&INITIAL_UPPER_RIGHT);
        self.bottom_right = transform.transform_point(&INITIAL_BOTTOM_RIGHT);
        self.bottom_left = transform.transform_point(&INITIAL_BOTTOM_LEFT);

        self.up_span = self.upper_left - self.bottom_left;
        self.right_span = self.upper_right - self.upper_left;

        self.projection_direction = self.right_span.cross(&self.up_span).normalize();
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new()
    }
}

/// One line summary of the viewport state
impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let t = &self.current_translation;
        let r = &self.current_rotation;
        let p = &self.projection_direction;
        let ul = &self.upper_left;
        let br = &self.bottom_right;
        write!(
            f,
            "T: {:.2}, {:.2}, {:.2}  /  R: {:.2}, {:.2}  /  P: {:.2}, {:.2}, {:.2}  /  \
             Vul: {:.2}, {:.2}, {:.2}  /  Vbr: {:.2}, {:.2}, {:.2}  /  Scale: {:.2}",
            t.x,
            t.y,
            t.z,
            r.x,
            r.y,
            p.x,
            p.y,
            p.z,
            ul.x,
            ul.y,
            ul.z,
            br.x,
            br.y,
            br.z,
            self.current_scaling
        )
    }
}
