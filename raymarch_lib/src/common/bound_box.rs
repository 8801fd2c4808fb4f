use nalgebra::{point, Point3, Vector3};

use super::Ray;

/// Axis aligned box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundBox {
    pub lower: Point3<f32>,
    pub upper: Point3<f32>,
}

impl BoundBox {
    pub fn new(lower: Point3<f32>, upper: Point3<f32>) -> BoundBox {
        BoundBox { lower, upper }
    }

    /// Box spanning from origin to `dimensions`
    pub fn from_dims(dimensions: Vector3<f32>) -> BoundBox {
        BoundBox {
            lower: point![0.0, 0.0, 0.0],
            upper: point![dimensions.x, dimensions.y, dimensions.z],
        }
    }

    pub fn dims(&self) -> Vector3<f32> {
        self.upper - self.lower
    }

    pub fn center(&self) -> Point3<f32> {
        self.lower + 0.5 * self.dims()
    }

    pub fn is_in(&self, pos: &Point3<f32>) -> bool {
        self.upper.x > pos.x
            && self.upper.y > pos.y
            && self.upper.z > pos.z
            && pos.x > self.lower.x
            && pos.y > self.lower.y
            && pos.z > self.lower.z
    }

    /// Slab test, returns `t` of entry and exit
    ///
    /// The ray is a line here, both `t` values can be negative.
    /// Zero components of direction divide into infinities (or NaN when the origin
    /// lies on the slab plane). NaN compares false, so such a slab never rejects
    /// the ray and never narrows the interval.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, f32)> {
        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let mut t0 = (self.lower[axis] - ray.origin[axis]) / ray.direction[axis];
            let mut t1 = (self.upper[axis] - ray.origin[axis]) / ray.direction[axis];

            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }

            // Slab interval does not overlap the accumulated one
            if t_min > t1 || t0 > t_max {
                return None;
            }

            if t0 > t_min {
                t_min = t0;
            }

            if t1 < t_max {
                t_max = t1;
            }
        }

        Some((t_min, t_max))
    }
}

#[cfg(test)]
mod test {

    use nalgebra::vector;

    use super::*;

    fn unit_box() -> BoundBox {
        BoundBox::from_dims(vector![1.0, 1.0, 1.0])
    }

    #[test]
    fn intersect_works() {
        let ray = Ray::new(point![-1.0, -1.0, 0.0], vector![1.0, 1.0, 1.0]);
        let inter = unit_box().intersect(&ray);
        assert!(inter.is_some());
    }

    #[test]
    fn intersect_axis_aligned() {
        let ray = Ray::new(point![0.5, 0.5, -2.0], vector![0.0, 0.0, 1.0]);
        let (t0, t1) = unit_box().intersect(&ray).unwrap();

        assert_eq!(t0, 2.0);
        assert_eq!(t1, 3.0);
    }

    #[test]
    fn origin_on_face_plane() {
        // x component is 0/0, slab is skipped
        let ray = Ray::new(point![0.0, 0.5, -1.0], vector![0.0, 0.0, 1.0]);
        let (t0, t1) = unit_box().intersect(&ray).unwrap();

        assert_eq!(t0, 1.0);
        assert_eq!(t1, 2.0);
    }

    #[test]
    fn from_inside() {
        let ray = Ray::new(point![0.5, 0.5, 0.5], vector![0.0, 1.0, 0.0]);
        let (t0, t1) = unit_box().intersect(&ray).unwrap();

        assert_eq!(t0, -0.5);
        assert_eq!(t1, 0.5);
    }

    #[test]
    fn not_intersecting() {
        let ray = Ray::new(point![200.0, 200.0, 200.0], vector![1.0, 0.0, 0.0]);
        assert!(unit_box().intersect(&ray).is_none());
    }

    #[test]
    fn parallel_to_face_outside() {
        let ray = Ray::new(point![-0.5, 2.0, 0.5], vector![1.0, 0.0, 0.0]);
        assert!(unit_box().intersect(&ray).is_none());
    }

    #[test]
    fn is_in() {
        let bbox = unit_box();
        assert!(bbox.is_in(&point![0.5, 0.5, 0.5]));
        assert!(!bbox.is_in(&point![1.5, 0.5, 0.5]));
        assert_eq!(bbox.center(), point![0.5, 0.5, 0.5]);
    }
}
