use nalgebra::{Point3, Vector3};

/// Ray cast from the viewport.
/// Main usecase is getting intersections with volumes ([`BoundBox::intersect`](super::BoundBox::intersect)),
/// then iterating over the intersected line segment in steps.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Construct new ray using `origin` and `direction`.
    /// `direction` must be unit vector.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Ray {
        Ray { origin, direction }
    }

    /// Returns point `t` units far from ray origin in ray direction
    pub fn point_from_t(&self, t: f32) -> Point3<f32> {
        self.origin + t * self.direction
    }
}

/// Part of a ray inside of a volume, in model space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RaySegment {
    pub entry: Point3<f32>,
    pub exit: Point3<f32>,
    /// Unit direction, from entry to exit
    pub direction: Vector3<f32>,
}

impl RaySegment {
    pub fn new(entry: Point3<f32>, exit: Point3<f32>, direction: Vector3<f32>) -> RaySegment {
        RaySegment {
            entry,
            exit,
            direction,
        }
    }

    pub fn length(&self) -> f32 {
        (self.exit - self.entry).magnitude()
    }

    /// Sample positions from entry towards exit
    pub fn march(&self, step_size: f32) -> RayMarch {
        RayMarch::new(self.entry, self.direction, step_size, self.length())
    }

    /// Sample positions from exit back towards entry
    pub fn march_back(&self, step_size: f32) -> RayMarch {
        RayMarch::new(self.exit, -self.direction, step_size, self.length())
    }
}

/// Positions along a ray in constant steps
///
/// First position is the start itself, position `i` lies `i * step_size` from it.
/// Yields `ceil(length / step_size)` positions, so every position is closer than
/// `length` to the start.
#[derive(Debug, Clone)]
pub struct RayMarch {
    start: Point3<f32>,
    direction: Vector3<f32>,
    step_size: f32,
    index: usize,
    steps: usize,
}

impl RayMarch {
    pub fn new(
        start: Point3<f32>,
        direction: Vector3<f32>,
        step_size: f32,
        length: f32,
    ) -> RayMarch {
        RayMarch {
            start,
            direction,
            step_size,
            index: 0,
            steps: step_count(length, step_size),
        }
    }
}

// Number of steps with `i * step_size < length`, zero for degenerate input
fn step_count(length: f32, step_size: f32) -> usize {
    if !(length > 0.0 && step_size > 0.0) {
        return 0;
    }
    let steps = (f64::from(length) / f64::from(step_size)).ceil();
    if steps.is_finite() {
        steps as usize
    } else {
        0
    }
}

impl Iterator for RayMarch {
    type Item = Point3<f32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.steps {
            return None;
        }
        let t = self.index as f32 * self.step_size;
        self.index += 1;
        Some(self.start + self.direction * t)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.steps - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RayMarch {}

#[cfg(test)]
mod test {

    use nalgebra::{point, vector};

    use super::*;

    #[test]
    fn point_from_t() {
        let ray = Ray::new(point![1.0, 0.0, 0.0], vector![0.0, 1.0, 0.0]);
        assert_eq!(ray.point_from_t(2.5), point![1.0, 2.5, 0.0]);
    }

    #[test]
    fn march_forward() {
        let segment = RaySegment::new(
            point![0.0, 0.0, 0.0],
            point![0.0, 0.0, 3.0],
            vector![0.0, 0.0, 1.0],
        );
        let positions: Vec<_> = segment.march(1.0).collect();

        assert_eq!(
            positions,
            vec![
                point![0.0, 0.0, 0.0],
                point![0.0, 0.0, 1.0],
                point![0.0, 0.0, 2.0]
            ]
        );
    }

    #[test]
    fn march_backward() {
        let segment = RaySegment::new(
            point![0.0, 0.0, 0.0],
            point![0.0, 0.0, 2.0],
            vector![0.0, 0.0, 1.0],
        );
        let positions: Vec<_> = segment.march_back(0.5).collect();

        assert_eq!(positions.len(), 4);
        assert_eq!(positions[0], point![0.0, 0.0, 2.0]);
        assert_eq!(positions[3], point![0.0, 0.0, 0.5]);
    }

    #[test]
    fn long_diagonal_keeps_count() {
        let dir = vector![1.0f32, 1.0, 1.0].normalize();
        let exit = point![0.0, 0.0, 0.0] + dir * 200.0;
        let segment = RaySegment::new(point![0.0, 0.0, 0.0], exit, dir);

        let step = 0.001;
        let march = segment.march(step);
        let count = march.len();
        assert!((199_999..=200_001).contains(&count));

        let last = march.last().unwrap();
        let exact = dir * ((count - 1) as f32 * step);
        assert!((last.coords - exact).magnitude() < 1e-3);
        assert!((last - exit).magnitude() <= step);
    }

    #[test]
    fn tiny_step_terminates() {
        let segment = RaySegment::new(
            point![0.0, 0.0, 63.0],
            point![0.0, 0.0, 64.0],
            vector![0.0, 0.0, 1.0],
        );
        let march = segment.march_back(1e-6);
        let expected = march.len();

        assert!((999_999..=1_000_001).contains(&expected));
        assert_eq!(march.count(), expected);
    }

    #[test]
    fn empty_segment() {
        let p = point![1.0, 1.0, 1.0];
        let segment = RaySegment::new(p, p, vector![1.0, 0.0, 0.0]);

        assert_eq!(segment.march(1.0).count(), 0);
    }
}
