use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box.
///
/// Defined by three intervals (one per axis). Used both as the culling gate
/// in front of the triangle mesh and as the geometry behind box primitives.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

/// Unclipped entry/exit distances of a ray through an [`Aabb`].
///
/// `enter_axis` is the axis whose slab produced `t_enter` (the last plane the
/// ray crosses on its way in), `exit_axis` the one that produced `t_exit`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SlabSpan {
    pub t_enter: f32,
    pub t_exit: f32,
    pub enter_axis: usize,
    pub exit_axis: usize,
}

impl SlabSpan {
    /// Returns true if the span is non-empty.
    pub fn is_hit(&self) -> bool {
        self.t_enter < self.t_exit
    }
}

impl Aabb {
    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        let mut aabb = Self { x, y, z };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB from two corner points.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));

        Self::new(x, y, z)
    }

    /// Create an AABB from a center point and half extents along each axis.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self::from_points(center - half, center + half)
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Get the interval for a specific axis (0=X, 1=Y, 2=Z).
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Minimum corner.
    pub fn min(&self) -> Vec3 {
        Vec3::new(self.x.min, self.y.min, self.z.min)
    }

    /// Maximum corner.
    pub fn max(&self) -> Vec3 {
        Vec3::new(self.x.max, self.y.max, self.z.max)
    }

    /// Compute where a ray enters and leaves the box, ignoring any range.
    ///
    /// Slab method: intersect the three per-axis [t0, t1] ranges.
    pub fn slab_span(&self, r: &Ray) -> SlabSpan {
        let mut span = SlabSpan {
            t_enter: f32::NEG_INFINITY,
            t_exit: f32::INFINITY,
            enter_axis: 0,
            exit_axis: 0,
        };

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let adinv = 1.0 / r.direction[axis];
            let mut t0 = (slab.min - r.origin[axis]) * adinv;
            let mut t1 = (slab.max - r.origin[axis]) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            // NaN (ray lying in a slab plane) fails both comparisons and is skipped
            if t0 > span.t_enter {
                span.t_enter = t0;
                span.enter_axis = axis;
            }
            if t1 < span.t_exit {
                span.t_exit = t1;
                span.exit_axis = axis;
            }
        }

        span
    }

    /// Clip the ray's slab span to `ray_t`; `None` if nothing is left.
    pub fn hit_interval(&self, r: &Ray, ray_t: Interval) -> Option<Interval> {
        let span = self.slab_span(r);
        let t_min = span.t_enter.max(ray_t.min);
        let t_max = span.t_exit.min(ray_t.max);
        (t_min < t_max).then(|| Interval::new(t_min, t_max))
    }

    /// Test if a ray intersects this AABB within the given interval.
    pub fn hit(&self, r: &Ray, ray_t: Interval) -> bool {
        self.hit_interval(r, ray_t).is_some()
    }

    /// Returns true if the point lies inside the box (boundary included).
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.x.contains(p.x) && self.y.contains(p.y) && self.z.contains(p.z)
    }

    /// Pad intervals to avoid zero-width AABBs (degenerate cases).
    fn pad_to_minimums(&mut self) {
        let delta = 0.0001;
        if self.x.size() < delta {
            self.x = self.x.expand(delta);
        }
        if self.y.size() < delta {
            self.y = self.y.expand(delta);
        }
        if self.z.size() < delta {
            self.z = self.z.expand(delta);
        }
    }

    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> Aabb {
        Aabb::from_points(Vec3::new(-1.0, -1.0, -1.0), Vec3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_aabb_from_points_orders_corners() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 5.0), Vec3::new(0.0, 10.0, -5.0));

        assert_eq!(aabb.min(), Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(aabb.max(), Vec3::new(10.0, 10.0, 5.0));
    }

    #[test]
    fn test_aabb_from_center() {
        let aabb = Aabb::from_center(Vec3::new(1.0, 0.0, 0.0), Vec3::splat(0.25));

        assert_eq!(aabb.min(), Vec3::new(0.75, -0.25, -0.25));
        assert_eq!(aabb.max(), Vec3::new(1.25, 0.25, 0.25));
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::new(5.0, 5.0, 5.0));
        let box2 = Aabb::from_points(Vec3::new(3.0, 3.0, 3.0), Vec3::new(10.0, 10.0, 10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        assert_eq!(surrounding.min(), Vec3::ZERO);
        assert_eq!(surrounding.max(), Vec3::new(10.0, 10.0, 10.0));

        // EMPTY is the identity for surrounding
        assert_eq!(Aabb::surrounding(&Aabb::EMPTY, &box1), box1);
    }

    #[test]
    fn test_aabb_empty_never_hit() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);
        assert!(!Aabb::EMPTY.hit(&ray, Interval::UNIVERSE));
    }

    #[test]
    fn test_aabb_flat_box_is_padded() {
        let flat = Aabb::from_points(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0));
        assert!(flat.y.size() > 0.0);

        // A ray straight down through the flat box still registers
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::NEG_Y);
        assert!(flat.hit(&ray, Interval::new(0.001, f32::INFINITY)));
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = unit_box();

        // Ray pointing at center
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray pointing away
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));

        // Ray missing the box
        let ray = Ray::new(Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(!aabb.hit(&ray, Interval::new(0.0, 100.0)));
    }

    #[test]
    fn test_aabb_hit_respects_range() {
        let aabb = unit_box();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));

        // Box occupies t in [4, 6]
        assert!(!aabb.hit(&ray, Interval::new(0.0, 3.5)));
        assert!(aabb.hit(&ray, Interval::new(0.0, 4.5)));
        assert!(!aabb.hit(&ray, Interval::new(6.5, 10.0)));
    }

    #[test]
    fn test_aabb_hit_interval_is_clipped() {
        let aabb = unit_box();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        let clipped = aabb.hit_interval(&ray, Interval::new(0.0, 4.5)).unwrap();
        assert!((clipped.min - 4.0).abs() < 1e-5);
        assert_eq!(clipped.max, 4.5);

        assert!(aabb.hit_interval(&ray, Interval::new(6.5, 10.0)).is_none());
    }

    #[test]
    fn test_slab_span_axes() {
        let aabb = unit_box();
        let ray = Ray::new(Vec3::new(-5.0, 0.2, 0.1), Vec3::X);
        let span = aabb.slab_span(&ray);

        assert!(span.is_hit());
        assert!((span.t_enter - 4.0).abs() < 1e-5);
        assert!((span.t_exit - 6.0).abs() < 1e-5);
        assert_eq!(span.enter_axis, 0);
        assert_eq!(span.exit_axis, 0);
    }

    #[test]
    fn test_slab_span_from_inside() {
        let aabb = unit_box();
        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let span = aabb.slab_span(&ray);

        assert!(span.t_enter < 0.0);
        assert!((span.t_exit - 1.0).abs() < 1e-5);
        assert_eq!(span.exit_axis, 1);
    }

    #[test]
    fn test_aabb_contains_point() {
        let aabb = unit_box();
        assert!(aabb.contains_point(Vec3::ZERO));
        assert!(aabb.contains_point(Vec3::new(1.0, -1.0, 0.5)));
        assert!(!aabb.contains_point(Vec3::new(1.5, 0.0, 0.0)));
    }
}
