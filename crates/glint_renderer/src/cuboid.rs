//! Axis-aligned box primitive.
//!
//! Uses the slab method from [`Aabb::slab_span`]; the normal comes from the
//! axis whose slab bounds the reported hit.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use glint_math::{Aabb, Interval, Vec3};

/// An axis-aligned box given by its center and half extents.
#[derive(Clone)]
pub struct Cuboid {
    center: Vec3,
    half_extents: Vec3,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Cuboid {
    /// Create a new box.
    pub fn new(center: Vec3, half_extents: Vec3, material: Arc<dyn Material>) -> Self {
        let half_extents = half_extents.abs();
        Self {
            center,
            half_extents,
            material,
            bbox: Aabb::from_center(center, half_extents),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn half_extents(&self) -> Vec3 {
        self.half_extents
    }
}

/// Unit normal along `axis`, pointing toward `sign`.
fn axis_normal(axis: usize, sign: f32) -> Vec3 {
    let mut normal = Vec3::ZERO;
    normal[axis] = sign;
    normal
}

impl Hittable for Cuboid {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let span = self.bbox.slab_span(ray);
        if !span.is_hit() {
            return None;
        }

        let direction = ray.direction();
        let (t, outward_normal) = if ray_t.surrounds(span.t_enter) {
            // Entering: the face looks back against the ray
            let axis = span.enter_axis;
            (span.t_enter, axis_normal(axis, -direction[axis].signum()))
        } else if ray_t.surrounds(span.t_exit) {
            // Leaving from inside: the face looks along the ray
            let axis = span.exit_axis;
            (span.t_exit, axis_normal(axis, direction[axis].signum()))
        } else {
            return None;
        };

        Some(HitRecord::new(ray, t, outward_normal, self.material.as_ref()))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
