// Transform utilities for Mat4
//
// Extends glam::Mat4 with the view-space to world-space helpers the camera
// needs. glam already provides transform_point3(), transform_vector3() and
// inverse().

use crate::Ray;
use glam::Mat4;

/// Determinants smaller than this are treated as singular.
const SINGULAR_DETERMINANT: f32 = 1e-12;

/// Extension trait for Mat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Transform a ray: the origin as a point (w=1), the direction as a
    /// vector (w=0), so translation never leaks into the direction.
    fn transform_ray(&self, ray: &Ray) -> Ray;

    /// Invert the matrix, or return None if it is singular or non-finite.
    fn try_inverse(&self) -> Option<Mat4>;
}

impl Mat4Ext for Mat4 {
    fn transform_ray(&self, ray: &Ray) -> Ray {
        Ray::new(
            self.transform_point3(ray.origin()),
            self.transform_vector3(ray.direction()),
        )
    }

    fn try_inverse(&self) -> Option<Mat4> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_DETERMINANT {
            return None;
        }
        let inv = self.inverse();
        inv.is_finite().then_some(inv)
    }
}
