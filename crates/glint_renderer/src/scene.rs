//! Scene aggregate and the scene-wide nearest-hit query.
//!
//! A scene holds one ground sphere, lists of spheres and boxes, and a
//! triangle mesh guarded by a single bounding box. The mesh box is a pure
//! culling gate: it must contain every triangle, or valid hits are dropped.

use std::sync::Arc;

use glint_core::{MeshData, MeshResult};
use glint_math::{Aabb, Interval};

use crate::{Cuboid, HitRecord, Hittable, Material, Ray, Sphere, Triangle};

/// Everything the light-transport function can hit.
#[derive(Clone)]
pub struct Scene {
    pub ground: Sphere,
    pub spheres: Vec<Sphere>,
    pub boxes: Vec<Cuboid>,
    pub mesh: Vec<Triangle>,
    pub mesh_bbox: Aabb,
}

/// Keep `candidate` if it exists; it is nearer by construction because it
/// was found inside the already-narrowed range.
#[inline]
fn keep_nearest<'a>(
    closest: &mut Option<HitRecord<'a>>,
    range: &mut Interval,
    candidate: Option<HitRecord<'a>>,
) {
    if let Some(rec) = candidate {
        *range = range.with_max(rec.t);
        *closest = Some(rec);
    }
}

impl Scene {
    /// Create a scene containing only the ground.
    pub fn new(ground: Sphere) -> Self {
        Self {
            ground,
            spheres: Vec::new(),
            boxes: Vec::new(),
            mesh: Vec::new(),
            mesh_bbox: Aabb::EMPTY,
        }
    }

    /// Replace the sphere list.
    pub fn with_spheres(mut self, spheres: Vec<Sphere>) -> Self {
        self.spheres = spheres;
        self
    }

    /// Replace the box list.
    pub fn with_boxes(mut self, boxes: Vec<Cuboid>) -> Self {
        self.boxes = boxes;
        self
    }

    /// Build the triangle list and culling box from mesh-loader output.
    ///
    /// All triangles share `material`. The culling box comes from the
    /// loader's reported corners, grown by the same slack `validate`
    /// allows, so every accepted vertex lies inside it. On error the
    /// current mesh is left untouched.
    pub fn set_mesh(&mut self, mesh: &MeshData, material: Arc<dyn Material>) -> MeshResult<()> {
        mesh.validate()?;

        self.mesh = mesh
            .triangles()
            .map(|[v0, v1, v2]| Triangle::new(v0, v1, v2, Arc::clone(&material)))
            .collect();
        self.mesh_bbox = if self.mesh.is_empty() {
            Aabb::EMPTY
        } else {
            let (min, max) = mesh.culling_bounds();
            Aabb::from_points(min, max)
        };

        log::info!(
            "Scene mesh set: {} triangles, bounds center {:?}, size {:.3}",
            self.mesh.len(),
            mesh.center(),
            mesh.size()
        );
        Ok(())
    }

    /// Remove the mesh and its culling box.
    pub fn clear_mesh(&mut self) {
        self.mesh.clear();
        self.mesh_bbox = Aabb::EMPTY;
    }

    /// Returns true if every mesh vertex lies inside the culling box.
    pub fn mesh_bounds_contain_triangles(&self) -> bool {
        self.mesh
            .iter()
            .flat_map(|tri| tri.vertices())
            .all(|v| self.mesh_bbox.contains_point(v))
    }

    /// Total number of primitives, ground included.
    pub fn primitive_count(&self) -> usize {
        1 + self.spheres.len() + self.boxes.len() + self.mesh.len()
    }

    /// Find the nearest hit strictly inside `ray_t` across the whole scene.
    ///
    /// Each hit shrinks the range, so later primitives are only tested
    /// against the nearest distance found so far. The mesh is only traversed
    /// if its box is hit within that shrunk range.
    pub fn hit_world(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest = None;
        let mut range = ray_t;

        let hit = self.ground.hit(ray, range);
        keep_nearest(&mut closest, &mut range, hit);

        for sphere in &self.spheres {
            let hit = sphere.hit(ray, range);
            keep_nearest(&mut closest, &mut range, hit);
        }

        for cuboid in &self.boxes {
            let hit = cuboid.hit(ray, range);
            keep_nearest(&mut closest, &mut range, hit);
        }

        if !self.mesh.is_empty() && self.mesh_bbox.hit(ray, range) {
            for triangle in &self.mesh {
                let hit = triangle.hit(ray, range);
                keep_nearest(&mut closest, &mut range, hit);
            }
        }

        closest
    }
}

impl Hittable for Scene {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.hit_world(ray, ray_t)
    }

    fn bounding_box(&self) -> Aabb {
        let spheres = self.spheres.iter().map(Hittable::bounding_box);
        let boxes = self.boxes.iter().map(Hittable::bounding_box);
        spheres
            .chain(boxes)
            .chain(std::iter::once(self.mesh_bbox))
            .fold(self.ground.bounding_box(), |acc, b| Aabb::surrounding(&acc, &b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian, Metal};
    use glint_math::Vec3;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn diffuse(albedo: Color) -> Arc<dyn Material> {
        Arc::new(Lambertian::new(albedo))
    }

    /// Ground far below the test geometry so it only catches downward rays.
    fn distant_ground() -> Sphere {
        Sphere::new(Vec3::new(0.0, -1000.5, 0.0), 1000.0, diffuse(Color::splat(0.8)))
    }

    fn ray_t() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    fn tetrahedron() -> MeshData {
        MeshData::from_positions(
            vec![
                Vec3::new(-0.5, 0.0, -0.5),
                Vec3::new(0.5, 0.0, -0.5),
                Vec3::new(0.0, 0.0, 0.5),
                Vec3::new(0.0, 0.8, 0.0),
            ],
            vec![0, 2, 1, 0, 1, 3, 1, 2, 3, 2, 0, 3],
        )
    }

    #[test]
    fn test_hit_world_picks_nearest_sphere() {
        let scene = Scene::new(distant_ground()).with_spheres(vec![
            // Listed far-to-near so narrowing has to replace earlier hits
            Sphere::new(Vec3::new(0.0, 0.0, -6.0), 0.5, diffuse(Color::ONE)),
            Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, diffuse(Color::ONE)),
            Sphere::new(Vec3::new(0.0, 0.0, -4.0), 0.5, diffuse(Color::ONE)),
        ]);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = scene.hit_world(&ray, ray_t()).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_hit_world_box_in_front_of_sphere() {
        let scene = Scene::new(distant_ground())
            .with_spheres(vec![Sphere::new(Vec3::new(0.0, 0.0, -3.0), 0.5, diffuse(Color::ONE))])
            .with_boxes(vec![Cuboid::new(
                Vec3::new(0.0, 0.0, -1.5),
                Vec3::splat(0.25),
                diffuse(Color::ONE),
            )]);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = scene.hit_world(&ray, ray_t()).unwrap();
        assert!((rec.t - 1.25).abs() < 1e-4);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_hit_world_reports_material_of_nearest() {
        let mirror = Arc::new(Metal::new(Color::new(0.9, 0.1, 0.1)));
        let scene = Scene::new(distant_ground()).with_spheres(vec![
            Sphere::new(Vec3::new(0.0, 0.0, -4.0), 0.5, diffuse(Color::ONE)),
            Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, mirror.clone()),
        ]);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = scene.hit_world(&ray, ray_t()).unwrap();
        assert!(std::ptr::addr_eq(rec.material, mirror.as_ref()));
    }

    #[test]
    fn test_hit_world_miss_returns_none() {
        let scene = Scene::new(distant_ground())
            .with_spheres(vec![Sphere::new(Vec3::new(0.0, 0.0, -2.0), 0.5, diffuse(Color::ONE))]);

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert!(scene.hit_world(&ray, ray_t()).is_none());
    }

    #[test]
    fn test_hit_world_is_nearest_of_all_primitives() {
        let mut scene = Scene::new(distant_ground())
            .with_spheres(vec![
                Sphere::new(Vec3::new(1.0, 0.0, 0.0), 0.3, diffuse(Color::ONE)),
                Sphere::new(Vec3::new(-1.0, 0.2, 0.3), 0.4, diffuse(Color::ONE)),
                Sphere::new(Vec3::new(0.0, 0.5, -1.0), 0.5, diffuse(Color::ONE)),
            ])
            .with_boxes(vec![
                Cuboid::new(Vec3::new(0.0, -0.25, 0.8), Vec3::splat(0.25), diffuse(Color::ONE)),
                Cuboid::new(Vec3::new(0.6, 0.6, 0.6), Vec3::new(0.2, 0.1, 0.3), diffuse(Color::ONE)),
            ]);
        scene
            .set_mesh(&tetrahedron().translated(Vec3::new(0.0, 0.0, -0.2)), diffuse(Color::ONE))
            .unwrap();

        let mut rng = StdRng::seed_from_u64(21);
        let range = ray_t();
        let mut hits = 0;

        for _ in 0..2000 {
            let origin = Vec3::new(
                rng.gen_range(-3.0..3.0),
                rng.gen_range(-0.4..3.0),
                rng.gen_range(-3.0..3.0),
            );
            let target = Vec3::new(
                rng.gen_range(-1.2..1.2),
                rng.gen_range(-0.4..1.0),
                rng.gen_range(-1.2..1.2),
            );
            let ray = Ray::new(origin, target - origin);

            let individual = std::iter::once(scene.ground.hit(&ray, range))
                .chain(scene.spheres.iter().map(|s| s.hit(&ray, range)))
                .chain(scene.boxes.iter().map(|b| b.hit(&ray, range)))
                .chain(scene.mesh.iter().map(|t| t.hit(&ray, range)))
                .flatten()
                .map(|rec| rec.t)
                .fold(f32::INFINITY, f32::min);

            match scene.hit_world(&ray, range) {
                Some(rec) => {
                    hits += 1;
                    assert!(range.surrounds(rec.t));
                    assert!((rec.t - individual).abs() <= 1e-5 * individual.max(1.0));
                }
                None => assert_eq!(individual, f32::INFINITY),
            }
        }

        assert!(hits > 0);
    }

    #[test]
    fn test_set_mesh_builds_triangles_and_bounds() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut scene = Scene::new(distant_ground());
        scene.set_mesh(&tetrahedron(), diffuse(Color::ONE)).unwrap();

        assert_eq!(scene.mesh.len(), 4);
        assert!(scene.mesh_bounds_contain_triangles());
        assert_eq!(scene.primitive_count(), 5);

        scene.clear_mesh();
        assert!(scene.mesh.is_empty());
        assert_eq!(scene.mesh_bbox, Aabb::EMPTY);
    }

    #[test]
    fn test_set_mesh_rejects_bounds_that_would_cull() {
        let mut scene = Scene::new(distant_ground());
        scene.set_mesh(&tetrahedron(), diffuse(Color::ONE)).unwrap();

        let mut shrunk = tetrahedron();
        shrunk.max.y = 0.4;
        assert!(scene.set_mesh(&shrunk, diffuse(Color::ONE)).is_err());

        // Previous mesh survives the failed update
        assert_eq!(scene.mesh.len(), 4);
    }

    #[test]
    fn test_vertex_within_tolerance_of_bounds_is_not_culled() {
        // The loader reports max.x = 1.0, but one vertex sits just past it,
        // inside the slack that validation accepts
        let mesh = MeshData::new(
            vec![
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.00005, -1.0, 0.0),
                Vec3::new(-1.0, 1.0, 0.0),
            ],
            vec![0, 1, 2],
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
        );
        assert!(mesh.validate().is_ok());

        let mut scene = Scene::new(distant_ground());
        scene.set_mesh(&mesh, diffuse(Color::ONE)).unwrap();
        assert!(scene.mesh_bounds_contain_triangles());

        // Lands on the sliver of the triangle beyond the reported corner
        let ray = Ray::new(Vec3::new(1.00003, -0.99999, 5.0), Vec3::NEG_Z);
        let direct = scene.mesh[0].hit(&ray, ray_t()).expect("ray hits the triangle");
        let rec = scene
            .hit_world(&ray, ray_t())
            .expect("culling box must not drop the hit");
        assert!((rec.t - direct.t).abs() < 1e-5);
    }

    #[test]
    fn test_mesh_hit_through_bounding_box() {
        let mut scene = Scene::new(distant_ground());
        scene.set_mesh(&tetrahedron(), diffuse(Color::ONE)).unwrap();

        // Just off the apex so the ray lands inside a face
        let ray = Ray::new(Vec3::new(0.02, 3.0, 0.01), Vec3::NEG_Y);
        let rec = scene.hit_world(&ray, ray_t()).unwrap();
        assert!(rec.p.y > 0.0 && rec.p.y < 0.8);
        assert!(scene.mesh_bbox.contains_point(rec.p));
    }

    #[test]
    fn test_flat_mesh_bounds_never_cull_a_contained_triangle() {
        // Every vertex on z=0: the reported bounds have zero depth
        let flat = MeshData::from_positions(
            vec![
                Vec3::new(-1.0, -1.0, 0.0),
                Vec3::new(1.0, -1.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![0, 1, 2],
        );
        assert_eq!(flat.min.z, flat.max.z);

        let mut scene = Scene::new(distant_ground());
        scene.set_mesh(&flat, diffuse(Color::ONE)).unwrap();
        let triangle = scene.mesh[0].clone();

        let mut rng = StdRng::seed_from_u64(34);
        for _ in 0..500 {
            let origin = Vec3::new(
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-0.4..2.0),
                rng.gen_range(0.5..3.0),
            );
            let target = Vec3::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0), 0.0);
            let ray = Ray::new(origin, target - origin);

            if let Some(direct) = triangle.hit(&ray, ray_t()) {
                assert!(scene.mesh_bbox.hit(&ray, ray_t()));
                let rec = scene
                    .hit_world(&ray, ray_t())
                    .expect("box gate must not cull a triangle hit");
                assert!(rec.t <= direct.t);
            }
        }
    }

    #[test]
    fn test_mesh_gate_uses_shrunk_range() {
        // A sphere in front of the mesh: the gate sees the narrowed range and
        // the triangles behind the sphere cannot override it.
        let mut scene = Scene::new(distant_ground())
            .with_spheres(vec![Sphere::new(Vec3::new(0.0, 2.0, 0.0), 0.25, diffuse(Color::ONE))]);
        scene.set_mesh(&tetrahedron(), diffuse(Color::ONE)).unwrap();

        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Y);
        let rec = scene.hit_world(&ray, ray_t()).unwrap();
        assert!((rec.t - 0.75).abs() < 1e-4);
    }

    #[test]
    fn test_scene_bounding_box_covers_everything() {
        let mut scene = Scene::new(distant_ground())
            .with_spheres(vec![Sphere::new(Vec3::new(5.0, 0.0, 0.0), 1.0, diffuse(Color::ONE))]);
        scene.set_mesh(&tetrahedron(), diffuse(Color::ONE)).unwrap();

        let bbox = scene.bounding_box();
        assert!(bbox.contains_point(Vec3::new(6.0, 0.0, 0.0)));
        assert!(bbox.contains_point(Vec3::new(0.0, 0.8, 0.0)));
    }
}
