//! Built-in demo scene: a few small spheres and a mirror mesh on a large
//! ground sphere.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use glint_core::MeshData;
use glint_math::{Mat4, Vec3};
use glint_renderer::{Color, Cuboid, Hittable, Lambertian, Material, Metal, Scene, Sphere};

use crate::mesh_loader;

/// Meshes are lifted so they rest on the ground rather than cutting into it.
pub const MESH_LIFT: Vec3 = Vec3::new(0.0, 0.135, 0.0);

/// Camera looking at the scene from slightly above.
pub fn default_view() -> Mat4 {
    Mat4::look_at_rh(Vec3::new(0.0, 0.6, 3.0), Vec3::ZERO, Vec3::Y)
}

/// Octahedron used when no OBJ file is given.
pub fn builtin_mesh() -> MeshData {
    let r = 0.35;
    let positions = vec![
        Vec3::new(r, 0.0, 0.0),
        Vec3::new(-r, 0.0, 0.0),
        Vec3::new(0.0, r, 0.0),
        Vec3::new(0.0, -r, 0.0),
        Vec3::new(0.0, 0.0, r),
        Vec3::new(0.0, 0.0, -r),
    ];
    // Counter-clockwise seen from outside
    let indices = vec![
        0, 2, 4, //
        4, 2, 1, //
        1, 2, 5, //
        5, 2, 0, //
        4, 3, 0, //
        1, 3, 4, //
        5, 3, 1, //
        0, 3, 5, //
    ];
    MeshData::from_positions(positions, indices)
}

/// Build the demo scene around `mesh_path`, or the built-in mesh.
pub fn build(mesh_path: Option<&Path>) -> Result<Scene> {
    let material_ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let material_center: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let material_left: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.8, 0.8)));
    let material_right: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2)));
    let material_mirror: Arc<dyn Material> = Arc::new(Metal::new(Color::ONE));

    let ground = Sphere::new(Vec3::new(0.0, -1000.5, 0.0), 1000.0, material_ground);

    let mut scene = Scene::new(ground)
        .with_spheres(vec![
            Sphere::new(Vec3::new(1.0, 0.0, 0.0), 0.1, material_right.clone()),
            Sphere::new(Vec3::new(-1.0, 0.0, 0.0), 0.2, material_left.clone()),
            Sphere::new(Vec3::new(2.0, 0.0, 0.0), 0.25, material_right),
            Sphere::new(Vec3::new(-1.0, 2.0, 0.0), 0.1, material_left),
            Sphere::new(Vec3::new(-1.0, 0.0, 1.0), 0.3, material_mirror.clone()),
        ])
        .with_boxes(vec![Cuboid::new(
            Vec3::new(0.8, -0.35, -0.8),
            Vec3::splat(0.15),
            material_center,
        )]);

    let mesh = match mesh_path {
        Some(path) => mesh_loader::load_obj(path)?,
        None => builtin_mesh(),
    };
    scene.set_mesh(&mesh.translated(MESH_LIFT), material_mirror)?;

    let bounds = scene.bounding_box();
    log::info!(
        "Demo scene built: {} primitives, extent {:?} to {:?}",
        scene.primitive_count(),
        bounds.min(),
        bounds.max()
    );
    Ok(scene)
}
