//! Radial projection onto the circumscribed sphere.

use crate::math::{Point3, Vector3, TOLERANCE};
use crate::mesh::Mesh;

/// Rescales every mesh point to `radius` along its direction from the
/// origin. Idempotent: projecting an already projected mesh is a no-op up
/// to floating-point noise.
///
/// A point within [`TOLERANCE`] of the origin has no direction; it is sent
/// along `+Z` so repeated runs stay deterministic. No point of a valid
/// lifted mesh sits at the origin.
pub fn project_to_sphere(mesh: &mut Mesh, radius: f64) {
    let ids: Vec<_> = mesh.ids().collect();
    for id in ids {
        let Some(coord) = mesh.coord(id) else {
            continue;
        };
        let distance = coord.coords.norm();
        let direction = if distance < TOLERANCE {
            Vector3::z()
        } else {
            coord.coords / distance
        };
        mesh.set_coord(id, Point3::from(direction * radius));
    }
}
