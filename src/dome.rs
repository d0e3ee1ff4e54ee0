//! The dome construction pipeline.
//!
//! `build_dome` runs the whole chain: seed lookup, face discovery, base
//! triangle subdivision, fan assembly per face shape, lifting each face to
//! 3D, interning into the point arena, seam stitching, sphere projection
//! and final triangle extraction. Failures surface immediately; no stage is
//! retried.

use std::collections::BTreeMap;

use log::debug;

use crate::error::Result;
use crate::fan::{assemble_face, FaceMesh};
use crate::graph::enumerate_cycles;
use crate::lift::lift_face;
use crate::math::{Point3, Vector3, TOLERANCE};
use crate::mesh::{Mesh, PointId};
use crate::polyhedron::Polyhedron;
use crate::project::project_to_sphere;
use crate::seed::Seed;
use crate::stitch::{stitch_seams, ChainKey};
use crate::subdivision::Scheme;

/// A finished geodesic dome mesh.
#[derive(Debug, Clone)]
pub struct Dome {
    seed_name: &'static str,
    frequency: usize,
    scheme: Scheme,
    radius: f64,
    mesh: Mesh,
    faces: Vec<[PointId; 3]>,
}

impl Dome {
    /// Mesh points with their coordinates.
    pub fn points(&self) -> impl Iterator<Item = (PointId, Point3)> + '_ {
        self.mesh.points()
    }

    /// Neighbors of a point.
    #[must_use]
    pub fn neighbors(&self, id: PointId) -> Vec<PointId> {
        self.mesh.neighbors(id)
    }

    /// Coordinate of a point.
    #[must_use]
    pub fn coord(&self, id: PointId) -> Option<Point3> {
        self.mesh.coord(id)
    }

    /// Final triangular faces.
    #[must_use]
    pub fn faces(&self) -> &[[PointId; 3]] {
        &self.faces
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.mesh.point_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.mesh.edge_count()
    }

    #[must_use]
    pub fn seed_name(&self) -> &'static str {
        self.seed_name
    }

    #[must_use]
    pub fn frequency(&self) -> usize {
        self.frequency
    }

    #[must_use]
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The underlying point arena.
    #[must_use]
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }
}

/// Builds a geodesic dome from a cataloged seed solid.
///
/// Construction is deterministic: the same arguments always produce the
/// same mesh up to arena id assignment.
///
/// # Errors
///
/// Propagates failures from any pipeline stage: unknown seed, degenerate
/// seed structure, invalid frequency, or an internal chain inconsistency.
pub fn build_dome(
    seed_name: &str,
    frequency: usize,
    scheme: Scheme,
    radius: f64,
) -> Result<Dome> {
    let seed = Seed::by_name(seed_name)?;
    let polyhedron = Polyhedron::from_seed(&seed)?;
    debug!(
        "seed `{}`: {} vertices, {} faces",
        polyhedron.name(),
        polyhedron.vertices().len(),
        polyhedron.faces().len()
    );

    let base = scheme.subdivide(frequency)?;

    // One assembled face mesh per distinct face shape.
    let mut shapes: BTreeMap<usize, FaceMesh> = BTreeMap::new();
    for face in polyhedron.faces() {
        let sides = face.len();
        if !shapes.contains_key(&sides) {
            shapes.insert(sides, assemble_face(&base, sides)?);
        }
    }

    // Lift every face to its 3D position and intern it into the arena.
    let mut mesh = Mesh::new();
    let mut chains: BTreeMap<ChainKey, Vec<PointId>> = BTreeMap::new();
    for (face_index, face) in polyhedron.faces().iter().enumerate() {
        let face_mesh = &shapes[&face.len()];
        let targets = polyhedron.face_points(face_index);
        let lifted = lift_face(face_mesh, &targets)?;

        let mut interned: BTreeMap<&str, PointId> = BTreeMap::new();
        for (id, coord) in &lifted {
            interned.insert(id, mesh.add_point(*coord));
        }
        for (id, neighbors) in face_mesh.adjacency() {
            for neighbor in neighbors {
                mesh.connect(interned[id.as_str()], interned[neighbor.as_str()]);
            }
        }
        for (side, chain) in face_mesh.side_chains().iter().enumerate() {
            chains.insert(
                (face_index, side),
                chain.iter().map(|id| interned[id.as_str()]).collect(),
            );
        }
    }
    debug!(
        "interned {} faces: {} points before stitching",
        polyhedron.faces().len(),
        mesh.point_count()
    );

    stitch_seams(&mut mesh, polyhedron.faces(), &chains)?;
    debug!(
        "stitched: {} points, {} edges",
        mesh.point_count(),
        mesh.edge_count()
    );

    project_to_sphere(&mut mesh, radius);

    let faces = extract_triangles(&mesh);
    debug!("extracted {} triangles", faces.len());

    Ok(Dome {
        seed_name: seed.name(),
        frequency,
        scheme,
        radius,
        mesh,
        faces,
    })
}

/// Facial 3-cycles of the stitched adjacency, each reported once.
///
/// Around a degree-3 point (a tetrahedron corner, for instance) the three
/// neighbors form a 3-cycle that encloses the point rather than bounding a
/// face. Such a cycle always has a common neighbor sitting radially inside
/// it, which is how it is told apart from a real face.
fn extract_triangles(mesh: &Mesh) -> Vec<[PointId; 3]> {
    enumerate_cycles(mesh.ids(), |id| mesh.neighbors(id), 3)
        .into_iter()
        .filter_map(|cycle| match cycle[..] {
            [a, b, c] if is_facial(mesh, [a, b, c]) => Some([a, b, c]),
            _ => None,
        })
        .collect()
}

/// Whether the 3-cycle bounds a face, i.e. no common neighbor of its three
/// points projects radially into its interior.
fn is_facial(mesh: &Mesh, [a, b, c]: [PointId; 3]) -> bool {
    let (Some(pa), Some(pb), Some(pc)) = (mesh.coord(a), mesh.coord(b), mesh.coord(c)) else {
        return false;
    };
    let neighbors_a = mesh.neighbors(a);
    let neighbors_b = mesh.neighbors(b);
    let neighbors_c = mesh.neighbors(c);

    for &v in &neighbors_a {
        if v == b || v == c || !neighbors_b.contains(&v) || !neighbors_c.contains(&v) {
            continue;
        }
        let Some(pv) = mesh.coord(v) else {
            continue;
        };
        if ray_hits_triangle(pv.coords, pa, pb, pc) {
            return false;
        }
    }
    true
}

/// Whether the ray from the origin through `direction` crosses the open
/// triangle `(a, b, c)`.
fn ray_hits_triangle(direction: Vector3, a: Point3, b: Point3, c: Point3) -> bool {
    let normal = (b - a).cross(&(c - a));
    let denom = normal.dot(&direction);
    if denom.abs() < TOLERANCE {
        return false;
    }
    let t = normal.dot(&a.coords) / denom;
    if t <= 0.0 {
        return false;
    }
    let hit = Point3::from(direction * t);
    let area = |p: Point3, q: Point3| (q - p).cross(&(hit - p)).dot(&normal);
    let total = normal.norm_squared();
    [area(a, b), area(b, c), area(c, a)]
        .iter()
        .all(|&w| w / total > 1e-9)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn euler(dome: &Dome) -> i64 {
        #[allow(clippy::cast_possible_wrap)]
        let chi =
            dome.point_count() as i64 - dome.edge_count() as i64 + dome.faces().len() as i64;
        chi
    }

    #[test]
    fn icosahedron_frequency_one_is_the_icosahedron() {
        let dome = build_dome("icosahedron", 1, Scheme::Alternate, 1.0).unwrap();
        assert_eq!(dome.point_count(), 12);
        assert_eq!(dome.edge_count(), 30);
        assert_eq!(dome.faces().len(), 20);
        assert_eq!(euler(&dome), 2);
    }

    #[test]
    fn icosahedron_alternate_counts() {
        for f in 1..=3 {
            let dome = build_dome("icosahedron", f, Scheme::Alternate, 1.0).unwrap();
            assert_eq!(dome.point_count(), 10 * f * f + 2, "f={f}");
            assert_eq!(dome.edge_count(), 30 * f * f, "f={f}");
            assert_eq!(dome.faces().len(), 20 * f * f, "f={f}");
        }
    }

    #[test]
    fn tetrahedron_alternate_frequency_two() {
        let dome = build_dome("tetrahedron", 2, Scheme::Alternate, 1.0).unwrap();
        assert_eq!(dome.point_count(), 10);
        assert_eq!(dome.edge_count(), 24);
        assert_eq!(dome.faces().len(), 16);
    }

    #[test]
    fn octahedron_alternate_frequency_three() {
        let dome = build_dome("octahedron", 3, Scheme::Alternate, 1.0).unwrap();
        assert_eq!(dome.point_count(), 38);
        assert_eq!(dome.edge_count(), 108);
        assert_eq!(dome.faces().len(), 72);
    }

    #[test]
    fn cube_midpoint_frequency_one() {
        let dome = build_dome("cube", 1, Scheme::Midpoint, 1.0).unwrap();
        assert_eq!(dome.point_count(), 14);
        assert_eq!(dome.edge_count(), 36);
        assert_eq!(dome.faces().len(), 24);
        assert_eq!(euler(&dome), 2);
    }

    #[test]
    fn frequency_one_is_scheme_invariant() {
        for seed in ["cube", "icosahedron", "dodecahedron"] {
            let reference = build_dome(seed, 1, Scheme::Alternate, 1.0).unwrap();
            for scheme in [Scheme::Midpoint, Scheme::Triacon] {
                let dome = build_dome(seed, 1, scheme, 1.0).unwrap();
                assert_eq!(dome.point_count(), reference.point_count(), "{seed} {scheme}");
                assert_eq!(dome.edge_count(), reference.edge_count(), "{seed} {scheme}");
                assert_eq!(dome.faces().len(), reference.faces().len(), "{seed} {scheme}");
            }
        }
    }

    #[test]
    fn every_point_lands_on_the_sphere() {
        let dome = build_dome("icosahedron", 2, Scheme::Alternate, 3.5).unwrap();
        for (_, coord) in dome.points() {
            assert_relative_eq!(coord.coords.norm(), 3.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn adjacency_stays_symmetric() {
        let dome = build_dome("dodecahedron", 2, Scheme::Alternate, 1.0).unwrap();
        assert!(dome.mesh().is_symmetric());
        assert_eq!(euler(&dome), 2);
    }

    #[test]
    fn no_duplicate_points_survive_stitching() {
        let dome = build_dome("tetrahedron", 2, Scheme::Alternate, 1.0).unwrap();
        let coords: Vec<_> = dome.points().map(|(_, c)| c).collect();
        for i in 0..coords.len() {
            for j in i + 1..coords.len() {
                assert!((coords[i] - coords[j]).norm() > 1e-9, "{i} and {j} coincide");
            }
        }
    }

    #[test]
    fn triacon_cube_is_closed() {
        let dome = build_dome("cube", 2, Scheme::Triacon, 1.0).unwrap();
        assert!(dome.mesh().is_symmetric());
        assert_eq!(euler(&dome), 2);
    }

    #[test]
    fn error_paths() {
        assert!(build_dome("hypercube", 2, Scheme::Alternate, 1.0).is_err());
        assert!(build_dome("cube", 0, Scheme::Alternate, 1.0).is_err());
    }

    #[test]
    fn accessors_echo_the_request() {
        let dome = build_dome("Icosahedron", 2, Scheme::Alternate, 4.0).unwrap();
        assert_eq!(dome.seed_name(), "icosahedron");
        assert_eq!(dome.frequency(), 2);
        assert_eq!(dome.scheme(), Scheme::Alternate);
        assert_relative_eq!(dome.radius(), 4.0);
    }
}
