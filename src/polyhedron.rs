//! Structural discovery of a seed polyhedron.
//!
//! The catalog supplies bare vertex coordinates; this module recovers the
//! edge and face structure. Edges are the shortest cluster of pairwise
//! distances, faces are the coplanar simple cycles of each expected length,
//! and the result is validated against the Euler characteristic before any
//! subdivision happens downstream.

use std::collections::BTreeMap;

use crate::error::{PolyhedronError, Result};
use crate::graph::enumerate_cycles;
use crate::math::{Point3, COPLANARITY_TOLERANCE, TOLERANCE};
use crate::seed::Seed;

/// Relative gap (as a fraction of the shortest distance) that terminates the
/// edge-length cluster when scanning sorted pairwise distances.
const EDGE_GAP_FACTOR: f64 = 1e-6;

/// A seed solid with its edge and face structure recovered.
#[derive(Debug, Clone)]
pub struct Polyhedron {
    name: &'static str,
    vertices: Vec<Point3>,
    adjacency: Vec<Vec<usize>>,
    faces: Vec<Vec<usize>>,
}

impl Polyhedron {
    /// Recovers the face structure of a seed solid.
    ///
    /// Edges are found by sorting all pairwise vertex distances and keeping
    /// the leading cluster: the scan stops at the first gap wider than
    /// [`EDGE_GAP_FACTOR`] times the shortest distance. In a uniform solid
    /// every edge has the same length up to rounding, so the cluster is
    /// exactly the edge set regardless of how close the next-shortest
    /// chord comes (the snub solids have chords within 12% of the edge
    /// length, which defeats any fixed multiplicative threshold).
    ///
    /// For each expected face size the adjacency graph is searched for
    /// simple cycles of that length; cycles whose vertices are not coplanar
    /// within [`COPLANARITY_TOLERANCE`] are polyhedron cross-sections, not
    /// faces, and are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`PolyhedronError::TooFewVertices`] for degenerate input,
    /// [`PolyhedronError::MissingFaces`] if an expected face size yields no
    /// cycles, and [`PolyhedronError::EulerMismatch`] if the recovered
    /// structure does not satisfy `V - E + F = 2`.
    pub fn from_seed(seed: &Seed) -> Result<Self> {
        let vertices = seed.vertices();
        if vertices.len() < 2 {
            return Err(PolyhedronError::TooFewVertices {
                seed: seed.name().to_owned(),
            }
            .into());
        }

        let adjacency = discover_edges(vertices);
        let edge_count: usize = adjacency.values().map(Vec::len).sum::<usize>() / 2;

        let mut faces = Vec::new();
        for &sides in seed.face_sides() {
            let neighbors = |v: usize| adjacency.get(&v).cloned().unwrap_or_default();
            let mut found: Vec<Vec<usize>> =
                enumerate_cycles(0..vertices.len(), neighbors, sides)
                    .into_iter()
                    .filter(|cycle| coplanar(vertices, cycle))
                    .collect();
            if found.is_empty() {
                return Err(PolyhedronError::MissingFaces {
                    seed: seed.name().to_owned(),
                    sides,
                }
                .into());
            }
            faces.append(&mut found);
        }

        #[allow(clippy::cast_possible_wrap)]
        let characteristic =
            vertices.len() as i64 - edge_count as i64 + faces.len() as i64;
        if characteristic != 2 {
            return Err(PolyhedronError::EulerMismatch {
                seed: seed.name().to_owned(),
                characteristic,
            }
            .into());
        }

        let adjacency = (0..vertices.len())
            .map(|v| adjacency.get(&v).cloned().unwrap_or_default())
            .collect();
        Ok(Self {
            name: seed.name(),
            vertices: vertices.to_vec(),
            adjacency,
            faces,
        })
    }

    /// Catalog name of the underlying seed.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Vertex coordinates, centered on the origin.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Adjacency lists over vertex indices.
    #[must_use]
    pub fn adjacency(&self) -> &[Vec<usize>] {
        &self.adjacency
    }

    /// Faces as cyclically ordered vertex-index lists.
    #[must_use]
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Corner coordinates of face `face`, in cycle order.
    #[must_use]
    pub fn face_points(&self, face: usize) -> Vec<Point3> {
        self.faces[face]
            .iter()
            .map(|&v| self.vertices[v])
            .collect()
    }
}

/// Adjacency lists over vertex indices, from the shortest distance cluster.
fn discover_edges(vertices: &[Point3]) -> BTreeMap<usize, Vec<usize>> {
    let mut pairs = Vec::new();
    for i in 0..vertices.len() {
        for j in i + 1..vertices.len() {
            let d = (vertices[i] - vertices[j]).norm();
            if d > TOLERANCE {
                pairs.push((d, i, j));
            }
        }
    }
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut adjacency: BTreeMap<usize, Vec<usize>> =
        (0..vertices.len()).map(|i| (i, Vec::new())).collect();
    let Some(&(shortest, ..)) = pairs.first() else {
        return adjacency;
    };

    let mut previous = shortest;
    for (d, i, j) in pairs {
        if d - previous > shortest * EDGE_GAP_FACTOR {
            break;
        }
        previous = d;
        adjacency.entry(i).or_default().push(j);
        adjacency.entry(j).or_default().push(i);
    }
    adjacency
}

/// Whether the cycle's vertices all lie in the plane of its first three.
fn coplanar(vertices: &[Point3], cycle: &[usize]) -> bool {
    if cycle.len() <= 3 {
        return true;
    }
    let origin = vertices[cycle[0]];
    let normal = (vertices[cycle[1]] - origin).cross(&(vertices[cycle[2]] - origin));
    let norm = normal.norm();
    if norm < TOLERANCE {
        return false;
    }
    let normal = normal / norm;
    cycle[3..]
        .iter()
        .all(|&v| (vertices[v] - origin).dot(&normal).abs() < COPLANARITY_TOLERANCE)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn face_census(poly: &Polyhedron) -> BTreeMap<usize, usize> {
        let mut census = BTreeMap::new();
        for face in poly.faces() {
            *census.entry(face.len()).or_insert(0) += 1;
        }
        census
    }

    #[test]
    fn icosahedron_structure() {
        let poly = Polyhedron::from_seed(&Seed::by_name("icosahedron").unwrap()).unwrap();
        assert_eq!(poly.vertices().len(), 12);
        assert_eq!(face_census(&poly), BTreeMap::from([(3, 20)]));
    }

    #[test]
    fn cube_structure() {
        let poly = Polyhedron::from_seed(&Seed::by_name("cube").unwrap()).unwrap();
        assert_eq!(face_census(&poly), BTreeMap::from([(4, 6)]));
    }

    #[test]
    fn truncated_icosahedron_structure() {
        let poly =
            Polyhedron::from_seed(&Seed::by_name("truncated icosahedron").unwrap()).unwrap();
        assert_eq!(face_census(&poly), BTreeMap::from([(5, 12), (6, 20)]));
    }

    #[test]
    fn snub_cube_structure() {
        // Chord lengths close to the edge length make this the stress case
        // for edge classification.
        let poly = Polyhedron::from_seed(&Seed::by_name("snub cube").unwrap()).unwrap();
        assert_eq!(face_census(&poly), BTreeMap::from([(3, 32), (4, 6)]));
    }

    #[test]
    fn snub_dodecahedron_structure() {
        let poly =
            Polyhedron::from_seed(&Seed::by_name("snub dodecahedron").unwrap()).unwrap();
        assert_eq!(face_census(&poly), BTreeMap::from([(3, 80), (5, 12)]));
    }

    #[test]
    fn every_cataloged_solid_is_euler_valid() {
        for name in Seed::names() {
            let seed = Seed::by_name(name).unwrap();
            // from_seed validates V - E + F = 2 internally.
            assert!(Polyhedron::from_seed(&seed).is_ok(), "{name}");
        }
    }

    #[test]
    fn face_points_follow_cycle_order() {
        let poly = Polyhedron::from_seed(&Seed::by_name("tetrahedron").unwrap()).unwrap();
        let points = poly.face_points(0);
        assert_eq!(points.len(), 3);
        let edge = (points[1] - points[0]).norm();
        assert!((edge - (points[2] - points[1]).norm()).abs() < 1e-9);
    }
}
