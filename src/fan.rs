//! Wedge fan assembly.
//!
//! An N-gon face is meshed by fanning N copies of the subdivided base
//! triangle around the polygon centroid: each copy is remapped
//! barycentrically into one fan wedge, the N apex copies collapse into one
//! centroid point, and neighboring wedges are fused along their shared rank.
//! Ids stay string-keyed here; the dome builder interns the result into the
//! point arena afterwards.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{GeometryError, Result, StitchError};
use crate::math::barycentric::BarycentricFrame;
use crate::math::polygon::fan_triangles;
use crate::math::Point2;
use crate::subdivision::BaseTriangle;

/// A flat subdivided N-gon face.
#[derive(Debug, Clone)]
pub struct FaceMesh {
    points: BTreeMap<String, Point2>,
    adjacency: BTreeMap<String, BTreeSet<String>>,
    corners: Vec<String>,
    side_chains: Vec<Vec<String>>,
}

impl FaceMesh {
    /// All point coordinates, keyed by id.
    #[must_use]
    pub fn points(&self) -> &BTreeMap<String, Point2> {
        &self.points
    }

    /// Symmetric adjacency over point ids.
    #[must_use]
    pub fn adjacency(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.adjacency
    }

    /// Rim corner ids in cyclic order. Three for a triangular face, N for an
    /// N-gon (the fused centroid is not a corner).
    #[must_use]
    pub fn corners(&self) -> &[String] {
        &self.corners
    }

    /// Boundary chains; entry `i` runs from corner `i` to corner `i + 1`
    /// (cyclically), endpoints included.
    #[must_use]
    pub fn side_chains(&self) -> &[Vec<String>] {
        &self.side_chains
    }

    /// Whether every adjacency entry is mirrored and names a known point.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.adjacency.iter().all(|(id, neighbors)| {
            self.points.contains_key(id)
                && neighbors.iter().all(|n| {
                    self.adjacency
                        .get(n)
                        .is_some_and(|back| back.contains(id))
                })
        })
    }
}

/// Meshes one N-sided face from the subdivided base triangle.
///
/// # Errors
///
/// Returns [`GeometryError::TooFewSides`] for `sides < 3`,
/// [`GeometryError::DegenerateTriangle`] if the base corners are collinear,
/// and [`StitchError::ChainMismatch`] if the two ranks being fused disagree
/// in length (an internal-consistency fault of the base triangle).
pub fn assemble_face(base: &BaseTriangle, sides: usize) -> Result<FaceMesh> {
    if sides < 3 {
        return Err(GeometryError::TooFewSides(sides).into());
    }
    if sides == 3 {
        return Ok(FaceMesh {
            points: base.points().clone(),
            adjacency: base.adjacency().clone(),
            corners: base.corners().to_vec(),
            side_chains: base.side_chains().to_vec(),
        });
    }

    let wedges = fan_triangles(sides)?;
    let corner_coords = [
        base.points()[&base.corners()[0]],
        base.points()[&base.corners()[1]],
        base.points()[&base.corners()[2]],
    ];
    let frame = BarycentricFrame::new(&corner_coords)?;

    // Remap every base point into each wedge, prefixing ids with the wedge
    // index.
    let mut points = BTreeMap::new();
    let mut adjacency: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for (wedge, triangle) in wedges.iter().enumerate() {
        for (id, coord) in base.points() {
            points.insert(format!("{wedge}_{id}"), frame.map_to(coord, triangle));
        }
        for (id, neighbors) in base.adjacency() {
            adjacency.insert(
                format!("{wedge}_{id}"),
                neighbors.iter().map(|n| format!("{wedge}_{n}")).collect(),
            );
        }
    }

    // Collapse all apex copies into wedge 0's.
    let apex = format!("0_{}", base.corners()[2]);
    for wedge in 1..sides {
        let copy = format!("{wedge}_{}", base.corners()[2]);
        fuse(&mut points, &mut adjacency, &apex, &copy);
    }

    // Fuse each wedge's right rank with the previous wedge's left rank; the
    // right copy survives.
    for wedge in 0..sides {
        let previous = (wedge + sides - 1) % sides;
        let right: Vec<String> = base
            .right_rank()
            .iter()
            .map(|id| format!("{wedge}_{id}"))
            .collect();
        let left: Vec<String> = base
            .left_rank()
            .iter()
            .map(|id| format!("{previous}_{id}"))
            .collect();
        if right.len() != left.len() {
            return Err(StitchError::ChainMismatch {
                left: left.len(),
                right: right.len(),
                context: format!("fan seam between wedges {previous} and {wedge}"),
            }
            .into());
        }
        for (keep, drop) in right.iter().zip(&left) {
            fuse(&mut points, &mut adjacency, keep, drop);
        }
    }

    let corners: Vec<String> = (0..sides)
        .map(|wedge| format!("{wedge}_{}", base.corners()[0]))
        .collect();

    // Side chain i is wedge i's outer chain; its last point was fused away
    // in favor of the next wedge's first.
    let side_chains: Vec<Vec<String>> = (0..sides)
        .map(|wedge| {
            let mut chain: Vec<String> = base
                .outer_chain()
                .iter()
                .map(|id| format!("{wedge}_{id}"))
                .collect();
            if let Some(last) = chain.last_mut() {
                *last = corners[(wedge + 1) % sides].clone();
            }
            chain
        })
        .collect();

    Ok(FaceMesh {
        points,
        adjacency,
        corners,
        side_chains,
    })
}

/// Moves every connection of `drop` onto `keep` and deletes `drop`.
fn fuse(
    points: &mut BTreeMap<String, Point2>,
    adjacency: &mut BTreeMap<String, BTreeSet<String>>,
    keep: &str,
    drop: &str,
) {
    let Some(dropped) = adjacency.remove(drop) else {
        return;
    };
    for neighbor in &dropped {
        if neighbor == keep {
            continue;
        }
        if let Some(entry) = adjacency.get_mut(neighbor) {
            entry.remove(drop);
            entry.insert(keep.to_owned());
        }
        adjacency
            .entry(keep.to_owned())
            .or_default()
            .insert(neighbor.clone());
    }
    if let Some(entry) = adjacency.get_mut(keep) {
        entry.remove(drop);
    }
    points.remove(drop);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::subdivision::Scheme;

    #[test]
    fn triangular_face_passes_through() {
        let base = Scheme::Alternate.subdivide(2).unwrap();
        let face = assemble_face(&base, 3).unwrap();
        assert_eq!(face.points().len(), base.points().len());
        assert_eq!(face.corners().len(), 3);
        assert_eq!(face.side_chains().len(), 3);
        assert!(face.is_symmetric());
    }

    #[test]
    fn square_fan_at_frequency_one() {
        let base = Scheme::Alternate.subdivide(1).unwrap();
        let face = assemble_face(&base, 4).unwrap();
        // 4 rim corners plus the shared centroid.
        assert_eq!(face.points().len(), 5);
        assert_eq!(face.corners().len(), 4);
        assert!(face.is_symmetric());

        // The centroid connects to every rim corner.
        let centroid = "0_1_0";
        let neighbors = &face.adjacency()[centroid];
        assert_eq!(neighbors.len(), 4);
        for corner in face.corners() {
            assert!(neighbors.contains(corner), "{corner}");
        }
    }

    #[test]
    fn square_fan_at_frequency_two() {
        let base = Scheme::Alternate.subdivide(2).unwrap();
        let face = assemble_face(&base, 4).unwrap();
        // Each wedge holds 6 lattice points; fusion leaves
        // 4 corners + 4 rim midpoints + 4 seam midpoints + 1 centroid.
        assert_eq!(face.points().len(), 13);
        assert!(face.is_symmetric());
    }

    #[test]
    fn side_chains_wrap_around_the_rim() {
        let base = Scheme::Alternate.subdivide(2).unwrap();
        let face = assemble_face(&base, 5).unwrap();
        let chains = face.side_chains();
        assert_eq!(chains.len(), 5);
        for (i, chain) in chains.iter().enumerate() {
            assert_eq!(chain.first().unwrap(), &face.corners()[i]);
            assert_eq!(chain.last().unwrap(), &face.corners()[(i + 1) % 5]);
            // Every chain point must have survived fusion.
            for id in chain {
                assert!(face.points().contains_key(id), "{id}");
            }
        }
    }

    #[test]
    fn seam_points_exist_exactly_once() {
        let base = Scheme::Alternate.subdivide(3).unwrap();
        let face = assemble_face(&base, 6).unwrap();
        // 10 points per wedge, 6 wedges = 60 copies; fusing 5 apex copies
        // and 6 seams of 3 pairs each leaves 37: 6 corners, 12 rim
        // interiors, 12 seam interiors, 6 wedge interiors, 1 centroid.
        assert_eq!(face.points().len(), 37);
        assert!(face.is_symmetric());
    }

    #[test]
    fn too_few_sides_rejected() {
        let base = Scheme::Midpoint.subdivide(1).unwrap();
        assert!(assemble_face(&base, 2).is_err());
    }
}
