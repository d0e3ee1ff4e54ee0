//! Seam stitching between lifted faces.
//!
//! Every face is lifted and interned independently, so each seed edge is
//! represented twice: once by the boundary chain of each incident face. A
//! seam merges those two chains pairwise. Chains registered with opposite
//! orientation are reversed before pairing, and ids are resolved through the
//! arena's alias table, so corner points already unified by an earlier seam
//! collapse to a no-op merge instead of corrupting later chains.

use std::collections::BTreeMap;

use log::trace;

use crate::error::{Result, StitchError};
use crate::mesh::{Mesh, PointId};

/// Key of a face boundary chain: face index and side index, where side `i`
/// of a face runs from its corner `i` to corner `i + 1` (cyclically).
pub type ChainKey = (usize, usize);

/// Fuses the duplicated boundary chains of adjacent faces.
///
/// `faces` are the seed faces as vertex-index cycles; `chains` holds the
/// interned boundary chain of every face side. An unordered seed-vertex
/// pair shared by exactly two face sides is a seam; each seam is stitched
/// strictly in sequence.
///
/// # Errors
///
/// Returns [`StitchError::MissingChain`] if a face side has no registered
/// chain and [`StitchError::ChainMismatch`] if the two chains of a seam
/// differ in length. Both indicate an upstream construction bug.
pub fn stitch_seams(
    mesh: &mut Mesh,
    faces: &[Vec<usize>],
    chains: &BTreeMap<ChainKey, Vec<PointId>>,
) -> Result<()> {
    // Unordered seed edge -> incident (face, side, runs-forward) entries,
    // where "forward" means the side runs from the smaller seed vertex.
    let mut edge_sides: BTreeMap<(usize, usize), Vec<(usize, usize, bool)>> = BTreeMap::new();
    for (face, cycle) in faces.iter().enumerate() {
        for side in 0..cycle.len() {
            let a = cycle[side];
            let b = cycle[(side + 1) % cycle.len()];
            let key = (a.min(b), a.max(b));
            edge_sides.entry(key).or_default().push((face, side, a < b));
        }
    }

    for (edge, incidences) in &edge_sides {
        let [(face_1, side_1, forward_1), (face_2, side_2, forward_2)] = incidences[..] else {
            continue;
        };
        let keep = oriented_chain(chains, face_1, side_1, forward_1)?;
        let drop = oriented_chain(chains, face_2, side_2, forward_2)?;
        if keep.len() != drop.len() {
            return Err(StitchError::ChainMismatch {
                left: drop.len(),
                right: keep.len(),
                context: format!("seam over seed edge {edge:?}"),
            }
            .into());
        }
        trace!(
            "stitching seed edge {edge:?}: face {face_1} side {side_1} <- face {face_2} side {side_2}"
        );
        for (keep_id, drop_id) in keep.iter().zip(&drop) {
            mesh.merge(*keep_id, *drop_id);
        }
    }
    Ok(())
}

/// Fetches a side chain oriented from the smaller seed vertex to the larger.
fn oriented_chain(
    chains: &BTreeMap<ChainKey, Vec<PointId>>,
    face: usize,
    side: usize,
    forward: bool,
) -> Result<Vec<PointId>> {
    let chain = chains.get(&(face, side)).ok_or_else(|| StitchError::MissingChain {
        context: format!("face {face} side {side}"),
    })?;
    let mut chain = chain.clone();
    if !forward {
        chain.reverse();
    }
    Ok(chain)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    /// Two triangles sharing seed edge (0, 1), each interned separately with
    /// a midpoint on the shared side.
    fn two_faces() -> (Mesh, Vec<Vec<usize>>, BTreeMap<ChainKey, Vec<PointId>>) {
        let mut mesh = Mesh::new();
        let faces = vec![vec![0, 1, 2], vec![1, 0, 3]];

        // Face 0: corners a0 (seed 0), b0 (seed 1), c; midpoint m0.
        let a0 = mesh.add_point(Point3::new(0.0, 0.0, 0.0));
        let m0 = mesh.add_point(Point3::new(0.5, 0.0, 0.0));
        let b0 = mesh.add_point(Point3::new(1.0, 0.0, 0.0));
        let c = mesh.add_point(Point3::new(0.5, 1.0, 0.0));
        // Face 1: duplicated corners b1 (seed 1), a1 (seed 0); midpoint m1.
        let b1 = mesh.add_point(Point3::new(1.0, 0.0, 0.0));
        let m1 = mesh.add_point(Point3::new(0.5, 0.0, 0.0));
        let a1 = mesh.add_point(Point3::new(0.0, 0.0, 0.0));
        let d = mesh.add_point(Point3::new(0.5, -1.0, 0.0));

        for (x, y) in [(a0, m0), (m0, b0), (b0, c), (c, a0)] {
            mesh.connect(x, y);
        }
        for (x, y) in [(b1, m1), (m1, a1), (a1, d), (d, b1)] {
            mesh.connect(x, y);
        }

        let mut chains = BTreeMap::new();
        // Face 0 side 0 runs seed 0 -> 1; face 1 side 0 runs seed 1 -> 0.
        chains.insert((0, 0), vec![a0, m0, b0]);
        chains.insert((0, 1), vec![b0, c]);
        chains.insert((0, 2), vec![c, a0]);
        chains.insert((1, 0), vec![b1, m1, a1]);
        chains.insert((1, 1), vec![a1, d]);
        chains.insert((1, 2), vec![d, b1]);
        (mesh, faces, chains)
    }

    #[test]
    fn shared_chain_is_fused_pairwise() {
        let (mut mesh, faces, chains) = two_faces();
        assert_eq!(mesh.point_count(), 8);
        stitch_seams(&mut mesh, &faces, &chains).unwrap();
        // The three duplicated points on the shared edge are gone.
        assert_eq!(mesh.point_count(), 5);
        assert!(mesh.is_symmetric());

        // The surviving midpoint connects into both faces.
        let m0 = chains[&(0, 0)][1];
        let survivor = mesh.resolve(chains[&(1, 0)][1]);
        assert_eq!(survivor, mesh.resolve(m0));
        assert_eq!(mesh.neighbors(survivor).len(), 2);
    }

    #[test]
    fn reversed_registration_pairs_endpoints_correctly() {
        let (mut mesh, faces, chains) = two_faces();
        stitch_seams(&mut mesh, &faces, &chains).unwrap();
        // Seed vertex 0 copies unified, seed vertex 1 copies unified, and
        // they stay distinct from each other.
        let a = mesh.resolve(chains[&(0, 0)][0]);
        let a_copy = mesh.resolve(chains[&(1, 0)][2]);
        let b = mesh.resolve(chains[&(0, 0)][2]);
        let b_copy = mesh.resolve(chains[&(1, 0)][0]);
        assert_eq!(a, a_copy);
        assert_eq!(b, b_copy);
        assert_ne!(a, b);
    }

    #[test]
    fn chain_length_mismatch_is_fatal() {
        let (mut mesh, faces, mut chains) = two_faces();
        chains.get_mut(&(1, 0)).unwrap().pop();
        assert!(stitch_seams(&mut mesh, &faces, &chains).is_err());
    }

    #[test]
    fn missing_chain_is_fatal() {
        let (mut mesh, faces, mut chains) = two_faces();
        chains.remove(&(1, 0));
        assert!(stitch_seams(&mut mesh, &faces, &chains).is_err());
    }
}
