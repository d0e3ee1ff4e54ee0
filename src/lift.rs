//! Lifting a flat face mesh onto the 3D face of the seed polyhedron.
//!
//! The flat N-gon corners are triangulated once (Delaunay); every interior
//! point is located in that triangulation and its 3D position interpolated
//! barycentrically from the true corner positions. Rim points that fall
//! outside the hull by a float hair are handled by an inverse-squared
//! distance blend of the nearest corners.

use std::collections::{BTreeMap, HashMap};

use spade::{
    DelaunayTriangulation, Point2 as SpadePoint2, PositionInTriangulation, Triangulation,
};

use crate::error::{LiftError, Result};
use crate::fan::FaceMesh;
use crate::math::barycentric::BarycentricFrame;
use crate::math::{Point2, Point3, Vector3, DUPLICATE_TOLERANCE};

/// Computes the 3D position of every point of a flat face mesh.
///
/// `corner_targets[i]` is the 3D position of `face.corners()[i]` (a seed
/// polyhedron vertex). Corner points map directly; all others interpolate.
///
/// # Errors
///
/// Returns [`LiftError::TooFewCorners`] if fewer than 3 corner targets are
/// given, [`LiftError::UnknownCorner`] if a corner id has no flat
/// coordinate, and [`LiftError::Triangulation`] if the corner triangulation
/// cannot be built.
pub fn lift_face(face: &FaceMesh, corner_targets: &[Point3]) -> Result<BTreeMap<String, Point3>> {
    let corners = face.corners();
    if corners.len() < 3 || corner_targets.len() != corners.len() {
        return Err(LiftError::TooFewCorners(corner_targets.len()).into());
    }

    let mut flat_corners = Vec::with_capacity(corners.len());
    for id in corners {
        let coord = face
            .points()
            .get(id)
            .ok_or_else(|| LiftError::UnknownCorner(id.clone()))?;
        flat_corners.push(*coord);
    }

    let mut triangulation: DelaunayTriangulation<SpadePoint2<f64>> =
        DelaunayTriangulation::new();
    let mut corner_of_vertex: HashMap<usize, usize> = HashMap::new();
    for (i, coord) in flat_corners.iter().enumerate() {
        let handle = triangulation
            .insert(SpadePoint2::new(coord.x, coord.y))
            .map_err(|e| LiftError::Triangulation(e.to_string()))?;
        corner_of_vertex.insert(handle.index(), i);
    }

    let corner_target = |vertex_index: usize| -> Point3 {
        corner_of_vertex
            .get(&vertex_index)
            .map_or_else(Point3::origin, |&i| corner_targets[i])
    };

    let mut lifted = BTreeMap::new();
    for (id, &coord) in face.points() {
        if let Some(position) = corners.iter().position(|c| c == id) {
            lifted.insert(id.clone(), corner_targets[position]);
            continue;
        }

        let located = triangulation.locate(SpadePoint2::new(coord.x, coord.y));
        let target = match located {
            PositionInTriangulation::OnVertex(v) => corner_target(v.index()),
            PositionInTriangulation::OnEdge(e) => {
                let edge = triangulation.directed_edge(e);
                let from = edge.from();
                let to = edge.to();
                let a = Point2::new(from.position().x, from.position().y);
                let b = Point2::new(to.position().x, to.position().y);
                interpolate_edge(
                    coord,
                    a,
                    b,
                    corner_target(from.fix().index()),
                    corner_target(to.fix().index()),
                )
            }
            PositionInTriangulation::OnFace(f) => {
                let vertices = triangulation.face(f).vertices();
                let flat = [
                    Point2::new(vertices[0].position().x, vertices[0].position().y),
                    Point2::new(vertices[1].position().x, vertices[1].position().y),
                    Point2::new(vertices[2].position().x, vertices[2].position().y),
                ];
                let targets = [
                    corner_target(vertices[0].fix().index()),
                    corner_target(vertices[1].fix().index()),
                    corner_target(vertices[2].fix().index()),
                ];
                let frame = BarycentricFrame::new(&flat)?;
                let weights = frame.coords(&coord);
                weighted_sum(&targets, &[weights.x, weights.y, weights.z])
            }
            PositionInTriangulation::OutsideOfConvexHull(_)
            | PositionInTriangulation::NoTriangulation => {
                nearest_corner_blend(coord, &flat_corners, corner_targets)
            }
        };
        lifted.insert(id.clone(), target);
    }

    Ok(lifted)
}

/// Linear interpolation along a triangulation edge.
fn interpolate_edge(p: Point2, a: Point2, b: Point2, ta: Point3, tb: Point3) -> Point3 {
    let along = b - a;
    let len_sq = along.norm_squared();
    let s = if len_sq < DUPLICATE_TOLERANCE {
        0.0
    } else {
        ((p - a).dot(&along) / len_sq).clamp(0.0, 1.0)
    };
    Point3::from(ta.coords * (1.0 - s) + tb.coords * s)
}

/// Inverse-squared-distance blend of the three nearest corners.
///
/// Only reachable for points a rounding error outside the corner hull, so
/// the blend is effectively a hull-edge interpolation.
fn nearest_corner_blend(p: Point2, flat: &[Point2], targets: &[Point3]) -> Point3 {
    let mut by_distance: Vec<(f64, usize)> = flat
        .iter()
        .enumerate()
        .map(|(i, c)| ((p - c).norm_squared(), i))
        .collect();
    by_distance.sort_by(|a, b| a.0.total_cmp(&b.0));

    if let Some(&(closest, i)) = by_distance.first() {
        if closest < DUPLICATE_TOLERANCE * DUPLICATE_TOLERANCE {
            return targets[i];
        }
    }

    let mut total = 0.0;
    let mut sum = Vector3::zeros();
    for &(dist_sq, i) in by_distance.iter().take(3) {
        let weight = 1.0 / dist_sq;
        total += weight;
        sum += targets[i].coords * weight;
    }
    Point3::from(sum / total)
}

fn weighted_sum(targets: &[Point3; 3], weights: &[f64; 3]) -> Point3 {
    let mut sum = Vector3::zeros();
    for (target, weight) in targets.iter().zip(weights) {
        sum += target.coords * *weight;
    }
    Point3::from(sum)
}
