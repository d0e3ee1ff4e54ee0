use std::f64::consts::PI;

use super::Point2;
use crate::error::{GeometryError, Result};

/// Vertices of a regular polygon with unit side length.
///
/// The first two vertices are fixed at `(0, 0)` and `(1, 0)`; the remaining
/// ones are produced by walking the perimeter and turning by the exterior
/// angle at each corner, so the polygon lies in the upper half plane.
///
/// # Errors
///
/// Returns [`GeometryError::TooFewSides`] for `sides < 3`.
pub fn regular_polygon(sides: usize) -> Result<Vec<Point2>> {
    if sides < 3 {
        return Err(GeometryError::TooFewSides(sides).into());
    }

    #[allow(clippy::cast_precision_loss)]
    let exterior = 2.0 * PI / sides as f64;

    let mut vertices = Vec::with_capacity(sides);
    vertices.push(Point2::new(0.0, 0.0));
    vertices.push(Point2::new(1.0, 0.0));

    let mut position = Point2::new(1.0, 0.0);
    let (mut dx, mut dy) = (1.0, 0.0);
    for _ in 2..sides {
        let (sin, cos) = exterior.sin_cos();
        let next_dx = dx * cos - dy * sin;
        let next_dy = dx * sin + dy * cos;
        (dx, dy) = (next_dx, next_dy);
        position = Point2::new(position.x + dx, position.y + dy);
        vertices.push(position);
    }

    Ok(vertices)
}

/// Arithmetic mean of a point set.
#[must_use]
pub fn centroid(points: &[Point2]) -> Point2 {
    let mut x = 0.0;
    let mut y = 0.0;
    for p in points {
        x += p.x;
        y += p.y;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = points.len().max(1) as f64;
    Point2::new(x / n, y / n)
}

/// Fan triangulation of a regular N-gon.
///
/// Triangle `i` is `[v_i, v_{i+1}, centroid]`; all N triangles share the
/// centroid as their third corner. This is the wedge layout the fan
/// assembler maps the subdivided base triangle into.
///
/// # Errors
///
/// Returns [`GeometryError::TooFewSides`] for `sides < 3`.
pub fn fan_triangles(sides: usize) -> Result<Vec<[Point2; 3]>> {
    let vertices = regular_polygon(sides)?;
    let center = centroid(&vertices);

    let mut triangles = Vec::with_capacity(sides);
    for i in 0..sides {
        triangles.push([vertices[i], vertices[(i + 1) % sides], center]);
    }
    Ok(triangles)
}
