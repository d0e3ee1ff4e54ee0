use super::{Matrix3, Point2, Vector3};
use crate::error::{GeometryError, Result};

/// Barycentric coordinate frame of a 2D reference triangle.
///
/// Solves the 3x3 homogeneous system once at construction; every subsequent
/// point query is a single matrix-vector product. Used both to remap a
/// subdivided base triangle into a fan wedge and to interpolate inside a
/// located triangle during face lifting.
#[derive(Debug, Clone)]
pub struct BarycentricFrame {
    inverse: Matrix3,
}

impl BarycentricFrame {
    /// Builds the frame from three reference corners.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateTriangle`] if the corners are
    /// collinear (the homogeneous corner matrix is singular).
    pub fn new(corners: &[Point2; 3]) -> Result<Self> {
        let matrix = Matrix3::new(
            corners[0].x,
            corners[1].x,
            corners[2].x,
            corners[0].y,
            corners[1].y,
            corners[2].y,
            1.0,
            1.0,
            1.0,
        );
        let inverse = matrix
            .try_inverse()
            .ok_or(GeometryError::DegenerateTriangle)?;
        Ok(Self { inverse })
    }

    /// Barycentric weights of `point` with respect to the reference corners.
    ///
    /// The weights sum to 1; weights outside `[0, 1]` mean the point lies
    /// outside the reference triangle.
    #[must_use]
    pub fn coords(&self, point: &Point2) -> Vector3 {
        self.inverse * Vector3::new(point.x, point.y, 1.0)
    }

    /// Remaps `point` into the triangle spanned by `target`, preserving its
    /// barycentric position relative to the reference corners.
    #[must_use]
    pub fn map_to(&self, point: &Point2, target: &[Point2; 3]) -> Point2 {
        let weights = self.coords(point);
        Point2::new(
            weights.x * target[0].x + weights.y * target[1].x + weights.z * target[2].x,
            weights.x * target[0].y + weights.y * target[1].y + weights.z * target[2].y,
        )
    }
}
