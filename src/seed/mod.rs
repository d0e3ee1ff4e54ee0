//! Seed polyhedron catalog.
//!
//! A seed is the convex solid whose faces the dome pipeline subdivides. The
//! catalog is pure data: vertex coordinates from closed-form expressions and
//! the side-counts of the faces each solid is expected to have. Structural
//! validation happens downstream in the face finder, not here.

mod catalog;

use crate::error::{Result, SeedError};
use crate::math::Point3;

/// A seed polyhedron: named vertex coordinates plus its expected face shapes.
#[derive(Debug, Clone)]
pub struct Seed {
    name: &'static str,
    vertices: Vec<Point3>,
    face_sides: &'static [usize],
}

impl Seed {
    /// Looks up a solid by its catalog name (e.g. `"icosahedron"`,
    /// `"truncated octahedron"`). Matching is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::UnknownSeed`] if the name is not in the catalog.
    pub fn by_name(name: &str) -> Result<Self> {
        let entry = catalog::CATALOG
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| SeedError::UnknownSeed(name.to_owned()))?;
        Ok(Self {
            name: entry.name,
            vertices: (entry.generate)(),
            face_sides: entry.face_sides,
        })
    }

    /// Names of all cataloged solids, in catalog order.
    #[must_use]
    pub fn names() -> Vec<&'static str> {
        catalog::CATALOG.iter().map(|entry| entry.name).collect()
    }

    /// Canonical catalog name of this seed.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Vertex coordinates, centered on the origin.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    /// Side-counts of the faces this solid is expected to have
    /// (e.g. `[3, 5]` for the icosidodecahedron).
    #[must_use]
    pub fn face_sides(&self) -> &[usize] {
        self.face_sides
    }
}
