//! Triangle subdivision generators.
//!
//! A dome frequency and a [`Scheme`] determine how each face of the seed
//! polyhedron is refined. All three schemes produce the same structural
//! contract, a [`BaseTriangle`]: a flat subdivided equilateral triangle with
//! deterministic string ids, symmetric adjacency, and the boundary chains the
//! fan assembler and seam stitcher consume.
//!
//! Ids only exist during construction; once a face is interned into the
//! point arena they are discarded.

mod alternate;
mod midpoint;
mod triacon;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SubdivisionError};
use crate::math::Point2;

/// How a base triangle is refined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Class-I lattice subdivision: frequency `f` splits each edge into `f`
    /// segments and fills the interior with a triangular lattice.
    Alternate,
    /// Recursive centroid splitting: each round replaces every triangle
    /// with three via its centroid. Edges are never split.
    Midpoint,
    /// Class-II subdivision from perpendiculars erected at `2^(f-1)` edge
    /// divisions per side.
    Triacon,
}

impl Scheme {
    /// Builds the subdivided base triangle for this scheme.
    ///
    /// # Errors
    ///
    /// Returns [`SubdivisionError::InvalidFrequency`] for `frequency == 0`.
    pub fn subdivide(self, frequency: usize) -> Result<BaseTriangle> {
        if frequency == 0 {
            return Err(SubdivisionError::InvalidFrequency(frequency).into());
        }
        match self {
            Self::Alternate => alternate::subdivide(frequency),
            Self::Midpoint => Ok(midpoint::subdivide(frequency)),
            Self::Triacon => triacon::subdivide(frequency),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Alternate => "alternate",
            Self::Midpoint => "midpoint",
            Self::Triacon => "triacon",
        };
        f.write_str(name)
    }
}

impl FromStr for Scheme {
    type Err = SubdivisionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alternate" => Ok(Self::Alternate),
            "midpoint" => Ok(Self::Midpoint),
            "triacon" => Ok(Self::Triacon),
            _ => Err(SubdivisionError::UnknownScheme(s.to_owned())),
        }
    }
}

/// A flat subdivided equilateral triangle with corners `(0,0)`, `(1,0)` and
/// `(1/2, √3/2)`.
///
/// `corners[2]` is the apex: the corner the fan assembler maps onto the
/// polygon centroid. The two ranks are the centroid-adjacent side chains
/// (apex excluded) that get fused pairwise between neighboring wedges; the
/// outer chain is the polygon-rim side, from `corners[0]` to `corners[1]`
/// inclusive.
#[derive(Debug, Clone)]
pub struct BaseTriangle {
    points: BTreeMap<String, Point2>,
    corners: [String; 3],
    adjacency: BTreeMap<String, BTreeSet<String>>,
    outer_chain: Vec<String>,
    right_rank: Vec<String>,
    left_rank: Vec<String>,
}

impl BaseTriangle {
    /// All point coordinates, keyed by id.
    #[must_use]
    pub fn points(&self) -> &BTreeMap<String, Point2> {
        &self.points
    }

    /// The three corner ids; index 2 is the apex.
    #[must_use]
    pub fn corners(&self) -> &[String; 3] {
        &self.corners
    }

    /// Symmetric adjacency over point ids.
    #[must_use]
    pub fn adjacency(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.adjacency
    }

    /// Boundary chain from `corners[0]` to `corners[1]` inclusive.
    #[must_use]
    pub fn outer_chain(&self) -> &[String] {
        &self.outer_chain
    }

    /// Side chain from `corners[0]` toward the apex, apex excluded.
    #[must_use]
    pub fn right_rank(&self) -> &[String] {
        &self.right_rank
    }

    /// Side chain from `corners[1]` toward the apex, apex excluded.
    #[must_use]
    pub fn left_rank(&self) -> &[String] {
        &self.left_rank
    }

    /// The three full side chains, endpoints included: corner 0 to 1,
    /// 1 to 2, 2 to 0.
    #[must_use]
    pub fn side_chains(&self) -> [Vec<String>; 3] {
        let mut side1 = self.left_rank.clone();
        side1.push(self.corners[2].clone());
        let mut side2 = vec![self.corners[2].clone()];
        side2.extend(self.right_rank.iter().rev().cloned());
        [self.outer_chain.clone(), side1, side2]
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

/// Adds an undirected edge to an adjacency map under construction.
fn connect(adjacency: &mut BTreeMap<String, BTreeSet<String>>, a: &str, b: &str) {
    adjacency
        .entry(a.to_owned())
        .or_default()
        .insert(b.to_owned());
    adjacency
        .entry(b.to_owned())
        .or_default()
        .insert(a.to_owned());
}

/// Corner coordinates of the unit equilateral base triangle.
fn base_corners() -> [Point2; 3] {
    [
        Point2::new(0.0, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(0.5, 3f64.sqrt() / 2.0),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn scheme_names_round_trip() {
        for scheme in [Scheme::Alternate, Scheme::Midpoint, Scheme::Triacon] {
            assert_eq!(scheme.to_string().parse::<Scheme>().unwrap(), scheme);
        }
        assert!("voronoi".parse::<Scheme>().is_err());
    }

    #[test]
    fn zero_frequency_rejected() {
        for scheme in [Scheme::Alternate, Scheme::Midpoint, Scheme::Triacon] {
            assert!(scheme.subdivide(0).is_err());
        }
    }

    #[test]
    fn frequency_one_is_the_bare_triangle_in_every_scheme() {
        for scheme in [Scheme::Alternate, Scheme::Midpoint, Scheme::Triacon] {
            let tri = scheme.subdivide(1).unwrap();
            assert_eq!(tri.points().len(), 3, "{scheme}");
            assert_eq!(tri.right_rank().len(), 1, "{scheme}");
            assert_eq!(tri.left_rank().len(), 1, "{scheme}");
            assert_eq!(tri.outer_chain().len(), 2, "{scheme}");
            assert!(tri.is_symmetric(), "{scheme}");
            for neighbors in tri.adjacency().values() {
                assert_eq!(neighbors.len(), 2, "{scheme}");
            }
        }
    }

    #[test]
    fn chains_share_endpoints_with_corners() {
        for scheme in [Scheme::Alternate, Scheme::Midpoint, Scheme::Triacon] {
            for frequency in 1..=3 {
                let tri = scheme.subdivide(frequency).unwrap();
                let [c0, c1, apex] = tri.corners().clone();
                assert_eq!(tri.outer_chain().first(), Some(&c0), "{scheme} f{frequency}");
                assert_eq!(tri.outer_chain().last(), Some(&c1), "{scheme} f{frequency}");
                assert_eq!(tri.right_rank().first(), Some(&c0), "{scheme} f{frequency}");
                assert_eq!(tri.left_rank().first(), Some(&c1), "{scheme} f{frequency}");
                assert_eq!(tri.right_rank().len(), tri.left_rank().len());
                assert!(!tri.right_rank().contains(&apex));
                assert!(!tri.left_rank().contains(&apex));
            }
        }
    }

    #[test]
    fn side_chains_close_the_triangle() {
        let tri = Scheme::Alternate.subdivide(3).unwrap();
        let [side0, side1, side2] = tri.side_chains();
        assert_eq!(side0.last(), side1.first());
        assert_eq!(side1.last(), side2.first());
        assert_eq!(side2.last(), side0.first());
    }
}
