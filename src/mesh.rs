//! Point arena for the dome mesh.
//!
//! Points are stored in a slotmap and referenced by [`PointId`] everywhere
//! downstream. Seam fusion removes points; instead of rewriting every chain
//! that still names the removed point, the arena records an alias from the
//! dead id to its survivor and readers resolve through the alias table.

use std::collections::BTreeSet;

use slotmap::{new_key_type, SecondaryMap, SlotMap};

use crate::math::Point3;

new_key_type! {
    /// Stable handle to a mesh point.
    pub struct PointId;
}

#[derive(Debug, Clone)]
struct PointData {
    coord: Point3,
    neighbors: BTreeSet<PointId>,
}

/// Mutable point arena with union-find style merge tracking.
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    points: SlotMap<PointId, PointData>,
    aliases: SecondaryMap<PointId, PointId>,
}

impl Mesh {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an isolated point.
    pub fn add_point(&mut self, coord: Point3) -> PointId {
        self.points.insert(PointData {
            coord,
            neighbors: BTreeSet::new(),
        })
    }

    /// Follows the alias chain to the surviving id.
    ///
    /// Ids returned by [`Mesh::add_point`] stay valid across merges; callers
    /// holding ids from before a merge resolve them here.
    #[must_use]
    pub fn resolve(&self, id: PointId) -> PointId {
        let mut current = id;
        while let Some(&target) = self.aliases.get(current) {
            current = target;
        }
        current
    }

    /// Connects two points (undirected). Self-edges are ignored.
    pub fn connect(&mut self, a: PointId, b: PointId) {
        let a = self.resolve(a);
        let b = self.resolve(b);
        if a == b {
            return;
        }
        if let Some(data) = self.points.get_mut(a) {
            data.neighbors.insert(b);
        }
        if let Some(data) = self.points.get_mut(b) {
            data.neighbors.insert(a);
        }
    }

    /// Fuses `drop` into `keep`: `keep` takes the union of both adjacency
    /// sets, every third point that referenced `drop` is redirected, and
    /// `drop` is removed with an alias left behind. `keep`'s coordinate wins.
    ///
    /// Merging a point with itself (directly or through aliases) is a no-op.
    pub fn merge(&mut self, keep: PointId, drop: PointId) {
        let keep = self.resolve(keep);
        let drop = self.resolve(drop);
        if keep == drop {
            return;
        }
        let Some(dropped) = self.points.remove(drop) else {
            return;
        };
        for neighbor in &dropped.neighbors {
            if let Some(data) = self.points.get_mut(*neighbor) {
                data.neighbors.remove(&drop);
                if *neighbor != keep {
                    data.neighbors.insert(keep);
                }
            }
        }
        if let Some(data) = self.points.get_mut(keep) {
            data.neighbors.remove(&drop);
            for neighbor in dropped.neighbors {
                if neighbor != keep {
                    data.neighbors.insert(neighbor);
                }
            }
        }
        self.aliases.insert(drop, keep);
    }

    /// Whether `id` is a live (non-aliased) point.
    #[must_use]
    pub fn contains(&self, id: PointId) -> bool {
        self.points.contains_key(id)
    }

    /// Coordinate of a point. Aliased ids resolve to their survivor.
    #[must_use]
    pub fn coord(&self, id: PointId) -> Option<Point3> {
        self.points.get(self.resolve(id)).map(|data| data.coord)
    }

    pub fn set_coord(&mut self, id: PointId, coord: Point3) {
        let id = self.resolve(id);
        if let Some(data) = self.points.get_mut(id) {
            data.coord = coord;
        }
    }

    /// Neighbors of a point. Empty for unknown ids.
    #[must_use]
    pub fn neighbors(&self, id: PointId) -> Vec<PointId> {
        self.points
            .get(self.resolve(id))
            .map(|data| data.neighbors.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Live points with their coordinates.
    pub fn points(&self) -> impl Iterator<Item = (PointId, Point3)> + '_ {
        self.points.iter().map(|(id, data)| (id, data.coord))
    }

    /// Live point ids.
    pub fn ids(&self) -> impl Iterator<Item = PointId> + '_ {
        self.points.keys()
    }

    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.points
            .values()
            .map(|data| data.neighbors.len())
            .sum::<usize>()
            / 2
    }

    /// Checks that every adjacency entry is mirrored and names a live point.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        self.points.iter().all(|(id, data)| {
            data.neighbors.iter().all(|&n| {
                self.points
                    .get(n)
                    .is_some_and(|other| other.neighbors.contains(&id))
            })
        })
    }
}
