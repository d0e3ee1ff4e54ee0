//! Recursive centroid subdivision.
//!
//! Each round replaces every triangle with three by inserting its centroid.
//! The outer edges of the base triangle are never split, so the ranks and
//! the outer chain stay at their frequency-1 size for every frequency.

use std::collections::BTreeMap;

use super::{base_corners, connect, BaseTriangle};
use crate::math::Point2;

pub(super) fn subdivide(frequency: usize) -> BaseTriangle {
    let corners = base_corners();
    let mut points: BTreeMap<String, Point2> = ["0", "1", "2"]
        .into_iter()
        .map(String::from)
        .zip(corners)
        .collect();

    let mut adjacency = BTreeMap::new();
    connect(&mut adjacency, "0", "1");
    connect(&mut adjacency, "1", "2");
    connect(&mut adjacency, "2", "0");

    let mut triangles = vec![["0".to_owned(), "1".to_owned(), "2".to_owned()]];
    let mut counter = 3usize;

    for _ in 1..frequency {
        let mut next = Vec::with_capacity(triangles.len() * 3);
        for triangle in &triangles {
            let centroid = triangle
                .iter()
                .fold(Point2::origin(), |acc, id| acc + points[id].coords)
                / 3.0;
            let centroid_id = counter.to_string();
            counter += 1;
            points.insert(centroid_id.clone(), centroid);
            for corner in triangle {
                connect(&mut adjacency, corner, &centroid_id);
            }
            let [a, b, c] = triangle.clone();
            next.push([a.clone(), b.clone(), centroid_id.clone()]);
            next.push([b, c.clone(), centroid_id.clone()]);
            next.push([c, a, centroid_id]);
        }
        triangles = next;
    }

    BaseTriangle {
        points,
        corners: ["0".to_owned(), "1".to_owned(), "2".to_owned()],
        adjacency,
        outer_chain: vec!["0".to_owned(), "1".to_owned()],
        right_rank: vec!["0".to_owned()],
        left_rank: vec!["1".to_owned()],
    }
}
