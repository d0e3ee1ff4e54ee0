//! Class-I lattice subdivision.

use std::collections::BTreeMap;

use super::{connect, BaseTriangle};
use crate::error::Result;
use crate::math::Point2;

/// Point id for lattice position `(i, j)`: `i` rows up from the base edge,
/// `j` steps along the row.
fn id(i: usize, j: usize) -> String {
    format!("{i}_{j}")
}

#[allow(clippy::cast_precision_loss)]
pub(super) fn subdivide(frequency: usize) -> Result<BaseTriangle> {
    let factor_x = 1.0 / (2.0 * frequency as f64);
    let factor_y = factor_x * 3f64.sqrt();

    let mut points = BTreeMap::new();
    let mut adjacency = BTreeMap::new();

    for i in 0..=frequency {
        for j in 0..=(frequency - i) {
            let point_id = id(i, j);
            let x = factor_x * (i + 2 * j) as f64;
            let y = factor_y * i as f64;
            points.insert(point_id.clone(), Point2::new(x, y));

            // Three of the six lattice directions; the opposite three are
            // covered by symmetry when their source point is visited.
            if i + j != frequency {
                connect(&mut adjacency, &point_id, &id(i, j + 1));
                connect(&mut adjacency, &point_id, &id(i + 1, j));
            }
            if j != 0 {
                connect(&mut adjacency, &point_id, &id(i + 1, j - 1));
            }
        }
    }

    let outer_chain = (0..=frequency).map(|j| id(0, j)).collect();
    let right_rank = (0..frequency).map(|i| id(i, 0)).collect();
    let left_rank = (0..frequency).map(|i| id(i, frequency - i)).collect();

    Ok(BaseTriangle {
        points,
        corners: [id(0, 0), id(0, frequency), id(frequency, 0)],
        adjacency,
        outer_chain,
        right_rank,
        left_rank,
    })
}
