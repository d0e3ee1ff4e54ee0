//! Class-II subdivision built from edge perpendiculars.
//!
//! Each side is split into `2^(f-1)` divisions. A perpendicular line is
//! erected at every division point, pointing into the triangle; their
//! pairwise intersections inside the triangle become the interior points,
//! and adjacency follows each perpendicular line through the points that lie
//! on it.

use std::collections::BTreeMap;

use super::{base_corners, connect, BaseTriangle};
use crate::error::Result;
use crate::math::{barycentric::BarycentricFrame, Point2, Vector2, TOLERANCE};

/// Coordinates are rounded to 10 decimals so that coincident intersections
/// from different line pairs compare equal exactly.
fn round10(x: f64) -> f64 {
    (x * 1e10).round() / 1e10
}

fn rounded(p: Point2) -> Point2 {
    Point2::new(round10(p.x), round10(p.y))
}

/// A perpendicular erected at a side division point, pointing inward.
struct Line {
    id: String,
    origin: Point2,
    direction: Vector2,
}

pub(super) fn subdivide(frequency: usize) -> Result<BaseTriangle> {
    let corners = base_corners();
    let corner_ids = ["0".to_owned(), "1".to_owned(), "2".to_owned()];

    let mut points: BTreeMap<String, Point2> = corner_ids
        .iter()
        .cloned()
        .zip(corners)
        .collect();

    // The subdivision parameter is one less than the dome frequency; one
    // division per side is the bare triangle.
    let divisions = 1usize << (frequency - 1);
    if divisions == 1 {
        let mut adjacency = BTreeMap::new();
        connect(&mut adjacency, "0", "1");
        connect(&mut adjacency, "1", "2");
        connect(&mut adjacency, "2", "0");
        return Ok(BaseTriangle {
            points,
            corners: corner_ids,
            adjacency,
            outer_chain: vec!["0".to_owned(), "1".to_owned()],
            right_rank: vec!["0".to_owned()],
            left_rank: vec!["1".to_owned()],
        });
    }

    // Division points along each side, each carrying an inward perpendicular.
    let mut lines = Vec::new();
    for side in 0..3 {
        let start = corners[side];
        let end = corners[(side + 1) % 3];
        let along = end - start;
        let perpendicular = Vector2::new(-along.y, along.x).normalize();
        for i in 1..divisions {
            #[allow(clippy::cast_precision_loss)]
            let t = i as f64 / divisions as f64;
            let id = format!("{side}_{}", i - 1);
            let origin = start + along * t;
            points.insert(id.clone(), origin);
            lines.push(Line {
                id,
                origin,
                direction: perpendicular,
            });
        }
    }

    // Pairwise line intersections inside the triangle become interior
    // points; coincident intersections keep the first id they received.
    let frame = BarycentricFrame::new(&corners)?;
    for i in 0..lines.len() {
        for j in i + 1..lines.len() {
            let Some(candidate) = intersect(&lines[i], &lines[j]) else {
                continue;
            };
            if !inside(&frame, candidate) {
                continue;
            }
            let duplicate = points
                .values()
                .any(|&existing| rounded(existing) == candidate);
            if !duplicate {
                points.insert(format!("{}_{}", lines[i].id, lines[j].id), candidate);
            }
        }
    }

    let mut adjacency = BTreeMap::new();

    // Walk each perpendicular and link consecutive points on it.
    for line in &lines {
        let on_line = collinear_points(line, &points);
        for pair in on_line.windows(2) {
            connect(&mut adjacency, &pair[0], &pair[1]);
        }
    }

    // Boundary chains along each side, closing at the corners.
    for side in 0..3 {
        for i in 1..divisions - 1 {
            connect(
                &mut adjacency,
                &format!("{side}_{}", i - 1),
                &format!("{side}_{i}"),
            );
        }
        let corner = side.to_string();
        let first_on_side = format!("{side}_0");
        let last_on_previous = format!("{}_{}", (side + 2) % 3, divisions - 2);
        connect(&mut adjacency, &corner, &first_on_side);
        connect(&mut adjacency, &corner, &last_on_previous);
    }

    let mut outer_chain = vec!["0".to_owned()];
    outer_chain.extend((0..divisions - 1).map(|i| format!("0_{i}")));
    outer_chain.push("1".to_owned());

    let mut right_rank = vec!["0".to_owned()];
    right_rank.extend((0..divisions - 1).rev().map(|i| format!("2_{i}")));

    let mut left_rank = vec!["1".to_owned()];
    left_rank.extend((0..divisions - 1).map(|i| format!("1_{i}")));

    Ok(BaseTriangle {
        points,
        corners: corner_ids,
        adjacency,
        outer_chain,
        right_rank,
        left_rank,
    })
}

/// Intersection of two parametric lines, rounded; `None` for parallels.
fn intersect(a: &Line, b: &Line) -> Option<Point2> {
    let det = a.direction.x * b.direction.y - a.direction.y * b.direction.x;
    if det.abs() < TOLERANCE {
        return None;
    }
    let offset = b.origin - a.origin;
    let t = (offset.x * b.direction.y - offset.y * b.direction.x) / det;
    Some(rounded(a.origin + a.direction * t))
}

/// Barycentric containment with a small slack for points on the boundary.
fn inside(frame: &BarycentricFrame, point: Point2) -> bool {
    frame
        .coords(&point)
        .iter()
        .all(|&w| (-TOLERANCE..=1.0 + TOLERANCE).contains(&w))
}

/// Ids of the points lying on `line` at parameter `t >= 0`, sorted by `t`.
fn collinear_points(line: &Line, points: &BTreeMap<String, Point2>) -> Vec<String> {
    let mut on_line = Vec::new();
    for (id, &coord) in points {
        let to_point = coord - line.origin;
        let cross = line.direction.x * to_point.y - line.direction.y * to_point.x;
        if cross.abs() > TOLERANCE {
            continue;
        }
        let t = if line.direction.x.abs() > TOLERANCE {
            to_point.x / line.direction.x
        } else {
            to_point.y / line.direction.y
        };
        if t >= 0.0 {
            on_line.push((id.clone(), t));
        }
    }
    on_line.sort_by(|a, b| a.1.total_cmp(&b.1));
    on_line.into_iter().map(|(id, _)| id).collect()
}
