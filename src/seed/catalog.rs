//! Closed-form vertex coordinates for the seed solids.
//!
//! Every catalog entry is generated from a handful of base triples expanded
//! under a permutation rule and a sign rule. The snub solids are chiral:
//! their sign rule is tied to permutation parity, which selects one
//! enantiomorph.

use crate::math::Point3;

/// Golden ratio.
const PHI: f64 = 1.618_033_988_749_895;

/// Tribonacci constant, used by the snub cube.
const TRIBONACCI: f64 = 1.839_286_755_214_161_2;

/// Real root of `x^3 - 2x = PHI`, used by the snub dodecahedron.
const XI: f64 = 1.715_561_499_697_367_8;

const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// How a base triple is permuted before sign expansion.
#[derive(Clone, Copy)]
enum Perms {
    /// The triple itself.
    Identity,
    /// The three cyclic rotations (the even permutations).
    Cyclic,
    /// All six permutations.
    All,
}

/// Which sign combinations of a permuted triple are kept.
#[derive(Clone, Copy)]
enum Signs {
    /// All eight.
    All,
    /// Even number of minus signs.
    EvenMinus,
    /// Even permutations take an even number of minus signs, odd
    /// permutations an odd number. Selects one chirality of a snub solid.
    MatchParity,
}

/// One seed solid: display name, expected face side-counts, generator.
pub(super) struct Entry {
    pub name: &'static str,
    pub face_sides: &'static [usize],
    pub generate: fn() -> Vec<Point3>,
}

pub(super) const CATALOG: &[Entry] = &[
    Entry {
        name: "tetrahedron",
        face_sides: &[3],
        generate: tetrahedron,
    },
    Entry {
        name: "cube",
        face_sides: &[4],
        generate: cube,
    },
    Entry {
        name: "octahedron",
        face_sides: &[3],
        generate: octahedron,
    },
    Entry {
        name: "dodecahedron",
        face_sides: &[5],
        generate: dodecahedron,
    },
    Entry {
        name: "icosahedron",
        face_sides: &[3],
        generate: icosahedron,
    },
    Entry {
        name: "cuboctahedron",
        face_sides: &[3, 4],
        generate: cuboctahedron,
    },
    Entry {
        name: "icosidodecahedron",
        face_sides: &[3, 5],
        generate: icosidodecahedron,
    },
    Entry {
        name: "truncated tetrahedron",
        face_sides: &[3, 6],
        generate: truncated_tetrahedron,
    },
    Entry {
        name: "truncated cube",
        face_sides: &[3, 8],
        generate: truncated_cube,
    },
    Entry {
        name: "truncated octahedron",
        face_sides: &[4, 6],
        generate: truncated_octahedron,
    },
    Entry {
        name: "truncated dodecahedron",
        face_sides: &[3, 10],
        generate: truncated_dodecahedron,
    },
    Entry {
        name: "truncated icosahedron",
        face_sides: &[5, 6],
        generate: truncated_icosahedron,
    },
    Entry {
        name: "truncated cuboctahedron",
        face_sides: &[4, 6, 8],
        generate: truncated_cuboctahedron,
    },
    Entry {
        name: "truncated icosidodecahedron",
        face_sides: &[4, 6, 10],
        generate: truncated_icosidodecahedron,
    },
    Entry {
        name: "snub cube",
        face_sides: &[3, 4],
        generate: snub_cube,
    },
    Entry {
        name: "snub dodecahedron",
        face_sides: &[3, 5],
        generate: snub_dodecahedron,
    },
    Entry {
        name: "rhombicuboctahedron",
        face_sides: &[3, 4],
        generate: rhombicuboctahedron,
    },
    Entry {
        name: "rhombicosidodecahedron",
        face_sides: &[3, 4, 5],
        generate: rhombicosidodecahedron,
    },
];

/// Expands base triples under the permutation and sign rules, appending to
/// `out` and skipping exact duplicates (sign flips of zero components).
fn expand(out: &mut Vec<Point3>, bases: &[[f64; 3]], perms: Perms, signs: Signs) {
    for base in bases {
        for (triple, even_perm) in permute(*base, perms) {
            for mask in 0u8..8 {
                let minus = mask.count_ones();
                let keep = match signs {
                    Signs::All => true,
                    Signs::EvenMinus => minus % 2 == 0,
                    Signs::MatchParity => (minus % 2 == 0) == even_perm,
                };
                if !keep {
                    continue;
                }
                let mut v = [0.0f64; 3];
                for (k, value) in v.iter_mut().enumerate() {
                    let sign = if mask >> k & 1 == 1 { -1.0 } else { 1.0 };
                    let signed = sign * triple[k];
                    // Normalize -0.0 so exact-duplicate detection works.
                    *value = if signed == 0.0 { 0.0 } else { signed };
                }
                let candidate = Point3::new(v[0], v[1], v[2]);
                if !out.contains(&candidate) {
                    out.push(candidate);
                }
            }
        }
    }
}

/// Permutations of a triple with their parity (`true` = even).
fn permute(base: [f64; 3], perms: Perms) -> Vec<([f64; 3], bool)> {
    let [a, b, c] = base;
    match perms {
        Perms::Identity => vec![([a, b, c], true)],
        Perms::Cyclic => vec![([a, b, c], true), ([b, c, a], true), ([c, a, b], true)],
        Perms::All => vec![
            ([a, b, c], true),
            ([b, c, a], true),
            ([c, a, b], true),
            ([a, c, b], false),
            ([b, a, c], false),
            ([c, b, a], false),
        ],
    }
}

fn generated(bases: &[[f64; 3]], perms: Perms, signs: Signs) -> Vec<Point3> {
    let mut out = Vec::new();
    expand(&mut out, bases, perms, signs);
    out
}

fn tetrahedron() -> Vec<Point3> {
    generated(&[[1.0, 1.0, 1.0]], Perms::Identity, Signs::EvenMinus)
}

fn cube() -> Vec<Point3> {
    generated(&[[1.0, 1.0, 1.0]], Perms::Identity, Signs::All)
}

fn octahedron() -> Vec<Point3> {
    generated(&[[1.0, 0.0, 0.0]], Perms::Cyclic, Signs::All)
}

fn dodecahedron() -> Vec<Point3> {
    let mut out = Vec::new();
    expand(&mut out, &[[0.0, 1.0, PHI * PHI]], Perms::Cyclic, Signs::All);
    expand(&mut out, &[[PHI, PHI, PHI]], Perms::Identity, Signs::All);
    out
}

fn icosahedron() -> Vec<Point3> {
    generated(&[[0.0, 1.0, PHI]], Perms::Cyclic, Signs::All)
}

fn cuboctahedron() -> Vec<Point3> {
    generated(&[[1.0, 1.0, 0.0]], Perms::Cyclic, Signs::All)
}

fn icosidodecahedron() -> Vec<Point3> {
    let mut out = Vec::new();
    expand(&mut out, &[[0.0, 0.0, PHI]], Perms::Cyclic, Signs::All);
    expand(
        &mut out,
        &[[0.5, PHI / 2.0, PHI * PHI / 2.0]],
        Perms::Cyclic,
        Signs::All,
    );
    out
}

fn truncated_tetrahedron() -> Vec<Point3> {
    let s = SQRT_2 / 4.0;
    generated(&[[3.0 * s, s, s]], Perms::Cyclic, Signs::EvenMinus)
}

fn truncated_cube() -> Vec<Point3> {
    let a = 1.0 + SQRT_2;
    generated(&[[1.0, a, a]], Perms::Cyclic, Signs::All)
}

fn truncated_octahedron() -> Vec<Point3> {
    generated(&[[0.0, SQRT_2 / 2.0, SQRT_2]], Perms::All, Signs::All)
}

fn truncated_dodecahedron() -> Vec<Point3> {
    generated(
        &[
            [0.0, 1.0 / PHI, 2.0 + PHI],
            [1.0 / PHI, PHI, 2.0 * PHI],
            [PHI, 2.0, PHI + 1.0],
        ],
        Perms::Cyclic,
        Signs::All,
    )
}

fn truncated_icosahedron() -> Vec<Point3> {
    generated(
        &[
            [0.0, 1.0, 3.0 * PHI],
            [1.0, 2.0 + PHI, 2.0 * PHI],
            [PHI, 2.0, 2.0 * PHI + 1.0],
        ],
        Perms::Cyclic,
        Signs::All,
    )
}

fn truncated_cuboctahedron() -> Vec<Point3> {
    generated(
        &[[1.0, 1.0 + SQRT_2, 1.0 + 2.0 * SQRT_2]],
        Perms::All,
        Signs::All,
    )
}

fn truncated_icosidodecahedron() -> Vec<Point3> {
    generated(
        &[
            [1.0 / PHI, 1.0 / PHI, 3.0 + PHI],
            [2.0 / PHI, PHI, 1.0 + 2.0 * PHI],
            [1.0 / PHI, PHI * PHI, 3.0 * PHI - 1.0],
            [2.0 * PHI - 1.0, 2.0, 2.0 + PHI],
            [PHI, 3.0, 2.0 * PHI],
        ],
        Perms::Cyclic,
        Signs::All,
    )
}

fn snub_cube() -> Vec<Point3> {
    let t = TRIBONACCI;
    generated(&[[1.0, 1.0 / t, t]], Perms::All, Signs::MatchParity)
}

fn snub_dodecahedron() -> Vec<Point3> {
    let alpha = XI - 1.0 / XI;
    let beta = XI * PHI + PHI * PHI + PHI / XI;
    generated(
        &[
            [2.0 * alpha, 2.0, 2.0 * beta],
            [
                alpha + beta / PHI + PHI,
                -alpha * PHI + beta + 1.0 / PHI,
                alpha / PHI + beta * PHI - 1.0,
            ],
            [
                alpha + beta / PHI - PHI,
                alpha * PHI - beta + 1.0 / PHI,
                alpha / PHI + beta * PHI + 1.0,
            ],
            [
                -alpha / PHI + beta * PHI + 1.0,
                -alpha + beta / PHI - PHI,
                alpha * PHI + beta - 1.0 / PHI,
            ],
            [
                -alpha / PHI + beta * PHI - 1.0,
                alpha - beta / PHI - PHI,
                alpha * PHI + beta + 1.0 / PHI,
            ],
        ],
        Perms::Cyclic,
        Signs::EvenMinus,
    )
}

fn rhombicuboctahedron() -> Vec<Point3> {
    generated(&[[1.0, 1.0, 1.0 + SQRT_2]], Perms::Cyclic, Signs::All)
}

fn rhombicosidodecahedron() -> Vec<Point3> {
    generated(
        &[
            [1.0, 1.0, PHI * PHI * PHI],
            [PHI * PHI, PHI, 2.0 * PHI],
            [2.0 + PHI, 0.0, PHI * PHI],
        ],
        Perms::Cyclic,
        Signs::All,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_counts() {
        let expected = [
            ("tetrahedron", 4),
            ("cube", 8),
            ("octahedron", 6),
            ("dodecahedron", 20),
            ("icosahedron", 12),
            ("cuboctahedron", 12),
            ("icosidodecahedron", 30),
            ("truncated tetrahedron", 12),
            ("truncated cube", 24),
            ("truncated octahedron", 24),
            ("truncated dodecahedron", 60),
            ("truncated icosahedron", 60),
            ("truncated cuboctahedron", 48),
            ("truncated icosidodecahedron", 120),
            ("snub cube", 24),
            ("snub dodecahedron", 60),
            ("rhombicuboctahedron", 24),
            ("rhombicosidodecahedron", 60),
        ];
        assert_eq!(CATALOG.len(), expected.len());
        for (entry, (name, count)) in CATALOG.iter().zip(expected) {
            assert_eq!(entry.name, name);
            assert_eq!((entry.generate)().len(), count, "{name}");
        }
    }

    #[test]
    fn vertices_lie_on_a_common_sphere() {
        for entry in CATALOG {
            let vertices = (entry.generate)();
            let r = vertices[0].coords.norm();
            for v in &vertices {
                assert!(
                    (v.coords.norm() - r).abs() < 1e-9,
                    "{}: vertex {v:?} off the circumsphere",
                    entry.name
                );
            }
        }
    }

    #[test]
    fn no_duplicate_vertices() {
        for entry in CATALOG {
            let vertices = (entry.generate)();
            for i in 0..vertices.len() {
                for j in i + 1..vertices.len() {
                    assert!(
                        (vertices[i] - vertices[j]).norm() > 1e-9,
                        "{}: vertices {i} and {j} coincide",
                        entry.name
                    );
                }
            }
        }
    }
}
