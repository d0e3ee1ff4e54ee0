use thiserror::Error;

/// Top-level error type for the geodome kernel.
#[derive(Debug, Error)]
pub enum DomeError {
    #[error(transparent)]
    Seed(#[from] SeedError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Polyhedron(#[from] PolyhedronError),

    #[error(transparent)]
    Subdivision(#[from] SubdivisionError),

    #[error(transparent)]
    Lift(#[from] LiftError),

    #[error(transparent)]
    Stitch(#[from] StitchError),
}

/// Errors related to the seed polyhedron catalog.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("unknown seed polyhedron: {0}")]
    UnknownSeed(String),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("a polygon needs at least 3 sides, got {0}")]
    TooFewSides(usize),

    #[error("degenerate triangle: corners are collinear")]
    DegenerateTriangle,
}

/// Errors raised while discovering the structure of a seed polyhedron.
#[derive(Debug, Error)]
pub enum PolyhedronError {
    #[error("seed `{seed}` has fewer than 2 vertices")]
    TooFewVertices { seed: String },

    #[error("seed `{seed}`: no {sides}-sided faces found")]
    MissingFaces { seed: String, sides: usize },

    #[error(
        "seed `{seed}`: V - E + F = {characteristic}, expected 2 \
         (degenerate vertex data or misclassified edges)"
    )]
    EulerMismatch { seed: String, characteristic: i64 },
}

/// Errors related to triangle subdivision.
#[derive(Debug, Error)]
pub enum SubdivisionError {
    #[error("subdivision frequency must be at least 1, got {0}")]
    InvalidFrequency(usize),

    #[error("unknown subdivision scheme: {0}")]
    UnknownScheme(String),
}

/// Errors raised while lifting a flat face mesh to 3D.
#[derive(Debug, Error)]
pub enum LiftError {
    #[error("face has {0} corners, need at least 3")]
    TooFewCorners(usize),

    #[error("corner id `{0}` has no coordinate in the face mesh")]
    UnknownCorner(String),

    #[error("corner triangulation failed: {0}")]
    Triangulation(String),
}

/// Internal-consistency faults detected while fusing mesh boundaries.
///
/// These indicate a subdivision or fan-assembly bug rather than bad user
/// input; construction aborts without retry.
#[derive(Debug, Error)]
pub enum StitchError {
    #[error("boundary chains of different lengths ({left} vs {right}) at {context}")]
    ChainMismatch {
        left: usize,
        right: usize,
        context: String,
    },

    #[error("missing boundary chain for {context}")]
    MissingChain { context: String },
}

/// Convenience type alias for results using [`DomeError`].
pub type Result<T> = std::result::Result<T, DomeError>;
