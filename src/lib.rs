pub mod dome;
pub mod error;
pub mod fan;
pub mod graph;
pub mod lift;
pub mod math;
pub mod mesh;
pub mod polyhedron;
pub mod project;
pub mod seed;
pub mod stitch;
pub mod subdivision;

pub use dome::{build_dome, Dome};
pub use error::{DomeError, Result};
pub use mesh::{Mesh, PointId};
pub use polyhedron::Polyhedron;
pub use seed::Seed;
pub use subdivision::Scheme;
