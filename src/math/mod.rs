pub mod barycentric;
pub mod polygon;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 3x3 matrix type.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance for the coplanarity test applied to face candidate cycles.
pub const COPLANARITY_TOLERANCE: f64 = 1e-5;

/// Two mesh points closer than this are considered duplicates.
pub const DUPLICATE_TOLERANCE: f64 = 1e-9;
