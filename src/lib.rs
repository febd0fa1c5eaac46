//! Risk matrix data model.
//!
//! A [`RiskMatrix`] is a small N-dimensional grid: named axes carry ordered
//! points, cells (coordinates) map to risk categories, and the matrix ranks
//! and looks up both. Pure in-memory structure manipulation; callers needing
//! shared mutation wrap the matrix in their own lock.
//!
//! ## Module map
//! - `axis.rs` — `Axis`, `AxisPoint`, point specs/ids, letter codes.
//! - `category.rs` — `Category` with rank value and display attributes.
//! - `coordinate.rs` — `Coordinate`: one cell, identity + canonical code.
//! - `matrix.rs` — the aggregate: mutation and query operations.
//! - `storage.rs` — serde document model + JSON file save/load.
//! - `error.rs` — `MatrixError` for every fail-fast mutation and lookup.
//!
//! ## Conventions
//! - Mutations are fail-fast; batch mapping keeps writes made before the
//!   first failure.
//! - Back-references are ids, not owning pointers: points and coordinates
//!   address their matrix through `MatrixId`.
//!
//! ```
//! use riskmatrix::{AxisShape, RiskMatrix};
//!
//! let mut rm = RiskMatrix::new("Example");
//! rm.add_axis("x", AxisShape::lettered(3)).unwrap();
//! rm.add_axis("y", AxisShape::size(3)).unwrap();
//! let low = rm.add_category("LOW", "Low risk", "#00ff00", "#ffffff", "");
//! let a = rm.axis("x").unwrap().points()[0].id();
//! let one = rm.axis("y").unwrap().points()[0].id();
//! let a1 = rm.map_points(low, &[a, one]).unwrap();
//! assert_eq!(a1.code(), "A1");
//! ```

pub mod axis;
pub mod category;
pub mod coordinate;
pub mod error;
pub mod matrix;
pub mod storage;

pub use axis::{letter_code, Axis, AxisPoint, AxisShape, PointId, PointSpec};
pub use category::{Category, CategoryId};
pub use coordinate::Coordinate;
pub use error::MatrixError;
pub use matrix::{MatrixId, RiskMatrix};
pub use storage::{load_matrix, save_matrix};
