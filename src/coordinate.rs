use std::fmt;
use std::hash::{Hash, Hasher};

use crate::axis::PointId;
use crate::matrix::MatrixId;

/// One cell of a matrix: exactly one point per axis, frozen in
/// axis-declaration order regardless of how the caller passed them in.
///
/// Equality and hashing cover cell identity (matrix plus point tuple).
/// Two cells with the same summed value are not equal; ordering by value
/// is a separate operation on the matrix (`RiskMatrix::rank`).
#[derive(Debug, Clone)]
pub struct Coordinate {
    matrix: MatrixId,
    points: Vec<PointId>,
    code: String,
    value: u32,
}

impl Coordinate {
    pub(crate) fn new(matrix: MatrixId, points: Vec<PointId>, code: String) -> Self {
        let value = points.iter().map(|p| p.value).sum();
        Coordinate {
            matrix,
            points,
            code,
            value,
        }
    }

    /// Point ids in axis-declaration order.
    pub fn points(&self) -> &[PointId] {
        &self.points
    }

    /// Canonical address: the point codes concatenated in axis order.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Sum of the constituent point values.
    pub fn value(&self) -> u32 {
        self.value
    }

    pub(crate) fn matrix(&self) -> MatrixId {
        self.matrix
    }

    /// Identity comparison, same as `==`; named for call sites where the
    /// distinction from value-based ranking matters.
    pub fn same_cell(&self, other: &Coordinate) -> bool {
        self == other
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.matrix == other.matrix && self.points == other.points
    }
}

impl Eq for Coordinate {}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.matrix.hash(state);
        self.points.hash(state);
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}
