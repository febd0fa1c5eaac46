use std::fmt;

use crate::error::MatrixError;
use crate::matrix::MatrixId;

/// Highest input `letter_code` accepts ("ZZ").
pub const LETTER_CODE_MAX: u32 = 702;

/// Stable address of one axis point: the owning matrix, the axis position in
/// declaration order, and the point value. Values are unique within an axis
/// and never change after insertion, so an id stays valid for the matrix's
/// lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId {
    pub(crate) matrix: MatrixId,
    pub(crate) axis: u32,
    pub(crate) value: u32,
}

#[derive(Debug, Clone)]
pub struct PointSpec {
    pub code: String,
    pub name: String,
    pub description: String,
    /// Rank on the axis. Left unset, insertion assigns position + 1.
    pub value: Option<u32>,
}

impl PointSpec {
    pub fn new(code: &str, name: &str) -> Self {
        PointSpec {
            code: code.to_string(),
            name: name.to_string(),
            description: String::new(),
            value: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_value(mut self, value: u32) -> Self {
        self.value = Some(value);
        self
    }
}

/// How to build an axis: either explicit points, or a generated run of
/// `size` synthetic points coded "1".."size" (or "A", "B", .. with
/// `lettered`). Exactly one of the two, by construction.
#[derive(Debug, Clone)]
pub enum AxisShape {
    Points(Vec<PointSpec>),
    Size { size: u32, use_letters: bool },
}

impl AxisShape {
    pub fn points(points: impl IntoIterator<Item = PointSpec>) -> Self {
        AxisShape::Points(points.into_iter().collect())
    }

    pub fn size(size: u32) -> Self {
        AxisShape::Size {
            size,
            use_letters: false,
        }
    }

    pub fn lettered(size: u32) -> Self {
        AxisShape::Size {
            size,
            use_letters: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AxisPoint {
    pub code: String,
    pub name: String,
    pub description: String,
    pub value: u32,
    id: PointId,
}

impl AxisPoint {
    pub fn id(&self) -> PointId {
        self.id
    }

    /// Rank comparison. Points carry no blanket equality: two points with
    /// the same value on different axes are not the same point.
    pub fn same_value(&self, other: &AxisPoint) -> bool {
        self.value == other.value
    }
}

impl fmt::Display for AxisPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Point: {} - {}", self.code, self.name)
    }
}

#[derive(Debug, Clone)]
pub struct Axis {
    pub name: String,
    points: Vec<AxisPoint>,
    matrix: MatrixId,
    index: u32,
}

impl Axis {
    pub(crate) fn new(name: &str, matrix: MatrixId, index: u32) -> Self {
        Axis {
            name: name.to_string(),
            points: Vec::new(),
            matrix,
            index,
        }
    }

    /// Insert a point, assigning `len + 1` when the spec carries no value.
    /// A value collision fails instead of renumbering; the point list is
    /// kept sorted ascending by value.
    pub(crate) fn add_point(&mut self, spec: PointSpec) -> Result<(), MatrixError> {
        let value = spec.value.unwrap_or(self.points.len() as u32 + 1);
        if self.points.iter().any(|p| p.value == value) {
            return Err(MatrixError::DuplicatePointValue {
                axis: self.name.clone(),
                value,
            });
        }
        let id = PointId {
            matrix: self.matrix,
            axis: self.index,
            value,
        };
        self.points.push(AxisPoint {
            code: spec.code,
            name: spec.name,
            description: spec.description,
            value,
            id,
        });
        self.points.sort_by_key(|p| p.value);
        Ok(())
    }

    /// Points in ascending value order.
    pub fn points(&self) -> &[AxisPoint] {
        &self.points
    }

    pub fn point_at(&self, index: usize) -> Option<&AxisPoint> {
        self.points.get(index)
    }

    pub(crate) fn point_by_value(&self, value: u32) -> Option<&AxisPoint> {
        self.points.iter().find(|p| p.value == value)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Bijective base-26 numbering without a zero digit: 1 is "A", 26 is "Z",
/// 27 is "AA", 28 is "AB". Inputs of 0 or above `LETTER_CODE_MAX` fail.
pub fn letter_code(number: u32) -> Result<String, MatrixError> {
    if number == 0 || number > LETTER_CODE_MAX {
        return Err(MatrixError::LetterOutOfRange(number));
    }
    let mut n = number;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push((b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    letters.reverse();
    Ok(letters.into_iter().collect())
}
