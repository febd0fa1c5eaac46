use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MatrixError {
    #[error("axis {0} needs at least one point")]
    EmptyAxis(String),
    #[error("duplicate axis name: {0}")]
    DuplicateAxisName(String),
    #[error("duplicate point value {value} on axis {axis}")]
    DuplicatePointValue { axis: String, value: u32 },
    #[error("point does not belong to an axis of this matrix")]
    UnattachedPoint,
    #[error("points come from different matrices")]
    CrossMatrixPoints,
    #[error("two points share the axis {0}")]
    SharedAxis(String),
    #[error("coordinate covers {got} of {want} axes")]
    IncompleteCoordinate { got: usize, want: usize },
    #[error("coordinate {code} does not belong to matrix {matrix}")]
    ForeignCoordinate { code: String, matrix: String },
    #[error("unknown category rank {0}")]
    UnknownCategory(u32),
    #[error("no category mapped to coordinate {0}")]
    UnmappedCoordinate(String),
    #[error("no mapped coordinate with code {0}")]
    UnknownCode(String),
    #[error("letter codes cover 1..=702, got {0}")]
    LetterOutOfRange(u32),
}
