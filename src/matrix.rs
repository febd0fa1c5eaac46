use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use crate::axis::{letter_code, Axis, AxisShape, PointId, PointSpec};
use crate::category::{Category, CategoryId};
use crate::coordinate::Coordinate;
use crate::error::MatrixError;

static NEXT_MATRIX_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of one matrix instance. Every point id carries
/// the id of its matrix, which is how cross-matrix coordinates are caught.
/// Deserialization allocates a fresh id, so ids taken before a save never
/// resolve against the restored matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatrixId(u64);

impl MatrixId {
    fn next() -> Self {
        MatrixId(NEXT_MATRIX_ID.fetch_add(1, AtomicOrdering::Relaxed))
    }
}

/// Aggregate root. Owns the axes (write-once, insertion-ordered, named),
/// the categories (keyed by rank value) and the coordinate-to-category
/// mapping. Axes and categories only grow; there are no removal operations.
#[derive(Debug)]
pub struct RiskMatrix {
    pub name: String,
    id: MatrixId,
    axes: Vec<Axis>,
    axis_index: HashMap<String, usize>,
    categories: BTreeMap<u32, Category>,
    mappings: Vec<(Coordinate, CategoryId)>,
    strict_ordering: bool,
}

impl RiskMatrix {
    pub fn new(name: &str) -> Self {
        RiskMatrix {
            name: name.to_string(),
            id: MatrixId::next(),
            axes: Vec::new(),
            axis_index: HashMap::new(),
            categories: BTreeMap::new(),
            mappings: Vec::new(),
            strict_ordering: false,
        }
    }

    /// When enabled, coordinates with equal value rank lexicographically by
    /// canonical code; when disabled, equal-value order is left to the
    /// caller's iteration order (stable sorts and first-seen reductions).
    pub fn set_strict_ordering(&mut self, on: bool) {
        self.strict_ordering = on;
    }

    pub fn strict_ordering(&self) -> bool {
        self.strict_ordering
    }

    /// Register an axis. Fails on a duplicate axis name, an empty shape, a
    /// point value collision within the new axis, or a generated letter code
    /// out of range. The axis collection is write-once: no removal.
    pub fn add_axis(&mut self, name: &str, shape: AxisShape) -> Result<&Axis, MatrixError> {
        if self.axis_index.contains_key(name) {
            return Err(MatrixError::DuplicateAxisName(name.to_string()));
        }
        let specs = match shape {
            AxisShape::Points(specs) => specs,
            AxisShape::Size { size, use_letters } => {
                let mut specs = Vec::with_capacity(size as usize);
                for n in 1..=size {
                    let code = if use_letters {
                        letter_code(n)?
                    } else {
                        n.to_string()
                    };
                    specs.push(PointSpec::new(&code, ""));
                }
                specs
            }
        };
        if specs.is_empty() {
            return Err(MatrixError::EmptyAxis(name.to_string()));
        }

        let index = self.axes.len();
        let mut axis = Axis::new(name, self.id, index as u32);
        for spec in specs {
            axis.add_point(spec)?;
        }
        self.axis_index.insert(name.to_string(), index);
        self.axes.push(axis);
        Ok(&self.axes[index])
    }

    /// Axes in declaration order.
    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn axis(&self, name: &str) -> Option<&Axis> {
        self.axis_index.get(name).map(|&i| &self.axes[i])
    }

    pub fn axis_at(&self, index: usize) -> Option<&Axis> {
        self.axes.get(index)
    }

    /// Register a category. Categories should be added from low to high
    /// risk; the rank value is the category count at insertion (0-indexed).
    pub fn add_category(
        &mut self,
        code: &str,
        name: &str,
        color: &str,
        text_color: &str,
        description: &str,
    ) -> CategoryId {
        let value = self.categories.len() as u32;
        self.categories.insert(
            value,
            Category {
                code: code.to_string(),
                name: name.to_string(),
                description: description.to_string(),
                color: color.to_string(),
                text_color: text_color.to_string(),
                value,
            },
        );
        CategoryId(value)
    }

    /// Categories in ascending rank order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id.0)
    }

    /// Build a coordinate from one point per axis. Points may arrive in any
    /// order; they are validated against this matrix and frozen in
    /// axis-declaration order, so the canonical code does not depend on
    /// argument order.
    pub fn coordinate(&self, points: &[PointId]) -> Result<Coordinate, MatrixError> {
        if points.len() != self.axes.len() {
            return Err(MatrixError::IncompleteCoordinate {
                got: points.len(),
                want: self.axes.len(),
            });
        }
        let mut by_axis: Vec<Option<PointId>> = vec![None; self.axes.len()];
        for id in points {
            if id.matrix != self.id {
                return Err(MatrixError::CrossMatrixPoints);
            }
            let axis = self
                .axes
                .get(id.axis as usize)
                .ok_or(MatrixError::UnattachedPoint)?;
            if axis.point_by_value(id.value).is_none() {
                return Err(MatrixError::UnattachedPoint);
            }
            let slot = &mut by_axis[id.axis as usize];
            if slot.is_some() {
                return Err(MatrixError::SharedAxis(axis.name.clone()));
            }
            *slot = Some(*id);
        }

        let mut ordered = Vec::with_capacity(by_axis.len());
        let mut code = String::new();
        for (index, slot) in by_axis.into_iter().enumerate() {
            // Equal length plus the shared-axis check leave every slot filled.
            let id = slot.ok_or(MatrixError::IncompleteCoordinate {
                got: points.len(),
                want: self.axes.len(),
            })?;
            let point = self.axes[index]
                .point_by_value(id.value)
                .ok_or(MatrixError::UnattachedPoint)?;
            code.push_str(&point.code);
            ordered.push(id);
        }
        Ok(Coordinate::new(self.id, ordered, code))
    }

    /// Map a category to a cell. Remapping the same cell overwrites the
    /// previous category (last write wins).
    pub fn map_coordinate(
        &mut self,
        category: CategoryId,
        coordinate: Coordinate,
    ) -> Result<(), MatrixError> {
        if coordinate.matrix() != self.id {
            return Err(MatrixError::ForeignCoordinate {
                code: coordinate.code().to_string(),
                matrix: self.name.clone(),
            });
        }
        if !self.categories.contains_key(&category.0) {
            return Err(MatrixError::UnknownCategory(category.0));
        }
        if let Some(entry) = self
            .mappings
            .iter_mut()
            .find(|(mapped, _)| mapped.same_cell(&coordinate))
        {
            entry.1 = category;
        } else {
            self.mappings.push((coordinate, category));
        }
        Ok(())
    }

    /// Build a coordinate from `points` and map it in one step.
    pub fn map_points(
        &mut self,
        category: CategoryId,
        points: &[PointId],
    ) -> Result<Coordinate, MatrixError> {
        let coordinate = self.coordinate(points)?;
        self.map_coordinate(category, coordinate.clone())?;
        Ok(coordinate)
    }

    /// Map a category to each coordinate in turn. The first failure aborts
    /// the batch; coordinates mapped before it stay mapped.
    pub fn map_coordinates(
        &mut self,
        category: CategoryId,
        coordinates: impl IntoIterator<Item = Coordinate>,
    ) -> Result<(), MatrixError> {
        for coordinate in coordinates {
            self.map_coordinate(category, coordinate)?;
        }
        Ok(())
    }

    /// Mapped coordinates in mapping insertion order.
    pub fn coordinates(&self) -> impl Iterator<Item = &Coordinate> {
        self.mappings.iter().map(|(coordinate, _)| coordinate)
    }

    pub(crate) fn mapping_entries(&self) -> impl Iterator<Item = (&Coordinate, CategoryId)> {
        self.mappings
            .iter()
            .map(|(coordinate, category)| (coordinate, *category))
    }

    /// Exact cell-identity lookup; never falls back to a default category.
    pub fn get_category(&self, coordinate: &Coordinate) -> Result<&Category, MatrixError> {
        let category = self
            .mappings
            .iter()
            .find(|(mapped, _)| mapped.same_cell(coordinate))
            .map(|(_, category)| *category)
            .ok_or_else(|| MatrixError::UnmappedCoordinate(coordinate.code().to_string()))?;
        self.categories
            .get(&category.0)
            .ok_or(MatrixError::UnknownCategory(category.0))
    }

    /// Resolve a canonical code like "B2" to its mapped coordinate.
    /// First match wins, though codes are unique under correct construction.
    pub fn get_coordinate(&self, code: &str) -> Result<&Coordinate, MatrixError> {
        self.mappings
            .iter()
            .map(|(coordinate, _)| coordinate)
            .find(|coordinate| coordinate.code() == code)
            .ok_or_else(|| MatrixError::UnknownCode(code.to_string()))
    }

    /// Highest-ranked registered category; None on an empty matrix.
    pub fn get_max_category(&self) -> Option<&Category> {
        self.categories.values().next_back()
    }

    /// Highest-valued coordinate of the supplied set; None on empty input.
    /// Ties follow the matrix ordering mode: under strict ordering the
    /// lexicographically larger code wins, otherwise the first seen wins.
    pub fn get_max_coordinate<'a>(
        &self,
        coordinates: impl IntoIterator<Item = &'a Coordinate>,
    ) -> Option<&'a Coordinate> {
        let mut best: Option<&Coordinate> = None;
        for coordinate in coordinates {
            match best {
                Some(current) if self.rank(coordinate, current) != Ordering::Greater => {}
                _ => best = Some(coordinate),
            }
        }
        best
    }

    /// Order two coordinates by value. Equal values rank by canonical code
    /// when strict ordering is enabled and compare equal otherwise.
    pub fn rank(&self, a: &Coordinate, b: &Coordinate) -> Ordering {
        match a.value().cmp(&b.value()) {
            Ordering::Equal if self.strict_ordering => a.code().cmp(b.code()),
            ordering => ordering,
        }
    }

    /// Stable sort by `rank`: equal-value coordinates keep their relative
    /// order unless strict ordering breaks the tie.
    pub fn sort_coordinates(&self, coordinates: &mut [Coordinate]) {
        coordinates.sort_by(|a, b| self.rank(a, b));
    }
}

impl fmt::Display for RiskMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
