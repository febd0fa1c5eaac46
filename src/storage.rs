use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::axis::{AxisShape, PointId, PointSpec};
use crate::category::CategoryId;
use crate::error::MatrixError;
use crate::matrix::RiskMatrix;

/// Flat persisted form of a matrix. Mappings reference points by their value
/// on each axis rather than by runtime id, so a restore replays the public
/// construction API against a brand-new matrix and every restored coordinate
/// is keyed to the restored matrix, never to the one that was saved.
#[derive(Debug, Serialize, Deserialize)]
struct MatrixDoc {
    name: String,
    #[serde(default)]
    strict_ordering: bool,
    axes: Vec<AxisDoc>,
    #[serde(default)]
    categories: Vec<CategoryDoc>,
    #[serde(default)]
    mappings: Vec<MappingDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct AxisDoc {
    name: String,
    points: Vec<PointDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
struct PointDoc {
    code: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    value: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct CategoryDoc {
    code: String,
    name: String,
    color: String,
    text_color: String,
    #[serde(default)]
    description: String,
    value: u32,
}

/// One mapped cell: the category rank plus the point value on each axis,
/// in axis-declaration order.
#[derive(Debug, Serialize, Deserialize)]
struct MappingDoc {
    category: u32,
    points: Vec<u32>,
}

impl From<&RiskMatrix> for MatrixDoc {
    fn from(matrix: &RiskMatrix) -> Self {
        MatrixDoc {
            name: matrix.name.clone(),
            strict_ordering: matrix.strict_ordering(),
            axes: matrix
                .axes()
                .iter()
                .map(|axis| AxisDoc {
                    name: axis.name.clone(),
                    points: axis
                        .points()
                        .iter()
                        .map(|point| PointDoc {
                            code: point.code.clone(),
                            name: point.name.clone(),
                            description: point.description.clone(),
                            value: point.value,
                        })
                        .collect(),
                })
                .collect(),
            categories: matrix
                .categories()
                .map(|category| CategoryDoc {
                    code: category.code.clone(),
                    name: category.name.clone(),
                    color: category.color.clone(),
                    text_color: category.text_color.clone(),
                    description: category.description.clone(),
                    value: category.value,
                })
                .collect(),
            mappings: matrix
                .mapping_entries()
                .map(|(coordinate, category)| MappingDoc {
                    category: category.value(),
                    points: coordinate.points().iter().map(|p| p.value).collect(),
                })
                .collect(),
        }
    }
}

fn rebuild(doc: MatrixDoc) -> Result<RiskMatrix, MatrixError> {
    let mut matrix = RiskMatrix::new(&doc.name);
    matrix.set_strict_ordering(doc.strict_ordering);

    for axis in doc.axes {
        let specs: Vec<PointSpec> = axis
            .points
            .into_iter()
            .map(|point| PointSpec {
                code: point.code,
                name: point.name,
                description: point.description,
                value: Some(point.value),
            })
            .collect();
        matrix.add_axis(&axis.name, AxisShape::Points(specs))?;
    }

    // Replaying in rank order reproduces the 0-indexed insertion ranks.
    let mut categories = doc.categories;
    categories.sort_by_key(|category| category.value);
    for category in categories {
        matrix.add_category(
            &category.code,
            &category.name,
            &category.color,
            &category.text_color,
            &category.description,
        );
    }

    for mapping in doc.mappings {
        let mut points: Vec<PointId> = Vec::with_capacity(mapping.points.len());
        for (index, value) in mapping.points.iter().enumerate() {
            let point = matrix
                .axis_at(index)
                .and_then(|axis| axis.point_by_value(*value))
                .ok_or(MatrixError::UnattachedPoint)?;
            points.push(point.id());
        }
        matrix.map_points(CategoryId(mapping.category), &points)?;
    }

    Ok(matrix)
}

impl Serialize for RiskMatrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        MatrixDoc::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RiskMatrix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let doc = MatrixDoc::deserialize(deserializer)?;
        rebuild(doc).map_err(serde::de::Error::custom)
    }
}

pub fn save_matrix(path: &Path, matrix: &RiskMatrix) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(matrix)?)?;
    Ok(())
}

pub fn load_matrix(path: &Path) -> anyhow::Result<RiskMatrix> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
