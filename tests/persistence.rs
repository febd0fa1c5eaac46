use std::collections::HashMap;

use riskmatrix::{
    load_matrix, save_matrix, AxisShape, CategoryId, Coordinate, MatrixError, PointSpec, RiskMatrix,
};
use tempfile::TempDir;

fn full_matrix() -> RiskMatrix {
    let mut rm = RiskMatrix::new("Risk matrix");
    rm.add_axis(
        "x",
        AxisShape::points([
            PointSpec::new("A", "Unlikely").with_description("Almost never happens"),
            PointSpec::new("B", "Likely"),
            PointSpec::new("C", "Very Likely"),
        ]),
    )
    .expect("x axis");
    rm.add_axis(
        "y",
        AxisShape::points([
            PointSpec::new("1", "No Impact"),
            PointSpec::new("2", "Cheap"),
            PointSpec::new("3", "Expensive"),
        ]),
    )
    .expect("y axis");

    let low = rm.add_category("LOW", "Low risk", "#ffff11", "#ffffff", "");
    let med = rm.add_category("MED", "Med risk", "#ffff00", "#ffffff", "");
    let hig = rm.add_category("HIG", "Hig risk", "#ff0000", "#ffffff", "");

    let groups: [(CategoryId, &[(usize, usize)]); 3] = [
        (low, &[(0, 0), (0, 1), (0, 2), (1, 0)]),
        (med, &[(1, 1), (2, 0)]),
        (hig, &[(1, 2), (2, 1), (2, 2)]),
    ];
    for (category, cells) in groups {
        let coords: Vec<Coordinate> = cells
            .iter()
            .map(|&(x, y)| {
                let px = rm.axis("x").unwrap().points()[x].id();
                let py = rm.axis("y").unwrap().points()[y].id();
                rm.coordinate(&[px, py]).expect("coordinate")
            })
            .collect();
        rm.map_coordinates(category, coords).expect("map cells");
    }
    rm
}

#[test]
fn matrix_survives_a_file_round_trip() {
    let rm = full_matrix();
    let tmp = TempDir::new().expect("create temp dir");
    let path = tmp.path().join("state").join("matrix.json");

    save_matrix(&path, &rm).expect("save matrix");
    let restored = load_matrix(&path).expect("load matrix");

    assert_eq!(restored.name, rm.name);
    assert_eq!(restored.axes().len(), 2);
    assert_eq!(restored.categories().count(), 3);
    assert_eq!(restored.coordinates().count(), rm.coordinates().count());

    let b2 = restored.get_coordinate("B2").expect("B2 mapped");
    assert_eq!(restored.get_category(b2).unwrap().code, "MED");
    assert_eq!(restored.get_category(b2).unwrap().value, 1);
    assert_eq!(restored.get_max_category().unwrap().code, "HIG");
}

#[test]
fn restored_coordinates_key_against_the_restored_matrix() {
    let rm = full_matrix();
    let json = serde_json::to_string(&rm).expect("serialize");
    let restored: RiskMatrix = serde_json::from_str(&json).expect("deserialize");

    // Identity and hashing hold inside the restored matrix.
    let x = restored.axis("x").unwrap().points()[1].id();
    let y = restored.axis("y").unwrap().points()[1].id();
    let rebuilt = restored.coordinate(&[y, x]).expect("rebuild B2");
    let mapped = restored.get_coordinate("B2").expect("mapped B2");
    assert!(rebuilt.same_cell(mapped));

    let mut by_cell = HashMap::new();
    by_cell.insert(rebuilt.clone(), "rebuilt");
    by_cell.insert(mapped.clone(), "mapped");
    assert_eq!(by_cell.len(), 1);

    // Point ids from the pre-serialization matrix are stale on purpose.
    let stale = rm.axis("x").unwrap().points()[1].id();
    let err = restored
        .coordinate(&[stale, restored.axis("y").unwrap().points()[1].id()])
        .unwrap_err();
    assert_eq!(err, MatrixError::CrossMatrixPoints);

    // Coordinates of distinct matrix instances are distinct cells.
    let original_b2 = rm.get_coordinate("B2").expect("original B2");
    assert_ne!(original_b2, mapped);
}

#[test]
fn serialized_form_preserves_point_detail_and_ordering_mode() {
    let mut rm = full_matrix();
    rm.set_strict_ordering(true);

    let json = serde_json::to_string_pretty(&rm).expect("serialize");
    let restored: RiskMatrix = serde_json::from_str(&json).expect("deserialize");

    assert!(restored.strict_ordering());
    let a = &restored.axis("x").unwrap().points()[0];
    assert_eq!(a.code, "A");
    assert_eq!(a.name, "Unlikely");
    assert_eq!(a.description, "Almost never happens");
    assert_eq!(a.value, 1);

    let mut cells: Vec<Coordinate> = restored.coordinates().cloned().collect();
    restored.sort_coordinates(&mut cells);
    assert_eq!(cells.last().unwrap().code(), "C3");
}

#[test]
fn loading_a_corrupt_mapping_fails() {
    let json = r##"{
        "name": "broken",
        "axes": [
            {"name": "x", "points": [{"code": "A", "value": 1}]},
            {"name": "y", "points": [{"code": "1", "value": 1}]}
        ],
        "categories": [
            {"code": "LOW", "name": "Low", "color": "#0f0", "text_color": "#fff", "value": 0}
        ],
        "mappings": [{"category": 0, "points": [1, 9]}]
    }"##;
    let err = serde_json::from_str::<RiskMatrix>(json).unwrap_err();
    assert!(err.to_string().contains("does not belong"));
}
