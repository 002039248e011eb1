//! End-to-end behaviour of the cell operations.

use cellstore_core::{CellError, CellId, CellStore, CyclePolicy, MemoryStore, Sheet};

fn id(s: &str) -> CellId {
    CellId::parse(s).unwrap()
}

#[test]
fn test_formula_over_literals() {
    let sheet = Sheet::in_memory();
    sheet.set_cell_value("A2", "12").unwrap();
    sheet.set_cell_value("A3", "13").unwrap();
    sheet.set_cell_value("A4", "14").unwrap();
    sheet.set_cell_value("A1", "=A4-(A2+A3)").unwrap();
    assert_eq!(sheet.get_cell_value("A1").unwrap(), "-11.0");
}

#[test]
fn test_formula_over_formulas() {
    let sheet = Sheet::in_memory();
    sheet.set_cell_value("A1", "=A4+A2+A3").unwrap();
    sheet.set_cell_value("A2", "=12").unwrap();
    sheet.set_cell_value("A3", "=13").unwrap();
    sheet.set_cell_value("A4", "=14").unwrap();
    assert_eq!(sheet.get_cell_value("A1").unwrap(), "39.0");
    assert_eq!(sheet.get_cell_value("A2").unwrap(), "12.0");
}

#[test]
fn test_nested_formulas_splice_without_grouping() {
    let sheet = Sheet::in_memory();
    sheet.set_cell_value("B1", "=2+3").unwrap();
    sheet.set_cell_value("C1", "=B1*4").unwrap();
    sheet.set_cell_value("D1", "=10-C1").unwrap();
    // C1 expands to 2+3*4 and D1 to 10-2+3*4.
    assert_eq!(sheet.get_cell_value("C1").unwrap(), "14.0");
    assert_eq!(sheet.get_cell_value("D1").unwrap(), "20.0");
}

#[test]
fn test_reading_a_value_written_later() {
    let sheet = Sheet::in_memory();
    sheet.set_cell_value("A1", "=b1*2").unwrap();
    assert_eq!(sheet.get_cell_value("A1").unwrap(), "0.0");
    sheet.set_cell_value("B1", "21").unwrap();
    assert_eq!(sheet.get_cell_value("A1").unwrap(), "42.0");
}

#[test]
fn test_error_kinds() {
    let sheet = Sheet::in_memory();
    assert!(matches!(
        sheet.set_cell_value("1", 123),
        Err(CellError::InvalidIdentifier(_))
    ));
    assert!(matches!(
        sheet.set_cell_value("A1", "=A1+1"),
        Err(CellError::SelfReference(_))
    ));
    assert!(matches!(
        sheet.get_cell_value("A1"),
        Err(CellError::CellNotFound(_))
    ));

    sheet.set_cell_value("A1", "=A3").unwrap();
    sheet.set_cell_value("A3", "=B2").unwrap();
    sheet.set_cell_value("B2", "=A1").unwrap();
    assert!(matches!(
        sheet.get_cell_value("A1"),
        Err(CellError::CircularDependency(_))
    ));

    sheet.set_cell_value("C1", "12+23)").unwrap();
    sheet.set_cell_value("C2", "=C1").unwrap();
    assert!(matches!(
        sheet.get_cell_value("C2"),
        Err(CellError::ExpressionEvaluation(_))
    ));
}

#[test]
fn test_write_policy_keeps_graph_acyclic() {
    let sheet = Sheet::with_policy(MemoryStore::new(), CyclePolicy::Write);
    sheet.set_cell_value("A1", "=B1").unwrap();
    assert!(matches!(
        sheet.set_cell_value("B1", "=A1"),
        Err(CellError::CircularDependency(_))
    ));
    sheet.set_cell_value("B1", "=C1+1").unwrap();
    assert_eq!(sheet.get_cell_value("A1").unwrap(), "1.0");
}

#[test]
fn test_custom_store() {
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MapStore(Mutex<HashMap<CellId, cellstore_core::CellRecord>>);

    impl CellStore for MapStore {
        fn find(&self, id: &CellId) -> Option<cellstore_core::CellRecord> {
            self.0.lock().unwrap().get(id).cloned()
        }

        fn save(&self, record: cellstore_core::CellRecord) -> cellstore_core::CellRecord {
            self.0.lock().unwrap().insert(record.id.clone(), record.clone());
            record
        }
    }

    let sheet = Sheet::new(MapStore::default());
    sheet.set_cell_value("A1", "=A2/4").unwrap();
    sheet.set_cell_value("A2", "10").unwrap();
    assert_eq!(sheet.get_cell_value("A1").unwrap(), "2.5");
    assert!(sheet.store().find(&id("A2")).is_some());
}

#[test]
fn test_concurrent_independent_cells() {
    let sheet = Sheet::in_memory();
    sheet.set_cell_value("Z1", "1").unwrap();

    std::thread::scope(|scope| {
        for col in ['A', 'B', 'C', 'D'] {
            let sheet = &sheet;
            scope.spawn(move || {
                for row in 1..50 {
                    let cell = format!("{}{}", col, row);
                    sheet.set_cell_value(&cell, format!("=Z1+{}", row)).unwrap();
                    let expected = format!("{}.0", row + 1);
                    assert_eq!(sheet.get_cell_value(&cell).unwrap(), expected);
                }
            });
        }
    });

    assert_eq!(sheet.store().len(), 4 * 49 + 1);
}
