use std::fs;
use strata::engine::{compare, validate};
use strata::error::Error;
use strata::field::TypeShape;
use strata::record::RecordDef;
use strata::resolve::{resolve, Substitution};

fn load_records() -> Vec<RecordDef> {
    let source = fs::read_to_string("tests/records/example.ron").unwrap();
    ron::from_str(&source).unwrap()
}

#[test]
fn concrete_record_from_file() {
    let records = load_records();
    let header = records.iter().find(|r| r.name == "Header").unwrap();

    assert!(!header.is_generic());

    let fields = resolve(header, &Substitution::new()).unwrap();
    let comparison = compare(&fields).unwrap();

    assert_eq!(comparison.declaration.total_size, 24);
    assert_eq!(comparison.minimized.total_size, 16);
    assert_eq!(comparison.bytes_saved, 8);
    assert!(comparison.reordered);
    assert!(validate(&comparison.declaration).is_empty());
    assert!(validate(&comparison.minimized).is_empty());
}

#[test]
fn generic_record_from_file() {
    let records = load_records();
    let slot = records.iter().find(|r| r.name == "Slot").unwrap();

    assert!(slot.is_generic());
    assert_eq!(slot.params, ["T"]);

    let err = resolve(slot, &Substitution::new()).unwrap_err();
    assert!(matches!(err, Error::UnresolvedParameter { .. }));

    let subst: Substitution = [("T".to_string(), TypeShape::new(2, 2))].into();
    let fields = resolve(slot, &subst).unwrap();
    let comparison = compare(&fields).unwrap();

    // An 8-aligned record of 11 useful bytes cannot shrink below 16, but
    // the minimizer still front-loads the pointer-sized field.
    assert_eq!(comparison.declaration.total_size, 16);
    assert_eq!(comparison.minimized.total_size, 16);
    assert_eq!(comparison.bytes_saved, 0);
    assert!(comparison.reordered);
}
