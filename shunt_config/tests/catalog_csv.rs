use std::fs::File;
use std::io::Write;

use rstest::rstest;
use shunt_config::{CatalogRow, catalog_from_rows, load_catalog_csv};
use tempfile::tempdir;

#[rstest]
fn rows_are_sorted_ascending() {
    let rows = [
        CatalogRow { resistance_ohm: 4.7 },
        CatalogRow { resistance_ohm: 0.1 },
        CatalogRow { resistance_ohm: 1.0 },
    ];
    let values = catalog_from_rows(&rows).unwrap();
    assert_eq!(values, vec![0.1, 1.0, 4.7]);
}

#[rstest]
fn rejects_duplicate_resistance() {
    let rows = [
        CatalogRow { resistance_ohm: 1.0 },
        CatalogRow { resistance_ohm: 2.2 },
        CatalogRow { resistance_ohm: 1.0 },
    ];
    let err = catalog_from_rows(&rows).unwrap_err();
    assert!(format!("{err}").contains("lines 2 and 4"));
}

#[rstest]
#[case(0.0)]
#[case(-1.0)]
#[case(f64::NAN)]
#[case(f64::INFINITY)]
fn rejects_non_positive_or_non_finite(#[case] r: f64) {
    let rows = [CatalogRow { resistance_ohm: r }];
    let err = catalog_from_rows(&rows).unwrap_err();
    assert!(format!("{err}").contains("must be finite and > 0"));
}

#[rstest]
fn rejects_empty_rows() {
    assert!(catalog_from_rows(&[]).is_err());
}

#[rstest]
fn loads_csv_with_exact_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.csv");
    let mut f = File::create(&path).unwrap();
    writeln!(f, "resistance_ohm").unwrap();
    writeln!(f, "10").unwrap();
    writeln!(f, " 0.05 ").unwrap();
    writeln!(f, "1.5").unwrap();
    drop(f);

    let values = load_catalog_csv(&path).unwrap();
    assert_eq!(values, vec![0.05, 1.5, 10.0]);
}

#[rstest]
fn csv_with_wrong_header_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.csv");
    let mut f = File::create(&path).unwrap();
    writeln!(f, "ohms").unwrap();
    writeln!(f, "1.0").unwrap();
    drop(f);

    let err = load_catalog_csv(&path).unwrap_err();
    assert!(format!("{err}").contains("must have header 'resistance_ohm'"));
}

#[rstest]
fn csv_with_garbage_row_reports_line() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.csv");
    let mut f = File::create(&path).unwrap();
    writeln!(f, "resistance_ohm").unwrap();
    writeln!(f, "1.0").unwrap();
    writeln!(f, "abc").unwrap();
    drop(f);

    let err = load_catalog_csv(&path).unwrap_err();
    assert!(format!("{err}").contains("invalid CSV row 3"));
}

#[rstest]
fn missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let err = load_catalog_csv(&dir.path().join("nope.csv")).unwrap_err();
    assert!(format!("{err}").contains("open catalog CSV"));
}
