//! On-disk round trips of result records.

use proptest::prelude::*;
use tessera_record::{keys, RecordError, ResultRecord, Series};

fn spin_scan_record() -> ResultRecord {
    ResultRecord::new()
        .with(keys::TEMPERATURE, vec![1.0, 1.1, 1.2])
        .with(keys::ENERGY, vec![-4999.7, -4990.25, -4971.0])
        .with(keys::MAGNETISATION, vec![2499.9, 2497.5, 2490.125])
        .with(keys::SPECIFIC_HEAT, vec![0.001, 0.0042, 0.013])
        .with(keys::SUSCEPTIBILITY, vec![0.0002, 0.0006, 0.003])
        .with(keys::SPECIFIC_HEAT_ERROR, vec![1e-5, 3.3e-4, 0.0017])
}

#[test]
fn save_then_load_preserves_everything() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ising.json");
    let record = spin_scan_record()
        .with(keys::HISTOGRAM_DATA, vec![12u64, 400, 5999])
        .with(
            keys::GLIDER_DATA,
            vec![vec![1.0, 3.5, 6.0], vec![1.0, 3.5, 6.0]],
        )
        .with(
            keys::INFECTED_FRACTIONS,
            vec![vec![Some(0.0), None], vec![Some(0.25), Some(0.31)]],
        );
    record.save(&path).unwrap();
    let loaded = ResultRecord::load(&path).unwrap();
    assert!(loaded.approx_eq(&record, 1e-9));
    let labels: Vec<&str> = loaded.keys().collect();
    let expected: Vec<&str> = record.keys().collect();
    assert_eq!(labels, expected);
    assert_eq!(
        loaded.get(keys::HISTOGRAM_DATA),
        Some(&Series::Integers(vec![12, 400, 5999]))
    );
}

#[test]
fn no_data_markers_survive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("slice.json");
    let record = ResultRecord::new().with(
        keys::SLICE_INFECTED_FRACTIONS,
        vec![None, Some(0.12), None],
    );
    record.save(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("null"));
    assert!(ResultRecord::load(&path).unwrap().approx_eq(&record, 1e-12));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ResultRecord::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, RecordError::Io(_)));
}

proptest! {
    #[test]
    fn integer_and_float_series_round_trip(
        ints in proptest::collection::vec(any::<u64>(), 0..20),
        floats in proptest::collection::vec(proptest::option::of(-1e6f64..1e6), 1..20),
    ) {
        let record = ResultRecord::new()
            .with("ints", ints)
            .with("floats", floats);
        let mut buf = Vec::new();
        record.write_to(&mut buf).unwrap();
        let back = ResultRecord::read_from(buf.as_slice()).unwrap();
        prop_assert!(back.approx_eq(&record, 1e-9));
    }
}
