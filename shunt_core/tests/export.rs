use chrono::{TimeZone, Utc};
use rstest::rstest;
use shunt_core::export::EXPORT_FORMAT_VERSION;
use shunt_core::{Catalog, ExportDocument, GlobalConfig, Planner, ShuntError};
use shunt_traits::FixedClock;

fn clock() -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap())
}

fn scenario() -> Planner {
    Planner::builder()
        .with_global(GlobalConfig::default())
        .build()
        .unwrap()
}

fn exported_json() -> String {
    ExportDocument::from_planner(&scenario(), &clock())
        .to_json_pretty()
        .unwrap()
}

fn import_error(json: &str) -> String {
    match ExportDocument::from_json(json) {
        Err(ShuntError::Import(msg)) => msg,
        other => panic!("expected import error, got {other:?}"),
    }
}

#[test]
fn document_layout_uses_camel_case() {
    let v: serde_json::Value = serde_json::from_str(&exported_json()).unwrap();
    assert_eq!(v["version"], EXPORT_FORMAT_VERSION);
    assert_eq!(v["timestamp"], "2024-03-01T12:30:00.000Z");
    assert_eq!(v["globalConfig"]["numRanges"], 3);
    assert_eq!(v["globalConfig"]["adcResolutionVoltPerLsb"], 2.5e-6);
    assert_eq!(v["globalConfig"]["minCurrentTargetNanoamp"], 1000.0);
    let r0 = &v["ranges"][0];
    assert_eq!(r0["resistance"], 0.1);
    assert_eq!(r0["resistanceTolerancePercent"], 1.0);
    assert_eq!(r0["overlapInfo"]["isValid"], true);
    assert_eq!(r0["overlapInfo"]["overlapsWithPrev"], false);
    assert!(r0["maxPowerDissipation"].is_f64());
}

#[test]
fn round_trip_is_exact() {
    let planner = scenario();
    let doc = ExportDocument::from_planner(&planner, &clock());
    let back = ExportDocument::from_json(&doc.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, doc);
    assert_eq!(back.global_config, *planner.global());
    assert_eq!(back.ranges.as_slice(), planner.ranges());
}

#[test]
fn imported_document_rebuilds_planner() {
    let mut planner = scenario();
    planner.set_resistance(1, 10.0).unwrap();
    planner.set_tolerance(2, 0.1).unwrap();
    let json = ExportDocument::from_planner(&planner, &clock())
        .to_json_pretty()
        .unwrap();

    let rebuilt = ExportDocument::from_json(&json)
        .unwrap()
        .into_planner(Catalog::reference())
        .unwrap();
    assert_eq!(rebuilt.resistances(), planner.resistances());
    assert_eq!(rebuilt.tolerances(), planner.tolerances());
    assert_eq!(rebuilt.ranges(), planner.ranges());
}

#[rstest]
#[case::version("\"version\": \"1.0\"", "\"version\": \"2.0\"", "version")]
#[case::timestamp("2024-03-01T12:30:00.000Z", "yesterday", "timestamp")]
#[case::count("\"numRanges\": 3", "\"numRanges\": 2", "numRanges")]
#[case::bounds("\"adcBits\": 16", "\"adcBits\": 4", "adc_bits")]
fn rejects_tampered_header(#[case] from: &str, #[case] to: &str, #[case] needle: &str) {
    let json = exported_json();
    assert!(json.contains(from), "fixture drifted: {from}");
    let msg = import_error(&json.replacen(from, to, 1));
    assert!(msg.contains(needle), "{msg}");
}

#[test]
fn rejects_inconsistent_range_fields() {
    let mut doc = ExportDocument::from_planner(&scenario(), &clock());
    doc.ranges[1].up_threshold *= 1.01;
    let msg = import_error(&doc.to_json_pretty().unwrap());
    assert!(msg.contains("range 1"), "{msg}");
    assert!(msg.contains("upThreshold"), "{msg}");
}

#[test]
fn rejects_stale_overlap_flags() {
    let mut doc = ExportDocument::from_planner(&scenario(), &clock());
    doc.ranges[2].overlap_info.is_valid = false;
    let msg = import_error(&doc.to_json_pretty().unwrap());
    assert!(msg.contains("overlapInfo"), "{msg}");
}

#[test]
fn rejects_missing_fields() {
    let json = exported_json().replacen("\"maxPowerDissipation\"", "\"unknownField\"", 1);
    assert!(matches!(
        ExportDocument::from_json(&json),
        Err(ShuntError::Import(_))
    ));
}

#[test]
fn rejects_non_json() {
    assert!(matches!(
        ExportDocument::from_json("not json"),
        Err(ShuntError::Import(_))
    ));
}
