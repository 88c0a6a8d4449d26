#![no_main]
use libfuzzer_sys::fuzz_target;
use shunt_core::{Catalog, ExportDocument};

fuzz_target!(|data: &str| {
    // Any document that verifies must rebuild a planner with identical ranges.
    let Ok(doc) = ExportDocument::from_json(data) else {
        return;
    };
    let ranges = doc.ranges.clone();
    if let Ok(planner) = doc.into_planner(Catalog::reference()) {
        assert_eq!(planner.ranges().len(), ranges.len());
    }
});
