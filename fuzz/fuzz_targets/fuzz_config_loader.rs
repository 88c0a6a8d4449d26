#![no_main]
use libfuzzer_sys::fuzz_target;
use shunt_core::Catalog;
use shunt_core::conversions::{catalog_from_cfg, planner_from_config};

fuzz_target!(|data: &str| {
    // Parse errors and validation errors are fine; panics are not.
    let Ok(cfg) = shunt_config::load_toml(data) else {
        return;
    };
    if cfg.validate().is_err() {
        return;
    }
    // A validated config must always plan (overrides may still collide).
    let catalog = catalog_from_cfg(&cfg.catalog, None).unwrap_or_else(|_| Catalog::reference());
    if let Ok(planner) = planner_from_config(&cfg, catalog) {
        assert_eq!(planner.ranges().len(), usize::from(cfg.global.num_ranges));
    }
});
