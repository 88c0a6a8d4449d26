use shunt_core::{GlobalConfig, OverlapInfo, Planner, compute_plan, validate_overlaps};

fn scenario() -> Planner {
    Planner::builder()
        .with_global(GlobalConfig::default())
        .build()
        .unwrap()
}

#[test]
fn outer_flags_stay_false() {
    let p = scenario();
    let first = p.ranges()[0].overlap_info;
    let last = p.ranges()[2].overlap_info;
    assert!(!first.overlaps_with_prev);
    assert!(first.overlaps_with_next);
    assert!(last.overlaps_with_prev);
    assert!(!last.overlaps_with_next);
}

#[test]
fn manual_edit_breaking_overlap_flips_flags() {
    let mut p = scenario();
    let before = p.ranges().to_vec();

    // 10 Ω: up(1) = 0.016220 A, just below down(0) = 0.016384 A.
    p.set_resistance(1, 10.0).unwrap();
    let after = p.ranges();

    assert!(after[1].up_threshold <= after[0].down_threshold);
    assert!(!after[1].overlap_info.overlaps_with_prev);
    assert!(!after[1].overlap_info.is_valid);
    assert!(!after[0].overlap_info.overlaps_with_next);

    // Fields derived from range 0 and range 2 resistors are untouched.
    for i in [0, 2] {
        let (a, b) = (&before[i], &after[i]);
        assert_eq!(a.resistance, b.resistance);
        assert_eq!(a.theoretical_max_current, b.theoretical_max_current);
        assert_eq!(a.up_threshold, b.up_threshold);
        assert_eq!(a.down_threshold, b.down_threshold);
        assert_eq!(a.min_load_resistance, b.min_load_resistance);
        assert_eq!(a.max_theoretical_error_percent, b.max_theoretical_error_percent);
    }
    assert!(after[2].overlap_info.is_valid);
}

#[test]
fn single_range_only_checks_floor() {
    let g = GlobalConfig {
        num_ranges: 1,
        ..GlobalConfig::default()
    };
    // 0.1 Ω floor: 25 µA, above the 1 µA target.
    let coarse = compute_plan(&g, &[0.1], &[1.0]);
    assert_eq!(
        coarse[0].overlap_info,
        OverlapInfo {
            overlaps_with_next: false,
            overlaps_with_prev: false,
            is_valid: false,
        }
    );

    // 1 MΩ floor: 2.5 pA.
    let fine = compute_plan(&g, &[1e6], &[1.0]);
    assert!(fine[0].overlap_info.is_valid);
    assert!(!fine[0].overlap_info.overlaps_with_next);
    assert!(!fine[0].overlap_info.overlaps_with_prev);
}

#[test]
fn last_range_must_reach_min_current_target() {
    let g = GlobalConfig {
        num_ranges: 2,
        ..GlobalConfig::default()
    };
    // 4.7 Ω floor is ~0.53 µA, under 1 µA; 2.2 Ω floor is ~1.14 µA.
    let ok = compute_plan(&g, &[0.1, 4.7], &[1.0, 1.0]);
    assert!(ok[1].overlap_info.is_valid);
    let short = compute_plan(&g, &[0.1, 2.2], &[1.0, 1.0]);
    assert!(short[1].overlap_info.overlaps_with_prev);
    assert!(!short[1].overlap_info.is_valid);
    assert!(short[0].overlap_info.is_valid);
}

#[test]
fn validation_is_idempotent() {
    let mut ranges = scenario().ranges().to_vec();
    let snapshot = ranges.clone();
    validate_overlaps(&mut ranges, GlobalConfig::default().min_current_target_amps());
    assert_eq!(ranges, snapshot);
}

#[test]
fn empty_sequence_is_a_no_op() {
    validate_overlaps(&mut [], 1e-6);
}
