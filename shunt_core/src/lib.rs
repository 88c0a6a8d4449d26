#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Range planning for multi-range current sensing.
//!
//! Given a current span, an ADC and a catalog of sense resistors, pick one
//! resistor per range, derive each range's electrical limits and check that
//! neighbouring ranges overlap so the whole span is measurable.
//!
//! ## Architecture
//!
//! - **Catalog**: candidate resistances and tolerance grades (`catalog`)
//! - **Calculator**: per-range currents, thresholds, load bounds (`range`)
//! - **Search**: greedy resistor selection (`search`)
//! - **Validation**: pairwise overlap and coverage flags (`overlap`)
//! - **Planner**: atomic recompute-then-validate driver (`planner`)
//! - **Export**: versioned JSON document with consistency checks (`export`)
//!
//! Nothing in the computation path returns an error. Unusable plans are
//! reported through `OverlapInfo::is_valid`; degenerate load, error and power
//! values are clamped to zero.

pub mod catalog;
pub mod conversions;
pub mod error;
pub mod export;
pub mod format;
pub mod global;
pub mod overlap;
pub mod planner;
pub mod range;
pub mod search;
pub mod util;

pub use catalog::{Catalog, ESeries};
pub use error::{BuildError, ShuntError};
pub use export::ExportDocument;
pub use global::GlobalConfig;
pub use overlap::validate_overlaps;
pub use planner::{PlanSummary, Planner, RangeEdit, compute_plan};
pub use range::{AdcParams, OverlapInfo, RangeConfig, RangePosition, compute_range};
pub use search::select_resistances;
