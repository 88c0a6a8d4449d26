use thiserror::Error;

/// Errors raised at the edges of the planner: manual edits and import.
///
/// The computation itself never fails; an unusable plan is reported through
/// `OverlapInfo::is_valid` and zero-clamped load fields instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ShuntError {
    #[error("range index {index} is out of bounds for {len} ranges")]
    InvalidIndex { index: usize, len: usize },
    #[error("resistance must be finite and > 0, got {0}")]
    InvalidResistance(f64),
    #[error("resistance {ohms} is already used by range {used_by}")]
    DuplicateResistance { ohms: f64, used_by: usize },
    #[error("tolerance must be finite and >= 0, got {0}")]
    InvalidTolerance(f64),
    #[error("import error: {0}")]
    Import(String),
    #[error("export error: {0}")]
    Export(String),
    #[error("plan is incomplete: ranges {invalid:?} are invalid or the span is not covered")]
    IncompletePlan { invalid: Vec<usize> },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("missing global configuration")]
    MissingGlobal,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("catalog has no resistances")]
    EmptyCatalog,
    #[error("invalid catalog: {0}")]
    InvalidCatalog(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
