use thiserror::Error;

// ---------------------------------------------------------------------------
// Pipeline errors
// ---------------------------------------------------------------------------

/// Failure of a single pipeline stage (filter, derive, aggregate, bin, colour).
///
/// Loading and settings use `anyhow` instead; these variants are what a
/// chart shows in place of its plot.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No values to summarise: {0}")]
    EmptyInput(&'static str),

    #[error("Row {row} has area {area}; cannot compute rent per m²")]
    DivisionByZero { row: usize, area: f64 },
}

pub type PipelineResult<T> = Result<T, PipelineError>;
