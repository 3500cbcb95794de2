use thiserror::Error;

/// The reasons a trace may fail to match.
///
/// None of these are exceptional: noisy or short traces regularly fail to
/// match, and callers are expected to skip, retry with a different portion of
/// the trace, or flag it for review.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("no input points were given")]
    EmptyTrace,

    #[error("no road nodes were found near the start of the trace")]
    NoNearbyRoad,

    #[error("no segment near the start of the trace is close enough to be plausible")]
    NoPlausibleSeed,

    #[error("no hypothesis could be extended to trace position {index}")]
    DeadEnd { index: usize },
}
