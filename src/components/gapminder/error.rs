/// Result alias used by the fallible edges of the chart (loading, browser setup).
pub type ChartResult<T> = Result<T, ChartError>;

/// Everything that can stop the chart from starting.
///
/// Steady-state operations (ticks, seeks, filter toggles) never fail; bad entity
/// values are filtered out of a frame instead of being reported here.
#[derive(thiserror::Error, Clone, Debug, PartialEq)]
pub enum ChartError {
	#[error("failed to fetch dataset: {0}")]
	Fetch(String),

	#[error("malformed dataset: {0}")]
	Parse(String),

	#[error("dataset contains no snapshots")]
	EmptyDataset,

	#[error("canvas unavailable: {0}")]
	Canvas(String),

	#[error("could not schedule timer: {0}")]
	Timer(String),
}

impl From<serde_json::Error> for ChartError {
	fn from(err: serde_json::Error) -> Self {
		Self::Parse(err.to_string())
	}
}
