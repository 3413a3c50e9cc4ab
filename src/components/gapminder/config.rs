#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
	pub top: f64,
	pub right: f64,
	pub bottom: f64,
	pub left: f64,
}

pub const LEGEND_ROW_HEIGHT: f64 = 24.0;
pub const LEGEND_SWATCH: f64 = 12.0;
/// Clickable width to the left of the swatch, covering the right-aligned label.
pub const LEGEND_LABEL_WIDTH: f64 = 110.0;

/// Geometry and timing of the chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
	pub width: f64,
	pub height: f64,
	pub margin: Margin,
	/// Playback cadence.
	pub tick_ms: u32,
	/// Shared by enter, update and exit transitions.
	pub transition_ms: f64,
	pub radius_range: (f64, f64),
	pub data_url: String,
}

impl Default for ChartConfig {
	fn default() -> Self {
		Self {
			width: 1150.0,
			height: 600.0,
			margin: Margin {
				top: 30.0,
				right: 30.0,
				bottom: 80.0,
				left: 80.0,
			},
			tick_ms: 200,
			transition_ms: 250.0,
			radius_range: (2.0, 35.0),
			data_url: "data/data.json".into(),
		}
	}
}

impl ChartConfig {
	pub fn inner_width(&self) -> f64 {
		self.width - self.margin.left - self.margin.right
	}

	pub fn inner_height(&self) -> f64 {
		self.height - self.margin.top - self.margin.bottom
	}

	/// Canvas coordinates to plotting-area coordinates.
	pub fn to_inner(&self, sx: f64, sy: f64) -> (f64, f64) {
		(sx - self.margin.left, sy - self.margin.top)
	}

	/// Top-right anchor of the legend, in plotting-area coordinates.
	pub fn legend_origin(&self) -> (f64, f64) {
		(
			self.inner_width() - self.margin.right,
			self.inner_height() - 200.0,
		)
	}

	/// Legend row under a plotting-area point, if any.
	pub fn legend_row_at(&self, x: f64, y: f64, rows: usize) -> Option<usize> {
		let (ox, oy) = self.legend_origin();
		if x < ox - LEGEND_LABEL_WIDTH || x > ox + LEGEND_SWATCH || y < oy {
			return None;
		}
		let row = ((y - oy) / LEGEND_ROW_HEIGHT).floor() as usize;
		(row < rows).then_some(row)
	}
}
