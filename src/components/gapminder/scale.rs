use super::config::ChartConfig;
use super::types::{Dataset, Entity, Snapshot, radius_input};

/// Set3 qualitative scheme, cycled for more than twelve categories.
const COLORS: &[&str] = &[
	"#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
	"#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];

/// Fixed income ticks; the log axis reads best at decades of the typical range.
pub const INCOME_TICKS: &[f64] = &[400.0, 4_000.0, 40_000.0];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extent {
	pub min: f64,
	pub max: f64,
}

impl Extent {
	/// Min/max of the finite values, or `None` when there are none.
	pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
		values
			.into_iter()
			.filter(|v| v.is_finite())
			.fold(None, |acc, v| match acc {
				None => Some(Self { min: v, max: v }),
				Some(e) => Some(Self {
					min: e.min.min(v),
					max: e.max.max(v),
				}),
			})
	}

	fn span(&self) -> f64 {
		self.max - self.min
	}
}

/// Maps `t` in domain units onto the range; a collapsed domain maps to the range midpoint.
fn interpolate(t: Option<f64>, range: (f64, f64)) -> f64 {
	match t {
		Some(t) => range.0 + t * (range.1 - range.0),
		None => (range.0 + range.1) / 2.0,
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	pub domain: Extent,
	pub range: (f64, f64),
}

impl LinearScale {
	pub fn map(&self, value: f64) -> f64 {
		let span = self.domain.span();
		interpolate(
			(span != 0.0).then(|| (value - self.domain.min) / span),
			self.range,
		)
	}

	/// Round-numbered ticks inside the domain, roughly `count` of them.
	pub fn ticks(&self, count: usize) -> Vec<f64> {
		let (start, stop) = (self.domain.min, self.domain.max);
		if count == 0 || stop <= start {
			return vec![start];
		}
		let raw = (stop - start) / count as f64;
		let power = raw.log10().floor();
		let base = 10f64.powf(power);
		let error = raw / base;
		let factor = if error >= 50f64.sqrt() {
			10.0
		} else if error >= 10f64.sqrt() {
			5.0
		} else if error >= 2f64.sqrt() {
			2.0
		} else {
			1.0
		};
		let step = factor * base;
		let (first, last) = ((start / step).ceil() as i64, (stop / step).floor() as i64);
		(first..=last).map(|i| i as f64 * step).collect()
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogScale {
	pub domain: Extent,
	pub range: (f64, f64),
}

impl LogScale {
	/// Only meaningful for positive values; callers filter the rest out beforehand.
	pub fn map(&self, value: f64) -> f64 {
		let (lo, hi) = (self.domain.min.ln(), self.domain.max.ln());
		let span = hi - lo;
		interpolate(
			(span != 0.0 && span.is_finite()).then(|| (value.ln() - lo) / span),
			self.range,
		)
	}
}

/// Every value-to-pixel mapping the chart uses.
///
/// Income and life expectancy domains are frozen from the whole dataset at load.
/// The radius domain is deliberately per frame, see [`ScaleSet::radius_domain`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleSet {
	pub x: LogScale,
	pub y: LinearScale,
	categories: Vec<String>,
	radius_range: (f64, f64),
}

impl ScaleSet {
	pub fn new(dataset: &Dataset, config: &ChartConfig) -> Self {
		let all = || dataset.snapshots().iter().flat_map(|s| &s.countries);
		let incomes = Extent::of(all().filter_map(|e| e.plottable_income()));
		let life_exps = Extent::of(all().filter_map(|e| e.plottable_life_exp()));
		let fallback = Extent { min: 1.0, max: 1.0 };

		Self {
			x: LogScale {
				domain: incomes.unwrap_or(fallback),
				range: (0.0, config.inner_width()),
			},
			y: LinearScale {
				domain: life_exps.unwrap_or(fallback),
				range: (config.inner_height(), 0.0),
			},
			categories: dataset.categories().to_vec(),
			radius_range: config.radius_range,
		}
	}

	pub fn income_to_x(&self, income: f64) -> f64 {
		self.x.map(income)
	}

	pub fn life_exp_to_y(&self, life_exp: f64) -> f64 {
		self.y.map(life_exp)
	}

	pub fn categories(&self) -> &[String] {
		&self.categories
	}

	/// Ordinal colour; unknown categories share the first slot.
	pub fn category_to_color(&self, category: &str) -> &'static str {
		let ordinal = self
			.categories
			.iter()
			.position(|c| c == category)
			.unwrap_or(0);
		COLORS[ordinal % COLORS.len()]
	}

	/// Extent of `sqrt(population / π)` over the frame's plottable entities
	/// that have a usable population.
	///
	/// Recomputed for every frame so each period uses the full radius range,
	/// at the cost of radii not being comparable between periods.
	pub fn radius_domain(&self, snapshot: &Snapshot) -> Option<Extent> {
		Extent::of(snapshot.plottable().filter_map(Entity::radius_input))
	}

	/// Unusable populations get the smallest radius.
	pub fn population_to_radius(&self, population: f64, frame: Extent) -> f64 {
		match radius_input(population) {
			Some(input) => LinearScale {
				domain: frame,
				range: self.radius_range,
			}
			.map(input),
			None => self.radius_range.0,
		}
	}

	pub fn entity_radius(&self, entity: &Entity, frame: Extent) -> f64 {
		entity
			.population
			.map_or(self.radius_range.0, |p| self.population_to_radius(p, frame))
	}
}

/// Integer formatting with `,` thousands separators.
pub fn format_thousands(value: f64) -> String {
	let rounded = value.round();
	let digits = format!("{}", rounded.abs() as u64);
	let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
	if rounded < 0.0 {
		out.push('-');
	}
	for (i, ch) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(ch);
	}
	out
}
