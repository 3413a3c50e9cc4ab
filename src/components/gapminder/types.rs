use std::f64::consts::PI;

use serde::{Deserialize, Deserializer};

use super::error::{ChartError, ChartResult};

/// One country's values for a single period.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Entity {
	pub country: String,
	pub continent: String,
	#[serde(default)]
	pub income: Option<f64>,
	#[serde(default)]
	pub life_exp: Option<f64>,
	#[serde(default)]
	pub population: Option<f64>,
}

impl Entity {
	/// Income when it can sit on a log axis.
	pub fn plottable_income(&self) -> Option<f64> {
		self.income.filter(|v| v.is_finite() && *v > 0.0)
	}

	pub fn plottable_life_exp(&self) -> Option<f64> {
		self.life_exp.filter(|v| v.is_finite())
	}

	/// Whether this entity is drawn at all in its frame.
	pub fn is_plottable(&self) -> bool {
		self.plottable_income().is_some() && self.plottable_life_exp().is_some()
	}

	/// Area-true radius input, `sqrt(population / π)`, when the population is usable.
	pub fn radius_input(&self) -> Option<f64> {
		self.population.and_then(radius_input)
	}
}

/// `None` for negative or non-finite populations; they carry no size.
pub fn radius_input(population: f64) -> Option<f64> {
	(population.is_finite() && population >= 0.0).then(|| (population / PI).sqrt())
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Snapshot {
	#[serde(deserialize_with = "year_from_number_or_string")]
	pub year: i32,
	pub countries: Vec<Entity>,
}

impl Snapshot {
	pub fn plottable(&self) -> impl Iterator<Item = &Entity> {
		self.countries.iter().filter(|e| e.is_plottable())
	}
}

fn year_from_number_or_string<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum RawYear {
		Number(f64),
		Text(String),
	}

	match RawYear::deserialize(deserializer)? {
		RawYear::Number(n) if n.fract() == 0.0 => Ok(n as i32),
		RawYear::Number(n) => Err(serde::de::Error::custom(format!("non-integer year {n}"))),
		RawYear::Text(s) => s
			.trim()
			.parse()
			.map_err(|_| serde::de::Error::custom(format!("invalid year {s:?}"))),
	}
}

/// The whole time series, immutable once loaded.
///
/// Categories are collected from every snapshot in first-seen order, starting
/// with snapshot 0, so their ordinal (and therefore colour) is fixed for the
/// session even if a later period introduces a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
	snapshots: Vec<Snapshot>,
	categories: Vec<String>,
}

impl Dataset {
	pub fn new(snapshots: Vec<Snapshot>) -> ChartResult<Self> {
		if snapshots.is_empty() {
			return Err(ChartError::EmptyDataset);
		}
		let mut categories: Vec<String> = Vec::new();
		for entity in snapshots.iter().flat_map(|s| &s.countries) {
			if !categories.contains(&entity.continent) {
				categories.push(entity.continent.clone());
			}
		}
		Ok(Self {
			snapshots,
			categories,
		})
	}

	pub fn from_json(text: &str) -> ChartResult<Self> {
		let snapshots: Vec<Snapshot> = serde_json::from_str(text)?;
		Self::new(snapshots)
	}

	pub fn len(&self) -> usize {
		self.snapshots.len()
	}

	/// Snapshot at `index`, clamped to the last one.
	pub fn snapshot(&self, index: usize) -> &Snapshot {
		&self.snapshots[index.min(self.snapshots.len() - 1)]
	}

	pub fn snapshots(&self) -> &[Snapshot] {
		&self.snapshots
	}

	pub fn categories(&self) -> &[String] {
		&self.categories
	}
}


#[cfg(test)]
mod tests {
	use super::fixtures::*;
	use super::*;

	#[test]
	fn parses_the_published_shape() {
		let json = r#"[
			{ "year": 1800, "countries": [
				{ "country": "Angola", "continent": "africa", "income": 618, "life_exp": 26.98, "population": 1567028 },
				{ "country": "Benin", "continent": "africa", "income": null, "life_exp": null, "population": 636559 }
			]},
			{ "year": "1801", "countries": [
				{ "country": "Angola", "continent": "africa", "income": 620, "life_exp": 26.98, "population": 1567028 },
				{ "country": "Chile", "continent": "americas", "income": 1000, "life_exp": 32.0, "population": 800000 }
			]}
		]"#;
		let dataset = Dataset::from_json(json).unwrap();
		assert_eq!(dataset.len(), 2);
		assert_eq!(dataset.snapshot(1).year, 1801);
		assert_eq!(dataset.categories(), ["africa", "americas"]);
		assert_eq!(dataset.snapshot(0).plottable().count(), 1);
	}

	#[test]
	fn rejects_empty_and_malformed_documents() {
		assert_eq!(Dataset::from_json("[]"), Err(ChartError::EmptyDataset));
		assert!(matches!(
			Dataset::from_json(r#"[{ "year": 1800 }]"#),
			Err(ChartError::Parse(_))
		));
		assert!(matches!(
			Dataset::from_json(r#"[{ "year": "soon", "countries": [] }]"#),
			Err(ChartError::Parse(_))
		));
	}

	#[test]
	fn non_positive_income_is_not_plottable() {
		assert!(!entity("A", "c", Some(0.0), Some(50.0), 1.0).is_plottable());
		assert!(!entity("A", "c", Some(-3.0), Some(50.0), 1.0).is_plottable());
		assert!(!entity("A", "c", Some(10.0), None, 1.0).is_plottable());
		assert!(entity("A", "c", Some(10.0), Some(50.0), 1.0).is_plottable());
	}

	#[test]
	fn radius_input_is_area_true() {
		let e = entity("A", "c", Some(1.0), Some(1.0), PI * 16.0);
		assert!((e.radius_input().unwrap() - 4.0).abs() < 1e-12);
		assert_eq!(radius_input(0.0), Some(0.0));
		assert_eq!(radius_input(-1.0), None);
		assert_eq!(radius_input(f64::NAN), None);
		let unknown = Entity {
			population: None,
			..e
		};
		assert_eq!(unknown.radius_input(), None);
	}

	#[test]
	fn categories_keep_first_seen_order_across_snapshots() {
		let dataset = Dataset::new(vec![
			snapshot(1950, vec![
				entity("A", "europe", Some(1.0), Some(1.0), 1.0),
				entity("B", "asia", Some(1.0), Some(1.0), 1.0),
			]),
			snapshot(1951, vec![
				entity("C", "oceania", Some(1.0), Some(1.0), 1.0),
				entity("A", "europe", Some(1.0), Some(1.0), 1.0),
			]),
		])
		.unwrap();
		assert_eq!(dataset.categories(), ["europe", "asia", "oceania"]);
	}
}
