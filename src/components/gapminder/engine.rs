use std::collections::BTreeMap;

use super::filter::FilterState;
use super::scale::ScaleSet;
use super::types::{Entity, Snapshot};

fn ease_cubic_in_out(t: f64) -> f64 {
	if t < 0.5 {
		4.0 * t * t * t
	} else {
		1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
	}
}

/// Circle geometry in plotting-area pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Circle {
	pub x: f64,
	pub y: f64,
	pub r: f64,
}

impl Circle {
	fn lerp(self, to: Self, t: f64) -> Self {
		Self {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			r: self.r + (to.r - self.r) * t,
		}
	}

	fn collapsed(self) -> Self {
		Self { r: 0.0, ..self }
	}

	pub fn contains(&self, x: f64, y: f64) -> bool {
		let (dx, dy) = (x - self.x, y - self.y);
		dx * dx + dy * dy <= self.r * self.r
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
	pub from: Circle,
	pub to: Circle,
	pub started_at: f64,
	pub duration: f64,
}

impl Transition {
	fn progress(&self, now: f64) -> f64 {
		if self.duration <= 0.0 {
			return 1.0;
		}
		((now - self.started_at) / self.duration).clamp(0.0, 1.0)
	}

	pub fn sample(&self, now: f64) -> Circle {
		self.from.lerp(self.to, ease_cubic_in_out(self.progress(now)))
	}

	pub fn is_finished(&self, now: f64) -> bool {
		self.progress(now) >= 1.0
	}
}

/// On-screen state of one entity, keyed by country in [`RenderEngine`].
#[derive(Clone, Debug, PartialEq)]
pub struct Visual {
	pub entity: Entity,
	pub color: &'static str,
	pub transition: Transition,
	pub exiting: bool,
}

/// Keys classified by the last reconciliation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameDiff {
	pub entered: Vec<String>,
	pub updated: Vec<String>,
	pub exited: Vec<String>,
}

/// Keyed reconciliation of snapshots against the circles on screen.
///
/// The map is the only record of what is drawn. Each [`RenderEngine::reconcile`]
/// retargets every affected circle from wherever it currently is, so a newer
/// frame always wins over a transition still in flight.
#[derive(Clone, Debug, Default)]
pub struct RenderEngine {
	visuals: BTreeMap<String, Visual>,
	duration_ms: f64,
}

impl RenderEngine {
	pub fn new(duration_ms: f64) -> Self {
		Self {
			visuals: BTreeMap::new(),
			duration_ms,
		}
	}

	pub fn reconcile(
		&mut self,
		snapshot: &Snapshot,
		scales: &ScaleSet,
		filter: &FilterState,
		now: f64,
	) -> FrameDiff {
		let mut targets: BTreeMap<&str, (&Entity, Circle)> = BTreeMap::new();
		if let Some(frame) = scales.radius_domain(snapshot) {
			for entity in snapshot.plottable() {
				if !filter.is_visible(&entity.continent) {
					continue;
				}
				let (Some(income), Some(life_exp)) =
					(entity.plottable_income(), entity.plottable_life_exp())
				else {
					continue;
				};
				let target = Circle {
					x: scales.income_to_x(income),
					y: scales.life_exp_to_y(life_exp),
					r: scales.entity_radius(entity, frame),
				};
				targets.insert(&entity.country, (entity, target));
			}
		}

		let mut diff = FrameDiff::default();
		let duration = self.duration_ms;
		let start = |from: Circle, to: Circle| Transition {
			from,
			to,
			started_at: now,
			duration,
		};

		for (key, visual) in self.visuals.iter_mut() {
			if visual.exiting || targets.contains_key(key.as_str()) {
				continue;
			}
			let current = visual.transition.sample(now);
			visual.transition = start(current, current.collapsed());
			visual.exiting = true;
			diff.exited.push(key.clone());
		}

		for (key, (entity, target)) in targets {
			let color = scales.category_to_color(&entity.continent);
			match self.visuals.get_mut(key) {
				Some(visual) => {
					let current = visual.transition.sample(now);
					if visual.exiting {
						diff.entered.push(key.to_owned());
					} else {
						diff.updated.push(key.to_owned());
					}
					*visual = Visual {
						entity: entity.clone(),
						color,
						transition: start(current, target),
						exiting: false,
					};
				}
				None => {
					diff.entered.push(key.to_owned());
					self.visuals.insert(key.to_owned(), Visual {
						entity: entity.clone(),
						color,
						transition: start(target.collapsed(), target),
						exiting: false,
					});
				}
			}
		}
		diff
	}

	/// Drop circles whose exit has finished. Returns how many were removed.
	pub fn prune(&mut self, now: f64) -> usize {
		let before = self.visuals.len();
		self.visuals
			.retain(|_, v| !(v.exiting && v.transition.is_finished(now)));
		before - self.visuals.len()
	}

	/// Circles at time `now`, largest first so small ones paint on top.
	pub fn circles(&self, now: f64) -> Vec<(&Visual, Circle)> {
		let mut circles: Vec<_> = self
			.visuals
			.values()
			.map(|v| (v, v.transition.sample(now)))
			.collect();
		circles.sort_by(|a, b| b.1.r.total_cmp(&a.1.r));
		circles
	}

	/// Smallest live circle under a plotting-area point.
	pub fn entity_at(&self, x: f64, y: f64, now: f64) -> Option<&Entity> {
		self.circles(now)
			.into_iter()
			.rev()
			.find(|(v, c)| !v.exiting && c.contains(x, y))
			.map(|(v, _)| &v.entity)
	}

	#[cfg(test)]
	pub fn visual(&self, key: &str) -> Option<&Visual> {
		self.visuals.get(key)
	}

	/// Circles currently held, exiting ones included.
	pub fn len(&self) -> usize {
		self.visuals.len()
	}
}

#[cfg(test)]
mod tests {
	use super::super::config::ChartConfig;
	use super::super::types::Dataset;
	use super::super::types::fixtures::*;
	use super::*;

	const DURATION: f64 = 250.0;

	struct Fixture {
		dataset: Dataset,
		scales: ScaleSet,
		filter: FilterState,
		engine: RenderEngine,
	}

	impl Fixture {
		fn new(snapshots: Vec<Snapshot>) -> Self {
			let dataset = Dataset::new(snapshots).unwrap();
			let scales = ScaleSet::new(&dataset, &ChartConfig::default());
			let filter = FilterState::new(dataset.categories());
			Self {
				dataset,
				scales,
				filter,
				engine: RenderEngine::new(DURATION),
			}
		}

		fn show(&mut self, index: usize, now: f64) -> FrameDiff {
			self.engine.reconcile(
				self.dataset.snapshot(index),
				&self.scales,
				&self.filter,
				now,
			)
		}
	}

	fn keys(list: &[&str]) -> Vec<String> {
		list.iter().map(|k| k.to_string()).collect()
	}

	#[test]
	fn entering_circles_grow_from_their_target_position() {
		let mut f = Fixture::new(vec![snapshot(1950, vec![
			entity("A", "c1", Some(1000.0), Some(50.0), 1e6),
			entity("B", "c1", Some(4000.0), Some(70.0), 4e6),
		])]);
		let diff = f.show(0, 0.0);
		assert_eq!(diff.entered, keys(&["A", "B"]));
		let b = f.engine.visual("B").unwrap();
		assert_eq!(b.transition.from.r, 0.0);
		assert_eq!(b.transition.from.x, b.transition.to.x);
		assert_eq!(b.transition.sample(DURATION), b.transition.to);
		assert_eq!(b.color, f.scales.category_to_color("c1"));
	}

	#[test]
	fn updates_retarget_from_the_current_position() {
		let mut f = Fixture::new(vec![
			snapshot(1950, vec![entity("A", "c1", Some(100.0), Some(40.0), 1e6)]),
			snapshot(1951, vec![entity("A", "c1", Some(10_000.0), Some(80.0), 1e6)]),
		]);
		f.show(0, 0.0);
		let settled = f.engine.visual("A").unwrap().transition.to;
		let diff = f.show(1, 400.0);
		assert_eq!(diff.updated, keys(&["A"]));
		let t = f.engine.visual("A").unwrap().transition;
		assert_eq!(t.from, settled);
		assert_eq!(t.started_at, 400.0);

		// Superseding mid-flight starts from the sampled, not the final, geometry.
		let midway = t.sample(500.0);
		f.show(0, 500.0);
		assert_eq!(f.engine.visual("A").unwrap().transition.from, midway);
	}

	#[test]
	fn exits_shrink_then_get_pruned() {
		let mut f = Fixture::new(vec![
			snapshot(1950, vec![
				entity("A", "c1", Some(100.0), Some(40.0), 1e6),
				entity("B", "c1", Some(200.0), Some(60.0), 2e6),
			]),
			snapshot(1951, vec![entity("A", "c1", Some(100.0), Some(40.0), 1e6)]),
		]);
		f.show(0, 0.0);
		let diff = f.show(1, 300.0);
		assert_eq!(diff.exited, keys(&["B"]));
		assert_eq!(f.engine.visual("B").unwrap().transition.to.r, 0.0);
		// Still absent: no second exit is issued.
		assert!(f.show(1, 350.0).exited.is_empty());
		assert_eq!(f.engine.prune(400.0), 0);
		assert_eq!(f.engine.prune(300.0 + DURATION), 1);
		assert!(f.engine.visual("B").is_none());
		assert_eq!(f.engine.len(), 1);
	}

	#[test]
	fn filtered_categories_exit_and_return() {
		let mut f = Fixture::new(vec![snapshot(1950, vec![
			entity("A", "c1", Some(100.0), Some(40.0), 1e6),
			entity("B", "c2", Some(200.0), Some(60.0), 2e6),
		])]);
		f.show(0, 0.0);
		f.filter.toggle("c2");
		let diff = f.show(0, 300.0);
		assert_eq!(diff.exited, keys(&["B"]));
		assert_eq!(diff.updated, keys(&["A"]));
		f.filter.toggle("c2");
		let diff = f.show(0, 350.0);
		assert_eq!(diff.entered, keys(&["B"]));
	}

	#[test]
	fn hit_testing_prefers_the_smallest_live_circle() {
		let mut f = Fixture::new(vec![snapshot(1950, vec![
			entity("Big", "c1", Some(1000.0), Some(50.0), 9e8),
			entity("Small", "c1", Some(1000.0), Some(50.0), 1e6),
		])]);
		f.show(0, 0.0);
		let center = f.engine.visual("Big").unwrap().transition.to;
		let hit = f.engine.entity_at(center.x, center.y, DURATION).unwrap();
		assert_eq!(hit.country, "Small");
		assert!(f.engine.entity_at(center.x + 500.0, center.y, DURATION).is_none());
		let big = f.engine.visual("Big").unwrap().transition;
		assert!(big.is_finished(DURATION));
		assert!(!big.is_finished(DURATION / 2.0));
	}

	#[test]
	fn circles_paint_largest_first() {
		let mut f = Fixture::new(vec![snapshot(1950, vec![
			entity("Small", "c1", Some(100.0), Some(40.0), 1e6),
			entity("Big", "c1", Some(200.0), Some(60.0), 9e8),
		])]);
		f.show(0, 0.0);
		let order: Vec<_> = f
			.engine
			.circles(DURATION)
			.into_iter()
			.map(|(v, _)| v.entity.country.as_str())
			.collect();
		assert_eq!(order, vec!["Big", "Small"]);
	}

	#[test]
	fn easing_hits_both_ends() {
		assert_eq!(ease_cubic_in_out(0.0), 0.0);
		assert_eq!(ease_cubic_in_out(1.0), 1.0);
		assert_eq!(ease_cubic_in_out(0.5), 0.5);
	}
}
