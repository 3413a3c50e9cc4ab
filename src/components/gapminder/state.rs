use std::sync::Arc;

use log::{debug, info};

use super::config::ChartConfig;
use super::engine::{FrameDiff, RenderEngine};
use super::filter::FilterState;
use super::playback::{PlayState, PlaybackController};
use super::scale::ScaleSet;
use super::types::{Dataset, Entity, Snapshot};

/// Everything the chart mutates, owned in one place.
///
/// Each user control maps to one method here; the ones that move the active
/// index (or change what is visible while paused) reconcile immediately, so the
/// circle set always reflects the latest emission before the next event runs.
pub struct ChartState {
	pub config: ChartConfig,
	pub dataset: Arc<Dataset>,
	pub scales: ScaleSet,
	pub filter: FilterState,
	pub playback: PlaybackController,
	pub engine: RenderEngine,
	/// Last pointer position over the canvas, in canvas pixels.
	pub pointer: Option<(f64, f64)>,
	pub hovered: Option<Entity>,
	hover_changed: bool,
	last_diff: FrameDiff,
}

impl ChartState {
	/// Build the state and draw the first snapshot.
	pub fn new(dataset: Arc<Dataset>, config: ChartConfig, now: f64) -> Self {
		let scales = ScaleSet::new(&dataset, &config);
		info!(
			"chart ready: {} snapshots, {} categories",
			dataset.len(),
			dataset.categories().len()
		);
		let mut state = Self {
			filter: FilterState::new(dataset.categories()),
			playback: PlaybackController::new(dataset.len()),
			engine: RenderEngine::new(config.transition_ms),
			scales,
			dataset,
			config,
			pointer: None,
			hovered: None,
			hover_changed: false,
			last_diff: FrameDiff::default(),
		};
		state.render(now);
		state
	}

	pub fn active_snapshot(&self) -> &Snapshot {
		self.dataset.snapshot(self.playback.index())
	}

	#[cfg(test)]
	pub fn last_diff(&self) -> &FrameDiff {
		&self.last_diff
	}

	/// Reconcile the circles against the active snapshot.
	pub fn render(&mut self, now: f64) -> &FrameDiff {
		let snapshot = self.dataset.snapshot(self.playback.index());
		self.last_diff = self
			.engine
			.reconcile(snapshot, &self.scales, &self.filter, now);
		debug!(
			"frame {} ({}): +{} ~{} -{}, {} on screen",
			self.playback.index(),
			snapshot.year,
			self.last_diff.entered.len(),
			self.last_diff.updated.len(),
			self.last_diff.exited.len(),
			self.engine.len()
		);
		self.refresh_hover(now);
		&self.last_diff
	}

	/// Timer callback. Returns the new index when playback advanced.
	pub fn tick(&mut self, now: f64) -> Option<usize> {
		let index = self.playback.tick()?;
		self.render(now);
		Some(index)
	}

	pub fn seek(&mut self, target: i64, now: f64) -> usize {
		let index = self.playback.seek(target);
		debug!("seek {target} -> {index}");
		self.render(now);
		index
	}

	pub fn reset(&mut self, now: f64) -> usize {
		let index = self.playback.reset(&mut self.filter);
		info!("reset to first snapshot");
		self.render(now);
		index
	}

	pub fn toggle_play(&mut self) -> PlayState {
		let next = self.playback.state().toggled();
		self.playback.set_state(next);
		next
	}

	/// Legend click. While playing the next tick picks the change up; while
	/// paused nothing else would, so the current snapshot is redrawn here.
	pub fn toggle_category(&mut self, category: &str, now: f64) {
		self.filter.toggle(category);
		debug!("hidden categories: {:?}", self.filter.excluded());
		if self.playback.state() == PlayState::Paused {
			self.render(now);
		}
	}

	/// Legend hit test in canvas coordinates.
	pub fn legend_category_at(&self, sx: f64, sy: f64) -> Option<&str> {
		let (x, y) = self.config.to_inner(sx, sy);
		let categories = self.scales.categories();
		self.config
			.legend_row_at(x, y, categories.len())
			.map(|row| categories[row].as_str())
	}

	/// Update the hovered entity from a canvas-space pointer position.
	pub fn hover_at(&mut self, sx: f64, sy: f64, now: f64) -> Option<&Entity> {
		self.pointer = Some((sx, sy));
		self.refresh_hover(now);
		self.hovered.as_ref()
	}

	/// Pointer left the canvas.
	pub fn clear_hover(&mut self) {
		self.pointer = None;
		self.set_hovered(None);
	}

	/// Re-resolve the hovered entity under the last pointer position. Circles
	/// move and get new records without the pointer moving.
	fn refresh_hover(&mut self, now: f64) {
		let hovered = self.pointer.and_then(|(sx, sy)| {
			let (x, y) = self.config.to_inner(sx, sy);
			self.engine.entity_at(x, y, now).cloned()
		});
		self.set_hovered(hovered);
	}

	fn set_hovered(&mut self, hovered: Option<Entity>) {
		if self.hovered != hovered {
			self.hovered = hovered;
			self.hover_changed = true;
		}
	}

	/// Whether the hovered entity changed since the last call.
	pub fn take_hover_change(&mut self) -> bool {
		std::mem::take(&mut self.hover_changed)
	}

	/// Per animation frame housekeeping.
	pub fn frame(&mut self, now: f64) {
		self.engine.prune(now);
		self.refresh_hover(now);
	}
}
