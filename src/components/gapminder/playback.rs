use log::debug;

use super::filter::FilterState;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayState {
	#[default]
	Playing,
	Paused,
}

impl PlayState {
	pub fn toggled(self) -> Self {
		match self {
			Self::Playing => Self::Paused,
			Self::Paused => Self::Playing,
		}
	}

	/// Label for the button that switches away from this state.
	pub fn button_label(self) -> &'static str {
		match self {
			Self::Playing => "Pause",
			Self::Paused => "Play",
		}
	}
}

/// Which snapshot is active, and whether ticks advance it.
///
/// Every method that can move the index returns the index it now points at;
/// callers re-render on each of those emissions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaybackController {
	index: usize,
	len: usize,
	state: PlayState,
}

impl PlaybackController {
	pub fn new(len: usize) -> Self {
		Self {
			index: 0,
			len: len.max(1),
			state: PlayState::default(),
		}
	}

	pub fn index(&self) -> usize {
		self.index
	}

	pub fn state(&self) -> PlayState {
		self.state
	}

	/// Advance one snapshot, wrapping after the last, unless paused.
	pub fn tick(&mut self) -> Option<usize> {
		if self.state == PlayState::Paused {
			return None;
		}
		self.index = (self.index + 1) % self.len;
		Some(self.index)
	}

	pub fn set_state(&mut self, state: PlayState) {
		if self.state != state {
			debug!("playback {:?} -> {:?}", self.state, state);
		}
		self.state = state;
	}

	/// Jump to `target`, clamped into range. Play state is untouched.
	pub fn seek(&mut self, target: i64) -> usize {
		self.index = target.clamp(0, self.len as i64 - 1) as usize;
		self.index
	}

	/// Rewind to the first snapshot and show every category again.
	pub fn reset(&mut self, filter: &mut FilterState) -> usize {
		filter.reset();
		self.index = 0;
		self.index
	}
}
