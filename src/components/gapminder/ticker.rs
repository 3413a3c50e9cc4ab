use log::warn;
use wasm_bindgen::prelude::*;

use super::error::{ChartError, ChartResult};

/// A periodic source of tick events.
///
/// Playback only ever sees `on_tick` being called; how time passes is up to
/// the implementation, so tests can drive it with a virtual clock.
pub trait Ticker {
	fn start(&mut self, period_ms: u32, on_tick: Box<dyn FnMut()>) -> ChartResult<()>;
	fn stop(&mut self);
	fn is_running(&self) -> bool;
}

/// Browser `setInterval` ticker.
#[derive(Default)]
pub struct IntervalTicker {
	handle: Option<i32>,
	callback: Option<Closure<dyn FnMut()>>,
}

impl Ticker for IntervalTicker {
	fn start(&mut self, period_ms: u32, on_tick: Box<dyn FnMut()>) -> ChartResult<()> {
		self.stop();
		let window = web_sys::window().ok_or_else(|| ChartError::Timer("no window".into()))?;
		let callback = Closure::wrap(on_tick);
		let handle = window
			.set_interval_with_callback_and_timeout_and_arguments_0(
				callback.as_ref().unchecked_ref(),
				period_ms as i32,
			)
			.map_err(|e| ChartError::Timer(format!("{e:?}")))?;
		self.handle = Some(handle);
		self.callback = Some(callback);
		Ok(())
	}

	fn stop(&mut self) {
		if let Some(handle) = self.handle.take() {
			match web_sys::window() {
				Some(window) => window.clear_interval_with_handle(handle),
				None => warn!("interval {handle} outlived the window"),
			}
		}
		self.callback = None;
	}

	fn is_running(&self) -> bool {
		self.handle.is_some()
	}
}

impl Drop for IntervalTicker {
	fn drop(&mut self) {
		self.stop();
	}
}

/// Ticker advanced by hand; fires once per whole period of virtual time.
#[cfg(test)]
#[derive(Default)]
pub struct ManualTicker {
	period_ms: u64,
	elapsed_ms: u64,
	on_tick: Option<Box<dyn FnMut()>>,
}

#[cfg(test)]
impl ManualTicker {
	/// Move virtual time forward, returning how many ticks fired.
	pub fn advance(&mut self, dt_ms: u64) -> u64 {
		let Some(on_tick) = self.on_tick.as_mut() else {
			return 0;
		};
		let before = self.elapsed_ms / self.period_ms;
		self.elapsed_ms += dt_ms;
		let fired = self.elapsed_ms / self.period_ms - before;
		for _ in 0..fired {
			on_tick();
		}
		fired
	}
}

#[cfg(test)]
impl Ticker for ManualTicker {
	fn start(&mut self, period_ms: u32, on_tick: Box<dyn FnMut()>) -> ChartResult<()> {
		if period_ms == 0 {
			return Err(ChartError::Timer("zero period".into()));
		}
		self.period_ms = period_ms as u64;
		self.elapsed_ms = 0;
		self.on_tick = Some(on_tick);
		Ok(())
	}

	fn stop(&mut self) {
		self.on_tick = None;
	}

	fn is_running(&self) -> bool {
		self.on_tick.is_some()
	}
}

#[cfg(test)]
mod tests {
	use std::cell::Cell;
	use std::rc::Rc;

	use super::*;

	#[test]
	fn manual_ticker_fires_once_per_period() {
		let count = Rc::new(Cell::new(0));
		let mut ticker = ManualTicker::default();
		let c = count.clone();
		ticker.start(200, Box::new(move || c.set(c.get() + 1))).unwrap();
		assert_eq!(ticker.advance(150), 0);
		assert_eq!(ticker.advance(60), 1);
		assert_eq!(ticker.advance(1000), 5);
		assert_eq!(count.get(), 6);
		ticker.stop();
		assert!(!ticker.is_running());
		assert_eq!(ticker.advance(1000), 0);
	}

	#[test]
	fn zero_period_is_rejected() {
		let mut ticker = ManualTicker::default();
		assert!(matches!(
			ticker.start(0, Box::new(|| {})),
			Err(ChartError::Timer(_))
		));
	}
}
