use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use log::{debug, error};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::config::ChartConfig;
use super::error::{ChartError, ChartResult};
use super::playback::PlayState;
use super::render;
use super::scale::format_thousands;
use super::state::ChartState;
use super::ticker::{IntervalTicker, Ticker};
use super::types::{Dataset, Entity};

fn now_ms() -> f64 {
	web_sys::window()
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or(0.0)
}

fn context_2d(canvas: &HtmlCanvasElement) -> ChartResult<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.map_err(|e| ChartError::Canvas(format!("{e:?}")))?
		.ok_or_else(|| ChartError::Canvas("2d context not supported".into()))?
		.dyn_into()
		.map_err(|_| ChartError::Canvas("unexpected context type".into()))
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

#[derive(Clone, Debug, PartialEq)]
struct Tooltip {
	x: f64,
	y: f64,
	entity: Entity,
}

impl Tooltip {
	fn of(state: &ChartState) -> Option<Self> {
		let (x, y) = state.pointer?;
		let entity = state.hovered.clone()?;
		Some(Self { x, y, entity })
	}
}

/// Stop the timer and drop the frame callback so nothing reschedules itself.
fn teardown<F>(ticker: &mut impl Ticker, frame_loop: &mut Option<F>) {
	ticker.stop();
	frame_loop.take();
}

fn request_frame(callback: &Closure<dyn FnMut()>) -> Option<i32> {
	web_sys::window()?
		.request_animation_frame(callback.as_ref().unchecked_ref())
		.ok()
}

fn tooltip_rows(entity: &Entity) -> Vec<(&'static str, String)> {
	let or_missing = |v: Option<String>| v.unwrap_or_else(|| "n/a".into());
	vec![
		("Country", entity.country.clone()),
		("Continent", entity.continent.clone()),
		("Population", or_missing(entity.population.map(format_thousands))),
		(
			"Life Expectancy",
			or_missing(entity.life_exp.map(|v| format!("{v:.1}"))),
		),
		(
			"Income",
			or_missing(entity.income.map(|v| format!("${}", format_thousands(v)))),
		),
	]
}

/// Animated income / life-expectancy bubble chart with playback controls.
#[component]
pub fn GapminderChart(
	data: Arc<Dataset>,
	#[prop(optional)] config: Option<ChartConfig>,
) -> impl IntoView {
	let config = config.unwrap_or_default();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ChartState>>> = Rc::new(RefCell::new(None));
	let ticker = Rc::new(RefCell::new(IntervalTicker::default()));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let frame_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

	let (index, set_index) = signal(0usize);
	let (play_state, set_play_state) = signal(PlayState::default());
	let (tooltip, set_tooltip) = signal(None::<Tooltip>);

	let (state_init, ticker_init, animate_init) = (state.clone(), ticker.clone(), animate.clone());
	let frame_id_init = frame_id.clone();
	let (data_init, config_init) = (data.clone(), config.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(config_init.width as u32);
		canvas.set_height(config_init.height as u32);

		let ctx = match context_2d(&canvas) {
			Ok(ctx) => ctx,
			Err(err) => {
				error!("{err}");
				return;
			}
		};
		*state_init.borrow_mut() = Some(ChartState::new(
			data_init.clone(),
			config_init.clone(),
			now_ms(),
		));

		let state_tick = state_init.clone();
		let started = ticker_init.borrow_mut().start(
			config_init.tick_ms,
			Box::new(move || {
				let advanced = state_tick
					.borrow_mut()
					.as_mut()
					.and_then(|s| s.tick(now_ms()));
				if let Some(i) = advanced {
					set_index.set(i);
				}
			}),
		);
		match started {
			Ok(()) => debug!(
				"playback timer every {}ms (running: {})",
				config_init.tick_ms,
				ticker_init.borrow().is_running()
			),
			Err(err) => error!("{err}"),
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		let frame_id_inner = frame_id_init.clone();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				let now = now_ms();
				s.frame(now);
				render::render(s, &ctx, now);
				if s.take_hover_change() {
					set_tooltip.set(Tooltip::of(s));
				}
			}
			frame_id_inner.set(animate_inner.borrow().as_ref().and_then(request_frame));
		}));
		frame_id_init.set(animate_init.borrow().as_ref().and_then(request_frame));
	});

	let teardown_handles = SendWrapper::new((ticker.clone(), animate.clone(), frame_id.clone()));
	on_cleanup(move || {
		let (ticker, animate, frame_id) = teardown_handles.take();
		if let (Some(window), Some(id)) = (web_sys::window(), frame_id.take()) {
			let _ = window.cancel_animation_frame(id);
		}
		teardown(&mut *ticker.borrow_mut(), &mut *animate.borrow_mut());
		debug!("chart torn down");
	});

	let state_play = state.clone();
	let on_play = move |_: MouseEvent| {
		let next = state_play.borrow_mut().as_mut().map(|s| s.toggle_play());
		if let Some(next) = next {
			set_play_state.set(next);
		}
	};

	let state_reset = state.clone();
	let on_reset = move |_: MouseEvent| {
		let reset = state_reset
			.borrow_mut()
			.as_mut()
			.map(|s| s.reset(now_ms()));
		if let Some(i) = reset {
			set_index.set(i);
		}
	};

	let state_seek = state.clone();
	let on_seek = move |ev: leptos::ev::Event| {
		let Ok(target) = event_target_value(&ev).parse::<i64>() else {
			return;
		};
		let seeked = state_seek
			.borrow_mut()
			.as_mut()
			.map(|s| s.seek(target, now_ms()));
		if let Some(i) = seeked {
			set_index.set(i);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.hover_at(x, y, now_ms());
			s.take_hover_change();
			set_tooltip.set(Tooltip::of(s));
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.clear_hover();
			s.take_hover_change();
		}
		set_tooltip.set(None);
	};

	let state_click = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_click.borrow_mut() {
			if let Some(category) = s.legend_category_at(x, y).map(str::to_owned) {
				s.toggle_category(&category, now_ms());
			}
		}
	};

	let last_index = data.len().saturating_sub(1);
	let year = move || data.snapshot(index.get()).year;

	view! {
		<div class="gapminder" style=format!("position: relative; width: {}px;", config.width)>
			<canvas
				node_ref=canvas_ref
				class="gapminder-canvas"
				on:mousemove=on_mousemove
				on:mouseleave=on_mouseleave
				on:click=on_click
				style="display: block;"
			/>
			<div class="gapminder-controls">
				<button class="play-button" on:click=on_play>
					{move || play_state.get().button_label()}
				</button>
				<button class="reset-button" on:click=on_reset>
					"Reset"
				</button>
				<input
					type="range"
					min="0"
					max=last_index.to_string()
					prop:value=move || index.get().to_string()
					on:input=on_seek
				/>
				<span class="year-label">{year}</span>
			</div>
			{move || {
				tooltip
					.get()
					.map(|t| {
						view! {
							<div
								class="gapminder-tooltip"
								style=format!(
									"position: absolute; left: {}px; top: {}px; pointer-events: none;",
									t.x + 12.0,
									t.y + 12.0,
								)
							>
								{tooltip_rows(&t.entity)
									.into_iter()
									.map(|(label, value)| {
										view! {
											<div>
												<strong>{label}": "</strong>
												{value}
											</div>
										}
									})
									.collect_view()}
							</div>
						}
					})
			}}
		</div>
	}
}
