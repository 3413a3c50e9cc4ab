use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::config::{LEGEND_ROW_HEIGHT, LEGEND_SWATCH};
use super::scale::{INCOME_TICKS, format_thousands};
use super::state::ChartState;

const AXIS_COLOR: &str = "#333";
const TICK_SIZE: f64 = 6.0;

pub fn render(state: &ChartState, ctx: &CanvasRenderingContext2d, now: f64) {
	let config = &state.config;
	ctx.clear_rect(0.0, 0.0, config.width, config.height);
	ctx.save();
	let _ = ctx.translate(config.margin.left, config.margin.top);
	draw_year(state, ctx);
	draw_axes(state, ctx);
	draw_circles(state, ctx, now);
	draw_legend(state, ctx);
	ctx.restore();
}

fn draw_year(state: &ChartState, ctx: &CanvasRenderingContext2d) {
	let config = &state.config;
	ctx.set_fill_style_str("rgba(0, 0, 0, 0.35)");
	ctx.set_font("40px sans-serif");
	ctx.set_text_align("end");
	let _ = ctx.fill_text(
		&state.active_snapshot().year.to_string(),
		config.inner_width() - config.margin.right,
		config.inner_height() - 25.0,
	);
}

fn draw_axes(state: &ChartState, ctx: &CanvasRenderingContext2d) {
	let (w, h) = (state.config.inner_width(), state.config.inner_height());
	ctx.set_stroke_style_str(AXIS_COLOR);
	ctx.set_fill_style_str(AXIS_COLOR);
	ctx.set_line_width(1.0);
	ctx.set_font("10px sans-serif");

	ctx.begin_path();
	ctx.move_to(0.0, h);
	ctx.line_to(w, h);
	ctx.move_to(0.0, 0.0);
	ctx.line_to(0.0, h);
	ctx.stroke();

	ctx.set_text_align("center");
	for &income in INCOME_TICKS {
		let x = state.scales.income_to_x(income);
		if !(0.0..=w).contains(&x) {
			continue;
		}
		ctx.begin_path();
		ctx.move_to(x, h);
		ctx.line_to(x, h + TICK_SIZE);
		ctx.stroke();
		let _ = ctx.fill_text(&format_thousands(income), x, h + TICK_SIZE + 12.0);
	}

	ctx.set_text_align("end");
	for life_exp in state.scales.y.ticks(10) {
		let y = state.scales.life_exp_to_y(life_exp);
		ctx.begin_path();
		ctx.move_to(0.0, y);
		ctx.line_to(-TICK_SIZE, y);
		ctx.stroke();
		let _ = ctx.fill_text(&life_exp.to_string(), -TICK_SIZE - 3.0, y + 3.0);
	}

	ctx.set_font("14px sans-serif");
	ctx.set_text_align("center");
	let _ = ctx.fill_text("Income (Dollars)", w / 2.0, h + 50.0);
	ctx.save();
	let _ = ctx.rotate(-PI / 2.0);
	let _ = ctx.fill_text("Life Expectancy", -(h / 2.0), -60.0);
	ctx.restore();
}

fn draw_circles(state: &ChartState, ctx: &CanvasRenderingContext2d, now: f64) {
	let hovered = state.hovered.as_ref().map(|e| e.country.as_str());
	for (visual, circle) in state.engine.circles(now) {
		if circle.r <= 0.0 {
			continue;
		}
		ctx.begin_path();
		let _ = ctx.arc(circle.x, circle.y, circle.r, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(visual.color);
		ctx.fill();

		if hovered == Some(visual.entity.country.as_str()) && !visual.exiting {
			ctx.set_stroke_style_str(AXIS_COLOR);
			ctx.set_line_width(1.5);
			ctx.stroke();
		}
	}
}

fn draw_legend(state: &ChartState, ctx: &CanvasRenderingContext2d) {
	let (ox, oy) = state.config.legend_origin();
	ctx.set_font("12px sans-serif");
	ctx.set_text_align("end");
	for (i, category) in state.scales.categories().iter().enumerate() {
		let y = oy + i as f64 * LEGEND_ROW_HEIGHT;
		// Hidden categories stay listed so they can be clicked back on.
		ctx.set_global_alpha(if state.filter.is_visible(category) { 1.0 } else { 0.3 });
		ctx.set_fill_style_str(state.scales.category_to_color(category));
		ctx.fill_rect(ox, y, LEGEND_SWATCH, LEGEND_SWATCH);
		ctx.set_fill_style_str(AXIS_COLOR);
		let _ = ctx.fill_text(category, ox - 6.0, y + 11.0);
	}
	ctx.set_global_alpha(1.0);
}
