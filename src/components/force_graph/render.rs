use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NodeInfo};

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(state.theme.background());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap) = (1.5 / k, 8.0 / k, 4.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.highlight.highlight_t);

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}

		let is_highlighted = state.is_highlighted(n1.index()) && state.is_highlighted(n2.index());

		// focused edges go from 0.6 to full opacity and widen; the rest fade out
		let (alpha, width) = if is_highlighted {
			(0.6 + 0.4 * t, line_width * (1.0 + 1.6 * t))
		} else {
			(0.6 - 0.45 * t, line_width * (1.0 - 0.3 * t))
		};

		let (r1, r2) = (
			n1.data.user_data.radius(),
			n2.data.user_data.radius(),
		);
		let (ux, uy) = (dx / dist, dy / dist);

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(&n1.data.user_data.style.color);
		ctx.set_line_width(width);
		if is_highlighted && t > 0.01 {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(dash),
				&JsValue::from_f64(gap),
			));
			ctx.set_line_dash_offset(dash_offset);
		}
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * r2, y2 - uy * r2);
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	});
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t) = (
		state.has_active_highlight(),
		ease_out_cubic(state.highlight.highlight_t),
	);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let alpha = if has_highlight { 1.0 - 0.7 * t } else { 1.0 };
		draw_node(state, ctx, idx, node.x() as f64, node.y() as f64, &node.data.user_data, alpha, 1.0);
	});

	if !has_highlight {
		return;
	}

	// highlighted nodes last so they sit on top
	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let grow = if state.is_center(idx) { 1.0 + 0.35 * t } else { 1.0 + 0.15 * t };
		draw_node(state, ctx, idx, node.x() as f64, node.y() as f64, &node.data.user_data, 1.0, grow);
	});
}

#[allow(clippy::too_many_arguments)]
fn draw_node(
	state: &ForceGraphState,
	ctx: &CanvasRenderingContext2d,
	idx: DefaultNodeIdx,
	x: f64,
	y: f64,
	info: &NodeInfo,
	alpha: f64,
	grow: f64,
) {
	let k = state.transform.k;
	let style = &info.style;
	let radius = info.radius() * grow;

	ctx.set_global_alpha(alpha);
	ctx.set_shadow_blur(style.shadow_blur);
	ctx.set_shadow_color(style.shadow_color);
	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&style.color);
	ctx.fill();
	ctx.set_shadow_blur(0.0);

	if style.border || (state.is_center(idx) && state.highlight.highlight_t > 0.01) {
		ctx.set_stroke_style_str("#fff");
		ctx.set_line_width(2.0 / k);
		ctx.stroke();
	}

	if style.show_label || state.is_highlighted(idx) {
		let weight = if style.bold { "bold " } else { "" };
		ctx.set_font(&format!("{}{}px sans-serif", weight, style.font_px / k.max(0.5)));
		let (lx, ly) = (x + radius + 4.0 / k, y + style.font_px / (3.0 * k.max(0.5)));
		ctx.set_line_width(2.0 / k);
		ctx.set_stroke_style_str(state.theme.label_outline());
		let _ = ctx.stroke_text(&info.label, lx, ly);
		ctx.set_fill_style_str(style.label_color);
		let _ = ctx.fill_text(&info.label, lx, ly);
	}
	ctx.set_global_alpha(1.0);
}
