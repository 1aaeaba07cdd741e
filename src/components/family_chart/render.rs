use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::FamilyChartState;

const CROWN: &str = "\u{265B}";

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn render(state: &FamilyChartState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(&state.palette.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	if state.show_groups {
		draw_groups(state, ctx);
	}
	draw_links(state, ctx);
	draw_members(state, ctx);
	ctx.restore();
}

fn draw_groups(state: &FamilyChartState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	for bubble in state.group_bubbles() {
		ctx.begin_path();
		let _ = ctx.arc(bubble.x, bubble.y, bubble.radius, 0.0, 2.0 * PI);
		ctx.set_global_alpha(0.12);
		ctx.set_fill_style_str(&bubble.color);
		ctx.fill();
		ctx.set_global_alpha(0.6);
		ctx.set_stroke_style_str(&bubble.color);
		ctx.set_line_width(1.5 / k);
		ctx.stroke();
		ctx.set_global_alpha(1.0);

		ctx.set_fill_style_str(&bubble.color);
		ctx.set_font(&format!("bold {}px sans-serif", 12.0 / k.max(0.5)));
		ctx.set_text_align("center");
		let _ = ctx.fill_text(&bubble.name, bubble.x, bubble.y - bubble.radius - 6.0 / k);
	}
	ctx.set_text_align("start");
}

fn draw_links(state: &FamilyChartState, ctx: &CanvasRenderingContext2d) {
	let (k, r) = (state.transform.k, state.node_radius);
	let t = ease_out_cubic(state.hover.highlight_t);

	state.graph.visit_edges(|parent, child, _| {
		let (x1, y1, x2, y2) = (
			parent.x() as f64,
			parent.y() as f64,
			child.x() as f64,
			child.y() as f64,
		);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < r * 2.0 {
			return;
		}

		let lit = state.is_highlighted(parent.index()) && state.is_highlighted(child.index());
		let (alpha, width) = if state.hovered_link == Some((parent.index(), child.index())) {
			(1.0, 3.0 / k)
		} else if lit {
			(0.7 + 0.3 * t, (1.5 + 0.8 * t) / k)
		} else {
			(0.7 - 0.5 * t, 1.5 / k)
		};

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(&state.palette.link);
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r, y1 + uy * r);
		ctx.line_to(x2 - ux * r, y2 - uy * r);
		ctx.stroke();
	});
	ctx.set_global_alpha(1.0);
}

fn draw_members(state: &FamilyChartState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k, r) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
		state.node_radius,
	);
	let font_size = 10.0 / k.max(0.5);

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let dimmed = has_highlight && !state.is_highlighted(idx);
		let alpha = if dimmed { 1.0 - 0.6 * t } else { 1.0 };
		let radius = if state.is_hovered(idx) { r * (1.0 + 0.2 * t) } else { r };

		ctx.set_global_alpha(alpha);
		ctx.set_shadow_color(&state.palette.shadow);
		ctx.set_shadow_blur(6.0);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&info.fill);
		ctx.fill();
		ctx.set_shadow_blur(0.0);

		let selected = state.selected == Some(info.key);
		ctx.set_stroke_style_str(if selected {
			&state.palette.selection
		} else {
			&state.palette.outline
		});
		ctx.set_line_width(if selected { 3.0 / k } else { 1.0 / k });
		ctx.stroke();

		if info.reigned {
			ctx.set_fill_style_str("#ffa600");
			ctx.set_font(&format!("{}px sans-serif", radius));
			ctx.set_text_align("center");
			let _ = ctx.fill_text(CROWN, x, y + radius * 0.35);
		}

		ctx.set_text_align("left");
		ctx.set_fill_style_str(&state.palette.label);
		ctx.set_font(&format!("{font_size}px sans-serif"));
		let _ = ctx.fill_text(&info.name, x + radius + 4.0, y);
		ctx.set_global_alpha(alpha * 0.7);
		let _ = ctx.fill_text(&info.lifespan, x + radius + 4.0, y + font_size * 1.2);
		ctx.set_global_alpha(1.0);
	});
	ctx.set_text_align("start");
}
