use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlAnchorElement, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::ForceGraphState;
use crate::error::SurfaceError;
use crate::graph::{GraphDataset, LayoutMode, RenderSurface, Theme};

/// Pointer travel, in pixels, below which a press-release counts as a click.
const CLICK_SLOP: f64 = 3.0;

struct Scene {
	dataset: GraphDataset,
	layout: LayoutMode,
	theme: Theme,
}

/// Handle through which the rest of the app drives the canvas.
///
/// Cheap to clone; every clone talks to the same canvas. Instructions sent
/// before the canvas mounts are replayed when it does.
#[derive(Clone, Default)]
pub struct GraphSurface {
	state: Rc<RefCell<Option<ForceGraphState>>>,
	canvas: Rc<RefCell<Option<HtmlCanvasElement>>>,
	scene: Rc<RefCell<Option<Scene>>>,
}

impl GraphSurface {
	fn attach(&self, canvas: HtmlCanvasElement) {
		*self.canvas.borrow_mut() = Some(canvas);
		self.rebuild();
	}

	fn rebuild(&self) {
		let (Some(canvas), Some(scene)) = (&*self.canvas.borrow(), &*self.scene.borrow()) else {
			return;
		};
		let (w, h) = (canvas.width() as f64, canvas.height() as f64);
		*self.state.borrow_mut() =
			Some(ForceGraphState::new(&scene.dataset, scene.layout, scene.theme, w, h));
	}
}

impl RenderSurface for GraphSurface {
	fn render_graph(&mut self, dataset: &GraphDataset, layout: LayoutMode, theme: Theme) {
		*self.scene.borrow_mut() = Some(Scene {
			dataset: dataset.clone(),
			layout,
			theme,
		});
		self.rebuild();
	}

	fn focus_node_adjacency(&mut self, index: usize) {
		match self.state.borrow_mut().as_mut() {
			Some(s) => s.focus(index),
			None => debug!("focus {index} before the canvas mounted"),
		}
	}

	fn restore_view(&mut self) {
		if let Some(s) = self.state.borrow_mut().as_mut() {
			s.restore();
		}
	}

	fn export_snapshot(&self) -> Result<String, SurfaceError> {
		let canvas = self.canvas.borrow();
		let canvas = canvas.as_ref().ok_or(SurfaceError::Unmounted)?;
		canvas
			.to_data_url_with_type("image/png")
			.map_err(|e| SurfaceError::Export(format!("{e:?}")))
	}
}

/// Saves the current picture through a temporary download link.
pub fn download_snapshot(surface: &GraphSurface, filename: &str) -> Result<(), SurfaceError> {
	let url = surface.export_snapshot()?;
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(SurfaceError::Unmounted)?;
	let link: HtmlAnchorElement = document
		.create_element("a")
		.and_then(|el| el.dyn_into().map_err(JsValue::from))
		.map_err(|e| SurfaceError::Export(format!("{e:?}")))?;
	link.set_download(filename);
	link.set_href(&url);
	link.click();
	Ok(())
}

fn container_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((800.0, 600.0))
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

#[component]
pub fn ForceGraphCanvas(
	surface: GraphSurface,
	/// Receives the dataset index of a clicked node.
	#[prop(into)]
	on_node_click: Callback<usize>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state = surface.state.clone();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init, surface_init) =
		(state.clone(), animate.clone(), resize_cb.clone(), surface.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = container_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into().ok())
		{
			Some(ctx) => ctx,
			None => {
				error!("canvas 2d context unavailable");
				return;
			}
		};
		surface_init.attach(canvas.clone());

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = container_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.animation_running {
					s.tick(0.016);
				}
				render::render(s, &ctx);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(idx) = s.node_at_position(x, y) {
				s.drag.active = true;
				s.drag.moved = false;
				s.drag.node_idx = Some(idx);
				s.drag.start_x = x;
				s.drag.start_y = y;
				s.graph.visit_nodes(|node| {
					if node.index() == idx {
						s.drag.node_start_x = node.x();
						s.drag.node_start_y = node.y();
					}
				});
			} else {
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if !s.drag.active {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}

			if s.drag.active {
				if let Some(idx) = s.drag.node_idx {
					let (px, py) = (x - s.drag.start_x, y - s.drag.start_y);
					if (px * px + py * py).sqrt() > CLICK_SLOP {
						s.drag.moved = true;
					}
					if !s.drag.moved {
						return;
					}
					let (dx, dy) = (px / s.transform.k, py / s.transform.k);
					let (nx, ny) = (
						s.drag.node_start_x + dx as f32,
						s.drag.node_start_y + dy as f32,
					);
					s.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if s.pan.active {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = {
			let mut guard = state_mu.borrow_mut();
			let Some(s) = guard.as_mut() else {
				return;
			};
			let clicked = match s.drag.node_idx {
				Some(idx) if s.drag.active && !s.drag.moved => s.dataset_index(idx),
				_ => None,
			};
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			clicked
		};
		// the state borrow is released before handing control to the app
		if let Some(index) = clicked {
			on_node_click.run(index);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
			s.set_hover(None);
		}
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			let new_k = (s.transform.k * factor).clamp(0.1, 10.0);
			let ratio = new_k / s.transform.k;
			s.transform.x = x - (x - s.transform.x) * ratio;
			s.transform.y = y - (y - s.transform.y) * ratio;
			s.transform.k = new_k;
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
