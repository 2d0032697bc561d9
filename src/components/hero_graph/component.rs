use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::error;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::analyze::{PaletteConfig, analyze_connectivity};
use super::generate::{GenerateConfig, Rect, Strategy, generate_graph};
use super::render;
use super::sim::{PhysicsConfig, Simulation};

/// Default graph for a canvas of the given size: a triangulated point
/// cloud inset from the edges, padded to a degree floor of 2.
fn default_generate(width: f64, height: f64, seed: u64) -> GenerateConfig {
	GenerateConfig {
		strategy: Strategy::Triangulation {
			count: 100,
			bounds: Rect::new(width * 0.1, height * 0.1, width * 0.8, height * 0.8),
			exclusion: None,
		},
		seed,
		min_degree: Some(2),
	}
}

#[component]
pub fn HeroGraphCanvas(
	#[prop(optional)] generate: Option<GenerateConfig>,
	#[prop(optional)] palette: Option<PaletteConfig>,
	#[prop(optional)] physics: Option<PhysicsConfig>,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	// Local-storage slot for the (non-Send) simulation; its Copy handle
	// is shared by the rAF loop, the pointer handlers and cleanup.
	let sim = StoredValue::new_local(None::<Simulation>);
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let animate_init = animate.clone();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = (
			width.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_width() as f64)
					.unwrap_or(800.0)
			}),
			height.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_height() as f64)
					.unwrap_or(600.0)
			}),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();

		let seed = js_sys::Date::now() as u64;
		let config = generate.clone().unwrap_or_else(|| default_generate(w, h, seed));
		let palette = palette.clone().unwrap_or_default();
		let physics = physics.clone().unwrap_or_else(|| PhysicsConfig {
			origin: (w / 2.0, h / 2.0),
			..PhysicsConfig::default()
		});

		let built = generate_graph(&config).and_then(|mut data| {
			analyze_connectivity(&mut data, &palette)?;
			Simulation::new(data, physics, seed)
		});
		match built {
			Ok(s) => sim.set_value(Some(s)),
			Err(e) => {
				error!("failed to build hero graph: {e}");
				return;
			}
		}

		let animate_inner = animate_init.clone();
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let mut running = false;
			sim.try_update_value(|slot| {
				if let Some(s) = slot {
					if s.is_running() {
						s.tick();
						render::render(&s.frame(), &ctx, w, h);
						running = true;
					}
				}
			});
			// A stopped simulation stops rescheduling itself.
			if running {
				if let Some(ref cb) = *animate_inner.borrow() {
					let _ = web_sys::window()
						.unwrap()
						.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);
		sim.try_update_value(|slot| {
			if let Some(s) = slot {
				s.set_pointer(x, y);
			}
		});
	};

	let on_mouseleave = move |_: MouseEvent| {
		sim.try_update_value(|slot| {
			if let Some(s) = slot {
				s.clear_pointer();
			}
		});
	};

	on_cleanup(move || {
		sim.try_update_value(|slot| {
			if let Some(s) = slot {
				s.stop();
			}
		});
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="hero-graph-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			style="display: block;"
		/>
	}
}
