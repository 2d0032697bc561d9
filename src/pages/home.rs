use leptos::prelude::*;

use crate::components::hero_graph::HeroGraphCanvas;

/// Landing page: marketing copy on the left, the animated graph on
/// the right. The canvas component supplies its own default graph
/// sized to the container.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="hero-grid">
				<div class="hero-copy">
					<h1>
						<span class="hero-lead">"All Your Data, Connected"</span>
						<br />
						<span class="hero-fade">"in One Unified Platform"</span>
					</h1>
					<p class="hero-sub">
						"Explore thousands of sources as one living network. "
						<span class="hero-fade">
							"Case law, legislation, regulations, news and your own internal knowledge, linked together."
						</span>
					</p>
					<button class="hero-cta">"Book Demo"</button>
				</div>
				<div class="hero-art">
					<HeroGraphCanvas width=Some(640.0) height=Some(640.0) />
				</div>
			</div>
		</ErrorBoundary>
	}
}
