use leptos::prelude::*;

/// 404 fallback route.
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"404"</h1>
			<p>"Page not found."</p>
			<a href="/">"Back to the homepage"</a>
		</div>
	}
}
