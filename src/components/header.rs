use leptos::prelude::*;
use leptos_meta::Style;

use crate::breakpoints::Breakpoint;

fn header_css() -> String {
	format!(
		".header-container {{ background: var(--gradient-header); padding: 1.5em 1em; }}\n\
		 .header-title {{ color: var(--color-white); font-weight: 100; margin: 0 auto; max-width: 980px; }}\n\
		 {} {{ .header-container {{ background: orange; }} }}",
		Breakpoint::Sm.max_query()
	)
}

/// Page banner with a single title line.
#[component]
pub fn Header(#[prop(into)] title: String) -> impl IntoView {
	view! {
		<Style>{header_css()}</Style>
		<div class="header-container">
			<h1 class="header-title">{title}</h1>
		</div>
	}
}
