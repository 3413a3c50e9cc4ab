//! Browser entry point: set up logging and mount the app.

// Only the library uses the rest of the dependency table.
#![allow(unused_crate_dependencies)]

use gapminder_canvas::{App, init_logging};

fn main() {
	init_logging();
	leptos::mount::mount_to_body(App)
}
