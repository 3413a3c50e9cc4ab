use std::sync::Arc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::error;

use crate::components::gapminder::{ChartConfig, Dataset, GapminderChart, load_dataset};
use crate::components::header::Header;

#[derive(Clone, Debug)]
enum LoadState {
	Loading,
	Ready(Arc<Dataset>),
	Failed(String),
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let config = ChartConfig::default();
	let (load, set_load) = signal(LoadState::Loading);

	let url = config.data_url.clone();
	spawn_local(async move {
		match load_dataset(&url).await {
			Ok(dataset) => set_load.set(LoadState::Ready(Arc::new(dataset))),
			Err(err) => {
				error!("{err}");
				set_load.set(LoadState::Failed(err.to_string()));
			}
		}
	});

	view! {
		<Header title="Gapminder Clone" />
		<div id="chart-area">
			{move || match load.get() {
				LoadState::Loading => view! { <p class="chart-loading">"Loading data..."</p> }.into_any(),
				LoadState::Ready(data) => {
					view! { <GapminderChart data=data config=config.clone() /> }.into_any()
				}
				LoadState::Failed(message) => {
					view! {
						<div class="chart-error">
							<h2>"Uh oh! The chart could not be loaded."</h2>
							<p>{message}</p>
						</div>
					}
						.into_any()
				}
			}}
		</div>
	}
}
