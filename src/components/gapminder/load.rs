use gloo_net::http::Request;
use log::info;

use super::error::{ChartError, ChartResult};
use super::types::Dataset;

/// Fetch and decode the dataset. Called once, before anything is drawn.
pub async fn load_dataset(url: &str) -> ChartResult<Dataset> {
	let resp = Request::get(url)
		.send()
		.await
		.map_err(|e| ChartError::Fetch(e.to_string()))?;
	if !resp.ok() {
		return Err(ChartError::Fetch(format!("{url}: HTTP {}", resp.status())));
	}
	let text = resp
		.text()
		.await
		.map_err(|e| ChartError::Fetch(e.to_string()))?;
	let dataset = Dataset::from_json(&text)?;
	info!("loaded {} snapshots from {url}", dataset.len());
	Ok(dataset)
}
