mod component;
mod config;
mod engine;
mod error;
mod filter;
mod load;
mod playback;
mod render;
mod scale;
mod state;
mod ticker;
mod types;

pub use component::GapminderChart;
pub use config::ChartConfig;
pub use load::load_dataset;
pub use types::Dataset;
