mod component;
mod layout;
mod render;
mod state;
mod types;

pub use component::FamilyChart;
pub use state::LinkTooltip;
pub use types::ChartData;
