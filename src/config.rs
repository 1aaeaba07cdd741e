//! Chart configuration, provided to components through context.

use force_graph::SimulationParameters;

/// Tunables for the chart and its toolbar.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
	/// Repulsion between members.
	pub force_charge: f32,
	/// Pull along parent links.
	pub force_spring: f32,
	/// Cap on any single force.
	pub force_max: f32,
	/// Simulation speed factor.
	pub node_speed: f32,
	/// Velocity kept per step.
	pub damping_factor: f32,
	/// World-space radius of a member node.
	pub node_radius: f64,
	/// Vertical distance between generations in the initial layout.
	pub generation_gap: f64,
	/// Horizontal distance between siblings in the initial layout.
	pub sibling_gap: f64,
	/// `localStorage` key used by save and load.
	pub storage_key: String,
	/// Undo steps kept.
	pub history_limit: usize,
	/// Name offered for the PNG export.
	pub png_file_name: String,
	/// Name offered for the JSON export.
	pub json_file_name: String,
}

impl Default for ChartConfig {
	fn default() -> Self {
		Self {
			force_charge: 120.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
			node_radius: 14.0,
			generation_gap: 90.0,
			sibling_gap: 60.0,
			storage_key: "royal-family-tree".into(),
			history_limit: 50,
			png_file_name: "royal-family-tree.png".into(),
			json_file_name: "royal-family-tree.json".into(),
		}
	}
}

impl ChartConfig {
	/// Parameters for a fresh `ForceGraph`.
	pub fn simulation(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.force_charge,
			force_spring: self.force_spring,
			force_max: self.force_max,
			node_speed: self.node_speed,
			damping_factor: self.damping_factor,
		}
	}
}
