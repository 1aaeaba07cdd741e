use std::collections::{HashMap, HashSet};

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};

use super::layout::tree_positions;
use super::types::{ChartData, ChartGroup};
use crate::config::ChartConfig;
use crate::data::types::{Gender, GroupKey, MemberKey};
use crate::theme::Palette;

#[derive(Clone, Debug, Default)]
pub struct MemberInfo {
	pub key: MemberKey,
	pub name: String,
	pub lifespan: String,
	pub reigned: bool,
	pub fill: String,
	pub group: Option<GroupKey>,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node_idx: Option<DefaultNodeIdx>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f32,
	pub node_start_y: f32,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<DefaultNodeIdx>,
	pub neighbors: HashSet<DefaultNodeIdx>,
	pub highlight_t: f64,
	pub prev_node: Option<DefaultNodeIdx>,
	pub prev_neighbors: HashSet<DefaultNodeIdx>,
	delay_t: f64,
}

/// World-space distance within which the pointer is over a link.
pub const LINK_HIT_DISTANCE: f64 = 5.0;

/// Parent and child names of the link under the pointer.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkTooltip {
	pub from: String,
	pub to: String,
	/// Screen position of the pointer.
	pub x: f64,
	pub y: f64,
}

/// Circle drawn behind the members of one group.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupBubble {
	pub name: String,
	pub color: String,
	pub x: f64,
	pub y: f64,
	pub radius: f64,
}

pub struct FamilyChartState {
	pub graph: ForceGraph<MemberInfo, ()>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: HoverState,
	pub width: f64,
	pub height: f64,
	pub animation_running: bool,
	pub show_groups: bool,
	pub selected: Option<MemberKey>,
	pub palette: Palette,
	pub node_radius: f64,
	pub hovered_link: Option<(DefaultNodeIdx, DefaultNodeIdx)>,
	config: ChartConfig,
	groups: Vec<ChartGroup>,
	edges: Vec<(DefaultNodeIdx, DefaultNodeIdx)>,
	index: HashMap<MemberKey, DefaultNodeIdx>,
}

impl FamilyChartState {
	pub fn new(data: &ChartData, config: &ChartConfig, palette: Palette, width: f64, height: f64) -> Self {
		let mut state = Self {
			graph: ForceGraph::new(config.simulation()),
			transform: ViewTransform {
				x: width / 2.0,
				y: config.generation_gap,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hover: HoverState::default(),
			width,
			height,
			animation_running: true,
			show_groups: true,
			selected: None,
			palette,
			node_radius: config.node_radius,
			hovered_link: None,
			config: config.clone(),
			groups: Vec::new(),
			edges: Vec::new(),
			index: HashMap::new(),
		};
		state.set_data(data);
		state
	}

	/// Rebuild the simulation for new data. Members already on the chart
	/// keep their position and pin.
	pub fn set_data(&mut self, data: &ChartData) {
		let mut previous: HashMap<MemberKey, (f32, f32, bool)> = HashMap::new();
		self.graph.visit_nodes(|node| {
			previous.insert(
				node.data.user_data.key,
				(node.x(), node.y(), node.data.is_anchor),
			);
		});
		let layout = tree_positions(&data.members, self.config.sibling_gap, self.config.generation_gap);
		let group_index: HashMap<GroupKey, usize> = data.groups.iter().map(|g| (g.key, g.index)).collect();

		let mut graph = ForceGraph::new(self.config.simulation());
		let mut index = HashMap::with_capacity(data.members.len());
		for member in &data.members {
			if index.contains_key(&member.key) {
				log::warn!("member key {} repeats, drawing only the first", member.key);
				continue;
			}
			let (x, y, is_anchor) = previous.get(&member.key).copied().unwrap_or_else(|| {
				let (x, y) = layout.get(&member.key).copied().unwrap_or_default();
				(x as f32, y as f32, false)
			});
			let fill = match member.gender {
				Gender::Male => self.palette.male.clone(),
				Gender::Female => self.palette.female.clone(),
			};
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor,
				user_data: MemberInfo {
					key: member.key,
					name: member.name.clone(),
					lifespan: member.lifespan.clone(),
					reigned: member.reigned,
					fill,
					group: member.group.filter(|g| group_index.contains_key(g)),
				},
			});
			index.insert(member.key, idx);
		}

		let mut edges = Vec::with_capacity(data.links.len());
		for link in &data.links {
			if let (Some(&src), Some(&tgt)) = (index.get(&link.from), index.get(&link.to)) {
				graph.add_edge(src, tgt, EdgeData::default());
				edges.push((src, tgt));
			}
		}

		log::debug!(
			"chart rebuilt: {} members, {} links, {} groups",
			index.len(),
			edges.len(),
			data.groups.len()
		);
		self.graph = graph;
		self.edges = edges;
		self.index = index;
		self.groups = data.groups.clone();
		self.drag = DragState::default();
		self.hover = HoverState::default();
		self.hovered_link = None;
		self.animation_running = true;
	}

	pub fn member_count(&self) -> usize {
		self.index.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			if (dx * dx + dy * dy).sqrt() < self.node_radius {
				found = Some(node.index());
			}
		});
		found
	}

	pub fn member_key(&self, idx: DefaultNodeIdx) -> Option<MemberKey> {
		let mut key = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				key = Some(node.data.user_data.key);
			}
		});
		key
	}

	pub fn position_of(&self, member: MemberKey) -> Option<(f64, f64)> {
		let idx = *self.index.get(&member)?;
		let mut position = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				position = Some((node.x() as f64, node.y() as f64));
			}
		});
		position
	}

	fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64, String)> {
		let mut positions = HashMap::with_capacity(self.index.len());
		self.graph.visit_nodes(|node| {
			positions.insert(
				node.index(),
				(node.x() as f64, node.y() as f64, node.data.user_data.name.clone()),
			);
		});
		positions
	}

	/// Closest parent link within [`LINK_HIT_DISTANCE`] of the pointer.
	/// The stretch of a link hidden under its end members does not count.
	pub fn link_at_position(&self, sx: f64, sy: f64) -> Option<(DefaultNodeIdx, DefaultNodeIdx)> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let positions = self.positions();
		let mut best: Option<(f64, (DefaultNodeIdx, DefaultNodeIdx))> = None;

		for &(src, tgt) in &self.edges {
			let (Some((x1, y1, _)), Some((x2, y2, _))) = (positions.get(&src), positions.get(&tgt)) else {
				continue;
			};
			let (dx, dy) = (x2 - x1, y2 - y1);
			let len = (dx * dx + dy * dy).sqrt();
			if len <= 2.0 * self.node_radius {
				continue;
			}
			let along = ((gx - x1) * dx + (gy - y1) * dy) / len;
			if along < self.node_radius || along > len - self.node_radius {
				continue;
			}
			let (px, py) = (x1 + along * dx / len, y1 + along * dy / len);
			let dist = ((gx - px).powi(2) + (gy - py).powi(2)).sqrt();
			if dist <= LINK_HIT_DISTANCE && best.is_none_or(|(d, _)| dist < d) {
				best = Some((dist, (src, tgt)));
			}
		}

		best.map(|(_, link)| link)
	}

	/// Track the link under the pointer and describe it for the tooltip.
	/// A member under the pointer hides any link.
	pub fn hover_link(&mut self, sx: f64, sy: f64) -> Option<LinkTooltip> {
		self.hovered_link = match self.node_at_position(sx, sy) {
			Some(_) => None,
			None => self.link_at_position(sx, sy),
		};
		let (src, tgt) = self.hovered_link?;
		let positions = self.positions();
		Some(LinkTooltip {
			from: positions.get(&src)?.2.clone(),
			to: positions.get(&tgt)?.2.clone(),
			x: sx,
			y: sy,
		})
	}

	pub fn clear_link_hover(&mut self) {
		self.hovered_link = None;
	}

	/// Hovering a member lights up its parent and children.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) {
		if self.hover.node == node {
			return;
		}
		let was_hovering = self.hover.node.is_some();

		if was_hovering && node.is_none() {
			self.hover.prev_node = self.hover.node.take();
			self.hover.prev_neighbors = std::mem::take(&mut self.hover.neighbors);
		} else {
			self.hover.prev_node = None;
			self.hover.prev_neighbors.clear();
		}

		self.hover.node = node;
		self.hover.neighbors.clear();

		if let Some(idx) = node {
			if !was_hovering {
				self.hover.delay_t = 0.0;
			}
			for &(src, tgt) in &self.edges {
				if src == idx {
					self.hover.neighbors.insert(tgt);
				} else if tgt == idx {
					self.hover.neighbors.insert(src);
				}
			}
		}
	}

	pub fn is_highlighted(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx)
			|| self.hover.neighbors.contains(&idx)
			|| self.hover.prev_node == Some(idx)
			|| self.hover.prev_neighbors.contains(&idx)
	}

	pub fn is_hovered(&self, idx: DefaultNodeIdx) -> bool {
		self.hover.node == Some(idx) || self.hover.prev_node == Some(idx)
	}

	pub fn has_active_highlight(&self) -> bool {
		self.hover.node.is_some() || self.hover.prev_node.is_some()
	}

	/// One bubble per group with at least one member on the chart.
	pub fn group_bubbles(&self) -> Vec<GroupBubble> {
		let mut points: HashMap<GroupKey, Vec<(f64, f64)>> = HashMap::new();
		self.graph.visit_nodes(|node| {
			if let Some(group) = node.data.user_data.group {
				points
					.entry(group)
					.or_default()
					.push((node.x() as f64, node.y() as f64));
			}
		});

		self.groups
			.iter()
			.filter_map(|group| {
				let pts = points.get(&group.key)?;
				let n = pts.len() as f64;
				let (cx, cy) = pts
					.iter()
					.fold((0.0, 0.0), |(sx, sy), &(x, y)| (sx + x / n, sy + y / n));
				let spread = pts
					.iter()
					.map(|&(x, y)| ((x - cx).powi(2) + (y - cy).powi(2)).sqrt())
					.fold(0.0, f64::max);
				Some(GroupBubble {
					name: group.name.clone(),
					color: self.palette.group_color(group.index).to_string(),
					x: cx,
					y: cy,
					radius: spread + self.node_radius * 2.0,
				})
			})
			.collect()
	}

	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);

		let (target, delay, speed) = if self.hover.node.is_some() {
			(1.0, 0.08, 1.8)
		} else {
			(0.0, 0.0, 1.26)
		};

		if self.hover.node.is_some() {
			self.hover.delay_t = (self.hover.delay_t + dt as f64).min(delay);
			if self.hover.delay_t >= delay {
				self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			}
		} else {
			self.hover.highlight_t += (target - self.hover.highlight_t) * speed * dt as f64;
			if self.hover.highlight_t < 0.01 {
				self.hover.highlight_t = 0.0;
				self.hover.prev_node = None;
				self.hover.prev_neighbors.clear();
			}
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::data::hydrate::GroupHydrator;
	use crate::data::sample::royal_family;
	use crate::data::types::FamilyMember;

	fn royal_state() -> FamilyChartState {
		let data = ChartData::from_nodes(&GroupHydrator::royal().hydrate(&royal_family()));
		FamilyChartState::new(&data, &ChartConfig::default(), Palette::default(), 800.0, 600.0)
	}

	#[test]
	fn builds_a_node_per_member_and_an_edge_per_parent_link() {
		let state = royal_state();
		assert_eq!(state.member_count(), royal_family().len());
		assert_eq!(state.edge_count(), royal_family().len() - 1);
	}

	#[test]
	fn clicking_on_a_member_finds_it() {
		let state = royal_state();
		let (x, y) = state.position_of(16).unwrap();
		let (sx, sy) = (x * state.transform.k + state.transform.x, y * state.transform.k + state.transform.y);

		let idx = state.node_at_position(sx, sy).unwrap();

		assert_eq!(state.member_key(idx), Some(16));
	}

	#[test]
	fn hovering_lights_up_parent_and_children() {
		let mut state = royal_state();
		let (x, y) = state.position_of(16).unwrap();
		let idx = state.node_at_position(x + state.transform.x, y + state.transform.y).unwrap();

		state.set_hover(Some(idx));

		let lit: HashSet<MemberKey> = state
			.hover
			.neighbors
			.iter()
			.filter_map(|&n| state.member_key(n))
			.collect();
		assert_eq!(lit, HashSet::from([7, 20, 21]));
	}

	#[test]
	fn rebuilding_keeps_existing_positions() {
		let mut state = royal_state();
		let before = state.position_of(7).unwrap();

		let mut members = royal_family();
		members.push(FamilyMember::new(51, "Newborn", Gender::Female, "2025").with_parent(22));
		state.set_data(&ChartData::from_nodes(&GroupHydrator::royal().hydrate(&members)));

		assert_eq!(state.position_of(7), Some(before));
		assert_eq!(state.member_count(), 51);
	}

	#[test]
	fn pointing_between_parent_and_child_names_the_link() {
		let mut state = royal_state();
		let (px, py) = state.position_of(7).unwrap();
		let (cx, cy) = state.position_of(16).unwrap();
		let (sx, sy) = ((px + cx) / 2.0 + state.transform.x, (py + cy) / 2.0 + state.transform.y);

		let link = state.link_at_position(sx, sy).unwrap();
		let tooltip = state.hover_link(sx, sy).unwrap();

		assert_eq!((state.member_key(link.0), state.member_key(link.1)), (Some(7), Some(16)));
		assert_eq!(state.hovered_link, Some(link));
		assert_eq!(
			tooltip,
			LinkTooltip { from: "Elizabeth II".into(), to: "Charles III".into(), x: sx, y: sy }
		);
	}

	#[test]
	fn empty_space_and_members_show_no_link() {
		let mut state = royal_state();
		assert_eq!(state.link_at_position(-10_000.0, -10_000.0), None);

		let (x, y) = state.position_of(16).unwrap();
		assert_eq!(state.hover_link(x + state.transform.x, y + state.transform.y), None);
		assert_eq!(state.hovered_link, None);
	}

	#[test]
	fn repeated_keys_draw_one_member() {
		let mut members = royal_family();
		members.push(FamilyMember::new(16, "Charles again", Gender::Male, "1948").with_parent(7));
		let data = ChartData::from_nodes(&GroupHydrator::royal().hydrate(&members));

		let state = FamilyChartState::new(&data, &ChartConfig::default(), Palette::default(), 800.0, 600.0);

		assert_eq!(state.member_count(), royal_family().len());
		let idx = state.index[&16];
		let mut name = String::new();
		state.graph.visit_nodes(|node| {
			if node.index() == idx {
				name = node.data.user_data.name.clone();
			}
		});
		assert_eq!(name, "Charles III");
	}

	#[test]
	fn every_populated_group_gets_a_bubble() {
		let state = royal_state();
		let bubbles = state.group_bubbles();

		assert_eq!(bubbles.len(), 9);
		assert_eq!(bubbles[0].name, "Family of Elizabeth II");
		assert!(bubbles.iter().all(|b| b.radius >= state.node_radius * 2.0));
	}
}
