use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::ir::ComponentKind;

/// X6 shape names understood by the diagram editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellShape {
    SecurityBoundary,
    Process,
    Store,
    Actor,
    Edge,
}

impl CellShape {
    pub fn for_kind(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::Tenancy | ComponentKind::Container | ComponentKind::Network => {
                CellShape::SecurityBoundary
            }
            ComponentKind::Gateway | ComponentKind::Compute => CellShape::Process,
            ComponentKind::Storage => CellShape::Store,
            ComponentKind::Actor => CellShape::Actor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindStyle {
    pub fill: String,
    pub stroke: String,
}

impl KindStyle {
    fn new(fill: &str, stroke: &str) -> Self {
        Self {
            fill: fill.to_string(),
            stroke: stroke.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub tenancy: KindStyle,
    pub container: KindStyle,
    pub network: KindStyle,
    pub gateway: KindStyle,
    pub compute: KindStyle,
    pub storage: KindStyle,
    pub actor: KindStyle,
    pub boundary_stroke_width: f32,
    pub node_stroke_width: f32,
    pub edge_stroke: String,
    pub edge_stroke_width: f32,
    pub font_size: f32,
}

impl Theme {
    pub fn dfd_default() -> Self {
        Self {
            tenancy: KindStyle::new("#FFF3E0", "#FF9800"),
            container: KindStyle::new("#E3F2FD", "#2196F3"),
            network: KindStyle::new("#F3E5F5", "#9C27B0"),
            gateway: KindStyle::new("#E8F5E9", "#4CAF50"),
            compute: KindStyle::new("#E1F5FE", "#03A9F4"),
            storage: KindStyle::new("#FFF9C4", "#FBC02D"),
            actor: KindStyle::new("#FFEBEE", "#F44336"),
            boundary_stroke_width: 2.0,
            node_stroke_width: 1.0,
            edge_stroke: "#333333".to_string(),
            edge_stroke_width: 2.0,
            font_size: 14.0,
        }
    }

    pub fn style(&self, kind: ComponentKind) -> &KindStyle {
        match kind {
            ComponentKind::Tenancy => &self.tenancy,
            ComponentKind::Container => &self.container,
            ComponentKind::Network => &self.network,
            ComponentKind::Gateway => &self.gateway,
            ComponentKind::Compute => &self.compute,
            ComponentKind::Storage => &self.storage,
            ComponentKind::Actor => &self.actor,
        }
    }

    pub fn style_mut(&mut self, kind: ComponentKind) -> &mut KindStyle {
        match kind {
            ComponentKind::Tenancy => &mut self.tenancy,
            ComponentKind::Container => &mut self.container,
            ComponentKind::Network => &mut self.network,
            ComponentKind::Gateway => &mut self.gateway,
            ComponentKind::Compute => &mut self.compute,
            ComponentKind::Storage => &mut self.storage,
            ComponentKind::Actor => &mut self.actor,
        }
    }

    pub fn stroke_width(&self, kind: ComponentKind) -> f32 {
        if kind.is_container() {
            self.boundary_stroke_width
        } else {
            self.node_stroke_width
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dfd_default()
    }
}

/// Stacking bands for one diagram.
///
/// Boundaries get `base + depth * step`; leaf nodes share a band that starts
/// above the deepest boundary; edges sit above every leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZBands {
    boundary_base: i32,
    boundary_step: i32,
    leaf_floor: i32,
    edge: i32,
}

impl ZBands {
    pub fn new(config: &LayoutConfig, max_boundary_depth: usize) -> Self {
        let boundary_base = config.boundary_z_base;
        let boundary_step = config.boundary_z_step.max(1);
        let depth = i32::try_from(max_boundary_depth).unwrap_or(i32::MAX / 2);
        let top_boundary = boundary_base.saturating_add(depth.saturating_mul(boundary_step));
        let leaf_floor = config.leaf_z.max(top_boundary.saturating_add(1));
        let edge = config.edge_z.max(leaf_floor.saturating_add(2));
        Self {
            boundary_base,
            boundary_step,
            leaf_floor,
            edge,
        }
    }

    pub fn boundary(&self, depth: usize) -> i32 {
        let depth = i32::try_from(depth).unwrap_or(i32::MAX / 2);
        self.boundary_base
            .saturating_add(depth.saturating_mul(self.boundary_step))
    }

    /// Boundaries by depth; gateways one step below the other leaf kinds.
    pub fn component(&self, kind: ComponentKind, depth: usize) -> i32 {
        match kind {
            ComponentKind::Tenancy | ComponentKind::Container | ComponentKind::Network => {
                self.boundary(depth)
            }
            ComponentKind::Gateway => self.leaf_floor,
            ComponentKind::Compute | ComponentKind::Storage | ComponentKind::Actor => {
                self.leaf_floor.saturating_add(1)
            }
        }
    }

    pub fn edge(&self) -> i32 {
        self.edge
    }
}
