use crate::cells::CellIdMode;
use crate::ir::ComponentKind;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Inset between a boundary's edge and its children, on every side.
    pub padding: f32,
    /// Gap between grid rows and columns inside a boundary.
    pub node_spacing: f32,
    pub node_width: f32,
    pub node_height: f32,
    /// Extra top inset reserved for the boundary label.
    pub title_bar_height: f32,
    pub min_boundary_width: f32,
    pub min_boundary_height: f32,
    pub root_spacing: f32,
    pub origin_x: f32,
    pub origin_y: f32,
    pub max_columns: usize,
    pub boundary_z_base: i32,
    pub boundary_z_step: i32,
    pub leaf_z: i32,
    pub edge_z: i32,
    pub cell_ids: CellIdMode,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 50.0,
            node_spacing: 30.0,
            node_width: 120.0,
            node_height: 60.0,
            title_bar_height: 30.0,
            min_boundary_width: 400.0,
            min_boundary_height: 300.0,
            root_spacing: 50.0,
            origin_x: 50.0,
            origin_y: 50.0,
            max_columns: 4,
            boundary_z_base: 1,
            boundary_z_step: 1,
            leaf_z: 10,
            edge_z: 20,
            cell_ids: CellIdMode::Component,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    padding: Option<f32>,
    node_spacing: Option<f32>,
    node_width: Option<f32>,
    node_height: Option<f32>,
    title_bar_height: Option<f32>,
    min_boundary_width: Option<f32>,
    min_boundary_height: Option<f32>,
    root_spacing: Option<f32>,
    origin_x: Option<f32>,
    origin_y: Option<f32>,
    max_columns: Option<usize>,
    boundary_z_base: Option<i32>,
    boundary_z_step: Option<i32>,
    leaf_z: Option<i32>,
    edge_z: Option<i32>,
    cell_ids: Option<CellIdMode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KindStyleFile {
    fill: Option<String>,
    stroke: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    layout: Option<LayoutConfigFile>,
    /// Kind tokens, resolved with `ComponentKind::from_token`.
    kind_styles: Option<BTreeMap<String, KindStyleFile>>,
    boundary_stroke_width: Option<f32>,
    node_stroke_width: Option<f32>,
    edge_stroke: Option<String>,
    edge_stroke_width: Option<f32>,
    font_size: Option<f32>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    parse_config(&contents)
}

/// Applies a JSON (or JSON5) override file on top of the defaults.
pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let parsed: ConfigFile = json5::from_str(contents)?;

    if let Some(layout) = parsed.layout {
        let target = &mut config.layout;
        let sizes = [
            (layout.padding, &mut target.padding),
            (layout.node_spacing, &mut target.node_spacing),
            (layout.node_width, &mut target.node_width),
            (layout.node_height, &mut target.node_height),
            (layout.title_bar_height, &mut target.title_bar_height),
            (layout.min_boundary_width, &mut target.min_boundary_width),
            (layout.min_boundary_height, &mut target.min_boundary_height),
            (layout.root_spacing, &mut target.root_spacing),
        ];
        for (value, slot) in sizes {
            if let Some(v) = value {
                *slot = v.max(0.0);
            }
        }
        if let Some(v) = layout.origin_x {
            target.origin_x = v;
        }
        if let Some(v) = layout.origin_y {
            target.origin_y = v;
        }
        if let Some(v) = layout.max_columns {
            target.max_columns = v.max(1);
        }
        if let Some(v) = layout.boundary_z_base {
            target.boundary_z_base = v;
        }
        if let Some(v) = layout.boundary_z_step {
            target.boundary_z_step = v.max(1);
        }
        if let Some(v) = layout.leaf_z {
            target.leaf_z = v;
        }
        if let Some(v) = layout.edge_z {
            target.edge_z = v;
        }
        if let Some(v) = layout.cell_ids {
            target.cell_ids = v;
        }
    }

    if let Some(styles) = parsed.kind_styles {
        for (token, style) in styles {
            let Some(kind) = ComponentKind::from_token(token.trim()) else {
                anyhow::bail!("unknown component kind in kindStyles: {token}");
            };
            let target = config.theme.style_mut(kind);
            if let Some(fill) = style.fill {
                target.fill = fill;
            }
            if let Some(stroke) = style.stroke {
                target.stroke = stroke;
            }
        }
    }
    if let Some(v) = parsed.boundary_stroke_width {
        config.theme.boundary_stroke_width = v.max(0.0);
    }
    if let Some(v) = parsed.node_stroke_width {
        config.theme.node_stroke_width = v.max(0.0);
    }
    if let Some(v) = parsed.edge_stroke {
        config.theme.edge_stroke = v;
    }
    if let Some(v) = parsed.edge_stroke_width {
        config.theme.edge_stroke_width = v.max(0.0);
    }
    if let Some(v) = parsed.font_size {
        config.theme.font_size = v.max(1.0);
    }

    Ok(config)
}
