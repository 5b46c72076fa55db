//! Output cell model in the attribute shape of the AntV X6 editor, and the
//! construction of boundary and leaf cells from a finished layout.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::edges::EdgeDirection;
use crate::layout::{Layout, Rect};
use crate::theme::{CellShape, Theme, ZBands};
use crate::tree::Forest;
use crate::validate::ValidatedGraph;

pub const PORT_IN: &str = "port-in";
pub const PORT_OUT: &str = "port-out";

/// How cell ids are derived from input ids. Both modes are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellIdMode {
    /// Component cells reuse the component id, edges the flow id.
    #[default]
    Component,
    /// Name-based UUIDs (v5) of the same keys, for stores that require UUID ids.
    Uuid,
}

impl CellIdMode {
    pub fn node_id(self, component_id: &str) -> String {
        match self {
            CellIdMode::Component => component_id.to_string(),
            CellIdMode::Uuid => name_uuid(&format!("component/{component_id}")),
        }
    }

    pub fn edge_id(self, flow_id: &str, direction: EdgeDirection) -> String {
        let suffix = direction.id_suffix();
        match self {
            CellIdMode::Component => format!("{flow_id}{suffix}"),
            CellIdMode::Uuid => name_uuid(&format!("flow/{flow_id}{suffix}")),
        }
    }
}

fn name_uuid(key: &str) -> String {
    let namespace = Uuid::new_v5(&Uuid::NAMESPACE_URL, b"urn:dfd-layout:cell");
    Uuid::new_v5(&namespace, key.as_bytes()).to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Edge(EdgeCell),
    Node(NodeCell),
}

impl Cell {
    pub fn id(&self) -> &str {
        match self {
            Cell::Node(node) => &node.id,
            Cell::Edge(edge) => &edge.id,
        }
    }

    pub fn z_index(&self) -> i32 {
        match self {
            Cell::Node(node) => node.z_index,
            Cell::Edge(edge) => edge.z_index,
        }
    }

    pub fn as_node(&self) -> Option<&NodeCell> {
        match self {
            Cell::Node(node) => Some(node),
            Cell::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&EdgeCell> {
        match self {
            Cell::Edge(edge) => Some(edge),
            Cell::Node(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCell {
    pub id: String,
    pub shape: CellShape,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub z_index: i32,
    pub attrs: NodeAttrs,
    pub ports: Ports,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    pub data: CellData,
}

impl NodeCell {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn is_boundary(&self) -> bool {
        self.shape == CellShape::SecurityBoundary
    }

    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.data.get(key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeAttrs {
    pub body: BodyAttrs,
    pub text: TextAttrs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyAttrs {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextAttrs {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ports {
    pub groups: PortGroups,
    pub items: Vec<PortItem>,
}

impl Ports {
    /// One inbound port on the left, one outbound port on the right.
    pub fn in_out() -> Self {
        Self {
            groups: PortGroups {
                inbound: PortGroup {
                    position: "left".to_string(),
                },
                outbound: PortGroup {
                    position: "right".to_string(),
                },
            },
            items: vec![
                PortItem {
                    id: PORT_IN.to_string(),
                    group: "in".to_string(),
                },
                PortItem {
                    id: PORT_OUT.to_string(),
                    group: "out".to_string(),
                },
            ],
        }
    }

    pub fn has(&self, port: &str) -> bool {
        self.items.iter().any(|item| item.id == port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortGroups {
    #[serde(rename = "in")]
    pub inbound: PortGroup,
    #[serde(rename = "out")]
    pub outbound: PortGroup,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortGroup {
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortItem {
    pub id: String,
    pub group: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CellData {
    #[serde(rename = "_metadata")]
    pub metadata: Vec<MetadataEntry>,
}

impl CellData {
    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        self.metadata.push(MetadataEntry {
            key: key.to_string(),
            value: value.into(),
        });
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeCell {
    pub id: String,
    pub shape: CellShape,
    pub source: Terminal,
    pub target: Terminal,
    pub z_index: i32,
    pub attrs: EdgeAttrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<EdgeLabel>,
    pub router: Named,
    pub connector: Named,
    pub data: CellData,
}

impl EdgeCell {
    pub fn label(&self) -> Option<&str> {
        self.labels.first().map(|label| label.attrs.text.text.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terminal {
    pub cell: String,
    pub port: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeAttrs {
    pub line: LineAttrs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineAttrs {
    pub stroke: String,
    pub stroke_width: f32,
    pub target_marker: Marker,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub name: String,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeLabel {
    pub attrs: LabelAttrs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelAttrs {
    pub text: TextAttrs,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Named {
    pub name: String,
}

impl Named {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// Boundary cells in pre-order, then leaf cells in pre-order, so every
/// parent cell precedes its children.
pub fn build_node_cells(
    graph: &ValidatedGraph<'_>,
    forest: &Forest,
    layout: &Layout,
    theme: &Theme,
    bands: &ZBands,
    ids: CellIdMode,
) -> Vec<Cell> {
    let (boundaries, leaves): (Vec<usize>, Vec<usize>) = forest
        .preorder()
        .iter()
        .partition(|&&idx| graph.component(idx).kind.is_container());

    boundaries
        .into_iter()
        .chain(leaves)
        .map(|idx| Cell::Node(node_cell(graph, forest, layout, theme, bands, ids, idx)))
        .collect()
}

fn node_cell(
    graph: &ValidatedGraph<'_>,
    forest: &Forest,
    layout: &Layout,
    theme: &Theme,
    bands: &ZBands,
    ids: CellIdMode,
    idx: usize,
) -> NodeCell {
    let component = graph.component(idx);
    let tree_node = forest.node(idx);
    let rect = layout.boxes[idx];
    let style = theme.style(component.kind);

    let mut data = CellData::default();
    data.push("component_id", component.source.id.as_str());
    data.push("component_type", component.kind.as_str());
    if let Some(subtype) = &component.source.subtype {
        data.push("component_subtype", subtype.as_str());
    }
    if let Some(description) = &component.source.description {
        data.push("description", description.as_str());
    }

    NodeCell {
        id: ids.node_id(&component.source.id),
        shape: CellShape::for_kind(component.kind),
        x: rect.x,
        y: rect.y,
        width: rect.width,
        height: rect.height,
        z_index: bands.component(component.kind, tree_node.depth),
        attrs: NodeAttrs {
            body: BodyAttrs {
                fill: style.fill.clone(),
                stroke: style.stroke.clone(),
                stroke_width: theme.stroke_width(component.kind),
            },
            text: TextAttrs {
                text: component.source.name.clone(),
            },
        },
        ports: Ports::in_out(),
        parent: tree_node
            .parent
            .map(|parent| ids.node_id(&graph.component(parent).source.id)),
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_ids_are_stable_and_distinct() {
        let a = CellIdMode::Uuid.node_id("web");
        assert_eq!(a, CellIdMode::Uuid.node_id("web"));
        assert_ne!(a, CellIdMode::Uuid.node_id("db"));
        assert_ne!(a, CellIdMode::Uuid.edge_id("web", EdgeDirection::Single));
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn component_ids_pass_through() {
        assert_eq!(CellIdMode::Component.node_id("c1"), "c1");
        assert_eq!(CellIdMode::Component.edge_id("f1", EdgeDirection::Single), "f1");
        assert_eq!(
            CellIdMode::Component.edge_id("f1", EdgeDirection::Reverse),
            "f1:reverse"
        );
    }

    #[test]
    fn ports_serialize_in_editor_shape() {
        let value = serde_json::to_value(Ports::in_out()).unwrap();
        assert_eq!(value["groups"]["in"]["position"], "left");
        assert_eq!(value["groups"]["out"]["position"], "right");
        assert_eq!(value["items"][0]["id"], PORT_IN);
        assert_eq!(value["items"][1]["group"], "out");
    }

    #[test]
    fn metadata_serializes_under_underscore_key() {
        let mut data = CellData::default();
        data.push("component_id", "c1");
        let value = serde_json::to_value(&data).unwrap();
        assert_eq!(value["_metadata"][0]["key"], "component_id");
        assert_eq!(data.get("component_id"), Some("c1"));
        assert_eq!(data.get("missing"), None);
    }
}
