use crate::cells::{
    Cell, CellData, CellIdMode, EdgeAttrs, EdgeCell, EdgeLabel, LabelAttrs, LineAttrs, Marker,
    Named, PORT_IN, PORT_OUT, Terminal, TextAttrs,
};
use crate::ir::Flow;
use crate::theme::{CellShape, Theme, ZBands};
use crate::validate::{ValidFlow, ValidatedGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDirection {
    /// The only edge of a one-way flow.
    Single,
    /// `source -> target` half of a bidirectional flow.
    Forward,
    /// `target -> source` half of a bidirectional flow.
    Reverse,
}

impl EdgeDirection {
    pub fn for_flow(flow: &Flow) -> &'static [EdgeDirection] {
        if flow.bidirectional {
            &[EdgeDirection::Forward, EdgeDirection::Reverse]
        } else {
            &[EdgeDirection::Single]
        }
    }

    pub(crate) fn id_suffix(self) -> &'static str {
        match self {
            EdgeDirection::Single => "",
            EdgeDirection::Forward => ":forward",
            EdgeDirection::Reverse => ":reverse",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            EdgeDirection::Single | EdgeDirection::Forward => "forward",
            EdgeDirection::Reverse => "reverse",
        }
    }
}

/// Edge cells for every flow, in flow order.
pub fn build_edges(
    graph: &ValidatedGraph<'_>,
    theme: &Theme,
    bands: &ZBands,
    ids: CellIdMode,
) -> Vec<Cell> {
    graph
        .flows()
        .iter()
        .flat_map(|flow| {
            EdgeDirection::for_flow(flow.source)
                .iter()
                .map(move |&direction| Cell::Edge(edge_cell(graph, flow, direction, theme, bands, ids)))
        })
        .collect()
}

fn edge_cell(
    graph: &ValidatedGraph<'_>,
    flow: &ValidFlow<'_>,
    direction: EdgeDirection,
    theme: &Theme,
    bands: &ZBands,
    ids: CellIdMode,
) -> EdgeCell {
    let (from, to) = match direction {
        EdgeDirection::Single | EdgeDirection::Forward => (flow.from, flow.to),
        EdgeDirection::Reverse => (flow.to, flow.from),
    };
    let source_id = &graph.component(from).source.id;
    let target_id = &graph.component(to).source.id;

    let text = label_text(flow.source, direction);
    let labels = if text.is_empty() {
        Vec::new()
    } else {
        vec![EdgeLabel {
            attrs: LabelAttrs {
                text: TextAttrs { text },
            },
        }]
    };

    let mut data = CellData::default();
    data.push("flow_id", flow.source.id.as_str());
    data.push("direction", direction.as_str());
    if let Some(protocol) = &flow.source.protocol {
        data.push("protocol", protocol.as_str());
    }
    if let Some(port) = &flow.source.port {
        data.push("port", port.to_string());
    }

    EdgeCell {
        id: ids.edge_id(&flow.source.id, direction),
        shape: CellShape::Edge,
        source: Terminal {
            cell: ids.node_id(source_id),
            port: PORT_OUT.to_string(),
        },
        target: Terminal {
            cell: ids.node_id(target_id),
            port: PORT_IN.to_string(),
        },
        z_index: bands.edge(),
        attrs: EdgeAttrs {
            line: LineAttrs {
                stroke: theme.edge_stroke.clone(),
                stroke_width: theme.edge_stroke_width,
                target_marker: Marker {
                    name: "block".to_string(),
                    width: 12.0,
                    height: 8.0,
                },
            },
        },
        labels,
        router: Named::new("manhattan"),
        connector: Named::new("rounded"),
        data,
    }
}

/// Flow label verbatim, followed by ` (PROTOCOL)` or ` (PROTOCOL:PORT)` when
/// the extractor supplied the protocol separately.
fn label_text(flow: &Flow, direction: EdgeDirection) -> String {
    let base = match direction {
        EdgeDirection::Reverse => flow.reverse_label.as_deref().unwrap_or(&flow.label),
        EdgeDirection::Single | EdgeDirection::Forward => flow.label.as_str(),
    };
    let Some(protocol) = flow.protocol.as_deref().filter(|p| !p.trim().is_empty()) else {
        return base.to_string();
    };
    let suffix = match &flow.port {
        Some(port) => format!("({protocol}:{port})"),
        None => format!("({protocol})"),
    };
    if base.is_empty() {
        suffix
    } else {
        format!("{base} {suffix}")
    }
}
