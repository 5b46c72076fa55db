use std::collections::{HashMap, HashSet};

use dfd_layout::cells::{PORT_IN, PORT_OUT};
use dfd_layout::ir::PortNumber;
use dfd_layout::{
    Cell, CellIdMode, Component, ComponentKind, Document, Flow, LayoutConfig, NodeCell, Theme,
    build_cells,
};
use proptest::prelude::*;

// ===================
// Strategies
// ===================

fn kind_strategy() -> impl Strategy<Value = ComponentKind> {
    prop::sample::select(ComponentKind::ALL.to_vec())
}

/// Random containment forests: each component may nest under any earlier
/// container, so the result is always acyclic. With `long_names`, names are
/// wide enough that boundary titles, not children, set many widths.
fn document_strategy(long_names: bool) -> impl Strategy<Value = Document> {
    let components = prop::collection::vec(
        (kind_strategy(), any::<Option<prop::sample::Index>>(), 0usize..6),
        0..60,
    );
    let flows = prop::collection::vec(
        (any::<prop::sample::Index>(), any::<prop::sample::Index>(), any::<bool>(), any::<bool>()),
        0..40,
    );
    (components, flows).prop_map(move |(components, flows)| {
        let mut kinds: Vec<ComponentKind> = Vec::with_capacity(components.len());
        let mut out = Vec::with_capacity(components.len());
        for (i, (kind, parent, words)) in components.into_iter().enumerate() {
            let parent_id = parent
                .filter(|_| i > 0)
                .map(|pick| pick.index(i))
                .filter(|&j| kinds[j].is_container())
                .map(|j| format!("n{j}"));
            out.push(Component {
                id: format!("n{i}"),
                name: if long_names {
                    format!("{}{kind} {i}", "Shared payments segment, region west; ".repeat(words))
                } else {
                    format!("{kind} {i}")
                },
                kind: kind.as_str().to_string(),
                parent_id,
                description: None,
                subtype: None,
            });
            kinds.push(kind);
        }

        let flows = if out.is_empty() {
            Vec::new()
        } else {
            flows
                .into_iter()
                .enumerate()
                .map(|(i, (from, to, bidirectional, with_port))| Flow {
                    id: format!("f{i}"),
                    source_id: format!("n{}", from.index(out.len())),
                    target_id: format!("n{}", to.index(out.len())),
                    label: format!("flow {i}"),
                    reverse_label: None,
                    protocol: with_port.then(|| "TCP".to_string()),
                    port: with_port.then_some(PortNumber::Number(443)),
                    bidirectional,
                })
                .collect()
        };

        Document {
            components: out,
            flows,
        }
    })
}

// ===================
// Checks
// ===================

fn check_layout_is_well_formed(doc: &Document) -> Result<(), TestCaseError> {
    let config = LayoutConfig::default();
    let cells = build_cells(doc, &config, &Theme::dfd_default())
        .map_err(|err| TestCaseError::fail(err.to_string()))?;

    let nodes: Vec<&NodeCell> = cells.iter().filter_map(Cell::as_node).collect();
    prop_assert_eq!(nodes.len(), doc.components.len());
    let expected_edges: usize = doc
        .flows
        .iter()
        .map(|f| if f.bidirectional { 2 } else { 1 })
        .sum();
    prop_assert_eq!(cells.len() - nodes.len(), expected_edges);

    let ids: HashSet<&str> = cells.iter().map(Cell::id).collect();
    prop_assert_eq!(ids.len(), cells.len());

    let by_id: HashMap<&str, &NodeCell> = nodes.iter().map(|n| (n.id.as_str(), *n)).collect();
    for n in &nodes {
        if let Some(parent_id) = &n.parent {
            let parent = by_id[parent_id.as_str()];
            prop_assert!(parent.rect().contains_inset(&n.rect(), config.padding));
            prop_assert!(parent.z_index < n.z_index);
        }
    }

    for (i, a) in nodes.iter().enumerate() {
        for b in nodes.iter().skip(i + 1) {
            if a.parent == b.parent {
                prop_assert!(!a.rect().intersects(&b.rect()), "{} overlaps {}", a.id, b.id);
            }
        }
    }

    let top_node = nodes.iter().map(|n| n.z_index).max().unwrap_or(i32::MIN);
    let top_boundary = nodes
        .iter()
        .filter(|n| n.is_boundary())
        .map(|n| n.z_index)
        .max()
        .unwrap_or(i32::MIN);
    for leaf in nodes.iter().filter(|n| !n.is_boundary()) {
        prop_assert!(leaf.z_index > top_boundary);
    }
    for edge in cells.iter().filter_map(Cell::as_edge) {
        prop_assert!(edge.z_index > top_node);
        prop_assert!(by_id.contains_key(edge.source.cell.as_str()));
        prop_assert!(by_id.contains_key(edge.target.cell.as_str()));
        prop_assert_eq!(edge.source.port.as_str(), PORT_OUT);
        prop_assert_eq!(edge.target.port.as_str(), PORT_IN);
    }
    Ok(())
}

fn check_layout_is_deterministic(doc: &Document) -> Result<(), TestCaseError> {
    let config = LayoutConfig::default();
    let theme = Theme::dfd_default();
    let first = build_cells(doc, &config, &theme).map_err(|err| TestCaseError::fail(err.to_string()))?;
    let second = build_cells(doc, &config, &theme).map_err(|err| TestCaseError::fail(err.to_string()))?;
    prop_assert_eq!(first, second);
    Ok(())
}

fn check_id_modes_share_geometry(doc: &Document) -> Result<(), TestCaseError> {
    let theme = Theme::dfd_default();
    let plain = LayoutConfig::default();
    let uuid = LayoutConfig {
        cell_ids: CellIdMode::Uuid,
        ..LayoutConfig::default()
    };
    let a = build_cells(doc, &plain, &theme).map_err(|err| TestCaseError::fail(err.to_string()))?;
    let b = build_cells(doc, &uuid, &theme).map_err(|err| TestCaseError::fail(err.to_string()))?;
    prop_assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        prop_assert_eq!(x.z_index(), y.z_index());
        if let (Some(x), Some(y)) = (x.as_node(), y.as_node()) {
            prop_assert_eq!(x.rect(), y.rect());
            prop_assert_eq!(CellIdMode::Uuid.node_id(&x.id), y.id.clone());
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn layout_is_well_formed(doc in document_strategy(false)) {
        check_layout_is_well_formed(&doc)?;
    }

    #[test]
    fn long_titles_keep_children_inset(doc in document_strategy(true)) {
        check_layout_is_well_formed(&doc)?;
    }

    #[test]
    fn layout_is_deterministic(doc in document_strategy(true)) {
        check_layout_is_deterministic(&doc)?;
    }

    #[test]
    fn id_modes_share_geometry(doc in document_strategy(false)) {
        check_id_modes_share_geometry(&doc)?;
    }
}
