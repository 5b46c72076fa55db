//! Input validation: the only gate between extractor output and layout.
//!
//! Extractor output is produced by a language model and cannot be trusted to
//! be structurally sound, so every reference is resolved here once and later
//! stages work on indices.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::cells::CellIdMode;
use crate::edges::EdgeDirection;
use crate::error::{FlowEnd, ValidationError};
use crate::ir::{Component, ComponentKind, Document, Flow};

#[derive(Debug, Clone)]
pub struct ValidComponent<'a> {
    pub source: &'a Component,
    pub kind: ComponentKind,
    /// Resolved containment parent. Always `None` for actors.
    pub parent: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ValidFlow<'a> {
    pub source: &'a Flow,
    pub from: usize,
    pub to: usize,
}

/// A document whose ids, kinds and references have all been checked.
///
/// Only [`validate`] constructs this type.
#[derive(Debug, Clone)]
pub struct ValidatedGraph<'a> {
    components: Vec<ValidComponent<'a>>,
    flows: Vec<ValidFlow<'a>>,
}

impl<'a> ValidatedGraph<'a> {
    pub fn components(&self) -> &[ValidComponent<'a>] {
        &self.components
    }

    pub fn flows(&self) -> &[ValidFlow<'a>] {
        &self.flows
    }

    pub fn component(&self, idx: usize) -> &ValidComponent<'a> {
        &self.components[idx]
    }
}

pub fn validate(doc: &Document, ids: CellIdMode) -> Result<ValidatedGraph<'_>, ValidationError> {
    let mut index_by_id: HashMap<&str, usize> = HashMap::with_capacity(doc.components.len());
    let mut kinds = Vec::with_capacity(doc.components.len());

    for (index, component) in doc.components.iter().enumerate() {
        if component.id.trim().is_empty() {
            return Err(ValidationError::EmptyComponentId { index });
        }
        if index_by_id.insert(component.id.as_str(), index).is_some() {
            return Err(ValidationError::DuplicateComponentId {
                id: component.id.clone(),
            });
        }
        let kind = ComponentKind::from_token(component.kind.trim()).ok_or_else(|| {
            ValidationError::UnknownKind {
                id: component.id.clone(),
                kind: component.kind.clone(),
            }
        })?;
        kinds.push(kind);
    }

    let mut components = Vec::with_capacity(doc.components.len());
    for (component, &kind) in doc.components.iter().zip(&kinds) {
        let parent = match component.parent_id.as_deref() {
            None => None,
            Some(parent_id) => {
                let &parent_idx =
                    index_by_id
                        .get(parent_id)
                        .ok_or_else(|| ValidationError::MissingParent {
                            id: component.id.clone(),
                            parent: parent_id.to_string(),
                        })?;
                // Actors float at the top level whatever they claim to be
                // inside; only the reference itself must resolve.
                if kind == ComponentKind::Actor {
                    None
                } else {
                    let parent_kind = kinds[parent_idx];
                    if !parent_kind.is_container() {
                        return Err(ValidationError::InvalidParent {
                            id: component.id.clone(),
                            parent: parent_id.to_string(),
                            parent_kind,
                        });
                    }
                    Some(parent_idx)
                }
            }
        };
        components.push(ValidComponent {
            source: component,
            kind,
            parent,
        });
    }

    if let Some(cycle) = find_cycle(&components) {
        return Err(ValidationError::ContainmentCycle {
            ids: cycle
                .into_iter()
                .map(|idx| components[idx].source.id.clone())
                .collect(),
        });
    }

    let mut flow_ids: HashSet<&str> = HashSet::with_capacity(doc.flows.len());
    let mut flows = Vec::with_capacity(doc.flows.len());
    for (index, flow) in doc.flows.iter().enumerate() {
        if flow.id.trim().is_empty() {
            return Err(ValidationError::EmptyFlowId { index });
        }
        if !flow_ids.insert(flow.id.as_str()) {
            return Err(ValidationError::DuplicateFlowId {
                id: flow.id.clone(),
            });
        }
        let resolve = |id: &str, end: FlowEnd| {
            index_by_id
                .get(id)
                .copied()
                .ok_or_else(|| ValidationError::DanglingEndpoint {
                    flow: flow.id.clone(),
                    end,
                    id: id.to_string(),
                })
        };
        let from = resolve(&flow.source_id, FlowEnd::Source)?;
        let to = resolve(&flow.target_id, FlowEnd::Target)?;
        flows.push(ValidFlow {
            source: flow,
            from,
            to,
        });
    }

    check_cell_ids(&components, &flows, ids)?;

    debug!(
        components = components.len(),
        flows = flows.len();
        "validated diagram input"
    );

    Ok(ValidatedGraph { components, flows })
}

/// Follows parent links from every component, marking finished chains so each
/// link is walked once. Returns the cycle in link order (child, its parent, ...).
fn find_cycle(components: &[ValidComponent<'_>]) -> Option<Vec<usize>> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Unvisited,
        OnPath,
        Done,
    }

    let mut marks = vec![Mark::Unvisited; components.len()];
    let mut path = Vec::new();

    for start in 0..components.len() {
        if marks[start] != Mark::Unvisited {
            continue;
        }
        path.clear();
        let mut current = Some(start);
        while let Some(idx) = current {
            match marks[idx] {
                Mark::Done => break,
                Mark::OnPath => {
                    let pos = path.iter().position(|&p| p == idx).unwrap_or(0);
                    return Some(path.split_off(pos));
                }
                Mark::Unvisited => {
                    marks[idx] = Mark::OnPath;
                    path.push(idx);
                    current = components[idx].parent;
                }
            }
        }
        for &idx in &path {
            marks[idx] = Mark::Done;
        }
    }
    None
}

fn check_cell_ids(
    components: &[ValidComponent<'_>],
    flows: &[ValidFlow<'_>],
    ids: CellIdMode,
) -> Result<(), ValidationError> {
    let mut seen: HashSet<String> = HashSet::with_capacity(components.len() + flows.len() * 2);
    for component in components {
        seen.insert(ids.node_id(&component.source.id));
    }
    for flow in flows {
        for &direction in EdgeDirection::for_flow(flow.source) {
            let id = ids.edge_id(&flow.source.id, direction);
            if !seen.insert(id.clone()) {
                return Err(ValidationError::CellIdCollision { id });
            }
        }
    }
    Ok(())
}
