use crate::ir::ComponentKind;
use std::fmt;

/// Which end of a flow failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEnd {
    Source,
    Target,
}

impl fmt::Display for FlowEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowEnd::Source => f.write_str("source"),
            FlowEnd::Target => f.write_str("target"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("component at index {index} has an empty id")]
    EmptyComponentId { index: usize },
    #[error("duplicate component id: {id}")]
    DuplicateComponentId { id: String },
    #[error("component {id} has unknown kind {kind:?}")]
    UnknownKind { id: String, kind: String },
    #[error("component {id} references missing parent {parent}")]
    MissingParent { id: String, parent: String },
    /// A non-actor component names a leaf or actor as its parent. Actor
    /// parents are never checked for kind since actors are always top-level.
    #[error("component {id} cannot be nested in {parent}: {parent_kind} components have no children")]
    InvalidParent {
        id: String,
        parent: String,
        parent_kind: ComponentKind,
    },
    #[error("containment cycle: {}", format_cycle(.ids))]
    ContainmentCycle { ids: Vec<String> },
    #[error("flow at index {index} has an empty id")]
    EmptyFlowId { index: usize },
    #[error("duplicate flow id: {id}")]
    DuplicateFlowId { id: String },
    #[error("flow {flow} references missing {end} component {id}")]
    DanglingEndpoint { flow: String, end: FlowEnd, id: String },
    #[error("cell id {id} would be emitted more than once")]
    CellIdCollision { id: String },
}

impl ValidationError {
    /// Input ids named by this error, for callers that highlight offending entries.
    pub fn ids(&self) -> Vec<&str> {
        match self {
            Self::EmptyComponentId { .. } | Self::EmptyFlowId { .. } => Vec::new(),
            Self::DuplicateComponentId { id }
            | Self::UnknownKind { id, .. }
            | Self::DuplicateFlowId { id }
            | Self::CellIdCollision { id } => vec![id.as_str()],
            Self::MissingParent { id, parent } | Self::InvalidParent { id, parent, .. } => {
                vec![id.as_str(), parent.as_str()]
            }
            Self::ContainmentCycle { ids } => ids.iter().map(String::as_str).collect(),
            Self::DanglingEndpoint { flow, id, .. } => vec![flow.as_str(), id.as_str()],
        }
    }
}

fn format_cycle(ids: &[String]) -> String {
    let mut out = ids.join(" -> ");
    if let Some(first) = ids.first() {
        out.push_str(" -> ");
        out.push_str(first);
    }
    out
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid diagram input: {0}")]
    Validation(#[from] ValidationError),
    #[error("malformed diagram document: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
