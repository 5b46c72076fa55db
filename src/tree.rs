//! Containment forest built from validated parent links.
//!
//! Arena storage: node `i` describes component `i` of the validated graph and
//! all links are indices into the same arena.

use crate::validate::ValidatedGraph;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNode {
    pub parent: Option<usize>,
    /// Children in input order; this order drives grid placement.
    pub children: Vec<usize>,
    pub depth: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Forest {
    nodes: Vec<TreeNode>,
    roots: Vec<usize>,
    preorder: Vec<usize>,
}

impl Forest {
    pub fn build(graph: &ValidatedGraph<'_>) -> Self {
        let components = graph.components();
        let mut nodes = vec![TreeNode::default(); components.len()];
        let mut roots = Vec::new();

        for (idx, component) in components.iter().enumerate() {
            match component.parent {
                Some(parent) => {
                    nodes[idx].parent = Some(parent);
                    nodes[parent].children.push(idx);
                }
                None => roots.push(idx),
            }
        }

        let mut preorder = Vec::with_capacity(nodes.len());
        let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
        while let Some(idx) = stack.pop() {
            preorder.push(idx);
            let depth = nodes[idx].depth + 1;
            for pos in (0..nodes[idx].children.len()).rev() {
                let child = nodes[idx].children[pos];
                nodes[child].depth = depth;
                stack.push(child);
            }
        }

        Self {
            nodes,
            roots,
            preorder,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, idx: usize) -> &TreeNode {
        &self.nodes[idx]
    }

    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Parents before children, siblings in input order.
    pub fn preorder(&self) -> &[usize] {
        &self.preorder
    }

    /// Children before parents.
    pub fn postorder(&self) -> impl Iterator<Item = usize> + '_ {
        self.preorder.iter().rev().copied()
    }
}
