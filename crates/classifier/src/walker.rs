//! Pre-order traversal of the hardware tree

use crate::fields::{children, node_name};
use model::RawNode;
use tracing::warn;

/// Separator placed between ancestor names in a path description
pub const PATH_SEPARATOR: &str = " > ";

/// Nodes at this depth are still visited but their children are not
///
/// Input trees are acyclic, so this only bounds pathological payloads.
pub const MAX_DEPTH: usize = 64;

/// A node reached during traversal, with the names leading to it
#[derive(Debug, Clone)]
pub struct Visit<'a> {
    pub node: &'a RawNode,
    /// Names of named ancestors, ending with this node's own name if it has one
    pub segments: Vec<String>,
    /// Distance from the root (roots are at depth 0)
    pub depth: usize,
}

impl Visit<'_> {
    /// Segments joined with [`PATH_SEPARATOR`]
    pub fn path_description(&self) -> String {
        self.segments.join(PATH_SEPARATOR)
    }
}

/// Flatten `roots` into a pre-order list of visits
///
/// Parents come before their children and siblings keep their original
/// order. Every node is expanded whether or not it is later classified.
pub fn walk(roots: &[RawNode]) -> Vec<Visit<'_>> {
    let mut visits = Vec::new();
    let mut stack: Vec<(&RawNode, Vec<String>, usize)> = roots
        .iter()
        .rev()
        .map(|root| (root, Vec::new(), 0))
        .collect();

    while let Some((node, mut segments, depth)) = stack.pop() {
        if let Some(name) = node_name(node) {
            segments.push(name);
        }

        if depth < MAX_DEPTH {
            let kids: Vec<&RawNode> = children(node).collect();
            for child in kids.into_iter().rev() {
                stack.push((child, segments.clone(), depth + 1));
            }
        } else if children(node).next().is_some() {
            warn!(
                "Hardware tree deeper than {} levels at '{}', skipping its children",
                MAX_DEPTH,
                segments.join(PATH_SEPARATOR)
            );
        }

        visits.push(Visit {
            node,
            segments,
            depth,
        });
    }

    visits
}
